use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// An error raised by a target constructor, or by the caller's assignment
/// block. Kept as the original error, so it can be downcast.
pub type ConstructError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Wrong number or shape of arguments in an assignment call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArityError {
    /// Strict mode: neither an argument nor a block was given.
    ExpectedValueOrBlock,
    /// Strict mode: more than one positional argument was given.
    TooManyArguments {
        /// How many positional arguments were passed.
        given: usize,
    },
    /// Strict mode: both an argument and a block were given.
    ValueAndBlock,
    /// Rich mode: keyword arguments were mixed with positional arguments or
    /// a block.
    KeywordAndPositional,
    /// Rich mode: no arguments and no block.
    ExpectedAtLeastOne,
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityError::ExpectedValueOrBlock => write!(f, "expected 1 or block"),
            ArityError::TooManyArguments { given } => {
                write!(f, "expected 1 or block, got {given} arguments")
            }
            ArityError::ValueAndBlock => {
                write!(f, "cannot provide both immediate and block value")
            }
            ArityError::KeywordAndPositional => {
                write!(f, "cannot provide both keyword and positional arguments")
            }
            ArityError::ExpectedAtLeastOne => {
                write!(f, "expected at least one argument or block")
            }
        }
    }
}

impl core::error::Error for ArityError {}

/// The constructor was invoked without some of its required keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeywordError {
    /// The required keywords that hold no value, in declaration order.
    pub keys: Vec<String>,
    /// Type identifier of the target.
    pub target: &'static str,
}

impl fmt::Display for MissingKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.keys.len() == 1 { "" } else { "s" };
        write!(
            f,
            "{} is missing required keyword{plural}: {}",
            self.target,
            self.keys.join(", ")
        )
    }
}

impl core::error::Error for MissingKeywordError {}

/// Everything that can abort a build.
#[derive(Debug)]
#[non_exhaustive]
pub enum BuildError {
    /// The key is not declared and the builder is not a wildcard.
    UnknownKey {
        /// The key that was assigned.
        key: String,
        /// Type identifier of the target.
        target: &'static str,
    },

    /// The assignment call had the wrong arguments.
    Arity {
        /// The key that was assigned.
        key: String,
        /// What was wrong with the arguments.
        error: ArityError,
    },

    /// The key already holds a value, either from the initial attributes or
    /// from an earlier assignment.
    DuplicateAssignment {
        /// The key that was assigned twice.
        key: String,
    },

    /// The target constructor failed.
    Construct(ConstructError),

    /// The caller's assignment block failed with its own error.
    Custom(ConstructError),
}

impl BuildError {
    /// Wraps an error raised by the caller's own code inside an assignment
    /// block.
    pub fn custom(error: impl Into<ConstructError>) -> Self {
        BuildError::Custom(error.into())
    }

    /// The key the error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            BuildError::UnknownKey { key, .. }
            | BuildError::Arity { key, .. }
            | BuildError::DuplicateAssignment { key } => Some(key),
            BuildError::Construct(_) | BuildError::Custom(_) => None,
        }
    }

    /// A copy of an assignment failure. Construction and custom failures own
    /// their boxed error and are never copied.
    pub(crate) fn replicate(&self) -> Option<Self> {
        match self {
            BuildError::UnknownKey { key, target } => Some(BuildError::UnknownKey {
                key: key.clone(),
                target: *target,
            }),
            BuildError::Arity { key, error } => Some(BuildError::Arity {
                key: key.clone(),
                error: *error,
            }),
            BuildError::DuplicateAssignment { key } => {
                Some(BuildError::DuplicateAssignment { key: key.clone() })
            }
            BuildError::Construct(_) | BuildError::Custom(_) => None,
        }
    }

    /// The arity error, if this is one.
    pub fn arity(&self) -> Option<ArityError> {
        match self {
            BuildError::Arity { error, .. } => Some(*error),
            _ => None,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownKey { key, target } => {
                write!(f, "no such operation `{key}` on builder for {target}")
            }
            BuildError::Arity { key, error } => write!(f, "{key}: {error}"),
            BuildError::DuplicateAssignment { key } => write!(f, "{key} already provided"),
            BuildError::Construct(e) => write!(f, "{e}"),
            BuildError::Custom(e) => write!(f, "{e}"),
        }
    }
}

impl core::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            BuildError::Arity { error, .. } => Some(error),
            BuildError::Construct(e) | BuildError::Custom(e) => Some(&**e),
            _ => None,
        }
    }
}

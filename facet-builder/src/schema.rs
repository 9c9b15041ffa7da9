use alloc::string::String;
use core::fmt;

use indexmap::IndexSet;

use crate::signature::{Param, ParamKind, Signature};

/// The legal assignment keys of a constructor, derived from its [`Signature`].
///
/// Immutable once extracted. Keys keep declaration order so that listing
/// them is stable, but membership is all that matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    keys: IndexSet<String>,
    wildcard: bool,
}

/// The constructor cannot be driven by a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// A parameter is bound by position.
    Positional {
        /// Index of the offending parameter in the signature.
        index: usize,
        /// The offending parameter.
        param: Param,
    },

    /// A `#[facet(flatten)]` field can neither be split into keywords nor
    /// collect undeclared keys: it is not a struct, and not a map from
    /// `String` to `facet_value::Value`.
    UnsupportedCatchAll {
        /// Name of the flattened field.
        field: &'static str,
        /// Type identifier of the field.
        shape: &'static str,
    },
}

impl SchemaError {
    /// The positional parameter that was rejected, if that is the cause.
    pub fn param(&self) -> Option<&Param> {
        match self {
            SchemaError::Positional { param, .. } => Some(param),
            SchemaError::UnsupportedCatchAll { .. } => None,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Positional { index, param } => write!(
                f,
                "parameter #{index} is a {param}: builders only support keyword parameters"
            ),
            SchemaError::UnsupportedCatchAll { field, shape } => write!(
                f,
                "flattened field `{field}` is a {shape}: only structs and maps from String to Value can be flattened"
            ),
        }
    }
}

impl core::error::Error for SchemaError {}

impl Schema {
    /// Extracts the key set of `signature`.
    ///
    /// Required and optional keyword names become keys. A keyword catch-all
    /// turns on wildcard mode and is not itself a key. Any positional
    /// parameter fails the extraction.
    pub fn extract(signature: &Signature) -> Result<Self, SchemaError> {
        let mut keys = IndexSet::new();
        let mut wildcard = false;

        for (index, param) in signature.params().iter().enumerate() {
            if param.kind.is_positional() {
                return Err(SchemaError::Positional {
                    index,
                    param: param.clone(),
                });
            }

            match (&param.name, param.kind) {
                (_, ParamKind::KeyRest) => wildcard = true,
                (Some(name), _) => {
                    keys.insert(name.clone());
                }
                // an anonymous keyword parameter cannot be addressed
                (None, _) => {}
            }
        }

        Ok(Self { keys, wildcard })
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Whether `key` is one of the declared keys.
    pub fn declares(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// True if the constructor accepts any extra keyword.
    pub const fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// True if assigning `key` is legal: it is declared, or the schema is a
    /// wildcard.
    pub fn valid_key(&self, key: &str) -> bool {
        self.wildcard || self.declares(key)
    }
}

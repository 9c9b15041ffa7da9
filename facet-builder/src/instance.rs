use alloc::string::String;
use core::fmt;

use facet_value::Value;

use crate::args::Args;
use crate::definition::BuilderDefinition;
use crate::error::BuildError;
use crate::value::{AttrValue, Attrs, Kwargs};

/// One construction attempt: the attributes assigned so far, and the
/// assignment operations of its [`BuilderDefinition`].
///
/// Each key can be assigned once. [`finish`](Self::finish) consumes the
/// instance, so it cannot be touched after the target has been built.
///
/// The first failed assignment is remembered: `finish` returns it instead of
/// invoking the constructor.
pub struct BuilderInstance<'d, T> {
    definition: &'d BuilderDefinition<T>,
    attrs: Attrs,
    failure: Option<BuildError>,
}

impl<'d, T> BuilderInstance<'d, T> {
    pub(crate) fn new(definition: &'d BuilderDefinition<T>, attrs: Attrs) -> Self {
        Self {
            definition,
            attrs,
            failure: None,
        }
    }

    /// Assigns `key` from the arguments of one call.
    ///
    /// Fails if the builder has no operation named `key`, if `key` already
    /// holds a value, or if `args` do not fit the builder's [`Mode`](crate::Mode).
    pub fn assign(&mut self, key: &str, args: Args) -> Result<&mut Self, BuildError> {
        match self.resolve(key, args) {
            Ok(value) => {
                trace!(key, ?value, "assigned");
                self.attrs.insert(key.into(), value);
                Ok(self)
            }
            Err(error) => {
                trace!(key, %error, "assignment failed");
                if self.failure.is_none() {
                    self.failure = error.replicate();
                }
                Err(error)
            }
        }
    }

    fn resolve(&self, key: &str, args: Args) -> Result<AttrValue, BuildError> {
        if !self.definition.valid_key(key) {
            return Err(BuildError::UnknownKey {
                key: key.into(),
                target: self.definition.target(),
            });
        }

        if self.attrs.contains_key(key) {
            return Err(BuildError::DuplicateAssignment { key: key.into() });
        }

        self.definition
            .mode()
            .resolve(args)
            .map_err(|error| BuildError::Arity {
                key: key.into(),
                error,
            })
    }

    /// Assigns a single value to `key`.
    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) -> Result<&mut Self, BuildError> {
        self.assign(key, Args::value(value))
    }

    /// Assigns a block to `key`. The block is stored, not called.
    pub fn set_block(
        &mut self,
        key: &str,
        f: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Result<&mut Self, BuildError> {
        self.assign(key, Args::new().block(f))
    }

    /// Assigns keyword arguments to `key`.
    pub fn set_kwargs<K, V>(
        &mut self,
        key: &str,
        kwargs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&mut Self, BuildError>
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let kwargs: Kwargs = kwargs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.assign(
            key,
            Args {
                kwargs,
                ..Args::default()
            },
        )
    }

    /// Assigns several positional arguments to `key`.
    pub fn set_many<I>(&mut self, key: &str, values: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<AttrValue>,
    {
        self.assign(key, Args::new().args(values))
    }

    /// True if the builder has an operation named `key`, whether or not it
    /// has been called.
    pub fn responds_to(&self, key: &str) -> bool {
        self.definition.valid_key(key)
    }

    /// True if `key` already holds a value.
    pub fn is_assigned(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// The value held by `key`.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Every attribute assembled so far.
    pub const fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Declared keys of the builder.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'d str> {
        self.definition.keys()
    }

    /// The first assignment that failed, if any.
    pub const fn failure(&self) -> Option<&BuildError> {
        self.failure.as_ref()
    }

    /// The definition this instance was made from.
    pub const fn definition(&self) -> &'d BuilderDefinition<T> {
        self.definition
    }

    /// Invokes the constructor with every assembled attribute.
    ///
    /// Returns the first failed assignment instead, if there was one.
    pub fn finish(self) -> Result<T, BuildError> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }

        trace!(
            constructor = self.definition.constructor_name(),
            keys = ?self.attrs.keys().collect::<alloc::vec::Vec<_>>(),
            "finishing"
        );
        self.definition
            .constructor()
            .call(self.attrs)
            .map_err(BuildError::Construct)
    }
}

impl<T> fmt::Debug for BuilderInstance<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderInstance")
            .field("target", &self.definition.target())
            .field("attrs", &self.attrs)
            .field("failure", &self.failure)
            .finish()
    }
}

use core::fmt;

use facet_core::Facet;

use crate::constructor::Constructor;
use crate::error::BuildError;
use crate::instance::BuilderInstance;
use crate::mode::Mode;
use crate::schema::{Schema, SchemaError};
use crate::value::Attrs;

/// A reusable builder for one constructor of `T`.
///
/// The definition is immutable: it holds the constructor, the [`Schema`]
/// extracted from the constructor's signature, and the assignment [`Mode`].
/// Each call to [`build`](Self::build) works on a fresh [`BuilderInstance`],
/// so a definition can be shared between threads and used concurrently.
pub struct BuilderDefinition<T> {
    constructor: Constructor<T>,
    schema: Schema,
    mode: Mode,
}

/// Creates a rich-mode builder for the default constructor of `T`.
///
/// Fails if `T`'s shape takes any parameter by position, e.g. a tuple
/// struct, or flattens a field that cannot collect extra keys.
///
/// ```
/// use facet::Facet;
/// use facet_builder::{Attrs, create_builder};
///
/// #[derive(Facet, Debug, PartialEq)]
/// struct Record {
///     a: u32,
///     b: u32,
///     c: u32,
/// }
///
/// let builder = create_builder::<Record>().unwrap();
/// let mut initial = Attrs::new();
/// initial.insert("b".into(), 2.into());
///
/// let record = builder
///     .build(&initial, |r| {
///         r.set("a", 1)?.set("c", 3)?;
///         Ok(())
///     })
///     .unwrap();
/// assert_eq!(record, Record { a: 1, b: 2, c: 3 });
/// ```
pub fn create_builder<T: Facet<'static> + 'static>() -> Result<BuilderDefinition<T>, SchemaError> {
    BuilderDefinition::new(Constructor::reflect()?, Mode::default())
}

/// Creates a builder for a specific constructor of `T`, in the given mode.
pub fn create_builder_with<T>(
    constructor: Constructor<T>,
    mode: Mode,
) -> Result<BuilderDefinition<T>, SchemaError> {
    BuilderDefinition::new(constructor, mode)
}

impl<T> BuilderDefinition<T> {
    /// Extracts the schema of `constructor` and wraps it in a definition.
    pub fn new(constructor: Constructor<T>, mode: Mode) -> Result<Self, SchemaError> {
        let schema = Schema::extract(constructor.signature())?;
        debug!(
            target_type = constructor.target(),
            constructor = constructor.name(),
            ?mode,
            wildcard = schema.is_wildcard(),
            "builder keys: {:?}",
            schema.keys().collect::<alloc::vec::Vec<_>>()
        );
        Ok(Self {
            constructor,
            schema,
            mode,
        })
    }

    /// True if any key may be assigned, declared or not.
    pub const fn is_wildcard(&self) -> bool {
        self.schema.is_wildcard()
    }

    /// True if `name` may be assigned: it is a declared key, or the builder
    /// is a wildcard.
    pub fn valid_key(&self, name: &str) -> bool {
        self.schema.valid_key(name)
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.schema.keys()
    }

    /// The extracted schema.
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The assignment mode.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The constructor this builder finalizes with.
    pub const fn constructor(&self) -> &Constructor<T> {
        &self.constructor
    }

    /// The constructor selector.
    pub fn constructor_name(&self) -> &str {
        self.constructor.name()
    }

    /// Name of the built type.
    pub const fn target(&self) -> &'static str {
        self.constructor.target()
    }

    /// Starts a construction attempt seeded with a copy of `initial`.
    ///
    /// Initial attributes are not checked against the schema; they are
    /// handed to the constructor as they are. They do count as assigned.
    pub fn instance(&self, initial: &Attrs) -> BuilderInstance<'_, T> {
        BuilderInstance::new(self, initial.clone())
    }

    /// Seeds an instance with `initial`, runs `block` against it, then
    /// invokes the constructor with every assembled attribute.
    ///
    /// Any error from the block, an assignment, or the constructor aborts
    /// the build and is returned as-is. A failed assignment aborts it even
    /// if the block ignored the error.
    pub fn build<F>(&self, initial: &Attrs, block: F) -> Result<T, BuildError>
    where
        F: FnOnce(&mut BuilderInstance<'_, T>) -> Result<(), BuildError>,
    {
        let mut instance = self.instance(initial);
        block(&mut instance)?;
        instance.finish()
    }

    /// Like [`build`](Self::build), without an assignment block.
    pub fn build_attrs(&self, initial: &Attrs) -> Result<T, BuildError> {
        self.instance(initial).finish()
    }
}

impl<T> Clone for BuilderDefinition<T> {
    fn clone(&self) -> Self {
        Self {
            constructor: self.constructor.clone(),
            schema: self.schema.clone(),
            mode: self.mode,
        }
    }
}

impl<T> fmt::Debug for BuilderDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderDefinition")
            .field("target", &self.target())
            .field("constructor", &self.constructor_name())
            .field("mode", &self.mode)
            .field("schema", &self.schema)
            .finish()
    }
}

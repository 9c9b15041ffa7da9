#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

#[macro_use]
mod tracing_macros;

mod args;
pub use args::Args;

mod constructor;
pub use constructor::Constructor;

mod definition;
pub use definition::{BuilderDefinition, create_builder, create_builder_with};

mod error;
pub use error::{ArityError, BuildError, ConstructError, MissingKeywordError};

mod instance;
pub use instance::BuilderInstance;

mod mode;
pub use mode::Mode;

mod schema;
pub use schema::{Schema, SchemaError};

mod signature;
pub use signature::{Param, ParamKind, Signature};

mod value;
pub use value::{AttrValue, Attrs, Block, Kwargs};

pub use facet_value::Value;

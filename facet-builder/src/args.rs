use alloc::string::String;
use alloc::vec::Vec;

use facet_value::Value;

use crate::value::{AttrValue, Block, Kwargs};

/// The arguments of one assignment call: positional values, keyword values
/// and an optional trailing block.
///
/// ```
/// use facet_builder::Args;
///
/// let args = Args::new().arg(1).arg(2).block(|| 3.into());
/// assert_eq!(args.positional.len(), 2);
/// assert!(args.block.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Positional arguments, in call order.
    pub positional: Vec<AttrValue>,
    /// Keyword arguments, in call order.
    pub kwargs: Kwargs,
    /// Trailing block.
    pub block: Option<Block>,
}

impl Args {
    /// No arguments at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single positional argument.
    pub fn value(value: impl Into<AttrValue>) -> Self {
        Self::new().arg(value)
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<AttrValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends several positional arguments.
    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AttrValue>,
    {
        self.positional.extend(values.into_iter().map(Into::into));
        self
    }

    /// Adds a keyword argument. A repeated name keeps the last value.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Sets the trailing block.
    pub fn block(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.block = Some(Block::new(f));
        self
    }

    /// Sets the trailing block from an existing handle.
    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    /// True if neither arguments nor a block were given.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.kwargs.is_empty() && self.block.is_none()
    }
}

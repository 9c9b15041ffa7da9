use alloc::vec::Vec;

use crate::args::Args;
use crate::error::ArityError;
use crate::value::AttrValue;

/// How assignment calls turn their arguments into a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Exactly one positional argument, or exactly one block. Keyword
    /// arguments count as a single map-shaped argument.
    Strict,

    /// Keyword arguments alone make a map. Otherwise the positional
    /// arguments, followed by the block if any, make a list; a list of one
    /// is unwrapped to that element.
    #[default]
    Rich,
}

impl Mode {
    /// Resolves the value an assignment call stores.
    pub fn resolve(self, args: Args) -> Result<AttrValue, ArityError> {
        match self {
            Mode::Strict => resolve_strict(args),
            Mode::Rich => resolve_rich(args),
        }
    }
}

fn resolve_strict(args: Args) -> Result<AttrValue, ArityError> {
    let Args {
        mut positional,
        kwargs,
        block,
    } = args;

    if !kwargs.is_empty() {
        positional.push(AttrValue::Map(kwargs));
    }

    match (positional.len(), block) {
        (0, None) => Err(ArityError::ExpectedValueOrBlock),
        (0, Some(block)) => Ok(AttrValue::Block(block)),
        (1, None) => Ok(positional.swap_remove(0)),
        (1, Some(_)) => Err(ArityError::ValueAndBlock),
        (given, _) => Err(ArityError::TooManyArguments { given }),
    }
}

fn resolve_rich(args: Args) -> Result<AttrValue, ArityError> {
    if args.is_empty() {
        return Err(ArityError::ExpectedAtLeastOne);
    }

    let Args {
        positional,
        kwargs,
        block,
    } = args;

    if !kwargs.is_empty() {
        if !positional.is_empty() || block.is_some() {
            return Err(ArityError::KeywordAndPositional);
        }
        return Ok(AttrValue::Map(kwargs));
    }

    let mut items: Vec<AttrValue> = positional;
    items.extend(block.map(AttrValue::Block));

    if items.len() == 1 {
        Ok(items.swap_remove(0))
    } else {
        Ok(AttrValue::List(items))
    }
}

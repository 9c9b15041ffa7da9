//! Values stored under builder keys.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use facet_value::{VArray, VObject, Value};
use indexmap::IndexMap;

/// The attribute mapping a builder instance assembles, in assignment order.
pub type Attrs = IndexMap<String, AttrValue>;

/// Keyword arguments passed to a single assignment.
pub type Kwargs = IndexMap<String, AttrValue>;

/// An invocable value handed to an assignment in place of (or next to) plain
/// arguments.
///
/// Blocks are stored as-is: assigning one never calls it.
#[derive(Clone)]
pub struct Block(Arc<dyn Fn() -> Value + Send + Sync>);

impl Block {
    /// Wraps `f`.
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the block.
    pub fn call(&self) -> Value {
        (self.0)()
    }

    /// True if both handles refer to the same block.
    pub fn ptr_eq(&self, other: &Block) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({:p})", Arc::as_ptr(&self.0))
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// A value assigned to a builder key.
///
/// Its shape follows from how the assignment was called: a single argument
/// stays a scalar, several arguments (or an argument and a block) become a
/// list, keyword arguments become a map.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Plain data.
    Value(Value),
    /// An uncalled block.
    Block(Block),
    /// Ordered arguments.
    List(Vec<AttrValue>),
    /// Keyword arguments.
    Map(Kwargs),
}

impl AttrValue {
    /// The plain data, if this is a [`AttrValue::Value`].
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            AttrValue::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The block, if this is a [`AttrValue::Block`].
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            AttrValue::Block(b) => Some(b),
            _ => None,
        }
    }

    /// The elements, if this is a [`AttrValue::List`].
    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// The keyword map, if this is a [`AttrValue::Map`].
    pub fn as_map(&self) -> Option<&Kwargs> {
        match self {
            AttrValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Lowers this value to plain data.
    ///
    /// Lists become arrays and maps become objects. Blocks are called, and
    /// their result takes their place.
    pub fn into_value(self) -> Value {
        match self {
            AttrValue::Value(v) => v,
            AttrValue::Block(b) => b.call(),
            AttrValue::List(items) => items
                .into_iter()
                .map(AttrValue::into_value)
                .collect::<VArray>()
                .into(),
            AttrValue::Map(map) => map
                .into_iter()
                .map(|(k, v)| (k, v.into_value()))
                .collect::<VObject>()
                .into(),
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        AttrValue::Value(value)
    }
}

impl From<Block> for AttrValue {
    fn from(block: Block) -> Self {
        AttrValue::Block(block)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        AttrValue::List(items)
    }
}

impl From<Kwargs> for AttrValue {
    fn from(map: Kwargs) -> Self {
        AttrValue::Map(map)
    }
}

macro_rules! impl_from_data {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for AttrValue {
                fn from(v: $t) -> Self {
                    AttrValue::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_from_data! {
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
    &str, String, &String,
}

use super::*;

mod array;
pub use array::*;

mod list;
pub use list::*;

mod map;
pub use map::*;

mod set;
pub use set::*;

mod option;
pub use option::*;

mod scalar;
pub use scalar::*;

/// The semantic definition of a shape: is it more like a scalar, a map, a list?
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub enum Def {
    /// Scalar: not composed of other things.
    ///
    /// e.g. `u32`, `String`, `bool`, `NaiveDate`
    Scalar(ScalarType),

    /// Option: the only way a typed property can hold null
    ///
    /// e.g. `Option<T>`
    Option(OptionDef),

    /// Ordered list of homogeneous values, variable size, duplicates allowed
    ///
    /// e.g. `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`
    List(ListDef),

    /// Unique set of homogeneous values
    ///
    /// e.g. `HashSet<T>`, `BTreeSet<T>`
    Set(SetDef),

    /// Index-addressed run of homogeneous values, fixed once built
    ///
    /// e.g. `[T; 3]`, `Box<[T]>`
    Array(ArrayDef),

    /// Map with string keys and homogeneous values
    ///
    /// e.g. `HashMap<String, T>`, `BTreeMap<String, T>`, `ValueMap`
    Map(MapDef),

    /// Named properties, each with its own shape
    ///
    /// e.g. anything with `#[derive(Bean)]`
    Struct(StructDef),

    /// The dynamic [`Value`](crate::Value) itself: accepts anything as-is
    Dynamic,
}

impl Def {
    /// Short human-readable name of the definition kind, e.g. `list`
    pub const fn kind(&self) -> &'static str {
        match self {
            Def::Scalar(_) => "scalar",
            Def::Option(_) => "option",
            Def::List(_) => "list",
            Def::Set(_) => "set",
            Def::Array(_) => "array",
            Def::Map(_) => "map",
            Def::Struct(_) => "struct",
            Def::Dynamic => "dynamic",
        }
    }

    /// Returns the element shape for lists, sets and arrays, and the value
    /// shape for maps.
    pub fn element(&self) -> Option<&'static Shape> {
        match self {
            Def::List(ld) => Some(ld.t()),
            Def::Set(sd) => Some(sd.t()),
            Def::Array(ad) => Some(ad.t()),
            Def::Map(md) => Some(md.v()),
            _ => None,
        }
    }
}

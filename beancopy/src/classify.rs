use beancopy_core::{Def, MapOrdering, ScalarType, SetOrdering, Shape, Value};

/// The runtime form of a value, as far as copying is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// Anything that is not a container and not null
    Scalar,
    /// A list: ordered, duplicates allowed
    Sequence,
    /// A set of unique values
    Set,
    /// A fixed-length array
    Array,
    /// String-keyed entries: a map, or a struct captured as one
    Mapping,
    /// Null
    Null,
}

impl ValueShape {
    /// Every value shape, in table order
    pub const ALL: [ValueShape; 6] = [
        ValueShape::Null,
        ValueShape::Scalar,
        ValueShape::Sequence,
        ValueShape::Set,
        ValueShape::Array,
        ValueShape::Mapping,
    ];

    /// Classifies a value. Never fails.
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueShape::Null,
            Value::List(_) => ValueShape::Sequence,
            Value::Set(_) => ValueShape::Set,
            Value::Array(_) => ValueShape::Array,
            Value::Map(_) => ValueShape::Mapping,
            _ => ValueShape::Scalar,
        }
    }

    /// Short name, used in logs and tables
    pub const fn name(self) -> &'static str {
        match self {
            ValueShape::Scalar => "scalar",
            ValueShape::Sequence => "sequence",
            ValueShape::Set => "set",
            ValueShape::Array => "array",
            ValueShape::Mapping => "mapping",
            ValueShape::Null => "null",
        }
    }

    /// Returns true for lists, sets and arrays
    pub const fn is_collection(self) -> bool {
        matches!(
            self,
            ValueShape::Sequence | ValueShape::Set | ValueShape::Array
        )
    }
}

/// The family of a declared type, looking through `Option`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetShape {
    /// A leaf type
    Scalar(ScalarType),
    /// `Vec<T>` and other lists
    Sequence,
    /// `HashSet<T>`, `BTreeSet<T>`
    Set(SetOrdering),
    /// `[T; N]` (with its length) or `Box<[T]>`
    Array(Option<usize>),
    /// `HashMap<String, T>`, `BTreeMap<String, T>`, `ValueMap`
    Mapping(MapOrdering),
    /// A `#[derive(Bean)]` struct
    Struct,
    /// The dynamic `Value`: takes anything as it is
    Dynamic,
}

impl TargetShape {
    /// Classifies a declared type
    pub fn of(shape: &'static Shape) -> Self {
        match shape.non_null().def {
            Def::Scalar(st) => TargetShape::Scalar(st),
            Def::List(_) => TargetShape::Sequence,
            Def::Set(sd) => TargetShape::Set(sd.ordering),
            Def::Array(ad) => TargetShape::Array(ad.len),
            Def::Map(md) => TargetShape::Mapping(md.ordering),
            Def::Struct(_) => TargetShape::Struct,
            _ => TargetShape::Dynamic,
        }
    }

    /// Short name, used in logs and tables
    pub const fn name(self) -> &'static str {
        match self {
            TargetShape::Scalar(_) => "scalar",
            TargetShape::Sequence => "sequence",
            TargetShape::Set(_) => "set",
            TargetShape::Array(_) => "array",
            TargetShape::Mapping(_) => "mapping",
            TargetShape::Struct => "struct",
            TargetShape::Dynamic => "dynamic",
        }
    }
}

/// Classifies a value; see [`ValueShape::of`]
pub const fn classify(value: &Value) -> ValueShape {
    ValueShape::of(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beancopy_core::Reflect;
    use std::collections::{BTreeMap, BTreeSet, HashSet};

    #[test]
    fn values_classify_by_variant() {
        assert_eq!(classify(&Value::Null), ValueShape::Null);
        assert_eq!(classify(&Value::from("x")), ValueShape::Scalar);
        assert_eq!(classify(&Value::list([1, 2])), ValueShape::Sequence);
        assert_eq!(classify(&Value::sorted_set([1, 2])), ValueShape::Set);
        assert_eq!(classify(&Value::array([1, 2])), ValueShape::Array);
        assert_eq!(classify(&Value::map([("a", 1)])), ValueShape::Mapping);
        assert!(ValueShape::Array.is_collection());
        assert!(!ValueShape::Mapping.is_collection());
    }

    #[test]
    fn targets_look_through_option() {
        assert_eq!(
            TargetShape::of(<Option<Vec<u8>>>::SHAPE),
            TargetShape::Sequence
        );
        assert_eq!(
            TargetShape::of(<BTreeSet<i32>>::SHAPE),
            TargetShape::Set(SetOrdering::Sorted)
        );
        assert_eq!(
            TargetShape::of(<HashSet<i32>>::SHAPE),
            TargetShape::Set(SetOrdering::Hashed)
        );
        assert_eq!(
            TargetShape::of(<[String; 3]>::SHAPE),
            TargetShape::Array(Some(3))
        );
        assert_eq!(
            TargetShape::of(<BTreeMap<String, bool>>::SHAPE),
            TargetShape::Mapping(MapOrdering::Sorted)
        );
        assert_eq!(
            TargetShape::of(<Option<f32>>::SHAPE),
            TargetShape::Scalar(ScalarType::F32)
        );
        assert_eq!(TargetShape::of(Value::SHAPE), TargetShape::Dynamic);
    }
}

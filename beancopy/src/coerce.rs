use alloc::format;
use alloc::vec::Vec;

use beancopy_core::{Reflect, Shape, Value, ValueMap, ValueSet};

use crate::CopyError;
use crate::classify::{TargetShape, ValueShape};
use crate::copy::{Declared, Traversal};
use crate::expression::Step;

/// How a value of some [`ValueShape`] becomes a value of some
/// [`TargetShape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Null stays null, if the target can hold it
    Null,
    /// The target is dynamic and takes the value as it is
    PassThrough,
    /// Scalar conversion
    Convert,
    /// A one-element sequence stands in for its element, then [`Rule::Convert`]
    Extract,
    /// A new list, in the source's iteration order
    ToSequence,
    /// A new set: duplicates collapse, first occurrence wins
    ToSet,
    /// A new array, sized to the source
    ToArray,
    /// A new map with the same keys in the same order
    ToMapping,
    /// A nested copy into the struct
    ToStruct,
}

/// The coercion matrix: `None` means there is no way to build the target
/// from the source.
///
/// ```
/// use beancopy::{Rule, TargetShape, ValueShape, rule};
///
/// assert_eq!(rule(ValueShape::Sequence, TargetShape::Array(None)), Some(Rule::ToArray));
/// assert_eq!(rule(ValueShape::Mapping, TargetShape::Sequence), None);
/// ```
pub const fn rule(from: ValueShape, to: TargetShape) -> Option<Rule> {
    use TargetShape as T;
    use ValueShape as V;

    match (from, to) {
        (V::Null, _) => Some(Rule::Null),
        (_, T::Dynamic) => Some(Rule::PassThrough),
        (V::Scalar, T::Scalar(_)) => Some(Rule::Convert),
        (V::Sequence | V::Set | V::Array, T::Scalar(_)) => Some(Rule::Extract),
        (V::Sequence | V::Set | V::Array, T::Sequence) => Some(Rule::ToSequence),
        (V::Sequence | V::Set | V::Array, T::Set(_)) => Some(Rule::ToSet),
        (V::Sequence | V::Set | V::Array, T::Array(_)) => Some(Rule::ToArray),
        (V::Mapping, T::Mapping(_)) => Some(Rule::ToMapping),
        (V::Mapping, T::Struct) => Some(Rule::ToStruct),
        _ => None,
    }
}

/// Element shape of a container, or the dynamic `Value` when it has none
fn element_shape(shape: &'static Shape) -> &'static Shape {
    shape.non_null().def.element().unwrap_or(Value::SHAPE)
}

impl Traversal<'_> {
    /// Builds a list, set or array out of the elements of a list, set or
    /// array. One failing element fails the whole container.
    pub(crate) fn coerce_collection(
        &mut self,
        value: Value,
        shape: &'static Shape,
        to: TargetShape,
        declared: Declared,
    ) -> Result<Value, CopyError> {
        let from = value.kind();
        let items = value
            .into_elements()
            .map_err(|other| self.coercion_failed(other.kind(), shape, "not a collection"))?;

        if let TargetShape::Array(Some(len)) = to {
            if len != items.len() {
                return Err(self.coercion_failed(
                    from,
                    shape,
                    format!("needs exactly {len} elements, got {}", items.len()),
                ));
            }
        }

        let element = element_shape(shape);
        let mut copied = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let item = self.at(Step::Index(i), |t| t.copy_element(item, element, None, declared))?;
            copied.push(item);
        }

        Ok(match to {
            TargetShape::Set(ordering) => {
                let mut set = ValueSet::new(ordering);
                for item in copied {
                    set.insert(item);
                }
                Value::Set(set)
            }
            TargetShape::Array(_) => Value::Array(copied),
            _ => Value::List(copied),
        })
    }

    /// Builds a map with the same keys, in the same order, coercing every
    /// value
    pub(crate) fn coerce_mapping(
        &mut self,
        value: Value,
        shape: &'static Shape,
        declared: Declared,
    ) -> Result<Value, CopyError> {
        let map = match value {
            Value::Map(map) => map,
            other => return Err(self.coercion_failed(other.kind(), shape, "not a mapping")),
        };

        let element = element_shape(shape);
        let mut out = ValueMap::with_capacity(map.len());
        for (key, item) in map {
            let item = self.at(Step::Name(key.clone()), |t| {
                t.copy_element(item, element, None, declared)
            })?;
            out.insert(key, item);
        }
        Ok(Value::Map(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use beancopy_core::{MapOrdering, ScalarType, SetOrdering};

    #[test]
    fn dispatch_table() {
        let targets = [
            TargetShape::Scalar(ScalarType::I32),
            TargetShape::Sequence,
            TargetShape::Set(SetOrdering::Sorted),
            TargetShape::Array(None),
            TargetShape::Mapping(MapOrdering::Insertion),
            TargetShape::Struct,
            TargetShape::Dynamic,
        ];

        let mut table = String::new();
        for from in ValueShape::ALL {
            let cells: Vec<_> = targets
                .iter()
                .map(|&to| match rule(from, to) {
                    Some(r) => format!("{}={r:?}", to.name()),
                    None => format!("{}=-", to.name()),
                })
                .collect();
            table.push_str(&format!("{}: {}\n", from.name(), cells.join(" ")));
        }

        insta::assert_snapshot!(table, @r"
        null: scalar=Null sequence=Null set=Null array=Null mapping=Null struct=Null dynamic=Null
        scalar: scalar=Convert sequence=- set=- array=- mapping=- struct=- dynamic=PassThrough
        sequence: scalar=Extract sequence=ToSequence set=ToSet array=ToArray mapping=- struct=- dynamic=PassThrough
        set: scalar=Extract sequence=ToSequence set=ToSet array=ToArray mapping=- struct=- dynamic=PassThrough
        array: scalar=Extract sequence=ToSequence set=ToSet array=ToArray mapping=- struct=- dynamic=PassThrough
        mapping: scalar=- sequence=- set=- array=- mapping=ToMapping struct=ToStruct dynamic=PassThrough
        ");
    }

    #[test]
    fn every_target_family_is_reachable() {
        let reachable = |to| ValueShape::ALL.iter().any(|&from| {
            !matches!(rule(from, to), None | Some(Rule::Null))
        });
        assert!(reachable(TargetShape::Struct));
        assert!(reachable(TargetShape::Array(Some(2))));
        assert!(reachable(TargetShape::Set(SetOrdering::Hashed)));
    }
}

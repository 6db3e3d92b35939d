use alloc::string::String;

use crate::{AccessError, Reflect, Shape, Value};

mod hashmap;
mod hashset;

/// Extracts every entry of a map value into a string-keyed collection,
/// reporting the key of the first entry that fails.
pub(crate) fn entries_from_value<T, C>(shape: &'static Shape, value: Value) -> Result<C, AccessError>
where
    T: Reflect,
    C: FromIterator<(String, T)>,
{
    match value {
        Value::Map(map) => map
            .into_iter()
            .map(|(k, v)| match T::from_value(v) {
                Ok(v) => Ok((k, v)),
                Err(e) => Err(e.in_property(k)),
            })
            .collect(),
        other => Err(AccessError::Mismatch {
            expected: shape,
            found: other.kind(),
        }),
    }
}

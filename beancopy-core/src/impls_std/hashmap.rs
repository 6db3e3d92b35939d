use core::hash::BuildHasher;
use std::collections::HashMap;

use alloc::string::String;

use crate::*;

impl<T, S> Reflect for HashMap<String, T, S>
where
    T: Reflect,
    S: BuildHasher + Default,
{
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "HashMap",
            Def::Map(MapDef::new(|| T::SHAPE, MapOrdering::Hashed)),
        )
    };

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.as_str(), v.to_value())).collect())
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        super::entries_from_value::<T, Self>(Self::SHAPE, value)
    }
}

use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use crate::*;

impl<T, S> Reflect for HashSet<T, S>
where
    T: Reflect + Eq + Hash,
    S: BuildHasher + Default,
{
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "HashSet",
            Def::Set(SetDef::new(|| T::SHAPE, SetOrdering::Hashed)),
        )
    };

    fn to_value(&self) -> Value {
        Value::Set(ValueSet::from_items(
            SetOrdering::Hashed,
            self.iter().map(Reflect::to_value),
        ))
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        crate::macros::elements_from_value::<T, Self>(Self::SHAPE, value)
    }
}

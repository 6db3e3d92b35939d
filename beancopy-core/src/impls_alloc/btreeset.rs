use alloc::collections::BTreeSet;

use crate::*;

impl<T: Reflect + Ord> Reflect for BTreeSet<T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "BTreeSet",
            Def::Set(SetDef::new(|| T::SHAPE, SetOrdering::Sorted)),
        )
    };

    fn to_value(&self) -> Value {
        Value::Set(ValueSet::from_items(
            SetOrdering::Sorted,
            self.iter().map(Reflect::to_value),
        ))
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        crate::macros::elements_from_value::<T, Self>(Self::SHAPE, value)
    }
}

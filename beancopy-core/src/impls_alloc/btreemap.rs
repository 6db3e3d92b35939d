use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::*;

impl<T: Reflect> Reflect for BTreeMap<String, T> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "BTreeMap",
            Def::Map(MapDef::new(|| T::SHAPE, MapOrdering::Sorted)),
        )
    };

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.as_str(), v.to_value())).collect())
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        crate::impls_std::entries_from_value::<T, Self>(Self::SHAPE, value)
    }
}

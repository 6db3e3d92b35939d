use crate::*;

impl Reflect for Value {
    const SHAPE: &'static Shape = &const { Shape::new("Value", Def::Dynamic) };

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        Ok(value)
    }
}

impl Reflect for ValueMap {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "ValueMap",
            Def::Map(MapDef::new(|| Value::SHAPE, MapOrdering::Insertion)),
        )
    };

    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(AccessError::Mismatch {
                expected: Self::SHAPE,
                found: other.kind(),
            }),
        }
    }
}

impl Reflect for ValueSet {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "ValueSet",
            Def::Set(SetDef::new(|| Value::SHAPE, SetOrdering::Hashed)),
        )
    };

    fn to_value(&self) -> Value {
        Value::Set(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Set(set) => Ok(set),
            other => other
                .into_elements()
                .map(|items| ValueSet::from_items(SetOrdering::Hashed, items))
                .map_err(|other| AccessError::Mismatch {
                    expected: Self::SHAPE,
                    found: other.kind(),
                }),
        }
    }
}

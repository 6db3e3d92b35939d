use crate::*;

impl<T: Reflect> Reflect for Option<T> {
    const SHAPE: &'static Shape =
        &const { Shape::new("Option", Def::Option(OptionDef::new(|| T::SHAPE))) };

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_none() {
        assert_eq!(Option::<i32>::from_value(Value::Null).ok(), Some(None));
        assert_eq!(Option::<i32>::from_value(Value::I64(3)).ok(), Some(Some(3)));
        assert_eq!(None::<bool>.to_value(), Value::Null);
    }

    #[test]
    fn option_shape_looks_through() {
        let shape = <Option<Option<u8>>>::SHAPE;
        assert!(shape.is_nullable());
        assert_eq!(shape.scalar_type(), Some(ScalarType::U8));
        assert_eq!(format!("{shape}"), "Option<Option<u8>>");
    }
}

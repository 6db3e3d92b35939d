use alloc::vec::Vec;

use crate::*;

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    const SHAPE: &'static Shape =
        &const { Shape::new("array", Def::Array(ArrayDef::new(|| T::SHAPE, Some(N)))) };

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        let items: Vec<T> = crate::macros::elements_from_value::<T, _>(Self::SHAPE, value)?;
        let found_len = items.len();
        items.try_into().map_err(|_| AccessError::LengthMismatch {
            expected: Self::SHAPE,
            expected_len: N,
            found_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_arrays_check_length() {
        let ok = <[i32; 2]>::from_value(Value::list([1, 2]));
        assert_eq!(ok.ok(), Some([1, 2]));

        let err = <[i32; 2]>::from_value(Value::array([1, 2, 3]));
        assert!(matches!(
            err,
            Err(AccessError::LengthMismatch {
                expected_len: 2,
                found_len: 3,
                ..
            })
        ));
    }

    #[test]
    fn array_shape_name() {
        assert_eq!(format!("{}", <[String; 3]>::SHAPE), "[String; 3]");
    }

    #[test]
    fn element_errors_carry_their_index() {
        let err = <[u8; 2]>::from_value(Value::array([Value::from(1), Value::from(-1)]));
        match err {
            Err(AccessError::Nested { property, .. }) => assert_eq!(property, "[1]"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}

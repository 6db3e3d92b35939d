use crate::macros::{impl_reflect_for_integers, impl_reflect_for_scalar};
use crate::*;

impl_reflect_for_integers!(
    i8 => I8 as I64,
    i16 => I16 as I64,
    i32 => I32 as I64,
    i64 => I64 as I64,
    isize => ISize as I64,
    u8 => U8 as U64,
    u16 => U16 as U64,
    u32 => U32 as U64,
    u64 => U64 as U64,
    usize => USize as U64,
);

impl_reflect_for_scalar!(bool, "bool", Bool, Bool);
impl_reflect_for_scalar!(char, "char", Char, Char);
impl_reflect_for_scalar!(f64, "f64", F64, F64);

impl Reflect for f32 {
    const SHAPE: &'static Shape = &const { Shape::new("f32", Def::Scalar(ScalarType::F32)) };

    fn to_value(&self) -> Value {
        Value::F64(*self as f64)
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::F64(n) => Ok(n as f32),
            other => Err(AccessError::Mismatch {
                expected: Self::SHAPE,
                found: other.kind(),
            }),
        }
    }
}

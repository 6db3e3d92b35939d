use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::*;

impl<T: Reflect> Reflect for Box<[T]> {
    const SHAPE: &'static Shape =
        &const { Shape::new("Box", Def::Array(ArrayDef::new(|| T::SHAPE, None))) };

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        let items: Vec<T> = crate::macros::elements_from_value::<T, _>(Self::SHAPE, value)?;
        Ok(items.into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_slices_take_any_length() {
        let b = <Box<[char]>>::from_value(Value::list(['x', 'y', 'z'])).unwrap();
        assert_eq!(&*b, &['x', 'y', 'z']);
        assert_eq!(format!("{}", <Box<[char]>>::SHAPE), "Box<[char]>");
    }
}

/// Implements [`Reflect`](crate::Reflect) for primitive integer types.
///
/// Signed types are captured as [`Value::I64`](crate::Value::I64), unsigned
/// ones as [`Value::U64`](crate::Value::U64). Extraction accepts either
/// variant as long as the number fits.
macro_rules! impl_reflect_for_integers {
    ($($ty:ty => $scalar:ident as $variant:ident),* $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                const SHAPE: &'static $crate::Shape = &const {
                    $crate::Shape::new(
                        stringify!($ty),
                        $crate::Def::Scalar($crate::ScalarType::$scalar),
                    )
                };

                fn to_value(&self) -> $crate::Value {
                    $crate::Value::$variant(*self as _)
                }

                fn from_value(value: $crate::Value) -> Result<Self, $crate::AccessError> {
                    let n = match value {
                        $crate::Value::I64(n) => <$ty>::try_from(n).map_err(|_| n.to_string()),
                        $crate::Value::U64(n) => <$ty>::try_from(n).map_err(|_| n.to_string()),
                        other => {
                            return Err($crate::AccessError::Mismatch {
                                expected: Self::SHAPE,
                                found: other.kind(),
                            });
                        }
                    };
                    n.map_err(|value| $crate::AccessError::OutOfRange {
                        expected: Self::SHAPE,
                        value,
                    })
                }
            }
        )*
    };
}

/// Implements [`Reflect`](crate::Reflect) for a scalar that maps one-to-one
/// onto a [`Value`](crate::Value) variant.
macro_rules! impl_reflect_for_scalar {
    ($ty:ty, $name:literal, $scalar:ident, $variant:ident) => {
        impl $crate::Reflect for $ty {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::new($name, $crate::Def::Scalar($crate::ScalarType::$scalar))
            };

            fn to_value(&self) -> $crate::Value {
                $crate::Value::$variant(self.clone())
            }

            fn from_value(value: $crate::Value) -> Result<Self, $crate::AccessError> {
                match value {
                    $crate::Value::$variant(v) => Ok(v),
                    other => Err($crate::AccessError::Mismatch {
                        expected: Self::SHAPE,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

/// Implements [`Reflect`](crate::Reflect) for a sequence type that can be
/// iterated by reference and collected from an iterator.
macro_rules! impl_reflect_for_list {
    ($ty:ident, $name:literal) => {
        impl<T: $crate::Reflect> $crate::Reflect for $ty<T> {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::new($name, $crate::Def::List($crate::ListDef::new(|| T::SHAPE)))
            };

            fn to_value(&self) -> $crate::Value {
                $crate::Value::List(self.iter().map($crate::Reflect::to_value).collect())
            }

            fn from_value(value: $crate::Value) -> Result<Self, $crate::AccessError> {
                $crate::macros::elements_from_value::<T, Self>(Self::SHAPE, value)
            }
        }
    };
}

/// Extracts every element of a list, array or set into a collection,
/// reporting the index of the first element that fails.
pub(crate) fn elements_from_value<T, C>(
    shape: &'static crate::Shape,
    value: crate::Value,
) -> Result<C, crate::AccessError>
where
    T: crate::Reflect,
    C: FromIterator<T>,
{
    let items = value.into_elements().map_err(|other| crate::AccessError::Mismatch {
        expected: shape,
        found: other.kind(),
    })?;
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| T::from_value(item).map_err(|e| e.at_index(i)))
        .collect()
}

pub(crate) use impl_reflect_for_integers;
pub(crate) use impl_reflect_for_list;
pub(crate) use impl_reflect_for_scalar;

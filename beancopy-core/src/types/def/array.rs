use crate::Shape;

/// Fields for array types
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct ArrayDef {
    /// shape of the items in the array
    pub t: fn() -> &'static Shape,

    /// fixed length of the array: `Some(N)` for `[T; N]`, `None` for boxed
    /// slices, whose length is decided when they are built
    pub len: Option<usize>,
}

impl ArrayDef {
    /// Creates an array definition
    pub const fn new(t: fn() -> &'static Shape, len: Option<usize>) -> Self {
        Self { t, len }
    }

    /// Returns the shape of the items in the array
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

use crate::Shape;

/// Fields for list types
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct ListDef {
    /// shape of the items in the list
    pub t: fn() -> &'static Shape,
}

impl ListDef {
    /// Creates a list definition for the given item shape
    pub const fn new(t: fn() -> &'static Shape) -> Self {
        Self { t }
    }

    /// Returns the shape of the items in the list
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

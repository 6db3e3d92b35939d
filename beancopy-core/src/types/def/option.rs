use crate::Shape;

/// Describes an Option: just its inner shape.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct OptionDef {
    /// shape of the inner type of the option
    pub t: fn() -> &'static Shape,
}

impl OptionDef {
    /// Creates an option definition for the given inner shape
    pub const fn new(t: fn() -> &'static Shape) -> Self {
        Self { t }
    }

    /// Returns the inner shape of the option
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

use crate::Shape;

/// How a set orders its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SetOrdering {
    /// Iteration order carries no meaning (e.g. `HashSet`)
    #[default]
    Hashed,

    /// Members iterate in ascending value order (e.g. `BTreeSet`)
    Sorted,
}

/// Fields for set types
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct SetDef {
    /// shape of the values in the set
    pub t: fn() -> &'static Shape,

    /// how the set orders its members
    pub ordering: SetOrdering,
}

impl SetDef {
    /// Creates a set definition
    pub const fn new(t: fn() -> &'static Shape, ordering: SetOrdering) -> Self {
        Self { t, ordering }
    }

    /// Returns the shape of the items in the set
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

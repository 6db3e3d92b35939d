use crate::Shape;

/// How a map orders its keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MapOrdering {
    /// Iteration order carries no meaning (e.g. `HashMap`)
    Hashed,

    /// Keys iterate in ascending order (e.g. `BTreeMap`)
    Sorted,

    /// Keys iterate in insertion order (e.g. `ValueMap`)
    #[default]
    Insertion,
}

/// Fields for string-keyed map types
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct MapDef {
    /// shape of the values in the map
    pub v: fn() -> &'static Shape,

    /// how the map orders its keys
    pub ordering: MapOrdering,
}

impl MapDef {
    /// Creates a map definition
    pub const fn new(v: fn() -> &'static Shape, ordering: MapOrdering) -> Self {
        Self { v, ordering }
    }

    /// Returns the shape of the values in the map
    pub fn v(&self) -> &'static Shape {
        (self.v)()
    }
}

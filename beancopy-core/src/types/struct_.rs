use crate::Field;

/// Fields for struct types: their named properties, in declaration order
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct StructDef {
    /// all properties, in declaration order
    pub fields: &'static [Field],
}

impl StructDef {
    /// Creates a struct definition
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// Looks up a field by its effective name
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

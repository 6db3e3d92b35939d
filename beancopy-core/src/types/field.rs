use bitflags::bitflags;

use crate::Shape;

/// Describes a named property of a struct
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Field {
    /// effective name of the property (after `rename` / `rename_all`)
    pub name: &'static str,

    /// shape of the property's type
    pub shape: fn() -> &'static Shape,

    /// flags for the field (e.g. read-only)
    pub flags: FieldFlags,

    /// `chrono` format strings tried, in order, when converting this
    /// property from or to a date
    pub date_patterns: &'static [&'static str],

    /// decimal format patterns tried, in order, when converting this
    /// property from or to a number
    pub number_patterns: &'static [&'static str],
}

impl Field {
    /// Creates a readable, writable field with no conversion patterns
    pub const fn new(name: &'static str, shape: fn() -> &'static Shape) -> Self {
        Self {
            name,
            shape,
            flags: FieldFlags::empty(),
            date_patterns: &[],
            number_patterns: &[],
        }
    }

    /// Sets the flags
    pub const fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the date patterns
    pub const fn with_date_patterns(mut self, patterns: &'static [&'static str]) -> Self {
        self.date_patterns = patterns;
        self
    }

    /// Sets the number patterns
    pub const fn with_number_patterns(mut self, patterns: &'static [&'static str]) -> Self {
        self.number_patterns = patterns;
        self
    }

    /// The shape of the field's type
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

bitflags! {
    /// Flags that can be applied to fields to modify their behavior
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u64 {
        /// The property has a getter but no setter: copies never write it
        const READ_ONLY = 1 << 0;

        /// The property has a setter but no getter: copies never read it
        const WRITE_ONLY = 1 << 1;
    }
}

impl Default for FieldFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::empty()
    }
}

use core::fmt;

/// The leaf types a property can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `String`
    String,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    ISize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    USize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `chrono::NaiveDate`
    #[cfg(feature = "chrono")]
    Date,
    /// `chrono::NaiveDateTime`
    #[cfg(feature = "chrono")]
    DateTime,
}

impl ScalarType {
    /// Rust name of the type
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Char => "char",
            ScalarType::String => "String",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::ISize => "isize",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::USize => "usize",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            #[cfg(feature = "chrono")]
            ScalarType::Date => "NaiveDate",
            #[cfg(feature = "chrono")]
            ScalarType::DateTime => "NaiveDateTime",
        }
    }

    /// Returns true for the signed integer types
    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            ScalarType::I8 | ScalarType::I16 | ScalarType::I32 | ScalarType::I64 | ScalarType::ISize
        )
    }

    /// Returns true for the unsigned integer types
    pub const fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            ScalarType::U8 | ScalarType::U16 | ScalarType::U32 | ScalarType::U64 | ScalarType::USize
        )
    }

    /// Returns true for any integer type
    pub const fn is_integer(self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    /// Returns true for `f32` and `f64`
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }

    /// Inclusive range of a signed integer type, as `i128`
    pub const fn signed_range(self) -> Option<(i128, i128)> {
        match self {
            ScalarType::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            ScalarType::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            ScalarType::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            ScalarType::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            ScalarType::ISize => Some((isize::MIN as i128, isize::MAX as i128)),
            _ => None,
        }
    }

    /// Inclusive upper bound of an unsigned integer type
    pub const fn unsigned_max(self) -> Option<u64> {
        match self {
            ScalarType::U8 => Some(u8::MAX as u64),
            ScalarType::U16 => Some(u16::MAX as u64),
            ScalarType::U32 => Some(u32::MAX as u64),
            ScalarType::U64 => Some(u64::MAX),
            ScalarType::USize => Some(usize::MAX as u64),
            _ => None,
        }
    }

    /// Returns true if `n` fits this integer type (false for non-integers)
    pub const fn accepts_integer(self, n: i128) -> bool {
        if let Some((min, max)) = self.signed_range() {
            return n >= min && n <= max;
        }
        if let Some(max) = self.unsigned_max() {
            return n >= 0 && n <= max as i128;
        }
        false
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use core::fmt;

mod def;
pub use def::*;

mod field;
pub use field::*;

mod struct_;
pub use struct_::*;

/// Static description of a type: its name, and what it is made of.
#[derive(Clone, Copy)]
#[non_exhaustive]
pub struct Shape {
    /// Name of the type, without generic parameters, e.g. `Vec` or `Person`.
    pub type_identifier: &'static str,

    /// What the type is: a scalar, a list, a struct...
    pub def: Def,
}

impl Shape {
    /// Creates a new shape.
    pub const fn new(type_identifier: &'static str, def: Def) -> Self {
        Self {
            type_identifier,
            def,
        }
    }

    /// Returns true if a value of this type can hold null, i.e. it is an
    /// `Option` or the dynamic `Value`.
    pub const fn is_nullable(&self) -> bool {
        matches!(self.def, Def::Option(_) | Def::Dynamic)
    }

    /// Looks through any number of `Option` layers.
    pub fn non_null(&'static self) -> &'static Shape {
        let mut shape = self;
        while let Def::Option(od) = shape.def {
            shape = od.t();
        }
        shape
    }

    /// Returns the struct definition, if this shape is a struct (through options).
    pub fn struct_def(&'static self) -> Option<StructDef> {
        match self.non_null().def {
            Def::Struct(sd) => Some(sd),
            _ => None,
        }
    }

    /// Returns the scalar type, if this shape is a scalar (through options).
    pub fn scalar_type(&'static self) -> Option<ScalarType> {
        match self.non_null().def {
            Def::Scalar(st) => Some(st),
            _ => None,
        }
    }

    /// Writes the type name, including generic parameters, e.g. `Vec<Option<i32>>`.
    pub fn write_type_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.def {
            Def::Option(od) => {
                write!(f, "{}<", self.type_identifier)?;
                od.t().write_type_name(f)?;
                write!(f, ">")
            }
            Def::List(ld) => {
                write!(f, "{}<", self.type_identifier)?;
                ld.t().write_type_name(f)?;
                write!(f, ">")
            }
            Def::Set(sd) => {
                write!(f, "{}<", self.type_identifier)?;
                sd.t().write_type_name(f)?;
                write!(f, ">")
            }
            Def::Array(ad) => match ad.len {
                Some(len) => {
                    write!(f, "[")?;
                    ad.t().write_type_name(f)?;
                    write!(f, "; {len}]")
                }
                None => {
                    write!(f, "{}<[", self.type_identifier)?;
                    ad.t().write_type_name(f)?;
                    write!(f, "]>")
                }
            },
            Def::Map(md) => {
                if md.v().is_dynamic() && md.ordering == MapOrdering::Insertion {
                    // ValueMap has no type parameters
                    return write!(f, "{}", self.type_identifier);
                }
                write!(f, "{}<String, ", self.type_identifier)?;
                md.v().write_type_name(f)?;
                write!(f, ">")
            }
            Def::Scalar(_) | Def::Struct(_) | Def::Dynamic => {
                write!(f, "{}", self.type_identifier)
            }
        }
    }

    /// Returns true if this is the shape of the dynamic `Value`.
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.def, Def::Dynamic)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_type_name(f)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_type_name(f)
    }
}

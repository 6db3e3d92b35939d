use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use std::collections::HashMap;

use crate::{AccessError, Field, FieldFlags, Reflect, Shape, StructDef, Value, ValueMap};

/// Everything the copy engine needs to know about one property.
#[derive(Clone, Copy, Debug)]
pub struct PropertyDescriptor<'a> {
    /// Name of the property
    pub name: &'a str,

    /// Declared shape of the property
    pub shape: &'static Shape,

    /// Read-only / write-only flags
    pub flags: FieldFlags,

    /// Date patterns declared on the property
    pub date_patterns: &'static [&'static str],

    /// Number patterns declared on the property
    pub number_patterns: &'static [&'static str],
}

impl<'a> PropertyDescriptor<'a> {
    /// Describes a struct field
    pub fn from_field(field: &'static Field) -> PropertyDescriptor<'static> {
        PropertyDescriptor {
            name: field.name,
            shape: field.shape(),
            flags: field.flags,
            date_patterns: field.date_patterns,
            number_patterns: field.number_patterns,
        }
    }

    /// Describes an entry of a mapping: any value, readable and writable
    pub fn dynamic(name: &'a str) -> Self {
        Self {
            name,
            shape: <Value as Reflect>::SHAPE,
            flags: FieldFlags::empty(),
            date_patterns: &[],
            number_patterns: &[],
        }
    }

    /// Returns true if the property has a getter
    pub fn is_readable(&self) -> bool {
        !self.flags.contains(FieldFlags::WRITE_ONLY)
    }

    /// Returns true if the property has a setter
    pub fn is_writable(&self) -> bool {
        !self.flags.contains(FieldFlags::READ_ONLY)
    }
}

/// Lists the properties of a struct definition, in declaration order
pub fn struct_properties(def: &StructDef) -> Vec<PropertyDescriptor<'static>> {
    def.fields.iter().map(PropertyDescriptor::from_field).collect()
}

/// Uniform, by-name access to the properties of an object.
///
/// Implemented by `#[derive(Bean)]` for structs with named fields, and by the
/// string-keyed mappings of [`Value`]s ([`ValueMap`], `HashMap`, `BTreeMap`).
///
/// A struct has a fixed set of properties, declared by its [`Shape`]. A
/// mapping is *open*: its properties are whatever keys it holds, and setting
/// an unknown name adds an entry.
pub trait Bean {
    /// The static description of the object's type
    fn shape(&self) -> &'static Shape;

    /// All properties, in declaration order (insertion order for mappings)
    fn properties(&self) -> Vec<PropertyDescriptor<'_>>;

    /// Reads a property as a dynamic value
    fn get(&self, name: &str) -> Result<Value, AccessError>;

    /// Writes a property. The value must already have the property's form;
    /// see [`Reflect::from_value`].
    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError>;

    /// Looks up a single property
    fn property(&self, name: &str) -> Option<PropertyDescriptor<'_>> {
        self.properties().into_iter().find(|p| p.name == name)
    }

    /// Returns true if setting an unknown property adds it rather than failing
    fn is_open(&self) -> bool {
        false
    }

    /// Captures every readable property into an insertion-ordered map
    fn to_value_map(&self) -> Result<ValueMap, AccessError> {
        let mut map = ValueMap::new();
        for prop in self.properties() {
            if prop.is_readable() {
                map.insert(prop.name, self.get(prop.name)?);
            }
        }
        Ok(map)
    }
}

macro_rules! impl_bean_for_mapping {
    ($ty:ty) => {
        impl Bean for $ty {
            fn shape(&self) -> &'static Shape {
                <$ty as Reflect>::SHAPE
            }

            fn properties(&self) -> Vec<PropertyDescriptor<'_>> {
                self.keys()
                    .map(|k| PropertyDescriptor::dynamic(k.as_str()))
                    .collect()
            }

            fn get(&self, name: &str) -> Result<Value, AccessError> {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| AccessError::NoSuchProperty {
                        shape: <$ty as Reflect>::SHAPE,
                        property: name.into(),
                    })
            }

            fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
                self.insert(String::from(name), value);
                Ok(())
            }

            fn property(&self, name: &str) -> Option<PropertyDescriptor<'_>> {
                self.get_key_value(name)
                    .map(|(k, _)| PropertyDescriptor::dynamic(k.as_str()))
            }

            fn is_open(&self) -> bool {
                true
            }

            fn to_value_map(&self) -> Result<ValueMap, AccessError> {
                let mut map = ValueMap::with_capacity(self.len());
                for (k, v) in self.iter() {
                    map.insert(k.clone(), v.clone());
                }
                Ok(map)
            }
        }
    };
}

impl_bean_for_mapping!(HashMap<String, Value>);
impl_bean_for_mapping!(BTreeMap<String, Value>);

impl Bean for ValueMap {
    fn shape(&self) -> &'static Shape {
        <ValueMap as Reflect>::SHAPE
    }

    fn properties(&self) -> Vec<PropertyDescriptor<'_>> {
        self.keys().map(PropertyDescriptor::dynamic).collect()
    }

    fn get(&self, name: &str) -> Result<Value, AccessError> {
        ValueMap::get(self, name)
            .cloned()
            .ok_or_else(|| AccessError::NoSuchProperty {
                shape: <ValueMap as Reflect>::SHAPE,
                property: name.into(),
            })
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        self.insert(name, value);
        Ok(())
    }

    fn property(&self, name: &str) -> Option<PropertyDescriptor<'_>> {
        self.get_key_value(name)
            .map(|(k, _)| PropertyDescriptor::dynamic(k))
    }

    fn is_open(&self) -> bool {
        true
    }

    fn to_value_map(&self) -> Result<ValueMap, AccessError> {
        Ok(self.clone())
    }
}

use alloc::boxed::Box;
use alloc::string::String;
use owo_colors::OwoColorize;

use crate::Shape;

/// Errors that can occur when reading or writing properties, or when
/// rebuilding a typed value from a [`Value`](crate::Value).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum AccessError {
    /// The type declares no property with that name
    NoSuchProperty {
        /// The shape of the bean
        shape: &'static Shape,
        /// The name that was looked up
        property: String,
    },

    /// The property exists but has no setter
    NotWritable {
        /// The shape of the bean
        shape: &'static Shape,
        /// The read-only property
        property: String,
    },

    /// The property exists but has no getter
    NotReadable {
        /// The shape of the bean
        shape: &'static Shape,
        /// The write-only property
        property: String,
    },

    /// Tried to get the wrong kind of value out of a [`Value`](crate::Value):
    /// e.g. a `String` was expected but the value is a list.
    Mismatch {
        /// The shape we were building
        expected: &'static Shape,
        /// The kind of value we got instead
        found: &'static str,
    },

    /// A number does not fit the target type
    OutOfRange {
        /// The shape we were building
        expected: &'static Shape,
        /// The offending value, rendered
        value: String,
    },

    /// A fixed-length array was built from the wrong number of elements
    LengthMismatch {
        /// The array shape
        expected: &'static Shape,
        /// The array's length
        expected_len: usize,
        /// The number of elements we got
        found_len: usize,
    },

    /// An error that occurred inside a property, or an element of a container
    Nested {
        /// Name of the property, or `[index]` for elements
        property: String,
        /// What went wrong inside it
        inner: Box<AccessError>,
    },
}

impl AccessError {
    /// Wraps this error as having happened inside `property`
    pub fn in_property(self, property: impl Into<String>) -> Self {
        AccessError::Nested {
            property: property.into(),
            inner: Box::new(self),
        }
    }

    /// Wraps this error as having happened at element `index`
    pub fn at_index(self, index: usize) -> Self {
        self.in_property(alloc::format!("[{index}]"))
    }

    /// The innermost error, past all the [`AccessError::Nested`] layers
    pub fn root_cause(&self) -> &AccessError {
        let mut err = self;
        while let AccessError::Nested { inner, .. } = err {
            err = &**inner;
        }
        err
    }
}

impl core::fmt::Display for AccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessError::NoSuchProperty { shape, property } => {
                write!(
                    f,
                    "No property '{}' on {}",
                    property.yellow(),
                    shape.blue()
                )
            }
            AccessError::NotWritable { shape, property } => {
                write!(
                    f,
                    "Property '{}::{}' is read-only",
                    shape.blue(),
                    property.yellow()
                )
            }
            AccessError::NotReadable { shape, property } => {
                write!(
                    f,
                    "Property '{}::{}' is write-only",
                    shape.blue(),
                    property.yellow()
                )
            }
            AccessError::Mismatch { expected, found } => {
                write!(
                    f,
                    "Wrong shape: expected {}, but got {}",
                    expected.green(),
                    found.red()
                )
            }
            AccessError::OutOfRange { expected, value } => {
                write!(f, "{} is out of range for {}", value.red(), expected.green())
            }
            AccessError::LengthMismatch {
                expected,
                expected_len,
                found_len,
            } => {
                write!(
                    f,
                    "Array '{}' needs exactly {} elements, but got {}",
                    expected.blue(),
                    expected_len,
                    found_len
                )
            }
            AccessError::Nested { .. } => {
                // print the whole path once, then the root cause
                let mut path = String::new();
                let mut err = self;
                while let AccessError::Nested { property, inner } = err {
                    if !path.is_empty() && !property.starts_with('[') {
                        path.push('.');
                    }
                    path.push_str(property);
                    err = &**inner;
                }
                write!(f, "At '{}': {}", path.yellow(), err)
            }
        }
    }
}

impl core::error::Error for AccessError {}

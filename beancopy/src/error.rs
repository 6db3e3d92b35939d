use alloc::string::String;
use alloc::vec::Vec;
use beancopy_core::{AccessError, ScalarType, Shape};
use owo_colors::OwoColorize;

/// Errors that can occur while copying properties from one object to another.
///
/// Every variant that concerns a single property carries its full path from
/// the root of the copy, e.g. `orders[1].lines[0].quantity`.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum CopyError {
    /// The target declares no property with that name.
    ///
    /// Only reported for explicitly addressed properties (see
    /// [`set_property`](crate::set_property)); a copy skips source properties
    /// the target does not have.
    NoSuchProperty {
        /// The shape of the object that was addressed
        shape: &'static Shape,
        /// The path of the property
        property: String,
    },

    /// The property is read-only, and the caller asked for it explicitly
    NotWritable {
        /// The shape of the object holding the property
        shape: &'static Shape,
        /// The path of the property
        property: String,
    },

    /// A scalar could not be converted to the type the target declares
    ConversionFailed {
        /// The path of the property
        property: String,
        /// The shape that was being built
        target: &'static Shape,
        /// The offending value, rendered
        value: String,
        /// What the converter said
        error: ConversionError,
    },

    /// The source value's shape cannot be turned into the target's shape,
    /// e.g. a map into a list, or a string into a set
    CoercionFailed {
        /// The path of the property
        property: String,
        /// The kind of the source value, e.g. `map`
        from: &'static str,
        /// The shape that was being built
        to: &'static Shape,
        /// Why not
        reason: String,
    },

    /// The object graph nests deeper than the configured limit
    DepthLimitExceeded {
        /// The path at which the limit was hit
        property: String,
        /// The limit
        limit: usize,
    },

    /// A property expression such as `a.b[0]` could not be parsed
    InvalidExpression {
        /// The expression as given
        expression: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// The accessor refused a value the engine had already coerced
    Access {
        /// The path of the property
        property: String,
        /// The accessor's error
        error: AccessError,
    },
}

impl CopyError {
    /// Maps an accessor failure at `property` onto the matching copy error
    pub(crate) fn from_access(property: String, error: AccessError) -> Self {
        match error.root_cause() {
            AccessError::NoSuchProperty { shape, .. } => CopyError::NoSuchProperty {
                shape: *shape,
                property,
            },
            AccessError::NotWritable { shape, .. } => CopyError::NotWritable {
                shape: *shape,
                property,
            },
            _ => CopyError::Access { property, error },
        }
    }

    /// The path of the property the error is about, if any
    pub fn property(&self) -> Option<&str> {
        match self {
            CopyError::NoSuchProperty { property, .. }
            | CopyError::NotWritable { property, .. }
            | CopyError::ConversionFailed { property, .. }
            | CopyError::CoercionFailed { property, .. }
            | CopyError::DepthLimitExceeded { property, .. }
            | CopyError::Access { property, .. } => Some(property),
            CopyError::InvalidExpression { .. } => None,
        }
    }
}

impl core::fmt::Display for CopyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CopyError::NoSuchProperty { shape, property } => {
                write!(
                    f,
                    "No property '{}' on {}",
                    property.yellow(),
                    shape.blue()
                )
            }
            CopyError::NotWritable { shape, property } => {
                write!(
                    f,
                    "Property '{}' of {} is read-only, but was explicitly included",
                    property.yellow(),
                    shape.blue()
                )
            }
            CopyError::ConversionFailed {
                property,
                target,
                value,
                error,
            } => {
                write!(
                    f,
                    "Cannot convert {} to {} for '{}': {}",
                    value.red(),
                    target.green(),
                    property.yellow(),
                    error
                )
            }
            CopyError::CoercionFailed {
                property,
                from,
                to,
                reason,
            } => {
                write!(
                    f,
                    "Cannot turn a {} into {} for '{}': {}",
                    from.red(),
                    to.green(),
                    property.yellow(),
                    reason
                )
            }
            CopyError::DepthLimitExceeded { property, limit } => {
                write!(
                    f,
                    "Nesting deeper than {} levels at '{}'",
                    limit.red(),
                    property.yellow()
                )
            }
            CopyError::InvalidExpression { expression, reason } => {
                write!(
                    f,
                    "Invalid property expression '{}': {}",
                    expression.yellow(),
                    reason
                )
            }
            CopyError::Access { property, error } => {
                write!(f, "At '{}': {}", property.yellow(), error)
            }
        }
    }
}

impl core::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CopyError::ConversionFailed { error, .. } => Some(error),
            CopyError::Access { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Errors a [`ScalarConverter`](crate::ScalarConverter) can report.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConversionError {
    /// No conversion exists from this kind of value to the target type
    Unsupported {
        /// The kind of the value, e.g. `list`
        from: &'static str,
        /// The target type
        to: ScalarType,
    },

    /// The value does not read as the target type, e.g. `"abc"` as `i32`
    Invalid {
        /// The value, rendered
        input: String,
        /// The target type
        to: ScalarType,
    },

    /// The number does not fit the target type
    OutOfRange {
        /// The value, rendered
        input: String,
        /// The target type
        to: ScalarType,
    },

    /// None of the configured patterns could parse the string
    PatternMismatch {
        /// The string
        input: String,
        /// The patterns that were tried, in order
        patterns: Vec<String>,
    },

    /// A sequence can only stand in for a scalar when it holds exactly one
    /// element
    NotSingleValued {
        /// How many elements it held
        len: usize,
    },

    /// A pattern is malformed
    BadPattern {
        /// The pattern
        pattern: String,
    },

    /// Reported by a custom converter
    Custom(String),
}

impl core::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConversionError::Unsupported { from, to } => {
                write!(f, "no conversion from {} to {}", from.red(), to.green())
            }
            ConversionError::Invalid { input, to } => {
                write!(f, "{:?} is not a valid {}", input.red(), to.green())
            }
            ConversionError::OutOfRange { input, to } => {
                write!(f, "{} is out of range for {}", input.red(), to.green())
            }
            ConversionError::PatternMismatch { input, patterns } => {
                write!(
                    f,
                    "{:?} matches none of the patterns {:?}",
                    input.red(),
                    patterns
                )
            }
            ConversionError::NotSingleValued { len } => {
                write!(
                    f,
                    "expected exactly one element to extract, got {}",
                    len.red()
                )
            }
            ConversionError::BadPattern { pattern } => {
                write!(f, "malformed pattern {:?}", pattern.red())
            }
            ConversionError::Custom(message) => f.write_str(message),
        }
    }
}

impl core::error::Error for ConversionError {}

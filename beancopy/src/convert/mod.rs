//! Scalar conversion: turning one leaf value into another leaf type.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use beancopy_core::{ScalarType, Value};

use crate::ConversionError;

#[cfg(feature = "chrono")]
mod date;
#[cfg(feature = "chrono")]
pub use date::{DEFAULT_DATE_FORMATS, DEFAULT_DATETIME_FORMATS};

mod number;
pub(crate) use number::NumberPattern;

/// What a converter knows about the value it is converting.
#[derive(Clone, Copy, Debug)]
pub struct ConversionContext<'a> {
    /// Dotted name of the property, without indices, e.g. `orders.total`
    pub property: &'a str,
    /// Date patterns that apply, first one wins
    pub date_patterns: &'a [&'a str],
    /// Number patterns that apply, first one wins
    pub number_patterns: &'a [&'a str],
    /// Whether the target can hold null
    pub nullable: bool,
}

impl<'a> ConversionContext<'a> {
    /// A context with no patterns, for a non-nullable target
    pub const fn new(property: &'a str) -> Self {
        Self {
            property,
            date_patterns: &[],
            number_patterns: &[],
            nullable: false,
        }
    }
}

/// Converts a scalar value into another scalar type.
///
/// The copy engine calls this for every value whose target is a scalar,
/// after checking custom converters registered in
/// [`CopyOptions`](crate::CopyOptions). [`BasicConverter`] is the default.
pub trait ScalarConverter: Send + Sync {
    /// Converts `value` into a value of type `target`.
    ///
    /// The returned value must be one [`Reflect::from_value`] accepts for
    /// `target`, or [`Value::Null`] when the target is nullable.
    ///
    /// [`Reflect::from_value`]: beancopy_core::Reflect::from_value
    fn convert(
        &self,
        value: Value,
        target: ScalarType,
        ctx: &ConversionContext<'_>,
    ) -> Result<Value, ConversionError>;
}

impl<F> ScalarConverter for F
where
    F: Fn(Value, ScalarType, &ConversionContext<'_>) -> Result<Value, ConversionError>
        + Send
        + Sync,
{
    fn convert(
        &self,
        value: Value,
        target: ScalarType,
        ctx: &ConversionContext<'_>,
    ) -> Result<Value, ConversionError> {
        self(value, target, ctx)
    }
}

/// The default conversions between scalars.
///
/// * to `bool`: numbers are true when their integral part is not zero;
///   strings are true when they are `"1"`, or `"true"` or `"on"` in any case.
///   Every other string is false.
/// * to integers: floats are truncated, `true` is 1 and `false` is 0,
///   strings are parsed (with the number patterns, if any). Values that do
///   not fit are errors, never wrapped.
/// * to floats: like integers, without truncation.
/// * to `String`: `true` is `"1"`, `false` is `"0"`; numbers use the first
///   number pattern, dates the first date pattern.
/// * to dates: strings are parsed with the date patterns, or the
///   [`DEFAULT_DATE_FORMATS`] / [`DEFAULT_DATETIME_FORMATS`].
///
/// An empty string becomes null when the target is nullable, and the zero
/// value (`false`, `0`) otherwise. A list, array or set with exactly one
/// element stands in for that element.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicConverter;

impl ScalarConverter for BasicConverter {
    fn convert(
        &self,
        value: Value,
        target: ScalarType,
        ctx: &ConversionContext<'_>,
    ) -> Result<Value, ConversionError> {
        let value = match value {
            Value::List(items) | Value::Array(items) => single_value(items)?,
            Value::Set(set) => single_value(set.into_vec())?,
            other => other,
        };

        match &value {
            Value::Null => return Ok(Value::Null),
            Value::String(s) if s.is_empty() && target != ScalarType::String => {
                return empty_string(target, ctx.nullable);
            }
            _ => {}
        }

        match target {
            ScalarType::Bool => to_bool(value),
            ScalarType::Char => to_char(value),
            ScalarType::String => to_string(value, ctx),
            #[cfg(feature = "chrono")]
            ScalarType::Date => date::to_date(value, ctx),
            #[cfg(feature = "chrono")]
            ScalarType::DateTime => date::to_datetime(value, ctx),
            t if t.is_integer() => to_integer(value, t, ctx),
            t if t.is_float() => to_float(value, t, ctx),
            t => Err(ConversionError::Unsupported {
                from: value.kind(),
                to: t,
            }),
        }
    }
}

fn single_value(items: Vec<Value>) -> Result<Value, ConversionError> {
    let len = items.len();
    match (items.into_iter().next(), len) {
        (Some(item), 1) => Ok(item),
        _ => Err(ConversionError::NotSingleValued { len }),
    }
}

fn empty_string(target: ScalarType, nullable: bool) -> Result<Value, ConversionError> {
    if nullable {
        return Ok(Value::Null);
    }
    match target {
        ScalarType::Bool => Ok(Value::Bool(false)),
        t if t.is_signed_integer() => Ok(Value::I64(0)),
        t if t.is_unsigned_integer() => Ok(Value::U64(0)),
        t if t.is_float() => Ok(Value::F64(0.0)),
        t => Err(ConversionError::Invalid {
            input: String::new(),
            to: t,
        }),
    }
}

fn to_bool(value: Value) -> Result<Value, ConversionError> {
    let b = match value {
        Value::Bool(b) => b,
        Value::I64(n) => n != 0,
        Value::U64(n) => n != 0,
        Value::F64(x) => x.trunc() != 0.0,
        Value::String(s) => {
            s.eq_ignore_ascii_case("true") || s == "1" || s.eq_ignore_ascii_case("on")
        }
        other => {
            return Err(ConversionError::Unsupported {
                from: other.kind(),
                to: ScalarType::Bool,
            });
        }
    };
    Ok(Value::Bool(b))
}

fn to_char(value: Value) -> Result<Value, ConversionError> {
    match value {
        Value::Char(c) => Ok(Value::Char(c)),
        Value::String(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(ConversionError::Invalid {
                    input: s,
                    to: ScalarType::Char,
                }),
            }
        }
        other => Err(ConversionError::Unsupported {
            from: other.kind(),
            to: ScalarType::Char,
        }),
    }
}

fn to_string(value: Value, ctx: &ConversionContext<'_>) -> Result<Value, ConversionError> {
    let s = match value {
        Value::String(s) => s,
        Value::Bool(b) => String::from(if b { "1" } else { "0" }),
        Value::Char(c) => c.to_string(),
        ref n @ (Value::I64(_) | Value::U64(_) | Value::F64(_)) => {
            match ctx.number_patterns.first() {
                Some(pattern) => NumberPattern::parse(pattern)?
                    .format(n)
                    .ok_or_else(|| ConversionError::Invalid {
                        input: n.to_string(),
                        to: ScalarType::String,
                    })?,
                None => n.to_string(),
            }
        }
        #[cfg(feature = "chrono")]
        ref d @ (Value::Date(_) | Value::DateTime(_)) => match date::format(d, ctx.date_patterns) {
            Some(formatted) => formatted?,
            None => d.to_string(),
        },
        other => {
            return Err(ConversionError::Unsupported {
                from: other.kind(),
                to: ScalarType::String,
            });
        }
    };
    Ok(Value::String(s))
}

/// Reads a string as a number, trying the number patterns in order
fn read_number(s: &str, patterns: &[&str]) -> Result<Value, ConversionError> {
    for pattern in patterns {
        if let Some(n) = NumberPattern::parse(pattern)?.read(s) {
            return Ok(n);
        }
    }
    Err(ConversionError::PatternMismatch {
        input: s.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    })
}

fn integer_value(n: i128, to: ScalarType) -> Result<Value, ConversionError> {
    if !to.accepts_integer(n) {
        return Err(ConversionError::OutOfRange {
            input: n.to_string(),
            to,
        });
    }
    if to.is_signed_integer() {
        Ok(Value::I64(n as i64))
    } else {
        Ok(Value::U64(n as u64))
    }
}

fn to_integer(
    value: Value,
    to: ScalarType,
    ctx: &ConversionContext<'_>,
) -> Result<Value, ConversionError> {
    match value {
        Value::Bool(b) => integer_value(i128::from(b), to),
        Value::I64(n) => integer_value(i128::from(n), to),
        Value::U64(n) => integer_value(i128::from(n), to),
        Value::F64(x) if x.is_finite() => {
            integer_value(x.trunc() as i128, to).map_err(|_| ConversionError::OutOfRange {
                input: x.to_string(),
                to,
            })
        }
        Value::F64(x) => Err(ConversionError::Invalid {
            input: x.to_string(),
            to,
        }),
        Value::String(s) if ctx.number_patterns.is_empty() => {
            let n = s.parse::<i128>().map_err(|_| ConversionError::Invalid {
                input: s.clone(),
                to,
            })?;
            integer_value(n, to)
        }
        Value::String(s) => to_integer(read_number(&s, ctx.number_patterns)?, to, ctx),
        other => Err(ConversionError::Unsupported {
            from: other.kind(),
            to,
        }),
    }
}

fn to_float(
    value: Value,
    to: ScalarType,
    ctx: &ConversionContext<'_>,
) -> Result<Value, ConversionError> {
    match value {
        Value::Bool(b) => Ok(Value::F64(if b { 1.0 } else { 0.0 })),
        Value::I64(n) => Ok(Value::F64(n as f64)),
        Value::U64(n) => Ok(Value::F64(n as f64)),
        Value::F64(x) => Ok(Value::F64(x)),
        Value::String(s) if ctx.number_patterns.is_empty() => s
            .parse::<f64>()
            .map(Value::F64)
            .map_err(|_| ConversionError::Invalid { input: s, to }),
        Value::String(s) => match read_number(&s, ctx.number_patterns)? {
            Value::I64(n) => Ok(Value::F64(n as f64)),
            other => Ok(other),
        },
        other => Err(ConversionError::Unsupported {
            from: other.kind(),
            to,
        }),
    }
}

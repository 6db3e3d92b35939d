use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write;

use beancopy_core::{ScalarType, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::ConversionContext;
use crate::ConversionError;

/// Tried in order when a date is read from a string and no pattern is set
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

/// Tried in order when a date-time is read from a string and no pattern is set
pub const DEFAULT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

pub(super) fn to_date(value: Value, ctx: &ConversionContext<'_>) -> Result<Value, ConversionError> {
    match value {
        Value::Date(d) => Ok(Value::Date(d)),
        Value::DateTime(dt) => Ok(Value::Date(dt.date())),
        Value::String(s) => parse_with(&s, ScalarType::Date, ctx.date_patterns, |s, p| {
            NaiveDate::parse_from_str(s, p).ok()
        })
        .map(Value::Date),
        other => Err(ConversionError::Unsupported {
            from: other.kind(),
            to: ScalarType::Date,
        }),
    }
}

pub(super) fn to_datetime(
    value: Value,
    ctx: &ConversionContext<'_>,
) -> Result<Value, ConversionError> {
    match value {
        Value::DateTime(dt) => Ok(Value::DateTime(dt)),
        Value::Date(d) => d
            .and_hms_opt(0, 0, 0)
            .map(Value::DateTime)
            .ok_or_else(|| ConversionError::Invalid {
                input: d.to_string(),
                to: ScalarType::DateTime,
            }),
        // an instant in UTC, e.g. `2024-03-01T09:30:00Z`
        Value::String(s) if ctx.date_patterns.is_empty() && s.ends_with('Z') => {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| Value::DateTime(dt.naive_utc()))
                .map_err(|_| ConversionError::Invalid {
                    input: s,
                    to: ScalarType::DateTime,
                })
        }
        Value::String(s) => parse_with(&s, ScalarType::DateTime, ctx.date_patterns, |s, p| {
            NaiveDateTime::parse_from_str(s, p).ok()
        })
        .map(Value::DateTime),
        other => Err(ConversionError::Unsupported {
            from: other.kind(),
            to: ScalarType::DateTime,
        }),
    }
}

/// Tries each pattern in order; without patterns, tries the defaults for
/// the target type
fn parse_with<T>(
    input: &str,
    to: ScalarType,
    patterns: &[&str],
    parse: impl Fn(&str, &str) -> Option<T>,
) -> Result<T, ConversionError> {
    if !patterns.is_empty() {
        return patterns
            .iter()
            .find_map(|p| parse(input, p))
            .ok_or_else(|| ConversionError::PatternMismatch {
                input: input.to_string(),
                patterns: patterns.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            });
    }

    let defaults = match to {
        ScalarType::DateTime => DEFAULT_DATETIME_FORMATS,
        _ => DEFAULT_DATE_FORMATS,
    };
    defaults
        .iter()
        .find_map(|p| parse(input, p))
        .ok_or_else(|| ConversionError::Invalid {
            input: input.to_string(),
            to,
        })
}

/// Formats a date or date-time with the first pattern, or in ISO 8601 when
/// there is none
pub(super) fn format(value: &Value, patterns: &[&str]) -> Option<Result<String, ConversionError>> {
    let mut out = String::new();
    let written = match (value, patterns.first()) {
        (Value::Date(d), Some(p)) => write!(out, "{}", d.format(p)),
        (Value::Date(d), None) => write!(out, "{}", d.format("%Y-%m-%d")),
        (Value::DateTime(dt), Some(p)) => write!(out, "{}", dt.format(p)),
        (Value::DateTime(dt), None) => write!(out, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        _ => return None,
    };
    Some(written.map(|()| out).map_err(|_| ConversionError::BadPattern {
        pattern: patterns.first().map(|p| p.to_string()).unwrap_or_default(),
    }))
}

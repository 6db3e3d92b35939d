use alloc::string::{String, ToString};
use alloc::format;

use beancopy_core::Value;

use crate::ConversionError;

/// A decimal number pattern, in the style of `#,##0.00`.
///
/// The body of the pattern is made of `#` (optional digit), `0` (mandatory
/// digit), `,` (grouping separator) and `.` (decimal point). Anything before
/// the body is a literal prefix, anything after it a literal suffix, so
/// `"¥#,##0"` and `"0.0 kg"` both work. A minus sign always goes before the
/// prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NumberPattern<'p> {
    prefix: &'p str,
    suffix: &'p str,
    min_int: usize,
    grouping: Option<usize>,
    min_frac: usize,
    max_frac: usize,
}

impl<'p> NumberPattern<'p> {
    pub(crate) fn parse(pattern: &'p str) -> Result<Self, ConversionError> {
        let is_body = |c: char| matches!(c, '#' | '0' | ',' | '.');
        let bad = || ConversionError::BadPattern {
            pattern: pattern.to_string(),
        };

        let start = pattern.find(is_body).ok_or_else(bad)?;
        let end = pattern.rfind(is_body).map(|i| i + 1).ok_or_else(bad)?;
        let body = &pattern[start..end];
        if !body.contains(['#', '0']) {
            return Err(bad());
        }

        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if frac_part.contains([',', '.']) {
            return Err(bad());
        }

        Ok(Self {
            prefix: &pattern[..start],
            suffix: &pattern[end..],
            min_int: int_part.chars().filter(|&c| c == '0').count(),
            grouping: int_part
                .rfind(',')
                .map(|i| int_part.len() - i - 1)
                .filter(|&size| size > 0),
            min_frac: frac_part.chars().take_while(|&c| c == '0').count(),
            max_frac: frac_part.len(),
        })
    }

    /// Reads a number written in this pattern. Integral numbers come back as
    /// [`Value::I64`], or [`Value::U64`] above `i64::MAX`; others, and
    /// integers too wide for either, as [`Value::F64`]. The whole input must
    /// match.
    pub(crate) fn read(&self, input: &str) -> Option<Value> {
        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let rest = rest.strip_prefix(self.prefix)?.strip_suffix(self.suffix)?;

        let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, ""));
        if self.grouping.is_none() && int_part.contains(',') {
            return None;
        }
        let int_digits: String = int_part.chars().filter(|&c| c != ',').collect();
        if int_digits.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_digits.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        let int_digits = if int_digits.is_empty() {
            "0"
        } else {
            int_digits.as_str()
        };

        if frac_part.trim_end_matches('0').is_empty() {
            if let Ok(n) = int_digits.parse::<i128>() {
                let n = if negative { -n } else { n };
                return Some(integral(n));
            }
        }
        let sign = if negative { "-" } else { "" };
        format!("{sign}{int_digits}.{frac_part}")
            .parse::<f64>()
            .ok()
            .map(Value::F64)
    }

    /// Writes a number in this pattern. Returns `None` for anything that is
    /// not a finite number.
    pub(crate) fn format(&self, value: &Value) -> Option<String> {
        let (negative, text) = match *value {
            Value::I64(n) => (n < 0, n.unsigned_abs().to_string()),
            Value::U64(n) => (false, n.to_string()),
            Value::F64(x) if x.is_finite() => {
                let text = format!("{:.*}", self.max_frac, x.abs());
                // -0.001 rounded to "0.00" prints without a sign
                let is_zero = text.chars().all(|c| c == '0' || c == '.');
                (x.is_sign_negative() && !is_zero, text)
            }
            _ => return None,
        };

        let (int_digits, frac_digits) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut frac = frac_digits.to_string();
        while frac.len() > self.min_frac && frac.ends_with('0') {
            frac.pop();
        }
        while frac.len() < self.min_frac {
            frac.push('0');
        }

        let mut int = if self.min_int == 0 && int_digits == "0" && !frac.is_empty() {
            String::new()
        } else {
            int_digits.to_string()
        };
        while int.len() < self.min_int {
            int.insert(0, '0');
        }
        if let Some(size) = self.grouping {
            int = group(&int, size);
        }

        let mut out = String::with_capacity(self.prefix.len() + int.len() + frac.len() + 2);
        if negative {
            out.push('-');
        }
        out.push_str(self.prefix);
        out.push_str(&int);
        if !frac.is_empty() {
            out.push('.');
            out.push_str(&frac);
        }
        out.push_str(self.suffix);
        Some(out)
    }
}

fn group(digits: &str, size: usize) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / size);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % size == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn integral(n: i128) -> Value {
    match (i64::try_from(n), u64::try_from(n)) {
        (Ok(n), _) => Value::I64(n),
        (_, Ok(n)) => Value::U64(n),
        _ => Value::F64(n as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_with_two_decimals() {
        let p = NumberPattern::parse("#,##0.00").unwrap();
        assert_eq!(p.format(&Value::F64(1234.5)).as_deref(), Some("1,234.50"));
        assert_eq!(p.format(&Value::I64(-1234567)).as_deref(), Some("-1,234,567.00"));
        assert_eq!(p.format(&Value::U64(0)).as_deref(), Some("0.00"));
        assert_eq!(p.read("1,234.50"), Some(Value::F64(1234.5)));
        assert_eq!(p.read("1,234.00"), Some(Value::I64(1234)));
        assert_eq!(p.read("-12"), Some(Value::I64(-12)));
        assert_eq!(p.read("12a"), None);
        assert_eq!(
            p.read("18,446,744,073,709,551,615"),
            Some(Value::U64(u64::MAX))
        );
        assert_eq!(
            p.read("-9,223,372,036,854,775,808"),
            Some(Value::I64(i64::MIN))
        );
    }

    #[test]
    fn zero_padding_and_optional_digits() {
        let p = NumberPattern::parse("0000").unwrap();
        assert_eq!(p.format(&Value::I64(12)).as_deref(), Some("0012"));
        assert_eq!(p.read("0012"), Some(Value::I64(12)));
        assert_eq!(p.read("1,000"), None);

        let p = NumberPattern::parse("#.##").unwrap();
        assert_eq!(p.format(&Value::F64(0.5)).as_deref(), Some(".5"));
        assert_eq!(p.format(&Value::F64(2.0)).as_deref(), Some("2"));
        assert_eq!(p.read(".5"), Some(Value::F64(0.5)));
    }

    #[test]
    fn literal_prefix_and_suffix() {
        let p = NumberPattern::parse("$#,##0 USD").unwrap();
        assert_eq!(p.format(&Value::I64(1500)).as_deref(), Some("$1,500 USD"));
        assert_eq!(p.read("$1,500 USD"), Some(Value::I64(1500)));
        assert_eq!(p.read("1,500"), None);
    }

    #[test]
    fn malformed_patterns() {
        assert!(NumberPattern::parse("abc").is_err());
        assert!(NumberPattern::parse(",.").is_err());
        assert!(NumberPattern::parse("0.0,0").is_err());
        assert!(NumberPattern::parse("#,##0").unwrap().format(&Value::Bool(true)).is_none());
    }
}

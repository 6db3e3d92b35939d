use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::SetOrdering;

mod map;
pub use map::*;

mod set;
pub use set::*;

mod reflect;

/// An owned, dynamically-shaped value.
///
/// This is what values travel as between the typed worlds: a property read
/// from a struct is captured as a `Value`, coerced into the form the target
/// property declares, then written.
///
/// Integers are widened to `I64` (signed types) or `U64` (unsigned types),
/// floats to `F64`. Equality and ordering are structural, except that
/// integers compare by their numeric value: `I64(1)` equals `U64(1)`.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A signed integer
    I64(i64),
    /// An unsigned integer
    U64(u64),
    /// A floating point number
    F64(f64),
    /// A single character
    Char(char),
    /// A string
    String(String),
    /// A calendar date
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate),
    /// A date and time of day, without time zone
    #[cfg(feature = "chrono")]
    DateTime(chrono::NaiveDateTime),
    /// An ordered sequence, duplicates allowed
    List(Vec<Value>),
    /// A fixed-length, index-addressed run of values
    Array(Vec<Value>),
    /// A set of unique values
    Set(ValueSet),
    /// String-keyed entries, in insertion order
    Map(ValueMap),
}

impl Value {
    /// Returns true for [`Value::Null`]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's variant, used in error messages
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I64(_) => "signed integer",
            Value::U64(_) => "unsigned integer",
            Value::F64(_) => "float",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            #[cfg(feature = "chrono")]
            Value::Date(_) => "date",
            #[cfg(feature = "chrono")]
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Array(_) => "array",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Builds a [`Value::List`]
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Value::Array`]
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Value::Set`] whose iteration order carries no meaning.
    /// Duplicates collapse, first occurrence wins.
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(ValueSet::from_items(SetOrdering::Hashed, items))
    }

    /// Builds a sorted [`Value::Set`]
    pub fn sorted_set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(ValueSet::from_items(SetOrdering::Sorted, items))
    }

    /// Builds a [`Value::Map`], keeping the entries' order
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Borrows the elements of a list, array or set
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Array(items) => Some(items),
            Value::Set(set) => Some(set.as_slice()),
            _ => None,
        }
    }

    /// Takes the elements out of a list, array or set
    pub fn into_elements(self) -> Result<Vec<Value>, Value> {
        match self {
            Value::List(items) | Value::Array(items) => Ok(items),
            Value::Set(set) => Ok(set.into_vec()),
            other => Err(other),
        }
    }

    /// Borrows the entries of a map
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer as `i128`, if this is an integer
    pub const fn as_integer(&self) -> Option<i128> {
        match self {
            Value::I64(n) => Some(*n as i128),
            Value::U64(n) => Some(*n as i128),
            _ => None,
        }
    }

    /// Variant rank, used to order values of different variants
    const fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::I64(_) => 2,
            Value::U64(_) => 2,
            Value::F64(_) => 4,
            Value::Char(_) => 5,
            Value::String(_) => 6,
            #[cfg(feature = "chrono")]
            Value::Date(_) => 7,
            #[cfg(feature = "chrono")]
            Value::DateTime(_) => 8,
            Value::List(_) => 9,
            Value::Array(_) => 10,
            Value::Set(_) => 11,
            Value::Map(_) => 12,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::I64(a), Value::I64(b)) => a.cmp(b),
            (Value::U64(a), Value::U64(b)) => a.cmp(b),
            (Value::I64(a), Value::U64(b)) => i128::from(*a).cmp(&i128::from(*b)),
            (Value::U64(a), Value::I64(b)) => i128::from(*a).cmp(&i128::from(*b)),
            // total order, so that floats can live in sorted sets
            (Value::F64(a), Value::F64(b)) => a.total_cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            #[cfg(feature = "chrono")]
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            #[cfg(feature = "chrono")]
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::I64(n as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::U64(n as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::F64(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl From<ValueSet> for Value {
    fn from(set: ValueSet) -> Self {
        Value::Set(set)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Value {
    fn from(d: chrono::NaiveDate) -> Self {
        Value::Date(d)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDateTime> for Value {
    fn from(dt: chrono::NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl IntoIterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I64(n) => write!(f, "{n}"),
            Value::U64(n) => write!(f, "{n}"),
            Value::F64(n) => write!(f, "{n:?}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            #[cfg(feature = "chrono")]
            Value::Date(d) => write!(f, "{d}"),
            #[cfg(feature = "chrono")]
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::List(items) => write_seq(f, "[", items, "]"),
            Value::Array(items) => write_seq(f, "#[", items, "]"),
            Value::Set(set) => write_seq(f, "{", set.iter(), "}"),
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn integers_compare_by_value_across_signedness() {
        assert_eq!(Value::I64(1), Value::U64(1));
        assert!(Value::I64(-1) < Value::U64(0));
        assert!(Value::I64(i64::MAX) < Value::U64(u64::MAX));
        assert!(Value::U64(2) > Value::I64(1));
        assert!(Value::U64(0) < Value::F64(-1.0));

        let set = ValueSet::from_items(SetOrdering::Sorted, [Value::U64(3), Value::I64(3)]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn floats_have_a_total_order() {
        let mut values = vec![Value::F64(f64::NAN), Value::F64(1.5), Value::F64(-3.0)];
        values.sort();
        assert_eq!(values[0], Value::F64(-3.0));
        assert_eq!(values[1], Value::F64(1.5));
        assert_eq!(values[2], Value::F64(f64::NAN));
    }

    #[test]
    fn option_into_value() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }

    #[test]
    fn display_distinguishes_containers() {
        assert_eq!(Value::list([1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::array([1, 2]).to_string(), "#[1, 2]");
        assert_eq!(Value::sorted_set([2, 1]).to_string(), "{1, 2}");
        assert_eq!(
            Value::map([("a", Value::from(1)), ("b", Value::Null)]).to_string(),
            r#"{"a": 1, "b": null}"#
        );
    }

    #[test]
    fn elements_of_sets_and_arrays() {
        let v = Value::set(["x", "y", "x"]);
        assert_eq!(v.as_elements().map(<[Value]>::len), Some(2));
        assert_eq!(
            Value::array([true]).into_elements().ok(),
            Some(vec![Value::Bool(true)])
        );
        assert!(Value::from(3).into_elements().is_err());
    }
}

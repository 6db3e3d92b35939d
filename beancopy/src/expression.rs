//! Property expressions: `address.city`, `lines[2].quantity`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write;

use beancopy_core::{Shape, Value, ValueMap};

use crate::CopyError;

/// One step of a property path
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// A named property, or a map key
    Name(String),
    /// An element of a list or array
    Index(usize),
}

/// Parses `a.b[0].c` into steps. The first step is always a name.
pub(crate) fn parse(expression: &str) -> Result<Vec<Step>, CopyError> {
    let invalid = |reason| CopyError::InvalidExpression {
        expression: expression.to_string(),
        reason,
    };

    let mut steps = Vec::new();
    let mut rest = expression;
    let mut expect_name = true;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            if steps.is_empty() {
                return Err(invalid("must start with a property name"));
            }
            if expect_name {
                return Err(invalid("empty property name"));
            }
            let (digits, after) = after.split_once(']').ok_or_else(|| invalid("unclosed '['"))?;
            let index = digits
                .parse::<usize>()
                .map_err(|_| invalid("index is not a number"))?;
            steps.push(Step::Index(index));
            rest = after;
            expect_name = false;
        } else if let Some(after) = rest.strip_prefix('.') {
            if expect_name {
                return Err(invalid("empty property name"));
            }
            rest = after;
            expect_name = true;
        } else {
            if !expect_name {
                return Err(invalid("expected '.' or '[' after an index"));
            }
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            if rest[..end].contains(']') {
                return Err(invalid("unexpected ']'"));
            }
            steps.push(Step::Name(rest[..end].to_string()));
            rest = &rest[end..];
            expect_name = false;
        }
    }
    if expect_name {
        return Err(invalid("empty property name"));
    }
    Ok(steps)
}

/// Returns true if a key needs [`parse`] rather than being a plain name
pub(crate) fn is_compound(key: &str) -> bool {
    key.contains(['.', '['])
}

/// Renders steps back into an expression, e.g. `lines[2].quantity`
pub(crate) fn render(steps: &[Step]) -> String {
    let mut out = String::new();
    for step in steps {
        match step {
            Step::Name(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            Step::Index(i) => {
                let _ = write!(out, "[{i}]");
            }
        }
    }
    out
}

/// Renders only the names, e.g. `lines.quantity`: how options address
/// properties
pub(crate) fn render_names(steps: &[Step]) -> String {
    let mut out = String::new();
    for step in steps {
        if let Step::Name(name) = step {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(name);
        }
    }
    out
}

/// Folds dotted and indexed keys into nested maps and lists:
/// `{"a.b": 1, "c[1]": 2}` becomes `{"a": {"b": 1}, "c": [null, 2]}`.
///
/// Keys that do not parse as expressions are kept as they are. When a plain
/// key and a compound key disagree on a value's form, the later one wins.
/// An index may run ahead of a list by at most as many entries as there are
/// keys; anything further is an [`CopyError::InvalidExpression`].
pub(crate) fn unflatten(entries: ValueMap) -> Result<ValueMap, CopyError> {
    if !entries.keys().any(is_compound) {
        return Ok(entries);
    }

    let slack = entries.len();
    let mut root = Value::Map(ValueMap::with_capacity(entries.len()));
    for (key, value) in entries {
        let placed = match parse(&key) {
            Ok(steps) if is_compound(&key) => place(&mut root, &steps, value, slack),
            _ => place(&mut root, &[Step::Name(key.clone())], value, slack),
        };
        placed.map_err(|reason| CopyError::InvalidExpression {
            expression: key,
            reason,
        })?;
    }
    Ok(match root {
        Value::Map(map) => map,
        _ => ValueMap::new(),
    })
}

/// Puts `value` at `steps` inside `root`, creating maps and lists (padded
/// with nulls) on the way
fn place(root: &mut Value, steps: &[Step], value: Value, slack: usize) -> Result<(), &'static str> {
    let Some((step, rest)) = steps.split_first() else {
        *root = value;
        return Ok(());
    };
    match step {
        Step::Name(name) => {
            if !matches!(root, Value::Map(_)) {
                *root = Value::Map(ValueMap::new());
            }
            let Value::Map(map) = root else {
                return Err("not a map");
            };
            if map.get(name).is_none() {
                map.insert(name.as_str(), Value::Null);
            }
            match map.get_mut(name) {
                Some(slot) => place(slot, rest, value, slack),
                None => Err("no such entry"),
            }
        }
        Step::Index(i) => {
            if !matches!(root, Value::List(_) | Value::Array(_)) {
                *root = Value::List(Vec::new());
            }
            let (Value::List(items) | Value::Array(items)) = root else {
                return Err("not a list");
            };
            if *i > items.len().saturating_add(slack) {
                return Err("index too far past the end");
            }
            let len = i.checked_add(1).ok_or("index too large")?;
            if items.len() < len {
                items.resize(len, Value::Null);
            }
            match items.get_mut(*i) {
                Some(slot) => place(slot, rest, value, slack),
                None => Err("index out of bounds"),
            }
        }
    }
}

/// Writes the properties of `value` into `out` with dotted keys, descending
/// into struct-shaped properties only. `shape` is the declared shape of
/// `value`.
pub(crate) fn flatten_into(out: &mut ValueMap, prefix: &str, value: Value, shape: &'static Shape) {
    match (value, shape.struct_def()) {
        (Value::Map(map), Some(def)) => {
            for (key, inner) in map {
                let Some(field) = def.field(&key) else {
                    continue;
                };
                let key = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(out, &key, inner, field.shape());
            }
        }
        (value, _) => {
            out.insert(prefix, value);
        }
    }
}

/// Reads the value at `steps` below `value`. A null on the way reads as null.
pub(crate) fn lookup(mut value: Value, steps: &[Step]) -> Option<Value> {
    for step in steps {
        value = match (step, value) {
            (_, Value::Null) => return Some(Value::Null),
            (Step::Name(name), Value::Map(mut map)) => map.remove(name)?,
            (Step::Index(i), value) => value.into_elements().ok()?.into_iter().nth(*i)?,
            _ => return None,
        };
    }
    Some(value)
}

/// Replaces the value at `steps` inside `root`. Null maps and lists on the
/// way are created; an index may address an existing element or append one.
pub(crate) fn assign(root: &mut Value, steps: &[Step], value: Value) -> Result<(), &'static str> {
    let Some((step, rest)) = steps.split_first() else {
        *root = value;
        return Ok(());
    };
    match (step, root) {
        (Step::Name(_), root @ Value::Null) => {
            *root = Value::Map(ValueMap::new());
            assign(root, steps, value)
        }
        (Step::Name(name), Value::Map(map)) => {
            if map.get(name).is_none() {
                map.insert(name.as_str(), Value::Null);
            }
            match map.get_mut(name) {
                Some(slot) => assign(slot, rest, value),
                None => Err("no such entry"),
            }
        }
        (Step::Index(_), root @ Value::Null) => {
            *root = Value::List(Vec::new());
            assign(root, steps, value)
        }
        (Step::Index(i), Value::List(items) | Value::Array(items)) => {
            if *i == items.len() {
                items.push(Value::Null);
            }
            match items.get_mut(*i) {
                Some(slot) => assign(slot, rest, value),
                None => Err("index out of bounds"),
            }
        }
        (Step::Name(_), _) => Err("not a map or struct"),
        (Step::Index(_), _) => Err("not a list or array"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn name(s: &str) -> Step {
        Step::Name(s.to_string())
    }

    #[test]
    fn parses_names_and_indices() {
        assert_eq!(parse("a").unwrap(), vec![name("a")]);
        assert_eq!(
            parse("lines[2].quantity").unwrap(),
            vec![name("lines"), Step::Index(2), name("quantity")]
        );
        assert_eq!(
            parse("m[0][1]").unwrap(),
            vec![name("m"), Step::Index(0), Step::Index(1)]
        );
    }

    #[test]
    fn rejects_malformed_expressions() {
        for bad in ["", ".a", "a.", "a..b", "[0]", "a[x]", "a[0", "a[0]b", "a]", "a.[0]"] {
            assert!(
                matches!(parse(bad), Err(CopyError::InvalidExpression { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn renders_full_and_name_only_paths() {
        let steps = parse("lines[2].quantity").unwrap();
        assert_eq!(render(&steps), "lines[2].quantity");
        assert_eq!(render_names(&steps), "lines.quantity");
    }

    #[test]
    fn unflatten_builds_nested_maps_and_lists() {
        let flat: ValueMap = [
            ("id", Value::from(1)),
            ("address.city", Value::from("Oslo")),
            ("address.zip", Value::from("0150")),
            ("tags[1]", Value::from("b")),
            ("weird[key", Value::from(true)),
        ]
        .into_iter()
        .collect();

        let nested = unflatten(flat).unwrap();
        assert_eq!(
            Value::Map(nested),
            Value::map([
                ("id", Value::from(1)),
                (
                    "address",
                    Value::map([("city", "Oslo"), ("zip", "0150")])
                ),
                ("tags", Value::list([Value::Null, Value::from("b")])),
                ("weird[key", Value::from(true)),
            ])
        );
    }

    #[test]
    fn unflatten_refuses_runaway_indices() {
        for key in ["tags[18446744073709551615]", "tags[100000000000]", "a.b[3]"] {
            let flat: ValueMap = [(key, Value::from("x"))].into_iter().collect();
            assert!(
                matches!(unflatten(flat), Err(CopyError::InvalidExpression { .. })),
                "{key:?} should be refused"
            );
        }

        // one null of padding per key is fine
        let flat: ValueMap = [("tags[1]", Value::from("x"))].into_iter().collect();
        assert_eq!(
            Value::Map(unflatten(flat).unwrap()),
            Value::map([("tags", Value::list([Value::Null, Value::from("x")]))])
        );
    }

    #[test]
    fn lookup_and_assign() {
        let mut root = Value::map([("a", Value::map([("b", Value::list([1, 2]))]))]);
        assert_eq!(
            lookup(root.clone(), &parse("a.b[1]").unwrap()),
            Some(Value::from(2))
        );
        assert_eq!(lookup(root.clone(), &parse("a.c").unwrap()), None);

        assign(&mut root, &parse("a.b[2]").unwrap(), Value::from(3)).unwrap();
        assign(&mut root, &parse("x.y").unwrap(), Value::from("new")).unwrap();
        assert_eq!(
            root,
            Value::map([
                ("a", Value::map([("b", Value::list([1, 2, 3]))])),
                ("x", Value::map([("y", "new")])),
            ])
        );
        assert!(assign(&mut root, &parse("a.b[7]").unwrap(), Value::Null).is_err());
        assert!(assign(&mut root, &parse("a.b.c").unwrap(), Value::Null).is_err());
    }
}

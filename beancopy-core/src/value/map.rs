use alloc::string::String;
use alloc::vec::Vec;

use super::Value;

/// String-keyed map that remembers insertion order.
///
/// Re-inserting an existing key replaces its value in place, so the key keeps
/// its original position. Two maps are equal only if they hold the same
/// entries in the same order.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ValueMap {
    entries: Vec<(String, Value)>,
}

impl ValueMap {
    /// Creates an empty map
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Inserts an entry, returning the value previously stored under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Some(core::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Returns the stored key and value for `key`
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &Value)> {
        self.position(key)
            .map(|i| (self.entries[i].0.as_str(), &self.entries[i].1))
    }

    /// Returns the value stored under `key`, mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.position(key).map(|i| &mut self.entries[i].1)
    }

    /// Removes the entry for `key`, keeping the order of the others
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Returns true if there is an entry for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Keys, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Values, in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Entries, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: Into<String>> Extend<(K, Value)> for ValueMap {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn reinsert_keeps_position() {
        let mut map = ValueMap::new();
        map.insert("a", Value::from(1));
        map.insert("b", Value::from(2));
        assert_eq!(map.insert("a", Value::from(3)), Some(Value::from(1)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::from(3)));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: ValueMap = [("a", Value::Null), ("b", Value::Null)].into_iter().collect();
        let ba: ValueMap = [("b", Value::Null), ("a", Value::Null)].into_iter().collect();
        assert_ne!(ab, ba);
    }

    #[test]
    fn remove_keeps_order() {
        let mut map: ValueMap = [("x", Value::from(1)), ("y", Value::from(2)), ("z", Value::from(3))]
            .into_iter()
            .collect();
        assert_eq!(map.remove("y"), Some(Value::from(2)));
        assert_eq!(map.remove("y"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "z"]);
    }
}

use alloc::vec::Vec;
use core::cmp::Ordering;

use super::Value;
use crate::SetOrdering;

/// A set of unique [`Value`]s.
///
/// A [`SetOrdering::Sorted`] set keeps its members in ascending order. A
/// [`SetOrdering::Hashed`] set keeps them in the order they were first
/// inserted, which carries no meaning: equality ignores it.
#[derive(Clone, Debug, Default)]
pub struct ValueSet {
    items: Vec<Value>,
    ordering: SetOrdering,
}

impl ValueSet {
    /// Creates an empty set
    pub const fn new(ordering: SetOrdering) -> Self {
        Self {
            items: Vec::new(),
            ordering,
        }
    }

    /// Builds a set from `items`; later duplicates are dropped
    pub fn from_items<I, V>(ordering: SetOrdering, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut set = Self::new(ordering);
        for item in items {
            set.insert(item.into());
        }
        set
    }

    /// How the set orders its members
    pub const fn ordering(&self) -> SetOrdering {
        self.ordering
    }

    /// Adds a member. Returns false (and leaves the set unchanged) if an
    /// equal member is already present.
    pub fn insert(&mut self, value: Value) -> bool {
        match self.ordering {
            SetOrdering::Sorted => match self.items.binary_search(&value) {
                Ok(_) => false,
                Err(i) => {
                    self.items.insert(i, value);
                    true
                }
            },
            SetOrdering::Hashed => {
                if self.items.contains(&value) {
                    false
                } else {
                    self.items.push(value);
                    true
                }
            }
        }
    }

    /// Returns true if an equal member is present
    pub fn contains(&self, value: &Value) -> bool {
        match self.ordering {
            SetOrdering::Sorted => self.items.binary_search(value).is_ok(),
            SetOrdering::Hashed => self.items.contains(value),
        }
    }

    /// Members, in the set's iteration order
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Members as a slice
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Takes the members out
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set has no members
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn sorted(&self) -> Vec<&Value> {
        let mut items: Vec<&Value> = self.items.iter().collect();
        if self.ordering == SetOrdering::Hashed {
            items.sort();
        }
        items
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ValueSet {}

impl PartialOrd for ValueSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ValueSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = alloc::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

use alloc::string::String;
use alloc::vec::Vec;

/// Restricts a copy to some top-level property names.
///
/// A non-empty include-list wins: only those names are copied and the
/// exclude-list is ignored. Otherwise every name not in the exclude-list is
/// copied. Names that match no property are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) includes: Vec<String>,
    pub(crate) excludes: Vec<String>,
}

impl Selection {
    /// Returns true if neither list names anything
    pub(crate) fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    pub(crate) fn is_selected(&self, name: &str) -> bool {
        if !self.includes.is_empty() {
            return self.is_included(name);
        }
        !self.excludes.iter().any(|e| e == name)
    }

    /// Returns true if the caller asked for this name explicitly
    pub(crate) fn is_included(&self, name: &str) -> bool {
        self.includes.iter().any(|i| i == name)
    }
}

/// Filters `all` down to the names a copy would consider, keeping the order
/// of `all`.
///
/// ```
/// let names = beancopy::selected_names(["id", "name", "tags"], &["tags", "id"], &["id"]);
/// assert_eq!(names, ["id", "tags"]);
///
/// let names = beancopy::selected_names(["id", "name", "tags"], &[], &["id", "nope"]);
/// assert_eq!(names, ["name", "tags"]);
/// ```
pub fn selected_names<'n>(
    all: impl IntoIterator<Item = &'n str>,
    includes: &[&str],
    excludes: &[&str],
) -> Vec<&'n str> {
    all.into_iter()
        .filter(|name| {
            if includes.is_empty() {
                !excludes.contains(name)
            } else {
                includes.contains(name)
            }
        })
        .collect()
}

//! Identity-keyed set used for relationship and engagement fields.
//!
//! Documents store likes, shares, applicants and connections as JSON arrays,
//! but every operation on them is a membership test or a dedup-on-insert.
//! `IdSet` makes that explicit: it serializes as an array and collapses
//! duplicates when read back.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of identities with array serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSet<T: Ord> {
    inner: BTreeSet<T>,
}

impl<T: Ord> IdSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            inner: BTreeSet::new(),
        }
    }

    /// Insert an identity, returning `true` if it was not already present
    pub fn insert(&mut self, id: T) -> bool {
        self.inner.insert(id)
    }

    /// Remove an identity, returning `true` if it was present
    pub fn remove(&mut self, id: &T) -> bool {
        self.inner.remove(id)
    }

    pub fn contains(&self, id: &T) -> bool {
        self.inner.contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.iter()
    }
}

impl<T: Ord + Clone> IdSet<T> {
    /// Copy the members out in set order
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.iter().cloned().collect()
    }
}

impl<T: Ord> Default for IdSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for IdSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord> IntoIterator for IdSet<T> {
    type Item = T;
    type IntoIter = std::collections::btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a IdSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T: Ord + Serialize> Serialize for IdSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.inner.iter())
    }
}

impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for IdSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    #[test]
    fn insert_reports_whether_the_member_is_new() {
        let mut set = IdSet::new();
        assert!(set.insert(UserId::from("a")));
        assert!(!set.insert(UserId::from("a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut set: IdSet<UserId> = ["a", "b"].into_iter().map(UserId::from).collect();
        assert!(set.remove(&UserId::from("a")));
        assert!(!set.remove(&UserId::from("a")));
        assert!(set.contains(&UserId::from("b")));
    }

    #[test]
    fn deserializing_collapses_duplicates() {
        let set: IdSet<UserId> = serde_json::from_str(r#"["b", "a", "b"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }
}

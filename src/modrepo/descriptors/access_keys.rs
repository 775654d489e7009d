//! Page-wide access key bookkeeping.
//!
//! Browsers resolve a duplicated `accesskey` to whichever control comes first, so a
//! collision silently disables a shortcut. Every control that binds a key goes
//! through [`AccessKeyRegistry::bind`], which refuses a second owner.

use crate::error::{RepoError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessKeyRegistry {
    bound: BTreeMap<char, String>,
}

impl AccessKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` (case-insensitive) to `owner`.
    pub fn bind(&mut self, key: char, owner: impl Into<String>) -> Result<()> {
        let owner = owner.into();
        let key = normalize(key);
        if let Some(first) = self.bound.get(&key) {
            return Err(RepoError::AccessKeyCollision {
                key,
                first: first.clone(),
                second: owner,
            });
        }
        self.bound.insert(key, owner);
        Ok(())
    }

    pub fn owner(&self, key: char) -> Option<&str> {
        self.bound.get(&normalize(key)).map(String::as_str)
    }

    /// Bound keys, lowercase, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.bound.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

/// The form used in `accesskey` attributes.
pub fn normalize(key: char) -> char {
    key.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_distinct_keys() {
        let mut registry = AccessKeyRegistry::new();
        registry.bind('M', "selectable manual").unwrap();
        registry.bind('w', "selectable steam").unwrap();
        registry.bind('.', "more").unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.owner('m'), Some("selectable manual"));
        assert_eq!(registry.keys().collect::<String>(), ".mw");
    }

    #[test]
    fn collision_is_case_insensitive() {
        let mut registry = AccessKeyRegistry::new();
        registry.bind('T', "selectable video").unwrap();

        let err = registry.bind('t', "sort by type").unwrap_err();
        match err {
            RepoError::AccessKeyCollision { key, first, second } => {
                assert_eq!(key, 't');
                assert_eq!(first, "selectable video");
                assert_eq!(second, "sort by type");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

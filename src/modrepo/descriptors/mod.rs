//! # Descriptor Model
//!
//! Descriptors are the single source of truth shared by the server-rendered rows and
//! the client-side filtering engine. Each descriptor owns a key; that key is both the
//! `data-<key>` attribute on every row and the name the client configuration uses.
//!
//! ## Descriptor Types
//!
//! | Type | Examples | Describes |
//! |------|----------|-----------|
//! | [`FilterDescriptor`] (`checkbox-set`) | `type`, `origin` | Categorical axis, values enumerated from the catalog |
//! | [`FilterDescriptor`] (`slider`) | `defdiff`, `expdiff` | Ordinal range with a label per step |
//! | [`FilterDescriptor`] (`boolean`) | `twitchplays` | Single on/off restriction |
//! | [`SelectableDescriptor`] | `manual`, `steam`, `source`, `video` | Link target for module names |
//! | [`SortOption`] / [`PageControl`] | `name`, `include-missing` | Controls that only bind access keys |
//!
//! ## Key Rules
//!
//! - Keys are lowercase ASCII letters, digits and `-`, so `data-<key>` is a valid attribute
//! - Keys are unique across filters and selectables
//! - `mod` and `sortkey` are reserved for row identity and default ordering
//!
//! [`validate_keys`] checks all three before anything is rendered.

mod access_keys;
mod filter;
mod registry;
mod selectable;

pub use access_keys::{normalize as normalize_access_key, AccessKeyRegistry};
pub use filter::{
    Choice, ConfiguredFilter, FilterDescriptor, FilterKind, FilterShape, FilterValue, Projection,
    SerializedFilter, SliderLabel,
};
pub use registry::{
    PageControl, SortOption, FILTERS, INCLUDE_MISSING, MORE, PAGE_CONTROLS, SEE_JSON,
    SELECTABLES, SORT_OPTIONS,
};
pub use selectable::{
    Link, LinkResolver, ManualLink, ResolveContext, SelectableDescriptor, SourceCodeLink,
    SteamWorkshopLink, TutorialVideoLink, STEAM_WORKSHOP_ITEM_URL,
};

use crate::error::{RepoError, Result};
use std::collections::HashSet;

/// Row attribute names the page always writes.
pub const RESERVED_KEYS: [&str; 2] = ["mod", "sortkey"];

/// Checks the key rules across a set of filters and selectables.
pub fn validate_keys(filters: &[FilterDescriptor], selectables: &[SelectableDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    let keys = filters
        .iter()
        .map(|f| f.key)
        .chain(selectables.iter().map(|s| s.key));

    for key in keys {
        if !is_valid_key(key) {
            return Err(RepoError::InvalidKey(key.to_string()));
        }
        if RESERVED_KEYS.contains(&key) {
            return Err(RepoError::ReservedKey(key.to_string()));
        }
        if !seen.insert(key) {
            return Err(RepoError::DuplicateKey(key.to_string()));
        }
    }
    Ok(())
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleRecord;

    fn nothing(_: &ModuleRecord) -> Option<FilterValue> {
        None
    }

    #[test]
    fn duplicate_key_across_filter_and_selectable() {
        let filters = [FilterDescriptor::checkbox_set("manual", "Manual", nothing)];
        let err = validate_keys(&filters, SELECTABLES).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateKey(k) if k == "manual"));
    }

    #[test]
    fn duplicate_filter_keys() {
        let filters = [
            FilterDescriptor::checkbox_set("type", "Type", nothing),
            FilterDescriptor::checkbox_set("type", "Kind", nothing),
        ];
        let err = validate_keys(&filters, &[]).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateKey(k) if k == "type"));
    }

    #[test]
    fn reserved_keys_are_rejected() {
        for reserved in RESERVED_KEYS {
            let filters = [FilterDescriptor::checkbox_set(reserved, "X", nothing)];
            let err = validate_keys(&filters, &[]).unwrap_err();
            assert!(matches!(err, RepoError::ReservedKey(_)));
        }
    }

    #[test]
    fn keys_must_be_attribute_safe() {
        for bad in ["", "Type", "def diff", "a\"b"] {
            let filters = [FilterDescriptor::checkbox_set(bad, "X", nothing)];
            let err = validate_keys(&filters, &[]).unwrap_err();
            assert!(matches!(err, RepoError::InvalidKey(_)), "{bad:?} accepted");
        }
    }

    #[test]
    fn empty_descriptor_sets_are_valid() {
        validate_keys(&[], &[]).unwrap();
    }
}

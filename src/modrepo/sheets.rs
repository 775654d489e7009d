//! Manual sheet map.
//!
//! Built once per page from the catalog snapshot. A module's sheets are resolved with
//! the names of its "siblings": other modules whose name starts with this module's
//! name. Those siblings own the manual files that share the prefix, so the resolver
//! leaves them out.
//!
//! Prefix matching is a heuristic. Two unrelated modules where one name is a prefix of
//! the other (`Maze` and `Mazematics`) are treated as siblings all the same.

use crate::assets::{AssetResolver, ManualSheet};
use crate::error::Result;
use crate::model::ModuleRecord;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualSheetMap {
    sheets: HashMap<String, Vec<ManualSheet>>,
}

impl ManualSheetMap {
    pub fn build<A: AssetResolver + ?Sized>(modules: &[ModuleRecord], assets: &A) -> Result<Self> {
        let mut sheets = HashMap::with_capacity(modules.len());
        for module in modules {
            let siblings = sibling_names(modules, &module.name);
            let resolved = assets.manual_sheets(&module.name, &siblings)?;
            sheets.insert(module.name.clone(), resolved);
        }

        let map = Self { sheets };
        debug!(
            modules = modules.len(),
            with_manual = map.sheets.values().filter(|s| !s.is_empty()).count(),
            "built manual sheet map"
        );
        Ok(map)
    }

    /// Sheets of a module in resolution order; empty for unknown modules.
    pub fn sheets(&self, name: &str) -> &[ManualSheet] {
        self.sheets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The default manual link of a module.
    pub fn first(&self, name: &str) -> Option<&ManualSheet> {
        self.sheets(name).first()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Names of the other modules starting with `name`, in catalog order.
pub fn sibling_names<'a>(modules: &'a [ModuleRecord], name: &str) -> Vec<&'a str> {
    modules
        .iter()
        .map(|m| m.name.as_str())
        .filter(|other| *other != name && other.starts_with(name))
        .collect()
}

//! # API Facade
//!
//! The single entry point for everything a client can ask of a catalog: the rendered
//! page, the embedded client configuration, the catalog as JSON, a configuration
//! check and per-module sheet lookups.
//!
//! `RepoApi<A: AssetResolver>` is generic over where manuals and icons come from:
//! - Production: `RepoApi<DirAssets>`, opened from a config directory
//! - Testing: `RepoApi<StaticAssets>`
//!
//! Every call projects the current catalog from scratch. Nothing derived from the
//! catalog (checkbox values, the manual sheet map) outlives the call that built it.
//!
//! Like the rest of the core, the facade returns data and never writes to a terminal.

use crate::assets::fs::DirAssets;
use crate::assets::{AssetResolver, ManualSheet};
use crate::catalog;
use crate::config::RepoConfig;
use crate::descriptors::{FILTERS, SELECTABLES};
use crate::error::{RepoError, Result};
use crate::model::ModuleRecord;
use crate::page::{self, PageOptions};
use crate::projection::{ClientConfig, ProjectionEngine};
use crate::sheets::{sibling_names, ManualSheetMap};
use std::path::Path;

/// Summary of a successful configuration check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub modules: usize,
    pub filters: usize,
    pub selectables: usize,
    pub access_keys: usize,
    pub with_manual: usize,
    pub unrated: usize,
}

pub struct RepoApi<A: AssetResolver> {
    modules: Vec<ModuleRecord>,
    assets: A,
    options: PageOptions,
}

impl RepoApi<DirAssets> {
    /// Loads the catalog and opens the asset root named by `config`, both relative
    /// to `config_dir`.
    pub fn open(config_dir: &Path, config: &RepoConfig) -> Result<Self> {
        let modules = catalog::load(config.catalog_path(config_dir))?;
        let assets = DirAssets::open(config.assets_path(config_dir), &config.sheet_sources)?;
        Self::new(modules, assets, config.page_options())
    }
}

impl<A: AssetResolver> RepoApi<A> {
    pub fn new(modules: Vec<ModuleRecord>, assets: A, options: PageOptions) -> Result<Self> {
        catalog::ensure_unique_names(&modules)?;
        Ok(Self {
            modules,
            assets,
            options,
        })
    }

    pub fn modules(&self) -> &[ModuleRecord] {
        &self.modules
    }

    fn engine(&self) -> Result<ProjectionEngine<'_>> {
        let sheets = ManualSheetMap::build(&self.modules, &self.assets)?;
        ProjectionEngine::new(&self.modules, FILTERS, SELECTABLES, sheets)
    }

    pub fn render_page(&self) -> Result<String> {
        page::render_page(&self.modules, &self.assets, &self.options)
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(self.engine()?.client_config())
    }

    pub fn catalog_json(&self) -> Result<String> {
        catalog::to_json(&self.modules)
    }

    /// Builds every descriptor against the catalog and binds every access key on
    /// the page, without rendering.
    pub fn check(&self) -> Result<CheckReport> {
        let engine = self.engine()?;
        let keys = page::page_access_keys(&engine)?;
        engine.project()?;

        Ok(CheckReport {
            modules: self.modules.len(),
            filters: engine.filters().len(),
            selectables: engine.selectables().len(),
            access_keys: keys.len(),
            with_manual: self
                .modules
                .iter()
                .filter(|m| engine.sheets().first(&m.name).is_some())
                .count(),
            unrated: self
                .modules
                .iter()
                .filter(|m| m.defuser_difficulty.is_none() || m.expert_difficulty.is_none())
                .count(),
        })
    }

    /// Manual sheets of one module, resolved as the page resolves them.
    pub fn manual_sheets(&self, name: &str) -> Result<Vec<ManualSheet>> {
        if !self.modules.iter().any(|m| m.name == name) {
            return Err(RepoError::UnknownModule(name.to_string()));
        }
        let siblings = sibling_names(&self.modules, name);
        self.assets.manual_sheets(name, &siblings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::memory::fixtures::{sample_assets, sample_catalog};
    use crate::model::{ModuleType, Origin};

    fn api() -> RepoApi<crate::assets::memory::StaticAssets> {
        RepoApi::new(sample_catalog(), sample_assets(), PageOptions::default()).unwrap()
    }

    #[test]
    fn rejects_duplicate_modules() {
        let modules = vec![
            ModuleRecord::new("Wires", ModuleType::Regular, Origin::Vanilla),
            ModuleRecord::new("Wires", ModuleType::Needy, Origin::Mods),
        ];
        let result = RepoApi::new(modules, sample_assets(), PageOptions::default());
        assert!(matches!(result, Err(RepoError::DuplicateModule(n)) if n == "Wires"));
    }

    #[test]
    fn check_reports_catalog_shape() {
        let report = api().check().unwrap();
        assert_eq!(
            report,
            CheckReport {
                modules: 5,
                filters: 5,
                selectables: 4,
                access_keys: 15,
                with_manual: 3,
                unrated: 1,
            }
        );
    }

    #[test]
    fn client_config_matches_rendered_payload() {
        let api = api();
        let config = api.client_config().unwrap().to_json().unwrap();
        let html = api.render_page().unwrap();
        assert!(html.contains(&format!("window.ModRepo = {};", config)));
    }

    #[test]
    fn manual_sheets_for_known_module() {
        let sheets = api().manual_sheets("Wire Sequence").unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].url, "HTML/Wire%20Sequence.html");
    }

    #[test]
    fn manual_sheets_for_unknown_module() {
        let err = api().manual_sheets("Nope").unwrap_err();
        assert!(matches!(err, RepoError::UnknownModule(n) if n == "Nope"));
    }

    #[test]
    fn catalog_json_round_trips() {
        let api = api();
        let json = api.catalog_json().unwrap();
        assert_eq!(catalog::from_json(&json).unwrap(), api.modules());
    }
}

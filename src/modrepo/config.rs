use crate::assets::{default_sheet_sources, SheetSource};
use crate::error::{RepoError, Result};
use crate::page::{PageOptions, DEFAULT_TITLE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "modrepo.json";
const DEFAULT_CATALOG: &str = "catalog.json";
const DEFAULT_ASSETS_ROOT: &str = ".";

/// Configuration for modrepo, stored in modrepo.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoConfig {
    /// Catalog file, relative to the config directory
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// Directory holding manuals and icons, relative to the config directory
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,

    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Where manual sheets are looked up, in link preference order
    #[serde(default = "default_sheet_sources")]
    pub sheet_sources: Vec<SheetSource>,
}

fn default_catalog() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG)
}

fn default_assets_root() -> PathBuf {
    PathBuf::from(DEFAULT_ASSETS_ROOT)
}

fn default_page_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            assets_root: default_assets_root(),
            page_title: default_page_title(),
            sheet_sources: default_sheet_sources(),
        }
    }
}

impl RepoConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: RepoConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for source in &self.sheet_sources {
            if source.dir.is_empty() || source.extension.is_empty() {
                return Err(RepoError::Config(format!(
                    "sheet source needs a directory and an extension: {:?}",
                    source
                )));
            }
            if source.extension.starts_with('.') {
                return Err(RepoError::Config(format!(
                    "sheet source extension must not start with a dot: {}",
                    source.extension
                )));
            }
        }
        Ok(())
    }

    pub fn catalog_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.catalog)
    }

    pub fn assets_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.assets_root)
    }

    /// The "See JSON" link points at the catalog file, relative to the page.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            title: self.page_title.clone(),
            json_href: self.catalog.to_string_lossy().replace('\\', "/"),
        }
    }
}

/// Picks the directory the config is read from: an explicit directory, else the
/// first of `cwd` and the platform config directory that holds a config file,
/// else `cwd` (where defaults apply).
pub fn locate_config_dir(explicit: Option<&Path>, cwd: &Path, platform: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if cwd.join(CONFIG_FILENAME).exists() {
        return cwd.to_path_buf();
    }
    match platform {
        Some(dir) if dir.join(CONFIG_FILENAME).exists() => dir.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}

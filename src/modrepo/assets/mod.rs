//! # Asset Layer
//!
//! Manual sheets and module icons live outside the catalog file. The [`AssetResolver`]
//! trait keeps the page core independent of where they come from.
//!
//! ## Implementations
//!
//! - [`fs::DirAssets`]: scans an asset root on disk
//!   - Manual sheets are files in the configured sheet directories
//!   - Module icons are `Icons/<name>.png`, with a blank fallback
//!
//! - [`memory::StaticAssets`]: fixed in-memory maps for tests and embedders
//!
//! ## Storage Format
//!
//! For `DirAssets` with the default sheet sources:
//! ```text
//! <assets_root>/
//! ├── HTML/
//! │   ├── Wires.html
//! │   └── Wires (translated).html
//! ├── PDF/
//! │   └── Wires.pdf
//! └── Icons/
//!     ├── Wires.png
//!     └── blank.png
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// One manual page variant of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSheet {
    pub icon: String,
    pub url: String,
}

impl ManualSheet {
    pub fn new(icon: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            url: url.into(),
        }
    }
}

/// A directory of manual files of one format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSource {
    /// Directory relative to the asset root; also the URL prefix.
    pub dir: String,
    /// File extension without the dot.
    pub extension: String,
    /// Icon shown for sheets from this source.
    pub icon: String,
}

impl SheetSource {
    pub fn new(dir: &str, extension: &str, icon: &str) -> Self {
        Self {
            dir: dir.to_string(),
            extension: extension.to_string(),
            icon: icon.to_string(),
        }
    }
}

pub fn default_sheet_sources() -> Vec<SheetSource> {
    vec![
        SheetSource::new("HTML", "html", "HTML/img/html-manual.png"),
        SheetSource::new("PDF", "pdf", "HTML/img/pdf-manual.png"),
    ]
}

/// Resolves the assets a module's row links to.
pub trait AssetResolver {
    /// Manual sheets for `name`, skipping sheets that belong to any of the `excluded`
    /// modules (longer names that share `name` as a prefix).
    fn manual_sheets(&self, name: &str, excluded: &[&str]) -> Result<Vec<ManualSheet>>;

    /// URL of the module's display icon.
    fn module_icon(&self, name: &str) -> String;
}

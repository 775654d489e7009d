use super::{AssetResolver, ManualSheet};
use crate::error::Result;
use std::collections::HashMap;

/// In-memory assets for testing and embedding.
///
/// Sheets are returned exactly as registered; the excluded sibling names are not
/// consulted, since registration already says which module a sheet belongs to.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    sheets: HashMap<String, Vec<ManualSheet>>,
    icons: HashMap<String, String>,
    default_icon: String,
}

impl Default for StaticAssets {
    fn default() -> Self {
        Self {
            sheets: HashMap::new(),
            icons: HashMap::new(),
            default_icon: "Icons/blank.png".to_string(),
        }
    }
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheets(mut self, name: &str, sheets: Vec<ManualSheet>) -> Self {
        self.sheets.insert(name.to_string(), sheets);
        self
    }

    pub fn with_icon(mut self, name: &str, icon: &str) -> Self {
        self.icons.insert(name.to_string(), icon.to_string());
        self
    }
}

impl AssetResolver for StaticAssets {
    fn manual_sheets(&self, name: &str, _excluded: &[&str]) -> Result<Vec<ManualSheet>> {
        Ok(self.sheets.get(name).cloned().unwrap_or_default())
    }

    fn module_icon(&self, name: &str) -> String {
        self.icons
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.default_icon.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Difficulty, ModuleRecord, ModuleType, Origin};

    /// A small catalog covering every filter and selectable state.
    pub fn sample_catalog() -> Vec<ModuleRecord> {
        vec![
            ModuleRecord::new("Wires", ModuleType::Regular, Origin::Vanilla)
                .with_author("Steel Crate Games")
                .with_difficulty(Difficulty::VeryEasy, Difficulty::VeryEasy)
                .with_twitch_plays(),
            ModuleRecord::new("Wire Sequence", ModuleType::Regular, Origin::Vanilla)
                .with_author("Steel Crate Games")
                .with_difficulty(Difficulty::Easy, Difficulty::Medium),
            ModuleRecord::new("Knob", ModuleType::Needy, Origin::Vanilla)
                .with_author("Steel Crate Games")
                .with_difficulty(Difficulty::Easy, Difficulty::Easy),
            ModuleRecord::new("Two Bits", ModuleType::Regular, Origin::Mods)
                .with_author("Timwi")
                .with_difficulty(Difficulty::Medium, Difficulty::Hard)
                .with_steam_id("734370")
                .with_source_url("https://github.com/Timwi/KtaneTwoBits")
                .with_tutorial_video("https://youtu.be/two-bits")
                .with_twitch_plays(),
            // Not rated yet
            ModuleRecord::new("Cheap Checkout", ModuleType::Regular, Origin::Mods)
                .with_author("Timwi")
                .with_steam_id("809020"),
        ]
    }

    pub fn sample_assets() -> StaticAssets {
        StaticAssets::new()
            .with_sheets(
                "Wires",
                vec![ManualSheet::new("HTML/img/html-manual.png", "HTML/Wires.html")],
            )
            .with_sheets(
                "Wire Sequence",
                vec![
                    ManualSheet::new("HTML/img/html-manual.png", "HTML/Wire%20Sequence.html"),
                    ManualSheet::new("HTML/img/pdf-manual.png", "PDF/Wire%20Sequence.pdf"),
                ],
            )
            .with_sheets(
                "Two Bits",
                vec![ManualSheet::new("HTML/img/html-manual.png", "HTML/Two%20Bits.html")],
            )
            .with_icon("Wires", "Icons/Wires.png")
    }
}

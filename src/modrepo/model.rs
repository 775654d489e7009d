use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleType {
    Regular,
    Needy,
}

impl ModuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Regular => "Regular",
            ModuleType::Needy => "Needy",
        }
    }

    /// Access key of the type's checkbox in the filter header.
    pub fn access_key(self) -> char {
        match self {
            ModuleType::Regular => 'r',
            ModuleType::Needy => 'y',
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    Vanilla,
    Mods,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Vanilla => "Vanilla",
            Origin::Mods => "Mods",
        }
    }

    pub fn access_key(self) -> char {
        match self {
            Origin::Vanilla => 'v',
            Origin::Mods => 'o',
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Five-step difficulty rating. The ordinal (1..=5) is what the slider filters carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    VeryEasy,
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const ALL: [Difficulty; 5] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            Difficulty::VeryEasy => 1,
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::VeryHard => 5,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.ordinal() == ordinal)
    }

    pub fn readable(self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "very easy",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very hard",
        }
    }
}

/// One catalog entry, as supplied by the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleRecord {
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "Type")]
    pub module_type: ModuleType,
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defuser_difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_difficulty: Option<Difficulty>,
    #[serde(default)]
    pub twitch_plays_support: bool,
    #[serde(rename = "SteamID", default, skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial_video_url: Option<String>,
    // Overrides the key derived from the name
    #[serde(rename = "SortKey", default, skip_serializing_if = "Option::is_none")]
    pub sort_key_override: Option<String>,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>, module_type: ModuleType, origin: Origin) -> Self {
        Self {
            name: name.into(),
            author: String::new(),
            module_type,
            origin,
            defuser_difficulty: None,
            expert_difficulty: None,
            twitch_plays_support: false,
            steam_id: None,
            source_url: None,
            tutorial_video_url: None,
            sort_key_override: None,
        }
    }

    /// Case-insensitive collation key used for the default (by name) ordering.
    pub fn sort_key(&self) -> String {
        if let Some(key) = &self.sort_key_override {
            return key.clone();
        }
        derive_sort_key(&self.name)
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_difficulty(mut self, defuser: Difficulty, expert: Difficulty) -> Self {
        self.defuser_difficulty = Some(defuser);
        self.expert_difficulty = Some(expert);
        self
    }

    pub fn with_twitch_plays(mut self) -> Self {
        self.twitch_plays_support = true;
        self
    }

    pub fn with_steam_id(mut self, id: impl Into<String>) -> Self {
        self.steam_id = Some(id.into());
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn with_tutorial_video(mut self, url: impl Into<String>) -> Self {
        self.tutorial_video_url = Some(url.into());
        self
    }
}

fn derive_sort_key(name: &str) -> String {
    let upper = name.to_uppercase();
    let trimmed = upper.strip_prefix("THE ").unwrap_or(&upper);
    trimmed.chars().filter(|c| c.is_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_ignores_case_and_punctuation() {
        let m = ModuleRecord::new("Who's on First", ModuleType::Regular, Origin::Vanilla);
        assert_eq!(m.sort_key(), "WHOSONFIRST");
    }

    #[test]
    fn sort_key_drops_leading_article() {
        let m = ModuleRecord::new("The Gamepad", ModuleType::Regular, Origin::Mods);
        assert_eq!(m.sort_key(), "GAMEPAD");

        let m = ModuleRecord::new("Theremin", ModuleType::Regular, Origin::Mods);
        assert_eq!(m.sort_key(), "THEREMIN");
    }

    #[test]
    fn sort_key_override_wins() {
        let mut m = ModuleRecord::new("3D Maze", ModuleType::Regular, Origin::Mods);
        m.sort_key_override = Some("THREEDMAZE".into());
        assert_eq!(m.sort_key(), "THREEDMAZE");
    }

    #[test]
    fn difficulty_ordinals_cover_slider_range() {
        let ordinals: Vec<u8> = Difficulty::ALL.iter().map(|d| d.ordinal()).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
        assert_eq!(Difficulty::from_ordinal(Difficulty::MIN), Some(Difficulty::VeryEasy));
        assert_eq!(Difficulty::from_ordinal(Difficulty::MAX), Some(Difficulty::VeryHard));
        assert_eq!(Difficulty::from_ordinal(0), None);
    }

    #[test]
    fn deserializes_catalog_entry() {
        let json = r#"{
            "Name": "Wires",
            "Author": "Steel Crate Games",
            "Type": "Regular",
            "Origin": "Vanilla",
            "DefuserDifficulty": "VeryEasy",
            "ExpertDifficulty": "Easy",
            "TwitchPlaysSupport": true,
            "SteamID": "123"
        }"#;
        let m: ModuleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(m.name, "Wires");
        assert_eq!(m.module_type, ModuleType::Regular);
        assert_eq!(m.defuser_difficulty, Some(Difficulty::VeryEasy));
        assert_eq!(m.expert_difficulty, Some(Difficulty::Easy));
        assert!(m.twitch_plays_support);
        assert_eq!(m.steam_id.as_deref(), Some("123"));
        assert_eq!(m.source_url, None);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"Name": "X", "Type": "Needy", "Origin": "Mods"}"#;
        let m: ModuleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(m.author, "");
        assert!(!m.twitch_plays_support);
        assert_eq!(m.defuser_difficulty, None);
    }
}

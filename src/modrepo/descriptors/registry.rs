//! The catalog page's descriptors.
//!
//! This is the single source of truth for what the page filters on, where module
//! names can link to, and which shortcuts the page binds. Adding a filter axis or a
//! link target means adding an entry here.
//!
//! Access keys in use:
//!
//! | Key | Control |
//! |-----|---------|
//! | `d` | sort by defuser difficulty |
//! | `e` | sort by expert difficulty |
//! | `i` | include missing |
//! | `j` | see JSON |
//! | `m` | manual |
//! | `n` | sort by name |
//! | `o` | origin: Mods |
//! | `p` | Twitch Plays only |
//! | `r` | type: Regular |
//! | `t` | tutorial video |
//! | `u` | source code |
//! | `v` | origin: Vanilla |
//! | `w` | Steam Workshop |
//! | `y` | type: Needy |
//! | `.` | more |

use super::filter::{FilterDescriptor, FilterValue};
use super::selectable::{
    ManualLink, SelectableDescriptor, SourceCodeLink, SteamWorkshopLink, TutorialVideoLink,
};
use crate::model::{Difficulty, ModuleRecord};

fn project_type(m: &ModuleRecord) -> Option<FilterValue> {
    let t = m.module_type;
    Some(FilterValue::choice(t.as_str(), Some(t.access_key())))
}

fn project_origin(m: &ModuleRecord) -> Option<FilterValue> {
    let o = m.origin;
    Some(FilterValue::choice(o.as_str(), Some(o.access_key())))
}

fn project_defuser_difficulty(m: &ModuleRecord) -> Option<FilterValue> {
    m.defuser_difficulty.map(|d| FilterValue::Ordinal(d.ordinal()))
}

fn project_expert_difficulty(m: &ModuleRecord) -> Option<FilterValue> {
    m.expert_difficulty.map(|d| FilterValue::Ordinal(d.ordinal()))
}

fn project_twitch_plays(m: &ModuleRecord) -> Option<FilterValue> {
    Some(FilterValue::Flag(m.twitch_plays_support))
}

fn difficulty_label(ordinal: u8) -> &'static str {
    Difficulty::from_ordinal(ordinal)
        .map(Difficulty::readable)
        .unwrap_or("")
}

/// Filter axes, in header order: categorical filters first, then ratings and flags.
pub const FILTERS: &[FilterDescriptor] = &[
    FilterDescriptor::checkbox_set("type", "Type", project_type),
    FilterDescriptor::checkbox_set("origin", "Origin", project_origin),
    FilterDescriptor::slider(
        "defdiff",
        "Defuser difficulty",
        project_defuser_difficulty,
        Difficulty::MIN,
        Difficulty::MAX,
        difficulty_label,
    ),
    FilterDescriptor::slider(
        "expdiff",
        "Expert difficulty",
        project_expert_difficulty,
        Difficulty::MIN,
        Difficulty::MAX,
        difficulty_label,
    ),
    FilterDescriptor::boolean("twitchplays", "Twitch Plays only", project_twitch_plays, 'P'),
];

/// Link targets, in icon column order.
pub const SELECTABLES: &[SelectableDescriptor] = &[
    SelectableDescriptor::new("manual", "Manual", 'M', &ManualLink).css_class("manual"),
    SelectableDescriptor::new("steam", "Steam Workshop", 'W', &SteamWorkshopLink),
    SelectableDescriptor::new("source", "Source code", 'u', &SourceCodeLink),
    SelectableDescriptor::new("video", "Tutorial video", 'T', &TutorialVideoLink),
];

/// A sort order the client can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    /// Value of the sort radio; the client's sort identifier.
    pub value: &'static str,
    pub label: &'static str,
    pub access_key: char,
}

pub const SORT_OPTIONS: &[SortOption] = &[
    SortOption {
        value: "name",
        label: "Sort by name",
        access_key: 'n',
    },
    SortOption {
        value: "defuser-difficulty",
        label: "Sort by defuser difficulty",
        access_key: 'd',
    },
    SortOption {
        value: "expert-difficulty",
        label: "Sort by expert difficulty",
        access_key: 'e',
    },
];

/// Page controls outside the filter and link groups that bind an access key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub id: &'static str,
    pub label: &'static str,
    pub access_key: char,
}

pub const INCLUDE_MISSING: PageControl = PageControl {
    id: "filter-include-missing",
    label: "Include missing",
    access_key: 'i',
};

pub const SEE_JSON: PageControl = PageControl {
    id: "json-link",
    label: "See JSON",
    access_key: 'j',
};

pub const MORE: PageControl = PageControl {
    id: "more-link",
    label: "More",
    access_key: '.',
};

pub const PAGE_CONTROLS: &[PageControl] = &[INCLUDE_MISSING, SEE_JSON, MORE];

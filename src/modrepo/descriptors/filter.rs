//! Filter descriptors.
//!
//! A [`FilterDescriptor`] is static: key, label, kind and projection. Checkbox-set
//! filters only know their values once they have seen the catalog, so the projection
//! engine works with [`ConfiguredFilter`]s, produced by [`FilterDescriptor::configure`].
//!
//! The row attribute written by [`ConfiguredFilter::attribute`] and the serialized
//! form from [`ConfiguredFilter::serialize`] are the two halves of the client contract
//! and share one encoding: [`FilterValue::attribute`].

use crate::model::ModuleRecord;
use serde::Serialize;

/// A projected, filterable value of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// One categorical value, optionally bound to an access key for its checkbox.
    Choice {
        value: String,
        access_key: Option<char>,
    },
    /// A position on a slider.
    Ordinal(u8),
    Flag(bool),
}

impl FilterValue {
    pub fn choice(value: impl Into<String>, access_key: Option<char>) -> Self {
        FilterValue::Choice {
            value: value.into(),
            access_key,
        }
    }

    /// Row attribute encoding of the value.
    pub fn attribute(&self) -> String {
        match self {
            FilterValue::Choice { value, .. } => value.clone(),
            FilterValue::Ordinal(n) => n.to_string(),
            FilterValue::Flag(b) => b.to_string(),
        }
    }
}

/// Maps a module to its value on a filter axis; `None` is the missing-data state.
pub type Projection = fn(&ModuleRecord) -> Option<FilterValue>;

/// Label of a slider position.
pub type SliderLabel = fn(u8) -> &'static str;

#[derive(Debug, Clone, Copy)]
pub enum FilterKind {
    /// One checkbox per distinct value present in the catalog.
    CheckboxSet,

    /// Ordinal range `min..=max`, with a readable label per position.
    Slider { min: u8, max: u8, label: SliderLabel },

    /// Single checkbox; when checked only modules projecting `true` stay visible.
    Boolean { access_key: Option<char> },
}

impl FilterKind {
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::CheckboxSet => "checkbox-set",
            FilterKind::Slider { .. } => "slider",
            FilterKind::Boolean { .. } => "boolean",
        }
    }
}

/// Static description of one filter axis.
#[derive(Debug, Clone, Copy)]
pub struct FilterDescriptor {
    /// Data attribute name on each row (`data-<key>`) and key in the client config.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
    pub project: Projection,
}

impl FilterDescriptor {
    pub const fn checkbox_set(key: &'static str, label: &'static str, project: Projection) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::CheckboxSet,
            project,
        }
    }

    pub const fn slider(
        key: &'static str,
        label: &'static str,
        project: Projection,
        min: u8,
        max: u8,
        labels: SliderLabel,
    ) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Slider {
                min,
                max,
                label: labels,
            },
            project,
        }
    }

    pub const fn boolean(
        key: &'static str,
        label: &'static str,
        project: Projection,
        access_key: char,
    ) -> Self {
        Self {
            key,
            label,
            kind: FilterKind::Boolean {
                access_key: Some(access_key),
            },
            project,
        }
    }

    /// Binds the descriptor to a catalog, enumerating checkbox values in first-seen order.
    pub fn configure(&self, modules: &[ModuleRecord]) -> ConfiguredFilter {
        let choices = match self.kind {
            FilterKind::CheckboxSet => distinct_choices(modules, self.project),
            _ => Vec::new(),
        };
        ConfiguredFilter {
            descriptor: *self,
            choices,
        }
    }
}

/// One checkbox of a checkbox-set filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub access_key: Option<char>,
}

fn distinct_choices(modules: &[ModuleRecord], project: Projection) -> Vec<Choice> {
    let mut choices: Vec<Choice> = Vec::new();
    for module in modules {
        let Some(value) = project(module) else {
            continue;
        };
        let (value, access_key) = match value {
            FilterValue::Choice { value, access_key } => (value, access_key),
            other => (other.attribute(), None),
        };
        if !choices.iter().any(|c| c.value == value) {
            choices.push(Choice { value, access_key });
        }
    }
    choices
}

/// A filter bound to the catalog it was configured from.
#[derive(Debug, Clone)]
pub struct ConfiguredFilter {
    pub descriptor: FilterDescriptor,
    /// Enumerated values; empty for non-checkbox kinds.
    pub choices: Vec<Choice>,
}

impl ConfiguredFilter {
    pub fn key(&self) -> &'static str {
        self.descriptor.key
    }

    pub fn label(&self) -> &'static str {
        self.descriptor.label
    }

    pub fn kind(&self) -> FilterKind {
        self.descriptor.kind
    }

    /// The row attribute value, or `None` when the module has no value on this axis.
    pub fn attribute(&self, module: &ModuleRecord) -> Option<String> {
        (self.descriptor.project)(module).map(|v| v.attribute())
    }

    pub fn serialize(&self) -> SerializedFilter {
        let shape = match self.descriptor.kind {
            FilterKind::CheckboxSet => FilterShape::CheckboxSet {
                values: self.choices.iter().map(|c| c.value.clone()).collect(),
            },
            FilterKind::Slider { min, max, label } => FilterShape::Slider {
                min,
                max,
                labels: (min..=max).map(|n| label(n).to_string()).collect(),
            },
            FilterKind::Boolean { access_key } => FilterShape::Boolean {
                access_key: access_key.map(|c| c.to_ascii_lowercase().to_string()),
            },
        };
        SerializedFilter {
            key: self.descriptor.key.to_string(),
            label: self.descriptor.label.to_string(),
            shape,
        }
    }
}

/// A filter as the client engine receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedFilter {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub shape: FilterShape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterShape {
    CheckboxSet {
        values: Vec<String>,
    },
    Slider {
        min: u8,
        max: u8,
        labels: Vec<String>,
    },
    Boolean {
        #[serde(rename = "accessKey")]
        access_key: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, ModuleType, Origin};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn project_origin(m: &ModuleRecord) -> Option<FilterValue> {
        Some(FilterValue::choice(m.origin.as_str(), Some(m.origin.access_key())))
    }

    fn project_defuser(m: &ModuleRecord) -> Option<FilterValue> {
        m.defuser_difficulty.map(|d| FilterValue::Ordinal(d.ordinal()))
    }

    fn difficulty_label(n: u8) -> &'static str {
        Difficulty::from_ordinal(n).map(Difficulty::readable).unwrap_or("")
    }

    fn project_twitch(m: &ModuleRecord) -> Option<FilterValue> {
        Some(FilterValue::Flag(m.twitch_plays_support))
    }

    fn modules() -> Vec<ModuleRecord> {
        vec![
            ModuleRecord::new("A", ModuleType::Regular, Origin::Mods)
                .with_difficulty(Difficulty::Hard, Difficulty::Easy),
            ModuleRecord::new("B", ModuleType::Regular, Origin::Vanilla),
            ModuleRecord::new("C", ModuleType::Needy, Origin::Mods).with_twitch_plays(),
        ]
    }

    #[test]
    fn checkbox_values_are_distinct_in_first_seen_order() {
        let filter = FilterDescriptor::checkbox_set("origin", "Origin", project_origin)
            .configure(&modules());
        let values: Vec<_> = filter.choices.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["Mods", "Vanilla"]);
        assert_eq!(filter.choices[0].access_key, Some('o'));
    }

    #[test]
    fn checkbox_values_only_cover_present_values() {
        let only_mods = vec![ModuleRecord::new("A", ModuleType::Regular, Origin::Mods)];
        let filter = FilterDescriptor::checkbox_set("origin", "Origin", project_origin)
            .configure(&only_mods);
        assert_eq!(filter.choices.len(), 1);
    }

    #[test]
    fn empty_catalog_enumerates_nothing() {
        let filter =
            FilterDescriptor::checkbox_set("origin", "Origin", project_origin).configure(&[]);
        assert!(filter.choices.is_empty());
        assert_eq!(
            serde_json::to_value(filter.serialize()).unwrap(),
            json!({ "key": "origin", "label": "Origin", "kind": "checkbox-set", "values": [] })
        );
    }

    #[test]
    fn serializes_checkbox_set() {
        let filter = FilterDescriptor::checkbox_set("origin", "Origin", project_origin)
            .configure(&modules());
        assert_eq!(
            serde_json::to_value(filter.serialize()).unwrap(),
            json!({
                "key": "origin",
                "label": "Origin",
                "kind": "checkbox-set",
                "values": ["Mods", "Vanilla"]
            })
        );
    }

    #[test]
    fn serializes_slider_with_label_per_position() {
        let filter = FilterDescriptor::slider(
            "defdiff",
            "Defuser difficulty",
            project_defuser,
            1,
            5,
            difficulty_label,
        )
        .configure(&modules());
        assert_eq!(
            serde_json::to_value(filter.serialize()).unwrap(),
            json!({
                "key": "defdiff",
                "label": "Defuser difficulty",
                "kind": "slider",
                "min": 1,
                "max": 5,
                "labels": ["very easy", "easy", "medium", "hard", "very hard"]
            })
        );
        assert!(filter.choices.is_empty());
    }

    #[test]
    fn serializes_boolean_with_lowercase_access_key() {
        let filter =
            FilterDescriptor::boolean("twitchplays", "Twitch Plays only", project_twitch, 'P')
                .configure(&modules());
        assert_eq!(
            serde_json::to_value(filter.serialize()).unwrap(),
            json!({
                "key": "twitchplays",
                "label": "Twitch Plays only",
                "kind": "boolean",
                "accessKey": "p"
            })
        );
    }

    #[test]
    fn attribute_encodings_match_serialized_form() {
        let ms = modules();
        let slider = FilterDescriptor::slider("defdiff", "D", project_defuser, 1, 5, difficulty_label)
            .configure(&ms);
        assert_eq!(slider.attribute(&ms[0]).as_deref(), Some("4"));

        let flag = FilterDescriptor::boolean("tp", "T", project_twitch, 'p').configure(&ms);
        assert_eq!(flag.attribute(&ms[2]).as_deref(), Some("true"));
        assert_eq!(flag.attribute(&ms[0]).as_deref(), Some("false"));
    }

    #[test]
    fn missing_projection_has_no_attribute() {
        let ms = modules();
        let slider = FilterDescriptor::slider("defdiff", "D", project_defuser, 1, 5, difficulty_label)
            .configure(&ms);
        assert_eq!(slider.attribute(&ms[1]), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(FilterKind::CheckboxSet.name(), "checkbox-set");
        assert_eq!(FilterKind::Boolean { access_key: None }.name(), "boolean");
    }
}

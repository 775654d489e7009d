//! # Projection Engine
//!
//! Projects the catalog through the descriptors into the two artifacts the client
//! engine consumes:
//!
//! - a [`RowAttributes`] map per module, written as `data-*` attributes on its row
//! - one [`ClientConfig`], embedded once per page, telling the client how to read them
//!
//! Both come from the same [`ConfiguredFilter`]s and [`SelectableDescriptor`]s, so the
//! set of filter keys in the config is exactly the set of filter attributes a row
//! can carry.
//!
//! Everything here is pure over the catalog snapshot and the [`ManualSheetMap`]: the
//! same inputs give byte-identical output, and nothing is cached between pages.

use crate::descriptors::{
    validate_keys, AccessKeyRegistry, ConfiguredFilter, FilterDescriptor, FilterKind, Link,
    ResolveContext, SelectableDescriptor, SerializedFilter,
};
use crate::error::Result;
use crate::model::ModuleRecord;
use crate::sheets::ManualSheetMap;
use serde::Serialize;
use tracing::debug;

pub const MOD_ATTRIBUTE: &str = "mod";
pub const SORTKEY_ATTRIBUTE: &str = "sortkey";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataAttribute {
    pub name: String,
    pub value: String,
}

/// Data attributes of one row, in emission order: `mod`, `sortkey`, filters, selectables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RowAttributes(Vec<DataAttribute>);

impl RowAttributes {
    fn push(&mut self, name: &str, value: String) {
        self.0.push(DataAttribute {
            name: name.to_string(),
            value,
        });
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataAttribute> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The configuration object embedded in the page for the client engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    pub filters: Vec<SerializedFilter>,
    /// Selectable keys in icon column order.
    pub selectables: Vec<String>,
}

impl ClientConfig {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One module projected for rendering.
#[derive(Debug, Clone)]
pub struct ProjectedRow<'a> {
    pub module: &'a ModuleRecord,
    pub attributes: RowAttributes,
    /// One entry per selectable, in selectable order; `None` where the link is hidden.
    pub links: Vec<Option<Link>>,
}

/// The full projection of a catalog.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    pub rows: Vec<ProjectedRow<'a>>,
    pub config: ClientConfig,
}

pub struct ProjectionEngine<'a> {
    modules: &'a [ModuleRecord],
    filters: Vec<ConfiguredFilter>,
    selectables: &'a [SelectableDescriptor],
    sheets: ManualSheetMap,
}

impl<'a> ProjectionEngine<'a> {
    /// Configures the filters against the catalog and validates every descriptor key
    /// and access key.
    pub fn new(
        modules: &'a [ModuleRecord],
        filters: &[FilterDescriptor],
        selectables: &'a [SelectableDescriptor],
        sheets: ManualSheetMap,
    ) -> Result<Self> {
        validate_keys(filters, selectables)?;

        let engine = Self {
            modules,
            filters: filters.iter().map(|f| f.configure(modules)).collect(),
            selectables,
            sheets,
        };
        engine.access_keys()?;

        debug!(
            modules = modules.len(),
            filters = engine.filters.len(),
            selectables = selectables.len(),
            "configured projection engine"
        );
        Ok(engine)
    }

    pub fn filters(&self) -> &[ConfiguredFilter] {
        &self.filters
    }

    pub fn selectables(&self) -> &[SelectableDescriptor] {
        self.selectables
    }

    pub fn sheets(&self) -> &ManualSheetMap {
        &self.sheets
    }

    pub fn modules(&self) -> &'a [ModuleRecord] {
        self.modules
    }

    /// Access keys bound by the descriptors: selectables, boolean filters and
    /// checkbox values.
    pub fn access_keys(&self) -> Result<AccessKeyRegistry> {
        let mut registry = AccessKeyRegistry::new();
        for selectable in self.selectables {
            registry.bind(
                selectable.access_key,
                format!("selectable '{}'", selectable.key),
            )?;
        }
        for filter in &self.filters {
            if let FilterKind::Boolean {
                access_key: Some(key),
            } = filter.kind()
            {
                registry.bind(key, format!("filter '{}'", filter.key()))?;
            }
            for choice in &filter.choices {
                if let Some(key) = choice.access_key {
                    registry.bind(
                        key,
                        format!("filter '{}' value '{}'", filter.key(), choice.value),
                    )?;
                }
            }
        }
        Ok(registry)
    }

    fn context(&self) -> ResolveContext<'_> {
        ResolveContext {
            sheets: &self.sheets,
        }
    }

    pub fn row_attributes(&self, module: &ModuleRecord) -> Result<RowAttributes> {
        let ctx = self.context();
        let mut attributes = RowAttributes::default();
        attributes.push(MOD_ATTRIBUTE, module.name.clone());
        attributes.push(SORTKEY_ATTRIBUTE, module.sort_key());

        for filter in &self.filters {
            if let Some(value) = filter.attribute(module) {
                attributes.push(filter.key(), value);
            }
        }
        for selectable in self.selectables {
            if let Some(value) = selectable.data_value(module, &ctx)? {
                attributes.push(selectable.key, value);
            }
        }
        Ok(attributes)
    }

    pub fn links(&self, module: &ModuleRecord) -> Result<Vec<Option<Link>>> {
        let ctx = self.context();
        self.selectables
            .iter()
            .map(|s| s.link(module, &ctx))
            .collect()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            filters: self.filters.iter().map(ConfiguredFilter::serialize).collect(),
            selectables: self.selectables.iter().map(|s| s.key.to_string()).collect(),
        }
    }

    pub fn project(&self) -> Result<Projection<'a>> {
        let rows = self
            .modules
            .iter()
            .map(|module| {
                Ok(ProjectedRow {
                    module,
                    attributes: self.row_attributes(module)?,
                    links: self.links(module)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Projection {
            rows,
            config: self.client_config(),
        })
    }
}

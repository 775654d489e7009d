//! # Page Assembly
//!
//! Turns a [`ProjectionEngine`] into the catalog page. Assembly runs in two steps:
//!
//! 1. [`build_view`] collects everything the templates need into a [`PageView`]:
//!    header controls, filter columns, one [`RowView`] per module and the client
//!    configuration. All access keys on the page are checked here.
//! 2. [`PageAssembler::render`] feeds the view through the page templates.
//!
//! The view is plain data. Templates never call back into descriptors, so what a
//! row shows and what its `data-*` attributes say always come from the same
//! projection.

pub mod templates;

use crate::assets::AssetResolver;
use crate::descriptors::{
    normalize_access_key, AccessKeyRegistry, ConfiguredFilter, FilterKind, Link, PageControl,
    SelectableDescriptor, SortOption, FILTERS, INCLUDE_MISSING, MORE, PAGE_CONTROLS, SEE_JSON,
    SELECTABLES, SORT_OPTIONS,
};
use crate::error::Result;
use crate::model::{Difficulty, ModuleRecord};
use crate::projection::{ClientConfig, ProjectedRow, ProjectionEngine, RowAttributes};
use crate::sheets::ManualSheetMap;
use pagekit::Renderer;
use serde::Serialize;
use tracing::{debug, info};

pub const DEFAULT_TITLE: &str = "Repository of Manual Pages";

/// Shown for a missing rating when the two ratings differ.
pub const UNRATED_LABEL: &str = "unrated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    /// Target of the "See JSON" link.
    pub json_href: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            json_href: "catalog.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlView {
    pub id: String,
    pub label: String,
    pub access_key: String,
}

impl From<&PageControl> for ControlView {
    fn from(control: &PageControl) -> Self {
        Self {
            id: control.id.to_string(),
            label: control.label.to_string(),
            access_key: normalize_access_key(control.access_key).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SortView {
    pub id: String,
    pub value: String,
    pub label: String,
    pub access_key: String,
}

impl From<&SortOption> for SortView {
    fn from(option: &SortOption) -> Self {
        Self {
            id: format!("sort-{}", option.value),
            value: option.value.to_string(),
            label: option.label.to_string(),
            access_key: normalize_access_key(option.access_key).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectableView {
    pub key: String,
    pub label: String,
    pub access_key: String,
}

impl From<&SelectableDescriptor> for SelectableView {
    fn from(selectable: &SelectableDescriptor) -> Self {
        Self {
            key: selectable.key.to_string(),
            label: selectable.label.to_string(),
            access_key: normalize_access_key(selectable.access_key).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub id: String,
    pub value: String,
    pub access_key: Option<String>,
}

/// One filter control in the header. Fields not used by `kind` are left empty.
#[derive(Debug, Clone, Serialize)]
pub struct FilterView {
    pub key: String,
    pub label: String,
    pub kind: &'static str,
    pub choices: Vec<ChoiceView>,
    pub min: u8,
    pub max: u8,
    pub labels: Vec<String>,
    pub access_key: Option<String>,
}

impl From<&ConfiguredFilter> for FilterView {
    fn from(filter: &ConfiguredFilter) -> Self {
        let mut view = FilterView {
            key: filter.key().to_string(),
            label: filter.label().to_string(),
            kind: filter.kind().name(),
            choices: Vec::new(),
            min: 0,
            max: 0,
            labels: Vec::new(),
            access_key: None,
        };
        match filter.kind() {
            FilterKind::CheckboxSet => {
                view.choices = filter
                    .choices
                    .iter()
                    .map(|c| ChoiceView {
                        id: format!("filter-{}-{}", filter.key(), c.value.to_lowercase()),
                        value: c.value.clone(),
                        access_key: c.access_key.map(|k| normalize_access_key(k).to_string()),
                    })
                    .collect();
            }
            FilterKind::Slider { min, max, label } => {
                view.min = min;
                view.max = max;
                view.labels = (min..=max).map(|n| label(n).to_string()).collect();
            }
            FilterKind::Boolean { access_key } => {
                view.access_key = access_key.map(|k| normalize_access_key(k).to_string());
            }
        }
        view
    }
}

/// Header columns of filter controls: checkbox sets first, then sliders and booleans.
/// Empty columns are dropped.
pub fn filter_columns(filters: &[ConfiguredFilter]) -> Vec<Vec<FilterView>> {
    let (checkboxes, others): (Vec<_>, Vec<_>) = filters
        .iter()
        .partition(|f| matches!(f.kind(), FilterKind::CheckboxSet));

    [checkboxes, others]
        .into_iter()
        .filter(|column| !column.is_empty())
        .map(|column| column.into_iter().map(FilterView::from).collect())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyPart {
    pub label: &'static str,
    /// `d` or `e` when the two ratings differ.
    pub suffix: Option<&'static str>,
}

pub fn difficulty_parts(
    defuser: Option<Difficulty>,
    expert: Option<Difficulty>,
) -> Vec<DifficultyPart> {
    fn label(d: Option<Difficulty>) -> &'static str {
        d.map(Difficulty::readable).unwrap_or(UNRATED_LABEL)
    }

    match (defuser, expert) {
        (None, None) => Vec::new(),
        (d, e) if d == e => vec![DifficultyPart {
            label: label(d),
            suffix: None,
        }],
        (d, e) => vec![
            DifficultyPart {
                label: label(d),
                suffix: Some("d"),
            },
            DifficultyPart {
                label: label(e),
                suffix: Some("e"),
            },
        ],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    /// Full class attribute of the cell.
    pub class: String,
    pub css_class: Option<String>,
    pub label: String,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub attributes: RowAttributes,
    pub cells: Vec<CellView>,
    pub name: String,
    pub icon: String,
    pub author: String,
    pub module_type: String,
    pub difficulty: Vec<DifficultyPart>,
}

fn link_cells(selectables: &[SelectableDescriptor], links: Vec<Option<Link>>) -> Vec<CellView> {
    let last = selectables.len().saturating_sub(1);
    selectables
        .iter()
        .zip(links)
        .enumerate()
        .map(|(ix, (selectable, link))| {
            let mut class = String::from("selectable");
            if ix == last {
                class.push_str(" last");
            }
            if let Some(css) = selectable.css_class {
                class.push(' ');
                class.push_str(css);
            }
            CellView {
                class,
                css_class: selectable.css_class.map(str::to_string),
                label: selectable.label.to_string(),
                link,
            }
        })
        .collect()
}

fn row_view<A: AssetResolver + ?Sized>(
    row: ProjectedRow<'_>,
    selectables: &[SelectableDescriptor],
    assets: &A,
) -> RowView {
    let module: &ModuleRecord = row.module;
    RowView {
        cells: link_cells(selectables, row.links),
        attributes: row.attributes,
        name: module.name.clone(),
        icon: assets.module_icon(&module.name),
        author: module.author.clone(),
        module_type: module.module_type.to_string(),
        difficulty: difficulty_parts(module.defuser_difficulty, module.expert_difficulty),
    }
}

/// Everything the page templates render.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: String,
    pub config: ClientConfig,
    pub selectables: Vec<SelectableView>,
    pub include_missing: ControlView,
    pub filter_columns: Vec<Vec<FilterView>>,
    pub sort_options: Vec<SortView>,
    pub more: ControlView,
    pub see_json: ControlView,
    pub json_href: String,
    pub rows: Vec<RowView>,
}

/// Every access key bound on the page: descriptor keys plus sort options and page
/// controls.
pub fn page_access_keys(engine: &ProjectionEngine<'_>) -> Result<AccessKeyRegistry> {
    let mut registry = engine.access_keys()?;
    for option in SORT_OPTIONS {
        registry.bind(option.access_key, format!("sort option '{}'", option.value))?;
    }
    for control in PAGE_CONTROLS {
        registry.bind(control.access_key, format!("control '{}'", control.id))?;
    }
    Ok(registry)
}

pub fn build_view<A: AssetResolver + ?Sized>(
    engine: &ProjectionEngine<'_>,
    assets: &A,
    options: &PageOptions,
) -> Result<PageView> {
    let keys = page_access_keys(engine)?;
    debug!(access_keys = keys.len(), "access keys bound");

    let projection = engine.project()?;
    let rows = projection
        .rows
        .into_iter()
        .map(|row| row_view(row, engine.selectables(), assets))
        .collect();

    Ok(PageView {
        title: options.title.clone(),
        config: projection.config,
        selectables: engine.selectables().iter().map(SelectableView::from).collect(),
        include_missing: ControlView::from(&INCLUDE_MISSING),
        filter_columns: filter_columns(engine.filters()),
        sort_options: SORT_OPTIONS.iter().map(SortView::from).collect(),
        more: ControlView::from(&MORE),
        see_json: ControlView::from(&SEE_JSON),
        json_href: options.json_href.clone(),
        rows,
    })
}

/// Renders [`PageView`]s through the page templates.
pub struct PageAssembler {
    renderer: Renderer,
}

impl PageAssembler {
    pub fn new() -> Result<Self> {
        let mut renderer = Renderer::new();
        for (name, source) in templates::ALL {
            renderer.add_template(name, source)?;
        }
        Ok(Self { renderer })
    }

    pub fn render(&self, view: &PageView) -> Result<String> {
        Ok(self.renderer.render(templates::PAGE, view)?)
    }
}

/// Builds and renders the page for a catalog with the standard descriptors.
pub fn render_page<A: AssetResolver + ?Sized>(
    modules: &[ModuleRecord],
    assets: &A,
    options: &PageOptions,
) -> Result<String> {
    let sheets = ManualSheetMap::build(modules, assets)?;
    let engine = ProjectionEngine::new(modules, FILTERS, SELECTABLES, sheets)?;
    let view = build_view(&engine, assets, options)?;
    let html = PageAssembler::new()?.render(&view)?;
    info!(modules = modules.len(), bytes = html.len(), "rendered catalog page");
    Ok(html)
}

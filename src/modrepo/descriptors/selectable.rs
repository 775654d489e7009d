//! Selectable descriptors.
//!
//! A selectable is one link target a module name can point to. Each target is
//! resolved through [`LinkResolver`], implemented once per target kind. The
//! descriptor wraps a resolver with the page-facing metadata (key, label, access key)
//! and enforces the resolution order: [`SelectableDescriptor::link`] only asks for an
//! icon and URL after `is_visible` has agreed.

use crate::error::{RepoError, Result};
use crate::model::ModuleRecord;
use crate::sheets::ManualSheetMap;
use serde::Serialize;

pub const STEAM_WORKSHOP_ITEM_URL: &str = "https://steamcommunity.com/sharedfiles/filedetails/?id=";

/// Per-page data available to resolvers.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub sheets: &'a ManualSheetMap,
}

/// Resolution of one link target for a module.
///
/// `resolve_url` and `resolve_icon` are only meaningful where `is_visible` holds; they
/// return `None` elsewhere.
pub trait LinkResolver: Sync {
    fn is_visible(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> bool;

    fn resolve_url(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Option<String>;

    /// Icon image URL.
    fn resolve_icon(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Option<String>;

    /// Value of the row's data attribute, independent of visibility.
    fn data_value(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Result<Option<String>> {
        Ok(self.resolve_url(module, ctx))
    }
}

/// First manual sheet of the module. The data attribute lists every sheet so the
/// client can offer the alternatives.
pub struct ManualLink;

impl LinkResolver for ManualLink {
    fn is_visible(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> bool {
        ctx.sheets.first(&module.name).is_some()
    }

    fn resolve_url(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Option<String> {
        ctx.sheets.first(&module.name).map(|s| s.url.clone())
    }

    fn resolve_icon(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Option<String> {
        ctx.sheets.first(&module.name).map(|s| s.icon.clone())
    }

    fn data_value(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Result<Option<String>> {
        let sheets = ctx.sheets.sheets(&module.name);
        if sheets.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(sheets)?))
    }
}

pub struct SteamWorkshopLink;

impl LinkResolver for SteamWorkshopLink {
    fn is_visible(&self, module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> bool {
        module.steam_id.is_some()
    }

    fn resolve_url(&self, module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> Option<String> {
        module
            .steam_id
            .as_ref()
            .map(|id| format!("{}{}", STEAM_WORKSHOP_ITEM_URL, id))
    }

    fn resolve_icon(&self, _module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> Option<String> {
        Some("HTML/img/steam-workshop-item.png".to_string())
    }
}

pub struct SourceCodeLink;

impl LinkResolver for SourceCodeLink {
    fn is_visible(&self, module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> bool {
        module.source_url.is_some()
    }

    fn resolve_url(&self, module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> Option<String> {
        module.source_url.clone()
    }

    fn resolve_icon(&self, _module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> Option<String> {
        Some("HTML/img/unity.png".to_string())
    }
}

pub struct TutorialVideoLink;

impl LinkResolver for TutorialVideoLink {
    fn is_visible(&self, module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> bool {
        module.tutorial_video_url.is_some()
    }

    fn resolve_url(&self, module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> Option<String> {
        module.tutorial_video_url.clone()
    }

    fn resolve_icon(&self, _module: &ModuleRecord, _ctx: &ResolveContext<'_>) -> Option<String> {
        Some("HTML/img/video.png".to_string())
    }
}

/// A resolved, visible link of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub icon: String,
}

#[derive(Clone, Copy)]
pub struct SelectableDescriptor {
    /// Data attribute name on each row and entry in the client's selectable list.
    pub key: &'static str,
    pub label: &'static str,
    pub access_key: char,
    pub css_class: Option<&'static str>,
    pub resolver: &'static dyn LinkResolver,
}

impl std::fmt::Debug for SelectableDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectableDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("access_key", &self.access_key)
            .field("css_class", &self.css_class)
            .finish_non_exhaustive()
    }
}

impl SelectableDescriptor {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        access_key: char,
        resolver: &'static dyn LinkResolver,
    ) -> Self {
        Self {
            key,
            label,
            access_key,
            css_class: None,
            resolver,
        }
    }

    pub const fn css_class(mut self, class: &'static str) -> Self {
        self.css_class = Some(class);
        self
    }

    /// The row's link for this target, or `None` when the target does not apply.
    ///
    /// A visible target that resolves no URL or icon is a resolver bug and is reported
    /// as [`RepoError::UngatedResolver`].
    pub fn link(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Result<Option<Link>> {
        if !self.resolver.is_visible(module, ctx) {
            return Ok(None);
        }
        let href = self.resolver.resolve_url(module, ctx);
        let icon = self.resolver.resolve_icon(module, ctx);
        match (href, icon) {
            (Some(href), Some(icon)) => Ok(Some(Link { href, icon })),
            _ => Err(RepoError::UngatedResolver {
                selectable: self.key.to_string(),
                module: module.name.clone(),
            }),
        }
    }

    pub fn data_value(&self, module: &ModuleRecord, ctx: &ResolveContext<'_>) -> Result<Option<String>> {
        self.resolver.data_value(module, ctx)
    }
}

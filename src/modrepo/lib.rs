//! # Modrepo Architecture
//!
//! Modrepo renders the "Repository of Manual Pages": one HTML page listing every game
//! module in a catalog, with controls that filter, sort and re-target the rows in the
//! browser. The page does no server round trips, so it has to describe itself: every
//! row carries its filterable values as `data-*` attributes, and one embedded
//! configuration object tells the client script how to read them.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, sets up logging, prints results        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Thin facade: page, client config, catalog JSON, check    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (descriptors/, sheets.rs, projection.rs, page/)       │
//! │  - Descriptors: filter axes and link targets, as data       │
//! │  - Projection: rows -> data attributes + client config      │
//! │  - Page: view model and templates                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Adapters (catalog.rs, assets/, config.rs)                  │
//! │  - Catalog file, manual and icon lookup, modrepo.json       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Descriptors Are the Contract
//!
//! The server and the client script agree on nothing but descriptor keys. A filter
//! with key `defdiff` means every row may carry `data-defdiff`, and the client config
//! lists a filter `defdiff` with the shape needed to interpret it. Both sides are
//! produced from the same [`descriptors::ConfiguredFilter`], which is what keeps them
//! consistent. Adding a filter axis is one entry in [`descriptors::FILTERS`].
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. Files are
//! touched only by the adapters: [`catalog::load`], [`assets::fs::DirAssets::open`]
//! (which snapshots directory listings up front) and [`config::RepoConfig`].
//!
//! ## Testing Strategy
//!
//! 1. **Core**: unit tests next to the code, driven by
//!    [`assets::memory::StaticAssets`] and the sample catalog in
//!    `assets::memory::fixtures`.
//! 2. **Adapters**: unit tests against temporary directories (`tempfile`).
//! 3. **CLI**: `tests/` runs the binary with `assert_cmd` against a scratch repository.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by the CLI
//! - [`model`]: module records and their enums
//! - [`catalog`]: catalog file loading
//! - [`assets`]: manual sheet and icon resolution
//! - [`sheets`]: per-page manual sheet map
//! - [`descriptors`]: filter and selectable descriptors, access keys
//! - [`projection`]: row attributes and client configuration
//! - [`page`]: page view model and templates
//! - [`config`]: modrepo.json
//! - [`error`]: error types

pub mod api;
pub mod assets;
pub mod catalog;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod model;
pub mod page;
pub mod projection;
pub mod sheets;

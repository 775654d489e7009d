//! # Page Templates
//!
//! The page is rendered from stand-alone minijinja templates, kept as files so they
//! can be edited and diffed as HTML, and included here as string constants.
//!
//! `page.html` is the layout; it includes the other templates by name. All of them
//! are registered with every [`super::PageAssembler`], and all output is HTML
//! escaped. Labels with an access key go through the `accel` filter.
//!
//! Keep logic out of the templates: anything beyond a loop or a presence check is
//! computed into the [`super::PageView`] first.

pub const PAGE: &str = "page.html";

pub const PAGE_TEMPLATE: &str = include_str!("templates/page.html");
pub const HEADER_TEMPLATE: &str = include_str!("templates/header.html");
pub const FILTER_TEMPLATE: &str = include_str!("templates/filter.html");
pub const ROW_TEMPLATE: &str = include_str!("templates/row.html");
pub const MORE_TEMPLATE: &str = include_str!("templates/more.html");

pub const ALL: &[(&str, &str)] = &[
    (PAGE, PAGE_TEMPLATE),
    ("header.html", HEADER_TEMPLATE),
    ("filter.html", FILTER_TEMPLATE),
    ("row.html", ROW_TEMPLATE),
    ("more.html", MORE_TEMPLATE),
];

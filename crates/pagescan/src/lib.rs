//! Page structure analysis and design template scoring
//!
//! This library inspects a parsed HTML document and derives a small
//! structural fingerprint (hero section, gallery, forms, tables, cards,
//! coarse style class), then scores a fixed catalog of design templates
//! against that fingerprint by weighted feature overlap.
//!
//! Everything in here is a pure function of the document tree: no I/O,
//! no shared state. Fetching the page and resolving URLs is the caller's
//! concern.

pub mod analyze;
pub mod report;
pub mod templates;

// Re-exports for convenience
pub use analyze::{analyze, PageStructure, StyleClass};
pub use report::{inspect, MetaTag, PageLink, PageReport};
pub use templates::{score_catalog, suggest, Component, DesignTemplate, TemplateSuggestion, CATALOG};

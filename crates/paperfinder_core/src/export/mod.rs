//! Static site export.
//!
//! # Responsibility
//! - Rebuild the output directory from catalogs and assets in one pass.
//!
//! # Invariants
//! - The output directory is replaced, never merged.
//! - A missing asset source aborts before anything is deleted.

pub mod site;

pub use site::{ExportConfig, ExportError, ExportReport, SiteExporter};

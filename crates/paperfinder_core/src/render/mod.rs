//! HTML presentation of yearly and topical views.
//!
//! # Responsibility
//! - Render resolver output and catalogs into one page layout.
//!
//! # Invariants
//! - Rendering is pure: no I/O and no clock reads.
//! - All catalog-provided text is HTML-escaped.

pub mod html;
pub mod topical;

pub use html::{render_page, PageContext, PageMode, View};

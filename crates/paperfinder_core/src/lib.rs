//! Core domain logic for the past paper finder.
//! This crate is the single source of truth for catalog and availability rules.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod resolver;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use export::{ExportConfig, ExportError, ExportReport, SiteExporter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::paper::{ArtifactKind, PaperIdentifier};
pub use model::session::Session;
pub use model::subject::{PaperCatalog, Subject, SubjectCatalog};
pub use render::{render_page, PageContext, PageMode, View};
pub use repo::catalog_repo::{
    CatalogError, CatalogRepository, CatalogResult, JsonCatalogRepository, TopicCatalog,
};
pub use resolver::availability::{
    AvailabilityResolver, AvailabilityResult, PaperAvailability, PruneMode, ResolveOptions,
    ResolveRequest, SessionAvailability, YearAvailability,
};
pub use resolver::probe::{AssetProbe, FsAssetProbe, IndexedAssetProbe};
pub use service::subject_service::{
    parse_paper_list, AddSubjectRequest, MutationError, MutationOutcome, MutationPolicy,
    SubjectService, SubmissionError,
};
pub use service::yearly_service::{resolve_catalog, SubjectAvailability, YearlyQuery};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

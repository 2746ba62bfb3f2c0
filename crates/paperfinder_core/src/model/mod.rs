//! Domain model for exam-paper catalogs and generated paper identifiers.
//!
//! # Responsibility
//! - Define the subject catalog shape persisted on disk.
//! - Define fixed exam sessions, artifact kinds and the file naming convention.
//!
//! # Invariants
//! - Subject codes are unique keys of `SubjectCatalog`.
//! - Paper order inside a subject is insertion order and is never sorted.
//! - Paper identifiers are generated on demand and never persisted.

pub mod paper;
pub mod session;
pub mod subject;

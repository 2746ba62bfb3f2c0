//! Catalog persistence abstractions and implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the subject and topic catalogs.
//! - Keep file format details out of resolver and service code.
//!
//! # Invariants
//! - A missing catalog reads as empty; a malformed one is an error.
//! - Subject catalog writes replace the file atomically.
//! - The topic catalog is read-only.

pub mod catalog_repo;

//! Availability resolution over the local asset store.
//!
//! # Responsibility
//! - Generate candidate paper identifiers from structured filters.
//! - Keep only candidates whose asset file exists.
//!
//! # Invariants
//! - Resolution never mutates the file system and never fails; unreadable
//!   paths count as absent.
//! - "Now" is injected by the caller; the resolver never reads the clock.

pub mod availability;
pub mod probe;

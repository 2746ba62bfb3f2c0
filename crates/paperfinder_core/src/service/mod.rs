//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate catalog repository and resolver calls into use-case APIs.
//! - Keep HTTP and export front-ends decoupled from storage details.

pub mod subject_service;
pub mod yearly_service;

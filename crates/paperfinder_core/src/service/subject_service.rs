//! Subject catalog mutation service.
//!
//! # Responsibility
//! - Parse the delimited paper list submitted with a new subject.
//! - Insert or overwrite the subject and persist the catalog.
//!
//! # Invariants
//! - Paper entries are split on `,`, then on the first `:` only.
//! - Entries without `:` are dropped.
//! - A catalog that fails to load is never overwritten.

use crate::model::subject::{PaperCatalog, Subject};
use crate::repo::catalog_repo::{CatalogError, CatalogRepository};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid subject code regex"));

/// How invalid submissions are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationPolicy {
    /// Invalid input is discarded and reported as `MutationOutcome::Discarded`.
    #[default]
    SilentDrop,
    /// Invalid input is returned as a `MutationError`.
    Strict,
}

impl MutationPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "silent" | "silent_drop" => Some(Self::SilentDrop),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Raw subject submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddSubjectRequest {
    pub code: String,
    pub name: String,
    /// e.g. `1:Multiple Choice, 2:Structured`.
    pub papers: String,
}

/// Result of an accepted or silently discarded submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Saved { code: String, papers: usize },
    Discarded(SubmissionError),
}

/// Reason a submission was rejected before touching the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    EmptyCode,
    EmptyName,
    /// Paper list produced no `number:description` entry.
    NoPapers,
    /// Code contains characters unusable as an asset directory name.
    InvalidCode(String),
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "subject code is empty"),
            Self::EmptyName => write!(f, "subject name is empty"),
            Self::NoPapers => write!(f, "paper list has no `number:description` entry"),
            Self::InvalidCode(code) => write!(f, "invalid subject code: `{code}`"),
        }
    }
}

impl Error for SubmissionError {}

/// Subject mutation error.
#[derive(Debug)]
pub enum MutationError {
    Invalid(SubmissionError),
    Catalog(CatalogError),
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MutationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<SubmissionError> for MutationError {
    fn from(value: SubmissionError) -> Self {
        Self::Invalid(value)
    }
}

impl From<CatalogError> for MutationError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Parses `"1:Multiple Choice, 2:Structured: Section A"` into an ordered
/// paper catalog.
pub fn parse_paper_list(input: &str) -> PaperCatalog {
    input
        .split(',')
        .filter_map(|part| part.split_once(':'))
        .map(|(number, description)| (number.trim(), description.trim()))
        .collect()
}

/// Use-case service for catalog mutation.
pub struct SubjectService<R: CatalogRepository> {
    repo: R,
    policy: MutationPolicy,
}

impl<R: CatalogRepository> SubjectService<R> {
    pub fn new(repo: R, policy: MutationPolicy) -> Self {
        Self { repo, policy }
    }

    /// Inserts or overwrites one subject.
    ///
    /// # Errors
    /// - Catalog load/save failures, under every policy.
    /// - Validation failures under `MutationPolicy::Strict`.
    pub fn add_subject(&self, request: &AddSubjectRequest) -> Result<MutationOutcome, MutationError> {
        let code = request.code.trim();
        let name = request.name.trim();
        let papers = parse_paper_list(&request.papers);

        if let Err(reason) = validate_submission(code, name, &papers) {
            warn!(
                "event=subject_add module=service status=skip policy={:?} reason={}",
                self.policy, reason
            );
            return match self.policy {
                MutationPolicy::SilentDrop => Ok(MutationOutcome::Discarded(reason)),
                MutationPolicy::Strict => Err(reason.into()),
            };
        }

        let mut subjects = self.repo.load_subjects()?;
        let paper_count = papers.len();
        let replaced = subjects
            .insert(code.to_string(), Subject::new(name, papers))
            .is_some();
        self.repo.save_subjects(&subjects)?;

        info!(
            "event=subject_add module=service status=ok code={} papers={} replaced={}",
            code, paper_count, replaced
        );
        Ok(MutationOutcome::Saved {
            code: code.to_string(),
            papers: paper_count,
        })
    }
}

fn validate_submission(code: &str, name: &str, papers: &PaperCatalog) -> Result<(), SubmissionError> {
    if code.is_empty() {
        return Err(SubmissionError::EmptyCode);
    }
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err(SubmissionError::InvalidCode(code.to_string()));
    }
    if name.is_empty() {
        return Err(SubmissionError::EmptyName);
    }
    if papers.is_empty() {
        return Err(SubmissionError::NoPapers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_paper_list, validate_submission, MutationPolicy, SubmissionError};

    #[test]
    fn parse_splits_on_first_colon_only() {
        let papers = parse_paper_list("1:Multiple Choice, 2:Structured: Section A");
        let collected: Vec<_> = papers.iter().collect();
        assert_eq!(
            collected,
            vec![("1", "Multiple Choice"), ("2", "Structured: Section A")]
        );
    }

    #[test]
    fn parse_drops_entries_without_colon() {
        let papers = parse_paper_list("1 Core, 2:Extended,,3");
        let collected: Vec<_> = papers.iter().collect();
        assert_eq!(collected, vec![("2", "Extended")]);
    }

    #[test]
    fn validation_rejects_path_like_codes() {
        let papers = parse_paper_list("1:Core");
        assert_eq!(
            validate_submission("../etc", "Bad", &papers),
            Err(SubmissionError::InvalidCode("../etc".to_string()))
        );
        assert!(validate_submission("9702", "Physics", &papers).is_ok());
    }

    #[test]
    fn policy_parses_known_values() {
        assert_eq!(MutationPolicy::parse("STRICT"), Some(MutationPolicy::Strict));
        assert_eq!(MutationPolicy::parse("silent"), Some(MutationPolicy::SilentDrop));
        assert_eq!(MutationPolicy::parse("loud"), None);
    }
}

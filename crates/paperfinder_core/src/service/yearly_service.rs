//! Yearly browsing use-case.
//!
//! # Responsibility
//! - Turn submitted filter form fields into a `YearlyQuery`.
//! - Resolve availability for every cataloged subject.
//!
//! # Invariants
//! - A malformed year range falls back to `DEFAULT_YEAR_RANGE`.
//! - `*_all` form flags win over individual selections.

use crate::model::paper::ArtifactKind;
use crate::model::session::Session;
use crate::model::subject::SubjectCatalog;
use crate::resolver::availability::{AvailabilityResolver, AvailabilityResult, ResolveRequest};
use crate::resolver::probe::AssetProbe;
use chrono::NaiveDate;
use serde::Serialize;

/// Year range used when the form omits or garbles `year_range`.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2020, 2025);
/// Every administered variant number.
pub const ALL_VARIANTS: [&str; 3] = ["1", "2", "3"];

const FIELD_YEAR_RANGE: &str = "year_range";
const FIELD_VARIANTS: &str = "variants";
const FIELD_VARIANTS_ALL: &str = "variants_all";
const FIELD_SESSIONS: &str = "sessions";
const FIELD_SESSIONS_ALL: &str = "sessions_all";

/// Filters for the yearly view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyQuery {
    pub start_year: i32,
    pub end_year: i32,
    pub variants: Vec<String>,
    pub sessions: Vec<String>,
    pub kinds: Vec<ArtifactKind>,
}

impl YearlyQuery {
    /// Query over every session, variant and kind for `start..=end`.
    pub fn everything(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            variants: ALL_VARIANTS.iter().map(|v| v.to_string()).collect(),
            sessions: all_session_codes(),
            kinds: ArtifactKind::ALL.to_vec(),
        }
    }

    /// Builds a query from decoded `application/x-www-form-urlencoded` pairs.
    ///
    /// Repeated `variants` / `sessions` keys accumulate in submission order.
    pub fn from_form_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut year_range = None;
        let mut variants = Vec::new();
        let mut sessions = Vec::new();
        let mut variants_all = false;
        let mut sessions_all = false;

        for (key, value) in pairs {
            match key {
                FIELD_YEAR_RANGE => year_range = Some(value.to_string()),
                FIELD_VARIANTS => variants.push(value.trim().to_string()),
                FIELD_SESSIONS => sessions.push(value.trim().to_string()),
                FIELD_VARIANTS_ALL => variants_all |= is_truthy(value),
                FIELD_SESSIONS_ALL => sessions_all |= is_truthy(value),
                _ => {}
            }
        }

        let (start_year, end_year) = year_range
            .as_deref()
            .and_then(parse_year_range)
            .unwrap_or(DEFAULT_YEAR_RANGE);
        if variants_all {
            variants = ALL_VARIANTS.iter().map(|v| v.to_string()).collect();
        }
        if sessions_all {
            sessions = all_session_codes();
        }

        Self {
            start_year,
            end_year,
            variants,
            sessions,
            kinds: ArtifactKind::ALL.to_vec(),
        }
    }
}

/// Earliest and latest year accepted from a submitted range.
pub const MIN_FORM_YEAR: i32 = 1900;
pub const MAX_FORM_YEAR: i32 = 2999;
/// Widest span (in years) a single query may cover.
pub const MAX_YEAR_SPAN: i32 = 50;

/// Parses `"2020-2025"` (or a single `"2023"`) into an inclusive range.
///
/// The range is returned as written; an inverted range resolves to no years.
/// Years outside [`MIN_FORM_YEAR`]..=[`MAX_FORM_YEAR`] or spans wider than
/// [`MAX_YEAR_SPAN`] are rejected.
pub fn parse_year_range(value: &str) -> Option<(i32, i32)> {
    let value = value.trim();
    let (start, end) = match value.split_once('-') {
        Some((start, end)) => (start.trim().parse().ok()?, end.trim().parse().ok()?),
        None => {
            let year = value.parse().ok()?;
            (year, year)
        }
    };
    let in_bounds = |year: i32| (MIN_FORM_YEAR..=MAX_FORM_YEAR).contains(&year);
    if !in_bounds(start) || !in_bounds(end) || (end - start).abs() > MAX_YEAR_SPAN {
        return None;
    }
    Some((start, end))
}

/// Availability for one subject, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectAvailability {
    pub code: String,
    pub name: String,
    pub links: AvailabilityResult,
}

/// Resolves `query` for every subject in catalog order.
pub fn resolve_catalog<P: AssetProbe>(
    resolver: &AvailabilityResolver<P>,
    subjects: &SubjectCatalog,
    query: &YearlyQuery,
    today: NaiveDate,
) -> Vec<SubjectAvailability> {
    subjects
        .iter()
        .map(|(code, subject)| {
            let request = ResolveRequest {
                subject_code: code,
                start_year: query.start_year,
                end_year: query.end_year,
                papers: &subject.papers,
                variants: &query.variants,
                sessions: &query.sessions,
                kinds: &query.kinds,
            };
            SubjectAvailability {
                code: code.clone(),
                name: subject.name.clone(),
                links: resolver.resolve(&request, today),
            }
        })
        .collect()
}

fn all_session_codes() -> Vec<String> {
    Session::ALL.iter().map(|s| s.code().to_string()).collect()
}

fn is_truthy(value: &str) -> bool {
    !value.trim().is_empty()
}

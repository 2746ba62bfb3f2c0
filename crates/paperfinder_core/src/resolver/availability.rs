//! Availability resolver.
//!
//! # Responsibility
//! - Enumerate `year x session x paper x variant x kind` candidates.
//! - Group existing files by year, session label and paper label.
//!
//! # Invariants
//! - Years are emitted in descending order; an inverted range is empty.
//! - Papers keep catalog insertion order; paths keep variant filter order.
//! - Feb/March candidates are dropped before any existence check unless the
//!   variant is `2`.
//! - Oct/Nov of the current year is skipped before October.

use crate::model::paper::{ArtifactKind, PaperIdentifier};
use crate::model::session::Session;
use crate::model::subject::{paper_label, PaperCatalog};
use crate::resolver::probe::AssetProbe;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// Public URL prefix for interactive pages.
pub const SERVER_PUBLIC_PREFIX: &str = "/static/yearly_papers";
/// Relative URL prefix for exported static pages.
pub const EXPORT_PUBLIC_PREFIX: &str = "static/yearly_papers";

/// Inputs for one subject resolution.
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    pub subject_code: &'a str,
    pub start_year: i32,
    pub end_year: i32,
    pub papers: &'a PaperCatalog,
    /// Variant numbers in the order their paths should be listed.
    pub variants: &'a [String],
    /// Session codes; unknown codes are ignored.
    pub sessions: &'a [String],
    pub kinds: &'a [ArtifactKind],
}

/// Whether containers without any file are kept in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Keep every enumerated year, session and paper.
    KeepEmpty,
    /// Drop papers, sessions and years that hold no file.
    #[default]
    PruneEmpty,
}

/// Resolver settings shared across requests.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Prefix joined with `<subject>/<file>` to form emitted paths.
    pub public_prefix: String,
    pub prune: PruneMode,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            public_prefix: SERVER_PUBLIC_PREFIX.to_string(),
            prune: PruneMode::PruneEmpty,
        }
    }
}

/// Files found for one paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaperAvailability {
    pub number: String,
    /// `Paper {number}: {description}`.
    pub label: String,
    #[serde(rename = "qp")]
    pub question_papers: Vec<String>,
    #[serde(rename = "ms")]
    pub mark_schemes: Vec<String>,
}

impl PaperAvailability {
    pub fn is_empty(&self) -> bool {
        self.question_papers.is_empty() && self.mark_schemes.is_empty()
    }
}

/// Papers found for one session of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionAvailability {
    pub session: Session,
    /// `{SessionName} {year}`.
    pub label: String,
    /// `{code}{yy}`.
    pub short_code: String,
    pub papers: Vec<PaperAvailability>,
}

impl SessionAvailability {
    pub fn paper(&self, label: &str) -> Option<&PaperAvailability> {
        self.papers.iter().find(|paper| paper.label == label)
    }

    pub fn has_files(&self) -> bool {
        self.papers.iter().any(|paper| !paper.is_empty())
    }
}

/// Sessions found for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearAvailability {
    pub year: String,
    pub sessions: Vec<SessionAvailability>,
}

impl YearAvailability {
    pub fn session(&self, label: &str) -> Option<&SessionAvailability> {
        self.sessions.iter().find(|session| session.label == label)
    }
}

/// Resolution result for one subject, years in descending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailabilityResult {
    pub years: Vec<YearAvailability>,
}

impl AvailabilityResult {
    pub fn year(&self, year: &str) -> Option<&YearAvailability> {
        self.years.iter().find(|entry| entry.year == year)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total number of emitted paths.
    pub fn file_count(&self) -> usize {
        self.years
            .iter()
            .flat_map(|year| &year.sessions)
            .flat_map(|session| &session.papers)
            .map(|paper| paper.question_papers.len() + paper.mark_schemes.len())
            .sum()
    }
}

/// Resolves candidate identifiers against an asset probe.
pub struct AvailabilityResolver<P: AssetProbe> {
    probe: P,
    options: ResolveOptions,
}

impl<P: AssetProbe> AvailabilityResolver<P> {
    pub fn new(probe: P, options: ResolveOptions) -> Self {
        Self { probe, options }
    }

    /// Resolves one subject as seen on `today`.
    pub fn resolve(&self, request: &ResolveRequest<'_>, today: NaiveDate) -> AvailabilityResult {
        let variants = dedup_preserving_order(request.variants);
        let kinds: Vec<ArtifactKind> = ArtifactKind::ALL
            .into_iter()
            .filter(|kind| request.kinds.contains(kind))
            .collect();
        let sessions: Vec<Session> = Session::ALL
            .into_iter()
            .filter(|session| request.sessions.iter().any(|code| code.trim() == session.code()))
            .collect();

        let mut checks = 0usize;
        let mut years = Vec::new();
        for year in (request.start_year..=request.end_year).rev() {
            let mut year_entry = YearAvailability {
                year: year.to_string(),
                sessions: Vec::new(),
            };

            for &session in &sessions {
                if session.is_pending(year, today) {
                    continue;
                }

                let mut session_entry = SessionAvailability {
                    session,
                    label: session.label(year),
                    short_code: session.short_code(year),
                    papers: Vec::new(),
                };

                for (number, description) in request.papers.iter() {
                    let mut paper = PaperAvailability {
                        number: number.to_string(),
                        label: paper_label(number, description),
                        ..PaperAvailability::default()
                    };

                    for variant in variants.iter().filter(|v| session.allows_variant(v)) {
                        for &kind in &kinds {
                            let id = PaperIdentifier {
                                subject_code: request.subject_code,
                                year,
                                session,
                                paper_number: number,
                                variant,
                                kind,
                            };
                            let file_name = id.file_name();
                            checks += 1;
                            if !self.probe.exists(request.subject_code, &file_name) {
                                continue;
                            }
                            let path = self.public_path(request.subject_code, &file_name);
                            match kind {
                                ArtifactKind::QuestionPaper => paper.question_papers.push(path),
                                ArtifactKind::MarkScheme => paper.mark_schemes.push(path),
                            }
                        }
                    }

                    if self.options.prune == PruneMode::KeepEmpty || !paper.is_empty() {
                        session_entry.papers.push(paper);
                    }
                }

                if self.options.prune == PruneMode::KeepEmpty || !session_entry.papers.is_empty() {
                    year_entry.sessions.push(session_entry);
                }
            }

            if self.options.prune == PruneMode::KeepEmpty || !year_entry.sessions.is_empty() {
                years.push(year_entry);
            }
        }

        let result = AvailabilityResult { years };
        debug!(
            "event=resolve module=resolver status=ok subject={} checks={} files={}",
            request.subject_code,
            checks,
            result.file_count()
        );
        result
    }

    fn public_path(&self, subject_code: &str, file_name: &str) -> String {
        let prefix = self.options.public_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            format!("{subject_code}/{file_name}")
        } else {
            format!("{prefix}/{subject_code}/{file_name}")
        }
    }
}

fn dedup_preserving_order(values: &[String]) -> Vec<&str> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

//! Static site exporter.
//!
//! Writes `index.html` (yearly view over every cataloged subject),
//! `topical.html`, and a copy of the static asset tree.

use crate::render::{render_page, PageContext, PageMode, View};
use crate::repo::catalog_repo::{CatalogError, CatalogRepository};
use crate::resolver::availability::{
    AvailabilityResolver, PruneMode, ResolveOptions, EXPORT_PUBLIC_PREFIX,
};
use crate::resolver::probe::IndexedAssetProbe;
use crate::service::yearly_service::{resolve_catalog, YearlyQuery};
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// First year scanned by a full export.
pub const DEFAULT_EXPORT_START_YEAR: i32 = 2015;

const INDEX_FILE_NAME: &str = "index.html";
const TOPICAL_FILE_NAME: &str = "topical.html";
const STATIC_DIR_NAME: &str = "static";

/// Paths and range for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Source tree copied to `<build_dir>/static`.
    pub static_dir: PathBuf,
    /// Per-subject PDF root, normally `<static_dir>/yearly_papers`.
    pub asset_root: PathBuf,
    pub build_dir: PathBuf,
    pub start_year: i32,
    pub end_year: i32,
    /// Date used for the pending Oct/Nov rule.
    pub today: NaiveDate,
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub index_path: PathBuf,
    pub topical_path: PathBuf,
    pub subjects: usize,
    pub papers_linked: usize,
    pub files_copied: usize,
}

/// Export failure. There is no partial-success mode.
#[derive(Debug)]
pub enum ExportError {
    MissingAssetRoot(PathBuf),
    Catalog(CatalogError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAssetRoot(path) => {
                write!(f, "static asset directory not found: `{}`", path.display())
            }
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "export io failed at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingAssetRoot(_) => None,
            Self::Catalog(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<CatalogError> for ExportError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Orchestrates catalog loading, resolution, rendering and asset copying.
pub struct SiteExporter<R: CatalogRepository> {
    repo: R,
    config: ExportConfig,
}

impl<R: CatalogRepository> SiteExporter<R> {
    pub fn new(repo: R, config: ExportConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Runs a full rebuild of `build_dir`.
    pub fn run(&self) -> Result<ExportReport, ExportError> {
        let started_at = Instant::now();
        info!(
            "event=export module=export status=start build_dir={} years={}..={}",
            self.config.build_dir.display(),
            self.config.start_year,
            self.config.end_year
        );
        match self.run_inner() {
            Ok(report) => {
                info!(
                    "event=export module=export status=ok duration_ms={} subjects={} papers={} files_copied={}",
                    started_at.elapsed().as_millis(),
                    report.subjects,
                    report.papers_linked,
                    report.files_copied
                );
                Ok(report)
            }
            Err(err) => {
                error!(
                    "event=export module=export status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn run_inner(&self) -> Result<ExportReport, ExportError> {
        let config = &self.config;
        if !config.static_dir.is_dir() {
            return Err(ExportError::MissingAssetRoot(config.static_dir.clone()));
        }

        let subjects = self.repo.load_subjects()?;
        let topics = self.repo.load_topics()?;

        reset_dir(&config.build_dir)?;

        let probe = IndexedAssetProbe::scan(&config.asset_root, subjects.keys().map(String::as_str));
        let resolver = AvailabilityResolver::new(
            probe,
            ResolveOptions {
                public_prefix: EXPORT_PUBLIC_PREFIX.to_string(),
                prune: PruneMode::PruneEmpty,
            },
        );
        let query = YearlyQuery::everything(config.start_year, config.end_year);
        let results = resolve_catalog(&resolver, &subjects, &query, config.today);
        let papers_linked = results.iter().map(|r| r.links.file_count()).sum();

        let yearly = render_page(&PageContext {
            view: View::Yearly,
            mode: PageMode::Static,
            subjects: &subjects,
            topics: &topics,
            results: Some(results.as_slice()),
            query: None,
        });
        let index_path = config.build_dir.join(INDEX_FILE_NAME);
        write_file(&index_path, &yearly)?;

        let topical = render_page(&PageContext {
            view: View::Topical,
            mode: PageMode::Static,
            subjects: &subjects,
            topics: &topics,
            results: None,
            query: None,
        });
        let topical_path = config.build_dir.join(TOPICAL_FILE_NAME);
        write_file(&topical_path, &topical)?;

        let files_copied = copy_tree(&config.static_dir, &config.build_dir.join(STATIC_DIR_NAME))?;

        Ok(ExportReport {
            index_path,
            topical_path,
            subjects: subjects.len(),
            papers_linked,
            files_copied,
        })
    }
}

fn io_error(path: &Path) -> impl Fn(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn reset_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(io_error(dir))?;
    }
    fs::create_dir_all(dir).map_err(io_error(dir))
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(io_error(path))
}

/// Recursively copies `src` into `dst`, returning the number of files copied.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize, ExportError> {
    fs::create_dir_all(dst).map_err(io_error(dst))?;

    let mut entries = fs::read_dir(src)
        .map_err(io_error(src))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error(src))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut copied = 0;
    for entry in entries {
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(io_error(&from))?;
        if file_type.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(io_error(&from))?;
            copied += 1;
        }
    }
    Ok(copied)
}

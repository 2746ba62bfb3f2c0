//! Catalog repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Load and save the subject catalog (`subjects.json`).
//! - Load the opaque topic catalog (`topics.json`).
//!
//! # Invariants
//! - Reads never mask malformed content as an empty catalog.
//! - Saves go through a sibling temp file and a rename, so readers never
//!   observe a truncated document.

use crate::model::subject::SubjectCatalog;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Topic catalog document. Passed through without schema checks.
pub type TopicCatalog = serde_json::Value;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog persistence error.
#[derive(Debug)]
pub enum CatalogError {
    /// File exists but could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a valid catalog document.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Catalog could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "catalog io failed at `{}`: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "malformed catalog `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode catalog: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Repository interface for catalog documents.
pub trait CatalogRepository {
    fn load_subjects(&self) -> CatalogResult<SubjectCatalog>;
    fn save_subjects(&self, subjects: &SubjectCatalog) -> CatalogResult<()>;
    fn load_topics(&self) -> CatalogResult<TopicCatalog>;
}

impl<R: CatalogRepository + ?Sized> CatalogRepository for &R {
    fn load_subjects(&self) -> CatalogResult<SubjectCatalog> {
        (**self).load_subjects()
    }

    fn save_subjects(&self, subjects: &SubjectCatalog) -> CatalogResult<()> {
        (**self).save_subjects(subjects)
    }

    fn load_topics(&self) -> CatalogResult<TopicCatalog> {
        (**self).load_topics()
    }
}

/// JSON-file-backed catalog repository.
#[derive(Debug, Clone)]
pub struct JsonCatalogRepository {
    subjects_path: PathBuf,
    topics_path: PathBuf,
}

impl JsonCatalogRepository {
    pub fn new(subjects_path: impl Into<PathBuf>, topics_path: impl Into<PathBuf>) -> Self {
        Self {
            subjects_path: subjects_path.into(),
            topics_path: topics_path.into(),
        }
    }
}

impl CatalogRepository for JsonCatalogRepository {
    fn load_subjects(&self) -> CatalogResult<SubjectCatalog> {
        let subjects = read_json_or_default::<SubjectCatalog>(&self.subjects_path, "subjects")?;
        Ok(subjects.unwrap_or_default())
    }

    fn save_subjects(&self, subjects: &SubjectCatalog) -> CatalogResult<()> {
        let path = self.subjects_path.as_path();
        let result = write_json_atomically(path, subjects);
        match &result {
            Ok(()) => info!(
                "event=catalog_save module=repo status=ok catalog=subjects count={}",
                subjects.len()
            ),
            Err(err) => error!(
                "event=catalog_save module=repo status=error catalog=subjects error={}",
                err
            ),
        }
        result
    }

    fn load_topics(&self) -> CatalogResult<TopicCatalog> {
        let topics = read_json_or_default::<TopicCatalog>(&self.topics_path, "topics")?;
        Ok(topics.unwrap_or_else(|| TopicCatalog::Object(serde_json::Map::new())))
    }
}

/// Reads a JSON document, returning `None` when the file does not exist.
fn read_json_or_default<T: DeserializeOwned>(path: &Path, catalog: &str) -> CatalogResult<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=catalog_load module=repo status=skip catalog={} reason=missing",
                catalog
            );
            return Ok(None);
        }
        Err(source) => {
            error!(
                "event=catalog_load module=repo status=error catalog={} error_code=io error={}",
                catalog, source
            );
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_str::<T>(&text) {
        Ok(value) => Ok(Some(value)),
        Err(source) => {
            warn!(
                "event=catalog_load module=repo status=error catalog={} error_code=malformed error={}",
                catalog, source
            );
            Err(CatalogError::Malformed {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn write_json_atomically(path: &Path, subjects: &SubjectCatalog) -> CatalogResult<()> {
    let io_err = |source: std::io::Error| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err)?;

    let temp = NamedTempFile::new_in(parent).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, subjects).map_err(CatalogError::Serialize)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;
    }
    temp.as_file().sync_all().map_err(io_err)?;
    // Temp files are created owner-only; keep the replaced catalog's mode.
    match fs::metadata(path) {
        Ok(existing) => fs::set_permissions(temp.path(), existing.permissions()).map_err(io_err)?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(io_err(err)),
    }
    temp.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

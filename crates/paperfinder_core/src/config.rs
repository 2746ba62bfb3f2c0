//! Application configuration.
//!
//! # Responsibility
//! - Fix the on-disk layout relative to one application directory.
//! - Apply environment overrides for the server and exporter binaries.
//!
//! # Invariants
//! - Every derived path is absolute once `AppConfig::from_env` succeeds.
//! - Invalid override values are rejected, not silently ignored.

use crate::export::site::DEFAULT_EXPORT_START_YEAR;
use crate::logging::default_log_level;
use crate::repo::catalog_repo::JsonCatalogRepository;
use crate::service::subject_service::MutationPolicy;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const ENV_APP_DIR: &str = "PAPERFINDER_APP_DIR";
pub const ENV_HTTP_BIND: &str = "PAPERFINDER_HTTP_BIND";
pub const ENV_LOG_LEVEL: &str = "PAPERFINDER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PAPERFINDER_LOG_DIR";
pub const ENV_MUTATION_POLICY: &str = "PAPERFINDER_MUTATION_POLICY";
pub const ENV_EXPORT_START_YEAR: &str = "PAPERFINDER_EXPORT_START_YEAR";

const DEFAULT_HTTP_BIND: &str = "127.0.0.1:5000";
const SUBJECTS_FILE_NAME: &str = "subjects.json";
const TOPICS_FILE_NAME: &str = "topics.json";
const STATIC_DIR_NAME: &str = "static";
const YEARLY_PAPERS_DIR_NAME: &str = "yearly_papers";
const BUILD_DIR_NAME: &str = "build";
const LOG_DIR_NAME: &str = "logs";

/// Configuration error for invalid overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
    CurrentDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: `{value}`"),
            Self::CurrentDir(message) => {
                write!(f, "cannot resolve current directory: {message}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_dir: PathBuf,
    pub http_bind: SocketAddr,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub mutation_policy: MutationPolicy,
    pub export_start_year: i32,
}

impl AppConfig {
    /// Defaults rooted at `app_dir`.
    pub fn with_app_dir(app_dir: impl Into<PathBuf>) -> Self {
        let app_dir = app_dir.into();
        Self {
            log_dir: app_dir.join(LOG_DIR_NAME),
            app_dir,
            http_bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            log_level: default_log_level().to_string(),
            mutation_policy: MutationPolicy::default(),
            export_start_year: DEFAULT_EXPORT_START_YEAR,
        }
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let cwd = std::env::current_dir().map_err(|err| ConfigError::CurrentDir(err.to_string()))?;
        Self::from_vars(&vars, &cwd)
    }

    /// Reads overrides from `vars`; relative paths resolve against `cwd`.
    pub fn from_vars(vars: &HashMap<String, String>, cwd: &Path) -> Result<Self, ConfigError> {
        let lookup = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let app_dir = lookup(ENV_APP_DIR).map_or_else(|| cwd.to_path_buf(), |dir| cwd.join(dir));
        let mut config = Self::with_app_dir(app_dir);

        let bind = lookup(ENV_HTTP_BIND).unwrap_or(DEFAULT_HTTP_BIND);
        config.http_bind = bind.parse().map_err(|_| invalid(ENV_HTTP_BIND, bind))?;

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.to_ascii_lowercase();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = cwd.join(dir);
        }
        if let Some(policy) = lookup(ENV_MUTATION_POLICY) {
            config.mutation_policy =
                MutationPolicy::parse(policy).ok_or_else(|| invalid(ENV_MUTATION_POLICY, policy))?;
        }
        if let Some(year) = lookup(ENV_EXPORT_START_YEAR) {
            config.export_start_year = year
                .parse()
                .map_err(|_| invalid(ENV_EXPORT_START_YEAR, year))?;
        }
        Ok(config)
    }

    pub fn subjects_path(&self) -> PathBuf {
        self.app_dir.join(SUBJECTS_FILE_NAME)
    }

    pub fn topics_path(&self) -> PathBuf {
        self.app_dir.join(TOPICS_FILE_NAME)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.app_dir.join(STATIC_DIR_NAME)
    }

    /// Per-subject PDF root: `<static>/yearly_papers`.
    pub fn asset_root(&self) -> PathBuf {
        self.static_dir().join(YEARLY_PAPERS_DIR_NAME)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.app_dir.join(BUILD_DIR_NAME)
    }

    pub fn catalog_repository(&self) -> JsonCatalogRepository {
        JsonCatalogRepository::new(self.subjects_path(), self.topics_path())
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

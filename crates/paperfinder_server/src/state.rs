//! Shared request state and synchronous page builders.
//!
//! Every request re-reads both catalogs and re-walks the asset store; nothing
//! is cached between requests. Catalog saves are not coordinated across
//! concurrent requests, so the last writer wins.

use chrono::{Local, NaiveDate};
use log::error;
use paperfinder_core::{
    render_page, resolve_catalog, AddSubjectRequest, AppConfig, AvailabilityResolver,
    CatalogRepository, FsAssetProbe, JsonCatalogRepository, MutationError, MutationOutcome,
    PageContext, PageMode, ResolveOptions, SubjectCatalog, SubjectService, TopicCatalog, View,
    YearlyQuery,
};
use std::path::PathBuf;

pub struct AppState {
    config: AppConfig,
    repo: JsonCatalogRepository,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let repo = config.catalog_repository();
        Self { config, repo }
    }

    pub fn static_dir(&self) -> PathBuf {
        self.config.static_dir()
    }

    /// Yearly view; `query = None` renders the empty form.
    pub fn yearly_page(&self, query: Option<&YearlyQuery>) -> String {
        self.yearly_page_on(query, today())
    }

    pub fn yearly_page_on(&self, query: Option<&YearlyQuery>, today: NaiveDate) -> String {
        let (subjects, topics) = self.load_catalogs();
        let results = query.map(|query| {
            let resolver = AvailabilityResolver::new(
                FsAssetProbe::new(self.config.asset_root()),
                ResolveOptions::default(),
            );
            resolve_catalog(&resolver, &subjects, query, today)
        });
        render_page(&PageContext {
            view: View::Yearly,
            mode: PageMode::Interactive,
            subjects: &subjects,
            topics: &topics,
            results: results.as_deref(),
            query,
        })
    }

    pub fn topical_page(&self) -> String {
        let (subjects, topics) = self.load_catalogs();
        render_page(&PageContext {
            view: View::Topical,
            mode: PageMode::Interactive,
            subjects: &subjects,
            topics: &topics,
            results: None,
            query: None,
        })
    }

    pub fn add_subject(&self, request: &AddSubjectRequest) -> Result<MutationOutcome, MutationError> {
        SubjectService::new(&self.repo, self.config.mutation_policy).add_subject(request)
    }

    /// Loads both catalogs, rendering with empty ones when either fails.
    fn load_catalogs(&self) -> (SubjectCatalog, TopicCatalog) {
        let subjects = self.repo.load_subjects().unwrap_or_else(|err| {
            error!(
                "event=page_catalog module=server status=error catalog=subjects error={}",
                err
            );
            SubjectCatalog::new()
        });
        let topics = self.repo.load_topics().unwrap_or_else(|err| {
            error!(
                "event=page_catalog module=server status=error catalog=topics error={}",
                err
            );
            TopicCatalog::Object(Default::default())
        });
        (subjects, topics)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use chrono::NaiveDate;
    use paperfinder_core::{AddSubjectRequest, AppConfig, MutationOutcome, YearlyQuery};
    use std::fs;

    #[test]
    fn yearly_page_resolves_against_configured_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(AppConfig::with_app_dir(dir.path()));
        let outcome = state
            .add_subject(&AddSubjectRequest {
                code: "PHY".to_string(),
                name: "Physics".to_string(),
                papers: "1:Core".to_string(),
            })
            .unwrap();
        assert!(matches!(outcome, MutationOutcome::Saved { .. }));

        let asset_dir = dir.path().join("static/yearly_papers/PHY");
        fs::create_dir_all(&asset_dir).unwrap();
        fs::write(asset_dir.join("PHY_s24_ms_11.pdf"), b"%PDF").unwrap();

        let query = YearlyQuery::from_form_pairs([
            ("year_range", "2024-2024"),
            ("sessions_all", "on"),
            ("variants_all", "on"),
        ]);
        let html = state.yearly_page_on(Some(&query), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert!(html.contains("/static/yearly_papers/PHY/PHY_s24_ms_11.pdf"));
        assert!(html.contains("May/June 2024"));
    }

    #[test]
    fn malformed_catalog_renders_empty_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("subjects.json"), "{oops").unwrap();
        let state = AppState::new(AppConfig::with_app_dir(dir.path()));

        let html = state.topical_page();
        assert!(html.contains("No topical papers available."));
    }
}

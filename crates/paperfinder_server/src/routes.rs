//! HTTP routes for the interactive surface.

use crate::state::AppState;
use crate::static_files;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use log::{error, info, warn};
use paperfinder_core::{AddSubjectRequest, MutationOutcome, YearlyQuery};
use std::sync::Arc;

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index).post(yearly_results))
        .route("/topical", get(topical))
        .route("/add_subject", post(add_subject))
        .route("/static/*path", get(static_asset))
        .with_state(state)
}

async fn index(State(state): State<SharedState>) -> Response {
    render_blocking(state, |state| state.yearly_page(None)).await
}

/// Form bodies are decoded regardless of the declared content type.
async fn yearly_results(State(state): State<SharedState>, body: Bytes) -> Response {
    let pairs = decode_form(&body);
    let query = YearlyQuery::from_form_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    info!(
        "event=yearly_query module=server status=start years={}..={} sessions={} variants={}",
        query.start_year,
        query.end_year,
        query.sessions.join(","),
        query.variants.join(",")
    );
    render_blocking(state, move |state| state.yearly_page(Some(&query))).await
}

async fn topical(State(state): State<SharedState>) -> Response {
    render_blocking(state, |state| state.topical_page()).await
}

/// Always redirects back to the yearly view, whatever the outcome.
async fn add_subject(State(state): State<SharedState>, body: Bytes) -> Redirect {
    let request = add_subject_request(&decode_form(&body));
    let result = tokio::task::spawn_blocking(move || state.add_subject(&request)).await;
    match result {
        Ok(Ok(MutationOutcome::Saved { code, papers })) => {
            info!(
                "event=add_subject module=server status=ok code={} papers={}",
                code, papers
            );
        }
        Ok(Ok(MutationOutcome::Discarded(reason))) => {
            warn!(
                "event=add_subject module=server status=skip reason={}",
                reason
            );
        }
        Ok(Err(err)) => {
            error!("event=add_subject module=server status=error error={}", err);
        }
        Err(err) => {
            error!(
                "event=add_subject module=server status=error error_code=join_failed error={}",
                err
            );
        }
    }
    Redirect::to("/")
}

async fn static_asset(State(state): State<SharedState>, Path(path): Path<String>) -> Response {
    let Some(file) = static_files::resolve(&state.static_dir(), &path) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => (
            [(axum::http::header::CONTENT_TYPE, static_files::content_type(&file))],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn render_blocking<F>(state: SharedState, render: F) -> Response
where
    F: FnOnce(&AppState) -> String + Send + 'static,
{
    match tokio::task::spawn_blocking(move || render(state.as_ref())).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(
                "event=render module=server status=error error_code=join_failed error={}",
                err
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

fn decode_form(body: &[u8]) -> Vec<(String, String)> {
    form_urlencoded::parse(body)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn add_subject_request(pairs: &[(String, String)]) -> AddSubjectRequest {
    let field = |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    };
    AddSubjectRequest {
        code: field("code"),
        name: field("name"),
        papers: field("papers"),
    }
}

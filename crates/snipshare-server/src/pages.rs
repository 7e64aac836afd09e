//! Page handlers: snippet list, snippet detail, and create.
//!
//! Handlers validate input, call the store inside `spawn_blocking`, and
//! hand result data to the [`Renderer`](crate::render::Renderer). Storage
//! and rendering failures terminate the request with a 500 and exactly one
//! error log entry; 4xx outcomes are decided locally and never logged as
//! server errors.

use crate::render::RenderError;
use crate::AppState;
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Deserialize;
use snipshare_store::{get_snippet, insert_snippet, latest_snippets, SnippetError};
use std::sync::Arc;

/// Placeholder record persisted by the create handler. Form input is not
/// wired up yet; every create stores this fixed snippet.
const PLACEHOLDER_TITLE: &str = "Whispers through the pines";
const PLACEHOLDER_CONTENT: &str =
    "Whispers through the pines,\nautumn leaves in twilight's grace—\ntime's quiet embrace.";
const PLACEHOLDER_EXPIRES_DAYS: u32 = 7;

/// Maps a [`SnippetError`] to the correct HTTP status code, logging non-404
/// errors.
///
/// `NotFound` → 404, everything else → 500 (with error logged).
fn snippet_err_to_status(e: SnippetError) -> StatusCode {
    match e {
        SnippetError::NotFound(_) => StatusCode::NOT_FOUND,
        err => {
            tracing::error!(error = %err, "snippet operation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn render_err_to_status(e: RenderError) -> StatusCode {
    tracing::error!(error = %e, "page rendering failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// GET /
pub async fn home_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Html<String>, StatusCode> {
    let pool = state.pool.clone();
    let snippets = tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for home");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        latest_snippets(&conn).map_err(snippet_err_to_status)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "home task join error");
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    let body = state
        .renderer
        .home_page(&snippets)
        .map_err(render_err_to_status)?;
    Ok(Html(body))
}

#[derive(Deserialize)]
pub struct ShowParams {
    pub id: Option<String>,
}

/// GET /snippet
///
/// A missing, non-numeric, or sub-1 `id` is answered 404 before the store
/// is consulted; the client cannot tell a malformed id from a snippet that
/// never existed.
pub async fn show_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ShowParams>,
) -> Result<Html<String>, StatusCode> {
    let id = params
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id >= 1)
        .ok_or(StatusCode::NOT_FOUND)?;

    let pool = state.pool.clone();
    let snippet = tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for show");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        get_snippet(&conn, id).map_err(snippet_err_to_status)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "show task join error");
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    let body = state
        .renderer
        .show_page(&snippet)
        .map_err(render_err_to_status)?;
    Ok(Html(body))
}

/// POST /snippet/create
///
/// Persists the placeholder snippet and redirects (303 See Other) to its
/// detail page. Method rejection (405 + `Allow: POST`) is handled by the
/// router.
pub async fn create_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Redirect, StatusCode> {
    let pool = state.pool.clone();
    let id = tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get db connection for create");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        insert_snippet(
            &conn,
            PLACEHOLDER_TITLE,
            PLACEHOLDER_CONTENT,
            PLACEHOLDER_EXPIRES_DAYS,
        )
        .map_err(snippet_err_to_status)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "create task join error");
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    tracing::info!(id, "snippet created");
    Ok(Redirect::to(&format!("/snippet?id={id}")))
}

//! snipshare server library logic.

pub mod config;
pub mod pages;
pub mod render;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use render::Renderer;
use serde_json::{json, Value};
use snipshare_db::DbPool;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Application state shared across all request handlers.
///
/// Constructed once at startup and injected into every handler; tests build
/// one over a scratch database and drive the router directly.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// HTML rendering collaborator.
    pub renderer: Renderer,
    /// Directory served under `/static`.
    pub static_dir: String,
}

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load balancers,
/// monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
///
/// Dispatch is exact-match: a path outside the table (and outside
/// `/static`) falls through to the router's 404, and a non-POST request to
/// `/snippet/create` is answered 405 with an `Allow` header by the method
/// router. No handler carries its own path or method guard.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(pages::home_handler))
        .route("/snippet", get(pages::show_handler))
        .route("/snippet/create", post(pages::create_handler))
        .route("/health", get(health));

    // Serve stylesheets and other assets under /static/* with the prefix
    // stripped before filesystem lookup.
    let static_dir = state.static_dir.clone();
    let router = if std::path::Path::new(&static_dir).is_dir() {
        tracing::info!(path = %static_dir, "serving static assets at /static");
        router.nest_service("/static", ServeDir::new(&static_dir))
    } else {
        tracing::warn!(path = %static_dir, "static asset directory not found, /static disabled");
        router
    };

    router.layer(Extension(Arc::new(state)))
}

#![forbid(unsafe_code)]

//! HTTP surface over a directory of pre-computed analysis reports.
//!
//! Two route families share one [`ReportStore`]: the JSON API
//! (`/api/results`, `/api/results/:name`) serves the report files as typed
//! data, and the HTML pages (`/`, `/:name`) render them into static shells
//! by token substitution.

pub mod config;
pub mod errors;
mod handlers;
pub mod store;
pub mod template;

pub use config::ServerConfig;
pub use errors::{ApiError, ApiErrorCode};
pub use store::ReportStore;
pub use template::HtmlShells;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub const CRATE_NAME: &str = "levelboard-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReportStore>,
    pub shells: Arc<HtmlShells>,
}

impl AppState {
    #[must_use]
    pub fn new(store: ReportStore, shells: HtmlShells) -> Self {
        Self {
            store: Arc::new(store),
            shells: Arc::new(shells),
        }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            ReportStore::new(&config.results_dir),
            HtmlShells::load(config.assets_dir.as_deref()),
        )
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route("/api/results", get(handlers::list_results_handler))
        .route("/api/results/:name", get(handlers::get_result_handler))
        .route("/", get(handlers::home_page_handler))
        .route("/:name", get(handlers::repo_page_handler))
        .with_state(state)
}

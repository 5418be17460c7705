// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use crate::template::{render_home_page, render_repo_page};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use levelboard_model::{RepoReport, ReportSummary};

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub(crate) async fn list_results_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportSummary>>, ApiError> {
    Ok(Json(state.store.list_summaries()?))
}

pub(crate) async fn get_result_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RepoReport>, ApiError> {
    Ok(Json(state.store.load(&name)?))
}

pub(crate) async fn home_page_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, ApiError> {
    let names: Vec<String> = state
        .store
        .list_summaries()?
        .into_iter()
        .map(|summary| summary.name)
        .collect();
    Ok(Html(render_home_page(&state.shells.home, &names)))
}

pub(crate) async fn repo_page_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, ApiError> {
    let report = state.store.load(&name)?;
    Ok(Html(render_repo_page(&state.shells.repo, &report)))
}

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use super::dto::SubmitApplicationRequest;
use super::repo_types::{Application, Statistics};
use crate::state::AppState;

const SUBMITTED: &str = "Application submitted";

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/applications", post(submit_application))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/statistics", get(get_statistics))
        .route("/user-applications", get(list_applications))
}

/// POST /applications
///
/// An undecodable body (missing `name`, wrong types) is reported like any
/// other storage failure: a 500 with the error message.
#[instrument(skip(state, payload))]
pub async fn submit_application(
    State(state): State<AppState>,
    payload: Result<Json<SubmitApplicationRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    let Json(payload) = payload.map_err(|e| {
        error!(error = %e, "error submitting application");
        internal(e)
    })?;

    let app = match state.store.submit(payload.into()).await {
        Ok(a) => a,
        Err(e) => {
            error!(error = %e, "error submitting application");
            return Err(internal(e));
        }
    };

    info!(id = app.id, status = %app.status, loan_amount = app.loan_amount, "application submitted");
    Ok((StatusCode::OK, SUBMITTED))
}

#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<Statistics>, (StatusCode, String)> {
    let stats = state.store.statistics().await.map_err(|e| {
        error!(error = %e, "error fetching statistics");
        internal(e)
    })?;
    Ok(Json(stats))
}

#[instrument(skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Application>>, (StatusCode, String)> {
    let apps = state.store.list().await.map_err(|e| {
        error!(error = %e, "error fetching user applications");
        internal(e)
    })?;
    Ok(Json(apps))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Server error: {}", e),
    )
}

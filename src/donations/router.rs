use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{DonationDraft, DonationId, DonorId, NgoId};
use super::service::{DonationLifecycleManager, DonationServiceError};

type SharedManager = Arc<DonationLifecycleManager>;

/// Router builder exposing donation endpoints.
pub fn donation_router(manager: SharedManager) -> Router {
    Router::new()
        .route("/api/donations", get(list_handler))
        .route(
            "/api/donations/donor/:donor_id",
            post(create_handler).get(list_by_donor_handler),
        )
        .route(
            "/api/donations/:donation_id/donor/:donor_id",
            put(update_handler),
        )
        .route("/api/donations/ngo/:ngo_id", get(list_by_ngo_handler))
        .with_state(manager)
}

impl DonationServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DonationServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            DonationServiceError::NotAllowed => StatusCode::FORBIDDEN,
            DonationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(err: DonationServiceError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        error!(error = %err, "donation request failed");
    }
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler(
    State(manager): State<SharedManager>,
    Path(donor_id): Path<i32>,
    axum::Json(payload): axum::Json<DonationDraft>,
) -> Response {
    match manager.create_donation(DonorId(donor_id), payload) {
        Ok(donation) => (StatusCode::CREATED, axum::Json(donation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler(
    State(manager): State<SharedManager>,
    Path((donation_id, donor_id)): Path<(i32, i32)>,
    axum::Json(payload): axum::Json<DonationDraft>,
) -> Response {
    match manager.update_donation(DonationId(donation_id), DonorId(donor_id), payload) {
        Ok(donation) => (StatusCode::OK, axum::Json(donation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler(State(manager): State<SharedManager>) -> Response {
    match manager.list_all() {
        Ok(donations) => (StatusCode::OK, axum::Json(donations)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_by_donor_handler(
    State(manager): State<SharedManager>,
    Path(donor_id): Path<i32>,
) -> Response {
    match manager.list_by_donor(DonorId(donor_id)) {
        Ok(donations) => (StatusCode::OK, axum::Json(donations)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_by_ngo_handler(
    State(manager): State<SharedManager>,
    Path(ngo_id): Path<i32>,
) -> Response {
    match manager.list_by_ngo(NgoId(ngo_id)) {
        Ok(donations) => (StatusCode::OK, axum::Json(donations)).into_response(),
        Err(err) => error_response(err),
    }
}

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::error;

use super::auth::{authenticate, AuthError, TokenVerifier};
use super::domain::ComplaintSubmission;
use super::repository::ComplaintRepository;
use super::scoring::CompletionClient;
use super::service::{ComplaintService, ComplaintServiceError};

/// Shared state behind the complaint routes.
pub struct ComplaintState<R, C, V> {
    service: Arc<ComplaintService<R, C>>,
    verifier: Arc<V>,
}

impl<R, C, V> Clone for ComplaintState<R, C, V> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            verifier: Arc::clone(&self.verifier),
        }
    }
}

/// Router builder exposing the shared `/complaints` resource: POST for
/// intake, GET for role-scoped retrieval.
pub fn complaint_router<R, C, V>(
    service: Arc<ComplaintService<R, C>>,
    verifier: Arc<V>,
) -> Router
where
    R: ComplaintRepository + 'static,
    C: CompletionClient + 'static,
    V: TokenVerifier + 'static,
{
    Router::new()
        .route(
            "/complaints",
            post(create_complaint_handler::<R, C, V>).get(list_complaints_handler::<R, C, V>),
        )
        .with_state(ComplaintState { service, verifier })
}

/// Intake endpoint. The gate runs before the body is even considered, so an
/// unauthenticated request never touches classification, scoring, or storage.
async fn create_complaint_handler<R, C, V>(
    State(state): State<ComplaintState<R, C, V>>,
    headers: HeaderMap,
    payload: Result<Json<ComplaintSubmission>, JsonRejection>,
) -> Response
where
    R: ComplaintRepository + 'static,
    C: CompletionClient + 'static,
    V: TokenVerifier + 'static,
{
    let identity = match authenticate(state.verifier.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthorized(err),
    };

    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(_) => return validation_failed(),
    };

    match state.service.submit(&identity.user_id, submission).await {
        Ok(complaint) => (StatusCode::OK, Json(complaint)).into_response(),
        Err(ComplaintServiceError::Validation(_)) => validation_failed(),
        Err(err) => {
            error!(error = %err, "complaint intake failed");
            internal_error()
        }
    }
}

/// Retrieval endpoint. Role resolution and the per-role ordering policy live
/// in the service; this handler only maps outcomes to the wire contract.
async fn list_complaints_handler<R, C, V>(
    State(state): State<ComplaintState<R, C, V>>,
    headers: HeaderMap,
) -> Response
where
    R: ComplaintRepository + 'static,
    C: CompletionClient + 'static,
    V: TokenVerifier + 'static,
{
    let identity = match authenticate(state.verifier.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthorized(err),
    };

    match state.service.list_for(&identity.user_id) {
        Ok(complaints) => (StatusCode::OK, Json(complaints)).into_response(),
        Err(ComplaintServiceError::UserNotFound) => {
            message_response(StatusCode::NOT_FOUND, "User not found")
        }
        Err(err) => {
            error!(error = %err, "complaint retrieval failed");
            internal_error()
        }
    }
}

fn unauthorized(err: AuthError) -> Response {
    let message = match err {
        AuthError::MissingToken => "Authentication required",
        AuthError::InvalidToken => "Invalid token",
    };
    message_response(StatusCode::UNAUTHORIZED, message)
}

fn validation_failed() -> Response {
    message_response(StatusCode::BAD_REQUEST, "Title and description are required")
}

fn internal_error() -> Response {
    message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

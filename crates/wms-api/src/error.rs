//! API error type, request extractors that reject through it, and the
//! [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::{
    FromRequest, FromRequestParts,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] wms_core::Error),

  /// The request itself could not be read: bad JSON, bad path or query.
  #[error("invalid request: {0}")]
  BadRequest(String),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    use wms_core::Error as E;
    match self {
      ApiError::Core(E::NotFound { .. }) => StatusCode::NOT_FOUND,
      ApiError::Core(E::Validation(_) | E::InsufficientStock { .. })
      | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Core(E::BackendUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Core(E::Inconsistent { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = self.to_string();
    if status.is_server_error() {
      error!(%status, error = %message, "request failed");
    } else {
      debug!(%status, error = %message, "request rejected");
    }
    (status, Json(json!({ "success": false, "error": message }))).into_response()
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// [`axum::Json`] whose rejection is a JSON [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Body<T>(pub T);

/// [`axum::extract::Path`] whose rejection is a JSON [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathId<T>(pub T);

/// [`axum::extract::Query`] whose rejection is a JSON [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Params<T>(pub T);

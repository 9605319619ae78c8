/**
 * Error Conversion
 *
 * Converts backend errors into HTTP responses. Every error body has the
 * same shape:
 *
 * ```json
 * {
 *   "error": "Receiver ID and message are required",
 *   "status": 400
 * }
 * ```
 *
 * Server-side failures are logged here, at the request boundary, so that
 * handlers can simply propagate with `?`.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

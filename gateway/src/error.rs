use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use product_core::ClientError;
use thiserror::Error;
use tracing::error;

/// Everything a controller operation can fail with, already tied to the
/// status it answers with.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("resource key must not be empty")]
    MissingKey,

    #[error("resource not found")]
    NotFound,

    #[error("downstream answered with status {status}")]
    Upstream { status: u16 },

    #[error("downstream call failed: {0}")]
    Client(#[from] ClientError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingKey => StatusCode::BAD_REQUEST,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::Upstream { .. } | GatewayError::Client(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(error = %msg, "downstream failure");
        }
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

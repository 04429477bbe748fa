use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::observability::STORE_ERRORS_TOTAL;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }

    /// Map a store failure to its HTTP shape. Anything other than `NotFound`
    /// is a server fault: logged and counted against `store`.
    pub fn from_service(store: &'static str, e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Storage(_) | ServiceError::Corrupt(_) => {
                STORE_ERRORS_TOTAL.with_label_values(&[store]).inc();
                error!(store, err = %e, "store operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(e.to_string()))
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let title = status.canonical_reason().unwrap_or("Bad Request");
        Self::new(status, title, Some(rejection.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.error, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("environment check failed: {0}")]
    Environment(String),
    #[error("cannot open store: {0}")]
    Store(#[from] ServiceError),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

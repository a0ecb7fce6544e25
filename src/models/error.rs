use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;
use thiserror::Error as ThisError;

/// Error returned to HTTP callers.
#[derive(Debug)]
pub struct Error {
    code: StatusCode,
    body: Json<Value>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(json!({"message": message})),
        }
    }

    /// Validation failures use an `error` field instead of `message`.
    pub fn bad_request(message: &str) -> Self {
        Self {
            code: StatusCode::BAD_REQUEST,
            body: Json(json!({"error": message})),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

/// Ways an upstream news request can fail. None of them reach HTTP callers.
#[derive(Debug, ThisError)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream returned an empty body")]
    EmptyBody,

    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>` (or a [`StyledError`] when
//! the route has its own error wording), which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! **Security note:** Internal errors (database, password hashing) are logged
//! with full detail but only a generic message is returned to the caller so
//! that SQL, file paths, or hash details never leak to clients.  Extractor
//! rejections keep their status code but their text is replaced as well.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nyay_core::CoreError;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, warn};

/// All errors that can occur in the nyay-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the domain layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request was refused while reading or decoding it.  `detail` is
    /// only logged.
    #[error("request rejected ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },
}

/// Wording of error bodies.
///
/// `key` names the JSON field that carries the message, `internal` is the
/// text sent with every 5xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorStyle {
    pub key: &'static str,
    pub internal: &'static str,
}

impl ErrorStyle {
    pub const DEFAULT: Self = Self {
        key: "error",
        internal: "internal server error",
    };

    /// `POST /auth/login` reports failures under `message`.
    pub const LOGIN: Self = Self {
        key: "message",
        internal: "Login failed.",
    };

    /// `POST /chat/messages`.
    pub const LOG_MESSAGE: Self = Self {
        key: "error",
        internal: "Internal server error: Failed to process and store messages.",
    };

    /// Style for errors raised outside a handler, e.g. by middleware.
    pub fn for_path(path: &str) -> Self {
        match path {
            "/auth/login" => Self::LOGIN,
            "/chat/messages" => Self::LOG_MESSAGE,
            _ => Self::DEFAULT,
        }
    }
}

/// A [`ServerError`] rendered with a route-specific [`ErrorStyle`].
#[derive(Debug)]
pub struct StyledError {
    style: ErrorStyle,
    error: ServerError,
}

impl ServerError {
    pub fn styled(self, style: ErrorStyle) -> StyledError {
        StyledError { style, error: self }
    }

    fn render(self, style: ErrorStyle) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Core(CoreError::Validation(m)) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Core(CoreError::NotFound(m)) => (StatusCode::NOT_FOUND, m.clone()),
            ServerError::Core(CoreError::Unauthorized(m)) => (StatusCode::UNAUTHORIZED, m.clone()),

            ServerError::Rejected { status, detail } => {
                warn!(status = status.as_u16(), detail = %detail, "request rejected");
                (*status, rejection_message(*status).to_owned())
            }

            // Internal errors: log the full detail, return a generic message.
            ServerError::Core(e) => {
                error!(error = %e, "request failed in domain layer");
                (StatusCode::INTERNAL_SERVER_ERROR, style.internal.to_owned())
            }
        };

        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(false));
        body.insert(style.key.into(), Value::String(client_message));
        (status, Json(Value::Object(body))).into_response()
    }
}

fn rejection_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large.",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Expected a JSON request body.",
        _ => "Malformed request.",
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.render(ErrorStyle::DEFAULT)
    }
}

impl IntoResponse for StyledError {
    fn into_response(self) -> Response {
        self.error.render(self.style)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

//! Per-request trace IDs and request / response logging.
//!
//! Every request runs inside an `http_request` span carrying a trace ID taken
//! from the `x-trace-id` header (or freshly generated) and echoed back on the
//! response.  Request bodies are read up to [`MAX_REQUEST_BODY`] bytes;
//! anything larger is refused with 413 before a handler runs.  Small JSON
//! bodies are logged; bodies on `/auth/` paths are never logged because they
//! carry passwords.

use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{ErrorStyle, ServerError};

pub static X_TRACE_ID: &str = "x-trace-id";

/// Largest JSON body that is written to the log verbatim.
const MAX_LOGGED_BODY: usize = 1024;

/// Largest request body accepted; matches axum's default body limit.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let redact = is_sensitive(&path);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %path,
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let response = match read_request_body(body).await {
            Ok(req_bytes) => {
                log_body("request", &parts.headers, &req_bytes, redact);
                let mut req = Request::from_parts(parts, Body::from(req_bytes));
                if let Some(value) = &header_value {
                    req.headers_mut().insert(X_TRACE_ID, value.clone());
                }
                next.run(req).await
            }
            Err(e) => e.styled(ErrorStyle::for_path(&path)).into_response(),
        };

        let (parts, body) = response.into_parts();
        let res_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "failed to buffer response body");
                Bytes::new()
            }
        };
        log_body("response", &parts.headers, &res_bytes, redact);
        let mut response = Response::from_parts(parts, Body::from(res_bytes));
        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

fn is_sensitive(path: &str) -> bool {
    path.starts_with("/auth/")
}

/// Buffer the request body, refusing anything over [`MAX_REQUEST_BODY`].
async fn read_request_body(body: Body) -> Result<Bytes, ServerError> {
    match Limited::new(body, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            let status = if e.is::<LengthLimitError>() {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::BAD_REQUEST
            };
            Err(ServerError::Rejected {
                status,
                detail: e.to_string(),
            })
        }
    }
}

/// Log the body when it is small JSON and not redacted.
fn log_body(direction: &str, headers: &header::HeaderMap, bytes: &Bytes, redact: bool) {
    if bytes.is_empty() {
        return;
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if redact {
        info!("{} body: [redacted, size={}]", direction, bytes.len());
    } else if content_type.contains("application/json") && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            info!("{} body: {}", direction, text);
        }
    } else {
        info!("{} body: [skipped, type={}, size={}]", direction, content_type, bytes.len());
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

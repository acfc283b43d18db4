//! Login route.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use nyay_core::services::auth;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::{ErrorStyle, ServerError, StyledError};
use crate::schemas::auth::{LoginRequest, LoginResponse, UserResponse};
use crate::state::AppState;

const MISSING_CREDENTIALS: &str = "Email and password are required.";

#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(schemas(LoginRequest, LoginResponse, UserResponse))
)]
pub struct AuthApi;

/// Register auth routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}

/// Verify email and password (`POST /auth/login`).
///
/// No session or token is issued; the caller only learns whether the
/// credentials are valid and gets the sanitized profile back.  Failures are
/// reported as `{"success": false, "message": "..."}`.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Login failed"),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, StyledError> {
    check_credentials(&state, payload)
        .await
        .map_err(|e| e.styled(ErrorStyle::LOGIN))
}

async fn check_credentials(
    state: &AppState,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ServerError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|_| ServerError::BadRequest(MISSING_CREDENTIALS.into()))?;

    let email = req.email.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();
    let profile = auth::login(state.store.as_ref(), email, password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful.".into(),
        user: profile.into(),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use nyay_core::entities::{UserRecord, UserStore};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes;
    use crate::state::test_state;

    async fn seeded_app() -> axum::Router {
        let state = test_state().await;
        state
            .store
            .insert_user(UserRecord {
                id: "u-1".into(),
                email: "mj@firm.in".into(),
                name: Some("Meera Joshi".into()),
                password_hash: nyay_core::services::auth::hash_password("s3cret".into(), 4)
                    .await
                    .unwrap(),
                otp: Some("112233".into()),
                otp_expires_at: Some(Utc::now()),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        routes::build(state)
    }

    async fn post_login(app: axum::Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post("/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn valid_credentials_return_sanitized_user() {
        let (status, body) =
            post_login(seeded_app().await, json!({ "email": "mj@firm.in", "password": "s3cret" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "mj@firm.in");
        let user = body["user"].as_object().unwrap();
        for secret in ["password_hash", "passwordHash", "otp", "otp_expires_at", "otpExpiresAt"] {
            assert!(!user.contains_key(secret), "{secret} leaked");
        }
    }

    #[tokio::test]
    async fn wrong_password_is_401() {
        let (status, body) =
            post_login(seeded_app().await, json!({ "email": "mj@firm.in", "password": "nope" })).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid password.");
    }

    #[tokio::test]
    async fn unknown_user_is_404_with_message_key() {
        let (status, body) =
            post_login(seeded_app().await, json!({ "email": "x@firm.in", "password": "s3cret" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User not found.");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn backend_failure_reports_login_failed() {
        let state = test_state().await;
        state.store.close().await;
        let (status, body) =
            post_login(routes::build(state), json!({ "email": "mj@firm.in", "password": "s3cret" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Login failed.");
    }

    #[tokio::test]
    async fn missing_or_empty_fields_are_400() {
        for body in [
            json!({ "email": "mj@firm.in" }),
            json!({ "password": "s3cret" }),
            json!({ "email": "", "password": "s3cret" }),
            json!({}),
        ] {
            let (status, resp) = post_login(seeded_app().await, body.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(resp["message"], super::MISSING_CREDENTIALS);
        }
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let response = seeded_app()
            .await
            .oneshot(
                Request::post("/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

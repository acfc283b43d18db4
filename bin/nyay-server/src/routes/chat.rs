//! Message logging and conversation history routes.
//!
//! `POST /chat/messages` records one user message plus the responder's
//! reply.  The two `GET` routes read the log back.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use nyay_core::entities::{normalize_email, ConversationStore, MessageStore};
use nyay_core::services::chat_log::{self, LogMessage};
use tracing::debug;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::{ErrorStyle, ServerError, StyledError};
use crate::schemas::chat::{
    ConversationResponse, ListConversationsQuery, LogMessageRequest, LogMessageResponse,
    MessageResponse,
};
use crate::state::AppState;

const MISSING_FIELDS: &str = "Missing user_email or content.";

#[derive(OpenApi)]
#[openapi(
    paths(log_message, list_conversations, list_conversation_messages),
    components(schemas(
        LogMessageRequest,
        LogMessageResponse,
        ConversationResponse,
        MessageResponse
    ))
)]
pub struct ChatApi;

/// Register chat routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat/messages", post(log_message))
        .route("/chat/conversations", get(list_conversations))
        .route("/chat/conversations/{id}/messages", get(list_conversation_messages))
}

/// Log a user message and the bot reply (`POST /chat/messages`).
#[utoipa::path(
    post,
    path = "/chat/messages",
    tag = "chat",
    request_body = LogMessageRequest,
    responses(
        (status = 200, description = "Messages saved", body = LogMessageResponse),
        (status = 400, description = "Missing user_email or content"),
        (status = 500, description = "Failed to process and store messages"),
    )
)]
pub async fn log_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LogMessageRequest>, JsonRejection>,
) -> Result<Json<LogMessageResponse>, StyledError> {
    record_exchange(&state, payload)
        .await
        .map_err(|e| e.styled(ErrorStyle::LOG_MESSAGE))
}

async fn record_exchange(
    state: &AppState,
    payload: Result<Json<LogMessageRequest>, JsonRejection>,
) -> Result<Json<LogMessageResponse>, ServerError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|_| ServerError::BadRequest(MISSING_FIELDS.into()))?;

    debug!(has_conversation_id = req.conversation_id.is_some(), "logging chat message");

    let exchange = chat_log::log_message(
        state.store.as_ref(),
        state.responder.as_ref(),
        LogMessage {
            user_email: req.user_email.as_deref().unwrap_or_default(),
            content: req.content.as_deref().unwrap_or_default(),
            conversation_id: req.conversation_id.as_deref(),
        },
    )
    .await?;

    Ok(Json(LogMessageResponse {
        bot_response: exchange.bot_response,
        conversation_id: exchange.conversation_id,
        status: exchange.status.to_owned(),
    }))
}

/// A user's conversations, most recently updated first.
#[utoipa::path(
    get,
    path = "/chat/conversations",
    tag = "chat",
    params(("user_email" = String, Query, description = "Owner email")),
    responses(
        (status = 200, description = "Conversation list", body = Vec<ConversationResponse>),
        (status = 400, description = "Missing user_email"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListConversationsQuery>, QueryRejection>,
) -> Result<Json<Vec<ConversationResponse>>, ServerError> {
    let Query(query) = query?;
    let email = query
        .user_email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Missing user_email.".into()))?;

    let conversations = state
        .store
        .list_conversations(&email)
        .await
        .map_err(nyay_core::CoreError::from)?;
    Ok(Json(conversations.into_iter().map(Into::into).collect()))
}

/// Messages of one conversation in the order they were logged.
#[utoipa::path(
    get,
    path = "/chat/conversations/{id}/messages",
    tag = "chat",
    params(("id" = String, Path, description = "Conversation id")),
    responses(
        (status = 200, description = "Conversation messages", body = Vec<MessageResponse>),
        (status = 404, description = "Conversation not found"),
        (status = 500, description = "Backend error"),
    )
)]
pub async fn list_conversation_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MessageResponse>>, ServerError> {
    let store = state.store.as_ref();
    if store
        .get_conversation(&id)
        .await
        .map_err(nyay_core::CoreError::from)?
        .is_none()
    {
        return Err(ServerError::NotFound(format!("conversation {id} not found")));
    }

    let messages = store
        .list_messages(&id)
        .await
        .map_err(nyay_core::CoreError::from)?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

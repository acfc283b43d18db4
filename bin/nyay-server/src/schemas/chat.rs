use nyay_core::entities::{Conversation, Message};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for `POST /chat/messages`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LogMessageRequest {
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub user_email: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(default)]
    pub content: Option<String>,
    /// Existing conversation to append to.  Unknown ids start a new one.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Response body for `POST /chat/messages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogMessageResponse {
    pub bot_response: String,
    pub conversation_id: String,
    pub status: String,
}

/// Query string of `GET /chat/conversations`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListConversationsQuery {
    #[serde(default)]
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationResponse {
    pub id: String,
    pub user_email: String,
    pub start_time: String,
    pub last_updated: String,
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    /// `"user"` or `"chatbot"`.
    pub sender: String,
    pub content: String,
    pub timestamp: String,
}

impl From<Conversation> for ConversationResponse {
    fn from(c: Conversation) -> Self {
        Self {
            id: c.id,
            user_email: c.user_email,
            start_time: c.start_time.to_rfc3339(),
            last_updated: c.last_updated.to_rfc3339(),
            topic: c.topic,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            conversation_id: m.conversation_id,
            sender: m.sender.to_string(),
            content: m.content,
            timestamp: m.created_at.to_rfc3339(),
        }
    }
}

//! Message logging flow.
//!
//! One call records one exchange: the user's message and the responder's
//! reply, both appended to a conversation that is reused when the caller
//! names an existing one and created otherwise.  The writes are issued one
//! after another with no surrounding transaction; a failure part-way leaves
//! the earlier writes in place and is reported to the caller.

use chrono::Utc;
use tracing::{debug, info};

use crate::entities::{Conversation, ConversationStore, Message, MessageStore, Sender};
use crate::error::CoreError;
use crate::responder::Responder;

/// Status text returned with every successfully logged exchange.
pub const SAVED_STATUS: &str = "Messages successfully saved.";

/// Inputs of a single logging call.
#[derive(Debug, Clone, Copy)]
pub struct LogMessage<'a> {
    pub user_email: &'a str,
    pub content: &'a str,
    /// Conversation to append to.  Unknown or malformed ids start a new one.
    pub conversation_id: Option<&'a str>,
}

/// Outcome of a logged exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedExchange {
    pub bot_response: String,
    pub conversation_id: String,
    /// `true` when this call started the conversation.
    pub created_conversation: bool,
    pub status: &'static str,
}

/// Store the user's message, compute and store the reply, bump the
/// conversation's `last_updated`.
pub async fn log_message<S, R>(
    store: &S,
    responder: &R,
    req: LogMessage<'_>,
) -> Result<LoggedExchange, CoreError>
where
    S: ConversationStore + MessageStore,
    R: Responder + ?Sized,
{
    if req.user_email.trim().is_empty() || req.content.is_empty() {
        return Err(CoreError::Validation("Missing user_email or content.".into()));
    }

    let existing = match req.conversation_id.filter(|id| !id.is_empty()) {
        Some(id) => {
            let found = store.get_conversation(id).await?;
            if found.is_none() {
                debug!(conversation_id = %id, "conversation not found; starting a new one");
            }
            found
        }
        None => None,
    };

    let (conversation_id, created_conversation) = match existing {
        Some(conversation) => (conversation.id, false),
        None => {
            let conversation = Conversation::start(req.user_email, Utc::now());
            let id = conversation.id.clone();
            store.create_conversation(conversation).await?;
            info!(conversation_id = %id, "conversation started");
            (id, true)
        }
    };

    store
        .append_message(Message::new(&conversation_id, Sender::User, req.content))
        .await?;

    let bot_response = responder.respond(req.content);

    store
        .append_message(Message::new(&conversation_id, Sender::Chatbot, bot_response.clone()))
        .await?;

    store.touch_conversation(&conversation_id, Utc::now()).await?;

    debug!(conversation_id = %conversation_id, created_conversation, "exchange logged");

    Ok(LoggedExchange {
        bot_response,
        conversation_id,
        created_conversation,
        status: SAVED_STATUS,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

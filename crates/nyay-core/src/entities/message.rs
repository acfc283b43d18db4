use std::future::Future;

use tracing::warn;

use super::{decode_ts, encode_ts, SqliteStore};
use crate::entities::dao::{Message, Sender};

pub trait MessageStore: Send + Sync + 'static {
    fn append_message(&self, msg: Message) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Messages of one conversation, oldest first; equal timestamps keep
    /// insertion order.
    fn list_messages(
        &self,
        conversation_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, sqlx::Error>> + Send;
}

impl MessageStore for SqliteStore {
    async fn append_message(&self, msg: Message) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO messages (id, conversation_id, sender, content, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&msg.id)
        .bind(&msg.conversation_id)
        .bind(msg.sender.to_string())
        .bind(&msg.content)
        .bind(encode_ts(&msg.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, sqlx::Error> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, conversation_id, sender, content, created_at \
             FROM messages WHERE conversation_id = ?1 ORDER BY created_at ASC, rowid ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(id, conversation_id, sender, content, created_at)| {
                let sender = match sender.parse::<Sender>() {
                    Ok(s) => s,
                    Err(_) => {
                        warn!(message_id = %id, raw = %sender, "skipping message with unknown sender");
                        return None;
                    }
                };
                Some(Message {
                    id,
                    conversation_id,
                    sender,
                    content,
                    created_at: decode_ts(&created_at, "created_at"),
                })
            })
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

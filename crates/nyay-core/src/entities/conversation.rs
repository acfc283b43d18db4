use std::future::Future;

use chrono::{DateTime, Utc};

use super::{decode_ts, encode_ts, SqliteStore};
use crate::entities::dao::Conversation;

type ConversationRow = (String, String, String, String, Option<String>);

pub trait ConversationStore: Send + Sync + 'static {
    fn create_conversation(
        &self,
        conversation: Conversation,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn get_conversation(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Conversation>, sqlx::Error>> + Send;

    /// Advance `last_updated` to `at`.  An older `at` leaves the row as is.
    fn touch_conversation(
        &self,
        id: &str,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Conversations owned by `user_email`, most recently updated first.
    fn list_conversations(
        &self,
        user_email: &str,
    ) -> impl Future<Output = Result<Vec<Conversation>, sqlx::Error>> + Send;
}

impl ConversationStore for SqliteStore {
    async fn create_conversation(&self, conversation: Conversation) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO conversations (id, user_email, start_time, last_updated, topic) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&conversation.id)
        .bind(&conversation.user_email)
        .bind(encode_ts(&conversation.start_time))
        .bind(encode_ts(&conversation.last_updated))
        .bind(&conversation.topic)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, sqlx::Error> {
        let row: Option<ConversationRow> = sqlx::query_as(
            "SELECT id, user_email, start_time, last_updated, topic \
             FROM conversations WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(conversation_from_row))
    }

    async fn touch_conversation(&self, id: &str, at: DateTime<Utc>) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE conversations SET last_updated = MAX(last_updated, ?1) WHERE id = ?2",
        )
        .bind(encode_ts(&at))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_conversations(&self, user_email: &str) -> Result<Vec<Conversation>, sqlx::Error> {
        let rows: Vec<ConversationRow> = sqlx::query_as(
            "SELECT id, user_email, start_time, last_updated, topic \
             FROM conversations WHERE user_email = ?1 ORDER BY last_updated DESC",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(conversation_from_row).collect())
    }
}

fn conversation_from_row(
    (id, user_email, start_time, last_updated, topic): ConversationRow,
) -> Conversation {
    Conversation {
        id,
        user_email,
        start_time: decode_ts(&start_time, "start_time"),
        last_updated: decode_ts(&last_updated, "last_updated"),
        topic,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn create_then_get_round_trips_normalised_owner() {
        let store = SqliteStore::in_memory().await.unwrap();
        let conversation = Conversation::start("  Advocate@Example.COM ", Utc::now());
        store.create_conversation(conversation.clone()).await.unwrap();

        let loaded = store.get_conversation(&conversation.id).await.unwrap().unwrap();
        assert_eq!(loaded.user_email, "advocate@example.com");
        assert_eq!(loaded.topic, None);
        assert!(store.get_conversation("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn touch_never_moves_last_updated_backwards() {
        let store = SqliteStore::in_memory().await.unwrap();
        let start = Utc::now();
        let conversation = Conversation::start("a@b.c", start);
        store.create_conversation(conversation.clone()).await.unwrap();

        let later = start + Duration::seconds(5);
        store.touch_conversation(&conversation.id, later).await.unwrap();
        store
            .touch_conversation(&conversation.id, start - Duration::seconds(60))
            .await
            .unwrap();

        let loaded = store.get_conversation(&conversation.id).await.unwrap().unwrap();
        assert_eq!(loaded.last_updated.timestamp_micros(), later.timestamp_micros());
        assert!(loaded.last_updated >= loaded.start_time);
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner_and_newest_first() {
        let store = SqliteStore::in_memory().await.unwrap();
        let now = Utc::now();
        let older = Conversation::start("a@b.c", now - Duration::minutes(10));
        let newer = Conversation::start("a@b.c", now);
        let other = Conversation::start("x@y.z", now);
        for c in [&older, &newer, &other] {
            store.create_conversation(c.clone()).await.unwrap();
        }

        let listed = store.list_conversations("a@b.c").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);
    }
}

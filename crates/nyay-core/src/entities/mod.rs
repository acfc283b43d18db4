//! Persistence layer.
//!
//! [`SqliteStore`] owns the sqlx connection pool and implements every store
//! trait ([`ConversationStore`], [`MessageStore`], [`UserStore`]).  Handlers
//! and services only ever see the traits, so a test double or another
//! database can be substituted without touching the request flows.
//!
//! All trait methods use `impl Future` in their signatures so no extra
//! `async-trait` crate is required.
//!
//! Timestamps are stored as RFC 3339 text with a fixed microsecond width so
//! that `ORDER BY` on the text column is chronological.

pub mod conversation;
pub mod dao;
pub mod message;
pub mod user;

pub use dao::{normalize_email, Conversation, Message, Sender, UserProfile, UserRecord};

pub use conversation::ConversationStore;
pub use message::MessageStore;
pub use user::UserStore;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use crate::error::CoreError;

/// SQLite-backed store handle.  Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://nyay.db"`.
    /// Use [`SqliteStore::in_memory`] for throwaway databases.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    /// A private in-memory database.
    ///
    /// Pinned to a single connection that is never recycled: every SQLite
    /// `:memory:` connection is its own database.
    pub async fn in_memory() -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, CoreError> {
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
        Ok(Self { pool })
    }

    /// Close every pooled connection.  Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

pub(crate) fn encode_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_ts(raw: &str, field: &'static str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        warn!(raw = %raw, field, error = %e, "failed to parse stored timestamp; using now");
        Utc::now()
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

use std::future::Future;

use super::{decode_ts, encode_ts, SqliteStore};
use crate::entities::dao::UserRecord;

type UserRow = (String, String, Option<String>, String, Option<String>, Option<String>, String);

pub trait UserStore: Send + Sync + 'static {
    /// Exact, case-sensitive match on `email`.
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, sqlx::Error>> + Send;

    /// Operator provisioning only; the HTTP surface never writes users.
    fn insert_user(&self, user: UserRecord) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

impl UserStore for SqliteStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, name, password_hash, otp, otp_expires_at, created_at \
             FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(
            |(id, email, name, password_hash, otp, otp_expires_at, created_at)| UserRecord {
                id,
                email,
                name,
                password_hash,
                otp,
                otp_expires_at: otp_expires_at.map(|raw| decode_ts(&raw, "otp_expires_at")),
                created_at: decode_ts(&created_at, "created_at"),
            },
        ))
    }

    async fn insert_user(&self, user: UserRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (id, email, name, password_hash, otp, otp_expires_at, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.otp)
        .bind(user.otp_expires_at.as_ref().map(encode_ts))
        .bind(encode_ts(&user.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

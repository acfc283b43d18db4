//! Credential check and operator user provisioning.
//!
//! Password hashes are bcrypt strings.  Hashing and verification are CPU
//! bound, so both run on tokio's blocking pool.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{UserProfile, UserRecord, UserStore};
use crate::error::CoreError;

/// Verify `email` / `password` and return the sanitized profile.
///
/// The lookup is an exact match on the stored email.  No session or token is
/// created here.
pub async fn login<S: UserStore>(
    store: &S,
    email: &str,
    password: &str,
) -> Result<UserProfile, CoreError> {
    if email.is_empty() || password.is_empty() {
        return Err(CoreError::Validation("Email and password are required.".into()));
    }

    let Some(user) = store.find_user_by_email(email).await? else {
        return Err(CoreError::NotFound("User not found.".into()));
    };

    if !verify_password(password.to_owned(), user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login rejected: password mismatch");
        return Err(CoreError::Unauthorized("Invalid password.".into()));
    }

    info!(user_id = %user.id, "login succeeded");
    Ok(user.into())
}

/// Create a user with a freshly hashed password.
pub async fn provision_user<S: UserStore>(
    store: &S,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<UserProfile, CoreError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(CoreError::Validation("Email and password are required.".into()));
    }

    if store.find_user_by_email(email).await?.is_some() {
        return Err(CoreError::Validation(format!("user {email} already exists")));
    }

    let password_hash = hash_password(password.to_owned(), bcrypt::DEFAULT_COST).await?;
    let record = UserRecord {
        id: Uuid::new_v4().to_string(),
        email: email.to_owned(),
        name: name.map(str::to_owned),
        password_hash,
        otp: None,
        otp_expires_at: None,
        created_at: Utc::now(),
    };

    // A concurrent insert can still win the race after the lookup above.
    match store.insert_user(record.clone()).await {
        Ok(()) => {}
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(CoreError::Validation(format!("user {email} already exists")));
        }
        Err(e) => return Err(e.into()),
    }

    info!(user_id = %record.id, "user provisioned");
    Ok(record.into())
}

pub async fn hash_password(password: String, cost: u32) -> Result<String, CoreError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| CoreError::Internal(format!("password hashing task failed: {e}")))?
        .map_err(CoreError::from)
}

async fn verify_password(password: String, hash: String) -> Result<bool, CoreError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| CoreError::Internal(format!("password verification task failed: {e}")))?
        .map_err(CoreError::from)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

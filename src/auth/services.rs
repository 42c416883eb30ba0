use sqlx::SqliteConnection;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::auth::password::{hash_password, verify_dummy, verify_password};
use crate::auth::repo_types::User;
use crate::session::SessionData;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already exists")]
    DuplicateUsername,

    /// Unknown user and wrong password are deliberately the same error.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(anyhow::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub async fn register(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let hash = hash_password(password).map_err(AuthError::Hashing)?;
    match User::create(conn, username, &hash).await {
        Ok(user) => {
            debug!(user_id = user.id, "user row inserted");
            Ok(user)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(%username, "username already registered");
            Err(AuthError::DuplicateUsername)
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks a username/password pair against the stored hash.
pub async fn authenticate(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let Some(user) = User::find_by_username(conn, username).await? else {
        verify_dummy(password);
        warn!(%username, "login unknown username");
        return Err(AuthError::InvalidCredentials);
    };

    let ok = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
        error!(error = %e, user_id = user.id, "stored password hash is unreadable");
        false
    });
    if !ok {
        warn!(%username, user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }
    Ok(user)
}

/// Authenticates and, on success, marks the session as logged in.
pub async fn login(
    conn: &mut SqliteConnection,
    session: &mut SessionData,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let user = authenticate(conn, username, password).await?;
    session.log_in(user.username.clone());
    Ok(user)
}

pub fn logout(session: &mut SessionData) {
    session.log_out();
}

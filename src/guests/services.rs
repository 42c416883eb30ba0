use sqlx::SqliteConnection;
use thiserror::Error;
use tracing::debug;

use crate::guests::repo;
use crate::guests::repo_types::{Guest, GuestInput};

#[derive(Debug, Error)]
pub enum GuestError {
    #[error("guest {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Inserts when `id` is `None`, otherwise overwrites every field of the
/// existing record.
pub async fn upsert(
    conn: &mut SqliteConnection,
    input: &GuestInput,
    id: Option<i64>,
) -> Result<Guest, GuestError> {
    match id {
        Some(id) => repo::update(conn, id, input)
            .await?
            .ok_or(GuestError::NotFound(id)),
        None => Ok(repo::insert(conn, input).await?),
    }
}

/// Deleting a missing id is not an error.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), GuestError> {
    let deleted = repo::delete(conn, id).await?;
    if deleted == 0 {
        debug!(guest_id = id, "delete of missing guest ignored");
    }
    Ok(())
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Guest, GuestError> {
    repo::find(conn, id).await?.ok_or(GuestError::NotFound(id))
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Staff account in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String, // argon2 PHC string
}

use crate::auth::repo_types::User;
use sqlx::SqliteConnection;

impl User {
    /// Exact, case-sensitive lookup.
    pub async fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Insert a new account. Fails with a unique violation when the
    /// username is taken.
    pub async fn create(
        conn: &mut SqliteConnection,
        username: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *conn)
        .await
    }
}

use crate::config::AppConfig;
use crate::db::Database;
use crate::session::SessionKeys;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub session_keys: SessionKeys,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = Database::new(&config.database.url)?;
        db.migrate().await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: Database, config: Arc<AppConfig>) -> Self {
        let session_keys = SessionKeys::new(&config.session);
        Self {
            db,
            config,
            session_keys,
        }
    }

    #[cfg(test)]
    pub fn fake(db: Database) -> Self {
        use crate::config::{DatabaseConfig, SessionConfig};

        let config = Arc::new(AppConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
            },
            session: SessionConfig {
                secret: "test".into(),
                cookie_name: "otel_session".into(),
                secure: false,
            },
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(db, config)
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        state.session_keys.clone()
    }
}

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://otel_yonetim.db".into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub host: String,
    pub port: u16,
}

/// An empty HS256 key would let anyone sign a logged-in session.
fn session_secret(raw: Option<String>) -> anyhow::Result<String> {
    let secret = raw.context("SESSION_SECRET must be set")?;
    if secret.trim().is_empty() {
        anyhow::bail!("SESSION_SECRET must not be blank");
    }
    Ok(secret)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let session = SessionConfig {
            secret: session_secret(std::env::var("SESSION_SECRET").ok())?,
            cookie_name: std::env::var("SESSION_COOKIE").unwrap_or_else(|_| "otel_session".into()),
            secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true")
                .unwrap_or(false),
        };
        let port = std::env::var("PORT")
            .ok()
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("PORT must be a valid port number")?
            .unwrap_or(5000);
        Ok(Self {
            database: DatabaseConfig::from_env(),
            session,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
        })
    }
}

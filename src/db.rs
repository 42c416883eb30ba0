use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteConnection},
    ConnectOptions,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection factory: every handler opens its own connection and drops it
/// when the request is done. No pool is kept.
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("parse database url {url}"))?
            .create_if_missing(true);
        Ok(Self { options })
    }

    #[cfg(test)]
    pub fn from_path(path: &std::path::Path) -> Self {
        Self {
            options: SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        }
    }

    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        let mut conn = self.connect().await.context("connect to database")?;
        MIGRATOR
            .run(&mut conn)
            .await
            .context("run database migrations")?;
        Ok(())
    }
}

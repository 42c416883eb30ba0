use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::db::Database;
use crate::guests::{repo, repo_types::Guest};

pub const EXPORT_FILENAME: &str = "misafir_kayitlari.json";

pub async fn export_all(conn: &mut SqliteConnection) -> Result<Vec<Guest>, sqlx::Error> {
    repo::list_by_id(conn).await
}

/// UTF-8 JSON array, four-space indent, non-ASCII left as is.
pub fn render_document(guests: &[Guest]) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    guests.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes the export document to `path`, returning the number of records.
pub async fn export_to_file(db: &Database, path: &Path) -> anyhow::Result<usize> {
    let mut conn = db.connect().await.context("connect to database")?;
    let guests = export_all(&mut conn).await.context("load guest records")?;
    let document = render_document(&guests)?;
    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("write {}", path.display()))?;
    Ok(guests.len())
}

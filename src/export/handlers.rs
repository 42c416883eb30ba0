use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{info, instrument};

use crate::{
    error::AppError,
    export::services::{export_all, render_document, EXPORT_FILENAME},
    state::AppState,
};

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/export_json", get(export_json))
}

#[instrument(skip_all)]
pub async fn export_json(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let guests = export_all(&mut conn).await?;
    let document = render_document(&guests).map_err(anyhow::Error::from)?;
    info!(records = guests.len(), "guest export");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        document,
    )
        .into_response())
}

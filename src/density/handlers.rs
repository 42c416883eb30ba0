use axum::{extract::State, response::Response, routing::get, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    density::repo::{self, DensityRow},
    error::AppError,
    session::Session,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct DensityReport {
    #[serde(rename = "gunluk_yogunluk")]
    pub daily: Vec<DensityRow>,
    #[serde(rename = "haftalik_yogunluk")]
    pub weekly: Vec<DensityRow>,
    #[serde(rename = "aylik_yogunluk")]
    pub monthly: Vec<DensityRow>,
}

pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/ziyaretci_yogunluk_sayfasi", get(density_page))
}

#[instrument(skip_all)]
pub async fn density_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let report = DensityReport {
        daily: repo::daily(&mut conn).await?,
        weekly: repo::weekly(&mut conn).await?,
        monthly: repo::monthly(&mut conn).await?,
    };
    session.render("ziyaretci_yogunluk", report)
}

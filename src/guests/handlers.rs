use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::AppError,
    guests::{
        dto::{FilterForm, GuestForm, GuestFormPage, GuestListPage},
        filter::GuestFilter,
        repo,
        services::{self, GuestError},
    },
    session::{FlashCategory, Session},
    state::AppState,
};

pub const LIST_PAGE: &str = "/kayitlar_sayfasi";
const NOT_FOUND_MESSAGE: &str = "Misafir bulunamadı.";

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/ziyaretci_kayit_sayfasi", get(new_guest_page))
        .route("/kayit", post(save_guest))
        .route("/kayitlar_sayfasi", get(list_guests))
        .route("/duzenle_ziyaretci/:id", get(edit_guest_page))
        .route("/sil_ziyaretci/:id", post(delete_guest))
        .route("/ziyaretci_filtreleme_sayfasi", get(filter_page))
        .route("/filtreleme", post(filter_guests))
}

#[instrument(skip_all)]
pub async fn new_guest_page(session: Session) -> Result<Response, AppError> {
    session.render("ziyaretci_kayit", GuestFormPage { guest: None })
}

#[instrument(skip_all)]
pub async fn save_guest(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<GuestForm>,
) -> Result<Response, AppError> {
    let id = match form.record_id() {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, raw_id = ?form.id, "unparsable guest id");
            session.flash(FlashCategory::Danger, NOT_FOUND_MESSAGE);
            return session.redirect(LIST_PAGE);
        }
    };

    let mut conn = state.db.connect().await?;
    match services::upsert(&mut conn, &form.into_input(), id).await {
        Ok(guest) if id.is_some() => {
            info!(guest_id = guest.id, "guest updated");
            session.flash(FlashCategory::Success, "Misafir bilgileri başarıyla güncellendi!");
        }
        Ok(guest) => {
            info!(guest_id = guest.id, "guest created");
            session.flash(FlashCategory::Success, "Yeni misafir başarıyla kaydedildi!");
        }
        Err(GuestError::NotFound(id)) => {
            warn!(guest_id = id, "update of missing guest");
            session.flash(FlashCategory::Danger, NOT_FOUND_MESSAGE);
        }
        Err(GuestError::Storage(e)) => return Err(e.into()),
    }
    session.redirect(LIST_PAGE)
}

#[instrument(skip_all)]
pub async fn list_guests(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let guests = repo::list_all(&mut conn).await?;
    session.render("kayitlar", GuestListPage { guests })
}

/// Path ids come from links; anything that is not a number is a missing guest.
fn parse_path_id(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(error = %e, raw_id = raw, "unparsable guest id in path");
            None
        }
    }
}

#[instrument(skip(state, session))]
pub async fn edit_guest_page(
    State(state): State<AppState>,
    mut session: Session,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_path_id(&raw_id) else {
        session.flash(FlashCategory::Danger, NOT_FOUND_MESSAGE);
        return session.redirect(LIST_PAGE);
    };
    let mut conn = state.db.connect().await?;
    match services::get(&mut conn, id).await {
        Ok(guest) => session.render("ziyaretci_kayit", GuestFormPage { guest: Some(guest) }),
        Err(GuestError::NotFound(_)) => {
            session.flash(FlashCategory::Danger, NOT_FOUND_MESSAGE);
            session.redirect(LIST_PAGE)
        }
        Err(GuestError::Storage(e)) => Err(e.into()),
    }
}

#[instrument(skip(state, session))]
pub async fn delete_guest(
    State(state): State<AppState>,
    mut session: Session,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_path_id(&raw_id) else {
        session.flash(FlashCategory::Danger, NOT_FOUND_MESSAGE);
        return session.redirect(LIST_PAGE);
    };
    let mut conn = state.db.connect().await?;
    match services::delete(&mut conn, id).await {
        Ok(()) => {}
        Err(GuestError::Storage(e)) => return Err(e.into()),
        Err(e @ GuestError::NotFound(_)) => return Err(anyhow::Error::new(e).into()),
    }
    info!(guest_id = id, "guest deleted");
    session.flash(FlashCategory::Success, "Misafir kaydı başarıyla silindi.");
    session.redirect(LIST_PAGE)
}

#[instrument(skip_all)]
pub async fn filter_page(session: Session) -> Result<Response, AppError> {
    session.render("ziyaretci_filtreleme", GuestListPage { guests: Vec::new() })
}

#[instrument(skip_all)]
pub async fn filter_guests(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<FilterForm>,
) -> Result<Response, AppError> {
    let filter = GuestFilter::from(&form);
    let mut conn = state.db.connect().await?;
    let guests = repo::filter(&mut conn, &filter).await?;
    info!(hits = guests.len(), "guest filter");
    session.render("ziyaretci_filtreleme", GuestListPage { guests })
}

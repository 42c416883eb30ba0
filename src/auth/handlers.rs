use axum::{
    extract::State,
    response::Response,
    routing::get,
    Extension, Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LandingPage, LoginForm, RegisterForm},
        services::{self, AuthError},
    },
    error::AppError,
    session::{guard::LOGIN_PAGE, CurrentUser, FlashCategory, Session},
    state::AppState,
};

pub const LANDING_PAGE: &str = "/ana_kayitlar";

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page))
        .route("/giris", axum::routing::post(login))
        .route("/kayit_ol", get(register_page).post(register))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/cikis_yap", get(logout))
        .route("/ana_kayitlar", get(landing))
}

#[instrument(skip_all)]
pub async fn login_page(session: Session) -> Result<Response, AppError> {
    if session.data.is_logged_in() {
        return session.redirect(LANDING_PAGE);
    }
    session.render("giris", ())
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    match services::login(&mut conn, &mut session.data, &form.username, &form.password).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user logged in");
            session.flash(FlashCategory::Success, "Başarıyla giriş yaptınız!");
            session.redirect(LANDING_PAGE)
        }
        Err(AuthError::InvalidCredentials) => {
            session.flash(FlashCategory::Danger, "Kullanıcı adı veya şifre yanlış.");
            session.redirect(LOGIN_PAGE)
        }
        Err(AuthError::Storage(e)) => Err(e.into()),
        Err(e) => Err(anyhow::Error::new(e).into()),
    }
}

#[instrument(skip_all)]
pub async fn register_page(session: Session) -> Result<Response, AppError> {
    session.render("kayit_ol", ())
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    match services::register(&mut conn, &form.username, &form.password).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user registered");
            session.flash(
                FlashCategory::Success,
                "Hesabınız başarıyla oluşturuldu. Giriş yapabilirsiniz.",
            );
            session.redirect(LOGIN_PAGE)
        }
        Err(AuthError::DuplicateUsername) => {
            session.flash(FlashCategory::Danger, "Bu kullanıcı adı zaten mevcut.");
            session.redirect("/kayit_ol")
        }
        Err(AuthError::Storage(e)) => Err(e.into()),
        Err(e) => Err(anyhow::Error::new(e).into()),
    }
}

#[instrument(skip_all)]
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
    mut session: Session,
) -> Result<Response, AppError> {
    services::logout(&mut session.data);
    info!(username = %user.username, "user logged out");
    session.flash(FlashCategory::Info, "Başarıyla çıkış yaptınız.");
    session.redirect(LOGIN_PAGE)
}

#[instrument(skip_all)]
pub async fn landing(
    Extension(user): Extension<CurrentUser>,
    session: Session,
) -> Result<Response, AppError> {
    if user.username.is_empty() {
        warn!("logged-in session without username");
    }
    session.render(
        "ana_kayitlar",
        LandingPage {
            username: user.username,
        },
    )
}

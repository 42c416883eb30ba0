use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::dto::{FlashCategory, SessionData};
use super::extractors::Session;

pub const LOGIN_PAGE: &str = "/";

/// Authenticated staff member, inserted as a request extension by
/// [`require_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

pub fn authorize(session: &SessionData) -> Option<CurrentUser> {
    if !session.is_logged_in() {
        return None;
    }
    Some(CurrentUser {
        username: session.username.clone().unwrap_or_default(),
    })
}

/// Middleware in front of every protected route: lets the request through
/// when the session carries the logged-in marker, otherwise queues a warning
/// and redirects to the login page.
pub async fn require_session(mut session: Session, mut req: Request, next: Next) -> Response {
    match authorize(&session.data) {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            debug!(uri = %req.uri(), "no session, redirecting to login");
            session.flash(
                FlashCategory::Danger,
                "Bu sayfayı görüntülemek için giriş yapmalısınız.",
            );
            session.redirect(LOGIN_PAGE).into_response()
        }
    }
}

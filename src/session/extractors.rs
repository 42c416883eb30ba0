use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use super::dto::{FlashCategory, Page, SessionData};
use super::keys::SessionKeys;
use crate::error::AppError;

/// Session of the current request. Handlers mutate `data` and hand the
/// session back through `redirect`, `render` or `respond` so the updated
/// cookie is written.
pub struct Session {
    pub data: SessionData,
    keys: SessionKeys,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let data = match keys.read_cookie(&parts.headers) {
            Some(token) => keys.verify(token).unwrap_or_else(|e| {
                warn!(error = %e, "discarding invalid session cookie");
                SessionData::default()
            }),
            None => SessionData::default(),
        };
        Ok(Session { data, keys })
    }
}

impl Session {
    pub fn flash(&mut self, category: FlashCategory, message: impl Into<String>) {
        self.data.flash(category, message);
    }

    pub fn redirect(self, to: &str) -> Result<Response, AppError> {
        self.respond(Redirect::to(to))
    }

    /// Answers with a page document, consuming the queued flashes.
    pub fn render<T: Serialize>(mut self, page: &'static str, data: T) -> Result<Response, AppError> {
        let flashes = self.data.take_flashes();
        self.respond(Json(Page {
            page,
            flashes,
            data,
        }))
    }

    pub fn respond(self, body: impl IntoResponse) -> Result<Response, AppError> {
        let cookie = self.keys.set_cookie(&self.data)?;
        let mut res = body.into_response();
        res.headers_mut().append(header::SET_COOKIE, cookie);
        Ok(res)
    }
}

use axum::http::{header, HeaderMap, HeaderValue};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::config::SessionConfig;
use crate::session::dto::SessionData;

/// Signed cookie payload.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    iat: usize,
    session: SessionData,
}

/// Signs and verifies the session cookie with the configured secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    cookie_name: String,
    secure: bool,
}

impl SessionKeys {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            cookie_name: cfg.cookie_name.clone(),
            secure: cfg.secure,
        }
    }

    // The session carries no expiry: it lives as long as the browser keeps the cookie.
    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation
    }

    pub fn sign(&self, session: &SessionData) -> anyhow::Result<String> {
        let claims = SessionClaims {
            iat: OffsetDateTime::now_utc().unix_timestamp() as usize,
            session: session.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionData> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Self::validation())?;
        debug!(logged_in = data.claims.session.logged_in, "session verified");
        Ok(data.claims.session)
    }

    /// Finds our cookie among all `Cookie` headers of a request.
    pub fn read_cookie<'h>(&self, headers: &'h HeaderMap) -> Option<&'h str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value)
    }

    pub fn set_cookie(&self, session: &SessionData) -> anyhow::Result<HeaderValue> {
        let token = self.sign(session)?;
        let secure = if self.secure { "; Secure" } else { "" };
        let cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/{}",
            self.cookie_name, token, secure
        );
        Ok(HeaderValue::from_str(&cookie)?)
    }
}

//! Cookie-backed session: the logged-in user, the CSRF token and queued flash messages.
//!
//! The whole session lives in one signed cookie. Handlers take [`Session`] as an
//! extractor and return it alongside their response so changes are written back.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::csrf;
use crate::AppState;

pub const SESSION_COOKIE: &str = "ipldash_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Danger,
    Warning,
    Success,
    Info,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

/// One-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Serialized session payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionData {
    pub user_id: Option<i64>,
    pub authenticated_at: Option<DateTime<Utc>>,
    pub csrf_token: Option<String>,
    pub flashes: Vec<Flash>,
}

impl SessionData {
    /// Hex keeps the JSON clear of characters that are not allowed in cookie values.
    fn encode(&self) -> String {
        hex::encode(serde_json::to_vec(self).unwrap_or_default())
    }

    fn decode(raw: &str) -> Option<Self> {
        let bytes = hex::decode(raw).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Incoming session payload, verified and decoded once per request.
#[derive(Clone)]
struct DecodedSession(SessionData);

/// Request-scoped session handle.
pub struct Session {
    jar: SignedCookieJar,
    data: SessionData,
    secure: bool,
}

impl Session {
    /// The logged-in user, unless the login is older than `max_age_secs`.
    ///
    /// A max age too large for a `chrono::Duration` never expires the login.
    pub fn active_user_id(&self, max_age_secs: i64, now: DateTime<Utc>) -> Option<i64> {
        let user_id = self.data.user_id?;
        let authenticated_at = self.data.authenticated_at?;
        match Duration::try_seconds(max_age_secs) {
            Some(max_age) if now - authenticated_at > max_age => None,
            _ => Some(user_id),
        }
    }

    /// Start a fresh authenticated session. Everything except pending flashes is replaced.
    pub fn login(&mut self, user_id: i64) {
        let flashes = std::mem::take(&mut self.data.flashes);
        self.data = SessionData {
            user_id: Some(user_id),
            authenticated_at: Some(Utc::now()),
            csrf_token: Some(csrf::generate_token()),
            flashes,
        };
    }

    pub fn logout(&mut self) {
        self.data.user_id = None;
        self.data.authenticated_at = None;
        self.data.csrf_token = None;
    }

    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.data.flashes.push(Flash {
            level,
            message: message.into(),
        });
    }

    /// Drain queued flashes for rendering.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.data.flashes)
    }

    /// The session's CSRF token, minted on first use.
    pub fn csrf_token(&mut self) -> String {
        self.data
            .csrf_token
            .get_or_insert_with(csrf::generate_token)
            .clone()
    }

    pub fn verify_csrf(&self, submitted: &str) -> bool {
        match self.data.csrf_token.as_deref() {
            Some(expected) => !submitted.is_empty() && csrf::tokens_match(expected, submitted),
            None => false,
        }
    }

    fn into_jar(self) -> SignedCookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, self.data.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        self.jar.add(cookie)
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_request_parts(parts, state).await?;
        let data = match parts.extensions.get::<DecodedSession>() {
            Some(DecodedSession(data)) => data.clone(),
            None => {
                let data = jar
                    .get(SESSION_COOKIE)
                    .and_then(|cookie| SessionData::decode(cookie.value()))
                    .unwrap_or_default();
                parts.extensions.insert(DecodedSession(data.clone()));
                data
            }
        };

        Ok(Session {
            jar,
            data,
            secure: state.config.cookie_secure,
        })
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.into_jar().into_response_parts(res)
    }
}

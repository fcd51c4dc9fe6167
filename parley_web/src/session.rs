//! Cookie-backed session resolution.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use parley_core::SessionId;
use tracing::{debug, warn};

use crate::AppState;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "parley_session";

/// The caller's session, taken from its cookie or freshly minted.
#[derive(Debug)]
pub struct ClientSession {
    pub id: SessionId,
    jar: CookieJar,
}

impl ClientSession {
    fn from_jar(jar: CookieJar) -> Self {
        let id = jar
            .get(SESSION_COOKIE)
            .and_then(|c| c.value().parse::<SessionId>().ok())
            .unwrap_or_else(|| {
                let id = SessionId::new();
                debug!("Starting session {id}");
                id
            });
        Self { id, jar }
    }

    /// Cookie jar to attach to the response.
    ///
    /// A permanent session gets a `Max-Age`; otherwise the cookie lasts for
    /// the browser session.
    pub async fn into_jar(self, state: &AppState) -> CookieJar {
        let permanent = match state.sessions.load(&self.id).await {
            Ok(session) => session.permanent,
            Err(e) => {
                warn!("Failed to load session {}: {e}", self.id);
                false
            }
        };

        let mut cookie = Cookie::build((SESSION_COOKIE, self.id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        if permanent {
            cookie = cookie.max_age(state.permanent_lifetime);
        }

        self.jar.add(cookie)
    }
}

impl<S> FromRequestParts<S> for ClientSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_jar(CookieJar::from_headers(&parts.headers)))
    }
}

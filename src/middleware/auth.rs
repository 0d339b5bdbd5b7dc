// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication for protected routes.
//!
//! Authentication is explicit at each route entry: protected handlers take a
//! [`CurrentUser`] parameter, and the extractor's rejection is a redirect to
//! the landing page. Page and API routes behave identically — an
//! unauthenticated request never sees a JSON error body.

use crate::services::session::{decode_cookie_value, SessionStore, SESSION_COOKIE};
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::models::UserProfile;

/// Authenticated session context for one request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session_id: String,
    pub profile: UserProfile,
}

/// Resolve the session cookie against the store.
///
/// Plain function so it can be exercised without the extractor machinery:
/// cookie → signature check → store lookup.
pub fn authorize(jar: &CookieJar, sessions: &SessionStore, secret: &[u8]) -> Option<CurrentUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let session_id = decode_cookie_value(cookie.value(), secret)?;
    let record = sessions.get(&session_id)?;

    Some(CurrentUser {
        session_id,
        profile: record.user,
    })
}

/// Rejection for unauthenticated requests: bounce to the landing page.
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary("/").into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        authorize(&jar, &state.sessions, &state.config.session_secret).ok_or(AuthRedirect)
    }
}

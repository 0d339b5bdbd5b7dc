// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steam login and logout routes.
//!
//! The login flow is user-facing, so every failure path degrades silently to
//! "not logged in": malformed callbacks, rejected assertions, and profile
//! fetch errors all land back on the landing page with no error body.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::services::openid::CallbackParams;
use crate::services::session::{
    decode_cookie_value, encode_cookie_value, SESSION_COOKIE, SESSION_TTL_SECS,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", get(login_start))
        .route("/auth/login/return", get(login_return))
        .route("/logout", get(logout))
}

/// Start the login handshake - redirect the browser to Steam.
async fn login_start(State(state): State<Arc<AppState>>) -> Redirect {
    tracing::info!("starting Steam login, redirecting to provider");
    Redirect::temporary(&state.openid.login_url())
}

/// Provider callback - verify the assertion, create a session, and land the
/// user on the dashboard.
async fn login_return(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    params: Result<Query<CallbackParams>, QueryRejection>,
) -> (CookieJar, Redirect) {
    let Ok(Query(params)) = params else {
        tracing::warn!("malformed OpenID callback");
        return (jar, Redirect::temporary("/"));
    };

    let steam_id = match state.openid.verify(&params).await {
        Ok(steam_id) => steam_id,
        Err(err) => {
            tracing::warn!(error = %err, "Steam login verification failed");
            return (jar, Redirect::temporary("/"));
        }
    };

    let profile = match state.steam.get_profile(&steam_id).await {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!(steam_id = %steam_id, error = %err, "profile fetch failed after login");
            return (jar, Redirect::temporary("/"));
        }
    };

    tracing::info!(
        steam_id = %profile.steam_id,
        display_name = %profile.display_name,
        "Steam login successful"
    );

    let session_id = match state.sessions.create(profile) {
        Ok(session_id) => session_id,
        Err(err) => {
            tracing::error!(error = %err, "failed to create session");
            return (jar, Redirect::temporary("/"));
        }
    };

    let value = encode_cookie_value(&session_id, &state.config.session_secret);
    let cookie = session_cookie(value, &state.config.realm);

    (jar.add(cookie), Redirect::temporary("/dashboard"))
}

/// Destroy the session and clear the cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(session_id) = decode_cookie_value(cookie.value(), &state.config.session_secret)
        {
            state.sessions.remove(&session_id);
            tracing::info!("session destroyed on logout");
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::temporary("/"))
}

/// Session cookie attributes: HttpOnly, SameSite=Lax, whole-site path, and
/// Secure whenever the configured realm is https.
fn session_cookie(value: String, realm: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(SESSION_TTL_SECS));
    cookie.set_secure(realm.starts_with("https://"));
    cookie
}

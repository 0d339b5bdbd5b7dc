// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use steam_compare::config::Config;
use steam_compare::models::UserProfile;
use steam_compare::routes::create_router;
use steam_compare::services::session::{encode_cookie_value, SESSION_COOKIE};
use steam_compare::services::{SessionStore, SteamClient, SteamOpenId};
use steam_compare::AppState;
use std::sync::Arc;

/// Create a test app. No outbound call is made unless a test drives a
/// handler that reaches the Steam API.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let steam = SteamClient::new(config.steam_api_key.clone());
    let openid = SteamOpenId::new(config.realm.clone(), config.return_url.clone());
    let sessions = SessionStore::new();

    let state = Arc::new(AppState {
        config,
        steam,
        openid,
        sessions,
    });

    (create_router(state.clone()), state)
}

/// A fixed test profile.
#[allow(dead_code)]
pub fn test_profile() -> UserProfile {
    UserProfile {
        steam_id: "76561197960435530".to_string(),
        display_name: "gabe".to_string(),
        avatars: vec![
            "https://avatars.steamstatic.com/small.jpg".to_string(),
            "https://avatars.steamstatic.com/full.jpg".to_string(),
        ],
    }
}

/// Insert a session into the store and return the Cookie header value a
/// logged-in browser would send.
#[allow(dead_code)]
pub fn login_test_user(state: &Arc<AppState>, profile: UserProfile) -> (String, String) {
    let session_id = state
        .sessions
        .create(profile)
        .expect("session creation should succeed");
    let cookie_value = encode_cookie_value(&session_id, &state.config.session_secret);

    (
        session_id,
        format!("{}={}", SESSION_COOKIE, cookie_value),
    )
}

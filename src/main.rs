// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steam-Compare API Server
//!
//! Signs users in through Steam's OpenID login and compares game libraries
//! and achievement progress between friends.

use steam_compare::{
    config::Config,
    services::{SessionStore, SteamClient, SteamOpenId},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Steam-Compare API");

    let steam = SteamClient::new(config.steam_api_key.clone());
    let openid = SteamOpenId::new(config.realm.clone(), config.return_url.clone());
    let sessions = SessionStore::new();
    tracing::info!(realm = %config.realm, "Steam clients initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        steam,
        openid,
        sessions,
    });

    // Build router
    let app = steam_compare::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("steam_compare=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

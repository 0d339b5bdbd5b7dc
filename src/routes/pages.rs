// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static page routes behind authentication.
//!
//! The landing page and other assets are served by the `ServeDir` fallback
//! in `routes::create_router`; only the dashboard needs a handler, because
//! it sits behind the session check.

use crate::error::Result;
use crate::middleware::auth::CurrentUser;
use crate::AppState;
use axum::{extract::State, response::Html, routing::get, Router};
use std::path::Path;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Serve the dashboard page to a logged-in user.
async fn dashboard(State(state): State<Arc<AppState>>, _user: CurrentUser) -> Result<Html<String>> {
    let path = Path::new(&state.config.public_dir).join("dashboard.html");

    let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
        anyhow::anyhow!("failed to read {}: {}", path.display(), e)
    })?;

    Ok(Html(body))
}

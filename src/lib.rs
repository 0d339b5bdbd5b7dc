// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steam-Compare: compare game libraries and achievements with a friend
//!
//! This crate provides the backend that signs users in through Steam's
//! OpenID login and proxies the Steam Web API queries behind the
//! library-comparison feature.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{SessionStore, SteamClient, SteamOpenId};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub steam: SteamClient,
    pub openid: SteamOpenId,
    pub sessions: SessionStore,
}

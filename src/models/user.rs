// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model shared by the session store and API responses.

use serde::{Deserialize, Serialize};

/// Steam profile for the logged-in user, fetched once at login and kept in
/// the session for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// SteamID64, stable and provider-assigned
    pub steam_id: String,
    /// Persona (display) name
    pub display_name: String,
    /// Avatar URLs in ascending resolution; the last entry is full size
    pub avatars: Vec<String>,
}

impl UserProfile {
    /// Highest-resolution avatar, if the profile has any.
    pub fn best_avatar(&self) -> Option<&str> {
        self.avatars.last().map(String::as_str)
    }
}

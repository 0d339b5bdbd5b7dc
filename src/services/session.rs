// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store and signed session cookie codec.
//!
//! The browser only ever holds an opaque session id, HMAC-signed so a
//! tampered cookie never reaches the store lookup. Profiles live server-side
//! and die with the process.

use crate::error::AppError;
use crate::models::UserProfile;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "compare_session";

/// Sessions expire after 30 days.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

const SESSION_ID_BYTES: usize = 32;

/// Server-side session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: UserProfile,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    fn new(user: UserProfile) -> Self {
        let now = Utc::now();
        Self {
            user,
            created_at: now,
            expires_at: now + Duration::seconds(SESSION_TTL_SECS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Concurrent map of opaque session id to session record.
///
/// Shared across all requests; per-id access only, so there is no
/// cross-session contention.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a freshly authenticated user, returning its id.
    pub fn create(&self, user: UserProfile) -> Result<String, AppError> {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("system RNG failure")))?;

        let id = URL_SAFE_NO_PAD.encode(bytes);
        self.sessions.insert(id.clone(), SessionRecord::new(user));
        Ok(id)
    }

    /// Look up a session, dropping it if it has expired.
    pub fn get(&self, id: &str) -> Option<SessionRecord> {
        let record = self.sessions.get(id)?.clone();
        if record.is_expired(Utc::now()) {
            self.sessions.remove(id);
            return None;
        }
        Some(record)
    }

    /// Destroy a session (logout).
    pub fn remove(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Sign a session id for the cookie: base64url("id|hmac_hex").
pub fn encode_cookie_value(session_id: &str, secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(session_id.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    URL_SAFE_NO_PAD.encode(format!("{}|{}", session_id, signature))
}

/// Verify a cookie value and recover the session id.
///
/// Returns `None` for malformed or tampered cookies; the caller treats that
/// the same as no cookie at all.
pub fn decode_cookie_value(value: &str, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;

    let (session_id, signature_hex) = decoded.split_once('|')?;

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(session_id.as_bytes());
    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if signature_hex != expected_signature {
        tracing::warn!("session cookie signature mismatch");
        return None;
    }

    Some(session_id.to_string())
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steam OpenID 2.0 login client.
//!
//! Steam acts as an OpenID 2.0 provider: we send the browser to the provider
//! with a `checkid_setup` request, Steam redirects back with a signed
//! assertion, and we confirm that assertion directly with Steam via
//! `check_authentication` before trusting the claimed identity.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Steam's OpenID 2.0 endpoint, used both for the browser redirect and for
/// assertion verification.
pub const STEAM_LOGIN_URL: &str = "https://steamcommunity.com/openid/login";

const OPENID_NS: &str = "http://specs.openid.net/auth/2.0";
const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";

const VERIFY_TIMEOUT_SECS: u64 = 10;

/// Query parameters Steam sends to the return URL after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackParams {
    #[serde(rename = "openid.ns")]
    pub ns: String,

    #[serde(rename = "openid.mode")]
    pub mode: String,

    #[serde(rename = "openid.op_endpoint")]
    pub op_endpoint: String,

    #[serde(rename = "openid.claimed_id")]
    pub claimed_id: String,

    #[serde(rename = "openid.identity")]
    pub identity: Option<String>,

    #[serde(rename = "openid.return_to")]
    pub return_to: String,

    #[serde(rename = "openid.response_nonce")]
    pub response_nonce: String,

    #[serde(rename = "openid.invalidate_handle")]
    pub invalidate_handle: Option<String>,

    #[serde(rename = "openid.assoc_handle")]
    pub assoc_handle: String,

    #[serde(rename = "openid.signed")]
    pub signed: String,

    #[serde(rename = "openid.sig")]
    pub sig: String,
}

/// Errors from the login handshake. All of them degrade to "not logged in"
/// at the route layer; none are surfaced to the browser.
#[derive(Debug, thiserror::Error)]
pub enum OpenIdError {
    #[error("callback return_to does not match the configured return URL")]
    ReturnUrlMismatch,

    #[error("Steam rejected the login assertion")]
    Rejected,

    #[error("claimed_id is not a Steam identity URL")]
    BadClaimedId,

    #[error("verification request failed: {0}")]
    Http(String),
}

/// Client for the delegated-login handshake.
#[derive(Clone)]
pub struct SteamOpenId {
    http: reqwest::Client,
    realm: String,
    return_url: String,
}

impl SteamOpenId {
    pub fn new(realm: String, return_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(VERIFY_TIMEOUT_SECS))
            .build()
            .expect("default TLS backend should initialize");

        Self {
            http,
            realm,
            return_url,
        }
    }

    /// Build the provider URL that starts the login handshake.
    pub fn login_url(&self) -> String {
        format!(
            "{}?openid.ns={}&\
             openid.mode=checkid_setup&\
             openid.identity={}&\
             openid.claimed_id={}&\
             openid.realm={}&\
             openid.return_to={}",
            STEAM_LOGIN_URL,
            urlencoding::encode(OPENID_NS),
            urlencoding::encode(IDENTIFIER_SELECT),
            urlencoding::encode(IDENTIFIER_SELECT),
            urlencoding::encode(&self.realm),
            urlencoding::encode(&self.return_url),
        )
    }

    /// Verify a login assertion with Steam and return the SteamID64.
    ///
    /// The assertion is re-posted to the provider with
    /// `openid.mode=check_authentication`; Steam answers with a key-value
    /// document containing `is_valid:true` for genuine assertions.
    pub async fn verify(&self, params: &CallbackParams) -> Result<String, OpenIdError> {
        if !params.return_to.starts_with(&self.return_url) {
            return Err(OpenIdError::ReturnUrlMismatch);
        }

        let mut check = params.clone();
        check.mode = "check_authentication".to_string();

        let response = self
            .http
            .post(STEAM_LOGIN_URL)
            .form(&check)
            .send()
            .await
            .map_err(|e| OpenIdError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OpenIdError::Http(format!("HTTP {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OpenIdError::Http(e.to_string()))?;

        if !body.lines().any(|line| line.trim() == "is_valid:true") {
            tracing::warn!(
                claimed_id = %params.claimed_id,
                "Steam did not validate the login assertion"
            );
            return Err(OpenIdError::Rejected);
        }

        steam_id_from_claimed_id(&params.claimed_id).ok_or(OpenIdError::BadClaimedId)
    }
}

/// Extract the SteamID64 from a claimed identity URL such as
/// `https://steamcommunity.com/openid/id/76561197960435530`.
fn steam_id_from_claimed_id(claimed_id: &str) -> Option<String> {
    let segment = claimed_id.trim_end_matches('/').rsplit('/').next()?;
    segment.parse::<u64>().ok().map(|id| id.to_string())
}

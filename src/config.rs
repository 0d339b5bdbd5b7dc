// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Steam Web API key
    pub steam_api_key: String,
    /// HMAC key for signing the session cookie (raw bytes)
    pub session_secret: Vec<u8>,
    /// OpenID return URL Steam redirects back to after login
    pub return_url: String,
    /// OpenID realm (the origin the user authorizes)
    pub realm: String,
    /// Server port
    pub port: u16,
    /// Directory of static pages served at `/`
    pub public_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `STEAM_API_KEY` and `SESSION_SECRET` are required; the callback URLs
    /// default to localhost for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            steam_api_key: env::var("STEAM_API_KEY")
                .map_err(|_| ConfigError::Missing("STEAM_API_KEY"))?,
            session_secret: env::var("SESSION_SECRET")
                .map_err(|_| ConfigError::Missing("SESSION_SECRET"))?
                .into_bytes(),
            return_url: env::var("RETURN_URL")
                .unwrap_or_else(|_| "http://localhost:3000/auth/login/return".to_string()),
            realm: env::var("REALM").unwrap_or_else(|_| "http://localhost:3000/".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            steam_api_key: "test_api_key".to_string(),
            session_secret: b"test_session_secret_32_bytes_min".to_vec(),
            return_url: "http://localhost:3000/auth/login/return".to_string(),
            realm: "http://localhost:3000/".to_string(),
            port: 3000,
            public_dir: "public".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("STEAM_API_KEY", "test_key");
        env::set_var("SESSION_SECRET", "test_secret");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.steam_api_key, "test_key");
        assert_eq!(config.session_secret, b"test_secret");
        assert_eq!(config.port, 3000);
        assert_eq!(config.realm, "http://localhost:3000/");
    }

    #[test]
    fn test_config_test_default() {
        let config = Config::test_default();
        assert_eq!(config.public_dir, "public");
        assert!(config.return_url.ends_with("/auth/login/return"));
    }
}

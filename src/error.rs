// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Which side of a comparison is missing achievement data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    User,
    Friend,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::User => write!(f, "user"),
            Side::Friend => write!(f, "friend"),
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Achievement data unavailable for {0}")]
    AchievementsUnavailable(Side),

    #[error("This game has no achievements.")]
    NoAchievements,

    #[error("Steam API error: {0}")]
    SteamApi(String),

    #[error("Steam returned no usable data: {0}")]
    MissingData(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::AchievementsUnavailable(side) => {
                let msg = match side {
                    Side::User => {
                        "Could not fetch your achievements. Your game details may be \
                         private or you don't own this game."
                    }
                    Side::Friend => {
                        "Could not fetch friend's achievements. Their game details may be \
                         private or your friend does not own this game."
                    }
                };
                (
                    StatusCode::BAD_REQUEST,
                    "achievements_unavailable",
                    Some(msg.to_string()),
                )
            }
            AppError::NoAchievements => (
                StatusCode::BAD_REQUEST,
                "no_achievements",
                Some("This game has no achievements.".to_string()),
            ),
            AppError::SteamApi(msg) => {
                tracing::error!(error = %msg, "Steam API error");
                (StatusCode::INTERNAL_SERVER_ERROR, "steam_error", None)
            }
            AppError::MissingData(msg) => {
                tracing::error!(error = %msg, "Steam returned no usable data");
                (StatusCode::INTERNAL_SERVER_ERROR, "steam_data_missing", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_maps_to_400() {
        let response = AppError::BadRequest("Friend ID required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_comparison_errors_map_to_400() {
        for err in [
            AppError::AchievementsUnavailable(Side::User),
            AppError::AchievementsUnavailable(Side::Friend),
            AppError::NoAchievements,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_provider_errors_map_to_500() {
        let response = AppError::SteamApi("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::MissingData("no friendslist".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::User.to_string(), "user");
        assert_eq!(Side::Friend.to_string(), "friend");
    }
}

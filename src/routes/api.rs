// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API routes for authenticated users.
//!
//! Authentication is explicit: every handler takes a [`CurrentUser`], and
//! requests without a valid session are redirected by the extractor before
//! the handler runs.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::services::compare::{self, AchievementComparison};
use crate::services::steam::{Game, PlayerSummary};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/friends", get(get_friends))
        .route("/api/games", get(get_games))
        .route("/api/common-games", get(get_common_games))
        .route("/api/achievements", get(get_achievements))
}

// ─── Profile & Friends ───────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
pub struct MeResponse {
    pub username: String,
    pub steamid: String,
    pub avatar: Option<String>,
}

/// Get the logged-in user's profile, straight from the session.
async fn get_me(user: CurrentUser) -> Json<MeResponse> {
    let avatar = user.profile.best_avatar().map(str::to_string);

    Json(MeResponse {
        username: user.profile.display_name,
        steamid: user.profile.steam_id,
        avatar,
    })
}

/// One friend in the friends response.
#[derive(Serialize)]
pub struct FriendResponse {
    pub steamid: String,
    pub username: String,
    pub avatar: Option<String>,
}

impl FriendResponse {
    fn from_summary(summary: PlayerSummary) -> Self {
        let profile = summary.into_profile();
        Self {
            avatar: profile.best_avatar().map(str::to_string),
            steamid: profile.steam_id,
            username: profile.display_name,
        }
    }
}

/// List the user's friends with display names and avatars.
///
/// Two provider calls: the friend list gives ids, the summaries call
/// resolves them to profiles. Summaries come back in arbitrary order, so
/// results are re-emitted in friend-list order.
async fn get_friends(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<FriendResponse>>> {
    let friends = state.steam.get_friend_list(&user.profile.steam_id).await?;
    if friends.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let ids: Vec<&str> = friends.iter().map(|f| f.steam_id.as_str()).collect();
    let summaries = state.steam.get_player_summaries(&ids).await?;

    let mut by_id: HashMap<String, PlayerSummary> = summaries
        .into_iter()
        .map(|summary| (summary.steam_id.clone(), summary))
        .collect();

    let list = friends
        .iter()
        .filter_map(|friend| by_id.remove(&friend.steam_id))
        .map(FriendResponse::from_summary)
        .collect();

    Ok(Json(list))
}

// ─── Games & Achievements ────────────────────────────────────

/// List the user's owned games.
async fn get_games(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<Game>>> {
    let games = state.steam.get_owned_games(&user.profile.steam_id).await?;
    Ok(Json(games))
}

#[derive(Deserialize)]
struct CommonGamesQuery {
    #[serde(rename = "friendId")]
    friend_id: Option<String>,
}

/// Games both the user and the given friend own, filtered to those with
/// achievements.
async fn get_common_games(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(query): Query<CommonGamesQuery>,
) -> Result<Json<Vec<Game>>> {
    let friend_id = query
        .friend_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Friend ID required".to_string()))?;

    let games =
        compare::find_common_achievable_games(&state.steam, &user.profile.steam_id, &friend_id)
            .await?;

    Ok(Json(games))
}

#[derive(Deserialize)]
struct AchievementsQuery {
    #[serde(rename = "friendId")]
    friend_id: Option<String>,
    #[serde(rename = "appId")]
    app_id: Option<String>,
}

/// Compare the user's and a friend's achievement progress for one game.
async fn get_achievements(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(query): Query<AchievementsQuery>,
) -> Result<Json<AchievementComparison>> {
    let (Some(friend_id), Some(app_id)) = (
        query.friend_id.filter(|id| !id.is_empty()),
        query.app_id.filter(|id| !id.is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Friend ID and App ID required".to_string(),
        ));
    };

    let app_id: u32 = app_id
        .parse()
        .map_err(|_| AppError::BadRequest("App ID must be numeric".to_string()))?;

    let comparison =
        compare::compare_achievements(&state.steam, &user.profile.steam_id, &friend_id, app_id)
            .await?;

    Ok(Json(comparison))
}

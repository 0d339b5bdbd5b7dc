// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steam Web API client.
//!
//! Handles:
//! - Player summaries (profile name + avatars)
//! - Friend lists
//! - Owned games
//! - Achievement schemas and per-player achievement progress
//!
//! Every call is a single outbound GET with the API key in the query string.
//! Responses are normalized here so callers never see Steam's envelope
//! shapes.

use crate::error::AppError;
use crate::models::UserProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outbound calls are bounded so a stalled Steam endpoint cannot hang a
/// request forever.
const STEAM_TIMEOUT_SECS: u64 = 10;

/// Steam Web API client.
#[derive(Clone)]
pub struct SteamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SteamClient {
    /// Create a new Steam client with the given API key.
    pub fn new(api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(STEAM_TIMEOUT_SECS))
            .build()
            .expect("default TLS backend should initialize");

        Self {
            http,
            base_url: "https://api.steampowered.com".to_string(),
            api_key,
        }
    }

    /// Get player summaries for up to 100 SteamIDs.
    pub async fn get_player_summaries(
        &self,
        steam_ids: &[&str],
    ) -> Result<Vec<PlayerSummary>, AppError> {
        let url = format!("{}/ISteamUser/GetPlayerSummaries/v0002/", self.base_url);

        let envelope: PlayerSummariesEnvelope = self
            .get_json(&url, &[("steamids", steam_ids.join(","))])
            .await?;

        Ok(envelope.response.players)
    }

    /// Get a single player's profile.
    pub async fn get_profile(&self, steam_id: &str) -> Result<UserProfile, AppError> {
        let mut summaries = self.get_player_summaries(&[steam_id]).await?;

        if summaries.is_empty() {
            return Err(AppError::MissingData(format!(
                "no player summary for {}",
                steam_id
            )));
        }

        Ok(summaries.remove(0).into_profile())
    }

    /// Get a player's friend list.
    ///
    /// Steam omits the `friendslist` object entirely for private profiles;
    /// that surfaces as `MissingData` rather than an empty list.
    pub async fn get_friend_list(&self, steam_id: &str) -> Result<Vec<FriendEntry>, AppError> {
        let url = format!("{}/ISteamUser/GetFriendList/v0001/", self.base_url);

        let envelope: FriendListEnvelope = self
            .get_json(
                &url,
                &[
                    ("steamid", steam_id.to_string()),
                    ("relationship", "friend".to_string()),
                ],
            )
            .await?;

        match envelope.friendslist {
            Some(list) => Ok(list.friends),
            None => Err(AppError::MissingData(format!(
                "no friend list for {} (profile may be private)",
                steam_id
            ))),
        }
    }

    /// Get the games a player owns, including free games with playtime.
    ///
    /// A private or empty library comes back without a `games` array; both
    /// normalize to an empty list.
    pub async fn get_owned_games(&self, steam_id: &str) -> Result<Vec<Game>, AppError> {
        let url = format!("{}/IPlayerService/GetOwnedGames/v0001/", self.base_url);

        let envelope: OwnedGamesEnvelope = self
            .get_json(
                &url,
                &[
                    ("steamid", steam_id.to_string()),
                    ("include_appinfo", "1".to_string()),
                    ("include_played_free_games", "1".to_string()),
                ],
            )
            .await?;

        Ok(envelope.response.games)
    }

    /// Count the achievements a game's schema defines.
    ///
    /// Games without stats come back with the whole `availableGameStats`
    /// subtree missing; that counts as zero.
    pub async fn get_schema_achievement_count(&self, app_id: u32) -> Result<usize, AppError> {
        let url = format!("{}/ISteamUserStats/GetSchemaForGame/v2/", self.base_url);

        let envelope: GameSchemaEnvelope =
            self.get_json(&url, &[("appid", app_id.to_string())]).await?;

        Ok(envelope
            .game
            .and_then(|game| game.available_game_stats)
            .and_then(|stats| stats.achievements)
            .map(|achievements| achievements.len())
            .unwrap_or(0))
    }

    /// Get a player's raw achievement progress for one game.
    ///
    /// Returns `Ok(None)` when Steam has no achievement list for this
    /// player + game (private profile, unowned game, or an error body) —
    /// only transport failures are hard errors.
    pub async fn get_player_achievements(
        &self,
        steam_id: &str,
        app_id: u32,
    ) -> Result<Option<Vec<PlayerAchievement>>, AppError> {
        let url = format!("{}/ISteamUserStats/GetPlayerAchievements/v1/", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.clone()),
                ("steamid", steam_id.to_string()),
                ("appid", app_id.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::SteamApi(e.to_string()))?;

        // Steam answers 400/403 with a {"playerstats": {"success": false}}
        // body for private or unowned games; parse failures land in the
        // same "no data" bucket.
        let envelope: PlayerStatsEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) => return Ok(None),
        };

        Ok(envelope
            .playerstats
            .and_then(|stats| stats.achievements))
    }

    /// Generic GET with the API key and JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::SteamApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SteamApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::MissingData(format!("JSON parse error: {}", e)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

/// Player summary from `GetPlayerSummaries`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSummary {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(rename = "personaname")]
    pub persona_name: String,
    pub avatar: Option<String>,
    #[serde(rename = "avatarmedium")]
    pub avatar_medium: Option<String>,
    #[serde(rename = "avatarfull")]
    pub avatar_full: Option<String>,
}

impl PlayerSummary {
    /// Normalize into a profile; avatar variants ordered small to full.
    pub fn into_profile(self) -> UserProfile {
        let avatars = [self.avatar, self.avatar_medium, self.avatar_full]
            .into_iter()
            .flatten()
            .collect();

        UserProfile {
            steam_id: self.steam_id,
            display_name: self.persona_name,
            avatars,
        }
    }
}

#[derive(Deserialize)]
struct PlayerSummariesEnvelope {
    response: PlayerSummariesResponse,
}

#[derive(Deserialize)]
struct PlayerSummariesResponse {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

/// One entry of a friend list.
#[derive(Debug, Clone, Deserialize)]
pub struct FriendEntry {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    pub relationship: String,
}

#[derive(Deserialize)]
struct FriendListEnvelope {
    friendslist: Option<FriendList>,
}

#[derive(Deserialize)]
struct FriendList {
    #[serde(default)]
    friends: Vec<FriendEntry>,
}

/// An owned game. Serializes as `{appid, name}` in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    #[serde(rename = "appid")]
    pub app_id: u32,
    pub name: String,
}

#[derive(Deserialize)]
struct OwnedGamesEnvelope {
    response: OwnedGamesResponse,
}

#[derive(Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    games: Vec<Game>,
}

#[derive(Deserialize)]
struct GameSchemaEnvelope {
    game: Option<GameSchema>,
}

#[derive(Deserialize)]
struct GameSchema {
    #[serde(rename = "availableGameStats")]
    available_game_stats: Option<AvailableGameStats>,
}

#[derive(Deserialize)]
struct AvailableGameStats {
    achievements: Option<Vec<AchievementDefinition>>,
}

/// One schema-level achievement definition; only its presence matters.
#[derive(Debug, Clone, Deserialize)]
pub struct AchievementDefinition {
    pub name: String,
}

/// One entry of a player's achievement progress.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerAchievement {
    #[serde(rename = "apiname")]
    pub api_name: String,
    /// 1 = unlocked, 0 = locked
    pub achieved: u8,
}

impl PlayerAchievement {
    pub fn is_unlocked(&self) -> bool {
        self.achieved == 1
    }
}

#[derive(Deserialize)]
struct PlayerStatsEnvelope {
    playerstats: Option<PlayerStats>,
}

#[derive(Deserialize)]
struct PlayerStats {
    achievements: Option<Vec<PlayerAchievement>>,
}

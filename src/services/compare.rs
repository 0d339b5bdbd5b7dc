// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Library and achievement comparison engine.
//!
//! Two operations sit on top of the Steam client:
//! - finding the games two players both own that actually have achievements
//! - comparing both players' unlock progress for one of those games
//!
//! The aggregation logic is kept as pure functions over already-fetched data
//! so the failure policies are testable without a network.

use crate::error::{AppError, Side};
use crate::services::steam::{Game, PlayerAchievement, SteamClient};
use serde::Serialize;
use std::collections::HashSet;

/// Intersection of two owned-games lists, keyed by app id.
///
/// Order follows the primary user's list, so results are stable for that
/// user across friends.
pub fn common_games(user_games: Vec<Game>, friend_games: &[Game]) -> Vec<Game> {
    let friend_ids: HashSet<u32> = friend_games.iter().map(|game| game.app_id).collect();

    user_games
        .into_iter()
        .filter(|game| friend_ids.contains(&game.app_id))
        .collect()
}

/// Project per-game schema lookups down to the games that define at least
/// one achievement.
///
/// A failed lookup drops that game and nothing else: one broken store page
/// must never fail the whole comparison.
pub fn filter_achievable(lookups: Vec<(Game, Result<usize, AppError>)>) -> Vec<Game> {
    lookups
        .into_iter()
        .filter_map(|(game, result)| match result {
            Ok(count) if count > 0 => Some(game),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(
                    app_id = game.app_id,
                    name = %game.name,
                    error = %err,
                    "skipping game, schema fetch failed"
                );
                None
            }
        })
        .collect()
}

/// Find the games both players own that have achievements to compare.
pub async fn find_common_achievable_games(
    steam: &SteamClient,
    user_id: &str,
    friend_id: &str,
) -> Result<Vec<Game>, AppError> {
    let (user_games, friend_games) = tokio::try_join!(
        steam.get_owned_games(user_id),
        steam.get_owned_games(friend_id),
    )?;

    let candidates = common_games(user_games, &friend_games);
    tracing::debug!(count = candidates.len(), "computed owned-games intersection");

    let lookups = futures_util::future::join_all(candidates.into_iter().map(|game| async move {
        let result = steam.get_schema_achievement_count(game.app_id).await;
        (game, result)
    }))
    .await;

    Ok(filter_achievable(lookups))
}

/// Unlock progress for one side of a comparison.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SideProgress {
    pub unlocked: usize,
    pub percentage: u32,
}

/// Two-sided achievement comparison for a single game.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AchievementComparison {
    pub total: usize,
    pub user: SideProgress,
    pub friend: SideProgress,
}

/// Aggregate both players' raw achievement lists into a comparison.
///
/// A missing list on either side fails the whole operation; a one-sided
/// comparison is meaningless. `total` is taken from the primary user's list
/// — the schema is game-global, so both lists are assumed to be the same
/// length, and no cross-validation is done.
pub fn compare_progress(
    user: Option<Vec<PlayerAchievement>>,
    friend: Option<Vec<PlayerAchievement>>,
) -> Result<AchievementComparison, AppError> {
    let user = user.ok_or(AppError::AchievementsUnavailable(Side::User))?;
    let friend = friend.ok_or(AppError::AchievementsUnavailable(Side::Friend))?;

    let total = user.len();
    if total == 0 {
        return Err(AppError::NoAchievements);
    }

    Ok(AchievementComparison {
        total,
        user: side_progress(&user, total),
        friend: side_progress(&friend, total),
    })
}

fn side_progress(achievements: &[PlayerAchievement], total: usize) -> SideProgress {
    let unlocked = achievements.iter().filter(|a| a.is_unlocked()).count();

    SideProgress {
        unlocked,
        percentage: percentage(unlocked, total),
    }
}

/// Round-half-up percentage.
fn percentage(part: usize, total: usize) -> u32 {
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Compare two players' achievement progress for one game.
pub async fn compare_achievements(
    steam: &SteamClient,
    user_id: &str,
    friend_id: &str,
    app_id: u32,
) -> Result<AchievementComparison, AppError> {
    let (user, friend) = tokio::try_join!(
        steam.get_player_achievements(user_id, app_id),
        steam.get_player_achievements(friend_id, app_id),
    )?;

    compare_progress(user, friend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(app_id: u32, name: &str) -> Game {
        Game {
            app_id,
            name: name.to_string(),
        }
    }

    fn achievements(unlocked: usize, total: usize) -> Vec<PlayerAchievement> {
        (0..total)
            .map(|i| PlayerAchievement {
                api_name: format!("ACH_{}", i),
                achieved: u8::from(i < unlocked),
            })
            .collect()
    }

    #[test]
    fn test_disjoint_libraries_have_no_common_games() {
        let user = vec![game(10, "A"), game(20, "B")];
        let friend = vec![game(30, "C"), game(40, "D")];

        assert!(common_games(user, &friend).is_empty());
    }

    #[test]
    fn test_intersection_keeps_user_order() {
        let user = vec![game(1, "A"), game(2, "B"), game(3, "C")];
        let friend = vec![game(3, "C"), game(2, "B"), game(4, "D")];

        let common = common_games(user, &friend);
        assert_eq!(common, vec![game(2, "B"), game(3, "C")]);
    }

    #[test]
    fn test_failed_schema_lookup_drops_one_game_only() {
        // B's schema fetch fails, C's succeeds: the result is {C}, and the
        // failure does not abort the call.
        let lookups = vec![
            (game(2, "B"), Err(AppError::SteamApi("HTTP 500".to_string()))),
            (game(3, "C"), Ok(12)),
        ];

        assert_eq!(filter_achievable(lookups), vec![game(3, "C")]);
    }

    #[test]
    fn test_games_without_achievements_are_excluded() {
        let lookups = vec![(game(2, "B"), Ok(0)), (game(3, "C"), Ok(1))];

        assert_eq!(filter_achievable(lookups), vec![game(3, "C")]);
    }

    #[test]
    fn test_compare_progress() {
        let result = compare_progress(Some(achievements(25, 50)), Some(achievements(10, 50)))
            .expect("comparison should succeed");

        assert_eq!(
            result,
            AchievementComparison {
                total: 50,
                user: SideProgress {
                    unlocked: 25,
                    percentage: 50
                },
                friend: SideProgress {
                    unlocked: 10,
                    percentage: 20
                },
            }
        );
    }

    #[test]
    fn test_compare_progress_no_achievements() {
        let result = compare_progress(Some(Vec::new()), Some(Vec::new()));
        assert!(matches!(result, Err(AppError::NoAchievements)));
    }

    #[test]
    fn test_compare_progress_user_data_missing() {
        let result = compare_progress(None, Some(achievements(3, 10)));
        assert!(matches!(
            result,
            Err(AppError::AchievementsUnavailable(Side::User))
        ));
    }

    #[test]
    fn test_compare_progress_friend_data_missing() {
        let result = compare_progress(Some(achievements(3, 10)), None);
        assert!(matches!(
            result,
            Err(AppError::AchievementsUnavailable(Side::Friend))
        ));
    }

    #[test]
    fn test_missing_friend_data_reported_before_empty_total() {
        // Both conditions hold; the unavailable side wins, matching the
        // check order of the comparison.
        let result = compare_progress(Some(Vec::new()), None);
        assert!(matches!(
            result,
            Err(AppError::AchievementsUnavailable(Side::Friend))
        ));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33); // 33.33… rounds down
        assert_eq!(percentage(2, 3), 67); // 66.67… rounds up
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds half up
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(0, 7), 0);
        assert_eq!(percentage(7, 7), 100);
    }

    #[test]
    fn test_total_comes_from_user_list() {
        // Known skew: if the provider ever returns mismatched list lengths,
        // the friend's percentage is computed against the user's total.
        let result =
            compare_progress(Some(achievements(5, 10)), Some(achievements(6, 12))).unwrap();

        assert_eq!(result.total, 10);
        assert_eq!(result.friend.unlocked, 6);
        assert_eq!(result.friend.percentage, 60);
    }
}

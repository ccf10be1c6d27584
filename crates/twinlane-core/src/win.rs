//! Match win check.
//!
//! The phase machine never ends a match; callers ask [`check_winner`] after
//! each transition. Player 1 is checked first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{Lane, PlayerId};
use crate::state::GameState;

/// Why a player won.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WinReason {
    /// Both enemy towers are at 0.
    DestroyBothTowers,
    /// One enemy tower is down and enough damage went through it to the nexus.
    PostTowerNexusDamage,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DestroyBothTowers => write!(f, "destroyed both enemy towers"),
            Self::PostTowerNexusDamage => write!(f, "broke through a lane into the enemy nexus"),
        }
    }
}

/// A decided match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Victory {
    /// The winner.
    pub winner: PlayerId,
    /// How they won.
    pub reason: WinReason,
}

impl fmt::Display for Victory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wins: {}", self.winner, self.reason)
    }
}

/// Returns the winner, if any.
#[must_use]
pub fn check_winner(state: &GameState) -> Option<Victory> {
    PlayerId::ALL.into_iter().find_map(|player| {
        let enemy = player.opponent();
        let down = |lane: Lane| state.towers[lane][enemy] == 0;
        if Lane::ALL.into_iter().all(down) {
            return Some(Victory {
                winner: player,
                reason: WinReason::DestroyBothTowers,
            });
        }
        let tally = &state.metadata.lane_nexus_damage_after_tower[player];
        let threshold = state.rules.post_tower_nexus_damage_to_win;
        Lane::ALL
            .into_iter()
            .any(|lane| down(lane) && tally[lane] >= threshold)
            .then_some(Victory {
                winner: player,
                reason: WinReason::PostTowerNexusDamage,
            })
    })
}

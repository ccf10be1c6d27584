//! # Twinlane Core
//!
//! Rules core for a two-player, two-lane card battler.
//!
//! This crate owns the deterministic game rules: positional combat on each
//! lane, the turn-phase state machine and the lifecycle effects that hang off
//! it (deaths, cooldowns, stacking, income). It has no UI and no I/O beyond
//! JSON snapshot import/export.
//!
//! ## Architecture
//!
//! - **Data model**: [`card`], [`battlefield`] and [`state`] hold the
//!   persisted snapshot shape; [`config`] holds the numeric rules.
//! - **Resolvers**: [`resolver`] computes targets, single attacks and whole
//!   combat batches as pure functions over a lane.
//! - **Transitions**: [`intent`] is the only entry point that changes a
//!   snapshot. It dispatches to [`deploy`], [`lifecycle`] and [`turn`].
//! - **Outcome**: [`win`] decides the match; [`persistence`] loads and saves.
//!
//! ## Usage
//!
//! ```
//! use twinlane_core::{apply_intent, check_winner, GameState, Intent, Phase, PlayerId};
//!
//! let mut state = GameState::default();
//! for player in PlayerId::ALL {
//!     state = apply_intent(&state, Intent::SetPassed { player, passed: true })
//!         .unwrap()
//!         .state;
//! }
//! let next = apply_intent(&state, Intent::AdvancePhase).unwrap();
//! assert_eq!(next.state.metadata.current_phase, Phase::CombatA);
//! assert!(check_winner(&next.state).is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod battlefield;
pub mod card;
pub mod config;
pub mod deploy;
pub mod error;
pub mod intent;
pub mod lifecycle;
pub mod persistence;
pub mod resolver;
pub mod state;
pub mod turn;
pub mod win;

pub use battlefield::{Battlefield, PerLane, PerPlayer, Towers};
pub use card::{Card, CardId, CardKind, CardType, Lane, Location, PlayerId, Slot};
pub use config::RulesConfig;
pub use error::{InvariantViolation, RuleError, SnapshotError};
pub use intent::{apply_intent, Intent, Transition};
pub use persistence::{export_json, import_json};
pub use resolver::{resolve_attack, resolve_combat, AttackTarget, CombatLogEntry, CombatReport};
pub use state::{GameState, Phase, PlayerFlags};
pub use turn::advance_phase;
pub use win::{check_winner, Victory, WinReason};

#[cfg(test)]
mod tests;

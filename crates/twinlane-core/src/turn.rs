//! Turn-phase state machine.
//!
//! The machine cycles `play → combatA → adjust → combatB → play` and hands
//! the turn to the other player on the last step. It owns every side effect
//! tied to a phase boundary:
//!
//! - `play → combatA`: rejected unless both players passed
//! - `combatA → adjust`: lane A combat for the active player
//! - `combatB → play`: lane B combat, then income, rotation, mana refill,
//!   cooldown expiry and hero healing
//!
//! Entering a combat phase fills that lane's target assignments with
//! positional defaults, keeping any assignment a player already stored for a
//! unit still on the lane.
//!
//! # Atomicity
//!
//! [`advance_phase`] works on a clone of the snapshot. A rejected advance
//! returns the error and the caller's snapshot is untouched; an accepted one
//! returns the complete next snapshot.
//!
//! # Example
//!
//! ```
//! use twinlane_core::state::{GameState, Phase, PlayerFlags};
//! use twinlane_core::card::PlayerId;
//! use twinlane_core::turn::advance_phase;
//!
//! let mut state = GameState::default();
//! assert!(advance_phase(&state).is_err());
//!
//! for player in PlayerId::ALL {
//!     state.metadata.flags[player].insert(PlayerFlags::PASSED);
//! }
//! let next = advance_phase(&state).unwrap();
//! assert_eq!(next.state.metadata.current_phase, Phase::CombatA);
//! ```

use tracing::{debug, info};

use crate::card::{CardId, Lane, PlayerId};
use crate::error::RuleError;
use crate::lifecycle;
use crate::resolver::{default_targets, resolve_combat, CombatReport};
use crate::state::{GameState, Phase, PlayerFlags};

/// Result of an accepted phase advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseAdvance {
    /// The snapshot after the advance.
    pub state: GameState,
    /// Combat summary when the advance resolved a lane.
    pub combat: Option<CombatReport>,
}

/// Advances the game by one phase.
///
/// # Errors
///
/// Returns [`RuleError::PlayersNotPassed`] when leaving `play` before both
/// players have passed. Every other advance is unconditional.
pub fn advance_phase(state: &GameState) -> Result<PhaseAdvance, RuleError> {
    let phase = state.metadata.current_phase;
    if phase == Phase::Play && !state.metadata.both_passed() {
        let err = RuleError::PlayersNotPassed {
            player1: state.metadata.has_flag(PlayerId::Player1, PlayerFlags::PASSED),
            player2: state.metadata.has_flag(PlayerId::Player2, PlayerFlags::PASSED),
        };
        debug!(%err, "phase advance rejected");
        return Err(err);
    }

    let mut next = state.clone();
    let combat = phase.combat_lane().map(|lane| run_lane_combat(&mut next, lane));
    if phase == Phase::CombatB {
        end_turn(&mut next);
    }

    let entered = phase.next();
    next.metadata.current_phase = entered;
    if let Some(lane) = entered.combat_lane() {
        prepare_targets(&mut next, lane);
    }

    info!(
        from = %phase,
        to = %entered,
        active = %next.metadata.active_player,
        turn = next.metadata.current_turn,
        "phase advanced"
    );
    Ok(PhaseAdvance {
        state: next,
        combat,
    })
}

/// Fills a lane's assignments with defaults, keeping stored choices for units
/// of the active player still on the lane.
fn prepare_targets(state: &mut GameState, lane: Lane) {
    let active = state.metadata.active_player;
    let field = &state.battlefields[lane];
    let mut targets = default_targets(field, active);
    let stored = std::mem::take(&mut state.combat_targets[lane]);
    for (attacker, target) in stored {
        if targets.contains_key(&attacker) {
            targets.insert(attacker, target);
        }
    }
    state.combat_targets[lane] = targets;
}

/// Resolves one lane for the active player and folds the result back in.
fn run_lane_combat(state: &mut GameState, lane: Lane) -> CombatReport {
    let attacker = state.metadata.active_player;
    let defender = attacker.opponent();
    let assignments = std::mem::take(&mut state.combat_targets[lane]);

    let result = resolve_combat(
        &state.battlefields[lane],
        lane,
        &assignments,
        attacker,
        &state.towers,
    );

    state.battlefields[lane] = result.battlefield;
    state.towers = result.towers;
    if result.overflow_damage > 0 {
        state.nexus[defender] = state.nexus[defender].saturating_sub(result.overflow_damage);
        let dealt = &mut state.metadata.lane_nexus_damage_after_tower[attacker][lane];
        *dealt = dealt.saturating_add(result.overflow_damage);
    }

    let casualties: Vec<CardId> = result.casualties.iter().map(|card| card.id.clone()).collect();
    lifecycle::bury(state, result.casualties);

    let report = CombatReport {
        lane,
        attacker,
        log: result.combat_log,
        overflow_damage: result.overflow_damage,
        tower_hp: state.towers[lane][defender],
        nexus_hp: state.nexus[defender],
        casualties,
    };
    info!(
        %lane,
        %attacker,
        attacks = report.log.len(),
        damage = report.total_damage(),
        overflow = report.overflow_damage,
        tower_hp = report.tower_hp,
        nexus_hp = report.nexus_hp,
        "combat resolved"
    );
    report
}

/// Closes the active player's turn and opens the next one.
fn end_turn(state: &mut GameState) {
    let outgoing = state.metadata.active_player;
    let income = lifecycle::turn_income(state, outgoing);
    let gold = &mut state.metadata.resources[outgoing].gold;
    *gold = gold.saturating_add(income);

    for player in PlayerId::ALL {
        state.metadata.flags[player].remove(PlayerFlags::PASSED | PlayerFlags::MOVED_TO_BASE);
    }

    let incoming = outgoing.opponent();
    state.metadata.active_player = incoming;
    if incoming == PlayerId::Player1 {
        state.metadata.current_turn += 1;
    }

    let cap = state.rules.max_mana_cap;
    let resources = &mut state.metadata.resources[incoming];
    resources.max_mana = resources.max_mana.saturating_add(1).min(cap);
    resources.mana = resources.max_mana;

    let expired = lifecycle::expire_cooldowns(&mut state.metadata, &state.rules);
    lifecycle::heal_rested_heroes(state);

    info!(
        from = %outgoing,
        to = %incoming,
        turn = state.metadata.current_turn,
        income,
        expired_cooldowns = expired.len(),
        "turn rotated"
    );
}

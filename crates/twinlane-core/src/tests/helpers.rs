//! Test helper functions for building snapshots and driving turns.

use std::collections::BTreeMap;

use crate::battlefield::{Battlefield, PerLane, PerPlayer, Towers};
use crate::card::{Card, CardKind, GenericCard, HeroCard, Lane, PlayerId, Slot};
use crate::intent::{apply_intent, Intent, Transition};
use crate::resolver::CombatReport;
use crate::state::{GameState, Phase};

// =============================================================================
// Card factories
// =============================================================================

/// Creates a generic unit in its owner's hand.
pub fn grunt(id: &str, owner: PlayerId, attack: u32, health: u32) -> Card {
    Card::new(id, id, owner, CardKind::Generic(GenericCard::new(attack, health)))
}

/// Creates a hero in its owner's hand.
pub fn hero(id: &str, owner: PlayerId, attack: u32, health: u32) -> Card {
    Card::new(id, id, owner, CardKind::Hero(HeroCard::new(attack, health)))
}

/// Tower table with every tower at `hp`.
pub fn towers(hp: u32) -> Towers {
    PerLane::splat(PerPlayer::splat(hp))
}

/// Builds a lane from `slot -> (attack, health)` maps for both sides.
///
/// Card ids are `p1-<slot>` and `p2-<slot>`.
pub fn lane_with(
    lane: Lane,
    player1: &BTreeMap<u8, (u32, u32)>,
    player2: &BTreeMap<u8, (u32, u32)>,
) -> Battlefield {
    let mut field = Battlefield::new();
    for (owner, units, prefix) in [
        (PlayerId::Player1, player1, "p1"),
        (PlayerId::Player2, player2, "p2"),
    ] {
        for (&slot, &(attack, health)) in units {
            let id = format!("{prefix}-{slot}");
            field.insert(grunt(&id, owner, attack, health).placed(lane, Slot::new(slot)));
        }
    }
    field
}

// =============================================================================
// Turn drivers
// =============================================================================

/// Applies an intent that must be accepted.
pub fn step(state: &GameState, intent: Intent) -> Transition {
    let name = intent.name();
    apply_intent(state, intent).unwrap_or_else(|err| panic!("{name} rejected: {err}"))
}

/// Advances one phase, passing for both players first when in `play`.
pub fn advance(state: &GameState) -> Transition {
    let mut state = state.clone();
    if state.metadata.current_phase == Phase::Play {
        for player in PlayerId::ALL {
            state = step(&state, Intent::SetPassed { player, passed: true }).state;
        }
    }
    step(&state, Intent::AdvancePhase)
}

/// Advances until `phase` is reached, collecting every combat report.
pub fn advance_to(state: &GameState, phase: Phase) -> (GameState, Vec<CombatReport>) {
    let mut transition = advance(state);
    let mut reports: Vec<CombatReport> = transition.combat.take().into_iter().collect();
    while transition.state.metadata.current_phase != phase {
        transition = advance(&transition.state);
        reports.extend(transition.combat.take());
    }
    (transition.state, reports)
}

/// Plays out the rest of the active player's turn.
pub fn finish_turn(state: &GameState) -> (GameState, Vec<CombatReport>) {
    advance_to(state, Phase::Play)
}

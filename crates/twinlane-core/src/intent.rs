//! Player intents and the snapshot reducer.
//!
//! Every change to a match goes through [`apply_intent`]: it clones the
//! snapshot, applies one [`Intent`] to the clone and returns it. On rejection
//! the clone is dropped, so the caller's snapshot is never partially updated
//! and old and new snapshots can be diffed freely.
//!
//! # Example
//!
//! ```
//! use twinlane_core::card::PlayerId;
//! use twinlane_core::intent::{apply_intent, Intent};
//! use twinlane_core::state::{GameState, Phase};
//!
//! let state = GameState::default();
//! let state = apply_intent(&state, Intent::SetPassed { player: PlayerId::Player1, passed: true })
//!     .unwrap()
//!     .state;
//! assert!(apply_intent(&state, Intent::AdvancePhase).is_err());
//!
//! let state = apply_intent(&state, Intent::SetPassed { player: PlayerId::Player2, passed: true })
//!     .unwrap()
//!     .state;
//! let next = apply_intent(&state, Intent::AdvancePhase).unwrap();
//! assert_eq!(next.state.metadata.current_phase, Phase::CombatA);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::{Card, CardId, CardType, Lane, Location, PlayerId, Slot};
use crate::deploy;
use crate::error::RuleError;
use crate::lifecycle;
use crate::resolver::{can_target, AttackTarget, CombatReport};
use crate::state::{GameState, PlayerFlags};
use crate::turn::{advance_phase, PhaseAdvance};

/// One player action, in the persisted intent-log shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Intent {
    /// Place a unit on a lane, from hand, base or the other lane.
    Deploy {
        /// Card to place.
        card_id: CardId,
        /// Destination lane.
        lane: Lane,
        /// Destination slot; `None` stacks a generic or takes the first free slot.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slot: Option<Slot>,
    },
    /// Aim a unit at a target for the coming combat.
    SetAttackTarget {
        /// Attacking unit.
        unit_id: CardId,
        /// What it should hit.
        target: AttackTarget,
    },
    /// Advance the phase machine by one step.
    AdvancePhase,
    /// Manually correct a unit's health.
    AdjustHealth {
        /// The unit.
        card_id: CardId,
        /// Signed change.
        delta: i64,
    },
    /// Manually correct a tower's HP.
    AdjustTower {
        /// Tower lane.
        lane: Lane,
        /// Tower owner.
        player: PlayerId,
        /// Signed change.
        delta: i64,
    },
    /// Manually correct a nexus.
    AdjustNexus {
        /// Nexus owner.
        player: PlayerId,
        /// Signed change.
        delta: i64,
    },
    /// Set or clear a player's pass flag.
    SetPassed {
        /// The player.
        player: PlayerId,
        /// New flag value.
        passed: bool,
    },
    /// Retreat a card to its owner's base.
    MoveToBase {
        /// The card.
        card_id: CardId,
    },
    /// Move a battlefield card to another slot on its lane.
    ChangeSlot {
        /// The card.
        card_id: CardId,
        /// New slot.
        slot: Slot,
    },
    /// Flip the played marker of a spell in base.
    ToggleSpellPlayed {
        /// The spell.
        card_id: CardId,
    },
}

impl Intent {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Deploy { .. } => "deploy",
            Self::SetAttackTarget { .. } => "setAttackTarget",
            Self::AdvancePhase => "advancePhase",
            Self::AdjustHealth { .. } => "adjustHealth",
            Self::AdjustTower { .. } => "adjustTower",
            Self::AdjustNexus { .. } => "adjustNexus",
            Self::SetPassed { .. } => "setPassed",
            Self::MoveToBase { .. } => "moveToBase",
            Self::ChangeSlot { .. } => "changeSlot",
            Self::ToggleSpellPlayed { .. } => "toggleSpellPlayed",
        }
    }
}

/// An accepted intent: the next snapshot plus any combat it triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The snapshot after the intent.
    pub state: GameState,
    /// Combat summary when the intent resolved a lane.
    pub combat: Option<CombatReport>,
}

impl From<PhaseAdvance> for Transition {
    fn from(advance: PhaseAdvance) -> Self {
        Self {
            state: advance.state,
            combat: advance.combat,
        }
    }
}

/// Applies one intent to a snapshot.
///
/// # Errors
///
/// Returns the [`RuleError`] describing why the intent was rejected; the
/// input snapshot is never modified.
pub fn apply_intent(state: &GameState, intent: Intent) -> Result<Transition, RuleError> {
    let name = intent.name();
    let result = reduce(state, intent);
    if let Err(err) = &result {
        debug!(intent = name, %err, "intent rejected");
    }
    result
}

fn reduce(state: &GameState, intent: Intent) -> Result<Transition, RuleError> {
    let mut next = state.clone();
    match intent {
        Intent::Deploy { card_id, lane, slot } => deploy::deploy(&mut next, &card_id, lane, slot)?,
        Intent::SetAttackTarget { unit_id, target } => set_attack_target(&mut next, &unit_id, target)?,
        Intent::AdjustHealth { card_id, delta } => adjust_health(&mut next, &card_id, delta)?,
        Intent::AdjustTower { lane, player, delta } => {
            let hp = &mut next.towers[lane][player];
            *hp = lifecycle::apply_delta(*hp, delta, Some(next.rules.tower_hp));
        }
        Intent::AdjustNexus { player, delta } => {
            let hp = &mut next.nexus[player];
            *hp = lifecycle::apply_delta(*hp, delta, None);
        }
        Intent::SetPassed { player, passed } => {
            next.metadata.flags[player].set(PlayerFlags::PASSED, passed);
        }
        Intent::MoveToBase { card_id } => deploy::move_to_base(&mut next, &card_id)?,
        Intent::ChangeSlot { card_id, slot } => deploy::change_slot(&mut next, &card_id, slot)?,
        Intent::ToggleSpellPlayed { card_id } => toggle_spell_played(&mut next, &card_id)?,
        Intent::AdvancePhase => return advance_phase(state).map(Transition::from),
    }
    Ok(Transition {
        state: next,
        combat: None,
    })
}

/// Stores a target for one of the active player's slotted units.
fn set_attack_target(state: &mut GameState, unit_id: &CardId, target: AttackTarget) -> Result<(), RuleError> {
    let card = state
        .find_card(unit_id)
        .ok_or_else(|| RuleError::CardNotFound(unit_id.clone()))?;
    if !card.is_unit() {
        return Err(RuleError::NotAUnit(unit_id.clone()));
    }
    let active = state.metadata.active_player;
    if card.owner != active {
        return Err(RuleError::NotYourTurn {
            player: card.owner,
            active,
        });
    }
    let (Some(lane), Some(_)) = (card.location.lane(), card.slot) else {
        return Err(RuleError::NotOnBattlefield(unit_id.clone()));
    };
    if !can_target(card, &target, state.battlefield(lane)) {
        return Err(RuleError::IllegalTarget(unit_id.clone()));
    }
    debug!(unit = %unit_id, %lane, ?target, "attack target set");
    state.combat_targets[lane].insert(unit_id.clone(), target);
    Ok(())
}

/// Applies a manual health correction.
///
/// Increases stop at max health (combined max for a stack). A unit brought
/// to 0 dies with the usual bounty and cooldown wherever it is: heroes end up
/// in base, other units leave the game. A hero already resting at 0 is not
/// killed again.
fn adjust_health(state: &mut GameState, card_id: &CardId, delta: i64) -> Result<(), RuleError> {
    let card = state
        .find_card_mut(card_id)
        .ok_or_else(|| RuleError::CardNotFound(card_id.clone()))?;
    if !card.is_unit() {
        return Err(RuleError::NotAUnit(card_id.clone()));
    }
    let owner = card.owner;
    let lane = card.location.lane();
    let was_alive = card.is_alive();

    let shared = if let Some(link) = card.stack_mut() {
        link.health = lifecycle::apply_delta(link.health, delta, Some(link.max_health()));
        Some((link.partner.clone(), link.health))
    } else {
        if let Some(stats) = card.stats_mut() {
            stats.current_health = lifecycle::apply_delta(stats.current_health, delta, Some(stats.max_health));
        }
        None
    };
    let alive = card.is_alive();

    if let (Some(lane), Some((partner_id, health))) = (lane, &shared) {
        if let Some(link) = state
            .battlefield_mut(lane)
            .get_mut(owner, partner_id)
            .and_then(|partner| partner.stack_mut())
            .filter(|link| &link.partner == card_id)
        {
            link.health = *health;
        }
    }

    debug!(card = %card_id, delta, alive, "health adjusted");
    if alive {
        return Ok(());
    }
    if let Some(lane) = lane {
        lifecycle::kill_on_battlefield(state, lane, owner, card_id);
    } else if was_alive {
        let dead: Vec<Card> = state.take_card(card_id).into_iter().collect();
        lifecycle::bury(state, dead);
    }
    Ok(())
}

fn toggle_spell_played(state: &mut GameState, card_id: &CardId) -> Result<(), RuleError> {
    let is_spell_in_base = state
        .find_card(card_id)
        .is_some_and(|card| card.location == Location::Base && card.card_type() == CardType::Spell);
    if !is_spell_in_base {
        return Err(RuleError::NotASpellInBase(card_id.clone()));
    }
    let played = &mut state.metadata.played_spells;
    if played.remove(card_id).is_none() {
        played.insert(card_id.clone(), true);
    }
    Ok(())
}

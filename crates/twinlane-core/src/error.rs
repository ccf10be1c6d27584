//! Error types.
//!
//! Nothing in the rules core is fatal. A [`RuleError`] is a rejected intent:
//! the snapshot it was applied to is untouched and stays valid. A
//! [`SnapshotError`] comes from import/export of the persisted shape.

use thiserror::Error;

use crate::card::{CardId, Lane, PlayerId};
use crate::state::Phase;

/// User-visible rejection of an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// `play` can only be left once both players have passed.
    #[error("both players must pass before combat (player1 passed: {player1}, player2 passed: {player2})")]
    PlayersNotPassed {
        /// Whether player 1 has passed.
        player1: bool,
        /// Whether player 2 has passed.
        player2: bool,
    },

    /// The intent is not allowed in the current phase.
    #[error("cannot {action} during the {phase} phase")]
    WrongPhase {
        /// What was attempted.
        action: &'static str,
        /// The phase the game is in.
        phase: Phase,
    },

    /// Only the active player may act.
    #[error("it is {active}'s turn, not {player}'s")]
    NotYourTurn {
        /// Player who tried to act.
        player: PlayerId,
        /// Player whose turn it is.
        active: PlayerId,
    },

    /// No card with this id exists anywhere in the snapshot.
    #[error("card {0} not found")]
    CardNotFound(CardId),

    /// The card has no combat stats.
    #[error("card {0} is not a unit")]
    NotAUnit(CardId),

    /// The card must be on a battlefield for this intent.
    #[error("card {0} is not on a battlefield")]
    NotOnBattlefield(CardId),

    /// The slot is outside the lane.
    #[error("slot {slot} is outside 1..={limit}")]
    InvalidSlot {
        /// Requested slot.
        slot: u8,
        /// Highest valid slot.
        limit: u8,
    },

    /// Every slot on that side of the lane is taken.
    #[error("{lane} is full for {player}")]
    BattlefieldFull {
        /// The lane.
        lane: Lane,
        /// The side that is full.
        player: PlayerId,
    },

    /// Not enough mana to pay for the deploy.
    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana {
        /// Mana cost.
        required: u32,
        /// Mana available.
        available: u32,
    },

    /// The unit has no health left and cannot be deployed.
    #[error("card {0} has no health left")]
    DeadUnit(CardId),

    /// The card died recently and cannot be redeployed yet.
    #[error("card {card} is on death cooldown since turn {since}")]
    DeathCooldown {
        /// The card.
        card: CardId,
        /// Turn the card died.
        since: u32,
    },

    /// A player may move one hero to base per turn.
    #[error("{0} already moved a hero to base this turn")]
    HeroAlreadyMovedToBase(PlayerId),

    /// The attack target is not legal for this unit.
    #[error("illegal attack target for {0}")]
    IllegalTarget(CardId),

    /// Only spells in base can be marked as played.
    #[error("card {0} is not a spell in base")]
    NotASpellInBase(CardId),
}

/// A snapshot that parses but breaks a data-model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A card off the battlefield still has a slot.
    #[error("card {0} has a slot but is not on a battlefield")]
    SlotOffBattlefield(CardId),

    /// A battlefield card has no slot.
    #[error("card {0} is on a battlefield without a slot")]
    MissingSlot(CardId),

    /// A battlefield card's slot is outside the lane.
    #[error("card {card} sits in slot {slot}, outside 1..={limit}")]
    SlotOutOfRange {
        /// The card.
        card: CardId,
        /// Its slot.
        slot: u8,
        /// Highest valid slot.
        limit: u8,
    },

    /// Two slot groups share one slot.
    #[error("slot {slot} of {lane} is occupied twice on {player}'s side")]
    SlotConflict {
        /// The lane.
        lane: Lane,
        /// The side.
        player: PlayerId,
        /// The contested slot.
        slot: u8,
    },

    /// A card is stored in a collection that disagrees with its own fields.
    #[error("card {0} is stored in a zone that does not match its location or owner")]
    MisplacedCard(CardId),

    /// A unit with no health is still on a battlefield.
    #[error("card {0} is on a battlefield with no health left")]
    DeadUnitOnBattlefield(CardId),

    /// A unit's health is above its (stacked) max health.
    #[error("card {card} has {health} health, above its maximum of {max_health}")]
    HealthAboveMax {
        /// The card.
        card: CardId,
        /// Offending health.
        health: u32,
        /// Max health it must stay within.
        max_health: u32,
    },

    /// Tower HP outside `[0, tower_hp]`.
    #[error("{player}'s tower on {lane} has {hp} HP, above the maximum")]
    TowerOutOfRange {
        /// The lane.
        lane: Lane,
        /// Tower owner.
        player: PlayerId,
        /// Offending HP.
        hp: u32,
    },

    /// Mana outside `[0, max_mana_cap]` or above max mana.
    #[error("{player} has {mana}/{max_mana} mana, outside the cap")]
    ManaOutOfRange {
        /// The player.
        player: PlayerId,
        /// Current mana.
        mana: u32,
        /// Max mana.
        max_mana: u32,
    },
}

/// Import/export failure for the persisted snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The JSON could not be read or written.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but the snapshot is not a valid game state.
    #[error("invalid snapshot: {0}")]
    Invalid(#[from] InvariantViolation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = RuleError::InsufficientMana {
            required: 4,
            available: 1,
        };
        assert_eq!(err.to_string(), "not enough mana: need 4, have 1");

        let err = RuleError::WrongPhase {
            action: "deploy",
            phase: Phase::CombatA,
        };
        assert_eq!(err.to_string(), "cannot deploy during the combatA phase");
    }

    #[test]
    fn invariant_violations_convert_into_snapshot_errors() {
        let err: SnapshotError = InvariantViolation::MissingSlot(CardId::new("x")).into();
        assert!(matches!(err, SnapshotError::Invalid(_)));
    }
}

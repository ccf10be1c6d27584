//! The authoritative game-state snapshot.
//!
//! [`GameState`] is the single unit every intent reads and replaces. It holds
//! all zones, tower and nexus HP, turn metadata, the pending combat target
//! assignments and the [`RulesConfig`]; nothing that affects play lives
//! outside it, so a re-imported snapshot behaves exactly like the one it
//! was exported from.

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::battlefield::{Battlefield, PerLane, PerPlayer, Towers};
use crate::card::{Card, CardId, Lane, Location, PlayerId, Slot};
use crate::config::RulesConfig;
use crate::error::InvariantViolation;
use crate::resolver::TargetAssignments;

// =============================================================================
// Phase
// =============================================================================

/// Turn-phase discriminant.
///
/// Cycles `play → combatA → adjust → combatB → play` (next player).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Deploy and reposition; left once both players pass.
    #[default]
    Play,
    /// Lane A combat for the active player.
    CombatA,
    /// Between the two combats.
    Adjust,
    /// Lane B combat for the active player; leaving it ends the turn.
    CombatB,
}

impl Phase {
    /// Returns the phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Play => Self::CombatA,
            Self::CombatA => Self::Adjust,
            Self::Adjust => Self::CombatB,
            Self::CombatB => Self::Play,
        }
    }

    /// Returns the lane resolved when leaving this phase, if it is a combat phase.
    #[must_use]
    pub const fn combat_lane(self) -> Option<Lane> {
        match self {
            Self::CombatA => Some(Lane::A),
            Self::CombatB => Some(Lane::B),
            Self::Play | Self::Adjust => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => write!(f, "play"),
            Self::CombatA => write!(f, "combatA"),
            Self::Adjust => write!(f, "adjust"),
            Self::CombatB => write!(f, "combatB"),
        }
    }
}

// =============================================================================
// Metadata
// =============================================================================

bitflags! {
    /// Per-player flags that expire when the turn rotates.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PlayerFlags: u8 {
        /// The player is done acting in the `play` phase.
        const PASSED = 1 << 0;
        /// The player already moved a hero to base this turn.
        const MOVED_TO_BASE = 1 << 1;
    }
}

/// Mana, gold and shop tier of one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResources {
    /// Mana available this turn, in `[0, max_mana]`.
    pub mana: u32,
    /// Mana refilled at the start of the player's turn, capped by the rules.
    pub max_mana: u32,
    /// Gold for the shop.
    pub gold: u32,
    /// Shop tier.
    pub tier: u8,
}

/// Turn bookkeeping for the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    /// Increments each time the rotation returns to player 1.
    pub current_turn: u32,
    /// Player whose turn it is.
    pub active_player: PlayerId,
    /// Current phase.
    pub current_phase: Phase,
    /// Mana, gold and tier per player.
    pub resources: PerPlayer<PlayerResources>,
    /// Pass and moved-to-base flags per player.
    pub flags: PerPlayer<PlayerFlags>,
    /// Card id to the turn it died. Absent ids may be redeployed.
    #[serde(default)]
    pub death_cooldowns: BTreeMap<CardId, u32>,
    /// Spells in base marked as already played.
    #[serde(default)]
    pub played_spells: BTreeMap<CardId, bool>,
    /// Nexus damage each attacker dealt through a destroyed tower, per lane.
    #[serde(default)]
    pub lane_nexus_damage_after_tower: PerPlayer<PerLane<u32>>,
}

impl GameMetadata {
    /// Returns true if the player has the flag set.
    #[must_use]
    pub fn has_flag(&self, player: PlayerId, flag: PlayerFlags) -> bool {
        self.flags[player].contains(flag)
    }

    /// Returns true if both players have passed.
    #[must_use]
    pub fn both_passed(&self) -> bool {
        PlayerId::ALL
            .iter()
            .all(|player| self.has_flag(*player, PlayerFlags::PASSED))
    }

    /// Returns the turn a card died on, if its cooldown is still active.
    #[must_use]
    pub fn cooldown_since(&self, id: &CardId) -> Option<u32> {
        self.death_cooldowns.get(id).copied()
    }
}

// =============================================================================
// Game state
// =============================================================================

/// Complete match snapshot.
///
/// Intents never mutate a snapshot in place from the caller's point of view:
/// the reducer clones, applies, and hands back a new snapshot, so the
/// previous one stays available for diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Cards in hand per player.
    pub hands: PerPlayer<Vec<Card>>,
    /// Cards in base per player.
    pub bases: PerPlayer<Vec<Card>>,
    /// The two lanes, persisted as `battlefieldA` and `battlefieldB`.
    #[serde(flatten)]
    pub battlefields: PerLane<Battlefield>,
    /// Tower HP per lane per owner.
    pub towers: Towers,
    /// Nexus HP per player, floored at 0.
    pub nexus: PerPlayer<u32>,
    /// Turn bookkeeping.
    pub metadata: GameMetadata,
    /// Declared attack targets per lane, keyed by attacker id.
    #[serde(default)]
    pub combat_targets: PerLane<TargetAssignments>,
    /// Rules constants this match plays by.
    #[serde(default)]
    pub rules: RulesConfig,
}

impl GameState {
    /// Creates the opening snapshot of a match.
    ///
    /// Player 1 is active on turn 1 in `play` with 1/1 mana; player 2 starts
    /// at 0/0 and reaches 1/1 on their first rotation.
    #[must_use]
    pub fn new(rules: RulesConfig) -> Self {
        let starting = PlayerResources {
            mana: 0,
            max_mana: 0,
            gold: rules.starting_gold,
            tier: 1,
        };
        let opener = PlayerResources {
            mana: 1,
            max_mana: 1,
            ..starting
        };
        Self {
            hands: PerPlayer::default(),
            bases: PerPlayer::default(),
            battlefields: PerLane::default(),
            towers: PerLane::splat(PerPlayer::splat(rules.tower_hp)),
            nexus: PerPlayer::splat(rules.nexus_hp),
            metadata: GameMetadata {
                current_turn: 1,
                active_player: PlayerId::Player1,
                current_phase: Phase::Play,
                resources: PerPlayer::new(opener, starting),
                flags: PerPlayer::default(),
                death_cooldowns: BTreeMap::new(),
                played_spells: BTreeMap::new(),
                lane_nexus_damage_after_tower: PerPlayer::default(),
            },
            combat_targets: PerLane::default(),
            rules,
        }
    }

    /// Returns a lane.
    #[must_use]
    pub fn battlefield(&self, lane: Lane) -> &Battlefield {
        &self.battlefields[lane]
    }

    /// Returns a lane for mutation.
    #[must_use]
    pub fn battlefield_mut(&mut self, lane: Lane) -> &mut Battlefield {
        &mut self.battlefields[lane]
    }

    /// Adds a card to its owner's hand.
    pub fn add_to_hand(&mut self, card: Card) {
        let card = card.unplaced(Location::Hand);
        self.hands[card.owner].push(card);
    }

    /// Adds a card to its owner's base.
    pub fn add_to_base(&mut self, card: Card) {
        let card = card.unplaced(Location::Base);
        self.bases[card.owner].push(card);
    }

    /// Places a card on a lane slot.
    pub fn add_to_battlefield(&mut self, card: Card, lane: Lane, slot: Slot) {
        self.battlefields[lane].insert(card.placed(lane, slot));
    }

    /// Looks a card up in every zone.
    #[must_use]
    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        PlayerId::ALL
            .iter()
            .flat_map(|player| self.hands[*player].iter().chain(self.bases[*player].iter()))
            .chain(Lane::ALL.iter().flat_map(|lane| self.battlefields[*lane].cards()))
            .find(|card| &card.id == id)
    }

    /// Looks a card up in every zone for mutation.
    ///
    /// Battlefield slots must not be changed through this reference.
    #[must_use]
    pub fn find_card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        let (owner, location) = {
            let card = self.find_card(id)?;
            (card.owner, card.location)
        };
        match location {
            Location::Hand => self.hands[owner].iter_mut().find(|card| &card.id == id),
            Location::Base => self.bases[owner].iter_mut().find(|card| &card.id == id),
            Location::BattlefieldA | Location::BattlefieldB => {
                let lane = location.lane()?;
                self.battlefields[lane].get_mut(owner, id)
            }
        }
    }

    /// Removes a card from whichever zone holds it.
    ///
    /// Battlefield removal is raw: stack partners are not touched.
    pub fn take_card(&mut self, id: &CardId) -> Option<Card> {
        let (owner, location) = {
            let card = self.find_card(id)?;
            (card.owner, card.location)
        };
        match location {
            Location::Hand => take_from(&mut self.hands[owner], id),
            Location::Base => take_from(&mut self.bases[owner], id),
            Location::BattlefieldA | Location::BattlefieldB => {
                let lane = location.lane()?;
                self.battlefields[lane].remove(owner, id)
            }
        }
    }

    /// Cards a player holds in hand and on either battlefield.
    pub fn fielded_and_held(&self, player: PlayerId) -> impl Iterator<Item = &Card> {
        self.hands[player].iter().chain(
            Lane::ALL
                .iter()
                .flat_map(move |lane| self.battlefields[*lane].side(player).iter()),
        )
    }

    /// Checks every data-model invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let limit = self.rules.slot_limit;

        for player in PlayerId::ALL {
            for (zone, location) in [
                (&self.hands[player], Location::Hand),
                (&self.bases[player], Location::Base),
            ] {
                for card in zone {
                    if card.owner != player || card.location != location {
                        return Err(InvariantViolation::MisplacedCard(card.id.clone()));
                    }
                    if card.slot.is_some() {
                        return Err(InvariantViolation::SlotOffBattlefield(card.id.clone()));
                    }
                    check_health(card)?;
                }
            }

            let resources = self.metadata.resources[player];
            if resources.max_mana > self.rules.max_mana_cap || resources.mana > resources.max_mana
            {
                return Err(InvariantViolation::ManaOutOfRange {
                    player,
                    mana: resources.mana,
                    max_mana: resources.max_mana,
                });
            }
        }

        for lane in Lane::ALL {
            let field = &self.battlefields[lane];
            for player in PlayerId::ALL {
                let hp = self.towers[lane][player];
                if hp > self.rules.tower_hp {
                    return Err(InvariantViolation::TowerOutOfRange { lane, player, hp });
                }

                let mut seen: BTreeMap<Slot, &Card> = BTreeMap::new();
                for card in field.side(player) {
                    if card.owner != player || card.location != Location::battlefield(lane) {
                        return Err(InvariantViolation::MisplacedCard(card.id.clone()));
                    }
                    let Some(slot) = card.slot else {
                        return Err(InvariantViolation::MissingSlot(card.id.clone()));
                    };
                    if !slot.is_within(limit) {
                        return Err(InvariantViolation::SlotOutOfRange {
                            card: card.id.clone(),
                            slot: slot.get(),
                            limit,
                        });
                    }
                    if card.is_unit() && !card.is_alive() {
                        return Err(InvariantViolation::DeadUnitOnBattlefield(card.id.clone()));
                    }
                    check_health(card)?;
                    if let Some(other) = seen.insert(slot, card) {
                        let paired = card.stack().is_some_and(|link| link.partner == other.id);
                        if !paired {
                            return Err(InvariantViolation::SlotConflict {
                                lane,
                                player,
                                slot: slot.get(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

/// Health may never exceed max health, own or shared by a stack. A link
/// without a persisted max (0) falls back to its current health.
fn check_health(card: &Card) -> Result<(), InvariantViolation> {
    let Some(stats) = card.stats() else {
        return Ok(());
    };
    let above = |health, max_health| InvariantViolation::HealthAboveMax {
        card: card.id.clone(),
        health,
        max_health,
    };
    if stats.current_health > stats.max_health {
        return Err(above(stats.current_health, stats.max_health));
    }
    match card.stack() {
        Some(link) if link.max_health > 0 && link.health > link.max_health => {
            Err(above(link.health, link.max_health))
        }
        _ => Ok(()),
    }
}

fn take_from(zone: &mut Vec<Card>, id: &CardId) -> Option<Card> {
    let index = zone.iter().position(|card| &card.id == id)?;
    Some(zone.remove(index))
}

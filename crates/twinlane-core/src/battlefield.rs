//! Battlefield storage for the two lanes.
//!
//! A [`Battlefield`] holds the cards each player has deployed to one lane. It
//! provides:
//! - Per-player card collections kept sorted by `(slot, id)`
//! - Slot lookups that understand stacked pairs
//! - Combatant iteration in a deterministic order
//!
//! [`PerPlayer`] and [`PerLane`] are the keyed pairs used everywhere the game
//! state splits by seat or by lane (towers, nexus, resources, targets).
//!
//! # Slot groups
//!
//! At most one non-stacked card occupies a slot. A stacked pair shares one
//! slot and fights as a single unit: the member with the smaller id is the
//! *leader* (it attacks and is the default target); the other is the
//! *follower* and never acts on its own.
//!
//! # Example
//!
//! ```
//! use twinlane_core::battlefield::Battlefield;
//! use twinlane_core::card::{Card, CardKind, GenericCard, Lane, PlayerId, Slot};
//!
//! let mut field = Battlefield::new();
//! field.insert(
//!     Card::new("g-1", "Grunt", PlayerId::Player1, CardKind::Generic(GenericCard::new(2, 2)))
//!         .placed(Lane::A, Slot::new(3)),
//! );
//!
//! assert!(field.leader_at(PlayerId::Player1, Slot::new(3)).is_some());
//! assert_eq!(field.first_free_slot(PlayerId::Player1, 5), Some(Slot::new(1)));
//! ```

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId, Lane, PlayerId, Slot};

// =============================================================================
// Keyed pairs
// =============================================================================

/// A value per player, indexable by [`PlayerId`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    /// Value for player 1.
    pub player1: T,
    /// Value for player 2.
    pub player2: T,
}

impl<T> PerPlayer<T> {
    /// Creates a pair from both values.
    pub const fn new(player1: T, player2: T) -> Self {
        Self { player1, player2 }
    }

    /// Iterates `(player, value)` in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        [(PlayerId::Player1, &self.player1), (PlayerId::Player2, &self.player2)].into_iter()
    }
}

impl<T: Clone> PerPlayer<T> {
    /// Creates a pair with the same value for both players.
    pub fn splat(value: T) -> Self {
        Self {
            player1: value.clone(),
            player2: value,
        }
    }
}

impl<T> Index<PlayerId> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        match player {
            PlayerId::Player1 => &self.player1,
            PlayerId::Player2 => &self.player2,
        }
    }
}

impl<T> IndexMut<PlayerId> for PerPlayer<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        match player {
            PlayerId::Player1 => &mut self.player1,
            PlayerId::Player2 => &mut self.player2,
        }
    }
}

/// A value per lane, indexable by [`Lane`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerLane<T> {
    /// Value for battlefield A.
    #[serde(rename = "battlefieldA")]
    pub a: T,
    /// Value for battlefield B.
    #[serde(rename = "battlefieldB")]
    pub b: T,
}

impl<T> PerLane<T> {
    /// Creates a pair from both values.
    pub const fn new(a: T, b: T) -> Self {
        Self { a, b }
    }
}

impl<T: Clone> PerLane<T> {
    /// Creates a pair with the same value for both lanes.
    pub fn splat(value: T) -> Self {
        Self {
            a: value.clone(),
            b: value,
        }
    }
}

impl<T> Index<Lane> for PerLane<T> {
    type Output = T;

    fn index(&self, lane: Lane) -> &T {
        match lane {
            Lane::A => &self.a,
            Lane::B => &self.b,
        }
    }
}

impl<T> IndexMut<Lane> for PerLane<T> {
    fn index_mut(&mut self, lane: Lane) -> &mut T {
        match lane {
            Lane::A => &mut self.a,
            Lane::B => &mut self.b,
        }
    }
}

/// Tower HP per lane, per owning player. Values stay in `[0, tower_hp]`.
pub type Towers = PerLane<PerPlayer<u32>>;

// =============================================================================
// Battlefield
// =============================================================================

/// One lane's deployed cards, split by owner.
///
/// Each side is kept sorted by `(slot, id)` so that iteration order never
/// depends on deployment history. Deserialized sides are re-sorted, so the
/// order of a persisted snapshot does not matter either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBattlefield")]
pub struct Battlefield {
    player1: Vec<Card>,
    player2: Vec<Card>,
}

/// Persisted form of a [`Battlefield`], in file order.
#[derive(Deserialize)]
struct RawBattlefield {
    player1: Vec<Card>,
    player2: Vec<Card>,
}

impl From<RawBattlefield> for Battlefield {
    fn from(raw: RawBattlefield) -> Self {
        let mut field = Self {
            player1: raw.player1,
            player2: raw.player2,
        };
        sort_side(&mut field.player1);
        sort_side(&mut field.player2);
        field
    }
}

impl Battlefield {
    /// Creates an empty battlefield.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns one player's cards, sorted by `(slot, id)`.
    #[must_use]
    pub fn side(&self, player: PlayerId) -> &[Card] {
        match player {
            PlayerId::Player1 => &self.player1,
            PlayerId::Player2 => &self.player2,
        }
    }

    fn side_mut(&mut self, player: PlayerId) -> &mut Vec<Card> {
        match player {
            PlayerId::Player1 => &mut self.player1,
            PlayerId::Player2 => &mut self.player2,
        }
    }

    /// Iterates every card on the lane, player 1 first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.player1.iter().chain(self.player2.iter())
    }

    /// Looks up a card on one player's side.
    #[must_use]
    pub fn get(&self, player: PlayerId, id: &CardId) -> Option<&Card> {
        self.side(player).iter().find(|card| &card.id == id)
    }

    /// Looks up a card on one player's side for mutation.
    ///
    /// Callers must not change `slot` through this reference; use
    /// [`Battlefield::move_to_slot`] so ordering is maintained.
    #[must_use]
    pub fn get_mut(&mut self, player: PlayerId, id: &CardId) -> Option<&mut Card> {
        self.side_mut(player).iter_mut().find(|card| &card.id == id)
    }

    /// Looks up a card on either side.
    #[must_use]
    pub fn find(&self, id: &CardId) -> Option<&Card> {
        self.cards().find(|card| &card.id == id)
    }

    /// Returns true if the card is on the given player's side.
    #[must_use]
    pub fn contains(&self, player: PlayerId, id: &CardId) -> bool {
        self.get(player, id).is_some()
    }

    /// Returns the number of cards on a side.
    #[must_use]
    pub fn len(&self, player: PlayerId) -> usize {
        self.side(player).len()
    }

    /// Returns true if neither side has cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player1.is_empty() && self.player2.is_empty()
    }

    /// Iterates every card sharing a slot on one side (one card, or a stacked pair).
    pub fn occupants(&self, player: PlayerId, slot: Slot) -> impl Iterator<Item = &Card> {
        self.side(player)
            .iter()
            .filter(move |card| card.slot == Some(slot))
    }

    /// Returns the card that fights for a slot: the lowest id in the slot group.
    #[must_use]
    pub fn leader_at(&self, player: PlayerId, slot: Slot) -> Option<&Card> {
        // Sides are sorted by (slot, id), so the first occupant is the leader.
        self.occupants(player, slot).next()
    }

    /// Returns the stack partner of a card, if it is stacked and the partner is present.
    #[must_use]
    pub fn stack_partner(&self, card: &Card) -> Option<&Card> {
        let link = card.stack()?;
        self.get(card.owner, &link.partner)
    }

    /// Returns true if the card is the follower half of a present stacked pair.
    #[must_use]
    pub fn is_stack_follower(&self, card: &Card) -> bool {
        self.stack_partner(card)
            .is_some_and(|partner| partner.id < card.id)
    }

    /// Returns the acting units of one side in `(slot, id)` order.
    ///
    /// Only slotted unit cards are included, and stack followers are skipped.
    #[must_use]
    pub fn combatants(&self, player: PlayerId) -> Vec<&Card> {
        self.side(player)
            .iter()
            .filter(|card| card.slot.is_some() && card.is_unit())
            .filter(|card| !self.is_stack_follower(card))
            .collect()
    }

    /// Returns the lowest slot in `1..=limit` with no occupant.
    #[must_use]
    pub fn first_free_slot(&self, player: PlayerId, limit: u8) -> Option<Slot> {
        Slot::all(limit).find(|slot| self.occupants(player, *slot).next().is_none())
    }

    /// Returns true if every slot in `1..=limit` is occupied.
    #[must_use]
    pub fn is_full(&self, player: PlayerId, limit: u8) -> bool {
        self.first_free_slot(player, limit).is_none()
    }

    /// Adds a card to its owner's side, keeping the side sorted.
    pub fn insert(&mut self, card: Card) {
        let side = self.side_mut(card.owner);
        side.push(card);
        sort_side(side);
    }

    /// Removes a card from one side and returns it unchanged.
    pub fn remove(&mut self, player: PlayerId, id: &CardId) -> Option<Card> {
        let side = self.side_mut(player);
        let index = side.iter().position(|card| &card.id == id)?;
        Some(side.remove(index))
    }

    /// Moves a card to another slot on the same side, keeping the side sorted.
    ///
    /// Returns false if the card is not on that side.
    pub fn move_to_slot(&mut self, player: PlayerId, id: &CardId, slot: Slot) -> bool {
        let side = self.side_mut(player);
        let Some(card) = side.iter_mut().find(|card| &card.id == id) else {
            return false;
        };
        card.slot = Some(slot);
        sort_side(side);
        true
    }
}

fn sort_side(side: &mut [Card]) {
    side.sort_by(|a, b| a.slot.cmp(&b.slot).then_with(|| a.id.cmp(&b.id)));
}

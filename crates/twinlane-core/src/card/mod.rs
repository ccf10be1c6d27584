//! Card module: identifiers, placement and the closed card sum type.
//!
//! This module provides the core card types for the rules engine:
//! - [`CardId`]: Opaque, immutable identifier for a card instance
//! - [`PlayerId`], [`Lane`], [`Location`], [`Slot`]: ownership and placement
//! - [`CardKind`]: Variant payloads (hero, signature, hybrid, generic, spell, item, artifact)
//! - [`Card`]: The shared base record plus its variant payload
//!
//! # Combat stats
//!
//! Whether a card fights is decided by matching on [`CardKind`]. Heroes,
//! signature cards, hybrids and generic units carry [`UnitStats`]; spells,
//! items and artifacts never reach a battlefield slot as combatants.
//!
//! # Example
//!
//! ```
//! use twinlane_core::card::{Card, CardKind, GenericCard, Lane, PlayerId, Slot};
//!
//! let grunt = Card::new("grunt-1", "Grunt", PlayerId::Player1, CardKind::Generic(GenericCard::new(2, 3)))
//!     .placed(Lane::A, Slot::new(2));
//!
//! assert_eq!(grunt.attack_power(), Some(2));
//! assert_eq!(grunt.effective_health(), Some(3));
//! assert_eq!(grunt.location.lane(), Some(Lane::A));
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{
    ArtifactCard, EquippedItem, GenericCard, HeroCard, ItemCard, SignatureCard, SpellCard,
    StackLink, UnitCard, UnitStats,
};

/// Unique identifier for a card instance.
///
/// Ids are opaque strings in the persisted shape. They are assigned when a
/// card is instantiated from a template and never change afterwards.
///
/// # Ordering
///
/// Ids order lexicographically. Combat uses this as the tie-break inside a
/// slot so that iteration order never depends on collection history.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a new `CardId` from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({})", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One of the two seats at the table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerId {
    /// First player; opens the match and closes each turn rotation.
    Player1,
    /// Second player.
    Player2,
}

impl PlayerId {
    /// Both players in seating order.
    pub const ALL: [Self; 2] = [Self::Player1, Self::Player2];

    /// Returns the other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player1 => write!(f, "player1"),
            Self::Player2 => write!(f, "player2"),
        }
    }
}

/// One of the two independent battlefields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lane {
    /// Battlefield A, resolved in the `combatA` phase.
    #[serde(rename = "battlefieldA")]
    A,
    /// Battlefield B, resolved in the `combatB` phase.
    #[serde(rename = "battlefieldB")]
    B,
}

impl Lane {
    /// Both lanes in resolution order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Returns the other lane.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "battlefieldA"),
            Self::B => write!(f, "battlefieldB"),
        }
    }
}

/// Zone a card currently sits in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    /// In the owner's hand.
    Hand,
    /// In the owner's base (resting heroes, played spells, returned units).
    Base,
    /// On battlefield A.
    BattlefieldA,
    /// On battlefield B.
    BattlefieldB,
}

impl Location {
    /// Returns the battlefield location for a lane.
    #[must_use]
    pub const fn battlefield(lane: Lane) -> Self {
        match lane {
            Lane::A => Self::BattlefieldA,
            Lane::B => Self::BattlefieldB,
        }
    }

    /// Returns the lane if this location is a battlefield.
    #[must_use]
    pub const fn lane(self) -> Option<Lane> {
        match self {
            Self::BattlefieldA => Some(Lane::A),
            Self::BattlefieldB => Some(Lane::B),
            Self::Hand | Self::Base => None,
        }
    }

    /// Returns true if this location is one of the two battlefields.
    #[must_use]
    pub const fn is_battlefield(self) -> bool {
        self.lane().is_some()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hand => write!(f, "hand"),
            Self::Base => write!(f, "base"),
            Self::BattlefieldA => write!(f, "battlefieldA"),
            Self::BattlefieldB => write!(f, "battlefieldB"),
        }
    }
}

/// Positional slot on a lane, counted from 1.
///
/// The upper bound comes from [`RulesConfig::slot_limit`](crate::config::RulesConfig),
/// so range checks live with the caller rather than the constructor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(u8);

impl Slot {
    /// Creates a slot from its 1-based position.
    #[must_use]
    pub const fn new(position: u8) -> Self {
        Self(position)
    }

    /// Returns the 1-based position.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns true if the slot lies in `1..=limit`.
    #[must_use]
    pub const fn is_within(self, limit: u8) -> bool {
        self.0 >= 1 && self.0 <= limit
    }

    /// Iterates every slot in `1..=limit` in ascending order.
    pub fn all(limit: u8) -> impl Iterator<Item = Self> {
        (1..=limit).map(Self)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminant of [`CardKind`], used for logging and quick checks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardType {
    /// Drafted champion; returns to base on death.
    Hero,
    /// Hero-bound unit card.
    Signature,
    /// Unit with an additional base effect.
    Hybrid,
    /// Plain unit; may stack with another generic unit.
    Generic,
    /// One-shot effect card.
    Spell,
    /// Equipment bought from the shop.
    Item,
    /// Persistent non-unit card.
    Artifact,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hero => "hero",
            Self::Signature => "signature",
            Self::Hybrid => "hybrid",
            Self::Generic => "generic",
            Self::Spell => "spell",
            Self::Item => "item",
            Self::Artifact => "artifact",
        };
        f.write_str(name)
    }
}

/// Variant payload of a card, tagged by `cardType` in the persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cardType", rename_all = "camelCase")]
pub enum CardKind {
    /// Hero payload.
    Hero(HeroCard),
    /// Signature unit payload.
    Signature(SignatureCard),
    /// Hybrid unit payload.
    Hybrid(UnitCard),
    /// Generic unit payload, possibly stacked.
    Generic(GenericCard),
    /// Spell payload.
    Spell(SpellCard),
    /// Item payload.
    Item(ItemCard),
    /// Artifact payload.
    Artifact(ArtifactCard),
}

impl CardKind {
    /// Returns the discriminant of this payload.
    #[must_use]
    pub const fn card_type(&self) -> CardType {
        match self {
            Self::Hero(_) => CardType::Hero,
            Self::Signature(_) => CardType::Signature,
            Self::Hybrid(_) => CardType::Hybrid,
            Self::Generic(_) => CardType::Generic,
            Self::Spell(_) => CardType::Spell,
            Self::Item(_) => CardType::Item,
            Self::Artifact(_) => CardType::Artifact,
        }
    }

    /// Returns the combat stats if this variant fights.
    #[must_use]
    pub const fn stats(&self) -> Option<&UnitStats> {
        match self {
            Self::Hero(hero) => Some(&hero.stats),
            Self::Signature(signature) => Some(&signature.stats),
            Self::Hybrid(hybrid) => Some(&hybrid.stats),
            Self::Generic(generic) => Some(&generic.stats),
            Self::Spell(_) | Self::Item(_) | Self::Artifact(_) => None,
        }
    }

    /// Returns mutable combat stats if this variant fights.
    #[must_use]
    pub fn stats_mut(&mut self) -> Option<&mut UnitStats> {
        match self {
            Self::Hero(hero) => Some(&mut hero.stats),
            Self::Signature(signature) => Some(&mut signature.stats),
            Self::Hybrid(hybrid) => Some(&mut hybrid.stats),
            Self::Generic(generic) => Some(&mut generic.stats),
            Self::Spell(_) | Self::Item(_) | Self::Artifact(_) => None,
        }
    }
}

/// A card instance: shared base record plus variant payload.
///
/// `slot` is defined if and only if `location` is a battlefield. The helpers
/// [`Card::placed`] and [`Card::unplaced`] keep the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique, immutable id.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Owning player.
    pub owner: PlayerId,
    /// Current zone.
    pub location: Location,
    /// Battlefield slot, present only while on a battlefield.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<Slot>,
    /// Mana paid to deploy from hand.
    #[serde(default)]
    pub mana_cost: u32,
    /// Variant payload.
    pub kind: CardKind,
}

impl Card {
    /// Creates a card in its owner's hand.
    #[must_use]
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        owner: PlayerId,
        kind: CardKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner,
            location: Location::Hand,
            slot: None,
            mana_cost: 0,
            kind,
        }
    }

    /// Returns this card with the given mana cost.
    #[must_use]
    pub fn with_mana_cost(mut self, mana_cost: u32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    /// Returns this card moved onto a battlefield slot.
    #[must_use]
    pub fn placed(mut self, lane: Lane, slot: Slot) -> Self {
        self.place(lane, slot);
        self
    }

    /// Returns this card moved off the battlefield into `location`.
    #[must_use]
    pub fn unplaced(mut self, location: Location) -> Self {
        self.unplace(location);
        self
    }

    /// Moves the card onto a battlefield slot.
    pub fn place(&mut self, lane: Lane, slot: Slot) {
        self.location = Location::battlefield(lane);
        self.slot = Some(slot);
    }

    /// Moves the card to a non-battlefield zone, clearing its slot.
    ///
    /// Passing a battlefield location keeps the current slot.
    pub fn unplace(&mut self, location: Location) {
        self.location = location;
        if !location.is_battlefield() {
            self.slot = None;
        }
    }

    /// Returns the card's discriminant.
    #[must_use]
    pub const fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    /// Returns true for heroes.
    #[must_use]
    pub const fn is_hero(&self) -> bool {
        matches!(self.kind, CardKind::Hero(_))
    }

    /// Returns true if the variant carries combat stats.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        self.kind.stats().is_some()
    }

    /// Returns the combat stats, if any.
    #[must_use]
    pub const fn stats(&self) -> Option<&UnitStats> {
        self.kind.stats()
    }

    /// Returns mutable combat stats, if any.
    #[must_use]
    pub fn stats_mut(&mut self) -> Option<&mut UnitStats> {
        self.kind.stats_mut()
    }

    /// Returns the stack link of a stacked generic unit.
    #[must_use]
    pub const fn stack(&self) -> Option<&StackLink> {
        match &self.kind {
            CardKind::Generic(generic) => generic.stack.as_ref(),
            _ => None,
        }
    }

    /// Returns the mutable stack link of a stacked generic unit.
    #[must_use]
    pub fn stack_mut(&mut self) -> Option<&mut StackLink> {
        match &mut self.kind {
            CardKind::Generic(generic) => generic.stack.as_mut(),
            _ => None,
        }
    }

    /// Returns true if this is a generic unit that is currently stacked.
    #[must_use]
    pub const fn is_stacked(&self) -> bool {
        self.stack().is_some()
    }

    /// Drops any stack link, restoring the unit's own stats as effective.
    ///
    /// Returns the removed link so the caller can decide who keeps its
    /// pooled temporary HP.
    pub fn clear_stack(&mut self) -> Option<StackLink> {
        match &mut self.kind {
            CardKind::Generic(generic) => generic.stack.take(),
            _ => None,
        }
    }

    /// Attack power against towers and non-hero units.
    ///
    /// Stack power replaces the unit's own attack while stacked; temporary
    /// attack is added on top of whichever base applies.
    #[must_use]
    pub fn attack_power(&self) -> Option<u32> {
        let stats = self.stats()?;
        let base = self.stack().map_or(stats.attack, |link| link.power);
        Some(base.saturating_add(stats.temporary_attack))
    }

    /// Attack power against a specific unit, including hero-versus-hero bonus.
    #[must_use]
    pub fn attack_power_against(&self, target: &Card) -> Option<u32> {
        let power = self.attack_power()?;
        match &self.kind {
            CardKind::Hero(hero) if target.is_hero() => {
                Some(power.saturating_add(hero.bonus_vs_heroes))
            }
            _ => Some(power),
        }
    }

    /// Health that must be removed to kill this unit.
    ///
    /// Temporary HP is added on top and is never capped by max health. While
    /// stacked, the link's shared health and pooled temporary HP replace the
    /// unit's own, so both halves report the same value.
    #[must_use]
    pub fn effective_health(&self) -> Option<u32> {
        let stats = self.stats()?;
        let (health, temporary) = self.stack().map_or(
            (stats.current_health, stats.temporary_hp),
            |link| (link.health, link.temporary_hp),
        );
        Some(health.saturating_add(temporary))
    }

    /// Maximum of [`Card::effective_health`] before temporary HP.
    #[must_use]
    pub fn effective_max_health(&self) -> Option<u32> {
        let stats = self.stats()?;
        Some(self.stack().map_or(stats.max_health, StackLink::max_health))
    }

    /// Returns true for units with health left; non-units are never alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.effective_health().is_some_and(|health| health > 0)
    }

    /// Removes up to `amount` effective health and returns what was removed.
    ///
    /// Temporary HP absorbs first. A stacked unit takes the damage out of its
    /// link; the caller mirrors the link onto the partner.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let Some(available) = self.effective_health() else {
            return 0;
        };
        let dealt = amount.min(available);

        let (temporary, health) = match &mut self.kind {
            CardKind::Generic(GenericCard {
                stack: Some(link), ..
            }) => (&mut link.temporary_hp, &mut link.health),
            kind => match kind.stats_mut() {
                Some(stats) => (&mut stats.temporary_hp, &mut stats.current_health),
                None => return 0,
            },
        };
        let absorbed = dealt.min(*temporary);
        *temporary -= absorbed;
        *health -= dealt - absorbed;
        dealt
    }
}

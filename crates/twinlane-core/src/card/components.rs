//! Variant payloads for [`CardKind`](super::CardKind).
//!
//! Unit variants share [`UnitStats`]. Non-unit variants carry only the data
//! the rules core reads (item gold income) or passes through untouched.

use serde::{Deserialize, Serialize};

use super::CardId;

/// Combat stats shared by every unit variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitStats {
    /// Base attack.
    pub attack: u32,
    /// Remaining health, in `[0, max_health]`.
    pub current_health: u32,
    /// Health restored by healing.
    pub max_health: u32,
    /// Overflow attack buff, added on top of the base attack.
    #[serde(default)]
    pub temporary_attack: u32,
    /// Overflow health buff; absorbs damage first and ignores `max_health`.
    /// Moves onto the stack link while the unit is stacked.
    #[serde(default)]
    pub temporary_hp: u32,
}

impl UnitStats {
    /// Creates stats at full health with no buffs.
    #[must_use]
    pub const fn new(attack: u32, health: u32) -> Self {
        Self {
            attack,
            current_health: health,
            max_health: health,
            temporary_attack: 0,
            temporary_hp: 0,
        }
    }

    /// Returns true if current health is below max.
    #[must_use]
    pub const fn is_damaged(&self) -> bool {
        self.current_health < self.max_health
    }
}

/// An item equipped on a hero. Only its gold income matters to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquippedItem {
    /// Item id from the shop catalog.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// Attack granted to the wearer, already folded into its stats.
    #[serde(default)]
    pub attack_bonus: u32,
    /// Health granted to the wearer, already folded into its stats.
    #[serde(default)]
    pub hp_bonus: u32,
    /// Gold granted at the end of each of the owner's turns.
    #[serde(default)]
    pub gold_per_turn: u32,
}

/// Hero payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroCard {
    /// Combat stats.
    pub stats: UnitStats,
    /// Extra attack when striking an enemy hero.
    #[serde(default)]
    pub bonus_vs_heroes: u32,
    /// Items bought for this hero.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipped_items: Vec<EquippedItem>,
}

impl HeroCard {
    /// Creates an unequipped hero at full health.
    #[must_use]
    pub fn new(attack: u32, health: u32) -> Self {
        Self {
            stats: UnitStats::new(attack, health),
            bonus_vs_heroes: 0,
            equipped_items: Vec::new(),
        }
    }

    /// Total per-turn gold from equipped items.
    #[must_use]
    pub fn gold_per_turn(&self) -> u32 {
        self.equipped_items
            .iter()
            .map(|item| item.gold_per_turn)
            .sum()
    }
}

/// Signature unit payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureCard {
    /// Combat stats.
    pub stats: UnitStats,
    /// Hero this card belongs to.
    pub hero_name: String,
}

/// Plain unit payload (hybrids).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCard {
    /// Combat stats.
    pub stats: UnitStats,
}

impl UnitCard {
    /// Creates a unit at full health.
    #[must_use]
    pub const fn new(attack: u32, health: u32) -> Self {
        Self {
            stats: UnitStats::new(attack, health),
        }
    }
}

/// Relation between two stacked generic units.
///
/// The partner is referenced by id only; it is looked up in the current
/// collection on use and may already be gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackLink {
    /// The other half of the stack.
    #[serde(rename = "stackedWith")]
    pub partner: CardId,
    /// Combined attack of both units.
    #[serde(rename = "stackPower")]
    pub power: u32,
    /// Remaining combined health, shared by both halves.
    #[serde(rename = "stackHealth")]
    pub health: u32,
    /// Combined max health, fixed when the stack forms.
    #[serde(rename = "stackMaxHealth", default)]
    pub max_health: u32,
    /// Pooled temporary HP of both halves; absorbs damage before `health`.
    #[serde(rename = "stackTemporaryHp", default)]
    pub temporary_hp: u32,
}

impl StackLink {
    /// Creates a fresh link at full combined health.
    #[must_use]
    pub const fn new(partner: CardId, power: u32, health: u32) -> Self {
        Self {
            partner,
            power,
            health,
            max_health: health,
            temporary_hp: 0,
        }
    }

    /// Combined max health; older snapshots without it fall back to current.
    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.max_health.max(self.health)
    }
}

/// Generic unit payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericCard {
    /// The unit's own stats, restored when unstacked.
    pub stats: UnitStats,
    /// Present while stacked with another generic unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackLink>,
}

impl GenericCard {
    /// Creates an unstacked generic unit at full health.
    #[must_use]
    pub const fn new(attack: u32, health: u32) -> Self {
        Self {
            stats: UnitStats::new(attack, health),
            stack: None,
        }
    }
}

/// Spell payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCard {
    /// Rules text, resolved outside the core.
    #[serde(default)]
    pub effect: String,
}

/// Item payload (unequipped).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCard {
    /// Shop price in gold.
    pub cost: u32,
    /// Shop tier.
    pub tier: u8,
    /// Attack granted once equipped.
    #[serde(default)]
    pub attack_bonus: u32,
    /// Health granted once equipped.
    #[serde(default)]
    pub hp_bonus: u32,
    /// Gold granted per turn once equipped.
    #[serde(default)]
    pub gold_per_turn: u32,
}

/// Artifact payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCard {
    /// Rules text, resolved outside the core.
    #[serde(default)]
    pub effect: String,
}

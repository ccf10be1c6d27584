//! Rules configuration.
//!
//! Every numeric rules constant lives here. The config travels inside the
//! [`GameState`](crate::state::GameState) snapshot, so an imported snapshot
//! keeps playing by the rules it was exported with.

use serde::{Deserialize, Serialize};

/// Numeric rules constants for a match.
///
/// Missing fields deserialize to their defaults, so partial JSON is accepted.
///
/// # Example
///
/// ```
/// use twinlane_core::config::RulesConfig;
///
/// let rules = RulesConfig::default().with_tower_hp(10);
/// assert_eq!(rules.tower_hp, 10);
/// assert_eq!(rules.slot_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesConfig {
    /// Starting and maximum tower HP.
    pub tower_hp: u32,
    /// Starting nexus HP.
    pub nexus_hp: u32,
    /// Slots per lane per player.
    pub slot_limit: u8,
    /// Ceiling for max mana.
    pub max_mana_cap: u32,
    /// Gold each player starts with.
    pub starting_gold: u32,
    /// Base gold granted at the end of a player's turn.
    pub gold_per_turn: u32,
    /// Gold granted to the owner when a non-hero unit dies.
    pub unit_bounty: u32,
    /// Gold granted to the owner when a hero dies.
    pub hero_bounty: u32,
    /// Width of the death cooldown window in turns, counting the turn of death.
    pub death_cooldown_turns: u32,
    /// Post-tower nexus damage in one lane that wins the match.
    pub post_tower_nexus_damage_to_win: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tower_hp: 20,
            nexus_hp: 30,
            slot_limit: 5,
            max_mana_cap: 10,
            starting_gold: 5,
            gold_per_turn: 3,
            unit_bounty: 2,
            hero_bounty: 5,
            death_cooldown_turns: 2,
            post_tower_nexus_damage_to_win: 20,
        }
    }
}

impl RulesConfig {
    /// Returns this config with a different tower HP.
    #[must_use]
    pub fn with_tower_hp(mut self, tower_hp: u32) -> Self {
        self.tower_hp = tower_hp;
        self
    }

    /// Returns this config with a different nexus HP.
    #[must_use]
    pub fn with_nexus_hp(mut self, nexus_hp: u32) -> Self {
        self.nexus_hp = nexus_hp;
        self
    }

    /// Returns this config with a different base gold income.
    #[must_use]
    pub fn with_gold_per_turn(mut self, gold_per_turn: u32) -> Self {
        self.gold_per_turn = gold_per_turn;
        self
    }

    /// Gold bounty paid to the owner of a unit that just died.
    #[must_use]
    pub const fn bounty_for(&self, is_hero: bool) -> u32 {
        if is_hero {
            self.hero_bounty
        } else {
            self.unit_bounty
        }
    }
}

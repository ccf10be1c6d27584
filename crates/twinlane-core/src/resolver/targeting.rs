//! Positional target selection.
//!
//! A unit attacks whatever stands in the mirrored slot on the enemy side of
//! the same lane, or the enemy tower if that slot is empty. Players may
//! override the default with any enemy unit still on the lane.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::battlefield::Battlefield;
use crate::card::{Card, CardId, PlayerId, Slot};

/// What an attacker is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AttackTarget {
    /// An enemy unit, referenced by id.
    Unit {
        /// Target card id.
        #[serde(rename = "targetId")]
        target_id: CardId,
        /// Attacker's slot when the target was chosen.
        #[serde(rename = "targetSlot")]
        target_slot: Slot,
    },
    /// The enemy tower of the lane.
    Tower {
        /// Attacker's slot when the target was chosen.
        #[serde(rename = "targetSlot")]
        target_slot: Slot,
    },
}

impl AttackTarget {
    /// Returns the targeted unit id, if this is a unit target.
    #[must_use]
    pub const fn unit_id(&self) -> Option<&CardId> {
        match self {
            Self::Unit { target_id, .. } => Some(target_id),
            Self::Tower { .. } => None,
        }
    }

    /// Returns true for tower targets.
    #[must_use]
    pub const fn is_tower(&self) -> bool {
        matches!(self, Self::Tower { .. })
    }
}

/// Attacker id to target, for one lane.
pub type TargetAssignments = BTreeMap<CardId, AttackTarget>;

/// Computes the positional default target for an attacker.
///
/// The first unit (lowest id) in the mirrored enemy slot is chosen, which is
/// the leader of a stacked pair.
#[must_use]
pub fn default_target(attacker: &Card, attacker_slot: Slot, battlefield: &Battlefield) -> AttackTarget {
    let opponent = attacker.owner.opponent();
    match battlefield
        .occupants(opponent, attacker_slot)
        .find(|card| card.is_unit())
    {
        Some(unit) => AttackTarget::Unit {
            target_id: unit.id.clone(),
            target_slot: attacker_slot,
        },
        None => AttackTarget::Tower {
            target_slot: attacker_slot,
        },
    }
}

/// Computes default targets for every acting unit of `attacking_player`.
#[must_use]
pub fn default_targets(battlefield: &Battlefield, attacking_player: PlayerId) -> TargetAssignments {
    battlefield
        .combatants(attacking_player)
        .into_iter()
        .filter_map(|unit| {
            let slot = unit.slot?;
            Some((unit.id.clone(), default_target(unit, slot, battlefield)))
        })
        .collect()
}

/// Returns true if `attacker` may aim at `target` on this lane.
///
/// Towers are always legal; a unit target must currently sit on the
/// opponent's side.
#[must_use]
pub fn can_target(attacker: &Card, target: &AttackTarget, battlefield: &Battlefield) -> bool {
    match target {
        AttackTarget::Tower { .. } => true,
        AttackTarget::Unit { target_id, .. } => {
            battlefield.contains(attacker.owner.opponent(), target_id)
        }
    }
}

//! Single-attack resolution.
//!
//! [`resolve_attack`] is the pure entry point: it clones the lane and tower
//! table, applies one attack and hands back the new values. The combat batch
//! uses [`apply_attack`] on its own working copies so later attackers see the
//! results of earlier ones without re-cloning per attack.
//!
//! Nexus damage is never written here. The batch resolver derives overflow
//! from the [`Hit::Tower`] before/after HP.

use crate::battlefield::{Battlefield, Towers};
use crate::card::{Card, CardId, Lane, PlayerId};

use super::targeting::AttackTarget;

/// What an attack actually connected with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    /// An enemy unit took the damage.
    Unit {
        /// Target id.
        target_id: CardId,
        /// Target name at the time of the hit.
        target_name: String,
        /// Cards removed from the lane because of this hit.
        casualties: Vec<Card>,
    },
    /// The enemy tower took the damage.
    Tower {
        /// Tower owner.
        defender: PlayerId,
        /// HP before the hit.
        hp_before: u32,
        /// HP after the hit.
        hp_after: u32,
    },
    /// The unit target no longer exists; nothing happened.
    Stale,
}

/// Result of one attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackResult {
    /// Attack power used for this hit.
    pub attack_power: u32,
    /// Damage removed from the target, never above its pre-attack health.
    pub damage_dealt: u32,
    /// True if a unit died or a tower was brought to 0 by this hit.
    pub target_killed: bool,
    /// What was hit.
    pub hit: Hit,
}

impl AttackResult {
    const fn stale(attack_power: u32) -> Self {
        Self {
            attack_power,
            damage_dealt: 0,
            target_killed: false,
            hit: Hit::Stale,
        }
    }

    /// Returns true if the attack connected with nothing.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self.hit, Hit::Stale)
    }
}

/// New lane and tower values after a single attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    /// The lane after the attack.
    pub battlefield: Battlefield,
    /// All towers after the attack.
    pub towers: Towers,
    /// Damage and kill result.
    pub result: AttackResult,
}

/// Resolves one attack without touching the inputs.
///
/// # Example
///
/// ```
/// use twinlane_core::battlefield::{Battlefield, PerLane, PerPlayer};
/// use twinlane_core::card::{Card, CardKind, GenericCard, Lane, PlayerId, Slot};
/// use twinlane_core::resolver::{resolve_attack, AttackTarget};
///
/// let attacker = Card::new("g", "Grunt", PlayerId::Player1, CardKind::Generic(GenericCard::new(4, 1)))
///     .placed(Lane::B, Slot::new(1));
/// let towers = PerLane::splat(PerPlayer::splat(20));
/// let outcome = resolve_attack(
///     &attacker,
///     &AttackTarget::Tower { target_slot: Slot::new(1) },
///     &Battlefield::new(),
///     &towers,
///     Lane::B,
/// );
///
/// assert_eq!(outcome.towers[Lane::B][PlayerId::Player2], 16);
/// assert_eq!(towers[Lane::B][PlayerId::Player2], 20);
/// ```
#[must_use]
pub fn resolve_attack(
    attacker: &Card,
    target: &AttackTarget,
    battlefield: &Battlefield,
    towers: &Towers,
    lane: Lane,
) -> AttackOutcome {
    let mut battlefield = battlefield.clone();
    let mut towers = *towers;
    let result = apply_attack(attacker, target, &mut battlefield, &mut towers, lane);
    AttackOutcome {
        battlefield,
        towers,
        result,
    }
}

/// Applies one attack to working copies of the lane and towers.
///
/// A killed unit is removed from the lane together with its stack partner;
/// both are returned in [`Hit::Unit::casualties`] for death handling.
pub fn apply_attack(
    attacker: &Card,
    target: &AttackTarget,
    battlefield: &mut Battlefield,
    towers: &mut Towers,
    lane: Lane,
) -> AttackResult {
    let defender = attacker.owner.opponent();
    match target {
        AttackTarget::Unit { target_id, .. } => strike_unit(attacker, target_id, defender, battlefield),
        AttackTarget::Tower { .. } => {
            let power = attacker.attack_power().unwrap_or(0);
            let hp = &mut towers[lane][defender];
            let hp_before = *hp;
            let damage_dealt = power.min(hp_before);
            *hp = hp_before - damage_dealt;
            AttackResult {
                attack_power: power,
                damage_dealt,
                target_killed: hp_before > 0 && *hp == 0,
                hit: Hit::Tower {
                    defender,
                    hp_before,
                    hp_after: *hp,
                },
            }
        }
    }
}

fn strike_unit(
    attacker: &Card,
    target_id: &CardId,
    defender: PlayerId,
    battlefield: &mut Battlefield,
) -> AttackResult {
    let Some(victim) = battlefield
        .get_mut(defender, target_id)
        .filter(|card| card.is_unit())
    else {
        return AttackResult::stale(attacker.attack_power().unwrap_or(0));
    };

    let power = attacker.attack_power_against(victim).unwrap_or(0);
    let damage_dealt = victim.take_damage(power);
    let target_killed = !victim.is_alive();
    let target_name = victim.name.clone();
    let shared = victim.stack().cloned();

    // Both halves of a stack carry the same combined health.
    if let Some(pair) = &shared {
        if let Some(link) = battlefield
            .get_mut(defender, &pair.partner)
            .and_then(Card::stack_mut)
            .filter(|link| &link.partner == target_id)
        {
            link.health = pair.health;
            link.temporary_hp = pair.temporary_hp;
        }
    }

    let mut casualties = Vec::new();
    if target_killed {
        casualties.extend(battlefield.remove(defender, target_id));
        if let Some(partner_id) = shared.map(|pair| pair.partner) {
            let linked_back = battlefield
                .get(defender, &partner_id)
                .and_then(Card::stack)
                .is_some_and(|link| &link.partner == target_id);
            if linked_back {
                casualties.extend(battlefield.remove(defender, &partner_id));
            }
        }
    }

    AttackResult {
        attack_power: power,
        damage_dealt,
        target_killed,
        hit: Hit::Unit {
            target_id: target_id.clone(),
            target_name,
            casualties,
        },
    }
}

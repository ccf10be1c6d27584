//! Combat batch resolution for one lane.
//!
//! The active player's acting units attack one at a time in `(slot, id)`
//! order. Each attack sees the lane as left by the previous one, so a unit
//! killed early in the batch is a stale target for anyone aimed at it later.
//!
//! # Overflow
//!
//! When an attack brings the defender's tower from above 0 to exactly 0, and
//! that tower had HP when the batch began, the attack power left over after
//! the tower's pre-attack HP is added to the batch's overflow. The caller
//! subtracts the total from the defender's nexus.

use tracing::{debug, warn};

use crate::battlefield::{Battlefield, Towers};
use crate::card::{Card, CardId, Lane, PlayerId};

use super::attack::{apply_attack, Hit};
use super::log::{CombatLogEntry, TargetKind};
use super::targeting::{default_target, TargetAssignments};

/// Everything a combat batch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatResult {
    /// The lane after every attack.
    pub battlefield: Battlefield,
    /// All towers after every attack.
    pub towers: Towers,
    /// Damage owed to the defender's nexus.
    pub overflow_damage: u32,
    /// One entry per attack that connected, in processing order.
    pub combat_log: Vec<CombatLogEntry>,
    /// Cards removed from the lane, in order of death.
    pub casualties: Vec<Card>,
    /// Attackers whose assigned unit target was already gone.
    pub stale_targets: Vec<CardId>,
}

/// Resolves every attack of `active_player` on one lane.
///
/// Units without an entry in `assignments` use their positional default,
/// computed against the lane as it stands when they act. `initial_towers` is
/// the tower table at batch start; the returned table starts from it.
#[must_use]
pub fn resolve_combat(
    battlefield: &Battlefield,
    lane: Lane,
    assignments: &TargetAssignments,
    active_player: PlayerId,
    initial_towers: &Towers,
) -> CombatResult {
    let mut field = battlefield.clone();
    let mut towers = *initial_towers;
    let mut overflow_damage = 0u32;
    let mut combat_log = Vec::new();
    let mut casualties = Vec::new();
    let mut stale_targets = Vec::new();

    let order: Vec<CardId> = battlefield
        .combatants(active_player)
        .into_iter()
        .map(|card| card.id.clone())
        .collect();

    for attacker_id in order {
        let Some(attacker) = field.get(active_player, &attacker_id).cloned() else {
            continue;
        };
        let Some(slot) = attacker.slot else {
            continue;
        };
        let target = assignments
            .get(&attacker_id)
            .cloned()
            .unwrap_or_else(|| default_target(&attacker, slot, &field));

        let result = apply_attack(&attacker, &target, &mut field, &mut towers, lane);
        debug!(
            attacker = %attacker_id,
            %lane,
            power = result.attack_power,
            damage = result.damage_dealt,
            killed = result.target_killed,
            "attack resolved"
        );

        match result.hit {
            Hit::Stale => {
                warn!(attacker = %attacker_id, %lane, "assigned target is no longer on the lane");
                stale_targets.push(attacker_id);
            }
            Hit::Unit {
                target_id,
                target_name,
                casualties: dead,
            } => {
                combat_log.push(CombatLogEntry {
                    attacker_id,
                    attacker_name: attacker.name.clone(),
                    target_type: TargetKind::Unit,
                    target_id: Some(target_id),
                    target_name: Some(target_name),
                    damage: result.damage_dealt,
                    killed: Some(result.target_killed),
                });
                casualties.extend(dead);
            }
            Hit::Tower {
                defender,
                hp_before,
                hp_after,
            } => {
                if initial_towers[lane][defender] > 0 && hp_before > 0 && hp_after == 0 {
                    overflow_damage =
                        overflow_damage.saturating_add(result.attack_power.saturating_sub(hp_before));
                }
                combat_log.push(CombatLogEntry {
                    attacker_id,
                    attacker_name: attacker.name.clone(),
                    target_type: TargetKind::Tower,
                    target_id: None,
                    target_name: None,
                    damage: result.damage_dealt,
                    killed: None,
                });
            }
        }
    }

    CombatResult {
        battlefield: field,
        towers,
        overflow_damage,
        combat_log,
        casualties,
        stale_targets,
    }
}

//! Placement intents: deploy, reposition and retreat to base.
//!
//! All checks run before the first mutation, so a rejected intent leaves the
//! working snapshot as it was. Slot conflicts never reject: the occupant
//! group is swapped out of the way.
//!
//! # Swap policy
//!
//! When the target slot is taken, its occupant group (one card or a stacked
//! pair) goes to the mover's previous position if that position is free,
//! else to the first free slot of the mover's previous lane (or the target
//! lane for cards coming from hand or base), else to base.

use tracing::{debug, info};

use crate::card::{Card, CardId, CardType, Lane, Location, PlayerId, Slot};
use crate::error::RuleError;
use crate::lifecycle;
use crate::state::{GameState, Phase, PlayerFlags};

/// Checks that `player` may act now. Both players may act on turn 1.
fn ensure_turn(state: &GameState, player: PlayerId) -> Result<(), RuleError> {
    let active = state.metadata.active_player;
    if state.metadata.current_turn > 1 && player != active {
        return Err(RuleError::NotYourTurn { player, active });
    }
    Ok(())
}

fn ensure_phase(state: &GameState, action: &'static str, allowed: &[Phase]) -> Result<(), RuleError> {
    let phase = state.metadata.current_phase;
    if allowed.contains(&phase) {
        Ok(())
    } else {
        Err(RuleError::WrongPhase { action, phase })
    }
}

fn ensure_slot(state: &GameState, slot: Slot) -> Result<(), RuleError> {
    let limit = state.rules.slot_limit;
    if slot.is_within(limit) {
        Ok(())
    } else {
        Err(RuleError::InvalidSlot {
            slot: slot.get(),
            limit,
        })
    }
}

fn ensure_mana(state: &GameState, player: PlayerId, required: u32) -> Result<(), RuleError> {
    let available = state.metadata.resources[player].mana;
    if required > available {
        return Err(RuleError::InsufficientMana {
            required,
            available,
        });
    }
    Ok(())
}

fn spend_mana(state: &mut GameState, player: PlayerId, amount: u32) {
    let mana = &mut state.metadata.resources[player].mana;
    *mana = mana.saturating_sub(amount);
}

/// Mana a deploy costs: the card's cost from hand, nothing for heroes leaving
/// base or cards already on a lane.
fn deploy_cost(card: &Card) -> u32 {
    match card.location {
        Location::Hand => card.mana_cost,
        Location::Base if card.is_hero() => 0,
        Location::Base => card.mana_cost,
        Location::BattlefieldA | Location::BattlefieldB => 0,
    }
}

// =============================================================================
// Deploy
// =============================================================================

/// Places a unit on a lane from hand, base or the other lane.
///
/// A generic unit deployed without a slot joins the first unstacked generic
/// already on that side. Otherwise the unit takes `slot`, or the first free
/// slot. A unit moving between lanes onto a full side keeps its slot number
/// and swaps with the occupant.
///
/// # Errors
///
/// Rejects outside `play`, for the wrong player after turn 1, for cards on
/// cooldown, non-units, units with no health left, bad slots, full lanes and
/// missing mana.
pub fn deploy(state: &mut GameState, card_id: &CardId, lane: Lane, slot: Option<Slot>) -> Result<(), RuleError> {
    ensure_phase(state, "deploy", &[Phase::Play])?;
    let card = state
        .find_card(card_id)
        .ok_or_else(|| RuleError::CardNotFound(card_id.clone()))?;
    if !card.is_unit() {
        return Err(RuleError::NotAUnit(card_id.clone()));
    }
    let owner = card.owner;
    ensure_turn(state, owner)?;
    if let Some(since) = state.metadata.cooldown_since(card_id) {
        return Err(RuleError::DeathCooldown {
            card: card_id.clone(),
            since,
        });
    }
    if !card.is_alive() {
        return Err(RuleError::DeadUnit(card_id.clone()));
    }
    let cost = deploy_cost(card);
    ensure_mana(state, owner, cost)?;
    if let Some(slot) = slot {
        ensure_slot(state, slot)?;
    }

    let previous = card.location.lane().zip(card.slot);
    if slot.is_none() && previous.is_some_and(|(from, _)| from == lane) {
        debug!(card = %card_id, %lane, "already on lane");
        return Ok(());
    }

    let limit = state.rules.slot_limit;
    let is_generic = card.card_type() == CardType::Generic;
    let host = if slot.is_none() && is_generic {
        lifecycle::stack_host(state.battlefield(lane), owner, card_id)
    } else {
        None
    };
    let target_slot = match (slot, &host) {
        (Some(slot), _) => Some(slot),
        (None, Some(_)) => None,
        (None, None) => match state.battlefield(lane).first_free_slot(owner, limit) {
            Some(free) => Some(free),
            None => match previous {
                Some((_, old)) => Some(old),
                None => return Err(RuleError::BattlefieldFull { lane, player: owner }),
            },
        },
    };

    let mut mover = lift(state, card_id).ok_or_else(|| RuleError::CardNotFound(card_id.clone()))?;

    if let Some(host_id) = host {
        match lifecycle::stack_onto(state.battlefield_mut(lane), mover, &host_id) {
            Ok(_) => {
                spend_mana(state, owner, cost);
                info!(card = %card_id, %lane, host = %host_id, cost, "deployed onto stack");
                return Ok(());
            }
            Err(returned) => mover = returned,
        }
    }

    let target_slot = match target_slot {
        Some(slot) => slot,
        None => match state.battlefield(lane).first_free_slot(owner, limit) {
            Some(free) => free,
            None => {
                // Put the card back where it was before rejecting.
                restore(state, mover, previous);
                return Err(RuleError::BattlefieldFull { lane, player: owner });
            }
        },
    };

    swap_out(state, owner, lane, target_slot, previous);
    state.add_to_battlefield(mover, lane, target_slot);
    spend_mana(state, owner, cost);
    info!(card = %card_id, %lane, slot = %target_slot, cost, "deployed");
    Ok(())
}

/// Takes a card out of its zone, dissolving any stack it was part of.
fn lift(state: &mut GameState, card_id: &CardId) -> Option<Card> {
    let mut card = state.take_card(card_id)?;
    if let Some(lane) = card.location.lane() {
        lifecycle::unstack(state.battlefield_mut(lane), &mut card);
        for lane in Lane::ALL {
            state.combat_targets[lane].remove(card_id);
        }
    }
    Some(card)
}

fn restore(state: &mut GameState, card: Card, previous: Option<(Lane, Slot)>) {
    match (previous, card.location) {
        (Some((lane, slot)), _) => state.add_to_battlefield(card, lane, slot),
        (None, Location::Base) => state.add_to_base(card),
        (None, _) => state.add_to_hand(card),
    }
}

/// Clears `slot` on `lane` for the mover by relocating its occupant group.
fn swap_out(state: &mut GameState, owner: PlayerId, lane: Lane, slot: Slot, previous: Option<(Lane, Slot)>) {
    let occupants: Vec<CardId> = state
        .battlefield(lane)
        .occupants(owner, slot)
        .map(|card| card.id.clone())
        .collect();
    if occupants.is_empty() {
        return;
    }

    let limit = state.rules.slot_limit;
    let fallback_lane = previous.map_or(lane, |(from, _)| from);
    let destination = previous
        .filter(|(from, old)| state.battlefield(*from).occupants(owner, *old).next().is_none())
        .or_else(|| {
            state
                .battlefield(fallback_lane)
                .first_free_slot(owner, limit)
                .map(|free| (fallback_lane, free))
        });

    for id in &occupants {
        match destination {
            Some((to_lane, to_slot)) if to_lane == lane => {
                state.battlefield_mut(lane).move_to_slot(owner, id, to_slot);
            }
            Some((to_lane, to_slot)) => {
                if let Some(card) = state.battlefield_mut(lane).remove(owner, id) {
                    state.add_to_battlefield(card, to_lane, to_slot);
                }
            }
            None => {
                if let Some(card) = state.battlefield_mut(lane).remove(owner, id) {
                    lifecycle::send_to_base(state, card);
                }
            }
        }
        for lane in Lane::ALL {
            state.combat_targets[lane].remove(id);
        }
    }
    debug!(%lane, %slot, moved = occupants.len(), to = ?destination, "occupants swapped out");
}

// =============================================================================
// Reposition
// =============================================================================

/// Moves a battlefield card's slot group to another slot on the same lane.
///
/// If the new slot is taken, the two slot groups trade places.
///
/// # Errors
///
/// Rejects outside `play`/`adjust`, for the wrong player after turn 1, for
/// cards not on a battlefield and for slots outside the lane.
pub fn change_slot(state: &mut GameState, card_id: &CardId, slot: Slot) -> Result<(), RuleError> {
    ensure_phase(state, "change slot", &[Phase::Play, Phase::Adjust])?;
    let card = state
        .find_card(card_id)
        .ok_or_else(|| RuleError::CardNotFound(card_id.clone()))?;
    let owner = card.owner;
    let (Some(lane), Some(old)) = (card.location.lane(), card.slot) else {
        return Err(RuleError::NotOnBattlefield(card_id.clone()));
    };
    ensure_turn(state, owner)?;
    ensure_slot(state, slot)?;
    if old == slot {
        return Ok(());
    }

    let field = state.battlefield(lane);
    let moving: Vec<CardId> = field.occupants(owner, old).map(|card| card.id.clone()).collect();
    let displaced: Vec<CardId> = field.occupants(owner, slot).map(|card| card.id.clone()).collect();

    let field = state.battlefield_mut(lane);
    for id in &moving {
        field.move_to_slot(owner, id, slot);
    }
    for id in &displaced {
        field.move_to_slot(owner, id, old);
    }
    info!(card = %card_id, %lane, from = %old, to = %slot, swapped = !displaced.is_empty(), "slot changed");
    Ok(())
}

// =============================================================================
// Retreat
// =============================================================================

/// Moves a card from hand or a battlefield into its owner's base.
///
/// A stacked generic leaves its partner as a plain card and arrives clean.
/// A hero heals to full on arrival; each player may move one hero per turn.
/// Cards from hand pay their mana cost.
///
/// # Errors
///
/// Rejects outside `play`, for the wrong player after turn 1, for a second
/// hero in the same turn and for missing mana.
pub fn move_to_base(state: &mut GameState, card_id: &CardId) -> Result<(), RuleError> {
    ensure_phase(state, "move to base", &[Phase::Play])?;
    let card = state
        .find_card(card_id)
        .ok_or_else(|| RuleError::CardNotFound(card_id.clone()))?;
    let owner = card.owner;
    ensure_turn(state, owner)?;
    if card.location == Location::Base {
        return Ok(());
    }
    let is_hero = card.is_hero();
    if is_hero && state.metadata.has_flag(owner, PlayerFlags::MOVED_TO_BASE) {
        return Err(RuleError::HeroAlreadyMovedToBase(owner));
    }
    let cost = if card.location == Location::Hand {
        card.mana_cost
    } else {
        0
    };
    ensure_mana(state, owner, cost)?;

    let mut card = lift(state, card_id).ok_or_else(|| RuleError::CardNotFound(card_id.clone()))?;
    if is_hero {
        if let Some(stats) = card.stats_mut() {
            stats.current_health = stats.max_health;
        }
        state.metadata.flags[owner].insert(PlayerFlags::MOVED_TO_BASE);
    }
    lifecycle::send_to_base(state, card);
    spend_mana(state, owner, cost);
    info!(card = %card_id, %owner, hero = is_hero, cost, "moved to base");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardKind, GenericCard, HeroCard, SpellCard};

    fn grunt(id: &str, owner: PlayerId) -> Card {
        Card::new(id, id, owner, CardKind::Generic(GenericCard::new(2, 3)))
    }

    fn knight(id: &str, owner: PlayerId) -> Card {
        Card::new(id, id, owner, CardKind::Hero(HeroCard::new(3, 8)))
    }

    fn slot_of(state: &GameState, id: &str) -> Option<(Location, Option<Slot>)> {
        state
            .find_card(&CardId::new(id))
            .map(|card| (card.location, card.slot))
    }

    mod deploy_tests {
        use super::*;

        #[test]
        fn deploy_from_hand_pays_mana_and_takes_first_free_slot() {
            let mut state = GameState::default();
            state.add_to_hand(knight("k", PlayerId::Player1).with_mana_cost(1));
            deploy(&mut state, &CardId::new("k"), Lane::A, None).unwrap();

            assert_eq!(slot_of(&state, "k"), Some((Location::BattlefieldA, Some(Slot::new(1)))));
            assert_eq!(state.metadata.resources[PlayerId::Player1].mana, 0);
        }

        #[test]
        fn missing_mana_rejects_before_mutation() {
            let mut state = GameState::default();
            state.add_to_hand(knight("k", PlayerId::Player1).with_mana_cost(4));
            let before = state.clone();
            let err = deploy(&mut state, &CardId::new("k"), Lane::A, None).unwrap_err();
            assert_eq!(
                err,
                RuleError::InsufficientMana {
                    required: 4,
                    available: 1,
                }
            );
            assert_eq!(state, before);
        }

        #[test]
        fn heroes_leave_base_for_free() {
            let mut state = GameState::default();
            state.add_to_base(knight("k", PlayerId::Player1).with_mana_cost(5));
            deploy(&mut state, &CardId::new("k"), Lane::B, Some(Slot::new(3))).unwrap();
            assert_eq!(slot_of(&state, "k"), Some((Location::BattlefieldB, Some(Slot::new(3)))));
            assert_eq!(state.metadata.resources[PlayerId::Player1].mana, 1);
        }

        #[test]
        fn cooldown_blocks_redeploy() {
            let mut state = GameState::default();
            state.add_to_base(knight("k", PlayerId::Player1));
            state.metadata.death_cooldowns.insert(CardId::new("k"), 1);
            assert!(matches!(
                deploy(&mut state, &CardId::new("k"), Lane::A, None),
                Err(RuleError::DeathCooldown { since: 1, .. })
            ));
        }

        #[test]
        fn wrong_phase_and_wrong_player_are_rejected() {
            let mut state = GameState::default();
            state.add_to_hand(grunt("g", PlayerId::Player2));
            state.metadata.current_phase = Phase::Adjust;
            assert!(matches!(
                deploy(&mut state, &CardId::new("g"), Lane::A, None),
                Err(RuleError::WrongPhase { .. })
            ));

            state.metadata.current_phase = Phase::Play;
            state.metadata.current_turn = 2;
            assert_eq!(
                deploy(&mut state, &CardId::new("g"), Lane::A, None),
                Err(RuleError::NotYourTurn {
                    player: PlayerId::Player2,
                    active: PlayerId::Player1,
                })
            );
        }

        #[test]
        fn both_players_may_deploy_on_turn_one() {
            let mut state = GameState::default();
            state.add_to_hand(grunt("g", PlayerId::Player2));
            deploy(&mut state, &CardId::new("g"), Lane::A, Some(Slot::new(5))).unwrap();
            assert_eq!(slot_of(&state, "g"), Some((Location::BattlefieldA, Some(Slot::new(5)))));
        }

        #[test]
        fn non_units_and_bad_slots_are_rejected() {
            let mut state = GameState::default();
            state.add_to_hand(Card::new("s", "Bolt", PlayerId::Player1, CardKind::Spell(SpellCard::default())));
            state.add_to_hand(grunt("g", PlayerId::Player1));
            assert_eq!(
                deploy(&mut state, &CardId::new("s"), Lane::A, None),
                Err(RuleError::NotAUnit(CardId::new("s")))
            );
            assert_eq!(
                deploy(&mut state, &CardId::new("g"), Lane::A, Some(Slot::new(6))),
                Err(RuleError::InvalidSlot { slot: 6, limit: 5 })
            );
        }

        #[test]
        fn full_lane_rejects_cards_from_hand() {
            let mut state = GameState::default();
            for slot in 1..=5 {
                state.add_to_battlefield(knight(&format!("k{slot}"), PlayerId::Player1), Lane::A, Slot::new(slot));
            }
            state.add_to_hand(knight("late", PlayerId::Player1));
            assert_eq!(
                deploy(&mut state, &CardId::new("late"), Lane::A, None),
                Err(RuleError::BattlefieldFull {
                    lane: Lane::A,
                    player: PlayerId::Player1,
                })
            );
        }
    }

    mod stacking_tests {
        use super::*;

        #[test]
        fn slotless_generic_joins_existing_generic() {
            let mut state = GameState::default();
            state.add_to_battlefield(grunt("g-1", PlayerId::Player1), Lane::A, Slot::new(2));
            state.add_to_hand(grunt("g-2", PlayerId::Player1));
            deploy(&mut state, &CardId::new("g-2"), Lane::A, None).unwrap();

            let field = state.battlefield(Lane::A);
            let joined = field.get(PlayerId::Player1, &CardId::new("g-2")).unwrap();
            assert_eq!(joined.slot, Some(Slot::new(2)));
            assert_eq!(joined.attack_power(), Some(4));
            assert_eq!(joined.effective_health(), Some(6));
            assert!(state.validate().is_ok());
        }

        #[test]
        fn explicit_slot_skips_stacking() {
            let mut state = GameState::default();
            state.add_to_battlefield(grunt("g-1", PlayerId::Player1), Lane::A, Slot::new(2));
            state.add_to_hand(grunt("g-2", PlayerId::Player1));
            deploy(&mut state, &CardId::new("g-2"), Lane::A, Some(Slot::new(4))).unwrap();
            assert!(!state.find_card(&CardId::new("g-1")).unwrap().is_stacked());
        }

        #[test]
        fn moving_a_stacked_unit_unstacks_it() {
            let mut state = GameState::default();
            state.add_to_battlefield(grunt("g-1", PlayerId::Player1), Lane::A, Slot::new(2));
            state.add_to_hand(grunt("g-2", PlayerId::Player1));
            deploy(&mut state, &CardId::new("g-2"), Lane::A, None).unwrap();
            deploy(&mut state, &CardId::new("g-2"), Lane::B, Some(Slot::new(1))).unwrap();

            let left = state.find_card(&CardId::new("g-1")).unwrap();
            let moved = state.find_card(&CardId::new("g-2")).unwrap();
            assert!(!left.is_stacked());
            assert!(!moved.is_stacked());
            assert_eq!(moved.location, Location::BattlefieldB);
            assert!(state.validate().is_ok());
        }
    }

    mod swap_tests {
        use super::*;

        #[test]
        fn lane_move_swaps_occupant_into_old_position() {
            let mut state = GameState::default();
            state.add_to_battlefield(knight("mover", PlayerId::Player1), Lane::A, Slot::new(1));
            state.add_to_battlefield(knight("sitter", PlayerId::Player1), Lane::B, Slot::new(3));
            deploy(&mut state, &CardId::new("mover"), Lane::B, Some(Slot::new(3))).unwrap();

            assert_eq!(slot_of(&state, "mover"), Some((Location::BattlefieldB, Some(Slot::new(3)))));
            assert_eq!(slot_of(&state, "sitter"), Some((Location::BattlefieldA, Some(Slot::new(1)))));
        }

        #[test]
        fn same_lane_move_swaps_slots() {
            let mut state = GameState::default();
            state.add_to_battlefield(knight("a", PlayerId::Player1), Lane::A, Slot::new(1));
            state.add_to_battlefield(knight("b", PlayerId::Player1), Lane::A, Slot::new(2));
            deploy(&mut state, &CardId::new("a"), Lane::A, Some(Slot::new(2))).unwrap();
            assert_eq!(slot_of(&state, "a"), Some((Location::BattlefieldA, Some(Slot::new(2)))));
            assert_eq!(slot_of(&state, "b"), Some((Location::BattlefieldA, Some(Slot::new(1)))));
        }

        #[test]
        fn hand_deploy_pushes_occupant_to_free_slot() {
            let mut state = GameState::default();
            state.add_to_battlefield(knight("sitter", PlayerId::Player1), Lane::A, Slot::new(1));
            state.add_to_hand(knight("new", PlayerId::Player1));
            deploy(&mut state, &CardId::new("new"), Lane::A, Some(Slot::new(1))).unwrap();
            assert_eq!(slot_of(&state, "new"), Some((Location::BattlefieldA, Some(Slot::new(1)))));
            assert_eq!(slot_of(&state, "sitter"), Some((Location::BattlefieldA, Some(Slot::new(2)))));
        }

        #[test]
        fn hand_deploy_onto_full_lane_sends_occupant_to_base() {
            let mut state = GameState::default();
            for slot in 1..=5 {
                state.add_to_battlefield(knight(&format!("k{slot}"), PlayerId::Player1), Lane::A, Slot::new(slot));
            }
            state.add_to_hand(knight("new", PlayerId::Player1));
            deploy(&mut state, &CardId::new("new"), Lane::A, Some(Slot::new(3))).unwrap();
            assert_eq!(slot_of(&state, "k3"), Some((Location::Base, None)));
            assert!(state.validate().is_ok());
        }

        #[test]
        fn lane_move_onto_full_side_keeps_slot_number() {
            let mut state = GameState::default();
            for slot in 1..=5 {
                state.add_to_battlefield(knight(&format!("b{slot}"), PlayerId::Player1), Lane::B, Slot::new(slot));
            }
            state.add_to_battlefield(knight("mover", PlayerId::Player1), Lane::A, Slot::new(4));
            deploy(&mut state, &CardId::new("mover"), Lane::B, None).unwrap();
            assert_eq!(slot_of(&state, "mover"), Some((Location::BattlefieldB, Some(Slot::new(4)))));
            assert_eq!(slot_of(&state, "b4"), Some((Location::BattlefieldA, Some(Slot::new(4)))));
        }
    }

    mod change_slot_tests {
        use super::*;

        #[test]
        fn change_slot_moves_and_swaps_groups() {
            let mut state = GameState::default();
            state.add_to_battlefield(knight("a", PlayerId::Player1), Lane::A, Slot::new(1));
            state.add_to_battlefield(knight("b", PlayerId::Player1), Lane::A, Slot::new(4));
            change_slot(&mut state, &CardId::new("a"), Slot::new(4)).unwrap();
            assert_eq!(slot_of(&state, "a"), Some((Location::BattlefieldA, Some(Slot::new(4)))));
            assert_eq!(slot_of(&state, "b"), Some((Location::BattlefieldA, Some(Slot::new(1)))));

            change_slot(&mut state, &CardId::new("a"), Slot::new(5)).unwrap();
            assert_eq!(slot_of(&state, "a"), Some((Location::BattlefieldA, Some(Slot::new(5)))));
        }

        #[test]
        fn stacked_pair_moves_together() {
            let mut state = GameState::default();
            state.add_to_battlefield(grunt("g-1", PlayerId::Player1), Lane::A, Slot::new(1));
            state.add_to_hand(grunt("g-2", PlayerId::Player1));
            deploy(&mut state, &CardId::new("g-2"), Lane::A, None).unwrap();
            change_slot(&mut state, &CardId::new("g-2"), Slot::new(3)).unwrap();
            assert_eq!(slot_of(&state, "g-1"), Some((Location::BattlefieldA, Some(Slot::new(3)))));
            assert_eq!(slot_of(&state, "g-2"), Some((Location::BattlefieldA, Some(Slot::new(3)))));
        }

        #[test]
        fn change_slot_requires_battlefield() {
            let mut state = GameState::default();
            state.add_to_hand(knight("a", PlayerId::Player1));
            assert_eq!(
                change_slot(&mut state, &CardId::new("a"), Slot::new(2)),
                Err(RuleError::NotOnBattlefield(CardId::new("a")))
            );
        }
    }

    mod base_tests {
        use super::*;

        #[test]
        fn hero_heals_and_only_once_per_turn() {
            let mut state = GameState::default();
            let mut first = knight("k1", PlayerId::Player1);
            first.stats_mut().unwrap().current_health = 2;
            state.add_to_battlefield(first, Lane::A, Slot::new(1));
            state.add_to_battlefield(knight("k2", PlayerId::Player1), Lane::A, Slot::new(2));

            move_to_base(&mut state, &CardId::new("k1")).unwrap();
            let hero = state.find_card(&CardId::new("k1")).unwrap();
            assert_eq!(hero.location, Location::Base);
            assert_eq!(hero.slot, None);
            assert_eq!(hero.stats().unwrap().current_health, 8);

            assert_eq!(
                move_to_base(&mut state, &CardId::new("k2")),
                Err(RuleError::HeroAlreadyMovedToBase(PlayerId::Player1))
            );
        }

        #[test]
        fn stacked_unit_leaves_partner_plain() {
            let mut state = GameState::default();
            state.add_to_battlefield(grunt("g-1", PlayerId::Player1), Lane::A, Slot::new(1));
            state.add_to_hand(grunt("g-2", PlayerId::Player1));
            deploy(&mut state, &CardId::new("g-2"), Lane::A, None).unwrap();

            move_to_base(&mut state, &CardId::new("g-1")).unwrap();
            let stayed = state.find_card(&CardId::new("g-2")).unwrap();
            assert!(!stayed.is_stacked());
            assert_eq!(stayed.slot, Some(Slot::new(1)));
            let rested = state.find_card(&CardId::new("g-1")).unwrap();
            assert!(!rested.is_stacked());
            assert_eq!(rested.location, Location::Base);
        }

        #[test]
        fn moving_from_hand_costs_mana() {
            let mut state = GameState::default();
            state.add_to_hand(grunt("g", PlayerId::Player1).with_mana_cost(2));
            assert!(matches!(
                move_to_base(&mut state, &CardId::new("g")),
                Err(RuleError::InsufficientMana { .. })
            ));
        }
    }
}

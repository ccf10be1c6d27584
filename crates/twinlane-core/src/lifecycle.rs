//! Lifecycle and economy side effects.
//!
//! Death handling, stack bookkeeping, cooldown expiry and per-turn income.
//! Every function here works on a snapshot the caller already owns (the
//! reducer's working copy); none of them validate intents.

use tracing::info;

use crate::battlefield::Battlefield;
use crate::card::{Card, CardId, CardKind, CardType, Lane, Location, PlayerId, StackLink};
use crate::config::RulesConfig;
use crate::state::{GameMetadata, GameState};

// =============================================================================
// Death
// =============================================================================

/// Handles cards that just died and were already taken off their lane.
///
/// Each card starts a death cooldown and pays its owner a bounty. Heroes go
/// to base at 0 health; every other card is dropped from the game.
pub fn bury(state: &mut GameState, casualties: Vec<Card>) {
    let turn = state.metadata.current_turn;
    for mut card in casualties {
        let bounty = state.rules.bounty_for(card.is_hero());
        state.metadata.death_cooldowns.insert(card.id.clone(), turn);
        let resources = &mut state.metadata.resources[card.owner];
        resources.gold = resources.gold.saturating_add(bounty);
        for lane in Lane::ALL {
            state.combat_targets[lane].remove(&card.id);
        }

        info!(card = %card.id, owner = %card.owner, hero = card.is_hero(), bounty, turn, "card died");

        if card.is_hero() {
            if let Some(stats) = card.stats_mut() {
                stats.current_health = 0;
                stats.temporary_hp = 0;
                stats.temporary_attack = 0;
            }
            state.add_to_base(card);
        }
    }
}

/// Removes a unit whose health ran out outside combat, together with a stack
/// partner sharing the exhausted health, and buries them.
pub fn kill_on_battlefield(state: &mut GameState, lane: Lane, owner: PlayerId, id: &CardId) {
    let field = state.battlefield_mut(lane);
    let partner = field
        .get(owner, id)
        .and_then(Card::stack)
        .map(|link| link.partner.clone());

    let mut dead: Vec<Card> = field.remove(owner, id).into_iter().collect();
    if let Some(partner_id) = partner {
        let linked_back = field
            .get(owner, &partner_id)
            .and_then(Card::stack)
            .is_some_and(|link| &link.partner == id);
        if linked_back {
            dead.extend(field.remove(owner, &partner_id));
        }
    }
    bury(state, dead);
}

// =============================================================================
// Stacking
// =============================================================================

/// Returns the first unstacked generic unit on a side that a new generic can
/// join.
#[must_use]
pub fn stack_host(field: &Battlefield, owner: PlayerId, joining: &CardId) -> Option<CardId> {
    field
        .side(owner)
        .iter()
        .find(|card| {
            card.card_type() == CardType::Generic
                && !card.is_stacked()
                && card.slot.is_some()
                && &card.id != joining
        })
        .map(|card| card.id.clone())
}

/// Links `joining` with the generic `host` already on the lane.
///
/// Stack power and health are the sums of both units' base attack and max
/// health; their temporary HP is pooled on the link. The joining card takes the host's slot and is inserted. If the
/// host cannot take a partner the card is handed back untouched.
pub fn stack_onto(field: &mut Battlefield, mut joining: Card, host_id: &CardId) -> Result<CardId, Card> {
    let owner = joining.owner;
    let Some((host_stats, slot, lane)) = field
        .get(owner, host_id)
        .filter(|host| host.card_type() == CardType::Generic)
        .and_then(|host| {
            let lane = host.location.lane()?;
            Some((host.stats()?.clone(), host.slot?, lane))
        })
    else {
        return Err(joining);
    };
    let (Some(joining_stats), CardType::Generic) = (joining.stats().cloned(), joining.card_type())
    else {
        return Err(joining);
    };

    let power = host_stats.attack.saturating_add(joining_stats.attack);
    let health = host_stats
        .max_health
        .saturating_add(joining_stats.max_health);
    let pooled = host_stats
        .temporary_hp
        .saturating_add(joining_stats.temporary_hp);
    let link = |partner: CardId| StackLink {
        temporary_hp: pooled,
        ..StackLink::new(partner, power, health)
    };

    if let Some(CardKind::Generic(host)) = field.get_mut(owner, host_id).map(|card| &mut card.kind) {
        host.stats.temporary_hp = 0;
        host.stack = Some(link(joining.id.clone()));
    }
    if let CardKind::Generic(own) = &mut joining.kind {
        own.stats.temporary_hp = 0;
        own.stack = Some(link(host_id.clone()));
    }

    joining.place(lane, slot);
    let joined = joining.id.clone();
    field.insert(joining);
    info!(host = %host_id, joined = %joined, power, health, "generic units stacked");
    Ok(joined)
}

/// Dissolves a card's stack, restoring its partner on `field` to a plain card.
///
/// The card's own link is cleared too; its own stats were never touched
/// while stacked, so it comes back clean. Whatever pooled temporary HP is
/// left stays on the lane with the partner.
pub fn unstack(field: &mut Battlefield, card: &mut Card) {
    let Some(link) = card.clear_stack() else {
        return;
    };
    if let Some(partner) = field.get_mut(card.owner, &link.partner) {
        if partner.stack().is_some_and(|back| back.partner == card.id) {
            let pooled = partner.clear_stack().map_or(0, |back| back.temporary_hp);
            if let Some(stats) = partner.stats_mut() {
                stats.temporary_hp = stats.temporary_hp.saturating_add(pooled);
            }
        }
    }
}

// =============================================================================
// Turn economy
// =============================================================================

/// Deletes cooldowns that have run their full window.
///
/// A card that died on turn `t` stays blocked while
/// `current_turn - t < death_cooldown_turns`.
pub fn expire_cooldowns(metadata: &mut GameMetadata, rules: &RulesConfig) -> Vec<CardId> {
    let now = metadata.current_turn;
    let expired: Vec<CardId> = metadata
        .death_cooldowns
        .iter()
        .filter(|(_, died)| now.saturating_sub(**died) >= rules.death_cooldown_turns)
        .map(|(id, _)| id.clone())
        .collect();
    for id in &expired {
        metadata.death_cooldowns.remove(id);
    }
    expired
}

/// Heals every cooldown-free hero resting in a base to full health.
pub fn heal_rested_heroes(state: &mut GameState) {
    for player in PlayerId::ALL {
        for card in &mut state.bases[player] {
            if !card.is_hero() || state.metadata.death_cooldowns.contains_key(&card.id) {
                continue;
            }
            if let Some(stats) = card.stats_mut() {
                stats.current_health = stats.max_health;
            }
        }
    }
}

/// Gold a player earns when their turn ends: base income plus the item gold
/// of their heroes in hand and on either lane.
#[must_use]
pub fn turn_income(state: &GameState, player: PlayerId) -> u32 {
    let items: u32 = state
        .fielded_and_held(player)
        .filter_map(|card| match &card.kind {
            CardKind::Hero(hero) => Some(hero.gold_per_turn()),
            _ => None,
        })
        .sum();
    state.rules.gold_per_turn.saturating_add(items)
}

/// Applies a signed correction to a value, clamped to `[0, max]`.
#[must_use]
pub fn apply_delta(value: u32, delta: i64, max: Option<u32>) -> u32 {
    let raw = i64::from(value).saturating_add(delta).max(0);
    let ceiling = max.map_or(i64::from(u32::MAX), i64::from);
    u32::try_from(raw.min(ceiling)).unwrap_or(u32::MAX)
}

/// Moves a card into its owner's base as a clean, unslotted card.
pub fn send_to_base(state: &mut GameState, mut card: Card) {
    card.clear_stack();
    card.unplace(Location::Base);
    state.add_to_base(card);
}

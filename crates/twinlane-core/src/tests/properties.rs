//! Property-based checks of combat and the phase machine.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::battlefield::Battlefield;
use crate::card::{Card, CardId, Lane, PlayerId, Slot};
use crate::lifecycle::{stack_onto, unstack};
use crate::resolver::{resolve_attack, resolve_combat, AttackTarget, TargetAssignments};
use crate::state::{GameState, Phase};

use super::helpers::{finish_turn, grunt, lane_with, towers};

/// `slot -> (attack, health)` for one side of a lane.
fn side() -> impl Strategy<Value = BTreeMap<u8, (u32, u32)>> {
    prop::collection::btree_map(1u8..=5, (0u32..8, 1u32..8), 0..=5)
}

fn side_health(field: &Battlefield, player: PlayerId) -> u32 {
    field
        .side(player)
        .iter()
        .filter_map(Card::effective_health)
        .sum()
}

proptest! {
    #[test]
    fn damage_logged_equals_damage_taken(
        attackers in side(),
        defenders in side(),
        tower_hp in 0u32..=20,
    ) {
        let field = lane_with(Lane::A, &attackers, &defenders);
        let mut start = towers(20);
        start[Lane::A][PlayerId::Player2] = tower_hp;

        let result = resolve_combat(&field, Lane::A, &TargetAssignments::new(), PlayerId::Player1, &start);

        let logged: u32 = result.combat_log.iter().map(|entry| entry.damage).sum();
        let unit_loss = side_health(&field, PlayerId::Player2)
            - side_health(&result.battlefield, PlayerId::Player2);
        let tower_loss = tower_hp - result.towers[Lane::A][PlayerId::Player2];
        prop_assert_eq!(logged, unit_loss + tower_loss);
    }

    #[test]
    fn survivors_are_alive_and_attackers_untouched(attackers in side(), defenders in side()) {
        let field = lane_with(Lane::B, &attackers, &defenders);
        let result = resolve_combat(&field, Lane::B, &TargetAssignments::new(), PlayerId::Player1, &towers(20));

        prop_assert!(result.battlefield.cards().all(Card::is_alive));
        prop_assert_eq!(result.battlefield.side(PlayerId::Player1), field.side(PlayerId::Player1));
        prop_assert!(result.towers[Lane::B][PlayerId::Player2] <= 20);
        prop_assert_eq!(result.towers[Lane::B][PlayerId::Player1], 20);
    }

    #[test]
    fn overflow_is_power_past_the_last_tower_point(power in 0u32..30, tower_hp in 0u32..=20) {
        let attackers = BTreeMap::from([(1, (power, 1))]);
        let field = lane_with(Lane::B, &attackers, &BTreeMap::new());
        let mut start = towers(20);
        start[Lane::B][PlayerId::Player2] = tower_hp;

        let result = resolve_combat(&field, Lane::B, &TargetAssignments::new(), PlayerId::Player1, &start);

        let expected = if tower_hp > 0 && power >= tower_hp { power - tower_hp } else { 0 };
        prop_assert_eq!(result.overflow_damage, expected);
        prop_assert_eq!(result.towers[Lane::B][PlayerId::Player2], tower_hp.saturating_sub(power));
    }

    #[test]
    fn stack_fights_with_summed_stats(
        (a1, h1) in (0u32..8, 1u32..8),
        (a2, h2) in (0u32..8, 1u32..8),
        hit in 0u32..20,
    ) {
        let mut field = Battlefield::new();
        field.insert(grunt("g1", PlayerId::Player2, a1, h1).placed(Lane::A, Slot::new(2)));
        let joined = stack_onto(&mut field, grunt("g2", PlayerId::Player2, a2, h2), &CardId::new("g1"));
        prop_assert!(joined.is_ok());

        let leader = field.leader_at(PlayerId::Player2, Slot::new(2)).cloned().unwrap();
        prop_assert_eq!(leader.attack_power(), Some(a1 + a2));
        prop_assert_eq!(leader.effective_health(), Some(h1 + h2));
        prop_assert_eq!(field.combatants(PlayerId::Player2).len(), 1);

        let mut split = field.clone();
        let mut follower = split.remove(PlayerId::Player2, &CardId::new("g2")).unwrap();
        unstack(&mut split, &mut follower);
        prop_assert_eq!(follower.attack_power(), Some(a2));
        prop_assert_eq!(follower.effective_health(), Some(h2));
        let host = split.get(PlayerId::Player2, &CardId::new("g1")).unwrap();
        prop_assert_eq!(host.attack_power(), Some(a1));
        prop_assert_eq!(host.effective_health(), Some(h1));

        let attacker = grunt("x", PlayerId::Player1, hit, 1).placed(Lane::A, Slot::new(2));
        let target = AttackTarget::Unit { target_id: leader.id.clone(), target_slot: Slot::new(2) };
        let outcome = resolve_attack(&attacker, &target, &field, &towers(20), Lane::A);

        let killed = hit >= h1 + h2;
        prop_assert_eq!(outcome.result.target_killed, killed);
        prop_assert_eq!(outcome.result.damage_dealt, hit.min(h1 + h2));
        if killed {
            prop_assert_eq!(outcome.battlefield.len(PlayerId::Player2), 0);
        } else {
            let left = h1 + h2 - hit;
            for card in outcome.battlefield.side(PlayerId::Player2) {
                prop_assert_eq!(card.effective_health(), Some(left));
            }
        }
    }

    #[test]
    fn combat_is_deterministic(attackers in side(), defenders in side()) {
        let field = lane_with(Lane::A, &attackers, &defenders);
        let assignments = TargetAssignments::new();
        let first = resolve_combat(&field, Lane::A, &assignments, PlayerId::Player1, &towers(20));
        let second = resolve_combat(&field, Lane::A, &assignments, PlayerId::Player1, &towers(20));
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn full_turns_close_the_phase_cycle(turns in 1usize..8) {
        let mut state = GameState::default();
        for _ in 0..turns {
            state = finish_turn(&state).0;
        }

        prop_assert_eq!(state.metadata.current_phase, Phase::Play);
        let expected_active = if turns % 2 == 0 { PlayerId::Player1 } else { PlayerId::Player2 };
        prop_assert_eq!(state.metadata.active_player, expected_active);
        prop_assert_eq!(state.metadata.current_turn as usize, 1 + turns / 2);
        for player in PlayerId::ALL {
            let resources = state.metadata.resources[player];
            prop_assert!(resources.max_mana <= state.rules.max_mana_cap);
            prop_assert_eq!(resources.mana, resources.max_mana);
        }
        prop_assert!(state.validate().is_ok());
    }
}

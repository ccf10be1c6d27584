use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twinlane_core::battlefield::{Battlefield, PerLane, PerPlayer};
use twinlane_core::card::{Card, CardKind, GenericCard, HeroCard, Lane, PlayerId, Slot};
use twinlane_core::resolver::{resolve_combat, TargetAssignments};
use twinlane_core::state::{GameState, PlayerFlags};
use twinlane_core::turn::advance_phase;

fn full_lane(lane: Lane) -> Battlefield {
    let mut field = Battlefield::new();
    for owner in PlayerId::ALL {
        for slot in 1..=5u8 {
            let id = format!("{owner}-{slot}");
            let kind = if slot == 3 {
                CardKind::Hero(HeroCard::new(4, 12))
            } else {
                CardKind::Generic(GenericCard::new(u32::from(slot), 6))
            };
            field.insert(Card::new(id.clone(), id, owner, kind).placed(lane, Slot::new(slot)));
        }
    }
    field
}

fn bench_resolve_combat_5v5(c: &mut Criterion) {
    let field = full_lane(Lane::A);
    let towers = PerLane::splat(PerPlayer::splat(20));
    let assignments = TargetAssignments::new();

    c.bench_function("resolve_combat_5v5", |b| {
        b.iter(|| {
            black_box(resolve_combat(
                black_box(&field),
                Lane::A,
                &assignments,
                PlayerId::Player1,
                &towers,
            ))
        })
    });
}

fn bench_turn_cycle(c: &mut Criterion) {
    let mut state = GameState::default();
    state.battlefields = PerLane::new(full_lane(Lane::A), full_lane(Lane::B));

    c.bench_function("turn_cycle", |b| {
        b.iter(|| {
            let mut current = state.clone();
            for _ in 0..4 {
                for player in PlayerId::ALL {
                    current.metadata.flags[player].insert(PlayerFlags::PASSED);
                }
                match advance_phase(&current) {
                    Ok(next) => current = next.state,
                    Err(_) => break,
                }
            }
            black_box(current)
        })
    });
}

criterion_group!(benches, bench_resolve_combat_5v5, bench_turn_cycle);
criterion_main!(benches);

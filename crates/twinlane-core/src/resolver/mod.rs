//! Resolver module: targeting, single attacks and lane combat batches.
//!
//! Resolvers turn declared attacks into new lane and tower values. They are
//! the pure heart of the rules core; the turn machine folds their output back
//! into the snapshot.
//!
//! # Architecture
//!
//! Resolution is layered:
//! 1. [`default_target`] / [`can_target`] decide what a unit may hit
//! 2. [`resolve_attack`] applies one attacker's damage to one target
//! 3. [`resolve_combat`] runs every attack of one player on one lane
//!
//! # Invariants
//!
//! - Resolvers never mutate their inputs; they work on clones and return them
//! - Given the same inputs, results and combat logs are identical
//! - Attackers act in ascending `(slot, id)` order
//! - No attack removes more health than the target had, or more than its power

mod attack;
mod combat;
mod log;
mod targeting;

pub use attack::{apply_attack, resolve_attack, AttackOutcome, AttackResult, Hit};
pub use combat::{resolve_combat, CombatResult};
pub use log::{CombatLogEntry, CombatReport, TargetKind};
pub use targeting::{can_target, default_target, default_targets, AttackTarget, TargetAssignments};

//! Cross-module tests for the rules core.
//!
//! - `determinism.rs`: identical inputs give identical snapshots and logs
//! - `integration.rs`: whole turns driven through intents
//! - `properties.rs`: property-based checks of combat and the phase machine
//! - `helpers.rs`: card factories and turn drivers

mod helpers;
mod properties;

pub use helpers::*;

//! Effect stack - timed, stackable status effects.
//!
//! Definitions live in an injected [`EffectCatalog`]; the per-subject
//! [`EffectStack`] holds live instances with stack counts and remaining
//! durations. Effects act on the stat ledger two ways: per-second deltas on
//! current values, and a recomputed-from-base reshaping of stat maxima.

pub mod definition;
pub mod stack;

pub use definition::{EffectCatalog, EffectDefinition, EffectType, StatModifier};
pub use stack::{ActiveEffect, EffectError, EffectStack};

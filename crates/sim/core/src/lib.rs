//! Deterministic character-survival simulation core.
//!
//! `sim-core` owns the five stat layers of one subject (stat ledger, body
//! model, thermal model, status-effect stack, progression ledger) plus the
//! game clock, and ticks them together with fixed cross-layer ordering. All
//! state mutation flows through [`sim::Simulation`], and supporting crates
//! depend on the types re-exported here.
pub mod body;
pub mod clock;
pub mod config;
pub mod effect;
pub mod event;
pub mod progression;
pub mod rng;
pub mod sim;
pub mod snapshot;
pub mod stats;
pub mod thermal;

pub use body::{BodyModel, BodyPart, BodyPartState, BurnLevel, EffectMultipliers};
pub use clock::{Clock, ClockSettings, GameTime, Season, TimeOfDay};
pub use config::SimConfig;
pub use effect::{
    ActiveEffect, EffectCatalog, EffectDefinition, EffectError, EffectStack, EffectType,
    StatModifier,
};
pub use event::{EventQueue, SimEvent};
pub use progression::{
    ActiveSkill, ProgressionLedger, SkillCatalog, SkillCategory, SkillDefinition, SkillError,
    XpSource,
};
pub use sim::{Authority, Catalogs, Simulation};
pub use snapshot::SimSnapshot;
pub use stats::{RegenCurve, StatCategory, StatDefaults, StatEntry, StatKind, StatLedger};
pub use thermal::{
    ClothingItem, ClothingSlot, FreezingStage, OverheatingStage, TemperatureBreakdown,
    ThermalModel, WeatherPreset, WeatherType,
};

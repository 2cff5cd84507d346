//! Outbound event surface of the simulation.
//!
//! Every observable transition pushes a [`SimEvent`] onto the subject's
//! [`EventQueue`]. The queue is drained by the embedder once per tick, which
//! keeps the core decoupled from any particular UI or engine event system.
//! Events fire on transitions only; nothing here is meant to be polled.

use crate::body::{BodyPart, BurnLevel};
use crate::clock::{Season, TimeOfDay};
use crate::progression::XpSource;
use crate::stats::StatKind;
use crate::thermal::{ClothingSlot, FreezingStage, OverheatingStage, WeatherType};

/// A single observable transition in the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    // ========================================================================
    // Stat ledger
    // ========================================================================
    /// A stat's current value changed.
    StatChanged {
        kind: StatKind,
        old: f32,
        new: f32,
    },
    /// A stat hit zero (was previously nonzero).
    StatReachedZero { kind: StatKind },
    /// A stat hit its maximum (was previously below it).
    StatReachedMax { kind: StatKind },
    /// A stat dropped below the critical fraction of its maximum.
    StatCritical { kind: StatKind, percentage: f32 },
    /// A stat's maximum value changed.
    StatMaxChanged { kind: StatKind, new_max: f32 },

    // ========================================================================
    // Body model
    // ========================================================================
    BodyPartDamaged { part: BodyPart, damage: f32 },
    BodyPartFractured { part: BodyPart },
    BodyPartBleeding { part: BodyPart, rate: f32 },
    BodyPartBurned { part: BodyPart, level: BurnLevel },
    BodyPartInfected { part: BodyPart, infection: f32 },

    // ========================================================================
    // Thermal model
    // ========================================================================
    WeatherChanged {
        old: WeatherType,
        new: WeatherType,
    },
    FreezingStageChanged {
        old: FreezingStage,
        new: FreezingStage,
    },
    OverheatingStageChanged {
        old: OverheatingStage,
        new: OverheatingStage,
    },
    /// Edge-triggered: fires once when leaving `FreezingStage::None`.
    StartedFreezing { effective_temperature: f32 },
    /// Edge-triggered: fires once when leaving `OverheatingStage::None`.
    StartedOverheating { effective_temperature: f32 },
    ClothingEquipped { slot: ClothingSlot },
    ClothingRemoved { slot: ClothingSlot },

    // ========================================================================
    // Status effects
    // ========================================================================
    EffectApplied { id: String, stacks: u32 },
    EffectRemoved { id: String },
    /// Carries the stack count held at the moment of expiry.
    EffectExpired { id: String, stacks: u32 },

    // ========================================================================
    // Progression
    // ========================================================================
    XpGained { amount: u32, source: XpSource },
    LevelUp { new_level: u32 },
    SkillUnlocked { id: String, level: u32 },
    /// A previously unlocked skill gained a rank.
    SkillLeveled { id: String, level: u32 },

    // ========================================================================
    // Clock
    // ========================================================================
    HourChanged { hour: u8 },
    DayChanged { day: u32 },
    TimeOfDayChanged {
        old: TimeOfDay,
        new: TimeOfDay,
    },
    SeasonChanged { season: Season },
}

/// Outbound queue of simulation events.
///
/// Layers push into the queue during mutation and tick processing; the
/// embedder drains it after each [`crate::Simulation::tick`] call so
/// observers always see a consistent end-of-tick state.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<SimEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Removes and returns all queued events in emission order.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

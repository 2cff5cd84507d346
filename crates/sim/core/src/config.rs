//! Simulation configuration constants and tunable parameters.

/// Threshold table for the freezing severity scale.
///
/// Stages are keyed on the effective ("feels like") temperature in °C.
/// Each field is the exclusive upper bound of the corresponding stage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreezingThresholds {
    pub chilled: f32,
    pub cold: f32,
    pub freezing: f32,
    pub hypothermia: f32,
    pub critical: f32,
}

impl Default for FreezingThresholds {
    fn default() -> Self {
        Self {
            chilled: 15.0,
            cold: 5.0,
            freezing: -5.0,
            hypothermia: -12.0,
            critical: -20.0,
        }
    }
}

/// Threshold table for the overheating severity scale.
///
/// Stages are keyed on the effective ("feels like") temperature in °C.
/// Each field is the exclusive lower bound of the corresponding stage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverheatingThresholds {
    pub warm: f32,
    pub hot: f32,
    pub overheating: f32,
    pub heatstroke: f32,
    pub critical: f32,
}

impl Default for OverheatingThresholds {
    fn default() -> Self {
        Self {
            warm: 30.0,
            hot: 35.0,
            overheating: 40.0,
            heatstroke: 45.0,
            critical: 50.0,
        }
    }
}

/// Tunable parameters for one subject's simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Fraction of max below which a stat fires the `StatCritical` event.
    pub critical_threshold: f32,

    /// Rate at which body temperature converges toward the effective
    /// temperature, per second.
    pub temperature_change_rate: f32,

    /// Freezing stage thresholds (effective temperature, °C).
    pub freezing: FreezingThresholds,

    /// Overheating stage thresholds (effective temperature, °C).
    pub overheating: OverheatingThresholds,

    /// Infection growth per second on an infected body part.
    pub infection_growth_rate: f32,

    /// Condition loss per second once a part's infection exceeds
    /// [`SimConfig::infection_severity_threshold`].
    pub infection_condition_drain: f32,

    /// Infection level past which the part's condition starts degrading.
    pub infection_severity_threshold: f32,

    /// Administrative level cap for progression.
    pub level_cap: u32,

    /// Base XP needed to clear level 1.
    pub xp_base: u32,

    /// Per-level XP threshold multiplier.
    pub xp_multiplier: f32,

    /// Attribute points granted per level gained.
    pub attribute_points_per_level: u32,

    /// Skill points granted per level gained.
    pub skill_points_per_level: u32,

    /// Passive XP granted per simulated minute survived (0 disables).
    pub survival_xp_per_minute: u32,
}

impl SimConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active status effects.
    pub const MAX_ACTIVE_EFFECTS: usize = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRITICAL_THRESHOLD: f32 = 0.15;
    pub const DEFAULT_TEMPERATURE_CHANGE_RATE: f32 = 0.05;

    /// Value changes smaller than this do not re-broadcast stat events
    /// during regeneration ticks.
    pub const REGEN_EVENT_EPSILON: f32 = 0.01;

    /// Two stat values within this distance are considered equal.
    pub const VALUE_EPSILON: f32 = 1.0e-4;

    pub fn new() -> Self {
        Self {
            critical_threshold: Self::DEFAULT_CRITICAL_THRESHOLD,
            temperature_change_rate: Self::DEFAULT_TEMPERATURE_CHANGE_RATE,
            freezing: FreezingThresholds::default(),
            overheating: OverheatingThresholds::default(),
            infection_growth_rate: 0.5,
            infection_condition_drain: 0.2,
            infection_severity_threshold: 50.0,
            level_cap: 100,
            xp_base: 100,
            xp_multiplier: 1.5,
            attribute_points_per_level: 3,
            skill_points_per_level: 1,
            survival_xp_per_minute: 5,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

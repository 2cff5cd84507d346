//! Thermal severity scales and the stat drains each stage imposes.

use strum::{Display, EnumIter};

use crate::config::{FreezingThresholds, OverheatingThresholds};
use crate::stats::StatKind;

/// Cold-exposure severity, keyed on effective temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FreezingStage {
    None,
    Chilled,
    Cold,
    Freezing,
    Hypothermia,
    CriticalHypothermia,
}

impl FreezingStage {
    /// Derives the stage from effective temperature in °C.
    pub fn from_effective(temp: f32, t: &FreezingThresholds) -> Self {
        if temp < t.critical {
            Self::CriticalHypothermia
        } else if temp < t.hypothermia {
            Self::Hypothermia
        } else if temp < t.freezing {
            Self::Freezing
        } else if temp < t.cold {
            Self::Cold
        } else if temp < t.chilled {
            Self::Chilled
        } else {
            Self::None
        }
    }

    /// Stat drains imposed by this stage, in units per second.
    pub fn drains(self) -> &'static [(StatKind, f32)] {
        match self {
            Self::None => &[],
            Self::Chilled => &[(StatKind::Stamina, 2.0)],
            Self::Cold => &[(StatKind::Stamina, 5.0), (StatKind::Energy, 3.0)],
            Self::Freezing => &[
                (StatKind::Stamina, 10.0),
                (StatKind::Energy, 5.0),
                (StatKind::Health, 1.0),
            ],
            Self::Hypothermia => &[(StatKind::Health, 5.0)],
            Self::CriticalHypothermia => &[(StatKind::Health, 10.0)],
        }
    }
}

/// Heat-exposure severity, keyed on effective temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverheatingStage {
    None,
    Warm,
    Hot,
    Overheating,
    Heatstroke,
    CriticalHeatstroke,
}

impl OverheatingStage {
    /// Derives the stage from effective temperature in °C.
    pub fn from_effective(temp: f32, t: &OverheatingThresholds) -> Self {
        if temp > t.critical {
            Self::CriticalHeatstroke
        } else if temp > t.heatstroke {
            Self::Heatstroke
        } else if temp > t.overheating {
            Self::Overheating
        } else if temp > t.hot {
            Self::Hot
        } else if temp > t.warm {
            Self::Warm
        } else {
            Self::None
        }
    }

    /// Stat drains imposed by this stage, in units per second.
    pub fn drains(self) -> &'static [(StatKind, f32)] {
        match self {
            Self::None => &[],
            Self::Warm => &[(StatKind::Stamina, 2.0)],
            Self::Hot => &[(StatKind::Stamina, 5.0), (StatKind::Thirst, 3.0)],
            Self::Overheating => &[
                (StatKind::Stamina, 10.0),
                (StatKind::Thirst, 5.0),
                (StatKind::Health, 1.0),
            ],
            Self::Heatstroke => &[(StatKind::Health, 5.0)],
            Self::CriticalHeatstroke => &[(StatKind::Health, 10.0)],
        }
    }
}

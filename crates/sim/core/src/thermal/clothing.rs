//! Worn clothing and its thermal contribution.

use strum::{Display, EnumIter};

/// Equipment slot a clothing item occupies. One item per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClothingSlot {
    Head,
    Torso,
    Legs,
    Feet,
    Hands,
    Back,
}

/// A worn garment. All ratings are percentages in `[0, 100]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothingItem {
    pub name: String,
    /// Protection against cold.
    pub cold_insulation: f32,
    /// Protection against heat.
    pub heat_insulation: f32,
    /// Reduces how fast the garment soaks in precipitation.
    pub water_resistance: f32,
    /// Reduces wind chill.
    pub wind_resistance: f32,
    /// Wear state; insulation degrades with it.
    pub durability: f32,
    /// How soaked the garment currently is.
    pub wetness: f32,
}

impl ClothingItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cold_insulation: 0.0,
            heat_insulation: 0.0,
            water_resistance: 0.0,
            wind_resistance: 0.0,
            durability: 100.0,
            wetness: 0.0,
        }
    }

    /// Cold insulation after wetness and wear. A soaked garment loses up
    /// to 70% of its rating.
    pub fn effective_cold_insulation(&self) -> f32 {
        self.cold_insulation * (1.0 - self.wetness / 100.0 * 0.7) * (self.durability / 100.0)
    }

    /// Heat insulation after wear; wetness does not degrade it.
    pub fn effective_heat_insulation(&self) -> f32 {
        self.heat_insulation * (self.durability / 100.0)
    }

    pub(crate) fn clamp(&mut self) {
        self.cold_insulation = self.cold_insulation.clamp(0.0, 100.0);
        self.heat_insulation = self.heat_insulation.clamp(0.0, 100.0);
        self.water_resistance = self.water_resistance.clamp(0.0, 100.0);
        self.wind_resistance = self.wind_resistance.clamp(0.0, 100.0);
        self.durability = self.durability.clamp(0.0, 100.0);
        self.wetness = self.wetness.clamp(0.0, 100.0);
    }
}

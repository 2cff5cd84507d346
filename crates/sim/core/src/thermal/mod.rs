//! Thermal model - weather, clothing, and temperature exposure.
//!
//! The environment produces an effective temperature from five terms
//! (ambient, wind chill, clothing, wetness, shelter). Body temperature
//! drifts toward it every tick, and two severity scales keyed on the
//! effective temperature ([`FreezingStage`], [`OverheatingStage`]) impose
//! stat drains while active.

pub mod clothing;
pub mod model;
pub mod stage;
pub mod weather;

pub use clothing::{ClothingItem, ClothingSlot};
pub use model::{TemperatureBreakdown, ThermalModel};
pub use stage::{FreezingStage, OverheatingStage};
pub use weather::{WeatherPreset, WeatherType};

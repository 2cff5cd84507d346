//! Environment state, effective temperature, and body-temperature drift.

use std::collections::BTreeMap;

use super::clothing::{ClothingItem, ClothingSlot};
use super::stage::{FreezingStage, OverheatingStage};
use super::weather::{WeatherPreset, WeatherType};
use crate::config::SimConfig;
use crate::event::{EventQueue, SimEvent};
use crate::stats::{StatKind, StatLedger};

/// Wind chill only applies from this wind speed (m/s) down to this
/// ambient temperature (°C).
const WIND_CHILL_MIN_WIND: f32 = 5.0;
const WIND_CHILL_MAX_AMBIENT: f32 = 10.0;

/// Ambient temperature below which clothing counts as cold protection.
const COLD_PROTECTION_AMBIENT: f32 = 20.0;

/// Wetness gained per second at full precipitation with no shelter.
const WETNESS_GAIN_RATE: f32 = 10.0;
/// Wetness lost per second while drying.
const WETNESS_DRY_RATE: f32 = 2.0;
/// Shelter above this blocks precipitation entirely.
const WETNESS_SHELTER_CUTOFF: f32 = 50.0;
/// Drying starts above this shelter or ambient temperature.
const DRYING_SHELTER: f32 = 80.0;
const DRYING_AMBIENT: f32 = 25.0;

/// Per-term decomposition of the effective temperature, for UI and debugging.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureBreakdown {
    pub ambient: f32,
    /// Always `<= 0`; scaled down by worn wind resistance.
    pub wind_chill: f32,
    /// Positive in cold weather (insulation), negative in heat (shade
    /// from heat-rated garments).
    pub clothing: f32,
    /// Always `<= 0`; evaporative loss from soaked clothing. Zero when
    /// nothing is worn.
    pub wetness_penalty: f32,
    /// Always `>= 0`.
    pub shelter_bonus: f32,
    pub effective: f32,
    /// How close the effective temperature is to the cold danger band,
    /// in `[0, 1]`.
    pub freezing_risk: f32,
    /// Same scale for the heat side.
    pub overheating_risk: f32,
}

/// Environment and exposure for one subject.
///
/// Owns the weather, worn clothing, and the two thermal severity scales.
/// [`ThermalModel::tick`] moves the body-temperature stat toward the
/// effective temperature and applies the active stage's stat drains.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermalModel {
    weather: WeatherType,
    /// Air temperature in °C.
    ambient_temperature: f32,
    /// Wind speed in m/s.
    wind_speed: f32,
    /// Precipitation intensity in `[0, 100]`.
    precipitation: f32,
    /// Cover from the elements in `[0, 100]`.
    shelter: f32,
    clothing: BTreeMap<ClothingSlot, ClothingItem>,
    freezing: FreezingStage,
    overheating: OverheatingStage,
}

impl Default for ThermalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ThermalModel {
    /// A mild clear day, nothing worn.
    pub fn new() -> Self {
        Self {
            weather: WeatherType::Clear,
            ambient_temperature: 22.0,
            wind_speed: 0.0,
            precipitation: 0.0,
            shelter: 0.0,
            clothing: BTreeMap::new(),
            freezing: FreezingStage::None,
            overheating: OverheatingStage::None,
        }
    }

    // ========================================================================
    // Environment control
    // ========================================================================

    /// Changes the weather, adopting its stock precipitation intensity.
    pub fn set_weather(&mut self, weather: WeatherType, events: &mut EventQueue) {
        if weather == self.weather {
            return;
        }
        let old = self.weather;
        self.weather = weather;
        self.precipitation = weather.precipitation();
        events.push(SimEvent::WeatherChanged { old, new: weather });
    }

    /// Applies a curated preset: weather, ambient, wind, and precipitation
    /// in one step.
    pub fn apply_preset(&mut self, preset: WeatherPreset, events: &mut EventQueue) {
        let (weather, ambient, wind, precipitation) = preset.settings();
        self.set_weather(weather, events);
        self.ambient_temperature = ambient;
        self.wind_speed = wind;
        self.precipitation = precipitation;
    }

    pub fn set_ambient_temperature(&mut self, celsius: f32) {
        self.ambient_temperature = celsius;
    }

    pub fn set_wind_speed(&mut self, meters_per_second: f32) {
        self.wind_speed = meters_per_second.max(0.0);
    }

    pub fn set_precipitation(&mut self, intensity: f32) {
        self.precipitation = intensity.clamp(0.0, 100.0);
    }

    pub fn set_shelter(&mut self, level: f32) {
        self.shelter = level.clamp(0.0, 100.0);
    }

    // ========================================================================
    // Clothing
    // ========================================================================

    /// Equips an item, returning whatever occupied the slot before.
    pub fn equip(
        &mut self,
        slot: ClothingSlot,
        mut item: ClothingItem,
        events: &mut EventQueue,
    ) -> Option<ClothingItem> {
        item.clamp();
        let previous = self.clothing.insert(slot, item);
        events.push(SimEvent::ClothingEquipped { slot });
        previous
    }

    /// Removes the item in a slot, if any.
    pub fn remove(&mut self, slot: ClothingSlot, events: &mut EventQueue) -> Option<ClothingItem> {
        let removed = self.clothing.remove(&slot);
        if removed.is_some() {
            events.push(SimEvent::ClothingRemoved { slot });
        }
        removed
    }

    pub fn clothing(&self, slot: ClothingSlot) -> Option<&ClothingItem> {
        self.clothing.get(&slot)
    }

    // ========================================================================
    // Effective temperature
    // ========================================================================

    /// Decomposes the effective temperature felt by the subject.
    pub fn breakdown(&self) -> TemperatureBreakdown {
        let ambient = self.ambient_temperature;
        let wind_chill = self.wind_chill();
        let clothing = self.clothing_adjustment();
        let wetness_penalty = -(self.average(|c| c.wetness) / 100.0) * 10.0;
        let shelter_bonus = self.shelter / 100.0 * 5.0;
        let effective = ambient + wind_chill + clothing + wetness_penalty + shelter_bonus;
        TemperatureBreakdown {
            ambient,
            wind_chill,
            clothing,
            wetness_penalty,
            shelter_bonus,
            effective,
            freezing_risk: ((10.0 - effective) / 30.0).clamp(0.0, 1.0),
            overheating_risk: ((effective - 30.0) / 20.0).clamp(0.0, 1.0),
        }
    }

    pub fn effective_temperature(&self) -> f32 {
        self.breakdown().effective
    }

    /// North American wind chill index, as an adjustment relative to the
    /// ambient temperature, scaled down by total worn wind resistance.
    /// Never positive.
    fn wind_chill(&self) -> f32 {
        if self.wind_speed < WIND_CHILL_MIN_WIND
            || self.ambient_temperature > WIND_CHILL_MAX_AMBIENT
        {
            return 0.0;
        }
        let t = self.ambient_temperature;
        let w = (self.wind_speed / 5.0).powf(0.16);
        let chill_index = 13.12 + 0.6215 * t - 13.96 * w + 0.4867 * t * w;
        let adjustment = (chill_index - t).min(0.0);
        let damping = (self.total(|c| c.wind_resistance) / 100.0).clamp(0.0, 1.0);
        adjustment * (1.0 - damping)
    }

    fn clothing_adjustment(&self) -> f32 {
        if self.ambient_temperature < COLD_PROTECTION_AMBIENT {
            self.total(ClothingItem::effective_cold_insulation) / 100.0 * 15.0
        } else {
            -(self.average(ClothingItem::effective_heat_insulation) / 100.0) * 10.0
        }
    }

    /// Sum of a rating over worn items.
    fn total(&self, f: impl Fn(&ClothingItem) -> f32) -> f32 {
        self.clothing.values().map(f).sum()
    }

    /// Mean of a rating over worn items; zero when nothing is worn.
    fn average(&self, f: impl Fn(&ClothingItem) -> f32) -> f32 {
        if self.clothing.is_empty() {
            return 0.0;
        }
        self.total(f) / self.clothing.len() as f32
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances exposure by `dt` seconds: wetness soaks or dries, body
    /// temperature drifts toward the effective temperature, and the active
    /// severity stage drains stats.
    pub fn tick(
        &mut self,
        dt: f32,
        config: &SimConfig,
        stats: &mut StatLedger,
        events: &mut EventQueue,
    ) {
        if dt <= 0.0 {
            return;
        }
        self.tick_wetness(dt, stats, events);

        let effective = self.effective_temperature();
        let body = stats.value(StatKind::BodyTemperature);
        let drift = (effective - body) * config.temperature_change_rate * dt;
        if drift != 0.0 {
            stats.apply_delta(StatKind::BodyTemperature, drift, events);
        }

        self.update_stages(effective, config, events);

        for &(kind, rate) in self.freezing.drains() {
            stats.apply_delta(kind, -rate * dt, events);
        }
        for &(kind, rate) in self.overheating.drains() {
            stats.apply_delta(kind, -rate * dt, events);
        }
    }

    fn tick_wetness(&mut self, dt: f32, stats: &mut StatLedger, events: &mut EventQueue) {
        if self.precipitation > 0.0 && self.shelter < WETNESS_SHELTER_CUTOFF {
            let exposure = 1.0 - self.shelter / 100.0;
            // Snow soaks at half the rate of rain until it melts.
            let phase = if self.weather.is_snow() { 0.5 } else { 1.0 };
            let gain = self.precipitation / 100.0 * WETNESS_GAIN_RATE * dt * exposure * phase;
            stats.apply_delta(StatKind::Wetness, gain, events);
            for item in self.clothing.values_mut() {
                item.wetness += gain * (1.0 - item.water_resistance / 100.0);
                item.clamp();
            }
        } else if self.shelter > DRYING_SHELTER || self.ambient_temperature > DRYING_AMBIENT {
            stats.apply_delta(StatKind::Wetness, -WETNESS_DRY_RATE * dt, events);
            for item in self.clothing.values_mut() {
                item.wetness -= WETNESS_DRY_RATE * dt;
                item.clamp();
            }
        }
    }

    /// Re-derives both severity stages from the effective temperature,
    /// broadcasting only actual transitions.
    fn update_stages(&mut self, effective_temperature: f32, config: &SimConfig, events: &mut EventQueue) {
        let freezing = FreezingStage::from_effective(effective_temperature, &config.freezing);
        if freezing != self.freezing {
            if self.freezing == FreezingStage::None {
                events.push(SimEvent::StartedFreezing {
                    effective_temperature,
                });
            }
            events.push(SimEvent::FreezingStageChanged {
                old: self.freezing,
                new: freezing,
            });
            self.freezing = freezing;
        }

        let overheating =
            OverheatingStage::from_effective(effective_temperature, &config.overheating);
        if overheating != self.overheating {
            if self.overheating == OverheatingStage::None {
                events.push(SimEvent::StartedOverheating {
                    effective_temperature,
                });
            }
            events.push(SimEvent::OverheatingStageChanged {
                old: self.overheating,
                new: overheating,
            });
            self.overheating = overheating;
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn weather(&self) -> WeatherType {
        self.weather
    }

    pub fn ambient_temperature(&self) -> f32 {
        self.ambient_temperature
    }

    pub fn wind_speed(&self) -> f32 {
        self.wind_speed
    }

    pub fn precipitation(&self) -> f32 {
        self.precipitation
    }

    pub fn shelter(&self) -> f32 {
        self.shelter
    }

    pub fn freezing_stage(&self) -> FreezingStage {
        self.freezing
    }

    pub fn overheating_stage(&self) -> OverheatingStage {
        self.overheating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatDefaults;

    fn stats() -> StatLedger {
        StatLedger::new(&StatDefaults::new(), &SimConfig::new())
    }

    #[test]
    fn wind_chill_requires_wind_and_cold() {
        let mut thermal = ThermalModel::new();
        thermal.set_ambient_temperature(-15.0);
        thermal.set_wind_speed(2.0);
        assert_eq!(thermal.breakdown().wind_chill, 0.0);

        thermal.set_wind_speed(25.0);
        let chill = thermal.breakdown().wind_chill;
        // Wind chill index at -15°C / 25 m/s sits near -23.7°C.
        assert!(chill < -8.0 && chill > -10.0, "chill = {chill}");

        // Warm air never produces a chill.
        thermal.set_ambient_temperature(15.0);
        assert_eq!(thermal.breakdown().wind_chill, 0.0);
    }

    #[test]
    fn wind_resistance_dampens_chill() {
        let mut thermal = ThermalModel::new();
        let mut events = EventQueue::new();
        thermal.set_ambient_temperature(-15.0);
        thermal.set_wind_speed(25.0);
        let bare = thermal.breakdown().wind_chill;

        let mut shell = ClothingItem::new("windbreaker");
        shell.wind_resistance = 100.0;
        thermal.equip(ClothingSlot::Torso, shell, &mut events);
        assert_eq!(thermal.breakdown().wind_chill, 0.0);
        assert!(bare < 0.0);
    }

    #[test]
    fn clothing_warms_in_cold_and_shades_in_heat() {
        let mut thermal = ThermalModel::new();
        let mut events = EventQueue::new();
        let mut coat = ClothingItem::new("parka");
        coat.cold_insulation = 100.0;
        coat.heat_insulation = 50.0;
        thermal.equip(ClothingSlot::Torso, coat, &mut events);

        thermal.set_ambient_temperature(0.0);
        assert!((thermal.breakdown().clothing - 15.0).abs() < 1.0e-3);

        thermal.set_ambient_temperature(42.0);
        assert!((thermal.breakdown().clothing + 5.0).abs() < 1.0e-3);
    }

    #[test]
    fn cold_insulation_accumulates_across_slots() {
        let mut thermal = ThermalModel::new();
        let mut events = EventQueue::new();
        thermal.set_ambient_temperature(0.0);
        for slot in [ClothingSlot::Torso, ClothingSlot::Legs, ClothingSlot::Head] {
            let mut layer = ClothingItem::new("wool layer");
            layer.cold_insulation = 100.0;
            thermal.equip(slot, layer, &mut events);
        }
        // Three fully rated layers stack to +45, not the +15 a single
        // layer provides.
        assert!((thermal.breakdown().clothing - 45.0).abs() < 1.0e-3);
    }

    #[test]
    fn wind_resistance_sums_and_saturates() {
        let mut thermal = ThermalModel::new();
        let mut events = EventQueue::new();
        thermal.set_ambient_temperature(-15.0);
        thermal.set_wind_speed(25.0);
        let bare = thermal.breakdown().wind_chill;
        assert!(bare < 0.0);

        // Two 60-rated garments total 120; damping caps at full.
        for slot in [ClothingSlot::Torso, ClothingSlot::Legs] {
            let mut shell = ClothingItem::new("shell");
            shell.wind_resistance = 60.0;
            thermal.equip(slot, shell, &mut events);
        }
        assert_eq!(thermal.breakdown().wind_chill, 0.0);
    }

    #[test]
    fn wetness_penalty_comes_from_worn_clothing() {
        let mut thermal = ThermalModel::new();
        let mut stats = stats();
        let mut events = EventQueue::new();
        let config = SimConfig::new();

        // An unclothed subject feels no evaporative penalty however
        // soaked their skin-wetness stat is.
        thermal.set_weather(WeatherType::HeavyRain, &mut events);
        thermal.set_ambient_temperature(15.0);
        thermal.tick(20.0, &config, &mut stats, &mut events);
        assert!(stats.value(StatKind::Wetness) > 50.0);
        assert_eq!(thermal.breakdown().wetness_penalty, 0.0);

        let mut coat = ClothingItem::new("coat");
        coat.wetness = 100.0;
        thermal.equip(ClothingSlot::Torso, coat, &mut events);
        assert!((thermal.breakdown().wetness_penalty + 10.0).abs() < 1.0e-3);
    }

    #[test]
    fn risk_figures_track_the_effective_temperature() {
        let mut thermal = ThermalModel::new();
        let comfortable = thermal.breakdown();
        assert_eq!(comfortable.freezing_risk, 0.0);
        assert_eq!(comfortable.overheating_risk, 0.0);

        thermal.set_ambient_temperature(-20.0);
        assert_eq!(thermal.breakdown().freezing_risk, 1.0);

        thermal.set_ambient_temperature(50.0);
        assert_eq!(thermal.breakdown().overheating_risk, 1.0);
    }

    #[test]
    fn weather_change_configures_precipitation_once() {
        let mut thermal = ThermalModel::new();
        let mut events = EventQueue::new();
        thermal.set_weather(WeatherType::HeavyRain, &mut events);
        assert_eq!(thermal.precipitation(), 80.0);
        assert!(events.drain().iter().any(|e| matches!(
            e,
            SimEvent::WeatherChanged {
                old: WeatherType::Clear,
                new: WeatherType::HeavyRain
            }
        )));

        // Same weather again stays silent.
        thermal.set_weather(WeatherType::HeavyRain, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn rain_soaks_and_shelter_blocks() {
        let mut thermal = ThermalModel::new();
        let mut stats = stats();
        let mut events = EventQueue::new();
        let config = SimConfig::new();
        thermal.set_weather(WeatherType::Rain, &mut events);
        thermal.set_ambient_temperature(15.0);

        thermal.tick(2.0, &config, &mut stats, &mut events);
        // 50% precipitation, no shelter: 5 wetness/s.
        assert!((stats.value(StatKind::Wetness) - 10.0).abs() < 0.1);

        thermal.set_shelter(60.0);
        let before = stats.value(StatKind::Wetness);
        thermal.tick(2.0, &config, &mut stats, &mut events);
        assert_eq!(stats.value(StatKind::Wetness), before);
    }

    #[test]
    fn waterproofs_keep_garments_dry() {
        let mut thermal = ThermalModel::new();
        let mut stats = stats();
        let mut events = EventQueue::new();
        let config = SimConfig::new();
        let mut shell = ClothingItem::new("rain shell");
        shell.water_resistance = 100.0;
        thermal.equip(ClothingSlot::Torso, shell, &mut events);
        thermal.set_weather(WeatherType::HeavyRain, &mut events);
        thermal.set_ambient_temperature(15.0);

        thermal.tick(10.0, &config, &mut stats, &mut events);
        assert_eq!(thermal.clothing(ClothingSlot::Torso).unwrap().wetness, 0.0);
        assert!(stats.value(StatKind::Wetness) > 0.0);
    }

    #[test]
    fn stage_transitions_are_edge_triggered() {
        let mut thermal = ThermalModel::new();
        let mut stats = stats();
        let mut events = EventQueue::new();
        let config = SimConfig::new();
        thermal.apply_preset(WeatherPreset::Blizzard, &mut events);
        events.drain();

        thermal.tick(1.0, &config, &mut stats, &mut events);
        let mut started = 0;
        for _ in 0..300 {
            thermal.tick(1.0, &config, &mut stats, &mut events);
            started += events
                .drain()
                .iter()
                .filter(|e| matches!(e, SimEvent::StartedFreezing { .. }))
                .count();
        }
        assert_eq!(started, 1);
        assert_eq!(thermal.freezing_stage(), FreezingStage::CriticalHypothermia);
    }

    #[test]
    fn hypothermia_drains_health() {
        let mut thermal = ThermalModel::new();
        let mut stats = stats();
        let mut events = EventQueue::new();
        let config = SimConfig::new();
        // Still air at -15°C sits in the hypothermia band.
        thermal.set_ambient_temperature(-15.0);

        let before = stats.value(StatKind::Health);
        thermal.tick(1.0, &config, &mut stats, &mut events);
        assert_eq!(thermal.freezing_stage(), FreezingStage::Hypothermia);
        // Hypothermia drains 5 health per second.
        assert!((before - stats.value(StatKind::Health) - 5.0).abs() < 0.1);

        let before = stats.value(StatKind::Health);
        thermal.set_ambient_temperature(47.0);
        thermal.tick(1.0, &config, &mut stats, &mut events);
        // Heatstroke band on the way back up.
        assert_eq!(thermal.overheating_stage(), OverheatingStage::Heatstroke);
        assert!((before - stats.value(StatKind::Health) - 5.0).abs() < 0.1);
    }
}

//! The serializable command surface a host drives the subject with.
//!
//! Every mutation the core exposes is mirrored here so commands can be
//! queued over a channel, logged, or replayed from a file.

use serde::{Deserialize, Serialize};

use sim_core::{
    BodyPart, BurnLevel, ClothingItem, ClothingSlot, Simulation, StatKind, WeatherPreset,
    WeatherType, XpSource,
};

use crate::error::Result;

/// One mutation of the simulated subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimCommand {
    // Stats
    ApplyStatDelta { kind: StatKind, amount: f32 },
    SetStat { kind: StatKind, value: f32 },
    SetStatMax { kind: StatKind, max: f32 },
    SetRegenRate { kind: StatKind, rate: f32 },
    Consume { hunger: f32, thirst: f32, energy: f32 },

    // Body
    DamagePart { part: BodyPart, amount: f32 },
    HealPart { part: BodyPart, amount: f32 },
    FracturePart { part: BodyPart },
    TreatFracture { part: BodyPart },
    StartBleeding { part: BodyPart, rate: f32 },
    StopBleeding { part: BodyPart },
    BurnPart { part: BodyPart, level: BurnLevel },
    TreatBurn { part: BodyPart },
    InfectPart { part: BodyPart, severity: f32 },
    DisinfectPart { part: BodyPart },

    // Environment
    SetWeather { weather: WeatherType },
    ApplyWeatherPreset { preset: WeatherPreset },
    SetAmbientTemperature { celsius: f32 },
    SetWindSpeed { meters_per_second: f32 },
    SetPrecipitation { intensity: f32 },
    SetShelter { level: f32 },
    EquipClothing { slot: ClothingSlot, item: ClothingItem },
    RemoveClothing { slot: ClothingSlot },

    // Effects
    ApplyEffect { id: String, stacks: u32 },
    RemoveEffect { id: String },
    RemoveEffectsByTag { tag: String },

    // Progression
    GrantXp { amount: u32, source: XpSource },
    UnlockSkill { id: String },
    LevelUpSkill { id: String },
    SpendAttributePoint { attribute: StatKind },

    // Clock
    Pause,
    Resume,
    SetTime { day: u32, hour: u8, minute: u8 },
    AdvanceByHours { hours: u32 },
    AdvanceByDays { days: u32 },
}

impl SimCommand {
    /// Applies the command to a simulation. Infallible commands always
    /// return `Ok`; effect and skill commands surface their own errors.
    pub fn apply(self, sim: &mut Simulation) -> Result<()> {
        match self {
            Self::ApplyStatDelta { kind, amount } => sim.apply_stat_delta(kind, amount),
            Self::SetStat { kind, value } => sim.set_stat(kind, value),
            Self::SetStatMax { kind, max } => sim.set_stat_max(kind, max),
            Self::SetRegenRate { kind, rate } => sim.set_regen_rate(kind, rate),
            Self::Consume {
                hunger,
                thirst,
                energy,
            } => sim.consume(hunger, thirst, energy),

            Self::DamagePart { part, amount } => sim.damage_part(part, amount),
            Self::HealPart { part, amount } => sim.heal_part(part, amount),
            Self::FracturePart { part } => sim.fracture_part(part),
            Self::TreatFracture { part } => sim.treat_fracture(part),
            Self::StartBleeding { part, rate } => sim.start_bleeding(part, rate),
            Self::StopBleeding { part } => sim.stop_bleeding(part),
            Self::BurnPart { part, level } => sim.burn_part(part, level),
            Self::TreatBurn { part } => sim.treat_burn(part),
            Self::InfectPart { part, severity } => sim.infect_part(part, severity),
            Self::DisinfectPart { part } => sim.disinfect_part(part),

            Self::SetWeather { weather } => sim.set_weather(weather),
            Self::ApplyWeatherPreset { preset } => sim.apply_weather_preset(preset),
            Self::SetAmbientTemperature { celsius } => sim.set_ambient_temperature(celsius),
            Self::SetWindSpeed { meters_per_second } => sim.set_wind_speed(meters_per_second),
            Self::SetPrecipitation { intensity } => sim.set_precipitation(intensity),
            Self::SetShelter { level } => sim.set_shelter(level),
            Self::EquipClothing { slot, item } => {
                sim.equip_clothing(slot, item);
            }
            Self::RemoveClothing { slot } => {
                sim.remove_clothing(slot);
            }

            Self::ApplyEffect { id, stacks } => sim.apply_effect(&id, stacks)?,
            Self::RemoveEffect { id } => {
                sim.remove_effect(&id);
            }
            Self::RemoveEffectsByTag { tag } => {
                sim.remove_effects_by_tag(&tag);
            }

            Self::GrantXp { amount, source } => sim.grant_xp(amount, source),
            Self::UnlockSkill { id } => sim.unlock_skill(&id)?,
            Self::LevelUpSkill { id } => sim.level_up_skill(&id)?,
            Self::SpendAttributePoint { attribute } => sim.spend_attribute_point(attribute)?,

            Self::Pause => sim.pause(),
            Self::Resume => sim.resume(),
            Self::SetTime { day, hour, minute } => sim.set_time(day, hour, minute),
            Self::AdvanceByHours { hours } => sim.advance_by_hours(hours),
            Self::AdvanceByDays { days } => sim.advance_by_days(days),
        }
        Ok(())
    }
}

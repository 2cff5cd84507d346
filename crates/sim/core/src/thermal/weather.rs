//! Weather kinds and curated presets.

use strum::{Display, EnumIter};

/// Current weather. Each kind carries a stock precipitation intensity,
/// applied automatically when the weather changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherType {
    Clear,
    Cloudy,
    Overcast,
    Fog,
    LightRain,
    Rain,
    HeavyRain,
    Thunderstorm,
    LightSnow,
    Snow,
    HeavySnow,
    Sandstorm,
}

impl WeatherType {
    /// Stock precipitation intensity for this weather, in `[0, 100]`.
    pub const fn precipitation(self) -> f32 {
        match self {
            Self::Clear | Self::Cloudy | Self::Overcast | Self::Fog | Self::Sandstorm => 0.0,
            Self::LightRain => 20.0,
            Self::Rain => 50.0,
            Self::HeavyRain | Self::Thunderstorm => 80.0,
            Self::LightSnow => 15.0,
            Self::Snow => 40.0,
            Self::HeavySnow => 70.0,
        }
    }

    pub const fn is_snow(self) -> bool {
        matches!(self, Self::LightSnow | Self::Snow | Self::HeavySnow)
    }
}

/// A complete environment setup applied in one call: weather kind,
/// ambient temperature, wind speed, and precipitation override, plus a
/// variance band the orchestrator samples with its seeded RNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherPreset {
    Clear,
    Thunderstorm,
    Blizzard,
    Heatwave,
}

impl WeatherPreset {
    /// `(weather, ambient °C, wind m/s, precipitation)` for this preset.
    pub const fn settings(self) -> (WeatherType, f32, f32, f32) {
        match self {
            Self::Clear => (WeatherType::Clear, 22.0, 3.0, 0.0),
            Self::Thunderstorm => (WeatherType::Thunderstorm, 18.0, 20.0, 85.0),
            Self::Blizzard => (WeatherType::HeavySnow, -15.0, 25.0, 90.0),
            Self::Heatwave => (WeatherType::Clear, 42.0, 2.0, 0.0),
        }
    }

    /// `(ambient variance °C, wind variance m/s)`; applied ambient and
    /// wind land uniformly within these bands around the base settings.
    pub const fn variance(self) -> (f32, f32) {
        match self {
            Self::Clear => (3.0, 1.0),
            Self::Thunderstorm => (2.0, 5.0),
            Self::Blizzard => (5.0, 5.0),
            Self::Heatwave => (3.0, 1.0),
        }
    }
}

//! Per-part anatomy state.

use strum::{Display, EnumIter};

/// One of the six tracked body regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyPart {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// Burn severity on a single part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BurnLevel {
    None,
    FirstDegree,
    SecondDegree,
    ThirdDegree,
}

impl BurnLevel {
    /// Pain added at the moment the burn is inflicted.
    pub const fn pain(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::FirstDegree => 10.0,
            Self::SecondDegree => 30.0,
            Self::ThirdDegree => 50.0,
        }
    }
}

/// The full medical state of one body part.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyPartState {
    /// Structural condition in `[0, 100]`; 100 is uninjured.
    pub condition: f32,
    pub is_fractured: bool,
    /// Blood loss in units per second; zero when not bleeding.
    pub bleeding_rate: f32,
    pub burn: BurnLevel,
    /// Infection severity in `[0, 100]`.
    pub infection: f32,
    /// Local pain in `[0, 100]`.
    pub pain: f32,
}

impl Default for BodyPartState {
    fn default() -> Self {
        Self {
            condition: 100.0,
            is_fractured: false,
            bleeding_rate: 0.0,
            burn: BurnLevel::None,
            infection: 0.0,
            pain: 0.0,
        }
    }
}

impl BodyPartState {
    pub fn is_infected(&self) -> bool {
        self.infection > 0.0
    }

    pub fn is_bleeding(&self) -> bool {
        self.bleeding_rate > 0.0
    }

    /// A part is critical when its structure has failed or carries an
    /// injury that cannot heal on its own.
    pub fn is_critical(&self) -> bool {
        self.condition < 20.0 || self.is_fractured || self.burn == BurnLevel::ThirdDegree
    }

    pub(crate) fn clamp(&mut self) {
        self.condition = self.condition.clamp(0.0, 100.0);
        self.infection = self.infection.clamp(0.0, 100.0);
        self.pain = self.pain.clamp(0.0, 100.0);
        self.bleeding_rate = self.bleeding_rate.max(0.0);
    }
}

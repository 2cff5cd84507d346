//! The fixed, enumerable set of character stats.

use strum::{Display, EnumIter};

/// One of the numeric character attributes tracked by the ledger.
///
/// The set is fixed at compile time; it is not user-extensible at runtime.
/// Every kind exists in the ledger for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    // ========================================================================
    // Core
    // ========================================================================
    Health,
    Stamina,
    Energy,

    // ========================================================================
    // Survival needs
    // ========================================================================
    Hunger,
    Thirst,
    Fatigue,

    // ========================================================================
    // Environmental
    // ========================================================================
    /// Degrees Celsius; defaults to 37 with a max of 42.
    BodyTemperature,
    Wetness,

    // ========================================================================
    // Vital signs and conditions
    // ========================================================================
    HeartRate,
    BloodLevel,
    BloodPressure,
    Sanity,
    InfectionLevel,
    Toxicity,

    // ========================================================================
    // RPG attributes
    // ========================================================================
    Strength,
    Dexterity,
    Intelligence,
    Endurance,
}

/// Grouping of related stats for batch queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatCategory {
    Core,
    Survival,
    Environmental,
    HealthConditions,
    RpgAttributes,
}

impl StatKind {
    /// The category this stat belongs to.
    pub const fn category(self) -> StatCategory {
        match self {
            Self::Health | Self::Stamina | Self::Energy => StatCategory::Core,
            Self::Hunger | Self::Thirst | Self::Fatigue => StatCategory::Survival,
            Self::BodyTemperature | Self::Wetness => StatCategory::Environmental,
            Self::HeartRate
            | Self::BloodLevel
            | Self::BloodPressure
            | Self::Sanity
            | Self::InfectionLevel
            | Self::Toxicity => StatCategory::HealthConditions,
            Self::Strength | Self::Dexterity | Self::Intelligence | Self::Endurance => {
                StatCategory::RpgAttributes
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_has_a_category() {
        // Exhaustive match in category() guarantees this; the test documents
        // the expected category sizes.
        let core = StatKind::iter()
            .filter(|k| k.category() == StatCategory::Core)
            .count();
        let survival = StatKind::iter()
            .filter(|k| k.category() == StatCategory::Survival)
            .count();
        assert_eq!(core, 3);
        assert_eq!(survival, 3);
        assert_eq!(StatKind::iter().count(), 18);
    }
}

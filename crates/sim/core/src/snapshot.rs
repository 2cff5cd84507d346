//! Full-state capture for persistence and replication.

use crate::body::BodyModel;
use crate::clock::Clock;
use crate::config::SimConfig;
use crate::effect::EffectStack;
use crate::progression::ProgressionLedger;
use crate::stats::StatLedger;
use crate::thermal::ThermalModel;

/// Everything mutable about one subject, in one value.
///
/// Config travels with the state so a replica restored from a snapshot
/// reproduces the source's thresholds exactly. Catalogs are not included;
/// both sides are expected to load the same content.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSnapshot {
    pub config: SimConfig,
    pub clock: Clock,
    pub stats: StatLedger,
    pub body: BodyModel,
    pub thermal: ThermalModel,
    pub effects: EffectStack,
    pub progression: ProgressionLedger,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyPart;
    use crate::sim::{Catalogs, Simulation};
    use crate::stats::StatKind;

    #[test]
    fn snapshot_round_trips_through_a_fresh_simulation() {
        let mut source = Simulation::new(SimConfig::new(), Catalogs::default());
        source.damage_part(BodyPart::LeftArm, 30.0);
        source.set_stat(StatKind::Thirst, 40.0);
        source.tick(1.0);

        let snapshot = source.snapshot();
        let mut restored = Simulation::new(SimConfig::new(), Catalogs::default());
        restored.restore(snapshot);

        assert_eq!(
            restored.body().part(BodyPart::LeftArm).condition,
            source.body().part(BodyPart::LeftArm).condition
        );
        assert_eq!(
            restored.stats().value(StatKind::Thirst),
            source.stats().value(StatKind::Thirst)
        );
        assert_eq!(
            restored.clock().elapsed_seconds(),
            source.clock().elapsed_seconds()
        );
    }
}

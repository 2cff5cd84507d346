//! Scripted headless scenarios: a setup command list plus a fixed-step run.

use serde::Serialize;

use sim_core::{FreezingStage, OverheatingStage, SimEvent, StatKind};

use crate::command::SimCommand;
use crate::error::Result;
use crate::handle::RuntimeHandle;

/// A reproducible exposure script.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: &'static str,
    pub setup: Vec<SimCommand>,
    /// Fixed-step frames to run.
    pub steps: u32,
    /// Real seconds per frame.
    pub step_seconds: f32,
}

/// What a scenario run ended with, ready for serialization.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub events: usize,
    pub health: f32,
    pub body_temperature: f32,
    pub freezing_stage: FreezingStage,
    pub overheating_stage: OverheatingStage,
}

impl Scenario {
    /// Two game hours of unsheltered blizzard exposure.
    pub fn blizzard() -> Self {
        Self {
            name: "blizzard",
            setup: vec![SimCommand::ApplyWeatherPreset {
                preset: sim_core::WeatherPreset::Blizzard,
            }],
            steps: 120,
            step_seconds: 1.0,
        }
    }

    /// Runs the script against a live runtime and summarizes the outcome.
    pub async fn run(&self, handle: &RuntimeHandle) -> Result<ScenarioReport> {
        for command in self.setup.iter().cloned() {
            handle.apply(command).await?;
        }

        let mut events = 0;
        for _ in 0..self.steps {
            let frame = handle.advance(self.step_seconds).await?;
            for event in &frame {
                if let SimEvent::FreezingStageChanged { old, new } = event {
                    tracing::info!(%old, %new, "freezing stage transition");
                }
            }
            events += frame.len();
        }

        let snapshot = handle.snapshot().await?;
        Ok(ScenarioReport {
            name: self.name,
            events,
            health: snapshot.stats.value(StatKind::Health),
            body_temperature: snapshot.stats.value(StatKind::BodyTemperature),
            freezing_stage: snapshot.thermal.freezing_stage(),
            overheating_stage: snapshot.thermal.overheating_stage(),
        })
    }
}

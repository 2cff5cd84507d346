//! Runtime orchestrator: spawns the worker and hands out client handles.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use sim_core::{Catalogs, ClockSettings, SimConfig, Simulation};

use crate::handle::RuntimeHandle;
use crate::worker::SimulationWorker;

/// Runtime tuning shared by the orchestrator and its worker.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub sim_config: SimConfig,
    pub clock: ClockSettings,
    pub seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sim_config: SimConfig::new(),
            clock: ClockSettings::default(),
            seed: 0,
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

/// One running subject and the task simulating it.
pub struct Runtime {
    handle: RuntimeHandle,
    worker: JoinHandle<()>,
}

impl Runtime {
    /// Spawns the simulation worker on the current tokio runtime.
    pub fn spawn(config: RuntimeConfig, catalogs: Catalogs) -> Self {
        let sim = Simulation::new(config.sim_config, catalogs)
            .with_clock_settings(config.clock)
            .with_seed(config.seed);

        let (request_tx, request_rx) = mpsc::channel(config.command_buffer_size);
        let (event_tx, _) = broadcast::channel(config.event_buffer_size);

        let worker = SimulationWorker::new(sim, request_rx, event_tx.clone());
        let join = tokio::spawn(worker.run());
        info!(seed = config.seed, "simulation worker started");

        Self {
            handle: RuntimeHandle::new(request_tx, event_tx),
            worker: join,
        }
    }

    /// A cloneable handle for clients and background tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Drops the runtime's own handle and waits for the worker to drain.
    /// Handle clones held elsewhere keep the worker alive until they drop.
    pub async fn shutdown(self) {
        let Self { handle, worker } = self;
        drop(handle);
        if worker.await.is_err() {
            tracing::error!("simulation worker panicked during shutdown");
        }
    }
}

//! Background task that owns the authoritative [`Simulation`].
//!
//! All mutation flows through the command channel; frame events fan out
//! over a broadcast channel, best effort. A lagging or absent subscriber
//! never stalls the worker.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, trace};

use sim_core::{SimEvent, SimSnapshot, Simulation};

use crate::command::SimCommand;
use crate::error::Result;

/// Requests the worker serves, oldest first.
pub enum Request {
    /// Advance the subject by `real_dt` real seconds.
    Advance {
        real_dt: f32,
        reply: oneshot::Sender<Vec<SimEvent>>,
    },
    /// Apply one mutation command.
    Apply {
        command: SimCommand,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Capture the full mutable state.
    Snapshot { reply: oneshot::Sender<SimSnapshot> },
    /// Replace the full mutable state.
    Restore {
        snapshot: Box<SimSnapshot>,
        reply: oneshot::Sender<()>,
    },
}

pub struct SimulationWorker {
    sim: Simulation,
    requests: mpsc::Receiver<Request>,
    events: broadcast::Sender<SimEvent>,
}

impl SimulationWorker {
    pub fn new(
        sim: Simulation,
        requests: mpsc::Receiver<Request>,
        events: broadcast::Sender<SimEvent>,
    ) -> Self {
        Self {
            sim,
            requests,
            events,
        }
    }

    /// Main loop; returns when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.handle(request);
        }
        debug!("all runtime handles dropped, simulation worker stopping");
    }

    fn handle(&mut self, request: Request) {
        match request {
            Request::Advance { real_dt, reply } => {
                let frame = self.sim.tick(real_dt);
                self.publish(&frame);
                if reply.send(frame).is_err() {
                    debug!("advance reply dropped by caller");
                }
            }
            Request::Apply { command, reply } => {
                let result = command.apply(&mut self.sim);
                if reply.send(result).is_err() {
                    debug!("apply reply dropped by caller");
                }
            }
            Request::Snapshot { reply } => {
                if reply.send(self.sim.snapshot()).is_err() {
                    debug!("snapshot reply dropped by caller");
                }
            }
            Request::Restore { snapshot, reply } => {
                self.sim.restore(*snapshot);
                if reply.send(()).is_err() {
                    debug!("restore reply dropped by caller");
                }
            }
        }
    }

    fn publish(&self, frame: &[SimEvent]) {
        for event in frame {
            if self.events.send(event.clone()).is_err() {
                // No subscribers right now.
                trace!(?event, "event dropped, no subscribers");
            }
        }
    }
}

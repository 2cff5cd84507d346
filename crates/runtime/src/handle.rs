//! Cloneable client facade over the simulation worker.

use tokio::sync::{broadcast, mpsc, oneshot};

use sim_core::{SimEvent, SimSnapshot};

use crate::command::SimCommand;
use crate::error::{Result, RuntimeError};
use crate::worker::Request;

/// Handle shared by every client of one running subject.
#[derive(Clone)]
pub struct RuntimeHandle {
    requests: mpsc::Sender<Request>,
    events: broadcast::Sender<SimEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        requests: mpsc::Sender<Request>,
        events: broadcast::Sender<SimEvent>,
    ) -> Self {
        Self { requests, events }
    }

    /// Advances the subject and returns the frame's events in order.
    pub async fn advance(&self, real_dt: f32) -> Result<Vec<SimEvent>> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Advance { real_dt, reply }).await?;
        response.await.map_err(|_| RuntimeError::WorkerUnavailable)
    }

    /// Applies one mutation command on the worker.
    pub async fn apply(&self, command: SimCommand) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Apply { command, reply }).await?;
        response.await.map_err(|_| RuntimeError::WorkerUnavailable)?
    }

    pub async fn snapshot(&self) -> Result<SimSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Snapshot { reply }).await?;
        response.await.map_err(|_| RuntimeError::WorkerUnavailable)
    }

    pub async fn restore(&self, snapshot: SimSnapshot) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Restore {
            snapshot: Box::new(snapshot),
            reply,
        })
        .await?;
        response.await.map_err(|_| RuntimeError::WorkerUnavailable)
    }

    /// Subscribes to the live event feed. Slow subscribers lag and skip,
    /// they never block the worker.
    pub fn subscribe(&self) -> broadcast::Receiver<SimEvent> {
        self.events.subscribe()
    }

    async fn send(&self, request: Request) -> Result<()> {
        self.requests
            .send(request)
            .await
            .map_err(|_| RuntimeError::WorkerUnavailable)
    }
}

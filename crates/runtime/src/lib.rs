//! Async host layer over `sim-core`.
//!
//! The core is synchronous and single-threaded by design; this crate puts
//! it behind a tokio worker task so many clients can drive and observe one
//! subject. Mutation goes through [`SimCommand`] on an mpsc channel, frame
//! events fan out on a broadcast channel.

pub mod command;
pub mod error;
pub mod handle;
pub mod runtime;
pub mod scenario;
pub mod telemetry;
pub mod worker;

pub use command::SimCommand;
pub use error::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use runtime::{Runtime, RuntimeConfig};
pub use scenario::{Scenario, ScenarioReport};

use thiserror::Error;

use sim_core::{EffectError, SkillError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The simulation worker stopped or its channel filled up.
    #[error("simulation worker is unavailable")]
    WorkerUnavailable,

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    Skill(#[from] SkillError),
}

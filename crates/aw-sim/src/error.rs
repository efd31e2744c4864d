use aw_core::{AgentId, AwError};
use thiserror::Error;

use crate::RunState;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("cannot {op} while the run is {state}")]
    InvalidState {
        op:    &'static str,
        state: RunState,
    },

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Core(AwError),
}

impl From<AwError> for SimError {
    fn from(err: AwError) -> Self {
        match err {
            AwError::Config(msg)          => SimError::Config(msg),
            AwError::AgentNotFound(agent) => SimError::AgentNotFound(agent),
            other                         => SimError::Core(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

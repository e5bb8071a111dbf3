use epi_core::{AgentId, EpiError, EpiState, Tick, Vec2};
use thiserror::Error;

/// Errors raised while building or running the stepper.
///
/// Everything except `Config` is an internal-consistency failure: the
/// population can no longer be trusted and the driver discards it.
#[derive(Debug, Error)]
pub enum DynamicsError {
    #[error(transparent)]
    Config(#[from] EpiError),

    #[error("agent {agent} left its wander bounds at ({}, {}) in frame {frame}", position.x, position.y)]
    OutOfBounds {
        agent:    AgentId,
        position: Vec2,
        frame:    Tick,
    },

    #[error("agent {agent} moved {from} -> {to}, which is not a legal transition")]
    IllegalTransition {
        agent: AgentId,
        from:  EpiState,
        to:    EpiState,
    },

    #[error("{treated} agents in treatment exceeds capacity {capacity}")]
    OverCapacity {
        treated:  usize,
        capacity: usize,
    },

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type DynamicsResult<T> = Result<T, DynamicsError>;

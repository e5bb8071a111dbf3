use epi_core::EpiError;
use epi_dynamics::DynamicsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration field read by `population_init` or at the start of a
    /// run is invalid.
    #[error(transparent)]
    Config(#[from] EpiError),

    #[error("run() called before population_init()")]
    NotInitialized,

    /// Internal-consistency failure during a tick.  The population has been
    /// discarded; call `population_init()` again.
    #[error("invariant violated: {0}")]
    Invariant(DynamicsError),
}

impl From<DynamicsError> for SimError {
    fn from(err: DynamicsError) -> Self {
        match err {
            DynamicsError::Config(e) => SimError::Config(e),
            other => SimError::Invariant(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

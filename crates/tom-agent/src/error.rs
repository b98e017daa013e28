use thiserror::Error;
use tom_core::{ContextBin, DeltaBin, Direction, TomError};

#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("agent used before a direction was set for the episode")]
    DirectionUnset,

    #[error("direction already set to {0} for the current episode")]
    DirectionLocked(Direction),

    #[error("{context} outside the {n_contexts} context bins")]
    ContextOutOfRange {
        context:    ContextBin,
        n_contexts: usize,
    },

    #[error("{delta} outside the {n_deltas} delta bins")]
    DeltaOutOfRange {
        delta:    DeltaBin,
        n_deltas: usize,
    },

    #[error("unsupported theory-of-mind order {0} (supported: 0, 1)")]
    UnsupportedOrder(u8),

    #[error(transparent)]
    Core(#[from] TomError),
}

pub type AgentResult<T> = Result<T, AgentError>;

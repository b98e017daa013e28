use thiserror::Error;
use tom_agent::AgentError;
use tom_core::{AgentId, TomError};

#[derive(Debug, Error, PartialEq)]
pub enum NegotiationError {
    #[error("negotiation configuration error: {0}")]
    Config(#[from] TomError),

    #[error("{agent} failed: {source}")]
    Agent {
        agent:  AgentId,
        #[source]
        source: AgentError,
    },
}

impl NegotiationError {
    pub(crate) fn agent(agent: AgentId) -> impl FnOnce(AgentError) -> NegotiationError {
        move |source| NegotiationError::Agent { agent, source }
    }
}

pub type NegotiationResult<T> = Result<T, NegotiationError>;

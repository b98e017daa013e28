//! A negotiating party: external state plus the agent that bargains for it.

use tom_agent::{AnyNegotiator, Negotiator};
use tom_core::{AgentId, Direction, Party};

/// One side of an encounter.
///
/// The protocol borrows two traders mutably for the whole episode, so a
/// trader can never be in two negotiations at once.
#[derive(Clone, Debug)]
pub struct Trader<N = AnyNegotiator> {
    pub id:         AgentId,
    pub party:      Party,
    pub negotiator: N,
}

impl<N: Negotiator> Trader<N> {
    pub fn new(id: AgentId, party: Party, negotiator: N) -> Self {
        Self { id, party, negotiator }
    }

    /// The role this trader would take in an encounter right now.
    pub fn role(&self) -> Direction {
        Direction::from_ownership(self.party.owns())
    }
}

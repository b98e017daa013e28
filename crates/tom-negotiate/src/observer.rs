//! Negotiation observer trait for tracing and data collection.

use tom_agent::Action;
use tom_core::{AgentId, ContextBin};

use crate::{BUYER_OPENING, Outcome, SELLER_OPENING};

/// Everything that happened in one bargaining round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round:         u32,
    pub context:       ContextBin,
    /// Offers standing at the start of the round.
    pub seller_before: f64,
    pub buyer_before:  f64,
    pub seller:        Action,
    pub buyer:         Action,
}

/// Callbacks invoked by [`Negotiation`][crate::Negotiation] during an episode.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait NegotiationObserver {
    /// Called once roles are assigned, before the first round.
    fn on_start(&mut self, _seller: AgentId, _buyer: AgentId) {}

    /// Called after both agents acted and learned.
    fn on_round(&mut self, _record: &RoundRecord) {}

    /// Called with the final outcome.
    fn on_end(&mut self, _outcome: &Outcome) {}
}

/// A [`NegotiationObserver`] that does nothing.
pub struct NoopObserver;

impl NegotiationObserver for NoopObserver {}

/// Records every round of one episode.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    pub seller:  Option<AgentId>,
    pub buyer:   Option<AgentId>,
    pub rounds:  Vec<RoundRecord>,
    pub outcome: Option<Outcome>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last offer pair, or the opening pair if no round ran.
    pub fn final_offers(&self) -> (f64, f64) {
        self.rounds
            .last()
            .map_or((SELLER_OPENING, BUYER_OPENING), |r| (r.seller.offer, r.buyer.offer))
    }
}

impl NegotiationObserver for Transcript {
    fn on_start(&mut self, seller: AgentId, buyer: AgentId) {
        self.seller = Some(seller);
        self.buyer = Some(buyer);
    }

    fn on_round(&mut self, record: &RoundRecord) {
        self.rounds.push(*record);
    }

    fn on_end(&mut self, outcome: &Outcome) {
        self.outcome = Some(outcome.clone());
    }
}

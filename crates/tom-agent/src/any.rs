//! Closed set of agent variants.

use tom_core::{AgentRng, BargainConfig, ContextBin, DeltaBin, Direction, Party};

use crate::{Action, AgentError, AgentResult, Negotiator, Tom0, Tom1};

/// Either agent order behind one concrete type, for populations that mix
/// orders without boxing.
#[derive(Clone, Debug)]
pub enum AnyNegotiator {
    Order0(Tom0),
    Order1(Tom1),
}

impl AnyNegotiator {
    /// Build an agent of the given order.
    pub fn of_order(order: u8, config: &BargainConfig, rng: AgentRng) -> AgentResult<Self> {
        match order {
            0 => Ok(AnyNegotiator::Order0(Tom0::new(config, rng)?)),
            1 => Ok(AnyNegotiator::Order1(Tom1::new(config, rng)?)),
            n => Err(AgentError::UnsupportedOrder(n)),
        }
    }

    fn inner(&self) -> &dyn Negotiator {
        match self {
            AnyNegotiator::Order0(a) => a,
            AnyNegotiator::Order1(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Negotiator {
        match self {
            AnyNegotiator::Order0(a) => a,
            AnyNegotiator::Order1(a) => a,
        }
    }
}

impl From<Tom0> for AnyNegotiator {
    fn from(agent: Tom0) -> Self {
        AnyNegotiator::Order0(agent)
    }
}

impl From<Tom1> for AnyNegotiator {
    fn from(agent: Tom1) -> Self {
        AnyNegotiator::Order1(agent)
    }
}

impl Negotiator for AnyNegotiator {
    fn order(&self) -> u8 {
        self.inner().order()
    }

    fn direction(&self) -> Option<Direction> {
        self.inner().direction()
    }

    fn set_direction(&mut self, direction: Direction, opponent: &Party) -> AgentResult<()> {
        self.inner_mut().set_direction(direction, opponent)
    }

    fn release(&mut self) {
        self.inner_mut().release()
    }

    fn act(
        &mut self,
        seller_offer: f64,
        buyer_offer:  f64,
        context:      ContextBin,
    ) -> AgentResult<Action> {
        self.inner_mut().act(seller_offer, buyer_offer, context)
    }

    fn learn(
        &mut self,
        seller_delta: DeltaBin,
        buyer_delta:  DeltaBin,
        context:      ContextBin,
    ) -> AgentResult<()> {
        self.inner_mut().learn(seller_delta, buyer_delta, context)
    }
}

//! Order-0 theory-of-mind agent.

use tracing::trace;

use tom_core::{
    AgentRng, BargainConfig, ContextBin, DeltaBin, DeltaGrid, Direction, Party, PayoffMatrix,
    TieBreak,
};

use crate::model::choose_bin;
use crate::{Action, AgentError, AgentResult, Beliefs0, Negotiator};

/// Reasons about the opponent only through the frequency of concessions it
/// has seen in each context.
///
/// Each round it builds the payoff matrix of "my offer moved by every step"
/// against "their offer moved by every step", weights the columns by its
/// belief for the current context, and takes the step with the highest
/// expected utility.
#[derive(Clone, Debug)]
pub struct Tom0 {
    grid:      DeltaGrid,
    tie_break: TieBreak,
    beliefs:   Beliefs0,
    direction: Option<Direction>,
    /// External state of the party this model acts for, when it is the
    /// nested model of an order-1 agent standing in for the opponent.
    subject:   Option<Party>,
    rng:       AgentRng,
}

impl Tom0 {
    pub fn new(config: &BargainConfig, rng: AgentRng) -> AgentResult<Self> {
        config.validate()?;
        Ok(Self {
            grid:      config.delta_grid(),
            tie_break: config.tie_break,
            beliefs:   Beliefs0::new(config.n_deltas, config.n_contexts),
            direction: None,
            subject:   None,
            rng,
        })
    }

    /// Cumulative belief table.
    pub fn beliefs(&self) -> &Beliefs0 {
        &self.beliefs
    }

    pub fn grid(&self) -> &DeltaGrid {
        &self.grid
    }

    /// The party this model impersonates, if any.
    pub fn subject(&self) -> Option<&Party> {
        self.subject.as_ref()
    }

    /// Act as `party` holding `direction` for the current episode.
    pub(crate) fn impersonate(&mut self, party: Party, direction: Direction) -> AgentResult<()> {
        self.set_direction(direction, &party)?;
        self.subject = Some(party);
        Ok(())
    }

    fn require_direction(&self) -> AgentResult<Direction> {
        self.direction.ok_or(AgentError::DirectionUnset)
    }

    fn check_context(&self, context: ContextBin) -> AgentResult<()> {
        if context.index() >= self.beliefs.n_contexts() {
            return Err(AgentError::ContextOutOfRange {
                context,
                n_contexts: self.beliefs.n_contexts(),
            });
        }
        Ok(())
    }

    fn check_delta(&self, delta: DeltaBin) -> AgentResult<()> {
        if delta.index() >= self.grid.len() {
            return Err(AgentError::DeltaOutOfRange { delta, n_deltas: self.grid.len() });
        }
        Ok(())
    }
}

impl Negotiator for Tom0 {
    fn order(&self) -> u8 {
        0
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }

    fn set_direction(&mut self, direction: Direction, _opponent: &Party) -> AgentResult<()> {
        if let Some(current) = self.direction {
            return Err(AgentError::DirectionLocked(current));
        }
        self.direction = Some(direction);
        Ok(())
    }

    fn release(&mut self) {
        self.direction = None;
        self.subject = None;
    }

    fn act(
        &mut self,
        seller_offer: f64,
        buyer_offer:  f64,
        context:      ContextBin,
    ) -> AgentResult<Action> {
        let direction = self.require_direction()?;
        self.check_context(context)?;

        let belief = self.beliefs.query(context);
        let payoff = PayoffMatrix::compute(
            &self.grid.shifted(seller_offer, -1.0),
            &self.grid.shifted(buyer_offer, 1.0),
            direction,
        );
        let utility = payoff.expected_utility(&belief)?;

        let delta = choose_bin(&utility, self.tie_break, &mut self.rng);
        let offer = direction.own_offer(seller_offer, buyer_offer)
            - direction.sign() * self.grid.step(delta);

        trace!(%direction, context = context.0, delta = delta.0, offer, "order-0 act");
        Ok(Action { offer, delta })
    }

    fn learn(
        &mut self,
        seller_delta: DeltaBin,
        buyer_delta:  DeltaBin,
        context:      ContextBin,
    ) -> AgentResult<()> {
        let direction = self.require_direction()?;
        self.check_context(context)?;
        self.check_delta(seller_delta)?;
        self.check_delta(buyer_delta)?;

        // The seller's bins are indexed in the seller's own frame; the buyer
        // mirrors them so a larger index always means a larger concession
        // toward the observer.
        let observed = match direction {
            Direction::Seller => buyer_delta,
            Direction::Buyer  => self.grid.reflect(seller_delta),
        };
        self.beliefs.observe(context, observed);
        Ok(())
    }
}

//! Order-1 theory-of-mind agent.

use tracing::trace;

use tom_core::{
    AgentRng, BargainConfig, ContextBin, DeltaBin, DeltaGrid, Direction, Party, PayoffMatrix,
    TieBreak, TomError,
};

use crate::model::choose_bin;
use crate::{Action, AgentError, AgentResult, Negotiator, Tom0};

/// Reasons about the opponent by simulating it as an order-0 agent.
///
/// The nested [`Tom0`] is wired to the opponent's role and external state at
/// the start of every episode.  Each round the agent asks it for the single
/// offer the opponent would make, then takes its own step with the highest
/// raw payoff against that one predicted offer.  There is no averaging over
/// a distribution at this level.
///
/// All learning goes to the nested model; the order-1 agent holds no belief
/// table of its own.
#[derive(Clone, Debug)]
pub struct Tom1 {
    grid:      DeltaGrid,
    tie_break: TieBreak,
    direction: Option<Direction>,
    model:     Tom0,
    rng:       AgentRng,
}

impl Tom1 {
    pub fn new(config: &BargainConfig, mut rng: AgentRng) -> AgentResult<Self> {
        let model = Tom0::new(config, rng.child())?;
        Ok(Self {
            grid: config.delta_grid(),
            tie_break: config.tie_break,
            direction: None,
            model,
            rng,
        })
    }

    /// The nested order-0 model of the opponent.
    pub fn model(&self) -> &Tom0 {
        &self.model
    }

    /// The opponent's next offer as predicted by the nested model.
    pub fn predict(
        &mut self,
        seller_offer: f64,
        buyer_offer:  f64,
        context:      ContextBin,
    ) -> AgentResult<f64> {
        Ok(self.model.act(seller_offer, buyer_offer, context)?.offer)
    }
}

impl Negotiator for Tom1 {
    fn order(&self) -> u8 {
        1
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }

    fn set_direction(&mut self, direction: Direction, opponent: &Party) -> AgentResult<()> {
        if let Some(current) = self.direction {
            return Err(AgentError::DirectionLocked(current));
        }
        self.model.impersonate(*opponent, direction.opposite())?;
        self.direction = Some(direction);
        Ok(())
    }

    fn release(&mut self) {
        self.direction = None;
        self.model.release();
    }

    fn act(
        &mut self,
        seller_offer: f64,
        buyer_offer:  f64,
        context:      ContextBin,
    ) -> AgentResult<Action> {
        let direction = self.direction.ok_or(AgentError::DirectionUnset)?;
        let predicted = self.predict(seller_offer, buyer_offer, context)?;

        let own = direction.own_offer(seller_offer, buyer_offer);
        let candidates = self.grid.shifted(own, -direction.sign());
        let payoff = match direction {
            Direction::Seller => PayoffMatrix::compute(&candidates, &[predicted], direction),
            Direction::Buyer  => PayoffMatrix::compute(&[predicted], &candidates, direction),
        };
        let values = payoff.squeeze().ok_or(TomError::DimensionMismatch {
            expected: 1,
            got:      payoff.cols(),
        })?;

        let delta = choose_bin(values, self.tie_break, &mut self.rng);
        let offer = own - direction.sign() * self.grid.step(delta);

        trace!(%direction, context = context.0, predicted, delta = delta.0, offer, "order-1 act");
        Ok(Action { offer, delta })
    }

    fn learn(
        &mut self,
        seller_delta: DeltaBin,
        buyer_delta:  DeltaBin,
        context:      ContextBin,
    ) -> AgentResult<()> {
        self.model.learn(seller_delta, buyer_delta, context)
    }
}

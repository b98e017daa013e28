//! The `Negotiator` trait: the seam between the protocol and the agents.

use tom_core::{AgentRng, ContextBin, DeltaBin, Direction, Party, TieBreak, argmax_all, argmax_first};

use crate::AgentResult;

/// One agent's move for a round: the new offer and the concession bin that
/// produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Action {
    pub offer: f64,
    pub delta: DeltaBin,
}

/// A bargaining agent of some theory-of-mind order.
///
/// # Lifecycle
///
/// An agent starts every episode without a direction.  The protocol calls
/// [`set_direction`][Self::set_direction] exactly once, then alternates
/// [`act`][Self::act] and [`learn`][Self::learn] every round, and finally
/// [`release`][Self::release]s the agent.  Calling `act` or `learn` on an
/// agent without a direction is a programmer error and returns
/// [`AgentError::DirectionUnset`][crate::AgentError::DirectionUnset].
///
/// Beliefs are not episode state: they survive `release` and keep
/// accumulating over the agent's lifetime.
pub trait Negotiator {
    /// Theory-of-mind order: 0 or 1.
    fn order(&self) -> u8;

    /// The role held in the current episode, if any.
    fn direction(&self) -> Option<Direction>;

    /// Take a role for the current episode.
    ///
    /// `opponent` is the external state of the other side.  Order-1 agents
    /// hand it to the order-0 model they use to simulate that side.
    fn set_direction(&mut self, direction: Direction, opponent: &Party) -> AgentResult<()>;

    /// End the episode: drop the role.  Beliefs are kept.
    fn release(&mut self);

    /// Choose a concession given the current offers and context.
    fn act(
        &mut self,
        seller_offer: f64,
        buyer_offer:  f64,
        context:      ContextBin,
    ) -> AgentResult<Action>;

    /// Learn from the concession bins both sides just used.
    fn learn(
        &mut self,
        seller_delta: DeltaBin,
        buyer_delta:  DeltaBin,
        context:      ContextBin,
    ) -> AgentResult<()>;
}

/// Pick the winning concession bin from per-bin values.
///
/// `LowestIndex` takes the first maximum (smallest concession); `Random`
/// draws uniformly among all maxima.
pub(crate) fn choose_bin(values: &[f64], tie_break: TieBreak, rng: &mut AgentRng) -> DeltaBin {
    let idx = match tie_break {
        TieBreak::LowestIndex => argmax_first(values),
        TieBreak::Random      => rng.choose(&argmax_all(values)).copied(),
    };
    DeltaBin(idx.unwrap_or(0) as u16)
}

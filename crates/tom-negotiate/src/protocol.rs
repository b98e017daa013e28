//! The alternating-offer protocol.

use tracing::{debug, warn};

use tom_agent::Negotiator;
use tom_core::{AgentId, BargainConfig, ContextMapper, Direction, Party, crosses};

use crate::{
    Agreement, NegotiationError, NegotiationObserver, NegotiationResult, NoTradeReason,
    NoopObserver, Outcome, RoundRecord, Trader,
};

/// Opening seller offer.
pub const SELLER_OPENING: f64 = 1.0;
/// Opening buyer offer.
pub const BUYER_OPENING: f64 = 0.0;

/// One side of an episode after role assignment.
struct Side<'a> {
    id:    AgentId,
    party: Party,
    agent: &'a mut dyn Negotiator,
}

/// Runs negotiation episodes between pairs of traders.
///
/// # Episode
///
/// ```text
/// assign roles          owner → seller (+1), the other → buyer (-1);
///                       same role on both sides → no trade
/// seller = 1.0, buyer = 0.0
/// for round in 1..=max_rounds:
///   ① context  — bin the current offer pair
///   ② act      — both agents propose new offers from the same pair
///   ③ learn    — both agents observe both concession bins
///   ④ update   — the proposals become the current offers
///   ⑤ validity — buyer ∉ [0, 1) or seller ∉ (0, 1] → no trade
///   ⑥ crossing — seller ≤ buyer (see `tom_core::crosses`) → acceptance check, stop
/// round cap reached → no trade
/// ```
///
/// The acceptance check requires `buyer_offer × buyer.wealth` to exceed the
/// seller's reservation value; the settlement price is the buyer's final
/// offer.
pub struct Negotiation {
    config:   BargainConfig,
    contexts: ContextMapper,
}

impl Negotiation {
    pub fn new(config: BargainConfig) -> NegotiationResult<Self> {
        config.validate()?;
        Ok(Self { contexts: config.context_mapper(), config })
    }

    pub fn config(&self) -> &BargainConfig {
        &self.config
    }

    /// Run one episode without callbacks.
    pub fn negotiate<A: Negotiator, B: Negotiator>(
        &self,
        a: &mut Trader<A>,
        b: &mut Trader<B>,
    ) -> NegotiationResult<Outcome> {
        self.negotiate_observed(a, b, &mut NoopObserver)
    }

    /// Run one episode, reporting every round to `observer`.
    ///
    /// Either trader may be the owner; roles follow ownership.  Both agents
    /// are released again before this returns, whatever the outcome.
    pub fn negotiate_observed<A: Negotiator, B: Negotiator, O: NegotiationObserver>(
        &self,
        a:        &mut Trader<A>,
        b:        &mut Trader<B>,
        observer: &mut O,
    ) -> NegotiationResult<Outcome> {
        let role = a.role();
        if role == b.role() {
            debug!(a = a.id.0, b = b.id.0, %role, "same role on both sides, no trade");
            let outcome = Outcome::NoTrade(NoTradeReason::SameRole);
            observer.on_end(&outcome);
            return Ok(outcome);
        }

        let side_a = Side { id: a.id, party: a.party, agent: &mut a.negotiator };
        let side_b = Side { id: b.id, party: b.party, agent: &mut b.negotiator };
        let (mut seller, mut buyer) = match role {
            Direction::Seller => (side_a, side_b),
            Direction::Buyer  => (side_b, side_a),
        };

        let result = self.episode(&mut seller, &mut buyer, observer);
        seller.agent.release();
        buyer.agent.release();

        let outcome = result?;
        debug!(seller = seller.id.0, buyer = buyer.id.0, ?outcome, "episode finished");
        observer.on_end(&outcome);
        Ok(outcome)
    }

    fn episode<O: NegotiationObserver>(
        &self,
        seller:   &mut Side<'_>,
        buyer:    &mut Side<'_>,
        observer: &mut O,
    ) -> NegotiationResult<Outcome> {
        seller
            .agent
            .set_direction(Direction::Seller, &buyer.party)
            .map_err(NegotiationError::agent(seller.id))?;
        buyer
            .agent
            .set_direction(Direction::Buyer, &seller.party)
            .map_err(NegotiationError::agent(buyer.id))?;
        observer.on_start(seller.id, buyer.id);

        let mut seller_offer = SELLER_OPENING;
        let mut buyer_offer = BUYER_OPENING;

        for round in 1..=self.config.max_rounds {
            let context = self.contexts.bin(seller_offer, buyer_offer);

            let s = seller
                .agent
                .act(seller_offer, buyer_offer, context)
                .map_err(NegotiationError::agent(seller.id))?;
            let b = buyer
                .agent
                .act(seller_offer, buyer_offer, context)
                .map_err(NegotiationError::agent(buyer.id))?;

            seller
                .agent
                .learn(s.delta, b.delta, context)
                .map_err(NegotiationError::agent(seller.id))?;
            buyer
                .agent
                .learn(s.delta, b.delta, context)
                .map_err(NegotiationError::agent(buyer.id))?;

            observer.on_round(&RoundRecord {
                round,
                context,
                seller_before: seller_offer,
                buyer_before:  buyer_offer,
                seller:        s,
                buyer:         b,
            });
            debug!(
                round,
                context = context.0,
                seller_delta = s.delta.0,
                buyer_delta = b.delta.0,
                seller_offer = s.offer,
                buyer_offer = b.offer,
                "bargaining round"
            );

            seller_offer = s.offer;
            buyer_offer = b.offer;

            if !offers_in_range(seller_offer, buyer_offer) {
                debug!(round, seller_offer, buyer_offer, "offer left the unit interval");
                return Ok(Outcome::NoTrade(NoTradeReason::InvalidOffer {
                    round,
                    seller_offer,
                    buyer_offer,
                }));
            }

            if crosses(seller_offer, buyer_offer) {
                return Ok(accept(seller, buyer, buyer_offer, round));
            }
        }

        warn!(
            seller = seller.id.0,
            buyer = buyer.id.0,
            max_rounds = self.config.max_rounds,
            seller_offer,
            buyer_offer,
            "round cap reached without agreement"
        );
        Ok(Outcome::NoTrade(NoTradeReason::RoundCap { rounds: self.config.max_rounds }))
    }
}

/// Buyer offers live in `[0, 1)`, seller offers in `(0, 1]`.
#[inline]
pub fn offers_in_range(seller_offer: f64, buyer_offer: f64) -> bool {
    (0.0..1.0).contains(&buyer_offer) && seller_offer > 0.0 && seller_offer <= 1.0
}

/// Final acceptance check once the offers have crossed.
fn accept(seller: &Side<'_>, buyer: &Side<'_>, price: f64, rounds: u32) -> Outcome {
    if price * buyer.party.wealth > seller.party.reservation_value() {
        Outcome::Agreement(Agreement {
            seller: seller.id,
            buyer: buyer.id,
            price,
            rounds,
        })
    } else {
        debug!(price, reservation = seller.party.reservation_value(), "crossed below reservation value");
        Outcome::NoTrade(NoTradeReason::BelowReservation { price })
    }
}

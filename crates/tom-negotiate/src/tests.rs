//! Scenario tests for the negotiation protocol.

use tom_agent::{Action, AgentError, AgentResult, AnyNegotiator, Negotiator};
use tom_core::{AgentId, AgentRng, BargainConfig, ContextBin, DeltaBin, Direction, Party, crosses};

use crate::{
    Agreement, BUYER_OPENING, Negotiation, NegotiationError, NoTradeReason, Outcome,
    SELLER_OPENING, Transcript, Trader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

fn config() -> BargainConfig {
    BargainConfig::with_bins(10, 10)
}

fn trader(id: u32, order: u8, party: Party) -> Trader {
    let agent = AnyNegotiator::of_order(order, &config(), AgentRng::new(SEED, AgentId(id))).unwrap();
    Trader::new(AgentId(id), party, agent)
}

fn owner(id: u32, order: u8, reservation: f64) -> Trader {
    trader(id, order, Party::new(0.0, reservation))
}

fn intruder(id: u32, order: u8, wealth: f64) -> Trader {
    trader(id, order, Party::intruder(wealth))
}

fn negotiation() -> Negotiation {
    Negotiation::new(config()).unwrap()
}

/// Scripted agent: concedes a fixed amount every round.
struct Scripted {
    direction:  Option<Direction>,
    step:       f64,
    fail_learn: bool,
}

impl Scripted {
    fn conceding(step: f64) -> Self {
        Self { direction: None, step, fail_learn: false }
    }

    fn failing() -> Self {
        Self { direction: None, step: 0.1, fail_learn: true }
    }
}

impl Negotiator for Scripted {
    fn order(&self) -> u8 {
        0
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }

    fn set_direction(&mut self, direction: Direction, _opponent: &Party) -> AgentResult<()> {
        self.direction = Some(direction);
        Ok(())
    }

    fn release(&mut self) {
        self.direction = None;
    }

    fn act(&mut self, seller_offer: f64, buyer_offer: f64, _context: ContextBin) -> AgentResult<Action> {
        let direction = self.direction.ok_or(AgentError::DirectionUnset)?;
        let own = direction.own_offer(seller_offer, buyer_offer);
        Ok(Action { offer: own - direction.sign() * self.step, delta: DeltaBin(0) })
    }

    fn learn(&mut self, _s: DeltaBin, _b: DeltaBin, _context: ContextBin) -> AgentResult<()> {
        if self.fail_learn {
            return Err(AgentError::DirectionUnset);
        }
        Ok(())
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn zero_round_cap_rejected() {
        let cfg = BargainConfig { max_rounds: 0, ..config() };
        assert!(matches!(Negotiation::new(cfg), Err(NegotiationError::Config(_))));
    }
}

// ── Role assignment ───────────────────────────────────────────────────────────

#[cfg(test)]
mod role_tests {
    use super::*;

    #[test]
    fn two_buyers_cannot_trade() {
        let mut a = intruder(0, 0, 100.0);
        let mut b = intruder(1, 0, 100.0);
        let outcome = negotiation().negotiate(&mut a, &mut b).unwrap();
        assert_eq!(outcome, Outcome::NoTrade(NoTradeReason::SameRole));
        assert_eq!(outcome.settlement(), None);
    }

    #[test]
    fn two_sellers_cannot_trade() {
        let mut a = owner(0, 0, 10.0);
        let mut b = owner(1, 1, 10.0);
        let outcome = negotiation().negotiate(&mut a, &mut b).unwrap();
        assert_eq!(outcome, Outcome::NoTrade(NoTradeReason::SameRole));
        assert_eq!(a.negotiator.direction(), None);
    }

    #[test]
    fn owner_sells_whatever_the_argument_order() {
        let mut buyer = intruder(3, 0, 100.0);
        let mut seller = owner(8, 0, 0.5);
        let mut transcript = Transcript::new();
        let outcome = negotiation()
            .negotiate_observed(&mut buyer, &mut seller, &mut transcript)
            .unwrap();
        assert_eq!(transcript.seller, Some(AgentId(8)));
        assert_eq!(transcript.buyer, Some(AgentId(3)));
        let deal = outcome.agreement().unwrap();
        assert_eq!((deal.seller, deal.buyer), (AgentId(8), AgentId(3)));
    }

    #[test]
    fn agents_released_after_episode() {
        let mut s = owner(0, 1, 1.0);
        let mut b = intruder(1, 0, 100.0);
        negotiation().negotiate(&mut s, &mut b).unwrap();
        assert_eq!(s.negotiator.direction(), None);
        assert_eq!(b.negotiator.direction(), None);
        // A second episode must be able to take roles again.
        assert!(negotiation().negotiate(&mut s, &mut b).is_ok());
    }
}

// ── Order-0 scenarios ─────────────────────────────────────────────────────────

#[cfg(test)]
mod order0_scenarios {
    use super::*;

    /// A zero reservation value is stood in for by `f64::MIN_POSITIVE`: a
    /// party with no property at all would take the buyer role.
    #[test]
    fn uniform_agents_agree_quickly() {
        let mut s = owner(0, 0, f64::MIN_POSITIVE);
        let mut b = intruder(1, 0, 100.0);
        let outcome = negotiation().negotiate(&mut s, &mut b).unwrap();
        let deal = outcome.agreement().expect("agreement");
        assert!(deal.rounds <= 20);
        assert!(deal.price > 0.0);
        assert!((deal.price - 10.0 / 11.0).abs() < 1e-12);
        assert_eq!(outcome.settlement(), Some(deal.price));
    }

    #[test]
    fn poor_buyer_rich_seller_no_trade() {
        let mut s = owner(0, 0, 90.0);
        let mut b = intruder(1, 0, 50.0);
        let outcome = negotiation().negotiate(&mut s, &mut b).unwrap();
        assert!(matches!(outcome, Outcome::NoTrade(NoTradeReason::BelowReservation { .. })));
        assert_eq!(outcome.settlement(), None);
    }

    #[test]
    fn transcript_records_rounds() {
        let mut s = owner(0, 0, 1.0);
        let mut b = intruder(1, 0, 100.0);
        let mut transcript = Transcript::new();
        assert_eq!(transcript.final_offers(), (SELLER_OPENING, BUYER_OPENING));
        let outcome = negotiation()
            .negotiate_observed(&mut s, &mut b, &mut transcript)
            .unwrap();
        assert_eq!(transcript.rounds.len(), 1);
        let first = transcript.rounds[0];
        assert_eq!(first.round, 1);
        assert_eq!(first.context, ContextBin(9));
        assert_eq!((first.seller_before, first.buyer_before), (1.0, 0.0));
        assert_eq!(transcript.final_offers(), (first.seller.offer, first.buyer.offer));
        assert_eq!(transcript.outcome, Some(outcome));
    }

    #[test]
    fn beliefs_accumulate_across_episodes() {
        let mut s = owner(0, 0, 1.0);
        let mut b = intruder(1, 0, 100.0);
        let n = negotiation();
        for _ in 0..30 {
            let outcome = n.negotiate(&mut s, &mut b).unwrap();
            let price = outcome.settlement().expect("every episode trades");
            assert!(price > 0.5 && price < 1.0);
        }
        let AnyNegotiator::Order0(seller) = &s.negotiator else {
            panic!("expected order-0 seller");
        };
        assert_eq!(seller.beliefs().observations(), 30);
    }
}

// ── Order-1 scenarios ─────────────────────────────────────────────────────────

#[cfg(test)]
mod order1_scenarios {
    use super::*;

    fn price(seller_order: u8, buyer_order: u8) -> Outcome {
        let mut s = owner(0, seller_order, 1.0);
        let mut b = intruder(1, buyer_order, 100.0);
        negotiation().negotiate(&mut s, &mut b).unwrap()
    }

    #[test]
    fn order1_buyer_pays_less_than_order0_buyer() {
        let baseline = price(0, 0).settlement().unwrap();
        let smart = price(0, 1).settlement().unwrap();
        assert!(smart < baseline, "order-1 buyer paid {smart}, order-0 paid {baseline}");
        assert!((smart - 1.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn order1_seller_earns_at_least_as_much() {
        let baseline = price(0, 0).settlement().unwrap();
        let smart = price(1, 0).settlement().unwrap();
        assert!(smart >= baseline);
    }

    #[test]
    fn two_order1_agents_converge() {
        let outcome = price(1, 1);
        let deal = outcome.agreement().expect("agreement");
        assert_eq!(deal.rounds, 6);
        assert!((deal.price - 6.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn context_is_rebinned_every_round() {
        let mut s = owner(0, 1, 1.0);
        let mut b = intruder(1, 1, 100.0);
        let mut transcript = Transcript::new();
        negotiation()
            .negotiate_observed(&mut s, &mut b, &mut transcript)
            .unwrap();
        let contexts: Vec<u16> = transcript.rounds.iter().map(|r| r.context.0).collect();
        assert_eq!(contexts, vec![9, 7, 5, 4, 2, 0]);
        for w in transcript.rounds.windows(2) {
            assert_eq!(
                (w[1].seller_before, w[1].buyer_before),
                (w[0].seller.offer, w[0].buyer.offer)
            );
        }
    }

    #[test]
    fn round_cap_cuts_slow_negotiations() {
        let cfg = BargainConfig { max_rounds: 3, ..config() };
        let mut s = owner(0, 1, 1.0);
        let mut b = intruder(1, 1, 100.0);
        let outcome = Negotiation::new(cfg).unwrap().negotiate(&mut s, &mut b).unwrap();
        assert_eq!(outcome, Outcome::NoTrade(NoTradeReason::RoundCap { rounds: 3 }));
    }
}

// ── Termination and errors ────────────────────────────────────────────────────

#[cfg(test)]
mod termination_tests {
    use super::*;

    #[test]
    fn overshooting_buyer_is_invalid_even_if_crossed() {
        let mut s = Trader::new(AgentId(0), Party::new(0.0, 1.0), Scripted::conceding(0.1));
        let mut b = Trader::new(AgentId(1), Party::intruder(100.0), Scripted::conceding(1.5));
        let outcome = negotiation().negotiate(&mut s, &mut b).unwrap();
        match outcome {
            Outcome::NoTrade(NoTradeReason::InvalidOffer { round, seller_offer, buyer_offer }) => {
                assert_eq!(round, 1);
                assert!((seller_offer - 0.9).abs() < 1e-12);
                assert_eq!(buyer_offer, 1.5);
            }
            other => panic!("expected invalid offer, got {other:?}"),
        }
    }

    #[test]
    fn seller_reaching_zero_is_invalid() {
        let mut s = Trader::new(AgentId(0), Party::new(0.0, 1.0), Scripted::conceding(1.0));
        let mut b = Trader::new(AgentId(1), Party::intruder(100.0), Scripted::conceding(0.0));
        let outcome = negotiation().negotiate(&mut s, &mut b).unwrap();
        assert!(matches!(
            outcome,
            Outcome::NoTrade(NoTradeReason::InvalidOffer { round: 1, .. })
        ));
    }

    #[test]
    fn stubborn_pair_hits_round_cap() {
        let cfg = BargainConfig { max_rounds: 5, ..config() };
        let mut s = Trader::new(AgentId(0), Party::new(0.0, 1.0), Scripted::conceding(0.0));
        let mut b = Trader::new(AgentId(1), Party::intruder(100.0), Scripted::conceding(0.0));
        let mut transcript = Transcript::new();
        let outcome = Negotiation::new(cfg)
            .unwrap()
            .negotiate_observed(&mut s, &mut b, &mut transcript)
            .unwrap();
        assert_eq!(outcome, Outcome::NoTrade(NoTradeReason::RoundCap { rounds: 5 }));
        assert_eq!(transcript.rounds.len(), 5);
    }

    #[test]
    fn agent_error_names_the_agent_and_releases_both() {
        let mut s = Trader::new(AgentId(0), Party::new(0.0, 1.0), Scripted::conceding(0.1));
        let mut b = Trader::new(AgentId(7), Party::intruder(100.0), Scripted::failing());
        let err = negotiation().negotiate(&mut s, &mut b).unwrap_err();
        assert_eq!(
            err,
            NegotiationError::Agent { agent: AgentId(7), source: AgentError::DirectionUnset }
        );
        assert_eq!(s.negotiator.direction(), None);
        assert_eq!(b.negotiator.direction(), None);
    }

    #[test]
    fn mixed_agent_types_negotiate() {
        let mut s = Trader::new(AgentId(0), Party::new(0.0, 1.0), Scripted::conceding(0.3));
        let mut b = intruder(1, 1, 100.0);
        let outcome = negotiation().negotiate(&mut s, &mut b).unwrap();
        assert!(outcome.is_agreement());
    }
}

// ── Settlement ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod settlement_tests {
    use super::*;

    #[test]
    fn apply_transfers_wealth_and_property() {
        let deal = Agreement { seller: AgentId(0), buyer: AgentId(1), price: 0.5, rounds: 1 };
        let mut seller = Party::new(5.0, 20.0);
        let mut buyer = Party::intruder(60.0);
        assert_eq!(deal.amount(&buyer), 30.0);
        let paid = deal.apply(&mut seller, &mut buyer);
        assert_eq!(paid, 30.0);
        assert_eq!(seller, Party::new(35.0, 0.0));
        assert_eq!(buyer, Party::new(30.0, 30.0));
        assert!(buyer.owns() && !seller.owns());
    }

    #[test]
    fn reason_display() {
        assert_eq!(
            NoTradeReason::RoundCap { rounds: 100 }.to_string(),
            "no agreement after 100 rounds"
        );
    }
}

#[cfg(test)]
mod acceptance_props {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn trade_iff_price_beats_reservation(
            reservation in 0.01f64..200.0,
            wealth      in 0.0f64..200.0,
        ) {
            let mut s = owner(0, 0, reservation);
            let mut b = intruder(1, 0, wealth);
            let outcome = negotiation().negotiate(&mut s, &mut b).unwrap();
            let price = 10.0 / 11.0;
            prop_assert_eq!(outcome.is_agreement(), price * wealth > reservation);
        }
    }
}

#[cfg(test)]
mod concession_props {
    use proptest::prelude::*;
    use tom_agent::Tom0;

    use super::*;

    /// Offer pairs and contexts standing at the start of every round of a
    /// few episodes for each pairing of orders.
    fn reachable_pairs() -> Vec<(f64, f64, ContextBin)> {
        let mut pairs = Vec::new();
        for (seller_order, buyer_order) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let mut s = owner(0, seller_order, 1.0);
            let mut b = intruder(1, buyer_order, 100.0);
            for _ in 0..3 {
                let mut transcript = Transcript::new();
                negotiation()
                    .negotiate_observed(&mut s, &mut b, &mut transcript)
                    .unwrap();
                pairs.extend(
                    transcript
                        .rounds
                        .iter()
                        .map(|r| (r.seller_before, r.buyer_before, r.context)),
                );
            }
        }
        pairs
    }

    proptest! {
        #[test]
        fn order0_concedes_one_grid_step_toward_the_opponent(
            obs    in prop::collection::vec((0u16..10, 0u16..10), 0..60),
            seller in any::<bool>(),
        ) {
            let direction = if seller { Direction::Seller } else { Direction::Buyer };
            let pairs = reachable_pairs();
            prop_assert!(pairs.len() > 12);
            for (seller_offer, buyer_offer, context) in pairs {
                prop_assert!(!crosses(seller_offer, buyer_offer));
                let mut agent = Tom0::new(&config(), AgentRng::new(SEED, AgentId(5))).unwrap();
                agent.set_direction(direction, &Party::default()).unwrap();
                for &(s, b) in &obs {
                    agent.learn(DeltaBin(s), DeltaBin(b), context).unwrap();
                }
                let own = direction.own_offer(seller_offer, buyer_offer);
                let action = agent.act(seller_offer, buyer_offer, context).unwrap();
                prop_assert!(action.delta.index() < 10);
                let step = direction.sign() * (own - action.offer);
                prop_assert!(step > 0.0 && step < 1.0);
                prop_assert!((step - agent.grid().step(action.delta)).abs() < 1e-12);
            }
        }
    }
}

//! duel — repeated owner/intruder negotiations between theory-of-mind agents.
//!
//! Pits every combination of order-0 and order-1 agents against each other
//! for a number of episodes.  The same two traders meet again and again so
//! their beliefs accumulate; the parties' wealth and property are reset
//! before each episode so every encounter starts from the same stakes.
//!
//! Usage: `duel [config.json]`.  Without a path the built-in defaults are
//! used.  Set `RUST_LOG=debug` to see every bargaining round.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tom_agent::AnyNegotiator;
use tom_core::{AgentId, AgentRng, BargainConfig, Party};
use tom_negotiate::{
    NegotiationObserver, Negotiation, NoTradeReason, Outcome, RoundRecord, Trader,
};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DuelConfig {
    bargain:         BargainConfig,
    episodes:        u32,
    seed:            u64,
    owner_wealth:    f64,
    owner_property:  f64,
    intruder_wealth: f64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            bargain:         BargainConfig::default(),
            episodes:        200,
            seed:            42,
            owner_wealth:    5.0,
            owner_property:  20.0,
            intruder_wealth: 60.0,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DuelConfig> {
    let Some(path) = path else {
        return Ok(DuelConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Counts rounds across every episode of one pairing.
#[derive(Default)]
struct RoundCounter {
    rounds: u64,
}

impl NegotiationObserver for RoundCounter {
    fn on_round(&mut self, _record: &RoundRecord) {
        self.rounds += 1;
    }
}

#[derive(Default)]
struct PairingStats {
    agreements:  u32,
    below:       u32,
    invalid:     u32,
    capped:      u32,
    price_sum:   f64,
    seller_gain: f64,
}

impl PairingStats {
    fn record(&mut self, outcome: &Outcome, seller: &Party, buyer: &Party) {
        match outcome {
            Outcome::Agreement(deal) => {
                let (mut s, mut b) = (*seller, *buyer);
                self.seller_gain += deal.apply(&mut s, &mut b) - seller.reservation_value();
                self.agreements += 1;
                self.price_sum += deal.price;
            }
            Outcome::NoTrade(NoTradeReason::BelowReservation { .. }) => self.below += 1,
            Outcome::NoTrade(NoTradeReason::InvalidOffer { .. })     => self.invalid += 1,
            Outcome::NoTrade(NoTradeReason::RoundCap { .. })         => self.capped += 1,
            Outcome::NoTrade(NoTradeReason::SameRole)                => {}
        }
    }

    fn agreement_rate(&self, episodes: u32) -> f64 {
        if episodes == 0 { 0.0 } else { self.agreements as f64 / episodes as f64 }
    }

    fn mean_price(&self) -> f64 {
        if self.agreements == 0 { 0.0 } else { self.price_sum / self.agreements as f64 }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref().map(Path::new))?;
    let negotiation = Negotiation::new(config.bargain.clone())?;

    println!("=== duel — theory-of-mind bargaining ===");
    println!(
        "Episodes: {}  |  Seed: {}  |  Deltas: {}  |  Contexts: {}",
        config.episodes, config.seed, config.bargain.n_deltas, config.bargain.n_contexts
    );
    println!(
        "Owner: wealth {:.1}, property {:.1}  |  Intruder: wealth {:.1}",
        config.owner_wealth, config.owner_property, config.intruder_wealth
    );
    println!();

    let owner_party = Party::new(config.owner_wealth, config.owner_property);
    let intruder_party = Party::intruder(config.intruder_wealth);

    println!(
        "{:<8} {:>7} {:>7} {:>7} {:>7} {:>7} {:>10} {:>12} {:>8}",
        "Pairing", "Rate", "Deals", "Below", "Invalid", "Capped", "MeanPrice", "SellerGain", "Rounds"
    );
    println!("{}", "-".repeat(82));

    for (seller_order, buyer_order) in [(0u8, 0u8), (1, 0), (0, 1), (1, 1)] {
        let mut owner = Trader::new(
            AgentId(0),
            owner_party,
            AnyNegotiator::of_order(seller_order, &config.bargain, AgentRng::new(config.seed, AgentId(0)))?,
        );
        let mut intruder = Trader::new(
            AgentId(1),
            intruder_party,
            AnyNegotiator::of_order(buyer_order, &config.bargain, AgentRng::new(config.seed, AgentId(1)))?,
        );

        let mut stats = PairingStats::default();
        let mut counter = RoundCounter::default();
        for _ in 0..config.episodes {
            owner.party = owner_party;
            intruder.party = intruder_party;
            let outcome = negotiation.negotiate_observed(&mut owner, &mut intruder, &mut counter)?;
            stats.record(&outcome, &owner.party, &intruder.party);
        }
        info!(seller_order, buyer_order, agreements = stats.agreements, "pairing finished");

        println!(
            "{:<8} {:>7.3} {:>7} {:>7} {:>7} {:>7} {:>10.4} {:>12.2} {:>8}",
            format!("{seller_order}v{buyer_order}"),
            stats.agreement_rate(config.episodes),
            stats.agreements,
            stats.below,
            stats.invalid,
            stats.capped,
            stats.mean_price(),
            stats.seller_gain,
            counter.rounds,
        );
    }

    Ok(())
}

//! Negotiation results.

use std::fmt;

use tom_core::{AgentId, Party};

/// How an episode ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Agreement(Agreement),
    NoTrade(NoTradeReason),
}

impl Outcome {
    /// The settlement fraction, or `None` when no trade happened.
    pub fn settlement(&self) -> Option<f64> {
        match self {
            Outcome::Agreement(a) => Some(a.price),
            Outcome::NoTrade(_)   => None,
        }
    }

    pub fn is_agreement(&self) -> bool {
        matches!(self, Outcome::Agreement(_))
    }

    /// The agreement, if the offers crossed and the seller accepted.
    pub fn agreement(&self) -> Option<&Agreement> {
        match self {
            Outcome::Agreement(a) => Some(a),
            Outcome::NoTrade(_)   => None,
        }
    }
}

/// A closed deal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agreement {
    pub seller: AgentId,
    pub buyer:  AgentId,
    /// The buyer's final offer: the fraction of its wealth it pays.
    pub price:  f64,
    /// Round in which the offers crossed (1-based).
    pub rounds: u32,
}

impl Agreement {
    /// Absolute amount the buyer pays.
    pub fn amount(&self, buyer: &Party) -> f64 {
        self.price * buyer.wealth
    }

    /// Transfer wealth and property between the two parties.
    ///
    /// The buyer pays `price × wealth`; the seller receives it and gives up
    /// its property, which the buyer now holds at the price paid.  Returns
    /// the amount transferred.
    pub fn apply(&self, seller: &mut Party, buyer: &mut Party) -> f64 {
        let amount = self.amount(buyer);
        seller.wealth += amount;
        seller.property = 0.0;
        buyer.wealth -= amount;
        buyer.property = amount;
        amount
    }
}

/// Why an episode ended without a trade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoTradeReason {
    /// Both parties resolved to the same role.
    SameRole,
    /// An offer left its valid range before the offers crossed.
    InvalidOffer {
        round:        u32,
        seller_offer: f64,
        buyer_offer:  f64,
    },
    /// The offers crossed but the buyer's price did not beat the seller's
    /// reservation value.
    BelowReservation { price: f64 },
    /// `max_rounds` elapsed without the offers crossing.
    RoundCap { rounds: u32 },
}

impl fmt::Display for NoTradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoTradeReason::SameRole => f.write_str("both parties hold the same role"),
            NoTradeReason::InvalidOffer { round, seller_offer, buyer_offer } => write!(
                f,
                "offer out of range in round {round} (seller {seller_offer:.4}, buyer {buyer_offer:.4})"
            ),
            NoTradeReason::BelowReservation { price } => {
                write!(f, "price {price:.4} below the seller's reservation value")
            }
            NoTradeReason::RoundCap { rounds } => write!(f, "no agreement after {rounds} rounds"),
        }
    }
}

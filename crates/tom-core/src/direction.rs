//! Negotiating role of an agent within one episode.

use std::fmt;

/// Which side of the table an agent sits on for the current episode.
///
/// The numeric form (`sign`) is +1 for the seller and -1 for the buyer.  Most
/// of the engine's arithmetic is written once in terms of the sign: an agent
/// concedes by moving its own offer by `-sign * delta`, so the seller's offer
/// falls and the buyer's rises.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Owner of the good; offers start at 1.0 and decrease.
    Seller,
    /// Intruder; offers start at 0.0 and increase.
    Buyer,
}

impl Direction {
    /// +1.0 for the seller, -1.0 for the buyer.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Seller => 1.0,
            Direction::Buyer  => -1.0,
        }
    }

    /// The role the opponent holds.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Seller => Direction::Buyer,
            Direction::Buyer  => Direction::Seller,
        }
    }

    /// Owners sell, everyone else buys.
    #[inline]
    pub fn from_ownership(owns: bool) -> Direction {
        if owns { Direction::Seller } else { Direction::Buyer }
    }

    /// Pick this role's own offer out of a `(seller, buyer)` pair.
    #[inline]
    pub fn own_offer(self, seller_offer: f64, buyer_offer: f64) -> f64 {
        match self {
            Direction::Seller => seller_offer,
            Direction::Buyer  => buyer_offer,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Seller => "seller",
            Direction::Buyer  => "buyer",
        };
        f.write_str(s)
    }
}

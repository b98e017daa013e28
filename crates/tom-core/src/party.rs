//! External state of a negotiating party.

/// What the surrounding simulation knows about one side of a trade.
///
/// The negotiation engine only reads a `Party`: the seller's `property`
/// is its reservation value and the buyer's `wealth` scales the settlement
/// fraction into an absolute price.  Writing the result of a trade back is
/// the caller's job (see `tom_negotiate::Agreement::apply`).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    /// Liquid wealth.
    pub wealth: f64,
    /// Stored value of the property held.  Zero means "owns nothing".
    pub property: f64,
}

impl Party {
    pub fn new(wealth: f64, property: f64) -> Self {
        Self { wealth, property }
    }

    /// A party with wealth but no property.  Always lands in the buyer role.
    pub fn intruder(wealth: f64) -> Self {
        Self { wealth, property: 0.0 }
    }

    /// `true` if this party holds the contested good.
    #[inline]
    pub fn owns(&self) -> bool {
        self.property > 0.0
    }

    /// The lowest absolute price this party accepts when selling.
    #[inline]
    pub fn reservation_value(&self) -> f64 {
        self.property
    }
}

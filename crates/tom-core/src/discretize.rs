//! Offer discretization: concession steps and context bins.

use crate::{ContextBin, ContextSignal, DeltaBin};

// ── DeltaGrid ─────────────────────────────────────────────────────────────────

/// The fixed, evenly spaced set of concession magnitudes an agent may apply.
///
/// For `n` steps the magnitudes are `1/(n+1), 2/(n+1), …, n/(n+1)`: strictly
/// inside `(0, 1)` and strictly increasing.  Built once per agent.
#[derive(Clone, Debug, PartialEq)]
pub struct DeltaGrid {
    steps: Vec<f64>,
}

impl DeltaGrid {
    pub fn new(n_deltas: usize) -> Self {
        let denom = (n_deltas + 1) as f64;
        let steps = (1..=n_deltas).map(|k| k as f64 / denom).collect();
        Self { steps }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Magnitude of one bin.
    ///
    /// # Panics
    /// Panics if `bin` is out of range.
    #[inline]
    pub fn step(&self, bin: DeltaBin) -> f64 {
        self.steps[bin.index()]
    }

    /// `offer + toward * d` for every step `d`, in bin order.
    ///
    /// `toward` is `-1.0` for an offer that falls as it concedes (seller) and
    /// `+1.0` for one that rises (buyer).
    pub fn shifted(&self, offer: f64, toward: f64) -> Vec<f64> {
        self.steps.iter().map(|d| offer + toward * d).collect()
    }

    /// Mirror a bin across the grid: `n - 1 - bin`.
    ///
    /// # Panics
    /// Panics in debug mode if `bin` is out of range.
    #[inline]
    pub fn reflect(&self, bin: DeltaBin) -> DeltaBin {
        DeltaBin((self.steps.len() - 1 - bin.index()) as u16)
    }
}

// ── ContextMapper ─────────────────────────────────────────────────────────────

/// Maps the current offer pair to a context bin.
///
///   bin = clamp(floor(signal(seller, buyer) * (n_contexts - 1)), 0, n_contexts - 1)
///
/// With the default gap signal the opening pair `(1.0, 0.0)` lands in the
/// top bin and a nearly closed gap lands in bin 0.  A NaN signal maps to 0.
#[derive(Clone, Copy, Debug)]
pub struct ContextMapper {
    n_contexts: usize,
    signal:     ContextSignal,
}

impl ContextMapper {
    pub fn new(n_contexts: usize, signal: ContextSignal) -> Self {
        Self { n_contexts, signal }
    }

    /// Discretize the current offer pair.
    pub fn bin(&self, seller_offer: f64, buyer_offer: f64) -> ContextBin {
        let top = self.n_contexts.saturating_sub(1) as f64;
        let scaled = (self.signal.eval(seller_offer, buyer_offer) * top).floor();
        if scaled.is_nan() {
            return ContextBin(0);
        }
        ContextBin(scaled.clamp(0.0, top) as u16)
    }
}

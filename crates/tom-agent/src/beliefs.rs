//! Zero-order beliefs: per-context concession counts.

use tom_core::{ContextBin, DeltaBin};

/// Categorical belief over the opponent's concession bin, one distribution
/// per context bin.
///
/// Counts start at 1.0 for every `(context, delta)` pair (add-one smoothing)
/// and are only ever incremented, so every probability stays strictly
/// positive.  The table is cumulative experience: it is created with its
/// agent and outlives every negotiation episode the agent takes part in.
///
/// Indexing with a context or delta outside the table panics; callers that
/// take bins from outside check them against [`n_contexts`][Self::n_contexts]
/// and [`n_deltas`][Self::n_deltas] first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beliefs0 {
    n_deltas:   usize,
    n_contexts: usize,
    /// Row-major `[context][delta]` observation counts.
    counts:     Vec<f64>,
}

impl Beliefs0 {
    pub fn new(n_deltas: usize, n_contexts: usize) -> Self {
        Self {
            n_deltas,
            n_contexts,
            counts: vec![1.0; n_deltas * n_contexts],
        }
    }

    #[inline]
    pub fn n_deltas(&self) -> usize {
        self.n_deltas
    }

    #[inline]
    pub fn n_contexts(&self) -> usize {
        self.n_contexts
    }

    /// Raw counts for one context.
    #[inline]
    pub fn counts(&self, context: ContextBin) -> &[f64] {
        let start = context.index() * self.n_deltas;
        &self.counts[start..start + self.n_deltas]
    }

    /// Normalized distribution over every delta bin in `context`.
    pub fn query(&self, context: ContextBin) -> Vec<f64> {
        let row = self.counts(context);
        let total: f64 = row.iter().sum();
        row.iter().map(|c| c / total).collect()
    }

    /// Probability of a single delta bin in `context`.
    ///
    /// Every bin is queryable, including bin 0.
    pub fn query_delta(&self, context: ContextBin, delta: DeltaBin) -> f64 {
        let row = self.counts(context);
        let total: f64 = row.iter().sum();
        row[delta.index()] / total
    }

    /// Record one observation of `delta` in `context`.
    pub fn observe(&mut self, context: ContextBin, delta: DeltaBin) {
        assert!(delta.index() < self.n_deltas, "{delta} out of range");
        self.counts[context.index() * self.n_deltas + delta.index()] += 1.0;
    }

    /// Observations recorded so far, excluding the smoothing prior.
    pub fn observations(&self) -> u64 {
        let prior = self.counts.len() as f64;
        (self.counts.iter().sum::<f64>() - prior).round() as u64
    }
}

//! Engine configuration.
//!
//! # Design
//!
//! Every scalar the engine needs arrives in one `BargainConfig` value at
//! construction time.  Nothing inside the engine reads process-wide state:
//! two agents built from different configs can coexist in the same process,
//! and a test can vary one knob without touching any other.

use crate::{ContextMapper, DeltaGrid, TomError, TomResult};

// ── ContextSignal ─────────────────────────────────────────────────────────────

/// Continuous "pressure" signal computed from the current offer pair before
/// it is discretized into a [`ContextBin`][crate::ContextBin].
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContextSignal {
    /// Remaining gap: `seller_offer - buyer_offer`.
    #[default]
    Gap,
    /// Application-supplied signal `(seller_offer, buyer_offer) -> f64`.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(f64, f64) -> f64),
}

impl ContextSignal {
    #[inline]
    pub fn eval(self, seller_offer: f64, buyer_offer: f64) -> f64 {
        match self {
            ContextSignal::Gap       => seller_offer - buyer_offer,
            ContextSignal::Custom(f) => f(seller_offer, buyer_offer),
        }
    }
}

// ── TieBreak ──────────────────────────────────────────────────────────────────

/// How an agent picks between concession steps of equal utility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreak {
    /// Smallest concession wins.  Fully deterministic.
    #[default]
    LowestIndex,
    /// Uniform among the maximal steps, drawn from the agent's own `AgentRng`.
    Random,
}

// ── BargainConfig ─────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Typically deserialized by the application (with the `serde` feature) and
/// handed to every agent and to the negotiation protocol.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BargainConfig {
    /// Number of candidate concession steps.  Default: 10.
    pub n_deltas: usize,

    /// Number of context bins beliefs are conditioned on.  Default: 10.
    pub n_contexts: usize,

    /// Hard cap on bargaining rounds per episode.  Reaching it ends the
    /// episode without a trade.  Default: 100.
    pub max_rounds: u32,

    /// Signal discretized into the context bin each round.
    pub context_signal: ContextSignal,

    /// Tie-breaking rule for equal-utility concession steps.
    pub tie_break: TieBreak,
}

impl Default for BargainConfig {
    fn default() -> Self {
        Self {
            n_deltas:       10,
            n_contexts:     10,
            max_rounds:     100,
            context_signal: ContextSignal::Gap,
            tie_break:      TieBreak::LowestIndex,
        }
    }
}

impl BargainConfig {
    /// Shorthand for a default config with custom bin counts.
    pub fn with_bins(n_deltas: usize, n_contexts: usize) -> Self {
        Self { n_deltas, n_contexts, ..Self::default() }
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> TomResult<()> {
        if self.n_deltas == 0 {
            return Err(TomError::Config("n_deltas must be at least 1".into()));
        }
        if self.n_contexts == 0 {
            return Err(TomError::Config("n_contexts must be at least 1".into()));
        }
        if self.n_deltas > u16::MAX as usize || self.n_contexts > u16::MAX as usize {
            return Err(TomError::Config(format!(
                "bin counts are limited to {} (got n_deltas={}, n_contexts={})",
                u16::MAX, self.n_deltas, self.n_contexts,
            )));
        }
        if self.max_rounds == 0 {
            return Err(TomError::Config("max_rounds must be at least 1".into()));
        }
        Ok(())
    }

    /// The concession-step grid for this config.
    pub fn delta_grid(&self) -> DeltaGrid {
        DeltaGrid::new(self.n_deltas)
    }

    /// The offer-pair → context-bin mapping for this config.
    pub fn context_mapper(&self) -> ContextMapper {
        ContextMapper::new(self.n_contexts, self.context_signal)
    }
}

//! Payoff ("value") matrices and their expected-utility reduction.
//!
//! # Layout
//!
//! A [`PayoffMatrix`] is always oriented from the acting agent's point of
//! view: rows are the agent's own candidate offers, columns the opponent's.
//! Internally the cell value is computed in the seller-major frame and the
//! buyer's matrix is its transpose, so both roles read "higher is better".
//!
//! A cell scores the buyer's candidate offer (signed by the perspective)
//! when that pair of offers crosses, i.e. the trade would close at the
//! buyer's price.  A pair where the seller still asks more than the buyer
//! bids is scored [`PENALTY`].
//!
//! Candidates are built as `offer ± k/(n+1)`, so two offers that are equal on
//! the grid can differ in the last few bits.  [`crosses`] absorbs that with
//! [`CROSS_TOLERANCE`]; the negotiation protocol uses the same test.

use crate::{Direction, TomError, TomResult};

/// Value assigned to every offer pair in which the seller candidate exceeds
/// the buyer candidate.
pub const PENALTY: f64 = -4.0;

/// Slack allowed when deciding whether two offers cross.  Must stay below
/// the smallest grid step, `1/(u16::MAX + 1)`.
pub const CROSS_TOLERANCE: f64 = 1e-9;

/// `true` if a seller asking `seller_offer` and a buyer bidding
/// `buyer_offer` have met: `seller_offer <= buyer_offer` up to
/// [`CROSS_TOLERANCE`].
#[inline]
pub fn crosses(seller_offer: f64, buyer_offer: f64) -> bool {
    seller_offer <= buyer_offer + CROSS_TOLERANCE
}

/// Dense row-major payoff matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct PayoffMatrix {
    rows:  usize,
    cols:  usize,
    cells: Vec<f64>,
}

impl PayoffMatrix {
    /// Build the matrix for every (seller candidate, buyer candidate) pair as
    /// seen by `perspective`.
    ///
    /// Seller perspective: `rows = seller.len()`, `cols = buyer.len()`.
    /// Buyer perspective: the transpose.
    pub fn compute(seller: &[f64], buyer: &[f64], perspective: Direction) -> Self {
        let sign = perspective.sign();
        let value = |s: f64, b: f64| if crosses(s, b) { sign * b } else { PENALTY };

        match perspective {
            Direction::Seller => {
                let cells = seller
                    .iter()
                    .flat_map(|&s| buyer.iter().map(move |&b| value(s, b)))
                    .collect();
                Self { rows: seller.len(), cols: buyer.len(), cells }
            }
            Direction::Buyer => {
                let cells = buyer
                    .iter()
                    .flat_map(|&b| seller.iter().map(move |&s| value(s, b)))
                    .collect();
                Self { rows: buyer.len(), cols: seller.len(), cells }
            }
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value of one cell.
    ///
    /// # Panics
    /// Panics if `row` or `col` is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(col < self.cols, "column {col} out of range ({})", self.cols);
        self.cells[row * self.cols + col]
    }

    /// One row (one own candidate against every opponent candidate).
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// `true` if the cell holds the crossing penalty.
    #[inline]
    pub fn is_penalty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == PENALTY
    }

    /// Collapse a matrix with a singleton dimension to a flat vector.
    ///
    /// An `n × 1` or `1 × n` matrix yields its `n` cells in order; anything
    /// else yields `None`.
    pub fn squeeze(&self) -> Option<&[f64]> {
        (self.rows == 1 || self.cols == 1).then_some(self.cells.as_slice())
    }

    /// Row-wise dot product with a distribution over the opponent's actions.
    ///
    /// Returns one expected value per own candidate.  `dist` must have
    /// exactly `cols()` entries.
    pub fn expected_utility(&self, dist: &[f64]) -> TomResult<Vec<f64>> {
        if dist.len() != self.cols {
            return Err(TomError::DimensionMismatch {
                expected: self.cols,
                got:      dist.len(),
            });
        }
        Ok((0..self.rows)
            .map(|r| self.row(r).iter().zip(dist).map(|(v, p)| v * p).sum())
            .collect())
    }
}

// ── argmax helpers ────────────────────────────────────────────────────────────

/// Index of the first maximal element, or `None` for an empty slice.
pub fn argmax_first(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Every index whose value equals the maximum, ascending.
pub fn argmax_all(values: &[f64]) -> Vec<usize> {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect()
}

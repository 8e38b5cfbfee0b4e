//! Weighted random choice over an ordered candidate list.
//!
//! Selection draws `r` uniformly in `[0, total)` and walks the candidates in order,
//! returning the first whose cumulative weight reaches `r`. Order matters: keep the
//! list stable for reproducible draws under a fixed seed.
//!
//! An empty list, or one whose weights sum to zero or overflow, cannot produce a
//! choice, so the selector refuses to be built from one. Callers hold a validated selector and
//! every draw succeeds.

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("no candidates to choose from")]
    Empty,
    #[error("candidate {index} has invalid weight {weight}")]
    InvalidWeight { index: usize, weight: f32 },
    #[error("candidate weights sum to zero")]
    ZeroTotalWeight,
    #[error("candidate weights overflow to {total}")]
    TotalOverflow { total: f32 },
}

#[derive(Debug, Clone)]
pub struct WeightedSelector<T> {
    candidates: Vec<(T, f32)>,
    total: f32,
}

impl<T> WeightedSelector<T> {
    pub fn new(candidates: Vec<(T, f32)>) -> Result<Self, SelectError> {
        if candidates.is_empty() {
            return Err(SelectError::Empty);
        }

        let mut total = 0.0;
        for (index, (_, weight)) in candidates.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(SelectError::InvalidWeight { index, weight: *weight });
            }
            total += weight;
        }

        if total <= 0.0 {
            return Err(SelectError::ZeroTotalWeight);
        }
        if !total.is_finite() {
            return Err(SelectError::TotalOverflow { total });
        }

        Ok(Self { candidates, total })
    }

    #[inline]
    pub fn total_weight(&self) -> f32 {
        self.total
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> impl Iterator<Item = (&T, f32)> {
        self.candidates.iter().map(|(item, w)| (item, *w))
    }

    /// Probability that `pick` returns the candidate at `index`.
    pub fn probability(&self, index: usize) -> Option<f32> {
        self.candidates.get(index).map(|(_, w)| w / self.total)
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let draw = rng.gen_range(0.0..self.total);
        self.pick_at(draw)
    }

    /// Resolve a draw in `[0, total)` to a candidate.
    ///
    /// Rounding can leave the accumulated sum a hair below a draw close to `total`;
    /// the last candidate with positive weight takes that remainder.
    pub fn pick_at(&self, draw: f32) -> &T {
        let mut cumulative = 0.0;
        for (item, weight) in &self.candidates {
            cumulative += weight;
            if *weight > 0.0 && cumulative >= draw {
                return item;
            }
        }

        self.candidates
            .iter()
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(item, _)| item)
            .unwrap_or(&self.candidates[0].0)
    }
}

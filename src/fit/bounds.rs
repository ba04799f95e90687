//! Parameter bounds and start-point perturbation.

use rand::Rng;

/// Box constraints on a parameter vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Bounds {
    pub fn new(lower: &[f64], upper: &[f64]) -> Self {
        Self {
            lower: lower.to_vec(),
            upper: upper.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// A pinned parameter has `lower == upper` and is never moved.
    pub fn is_pinned(&self, i: usize) -> bool {
        self.lower[i] == self.upper[i]
    }

    /// Indices of parameters the optimizers may move.
    pub fn free_indices(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| !self.is_pinned(i)).collect()
    }

    pub fn contains(&self, params: &[f64]) -> bool {
        params.len() == self.len()
            && params
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(p, (lo, hi))| p.is_finite() && lo <= p && p <= hi)
    }
}

/// Move each free parameter by a random factor in `[2^-fold, 2^fold]`, then pull it
/// inside `[1.01 lower, 0.99 upper]`. Pinned parameters are set to their bound.
pub fn perturb<R: Rng + ?Sized>(params: &[f64], bounds: &Bounds, fold: f64, rng: &mut R) -> Vec<f64> {
    params
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if bounds.is_pinned(i) {
                return bounds.lower[i];
            }
            let moved = p * 2f64.powf(fold * rng.gen_range(-1.0..1.0));
            moved.max(bounds.lower[i] * 1.01).min(bounds.upper[i] * 0.99)
        })
        .collect()
}

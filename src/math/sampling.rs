//! Binomial sampling of a continuous frequency density.

use nalgebra::DMatrix;
use statrs::function::gamma::ln_gamma;

/// `ln C(n, k)`.
fn ln_choose(n: usize, k: usize) -> f64 {
    ln_gamma(n as f64 + 1.0) - ln_gamma(k as f64 + 1.0) - ln_gamma((n - k) as f64 + 1.0)
}

/// Matrix `B[k, i] = C(n, k) x_i^k (1 - x_i)^(n - k)`: the probability that `n`
/// sampled chromosomes carry `k` derived alleles when the population frequency is
/// `x_i`.
pub fn binomial_weights(n: usize, xs: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(n + 1, xs.len(), |k, i| {
        let x = xs[i];
        if x <= 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        if x >= 1.0 {
            return if k == n { 1.0 } else { 0.0 };
        }
        let ln_p = ln_choose(n, k) + k as f64 * x.ln() + (n - k) as f64 * (1.0 - x).ln();
        ln_p.exp()
    })
}

/// Trapezoid-rule quadrature weights on a (possibly non-uniform) grid.
pub fn trapezoid_weights(xs: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut w = vec![0.0; n];
    for i in 0..n.saturating_sub(1) {
        let half = 0.5 * (xs[i + 1] - xs[i]);
        w[i] += half;
        w[i + 1] += half;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_columns_sum_to_one() {
        let xs = [0.0, 0.1, 0.5, 0.93, 1.0];
        let b = binomial_weights(7, &xs);
        for col in b.column_iter() {
            assert!((col.sum() - 1.0).abs() < 1e-12);
        }
        assert!((b[(1, 2)] - 7.0 * 0.5_f64.powi(7)).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_integrates_linear_function_exactly() {
        let xs = [0.0, 0.2, 0.5, 1.0];
        let w = trapezoid_weights(&xs);
        let integral: f64 = xs.iter().zip(&w).map(|(x, w)| x * w).sum();
        assert!((integral - 0.5).abs() < 1e-12);
    }
}

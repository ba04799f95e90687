//! Extrapolation of grid-dependent results to an infinitely fine grid.
//!
//! A result computed on grids with spacings `h_0 < h_1 < ...` is treated as a
//! polynomial in `h`; the Lagrange polynomial through the points is evaluated at
//! `h = 0`. Three grids give quadratic extrapolation, two linear, one is identity.

/// Lagrange weights `w_j` such that `f(0) ~ sum_j w_j f(h_j)`.
///
/// Returns `None` if two spacings coincide.
pub fn lagrange_weights_at_zero(hs: &[f64]) -> Option<Vec<f64>> {
    let mut weights = Vec::with_capacity(hs.len());
    for (j, &hj) in hs.iter().enumerate() {
        let mut w = 1.0;
        for (k, &hk) in hs.iter().enumerate() {
            if k == j {
                continue;
            }
            let denom = hj - hk;
            if denom == 0.0 {
                return None;
            }
            w *= (0.0 - hk) / denom;
        }
        weights.push(w);
    }
    Some(weights)
}

/// Extrapolate a set of strictly positive values in log space.
///
/// Falls back to linear-space extrapolation when any value is non-positive.
pub fn extrapolate_value(values: &[f64], weights: &[f64]) -> f64 {
    if values.iter().all(|v| *v > 0.0) {
        values
            .iter()
            .zip(weights)
            .map(|(v, w)| w * v.ln())
            .sum::<f64>()
            .exp()
    } else {
        values.iter().zip(weights).map(|(v, w)| w * v).sum()
    }
}

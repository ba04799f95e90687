//! Likelihood and scaling utilities.
//!
//! The predicted spectrum from a model is a shape: its overall scale (theta) is a
//! nuisance parameter with a closed-form maximum likelihood value. The multinomial
//! log-likelihood is the Poisson log-likelihood of the data under the model scaled
//! by that optimal theta.

use statrs::function::gamma::ln_gamma;

use crate::spectrum::Spectrum;

/// Align `model` with `data`: fold it if the data are folded.
fn aligned<'a>(model: &'a Spectrum, data: &Spectrum) -> std::borrow::Cow<'a, Spectrum> {
    if data.is_folded() && !model.is_folded() {
        std::borrow::Cow::Owned(model.fold())
    } else {
        std::borrow::Cow::Borrowed(model)
    }
}

/// Iterate `(model, data)` pairs over cells unmasked in both spectra.
fn unmasked_pairs<'a>(model: &'a Spectrum, data: &'a Spectrum) -> impl Iterator<Item = (f64, f64)> + 'a {
    model
        .data()
        .iter()
        .zip(model.mask().iter())
        .zip(data.data().iter().zip(data.mask().iter()))
        .filter(|((_, mm), (_, dm))| !**mm && !**dm)
        .map(|((m, _), (d, _))| (*m, *d))
}

/// Theta that maximizes the likelihood of `data` given the shape of `model`.
///
/// Returns `NaN` when the model has no unmasked mass (or the shapes differ).
pub fn optimal_theta(model: &Spectrum, data: &Spectrum) -> f64 {
    if model.data().shape() != data.data().shape() {
        return f64::NAN;
    }
    let model = aligned(model, data);
    let (sum_m, sum_d) = unmasked_pairs(&model, data).fold((0.0, 0.0), |(sm, sd), (m, d)| (sm + m, sd + d));
    if sum_m > 0.0 { sum_d / sum_m } else { f64::NAN }
}

/// Poisson log-likelihood of `data` given expected counts `model`.
///
/// A cell with a non-positive (or non-finite) expectation and a positive count makes
/// the likelihood `-inf`.
pub fn poisson_ll(model: &Spectrum, data: &Spectrum) -> f64 {
    if model.data().shape() != data.data().shape() {
        return f64::NEG_INFINITY;
    }
    let mut ll = 0.0;
    for (m, d) in unmasked_pairs(model, data) {
        if !(m.is_finite() && m > 0.0) {
            if d > 0.0 || !m.is_finite() {
                return f64::NEG_INFINITY;
            }
            continue;
        }
        ll += -m + d * m.ln() - ln_gamma(d + 1.0);
    }
    ll
}

/// Multinomial log-likelihood: Poisson likelihood at the optimal theta.
pub fn ll_multinom(model: &Spectrum, data: &Spectrum) -> f64 {
    let model = aligned(model, data);
    let theta = optimal_theta(&model, data);
    if !theta.is_finite() {
        return f64::NEG_INFINITY;
    }
    poisson_ll(&model.scaled(theta), data)
}

/// Akaike information criterion `2k - 2ll`.
pub fn aic(param_count: usize, log_likelihood: f64) -> f64 {
    2.0 * param_count as f64 - 2.0 * log_likelihood
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn shape() -> Spectrum {
        Spectrum::new(DMatrix::from_fn(5, 5, |i, j| 1.0 / (1.0 + i as f64 + j as f64)))
    }

    #[test]
    fn optimal_theta_matches_total_ratio() {
        let model = shape();
        let data = model.scaled(250.0);
        let theta = optimal_theta(&model, &data);
        assert!((theta - 250.0).abs() < 1e-9);
    }

    #[test]
    fn ll_multinom_is_maximal_at_the_generating_shape() {
        let model = shape();
        let data = model.scaled(1000.0);
        let ll_true = ll_multinom(&model, &data);

        let mut other = model.data().clone();
        other[(1, 0)] *= 1.3;
        let ll_other = ll_multinom(&Spectrum::new(other), &data);
        assert!(ll_true > ll_other);
    }

    #[test]
    fn masked_singletons_do_not_contribute() {
        let model = shape();
        let data_a = model.scaled(500.0).with_singletons_masked();

        let mut other = data_a.data().clone();
        other[(1, 0)] = 12345.0;
        other[(0, 1)] = 0.0;
        let data_b = Spectrum::from_parts(other, data_a.mask().clone(), false).unwrap();

        let ll_a = ll_multinom(&model, &data_a);
        let ll_b = ll_multinom(&model, &data_b);
        assert_eq!(ll_a, ll_b);

        // Without the mask the same perturbation changes the likelihood.
        let data_c = Spectrum::new(data_b.data().clone());
        assert_ne!(ll_multinom(&model, &model.scaled(500.0)), ll_multinom(&model, &data_c));
    }

    #[test]
    fn zero_expectation_with_counts_is_impossible() {
        let mut m = shape().data().clone();
        m[(2, 2)] = 0.0;
        let model = Spectrum::new(m);
        let data = shape().scaled(10.0);
        assert_eq!(poisson_ll(&model, &data), f64::NEG_INFINITY);
    }

    #[test]
    fn folded_data_folds_the_model() {
        let model = shape();
        let data = model.scaled(100.0).fold();
        let theta = optimal_theta(&model, &data);
        assert!((theta - 100.0).abs() < 1e-9);
        assert!(ll_multinom(&model, &data).is_finite());
    }

    #[test]
    fn aic_is_two_k_minus_two_ll() {
        assert_eq!(aic(3, -100.0), 206.0);
        assert_eq!(aic(5, -98.5), 207.0);
    }
}

//! Grid extrapolation of mixture spectra.

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::diffusion::{Demography, DiffusionEngine, EngineError, GridSchedule};
use crate::math::{extrapolate_value, lagrange_weights_at_zero};
use crate::spectrum::Spectrum;

/// Expected spectrum of `demography` extrapolated to an infinitely fine grid.
///
/// Every (component, grid size) pair is integrated independently and in parallel;
/// results are collected in schedule order so the output does not depend on thread
/// scheduling. Components with zero weight are skipped.
pub fn extrapolate<E: DiffusionEngine + ?Sized>(
    engine: &E,
    demography: &Demography,
    sample_sizes: (usize, usize),
    schedule: &GridSchedule,
) -> Result<Spectrum, EngineError> {
    let components: Vec<_> = demography.components().iter().filter(|c| c.weight != 0.0).collect();
    if components.is_empty() {
        return Err(EngineError::InvalidParameter {
            what: "mixture weight",
            value: demography.weight_sum(),
        });
    }
    for c in &components {
        if !(c.weight.is_finite() && c.weight > 0.0) {
            return Err(EngineError::InvalidParameter {
                what: "mixture weight",
                value: c.weight,
            });
        }
    }

    let grids = schedule.points();
    let jobs: Vec<(usize, usize)> = (0..grids.len())
        .flat_map(|g| (0..components.len()).map(move |c| (g, c)))
        .collect();

    let spectra = jobs
        .par_iter()
        .map(|&(g, c)| engine.spectrum(&components[c].history, sample_sizes, grids[g]))
        .collect::<Result<Vec<_>, _>>()?;

    let (rows, cols) = (sample_sizes.0 + 1, sample_sizes.1 + 1);
    let mixed: Vec<DMatrix<f64>> = spectra
        .chunks(components.len())
        .map(|per_grid| {
            per_grid
                .iter()
                .zip(&components)
                .fold(DMatrix::zeros(rows, cols), |acc, (fs, c)| acc + fs.data() * c.weight)
        })
        .collect();

    let spacings: Vec<f64> = grids.iter().map(|&pts| 1.0 / (pts - 1) as f64).collect();
    let weights = lagrange_weights_at_zero(&spacings)
        .ok_or_else(|| EngineError::InvalidGrid(format!("duplicate grid sizes in {grids:?}")))?;

    let mut values = vec![0.0; mixed.len()];
    let data = DMatrix::from_fn(rows, cols, |i, j| {
        for (v, m) in values.iter_mut().zip(&mixed) {
            *v = m[(i, j)];
        }
        extrapolate_value(&values, &weights)
    });

    if data.iter().any(|v| !v.is_finite()) {
        return Err(EngineError::NonFinite);
    }
    Ok(Spectrum::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diffusion::{Epoch, FiniteDifferenceEngine, History, SizeTrajectory};

    /// Engine whose spectrum is `(1 + 1/pts) * nu1` in every cell.
    struct Linear;

    impl DiffusionEngine for Linear {
        fn spectrum(&self, history: &History, (n1, n2): (usize, usize), pts: usize) -> Result<Spectrum, EngineError> {
            let nu = history.epochs()[0].nu1.size(0.0);
            let value = (1.0 + 1.0 / pts as f64) * nu;
            Ok(Spectrum::new(DMatrix::from_element(n1 + 1, n2 + 1, value)))
        }
    }

    fn history(nu1: f64) -> History {
        let c = SizeTrajectory::Constant(nu1);
        History::new(vec![Epoch::isolation(0.1, c, c)])
    }

    fn neutral_scaled_marginal(nu: f64, duration: f64, n: usize) -> Vec<f64> {
        let c = SizeTrajectory::Constant(nu);
        let demography = Demography::single(History::new(vec![Epoch::isolation(duration, c, c)]));
        let fs = extrapolate(
            &FiniteDifferenceEngine::default(),
            &demography,
            (n, n),
            &GridSchedule::default_for((n, n)),
        )
        .unwrap();
        fs.marginal_pop1()
            .iter()
            .enumerate()
            .take(n)
            .skip(1)
            .map(|(k, v)| k as f64 * v)
            .collect()
    }

    #[test]
    fn long_neutral_epochs_stay_at_equilibrium() {
        for duration in [1.0, 5.0, 10.0] {
            for (k, scaled) in neutral_scaled_marginal(1.0, duration, 10).into_iter().enumerate() {
                assert!((scaled - 1.0).abs() < 1e-2, "Ts={duration} k={}: k*S_k = {scaled}", k + 1);
            }
        }
    }

    #[test]
    fn size_change_converges_to_the_new_equilibrium() {
        for (k, scaled) in neutral_scaled_marginal(2.0, 30.0, 10).into_iter().enumerate() {
            assert!((scaled / 2.0 - 1.0).abs() < 2e-2, "k={}: k*S_k = {scaled}", k + 1);
        }
    }

    #[test]
    fn mixture_weights_combine_components() {
        let demography = Demography::mixture(vec![(0.25, history(4.0)), (0.75, history(1.0))]);
        let schedule = GridSchedule::new(vec![10]).unwrap();
        let fs = extrapolate(&Linear, &demography, (3, 3), &schedule).unwrap();
        let expected = (1.0 + 0.1) * (0.25 * 4.0 + 0.75);
        assert!((fs.get(1, 2) - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_components_are_skipped() {
        let demography = Demography::mixture(vec![(1.0, history(2.0)), (0.0, history(-1.0))]);
        let schedule = GridSchedule::new(vec![10, 20]).unwrap();
        assert!(extrapolate(&FiniteDifferenceEngine::new(5), &demography, (3, 3), &schedule).is_ok());
    }

    #[test]
    fn extrapolation_is_deterministic() {
        let demography = Demography::mixture(vec![(0.4, history(0.5)), (0.6, history(1.5))]);
        let schedule = GridSchedule::new(vec![12, 16, 20]).unwrap();
        let engine = FiniteDifferenceEngine::new(10);
        let a = extrapolate(&engine, &demography, (5, 5), &schedule).unwrap();
        let b = extrapolate(&engine, &demography, (5, 5), &schedule).unwrap();
        assert_eq!(a, b);
    }
}

//! The likelihood objective of one model against one observed spectrum.

use tracing::warn;

use crate::diffusion::{DiffusionEngine, GridSchedule};
use crate::models::{ModelError, ModelSpec};
use crate::spectrum::{Spectrum, ll_multinom, optimal_theta};

/// Binds a model to the data, grid schedule and engine it is evaluated with.
pub struct Objective<'a, E: DiffusionEngine + ?Sized> {
    spec: &'a ModelSpec,
    data: &'a Spectrum,
    schedule: &'a GridSchedule,
    engine: &'a E,
}

impl<'a, E: DiffusionEngine + ?Sized> Objective<'a, E> {
    pub fn new(spec: &'a ModelSpec, data: &'a Spectrum, schedule: &'a GridSchedule, engine: &'a E) -> Self {
        Self {
            spec,
            data,
            schedule,
            engine,
        }
    }

    pub fn spec(&self) -> &'a ModelSpec {
        self.spec
    }

    /// Expected spectrum shape at `params`, masked like the data.
    pub fn expected(&self, params: &[f64]) -> Result<Spectrum, ModelError> {
        let model = self
            .spec
            .expected_spectrum(params, self.data.sample_sizes(), self.schedule, self.engine)?;
        Ok(model)
    }

    /// Multinomial log-likelihood and optimal theta at `params`.
    ///
    /// A failed evaluation yields `(-inf, NaN)` so that it never wins a comparison.
    pub fn evaluate(&self, params: &[f64]) -> (f64, f64) {
        match self.expected(params) {
            Ok(model) => {
                let ll = ll_multinom(&model, self.data);
                let ll = if ll.is_nan() { f64::NEG_INFINITY } else { ll };
                (ll, optimal_theta(&model, self.data))
            }
            Err(err) => {
                warn!(model = self.spec.name, ?params, %err, "model evaluation failed");
                (f64::NEG_INFINITY, f64::NAN)
            }
        }
    }

    pub fn log_likelihood(&self, params: &[f64]) -> f64 {
        self.evaluate(params).0
    }

    /// Cost minimized by the optimizers: `-ll`.
    pub fn cost(&self, params: &[f64]) -> f64 {
        -self.log_likelihood(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diffusion::FiniteDifferenceEngine;
    use crate::models::Registry;

    #[test]
    fn likelihood_is_best_near_the_generating_parameters() {
        let engine = FiniteDifferenceEngine::new(20);
        let schedule = GridSchedule::new(vec![10, 12, 14]).unwrap();
        let si = Registry::builtin().get("SI").unwrap();
        let truth = [2.0, 0.5, 0.3];
        let data = si
            .expected_spectrum(&truth, (6, 6), &schedule, &engine)
            .unwrap()
            .scaled(5000.0);

        let objective = Objective::new(si, &data, &schedule, &engine);
        let (ll_truth, theta) = objective.evaluate(&truth);
        assert!((theta - 5000.0).abs() < 1e-6 * 5000.0);
        assert!(ll_truth > objective.log_likelihood(&[0.5, 2.0, 1.5]));
        assert_eq!(objective.cost(&truth), -ll_truth);
    }

    #[test]
    fn failed_evaluation_is_negative_infinity() {
        let engine = FiniteDifferenceEngine::new(4);
        let schedule = GridSchedule::new(vec![8, 10]).unwrap();
        let si = Registry::builtin().get("SI").unwrap();
        let data = Spectrum::new(nalgebra::DMatrix::from_element(5, 5, 1.0));
        let objective = Objective::new(si, &data, &schedule, &engine);
        let (ll, theta) = objective.evaluate(&[-1.0, 1.0, 1.0]);
        assert_eq!(ll, f64::NEG_INFINITY);
        assert!(theta.is_nan());
    }
}

//! Three-stage fitting of registered models.
//!
//! Each model goes through:
//!
//! - `anneal_hot`: simulated annealing from a perturbed copy of the defaults
//! - `anneal_cold`: a shorter, cooler anneal from the hot optimum
//! - `BFGS`: log-space quasi-Newton refinement from the cold optimum
//!
//! Every stage is reported through a callback as soon as it finishes, so a long
//! run leaves a usable log behind even if it is interrupted.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::diffusion::{DiffusionEngine, GridSchedule};
use crate::domain::{AnnealSettings, SearchSettings};
use crate::error::AppError;
use crate::fit::{Bounds, ModelComparisonTable, Objective, OptimizerOutcome, anneal, perturb, refine_log};
use crate::models::ModelSpec;
use crate::spectrum::{Spectrum, aic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StageKind {
    #[serde(rename = "anneal_hot")]
    AnnealHot,
    #[serde(rename = "anneal_cold")]
    AnnealCold,
    #[serde(rename = "BFGS")]
    Refine,
}

impl StageKind {
    pub const ALL: [StageKind; 3] = [StageKind::AnnealHot, StageKind::AnnealCold, StageKind::Refine];

    pub fn label(self) -> &'static str {
        match self {
            StageKind::AnnealHot => "anneal_hot",
            StageKind::AnnealCold => "anneal_cold",
            StageKind::Refine => "BFGS",
        }
    }
}

/// Record of one completed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOutcome {
    pub stage: StageKind,
    pub start: Vec<f64>,
    /// Annealing temperature (`None` for refinement).
    pub temperature: Option<f64>,
    pub learn_rate: Option<f64>,
    /// Temperature steps or BFGS iterations allowed.
    pub budget: usize,
    pub start_log_likelihood: f64,
    pub optimized: Vec<f64>,
    pub log_likelihood: f64,
    pub theta: f64,
    pub aic: f64,
    pub evaluations: usize,
}

/// All stages of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFit {
    pub model: String,
    pub param_names: Vec<String>,
    pub stages: Vec<StageOutcome>,
}

impl ModelFit {
    pub fn param_count(&self) -> usize {
        self.param_names.len()
    }

    pub fn final_stage(&self) -> Option<&StageOutcome> {
        self.stages.last()
    }

    pub fn log_likelihood(&self) -> f64 {
        self.final_stage().map_or(f64::NEG_INFINITY, |s| s.log_likelihood)
    }

    pub fn params(&self) -> &[f64] {
        self.final_stage().map_or(&[], |s| s.optimized.as_slice())
    }
}

fn scaled_budget(budget: usize, factor: f64) -> usize {
    ((budget as f64 * factor).round() as usize).max(1)
}

pub struct FitDriver<'a, E: DiffusionEngine + ?Sized> {
    engine: &'a E,
    schedule: &'a GridSchedule,
    settings: &'a SearchSettings,
}

impl<'a, E: DiffusionEngine + ?Sized> FitDriver<'a, E> {
    pub fn new(engine: &'a E, schedule: &'a GridSchedule, settings: &'a SearchSettings) -> Self {
        Self {
            engine,
            schedule,
            settings,
        }
    }

    fn cold_settings(&self) -> AnnealSettings {
        let hot = &self.settings.anneal;
        let f = &self.settings.factors;
        AnnealSettings {
            temperature: hot.temperature * f.cold_temp,
            learn_rate: hot.learn_rate * f.cold_learn,
            max_iter: scaled_budget(hot.max_iter, f.cold_iter),
            ..*hot
        }
    }

    fn finish_stage(
        objective: &Objective<'_, E>,
        stage: StageKind,
        start: Vec<f64>,
        start_log_likelihood: f64,
        anneal: Option<&AnnealSettings>,
        budget: usize,
        outcome: OptimizerOutcome,
    ) -> StageOutcome {
        let (log_likelihood, theta) = objective.evaluate(&outcome.params);
        StageOutcome {
            stage,
            start,
            temperature: anneal.map(|a| a.temperature),
            learn_rate: anneal.map(|a| a.learn_rate),
            budget,
            start_log_likelihood,
            aic: aic(objective.spec().param_count(), log_likelihood),
            optimized: outcome.params,
            log_likelihood,
            theta,
            evaluations: outcome.evaluations,
        }
    }

    /// Run the three stages for `spec`, calling `on_stage` after each.
    pub fn fit_model<R, F>(&self, spec: &ModelSpec, data: &Spectrum, rng: &mut R, on_stage: &mut F) -> Result<ModelFit, AppError>
    where
        R: Rng + ?Sized,
        F: FnMut(&ModelSpec, &StageOutcome) -> Result<(), AppError>,
    {
        let objective = Objective::new(spec, data, self.schedule, self.engine);
        let bounds = Bounds::new(spec.lower, spec.upper);
        let cost = |p: &[f64]| objective.cost(p);
        info!(model = spec.name, params = spec.param_count(), "fitting model");

        let mut stages = Vec::with_capacity(StageKind::ALL.len());
        let mut start = perturb(spec.defaults, &bounds, self.settings.perturb_fold, rng);

        for stage in StageKind::ALL {
            let start_ll = objective.log_likelihood(&start);
            let outcome = match stage {
                StageKind::AnnealHot => {
                    let hot = self.settings.anneal;
                    let out = anneal(cost, &start, &bounds, &hot, rng);
                    Self::finish_stage(&objective, stage, start, start_ll, Some(&hot), hot.max_iter, out)
                }
                StageKind::AnnealCold => {
                    let cold = self.cold_settings();
                    let out = anneal(cost, &start, &bounds, &cold, rng);
                    Self::finish_stage(&objective, stage, start, start_ll, Some(&cold), cold.max_iter, out)
                }
                StageKind::Refine => {
                    let budget = scaled_budget(self.settings.anneal.max_iter, self.settings.factors.refine_iter);
                    let out = refine_log(cost, &start, &bounds, &self.settings.refine, budget);
                    Self::finish_stage(&objective, stage, start, start_ll, None, budget, out)
                }
            };

            info!(
                model = spec.name,
                stage = stage.label(),
                ll = outcome.log_likelihood,
                aic = outcome.aic,
                evaluations = outcome.evaluations,
                "stage finished"
            );
            on_stage(spec, &outcome)?;
            start = outcome.optimized.clone();
            stages.push(outcome);
        }

        Ok(ModelFit {
            model: spec.name.to_string(),
            param_names: spec.param_names.iter().map(|s| s.to_string()).collect(),
            stages,
        })
    }

    /// Fit `specs` in order and collect their final likelihoods for comparison.
    pub fn fit_models<R, F>(
        &self,
        specs: &[&ModelSpec],
        data: &Spectrum,
        rng: &mut R,
        on_stage: &mut F,
    ) -> Result<(Vec<ModelFit>, ModelComparisonTable), AppError>
    where
        R: Rng + ?Sized,
        F: FnMut(&ModelSpec, &StageOutcome) -> Result<(), AppError>,
    {
        let mut fits = Vec::with_capacity(specs.len());
        let mut table = ModelComparisonTable::new();
        for spec in specs {
            let fit = self.fit_model(spec, data, rng, on_stage)?;
            table.record(fit.model.clone(), fit.log_likelihood(), fit.param_count());
            fits.push(fit);
        }
        Ok((fits, table))
    }
}

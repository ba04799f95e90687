//! Shared configuration types.
//!
//! These types are intentionally plain and serializable so they can be:
//!
//! - built from CLI flags (see `app::fit_config_from_args`)
//! - passed through the pipeline without touching clap types
//! - echoed into the report preamble and JSON exports

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Models fitted when `--models` is not given.
pub const DEFAULT_MODELS: &[&str] = &[
    "SI", "EM", "IM", "AM", "PAM", "SC", "PSC", "EM2M", "IM2M", "AM2M", "SC2M", "EM2M2P", "IM2M2P", "AM2M2P", "PAM2M2P",
    "SC2M2P", "PSC2M2P",
];

/// Default base name of the output directory.
pub const DEFAULT_OUTPUT_NAME: &str = "mis_fs_2d_optlog";

/// Temperature schedule of simulated annealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CoolingSchedule {
    /// `T_k = T0 / (1 + k)`, Cauchy-distributed proposals.
    Cauchy,
    /// `T_k = T0 exp(-k / e)`, proposals scaled to the parameter range.
    Fast,
    /// `T_k = T0 / ln(k + 2)`, Gaussian proposals.
    Boltzmann,
}

impl CoolingSchedule {
    pub fn as_str(self) -> &'static str {
        match self {
            CoolingSchedule::Cauchy => "cauchy",
            CoolingSchedule::Fast => "fast",
            CoolingSchedule::Boltzmann => "boltzmann",
        }
    }
}

/// Settings of the hot annealing stage. The cold stage derives its own from these
/// through [`StageFactors`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealSettings {
    /// Initial temperature `T0`.
    pub temperature: f64,
    /// Stop once the temperature falls to this value (ignored when `0`).
    pub final_temperature: f64,
    pub learn_rate: f64,
    pub schedule: CoolingSchedule,
    /// Number of temperature steps.
    pub max_iter: usize,
    /// Proposals evaluated at each temperature.
    pub dwell: usize,
}

impl Default for AnnealSettings {
    fn default() -> Self {
        Self {
            temperature: 50.0,
            final_temperature: 0.0,
            learn_rate: 0.005,
            schedule: CoolingSchedule::Cauchy,
            max_iter: 20,
            dwell: 50,
        }
    }
}

/// Multipliers deriving the cold-anneal and refinement settings from the hot ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageFactors {
    pub cold_iter: f64,
    pub cold_temp: f64,
    pub cold_learn: f64,
    pub refine_iter: f64,
}

impl Default for StageFactors {
    fn default() -> Self {
        Self {
            cold_iter: 0.5,
            cold_temp: 0.5,
            cold_learn: 2.0,
            refine_iter: 0.5,
        }
    }
}

/// Settings of the log-space L-BFGS refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefineSettings {
    /// Stop when every gradient component is below this value.
    pub gtol: f64,
    /// Number of correction pairs L-BFGS keeps.
    pub lbfgs_memory: usize,
}

impl Default for RefineSettings {
    fn default() -> Self {
        Self {
            gtol: 1e-5,
            lbfgs_memory: 7,
        }
    }
}

/// Everything the fit driver needs besides the data and the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub anneal: AnnealSettings,
    pub factors: StageFactors,
    pub refine: RefineSettings,
    /// Perturbation of the hot-stage start: each value moves by up to `2^fold`.
    pub perturb_fold: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            anneal: AnnealSettings::default(),
            factors: StageFactors::default(),
            refine: RefineSettings::default(),
            perturb_fold: 1.0,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub fs_path: PathBuf,
    pub pop_ids: (String, String),
    pub models: Vec<String>,
    /// Comma-separated grid sizes, or `None` for the sample-size default.
    pub grid_points: Option<String>,
    pub mask_singletons: bool,

    pub outdir: PathBuf,
    pub output_name: String,
    pub log_params: bool,
    pub export_json: Option<PathBuf>,

    pub search: SearchSettings,
    pub steps_per_epoch: usize,
    pub seed: u64,
    pub verbose: bool,
}

impl FitConfig {
    /// Label written to the report preamble.
    pub fn data_state(&self) -> &'static str {
        if self.mask_singletons { "masked" } else { "not_masked" }
    }
}

//! The fitting workflow behind `afs-fit fit`.
//!
//! load spectrum -> mask -> resolve models and grid -> fit each model stage by
//! stage (logging every stage as it completes) -> compare -> export
//!
//! The CLI front-end only prints what this returns.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::diffusion::{DiffusionEngine, FiniteDifferenceEngine, GridSchedule};
use crate::domain::{FitConfig, SearchSettings};
use crate::error::AppError;
use crate::fit::{FitDriver, ModelComparisonTable, ModelFit, StageOutcome};
use crate::io::{ReportSink, read_spectrum, write_comparison_json};
use crate::models::catalog::NESTED_PAIRS;
use crate::models::{ModelSpec, Registry};
use crate::report::{format_comparison, format_lrt, format_preamble, format_stage_block};
use crate::spectrum::Spectrum;

/// All outputs of a single `afs-fit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub log_path: PathBuf,
    pub fits: Vec<ModelFit>,
    pub table: ModelComparisonTable,
}

/// Reject optimizer settings that would make a stage meaningless.
pub fn validate_search(search: &SearchSettings) -> Result<(), AppError> {
    let a = &search.anneal;
    let f = &search.factors;
    let positive = [
        ("temperature", a.temperature),
        ("learn rate", a.learn_rate),
        ("cold iteration factor", f.cold_iter),
        ("cold temperature factor", f.cold_temp),
        ("cold learn-rate factor", f.cold_learn),
        ("refine iteration factor", f.refine_iter),
        ("gtol", search.refine.gtol),
        ("perturbation fold", search.perturb_fold),
    ];
    for (name, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(AppError::new(2, format!("Invalid {name}: {value} (must be positive).")));
        }
    }
    if !(a.final_temperature.is_finite() && a.final_temperature >= 0.0) {
        return Err(AppError::new(2, format!("Invalid final temperature: {}", a.final_temperature)));
    }
    if a.max_iter == 0 || a.dwell == 0 {
        return Err(AppError::new(2, "Iteration budget and dwell must be at least 1."));
    }
    if search.refine.lbfgs_memory == 0 {
        return Err(AppError::new(2, "L-BFGS memory must be at least 1."));
    }
    Ok(())
}

/// Look up every requested model, in request order.
pub fn resolve_models<'a>(registry: &Registry<'a>, names: &[String]) -> Result<Vec<&'a ModelSpec>, AppError> {
    if names.is_empty() {
        return Err(AppError::new(2, "No models requested."));
    }
    names
        .iter()
        .map(|name| registry.get(name.trim()).map_err(AppError::from))
        .collect()
}

/// Observed spectrum with the requested labels and masking applied.
pub fn load_data(config: &FitConfig) -> Result<Spectrum, AppError> {
    let data = read_spectrum(&config.fs_path)?.with_pop_ids(&config.pop_ids.0, &config.pop_ids.1);
    Ok(if config.mask_singletons { data.with_singletons_masked() } else { data })
}

pub fn grid_schedule(grid_points: Option<&str>, sample_sizes: (usize, usize)) -> Result<GridSchedule, AppError> {
    match grid_points {
        Some(text) => GridSchedule::parse(text).map_err(|e| AppError::new(2, format!("Invalid grid points '{text}': {e}"))),
        None => Ok(GridSchedule::default_for(sample_sizes)),
    }
}

/// Execute the full workflow with the finite-difference engine.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let engine = FiniteDifferenceEngine::new(config.steps_per_epoch);
    run_fit_with_engine(config, &engine)
}

/// Execute the full workflow with any engine.
pub fn run_fit_with_engine<E: DiffusionEngine + ?Sized>(config: &FitConfig, engine: &E) -> Result<RunOutput, AppError> {
    let registry = Registry::builtin();
    registry.validate()?;

    let data = load_data(config)?;
    let specs = resolve_models(&registry, &config.models)?;
    validate_search(&config.search)?;
    let schedule = grid_schedule(config.grid_points.as_deref(), data.sample_sizes())?;

    let mut sink = ReportSink::create(&config.outdir, &config.output_name, config.mask_singletons)?;
    if config.log_params {
        sink.append(&format_preamble(config, &schedule))?;
    }
    info!(
        models = specs.len(),
        grid = ?schedule.points(),
        masked = config.mask_singletons,
        log = %sink.path().display(),
        "starting fit"
    );

    let driver = FitDriver::new(engine, &schedule, &config.search);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (fits, table) = driver.fit_models(&specs, &data, &mut rng, &mut |spec: &ModelSpec, stage: &StageOutcome| {
        sink.append(&format_stage_block(spec.name, stage))
    })?;
    sink.append(&format_comparison(&table))?;
    let nested = table.nested_tests(NESTED_PAIRS);
    sink.append(&format_lrt(&nested))?;

    if let Some(path) = &config.export_json {
        let pop_ids = (config.pop_ids.0.as_str(), config.pop_ids.1.as_str());
        write_comparison_json(path, pop_ids, &fits, &table, &nested)?;
    }
    if let Some(best) = table.best() {
        info!(model = %best.model, aic = best.aic(), "best model");
    }

    Ok(RunOutput {
        log_path: sink.path().to_path_buf(),
        fits,
        table,
    })
}

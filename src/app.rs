//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initialises logging
//! - runs the fit pipeline, lists models, or evaluates one model
//! - prints the comparison summary

use clap::Parser;
use clap::error::ErrorKind;
use tracing::Level;

use crate::cli::{Cli, Command, ExpectedArgs, FitArgs};
use crate::diffusion::FiniteDifferenceEngine;
use crate::domain::{
    AnnealSettings, DEFAULT_MODELS, FitConfig, RefineSettings, SearchSettings, StageFactors,
};
use crate::error::AppError;
use crate::models::Registry;

pub mod pipeline;

/// Entry point for the `afs-fit` binary.
pub fn run() -> Result<(), AppError> {
    run_from(std::env::args().collect())
}

/// Run with an explicit argv (first element is the program name).
pub fn run_from(argv: Vec<String>) -> Result<(), AppError> {
    // `afs-fit -f data.fs` behaves like `afs-fit fit -f data.fs`.
    let argv = rewrite_args(argv);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            ErrorKind::MissingRequiredArgument => return Err(AppError::new(1, err.to_string())),
            _ => return Err(AppError::new(2, err.to_string())),
        },
    };

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Models => handle_models(),
        Command::Expected(args) => handle_expected(args),
    }
}

/// Install the global fmt subscriber. Later calls (tests) are ignored.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    init_logging(config.verbose);
    let run = pipeline::run_fit(&config)?;

    println!("{}", crate::report::format_comparison(&run.table));
    println!("Log written to {}", run.log_path.display());
    Ok(())
}

fn handle_models() -> Result<(), AppError> {
    init_logging(false);
    let registry = Registry::builtin();
    registry.validate()?;
    print!("{}", crate::report::format_model_list(&registry));
    Ok(())
}

fn handle_expected(args: ExpectedArgs) -> Result<(), AppError> {
    init_logging(false);
    let [n1, n2] = args.sample_sizes[..] else {
        return Err(AppError::new(2, "Expected two sample sizes, e.g. `-n 10,12`."));
    };
    if n1 < 1 || n2 < 1 {
        return Err(AppError::new(2, "Sample sizes must be at least 1."));
    }
    if !(args.theta.is_finite() && args.theta > 0.0) {
        return Err(AppError::new(2, format!("Invalid theta: {}", args.theta)));
    }

    let spec = Registry::builtin().get(&args.model)?;
    if args.params.len() != spec.param_count() {
        return Err(AppError::new(
            2,
            format!(
                "{} takes {} parameters ({}), got {}.",
                spec.name,
                spec.param_count(),
                spec.param_names.join(", "),
                args.params.len()
            ),
        ));
    }

    let schedule = pipeline::grid_schedule(args.grid_points.as_deref(), (n1, n2))?;
    let engine = FiniteDifferenceEngine::new(args.steps_per_epoch);
    let fs = spec
        .expected_spectrum(&args.params, (n1, n2), &schedule, &engine)?
        .scaled(args.theta);

    match &args.output {
        Some(path) => crate::io::write_spectrum(path, &fs)?,
        None => print!("{}", crate::io::format_spectrum(&fs)),
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    let models = match &args.models {
        Some(models) => models.clone(),
        None => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
    };

    FitConfig {
        fs_path: args.fs_file.clone(),
        pop_ids: (args.pop1.clone(), args.pop2.clone()),
        models,
        grid_points: args.grid_points.clone(),
        mask_singletons: args.mask_singletons,

        outdir: args.outdir.clone(),
        output_name: args.output_name.clone(),
        log_params: args.log_params,
        export_json: args.export_json.clone(),

        search: SearchSettings {
            anneal: AnnealSettings {
                temperature: args.temperature,
                final_temperature: args.final_temperature,
                learn_rate: args.learn_rate,
                schedule: args.schedule,
                max_iter: args.max_iter,
                dwell: args.dwell,
            },
            factors: StageFactors {
                cold_iter: args.cold_iter_factor,
                cold_temp: args.cold_temp_factor,
                cold_learn: args.cold_learn_factor,
                refine_iter: args.refine_iter_factor,
            },
            refine: RefineSettings {
                gtol: args.gtol,
                ..RefineSettings::default()
            },
            perturb_fold: 1.0,
        },
        steps_per_epoch: args.steps_per_epoch,
        seed: args.seed,
        verbose: args.verbose,
    }
}

/// Rewrite argv so `afs-fit` defaults to `afs-fit fit`.
///
/// Rules:
/// - `afs-fit`                        -> `afs-fit fit`
/// - `afs-fit -f data.fs ...`         -> `afs-fit fit -f data.fs ...`
/// - `afs-fit --help/--version/-h/-V` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    let is_subcommand = matches!(arg1.as_str(), "fit" | "models" | "expected");
    if !is_top_level_help_or_version && !is_subcommand && arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("afs-fit").chain(args.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn flags_default_to_the_fit_subcommand() {
        assert_eq!(rewrite_args(argv(&[])), argv(&["fit"]));
        assert_eq!(rewrite_args(argv(&["-f", "x.fs"])), argv(&["fit", "-f", "x.fs"]));
        assert_eq!(rewrite_args(argv(&["--help"])), argv(&["--help"]));
        assert_eq!(rewrite_args(argv(&["models"])), argv(&["models"]));
    }

    #[test]
    fn missing_spectrum_is_exit_code_one() {
        assert_eq!(run_from(argv(&[])).unwrap_err().exit_code(), 1);
        assert_eq!(run_from(argv(&["-z", "-m", "SI"])).unwrap_err().exit_code(), 1);
    }

    #[test]
    fn malformed_options_are_exit_code_two() {
        assert_eq!(run_from(argv(&["-f", "x.fs", "--bogus"])).unwrap_err().exit_code(), 2);
        assert_eq!(run_from(argv(&["-f", "x.fs", "--seed", "abc"])).unwrap_err().exit_code(), 2);
        assert_eq!(run_from(argv(&["-f", "x.fs", "--schedule", "linear"])).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn help_and_version_succeed() {
        assert!(run_from(argv(&["--help"])).is_ok());
        assert!(run_from(argv(&["--version"])).is_ok());
    }

    #[test]
    fn config_carries_defaults() {
        let cli = Cli::try_parse_from(argv(&["fit", "-f", "x.fs"])).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args);
        assert_eq!(config.models.len(), 17);
        assert_eq!(config.search, SearchSettings::default());
        assert_eq!(config.data_state(), "not_masked");
        assert_eq!(config.pop_ids, ("Pop1".to_string(), "Pop2".to_string()));
    }

    #[test]
    fn expected_writes_a_spectrum_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("si.fs");
        let path_arg = path.to_string_lossy().to_string();
        run_from(argv(&[
            "expected", "-m", "SI", "--params", "2,0.5,0.3", "-n", "4,4", "-p", "8,10,12", "--steps-per-epoch", "10",
            "--theta", "100", "-o", &path_arg,
        ]))
        .unwrap();
        let fs = crate::io::read_spectrum(&path).unwrap();
        assert_eq!(fs.sample_sizes(), (4, 4));
        assert!(fs.unmasked_sum() > 0.0);
    }

    #[test]
    fn expected_rejects_wrong_arity() {
        let err = run_from(argv(&["expected", "-m", "SI", "--params", "2,0.5", "-n", "4,4"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

//! Command-line parsing for the two-population spectrum fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting code: everything here is converted into a plain
//! [`FitConfig`](crate::domain::FitConfig) before any work starts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{CoolingSchedule, DEFAULT_OUTPUT_NAME};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "afs-fit",
    version,
    about = "Fit two-population demographic models to a joint allele-frequency spectrum"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit models to a spectrum and compare them by AIC (the default).
    Fit(FitArgs),
    /// List the registered models with their parameters and bounds.
    Models,
    /// Evaluate one model at given parameters and write its expected spectrum.
    Expected(ExpectedArgs),
}

/// Options of `afs-fit fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Observed spectrum in `.fs` format.
    #[arg(short = 'f', long = "fs-file", value_name = "FS")]
    pub fs_file: PathBuf,

    /// Label of the first population (first axis of the spectrum).
    #[arg(short = 'y', long, default_value = "Pop1")]
    pub pop1: String,

    /// Label of the second population (second axis of the spectrum).
    #[arg(short = 'x', long, default_value = "Pop2")]
    pub pop2: String,

    /// Base name of the output directory and log.
    #[arg(short = 'o', long = "output-name", default_value = DEFAULT_OUTPUT_NAME)]
    pub output_name: String,

    /// Directory in which the timestamped run directory is created.
    #[arg(long, default_value = ".")]
    pub outdir: PathBuf,

    /// Comma-separated grid sizes used for extrapolation, e.g. `40,50,60`.
    ///
    /// Defaults to `n+10, n+20, n+30` for the larger sample size `n`.
    #[arg(short = 'p', long = "grid-points", value_name = "A,B,C")]
    pub grid_points: Option<String>,

    /// Comma-separated models to fit (default: the 17-model standard set).
    #[arg(short = 'm', long, value_delimiter = ',', value_name = "MODELS")]
    pub models: Option<Vec<String>>,

    /// Mask the singleton cells `[1,0]` and `[0,1]`.
    #[arg(short = 'z', long = "mask-singletons")]
    pub mask_singletons: bool,

    /// Write a preamble with the run settings at the top of the log.
    #[arg(short = 'l', long = "log-params")]
    pub log_params: bool,

    /// Debug-level logging (every temperature step and BFGS iteration).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Seed of the random number generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Temperature steps of the hot anneal (other stages scale from it).
    #[arg(long, default_value_t = 20)]
    pub max_iter: usize,

    /// Proposals evaluated at each temperature.
    #[arg(long, default_value_t = 50)]
    pub dwell: usize,

    /// Initial annealing temperature.
    #[arg(long, default_value_t = 50.0)]
    pub temperature: f64,

    /// Stop annealing once the temperature drops to this value (0 disables).
    #[arg(long, default_value_t = 0.0)]
    pub final_temperature: f64,

    /// Annealing step scale.
    #[arg(long, default_value_t = 0.005)]
    pub learn_rate: f64,

    /// Annealing temperature schedule.
    #[arg(long, value_enum, default_value_t = CoolingSchedule::Cauchy)]
    pub schedule: CoolingSchedule,

    /// Multiplier of the hot budget for the cold anneal.
    #[arg(long, default_value_t = 0.5)]
    pub cold_iter_factor: f64,

    /// Multiplier of the hot temperature for the cold anneal.
    #[arg(long, default_value_t = 0.5)]
    pub cold_temp_factor: f64,

    /// Multiplier of the hot learn rate for the cold anneal.
    #[arg(long, default_value_t = 2.0)]
    pub cold_learn_factor: f64,

    /// Multiplier of the hot budget for BFGS iterations.
    #[arg(long, default_value_t = 0.5)]
    pub refine_iter_factor: f64,

    /// BFGS gradient tolerance.
    #[arg(long, default_value_t = 1e-5)]
    pub gtol: f64,

    /// Implicit time steps per epoch of the diffusion solver.
    #[arg(long, default_value_t = 100)]
    pub steps_per_epoch: usize,

    /// Also write the comparison table and stage history to this JSON file.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options of `afs-fit expected`.
#[derive(Debug, Parser, Clone)]
pub struct ExpectedArgs {
    /// Registered model name.
    #[arg(short = 'm', long)]
    pub model: String,

    /// Comma-separated parameter values in the model's order.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub params: Vec<f64>,

    /// Haploid sample sizes `n1,n2`.
    #[arg(short = 'n', long = "sample-sizes", value_delimiter = ',', required = true)]
    pub sample_sizes: Vec<usize>,

    /// Comma-separated grid sizes (default `n+10, n+20, n+30`).
    #[arg(short = 'p', long = "grid-points")]
    pub grid_points: Option<String>,

    /// Scale the spectrum to this theta.
    #[arg(long, default_value_t = 1.0)]
    pub theta: f64,

    /// Implicit time steps per epoch of the diffusion solver.
    #[arg(long, default_value_t = 100)]
    pub steps_per_epoch: usize,

    /// Output `.fs` file (stdout when omitted).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_flags_parse() {
        let cli = Cli::try_parse_from([
            "afs-fit", "fit", "-f", "data.fs", "-m", "SI,IM", "-z", "-p", "20,30,40", "--schedule", "boltzmann",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.models, Some(vec!["SI".to_string(), "IM".to_string()]));
        assert!(args.mask_singletons);
        assert_eq!(args.grid_points.as_deref(), Some("20,30,40"));
        assert_eq!(args.schedule, CoolingSchedule::Boltzmann);
        assert_eq!(args.output_name, DEFAULT_OUTPUT_NAME);
        assert_eq!(args.pop1, "Pop1");
    }

    #[test]
    fn expected_flags_parse() {
        let cli = Cli::try_parse_from(["afs-fit", "expected", "-m", "SI", "--params", "2,0.5,0.3", "-n", "10,12"]).unwrap();
        let Command::Expected(args) = cli.command else {
            panic!("expected expected");
        };
        assert_eq!(args.params, vec![2.0, 0.5, 0.3]);
        assert_eq!(args.sample_sizes, vec![10, 12]);
    }
}

//! Text blocks appended to the run log.
//!
//! The layout is line oriented so downstream scripts can grep for
//! `Optimized log-likelihood:` or `AIC:` without parsing the whole file.

use crate::diffusion::GridSchedule;
use crate::domain::FitConfig;
use crate::fit::{LrtResult, ModelComparisonTable, StageOutcome};
use crate::models::Registry;

/// `[a, b, c]` with the shortest round-tripping representation of each value.
pub fn format_vector(values: &[f64]) -> String {
    let inner: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

/// Header block describing the run: requested models, masking and grid sizes,
/// followed by the optimizer settings.
pub fn format_preamble(config: &FitConfig, schedule: &GridSchedule) -> String {
    let mut out = String::new();
    let search = &config.search;

    out.push_str(&format!("Model(s) : [{}]\n", config.models.join(", ")));
    out.push_str(&format!("Data state : {}\n", config.data_state()));
    let points: Vec<String> = schedule.points().iter().map(|p| p.to_string()).collect();
    out.push_str(&format!("Grid points : [{}]\n", points.join(", ")));
    out.push_str(&format!(
        "Populations : {} x {}\n",
        config.pop_ids.0, config.pop_ids.1
    ));
    out.push_str(&format!(
        "Anneal : Tini={} Tfin={} learn_rate={} schedule={} maxiter={} dwell={}\n",
        search.anneal.temperature,
        search.anneal.final_temperature,
        search.anneal.learn_rate,
        search.anneal.schedule.as_str(),
        search.anneal.max_iter,
        search.anneal.dwell,
    ));
    out.push_str(&format!(
        "Stage factors : cold_iter={} cold_temp={} cold_learn={} refine_iter={}\n",
        search.factors.cold_iter, search.factors.cold_temp, search.factors.cold_learn, search.factors.refine_iter,
    ));
    out.push_str(&format!("BFGS : gtol={} memory={}\n", search.refine.gtol, search.refine.lbfgs_memory));
    out.push_str(&format!("Seed : {}\n", config.seed));
    out.push_str("\n\n");
    out
}

/// Block written after one stage of one model.
pub fn format_stage_block(model: &str, stage: &StageOutcome) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{model}\n"));
    out.push_str(&format!("Model log-likelihood: {}\n", stage.start_log_likelihood));
    out.push_str(&format!("Optimization : '{}'\n", stage.stage.label()));
    out.push_str(&format!("Optimized parameters: {}\n", format_vector(&stage.optimized)));
    out.push_str(&format!("Optimized log-likelihood: {}\n", stage.log_likelihood));
    out.push_str(&format!("theta: {}\n", stage.theta));
    out.push_str(&format!("AIC: {}\n", stage.aic));
    out
}

/// Ranked comparison of every fitted model.
pub fn format_comparison(table: &ModelComparisonTable) -> String {
    let mut out = String::new();
    out.push_str("\n=== Model comparison (AIC) ===\n");
    out.push_str(&format!(
        "{:<10} {:>4} {:>16} {:>14} {:>10} {:>8}\n",
        "Model", "k", "log-likelihood", "AIC", "dAIC", "weight"
    ));
    for row in table.summary() {
        out.push_str(&format!(
            "{:<10} {:>4} {:>16.4} {:>14.4} {:>10.4} {:>8.4}\n",
            row.model, row.param_count, row.log_likelihood, row.aic, row.delta_aic, row.weight
        ));
    }
    if let Some(best) = table.best() {
        out.push_str(&format!("Best model: {}\n", best.model));
    }
    out
}

/// Likelihood-ratio tests between nested fitted models; empty when none apply.
pub fn format_lrt(tests: &[LrtResult]) -> String {
    if tests.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n=== Likelihood-ratio tests ===\n");
    for t in tests {
        out.push_str(&format!(
            "{} vs {}: D={:.4} df={} p={:.4e}\n",
            t.simple, t.complex, t.statistic, t.df, t.p_value
        ));
    }
    out
}

/// One paragraph per registered model: name, description and every parameter
/// with its default and bounds.
pub fn format_model_list(registry: &Registry<'_>) -> String {
    let mut out = String::new();
    for spec in registry.specs() {
        out.push_str(&format!("{} ({} parameters): {}\n", spec.name, spec.param_count(), spec.description));
        for (i, name) in spec.param_names.iter().enumerate() {
            let pinned = if spec.lower[i] == spec.upper[i] { "  fixed" } else { "" };
            out.push_str(&format!(
                "  {:<6} default {:<6} bounds [{}, {}]{pinned}\n",
                name, spec.defaults[i], spec.lower[i], spec.upper[i]
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::StageKind;

    fn stage() -> StageOutcome {
        StageOutcome {
            stage: StageKind::AnnealCold,
            start: vec![1.0, 1.0, 1.0],
            temperature: Some(25.0),
            learn_rate: Some(0.01),
            budget: 10,
            start_log_likelihood: -120.5,
            optimized: vec![2.0, 0.5, 0.25],
            log_likelihood: -100.25,
            theta: 1234.5,
            aic: 206.5,
            evaluations: 500,
        }
    }

    #[test]
    fn stage_block_has_the_log_layout() {
        let block = format_stage_block("SI", &stage());
        let expected = "\nSI\n\
            Model log-likelihood: -120.5\n\
            Optimization : 'anneal_cold'\n\
            Optimized parameters: [2, 0.5, 0.25]\n\
            Optimized log-likelihood: -100.25\n\
            theta: 1234.5\n\
            AIC: 206.5\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn comparison_lists_models_by_aic() {
        let mut table = ModelComparisonTable::new();
        table.record("IM", -99.0, 6);
        table.record("SI", -100.0, 3);
        let text = format_comparison(&table);
        let si = text.find("\nSI ").unwrap();
        let im = text.find("\nIM ").unwrap();
        assert!(si < im);
        assert!(text.ends_with("Best model: SI\n"));
    }

    #[test]
    fn lrt_lines_follow_the_comparison() {
        let mut table = ModelComparisonTable::new();
        table.record("SI", -100.0, 3);
        table.record("IM", -96.0, 5);
        assert_eq!(format_lrt(&table.nested_tests(&[("SI", "SIG")])), "");
        let text = format_lrt(&table.nested_tests(&[("SI", "IM")]));
        assert!(text.starts_with("\n=== Likelihood-ratio tests ===\nSI vs IM: D=8.0000 df=2 p="), "{text}");
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn model_list_puts_each_model_header_on_one_line() {
        let registry = Registry::builtin();
        let text = format_model_list(&registry);
        let headers: Vec<&str> = text.lines().filter(|l| l.contains(" parameters): ")).collect();
        assert_eq!(headers.len(), registry.specs().len());
        for (line, spec) in headers.iter().zip(registry.specs()) {
            assert_eq!(*line, format!("{} ({} parameters): {}", spec.name, spec.param_count(), spec.description));
        }
    }

    #[test]
    fn model_list_marks_fixed_parameters() {
        let text = format_model_list(&Registry::builtin());
        assert!(text.starts_with("SI (3 parameters)"));
        let em = text.lines().skip_while(|l| !l.starts_with("EM ")).nth(5).unwrap();
        assert!(em.trim_start().starts_with("Ts"), "{em}");
        assert!(em.ends_with("fixed"));
    }
}

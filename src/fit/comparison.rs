//! AIC comparison of fitted models and likelihood-ratio tests between nested ones.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use thiserror::Error;

use crate::spectrum::aic;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparisonError {
    #[error("model '{0}' has not been recorded")]
    Missing(String),

    #[error("'{complex}' does not have more parameters than '{simple}'")]
    NotNested { simple: String, complex: String },
}

/// Final log-likelihood and parameter count of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub model: String,
    pub log_likelihood: f64,
    pub param_count: usize,
}

impl ComparisonEntry {
    pub fn aic(&self) -> f64 {
        aic(self.param_count, self.log_likelihood)
    }
}

/// One row of the ranked summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub model: String,
    pub log_likelihood: f64,
    pub param_count: usize,
    pub aic: f64,
    pub delta_aic: f64,
    pub weight: f64,
}

/// Outcome of a likelihood-ratio test of `simple` nested in `complex`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LrtResult {
    pub simple: String,
    pub complex: String,
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
}

/// Models recorded in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelComparisonTable {
    entries: Vec<ComparisonEntry>,
}

impl ModelComparisonTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a model. Recording the same name again replaces its entry in place.
    pub fn record(&mut self, model: impl Into<String>, log_likelihood: f64, param_count: usize) {
        let entry = ComparisonEntry {
            model: model.into(),
            log_likelihood,
            param_count,
        };
        match self.entries.iter_mut().find(|e| e.model == entry.model) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn get(&self, model: &str) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.model == model)
    }

    pub fn aic(&self, model: &str) -> Option<f64> {
        self.get(model).map(ComparisonEntry::aic)
    }

    /// Entries from lowest to highest AIC; ties go to fewer parameters, then to
    /// the earlier record.
    pub fn ranked_by_aic(&self) -> Vec<&ComparisonEntry> {
        let mut ranked: Vec<&ComparisonEntry> = self.entries.iter().collect();
        // Stable sort keeps insertion order for full ties.
        ranked.sort_by(|a, b| a.aic().total_cmp(&b.aic()).then(a.param_count.cmp(&b.param_count)));
        ranked
    }

    pub fn best(&self) -> Option<&ComparisonEntry> {
        self.ranked_by_aic().into_iter().next()
    }

    /// Akaike weights in insertion order. All zero when no model has a finite AIC.
    pub fn akaike_weights(&self) -> Vec<f64> {
        let best = self.best().map(ComparisonEntry::aic).unwrap_or(f64::INFINITY);
        if !best.is_finite() {
            return vec![0.0; self.entries.len()];
        }
        let raw: Vec<f64> = self
            .entries
            .iter()
            .map(|e| (-0.5 * (e.aic() - best)).exp())
            .collect();
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|w| w / total).collect()
    }

    /// Ranked rows with delta-AIC and Akaike weight.
    pub fn summary(&self) -> Vec<ComparisonRow> {
        let weights = self.akaike_weights();
        let best = self.best().map(ComparisonEntry::aic).unwrap_or(f64::INFINITY);
        self.ranked_by_aic()
            .into_iter()
            .map(|e| {
                let idx = self.entries.iter().position(|x| x.model == e.model).unwrap_or(0);
                ComparisonRow {
                    model: e.model.clone(),
                    log_likelihood: e.log_likelihood,
                    param_count: e.param_count,
                    aic: e.aic(),
                    delta_aic: e.aic() - best,
                    weight: weights.get(idx).copied().unwrap_or(0.0),
                }
            })
            .collect()
    }

    /// Likelihood-ratio test of `simple` against the larger `complex` model.
    ///
    /// The statistic is clamped at zero when the larger model fit worse.
    pub fn likelihood_ratio_test(&self, simple: &str, complex: &str) -> Result<LrtResult, ComparisonError> {
        let s = self.get(simple).ok_or_else(|| ComparisonError::Missing(simple.to_string()))?;
        let c = self.get(complex).ok_or_else(|| ComparisonError::Missing(complex.to_string()))?;
        if c.param_count <= s.param_count {
            return Err(ComparisonError::NotNested {
                simple: simple.to_string(),
                complex: complex.to_string(),
            });
        }
        let df = c.param_count - s.param_count;
        let statistic = (2.0 * (c.log_likelihood - s.log_likelihood)).max(0.0);
        let p_value = if statistic.is_finite() {
            match ChiSquared::new(df as f64) {
                Ok(dist) => dist.sf(statistic),
                Err(_) => f64::NAN,
            }
        } else {
            f64::NAN
        };
        Ok(LrtResult {
            simple: s.model.clone(),
            complex: c.model.clone(),
            statistic,
            df,
            p_value,
        })
    }

    /// Likelihood-ratio tests for every `(simple, complex)` pair whose models
    /// were both recorded, in `pairs` order.
    pub fn nested_tests(&self, pairs: &[(&str, &str)]) -> Vec<LrtResult> {
        pairs
            .iter()
            .filter_map(|&(simple, complex)| self.likelihood_ratio_test(simple, complex).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aic_ordering_follows_the_likelihood_gain_per_parameter() {
        // IM adds 3 parameters to SI: it must gain more than 3 log-likelihood units.
        let mut table = ModelComparisonTable::new();
        table.record("SI", -1000.0, 3);
        table.record("IM", -998.0, 6);
        assert_eq!(table.best().map(|e| e.model.as_str()), Some("SI"));

        table.record("IM", -990.0, 6);
        assert_eq!(table.best().map(|e| e.model.as_str()), Some("IM"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.aic("IM"), Some(1992.0));
    }

    #[test]
    fn ties_go_to_fewer_parameters_then_insertion_order() {
        let mut table = ModelComparisonTable::new();
        table.record("B", -10.0, 4);
        table.record("A", -9.0, 3);
        table.record("C", -9.0, 3);
        let ranked: Vec<&str> = table.ranked_by_aic().iter().map(|e| e.model.as_str()).collect();
        // A and C have AIC 24, B has AIC 28.
        assert_eq!(ranked, vec!["A", "C", "B"]);
    }

    #[test]
    fn lrt_p_value_is_the_chi_squared_tail() {
        let mut table = ModelComparisonTable::new();
        table.record("SI", -1000.0, 3);
        table.record("IM", -996.0, 6);
        let lrt = table.likelihood_ratio_test("SI", "IM").unwrap();
        assert_eq!(lrt.df, 3);
        assert!((lrt.statistic - 8.0).abs() < 1e-12);
        let expected = 1.0 - ChiSquared::new(3.0).unwrap().cdf(8.0);
        assert!((lrt.p_value - expected).abs() < 1e-12);
        assert!(lrt.p_value > 0.04 && lrt.p_value < 0.05);
    }

    #[test]
    fn lrt_rejects_missing_and_non_nested_models() {
        let mut table = ModelComparisonTable::new();
        table.record("SI", -10.0, 3);
        table.record("EM", -9.0, 3);
        assert_eq!(
            table.likelihood_ratio_test("SI", "IM"),
            Err(ComparisonError::Missing("IM".to_string()))
        );
        assert!(matches!(
            table.likelihood_ratio_test("SI", "EM"),
            Err(ComparisonError::NotNested { .. })
        ));
    }

    #[test]
    fn nested_tests_skip_pairs_that_were_not_fitted() {
        let mut table = ModelComparisonTable::new();
        table.record("SI", -120.0, 3);
        table.record("IM", -110.0, 5);
        table.record("SC", -111.0, 6);
        let pairs = [("SI", "IM"), ("SI", "SIG"), ("IM", "SC"), ("SC", "SI")];
        let tests = table.nested_tests(&pairs);
        assert_eq!(tests.len(), 2);
        assert_eq!((tests[0].simple.as_str(), tests[0].complex.as_str(), tests[0].df), ("SI", "IM", 2));
        assert!((tests[0].statistic - 20.0).abs() < 1e-12);
        assert_eq!((tests[1].simple.as_str(), tests[1].statistic), ("IM", 0.0));
        assert!((tests[1].p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weights_sum_to_one_and_ignore_failed_models() {
        let mut table = ModelComparisonTable::new();
        table.record("SI", -100.0, 3);
        table.record("IM", -99.0, 6);
        table.record("AM", f64::NEG_INFINITY, 7);
        let weights = table.akaike_weights();
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(weights[2], 0.0);

        let rows = table.summary();
        assert_eq!(rows[0].model, "SI");
        assert_eq!(rows[0].delta_aic, 0.0);
        assert_eq!(rows[2].model, "AM");
    }
}

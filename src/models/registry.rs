//! Named models with their parameter layout and search bounds.

use crate::diffusion::{Demography, DiffusionEngine, GridSchedule, extrapolate};
use crate::models::ModelError;
use crate::models::catalog::MODELS;
use crate::spectrum::Spectrum;

pub type BuildFn = fn(&[f64]) -> Result<Demography, ModelError>;

/// One registered model.
///
/// `defaults` is the starting point of the search; `lower` and `upper` bound every
/// parameter. A parameter with `lower == upper` is pinned and never moved by the
/// optimizers.
#[derive(Debug, Clone, Copy)]
pub struct ModelSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub param_names: &'static [&'static str],
    pub defaults: &'static [f64],
    pub lower: &'static [f64],
    pub upper: &'static [f64],
    pub build: BuildFn,
}

impl ModelSpec {
    pub fn param_count(&self) -> usize {
        self.param_names.len()
    }

    pub fn demography(&self, params: &[f64]) -> Result<Demography, ModelError> {
        (self.build)(params)
    }

    /// Expected spectrum at `params`, extrapolated over `schedule`.
    pub fn expected_spectrum<E: DiffusionEngine + ?Sized>(
        &self,
        params: &[f64],
        sample_sizes: (usize, usize),
        schedule: &GridSchedule,
        engine: &E,
    ) -> Result<Spectrum, ModelError> {
        let demography = self.demography(params)?;
        Ok(extrapolate(engine, &demography, sample_sizes, schedule)?)
    }

    /// Check that the vectors line up and that the defaults build a valid mixture.
    pub fn validate(&self) -> Result<(), ModelError> {
        let inconsistent = |reason: String| ModelError::Inconsistent {
            model: self.name.to_string(),
            reason,
        };

        let k = self.param_names.len();
        for (label, len) in [
            ("defaults", self.defaults.len()),
            ("lower bounds", self.lower.len()),
            ("upper bounds", self.upper.len()),
        ] {
            if len != k {
                return Err(inconsistent(format!("{k} parameters but {len} {label}")));
            }
        }

        for (i, name) in self.param_names.iter().enumerate() {
            let (lo, start, hi) = (self.lower[i], self.defaults[i], self.upper[i]);
            if !(lo.is_finite() && hi.is_finite() && start.is_finite()) {
                return Err(inconsistent(format!("non-finite bound or default for {name}")));
            }
            if !(lo <= start && start <= hi) {
                return Err(inconsistent(format!("default {start} for {name} outside [{lo}, {hi}]")));
            }
        }

        let demography = self.demography(self.defaults).map_err(|e| inconsistent(e.to_string()))?;
        let total = demography.weight_sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(inconsistent(format!("mixture weights sum to {total}")));
        }
        Ok(())
    }
}

/// Lookup table of models.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    specs: &'a [ModelSpec],
}

impl Registry<'static> {
    /// Every model shipped with the crate.
    pub fn builtin() -> Self {
        Self { specs: MODELS }
    }
}

impl<'a> Registry<'a> {
    pub fn new(specs: &'a [ModelSpec]) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &'a [ModelSpec] {
        self.specs
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Result<&'a ModelSpec, ModelError> {
        self.specs
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ModelError::Unknown(name.to_string()))
    }

    /// Validate every entry and reject duplicate names.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (i, spec) in self.specs.iter().enumerate() {
            spec.validate()?;
            if self.specs[..i].iter().any(|s| s.name.eq_ignore_ascii_case(spec.name)) {
                return Err(ModelError::Inconsistent {
                    model: spec.name.to_string(),
                    reason: "registered twice".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diffusion::FiniteDifferenceEngine;
    use crate::models::{Sizes, Topology, homogeneous};

    fn toy(params: &[f64]) -> Result<Demography, ModelError> {
        let [nu1, nu2, ts] = <[f64; 3]>::try_from(params).map_err(|_| ModelError::Arity {
            model: "TOY",
            expected: 3,
            got: params.len(),
        })?;
        Ok(homogeneous(Topology::Isolation { ts }, Sizes::constant(nu1, nu2), (0.0, 0.0)))
    }

    const TOY: ModelSpec = ModelSpec {
        name: "TOY",
        description: "test model",
        param_names: &["nu1", "nu2", "Ts"],
        defaults: &[1.0, 1.0, 1.0],
        lower: &[0.01, 0.01, 0.0],
        upper: &[20.0, 20.0, 10.0],
        build: toy,
    };

    #[test]
    fn builtin_registry_is_consistent() {
        let registry = Registry::builtin();
        assert_eq!(registry.specs().len(), 37);
        registry.validate().unwrap();
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = Registry::builtin();
        assert_eq!(registry.get("sc2mg").unwrap().name, "SC2MG");
        assert_eq!(registry.get("Im2M2p").unwrap().name, "IM2M2P");
        assert!(matches!(registry.get("XYZ"), Err(ModelError::Unknown(_))));
    }

    #[test]
    fn mismatched_bounds_are_rejected() {
        let broken = [ModelSpec {
            upper: &[20.0, 20.0],
            ..TOY
        }];
        let err = Registry::new(&broken).validate().unwrap_err();
        assert!(matches!(err, ModelError::Inconsistent { .. }));
        assert!(err.to_string().contains("upper bounds"));
    }

    #[test]
    fn default_outside_bounds_is_rejected() {
        let broken = [ModelSpec {
            defaults: &[1.0, 1.0, 11.0],
            ..TOY
        }];
        assert!(Registry::new(&broken).validate().is_err());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let twice = [TOY, ModelSpec { name: "toy", ..TOY }];
        assert!(Registry::new(&twice).validate().is_err());
    }

    #[test]
    fn every_model_is_deterministic_with_the_sample_shape() {
        let engine = FiniteDifferenceEngine::new(4);
        let schedule = GridSchedule::new(vec![8, 10]).unwrap();
        for spec in Registry::builtin().specs() {
            let a = spec.expected_spectrum(spec.defaults, (4, 3), &schedule, &engine).unwrap();
            let b = spec.expected_spectrum(spec.defaults, (4, 3), &schedule, &engine).unwrap();
            assert_eq!(a.sample_sizes(), (4, 3), "{}", spec.name);
            assert_eq!(a, b, "{}", spec.name);
        }
    }

    #[test]
    fn proportions_in_the_unit_interval_give_unit_weights() {
        for spec in Registry::builtin().specs() {
            let mut params = spec.defaults.to_vec();
            for (i, name) in spec.param_names.iter().enumerate() {
                if matches!(*name, "P" | "P1" | "P2" | "Q" | "nr") {
                    params[i] = 0.13 + 0.2 * i as f64 % 0.8;
                }
            }
            let d = spec.demography(&params).unwrap();
            assert!((d.weight_sum() - 1.0).abs() < 1e-12, "{}", spec.name);
        }
    }

    #[test]
    fn wrong_arity_is_an_error() {
        for spec in Registry::builtin().specs() {
            assert!(matches!(spec.demography(&[1.0]), Err(ModelError::Arity { .. })), "{}", spec.name);
        }
    }
}

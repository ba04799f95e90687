//! Piecewise demographic histories.
//!
//! Time runs forward from the population split in units of `2 N_ref` generations;
//! population sizes are relative to the ancestral size.

/// Relative population size as a function of time within an epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeTrajectory {
    Constant(f64),
    /// `size(t) = start * coefficient^(t / duration)`.
    Exponential { start: f64, coefficient: f64, duration: f64 },
}

impl SizeTrajectory {
    pub fn size(&self, t: f64) -> f64 {
        match *self {
            SizeTrajectory::Constant(nu) => nu,
            SizeTrajectory::Exponential {
                start,
                coefficient,
                duration,
            } => {
                if duration > 0.0 {
                    start * coefficient.powf(t / duration)
                } else {
                    start
                }
            }
        }
    }

    /// Same trajectory with every size multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        match *self {
            SizeTrajectory::Constant(nu) => SizeTrajectory::Constant(nu * factor),
            SizeTrajectory::Exponential {
                start,
                coefficient,
                duration,
            } => SizeTrajectory::Exponential {
                start: start * factor,
                coefficient,
                duration,
            },
        }
    }
}

/// One interval of constant migration rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epoch {
    pub duration: f64,
    pub nu1: SizeTrajectory,
    pub nu2: SizeTrajectory,
    /// Migration into population 1 from population 2.
    pub m12: f64,
    /// Migration into population 2 from population 1.
    pub m21: f64,
}

impl Epoch {
    pub fn new(duration: f64, nu1: SizeTrajectory, nu2: SizeTrajectory, m12: f64, m21: f64) -> Self {
        Self {
            duration,
            nu1,
            nu2,
            m12,
            m21,
        }
    }

    /// Epoch without gene flow.
    pub fn isolation(duration: f64, nu1: SizeTrajectory, nu2: SizeTrajectory) -> Self {
        Self::new(duration, nu1, nu2, 0.0, 0.0)
    }

    /// Copy of this epoch with both trajectories scaled by `factor`.
    pub fn with_sizes_scaled(&self, factor: f64) -> Self {
        Self {
            nu1: self.nu1.scaled(factor),
            nu2: self.nu2.scaled(factor),
            ..*self
        }
    }
}

/// Ordered epochs following the split of the ancestral population.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    epochs: Vec<Epoch>,
}

impl History {
    pub fn new(epochs: Vec<Epoch>) -> Self {
        Self { epochs }
    }

    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    pub fn total_time(&self) -> f64 {
        self.epochs.iter().map(|e| e.duration).sum()
    }

    /// Apply `f` to every epoch.
    pub fn map_epochs(&self, f: impl Fn(&Epoch) -> Epoch) -> Self {
        Self {
            epochs: self.epochs.iter().map(f).collect(),
        }
    }
}

/// One weighted class of the genome sharing a history.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub weight: f64,
    pub history: History,
}

/// A weighted mixture of histories. The expected spectrum is the weighted sum of
/// the component spectra.
#[derive(Debug, Clone, PartialEq)]
pub struct Demography {
    components: Vec<Component>,
}

impl Demography {
    pub fn single(history: History) -> Self {
        Self {
            components: vec![Component { weight: 1.0, history }],
        }
    }

    pub fn mixture(components: Vec<(f64, History)>) -> Self {
        Self {
            components: components
                .into_iter()
                .map(|(weight, history)| Component { weight, history })
                .collect(),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn weight_sum(&self) -> f64 {
        self.components.iter().map(|c| c.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_trajectory_hits_both_endpoints() {
        let traj = SizeTrajectory::Exponential {
            start: 0.7,
            coefficient: 3.0,
            duration: 0.4,
        };
        assert_eq!(traj.size(0.0), 0.7);
        assert!((traj.size(0.4) - 2.1).abs() < 1e-12);
        assert!(traj.size(0.2) > 0.7 && traj.size(0.2) < 2.1);
    }

    #[test]
    fn scaling_keeps_growth_rate() {
        let traj = SizeTrajectory::Exponential {
            start: 2.0,
            coefficient: 0.5,
            duration: 1.0,
        };
        let reduced = traj.scaled(0.25);
        assert!((reduced.size(1.0) - 0.25).abs() < 1e-12);
        assert_eq!(SizeTrajectory::Constant(4.0).scaled(0.5), SizeTrajectory::Constant(2.0));
    }

    #[test]
    fn history_total_time_sums_epochs() {
        let c = SizeTrajectory::Constant(1.0);
        let h = History::new(vec![Epoch::new(0.3, c, c, 1.0, 2.0), Epoch::isolation(0.2, c, c)]);
        assert!((h.total_time() - 0.5).abs() < 1e-12);
        let halved = h.map_epochs(|e| e.with_sizes_scaled(0.5));
        assert_eq!(halved.epochs()[1].nu2, SizeTrajectory::Constant(0.5));
    }
}

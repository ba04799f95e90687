//! Building blocks shared by the named models.
//!
//! A model is assembled from three independent choices:
//!
//! - a [`Topology`]: which epochs follow the split and whether gene flow is on
//! - [`Sizes`]: constant sizes, or exponential growth during the last epoch
//! - a partition of the genome into weighted classes that differ only in their
//!   migration rates or effective sizes
//!
//! Every class of a mixture shares the same topology.

use crate::diffusion::{Demography, Epoch, History, SizeTrajectory};

/// Epoch layout after the split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Topology {
    /// Strict isolation for `ts`.
    Isolation { ts: f64 },
    /// Continuous migration for `ts`.
    Migration { ts: f64 },
    /// Migration, then isolation until present.
    AncientMigration { migrating: f64, isolated: f64 },
    /// Two rounds of (migration, isolation).
    PeriodicAncientMigration { migrating: f64, isolated: f64 },
    /// Isolation, then secondary contact until present.
    SecondaryContact { isolated: f64, contact: f64 },
    /// Two rounds of (isolation, contact).
    PeriodicSecondaryContact { isolated: f64, contact: f64 },
}

impl Topology {
    /// `(duration, migrating)` for every epoch, oldest first.
    fn phases(&self) -> Vec<(f64, bool)> {
        match *self {
            Topology::Isolation { ts } => vec![(ts, false)],
            Topology::Migration { ts } => vec![(ts, true)],
            Topology::AncientMigration { migrating, isolated } => vec![(migrating, true), (isolated, false)],
            Topology::PeriodicAncientMigration { migrating, isolated } => {
                vec![(migrating, true), (isolated, false), (migrating, true), (isolated, false)]
            }
            Topology::SecondaryContact { isolated, contact } => vec![(isolated, false), (contact, true)],
            Topology::PeriodicSecondaryContact { isolated, contact } => {
                vec![(isolated, false), (contact, true), (isolated, false), (contact, true)]
            }
        }
    }

    /// History with migration rates `(m12, m21)` in the migrating epochs.
    pub fn history(&self, sizes: Sizes, (m12, m21): (f64, f64)) -> History {
        let phases = self.phases();
        let last = phases.len() - 1;
        let epochs = phases
            .into_iter()
            .enumerate()
            .map(|(idx, (duration, migrating))| {
                let (nu1, nu2) = if idx == last {
                    sizes.final_trajectories(duration)
                } else {
                    sizes.constant_trajectories()
                };
                if migrating {
                    Epoch::new(duration, nu1, nu2, m12, m21)
                } else {
                    Epoch::isolation(duration, nu1, nu2)
                }
            })
            .collect();
        History::new(epochs)
    }
}

/// Population sizes after the split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizes {
    pub nu1: f64,
    pub nu2: f64,
    /// Growth coefficients `(b1, b2)` applied over the final epoch.
    pub growth: Option<(f64, f64)>,
}

impl Sizes {
    pub fn constant(nu1: f64, nu2: f64) -> Self {
        Self { nu1, nu2, growth: None }
    }

    pub fn growing(nu1: f64, nu2: f64, b1: f64, b2: f64) -> Self {
        Self {
            nu1,
            nu2,
            growth: Some((b1, b2)),
        }
    }

    fn constant_trajectories(&self) -> (SizeTrajectory, SizeTrajectory) {
        (SizeTrajectory::Constant(self.nu1), SizeTrajectory::Constant(self.nu2))
    }

    fn final_trajectories(&self, duration: f64) -> (SizeTrajectory, SizeTrajectory) {
        match self.growth {
            None => self.constant_trajectories(),
            Some((b1, b2)) => (
                SizeTrajectory::Exponential {
                    start: self.nu1,
                    coefficient: b1,
                    duration,
                },
                SizeTrajectory::Exponential {
                    start: self.nu2,
                    coefficient: b2,
                    duration,
                },
            ),
        }
    }
}

/// One history for the whole genome.
pub fn homogeneous(topology: Topology, sizes: Sizes, migration: (f64, f64)) -> Demography {
    Demography::single(topology.history(sizes, migration))
}

/// Genome-wide heterogeneity in migration: a fraction `p` migrates at `neutral`,
/// the rest (genomic islands) at `island`.
pub fn two_migration_classes(
    topology: Topology,
    sizes: Sizes,
    neutral: (f64, f64),
    island: (f64, f64),
    p: f64,
) -> Demography {
    Demography::mixture(vec![
        (p, topology.history(sizes, neutral)),
        (1.0 - p, topology.history(sizes, island)),
    ])
}

/// Migration heterogeneity drawn independently for each direction of gene flow.
///
/// A fraction `p1` of the genome receives migrants into population 1 at the neutral
/// rate and `p2` into population 2, giving four classes.
pub fn two_migration_classes_per_population(
    topology: Topology,
    sizes: Sizes,
    (m12, m21): (f64, f64),
    (me12, me21): (f64, f64),
    (p1, p2): (f64, f64),
) -> Demography {
    Demography::mixture(vec![
        (p1 * p2, topology.history(sizes, (m12, m21))),
        (p1 * (1.0 - p2), topology.history(sizes, (m12, me21))),
        ((1.0 - p1) * p2, topology.history(sizes, (me12, m21))),
        ((1.0 - p1) * (1.0 - p2), topology.history(sizes, (me12, me21))),
    ])
}

/// Heterogeneity in effective size: a fraction `q` of the genome has both sizes
/// multiplied by `factor` (linked selection in low-recombination regions).
pub fn two_size_classes(topology: Topology, sizes: Sizes, migration: (f64, f64), factor: f64, q: f64) -> Demography {
    let normal = topology.history(sizes, migration);
    let reduced = normal.map_epochs(|e| e.with_sizes_scaled(factor));
    Demography::mixture(vec![(1.0 - q, normal), (q, reduced)])
}

/// Independent size and migration partitions.
///
/// Weights: `P(1-Q)` neutral migration and normal size, `PQ` neutral migration and
/// reduced size, `(1-P)(1-Q)` island migration and normal size, `(1-P)Q` island
/// migration and reduced size.
pub fn two_size_two_migration_classes(
    topology: Topology,
    sizes: Sizes,
    neutral: (f64, f64),
    island: (f64, f64),
    factor: f64,
    (p, q): (f64, f64),
) -> Demography {
    let neutral_normal = topology.history(sizes, neutral);
    let island_normal = topology.history(sizes, island);
    let neutral_reduced = neutral_normal.map_epochs(|e| e.with_sizes_scaled(factor));
    let island_reduced = island_normal.map_epochs(|e| e.with_sizes_scaled(factor));
    Demography::mixture(vec![
        (p * (1.0 - q), neutral_normal),
        (p * q, neutral_reduced),
        ((1.0 - p) * (1.0 - q), island_normal),
        ((1.0 - p) * q, island_reduced),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_contact_migrates_only_at_the_end() {
        let h = Topology::SecondaryContact {
            isolated: 2.0,
            contact: 0.1,
        }
        .history(Sizes::constant(1.5, 0.5), (3.0, 4.0));
        let e = h.epochs();
        assert_eq!(e.len(), 2);
        assert_eq!((e[0].duration, e[0].m12, e[0].m21), (2.0, 0.0, 0.0));
        assert_eq!((e[1].duration, e[1].m12, e[1].m21), (0.1, 3.0, 4.0));
    }

    #[test]
    fn periodic_topologies_repeat_twice() {
        let h = Topology::PeriodicAncientMigration {
            migrating: 1.0,
            isolated: 0.2,
        }
        .history(Sizes::constant(1.0, 1.0), (1.0, 1.0));
        let migrating: Vec<bool> = h.epochs().iter().map(|e| e.m12 > 0.0).collect();
        assert_eq!(migrating, vec![true, false, true, false]);
        assert!((h.total_time() - 2.4).abs() < 1e-12);
    }

    #[test]
    fn growth_applies_to_the_final_epoch() {
        let h = Topology::AncientMigration {
            migrating: 0.5,
            isolated: 2.0,
        }
        .history(Sizes::growing(1.0, 2.0, 4.0, 0.5), (1.0, 1.0));
        let e = h.epochs();
        assert_eq!(e[0].nu1, SizeTrajectory::Constant(1.0));
        assert!((e[1].nu1.size(2.0) - 4.0).abs() < 1e-12);
        assert!((e[1].nu2.size(2.0) - 1.0).abs() < 1e-12);
        assert_eq!(e[1].nu2.size(0.0), 2.0);
    }

    #[test]
    fn mixture_weights_sum_to_one() {
        let t = Topology::Migration { ts: 1.0 };
        let s = Sizes::constant(1.0, 1.0);
        for &(p, q) in &[(0.1, 0.9), (0.37, 0.52), (0.999, 0.001)] {
            let all = [
                two_migration_classes(t, s, (1.0, 1.0), (0.1, 0.1), p),
                two_migration_classes_per_population(t, s, (1.0, 1.0), (0.1, 0.1), (p, q)),
                two_size_classes(t, s, (1.0, 1.0), 0.5, q),
                two_size_two_migration_classes(t, s, (1.0, 1.0), (0.1, 0.1), 0.5, (p, q)),
            ];
            for d in &all {
                assert!((d.weight_sum() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn per_population_classes_pair_rates_by_direction() {
        let d = two_migration_classes_per_population(
            Topology::Migration { ts: 1.0 },
            Sizes::constant(1.0, 1.0),
            (1.0, 2.0),
            (0.1, 0.2),
            (0.6, 0.3),
        );
        let rates: Vec<(f64, f64)> = d
            .components()
            .iter()
            .map(|c| (c.history.epochs()[0].m12, c.history.epochs()[0].m21))
            .collect();
        assert_eq!(rates, vec![(1.0, 2.0), (1.0, 0.2), (0.1, 2.0), (0.1, 0.2)]);
        assert!((d.components()[1].weight - 0.6 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn reduced_classes_share_the_epoch_layout() {
        let d = two_size_two_migration_classes(
            Topology::AncientMigration {
                migrating: 0.3,
                isolated: 1.2,
            },
            Sizes::growing(1.0, 1.0, 2.0, 2.0),
            (5.0, 5.0),
            (0.5, 0.5),
            0.25,
            (0.5, 0.5),
        );
        let reference: Vec<f64> = d.components()[0].history.epochs().iter().map(|e| e.duration).collect();
        for c in d.components() {
            let durations: Vec<f64> = c.history.epochs().iter().map(|e| e.duration).collect();
            assert_eq!(durations, reference);
            assert_eq!(c.history.epochs()[1].m12, 0.0);
        }
        let reduced = &d.components()[1].history.epochs()[1];
        assert!((reduced.nu1.size(1.2) - 0.5).abs() < 1e-12);
    }
}

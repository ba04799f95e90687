//! The named models.
//!
//! Naming: `SI` strict isolation, `IM` isolation with migration, `AM` ancient
//! migration, `SC` secondary contact, `P` prefix for the periodic variants and `EM`
//! for IM with the split time pinned at 40. Suffixes: `2M` two migration classes,
//! `2M2P` two migration classes per population, `2N` two effective-size classes,
//! `G` exponential growth in the last epoch.

use crate::diffusion::Demography;
use crate::models::demography::{
    Sizes, Topology, homogeneous, two_migration_classes, two_migration_classes_per_population, two_size_classes,
    two_size_two_migration_classes,
};
use crate::models::{ModelError, ModelSpec};

fn unpack<const N: usize>(model: &'static str, params: &[f64]) -> Result<[f64; N], ModelError> {
    <[f64; N]>::try_from(params).map_err(|_| ModelError::Arity {
        model,
        expected: N,
        got: params.len(),
    })
}

const NO_MIGRATION: (f64, f64) = (0.0, 0.0);

// Strict isolation.

fn si(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, ts] = unpack("SI", p)?;
    Ok(homogeneous(Topology::Isolation { ts }, Sizes::constant(nu1, nu2), NO_MIGRATION))
}

fn si2n(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, ts, nr, bf] = unpack("SI2N", p)?;
    Ok(two_size_classes(Topology::Isolation { ts }, Sizes::constant(nu1, nu2), NO_MIGRATION, bf, nr))
}

fn sig(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, ts] = unpack("SIG", p)?;
    Ok(homogeneous(Topology::Isolation { ts }, Sizes::growing(nu1, nu2, b1, b2), NO_MIGRATION))
}

fn si2ng(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, hrf, ts, q] = unpack("SI2NG", p)?;
    Ok(two_size_classes(Topology::Isolation { ts }, Sizes::growing(nu1, nu2, b1, b2), NO_MIGRATION, hrf, q))
}

// Isolation with migration.

fn im(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, ts] = unpack("IM", p)?;
    Ok(homogeneous(Topology::Migration { ts }, Sizes::constant(nu1, nu2), (m12, m21)))
}

fn em(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, ts] = unpack("EM", p)?;
    Ok(homogeneous(Topology::Migration { ts }, Sizes::constant(nu1, nu2), (m12, m21)))
}

fn img(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, m12, m21, ts] = unpack("IMG", p)?;
    Ok(homogeneous(Topology::Migration { ts }, Sizes::growing(nu1, nu2, b1, b2), (m12, m21)))
}

fn im2n(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, hrf, m12, m21, ts, q] = unpack("IM2N", p)?;
    Ok(two_size_classes(Topology::Migration { ts }, Sizes::constant(nu1, nu2), (m12, m21), hrf, q))
}

fn im2ng(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, hrf, m12, m21, ts, q] = unpack("IM2NG", p)?;
    Ok(two_size_classes(Topology::Migration { ts }, Sizes::growing(nu1, nu2, b1, b2), (m12, m21), hrf, q))
}

fn im2m(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, prop] = unpack("IM2M", p)?;
    Ok(two_migration_classes(Topology::Migration { ts }, Sizes::constant(nu1, nu2), (m12, m21), (me12, me21), prop))
}

fn em2m(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, prop] = unpack("EM2M", p)?;
    Ok(two_migration_classes(Topology::Migration { ts }, Sizes::constant(nu1, nu2), (m12, m21), (me12, me21), prop))
}

fn im2mg(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, m12, m21, me12, me21, ts, prop] = unpack("IM2MG", p)?;
    Ok(two_migration_classes(
        Topology::Migration { ts },
        Sizes::growing(nu1, nu2, b1, b2),
        (m12, m21),
        (me12, me21),
        prop,
    ))
}

fn im2n2m(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, hrf, m12, m21, me12, me21, ts, prop, q] = unpack("IM2N2M", p)?;
    Ok(two_size_two_migration_classes(
        Topology::Migration { ts },
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        hrf,
        (prop, q),
    ))
}

fn im2m2p(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, p1, p2] = unpack("IM2M2P", p)?;
    Ok(two_migration_classes_per_population(
        Topology::Migration { ts },
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        (p1, p2),
    ))
}

fn em2m2p(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, p1, p2] = unpack("EM2M2P", p)?;
    Ok(two_migration_classes_per_population(
        Topology::Migration { ts },
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        (p1, p2),
    ))
}

// Ancient migration.

fn am(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, ts, tam] = unpack("AM", p)?;
    let topology = Topology::AncientMigration {
        migrating: ts,
        isolated: tam,
    };
    Ok(homogeneous(topology, Sizes::constant(nu1, nu2), (m12, m21)))
}

/// Ancient migration with growth. Sizes stay at `nu1`, `nu2` while migration
/// runs; growth `b1`, `b2` applies over the final isolated epoch only and is not
/// restarted per epoch.
fn amg(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, m12, m21, tam, ts] = unpack("AMG", p)?;
    let topology = Topology::AncientMigration {
        migrating: tam,
        isolated: ts,
    };
    Ok(homogeneous(topology, Sizes::growing(nu1, nu2, b1, b2), (m12, m21)))
}

fn am2n(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, hrf, m12, m21, tam, ts, q] = unpack("AM2N", p)?;
    let topology = Topology::AncientMigration {
        migrating: tam,
        isolated: ts,
    };
    Ok(two_size_classes(topology, Sizes::constant(nu1, nu2), (m12, m21), hrf, q))
}

fn am2ng(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, hrf, m12, m21, tam, ts, q] = unpack("AM2NG", p)?;
    let topology = Topology::AncientMigration {
        migrating: tam,
        isolated: ts,
    };
    Ok(two_size_classes(topology, Sizes::growing(nu1, nu2, b1, b2), (m12, m21), hrf, q))
}

fn am2m(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, tam, prop] = unpack("AM2M", p)?;
    let topology = Topology::AncientMigration {
        migrating: ts,
        isolated: tam,
    };
    Ok(two_migration_classes(topology, Sizes::constant(nu1, nu2), (m12, m21), (me12, me21), prop))
}

fn am2mg(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, m12, m21, me12, me21, tam, ts, prop] = unpack("AM2MG", p)?;
    let topology = Topology::AncientMigration {
        migrating: tam,
        isolated: ts,
    };
    Ok(two_migration_classes(topology, Sizes::growing(nu1, nu2, b1, b2), (m12, m21), (me12, me21), prop))
}

fn am2n2m(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, hrf, m12, m21, me12, me21, tam, ts, prop, q] = unpack("AM2N2M", p)?;
    let topology = Topology::AncientMigration {
        migrating: tam,
        isolated: ts,
    };
    Ok(two_size_two_migration_classes(
        topology,
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        hrf,
        (prop, q),
    ))
}

fn am2n2mg(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, hrf, m12, m21, me12, me21, tam, ts, prop, q] = unpack("AM2N2MG", p)?;
    let topology = Topology::AncientMigration {
        migrating: tam,
        isolated: ts,
    };
    Ok(two_size_two_migration_classes(
        topology,
        Sizes::growing(nu1, nu2, b1, b2),
        (m12, m21),
        (me12, me21),
        hrf,
        (prop, q),
    ))
}

fn am2m2p(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, tam, p1, p2] = unpack("AM2M2P", p)?;
    let topology = Topology::AncientMigration {
        migrating: ts,
        isolated: tam,
    };
    Ok(two_migration_classes_per_population(
        topology,
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        (p1, p2),
    ))
}

fn pam(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, ts, tam] = unpack("PAM", p)?;
    let topology = Topology::PeriodicAncientMigration {
        migrating: ts,
        isolated: tam,
    };
    Ok(homogeneous(topology, Sizes::constant(nu1, nu2), (m12, m21)))
}

fn pam2m2p(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, tam, p1, p2] = unpack("PAM2M2P", p)?;
    let topology = Topology::PeriodicAncientMigration {
        migrating: ts,
        isolated: tam,
    };
    Ok(two_migration_classes_per_population(
        topology,
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        (p1, p2),
    ))
}

// Secondary contact.

fn sc(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, ts, tsc] = unpack("SC", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(homogeneous(topology, Sizes::constant(nu1, nu2), (m12, m21)))
}

fn scg(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, m12, m21, ts, tsc] = unpack("SCG", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(homogeneous(topology, Sizes::growing(nu1, nu2, b1, b2), (m12, m21)))
}

fn sc2n(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, hrf, m12, m21, ts, tsc, q] = unpack("SC2N", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_size_classes(topology, Sizes::constant(nu1, nu2), (m12, m21), hrf, q))
}

fn sc2ng(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, hrf, m12, m21, ts, tsc, q] = unpack("SC2NG", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_size_classes(topology, Sizes::growing(nu1, nu2, b1, b2), (m12, m21), hrf, q))
}

fn sc2m(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, tsc, prop] = unpack("SC2M", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_migration_classes(topology, Sizes::constant(nu1, nu2), (m12, m21), (me12, me21), prop))
}

fn sc2mg(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, m12, m21, me12, me21, ts, tsc, prop] = unpack("SC2MG", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_migration_classes(topology, Sizes::growing(nu1, nu2, b1, b2), (m12, m21), (me12, me21), prop))
}

fn sc2n2m(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, hrf, m12, m21, me12, me21, ts, tsc, prop, q] = unpack("SC2N2M", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_size_two_migration_classes(
        topology,
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        hrf,
        (prop, q),
    ))
}

fn sc2n2mg(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, b1, b2, hrf, m12, m21, me12, me21, ts, tsc, prop, q] = unpack("SC2N2MG", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_size_two_migration_classes(
        topology,
        Sizes::growing(nu1, nu2, b1, b2),
        (m12, m21),
        (me12, me21),
        hrf,
        (prop, q),
    ))
}

fn sc2m2p(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, tsc, p1, p2] = unpack("SC2M2P", p)?;
    let topology = Topology::SecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_migration_classes_per_population(
        topology,
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        (p1, p2),
    ))
}

fn psc(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, ts, tsc] = unpack("PSC", p)?;
    let topology = Topology::PeriodicSecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(homogeneous(topology, Sizes::constant(nu1, nu2), (m12, m21)))
}

fn psc2m2p(p: &[f64]) -> Result<Demography, ModelError> {
    let [nu1, nu2, m12, m21, me12, me21, ts, tsc, p1, p2] = unpack("PSC2M2P", p)?;
    let topology = Topology::PeriodicSecondaryContact {
        isolated: ts,
        contact: tsc,
    };
    Ok(two_migration_classes_per_population(
        topology,
        Sizes::constant(nu1, nu2),
        (m12, m21),
        (me12, me21),
        (p1, p2),
    ))
}

/// `(simple, complex)` pairs where the complex model reduces to the simple one
/// at the boundary of its extra parameters. Likelihood-ratio tests are reported
/// for the pairs that were both fitted.
pub static NESTED_PAIRS: &[(&str, &str)] = &[
    ("SI", "SIG"),
    ("SI", "SI2N"),
    ("SI", "IM"),
    ("IM", "IMG"),
    ("IM", "IM2N"),
    ("IM", "IM2M"),
    ("AM", "AMG"),
    ("AM", "AM2N"),
    ("AM", "AM2M"),
    ("SC", "SCG"),
    ("SC", "SC2N"),
    ("SC", "SC2M"),
];

/// Every registered model, in listing order.
pub static MODELS: &[ModelSpec] = &[
    ModelSpec {
        name: "SI",
        description: "Split with strict isolation",
        param_names: &["nu1", "nu2", "Ts"],
        defaults: &[1.0, 1.0, 1.0],
        lower: &[0.01, 0.01, 0.0],
        upper: &[20.0, 20.0, 10.0],
        build: si,
    },
    ModelSpec {
        name: "SI2N",
        description: "Strict isolation, two effective-size classes",
        param_names: &["nu1", "nu2", "Ts", "nr", "bf"],
        defaults: &[1.0, 1.0, 1.0, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.05, 0.01],
        upper: &[20.0, 20.0, 10.0, 0.95, 1.0],
        build: si2n,
    },
    ModelSpec {
        name: "SIG",
        description: "Strict isolation with exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "Ts"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.0],
        upper: &[20.0, 20.0, 100.0, 100.0, 10.0],
        build: sig,
    },
    ModelSpec {
        name: "SI2NG",
        description: "Strict isolation, two effective-size classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "hrf", "Ts", "Q"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.01, 0.0, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 1.0, 10.0, 0.95],
        build: si2ng,
    },
    ModelSpec {
        name: "IM",
        description: "Split with continuous migration",
        param_names: &["nu1", "nu2", "m12", "m21", "Ts"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 20.0, 20.0, 10.0],
        build: im,
    },
    ModelSpec {
        name: "EM",
        description: "Continuous migration since an old split (Ts fixed at 40)",
        param_names: &["nu1", "nu2", "m12", "m21", "Ts"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 40.0],
        lower: &[0.01, 0.01, 0.0, 0.0, 40.0],
        upper: &[20.0, 20.0, 20.0, 20.0, 40.0],
        build: em,
    },
    ModelSpec {
        name: "IMG",
        description: "Continuous migration with exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "m12", "m21", "Ts"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 100.0, 100.0, 20.0, 20.0, 10.0],
        build: img,
    },
    ModelSpec {
        name: "IM2N",
        description: "Continuous migration, two effective-size classes",
        param_names: &["nu1", "nu2", "hrf", "m12", "m21", "Ts", "Q"],
        defaults: &[1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 1.0, 20.0, 20.0, 10.0, 0.95],
        build: im2n,
    },
    ModelSpec {
        name: "IM2NG",
        description: "Continuous migration, two effective-size classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "hrf", "m12", "m21", "Ts", "Q"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 1.0, 20.0, 20.0, 10.0, 0.95],
        build: im2ng,
    },
    ModelSpec {
        name: "IM2M",
        description: "Continuous migration, two migration classes",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "P"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 70.0, 70.0, 5.0, 5.0, 10.0, 0.95],
        build: im2m,
    },
    ModelSpec {
        name: "EM2M",
        description: "Two migration classes since an old split (Ts fixed at 40)",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "P"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 40.0, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 40.0, 0.05],
        upper: &[20.0, 20.0, 30.0, 30.0, 5.0, 5.0, 40.0, 0.95],
        build: em2m,
    },
    ModelSpec {
        name: "IM2MG",
        description: "Continuous migration, two migration classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "m12", "m21", "me12", "me21", "Ts", "P"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 30.0, 30.0, 5.0, 5.0, 10.0, 0.95],
        build: im2mg,
    },
    ModelSpec {
        name: "IM2N2M",
        description: "Continuous migration, two effective-size and two migration classes",
        param_names: &["nu1", "nu2", "hrf", "m12", "m21", "me12", "me21", "Ts", "P", "Q"],
        defaults: &[1.0, 1.0, 0.5, 5.0, 5.0, 0.5, 0.5, 1.0, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 1.0, 30.0, 30.0, 5.0, 5.0, 10.0, 0.95, 0.95],
        build: im2n2m,
    },
    ModelSpec {
        name: "IM2M2P",
        description: "Continuous migration, two migration classes per population",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "P1", "P2"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 30.0, 30.0, 5.0, 5.0, 10.0, 0.95, 0.95],
        build: im2m2p,
    },
    ModelSpec {
        name: "EM2M2P",
        description: "Two migration classes per population since an old split (Ts fixed at 40)",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "P1", "P2"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 40.0, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 40.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 30.0, 30.0, 5.0, 5.0, 40.0, 0.95, 0.95],
        build: em2m2p,
    },
    ModelSpec {
        name: "AM",
        description: "Ancient migration (Ts) followed by isolation (Tam)",
        param_names: &["nu1", "nu2", "m12", "m21", "Ts", "Tam"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0, 0.1],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 20.0, 20.0, 10.0, 2.0],
        build: am,
    },
    ModelSpec {
        name: "AMG",
        description: "Ancient migration (Tam), isolation (Ts) with exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "m12", "m21", "Tam", "Ts"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.1, 1.0],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 100.0, 100.0, 20.0, 20.0, 2.0, 10.0],
        build: amg,
    },
    ModelSpec {
        name: "AM2N",
        description: "Ancient migration, two effective-size classes",
        param_names: &["nu1", "nu2", "hrf", "m12", "m21", "Tam", "Ts", "Q"],
        defaults: &[1.0, 1.0, 0.5, 1.0, 1.0, 0.1, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 1.0, 20.0, 20.0, 2.0, 10.0, 0.95],
        build: am2n,
    },
    ModelSpec {
        name: "AM2NG",
        description: "Ancient migration, two effective-size classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "hrf", "m12", "m21", "Tam", "Ts", "Q"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 0.1, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 1.0, 20.0, 20.0, 2.0, 10.0, 0.95],
        build: am2ng,
    },
    ModelSpec {
        name: "AM2M",
        description: "Ancient migration, two migration classes",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "Tam", "P"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 60.0, 60.0, 5.0, 5.0, 10.0, 2.0, 0.95],
        build: am2m,
    },
    ModelSpec {
        name: "AM2MG",
        description: "Ancient migration, two migration classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "m12", "m21", "me12", "me21", "Tam", "Ts", "P"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 0.1, 1.0, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 30.0, 30.0, 5.0, 5.0, 2.0, 10.0, 0.95],
        build: am2mg,
    },
    ModelSpec {
        name: "AM2N2M",
        description: "Ancient migration, two effective-size and two migration classes",
        param_names: &["nu1", "nu2", "hrf", "m12", "m21", "me12", "me21", "Tam", "Ts", "P", "Q"],
        defaults: &[1.0, 1.0, 0.5, 5.0, 5.0, 0.5, 0.5, 0.1, 1.0, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 1.0, 30.0, 30.0, 5.0, 5.0, 2.0, 10.0, 0.95, 0.95],
        build: am2n2m,
    },
    ModelSpec {
        name: "AM2N2MG",
        description: "Ancient migration, two effective-size and two migration classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "hrf", "m12", "m21", "me12", "me21", "Tam", "Ts", "P", "Q"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 0.5, 5.0, 5.0, 0.5, 0.5, 0.1, 1.0, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 1.0, 30.0, 30.0, 5.0, 5.0, 2.0, 10.0, 0.95, 0.95],
        build: am2n2mg,
    },
    ModelSpec {
        name: "AM2M2P",
        description: "Ancient migration, two migration classes per population",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "Tam", "P1", "P2"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 30.0, 30.0, 5.0, 5.0, 10.0, 2.0, 0.95, 0.95],
        build: am2m2p,
    },
    ModelSpec {
        name: "PAM",
        description: "Two rounds of ancient migration and isolation",
        param_names: &["nu1", "nu2", "m12", "m21", "Ts", "Tam"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0, 0.1],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 20.0, 20.0, 10.0, 2.0],
        build: pam,
    },
    ModelSpec {
        name: "PAM2M2P",
        description: "Two rounds of ancient migration, two migration classes per population",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "Tam", "P1", "P2"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 30.0, 30.0, 5.0, 5.0, 10.0, 2.0, 0.95, 0.95],
        build: pam2m2p,
    },
    ModelSpec {
        name: "SC",
        description: "Isolation (Ts) followed by secondary contact (Tsc)",
        param_names: &["nu1", "nu2", "m12", "m21", "Ts", "Tsc"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0, 0.1],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 20.0, 20.0, 10.0, 2.0],
        build: sc,
    },
    ModelSpec {
        name: "SCG",
        description: "Secondary contact with exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "m12", "m21", "Ts", "Tsc"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.1],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 100.0, 100.0, 20.0, 20.0, 10.0, 2.0],
        build: scg,
    },
    ModelSpec {
        name: "SC2N",
        description: "Secondary contact, two effective-size classes",
        param_names: &["nu1", "nu2", "hrf", "m12", "m21", "Ts", "Tsc", "Q"],
        defaults: &[1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 0.1, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 1.0, 20.0, 20.0, 10.0, 2.0, 0.95],
        build: sc2n,
    },
    ModelSpec {
        name: "SC2NG",
        description: "Secondary contact, two effective-size classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "hrf", "m12", "m21", "Ts", "Tsc", "Q"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0, 1.0, 0.1, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 1.0, 20.0, 20.0, 10.0, 2.0, 0.95],
        build: sc2ng,
    },
    ModelSpec {
        name: "SC2M",
        description: "Secondary contact, two migration classes",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "Tsc", "P"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 60.0, 60.0, 10.0, 10.0, 10.0, 2.0, 0.95],
        build: sc2m,
    },
    ModelSpec {
        name: "SC2MG",
        description: "Secondary contact, two migration classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "m12", "m21", "me12", "me21", "Ts", "Tsc", "P"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 30.0, 30.0, 5.0, 5.0, 10.0, 2.0, 0.95],
        build: sc2mg,
    },
    ModelSpec {
        name: "SC2N2M",
        description: "Secondary contact, two effective-size and two migration classes",
        param_names: &["nu1", "nu2", "hrf", "m12", "m21", "me12", "me21", "Ts", "Tsc", "P", "Q"],
        defaults: &[1.0, 1.0, 0.5, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 1.0, 30.0, 30.0, 5.0, 5.0, 10.0, 2.0, 0.95, 0.95],
        build: sc2n2m,
    },
    ModelSpec {
        name: "SC2N2MG",
        description: "Secondary contact, two effective-size and two migration classes, exponential size change",
        param_names: &["nu1", "nu2", "b1", "b2", "hrf", "m12", "m21", "me12", "me21", "Ts", "Tsc", "P", "Q"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 0.5, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.01, 0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 100.0, 100.0, 1.0, 30.0, 30.0, 5.0, 5.0, 10.0, 2.0, 0.95, 0.95],
        build: sc2n2mg,
    },
    ModelSpec {
        name: "SC2M2P",
        description: "Secondary contact, two migration classes per population",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "Tsc", "P1", "P2"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 30.0, 30.0, 5.0, 5.0, 10.0, 2.0, 0.95, 0.95],
        build: sc2m2p,
    },
    ModelSpec {
        name: "PSC",
        description: "Two rounds of isolation and secondary contact",
        param_names: &["nu1", "nu2", "m12", "m21", "Ts", "Tsc"],
        defaults: &[1.0, 1.0, 1.0, 1.0, 1.0, 0.1],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0],
        upper: &[20.0, 20.0, 20.0, 20.0, 10.0, 2.0],
        build: psc,
    },
    ModelSpec {
        name: "PSC2M2P",
        description: "Two rounds of secondary contact, two migration classes per population",
        param_names: &["nu1", "nu2", "m12", "m21", "me12", "me21", "Ts", "Tsc", "P1", "P2"],
        defaults: &[1.0, 1.0, 5.0, 5.0, 0.5, 0.5, 1.0, 0.1, 0.5, 0.5],
        lower: &[0.01, 0.01, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.05, 0.05],
        upper: &[20.0, 20.0, 30.0, 30.0, 5.0, 5.0, 10.0, 2.0, 0.95, 0.95],
        build: psc2m2p,
    },
];

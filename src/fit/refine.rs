//! Quasi-Newton refinement in log-parameter space.
//!
//! Each free parameter is optimized through an unconstrained coordinate `z`
//! that maps onto `ln(p)` restricted to the parameter's box: a logistic warp
//! when both bounds are positive and finite, a softplus warp when only one side
//! is. Every `z` therefore lands inside the bounds. Parameters that are pinned
//! or sit at exactly zero are held fixed.
//!
//! The minimization itself is `argmin`'s L-BFGS with a More-Thuente line search;
//! gradients are `finitediff` central differences with a forward fallback.

use std::cell::{Cell, RefCell};

use argmin::core::{CostFunction, Error, Executor, Gradient, State};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use finitediff::FiniteDiff;
use tracing::debug;

use crate::domain::RefineSettings;
use crate::fit::{Bounds, OptimizerOutcome};

type Coords = Vec<f64>;
type Lbfgs = LBFGS<MoreThuenteLineSearch<Coords, Coords, f64>, Coords, Coords, f64>;

/// Keeps a start that sits exactly on a bound at a finite warped coordinate.
const BOUND_MARGIN: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
enum RefineError {
    #[error("non-finite cost {0}")]
    NonFiniteCost(f64),
    #[error("finite-difference gradient is not finite")]
    NonFiniteGradient,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

fn softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Map between a free coordinate `z` and `ln(p)`.
#[derive(Debug, Clone, Copy)]
enum Warp {
    /// `ln p` in `(lo, hi)`.
    Interval { lo: f64, hi: f64 },
    /// `ln p` below `hi`; the lower bound is zero.
    Below { hi: f64 },
    /// `ln p` above `lo`; no upper bound.
    Above { lo: f64 },
    Unbounded,
}

impl Warp {
    fn for_bounds(lower: f64, upper: f64) -> Self {
        match (lower > 0.0, upper.is_finite()) {
            (true, true) => Warp::Interval { lo: lower.ln(), hi: upper.ln() },
            (false, true) => Warp::Below { hi: upper.ln() },
            (true, false) => Warp::Above { lo: lower.ln() },
            (false, false) => Warp::Unbounded,
        }
    }

    fn log_param(self, z: f64) -> f64 {
        match self {
            Warp::Interval { lo, hi } => lo + (hi - lo) * sigmoid(z),
            Warp::Below { hi } => hi - softplus(-z),
            Warp::Above { lo } => lo + softplus(z),
            Warp::Unbounded => z,
        }
    }

    fn coordinate(self, log_p: f64) -> f64 {
        match self {
            Warp::Interval { lo, hi } => {
                let t = ((log_p - lo) / (hi - lo)).clamp(BOUND_MARGIN, 1.0 - BOUND_MARGIN);
                (t / (1.0 - t)).ln()
            }
            Warp::Below { hi } => -softplus_inv((hi - log_p).max(BOUND_MARGIN)),
            Warp::Above { lo } => softplus_inv((log_p - lo).max(BOUND_MARGIN)),
            Warp::Unbounded => log_p,
        }
    }
}

/// Best point seen so far, across line searches and difference stencils.
struct Record {
    params: RefCell<Vec<f64>>,
    cost: Cell<f64>,
    evaluations: Cell<usize>,
}

/// The user cost seen as a function of the warped free coordinates.
struct LogSpaceProblem<'a, F> {
    cost: &'a F,
    bounds: &'a Bounds,
    base: &'a [f64],
    free: &'a [usize],
    warps: &'a [Warp],
    record: &'a Record,
}

impl<F: Fn(&[f64]) -> f64> LogSpaceProblem<'_, F> {
    fn params(&self, z: &[f64]) -> Vec<f64> {
        let mut p = self.base.to_vec();
        for ((&i, warp), &zk) in self.free.iter().zip(self.warps).zip(z) {
            p[i] = warp.log_param(zk).exp().clamp(self.bounds.lower[i], self.bounds.upper[i]);
        }
        p
    }

    fn eval(&self, z: &[f64]) -> f64 {
        let p = self.params(z);
        if !self.bounds.contains(&p) {
            return f64::INFINITY;
        }
        self.record.evaluations.set(self.record.evaluations.get() + 1);
        let c = (self.cost)(&p);
        if c.is_nan() {
            return f64::INFINITY;
        }
        if c < self.record.cost.get() {
            self.record.cost.set(c);
            *self.record.params.borrow_mut() = p;
        }
        c
    }
}

impl<F: Fn(&[f64]) -> f64> CostFunction for LogSpaceProblem<'_, F> {
    type Param = Coords;
    type Output = f64;

    fn cost(&self, z: &Self::Param) -> Result<Self::Output, Error> {
        let c = self.eval(z);
        if !c.is_finite() {
            return Err(RefineError::NonFiniteCost(c).into());
        }
        Ok(c)
    }
}

impl<F: Fn(&[f64]) -> f64> Gradient for LogSpaceProblem<'_, F> {
    type Param = Coords;
    type Gradient = Coords;

    fn gradient(&self, z: &Self::Param) -> Result<Self::Gradient, Error> {
        let f = |z: &Coords| self.eval(z);
        let g = z.central_diff(&f);
        if g.iter().all(|v| v.is_finite()) {
            return Ok(g);
        }
        // One-sided near an infeasible region.
        let g = z.forward_diff(&f);
        if g.iter().all(|v| v.is_finite()) {
            Ok(g)
        } else {
            Err(RefineError::NonFiniteGradient.into())
        }
    }
}

fn build_solver(settings: &RefineSettings) -> Result<Lbfgs, Error> {
    LBFGS::new(MoreThuenteLineSearch::new(), settings.lbfgs_memory).with_tolerance_grad(settings.gtol)
}

/// Minimize `cost` from `start` with at most `max_iter` L-BFGS iterations.
///
/// The returned point is the best one evaluated; if nothing beat the start, the
/// start comes back unchanged.
pub fn refine_log<F>(cost: F, start: &[f64], bounds: &Bounds, settings: &RefineSettings, max_iter: usize) -> OptimizerOutcome
where
    F: Fn(&[f64]) -> f64,
{
    let free: Vec<usize> = bounds
        .free_indices()
        .into_iter()
        .filter(|&i| start[i] > 0.0)
        .collect();
    let warps: Vec<Warp> = free
        .iter()
        .map(|&i| Warp::for_bounds(bounds.lower[i], bounds.upper[i]))
        .collect();

    let start_cost = if bounds.contains(start) { cost(start) } else { f64::INFINITY };
    let start_cost = if start_cost.is_nan() { f64::INFINITY } else { start_cost };
    let unchanged = |evaluations| OptimizerOutcome {
        params: start.to_vec(),
        cost: start_cost,
        evaluations,
    };
    if !start_cost.is_finite() || free.is_empty() {
        return unchanged(1);
    }

    let record = Record {
        params: RefCell::new(start.to_vec()),
        cost: Cell::new(start_cost),
        evaluations: Cell::new(1),
    };
    let problem = LogSpaceProblem {
        cost: &cost,
        bounds,
        base: start,
        free: &free,
        warps: &warps,
        record: &record,
    };
    let z0: Coords = free
        .iter()
        .zip(&warps)
        .map(|(&i, warp)| warp.coordinate(start[i].ln()))
        .collect();

    let solver = match build_solver(settings) {
        Ok(solver) => solver,
        Err(err) => {
            debug!(%err, "refinement skipped");
            return unchanged(1);
        }
    };
    let run = Executor::new(problem, solver)
        .configure(|state| state.param(z0).max_iters(max_iter as u64))
        .run();
    match run {
        Ok(result) => {
            let state = result.state();
            debug!(
                iterations = state.get_iter(),
                cost = state.get_best_cost(),
                termination = ?state.get_termination_status(),
                "refinement finished"
            );
        }
        Err(err) => debug!(%err, "refinement stopped early"),
    }

    let evaluations = record.evaluations.get();
    if record.cost.get() < start_cost {
        OptimizerOutcome {
            params: record.params.into_inner(),
            cost: record.cost.get(),
            evaluations,
        }
    } else {
        unchanged(evaluations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimizes_a_log_space_quadratic() {
        // Minimum at p = (2, 0.5).
        let cost = |p: &[f64]| (p[0].ln() - 2f64.ln()).powi(2) + 3.0 * (p[1].ln() - 0.5f64.ln()).powi(2);
        let bounds = Bounds::new(&[0.01, 0.01], &[20.0, 20.0]);
        let out = refine_log(cost, &[1.0, 1.0], &bounds, &RefineSettings::default(), 50);
        assert!((out.params[0] - 2.0).abs() < 1e-3, "{:?}", out.params);
        assert!((out.params[1] - 0.5).abs() < 1e-3, "{:?}", out.params);
        assert!(out.cost < 1e-6);
    }

    #[test]
    fn pinned_and_zero_parameters_stay_fixed() {
        let cost = |p: &[f64]| (p[0] - 3.0).powi(2) + p[1] + p[2];
        let bounds = Bounds::new(&[0.01, 0.0, 40.0], &[20.0, 5.0, 40.0]);
        let out = refine_log(cost, &[1.0, 0.0, 40.0], &bounds, &RefineSettings::default(), 30);
        assert_eq!(out.params[1], 0.0);
        assert_eq!(out.params[2], 40.0);
        assert!((out.params[0] - 3.0).abs() < 1e-2);
    }

    #[test]
    fn respects_upper_bounds() {
        let cost = |p: &[f64]| -p[0];
        let bounds = Bounds::new(&[0.1], &[4.0]);
        let out = refine_log(cost, &[1.0], &bounds, &RefineSettings::default(), 20);
        assert!(out.params[0] <= 4.0);
        assert!(out.params[0] > 1.0);
    }

    #[test]
    fn zero_lower_bound_is_approached_from_above() {
        let cost = |p: &[f64]| (p[0] - 0.25).powi(2);
        let bounds = Bounds::new(&[0.0], &[5.0]);
        let out = refine_log(cost, &[2.0], &bounds, &RefineSettings::default(), 50);
        assert!(out.params[0] > 0.0);
        assert!((out.params[0] - 0.25).abs() < 1e-2, "{:?}", out.params);
    }

    #[test]
    fn infeasible_start_is_returned_unchanged() {
        let bounds = Bounds::new(&[0.1], &[4.0]);
        let out = refine_log(|_: &[f64]| f64::INFINITY, &[1.0], &bounds, &RefineSettings::default(), 5);
        assert_eq!(out.params, vec![1.0]);
        assert_eq!(out.cost, f64::INFINITY);
    }

    #[test]
    fn start_already_at_the_minimum_is_kept_exactly() {
        let cost = |p: &[f64]| (p[0].ln() - 0.3f64.ln()).powi(2);
        let bounds = Bounds::new(&[0.01], &[20.0]);
        let out = refine_log(cost, &[0.3], &bounds, &RefineSettings::default(), 10);
        assert_eq!(out.params, vec![0.3]);
    }

    #[test]
    fn warps_round_trip_inside_their_range() {
        for warp in [
            Warp::for_bounds(0.01, 20.0),
            Warp::for_bounds(0.0, 5.0),
            Warp::for_bounds(0.5, f64::INFINITY),
        ] {
            let log_p = 1.2f64.ln();
            assert!((warp.log_param(warp.coordinate(log_p)) - log_p).abs() < 1e-9);
        }
    }
}

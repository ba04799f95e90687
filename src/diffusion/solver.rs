//! Finite-difference integration of the two-population diffusion.
//!
//! The density `phi(x, y)` lives on a uniform `pts x pts` grid over `[0, 1]^2`.
//! Each time step is a backward-Euler alternating-direction step: one implicit
//! solve along `x` for every `y`, then one along `y` for every `x`.
//!
//! Fluxes are written in conservative form with zero flux through the domain
//! boundary, so alleles lost or fixed in one population stay on the edge of the
//! grid and keep evolving in the other. Advection is upwinded; together with the
//! implicit step this makes every line system an M-matrix, so the density stays
//! non-negative for any step size.

use nalgebra::DMatrix;

use crate::diffusion::{DiffusionEngine, EngineError, Epoch, History};
use crate::math::{Tridiagonal, binomial_weights, trapezoid_weights};
use crate::spectrum::Spectrum;

pub const DEFAULT_STEPS_PER_EPOCH: usize = 100;

/// Implicit finite-difference engine.
///
/// Every epoch is integrated with the same number of steps regardless of its
/// duration, which keeps the expected spectrum a smooth function of the model
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiniteDifferenceEngine {
    steps_per_epoch: usize,
}

impl Default for FiniteDifferenceEngine {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS_PER_EPOCH)
    }
}

impl FiniteDifferenceEngine {
    pub fn new(steps_per_epoch: usize) -> Self {
        Self {
            steps_per_epoch: steps_per_epoch.max(1),
        }
    }

    pub fn steps_per_epoch(&self) -> usize {
        self.steps_per_epoch
    }
}

impl DiffusionEngine for FiniteDifferenceEngine {
    fn spectrum(&self, history: &History, sample_sizes: (usize, usize), pts: usize) -> Result<Spectrum, EngineError> {
        if pts < 3 {
            return Err(EngineError::InvalidGrid(format!("grid size {pts} is below the minimum of 3")));
        }
        for epoch in history.epochs() {
            validate_epoch(epoch)?;
        }

        let grid = Grid::uniform(pts);
        let mut phi = grid.split_density();
        let mut stepper = Stepper::new(&grid);

        for epoch in history.epochs() {
            if epoch.duration == 0.0 {
                continue;
            }
            let dt = epoch.duration / self.steps_per_epoch as f64;
            for step in 0..self.steps_per_epoch {
                let t = (step as f64 + 0.5) * dt;
                let nu1 = checked_size("nu1", epoch.nu1.size(t))?;
                let nu2 = checked_size("nu2", epoch.nu2.size(t))?;
                stepper.advance(&mut phi, dt, (nu1, nu2), (epoch.m12, epoch.m21))?;
            }
        }

        grid.sample(&phi, sample_sizes)
    }
}

fn checked_size(what: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter { what, value })
    }
}

fn checked_non_negative(what: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter { what, value })
    }
}

fn validate_epoch(epoch: &Epoch) -> Result<(), EngineError> {
    checked_non_negative("duration", epoch.duration)?;
    checked_non_negative("m12", epoch.m12)?;
    checked_non_negative("m21", epoch.m21)?;
    for t in [0.0, epoch.duration] {
        checked_size("nu1", epoch.nu1.size(t))?;
        checked_size("nu2", epoch.nu2.size(t))?;
    }
    Ok(())
}

/// Uniform frequency grid with trapezoid cell volumes.
struct Grid {
    xs: Vec<f64>,
    h: f64,
    vol: Vec<f64>,
}

impl Grid {
    fn uniform(pts: usize) -> Self {
        let h = 1.0 / (pts - 1) as f64;
        let xs: Vec<f64> = (0..pts).map(|i| i as f64 * h).collect();
        let vol = trapezoid_weights(&xs);
        Self { xs, h, vol }
    }

    fn len(&self) -> usize {
        self.xs.len()
    }

    /// Neutral equilibrium `1/x` of the ancestral population placed on the diagonal.
    fn split_density(&self) -> DMatrix<f64> {
        let n = self.len();
        let mut phi = DMatrix::zeros(n, n);
        for i in 1..n - 1 {
            phi[(i, i)] = (1.0 / self.xs[i]) / self.vol[i];
        }
        phi
    }

    fn sample(&self, phi: &DMatrix<f64>, (n1, n2): (usize, usize)) -> Result<Spectrum, EngineError> {
        let n = self.len();
        let bx = binomial_weights(n1, &self.xs);
        let by = binomial_weights(n2, &self.xs);
        let weighted = DMatrix::from_fn(n, n, |i, j| self.vol[i] * self.vol[j] * phi[(i, j)]);
        let data = bx * weighted * by.transpose();
        if data.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::NonFinite);
        }
        Ok(Spectrum::new(data))
    }
}

/// Scratch space for the line solves of one grid.
struct Stepper<'a> {
    grid: &'a Grid,
    a: Vec<f64>,
    b: Vec<f64>,
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
    rhs: Vec<f64>,
    out: Vec<f64>,
    solver: Tridiagonal,
}

impl<'a> Stepper<'a> {
    fn new(grid: &'a Grid) -> Self {
        let n = grid.len();
        Self {
            grid,
            a: vec![0.0; n - 1],
            b: vec![0.0; n - 1],
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
            rhs: vec![0.0; n],
            out: vec![0.0; n],
            solver: Tridiagonal::new(n),
        }
    }

    /// One backward-Euler step. Mutations are injected before the implicit solves
    /// so the new mass diffuses within the same step.
    fn advance(&mut self, phi: &mut DMatrix<f64>, dt: f64, (nu1, nu2): (f64, f64), (m12, m21): (f64, f64)) -> Result<(), EngineError> {
        let n = self.grid.len();
        self.inject(phi, dt);

        // Implicit in x, one line per y.
        for j in 0..n {
            self.build_line(dt, nu1, m12, self.grid.xs[j]);
            for i in 0..n {
                self.rhs[i] = phi[(i, j)];
            }
            self.solve_line()?;
            for i in 0..n {
                phi[(i, j)] = self.out[i];
            }
        }

        // Implicit in y, one line per x.
        for i in 0..n {
            self.build_line(dt, nu2, m21, self.grid.xs[i]);
            for j in 0..n {
                self.rhs[j] = phi[(i, j)];
            }
            self.solve_line()?;
            for j in 0..n {
                phi[(i, j)] = self.out[j];
            }
        }
        Ok(())
    }

    /// Assemble `I - dt * L` for one line, where `L` is the drift plus migration
    /// operator of a population of size `nu` migrating towards frequency `other`.
    fn build_line(&mut self, dt: f64, nu: f64, m: f64, other: f64) {
        let xs = &self.grid.xs;
        let h = self.grid.h;
        let n = xs.len();

        for k in 0..n - 1 {
            let mid = 0.5 * (xs[k] + xs[k + 1]);
            let drift = m * (other - mid);
            let v_left = xs[k] * (1.0 - xs[k]) / nu;
            let v_right = xs[k + 1] * (1.0 - xs[k + 1]) / nu;
            self.a[k] = drift.max(0.0) + v_left / (2.0 * h);
            self.b[k] = drift.min(0.0) - v_right / (2.0 * h);
        }

        for i in 0..n {
            let scale = dt / self.grid.vol[i];
            let (a_prev, b_prev) = if i > 0 { (self.a[i - 1], self.b[i - 1]) } else { (0.0, 0.0) };
            let (a_here, b_here) = if i + 1 < n { (self.a[i], self.b[i]) } else { (0.0, 0.0) };
            self.sub[i] = -scale * a_prev;
            self.diag[i] = 1.0 + scale * (a_here - b_prev);
            self.sup[i] = scale * b_here;
        }
    }

    fn solve_line(&mut self) -> Result<(), EngineError> {
        if self.solver.solve(&self.sub, &self.diag, &self.sup, &self.rhs, &mut self.out) {
            Ok(())
        } else {
            Err(EngineError::Singular)
        }
    }

    /// New mutations enter each population at the first interior frequency.
    fn inject(&self, phi: &mut DMatrix<f64>, dt: f64) {
        let x1 = self.grid.xs[1];
        let volume = self.grid.vol[1] * self.grid.vol[0];
        let amount = dt * (0.5 / x1) / volume;
        phi[(1, 0)] += amount;
        phi[(0, 1)] += amount;
    }
}

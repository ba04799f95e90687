//! Tridiagonal linear solver (Thomas algorithm).
//!
//! Every implicit diffusion step reduces to one tridiagonal system per grid line:
//!
//! ```text
//! sub[i] * u[i-1] + diag[i] * u[i] + sup[i] * u[i+1] = rhs[i]
//! ```
//!
//! `sub[0]` and `sup[n-1]` are ignored. The systems built by the diffusion engine are
//! diagonally dominant M-matrices, so no pivoting is needed.

/// Scratch buffers reused across many solves of the same size.
#[derive(Debug, Clone)]
pub struct Tridiagonal {
    c_prime: Vec<f64>,
    d_prime: Vec<f64>,
}

impl Tridiagonal {
    pub fn new(n: usize) -> Self {
        Self {
            c_prime: vec![0.0; n],
            d_prime: vec![0.0; n],
        }
    }

    /// Solve the system, writing the solution into `out`.
    ///
    /// Returns `false` when a pivot vanishes (the system is singular).
    pub fn solve(&mut self, sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64], out: &mut [f64]) -> bool {
        let n = diag.len();
        if n == 0 {
            return true;
        }
        if self.c_prime.len() < n {
            self.c_prime.resize(n, 0.0);
            self.d_prime.resize(n, 0.0);
        }

        let mut pivot = diag[0];
        if pivot == 0.0 {
            return false;
        }
        self.c_prime[0] = sup[0] / pivot;
        self.d_prime[0] = rhs[0] / pivot;

        for i in 1..n {
            pivot = diag[i] - sub[i] * self.c_prime[i - 1];
            if pivot == 0.0 {
                return false;
            }
            self.c_prime[i] = if i + 1 < n { sup[i] / pivot } else { 0.0 };
            self.d_prime[i] = (rhs[i] - sub[i] * self.d_prime[i - 1]) / pivot;
        }

        out[n - 1] = self.d_prime[n - 1];
        for i in (0..n - 1).rev() {
            out[i] = self.d_prime[i] - self.c_prime[i] * out[i + 1];
        }
        true
    }
}

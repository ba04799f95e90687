//! The two-population allele-frequency spectrum.
//!
//! A spectrum is an `(n1+1) x (n2+1)` matrix indexed by the derived-allele count in
//! each population, plus a mask of cells excluded from likelihood evaluation.
//!
//! Masking and folding never mutate a spectrum in place; they return a new value so
//! that an observed spectrum stays immutable once loaded.

use nalgebra::DMatrix;

/// Allele-frequency spectrum with its mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    data: DMatrix<f64>,
    mask: DMatrix<bool>,
    folded: bool,
    pop_ids: Option<(String, String)>,
}

impl Spectrum {
    /// Build a spectrum with the two monomorphic corners masked.
    pub fn new(data: DMatrix<f64>) -> Self {
        let mask = DMatrix::from_element(data.nrows(), data.ncols(), false);
        Self {
            data,
            mask,
            folded: false,
            pop_ids: None,
        }
        .with_corners_masked()
    }

    /// Build a spectrum from raw parts. The mask must have the same shape as `data`.
    pub fn from_parts(data: DMatrix<f64>, mask: DMatrix<bool>, folded: bool) -> Option<Self> {
        if data.shape() != mask.shape() || data.nrows() < 2 || data.ncols() < 2 {
            return None;
        }
        Some(Self {
            data,
            mask,
            folded,
            pop_ids: None,
        })
    }

    /// Attach population labels (first axis, second axis).
    pub fn with_pop_ids(mut self, pop1: impl Into<String>, pop2: impl Into<String>) -> Self {
        self.pop_ids = Some((pop1.into(), pop2.into()));
        self
    }

    pub fn pop_ids(&self) -> Option<(&str, &str)> {
        self.pop_ids.as_ref().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Sample sizes `(n1, n2)` (number of haploid samples per population).
    pub fn sample_sizes(&self) -> (usize, usize) {
        (self.data.nrows() - 1, self.data.ncols() - 1)
    }

    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn mask(&self) -> &DMatrix<bool> {
        &self.mask
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        self.mask[(i, j)]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[(i, j)]
    }

    /// Sum of all unmasked entries.
    pub fn unmasked_sum(&self) -> f64 {
        self.data
            .iter()
            .zip(self.mask.iter())
            .filter(|(_, m)| !**m)
            .map(|(v, _)| *v)
            .sum()
    }

    /// Return a copy with `[0,0]` and `[n1,n2]` masked.
    pub fn with_corners_masked(mut self) -> Self {
        let (n1, n2) = self.sample_sizes();
        self.mask[(0, 0)] = true;
        self.mask[(n1, n2)] = true;
        self
    }

    /// Return a copy with the two singleton corner cells `[1,0]` and `[0,1]` masked.
    pub fn with_singletons_masked(mut self) -> Self {
        self.mask[(1, 0)] = true;
        self.mask[(0, 1)] = true;
        self
    }

    /// Multiply every entry by `factor` (mask unchanged).
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.clone();
        out.data *= factor;
        out
    }

    /// Fold the spectrum onto the minor-allele half.
    ///
    /// Entry `[i,j]` and its reflection `[n1-i, n2-j]` describe the same site once the
    /// ancestral state is unknown. Entries whose total derived count exceeds half the
    /// total sample size are folded onto their reflection and masked. Entries on the
    /// anti-diagonal of exactly half the samples are averaged with their reflection.
    pub fn fold(&self) -> Self {
        if self.folded {
            return self.clone();
        }
        let (n1, n2) = self.sample_sizes();
        let total = n1 + n2;
        let (rows, cols) = (n1 + 1, n2 + 1);

        let mut data = DMatrix::<f64>::zeros(rows, cols);
        let mut mask = DMatrix::from_element(rows, cols, false);

        for i in 0..rows {
            for j in 0..cols {
                let (ri, rj) = (n1 - i, n2 - j);
                let per_entry = i + j;
                mask[(i, j)] = self.mask[(i, j)] || self.mask[(ri, rj)];

                if 2 * per_entry > total {
                    data[(i, j)] = 0.0;
                    mask[(i, j)] = true;
                } else if 2 * per_entry == total {
                    data[(i, j)] = 0.5 * (self.data[(i, j)] + self.data[(ri, rj)]);
                } else {
                    data[(i, j)] = self.data[(i, j)] + self.data[(ri, rj)];
                }
            }
        }

        Self {
            data,
            mask,
            folded: true,
            pop_ids: self.pop_ids.clone(),
        }
    }

    /// Marginal spectrum of the first population (sum over the second axis), ignoring masks.
    pub fn marginal_pop1(&self) -> Vec<f64> {
        self.data.row_iter().map(|row| row.sum()).collect()
    }
}

//! Sparse adjacency in COO and CSR (Compressed Sparse Row) form.
//!
//! The dataset pipeline builds a COO matrix from training pairs, compresses
//! it (summing duplicates), symmetrizes it and reads back the non-zero
//! pattern as the model's edge index.

use ndarray::Array2;

use crate::error::{GraphError, Result};

/// Coordinate-format square matrix. Duplicate coordinates are allowed and
/// summed on compression.
#[derive(Debug, Clone)]
pub struct CooMatrix {
    n: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl CooMatrix {
    /// One unit entry per `(row, col)` pair in an `n × n` matrix.
    ///
    /// Fails with [`GraphError::IndexOutOfRange`] on negative ids or ids `>= n`.
    pub fn from_pairs(n: usize, pairs: &[(i64, i64)]) -> Result<Self> {
        let mut rows = Vec::with_capacity(pairs.len());
        let mut cols = Vec::with_capacity(pairs.len());
        for &(r, c) in pairs {
            if r < 0 || c < 0 || r as usize >= n || c as usize >= n {
                return Err(GraphError::IndexOutOfRange { row: r, col: c, n });
            }
            rows.push(r as usize);
            cols.push(c as usize);
        }
        let values = vec![1.0; rows.len()];
        Ok(Self { n, rows, cols, values })
    }

    /// Compress to CSR: duplicates summed, columns sorted within each row.
    pub fn to_csr(&self) -> CsrMatrix {
        let mut per_row: Vec<Vec<(usize, f64)>> = vec![Vec::new(); self.n];
        for ((&r, &c), &v) in self.rows.iter().zip(&self.cols).zip(&self.values) {
            per_row[r].push((c, v));
        }
        CsrMatrix::from_rows(self.n, per_row)
    }
}

/// Square CSR matrix. Row `i` spans `col_idx[offsets[i]..offsets[i + 1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    n: usize,
    offsets: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Build from unsorted per-row entries; duplicate columns are summed.
    fn from_rows(n: usize, per_row: Vec<Vec<(usize, f64)>>) -> Self {
        let mut offsets = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        offsets.push(0);

        for mut row in per_row {
            let row_start = col_idx.len();
            row.sort_unstable_by_key(|&(c, _)| c);
            for (c, v) in row {
                if col_idx.len() > row_start && col_idx.last() == Some(&c) {
                    if let Some(acc) = values.last_mut() {
                        *acc += v;
                    }
                } else {
                    col_idx.push(c);
                    values.push(v);
                }
            }
            offsets.push(col_idx.len());
        }

        Self { n, offsets, col_idx, values }
    }

    /// Stored entries (explicit zeros included).
    #[inline]
    pub fn nnz(&self) -> usize {
        self.col_idx.len()
    }

    /// `(column, value)` pairs of row `r`, columns ascending.
    pub fn row(&self, r: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.offsets[r]..self.offsets[r + 1];
        self.col_idx[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        let span = self.offsets[r]..self.offsets[r + 1];
        match self.col_idx[span.clone()].binary_search(&c) {
            Ok(pos) => self.values[span.start + pos],
            Err(_) => 0.0,
        }
    }

    pub fn transpose(&self) -> Self {
        let mut per_row: Vec<Vec<(usize, f64)>> = vec![Vec::new(); self.n];
        for r in 0..self.n {
            for (c, v) in self.row(r) {
                per_row[c].push((r, v));
            }
        }
        Self::from_rows(self.n, per_row)
    }

    /// Entrywise `max(A, Aᵀ)`: for every pair keep the stronger direction.
    ///
    /// Equivalent to `A + Aᵀ∘[Aᵀ > A] − A∘[Aᵀ > A]`.
    pub fn symmetrize(&self) -> Self {
        let t = self.transpose();
        let mut per_row: Vec<Vec<(usize, f64)>> = Vec::with_capacity(self.n);

        for r in 0..self.n {
            let mut merged: Vec<(usize, f64)> = Vec::new();
            let mut a = self.row(r).peekable();
            let mut b = t.row(r).peekable();
            loop {
                match (a.peek().copied(), b.peek().copied()) {
                    (Some((ca, va)), Some((cb, vb))) if ca == cb => {
                        merged.push((ca, if vb > va { vb } else { va }));
                        a.next();
                        b.next();
                    }
                    (Some((ca, va)), Some((cb, _))) if ca < cb => {
                        merged.push((ca, va.max(0.0)));
                        a.next();
                    }
                    (Some(_), Some((cb, vb))) => {
                        merged.push((cb, vb.max(0.0)));
                        b.next();
                    }
                    (Some((ca, va)), None) => {
                        merged.push((ca, va.max(0.0)));
                        a.next();
                    }
                    (None, Some((cb, vb))) => {
                        merged.push((cb, vb.max(0.0)));
                        b.next();
                    }
                    (None, None) => break,
                }
            }
            per_row.push(merged);
        }

        Self::from_rows(self.n, per_row)
    }

    /// Coordinates of non-zero entries in row-major order.
    pub fn nonzero(&self) -> (Vec<usize>, Vec<usize>) {
        let mut rows = Vec::with_capacity(self.nnz());
        let mut cols = Vec::with_capacity(self.nnz());
        for r in 0..self.n {
            for (c, v) in self.row(r) {
                if v != 0.0 {
                    rows.push(r);
                    cols.push(c);
                }
            }
        }
        (rows, cols)
    }

    pub fn is_symmetric(&self) -> bool {
        self.transpose() == *self
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::<f64>::zeros((self.n, self.n));
        for r in 0..self.n {
            for (c, v) in self.row(r) {
                dense[[r, c]] = v;
            }
        }
        dense
    }
}

//! Dense matrices in row-major order.
//!
//! The matrices met here are small (Hankel systems of half the sample
//! length, companion matrices of the recurrence degree) but carry exact
//! rational entries whose size grows quickly, so everything is plain
//! schoolbook arithmetic over a `Ring`/`Field`.

use std::ops::{Index, IndexMut};

use cfinite_rings::traits::{Field, Ring};

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<R: Ring> DenseMatrix<R> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![R::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a list of rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<R>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<R> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols, "ragged rows");
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates the n x n identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Assembles a matrix from a grid of blocks.
    ///
    /// Every block in a block row must have the same number of rows, and
    /// every block row must add up to the same number of columns. Returns
    /// `None` when the shapes do not line up.
    #[must_use]
    pub fn block(blocks: &[Vec<&Self>]) -> Option<Self> {
        let mut rows: Vec<Vec<R>> = Vec::new();
        let mut width = None;

        for block_row in blocks {
            let height = block_row.first().map_or(0, |b| b.num_rows);
            if block_row.iter().any(|b| b.num_rows != height) {
                return None;
            }

            let row_width: usize = block_row.iter().map(|b| b.num_cols).sum();
            if *width.get_or_insert(row_width) != row_width {
                return None;
            }

            for i in 0..height {
                let mut row = Vec::with_capacity(row_width);
                for b in block_row {
                    row.extend_from_slice(b.row(i));
                }
                rows.push(row);
            }
        }

        let num_cols = width.unwrap_or(0);
        let num_rows = rows.len();
        Some(Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&R> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns the rows as owned vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<R>> {
        (0..self.num_rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Panics
    ///
    /// Panics if `x.len()` differs from the number of columns.
    #[must_use]
    pub fn mv(&self, x: &[R]) -> Vec<R> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(x.iter())
                    .fold(R::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect()
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);

        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for k in 0..self.num_cols {
                let a = &self[(i, k)];
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.num_cols {
                    result[(i, j)] = result[(i, j)].clone() + a.clone() * other[(k, j)].clone();
                }
            }
        }
        result
    }

    /// Raises a square matrix to a non-negative power by repeated squaring.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    #[must_use]
    pub fn pow(&self, n: u64) -> Self {
        assert!(self.is_square(), "matrix power needs a square matrix");

        let mut result = Self::identity(self.num_rows);
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mm(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mm(&base);
            }
        }

        result
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: &R) {
        for k in 0..self.num_cols {
            let val = self[(source, k)].clone() * scale.clone();
            self[(target, k)] = self[(target, k)].clone() + val;
        }
    }

    /// Scales a row by a scalar.
    pub fn scale_row(&mut self, row: usize, scale: &R) {
        for k in 0..self.num_cols {
            self[(row, k)] = self[(row, k)].clone() * scale.clone();
        }
    }
}

impl<R: Field> DenseMatrix<R> {
    /// Gaussian elimination to row-echelon form with unit pivots.
    ///
    /// Returns the reduced matrix and its rank.
    #[must_use]
    pub fn row_echelon(&self) -> (Self, usize) {
        let mut m = self.clone();
        let mut pivot_row = 0;
        let mut pivot_col = 0;

        while pivot_row < m.num_rows && pivot_col < m.num_cols {
            let Some(found) = (pivot_row..m.num_rows).find(|&r| !m[(r, pivot_col)].is_zero())
            else {
                pivot_col += 1;
                continue;
            };

            m.swap_rows(pivot_row, found);

            let pivot_val = m[(pivot_row, pivot_col)].clone();
            if let Some(inv) = pivot_val.inv() {
                m.scale_row(pivot_row, &inv);
            }

            for row in pivot_row + 1..m.num_rows {
                if !m[(row, pivot_col)].is_zero() {
                    let factor = -m[(row, pivot_col)].clone();
                    m.add_scaled_row(row, pivot_row, &factor);
                }
            }

            pivot_row += 1;
            pivot_col += 1;
        }

        (m, pivot_row)
    }

    /// Reduced row echelon form using Gauss-Jordan elimination.
    ///
    /// Returns the reduced matrix and its rank.
    #[must_use]
    pub fn rref(&self) -> (Self, usize) {
        let (mut m, rank) = self.row_echelon();

        for pivot_row in (0..rank).rev() {
            let Some(pivot_col) = (0..m.num_cols).find(|&c| !m[(pivot_row, c)].is_zero()) else {
                continue;
            };

            for row in 0..pivot_row {
                if !m[(row, pivot_col)].is_zero() {
                    let factor = -m[(row, pivot_col)].clone();
                    m.add_scaled_row(row, pivot_row, &factor);
                }
            }
        }

        (m, rank)
    }

    /// Computes a basis of the right null space {v : A v = 0}.
    ///
    /// One vector per free column, with a 1 in that column.
    #[must_use]
    pub fn null_space(&self) -> Vec<Vec<R>> {
        let (rref, rank) = self.rref();

        let pivot_cols: Vec<usize> = (0..rank)
            .filter_map(|row| (0..self.num_cols).find(|&c| !rref[(row, c)].is_zero()))
            .collect();

        (0..self.num_cols)
            .filter(|col| !pivot_cols.contains(col))
            .map(|col| {
                let mut v = vec![R::zero(); self.num_cols];
                v[col] = R::one();
                for (pivot_row, &pivot_col) in pivot_cols.iter().enumerate() {
                    v[pivot_col] = -rref[(pivot_row, col)].clone();
                }
                v
            })
            .collect()
    }

    /// Computes the echelonized basis of the right null space.
    ///
    /// The basis vectors are the non-zero rows of the reduced row echelon
    /// form of any kernel basis, so the result does not depend on how the
    /// kernel was found. An empty vector means the kernel is trivial.
    #[must_use]
    pub fn kernel_echelon(&self) -> Vec<Vec<R>> {
        let basis = self.null_space();
        if basis.is_empty() {
            return basis;
        }

        let (reduced, rank) = Self::from_rows(basis).rref();
        (0..rank).map(|i| reduced.row(i).to_vec()).collect()
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

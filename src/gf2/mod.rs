// src/gf2/mod.rs

//! Dense linear algebra over GF(2).
//!
//! Entries are stored as `bool`, so every value is already reduced modulo 2
//! and addition is XOR.
//!
//! # Pivot policy
//!
//! [`rref`] and [`rref_with_companion`] share one deterministic tie-break:
//! columns are scanned left to right, and for each column the pivot is the
//! first row at or below the current pivot row that holds a 1. That row is
//! swapped into place and added to every other row with a 1 in the column.
//! Downstream stages depend on this rule to decide which qubits are pivots.

use crate::core::{MAX_REGISTER_WIDTH, StabError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A rectangular matrix over GF(2), stored row-major.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryMatrix {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl BinaryMatrix {
    /// The all-zero `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![false; rows * cols] }
    }

    /// The `n × n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, true);
        }
        m
    }

    /// Builds a matrix from integer rows, reducing every entry modulo 2.
    ///
    /// All rows must have the same length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, StabError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(StabError::DimensionMismatch {
                    message: format!("row {} has {} entries, expected {}", index, row.len(), cols),
                });
            }
            data.extend(row.iter().map(|v| v % 2 == 1));
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    /// Builds a matrix with `cols` columns from boolean rows.
    ///
    /// Rows shorter than `cols` are zero-padded and longer rows truncated;
    /// callers are expected to pass rows of the right length.
    pub(crate) fn from_bool_rows<I>(cols: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<bool>>,
    {
        let mut data = Vec::new();
        let mut count = 0;
        for mut row in rows {
            row.resize(cols, false);
            data.extend(row);
            count += 1;
        }
        Self { rows: count, cols, data }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the matrix has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Entry at `(row, col)`. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of {:?}", self.shape());
        self.data[row * self.cols + col]
    }

    /// Sets the entry at `(row, col)`. Panics when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of {:?}", self.shape());
        self.data[row * self.cols + col] = value;
    }

    /// Borrows one row.
    pub fn row(&self, row: usize) -> &[bool] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Copies one column.
    pub fn column(&self, col: usize) -> Vec<bool> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    /// Swaps two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    /// Adds row `src` into row `dst` (XOR).
    pub fn add_row(&mut self, src: usize, dst: usize) {
        for c in 0..self.cols {
            if self.data[src * self.cols + c] {
                self.data[dst * self.cols + c] ^= true;
            }
        }
    }

    /// Copies the block at `rows × cols`.
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let mut out = Self::zeros(rows.len(), cols.len());
        for (i, r) in rows.clone().enumerate() {
            for (j, c) in cols.clone().enumerate() {
                out.set(i, j, self.get(r, c));
            }
        }
        out
    }

    /// Copies the listed rows, keeping only the listed columns, in the given order.
    pub fn select(&self, rows: Range<usize>, cols: &[usize]) -> Self {
        let mut out = Self::zeros(rows.len(), cols.len());
        for (i, r) in rows.enumerate() {
            for (j, c) in cols.iter().enumerate() {
                out.set(i, j, self.get(r, *c));
            }
        }
        out
    }

    /// Horizontal concatenation `[self | other]`.
    pub fn hstack(&self, other: &BinaryMatrix) -> Result<Self, StabError> {
        if self.rows != other.rows {
            return Err(StabError::DimensionMismatch {
                message: format!("cannot stack {} rows beside {} rows", self.rows, other.rows),
            });
        }
        Ok(self.concat(other))
    }

    /// `[self | other]` for operands already known to share a row count.
    pub(crate) fn concat(&self, other: &BinaryMatrix) -> Self {
        let mut out = Self::zeros(self.rows, self.cols + other.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(r, c, self.get(r, c));
            }
            for c in 0..other.cols {
                out.set(r, self.cols + c, other.get(r, c));
            }
        }
        out
    }

    /// Splits `[left | right]` at column `at`.
    pub fn split_columns(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.cols);
        (self.submatrix(0..self.rows, 0..at), self.submatrix(0..self.rows, at..self.cols))
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c));
            }
        }
        out
    }

    /// Matrix product mod 2.
    pub fn mul(&self, other: &BinaryMatrix) -> Result<Self, StabError> {
        if self.cols != other.rows {
            return Err(StabError::DimensionMismatch {
                message: format!("cannot multiply {:?} by {:?}", self.shape(), other.shape()),
            });
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                if self.get(r, k) {
                    for c in 0..other.cols {
                        if other.get(k, c) {
                            let v = out.get(r, c);
                            out.set(r, c, !v);
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    /// Entry-wise sum mod 2.
    pub fn add(&self, other: &BinaryMatrix) -> Result<Self, StabError> {
        if self.shape() != other.shape() {
            return Err(StabError::DimensionMismatch {
                message: format!("cannot add {:?} to {:?}", self.shape(), other.shape()),
            });
        }
        let data = self.data.iter().zip(&other.data).map(|(a, b)| a ^ b).collect();
        Ok(Self { rows: self.rows, cols: self.cols, data })
    }

    /// True when every entry is 0.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| !v)
    }

    /// True for a square identity matrix (the empty matrix counts).
    pub fn is_identity(&self) -> bool {
        self.rows == self.cols && (0..self.rows).all(|r| (0..self.cols).all(|c| self.get(r, c) == (r == c)))
    }
}

impl fmt::Debug for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryMatrix({}x{})", self.rows, self.cols)?;
        for r in 0..self.rows {
            write!(f, "\n  ")?;
            for v in self.row(r) {
                write!(f, "{}", if *v { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for v in self.row(r) {
                write!(f, "{}", if *v { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

/// Outcome of a companion-tracked row reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReduction {
    /// Reduced row-echelon form of the primary matrix.
    pub matrix: BinaryMatrix,
    /// Companion after the same row operations.
    pub companion: BinaryMatrix,
    /// Pivot column of each nonzero row, in row order.
    pub pivots: Vec<usize>,
}

impl RowReduction {
    /// Rank of the primary matrix.
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }
}

/// Rank of `m` over GF(2).
pub fn rank(m: &BinaryMatrix) -> usize {
    rref(m).1.len()
}

/// Reduced row-echelon form of `m` and its pivot columns.
///
/// Empty matrices come back unchanged with no pivots.
pub fn rref(m: &BinaryMatrix) -> (BinaryMatrix, Vec<usize>) {
    let mut matrix = m.clone();
    let mut companion = BinaryMatrix::zeros(m.rows(), 0);
    let pivots = reduce_in_place(&mut matrix, &mut companion);
    (matrix, pivots)
}

/// Row-reduces `m` and replays every swap and row addition on `companion`.
///
/// The companion must have the same number of rows as `m`; its column count is free.
pub fn rref_with_companion(m: &BinaryMatrix, companion: &BinaryMatrix) -> Result<RowReduction, StabError> {
    if m.rows() != companion.rows() {
        return Err(StabError::DimensionMismatch {
            message: format!("companion has {} rows but the matrix has {}", companion.rows(), m.rows()),
        });
    }
    Ok(reduce_pair(m, companion))
}

/// [`rref_with_companion`] for operands already known to share a row count.
pub(crate) fn reduce_pair(m: &BinaryMatrix, companion: &BinaryMatrix) -> RowReduction {
    let mut matrix = m.clone();
    let mut companion = companion.clone();
    let pivots = reduce_in_place(&mut matrix, &mut companion);
    RowReduction { matrix, companion, pivots }
}

fn reduce_in_place(matrix: &mut BinaryMatrix, companion: &mut BinaryMatrix) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut pivot_row = 0;
    for col in 0..matrix.cols() {
        if pivot_row == matrix.rows() {
            break;
        }
        let Some(found) = (pivot_row..matrix.rows()).find(|&r| matrix.get(r, col)) else {
            continue;
        };
        matrix.swap_rows(found, pivot_row);
        companion.swap_rows(found, pivot_row);
        for r in 0..matrix.rows() {
            if r != pivot_row && matrix.get(r, col) {
                matrix.add_row(pivot_row, r);
                companion.add_row(pivot_row, r);
            }
        }
        pivots.push(col);
        pivot_row += 1;
    }
    pivots
}

/// Reads a bit column as a register value: entry `t` has weight `2^t`.
///
/// # Errors
/// * `DimensionMismatch` for more than 64 bits, which a `u64` cannot hold.
pub fn bits_to_value(bits: &[bool]) -> Result<u64, StabError> {
    if bits.len() > MAX_REGISTER_WIDTH {
        return Err(StabError::DimensionMismatch {
            message: format!("{} bits do not fit in a {}-bit register value", bits.len(), MAX_REGISTER_WIDTH),
        });
    }
    Ok(bits.iter().enumerate().filter(|(_, b)| **b).fold(0u64, |acc, (t, _)| acc | (1u64 << t)))
}

// src/standard_form/mod.rs

//! Gottesman standard form of a stabilizer generator matrix.
//!
//! The reduction runs in two stages. Stage one row-reduces the X-part and
//! carries the Z-part along. This exposes the rank `r` and one pivot qubit
//! per X-type row. Stage two takes the remaining `n - k - r` rows, whose
//! X-part is now zero, and row-reduces their Z-part over the qubits that are
//! not stage-one pivots. Row signs are tracked through both stages by
//! recording which input generators were multiplied into each row.
//!
//! In Gottesman's column layout the stage-one pivots come first, then the
//! stage-two pivots, then the `k` remaining qubits. Blocks are kept in
//! physical column order, and [`StandardForm::qubit_order`] gives that layout
//! as a permutation.

use crate::core::{GeneratorSet, PauliString, PauliType};
use crate::gf2::{BinaryMatrix, reduce_pair};
use log::{debug, warn};
use serde::Serialize;

/// Canonical, read-only description of a stabilizer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardForm {
    num_qubits: usize,
    num_logical: usize,
    x_block: BinaryMatrix,
    z_block: BinaryMatrix,
    rank: usize,
    x_pivots: Vec<usize>,
    z_pivots: Vec<usize>,
    negative: Vec<bool>,
}

/// Reduces a generator set to standard form.
///
/// Commutation of the generators is not checked here. A non-commuting set
/// still yields a well-typed result, but the stage-two block may fall short
/// of full rank and downstream circuits will not implement a valid code.
pub fn standardize(generators: &GeneratorSet) -> StandardForm {
    let n = generators.num_qubits();
    let k = generators.num_logical();
    let m = generators.len();

    // Stage 1: reduce X, carrying [Z | tracker].
    let tracker = BinaryMatrix::identity(m);
    let carried = generators.z_matrix().concat(&tracker);
    let stage_one = reduce_pair(&generators.x_matrix(), &carried);
    let rank = stage_one.rank();
    let x_pivots = stage_one.pivots.clone();
    let x_block = stage_one.matrix;
    let (mut z_block, mut tracker) = stage_one.companion.split_columns(n);

    // Stage 2: reduce the trailing Z rows over the non-pivot qubits,
    // carrying the pivot columns and the tracker.
    let free_columns: Vec<usize> = (0..n).filter(|c| !x_pivots.contains(c)).collect();
    let trailing = z_block.select(rank..m, &free_columns);
    let trailing_carried = z_block.select(rank..m, &x_pivots).concat(&tracker.submatrix(rank..m, 0..m));
    let stage_two = reduce_pair(&trailing, &trailing_carried);
    let z_pivots: Vec<usize> = stage_two.pivots.iter().map(|&j| free_columns[j]).collect();
    if z_pivots.len() != m - rank {
        warn!(
            "stage-two block has rank {} but {} rows; generators are dependent or do not commute",
            z_pivots.len(),
            m - rank
        );
    }

    for i in 0..m - rank {
        let row = rank + i;
        for (j, &col) in free_columns.iter().enumerate() {
            z_block.set(row, col, stage_two.matrix.get(i, j));
        }
        for (j, &col) in x_pivots.iter().enumerate() {
            z_block.set(row, col, stage_two.companion.get(i, j));
        }
        for g in 0..m {
            tracker.set(row, g, stage_two.companion.get(i, x_pivots.len() + g));
        }
    }

    let negative = (0..m).map(|row| row_is_negative(generators, &tracker, row)).collect();

    debug!(
        "standardized [[{}, {}]] code: rank {}, x pivots {:?}, z pivots {:?}",
        n, k, rank, x_pivots, z_pivots
    );

    StandardForm { num_qubits: n, num_logical: k, x_block, z_block, rank, x_pivots, z_pivots, negative }
}

/// Multiplies the input generators recorded in `tracker` row `row` and reads off the sign.
fn row_is_negative(generators: &GeneratorSet, tracker: &BinaryMatrix, row: usize) -> bool {
    let mut product = PauliString::identity(generators.num_qubits());
    for (g, generator) in generators.generators().iter().enumerate() {
        if tracker.get(row, g) {
            product = product.product(generator);
        }
    }
    if !product.is_hermitian() {
        warn!("standardized row {} is not Hermitian ({}); input generators do not commute", row, product);
        return false;
    }
    product.is_negative()
}

impl StandardForm {
    /// Physical qubit count `n`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Logical qubit count `k`.
    pub fn num_logical(&self) -> usize {
        self.num_logical
    }

    /// Number of stabilizer rows, `n - k`.
    pub fn num_rows(&self) -> usize {
        self.num_qubits - self.num_logical
    }

    /// Stabilizer rank `r`, the rank of the X-part.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The reduced X-block, `(n - k) × n`.
    pub fn x_block(&self) -> &BinaryMatrix {
        &self.x_block
    }

    /// The reduced Z-block, `(n - k) × n`.
    pub fn z_block(&self) -> &BinaryMatrix {
        &self.z_block
    }

    /// Stage-one pivot qubit of each of the first `r` rows.
    pub fn x_pivots(&self) -> &[usize] {
        &self.x_pivots
    }

    /// Stage-two pivot qubit of each trailing row.
    pub fn z_pivots(&self) -> &[usize] {
        &self.z_pivots
    }

    /// Both pivot lists, stage one first.
    pub fn pivot_lists(&self) -> [&[usize]; 2] {
        [&self.x_pivots, &self.z_pivots]
    }

    /// True when standardized row `row` carries a `-1` sign.
    pub fn is_negative(&self, row: usize) -> bool {
        self.negative[row]
    }

    /// The `(n - k) × 2n` matrix `[X | Z]`.
    pub fn generator_matrix(&self) -> BinaryMatrix {
        self.x_block.concat(&self.z_block)
    }

    /// Row range used by syndrome extraction of the given type:
    /// `0..r` for X, `r..n-k` for Z.
    pub fn rows_of_type(&self, pauli_type: PauliType) -> std::ops::Range<usize> {
        match pauli_type {
            PauliType::X => 0..self.rank,
            PauliType::Z => self.rank..self.num_rows(),
        }
    }

    /// Standardized row `row` as a signed Pauli operator.
    pub fn stabilizer(&self, row: usize) -> PauliString {
        let pauli = PauliString::hermitian(self.x_block.row(row).to_vec(), self.z_block.row(row).to_vec());
        if self.negative[row] { pauli.negated() } else { pauli }
    }

    /// All standardized rows as signed Pauli operators.
    pub fn stabilizers(&self) -> Vec<PauliString> {
        (0..self.num_rows()).map(|row| self.stabilizer(row)).collect()
    }

    /// Gottesman column layout: stage-one pivots, stage-two pivots, then the
    /// remaining qubits in ascending order. Entry `c` is the physical qubit
    /// placed at canonical column `c`.
    pub fn qubit_order(&self) -> Vec<usize> {
        let mut order = self.pivot_lists().concat();
        let logical: Vec<usize> = (0..self.num_qubits).filter(|q| !order.contains(q)).collect();
        order.extend(logical);
        order
    }
}

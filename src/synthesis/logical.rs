// src/synthesis/logical.rs

use crate::circuits::{CircuitSink, QuantumRegister};
use crate::core::{PauliString, PauliType, QubitId, StabError};
use crate::operations::Gate;
use crate::standard_form::StandardForm;
use serde::Serialize;

/// Physical support of one encoded Pauli operator.
///
/// A logical X can carry a Z component on the X-type pivot qubits, so the
/// two supports are stored separately. A qubit present in both carries Y.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalOperator {
    pub pauli_type: PauliType,
    pub index: usize,
    pub x_support: Vec<usize>,
    pub z_support: Vec<usize>,
}

impl LogicalOperator {
    /// Union of the X- and Z-supports, ascending.
    pub fn support(&self) -> Vec<usize> {
        let mut support: Vec<usize> = self.x_support.iter().chain(&self.z_support).copied().collect();
        support.sort_unstable();
        support.dedup();
        support
    }

    /// The operator as a positive Hermitian Pauli string on `num_qubits` qubits.
    pub fn to_pauli(&self, num_qubits: usize) -> Result<PauliString, StabError> {
        let mark = |support: &[usize]| -> Result<Vec<bool>, StabError> {
            let mut bits = vec![false; num_qubits];
            for &q in support {
                if q >= num_qubits {
                    return Err(StabError::QubitOutOfRange {
                        qubit: QubitId(q),
                        message: format!("logical operator on {} qubits", num_qubits),
                    });
                }
                bits[q] = true;
            }
            Ok(bits)
        };
        PauliString::new(mark(&self.x_support)?, mark(&self.z_support)?)
    }

    /// Appends X on the X-support and then Z on the Z-support of `data`.
    ///
    /// Where the supports overlap the product is Y up to a global phase.
    pub fn apply<S: CircuitSink>(&self, data: &QuantumRegister, sink: &mut S) -> Result<(), StabError> {
        for &q in &self.x_support {
            sink.apply_gate(Gate::X(data.qubit(q)))?;
        }
        for &q in &self.z_support {
            sink.apply_gate(Gate::Z(data.qubit(q)))?;
        }
        Ok(())
    }
}

/// Derives logical operator `index` of the given type.
///
/// The blocks are read in Gottesman's column layout (see
/// [`StandardForm::qubit_order`]). With `m = n - k`:
///
/// - `X̄ = (0 | Eᵗ | I ; Eᵗ·C1ᵗ + C2ᵗ | 0 | 0)`
/// - `Z̄ = (0 | 0 | 0 ; A2ᵗ | 0 | I)`
///
/// where `C1`, `C2` are the Z-block of the first `r` rows over columns
/// `r..m` and `m..n`, `E` is the Z-block of the trailing rows over `m..n`,
/// and `A2` is the X-block of the first `r` rows over `m..n`.
pub fn logical_operator(form: &StandardForm, pauli_type: PauliType, index: usize) -> Result<LogicalOperator, StabError> {
    let n = form.num_qubits();
    let k = form.num_logical();
    if index >= k {
        return Err(StabError::InvalidOperation {
            message: format!("logical index {} out of range for a code with k = {}", index, k),
        });
    }
    let r = form.rank();
    let m = n - k;
    let order = form.qubit_order();
    let x_at = |row: usize, col: usize| form.x_block().get(row, order[col]);
    let z_at = |row: usize, col: usize| form.z_block().get(row, order[col]);
    let logical_col = m + index;

    let mut u = vec![false; n];
    let mut v = vec![false; n];
    match pauli_type {
        PauliType::X => {
            u[logical_col] = true;
            for l in 0..m - r {
                u[r + l] = z_at(r + l, logical_col);
            }
            for (i, vi) in v.iter_mut().enumerate().take(r) {
                let mut bit = z_at(i, logical_col);
                for l in 0..m - r {
                    bit ^= z_at(r + l, logical_col) && z_at(i, r + l);
                }
                *vi = bit;
            }
        }
        PauliType::Z => {
            v[logical_col] = true;
            for (i, vi) in v.iter_mut().enumerate().take(r) {
                *vi = x_at(i, logical_col);
            }
        }
    }

    let to_physical = |bits: &[bool]| {
        let mut support: Vec<usize> = bits.iter().enumerate().filter(|(_, b)| **b).map(|(c, _)| order[c]).collect();
        support.sort_unstable();
        support
    };
    Ok(LogicalOperator { pauli_type, index, x_support: to_physical(&u), z_support: to_physical(&v) })
}

/// All `(X̄ⱼ, Z̄ⱼ)` pairs for `j` in `0..k`.
pub fn logical_operators(form: &StandardForm) -> Result<Vec<(LogicalOperator, LogicalOperator)>, StabError> {
    (0..form.num_logical())
        .map(|j| Ok((logical_operator(form, PauliType::X, j)?, logical_operator(form, PauliType::Z, j)?)))
        .collect()
}

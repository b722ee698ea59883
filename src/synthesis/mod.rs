// src/synthesis/mod.rs

//! Circuit synthesis from a [`StandardForm`](crate::standard_form::StandardForm).
//!
//! - [`encoder`] prepares the logical `|0...0>` state.
//! - [`syndrome`] measures the stabilizer groups through ancillas and resets them.
//! - [`logical`] derives the encoded X and Z operators.

pub mod encoder;
pub mod logical;
pub mod syndrome;

pub use encoder::{encoder_circuit, synthesize_encoder};
pub use logical::{LogicalOperator, logical_operator, logical_operators};
pub use syndrome::{expected_syndrome, extract_syndromes, syndrome_rows};

use crate::circuits::{CircuitSink, QuantumRegister};
use crate::core::{PauliString, QubitId, StabError};
use crate::operations::Gate;

/// Emits the controlled version of `pauli`, controlled on `control`.
///
/// `pauli` is read as `i^e X^x Z^z` on the qubits of `data`. The phase
/// `i^e` becomes `S^e` on the control, followed by the CZs and then the CXs
/// (Z acts first). Data position `skip`, if any, is left out of the
/// two-qubit gates; the encoder uses it for the pivot, which is also the control.
pub(crate) fn controlled_pauli<S: CircuitSink>(
    control: QubitId,
    pauli: &PauliString,
    data: &QuantumRegister,
    skip: Option<usize>,
    sink: &mut S,
) -> Result<(), StabError> {
    if let Some(phase) = Gate::phase_power(pauli.phase_exponent(), control) {
        sink.apply_gate(phase)?;
    }
    for (q, _) in pauli.z_bits().iter().enumerate().filter(|(q, z)| **z && Some(*q) != skip) {
        sink.apply_gate(Gate::CZ { control, target: data.qubit(q) })?;
    }
    for (q, _) in pauli.x_bits().iter().enumerate().filter(|(q, x)| **x && Some(*q) != skip) {
        sink.apply_gate(Gate::CX { control, target: data.qubit(q) })?;
    }
    Ok(())
}

/// Fails unless `register` holds at least `needed` entries.
pub(crate) fn require_len(what: &str, have: usize, needed: usize) -> Result<(), StabError> {
    if have < needed {
        return Err(StabError::DimensionMismatch {
            message: format!("{} holds {} entries but {} are needed", what, have, needed),
        });
    }
    Ok(())
}

// src/synthesis/syndrome.rs

use super::{controlled_pauli, require_len};
use crate::circuits::{CircuitSink, ClassicalRegister, QuantumRegister};
use crate::core::{PauliString, PauliType, StabError};
use crate::gf2::bits_to_value;
use crate::operations::Gate;
use crate::standard_form::StandardForm;
use log::debug;

/// Signed stabilizers measured by the `pauli_type` group, in ancilla order.
///
/// The X group is rows `0..r` of the standard form. The Z group is rows
/// `r..n-k`, read with their X-part dropped (it is zero in standard form).
pub fn syndrome_rows(form: &StandardForm, pauli_type: PauliType) -> Vec<PauliString> {
    form.rows_of_type(pauli_type)
        .map(|row| {
            let stabilizer = form.stabilizer(row);
            match pauli_type {
                PauliType::X => stabilizer,
                PauliType::Z => {
                    let z_only = PauliString::hermitian(vec![false; form.num_qubits()], stabilizer.z_bits().to_vec());
                    if form.is_negative(row) { z_only.negated() } else { z_only }
                }
            }
        })
        .collect()
}

/// Measures every stabilizer of the `pauli_type` group through its own ancilla.
///
/// Ancilla `t` and classical bit `t` serve row `t` of the group. Each row is
/// measured with `H, controlled-row, H, measure`, then uncomputed with the
/// same `H, controlled-row, H` so the ancilla ends in `|0>` whatever the outcome.
pub fn extract_syndromes<S: CircuitSink>(
    form: &StandardForm,
    data: &QuantumRegister,
    ancillas: &QuantumRegister,
    clbits: &ClassicalRegister,
    pauli_type: PauliType,
    sink: &mut S,
) -> Result<(), StabError> {
    let rows = syndrome_rows(form, pauli_type);
    require_len("data register", data.len(), form.num_qubits())?;
    require_len("ancilla register", ancillas.len(), rows.len())?;
    require_len("classical register", clbits.len(), rows.len())?;

    for (t, row) in rows.iter().enumerate() {
        let ancilla = ancillas.qubit(t);
        sink.apply_gate(Gate::H(ancilla))?;
        controlled_pauli(ancilla, row, data, None, sink)?;
        sink.apply_gate(Gate::H(ancilla))?;
        sink.measure(ancilla, clbits.clbit(t))?;
        sink.apply_gate(Gate::H(ancilla))?;
        controlled_pauli(ancilla, row, data, None, sink)?;
        sink.apply_gate(Gate::H(ancilla))?;
    }
    debug!("{}-type syndrome extraction over {} rows", pauli_type, rows.len());
    Ok(())
}

/// Register value the `pauli_type` extraction reports for `error`.
///
/// Bit `t` is set when `error` anticommutes with row `t` of the group.
///
/// # Errors
/// * `DimensionMismatch` when the group has more than 64 rows.
pub fn expected_syndrome(form: &StandardForm, pauli_type: PauliType, error: &PauliString) -> Result<u64, StabError> {
    let flips: Vec<bool> = syndrome_rows(form, pauli_type).iter().map(|row| !row.commutes_with(error)).collect();
    bits_to_value(&flips)
}

// src/synthesis/encoder.rs

use super::controlled_pauli;
use crate::circuits::{Circuit, CircuitSink, QuantumRegister};
use crate::core::StabError;
use crate::operations::Gate;
use crate::standard_form::StandardForm;
use log::debug;

/// Appends the logical `|0...0>` preparation for `form` onto the fresh qubits of `data`.
///
/// Negative Z-type rows are fixed first by flipping their stage-two pivot.
/// Each X-type row then puts its pivot in `|+>` and applies the rest of the
/// row controlled on it. For CSS codes with positive rows this is a single H
/// per pivot followed by CXs to the non-pivot 1s of the row.
///
/// `data` must hold exactly `n` qubits, all in `|0>`.
pub fn synthesize_encoder<S: CircuitSink>(
    form: &StandardForm,
    data: &QuantumRegister,
    sink: &mut S,
) -> Result<(), StabError> {
    if data.len() != form.num_qubits() {
        return Err(StabError::DimensionMismatch {
            message: format!(
                "encoder needs {} data qubits, register '{}' has {}",
                form.num_qubits(),
                data.name(),
                data.len()
            ),
        });
    }
    let rank = form.rank();
    for (j, row) in (rank..form.num_rows()).enumerate() {
        if form.is_negative(row) {
            if let Some(&pivot) = form.z_pivots().get(j) {
                sink.apply_gate(Gate::X(data.qubit(pivot)))?;
            }
        }
    }

    for (row, &pivot) in form.x_pivots().iter().enumerate() {
        let control = data.qubit(pivot);
        sink.apply_gate(Gate::H(control))?;
        controlled_pauli(control, &form.stabilizer(row), data, Some(pivot), sink)?;
    }

    debug!("encoder emitted for [[{}, {}]] code", form.num_qubits(), form.num_logical());
    Ok(())
}

/// Standalone encoder on a register named `physical`.
pub fn encoder_circuit(form: &StandardForm) -> Result<Circuit, StabError> {
    let mut circuit = Circuit::new();
    let data = circuit.add_quantum_register("physical", form.num_qubits());
    synthesize_encoder(form, &data, &mut circuit)?;
    Ok(circuit)
}

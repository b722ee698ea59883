// src/validation/mod.rs

//! Checks on simulated states: normalization and stabilizer eigenvalues.

use crate::core::{PauliString, QubitId, StabError, StateVector};
use num_complex::Complex;
use num_traits::Zero;

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
const DEFAULT_EIGENVALUE_TOLERANCE: f64 = 1e-9;

/// Checks that the squared amplitudes sum to 1.
///
/// # Errors
/// * `Unstabilized` if the norm deviates by more than `tolerance` (default `1e-9`).
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), StabError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.amplitudes().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(StabError::Unstabilized {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Expectation value `<ψ|P|ψ>` of `pauli`, whose qubit `i` acts on `qubits[i]`.
///
/// The phase of `pauli` is included, so `-ZZ` reads `-1` wherever `ZZ`
/// reads `+1`. Only the real part is returned; it is the whole value for
/// Hermitian operators.
pub fn pauli_expectation(state: &StateVector, pauli: &PauliString, qubits: &[QubitId]) -> Result<f64, StabError> {
    if qubits.len() != pauli.num_qubits() {
        return Err(StabError::DimensionMismatch {
            message: format!("{}-qubit Pauli placed on {} qubits", pauli.num_qubits(), qubits.len()),
        });
    }
    let mut x_mask = 0usize;
    let mut z_mask = 0usize;
    for (i, qubit) in qubits.iter().enumerate() {
        if qubit.0 >= state.num_qubits() {
            return Err(StabError::QubitOutOfRange {
                qubit: *qubit,
                message: format!("state has {} qubits", state.num_qubits()),
            });
        }
        let mask = state.qubit_mask(qubit.0);
        if pauli.x_bits()[i] {
            x_mask |= mask;
        }
        if pauli.z_bits()[i] {
            z_mask |= mask;
        }
    }
    let phase = match pauli.phase_exponent() {
        0 => Complex::new(1.0, 0.0),
        1 => Complex::i(),
        2 => Complex::new(-1.0, 0.0),
        _ => -Complex::i(),
    };
    // P|b> = i^e (-1)^(z·b) |b ⊕ x>
    let amplitudes = state.amplitudes();
    let mut total: Complex<f64> = Complex::zero();
    for (b, amp) in amplitudes.iter().enumerate() {
        if amp.norm_sqr() == 0.0 {
            continue;
        }
        let sign = if (b & z_mask).count_ones() % 2 == 1 { -1.0 } else { 1.0 };
        total += amplitudes[b ^ x_mask].conj() * amp * sign;
    }
    Ok((phase * total).re)
}

/// Checks that `state` is a `+1` eigenstate of every operator in `stabilizers`.
///
/// # Errors
/// * `Unstabilized` naming the first operator whose expectation is not within `tolerance` of 1.
pub fn check_stabilized(
    state: &StateVector,
    stabilizers: &[PauliString],
    qubits: &[QubitId],
    tolerance: Option<f64>,
) -> Result<(), StabError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_EIGENVALUE_TOLERANCE);
    for (index, stabilizer) in stabilizers.iter().enumerate() {
        let expectation = pauli_expectation(state, stabilizer, qubits)?;
        if (expectation - 1.0).abs() > effective_tolerance {
            return Err(StabError::Unstabilized {
                message: format!("<{}> = {:.6} for stabilizer {}", stabilizer, expectation, index),
            });
        }
    }
    Ok(())
}

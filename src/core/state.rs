// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Dense amplitude vector of an `n`-qubit register.
///
/// Basis index bits follow the circuit's wire order: qubit 0 is the most
/// significant bit, so qubit `q` lives at bit position `n - 1 - q`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// The computational basis state `|0...0>` on `num_qubits` qubits.
    pub(crate) fn zero_state(num_qubits: usize, dim: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); dim];
        if dim > 0 {
            amplitudes[0] = Complex::new(1.0, 0.0);
        }
        Self { amplitudes, num_qubits }
    }

    /// Wraps an explicit amplitude vector. The length must be `2^num_qubits`.
    pub(crate) fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes, num_qubits }
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of qubits described by the vector.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Bit mask of `qubit` inside a basis index.
    pub fn qubit_mask(&self, qubit: usize) -> usize {
        1usize << (self.num_qubits - 1 - qubit)
    }

    /// Probability of reading `1` on `qubit`.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = self.qubit_mask(qubit);
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(index, _)| index & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        let mut first = true;
        for (index, amp) in self.amplitudes.iter().enumerate() {
            if amp.norm_sqr() < 1e-12 {
                continue;
            }
            write!(
                f,
                "{}{:.4}|{:0width$b}>",
                if first { "" } else { " + " },
                amp,
                index,
                width = self.num_qubits
            )?;
            first = false;
        }
        write!(f, "]")
    }
}

// src/simulation/engine.rs
use crate::circuits::ClassicalRegister;
use crate::core::{AMPLITUDE_TOLERANCE, ClbitId, QubitId, StabError, StateVector};
use crate::gf2::bits_to_value;
use crate::operations::{Gate, Operation};
use log::trace;
use num_complex::Complex;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_1_SQRT_2;

type Matrix2 = [[Complex<f64>; 2]; 2];
type Matrix4 = [[Complex<f64>; 4]; 4];

/// Dense state-vector engine behind [`Simulator`](super::Simulator).
///
/// Holds the `2^n` amplitudes, the classical bit values written so far and
/// the RNG that decides measurement outcomes.
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
    clbits: Vec<bool>,
    rng: StdRng,
}

impl SimulationEngine {
    /// Starts in `|0...0>` with every classical bit cleared.
    pub(crate) fn init(num_qubits: usize, num_clbits: usize, seed: u64) -> Result<Self, StabError> {
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| StabError::SimulationError {
                message: format!("{} qubits overflow the state vector dimension", num_qubits),
            })?;
        Ok(Self {
            state: StateVector::zero_state(num_qubits, dim),
            num_qubits,
            clbits: vec![false; num_clbits],
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, amplitudes: Vec<Complex<f64>>) -> Result<(), StabError> {
        if amplitudes.len() != self.state.dim() {
            return Err(StabError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    amplitudes.len(),
                    self.state.dim()
                ),
            });
        }
        self.state = StateVector::from_amplitudes(self.num_qubits, amplitudes);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_parts(self) -> (StateVector, Vec<bool>) {
        (self.state, self.clbits)
    }

    /// Executes one logged operation.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), StabError> {
        match op {
            Operation::Gate(gate) => self.apply_gate(gate),
            Operation::Measure { qubit, clbit } => self.measure(*qubit, *clbit).map(|_| ()),
            Operation::Conditional { gate, register, value } => {
                let current = self.register_value(register)?;
                if current == *value {
                    trace!("condition {} == {} holds, applying {}", register.name(), value, gate);
                    self.apply_gate(gate)?;
                }
                Ok(())
            }
        }
    }

    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), StabError> {
        match *gate {
            Gate::CX { control, target } => {
                self.apply_controlled(control, target, &pauli_x_matrix())
            }
            Gate::CZ { control, target } => {
                self.apply_controlled(control, target, &pauli_z_matrix())
            }
            single => {
                let qubit = single.qubits()[0];
                let idx = self.check_qubit(qubit)?;
                self.apply_single_qubit_gate(idx, &single_qubit_matrix(&single))
            }
        }
    }

    /// Projective Z-basis measurement with renormalization.
    pub(crate) fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> Result<bool, StabError> {
        let idx = self.check_qubit(qubit)?;
        if clbit.0 >= self.clbits.len() {
            return Err(StabError::ClbitOutOfRange {
                clbit,
                message: format!("simulation has {} clbits", self.clbits.len()),
            });
        }
        let p_one = self.state.probability_of_one(idx);
        let sample: f64 = self.rng.gen_range(0.0..1.0);
        let mut outcome = sample < p_one;
        // Never collapse onto a branch with no weight.
        if outcome && p_one < AMPLITUDE_TOLERANCE {
            outcome = false;
        } else if !outcome && 1.0 - p_one < AMPLITUDE_TOLERANCE {
            outcome = true;
        }
        let p_outcome = if outcome { p_one } else { 1.0 - p_one };
        let norm = p_outcome.sqrt();
        if norm < AMPLITUDE_TOLERANCE {
            return Err(StabError::SimulationError {
                message: format!("state has zero norm while measuring {}", qubit),
            });
        }
        let mask = self.state.qubit_mask(idx);
        for (index, amp) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if (index & mask != 0) == outcome {
                *amp /= norm;
            } else {
                *amp = Complex::zero();
            }
        }
        self.clbits[clbit.0] = outcome;
        trace!("measured {} = {} (p1 = {:.4}) into {}", qubit, outcome as u8, p_one, clbit);
        Ok(outcome)
    }

    /// Integer value of `register`, bit `t` weighted `2^t`.
    pub(crate) fn register_value(&self, register: &ClassicalRegister) -> Result<u64, StabError> {
        let bits = register
            .clbits()
            .map(|clbit| {
                self.clbits.get(clbit.0).copied().ok_or_else(|| StabError::ClbitOutOfRange {
                    clbit,
                    message: format!("register '{}' extends past the simulated clbits", register.name()),
                })
            })
            .collect::<Result<Vec<bool>, StabError>>()?;
        bits_to_value(&bits)
    }

    fn check_qubit(&self, qubit: QubitId) -> Result<usize, StabError> {
        if qubit.0 >= self.num_qubits {
            return Err(StabError::QubitOutOfRange {
                qubit,
                message: format!("simulation has {} qubits", self.num_qubits),
            });
        }
        Ok(qubit.0)
    }

    /// Applies a 2x2 matrix to one qubit, in place.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &Matrix2) -> Result<(), StabError> {
        let mask = self.state.qubit_mask(target_idx);
        let amplitudes = self.state.amplitudes_mut();
        for i0 in 0..amplitudes.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Builds controlled-U from a 2x2 `u` and applies it to `(control, target)`.
    fn apply_controlled(&mut self, control: QubitId, target: QubitId, u: &Matrix2) -> Result<(), StabError> {
        let control_idx = self.check_qubit(control)?;
        let target_idx = self.check_qubit(target)?;
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::zero();
        // Basis order |control, target>: |00>, |01>, |10>, |11>.
        let controlled_u: Matrix4 = [
            [one, zero, zero, zero],
            [zero, one, zero, zero],
            [zero, zero, u[0][0], u[0][1]],
            [zero, zero, u[1][0], u[1][1]],
        ];
        self.apply_two_qubit_gate(control_idx, target_idx, &controlled_u)
    }

    /// Applies a 4x4 matrix over `|b1 b2>`, where `b1` is qubit `idx1` and `b2` is qubit `idx2`.
    fn apply_two_qubit_gate(&mut self, idx1: usize, idx2: usize, matrix: &Matrix4) -> Result<(), StabError> {
        if idx1 == idx2 {
            return Err(StabError::InvalidOperation {
                message: "Target indices for a two-qubit gate cannot be the same".to_string(),
            });
        }
        let mask1 = self.state.qubit_mask(idx1);
        let mask2 = self.state.qubit_mask(idx2);
        let amplitudes = self.state.amplitudes_mut();
        for base in 0..amplitudes.len() {
            if base & (mask1 | mask2) != 0 {
                continue;
            }
            let indices = [base, base | mask2, base | mask1, base | mask1 | mask2];
            let psi = indices.map(|i| amplitudes[i]);
            for (row, &index) in indices.iter().enumerate() {
                let mut acc = Complex::zero();
                for (col, amp) in psi.iter().enumerate() {
                    acc += matrix[row][col] * amp;
                }
                amplitudes[index] = acc;
            }
        }
        Ok(())
    }
}

fn pauli_x_matrix() -> Matrix2 {
    [[Complex::zero(), Complex::new(1.0, 0.0)], [Complex::new(1.0, 0.0), Complex::zero()]]
}

fn pauli_z_matrix() -> Matrix2 {
    [[Complex::new(1.0, 0.0), Complex::zero()], [Complex::zero(), Complex::new(-1.0, 0.0)]]
}

/// 2x2 unitary of a single-qubit gate.
fn single_qubit_matrix(gate: &Gate) -> Matrix2 {
    let one = Complex::new(1.0, 0.0);
    let zero = Complex::zero();
    let i = Complex::i();
    let h = Complex::new(FRAC_1_SQRT_2, 0.0);
    match gate {
        Gate::H(_) => [[h, h], [h, -h]],
        Gate::X(_) => pauli_x_matrix(),
        Gate::Y(_) => [[zero, -i], [i, zero]],
        Gate::Z(_) => pauli_z_matrix(),
        Gate::S(_) => [[one, zero], [zero, i]],
        Gate::Sdg(_) => [[one, zero], [zero, -i]],
        Gate::CX { .. } | Gate::CZ { .. } => [[one, zero], [zero, one]],
    }
}

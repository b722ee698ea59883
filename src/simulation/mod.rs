// src/simulation/mod.rs

//! Dense state-vector execution of a [`Circuit`].
//!
//! The simulator exists so encoded states, syndromes and corrections can be
//! checked end to end. It supports exactly the gate set of
//! [`Gate`](crate::operations::Gate), mid-circuit measurement and gates
//! conditioned on classical register values.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{DEFAULT_SIMULATOR_SEED, MAX_SIMULATED_QUBITS, StabError};
use engine::SimulationEngine;
use log::debug;

/// Runs circuits from `|0...0>` with all classical bits cleared.
///
/// Measurement outcomes come from a `StdRng` seeded per run, so the same
/// simulator and circuit always give the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    seed: u64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Simulator with the crate's fixed default seed.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SIMULATOR_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Executes `circuit` and returns its classical record and final state.
    ///
    /// # Errors
    /// * `SimulationError` if the circuit is wider than the dense limit.
    /// * Index errors for operations outside the circuit's registers.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult, StabError> {
        if circuit.num_qubits() > MAX_SIMULATED_QUBITS {
            return Err(StabError::SimulationError {
                message: format!(
                    "{} qubits exceed the dense simulation limit of {}",
                    circuit.num_qubits(),
                    MAX_SIMULATED_QUBITS
                ),
            });
        }
        debug!(
            "simulating {} operations on {} qubits, {} clbits",
            circuit.len(),
            circuit.num_qubits(),
            circuit.num_clbits()
        );
        let mut engine = SimulationEngine::init(circuit.num_qubits(), circuit.num_clbits(), self.seed)?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        let (final_state, clbits) = engine.into_parts();
        Ok(SimulationResult::new(clbits, final_state))
    }
}

#[cfg(test)]
mod tests {
    use super::engine::SimulationEngine;
    use super::*;
    use crate::core::{ClbitId, QubitId};
    use crate::operations::Gate;
    use num_complex::Complex;
    use num_traits::Zero;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    /// Asserts that two complex state vectors are approximately equal component-wise.
    fn assert_complex_vec_approx_equal(actual: &[Complex<f64>], expected: &[Complex<f64>], context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i,
                actual[i],
                expected[i],
                context
            );
        }
    }

    #[test]
    fn test_measure_basis_state_is_deterministic() -> Result<(), StabError> {
        let mut engine = SimulationEngine::init(2, 2, 7)?;
        // |10>: qubit 0 is the most significant bit.
        engine.set_state(vec![Complex::zero(), Complex::zero(), Complex::new(1.0, 0.0), Complex::zero()])?;
        assert!(engine.measure(QubitId(0), ClbitId(0))?);
        assert!(!engine.measure(QubitId(1), ClbitId(1))?);
        Ok(())
    }

    #[test]
    fn test_measurement_collapses_and_renormalizes() -> Result<(), StabError> {
        let mut engine = SimulationEngine::init(1, 1, 11)?;
        engine.set_state(vec![Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, FRAC_1_SQRT_2)])?;
        let outcome = engine.measure(QubitId(0), ClbitId(0))?;
        let expected = if outcome {
            [Complex::zero(), Complex::new(0.0, 1.0)]
        } else {
            [Complex::new(1.0, 0.0), Complex::zero()]
        };
        assert_complex_vec_approx_equal(engine.state().amplitudes(), &expected, "post-measurement state");
        Ok(())
    }

    #[test]
    fn test_cz_on_plus_plus() -> Result<(), StabError> {
        let mut engine = SimulationEngine::init(3, 0, 0)?;
        engine.apply_gate(&Gate::H(QubitId(1)))?;
        engine.apply_gate(&Gate::H(QubitId(2)))?;
        engine.apply_gate(&Gate::CZ { control: QubitId(1), target: QubitId(2) })?;
        // |0> ⊗ (|00> + |01> + |10> - |11>) / 2
        let half = Complex::new(0.5, 0.0);
        let mut expected = vec![Complex::zero(); 8];
        expected[0] = half;
        expected[1] = half;
        expected[2] = half;
        expected[3] = -half;
        assert_complex_vec_approx_equal(engine.state().amplitudes(), &expected, "CZ on |0++>");
        Ok(())
    }

    #[test]
    fn test_two_qubit_gate_with_spectator_between() -> Result<(), StabError> {
        let mut engine = SimulationEngine::init(3, 0, 0)?;
        engine.apply_gate(&Gate::X(QubitId(2)))?;
        engine.apply_gate(&Gate::CX { control: QubitId(2), target: QubitId(0) })?;
        // |001> -> |101>
        let mut expected = vec![Complex::zero(); 8];
        expected[0b101] = Complex::new(1.0, 0.0);
        assert_complex_vec_approx_equal(engine.state().amplitudes(), &expected, "CX across a spectator");
        Ok(())
    }

    #[test]
    fn test_same_seed_same_outcomes() -> Result<(), StabError> {
        let circuit = crate::circuits::CircuitBuilder::new()
            .qreg("q", 4)
            .creg("c", 4)
            .gate(Gate::H(QubitId(0)))
            .gate(Gate::H(QubitId(1)))
            .gate(Gate::H(QubitId(2)))
            .gate(Gate::H(QubitId(3)))
            .measure(0, 0)
            .measure(1, 1)
            .measure(2, 2)
            .measure(3, 3)
            .build()?;
        let a = Simulator::with_seed(42).run(&circuit)?;
        let b = Simulator::with_seed(42).run(&circuit)?;
        assert_eq!(a.clbits(), b.clbits());
        Ok(())
    }

    #[test]
    fn test_too_many_qubits_rejected() {
        let mut circuit = Circuit::new();
        circuit.add_quantum_register("q", MAX_SIMULATED_QUBITS + 1);
        assert!(matches!(Simulator::new().run(&circuit), Err(StabError::SimulationError { .. })));
    }
}

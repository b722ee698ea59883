// tests/simulation_tests.rs

// Import necessary types from the stabq crate
use stabq::{
    Circuit, CircuitBuilder, CircuitSink, ClbitId, Gate, Operation, PauliString, QubitId, StabError,
    check_normalization, pauli_expectation, simulation::Simulator,
};

// Helper function to create QubitId for tests
fn qid(id: usize) -> QubitId {
    QubitId(id)
}

fn pauli(label: &str) -> PauliString {
    PauliString::from_label(label).expect("valid label")
}

#[test]
fn test_empty_circuit() -> Result<(), StabError> {
    let circuit = Circuit::new();
    let result = Simulator::new().run(&circuit)?;
    assert!(result.clbits().is_empty(), "Empty circuit should yield no classical bits");
    assert_eq!(result.final_state().dim(), 1);
    Ok(())
}

#[test]
fn test_initial_state_measures_zero() -> Result<(), StabError> {
    let circuit = CircuitBuilder::new().qreg("q", 2).creg("c", 2).measure(0, 0).measure(1, 1).build()?;
    let result = Simulator::new().run(&circuit)?;
    assert_eq!(result.clbits(), &[false, false]);
    Ok(())
}

#[test]
fn test_pauli_flips() -> Result<(), StabError> {
    // X and Y flip, Z does not.
    let circuit = CircuitBuilder::new()
        .qreg("q", 3)
        .creg("c", 3)
        .gate(Gate::X(qid(0)))
        .gate(Gate::Y(qid(1)))
        .gate(Gate::Z(qid(2)))
        .measure(0, 0)
        .measure(1, 1)
        .measure(2, 2)
        .build()?;
    let result = Simulator::new().run(&circuit)?;
    assert_eq!(result.clbits(), &[true, true, false]);
    Ok(())
}

#[test]
fn test_bell_state_correlations() -> Result<(), StabError> {
    let circuit = CircuitBuilder::new()
        .qreg("q", 2)
        .creg("c", 2)
        .gate(Gate::H(qid(0)))
        .gate(Gate::CX { control: qid(0), target: qid(1) })
        .measure(0, 0)
        .measure(1, 1)
        .build()?;
    for seed in 0..16 {
        let result = Simulator::with_seed(seed).run(&circuit)?;
        assert_eq!(result.clbit(ClbitId(0)), result.clbit(ClbitId(1)), "seed {}", seed);
        check_normalization(result.final_state(), None)?;
    }
    Ok(())
}

#[test]
fn test_phase_gates() -> Result<(), StabError> {
    // S·S = Z, so H S S H |0> = |1>; S·Sdg = I.
    let circuit = CircuitBuilder::new()
        .qreg("q", 2)
        .creg("c", 2)
        .gate(Gate::H(qid(0)))
        .gate(Gate::S(qid(0)))
        .gate(Gate::S(qid(0)))
        .gate(Gate::H(qid(0)))
        .gate(Gate::H(qid(1)))
        .gate(Gate::S(qid(1)))
        .gate(Gate::Sdg(qid(1)))
        .gate(Gate::H(qid(1)))
        .measure(0, 0)
        .measure(1, 1)
        .build()?;
    let result = Simulator::new().run(&circuit)?;
    assert_eq!(result.clbits(), &[true, false]);
    Ok(())
}

#[test]
fn test_s_gate_maps_x_to_y() -> Result<(), StabError> {
    let circuit = CircuitBuilder::new().qreg("q", 1).gate(Gate::H(qid(0))).gate(Gate::S(qid(0))).build()?;
    let result = Simulator::new().run(&circuit)?;
    let y = pauli_expectation(result.final_state(), &pauli("Y"), &[qid(0)])?;
    assert!((y - 1.0).abs() < 1e-9, "<Y> = {}", y);
    Ok(())
}

#[test]
fn test_conditional_gate_fires_on_matching_value() -> Result<(), StabError> {
    let mut circuit = Circuit::new();
    let q = circuit.add_quantum_register("q", 3);
    let flags = circuit.add_classical_register("flags", 2);
    let out = circuit.add_classical_register("out", 2);
    // flags = 0b01 = 1
    circuit.apply_gate(Gate::X(q.qubit(0)))?;
    circuit.measure(q.qubit(0), flags.clbit(0))?;
    circuit.measure(q.qubit(1), flags.clbit(1))?;
    circuit.conditional_gate(Gate::X(q.qubit(2)), &flags, 1)?;
    circuit.conditional_gate(Gate::X(q.qubit(1)), &flags, 2)?;
    circuit.measure(q.qubit(1), out.clbit(0))?;
    circuit.measure(q.qubit(2), out.clbit(1))?;

    let result = Simulator::new().run(&circuit)?;
    assert_eq!(result.register_value(&flags)?, 1);
    assert_eq!(result.register_bits(&out), vec![false, true]);
    Ok(())
}

#[test]
fn test_inverse_undoes_circuit() -> Result<(), StabError> {
    let forward = CircuitBuilder::new()
        .qreg("q", 3)
        .gate(Gate::H(qid(0)))
        .gate(Gate::S(qid(0)))
        .gate(Gate::CZ { control: qid(0), target: qid(2) })
        .gate(Gate::CX { control: qid(0), target: qid(1) })
        .gate(Gate::Y(qid(2)))
        .build()?;
    let mut round_trip = forward.clone();
    let qubits: Vec<QubitId> = (0..3).map(qid).collect();
    round_trip.compose(&forward.inverse()?, &qubits)?;

    let result = Simulator::new().run(&round_trip)?;
    let amplitudes = result.final_state().amplitudes();
    assert!((amplitudes[0].norm_sqr() - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_out_of_range_operations_rejected() {
    let err = CircuitBuilder::new().qreg("q", 1).gate(Gate::X(qid(1))).build().unwrap_err();
    assert!(matches!(err, StabError::QubitOutOfRange { .. }));

    let err = CircuitBuilder::new()
        .qreg("q", 1)
        .add_op(Operation::Measure { qubit: qid(0), clbit: ClbitId(0) })
        .build()
        .unwrap_err();
    assert!(matches!(err, StabError::ClbitOutOfRange { .. }));
}

#[test]
fn test_ghz_expectations() -> Result<(), StabError> {
    let circuit = CircuitBuilder::new()
        .qreg("q", 3)
        .gate(Gate::H(qid(0)))
        .gate(Gate::CX { control: qid(0), target: qid(1) })
        .gate(Gate::CX { control: qid(1), target: qid(2) })
        .build()?;
    let result = Simulator::new().run(&circuit)?;
    let qubits = [qid(0), qid(1), qid(2)];
    for (label, expected) in [("XXX", 1.0), ("ZZI", 1.0), ("IZZ", 1.0), ("XYY", -1.0), ("ZII", 0.0)] {
        let value = pauli_expectation(result.final_state(), &pauli(label), &qubits)?;
        assert!((value - expected).abs() < 1e-9, "<{}> = {}", label, value);
    }
    Ok(())
}

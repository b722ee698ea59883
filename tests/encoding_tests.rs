// tests/encoding_tests.rs

use stabq::{
    Circuit, CircuitSink, CodeDefinition, GeneratorSet, Pauli, PauliString, PauliType, QubitId, Simulator,
    StabError, StandardForm, check_stabilized, encoder_circuit, expected_syndrome, extract_syndromes, gf2,
    logical_operator, logical_operators, pauli_expectation, standardize, synthesize_encoder,
};

const TOLERANCE: f64 = 1e-9;

fn generators(code: CodeDefinition) -> GeneratorSet {
    code.to_generator_set().expect("built-in code is valid")
}

fn data_qubits(n: usize) -> Vec<QubitId> {
    (0..n).map(QubitId).collect()
}

// Helper: run the encoder and check every original generator reads +1.
fn assert_encoder_stabilizes(set: &GeneratorSet) -> Result<(), StabError> {
    let form = standardize(set);
    let encoder = encoder_circuit(&form)?;
    let result = Simulator::new().run(&encoder)?;
    check_stabilized(result.final_state(), set.generators(), &data_qubits(set.num_qubits()), None)
}

//-------------------------------------------------------------------------
// Encoder
//-------------------------------------------------------------------------

#[test]
fn test_five_qubit_encoder_stabilizes() -> Result<(), StabError> {
    assert_encoder_stabilizes(&generators(CodeDefinition::five_qubit()))
}

#[test]
fn test_steane_encoder_stabilizes() -> Result<(), StabError> {
    assert_encoder_stabilizes(&generators(CodeDefinition::steane()))
}

#[test]
fn test_shor_encoder_stabilizes() -> Result<(), StabError> {
    assert_encoder_stabilizes(&generators(CodeDefinition::shor()))
}

#[test]
fn test_signed_generators_are_respected() -> Result<(), StabError> {
    // XX and YY fix the singlet-like state with ZZ = -1.
    assert_encoder_stabilizes(&GeneratorSet::from_labels(&["XX", "YY"], 2, 0)?)?;
    // A negative X-type row and a negative Z-type row.
    assert_encoder_stabilizes(&GeneratorSet::from_labels(&["-XX", "ZZ"], 2, 0)?)?;
    assert_encoder_stabilizes(&GeneratorSet::from_labels(&["XX", "-ZZ"], 2, 0)?)?;
    assert_encoder_stabilizes(&GeneratorSet::from_labels(&["-XXXX", "-ZZZZ"], 4, 2)?)
}

#[test]
fn test_encoder_rejects_wrong_register() {
    let form = standardize(&generators(CodeDefinition::steane()));
    let mut circuit = Circuit::new();
    let data = circuit.add_quantum_register("physical", 6);
    let err = synthesize_encoder(&form, &data, &mut circuit).unwrap_err();
    assert!(matches!(err, StabError::DimensionMismatch { .. }));
}

#[test]
fn test_standard_form_pivot_blocks_are_identity() {
    for code in [CodeDefinition::five_qubit(), CodeDefinition::steane(), CodeDefinition::shor()] {
        let form = standardize(&generators(code));
        let r = form.rank();
        let x_pivot_block = form.x_block().select(0..r, form.x_pivots());
        assert!(x_pivot_block.is_identity());
        let z_pivot_block = form.z_block().select(r..form.num_rows(), form.z_pivots());
        assert!(z_pivot_block.is_identity());
        assert!(form.x_block().submatrix(r..form.num_rows(), 0..form.num_qubits()).is_zero());
    }
}

//-------------------------------------------------------------------------
// Syndrome extraction
//-------------------------------------------------------------------------

struct SyndromeRig {
    circuit: Circuit,
    form: StandardForm,
    data: stabq::QuantumRegister,
}

// Encodes, applies `error`, then runs every group's extraction `rounds` times.
// Returns the syndrome registers of each round in (X, Z) order.
fn syndrome_rig(
    set: &GeneratorSet,
    error: Option<(usize, Pauli)>,
    rounds: usize,
) -> Result<(SyndromeRig, Vec<Vec<stabq::ClassicalRegister>>, Vec<stabq::QuantumRegister>), StabError> {
    let form = standardize(set);
    let mut circuit = Circuit::new();
    let data = circuit.add_quantum_register("physical", form.num_qubits());
    synthesize_encoder(&form, &data, &mut circuit)?;
    let types = [PauliType::X, PauliType::Z];
    let ancillas: Vec<_> = types
        .iter()
        .map(|t| circuit.add_quantum_register(&format!("{}_ancilla", t), form.rows_of_type(*t).len()))
        .collect();
    if let Some((q, pauli)) = error {
        if let Some(gate) = stabq::Gate::from_pauli(pauli, data.qubit(q)) {
            circuit.apply_gate(gate)?;
        }
    }
    let mut registers = Vec::new();
    for round in 0..rounds {
        let mut this_round = Vec::new();
        for (t, ancilla) in types.iter().zip(&ancillas) {
            let register = circuit.add_classical_register(&format!("{}_round{}", t, round), ancilla.len());
            if !ancilla.is_empty() {
                extract_syndromes(&form, &data, ancilla, &register, *t, &mut circuit)?;
            }
            this_round.push(register);
        }
        registers.push(this_round);
    }
    Ok((SyndromeRig { circuit, form, data }, registers, ancillas))
}

#[test]
fn test_clean_extraction_is_zero_and_idempotent() -> Result<(), StabError> {
    for code in [CodeDefinition::five_qubit(), CodeDefinition::steane()] {
        let set = generators(code);
        let (rig, registers, ancillas) = syndrome_rig(&set, None, 2)?;
        let result = Simulator::new().run(&rig.circuit)?;
        for round in &registers {
            for register in round {
                assert_eq!(result.register_value(register)?, 0, "register {}", register.name());
            }
        }
        // Ancillas are back in |0> and the data is still the code state.
        for ancilla in ancillas.iter().flat_map(|a| a.qubits()) {
            let z = pauli_expectation(result.final_state(), &PauliString::from_label("Z")?, &[ancilla])?;
            assert!((z - 1.0).abs() < TOLERANCE, "ancilla {} reads <Z> = {}", ancilla, z);
        }
        let data: Vec<QubitId> = rig.data.qubits().collect();
        check_stabilized(result.final_state(), set.generators(), &data, None)?;
    }
    Ok(())
}

#[test]
fn test_single_z_error_reads_x_block_column() -> Result<(), StabError> {
    let set = generators(CodeDefinition::steane());
    for q in 0..7 {
        let (rig, registers, _) = syndrome_rig(&set, Some((q, Pauli::Z)), 1)?;
        let result = Simulator::new().run(&rig.circuit)?;
        let r = rig.form.rank();
        let column = rig.form.x_block().column(q);
        assert_eq!(result.register_value(&registers[0][0])?, gf2::bits_to_value(&column[..r])?);
        assert_eq!(result.register_value(&registers[0][1])?, 0);
    }
    Ok(())
}

#[test]
fn test_single_x_error_reads_trailing_z_block_column() -> Result<(), StabError> {
    let set = generators(CodeDefinition::steane());
    for q in 0..7 {
        let (rig, registers, _) = syndrome_rig(&set, Some((q, Pauli::X)), 1)?;
        let result = Simulator::new().run(&rig.circuit)?;
        let r = rig.form.rank();
        let column = rig.form.z_block().column(q);
        assert_eq!(result.register_value(&registers[0][0])?, 0);
        assert_eq!(result.register_value(&registers[0][1])?, gf2::bits_to_value(&column[r..])?);
    }
    Ok(())
}

#[test]
fn test_measured_syndromes_match_prediction() -> Result<(), StabError> {
    let set = generators(CodeDefinition::five_qubit());
    for q in 0..5 {
        for pauli in [Pauli::X, Pauli::Y, Pauli::Z] {
            let (rig, registers, _) = syndrome_rig(&set, Some((q, pauli)), 1)?;
            let result = Simulator::new().run(&rig.circuit)?;
            let error = PauliString::single(5, q, pauli)?;
            assert_eq!(
                result.register_value(&registers[0][0])?,
                expected_syndrome(&rig.form, PauliType::X, &error)?,
                "{} on qubit {}",
                pauli,
                q
            );
        }
    }
    Ok(())
}

//-------------------------------------------------------------------------
// Logical operators
//-------------------------------------------------------------------------

// Logical X_j and Z_j commute with the code and anticommute with each other.
fn assert_logical_algebra(set: &GeneratorSet) -> Result<(), StabError> {
    let form = standardize(set);
    let n = form.num_qubits();
    let pairs = logical_operators(&form)?;
    assert_eq!(pairs.len(), form.num_logical());
    for (i, (x_i, z_i)) in pairs.iter().enumerate() {
        let x_i = x_i.to_pauli(n)?;
        let z_i = z_i.to_pauli(n)?;
        for generator in set.generators() {
            assert!(generator.commutes_with(&x_i));
            assert!(generator.commutes_with(&z_i));
        }
        for (j, (x_j, z_j)) in pairs.iter().enumerate() {
            assert_eq!(x_i.commutes_with(&z_j.to_pauli(n)?), i != j);
            assert!(x_i.commutes_with(&x_j.to_pauli(n)?));
            assert!(z_i.commutes_with(&z_j.to_pauli(n)?));
        }
    }
    Ok(())
}

#[test]
fn test_logical_algebra() -> Result<(), StabError> {
    for code in [CodeDefinition::five_qubit(), CodeDefinition::steane(), CodeDefinition::shor()] {
        assert_logical_algebra(&generators(code))?;
    }
    assert_logical_algebra(&GeneratorSet::from_labels(&["XXXX", "ZZZZ"], 4, 2)?)
}

#[test]
fn test_shor_logical_supports() -> Result<(), StabError> {
    let form = standardize(&generators(CodeDefinition::shor()));
    assert_eq!(form.rank(), 2);
    assert_eq!(form.x_pivots(), &[0, 3]);
    assert_eq!(logical_operator(&form, PauliType::X, 0)?.support(), vec![6, 7, 8]);
    assert_eq!(logical_operator(&form, PauliType::Z, 0)?.support(), vec![0, 3, 8]);
    Ok(())
}

#[test]
fn test_five_qubit_form_is_invariant_under_row_changes() -> Result<(), StabError> {
    let set = generators(CodeDefinition::five_qubit());
    let g = set.generators();
    let reference = standardize(&set);

    let shuffled = GeneratorSet::from_paulis(vec![g[2].clone(), g[0].clone(), g[3].clone(), g[1].clone()], 5, 1)?;
    assert_eq!(standardize(&shuffled), reference);

    let multiplied = GeneratorSet::from_paulis(
        vec![g[0].compose(&g[1])?, g[1].clone(), g[2].clone(), g[3].compose(&g[0])?],
        5,
        1,
    )?;
    let form = standardize(&multiplied);
    assert_eq!(form, reference);
    assert_eq!(logical_operators(&form)?, logical_operators(&reference)?);
    Ok(())
}

#[test]
fn test_logical_x_flips_logical_z() -> Result<(), StabError> {
    let set = generators(CodeDefinition::steane());
    let form = standardize(&set);
    let x_bar = logical_operator(&form, PauliType::X, 0)?;
    let z_bar = logical_operator(&form, PauliType::Z, 0)?.to_pauli(7)?;

    let mut circuit = encoder_circuit(&form)?;
    let qubits = data_qubits(7);
    let before = Simulator::new().run(&circuit)?;
    assert!((pauli_expectation(before.final_state(), &z_bar, &qubits)? - 1.0).abs() < TOLERANCE);

    let data = circuit.quantum_register("physical").cloned().expect("encoder register");
    x_bar.apply(&data, &mut circuit)?;
    let after = Simulator::new().run(&circuit)?;
    assert!((pauli_expectation(after.final_state(), &z_bar, &qubits)? + 1.0).abs() < TOLERANCE);
    check_stabilized(after.final_state(), set.generators(), &qubits, None)?;
    Ok(())
}

#[test]
fn test_logical_index_out_of_range() {
    let form = standardize(&generators(CodeDefinition::steane()));
    assert!(matches!(logical_operator(&form, PauliType::Z, 1), Err(StabError::InvalidOperation { .. })));
}

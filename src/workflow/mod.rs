// src/workflow/mod.rs

//! End-to-end protection run for one code: encode, corrupt, detect, correct, decode.
//!
//! [`CodePipeline`] owns the standard form and the two syndrome lookup
//! tables. Each `build*` call produces a fresh [`PipelineCircuit`]:
//!
//! 1. encoder on the `physical` register
//! 2. ancilla registers `x_syndrome` and `z_syndrome` with matching classical registers
//! 3. noise (random or explicit) on the data qubits
//! 4. X-type extraction and its corrections
//! 5. Z-type extraction and its corrections
//! 6. inverse encoder
//! 7. measurement of every data qubit into `final`
//!
//! A correctable error leaves every bit of `final` at 0.

use crate::circuits::{Circuit, CircuitSink, ClassicalRegister, QuantumRegister};
use crate::config::PipelineConfig;
use crate::core::{GeneratorSet, MAX_REGISTER_WIDTH, Pauli, PauliString, PauliType, QubitId, StabError};
use crate::noise::PauliNoise;
use crate::operations::Gate;
use crate::simulation::SimulationResult;
use crate::standard_form::{StandardForm, standardize};
use crate::synthesis::{encoder_circuit, expected_syndrome, extract_syndromes, synthesize_encoder};
use log::{debug, info};
use rand::Rng;
use std::collections::BTreeMap;

/// Direct lookup from a syndrome register value to a single-qubit correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyndromeTable {
    pauli_type: PauliType,
    entries: BTreeMap<u64, (usize, Pauli)>,
}

impl SyndromeTable {
    /// Tabulates every single-qubit error against the `pauli_type` group.
    ///
    /// Candidates run over qubits ascending and, per qubit, Z then X then Y.
    /// A zero syndrome is never stored and the first candidate to reach a
    /// value keeps it.
    ///
    /// # Errors
    /// * `DimensionMismatch` when the group has more than 64 rows.
    pub fn build(form: &StandardForm, pauli_type: PauliType) -> Result<Self, StabError> {
        let n = form.num_qubits();
        let mut entries = BTreeMap::new();
        for qubit in 0..n {
            for pauli in [Pauli::Z, Pauli::X, Pauli::Y] {
                let (x, z) = pauli.bits();
                let mut x_bits = vec![false; n];
                let mut z_bits = vec![false; n];
                x_bits[qubit] = x;
                z_bits[qubit] = z;
                let error = PauliString::hermitian(x_bits, z_bits);
                let value = expected_syndrome(form, pauli_type, &error)?;
                if value != 0 {
                    entries.entry(value).or_insert((qubit, pauli));
                }
            }
        }
        debug!("{}-type syndrome table holds {} entries", pauli_type, entries.len());
        Ok(Self { pauli_type, entries })
    }

    /// The stabilizer group this table decodes.
    pub fn pauli_type(&self) -> PauliType {
        self.pauli_type
    }

    /// `(value, qubit, pauli)` triples in ascending value order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, usize, Pauli)> + '_ {
        self.entries.iter().map(|(&value, &(qubit, pauli))| (value, qubit, pauli))
    }

    /// Correction for a register value, `None` for 0 and unseen values.
    pub fn lookup(&self, value: u64) -> Option<(usize, Pauli)> {
        self.entries.get(&value).copied()
    }

    /// Number of correctable syndrome values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no single-qubit error trips the group.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends one conditional correction per entry, read from `register`.
    pub fn emit_corrections<S: CircuitSink>(
        &self,
        data: &QuantumRegister,
        register: &ClassicalRegister,
        sink: &mut S,
    ) -> Result<(), StabError> {
        for (&value, &(qubit, pauli)) in &self.entries {
            if qubit >= data.len() {
                return Err(StabError::QubitOutOfRange {
                    qubit: QubitId(qubit),
                    message: format!("register '{}' has {} qubits", data.name(), data.len()),
                });
            }
            if let Some(gate) = Gate::from_pauli(pauli, data.qubit(qubit)) {
                sink.conditional_gate(gate, register, value)?;
            }
        }
        Ok(())
    }
}

/// The circuit of one pipeline run and the registers it allocated.
#[derive(Debug, Clone)]
pub struct PipelineCircuit {
    pub circuit: Circuit,
    /// The `n` code qubits, named `physical`.
    pub data: QuantumRegister,
    /// One ancilla per X-type row.
    pub x_ancillas: QuantumRegister,
    /// One ancilla per Z-type row.
    pub z_ancillas: QuantumRegister,
    pub x_syndrome: ClassicalRegister,
    pub z_syndrome: ClassicalRegister,
    /// Decoded data bits, measured last.
    pub final_bits: ClassicalRegister,
    /// Errors placed on the data qubits, in qubit order.
    pub injected: Vec<(QubitId, Pauli)>,
}

impl PipelineCircuit {
    /// Measured data bits after decoding, qubit 0 first.
    pub fn decoded_bits(&self, result: &SimulationResult) -> Vec<bool> {
        result.register_bits(&self.final_bits)
    }

    /// Value read by the X-type extraction.
    pub fn x_syndrome_value(&self, result: &SimulationResult) -> Result<u64, StabError> {
        result.register_value(&self.x_syndrome)
    }

    /// Value read by the Z-type extraction.
    pub fn z_syndrome_value(&self, result: &SimulationResult) -> Result<u64, StabError> {
        result.register_value(&self.z_syndrome)
    }
}

/// A validated code ready to emit protection circuits.
#[derive(Debug, Clone)]
pub struct CodePipeline {
    form: StandardForm,
    config: PipelineConfig,
    x_table: SyndromeTable,
    z_table: SyndromeTable,
}

impl CodePipeline {
    /// # Errors
    /// * `InvalidProbability` for a bad `noise_probability`.
    /// * `NonCommuting` when `check_commutation` is set and two generators anticommute.
    /// * `DimensionMismatch` when a syndrome group has more than 64 rows, since
    ///   corrections compare the whole register against a `u64`.
    pub fn new(generators: &GeneratorSet, config: PipelineConfig) -> Result<Self, StabError> {
        config.validate()?;
        if config.check_commutation {
            generators.check_commutation()?;
        }
        let form = standardize(generators);
        for pauli_type in [PauliType::X, PauliType::Z] {
            let rows = form.rows_of_type(pauli_type).len();
            if rows > MAX_REGISTER_WIDTH {
                return Err(StabError::DimensionMismatch {
                    message: format!(
                        "{}-type syndrome group has {} rows, registers hold at most {}",
                        pauli_type, rows, MAX_REGISTER_WIDTH
                    ),
                });
            }
        }
        let x_table = SyndromeTable::build(&form, PauliType::X)?;
        let z_table = SyndromeTable::build(&form, PauliType::Z)?;
        info!(
            "pipeline ready for [[{}, {}]] code, rank {}",
            form.num_qubits(),
            form.num_logical(),
            form.rank()
        );
        Ok(Self { form, config, x_table, z_table })
    }

    /// The standardized code every run is synthesized from.
    pub fn form(&self) -> &StandardForm {
        &self.form
    }

    /// Settings the pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Lookup decoder for one syndrome group.
    pub fn syndrome_table(&self, pauli_type: PauliType) -> &SyndromeTable {
        match pauli_type {
            PauliType::X => &self.x_table,
            PauliType::Z => &self.z_table,
        }
    }

    /// Builds a run with depolarizing noise drawn from `rng`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PipelineCircuit, StabError> {
        let noise = PauliNoise::new(self.config.noise_probability)?;
        self.assemble(|circuit, data| {
            let qubits: Vec<QubitId> = data.qubits().collect();
            noise.inject(&qubits, circuit, rng)
        })
    }

    /// [`build`](Self::build) with an RNG seeded from the config.
    pub fn build_seeded(&self) -> Result<PipelineCircuit, StabError> {
        self.build(&mut self.config.rng())
    }

    /// Builds a run that applies exactly `errors`, given as `(data qubit, Pauli)`.
    ///
    /// # Errors
    /// * `QubitOutOfRange` for a data index `>= n`.
    pub fn build_with_errors(&self, errors: &[(usize, Pauli)]) -> Result<PipelineCircuit, StabError> {
        let n = self.form.num_qubits();
        if let Some(&(qubit, _)) = errors.iter().find(|(q, _)| *q >= n) {
            return Err(StabError::QubitOutOfRange {
                qubit: QubitId(qubit),
                message: format!("code has {} data qubits", n),
            });
        }
        self.assemble(|circuit, data| {
            let mut injected = Vec::new();
            for &(qubit, pauli) in errors {
                if let Some(gate) = Gate::from_pauli(pauli, data.qubit(qubit)) {
                    circuit.apply_gate(gate)?;
                    injected.push((data.qubit(qubit), pauli));
                }
            }
            Ok(injected)
        })
    }

    fn assemble<F>(&self, corrupt: F) -> Result<PipelineCircuit, StabError>
    where
        F: FnOnce(&mut Circuit, &QuantumRegister) -> Result<Vec<(QubitId, Pauli)>, StabError>,
    {
        let form = &self.form;
        let x_rows = form.rows_of_type(PauliType::X).len();
        let z_rows = form.rows_of_type(PauliType::Z).len();

        let mut circuit = Circuit::new();
        let data = circuit.add_quantum_register("physical", form.num_qubits());
        synthesize_encoder(form, &data, &mut circuit)?;

        let x_ancillas = circuit.add_quantum_register("x_syndrome", x_rows);
        let z_ancillas = circuit.add_quantum_register("z_syndrome", z_rows);
        let x_syndrome = circuit.add_classical_register("x_syndrome", x_rows);
        let z_syndrome = circuit.add_classical_register("z_syndrome", z_rows);

        let injected = corrupt(&mut circuit, &data)?;

        for (pauli_type, ancillas, register) in [
            (PauliType::X, &x_ancillas, &x_syndrome),
            (PauliType::Z, &z_ancillas, &z_syndrome),
        ] {
            if ancillas.is_empty() {
                continue;
            }
            extract_syndromes(form, &data, ancillas, register, pauli_type, &mut circuit)?;
            self.syndrome_table(pauli_type).emit_corrections(&data, register, &mut circuit)?;
        }

        let decoder = encoder_circuit(form)?.inverse()?;
        let data_qubits: Vec<QubitId> = data.qubits().collect();
        circuit.compose(&decoder, &data_qubits)?;

        let final_bits = circuit.add_classical_register("final", form.num_qubits());
        for (qubit, clbit) in data.qubits().zip(final_bits.clbits()) {
            circuit.measure(qubit, clbit)?;
        }
        debug!(
            "pipeline circuit: {} operations ({} unconditional gates) on {} qubits, {} errors injected",
            circuit.len(),
            circuit.gate_count(),
            circuit.num_qubits(),
            injected.len()
        );

        Ok(PipelineCircuit { circuit, data, x_ancillas, z_ancillas, x_syndrome, z_syndrome, final_bits, injected })
    }
}

// src/circuits/mod.rs

//! Registers, the append-only [`CircuitSink`] seam, and the concrete
//! [`Circuit`] log the synthesis stages write into.
//!
//! Qubits and classical bits are flat indices. Named registers only reserve
//! contiguous ranges of them, so a register is a cheap `(name, start, len)`
//! value that can be cloned into conditional operations.

use crate::core::{ClbitId, MAX_REGISTER_WIDTH, QubitId, StabError};
use crate::operations::{Gate, Operation};
use log::trace;
use std::fmt;

/// A named, contiguous range of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantumRegister {
    name: String,
    start: usize,
    size: usize,
}

impl QuantumRegister {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flat index of the register's first qubit.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The `index`-th qubit of the register.
    ///
    /// The index is not checked against the register length; callers check
    /// sizes up front and the circuit rejects ids past its last qubit.
    pub fn qubit(&self, index: usize) -> QubitId {
        QubitId(self.start + index)
    }

    /// All qubits of the register in order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        (self.start..self.start + self.size).map(QubitId)
    }

    fn contains(&self, qubit: QubitId) -> bool {
        (self.start..self.start + self.size).contains(&qubit.0)
    }
}

/// A named, contiguous range of classical bits.
///
/// Read as an integer, bit `t` of the register has weight `2^t`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassicalRegister {
    name: String,
    start: usize,
    size: usize,
}

impl ClassicalRegister {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The `index`-th bit of the register. Unchecked, like [`QuantumRegister::qubit`].
    pub fn clbit(&self, index: usize) -> ClbitId {
        ClbitId(self.start + index)
    }

    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        (self.start..self.start + self.size).map(ClbitId)
    }
}

/// Append-only target of the synthesis stages.
///
/// Implementations validate every call and report bad indices as errors
/// instead of panicking.
pub trait CircuitSink {
    /// Appends a unitary gate.
    fn apply_gate(&mut self, gate: Gate) -> Result<(), StabError>;

    /// Appends a computational-basis measurement of `qubit` into `clbit`.
    fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> Result<(), StabError>;

    /// Appends `gate`, to be applied only when `register` reads `value`.
    fn conditional_gate(&mut self, gate: Gate, register: &ClassicalRegister, value: u64) -> Result<(), StabError>;
}

/// An ordered log of operations over declared registers.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Circuit {
    quantum_registers: Vec<QuantumRegister>,
    classical_registers: Vec<ClassicalRegister>,
    num_qubits: usize,
    num_clbits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates an empty circuit with no registers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `size` fresh qubits under `name` and returns the register.
    pub fn add_quantum_register(&mut self, name: &str, size: usize) -> QuantumRegister {
        let register = QuantumRegister { name: name.to_string(), start: self.num_qubits, size };
        self.num_qubits += size;
        self.quantum_registers.push(register.clone());
        register
    }

    /// Reserves `size` fresh classical bits under `name` and returns the register.
    pub fn add_classical_register(&mut self, name: &str, size: usize) -> ClassicalRegister {
        let register = ClassicalRegister { name: name.to_string(), start: self.num_clbits, size };
        self.num_clbits += size;
        self.classical_registers.push(register.clone());
        register
    }

    /// Appends `op` after checking every index it touches.
    pub fn add_operation(&mut self, op: Operation) -> Result<(), StabError> {
        match &op {
            Operation::Gate(gate) => self.check_gate(gate)?,
            Operation::Measure { qubit, clbit } => {
                self.check_qubit(*qubit)?;
                self.check_clbit(*clbit)?;
            }
            Operation::Conditional { gate, register, .. } => {
                self.check_gate(gate)?;
                if register.len() > MAX_REGISTER_WIDTH {
                    return Err(StabError::InvalidOperation {
                        message: format!("register '{}' is too wide to compare against a u64", register.name()),
                    });
                }
                if register.start() + register.len() > self.num_clbits {
                    return Err(StabError::ClbitOutOfRange {
                        clbit: ClbitId(register.start() + register.len()),
                        message: format!("register '{}' extends past {} clbits", register.name(), self.num_clbits),
                    });
                }
            }
        }
        trace!("append {}", op);
        self.operations.push(op);
        Ok(())
    }

    /// Appends every operation from `ops`, stopping at the first invalid one.
    pub fn add_operations<I>(&mut self, ops: I) -> Result<(), StabError>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: QubitId) -> Result<(), StabError> {
        if qubit.0 >= self.num_qubits {
            return Err(StabError::QubitOutOfRange {
                qubit,
                message: format!("circuit has {} qubits", self.num_qubits),
            });
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> Result<(), StabError> {
        if clbit.0 >= self.num_clbits {
            return Err(StabError::ClbitOutOfRange {
                clbit,
                message: format!("circuit has {} clbits", self.num_clbits),
            });
        }
        Ok(())
    }

    fn check_gate(&self, gate: &Gate) -> Result<(), StabError> {
        for qubit in gate.qubits() {
            self.check_qubit(qubit)?;
        }
        if let Gate::CX { control, target } | Gate::CZ { control, target } = gate {
            if control == target {
                return Err(StabError::InvalidOperation {
                    message: format!("{} uses {} as both control and target", gate.symbol(), control),
                });
            }
        }
        Ok(())
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn quantum_registers(&self) -> &[QuantumRegister] {
        &self.quantum_registers
    }

    pub fn classical_registers(&self) -> &[ClassicalRegister] {
        &self.classical_registers
    }

    /// Looks up a quantum register by name.
    pub fn quantum_register(&self, name: &str) -> Option<&QuantumRegister> {
        self.quantum_registers.iter().find(|r| r.name == name)
    }

    /// Looks up a classical register by name.
    pub fn classical_register(&self, name: &str) -> Option<&ClassicalRegister> {
        self.classical_registers.iter().find(|r| r.name == name)
    }

    /// Number of unconditional gates.
    pub fn gate_count(&self) -> usize {
        self.operations.iter().filter(|op| matches!(op, Operation::Gate(_))).count()
    }

    /// The adjoint circuit: gates reversed and individually inverted.
    ///
    /// Measurements and conditional gates have no inverse, so a circuit
    /// holding either is rejected.
    pub fn inverse(&self) -> Result<Circuit, StabError> {
        let mut inverse = Circuit {
            quantum_registers: self.quantum_registers.clone(),
            classical_registers: self.classical_registers.clone(),
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            operations: Vec::with_capacity(self.operations.len()),
        };
        for op in self.operations.iter().rev() {
            match op {
                Operation::Gate(gate) => inverse.operations.push(Operation::Gate(gate.inverse())),
                other => {
                    return Err(StabError::InvalidOperation {
                        message: format!("cannot invert a circuit containing '{}'", other),
                    });
                }
            }
        }
        Ok(inverse)
    }

    /// Appends the gates of `other`, sending its qubit `i` to `qubits[i]`.
    ///
    /// `other` must be purely unitary and `qubits` must name one wire of
    /// this circuit per qubit of `other`.
    pub fn compose(&mut self, other: &Circuit, qubits: &[QubitId]) -> Result<(), StabError> {
        if qubits.len() != other.num_qubits {
            return Err(StabError::DimensionMismatch {
                message: format!(
                    "composing a {}-qubit circuit onto {} qubits",
                    other.num_qubits,
                    qubits.len()
                ),
            });
        }
        for op in &other.operations {
            match op {
                Operation::Gate(gate) => {
                    self.add_operation(Operation::Gate(gate.remapped(|q| qubits[q.0])))?;
                }
                other_op => {
                    return Err(StabError::InvalidOperation {
                        message: format!("cannot compose non-unitary operation '{}'", other_op),
                    });
                }
            }
        }
        Ok(())
    }

    fn wire_label(&self, qubit: usize) -> String {
        self.quantum_registers
            .iter()
            .find(|r| r.contains(QubitId(qubit)))
            .map(|r| format!("{}[{}]", r.name, qubit - r.start))
            .unwrap_or_else(|| format!("q{}", qubit))
    }
}

impl CircuitSink for Circuit {
    fn apply_gate(&mut self, gate: Gate) -> Result<(), StabError> {
        self.add_operation(Operation::Gate(gate))
    }

    fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> Result<(), StabError> {
        self.add_operation(Operation::Measure { qubit, clbit })
    }

    fn conditional_gate(&mut self, gate: Gate, register: &ClassicalRegister, value: u64) -> Result<(), StabError> {
        self.add_operation(Operation::Conditional { gate, register: register.clone(), value })
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Chaining builder for small hand-written circuits.
///
/// Operations are collected unchecked and validated together by [`build`](Self::build).
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
    pending: Vec<Operation>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a quantum register.
    pub fn qreg(mut self, name: &str, size: usize) -> Self {
        self.circuit.add_quantum_register(name, size);
        self
    }

    /// Declares a classical register.
    pub fn creg(mut self, name: &str, size: usize) -> Self {
        self.circuit.add_classical_register(name, size);
        self
    }

    pub fn add_op(mut self, op: Operation) -> Self {
        self.pending.push(op);
        self
    }

    /// Shorthand for `add_op(Operation::Gate(gate))`.
    pub fn gate(self, gate: Gate) -> Self {
        self.add_op(Operation::Gate(gate))
    }

    /// Shorthand for a measurement of flat qubit `qubit` into flat bit `clbit`.
    pub fn measure(self, qubit: usize, clbit: usize) -> Self {
        self.add_op(Operation::Measure { qubit: QubitId(qubit), clbit: ClbitId(clbit) })
    }

    /// Validates every collected operation and returns the circuit.
    pub fn build(self) -> Result<Circuit, StabError> {
        let mut circuit = self.circuit;
        circuit.add_operations(self.pending)?;
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num_qubits == 0 {
            return writeln!(f, "stabq::Circuit[{} operations on 0 qubits]", self.operations.len());
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let num_rows = self.num_qubits;

        let labels: Vec<String> = (0..num_rows).map(|q| self.wire_label(q)).collect();
        let max_label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the cell; v_connect[row][time] the connector below it.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_rows];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        fn place(op_grid: &mut [Vec<String>], v_connect: &mut [Vec<char>], t: usize, gate: &Gate, prefix: &str) {
            match *gate {
                Gate::CX { control, target } | Gate::CZ { control, target } => {
                    let target_symbol = if matches!(gate, Gate::CX { .. }) { "X" } else { "●" };
                    op_grid[control.0][t] = format_gate(&format!("{}@", prefix));
                    op_grid[target.0][t] = format_gate(target_symbol);
                    let r_min = control.0.min(target.0);
                    let r_max = control.0.max(target.0);
                    for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row[t] = V_WIRE;
                    }
                }
                single => {
                    let q = single.qubits()[0];
                    op_grid[q.0][t] = format_gate(&format!("{}{}", prefix, single.symbol()));
                }
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Gate(gate) => place(&mut op_grid, &mut v_connect, t, gate, ""),
                Operation::Measure { qubit, .. } => op_grid[qubit.0][t] = format_gate("M"),
                Operation::Conditional { gate, .. } => place(&mut op_grid, &mut v_connect, t, gate, "?"),
            }
        }

        writeln!(f, "stabq::Circuit[{} operations on {} qubits]", num_ops, num_rows)?;
        for r in 0..num_rows {
            let label = format!("{}: ", labels[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_rows - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

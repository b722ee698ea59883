// src/operations/mod.rs

//! Gate-level operations emitted by the synthesis stages.
//!
//! The gate set is the Clifford subset needed for stabilizer encoding,
//! syndrome extraction, Pauli noise and lookup correction. Every gate is
//! its own inverse except `S`/`Sdg`, which invert each other.

use crate::circuits::ClassicalRegister;
use crate::core::{ClbitId, Pauli, QubitId};
use std::fmt;

/// A unitary gate on one or two qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard.
    H(QubitId),
    /// Pauli X (bit flip).
    X(QubitId),
    /// Pauli Y.
    Y(QubitId),
    /// Pauli Z (phase flip).
    Z(QubitId),
    /// Phase gate `diag(1, i)`.
    S(QubitId),
    /// Inverse phase gate `diag(1, -i)`.
    Sdg(QubitId),
    /// Controlled X, flips `target` when `control` is `|1>`.
    CX {
        control: QubitId,
        target: QubitId,
    },
    /// Controlled Z. Symmetric in its two qubits.
    CZ {
        control: QubitId,
        target: QubitId,
    },
}

impl Gate {
    /// The gate applying `pauli` to `qubit`, or `None` for the identity.
    pub fn from_pauli(pauli: Pauli, qubit: QubitId) -> Option<Gate> {
        match pauli {
            Pauli::I => None,
            Pauli::X => Some(Gate::X(qubit)),
            Pauli::Y => Some(Gate::Y(qubit)),
            Pauli::Z => Some(Gate::Z(qubit)),
        }
    }

    /// The phase gate `S^exponent` on `qubit`, or `None` when the exponent is 0 mod 4.
    pub fn phase_power(exponent: u8, qubit: QubitId) -> Option<Gate> {
        match exponent % 4 {
            1 => Some(Gate::S(qubit)),
            2 => Some(Gate::Z(qubit)),
            3 => Some(Gate::Sdg(qubit)),
            _ => None,
        }
    }

    /// Qubits touched by the gate, control first for two-qubit gates.
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            Gate::H(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) | Gate::S(q) | Gate::Sdg(q) => vec![q],
            Gate::CX { control, target } | Gate::CZ { control, target } => vec![control, target],
        }
    }

    /// The inverse gate.
    pub fn inverse(&self) -> Gate {
        match *self {
            Gate::S(q) => Gate::Sdg(q),
            Gate::Sdg(q) => Gate::S(q),
            other => other,
        }
    }

    /// Same gate with every qubit passed through `map`.
    pub fn remapped(&self, map: impl Fn(QubitId) -> QubitId) -> Gate {
        match *self {
            Gate::H(q) => Gate::H(map(q)),
            Gate::X(q) => Gate::X(map(q)),
            Gate::Y(q) => Gate::Y(map(q)),
            Gate::Z(q) => Gate::Z(map(q)),
            Gate::S(q) => Gate::S(map(q)),
            Gate::Sdg(q) => Gate::Sdg(map(q)),
            Gate::CX { control, target } => Gate::CX { control: map(control), target: map(target) },
            Gate::CZ { control, target } => Gate::CZ { control: map(control), target: map(target) },
        }
    }

    /// Short symbol used by the circuit renderer.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::H(_) => "H",
            Gate::X(_) => "X",
            Gate::Y(_) => "Y",
            Gate::Z(_) => "Z",
            Gate::S(_) => "S",
            Gate::Sdg(_) => "S†",
            Gate::CX { .. } => "CX",
            Gate::CZ { .. } => "CZ",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::CX { control, target } | Gate::CZ { control, target } => {
                write!(f, "{}({}, {})", self.symbol(), control, target)
            }
            single => write!(f, "{}({})", single.symbol(), single.qubits()[0]),
        }
    }
}

/// One entry of a circuit's operation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// A unitary gate.
    Gate(Gate),

    /// Computational-basis measurement of `qubit`, with the outcome
    /// written to `clbit`. The qubit collapses to the observed state.
    Measure { qubit: QubitId, clbit: ClbitId },

    /// Applies `gate` only when the classical `register` currently reads
    /// `value`, with bit `t` of the register weighted `2^t`.
    Conditional {
        gate: Gate,
        register: ClassicalRegister,
        value: u64,
    },
}

impl Operation {
    /// Quantum wires the operation acts on.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate(gate) => gate.qubits(),
            Operation::Measure { qubit, .. } => vec![*qubit],
            Operation::Conditional { gate, .. } => gate.qubits(),
        }
    }

    /// Classical bits the operation reads or writes.
    pub fn involved_clbits(&self) -> Vec<ClbitId> {
        match self {
            Operation::Gate(_) => Vec::new(),
            Operation::Measure { clbit, .. } => vec![*clbit],
            Operation::Conditional { register, .. } => register.clbits().collect(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate(gate) => write!(f, "{}", gate),
            Operation::Measure { qubit, clbit } => write!(f, "measure {} -> {}", qubit, clbit),
            Operation::Conditional { gate, register, value } => {
                write!(f, "if ({} == {}) {}", register.name(), value, gate)
            }
        }
    }
}

//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Index of a qubit inside a circuit.
///
/// Qubits are allocated by registers; the id is the position of the wire
/// in the flattened circuit, starting from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Index of a classical bit inside a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClbitId(pub usize);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Failures raised while validating codes, synthesizing circuits or simulating them.
///
/// Every failure is reported at the boundary where it is detected; nothing
/// in the crate retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StabError {
    /// A generator string is not a valid Pauli description.
    #[error("Malformed Generator: {message}")]
    MalformedGenerator {
        /// MalformedGenerator failure message
        message: String,
    },

    /// Sizes that must agree do not (generator count vs n-k, register sizes, row counts).
    #[error("Dimension Mismatch: {message}")]
    DimensionMismatch {
        /// DimensionMismatch failure message
        message: String,
    },

    /// Two generators anticommute, so they cannot stabilize a common subspace.
    #[error("Generators {first} and {second} do not commute")]
    NonCommuting {
        /// Index of the first offending generator
        first: usize,
        /// Index of the second offending generator
        second: usize,
    },

    /// A probability lies outside `[0, 1]`.
    #[error("Invalid Probability: {message}")]
    InvalidProbability {
        /// InvalidProbability failure message
        message: String,
    },

    /// An operation addressed a qubit the circuit does not own.
    #[error("Qubit Out Of Range ({qubit}): {message}")]
    QubitOutOfRange {
        /// Offending qubit
        qubit: QubitId,
        /// QubitOutOfRange failure message
        message: String,
    },

    /// An operation addressed a classical bit the circuit does not own.
    #[error("Classical Bit Out Of Range ({clbit}): {message}")]
    ClbitOutOfRange {
        /// Offending classical bit
        clbit: ClbitId,
        /// ClbitOutOfRange failure message
        message: String,
    },

    /// The request is inconsistent with the object it targets.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// A configuration document could not be read.
    #[error("Configuration Error: {message}")]
    Config {
        /// Config failure message
        message: String,
    },

    /// A state is not a +1 eigenstate of an operator it was expected to be stabilized by.
    #[error("Unstabilized State: {message}")]
    Unstabilized {
        /// Unstabilized failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl From<serde_json::Error> for StabError {
    fn from(err: serde_json::Error) -> Self {
        StabError::Config { message: err.to_string() }
    }
}

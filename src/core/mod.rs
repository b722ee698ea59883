// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod pauli;
pub mod state;

// Re-export public types for convenient access via `stabq::core::TypeName`
pub use error::{ClbitId, QubitId, StabError};
pub use pauli::{GeneratorSet, Pauli, PauliString, PauliType};
pub use state::StateVector;

pub mod constants;
pub use constants::stabq_constants::{
    AMPLITUDE_TOLERANCE, DEFAULT_SIMULATOR_SEED, MAX_REGISTER_WIDTH, MAX_SIMULATED_QUBITS,
};

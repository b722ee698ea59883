// src/simulation/results.rs
use crate::circuits::ClassicalRegister;
use crate::core::{ClbitId, StabError, StateVector};
use crate::gf2::bits_to_value;
use std::fmt;

/// Classical record and final quantum state of one simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    clbits: Vec<bool>,
    final_state: StateVector,
}

impl SimulationResult {
    pub(crate) fn new(clbits: Vec<bool>, final_state: StateVector) -> Self {
        Self { clbits, final_state }
    }

    /// Value of one classical bit, `None` if the circuit has no such bit.
    pub fn clbit(&self, clbit: ClbitId) -> Option<bool> {
        self.clbits.get(clbit.0).copied()
    }

    /// All classical bits in flat order.
    pub fn clbits(&self) -> &[bool] {
        &self.clbits
    }

    /// Bits of `register`, lowest weight first. Bits past the end read as `false`.
    pub fn register_bits(&self, register: &ClassicalRegister) -> Vec<bool> {
        register.clbits().map(|c| self.clbit(c).unwrap_or(false)).collect()
    }

    /// Integer value of `register`, bit `t` weighted `2^t`.
    ///
    /// # Errors
    /// * `DimensionMismatch` for a register wider than 64 bits.
    pub fn register_value(&self, register: &ClassicalRegister) -> Result<u64, StabError> {
        bits_to_value(&self.register_bits(register))
    }

    /// State vector after the last operation.
    pub fn final_state(&self) -> &StateVector {
        &self.final_state
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.clbits.is_empty() {
            writeln!(f, "  No classical bits were written.")?;
        } else {
            let bits: String = self.clbits.iter().map(|b| if *b { '1' } else { '0' }).collect();
            writeln!(f, "  Classical bits (c0 first): {}", bits)?;
        }
        writeln!(f, "  Final state: {}", self.final_state)
    }
}

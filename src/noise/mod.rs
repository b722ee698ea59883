// src/noise/mod.rs

//! Independent single-qubit depolarizing noise.
//!
//! Each qubit is left alone with probability `1 - p` and otherwise hit by
//! X, Y or Z with probability `p / 3` each. Sampled errors are appended to a
//! [`CircuitSink`] as ordinary gates, so the same circuit can be replayed.

use crate::circuits::CircuitSink;
use crate::core::{Pauli, QubitId, StabError};
use crate::operations::Gate;
use log::debug;
use rand::Rng;

/// A validated depolarizing probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauliNoise {
    probability: f64,
}

impl PauliNoise {
    /// # Errors
    /// * `InvalidProbability` when `probability` is NaN or outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self, StabError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(StabError::InvalidProbability {
                message: format!("noise probability {} is not in [0, 1]", probability),
            });
        }
        Ok(Self { probability })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Draws one single-qubit Pauli.
    ///
    /// A uniform `u` below `1 - p` gives I; the remaining mass is split into
    /// three equal buckets for X, Y and Z in that order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Pauli {
        let p = self.probability;
        let u: f64 = rng.gen_range(0.0..1.0);
        if u < 1.0 - p {
            return Pauli::I;
        }
        let bucket = ((u - (1.0 - p)) / (p / 3.0)).floor().clamp(0.0, 2.0) as usize;
        [Pauli::X, Pauli::Y, Pauli::Z][bucket]
    }

    /// Samples a Pauli for every qubit and appends the non-identity ones.
    ///
    /// Returns the injected errors in qubit order.
    pub fn inject<S, R>(&self, qubits: &[QubitId], sink: &mut S, rng: &mut R) -> Result<Vec<(QubitId, Pauli)>, StabError>
    where
        S: CircuitSink,
        R: Rng + ?Sized,
    {
        let mut injected = Vec::new();
        for &qubit in qubits {
            let pauli = self.sample(rng);
            if let Some(gate) = Gate::from_pauli(pauli, qubit) {
                sink.apply_gate(gate)?;
                injected.push((qubit, pauli));
            }
        }
        if !injected.is_empty() {
            debug!("injected {} errors at p = {}: {:?}", injected.len(), self.probability, injected);
        }
        Ok(injected)
    }
}

/// Free-function form of [`PauliNoise::inject`].
pub fn inject_noise<S, R>(
    qubits: &[QubitId],
    probability: f64,
    sink: &mut S,
    rng: &mut R,
) -> Result<Vec<(QubitId, Pauli)>, StabError>
where
    S: CircuitSink,
    R: Rng + ?Sized,
{
    PauliNoise::new(probability)?.inject(qubits, sink, rng)
}

// src/config/mod.rs

//! JSON-backed code definitions and pipeline settings.
//!
//! ```json
//! {"name": "steane", "num_qubits": 7, "num_logical": 1,
//!  "generators": [["0001111", "0000000"], ...]}
//! ```

use crate::core::{GeneratorSet, StabError};
use crate::noise::PauliNoise;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A stabilizer code as `(x-bits, z-bits)` string pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDefinition {
    pub name: String,
    pub num_qubits: usize,
    pub num_logical: usize,
    pub generators: Vec<(String, String)>,
}

impl CodeDefinition {
    /// Parses a definition from JSON. Shape is checked later by
    /// [`to_generator_set`](Self::to_generator_set).
    pub fn from_json(json: &str) -> Result<Self, StabError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StabError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the generators against `num_qubits` and `num_logical`.
    pub fn to_generator_set(&self) -> Result<GeneratorSet, StabError> {
        GeneratorSet::from_bit_strings(&self.generators, self.num_qubits, self.num_logical)
    }

    fn from_pairs(name: &str, num_qubits: usize, num_logical: usize, pairs: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            num_qubits,
            num_logical,
            generators: pairs.iter().map(|(x, z)| (x.to_string(), z.to_string())).collect(),
        }
    }

    /// The [[5,1,3]] perfect code, `XZZXI` and its cyclic shifts.
    pub fn five_qubit() -> Self {
        Self::from_pairs(
            "five_qubit",
            5,
            1,
            &[("10010", "01100"), ("01001", "00110"), ("10100", "00011"), ("01010", "10001")],
        )
    }

    /// The [[7,1,3]] Steane code.
    pub fn steane() -> Self {
        Self::from_pairs(
            "steane",
            7,
            1,
            &[
                ("0001111", "0000000"),
                ("0110011", "0000000"),
                ("1010101", "0000000"),
                ("0000000", "0001111"),
                ("0000000", "0110011"),
                ("0000000", "1010101"),
            ],
        )
    }

    /// The [[9,1,3]] Shor code.
    pub fn shor() -> Self {
        Self::from_pairs(
            "shor",
            9,
            1,
            &[
                ("000000000", "110000000"),
                ("000000000", "011000000"),
                ("000000000", "000110000"),
                ("000000000", "000011000"),
                ("000000000", "000000110"),
                ("000000000", "000000011"),
                ("111111000", "000000000"),
                ("000111111", "000000000"),
            ],
        )
    }
}

/// Settings for [`CodePipeline`](crate::workflow::CodePipeline).
///
/// Missing JSON fields take their defaults: no noise, seed 0, and the
/// commutation check enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Depolarizing probability per data qubit.
    pub noise_probability: f64,
    /// Seed for the noise RNG used by `CodePipeline::build_seeded`.
    pub seed: u64,
    /// Reject anticommuting generators before standardizing.
    pub check_commutation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { noise_probability: 0.0, seed: 0, check_commutation: true }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, StabError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StabError> {
        PauliNoise::new(self.noise_probability).map(|_| ())
    }

    /// A fresh RNG seeded with [`seed`](Self::seed).
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_codes_are_valid() -> Result<(), StabError> {
        for code in [CodeDefinition::five_qubit(), CodeDefinition::steane(), CodeDefinition::shor()] {
            let set = code.to_generator_set()?;
            set.check_commutation()?;
            assert_eq!(set.len(), code.num_qubits - code.num_logical);
        }
        Ok(())
    }

    #[test]
    fn test_code_definition_from_json() -> Result<(), StabError> {
        let json = r#"{
            "name": "bit_flip",
            "num_qubits": 3,
            "num_logical": 1,
            "generators": [["000", "110"], ["000", "011"]]
        }"#;
        let code = CodeDefinition::from_json(json)?;
        assert_eq!(code.name, "bit_flip");
        let set = code.to_generator_set()?;
        assert_eq!(set.generators()[1].label(), "+IZZ");
        assert_eq!(CodeDefinition::from_json(&code.to_json()?)?, code);
        Ok(())
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = CodeDefinition::from_json("{\"name\": 3}").unwrap_err();
        assert!(matches!(err, StabError::Config { .. }));
    }

    #[test]
    fn test_wrong_generator_count_rejected() -> Result<(), StabError> {
        let mut code = CodeDefinition::steane();
        code.generators.pop();
        assert!(matches!(code.to_generator_set(), Err(StabError::DimensionMismatch { .. })));
        Ok(())
    }

    #[test]
    fn test_pipeline_config_defaults_and_validation() -> Result<(), StabError> {
        let config = PipelineConfig::from_json(r#"{"noise_probability": 0.05}"#)?;
        assert_eq!(config.seed, 0);
        assert!(config.check_commutation);
        let err = PipelineConfig::from_json(r#"{"noise_probability": 1.5}"#).unwrap_err();
        assert!(matches!(err, StabError::InvalidProbability { .. }));
        Ok(())
    }
}

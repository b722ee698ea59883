// src/core/pauli.rs

//! Pauli operators in the binary symplectic picture.
//!
//! A `PauliString` on `n` qubits is stored as two bit vectors `x` and `z`
//! together with a phase exponent `e`, and stands for the operator
//! `i^e · X^x · Z^z`, where on each qubit the X factor is applied after the
//! Z factor. A Hermitian Pauli written with `Y` letters has `e = #Y` (for a
//! positive sign) because `Y = i·X·Z`.

use super::error::StabError;
use crate::gf2::BinaryMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two families of stabilizer rows and logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PauliType {
    /// Bit-flip type.
    X,
    /// Phase-flip type.
    Z,
}

impl fmt::Display for PauliType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauliType::X => write!(f, "X"),
            PauliType::Z => write!(f, "Z"),
        }
    }
}

/// A single-qubit Pauli, used for injected errors and corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Bit flip.
    X,
    /// Combined flip.
    Y,
    /// Phase flip.
    Z,
}

impl Pauli {
    /// Returns the `(x, z)` bits of this Pauli.
    pub fn bits(self) -> (bool, bool) {
        match self {
            Pauli::I => (false, false),
            Pauli::X => (true, false),
            Pauli::Y => (true, true),
            Pauli::Z => (false, true),
        }
    }

    /// Builds a Pauli from its `(x, z)` bits.
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Pauli::I,
            (true, false) => Pauli::X,
            (true, true) => Pauli::Y,
            (false, true) => Pauli::Z,
        }
    }

    /// Letter used in labels such as `"XZZXI"`.
    pub fn symbol(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A multi-qubit Pauli operator with its phase, `i^phase · X^x · Z^z`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliString {
    x: Vec<bool>,
    z: Vec<bool>,
    /// Exponent of `i`, always reduced modulo 4.
    phase: u8,
}

impl PauliString {
    /// Creates the positive Hermitian Pauli described by the bit vectors.
    pub fn new(x: Vec<bool>, z: Vec<bool>) -> Result<Self, StabError> {
        if x.len() != z.len() {
            return Err(StabError::MalformedGenerator {
                message: format!("x-part has length {} but z-part has length {}", x.len(), z.len()),
            });
        }
        Ok(Self::hermitian(x, z))
    }

    /// Positive Hermitian operator from bit vectors of equal length.
    pub(crate) fn hermitian(x: Vec<bool>, z: Vec<bool>) -> Self {
        let mut pauli = Self { x, z, phase: 0 };
        pauli.phase = (pauli.y_count() % 4) as u8;
        pauli
    }

    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self { x: vec![false; num_qubits], z: vec![false; num_qubits], phase: 0 }
    }

    /// A single-qubit Pauli `pauli` acting on `qubit`, identity elsewhere.
    pub fn single(num_qubits: usize, qubit: usize, pauli: Pauli) -> Result<Self, StabError> {
        if qubit >= num_qubits {
            return Err(StabError::DimensionMismatch {
                message: format!("qubit {} outside a {}-qubit operator", qubit, num_qubits),
            });
        }
        let mut x = vec![false; num_qubits];
        let mut z = vec![false; num_qubits];
        (x[qubit], z[qubit]) = pauli.bits();
        Self::new(x, z)
    }

    /// Parses a pair of binary strings, e.g. `("10010", "01100")` for `XZZXI`.
    pub fn from_bit_strings(x: &str, z: &str) -> Result<Self, StabError> {
        Self::new(parse_bits(x)?, parse_bits(z)?)
    }

    /// Parses a letter label such as `"XZZXI"` or `"-YIZ"`.
    pub fn from_label(label: &str) -> Result<Self, StabError> {
        let (negative, body) = match label.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, label.strip_prefix('+').unwrap_or(label)),
        };
        let mut x = Vec::with_capacity(body.len());
        let mut z = Vec::with_capacity(body.len());
        for ch in body.chars() {
            let (xb, zb) = match ch {
                'I' | '_' => Pauli::I.bits(),
                'X' => Pauli::X.bits(),
                'Y' => Pauli::Y.bits(),
                'Z' => Pauli::Z.bits(),
                other => {
                    return Err(StabError::MalformedGenerator {
                        message: format!("unknown Pauli letter '{}' in \"{}\"", other, label),
                    });
                }
            };
            x.push(xb);
            z.push(zb);
        }
        let mut pauli = Self::new(x, z)?;
        if negative {
            pauli.phase = (pauli.phase + 2) % 4;
        }
        Ok(pauli)
    }

    /// Number of qubits the operator acts on (including identities).
    pub fn num_qubits(&self) -> usize {
        self.x.len()
    }

    /// The x-part bit vector.
    pub fn x_bits(&self) -> &[bool] {
        &self.x
    }

    /// The z-part bit vector.
    pub fn z_bits(&self) -> &[bool] {
        &self.z
    }

    /// The exponent `e` in `i^e · X^x · Z^z`.
    pub fn phase_exponent(&self) -> u8 {
        self.phase
    }

    /// The single-qubit factor on `qubit`.
    pub fn pauli_at(&self, qubit: usize) -> Pauli {
        Pauli::from_bits(self.x[qubit], self.z[qubit])
    }

    /// Number of qubits carrying a `Y` factor.
    pub fn y_count(&self) -> usize {
        self.x.iter().zip(&self.z).filter(|(x, z)| **x && **z).count()
    }

    /// Qubits on which the operator acts nontrivially.
    pub fn support(&self) -> Vec<usize> {
        (0..self.num_qubits()).filter(|&q| self.x[q] || self.z[q]).collect()
    }

    /// Exponent `s` such that the operator equals `i^s` times its `Y`-lettered
    /// Hermitian form. Even values mean a Hermitian operator with sign `(-1)^(s/2)`.
    pub fn sign_exponent(&self) -> u8 {
        ((self.phase as usize + 4 - self.y_count() % 4) % 4) as u8
    }

    /// True when the operator is `-1` times its `Y`-lettered Hermitian form.
    pub fn is_negative(&self) -> bool {
        self.sign_exponent() == 2
    }

    /// True when the operator is Hermitian (sign `+1` or `-1`).
    pub fn is_hermitian(&self) -> bool {
        self.sign_exponent() % 2 == 0
    }

    /// Symplectic inner product of the two operators, mod 2.
    pub fn symplectic_product(&self, other: &PauliString) -> bool {
        let mut acc = false;
        for q in 0..self.num_qubits().min(other.num_qubits()) {
            acc ^= (self.x[q] && other.z[q]) ^ (self.z[q] && other.x[q]);
        }
        acc
    }

    /// True when the two operators commute.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        !self.symplectic_product(other)
    }

    /// Operator product `self · other`, phase included.
    ///
    /// Moving `Z^z1` past `X^x2` contributes `(-1)^(z1·x2)`.
    pub fn compose(&self, other: &PauliString) -> Result<PauliString, StabError> {
        if self.num_qubits() != other.num_qubits() {
            return Err(StabError::DimensionMismatch {
                message: format!(
                    "cannot multiply a {}-qubit Pauli by a {}-qubit Pauli",
                    self.num_qubits(),
                    other.num_qubits()
                ),
            });
        }
        Ok(self.product(other))
    }

    /// [`compose`](Self::compose) for operands already known to share a width.
    pub(crate) fn product(&self, other: &PauliString) -> PauliString {
        let swaps = self.z.iter().zip(&other.x).filter(|(z, x)| **z && **x).count();
        let phase = ((self.phase as usize + other.phase as usize + 2 * swaps) % 4) as u8;
        let x = self.x.iter().zip(&other.x).map(|(a, b)| a ^ b).collect();
        let z = self.z.iter().zip(&other.z).map(|(a, b)| a ^ b).collect();
        PauliString { x, z, phase }
    }

    /// Returns the same operator with its sign flipped.
    pub fn negated(&self) -> PauliString {
        PauliString { x: self.x.clone(), z: self.z.clone(), phase: (self.phase + 2) % 4 }
    }

    /// Letter label such as `"+XZZXI"`; non-Hermitian operators carry an `i`.
    pub fn label(&self) -> String {
        let sign = match self.sign_exponent() {
            0 => "+",
            1 => "+i",
            2 => "-",
            _ => "-i",
        };
        let body: String = (0..self.num_qubits()).map(|q| self.pauli_at(q).symbol()).collect();
        format!("{}{}", sign, body)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn parse_bits(bits: &str) -> Result<Vec<bool>, StabError> {
    bits.chars()
        .map(|ch| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(StabError::MalformedGenerator {
                message: format!("'{}' is not a binary digit in \"{}\"", other, bits),
            }),
        })
        .collect()
}

/// A validated, ordered list of `n - k` stabilizer generators on `n` qubits.
///
/// Construction checks shapes only. Mutual commutation is a caller
/// precondition; [`GeneratorSet::check_commutation`] is the optional guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSet {
    generators: Vec<PauliString>,
    num_qubits: usize,
    num_logical: usize,
}

impl GeneratorSet {
    /// Builds a generator set from already constructed Pauli strings.
    pub fn from_paulis(
        generators: Vec<PauliString>,
        num_qubits: usize,
        num_logical: usize,
    ) -> Result<Self, StabError> {
        if num_logical > num_qubits {
            return Err(StabError::DimensionMismatch {
                message: format!("k = {} exceeds n = {}", num_logical, num_qubits),
            });
        }
        let expected = num_qubits - num_logical;
        if generators.len() != expected {
            return Err(StabError::DimensionMismatch {
                message: format!(
                    "expected n - k = {} generators, got {}",
                    expected,
                    generators.len()
                ),
            });
        }
        for (index, generator) in generators.iter().enumerate() {
            if generator.num_qubits() != num_qubits {
                return Err(StabError::MalformedGenerator {
                    message: format!(
                        "generator {} acts on {} qubits, expected {}",
                        index,
                        generator.num_qubits(),
                        num_qubits
                    ),
                });
            }
        }
        Ok(Self { generators, num_qubits, num_logical })
    }

    /// Parses `(x-part, z-part)` binary string pairs.
    pub fn from_bit_strings<S: AsRef<str>>(
        pairs: &[(S, S)],
        num_qubits: usize,
        num_logical: usize,
    ) -> Result<Self, StabError> {
        let generators = pairs
            .iter()
            .map(|(x, z)| PauliString::from_bit_strings(x.as_ref(), z.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_paulis(generators, num_qubits, num_logical)
    }

    /// Parses letter labels such as `["XZZXI", "IXZZX", ...]`.
    pub fn from_labels<S: AsRef<str>>(
        labels: &[S],
        num_qubits: usize,
        num_logical: usize,
    ) -> Result<Self, StabError> {
        let generators = labels
            .iter()
            .map(|label| PauliString::from_label(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_paulis(generators, num_qubits, num_logical)
    }

    /// The generators in input order.
    pub fn generators(&self) -> &[PauliString] {
        &self.generators
    }

    /// Physical qubit count `n`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Logical qubit count `k`.
    pub fn num_logical(&self) -> usize {
        self.num_logical
    }

    /// Number of generators, `n - k`.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// True for the degenerate `n = k` case with no stabilizers.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Fails with the first anticommuting pair, scanning in index order.
    pub fn check_commutation(&self) -> Result<(), StabError> {
        for (i, a) in self.generators.iter().enumerate() {
            for (j, b) in self.generators.iter().enumerate().skip(i + 1) {
                if !a.commutes_with(b) {
                    return Err(StabError::NonCommuting { first: i, second: j });
                }
            }
        }
        Ok(())
    }

    /// The `(n-k) × n` matrix of x-parts.
    pub fn x_matrix(&self) -> BinaryMatrix {
        BinaryMatrix::from_bool_rows(self.num_qubits, self.generators.iter().map(|g| g.x_bits().to_vec()))
    }

    /// The `(n-k) × n` matrix of z-parts.
    pub fn z_matrix(&self) -> BinaryMatrix {
        BinaryMatrix::from_bool_rows(self.num_qubits, self.generators.iter().map(|g| g.z_bits().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_bits_agree() -> Result<(), StabError> {
        let from_bits = PauliString::from_bit_strings("10010", "01100")?;
        let from_label = PauliString::from_label("XZZXI")?;
        assert_eq!(from_bits, from_label);
        assert_eq!(from_label.label(), "+XZZXI");
        Ok(())
    }

    #[test]
    fn test_y_phase_convention() -> Result<(), StabError> {
        let y = PauliString::from_label("Y")?;
        assert_eq!(y.phase_exponent(), 1);
        assert!(!y.is_negative());
        assert!(y.is_hermitian());
        Ok(())
    }

    #[test]
    fn test_compose_xz_gives_minus_iy() -> Result<(), StabError> {
        let x = PauliString::from_label("X")?;
        let z = PauliString::from_label("Z")?;
        // X·Z = -iY
        let xz = x.compose(&z)?;
        assert_eq!(xz.pauli_at(0), Pauli::Y);
        assert_eq!(xz.sign_exponent(), 3);
        // Z·X = iY
        let zx = z.compose(&x)?;
        assert_eq!(zx.sign_exponent(), 1);
        Ok(())
    }

    #[test]
    fn test_commuting_product_sign() -> Result<(), StabError> {
        // XX · YY = -ZZ
        let xx = PauliString::from_label("XX")?;
        let yy = PauliString::from_label("YY")?;
        let product = xx.compose(&yy)?;
        assert_eq!(product.label(), "-ZZ");
        assert!(product.is_negative());
        Ok(())
    }

    #[test]
    fn test_commutation() -> Result<(), StabError> {
        let a = PauliString::from_label("XZZXI")?;
        let b = PauliString::from_label("IXZZX")?;
        let c = PauliString::from_label("ZIIII")?;
        assert!(a.commutes_with(&b));
        assert!(!a.commutes_with(&c));
        Ok(())
    }

    #[test]
    fn test_malformed_inputs_rejected() {
        assert!(matches!(
            PauliString::from_bit_strings("10a", "000"),
            Err(StabError::MalformedGenerator { .. })
        ));
        assert!(matches!(
            PauliString::from_bit_strings("10", "000"),
            Err(StabError::MalformedGenerator { .. })
        ));
        assert!(matches!(PauliString::from_label("XQ"), Err(StabError::MalformedGenerator { .. })));
        assert!(matches!(
            GeneratorSet::from_bit_strings(&[("10", "01")], 3, 2),
            Err(StabError::MalformedGenerator { .. })
        ));
        assert!(matches!(
            GeneratorSet::from_bit_strings(&[("100", "010")], 3, 1),
            Err(StabError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_check_commutation_reports_pair() -> Result<(), StabError> {
        let set = GeneratorSet::from_labels(&["XX", "ZI"], 2, 0)?;
        assert_eq!(set.check_commutation(), Err(StabError::NonCommuting { first: 0, second: 1 }));
        Ok(())
    }
}

//! The quantum register: a dense vector of 2^n complex amplitudes.

use num_complex::Complex64;

use crate::error::{SimError, SimResult};

/// Widest register that can be allocated. Two buffers at this width take
/// 32 GiB.
pub const MAX_QUBITS: u32 = 30;

/// A statevector of `2^n` amplitudes.
///
/// Bit `k` of a basis index corresponds to qubit `k + 1`. The length is
/// fixed at construction and never changes.
#[derive(Debug, Clone)]
pub struct QuantumRegister {
    /// The state amplitudes (2^n complex numbers).
    pub(crate) amplitudes: Vec<Complex64>,
    /// Second buffer of the same length, written during gate application.
    pub(crate) scratch: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl QuantumRegister {
    /// Create a new register initialized to |0...0⟩.
    ///
    /// Fails for more than [`MAX_QUBITS`] qubits.
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            scratch: vec![Complex64::new(0.0, 0.0); size],
            amplitudes,
            num_qubits,
        })
    }

    /// Create a register from explicit amplitudes. No normalization is applied.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if len == 0 {
            return Err(SimError::EmptyRegister);
        }
        if !len.is_power_of_two() {
            return Err(SimError::NotPowerOfTwo(len));
        }
        Ok(Self {
            scratch: vec![Complex64::new(0.0, 0.0); len],
            amplitudes,
            num_qubits: len.trailing_zeros(),
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of amplitudes (`2^n`).
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false; a register holds at least one amplitude.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Probability of every basis state, normalized by the register norm.
    ///
    /// Returns all zeros for a zero vector.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.norm_sqr();
        self.amplitudes
            .iter()
            .map(|a| {
                if total > 0.0 {
                    a.norm_sqr() / total
                } else {
                    0.0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let reg = QuantumRegister::new(2).unwrap();
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.num_qubits(), 2);
        assert!(approx_eq(reg.amplitudes[0], Complex64::new(1.0, 0.0)));
        for amp in &reg.amplitudes[1..] {
            assert!(approx_eq(*amp, Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_new_rejects_oversized_register() {
        assert!(matches!(
            QuantumRegister::new(64),
            Err(SimError::TooManyQubits {
                requested: 64,
                max: MAX_QUBITS
            })
        ));
        assert!(matches!(
            QuantumRegister::new(MAX_QUBITS + 1),
            Err(SimError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn test_from_amplitudes_checks_length() {
        assert!(matches!(
            QuantumRegister::from_amplitudes(vec![]),
            Err(SimError::EmptyRegister)
        ));
        assert!(matches!(
            QuantumRegister::from_amplitudes(vec![Complex64::new(1.0, 0.0); 3]),
            Err(SimError::NotPowerOfTwo(3))
        ));
        let reg = QuantumRegister::from_amplitudes(vec![Complex64::new(0.5, 0.0); 8]).unwrap();
        assert_eq!(reg.num_qubits(), 3);
    }

    #[test]
    fn test_probabilities_normalize() {
        let reg = QuantumRegister::from_amplitudes(vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 1.0),
        ])
        .unwrap();
        assert!((reg.norm_sqr() - 2.0).abs() < 1e-12);
        let p = reg.probabilities();
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_of_zero_vector() {
        let reg = QuantumRegister::from_amplitudes(vec![Complex64::new(0.0, 0.0); 2]).unwrap();
        assert_eq!(reg.probabilities(), vec![0.0, 0.0]);
    }
}

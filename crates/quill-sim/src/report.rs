//! Amplitude and probability report of a register.

use num_complex::Complex64;
use serde::Serialize;

use crate::register::QuantumRegister;

/// One basis state of the final register.
#[derive(Debug, Clone, Serialize)]
pub struct BasisEntry {
    /// Basis index.
    pub index: usize,
    /// Binary label, qubit n leftmost and qubit 1 rightmost.
    pub label: String,
    /// Complex amplitude.
    pub amplitude: Complex64,
    /// `|amplitude|^2` divided by the register norm.
    pub probability: f64,
}

/// Report of every basis state of a register.
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    /// Number of qubits.
    pub num_qubits: u32,
    /// One entry per basis state, in index order.
    pub entries: Vec<BasisEntry>,
}

impl StateReport {
    /// Build a report from a register.
    pub fn from_register(register: &QuantumRegister) -> Self {
        let num_qubits = register.num_qubits();
        let entries = register
            .amplitudes()
            .iter()
            .zip(register.probabilities())
            .enumerate()
            .map(|(index, (amplitude, probability))| BasisEntry {
                index,
                label: basis_label(index, num_qubits),
                amplitude: *amplitude,
                probability,
            })
            .collect();
        Self {
            num_qubits,
            entries,
        }
    }

    /// Entries whose probability exceeds `threshold`.
    pub fn nonzero(&self, threshold: f64) -> impl Iterator<Item = &BasisEntry> {
        self.entries
            .iter()
            .filter(move |e| e.probability > threshold)
    }

    /// Look up an entry by label.
    pub fn get(&self, label: &str) -> Option<&BasisEntry> {
        self.entries.iter().find(|e| e.label == label)
    }
}

/// Render a basis index as an `num_qubits`-wide binary string.
pub fn basis_label(index: usize, num_qubits: u32) -> String {
    format!("{index:0width$b}", width = num_qubits as usize)
}

//! Qubit identifiers and control sets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A 1-based qubit number as written in source programs.
///
/// Qubit `k` corresponds to bit `k - 1` of a basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The 0-based bit position of this qubit in a basis index.
    #[inline]
    pub fn bit(self) -> u32 {
        self.0 - 1
    }

    /// Single-bit mask selecting this qubit in a basis index.
    #[inline]
    pub fn mask(self) -> usize {
        1 << self.bit()
    }

    /// Whether this qubit is in state 1 for the given basis index.
    #[inline]
    pub fn is_set(self, index: usize) -> bool {
        index & self.mask() != 0
    }

    /// Check that the qubit lies in `1..=num_qubits`.
    pub fn check_range(self, num_qubits: u32) -> IrResult<()> {
        if self.0 == 0 {
            return Err(IrError::InvalidQubit);
        }
        if self.0 > num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit: self,
                num_qubits,
                gate_name: None,
            });
        }
        Ok(())
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(number: u32) -> Self {
        QubitId(number)
    }
}

/// The set of control qubits of a gate.
///
/// Order is kept as written; duplicates are rejected on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Controls(Vec<QubitId>);

impl Controls {
    /// An empty control set.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Build a control set, rejecting repeated qubits.
    pub fn new(qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let mut list: Vec<QubitId> = Vec::new();
        for qubit in qubits {
            if qubit.0 == 0 {
                return Err(IrError::InvalidQubit);
            }
            if list.contains(&qubit) {
                return Err(IrError::DuplicateControl {
                    qubit,
                    gate_name: None,
                });
            }
            list.push(qubit);
        }
        Ok(Self(list))
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the control qubits.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.0.iter().copied()
    }

    /// The first qubit listed more than once, if any.
    pub fn first_duplicate(&self) -> Option<QubitId> {
        self.0
            .iter()
            .enumerate()
            .find(|(i, q)| self.0[..*i].contains(q))
            .map(|(_, q)| *q)
    }

    /// Whether `qubit` is one of the controls.
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.0.contains(&qubit)
    }

    /// OR of all control masks.
    pub fn mask(&self) -> usize {
        self.0.iter().fold(0, |acc, q| acc | q.mask())
    }

    /// Whether every control bit is set in `index`.
    #[inline]
    pub fn is_satisfied(&self, index: usize) -> bool {
        let mask = self.mask();
        index & mask == mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_bit_and_mask() {
        let q = QubitId(3);
        assert_eq!(q.bit(), 2);
        assert_eq!(q.mask(), 0b100);
        assert!(q.is_set(0b110));
        assert!(!q.is_set(0b011));
    }

    #[test]
    fn test_qubit_zero_rejected() {
        assert_eq!(QubitId(0).check_range(4), Err(IrError::InvalidQubit));
        assert_eq!(QubitId(4).check_range(4), Ok(()));
    }

    #[test]
    fn test_check_range() {
        assert!(QubitId(2).check_range(2).is_ok());
        assert!(matches!(
            QubitId(3).check_range(2),
            Err(IrError::QubitOutOfRange { num_qubits: 2, .. })
        ));
    }

    #[test]
    fn test_controls_reject_duplicates() {
        let err = Controls::new([QubitId(1), QubitId(2), QubitId(1)]).unwrap_err();
        assert!(matches!(err, IrError::DuplicateControl { qubit: QubitId(1), .. }));
    }

    #[test]
    fn test_first_duplicate_of_deserialized_controls() {
        let controls: Controls = serde_json::from_str("[3, 1, 3]").unwrap();
        assert_eq!(controls.first_duplicate(), Some(QubitId(3)));
        assert_eq!(Controls::new([QubitId(1), QubitId(2)]).unwrap().first_duplicate(), None);
    }

    #[test]
    fn test_controls_satisfied() {
        let controls = Controls::new([QubitId(1), QubitId(3)]).unwrap();
        assert_eq!(controls.mask(), 0b101);
        assert!(controls.is_satisfied(0b101));
        assert!(controls.is_satisfied(0b111));
        assert!(!controls.is_satisfied(0b100));
        assert!(Controls::none().is_satisfied(0));
    }
}

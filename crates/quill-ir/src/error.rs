//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur when constructing or validating gates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit numbering starts at 1.
    #[error("Qubit numbers start at 1, got 0")]
    InvalidQubit,

    /// Qubit lies outside the register.
    #[error("Qubit {qubit} is out of range: register has {num_qubits} qubits{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the register the gate was checked against.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same control qubit was listed twice.
    #[error("Repeated control qubit {qubit}{}", format_gate_context(.gate_name))]
    DuplicateControl {
        /// The repeated qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A control qubit is also an active qubit of the same gate.
    #[error("Control qubit {qubit} is also an active qubit{}", format_gate_context(.gate_name))]
    ControlOverlapsTarget {
        /// The overlapping qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Swap needs two distinct qubits.
    #[error("SWAP requires two distinct qubits, got {0} twice")]
    SwapSameQubit(QubitId),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced when building or driving a quantum register.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A register needs at least one amplitude.
    #[error("Register must contain at least one amplitude")]
    EmptyRegister,

    /// Amplitude count is not 2^n.
    #[error("Register length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// Requested width is above the allocation ceiling.
    #[error("Register of {requested} qubits exceeds the maximum of {max}")]
    TooManyQubits {
        /// Requested qubit count.
        requested: u32,
        /// Largest supported qubit count.
        max: u32,
    },

    /// Gate does not fit the register.
    #[error("Gate rejected: {0}")]
    Gate(#[from] quill_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

//! Interpreter configuration.

use serde::{Deserialize, Serialize};

use quill_sim::MAX_QUBITS;

/// Register width used when nothing else is configured.
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// Environment variable that overrides [`DEFAULT_MAX_QUBITS`].
pub const MAX_QUBITS_ENV: &str = "QUILL_MAX_QUBITS";

/// Limits applied while interpreting a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Largest qubit count `init` accepts. A register holds `2^n`
    /// amplitudes of 16 bytes each, twice over. Values above
    /// [`MAX_QUBITS`] are capped by [`InterpreterConfig::qubit_limit`].
    pub max_qubits: u32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_qubits: std::env::var(MAX_QUBITS_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_QUBITS),
        }
    }
}

impl InterpreterConfig {
    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The limit `init` enforces: the configured value, never above
    /// the register's allocation ceiling.
    pub fn qubit_limit(&self) -> u32 {
        self.max_qubits.min(MAX_QUBITS)
    }
}

//! The result of interpretation: a gate list and its register.

use tracing::info;

use quill_ir::Gate;
use quill_sim::{QuantumRegister, SimResult};

/// An interpreted program, ready to run.
#[derive(Debug, Clone)]
pub struct Program {
    gates: Vec<Gate>,
    register: QuantumRegister,
}

impl Program {
    pub(crate) fn new(gates: Vec<Gate>, register: QuantumRegister) -> Self {
        Self { gates, register }
    }

    /// The top-level gates in program order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// The register in its initial `|0...0>` state.
    pub fn register(&self) -> &QuantumRegister {
        &self.register
    }

    /// Number of qubits declared by `init`.
    pub fn num_qubits(&self) -> u32 {
        self.register.num_qubits()
    }

    /// Number of built-in operations after macro expansion.
    pub fn primitive_count(&self) -> usize {
        self.gates.iter().map(Gate::primitive_count).sum()
    }

    /// Apply every gate in order and return the final register.
    pub fn execute(self) -> SimResult<QuantumRegister> {
        let Program {
            gates,
            mut register,
        } = self;
        register.run(&gates)?;
        info!(
            qubits = register.num_qubits(),
            gates = gates.len(),
            "program executed"
        );
        Ok(register)
    }
}

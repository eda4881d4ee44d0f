//! Gate execution engine.
//!
//! Every gate is applied with a full pass over the register that writes
//! into the scratch buffer, which then becomes the live buffer. Pairs of
//! amplitudes are therefore always read from the state before the gate.

use num_complex::Complex64;
use tracing::{debug, trace};

use quill_ir::{Controls, Gate, Matrix2, QubitId, StandardGate};

use crate::error::SimResult;
use crate::register::QuantumRegister;

impl QuantumRegister {
    /// Apply a gate after checking that all its qubits fit the register.
    pub fn apply(&mut self, gate: &Gate) -> SimResult<()> {
        gate.validate(self.num_qubits())?;
        self.apply_unchecked(gate);
        Ok(())
    }

    /// Apply a list of gates strictly in order.
    pub fn run(&mut self, gates: &[Gate]) -> SimResult<()> {
        for gate in gates {
            self.apply(gate)?;
        }
        debug!(
            gates = gates.len(),
            qubits = self.num_qubits(),
            "gate list executed"
        );
        Ok(())
    }

    fn apply_unchecked(&mut self, gate: &Gate) {
        trace!(%gate, "applying gate");
        match gate {
            Gate::Standard(op) => {
                if let StandardGate::Swap(partner) = op.gate {
                    self.apply_swap(op.target, partner, &op.controls);
                } else if let Some(matrix) = op.gate.matrix() {
                    self.apply_matrix(&matrix, op.target, &op.controls);
                }
            }
            Gate::Composite(composite) => {
                for member in &composite.gates {
                    self.apply_unchecked(member);
                }
            }
        }
    }

    /// Apply a 2x2 matrix to `target` on every basis index whose control
    /// bits are all set; other amplitudes pass through unchanged.
    fn apply_matrix(&mut self, m: &Matrix2, target: QubitId, controls: &Controls) {
        let mask = target.mask();
        let ctrl_mask = controls.mask();
        self.scratch.fill(Complex64::new(0.0, 0.0));

        for (n, &amp) in self.amplitudes.iter().enumerate() {
            if n & ctrl_mask != ctrl_mask {
                self.scratch[n] += amp;
            } else if n & mask == 0 {
                self.scratch[n] += m[0][0] * amp;
                self.scratch[n | mask] += m[1][0] * amp;
            } else {
                self.scratch[n] += m[1][1] * amp;
                self.scratch[n & !mask] += m[0][1] * amp;
            }
        }

        std::mem::swap(&mut self.amplitudes, &mut self.scratch);
    }

    /// Exchange qubits `a` and `b` on every basis index whose control bits
    /// are all set.
    fn apply_swap(&mut self, a: QubitId, b: QubitId, controls: &Controls) {
        let pair_mask = a.mask() | b.mask();
        let ctrl_mask = controls.mask();

        // Permutation: every destination is written exactly once.
        for (n, &amp) in self.amplitudes.iter().enumerate() {
            let dest = if n & ctrl_mask == ctrl_mask && a.is_set(n) != b.is_set(n) {
                n ^ pair_mask
            } else {
                n
            };
            self.scratch[dest] = amp;
        }

        std::mem::swap(&mut self.amplitudes, &mut self.scratch);
    }
}

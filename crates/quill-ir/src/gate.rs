//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::{Controls, QubitId};

/// A 2x2 complex matrix, row-major: `m[row][col]`.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const IMAG: Complex64 = Complex64::new(0.0, 1.0);

/// Built-in gates of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Phase shift by the given angle (radians).
    P(f64),
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Exchange the target qubit with the given partner.
    Swap(QubitId),
}

impl StandardGate {
    /// The DSL mnemonic of the uncontrolled form.
    #[inline]
    pub fn mnemonic(&self) -> &'static str {
        match self {
            StandardGate::I => "I",
            StandardGate::H => "H",
            StandardGate::X => "X",
            StandardGate::Y => "Y",
            StandardGate::Z => "Z",
            StandardGate::P(_) => "P",
            StandardGate::Rx(_) => "RX",
            StandardGate::Ry(_) => "RY",
            StandardGate::Rz(_) => "RZ",
            StandardGate::Swap(_) => "SWAP",
        }
    }

    /// The angle parameter, if this gate has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::P(a)
            | StandardGate::Rx(a)
            | StandardGate::Ry(a)
            | StandardGate::Rz(a) => Some(*a),
            _ => None,
        }
    }

    /// The swap partner, if this is a swap.
    pub fn partner(&self) -> Option<QubitId> {
        match self {
            StandardGate::Swap(q) => Some(*q),
            _ => None,
        }
    }

    /// The 2x2 unitary of this gate. Swap is structural and has none.
    pub fn matrix(&self) -> Option<Matrix2> {
        let m = match *self {
            StandardGate::I => [[ONE, ZERO], [ZERO, ONE]],
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            StandardGate::X => [[ZERO, ONE], [ONE, ZERO]],
            StandardGate::Y => [[ZERO, -IMAG], [IMAG, ZERO]],
            StandardGate::Z => [[ONE, ZERO], [ZERO, -ONE]],
            StandardGate::P(phi) => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, phi)]],
            StandardGate::Rx(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new(0.0, -(theta / 2.0).sin());
                [[c, s], [s, c]]
            }
            StandardGate::Ry(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                [[c, -s], [s, c]]
            }
            StandardGate::Rz(theta) => [
                [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
                [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
            ],
            StandardGate::Swap(_) => return None,
        };
        Some(m)
    }
}

/// One built-in gate applied to concrete qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate kind and its parameters.
    pub gate: StandardGate,
    /// The active qubit.
    pub target: QubitId,
    /// Control qubits; all must be 1 for the gate to act.
    #[serde(default, skip_serializing_if = "Controls::is_empty")]
    pub controls: Controls,
}

impl Operation {
    /// Create an operation, checking that target, swap partner and
    /// controls are pairwise distinct.
    pub fn new(gate: StandardGate, target: QubitId, controls: Controls) -> IrResult<Self> {
        let op = Self {
            gate,
            target,
            controls,
        };
        op.check_distinct()?;
        Ok(op)
    }

    /// Shared by [`Operation::new`] and [`Operation::validate`].
    fn check_distinct(&self) -> IrResult<()> {
        let gate_name = || Some(self.gate.mnemonic().to_string());
        if self.target.0 == 0 {
            return Err(IrError::InvalidQubit);
        }
        if let Some(partner) = self.gate.partner() {
            if partner.0 == 0 {
                return Err(IrError::InvalidQubit);
            }
            if partner == self.target {
                return Err(IrError::SwapSameQubit(self.target));
            }
        }
        for active in std::iter::once(self.target).chain(self.gate.partner()) {
            if self.controls.contains(active) {
                return Err(IrError::ControlOverlapsTarget {
                    qubit: active,
                    gate_name: gate_name(),
                });
            }
        }
        if let Some(qubit) = self.controls.first_duplicate() {
            return Err(IrError::DuplicateControl {
                qubit,
                gate_name: gate_name(),
            });
        }
        Ok(())
    }

    /// Create an uncontrolled operation.
    pub fn uncontrolled(gate: StandardGate, target: QubitId) -> IrResult<Self> {
        Self::new(gate, target, Controls::none())
    }

    /// Every qubit this operation touches: target, partner, then controls.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        std::iter::once(self.target)
            .chain(self.gate.partner())
            .chain(self.controls.iter())
    }

    /// Check that every qubit lies in `1..=num_qubits` and that target,
    /// partner and controls are pairwise distinct.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        self.check_distinct()?;
        for qubit in self.qubits() {
            qubit.check_range(num_qubits).map_err(|e| match e {
                IrError::QubitOutOfRange {
                    qubit, num_qubits, ..
                } => IrError::QubitOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: Some(self.gate.mnemonic().to_string()),
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.controls.is_empty() {
            write!(f, "C")?;
        }
        write!(f, "{} {}", self.gate.mnemonic(), self.target)?;
        if let Some(partner) = self.gate.partner() {
            write!(f, " {partner}")?;
        }
        if let Some(angle) = self.gate.angle() {
            write!(f, " {angle}")?;
        }
        if !self.controls.is_empty() {
            write!(f, " |")?;
            for c in self.controls.iter() {
                write!(f, " {c}")?;
            }
        }
        Ok(())
    }
}

/// An ordered group of gates produced by one macro expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGate {
    /// Name of the macro that produced this gate.
    pub name: String,
    /// Member gates, applied in order.
    pub gates: Vec<Gate>,
}

impl CompositeGate {
    /// Create a new composite gate.
    pub fn new(name: impl Into<String>, gates: Vec<Gate>) -> Self {
        Self {
            name: name.into(),
            gates,
        }
    }
}

/// A gate in a program: a built-in operation or a macro expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A built-in gate.
    Standard(Operation),
    /// A macro expansion.
    Composite(CompositeGate),
}

impl Gate {
    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(op) => op.gate.mnemonic(),
            Gate::Composite(c) => &c.name,
        }
    }

    /// Number of built-in operations contained in this gate.
    pub fn primitive_count(&self) -> usize {
        match self {
            Gate::Standard(_) => 1,
            Gate::Composite(c) => c.gates.iter().map(Gate::primitive_count).sum(),
        }
    }

    /// Check every qubit of this gate (recursively) against the register width.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        match self {
            Gate::Standard(op) => op.validate(num_qubits),
            Gate::Composite(c) => c.gates.iter().try_for_each(|g| g.validate(num_qubits)),
        }
    }
}

impl From<Operation> for Gate {
    fn from(op: Operation) -> Self {
        Gate::Standard(op)
    }
}

impl From<CompositeGate> for Gate {
    fn from(gate: CompositeGate) -> Self {
        Gate::Composite(gate)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Standard(op) => write!(f, "{op}"),
            Gate::Composite(c) => write!(f, "{} [{} gates]", c.name, self.primitive_count()),
        }
    }
}

//! quill gate representation
//!
//! This crate defines the gates a quill program compiles to. It sits at the
//! bottom of the workspace: the interpreter produces these values and the
//! simulator consumes them.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] is the 1-based qubit number used in source text;
//!   [`Controls`] is a duplicate-free set of control qubits
//! - **Gates**: [`StandardGate`] for the built-in catalog, [`Operation`] binding a
//!   gate to its target and controls, and [`CompositeGate`] for macro expansions
//! - **Gate**: [`Gate`] is the closed sum over both
//!
//! # Example
//!
//! ```rust
//! use quill_ir::{Controls, Gate, Operation, QubitId, StandardGate};
//!
//! // CX with target 2 and control 1
//! let cx = Operation::new(
//!     StandardGate::X,
//!     QubitId(2),
//!     Controls::new([QubitId(1)]).unwrap(),
//! )
//! .unwrap();
//!
//! let gate = Gate::from(cx);
//! assert_eq!(gate.to_string(), "CX 2 | 1");
//! assert!(gate.validate(2).is_ok());
//! assert!(gate.validate(1).is_err());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Parameters | Matrix |
//! |------|------------|--------|
//! | `I` | - | identity |
//! | `H` | - | Hadamard |
//! | `X`, `Y`, `Z` | - | Pauli gates |
//! | `P` | angle | `diag(1, e^{iφ})` |
//! | `RX`, `RY`, `RZ` | angle | rotations |
//! | `SWAP` | partner qubit | permutation, no matrix |
//!
//! Every gate accepts an arbitrary set of control qubits.

pub mod error;
pub mod gate;
pub mod qubit;

pub use error::{IrError, IrResult};
pub use gate::{CompositeGate, Gate, Matrix2, Operation, StandardGate};
pub use qubit::{Controls, QubitId};

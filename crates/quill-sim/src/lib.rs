//! quill statevector engine
//!
//! Executes quill gate lists against a dense register of `2^n` complex
//! amplitudes. Every gate update is a full O(2^n) pass; there is no
//! sparsity, no fusion and no renormalization.
//!
//! # Example
//!
//! ```rust
//! use quill_ir::{Controls, Gate, Operation, QubitId, StandardGate};
//! use quill_sim::{QuantumRegister, StateReport};
//!
//! let h: Gate = Operation::uncontrolled(StandardGate::H, QubitId(1)).unwrap().into();
//! let cx: Gate = Operation::new(StandardGate::X, QubitId(2), Controls::new([QubitId(1)]).unwrap())
//!     .unwrap()
//!     .into();
//!
//! let mut register = QuantumRegister::new(2).unwrap();
//! register.run(&[h, cx]).unwrap();
//!
//! let report = StateReport::from_register(&register);
//! assert!((report.get("11").unwrap().probability - 0.5).abs() < 1e-10);
//! ```
//!
//! # Memory
//!
//! | Qubits | Memory (two buffers) |
//! |--------|----------------------|
//! | 10 | ~32 KB |
//! | 20 | ~32 MB |
//! | 24 | ~512 MB |

mod engine;
pub mod error;
pub mod register;
pub mod report;

pub use error::{SimError, SimResult};
pub use register::{MAX_QUBITS, QuantumRegister};
pub use report::{BasisEntry, StateReport, basis_label};

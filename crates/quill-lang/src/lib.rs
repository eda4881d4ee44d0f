//! quill language front end
//!
//! Turns quill source text into a [`Program`]: an ordered gate list plus a
//! register sized by `init`. Loops are unrolled and macro invocations are
//! expanded into composite gates during interpretation; nothing is
//! deferred to execution time.
//!
//! # Language
//!
//! | Line | Meaning |
//! |------|---------|
//! | `init 3` | Allocate a 3-qubit register (exactly once, before any gate) |
//! | `H 1` | Built-in gate on qubit 1 |
//! | `RZ 2 pi/4` | Gate with an angle |
//! | `SWAP 1 3` | Two-qubit gate |
//! | `CX 2 \| 1` | Controlled form: operands, `\|`, control qubits |
//! | `def bell $a $b` ... `endef` | Macro with parameters |
//! | `bell 1 2` | Macro invocation |
//! | `for $i 1:3` ... `endfor` | Loop over an inclusive ascending range |
//! | `// text` | Comment |
//!
//! Operands are whitespace-free arithmetic expressions over numbers, `pi`,
//! `+ - * /`, parentheses and `$` variables.
//!
//! # Example
//!
//! ```rust
//! let source = "
//!     init 2
//!     def bell $a $b
//!         H $a
//!         CX $b | $a
//!     endef
//!     bell 1 2
//! ";
//!
//! let program = quill_lang::parse(source).unwrap();
//! assert_eq!(program.num_qubits(), 2);
//! assert_eq!(program.primitive_count(), 2);
//!
//! let register = program.execute().unwrap();
//! assert!((register.probabilities()[0b11] - 0.5).abs() < 1e-10);
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod lexer;
pub mod program;

pub use config::InterpreterConfig;
pub use error::{ErrorKind, ExprError, ExprResult, ParseError, ParseResult};
pub use expr::{Environment, Expr, evaluate};
pub use interpreter::Interpreter;
pub use program::Program;

/// Interpret a source text with the default configuration.
pub fn parse(source: &str) -> ParseResult<Program> {
    parse_with_config(source, InterpreterConfig::default())
}

/// Interpret a source text.
pub fn parse_with_config(source: &str, config: InterpreterConfig) -> ParseResult<Program> {
    Interpreter::new(source, config).run()
}

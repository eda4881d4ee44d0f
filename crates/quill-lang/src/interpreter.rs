//! Line-oriented directive interpreter.
//!
//! One [`Interpreter`] is built per parse. It walks the source lines once,
//! expanding loops and macro invocations in place by recursing into the
//! relevant line ranges with a fresh [`Environment`]:
//!
//! - a loop body sees the enclosing environment plus the loop variable;
//! - a macro body sees only its own parameters.
//!
//! Definition bodies are not interpreted when captured. They are checked
//! for structure (no `init`, no nested `def`, balanced loops, no unknown or
//! self-referencing names) and registered once `endef` is reached.

use std::ops::{Range, RangeInclusive};

use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use quill_ir::{CompositeGate, Controls, Gate, Operation, QubitId};
use quill_sim::QuantumRegister;

use crate::config::InterpreterConfig;
use crate::directive::{
    CONTROL_DELIMITER, COMMENT_MARKER, Keyword, Mnemonic, OperandShape, is_reserved,
    is_skippable,
};
use crate::error::{ParseError, ParseResult};
use crate::expr::{self, Environment};
use crate::lexer::is_variable;
use crate::program::Program;

/// A registered macro.
#[derive(Debug, Clone)]
struct Definition {
    name: String,
    /// Formal parameters, `$`-prefixed.
    params: Vec<String>,
    /// 0-based indices of the body lines, excluding `def` and `endef`.
    body: Range<usize>,
}

/// A definition whose `endef` has not been reached yet.
#[derive(Debug)]
struct PendingDefinition {
    name: String,
    params: Vec<String>,
    /// 0-based index of the `def` line.
    start: usize,
    /// Open `for` lines inside the body so far.
    loop_depth: usize,
}

/// One loop being unrolled.
#[derive(Debug, Clone)]
struct LoopFrame {
    variable: String,
    body: Range<usize>,
    values: RangeInclusive<i64>,
}

/// Scope state of one interpretation pass.
#[derive(Debug, Default)]
struct Scope {
    /// Present once `init` has run.
    register: Option<QuantumRegister>,
    open_definition: Option<PendingDefinition>,
    loops: Vec<LoopFrame>,
}

/// Interpreter context for a single source text.
pub struct Interpreter<'src> {
    lines: Vec<&'src str>,
    config: InterpreterConfig,
    scope: Scope,
    definitions: FxHashMap<String, Definition>,
}

impl<'src> Interpreter<'src> {
    /// Create an interpreter over `source`.
    pub fn new(source: &'src str, config: InterpreterConfig) -> Self {
        Self {
            lines: source.lines().collect(),
            config,
            scope: Scope::default(),
            definitions: FxHashMap::default(),
        }
    }

    /// Interpret the whole source, stopping at the first error.
    pub fn run(mut self) -> ParseResult<Program> {
        let mut gates = Vec::new();
        self.interpret_block(0..self.lines.len(), &Environment::new(), &mut gates)?;

        if let Some(pending) = &self.scope.open_definition {
            return Err(ParseError::scope(
                pending.start + 1,
                format!("EOF - definition '{}' not closed", pending.name),
            ));
        }

        let last_line = self.lines.len().max(1);
        let register = self
            .scope
            .register
            .take()
            .ok_or_else(|| ParseError::scope(last_line, "EOF - circuit was never initialised"))?;

        info!(
            qubits = register.num_qubits(),
            gates = gates.len(),
            definitions = self.definitions.len(),
            "program interpreted"
        );
        Ok(Program::new(gates, register))
    }

    /// Interpret the lines of `block` in order, appending gates.
    fn interpret_block(
        &mut self,
        block: Range<usize>,
        env: &Environment,
        gates: &mut Vec<Gate>,
    ) -> ParseResult<()> {
        let mut index = block.start;
        while index < block.end {
            index = self.interpret_line(index, block.end, env, gates)?;
        }
        Ok(())
    }

    /// Interpret one line and return the index of the next line to run.
    fn interpret_line(
        &mut self,
        index: usize,
        block_end: usize,
        env: &Environment,
        gates: &mut Vec<Gate>,
    ) -> ParseResult<usize> {
        let line_no = index + 1;
        let raw: &'src str = self.lines[index];
        let line = raw.trim();
        if is_skippable(line) {
            return Ok(index + 1);
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, operands)) = words.split_first() else {
            return Ok(index + 1);
        };

        if self.scope.open_definition.is_some() {
            self.capture_line(line_no, head, operands)?;
            return Ok(index + 1);
        }

        match Keyword::parse(head) {
            Some(Keyword::Init) => self.init(line_no, operands)?,
            Some(Keyword::Def) => self.open_definition(index, operands)?,
            Some(Keyword::Endef) => {
                let message = if self.scope.loops.is_empty() {
                    "No function defined"
                } else {
                    "endef cannot be declared in loop"
                };
                return Err(ParseError::scope(line_no, message));
            }
            Some(Keyword::For) => return self.for_loop(index, block_end, operands, env, gates),
            Some(Keyword::Endfor) => return Err(ParseError::scope(line_no, "No loop defined")),
            None => {
                if let Some(mnemonic) = Mnemonic::parse(head) {
                    let op = self.build_operation(line_no, head, mnemonic, operands, env)?;
                    trace!(line = line_no, %op, "gate");
                    gates.push(op.into());
                } else if self.definitions.contains_key(head) {
                    let composite = self.expand(line_no, head, operands, env)?;
                    gates.push(composite.into());
                } else {
                    return Err(ParseError::UnknownSymbol {
                        line: line_no,
                        symbol: head.to_string(),
                    });
                }
            }
        }

        Ok(index + 1)
    }

    fn require_initialised(&self, line: usize) -> ParseResult<u32> {
        self.scope
            .register
            .as_ref()
            .map(QuantumRegister::num_qubits)
            .ok_or_else(|| ParseError::scope(line, "Circuit must be initialised"))
    }

    /// `init <n>`
    fn init(&mut self, line: usize, operands: &[&str]) -> ParseResult<()> {
        if !self.scope.loops.is_empty() {
            return Err(ParseError::scope(line, "init cannot be declared in loop"));
        }
        if self.scope.register.is_some() {
            return Err(ParseError::scope(line, "Circuit already initialised"));
        }

        let count = operands
            .first()
            .ok_or_else(|| ParseError::argument(line, "no number of qubits given"))?;
        let num_qubits: u32 = count.parse().map_err(|_| {
            ParseError::argument(
                line,
                format!("number of qubits must be a positive integer, got '{count}'"),
            )
        })?;
        if num_qubits == 0 {
            return Err(ParseError::argument(
                line,
                "number of qubits must be greater than zero",
            ));
        }
        let limit = self.config.qubit_limit();
        if num_qubits > limit {
            return Err(ParseError::argument(
                line,
                format!("number of qubits {num_qubits} exceeds the limit of {limit}"),
            ));
        }
        reject_trailing(line, operands.get(1))?;

        let register = QuantumRegister::new(num_qubits)
            .map_err(|e| ParseError::argument(line, e.to_string()))?;
        info!(qubits = num_qubits, "register initialised");
        self.scope.register = Some(register);
        Ok(())
    }

    /// `def <name> [$param ...]`
    fn open_definition(&mut self, index: usize, operands: &[&str]) -> ParseResult<()> {
        let line = index + 1;
        if !self.scope.loops.is_empty() {
            return Err(ParseError::scope(line, "def cannot be declared in loop"));
        }

        let Some((&name, params)) = operands.split_first() else {
            return Err(ParseError::name(line, "empty def name"));
        };
        if is_reserved(name) || self.definitions.contains_key(name) {
            return Err(ParseError::name(
                line,
                format!("Name already defined - '{name}'"),
            ));
        }
        if name.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseError::name(
                line,
                format!("Invalid name, name can't be a number - '{name}'"),
            ));
        }
        if name.starts_with('$') || name.starts_with(COMMENT_MARKER) || name == CONTROL_DELIMITER {
            return Err(ParseError::name(line, format!("Invalid name - '{name}'")));
        }

        let mut formal: Vec<String> = Vec::with_capacity(params.len());
        for &param in params {
            if !is_variable(param) {
                return Err(ParseError::argument(
                    line,
                    format!("parameter '{param}' must be a '$' variable"),
                ));
            }
            if formal.iter().any(|p| p == param) {
                return Err(ParseError::argument(
                    line,
                    format!("Repeated parameter - '{param}'"),
                ));
            }
            formal.push(param.to_string());
        }

        self.scope.open_definition = Some(PendingDefinition {
            name: name.to_string(),
            params: formal,
            start: index,
            loop_depth: 0,
        });
        Ok(())
    }

    /// Check one line of an open definition body without running it.
    fn capture_line(&mut self, line: usize, head: &str, operands: &[&str]) -> ParseResult<()> {
        let Some(pending) = self.scope.open_definition.as_mut() else {
            return Ok(());
        };

        match Keyword::parse(head) {
            Some(Keyword::Init) => Err(ParseError::scope(
                line,
                "init cannot be declared in definition",
            )),
            Some(Keyword::Def) => Err(ParseError::scope(
                line,
                "def cannot be declared in definition",
            )),
            Some(Keyword::For) => {
                pending.loop_depth += 1;
                Ok(())
            }
            Some(Keyword::Endfor) => {
                if pending.loop_depth == 0 {
                    return Err(ParseError::scope(line, "No loop defined"));
                }
                pending.loop_depth -= 1;
                Ok(())
            }
            Some(Keyword::Endef) => {
                if pending.loop_depth > 0 {
                    return Err(ParseError::scope(line, "endef cannot be declared in loop"));
                }
                reject_trailing(line, operands.first())?;
                self.close_definition(line);
                Ok(())
            }
            None => {
                if head == pending.name {
                    Err(ParseError::name(
                        line,
                        format!("Definition cannot invoke itself - '{head}'"),
                    ))
                } else if Mnemonic::parse(head).is_some() || self.definitions.contains_key(head) {
                    Ok(())
                } else {
                    Err(ParseError::UnknownSymbol {
                        line,
                        symbol: head.to_string(),
                    })
                }
            }
        }
    }

    /// Register the open definition; `endef_line` is 1-based.
    fn close_definition(&mut self, endef_line: usize) {
        let Some(pending) = self.scope.open_definition.take() else {
            return;
        };
        let definition = Definition {
            name: pending.name,
            params: pending.params,
            body: pending.start + 1..endef_line - 1,
        };
        debug!(
            name = %definition.name,
            params = ?definition.params,
            lines = definition.body.len(),
            "definition registered"
        );
        self.definitions.insert(definition.name.clone(), definition);
    }

    /// `for $var <start>:<end>`; returns the index after the matching `endfor`.
    fn for_loop(
        &mut self,
        index: usize,
        block_end: usize,
        operands: &[&str],
        env: &Environment,
        gates: &mut Vec<Gate>,
    ) -> ParseResult<usize> {
        let line = index + 1;
        self.require_initialised(line)?;

        let Some((&variable, bounds)) = operands.split_first() else {
            return Err(ParseError::argument(line, "No loop variable given"));
        };
        if !is_variable(variable) {
            return Err(ParseError::argument(
                line,
                format!("loop variable '{variable}' must be a '$' variable"),
            ));
        }
        let bounds = bounds.concat();
        let Some((start, end)) = bounds.split_once(':') else {
            return Err(ParseError::argument(
                line,
                "Start and End must be separated by ':'",
            ));
        };
        let start = loop_bound(line, start, env)?;
        let end = loop_bound(line, end, env)?;
        let close = self.matching_endfor(index, block_end)?;

        let frame = LoopFrame {
            variable: variable.to_string(),
            body: index + 1..close,
            values: start..=end,
        };
        if frame.values.is_empty() {
            warn!(line, start, end, "empty loop range, body skipped");
        }

        self.scope.loops.push(frame);
        let result = self.unroll_innermost(env, gates);
        self.scope.loops.pop();
        result?;

        Ok(close + 1)
    }

    /// Index of the `endfor` closing the loop opened at `index`.
    fn matching_endfor(&self, index: usize, block_end: usize) -> ParseResult<usize> {
        let mut depth = 0usize;
        for i in index + 1..block_end {
            let mut words = self.lines[i].split_whitespace();
            match words.next().and_then(Keyword::parse) {
                Some(Keyword::For) => depth += 1,
                Some(Keyword::Endfor) if depth == 0 => {
                    reject_trailing(i + 1, words.next().as_ref())?;
                    return Ok(i);
                }
                Some(Keyword::Endfor) => depth -= 1,
                _ => {}
            }
        }
        Err(ParseError::scope(index + 1, "EOF - loop not closed"))
    }

    #[allow(clippy::cast_precision_loss)]
    fn unroll_innermost(&mut self, env: &Environment, gates: &mut Vec<Gate>) -> ParseResult<()> {
        let Some(frame) = self.scope.loops.last().cloned() else {
            return Ok(());
        };
        debug!(
            variable = %frame.variable,
            start = frame.values.start(),
            end = frame.values.end(),
            depth = self.scope.loops.len(),
            "unrolling loop"
        );

        for value in frame.values {
            let child = env.with(frame.variable.as_str(), value as f64);
            self.interpret_block(frame.body.clone(), &child, gates)?;
        }
        Ok(())
    }

    /// Expand a macro invocation into a composite gate.
    fn expand(
        &mut self,
        line: usize,
        name: &str,
        operands: &[&str],
        env: &Environment,
    ) -> ParseResult<CompositeGate> {
        self.require_initialised(line)?;
        let Some(definition) = self.definitions.get(name).cloned() else {
            return Err(ParseError::UnknownSymbol {
                line,
                symbol: name.to_string(),
            });
        };
        if operands.len() != definition.params.len() {
            return Err(ParseError::argument(
                line,
                format!(
                    "invalid number of vars: '{name}' expects {}, got {}",
                    definition.params.len(),
                    operands.len()
                ),
            ));
        }

        let mut bindings = Environment::new();
        for (param, arg) in definition.params.iter().zip(operands) {
            bindings.bind(param.as_str(), eval_operand(line, arg, env)?);
        }

        let mut members = Vec::new();
        self.interpret_block(definition.body.clone(), &bindings, &mut members)?;
        debug!(
            name,
            arguments = operands.len(),
            gates = members.len(),
            "macro expanded"
        );
        Ok(CompositeGate::new(definition.name, members))
    }

    /// Build a built-in gate from its operands and optional `| controls`.
    fn build_operation(
        &self,
        line: usize,
        head: &str,
        mnemonic: Mnemonic,
        operands: &[&str],
        env: &Environment,
    ) -> ParseResult<Operation> {
        let num_qubits = self.require_initialised(line)?;

        let (args, control_words) = match operands.iter().position(|w| *w == CONTROL_DELIMITER) {
            Some(at) => (&operands[..at], Some(&operands[at + 1..])),
            None => (operands, None),
        };

        let controls = match (mnemonic.controlled, control_words) {
            (true, Some(words)) => {
                if words.is_empty() {
                    return Err(ParseError::argument(line, "Requires control qubit(s)"));
                }
                let qubits = words
                    .iter()
                    .map(|w| qubit(line, w, "Control", num_qubits, env))
                    .collect::<ParseResult<Vec<_>>>()?;
                Controls::new(qubits).map_err(|e| ParseError::argument(line, e.to_string()))?
            }
            (true, None) => {
                return Err(ParseError::argument(
                    line,
                    format!("{head} needs '{CONTROL_DELIMITER}' followed by control qubits"),
                ));
            }
            (false, Some(_)) => {
                return Err(ParseError::argument(
                    line,
                    format!("{head} is not a controlled gate; use C{head} for control qubits"),
                ));
            }
            (false, None) => Controls::none(),
        };

        let mut args = args.iter();
        let target = args
            .next()
            .ok_or_else(|| ParseError::argument(line, "Requires active qubit"))?;
        let target = qubit(line, target, "Active", num_qubits, env)?;

        let (angle, partner) = match mnemonic.shape() {
            OperandShape::Single => (None, None),
            OperandShape::Angle => {
                let text = args
                    .next()
                    .ok_or_else(|| ParseError::argument(line, "Requires angle to be given"))?;
                (Some(eval_operand(line, text, env)?), None)
            }
            OperandShape::Pair => {
                let text = args
                    .next()
                    .ok_or_else(|| ParseError::argument(line, "Requires second qubit"))?;
                (None, Some(qubit(line, text, "Second", num_qubits, env)?))
            }
        };
        reject_trailing(line, args.next())?;

        let gate = mnemonic
            .kind
            .instantiate(angle, partner)
            .ok_or_else(|| ParseError::argument(line, format!("invalid operands for {head}")))?;
        Operation::new(gate, target, controls).map_err(|e| ParseError::argument(line, e.to_string()))
    }
}

fn reject_trailing(line: usize, extra: Option<&&str>) -> ParseResult<()> {
    match extra {
        Some(word) => Err(ParseError::argument(
            line,
            format!("invalid syntax: unexpected '{word}'"),
        )),
        None => Ok(()),
    }
}

fn eval_operand(line: usize, text: &str, env: &Environment) -> ParseResult<f64> {
    expr::evaluate(text, env).map_err(|source| ParseError::Evaluation { line, source })
}

#[allow(clippy::cast_possible_truncation)]
fn loop_bound(line: usize, text: &str, env: &Environment) -> ParseResult<i64> {
    let value = eval_operand(line, text, env)?;
    if value.fract() != 0.0 {
        return Err(ParseError::argument(
            line,
            format!("loop bounds must be integers, got {value}"),
        ));
    }
    Ok(value as i64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn qubit(
    line: usize,
    text: &str,
    role: &str,
    num_qubits: u32,
    env: &Environment,
) -> ParseResult<QubitId> {
    let value = eval_operand(line, text, env)?;
    if value.fract() != 0.0 {
        return Err(ParseError::argument(
            line,
            format!("{role} qubit number must be integer, got {value}"),
        ));
    }
    if value < 1.0 || value > f64::from(num_qubits) {
        return Err(ParseError::argument(
            line,
            format!("{role} qubit number must be between 1 and {num_qubits}, got {value}"),
        ));
    }
    Ok(QubitId(value as u32))
}

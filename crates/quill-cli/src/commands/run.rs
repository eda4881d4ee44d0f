//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use quill_sim::StateReport;

use super::common::{load_program, print_report};

/// Execute the run command.
pub fn execute(input: &str, format: &str, all: bool, max_qubits: Option<u32>) -> Result<()> {
    if !matches!(format, "table" | "json") {
        anyhow::bail!("Unknown format: '{format}'. Available: table, json");
    }

    let program = load_program(input, max_qubits)?;
    let num_qubits = program.num_qubits();
    let gate_count = program.primitive_count();
    info!(input, qubits = num_qubits, gates = gate_count, "running program");

    let register = program.execute().context("Execution failed")?;
    let report = StateReport::from_register(&register);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} Ran {} ({} qubits, {} gates)",
        style("→").cyan().bold(),
        style(input).green(),
        num_qubits,
        gate_count
    );
    print_report(&report, all);
    Ok(())
}

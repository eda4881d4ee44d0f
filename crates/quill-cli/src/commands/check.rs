//! Check command implementation.

use anyhow::Result;
use console::style;

use quill_ir::Gate;

use super::common::load_program;

/// Execute the check command.
pub fn execute(input: &str, format: &str, max_qubits: Option<u32>) -> Result<()> {
    if !matches!(format, "summary" | "json") {
        anyhow::bail!("Unknown format: '{format}'. Available: summary, json");
    }

    let program = load_program(input, max_qubits)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(program.gates())?);
        return Ok(());
    }

    println!(
        "{} {} is valid",
        style("✓").green().bold(),
        style(input).green()
    );
    println!("  Qubits: {}", program.num_qubits());
    println!(
        "  Gates:  {} top-level, {} after expansion",
        program.gates().len(),
        program.primitive_count()
    );
    println!();
    for gate in program.gates() {
        print_gate(gate, 1);
    }
    Ok(())
}

fn print_gate(gate: &Gate, depth: usize) {
    let indent = "  ".repeat(depth);
    match gate {
        Gate::Standard(op) => println!("{indent}{op}"),
        Gate::Composite(composite) => {
            println!(
                "{indent}{} [{} gates]",
                style(&composite.name).yellow(),
                gate.primitive_count()
            );
            for member in &composite.gates {
                print_gate(member, depth + 1);
            }
        }
    }
}

//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use num_complex::Complex64;

use quill_lang::{InterpreterConfig, Program};
use quill_sim::{BasisEntry, StateReport};

/// Probabilities at or below this are not printed unless asked for.
const DISPLAY_THRESHOLD: f64 = 1e-12;

/// Load and interpret a quill source file.
pub fn load_program(path: &str, max_qubits: Option<u32>) -> Result<Program> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let mut config = InterpreterConfig::default();
    if let Some(limit) = max_qubits {
        config = config.with_max_qubits(limit);
    }

    quill_lang::parse_with_config(&source, config).map_err(|e| anyhow::anyhow!("Parse error: {e}"))
}

/// Render an amplitude as `re+imi`.
pub fn format_amplitude(amplitude: Complex64) -> String {
    format!("{:.6}{:+.6}i", amplitude.re, amplitude.im)
}

/// Print one line per basis state: amplitude, label, probability and a bar.
pub fn print_report(report: &StateReport, all: bool) {
    println!(
        "\n{} Final state ({} qubits):",
        style("✓").green().bold(),
        report.num_qubits
    );

    let entries: Box<dyn Iterator<Item = &BasisEntry> + '_> = if all {
        Box::new(report.entries.iter())
    } else {
        Box::new(report.nonzero(DISPLAY_THRESHOLD))
    };

    for entry in entries {
        let percent = entry.probability * 100.0;
        let bar: String = "█".repeat((percent / 2.0).round() as usize);

        println!(
            "  {:>22} |{}>  {:>7.3}% {}",
            format_amplitude(entry.amplitude),
            style(&entry.label).cyan(),
            percent,
            style(bar).green()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amplitude() {
        assert_eq!(
            format_amplitude(Complex64::new(0.5, -0.25)),
            "0.500000-0.250000i"
        );
        assert_eq!(format_amplitude(Complex64::new(1.0, 0.0)), "1.000000+0.000000i");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_program("/nonexistent/quill/program.ql", None).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}

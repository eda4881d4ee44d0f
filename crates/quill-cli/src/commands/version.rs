//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit language interpreter and simulator",
        style("quill").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quill-ir    Gate catalog and composite gates");
    println!("  quill-sim   Statevector execution engine");
    println!("  quill-lang  Directive interpreter and expression evaluator");
    println!("  quill-cli   Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}

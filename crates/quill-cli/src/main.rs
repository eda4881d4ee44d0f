//! quill command-line interface
//!
//! ```text
//! quill run -i bell.ql              # interpret, execute, print amplitudes
//! quill run -i bell.ql --format json
//! quill check -i bell.ql            # interpret only, list the gates
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check, run, version};

/// quill - interpreter and statevector simulator for quill circuit programs
#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret and execute a program, then print the final state
    Run {
        /// Input file
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Also print basis states with zero probability
        #[arg(long)]
        all: bool,

        /// Largest register `init` may allocate
        #[arg(long, env = "QUILL_MAX_QUBITS", value_parser = max_qubits_parser())]
        max_qubits: Option<u32>,
    },

    /// Interpret a program without executing it
    Check {
        /// Input file
        #[arg(short, long)]
        input: String,

        /// Output format (summary, json)
        #[arg(short, long, default_value = "summary")]
        format: String,

        /// Largest register `init` may allocate
        #[arg(long, env = "QUILL_MAX_QUBITS", value_parser = max_qubits_parser())]
        max_qubits: Option<u32>,
    },

    /// Show version information
    Version,
}

fn max_qubits_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(quill_sim::MAX_QUBITS))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            input,
            format,
            all,
            max_qubits,
        } => run::execute(&input, &format, all, max_qubits),

        Commands::Check {
            input,
            format,
            max_qubits,
        } => check::execute(&input, &format, max_qubits),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

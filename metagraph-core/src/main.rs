//! Metagraph batch evaluator.
//!
//! ```bash
//! metagraph <input file path> <output file path>
//! ```
//!
//! Any other argument count prints the usage line and exits successfully.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: metagraph <input file path> <output file path>";

/// Evaluate node and edge attributes of a metagraph description
#[derive(Parser)]
#[command(name = "metagraph")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Graph description to read
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,

    /// File to write the resolved attributes to
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
    };

    setup_logging();

    match metagraph_core::run(&cli.input, &cli.output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

mod design;
mod error;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::design::{run_eurorack, run_touch_grid, EurorackArgs, TouchGridArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "asmr", version, about = "Electronics project toolkit")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate PCB artwork
    #[command(subcommand)]
    Design(DesignCommand),
}

#[derive(Subcommand)]
enum DesignCommand {
    /// Capacitive touch sensor grid (SVG or KiCad footprint)
    TouchGrid(TouchGridArgs),
    /// Eurorack front panel outline
    Eurorack(EurorackArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Design(DesignCommand::TouchGrid(args)) => run_touch_grid(args),
        Command::Design(DesignCommand::Eurorack(args)) => run_eurorack(args),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(CliError::usage(err.to_string()).exit_code()),
            };
        }
    };
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(code = ?err.code, "command failed");
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

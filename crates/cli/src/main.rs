//! `tanzo`: validate, simulate and export archetype profiles.

mod commands;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use commands::{Export, Simulate, Validate};
use console::style;
use tanzo_core::SimulationError;

/// Monte Carlo simulation of digital archetype profiles
#[derive(Parser)]
#[command(name = "tanzo")]
#[command(about = "Simulate digital archetype profiles", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Check a profile document
    Validate(Validate),

    /// Run a simulation and print the summary
    Simulate(Simulate),

    /// Print the profile shorthand
    Export(Export),
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome = match cli.command {
        Command::Validate(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
        Command::Export(cmd) => cmd.execute(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let label = style("Error:").red().bold();
            match err.downcast_ref::<SimulationError>() {
                Some(sim) => eprintln!("{} [{}] {}", label, sim.error_code(), render(&err)),
                None => eprintln!("{} {}", label, render(&err)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Joins the cause chain, skipping causes already spelled out by their parent.
fn render(err: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

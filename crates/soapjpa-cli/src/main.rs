//! soapjpa CLI - JPA entity generator for SOAP stubs
//!
//! Commands:
//! - `soapjpa generate` - Generate entities, field interfaces and the factory
//! - `soapjpa check` - Validate a soapjpa.toml project and its class model

use clap::{Parser, Subcommand};
use soapjpa_core::GenerationError;
use std::process::ExitCode;

mod check;
mod codegen;
mod generate;
mod project;
mod writer;

#[cfg(test)]
mod fixtures;

#[derive(Parser)]
#[command(name = "soapjpa")]
#[command(author, version, about = "Generate JPA entities from SOAP stubs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate JPA entities, field-constant interfaces and the factory
    Generate {
        /// JSON class model of the SOAP stubs
        #[arg(short, long)]
        model: Option<String>,

        /// Root directory for generated sources
        #[arg(short, long)]
        output: Option<String>,

        /// Path to soapjpa.toml (default: ./soapjpa.toml when present)
        #[arg(short, long)]
        config: Option<String>,

        /// Name of the identity field (e.g., id)
        #[arg(long)]
        identity_name: Option<String>,

        /// Type of the identity field (e.g., java.lang.Long)
        #[arg(long)]
        identity_type: Option<String>,

        /// Number of worker threads resolving classes
        #[arg(short, long)]
        threads: Option<usize>,

        /// Log every class as it is resolved
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a soapjpa.toml project and its class model
    Check {
        /// Path to soapjpa.toml (default: ./soapjpa.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// JSON class model to validate
        #[arg(short, long)]
        model: Option<String>,

        /// Print the resolved field map of one class
        #[arg(long)]
        class: Option<String>,
    },
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            model,
            output,
            config,
            identity_name,
            identity_type,
            threads,
            verbose,
        } => {
            generate::run(generate::GenerateOptions {
                model,
                output,
                config,
                identity_name,
                identity_type,
                threads,
                verbose,
            })?;
        }
        Commands::Check {
            config,
            model,
            class,
        } => {
            check::run(config, model, class)?;
        }
    }

    Ok(())
}

/// Generation errors exit with 10 + their error code, anything else with 1
fn exit_status(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<GenerationError>())
        .and_then(|e| u8::try_from(10 + e.error_code()).ok())
        .unwrap_or(1)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

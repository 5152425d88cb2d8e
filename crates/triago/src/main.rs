// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triago - LLM-backed support ticket triage service.
//!
//! This is the binary entry point for the Triago server.

mod serve;

use clap::{Parser, Subcommand};

/// Triago - LLM-backed support ticket triage service.
#[derive(Parser, Debug)]
#[command(name = "triago", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the triage HTTP server.
    Serve,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match triago_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            eprintln!("triago: invalid configuration:");
            for error in &errors {
                eprintln!("  - {error}");
            }
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("triago serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("triago config: failed to render configuration: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("triago: use --help for available commands");
        }
    }
}

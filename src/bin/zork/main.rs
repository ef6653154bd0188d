//! Zork CLI - build runner for C++ projects with modules

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zork::util::diagnostic::emit;
use zork::BuildError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            match e.downcast_ref::<BuildError>() {
                Some(build_err) => {
                    emit(&build_err.to_diagnostic(), std::io::stderr().is_terminal())
                }
                None => eprintln!("error: {:#}", e),
            }
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let default_filter = if cli.verbose { "zork=debug" } else { "zork=info" };
    let filter =
        EnvFilter::try_from_env("ZORK_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, cli.verbose),
        Commands::Run(args) => commands::run::execute(args, cli.verbose),
        Commands::New(args) => commands::new::execute(args),
        Commands::Toolchain(args) => commands::toolchain::execute(args),
    }
}

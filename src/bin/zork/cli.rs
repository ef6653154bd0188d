//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Zork - build runner for C++ projects with modules
#[derive(Parser)]
#[command(name = "zork")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print every command line before it runs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the current project
    Build(BuildArgs),

    /// Build the current project and run the executable
    Run(RunArgs),

    /// Create a new Zork project
    New(NewArgs),

    /// Show the toolchain selected for the current project
    Toolchain(ToolchainArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Path to zork.toml (defaults to searching from the current directory)
    #[arg(long, env = "ZORK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the build plan as JSON instead of building
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct RunArgs {
    /// Path to zork.toml (defaults to searching from the current directory)
    #[arg(long, env = "ZORK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct NewArgs {
    /// Project name
    pub name: String,

    /// Directory to create the project in (defaults to name)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Do not scaffold a module interface unit
    #[arg(long)]
    pub no_modules: bool,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// Path to zork.toml (defaults to searching from the current directory)
    #[arg(long, env = "ZORK_CONFIG")]
    pub config: Option<PathBuf>,
}

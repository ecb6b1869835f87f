//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{GulpfileCommand, NewCommand, PlanCommand, ValidateCommand};
use std::ffi::OsString;

/// Scaffold Jekyll sites with a gulp build pipeline
#[derive(Debug, Parser, Clone)]
#[command(name = "jekyllized")]
#[command(version)]
#[command(about = "Scaffolds Jekyll sites with a gulp build and deploy pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a new project
    New(NewCommand),

    /// Print or write only the gulpfile
    Gulpfile(GulpfileCommand),

    /// Show the composed task graph
    Plan(PlanCommand),

    /// Validate a generator configuration
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

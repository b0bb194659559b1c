//! Command-line interface for livenote.
//!
//! This module provides the CLI structure and command definitions for the
//! `livenote` binary.

mod commands;
mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ArchiveCommand, CompressCommand, ConfigCommand, ExportCommand, OutputFormat, RecordCommand,
    StatusCommand,
};
pub use repl::{parse_line, SessionCommand, HELP_TEXT};

/// livenote - Timestamped notes for your streams
///
/// A stopwatch-driven note logger: record timestamped notes while the
/// timer runs, archive finished streams, and export note logs as text.
#[derive(Debug, Parser)]
#[command(name = "livenote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an interactive recording session
    Record(RecordCommand),

    /// Show timer, note log, and archive status
    Status(StatusCommand),

    /// Export the working note log as plain text
    Export(ExportCommand),

    /// Manage archived streams
    #[command(subcommand)]
    Archive(ArchiveCommand),

    /// Compress an image to the configured square canvas
    Compress(CompressCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

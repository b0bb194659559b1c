//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Record command arguments.
#[derive(Debug, Args)]
pub struct RecordCommand {
    /// Start the timer immediately instead of waiting for `:start`
    #[arg(short, long)]
    pub autostart: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments (working note log).
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Directory to write the export into (defaults to configured dir)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Compress command arguments.
#[derive(Debug, Args)]
pub struct CompressCommand {
    /// The image file to compress
    pub input: PathBuf,

    /// Output file (defaults to compressed_<input>.jpg next to the input)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Archive management commands.
#[derive(Debug, Subcommand)]
pub enum ArchiveCommand {
    /// List archived streams
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one archived stream with its notes
    Show {
        /// The stream's name
        name: String,
    },

    /// Rename an archived stream
    Rename {
        /// The stream's current name
        name: String,

        /// The new name
        new_name: String,
    },

    /// Delete an archived stream
    Delete {
        /// The stream's name
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export an archived stream's notes as plain text
    Export {
        /// The stream's name
        name: String,

        /// Directory to write the export into
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Rewrite the text of one note in an archived stream
    EditNote {
        /// The stream's name
        name: String,

        /// Zero-based note index
        index: usize,

        /// The replacement text
        text: String,
    },

    /// Delete one note from an archived stream
    DeleteNote {
        /// The stream's name
        name: String,

        /// Zero-based note index
        index: usize,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

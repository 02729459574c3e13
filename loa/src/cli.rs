//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Loagen - Letter of Authorization generator
#[derive(Parser)]
#[command(
    name = "loa",
    about = "Generate and revise Letters of Authorization for outdoor advertising",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a letter from a parameter file
    Generate {
        /// Path to the YAML parameter file
        #[arg(short, long, value_name = "FILE")]
        params: PathBuf,

        /// Output path for the Word document (defaults to config)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the letter text verbatim to this file
        #[arg(long, value_name = "FILE")]
        text: Option<PathBuf>,

        /// Also write the conversation transcript as JSON to this file
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,

        /// Enter an interactive revision loop after generating
        #[arg(short, long)]
        edit: bool,
    },

    /// Classify an existing letter text file and export it as a Word document
    Render {
        /// Path to the plain-text letter
        input: PathBuf,

        /// Output path for the Word document (defaults to config)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::PayloadKind;
use std::path::PathBuf;

/// msgconv - detection metadata to broker message converter
#[derive(Parser, Debug)]
#[command(
    name = "msgconv",
    author,
    version,
    about = "Detection metadata to broker message converter",
    long_about = "Developer tools for the message converter.\n\n\
                  Validates sensor configuration files and renders batches of \n\
                  detection events into full, minimal or custom schema payloads."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "MSGCONV_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "MSGCONV_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a sensor configuration file
    Validate(ValidateArgs),

    /// Render a JSON file of events into payloads
    Render(RenderArgs),
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to sensor configuration file (key-value or .csv)
    #[arg(
        short,
        long,
        default_value = "msgconv_config.txt",
        env = "MSGCONV_CONFIG"
    )]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `render` command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// JSON file holding one batch (array of events) or several (array of arrays)
    #[arg(short, long)]
    pub events: PathBuf,

    /// Message schema
    #[arg(
        short,
        long,
        value_enum,
        default_value = "full",
        env = "MSGCONV_SCHEMA"
    )]
    pub schema: SchemaArg,

    /// Sensor configuration file (required for the full schema)
    #[arg(short, long, env = "MSGCONV_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Schema selector
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaArg {
    Full,
    Minimal,
    Custom,
}

impl From<SchemaArg> for PayloadKind {
    fn from(schema: SchemaArg) -> Self {
        match schema {
            SchemaArg::Full => PayloadKind::FullSchema,
            SchemaArg::Minimal => PayloadKind::MinimalSchema,
            SchemaArg::Custom => PayloadKind::Custom,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

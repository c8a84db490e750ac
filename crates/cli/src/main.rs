//! # msgconv CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 传感器配置校验
//! - 事件批次 -> 载荷渲染

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_render, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "msgconv starting");

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args),
        Commands::Render(args) => run_render(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(observability::ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
    })
}

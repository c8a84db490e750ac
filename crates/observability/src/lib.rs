//! # Observability
//!
//! 可观测性模块：Tracing 初始化 + 转换指标。
//!
//! ## 功能
//!
//! - Tracing 初始化 (JSON/Pretty/Compact 格式)
//! - 消息生成指标 (`metrics` facade)
//!
//! ## 使用示例
//!
//! ```ignore
//! observability::init()?;
//!
//! if let Some(payload) = ctx.generate(&events) {
//!     // hand payload to the transport
//! }
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Re-exports
pub use crate::metrics::{
    record_attributes_skipped, record_context_created, record_payload_generated,
    record_payload_skipped,
};

/// 初始化 Tracing（JSON 格式，支持 RUST_LOG 环境变量）
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// 可观测性配置
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// 日志格式
    pub log_format: LogFormat,
    /// 默认日志级别 (RUST_LOG 未设置时)
    pub default_log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            default_log_level: "info".to_string(),
        }
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 结构化日志
    #[default]
    Json,
    /// 人类可读格式
    Pretty,
    /// 紧凑单行格式
    Compact,
}

/// 使用自定义配置初始化
///
/// 日志写入 stderr，stdout 留给载荷输出。
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .with_writer(io::stderr)
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(io::stderr).pretty().boxed(),
        LogFormat::Compact => fmt::layer().with_writer(io::stderr).compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        log_format = ?config.log_format,
        level = %config.default_log_level,
        "Observability initialized"
    );

    Ok(())
}

//! # Msgconv
//!
//! 检测元数据 -> 消息代理载荷转换模块。
//!
//! 负责：
//! - 持有传感器配置 (`MsgConvContext`)
//! - 按 schema 生成 JSON 载荷 (full / minimal / custom)
//! - 载荷生命周期：生成、交付、释放
//!
//! # Example
//!
//! ```no_run
//! use contracts::{EventMessageMeta, FrameObjectDescription, PayloadKind};
//! use std::path::Path;
//!
//! let ctx = msgconv::create_context(Some(Path::new("msgconv_config.txt")), PayloadKind::FullSchema)
//!     .unwrap();
//! let event = EventMessageMeta::for_frame(0, FrameObjectDescription::new(30, 1920, 1080));
//! if let Some(payload) = msgconv::generate(&ctx, &[event]) {
//!     // hand payload.as_bytes() to the broker
//!     msgconv::release(payload);
//! }
//! msgconv::destroy_context(ctx);
//! ```

pub mod context;
pub mod error;
pub mod metrics;
pub mod schema;

pub use context::MsgConvContext;
pub use contracts::{EventMessageMeta, Payload, PayloadKind};
pub use error::{MsgConvError, SkipReason};
pub use metrics::{GenerationMetrics, MetricsSnapshot};

use std::path::Path;

/// Create a conversion context
pub fn create_context(
    config_path: Option<&Path>,
    payload_kind: PayloadKind,
) -> Result<MsgConvContext, MsgConvError> {
    MsgConvContext::create(config_path, payload_kind)
}

/// Destroy a conversion context
pub fn destroy_context(ctx: MsgConvContext) {
    ctx.destroy();
}

/// Generate one payload for a batch of events
pub fn generate(ctx: &MsgConvContext, events: &[EventMessageMeta]) -> Option<Payload> {
    ctx.generate(events)
}

/// Generate 0 or 1 payloads for a batch of events
pub fn generate_multiple(ctx: &MsgConvContext, events: &[EventMessageMeta]) -> Vec<Payload> {
    ctx.generate_multiple(events)
}

/// Release a payload
pub fn release(payload: Payload) {
    payload.release();
}

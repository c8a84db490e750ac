//! Message converter metrics
//!
//! Thin wrappers over the `metrics` facade. Nothing is exported unless the
//! embedding process installs a recorder.

use contracts::PayloadKind;
use metrics::{counter, gauge, histogram};

/// Record a context creation
pub fn record_context_created(kind: PayloadKind, sensors: usize) {
    counter!("msgconv_contexts_created_total", "kind" => kind.as_str()).increment(1);
    gauge!("msgconv_configured_sensors", "kind" => kind.as_str()).set(sensors as f64);
}

/// Record a generated payload
pub fn record_payload_generated(kind: PayloadKind, bytes: usize) {
    counter!("msgconv_payloads_generated_total", "kind" => kind.as_str()).increment(1);
    histogram!("msgconv_payload_bytes", "kind" => kind.as_str()).record(bytes as f64);
}

/// Record a batch that produced no payload
pub fn record_payload_skipped(kind: PayloadKind, reason: &'static str) {
    counter!(
        "msgconv_payloads_skipped_total",
        "kind" => kind.as_str(),
        "reason" => reason
    )
    .increment(1);
}

/// Record minimal-schema attribute sections that were left out
pub fn record_attributes_skipped(object_type: &'static str) {
    counter!(
        "msgconv_attributes_skipped_total",
        "object_type" => object_type
    )
    .increment(1);
}

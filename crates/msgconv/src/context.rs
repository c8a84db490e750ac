//! MsgConvContext - payload lifecycle
//!
//! Holds the payload kind and the read-only sensor table. Generation takes
//! `&self`, so one context can serve several threads; destruction consumes
//! the context and therefore happens after every in-flight call.

use std::path::Path;

use config_loader::ConfigLoader;
use contracts::{EventMessageMeta, Payload, PayloadKind, SensorTable};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{MsgConvError, SkipReason};
use crate::metrics::GenerationMetrics;
use crate::schema::{custom, full, minimal};

/// Conversion context
#[derive(Debug)]
pub struct MsgConvContext {
    payload_kind: PayloadKind,
    sensors: Option<SensorTable>,
    metrics: GenerationMetrics,
}

impl MsgConvContext {
    /// Create a context, parsing the sensor configuration if given
    ///
    /// The full schema needs a configuration file; the minimal and custom
    /// schemas read one when provided.
    ///
    /// # Errors
    /// - `MissingConfig` for the full schema without a path
    /// - `Config` when the file cannot be read or parsed
    #[instrument(
        name = "msgconv_create_context",
        skip(config_path),
        fields(config = ?config_path.map(Path::display))
    )]
    pub fn create(
        config_path: Option<&Path>,
        payload_kind: PayloadKind,
    ) -> Result<Self, MsgConvError> {
        let sensors = match (payload_kind, config_path) {
            (PayloadKind::FullSchema, None) => {
                return Err(MsgConvError::MissingConfig { kind: payload_kind });
            }
            (_, Some(path)) => {
                let table = ConfigLoader::load_from_path(path).map_err(|e| {
                    error!(error = %e, "Error in creating instance");
                    e
                })?;
                Some(table)
            }
            (_, None) => None,
        };

        Ok(Self::with_sensors(payload_kind, sensors))
    }

    /// Create a context from an already built sensor table
    pub fn with_sensors(payload_kind: PayloadKind, sensors: Option<SensorTable>) -> Self {
        let sensor_count = sensors.as_ref().map_or(0, SensorTable::len);
        info!(kind = %payload_kind, sensors = sensor_count, "Context created");
        observability::record_context_created(payload_kind, sensor_count);

        Self {
            payload_kind,
            sensors,
            metrics: GenerationMetrics::new(),
        }
    }

    pub fn payload_kind(&self) -> PayloadKind {
        self.payload_kind
    }

    /// Sensor table, if a configuration was parsed
    pub fn sensors(&self) -> Option<&SensorTable> {
        self.sensors.as_ref()
    }

    pub fn metrics(&self) -> &GenerationMetrics {
        &self.metrics
    }

    /// Generate one payload for a batch, reporting why none was produced
    #[instrument(
        name = "msgconv_generate",
        skip(self, events),
        fields(kind = %self.payload_kind, events = events.len())
    )]
    pub fn try_generate(&self, events: &[EventMessageMeta]) -> Result<Payload, SkipReason> {
        let result = match self.payload_kind {
            PayloadKind::FullSchema => full::generate(self.sensors(), events).map(Payload::from),
            PayloadKind::MinimalSchema => {
                minimal::generate(self.sensors(), events).map(Payload::from)
            }
            PayloadKind::Custom => Ok(custom::generate()),
        };

        match &result {
            Ok(payload) => {
                self.metrics.record_generated(payload.len());
                observability::record_payload_generated(self.payload_kind, payload.len());
            }
            Err(reason) => {
                self.metrics.record_skipped();
                observability::record_payload_skipped(self.payload_kind, reason.label());
            }
        }
        result
    }

    /// Generate one payload for a batch
    ///
    /// `None` means nothing is sent for this batch; the reason is logged.
    pub fn generate(&self, events: &[EventMessageMeta]) -> Option<Payload> {
        match self.try_generate(events) {
            Ok(payload) => {
                debug!(bytes = payload.len(), "Payload generated");
                Some(payload)
            }
            Err(reason) if reason.is_expected() => {
                debug!(reason = %reason, "No payload for batch");
                None
            }
            Err(reason) => {
                warn!(reason = %reason, "No payload for batch");
                None
            }
        }
    }

    /// Batch variant of [`generate`](Self::generate)
    ///
    /// One message is produced per batch, so the result holds 0 or 1
    /// payloads.
    pub fn generate_multiple(&self, events: &[EventMessageMeta]) -> Vec<Payload> {
        self.generate(events).into_iter().collect()
    }

    /// Release a payload produced by this context
    pub fn release(&self, payload: Payload) {
        payload.release();
    }

    /// Tear down the context
    pub fn destroy(self) {
        let snapshot = self.metrics.snapshot();
        info!(
            kind = %self.payload_kind,
            generated = snapshot.generated_count,
            skipped = snapshot.skipped_count,
            bytes = snapshot.bytes_total,
            "Context destroyed"
        );
    }
}

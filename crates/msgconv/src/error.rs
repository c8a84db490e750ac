//! Message converter error types

use contracts::{ContractError, PayloadKind};
use thiserror::Error;

/// Context creation errors
#[derive(Debug, Error)]
pub enum MsgConvError {
    /// Payload kind needs a sensor configuration file
    #[error("payload kind '{kind}' requires a sensor configuration file")]
    MissingConfig { kind: PayloadKind },

    /// Configuration could not be loaded (from contract)
    #[error("error in creating instance: {0}")]
    Config(#[from] ContractError),
}

/// Why a batch produced no payload
///
/// None of these are fatal; the caller may log and continue with the next
/// batch.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// No events were passed in
    #[error("event batch is empty")]
    EmptyBatch,

    /// First event has no frame object description attached
    #[error("first event carries no frame object description")]
    MissingFrameDescription,

    /// Frame has zero detected objects
    #[error("frame {frame_id} has no detected objects")]
    EmptyFrame { frame_id: u32 },

    /// Sensor index not present in the sensor table
    #[error("no entry for sensor{sensor_id} in configuration file")]
    UnresolvedSensor { sensor_id: u32 },

    /// JSON serialization failed
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SkipReason {
    /// Short label used for metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmptyBatch => "empty_batch",
            Self::MissingFrameDescription => "missing_frame_description",
            Self::EmptyFrame { .. } => "empty_frame",
            Self::UnresolvedSensor { .. } => "unresolved_sensor",
            Self::Serialize(_) => "serialize",
        }
    }

    /// Whether this is a deliberate no-emission rather than a failure
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::EmptyFrame { .. })
    }
}

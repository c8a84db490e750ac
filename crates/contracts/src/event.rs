//! EventMessageMeta - one outgoing message unit
//!
//! Owned value type: `Clone` is the deep copy (every string and the extended
//! payload are duplicated) and `Drop` is the matching release.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::mem;

use crate::{BoundingBox, FrameObjectDescription, ObjectType};

/// Event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Frame-level custom event carrying a `FrameObjectDescription`
    #[default]
    Custom,
    /// Single detection with secondary-inference attributes
    Detection,
}

/// Secondary-inference attributes of a vehicle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleAttributes {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub region: Option<String>,
    pub license: Option<String>,
}

/// Secondary-inference attributes of a person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonAttributes {
    pub gender: Option<String>,
    pub hair: Option<String>,
    pub cap: Option<String>,
    pub apparel: Option<String>,
    pub age: i32,
}

/// Extended payload attached to an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedPayload {
    #[default]
    None,
    Vehicle(VehicleAttributes),
    Person(PersonAttributes),
    FrameObjects(Box<FrameObjectDescription>),
}

impl ExtendedPayload {
    /// In-memory size of the attached payload, 0 when absent
    pub fn size(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Vehicle(v) => mem::size_of_val(v),
            Self::Person(p) => mem::size_of_val(p),
            Self::FrameObjects(f) => mem::size_of_val(f.as_ref()),
        }
    }

    pub fn frame_objects(&self) -> Option<&FrameObjectDescription> {
        match self {
            Self::FrameObjects(frame) => Some(frame),
            _ => None,
        }
    }
}

/// One outgoing message unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMessageMeta {
    #[serde(default, rename = "type")]
    pub event_type: EventType,

    /// Index into the context's sensor table
    #[serde(default)]
    pub sensor_id: u32,

    /// Sensor string overriding the table lookup in the minimal schema
    #[serde(default)]
    pub sensor_label: Option<String>,

    /// RFC3339 UTC timestamp with millisecond precision
    pub timestamp: String,

    #[serde(default)]
    pub frame_id: u32,

    #[serde(default)]
    pub tracking_id: i64,

    #[serde(default)]
    pub bbox: BoundingBox,

    #[serde(default)]
    pub confidence: f64,

    #[serde(default)]
    pub object_type: ObjectType,

    /// Free-form object id, used as the label of `Unknown` objects
    #[serde(default)]
    pub object_id: Option<String>,

    #[serde(default)]
    pub extended: ExtendedPayload,
}

impl EventMessageMeta {
    /// Create an event stamped with the current time
    pub fn new(sensor_id: u32, frame_id: u32) -> Self {
        Self {
            sensor_id,
            frame_id,
            timestamp: rfc3339_now(),
            ..Self::default()
        }
    }

    /// Create a frame-level custom event owning `frame`
    pub fn for_frame(sensor_id: u32, frame: FrameObjectDescription) -> Self {
        Self {
            event_type: EventType::Custom,
            frame_id: frame.frame_id,
            extended: ExtendedPayload::FrameObjects(Box::new(frame)),
            ..Self::new(sensor_id, 0)
        }
    }

    pub fn extended_payload_size(&self) -> usize {
        self.extended.size()
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn rfc3339_now() -> String {
    format_rfc3339(Utc::now())
}

/// Format a UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_rfc3339(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Minimal schema
//!
//! ```json
//! {"version":"4.0","id":F,"@timestamp":"<ts>","sensorId":"<id>",
//!  "objects":["957|1834|150|1918|215|Vehicle|#|sedan|Bugatti|M|blue|CA 444|California|0.8"]}
//! ```
//!
//! One pipe-delimited string per event. Frame id, timestamp and sensor are
//! taken from the first event.

use contracts::{
    EventMessageMeta, ExtendedPayload, ObjectType, PersonAttributes, SensorTable,
    VehicleAttributes,
};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::warn;

use super::StreamFloat;
use crate::error::SkipReason;

pub const MINIMAL_VERSION: &str = "4.0";

/// `sensorId` when neither a label nor a sensor table is available
pub const DEFAULT_SENSOR_ID: &str = "0";

// Field order is wire order.
#[derive(Serialize)]
struct MinimalMessage<'a> {
    version: &'static str,
    id: u32,
    #[serde(rename = "@timestamp")]
    timestamp: &'a str,
    #[serde(rename = "sensorId")]
    sensor_id: &'a str,
    objects: Vec<String>,
}

/// Build the minimal-schema message for a batch
pub fn generate(
    sensors: Option<&SensorTable>,
    events: &[EventMessageMeta],
) -> Result<String, SkipReason> {
    let first = events.first().ok_or(SkipReason::EmptyBatch)?;

    let message = MinimalMessage {
        version: MINIMAL_VERSION,
        id: first.frame_id,
        timestamp: &first.timestamp,
        sensor_id: sensor_id_str(sensors, first),
        objects: events.iter().map(encode_object).collect(),
    };

    Ok(serde_json::to_string(&message)?)
}

/// `trackingId|left|top|right|bottom|type[|#|attributes...]`
pub fn encode_object(event: &EventMessageMeta) -> String {
    let bbox = &event.bbox;
    let mut out = String::with_capacity(64);

    // Writing into a String cannot fail
    let _ = write!(
        out,
        "{}|{}|{}|{}|{}|{}",
        event.tracking_id,
        StreamFloat(bbox.left),
        StreamFloat(bbox.top),
        StreamFloat(bbox.right()),
        StreamFloat(bbox.bottom()),
        type_label(event)
    );

    match (&event.extended, event.object_type) {
        (ExtendedPayload::None, _) => {}
        (ExtendedPayload::Vehicle(vehicle), ObjectType::Vehicle) => {
            push_vehicle(&mut out, vehicle, event.confidence)
        }
        (ExtendedPayload::Person(person), ObjectType::Person) => {
            push_person(&mut out, person, event.confidence)
        }
        (_, object_type) => {
            warn!(
                object_type = %object_type,
                tracking_id = event.tracking_id,
                "Object type not implemented, attributes skipped"
            );
            observability::record_attributes_skipped(object_type.canonical_name());
        }
    }

    out
}

fn type_label(event: &EventMessageMeta) -> &str {
    match event.object_type {
        ObjectType::Unknown => event
            .object_id
            .as_deref()
            .unwrap_or(ObjectType::Unknown.canonical_name()),
        other => other.canonical_name(),
    }
}

fn push_vehicle(out: &mut String, vehicle: &VehicleAttributes, confidence: f64) {
    let _ = write!(
        out,
        "|#|{}|{}|{}|{}|{}|{}|{}",
        opt(&vehicle.vehicle_type),
        opt(&vehicle.make),
        opt(&vehicle.model),
        opt(&vehicle.color),
        opt(&vehicle.license),
        opt(&vehicle.region),
        StreamFloat(confidence)
    );
}

fn push_person(out: &mut String, person: &PersonAttributes, confidence: f64) {
    let _ = write!(
        out,
        "|#|{}|{}|{}|{}|{}|{}",
        opt(&person.gender),
        person.age,
        opt(&person.hair),
        opt(&person.cap),
        opt(&person.apparel),
        StreamFloat(confidence)
    );
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Sensor label, else table id, else `"0"`
///
/// With a table present but no matching entry the id is empty.
fn sensor_id_str<'a>(sensors: Option<&'a SensorTable>, first: &'a EventMessageMeta) -> &'a str {
    if let Some(label) = first.sensor_label.as_deref() {
        return label;
    }
    match sensors {
        Some(table) => match table.resolve(first.sensor_id) {
            Ok(record) => &record.id,
            Err(e) => {
                warn!(error = %e, "Sensor id left empty");
                ""
            }
        },
        None => DEFAULT_SENSOR_ID,
    }
}

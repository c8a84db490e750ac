//! Full schema
//!
//! ```json
//! {"messageid":"<uuid>","mdsversion":"1.0","@timestamp":"<rfc3339-ms>",
//!  "sensor":{"id":"..","type":"..","description":".."},
//!  "objects":[{"trackingId":N,"bbox":[top,left,width,height],"type":"label"}],
//!  "frame":{"width":W,"height":H,"frameId":F}}
//! ```
//!
//! All events of a batch share one frame; only the first event is read.

use contracts::{EventMessageMeta, FrameObjectDescription, SensorRecord, SensorTable};
use serde::Serialize;
use uuid::Uuid;

use crate::error::SkipReason;

pub const MDS_VERSION: &str = "1.0";

// Field order is wire order.
#[derive(Serialize)]
struct FullMessage<'a> {
    messageid: String,
    mdsversion: &'static str,
    #[serde(rename = "@timestamp")]
    timestamp: &'a str,
    sensor: SensorObject<'a>,
    objects: Vec<ObjectEntry<'a>>,
    frame: FrameEntry,
}

#[derive(Serialize)]
struct SensorObject<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    sensor_type: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct ObjectEntry<'a> {
    #[serde(rename = "trackingId")]
    tracking_id: i32,
    bbox: [f64; 4],
    #[serde(rename = "type")]
    label: &'a str,
}

#[derive(Serialize)]
struct FrameEntry {
    width: u32,
    height: u32,
    #[serde(rename = "frameId")]
    frame_id: u32,
}

/// Build the full-schema message for a batch
pub fn generate(
    sensors: Option<&SensorTable>,
    events: &[EventMessageMeta],
) -> Result<String, SkipReason> {
    let first = events.first().ok_or(SkipReason::EmptyBatch)?;
    let frame = first
        .extended
        .frame_objects()
        .ok_or(SkipReason::MissingFrameDescription)?;

    if frame.objects().is_empty() {
        return Err(SkipReason::EmptyFrame {
            frame_id: frame.frame_id,
        });
    }

    let sensor = sensors
        .and_then(|table| table.get(first.sensor_id))
        .ok_or(SkipReason::UnresolvedSensor {
            sensor_id: first.sensor_id,
        })?;

    let message = FullMessage {
        messageid: Uuid::new_v4().to_string(),
        mdsversion: MDS_VERSION,
        timestamp: &first.timestamp,
        sensor: sensor_object(sensor),
        objects: object_array(frame),
        frame: frame_entry(frame),
    };

    Ok(serde_json::to_string(&message)?)
}

fn sensor_object(sensor: &SensorRecord) -> SensorObject<'_> {
    SensorObject {
        id: &sensor.id,
        sensor_type: &sensor.sensor_type,
        description: &sensor.description,
    }
}

fn object_array(frame: &FrameObjectDescription) -> Vec<ObjectEntry<'_>> {
    frame
        .objects()
        .iter()
        .map(|object| ObjectEntry {
            tracking_id: object.tracking_id,
            bbox: object.bbox.to_array(),
            label: object.label.as_str(),
        })
        .collect()
}

fn frame_entry(frame: &FrameObjectDescription) -> FrameEntry {
    FrameEntry {
        width: frame.frame_width,
        height: frame.frame_height,
        frame_id: frame.frame_id,
    }
}

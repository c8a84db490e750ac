//! Detected-object model
//!
//! `SimpleObjectMeta` describes one detection, `FrameObjectDescription`
//! aggregates the detections of one frame.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Deref;

/// Maximum number of objects kept per frame
pub const MAX_OBJ_NUM: usize = 256;

/// Label storage size; a stored label is always shorter than this (bytes)
pub const MAX_LABEL_SIZE: usize = 128;

/// Object class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectType {
    Vehicle,
    Person,
    Face,
    Bag,
    Bicycle,
    RoadSign,
    Custom,
    #[default]
    Unknown,
}

impl ObjectType {
    /// Canonical name used on the wire
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Vehicle => "Vehicle",
            Self::Person => "Person",
            Self::Face => "Face",
            Self::Bag => "Bag",
            Self::Bicycle => "Bicycle",
            Self::RoadSign => "RoadSign",
            Self::Custom => "Custom",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Axis-aligned bounding box in frame pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `[top, left, width, height]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.top, self.left, self.width, self.height]
    }
}

/// Bounded object label
///
/// Holds at most `MAX_LABEL_SIZE - 1` bytes; longer input is truncated on a
/// char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        let mut label = label.into();
        let limit = MAX_LABEL_SIZE - 1;
        if label.len() > limit {
            let mut cut = limit;
            while !label.is_char_boundary(cut) {
                cut -= 1;
            }
            label.truncate(cut);
        }
        Self(label)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Label {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One detected object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleObjectMeta {
    /// Object class
    pub object_type: ObjectType,

    /// Bounding box
    pub bbox: BoundingBox,

    /// Inference confidence
    #[serde(default)]
    pub confidence: f64,

    /// Tracker-assigned id
    #[serde(default)]
    pub tracking_id: i32,

    /// Raw detector label (e.g. "car")
    #[serde(default)]
    pub label: Label,
}

/// Per-frame aggregate of detected objects
///
/// `objects` never holds more than `MAX_OBJ_NUM` entries; see
/// [`FrameObjectDescription::push_object`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameObjectDescription {
    #[serde(default)]
    pub source_uri: Option<String>,

    #[serde(default)]
    pub source_id: i32,

    #[serde(default)]
    pub source_type: i32,

    pub frame_id: u32,

    pub frame_width: u32,

    pub frame_height: u32,

    #[serde(default, deserialize_with = "deserialize_bounded_objects")]
    objects: Vec<SimpleObjectMeta>,

    #[serde(default)]
    pub filter_cloud_modules: Option<String>,

    #[serde(default)]
    pub source_cloud_modules: Option<String>,
}

impl FrameObjectDescription {
    pub fn new(frame_id: u32, frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_id,
            frame_width,
            frame_height,
            ..Self::default()
        }
    }

    /// Append a detection
    ///
    /// Returns `false` when the frame already holds `MAX_OBJ_NUM` objects; the
    /// detection is dropped in that case.
    pub fn push_object(&mut self, object: SimpleObjectMeta) -> bool {
        if self.is_full() {
            return false;
        }
        self.objects.push(object);
        true
    }

    pub fn objects(&self) -> &[SimpleObjectMeta] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_full(&self) -> bool {
        self.objects.len() >= MAX_OBJ_NUM
    }
}

fn deserialize_bounded_objects<'de, D>(deserializer: D) -> Result<Vec<SimpleObjectMeta>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut objects = Vec::<SimpleObjectMeta>::deserialize(deserializer)?;
    objects.truncate(MAX_OBJ_NUM);
    Ok(objects)
}

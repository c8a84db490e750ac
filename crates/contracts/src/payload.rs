//! Payload - Message Generator output
//!
//! Opaque byte buffer handed to the broker transport.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// Message schema selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Nested sensor/objects/frame JSON message
    FullSchema,
    /// Compact pipe-delimited object strings
    MinimalSchema,
    /// Placeholder for caller-supplied serialization
    Custom,
}

impl PayloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullSchema => "full",
            Self::MinimalSchema => "minimal",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" | "full_schema" => Ok(Self::FullSchema),
            "minimal" | "minimal_schema" => Ok(Self::MinimalSchema),
            "custom" => Ok(Self::Custom),
            other => Err(ContractError::Other(format!(
                "unknown payload kind '{other}'"
            ))),
        }
    }
}

/// Serialized message
///
/// Exclusively owned by the caller; dropping it (or calling
/// [`Payload::release`]) frees the buffer exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    bytes: Bytes,
}

impl Payload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// View as UTF-8 text, if valid
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Hand the buffer to a transport without copying
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Release the payload
    pub fn release(self) {
        drop(self);
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::new(text.into_bytes())
    }
}

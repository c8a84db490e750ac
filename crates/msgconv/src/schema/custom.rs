//! Custom schema placeholder
//!
//! Event contents are ignored; callers layer their own serialization on top.

use contracts::Payload;

/// Placeholder text, NUL terminator included
pub const CUSTOM_PAYLOAD: &[u8] = b"CUSTOM Schema\0";

pub fn generate() -> Payload {
    Payload::new(CUSTOM_PAYLOAD)
}

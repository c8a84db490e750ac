//! Message schemas
//!
//! - `full`: nested sensor / objects / frame JSON
//! - `minimal`: pipe-delimited object strings in a JSON array
//! - `custom`: fixed placeholder

pub mod custom;
pub mod full;
pub mod minimal;
mod number;

pub use number::StreamFloat;

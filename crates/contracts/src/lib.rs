//! # Contracts
//!
//! Shared data model for the message converter. Every other crate depends on
//! this one; it depends on none of them.
//!
//! ## Ownership
//! - Events are owned values: `Clone` deep-copies, `Drop` releases.
//! - `SensorTable` is built once at context creation and read-only afterwards.
//! - A `Payload` has exactly one owner until it is released.

mod error;
mod event;
mod object;
mod payload;
mod sensor;

pub use error::*;
pub use event::*;
pub use object::*;
pub use payload::*;
pub use sensor::*;

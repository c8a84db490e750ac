//! Command implementations.

mod render;
mod validate;

pub use render::run_render;
pub use validate::run_validate;

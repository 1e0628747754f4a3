//! Hero constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod float;
mod particles;
mod window;

pub use float::*;
pub use particles::*;
pub use window::*;

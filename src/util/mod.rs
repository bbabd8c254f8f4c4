//! Utility types and functions shared by every exporter stage.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam and exporter constants
//! - printf-compatible number formatting

mod error;
mod math;
pub mod format;

pub use error::*;
pub use math::*;

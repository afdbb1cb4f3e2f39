//! Builder API for ergonomic picker construction.
//!
//! This module provides a fluent builder for validated picker configuration
//! and the `roster!` macro for rosters written inline.

pub mod error;
pub mod macros;
pub mod picker;

pub use error::BuildError;
pub use picker::PickerBuilder;

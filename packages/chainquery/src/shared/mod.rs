//! Shared module - types used by every feature
//!
//! Value model, static type metadata and the `recordable!` macro.

#[macro_use]
pub mod macros;
pub mod models;

// Re-exports for convenience
pub use models::*;

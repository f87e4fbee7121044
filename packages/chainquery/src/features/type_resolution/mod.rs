//! Type Resolution Feature - element type recovery
//!
//! ```text
//! ports/          Source, SourceMut (what a query reads and removes from)
//! infrastructure/ TypeResolver (declared -> tag probe -> first element)
//! ```

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{Resolution, ResolutionStrategy, TypeResolver};
pub use ports::{Source, SourceMut};

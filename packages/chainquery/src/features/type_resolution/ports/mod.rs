//! Ports - collection abstractions consumed by resolution and queries

mod source;

pub use source::{Source, SourceMut};

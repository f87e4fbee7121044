//! Type resolution infrastructure

mod type_resolver;

pub use type_resolver::{Resolution, ResolutionStrategy, TypeResolver};

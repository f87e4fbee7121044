//! Feature modules

pub mod capture;
pub mod capture_context;
pub mod expression;
pub mod query_engine;
pub mod type_resolution;
pub mod typed_collections;

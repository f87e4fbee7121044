//! Capture Context Feature - explicit staging of an in-progress chain

mod context;

pub use context::{CaptureContext, ContextState};

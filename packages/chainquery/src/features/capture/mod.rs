//! Capture Feature - invocation recording on stand-ins
//!
//! ```text
//! Recorder (shared step list, owner thread, step limit)
//!     └── StandIn (type + recorder) ── invoke ──> Captured
//!                                                ├── StandIn     (record return)
//!                                                └── Placeholder (final return)
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{Captured, InvocationStep, Placeholder};
pub use infrastructure::{Recorder, StandIn};

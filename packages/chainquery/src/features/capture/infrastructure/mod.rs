//! Recording infrastructure

mod recorder;

pub use recorder::{Recorder, StandIn};

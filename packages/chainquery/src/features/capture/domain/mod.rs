//! Capture domain types

mod captured;
mod invocation_step;

pub use captured::{Captured, Placeholder};
pub use invocation_step::InvocationStep;

//! Expression Feature - replayable chains, transforms and matchers
//!
//! ```ignore
//! let town = ExpressionChain::path(Person::type_handle(), &["address", "town"])?;
//! let value = town.replay(&person)?;
//! assert!(Match::eq("Leeds").matches(&value));
//! ```

pub mod chain;
pub mod matcher;
pub mod transform;

pub use chain::ExpressionChain;
pub use matcher::{Match, Matcher, Pattern, ValueMatcher};
pub use transform::{transform, FnTransform, Transform};

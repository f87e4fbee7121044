//! Query Engine Feature - select / collect / remove
//!
//! ```ignore
//! // explicit chain
//! let smiths = select(&people, &last_name, Match::eq("Smith"))?;
//!
//! // staged source
//! let names = from(&people)?.path(&["first_name"])?.collect()?;
//!
//! // staged removal
//! let removed = from_mut(&mut people)?.path(&["address", "town"])?.remove(Match::eq("Leeds"))?;
//! ```

pub mod ops;
pub mod query_engine;
pub mod staged;

pub use ops::{collect, default_engine, from, from_mut, remove, remove_matching, select, select_matching};
pub use query_engine::QueryEngine;
pub use staged::{StagedQuery, StagedRemoval};

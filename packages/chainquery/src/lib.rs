/*
 * chainquery - record-and-replay queries over in-memory collections
 *
 * Feature-First Architecture:
 * - shared/      : Recordable capability, type descriptors, Value, recordable!
 * - features/    : capture -> expression -> capture_context
 *                  type_resolution -> query_engine, typed_collections
 * - config/      : Presets, YAML loading, validation
 *
 * Flow:
 * - A stand-in records member invocations into an ExpressionChain
 * - The chain is replayed on every element of a source, dispatching on the
 *   element's runtime type
 * - select / collect / remove match or gather the replayed values
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // Preset::from_str naming intentional
#![allow(clippy::module_inception)] // features/query_engine/query_engine.rs

pub mod config;
pub mod errors;
pub mod features;
#[macro_use]
pub mod shared;

#[cfg(test)]
mod test_fixtures;

// Re-export the capability layer (also used by `recordable!`)
pub use shared::models::{
    Describe, FromValue, IntoMemberResult, MemberDescriptor, Recordable, ReturnType,
    TypeDescriptor, TypeHandle, TypeKind, Value,
};

pub use errors::{
    CaptureError, InvokeError, QueryError, ReplayError, Result, TypeMismatch,
};

pub use config::{EmptyClaimPolicy, FailurePolicy, OverwritePolicy, Preset, QueryConfig};

pub use features::capture::{Captured, InvocationStep, Placeholder, Recorder, StandIn};
pub use features::capture_context::{CaptureContext, ContextState};
pub use features::expression::{
    transform, ExpressionChain, FnTransform, Match, Matcher, Pattern, Transform, ValueMatcher,
};
pub use features::query_engine::{
    collect, default_engine, from, from_mut, remove, remove_matching, select, select_matching,
    QueryEngine, StagedQuery, StagedRemoval,
};
pub use features::type_resolution::{
    Resolution, ResolutionStrategy, Source, SourceMut, TypeResolver,
};
pub use features::typed_collections::{
    check_type, check_types_of, enforcing_typed_set, enforcing_typed_view, typed_view,
    EnforcingTypedList, EnforcingTypedSet, Typed, TypedView,
};

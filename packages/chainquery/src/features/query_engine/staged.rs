//! Staged sources
//!
//! `QueryEngine::from` resolves a source's element type once and hands back
//! a stand-in for it. Whatever is recorded on `each()` (or via `path`) is
//! the chain the terminal operation replays. `path` records from `each()`,
//! so it cannot follow members already recorded there.

use super::query_engine::QueryEngine;
use crate::errors::Result;
use crate::features::capture::{Captured, StandIn};
use crate::features::expression::{ExpressionChain, Matcher};
use crate::features::type_resolution::{Resolution, Source, SourceMut};
use crate::shared::models::{Recordable, TypeHandle, Value};

/// Read-only source with a recording in progress
pub struct StagedQuery<'s, 'e, S: ?Sized> {
    engine: &'e QueryEngine,
    source: &'s S,
    resolution: Resolution,
    each: StandIn,
}

impl<'s, 'e, S> StagedQuery<'s, 'e, S>
where
    S: Source + ?Sized,
    S::Item: Recordable,
{
    pub(crate) fn new(engine: &'e QueryEngine, source: &'s S, resolution: Resolution, each: StandIn) -> Self {
        Self {
            engine,
            source,
            resolution,
            each,
        }
    }

    pub fn element_type(&self) -> TypeHandle {
        self.resolution.element_type
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Stand-in for one element of the source
    pub fn each(&self) -> &StandIn {
        &self.each
    }

    /// Record a chain of zero-argument members
    pub fn path(self, members: &[&str]) -> Result<Self> {
        record_path(&self.each, members)?;
        Ok(self)
    }

    /// Chain recorded so far
    pub fn chain(&self) -> ExpressionChain {
        self.each.finish()
    }

    pub fn select<M>(self, matcher: M) -> Result<Vec<S::Item>>
    where
        S::Item: Clone,
        M: Matcher<Value>,
    {
        let chain = self.chain();
        self.engine.select(self.source, &chain, matcher)
    }

    pub fn collect(self) -> Result<Vec<Value>> {
        let chain = self.chain();
        self.engine.collect(self.source, &chain)
    }
}

/// Mutable source with a recording in progress
pub struct StagedRemoval<'s, 'e, S: ?Sized> {
    engine: &'e QueryEngine,
    source: &'s mut S,
    resolution: Resolution,
    each: StandIn,
}

impl<'s, 'e, S> StagedRemoval<'s, 'e, S>
where
    S: SourceMut + ?Sized,
    S::Item: Recordable,
{
    pub(crate) fn new(
        engine: &'e QueryEngine,
        source: &'s mut S,
        resolution: Resolution,
        each: StandIn,
    ) -> Self {
        Self {
            engine,
            source,
            resolution,
            each,
        }
    }

    pub fn element_type(&self) -> TypeHandle {
        self.resolution.element_type
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn each(&self) -> &StandIn {
        &self.each
    }

    pub fn path(self, members: &[&str]) -> Result<Self> {
        record_path(&self.each, members)?;
        Ok(self)
    }

    pub fn chain(&self) -> ExpressionChain {
        self.each.finish()
    }

    /// Remove every element whose replayed value matches
    pub fn remove<M: Matcher<Value>>(self, matcher: M) -> Result<usize> {
        let chain = self.chain();
        self.engine.remove(self.source, &chain, matcher)
    }
}

fn record_path(each: &StandIn, members: &[&str]) -> Result<()> {
    let mut current = Captured::StandIn(each.clone());
    for member in members {
        current = current.get(member)?;
    }
    Ok(())
}

//! Free-function entry points backed by a shared standard engine

use super::query_engine::QueryEngine;
use super::staged::{StagedQuery, StagedRemoval};
use crate::errors::Result;
use crate::features::expression::{Matcher, Transform};
use crate::features::type_resolution::{Source, SourceMut};
use crate::shared::models::Recordable;
use lazy_static::lazy_static;

lazy_static! {
    /// Standard preset, no tag probes registered
    static ref DEFAULT_ENGINE: QueryEngine = QueryEngine::new();
}

/// Engine used by the free functions
pub fn default_engine() -> &'static QueryEngine {
    &DEFAULT_ENGINE
}

/// See [`QueryEngine::select`]
pub fn select<S, X, M>(source: &S, transform: X, matcher: M) -> Result<Vec<S::Item>>
where
    S: Source + ?Sized,
    S::Item: Clone,
    X: Transform<S::Item>,
    M: Matcher<X::Output>,
{
    DEFAULT_ENGINE.select(source, transform, matcher)
}

/// See [`QueryEngine::select_matching`]
pub fn select_matching<S, P>(source: &S, predicate: P) -> Vec<S::Item>
where
    S: Source + ?Sized,
    S::Item: Clone,
    P: Matcher<S::Item>,
{
    DEFAULT_ENGINE.select_matching(source, predicate)
}

/// See [`QueryEngine::collect`]
pub fn collect<S, X>(source: &S, transform: X) -> Result<Vec<X::Output>>
where
    S: Source + ?Sized,
    X: Transform<S::Item>,
{
    DEFAULT_ENGINE.collect(source, transform)
}

/// See [`QueryEngine::remove`]
pub fn remove<S, X, M>(source: &mut S, transform: X, matcher: M) -> Result<usize>
where
    S: SourceMut + ?Sized,
    X: Transform<S::Item>,
    M: Matcher<X::Output>,
{
    DEFAULT_ENGINE.remove(source, transform, matcher)
}

/// See [`QueryEngine::remove_matching`]
pub fn remove_matching<S, P>(source: &mut S, predicate: P) -> usize
where
    S: SourceMut + ?Sized,
    P: Matcher<S::Item>,
{
    DEFAULT_ENGINE.remove_matching(source, predicate)
}

/// See [`QueryEngine::from`]
pub fn from<S>(source: &S) -> Result<StagedQuery<'_, 'static, S>>
where
    S: Source + ?Sized,
    S::Item: Recordable,
{
    DEFAULT_ENGINE.from(source)
}

/// See [`QueryEngine::from_mut`]
pub fn from_mut<S>(source: &mut S) -> Result<StagedRemoval<'_, 'static, S>>
where
    S: SourceMut + ?Sized,
    S::Item: Recordable,
{
    DEFAULT_ENGINE.from_mut(source)
}

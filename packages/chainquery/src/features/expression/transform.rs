//! Transforms: element -> derived value
//!
//! A recorded `ExpressionChain` and an explicit selector function are
//! interchangeable wherever a query needs a derived value.

use super::chain::ExpressionChain;
use crate::errors::ReplayResult;
use crate::shared::models::{Recordable, Value};
use std::marker::PhantomData;

/// Derive a value from an element
pub trait Transform<T: ?Sized> {
    type Output;

    fn apply(&self, item: &T) -> ReplayResult<Self::Output>;
}

impl<T: Recordable + ?Sized> Transform<T> for ExpressionChain {
    type Output = Value;

    fn apply(&self, item: &T) -> ReplayResult<Value> {
        self.replay(item)
    }
}

impl<T: ?Sized, X: Transform<T> + ?Sized> Transform<T> for &X {
    type Output = X::Output;

    fn apply(&self, item: &T) -> ReplayResult<Self::Output> {
        (**self).apply(item)
    }
}

/// Selector function as a `Transform`; build with [`transform`]
pub struct FnTransform<F, T: ?Sized, V> {
    f: F,
    _marker: PhantomData<fn(&T) -> V>,
}

/// Wrap a selector function, e.g. `transform(|p: &Person| p.last_name())`
pub fn transform<T: ?Sized, V, F>(f: F) -> FnTransform<F, T, V>
where
    F: Fn(&T) -> V,
{
    FnTransform {
        f,
        _marker: PhantomData,
    }
}

impl<T: ?Sized, V, F> Transform<T> for FnTransform<F, T, V>
where
    F: Fn(&T) -> V,
{
    type Output = V;

    fn apply(&self, item: &T) -> ReplayResult<V> {
        Ok((self.f)(item))
    }
}

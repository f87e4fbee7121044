//! Type-enforcing set

use super::typed::{check_type, check_types_of, Typed};
use crate::errors::TypeMismatch;
use crate::features::type_resolution::{Source, SourceMut};
use crate::shared::models::{Recordable, TypeHandle};
use std::borrow::{Borrow, BorrowMut};
use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

/// Set wrapper rejecting elements whose runtime type is not assignable to
/// the declared element type
#[derive(Debug)]
pub struct EnforcingTypedSet<T, S = HashSet<T>> {
    inner: S,
    element_type: TypeHandle,
    _marker: PhantomData<T>,
}

/// Wrap `set`, enforcing `element_type` on every addition
pub fn enforcing_typed_set<T, S>(set: S, element_type: TypeHandle) -> EnforcingTypedSet<T, S>
where
    T: Recordable + Eq + Hash,
    S: BorrowMut<HashSet<T>>,
{
    EnforcingTypedSet::new(set, element_type)
}

impl<T, S> EnforcingTypedSet<T, S>
where
    T: Recordable + Eq + Hash,
    S: Borrow<HashSet<T>>,
{
    pub fn new(inner: S, element_type: TypeHandle) -> Self {
        Self {
            inner,
            element_type,
            _marker: PhantomData,
        }
    }

    pub fn as_set(&self) -> &HashSet<T> {
        self.inner.borrow()
    }

    pub fn len(&self) -> usize {
        self.as_set().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_set().is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.as_set().contains(value)
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<T, S> EnforcingTypedSet<T, S>
where
    T: Recordable + Eq + Hash,
    S: BorrowMut<HashSet<T>>,
{
    /// Returns whether the value was newly inserted
    pub fn insert(&mut self, value: T) -> Result<bool, TypeMismatch> {
        check_type(self.element_type, &value)?;
        Ok(self.inner.borrow_mut().insert(value))
    }

    /// Insert all values, or none if any is rejected
    pub fn extend_checked<I>(&mut self, values: I) -> Result<(), TypeMismatch>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        check_types_of(self.element_type, &values)?;
        self.inner.borrow_mut().extend(values);
        Ok(())
    }

    pub fn remove(&mut self, value: &T) -> bool {
        self.inner.borrow_mut().remove(value)
    }
}

impl<T, S> Typed for EnforcingTypedSet<T, S> {
    fn element_type(&self) -> TypeHandle {
        self.element_type
    }
}

impl<T, S> Source for EnforcingTypedSet<T, S>
where
    T: Recordable + Eq + Hash,
    S: Borrow<HashSet<T>>,
{
    type Item = T;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.as_set().iter())
    }

    fn len(&self) -> usize {
        self.as_set().len()
    }

    fn declared_element_type(&self) -> Option<TypeHandle> {
        Some(self.element_type)
    }
}

impl<T, S> SourceMut for EnforcingTypedSet<T, S>
where
    T: Recordable + Eq + Hash,
    S: BorrowMut<HashSet<T>>,
{
    fn retain_items(&mut self, keep: &mut dyn FnMut(&T) -> bool) {
        self.inner.borrow_mut().retain(|item| keep(item));
    }
}

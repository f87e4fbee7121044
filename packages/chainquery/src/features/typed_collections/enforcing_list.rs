//! Type-enforcing list
//!
//! Every addition is checked against the declared element type. The
//! delegate may be owned (`Vec<T>`) or borrowed (`&mut Vec<T>`); with a
//! borrowed delegate, accepted additions are visible through it.

use super::typed::{check_type, check_types_of, Typed};
use super::typed_view::TypedView;
use crate::errors::TypeMismatch;
use crate::features::type_resolution::{Source, SourceMut};
use crate::shared::models::{Recordable, TypeHandle};
use std::borrow::{Borrow, BorrowMut};
use std::marker::PhantomData;
use std::ops::Range;

/// List wrapper rejecting elements whose runtime type is not assignable
/// to the declared element type
#[derive(Debug)]
pub struct EnforcingTypedList<T, L = Vec<T>> {
    inner: L,
    element_type: TypeHandle,
    _marker: PhantomData<T>,
}

/// Wrap `list`, enforcing `element_type` on every addition
pub fn enforcing_typed_view<T, L>(list: L, element_type: TypeHandle) -> EnforcingTypedList<T, L>
where
    T: Recordable,
    L: BorrowMut<Vec<T>>,
{
    EnforcingTypedList::new(list, element_type)
}

impl<T, L> EnforcingTypedList<T, L>
where
    T: Recordable,
    L: Borrow<Vec<T>>,
{
    pub fn new(inner: L, element_type: TypeHandle) -> Self {
        Self {
            inner,
            element_type,
            _marker: PhantomData,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        self.inner.borrow()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Typed view over `range`
    ///
    /// Panics if `range` is out of bounds, like slice indexing.
    pub fn sub_list(&self, range: Range<usize>) -> TypedView<&[T]> {
        TypedView::new(&self.as_slice()[range], self.element_type)
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<T, L> EnforcingTypedList<T, L>
where
    T: Recordable,
    L: BorrowMut<Vec<T>>,
{
    fn vec_mut(&mut self) -> &mut Vec<T> {
        self.inner.borrow_mut()
    }

    pub fn push(&mut self, value: T) -> Result<(), TypeMismatch> {
        check_type(self.element_type, &value)?;
        self.vec_mut().push(value);
        Ok(())
    }

    /// Panics if `index > len`, like `Vec::insert`
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), TypeMismatch> {
        check_type(self.element_type, &value)?;
        self.vec_mut().insert(index, value);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, TypeMismatch> {
        check_type(self.element_type, &value)?;
        Ok(std::mem::replace(&mut self.vec_mut()[index], value))
    }

    /// Append all values, or none if any is rejected
    pub fn extend_checked<I>(&mut self, values: I) -> Result<(), TypeMismatch>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        check_types_of(self.element_type, &values)?;
        self.vec_mut().extend(values);
        Ok(())
    }

    /// Insert all values at `index`, or none if any is rejected
    ///
    /// Panics if `index > len`, like `Vec::insert`, even when the values
    /// would be rejected.
    pub fn insert_all_checked<I: IntoIterator<Item = T>>(
        &mut self,
        index: usize,
        values: I,
    ) -> Result<(), TypeMismatch> {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        let values: Vec<T> = values.into_iter().collect();
        check_types_of(self.element_type, &values)?;
        let vec = self.vec_mut();
        let tail = vec.split_off(index);
        vec.extend(values);
        vec.extend(tail);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> T {
        self.vec_mut().remove(index)
    }

    pub fn clear(&mut self) {
        self.vec_mut().clear()
    }
}

impl<T, L> Typed for EnforcingTypedList<T, L> {
    fn element_type(&self) -> TypeHandle {
        self.element_type
    }
}

impl<T, L> Source for EnforcingTypedList<T, L>
where
    T: Recordable,
    L: Borrow<Vec<T>>,
{
    type Item = T;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn declared_element_type(&self) -> Option<TypeHandle> {
        Some(self.element_type)
    }
}

impl<T, L> SourceMut for EnforcingTypedList<T, L>
where
    T: Recordable,
    L: BorrowMut<Vec<T>>,
{
    fn retain_items(&mut self, keep: &mut dyn FnMut(&T) -> bool) {
        self.vec_mut().retain(|item| keep(item));
    }
}

//! Tag-only typed view

use super::typed::Typed;
use crate::features::type_resolution::{Source, SourceMut};
use crate::shared::models::TypeHandle;
use std::any::Any;
use std::ops::{Deref, DerefMut};

/// Collection decorated with its element type; no checks on mutation
#[derive(Debug, Clone)]
pub struct TypedView<C> {
    inner: C,
    element_type: TypeHandle,
}

impl<C> TypedView<C> {
    pub fn new(inner: C, element_type: TypeHandle) -> Self {
        Self {
            inner,
            element_type,
        }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

/// Declare the element type of `inner`
pub fn typed_view<C>(inner: C, element_type: TypeHandle) -> TypedView<C> {
    TypedView::new(inner, element_type)
}

impl<C> Deref for TypedView<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C> DerefMut for TypedView<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C> Typed for TypedView<C> {
    fn element_type(&self) -> TypeHandle {
        self.element_type
    }
}

impl<C: Source> Source for TypedView<C> {
    type Item = C::Item;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &C::Item> + '_> {
        self.inner.iter_items()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn declared_element_type(&self) -> Option<TypeHandle> {
        Some(self.element_type)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        self.inner.as_any()
    }
}

impl<C: SourceMut> SourceMut for TypedView<C> {
    fn retain_items(&mut self, keep: &mut dyn FnMut(&C::Item) -> bool) {
        self.inner.retain_items(keep)
    }
}

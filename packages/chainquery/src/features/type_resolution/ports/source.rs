//! Collections a query can read from and remove from

use crate::shared::models::TypeHandle;
use std::any::Any;
use std::collections::{HashSet, VecDeque};
use std::hash::BuildHasher;

/// Readable collection of elements
pub trait Source {
    type Item;

    /// Elements in iteration order
    fn iter_items(&self) -> Box<dyn Iterator<Item = &Self::Item> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type carried by the collection itself, if any
    fn declared_element_type(&self) -> Option<TypeHandle> {
        None
    }

    /// Expose the concrete collection to registered tag probes
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Collection supporting in-place removal
pub trait SourceMut: Source {
    /// Keep only elements for which `keep` returns true
    ///
    /// Elements must be visited in `iter_items` order.
    fn retain_items(&mut self, keep: &mut dyn FnMut(&Self::Item) -> bool);
}

impl<T> Source for Vec<T> {
    type Item = T;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> SourceMut for Vec<T> {
    fn retain_items(&mut self, keep: &mut dyn FnMut(&T) -> bool) {
        self.retain(|item| keep(item));
    }
}

impl<T> Source for [T] {
    type Item = T;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> Source for VecDeque<T> {
    type Item = T;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> SourceMut for VecDeque<T> {
    fn retain_items(&mut self, keep: &mut dyn FnMut(&T) -> bool) {
        self.retain(|item| keep(item));
    }
}

impl<T, S: BuildHasher> Source for HashSet<T, S> {
    type Item = T;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<T, S: BuildHasher> SourceMut for HashSet<T, S> {
    fn retain_items(&mut self, keep: &mut dyn FnMut(&T) -> bool) {
        self.retain(|item| keep(item));
    }
}

impl<S: Source + ?Sized> Source for &S {
    type Item = S::Item;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &S::Item> + '_> {
        (**self).iter_items()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn declared_element_type(&self) -> Option<TypeHandle> {
        (**self).declared_element_type()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    type Item = S::Item;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &S::Item> + '_> {
        (**self).iter_items()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn declared_element_type(&self) -> Option<TypeHandle> {
        (**self).declared_element_type()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }
}

impl<S: SourceMut + ?Sized> SourceMut for &mut S {
    fn retain_items(&mut self, keep: &mut dyn FnMut(&S::Item) -> bool) {
        (**self).retain_items(keep)
    }
}

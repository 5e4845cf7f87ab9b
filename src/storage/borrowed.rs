//! Borrowed slices as storage: the backing of non-owning views.
//!
//! A view never allocates and never frees. Results computed from a view are owned
//! heap arrays.

use super::{CpuStorage, Storage, StorageMut};
use crate::scalar::Element;

impl<'a, T: Element> Storage<T> for &'a [T] {
    type Owned<U: Element> = CpuStorage<U>;

    fn as_slice(&self) -> &[T] {
        self
    }

    fn map_owned<U: Element, F: FnMut(T) -> U>(&self, f: F) -> CpuStorage<U> {
        CpuStorage::new(self.iter().copied().map(f).collect())
    }
}

impl<'a, T: Element> Storage<T> for &'a mut [T] {
    type Owned<U: Element> = CpuStorage<U>;

    fn as_slice(&self) -> &[T] {
        self
    }

    fn map_owned<U: Element, F: FnMut(T) -> U>(&self, f: F) -> CpuStorage<U> {
        CpuStorage::new(self.iter().copied().map(f).collect())
    }
}

impl<'a, T: Element> StorageMut<T> for &'a mut [T] {
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

//! Heap storage sized at runtime.

use super::{OwnedStorage, Storage, StorageMut};
use crate::{error::Result, scalar::Element};

/// CPU storage using a simple `Vec`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CpuStorage<T> {
    data: Vec<T>,
}

impl<T> CpuStorage<T> {
    /// Create a new CPU storage from a vector.
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Consumes the storage, returning the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Element> Storage<T> for CpuStorage<T> {
    type Owned<U: Element> = CpuStorage<U>;

    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn map_owned<U: Element, F: FnMut(T) -> U>(&self, f: F) -> CpuStorage<U> {
        CpuStorage::new(self.data.iter().copied().map(f).collect())
    }
}

impl<T: Element> StorageMut<T> for CpuStorage<T> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Element> OwnedStorage<T> for CpuStorage<T> {
    const CAPACITY: Option<usize> = None;

    fn filled(len: usize, value: T) -> Result<Self> {
        Ok(Self {
            data: vec![value; len],
        })
    }

    fn from_vec(data: Vec<T>) -> Result<Self> {
        Ok(Self { data })
    }

    fn from_fn<F: FnMut(usize) -> T>(len: usize, f: F) -> Self {
        Self {
            data: (0..len).map(f).collect(),
        }
    }

    fn reallocate(&mut self, len: usize) -> Result<()> {
        self.data.clear();
        self.data.resize(len, T::default());
        Ok(())
    }
}

impl<T> From<Vec<T>> for CpuStorage<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

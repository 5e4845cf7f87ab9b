//! Storage abstraction for array data.
//!
//! Every array kind is generic over where its elements live. Three strategies exist:
//! heap storage sized at runtime ([`CpuStorage`]), inline storage whose size is a
//! compile-time constant ([`FixedStorage`]), and borrowed slices that turn an array
//! into a non-owning view (see [`crate::view`]).

mod borrowed;
mod cpu;
mod fixed;

pub use cpu::CpuStorage;
pub use fixed::FixedStorage;

use crate::{error::Result, scalar::Element};
use std::fmt::Debug;

/// Read access to a contiguous element buffer.
pub trait Storage<T: Element>: Debug {
    /// The owning storage produced when an operation on this storage allocates a
    /// result holding elements of type `U`.
    type Owned<U: Element>: OwnedStorage<U>;

    /// Returns a slice containing the entire storage.
    fn as_slice(&self) -> &[T];

    /// Returns the number of elements in the storage.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the storage contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to every element, collecting into owned storage of the same
    /// length.
    fn map_owned<U: Element, F: FnMut(T) -> U>(&self, f: F) -> Self::Owned<U>;
}

/// Write access to a contiguous element buffer.
pub trait StorageMut<T: Element>: Storage<T> {
    /// Returns a mutable slice containing the entire storage.
    fn as_mut_slice(&mut self) -> &mut [T];
}

/// Storage that owns (and can allocate) its buffer.
pub trait OwnedStorage<T: Element>: StorageMut<T> + Clone + Sized {
    /// `Some(len)` when the buffer length is fixed at compile time.
    const CAPACITY: Option<usize>;

    /// Allocates a buffer of `len` copies of `value`.
    fn filled(len: usize, value: T) -> Result<Self>;

    /// Takes ownership of `data`; fails if a fixed capacity does not match.
    fn from_vec(data: Vec<T>) -> Result<Self>;

    /// Changes the buffer length. Previous contents are not preserved.
    fn reallocate(&mut self, len: usize) -> Result<()>;

    /// Builds a buffer from `f(offset)`. A fixed-capacity storage always builds
    /// exactly its capacity, so callers pass a `len` that matches it.
    fn from_fn<F: FnMut(usize) -> T>(len: usize, f: F) -> Self;

    /// Copies `data` into a new buffer.
    fn from_slice(data: &[T]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total<S: Storage<i64>>(s: &S) -> i64 {
        s.as_slice().iter().sum()
    }

    #[test]
    fn test_strategies_share_interface() {
        let heap = CpuStorage::from_vec(vec![1i64, 2, 3]).unwrap();
        let inline = FixedStorage::<i64, 3>::from_vec(vec![1, 2, 3]).unwrap();
        let data = [1i64, 2, 3];
        let borrowed: &[i64] = &data;

        assert_eq!(total(&heap), 6);
        assert_eq!(total(&inline), 6);
        assert_eq!(total(&borrowed), 6);
        assert_eq!(<FixedStorage<i64, 3> as OwnedStorage<i64>>::CAPACITY, Some(3));
        assert_eq!(<CpuStorage<i64> as OwnedStorage<i64>>::CAPACITY, None);
    }
}

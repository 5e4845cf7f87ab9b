//! Inline storage whose length is a compile-time constant.

use super::{OwnedStorage, Storage, StorageMut};
use crate::{
    error::{Result, TenmatError},
    scalar::Element,
};

/// Stack-resident storage of exactly `LEN` elements. Never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStorage<T, const LEN: usize> {
    data: [T; LEN],
}

impl<T: Element, const LEN: usize> FixedStorage<T, LEN> {
    pub fn new(data: [T; LEN]) -> Self {
        Self { data }
    }

    pub fn into_array(self) -> [T; LEN] {
        self.data
    }
}

impl<T: Element, const LEN: usize> Default for FixedStorage<T, LEN> {
    fn default() -> Self {
        Self {
            data: [T::default(); LEN],
        }
    }
}

impl<T: Element, const LEN: usize> Storage<T> for FixedStorage<T, LEN> {
    type Owned<U: Element> = FixedStorage<U, LEN>;

    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn len(&self) -> usize {
        LEN
    }

    fn map_owned<U: Element, F: FnMut(T) -> U>(&self, f: F) -> FixedStorage<U, LEN> {
        FixedStorage {
            data: self.data.map(f),
        }
    }
}

impl<T: Element, const LEN: usize> StorageMut<T> for FixedStorage<T, LEN> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Element, const LEN: usize> OwnedStorage<T> for FixedStorage<T, LEN> {
    const CAPACITY: Option<usize> = Some(LEN);

    fn filled(len: usize, value: T) -> Result<Self> {
        if len != LEN {
            return Err(TenmatError::shape_mismatch(vec![LEN], vec![len]));
        }
        Ok(Self { data: [value; LEN] })
    }

    fn from_vec(data: Vec<T>) -> Result<Self> {
        let len = data.len();
        let data: [T; LEN] = data
            .try_into()
            .map_err(|_| TenmatError::shape_mismatch(vec![LEN], vec![len]))?;
        Ok(Self { data })
    }

    fn from_fn<F: FnMut(usize) -> T>(len: usize, f: F) -> Self {
        debug_assert_eq!(len, LEN);
        Self {
            data: std::array::from_fn(f),
        }
    }

    fn reallocate(&mut self, len: usize) -> Result<()> {
        if len != LEN {
            return Err(TenmatError::shape_mismatch(vec![LEN], vec![len]));
        }
        self.data = [T::default(); LEN];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_enforced() {
        assert!(FixedStorage::<f64, 4>::filled(4, 0.0).is_ok());
        assert_eq!(
            FixedStorage::<f64, 4>::filled(9, 0.0),
            Err(TenmatError::shape_mismatch(vec![4], vec![9]))
        );
        assert!(FixedStorage::<u8, 2>::from_vec(vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_from_fn() {
        let storage = FixedStorage::<usize, 4>::from_fn(4, |i| i * i);
        assert_eq!(storage.into_array(), [0, 1, 4, 9]);
    }

    #[test]
    fn test_reallocate_same_size() {
        let mut storage = FixedStorage::new([1, 2, 3]);
        storage.reallocate(3).unwrap();
        assert_eq!(storage.into_array(), [0, 0, 0]);
        assert!(storage.reallocate(2).is_err());
    }
}

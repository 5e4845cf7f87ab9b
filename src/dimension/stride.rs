//! Stride handling for arrays.
//!
//! Strides are counted in elements, not bytes. For row-major order the last axis has
//! a stride of 1 and every other axis has a stride equal to the product of the
//! extents after it.

use super::MAX_DIM;
use std::ops::Index;

/// Per-axis strides of a dense layout.
///
/// The stride array may be longer than the rank of the array it belongs to (see
/// [`Stride::pad_to`]); padded entries are 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stride {
    strides: [usize; MAX_DIM],
    len: usize,
}

impl Stride {
    /// Computes the default row-major strides for a given shape.
    pub fn row_major(shape: &[usize]) -> Self {
        let ndim = shape.len();
        debug_assert!(ndim <= MAX_DIM);
        let mut strides = [1; MAX_DIM];

        if ndim > 0 {
            strides[ndim - 1] = 1;
            for i in (0..ndim - 1).rev() {
                strides[i] = strides[i + 1] * shape[i + 1];
            }
        }

        Self { strides, len: ndim }
    }

    /// Returns the number of strides.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the stride values as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.strides[..self.len]
    }

    /// Extends the stride array to `n` entries with unit strides. Never shrinks.
    pub fn pad_to(&mut self, n: usize) {
        debug_assert!(n <= MAX_DIM);
        while self.len < n {
            self.strides[self.len] = 1;
            self.len += 1;
        }
    }

    /// Computes the offset for already-resolved indices.
    #[inline]
    pub fn offset(&self, indices: &[usize]) -> usize {
        debug_assert!(indices.len() <= self.len);
        indices
            .iter()
            .zip(self.strides.iter())
            .map(|(&index, &stride)| index * stride)
            .sum()
    }
}

impl Index<usize> for Stride {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl AsRef<[usize]> for Stride {
    fn as_ref(&self) -> &[usize] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_strides() {
        let strides = Stride::row_major(&[2, 3, 4]);
        assert_eq!(strides.as_slice(), &[12, 4, 1]);
        assert_eq!(Stride::row_major(&[7]).as_slice(), &[1]);
    }

    #[test]
    fn test_offset_calculation() {
        let strides = Stride::row_major(&[2, 3, 4]);
        assert_eq!(strides.offset(&[0, 0, 0]), 0);
        assert_eq!(strides.offset(&[1, 0, 0]), 12);
        assert_eq!(strides.offset(&[0, 1, 0]), 4);
        assert_eq!(strides.offset(&[0, 0, 1]), 1);
        assert_eq!(strides.offset(&[1, 2, 3]), 23);
    }

    #[test]
    fn test_pad_to() {
        let mut strides = Stride::row_major(&[3, 4]);
        strides.pad_to(4);
        assert_eq!(strides.as_slice(), &[4, 1, 1, 1]);
        assert_eq!(strides.offset(&[2, 3, 0, 0]), 11);

        strides.pad_to(2);
        assert_eq!(strides.len(), 4);
    }
}

//! Non-owning views over caller-owned buffers.
//!
//! A view is an array whose storage is a borrowed slice. It never allocates and
//! never frees, and the borrow checker keeps it from outliving the buffer. Every
//! read-only operation of the owning types applies to views unchanged; operations
//! that produce a new array return an owned heap array.
//!
//! ```
//! use tenmat::view::ArrayView;
//! use tenmat::Reduce;
//!
//! let buffer = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let view = ArrayView::from_slice(&[2, 3], &buffer).unwrap();
//! assert_eq!(view[[1, 0]], 4.0);
//! assert_eq!(view.sum(), 21.0);
//! ```

use crate::{
    array::Array, diagonal::DiagonalMatrix, error::Result, scalar::Element,
    symmetric::SymmetricMatrix,
};

pub type ArrayView<'a, T> = Array<T, &'a [T]>;
pub type ArrayViewMut<'a, T> = Array<T, &'a mut [T]>;
pub type SymmetricView<'a, T> = SymmetricMatrix<T, &'a [T]>;
pub type SymmetricViewMut<'a, T> = SymmetricMatrix<T, &'a mut [T]>;
pub type DiagonalView<'a, T> = DiagonalMatrix<T, &'a [T]>;
pub type DiagonalViewMut<'a, T> = DiagonalMatrix<T, &'a mut [T]>;

impl<'a, T: Element> Array<T, &'a [T]> {
    /// Views `data` as a row-major array of the given extents.
    pub fn from_slice(extents: &[usize], data: &'a [T]) -> Result<Self> {
        Self::from_storage(extents, data)
    }
}

impl<'a, T: Element> Array<T, &'a mut [T]> {
    /// Views `data` mutably; writes go straight to the caller's buffer.
    pub fn from_slice_mut(extents: &[usize], data: &'a mut [T]) -> Result<Self> {
        Self::from_storage(extents, data)
    }
}

impl<'a, T: Element> SymmetricMatrix<T, &'a [T]> {
    /// Views `n(n+1)/2` upper-triangle entries as an `n x n` symmetric matrix.
    pub fn from_slice(n: usize, data: &'a [T]) -> Result<Self> {
        Self::from_storage(n, data)
    }
}

impl<'a, T: Element> SymmetricMatrix<T, &'a mut [T]> {
    pub fn from_slice_mut(n: usize, data: &'a mut [T]) -> Result<Self> {
        Self::from_storage(n, data)
    }
}

impl<'a, T: Element> DiagonalMatrix<T, &'a [T]> {
    /// Views `n` diagonal entries as an `n x n` diagonal matrix.
    pub fn from_slice(n: usize, data: &'a [T]) -> Result<Self> {
        Self::from_storage(n, data)
    }
}

impl<'a, T: Element> DiagonalMatrix<T, &'a mut [T]> {
    pub fn from_slice_mut(n: usize, data: &'a mut [T]) -> Result<Self> {
        Self::from_storage(n, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reduce;

    #[test]
    fn test_array_view_reads_buffer() {
        let buffer: Vec<i32> = (0..24).collect();
        let view = ArrayView::from_slice(&[2, 3, 4], &buffer).unwrap();
        assert_eq!(view[[1, 2, 3]], 23);
        assert_eq!(view.strides(), &[12, 4, 1]);
        assert!(ArrayView::from_slice(&[5, 5], &buffer).is_err());
    }

    #[test]
    fn test_mut_view_writes_through() {
        let mut buffer = vec![0.0; 4];
        {
            let mut view = ArrayViewMut::from_slice_mut(&[2, 2], &mut buffer).unwrap();
            view[[1, 0]] = 3.0;
            view *= 2.0;
        }
        assert_eq!(buffer, vec![0.0, 0.0, 6.0, 0.0]);
    }

    #[test]
    fn test_symmetric_view() {
        let buffer = [1.0, 2.0, 3.0];
        let view = SymmetricView::from_slice(2, &buffer).unwrap();
        assert_eq!(view[[1, 0]], 2.0);
        assert_eq!(view.sum(), 8.0);
        let owned = &view + &view;
        assert_eq!(owned.as_slice(), &[2.0, 4.0, 6.0]);
        assert!(SymmetricView::from_slice(3, &buffer).is_err());
    }

    #[test]
    fn test_diagonal_view() {
        let buffer = [4.0, 5.0];
        let view = DiagonalView::from_slice(2, &buffer).unwrap();
        assert_eq!(view[[0, 1]], 0.0);
        assert_eq!(view.to_dense().to_vec(), vec![4.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_view_of_owned_array() {
        let a = Array::<f64>::arange(&[3, 3]).unwrap();
        let v = a.view();
        assert_eq!(v, a);
        assert_eq!(v.to_owned(), a);
    }
}

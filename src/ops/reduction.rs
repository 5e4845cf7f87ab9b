//! Reductions over the logical entries of an array.
//!
//! `sum`, `norm` and `average` weigh every stored entry by the number of logical
//! entries it represents, so a symmetric matrix reduces exactly like its dense
//! equivalent. `min`, `max`, `argmin` and `argmax` look at stored entries only and
//! report flat storage offsets.

use crate::{
    error::{Result, TenmatError},
    kind::Compressed,
    scalar::Scalar,
};

/// Reductions available on every storage kind.
pub trait Reduce<T: Scalar>: Compressed<T> {
    /// Sum of all logical entries, accumulated in `T`.
    fn sum(&self) -> T {
        self.as_slice()
            .iter()
            .zip(self.multiplicities())
            .fold(T::zero(), |acc, (&x, weight)| acc + repeat(x, weight))
    }

    /// `sum() / prod(shape)` in double precision.
    fn mean(&self) -> f64 {
        self.sum().to_f64_lossy() / self.logical_len() as f64
    }

    /// Smallest stored entry.
    fn min(&self) -> T {
        self.as_slice()[self.argmin()]
    }

    /// Largest stored entry.
    fn max(&self) -> T {
        self.as_slice()[self.argmax()]
    }

    /// Flat storage offset of the first smallest entry.
    fn argmin(&self) -> usize {
        arg_extremum(self.as_slice(), |candidate, best| candidate < best)
    }

    /// Flat storage offset of the first largest entry.
    fn argmax(&self) -> usize {
        arg_extremum(self.as_slice(), |candidate, best| candidate > best)
    }

    /// L1 norm, the sum of absolute values of all logical entries.
    fn norm(&self) -> T {
        self.as_slice()
            .iter()
            .zip(self.multiplicities())
            .fold(T::zero(), |acc, (&x, weight)| acc + repeat(x.magnitude(), weight))
    }

    /// Weighted average `sum(w * x) / sum(w)`, or `sum(w * x)` when `normalize` is
    /// false.
    ///
    /// # Errors
    ///
    /// The weights must have the same kind and shape as `self`.
    fn average<W>(&self, weights: &W, normalize: bool) -> Result<f64>
    where
        W: Compressed<T> + ?Sized,
    {
        if weights.kind() != self.kind() {
            return Err(TenmatError::invalid_argument(format!(
                "weights of kind {:?} for an array of kind {:?}",
                weights.kind(),
                self.kind()
            )));
        }
        let shape = self.logical_shape();
        let weight_shape = weights.logical_shape();
        if shape != weight_shape {
            return Err(TenmatError::shape_mismatch(shape.extents(), weight_shape.extents()));
        }

        let mut weighted = T::zero();
        let mut total = T::zero();
        let entries = self.as_slice().iter().zip(weights.as_slice());
        for ((&x, &w), m) in entries.zip(self.multiplicities()) {
            weighted = weighted + repeat(w * x, m);
            total = total + repeat(w, m);
        }
        if normalize {
            Ok(weighted.to_f64_lossy() / total.to_f64_lossy())
        } else {
            Ok(weighted.to_f64_lossy())
        }
    }

    /// Flat storage offsets of all non-zero entries.
    fn where_nonzero(&self) -> Vec<usize> {
        self.as_slice()
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_nonzero())
            .map(|(offset, _)| offset)
            .collect()
    }

    /// Flat storage offset of the `k`-th non-zero entry; negative `k` counts from the
    /// last one.
    ///
    /// # Errors
    ///
    /// Returns [`TenmatError::OutOfRange`] unless `-nnz <= k < nnz`.
    fn where_at(&self, k: isize) -> Result<usize> {
        let nonzero = self.where_nonzero();
        let nnz = nonzero.len() as isize;
        if k >= nnz || k < -nnz {
            return Err(TenmatError::out_of_range(format!(
                "non-zero index {} with {} non-zero entries",
                k, nnz
            )));
        }
        Ok(nonzero[k.rem_euclid(nnz) as usize])
    }
}

impl<T: Scalar, C: Compressed<T> + ?Sized> Reduce<T> for C {}

/// `x` counted `weight` times.
#[inline]
fn repeat<T: Scalar>(x: T, weight: usize) -> T {
    match weight {
        1 => x,
        _ => (1..weight).fold(x, |acc, _| acc + x),
    }
}

fn arg_extremum<T: PartialOrd + Copy>(data: &[T], better: impl Fn(T, T) -> bool) -> usize {
    let mut best = 0;
    for (offset, &x) in data.iter().enumerate().skip(1) {
        if better(x, data[best]) {
            best = offset;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array::Array, diagonal::DiagonalMatrix, symmetric::SymmetricMatrix};
    use approx::assert_relative_eq;

    #[test]
    fn test_dense_reductions() {
        let a = Array::<f64>::copy(&[2, 2], &[1.0, -4.0, 3.0, 2.0]).unwrap();
        assert_eq!(a.sum(), 2.0);
        assert_relative_eq!(a.mean(), 0.5);
        assert_eq!(a.min(), -4.0);
        assert_eq!(a.max(), 3.0);
        assert_eq!(a.argmin(), 1);
        assert_eq!(a.argmax(), 2);
        assert_eq!(a.norm(), 10.0);
    }

    #[test]
    fn test_integer_mean_is_fractional() {
        let a = Array::<i32>::copy(&[4], &[1, 2, 2, 2]).unwrap();
        assert_eq!(a.sum(), 7);
        assert_relative_eq!(a.mean(), 1.75);
    }

    #[test]
    fn test_symmetric_counts_off_diagonal_twice() {
        // [[1, 2], [2, 3]]
        let a = SymmetricMatrix::<f64>::copy(2, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a.sum(), 8.0);
        assert_relative_eq!(a.mean(), 2.0);
        assert_eq!(a.sum(), a.to_dense().sum());

        let b = SymmetricMatrix::<f64>::copy(2, &[-1.0, -2.0, 3.0]).unwrap();
        assert_eq!(b.norm(), b.to_dense().norm());
    }

    #[test]
    fn test_diagonal_reductions() {
        let a = DiagonalMatrix::<f64>::copy(4, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.sum(), 10.0);
        assert_relative_eq!(a.mean(), 10.0 / 16.0);
        assert_eq!(a.max(), 4.0);
        assert_eq!(a.argmax(), 3);
    }

    #[test]
    fn test_average() {
        let a = Array::<f64>::copy(&[3], &[1.0, 2.0, 3.0]).unwrap();
        let w = Array::<f64>::copy(&[3], &[1.0, 1.0, 2.0]).unwrap();
        assert_relative_eq!(a.average(&w, true).unwrap(), 9.0 / 4.0);
        assert_relative_eq!(a.average(&w, false).unwrap(), 9.0);

        let short = Array::<f64>::ones(&[2]).unwrap();
        assert!(a.average(&short, true).is_err());

        let s = SymmetricMatrix::<f64>::copy(2, &[1.0, 2.0, 3.0]).unwrap();
        let ws = SymmetricMatrix::<f64>::ones(2).unwrap();
        assert_relative_eq!(s.average(&ws, true).unwrap(), 2.0);
        let wd = Array::<f64>::ones(&[2, 2]).unwrap();
        assert!(s.average(&wd, true).is_err());
    }

    #[test]
    fn test_where() {
        let a = Array::<i32>::copy(&[5], &[0, 3, 0, 4, 5]).unwrap();
        assert_eq!(a.where_nonzero(), vec![1, 3, 4]);
        assert_eq!(a.where_at(0).unwrap(), 1);
        assert_eq!(a.where_at(-1).unwrap(), 4);
        assert_eq!(a.where_at(-3).unwrap(), 1);
        assert!(matches!(a.where_at(3), Err(TenmatError::OutOfRange(_))));
        assert!(a.where_at(-4).is_err());

        let d = DiagonalMatrix::<i32>::copy(3, &[0, 0, 7]).unwrap();
        assert_eq!(d.where_nonzero(), vec![2]);
    }

    #[test]
    fn test_reductions_on_views() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let v = Array::<f64, &[f64]>::from_storage(&[2, 2], &data[..]).unwrap();
        assert_eq!(v.sum(), 10.0);
        assert_eq!(v.argmax(), 3);
    }
}

//! Element-wise maps and comparisons.

use crate::{
    dimension::Shape,
    error::{Result, TenmatError},
    kind::{Compressed, Kind},
    scalar::{Element, Scalar},
};
use std::cmp::Ordering;

/// Right-hand side of a comparison: a scalar, or a reference to an array of the same
/// kind and shape.
pub trait Operand<T> {
    /// Checks that the operand fits an array of the given kind and shape.
    fn check(&self, kind: Kind, shape: &Shape) -> Result<()>;

    /// The value paired with the stored entry at `offset`.
    fn value_at(&self, offset: usize) -> T;
}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {
        $(
            impl Operand<$t> for $t {
                #[inline]
                fn check(&self, _kind: Kind, _shape: &Shape) -> Result<()> {
                    Ok(())
                }

                #[inline]
                fn value_at(&self, _offset: usize) -> $t {
                    *self
                }
            }
        )*
    };
}

impl_scalar_operand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<'a, T: Element, C: Compressed<T> + ?Sized> Operand<T> for &'a C {
    fn check(&self, kind: Kind, shape: &Shape) -> Result<()> {
        if self.kind() != kind {
            return Err(TenmatError::invalid_argument(format!(
                "cannot compare an array of kind {:?} with one of kind {:?}",
                kind,
                self.kind()
            )));
        }
        let other = self.logical_shape();
        if &other != shape {
            return Err(TenmatError::shape_mismatch(shape.extents(), other.extents()));
        }
        Ok(())
    }

    #[inline]
    fn value_at(&self, offset: usize) -> T {
        self.as_slice()[offset]
    }
}

/// Element-wise operations available on every storage kind. Results keep the kind,
/// shape and storage discipline of `self`.
pub trait Elementwise<T: Scalar>: Compressed<T> {
    /// Entrywise absolute value.
    fn abs(&self) -> Self::Mapped<T> {
        self.map(|x| x.magnitude())
    }

    /// Flat storage offsets that sort the stored entries. Ties keep storage order.
    fn argsort(&self, ascending: bool) -> Self::Mapped<usize> {
        let data = self.as_slice();
        let mut order: Vec<usize> = (0..data.len()).collect();
        order.sort_by(|&a, &b| {
            let ord = data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        let mut order = order.into_iter();
        self.map(|_| order.next().unwrap_or_default())
    }

    fn equal<O: Operand<T>>(&self, rhs: O) -> Result<Self::Mapped<i32>> {
        compare(self, rhs, |a, b| a == b)
    }

    fn not_equal<O: Operand<T>>(&self, rhs: O) -> Result<Self::Mapped<i32>> {
        compare(self, rhs, |a, b| a != b)
    }

    fn greater<O: Operand<T>>(&self, rhs: O) -> Result<Self::Mapped<i32>> {
        compare(self, rhs, |a, b| a > b)
    }

    fn greater_equal<O: Operand<T>>(&self, rhs: O) -> Result<Self::Mapped<i32>> {
        compare(self, rhs, |a, b| a >= b)
    }

    fn less<O: Operand<T>>(&self, rhs: O) -> Result<Self::Mapped<i32>> {
        compare(self, rhs, |a, b| a < b)
    }

    fn less_equal<O: Operand<T>>(&self, rhs: O) -> Result<Self::Mapped<i32>> {
        compare(self, rhs, |a, b| a <= b)
    }
}

impl<T: Scalar, C: Compressed<T> + ?Sized> Elementwise<T> for C {}

/// 1 where `predicate(stored, rhs)` holds, 0 elsewhere.
fn compare<T, C, O>(lhs: &C, rhs: O, predicate: impl Fn(T, T) -> bool) -> Result<C::Mapped<i32>>
where
    T: Scalar,
    C: Compressed<T> + ?Sized,
    O: Operand<T>,
{
    rhs.check(lhs.kind(), &lhs.logical_shape())?;
    let mut offset = 0;
    Ok(lhs.map(|x| {
        let hit = predicate(x, rhs.value_at(offset));
        offset += 1;
        i32::from(hit)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array::Array, diagonal::DiagonalMatrix, symmetric::SymmetricMatrix};

    #[test]
    fn test_abs_keeps_kind() {
        let a = SymmetricMatrix::<f64>::copy(2, &[-1.0, 2.0, -3.0]).unwrap();
        let b = a.abs();
        assert_eq!(b.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(b.abs(), b);

        let d = DiagonalMatrix::<i32>::copy(2, &[-5, 5]).unwrap();
        assert_eq!(d.abs().as_slice(), &[5, 5]);
    }

    #[test]
    fn test_argsort() {
        let a = Array::<f64>::copy(&[4], &[3.0, 1.0, 2.0, 1.0]).unwrap();
        assert_eq!(a.argsort(true).to_vec(), vec![1, 3, 2, 0]);
        assert_eq!(a.argsort(false).to_vec(), vec![0, 2, 1, 3]);
        assert_eq!(a.argsort(true).shape(), &[4]);
    }

    #[test]
    fn test_compare_with_scalar() {
        let a = Array::<i32>::arange(&[2, 2]).unwrap();
        assert_eq!(a.greater(1).unwrap().to_vec(), vec![0, 0, 1, 1]);
        assert_eq!(a.less_equal(1).unwrap().to_vec(), vec![1, 1, 0, 0]);
        assert_eq!(a.equal(2).unwrap().to_vec(), vec![0, 0, 1, 0]);
        assert_eq!(a.not_equal(2).unwrap().to_vec(), vec![1, 1, 0, 1]);
    }

    #[test]
    fn test_compare_with_array() {
        let a = Array::<f64>::copy(&[3], &[1.0, 2.0, 3.0]).unwrap();
        let b = Array::<f64>::copy(&[3], &[3.0, 2.0, 1.0]).unwrap();
        assert_eq!(a.greater_equal(&b).unwrap().to_vec(), vec![0, 1, 1]);
        assert_eq!(a.less(&b).unwrap().to_vec(), vec![1, 0, 0]);

        let c = Array::<f64>::zero(&[4]).unwrap();
        assert!(a.equal(&c).is_err());

        let s = SymmetricMatrix::<f64>::zero(2).unwrap();
        let d = Array::<f64>::zero(&[2, 2]).unwrap();
        assert!(s.equal(&d).is_err());
    }

    #[test]
    fn test_compare_diagonal() {
        let d = DiagonalMatrix::<f64>::copy(3, &[1.0, -1.0, 2.0]).unwrap();
        let mask = d.greater(0.0).unwrap();
        assert_eq!(mask.as_slice(), &[1, 0, 1]);
        assert_eq!(mask[[0, 1]], 0);
    }
}

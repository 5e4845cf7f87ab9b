//! Tensor products: `dot`, `ddot`, `dyadic`, `cross` and the vector length.
//!
//! The result type of each product follows the storage-kind table of
//! [`Kind`](crate::kind::Kind): a single contraction of two diagonal tensors stays
//! diagonal, every other second-order contraction is dense.
//!
//! Index conventions:
//!
//! * `dot(A, B)_ik = A_ij B_jk`
//! * `ddot(A2, B2) = A_ij B_ij`
//! * `ddot(A4, B2)_ij = A_ijkl B_kl`, `ddot(A2, B4)_kl = A_ij B_ijkl`
//! * `ddot(A4, B4)_ijmn = A_ijkl B_klmn`
//! * `dyadic(a, b)_ij = a_i b_j`, `dyadic(A, B)_ijkl = A_ij B_kl`
//!
//! Operands of different `ND` are a contract violation and panic.

use super::{SecondOrder, Tensor2, Tensor2d, Tensor2s, Tensor4, Vector};
use crate::{
    dimension::Spatial,
    error::{Result, TenmatError},
    scalar::Scalar,
};
use num_traits::Float;

/// Single contraction.
pub trait Dot<Rhs: ?Sized> {
    type Output;

    fn dot(&self, rhs: &Rhs) -> Self::Output;
}

/// Double contraction.
pub trait Ddot<Rhs: ?Sized> {
    type Output;

    fn ddot(&self, rhs: &Rhs) -> Self::Output;
}

/// Outer product.
pub trait Dyadic<Rhs: ?Sized> {
    type Output;

    fn dyadic(&self, rhs: &Rhs) -> Self::Output;
}

#[track_caller]
#[inline]
fn same_nd(lhs: usize, rhs: usize) -> usize {
    assert!(
        lhs == rhs,
        "spatial dimension mismatch: left operand has nd = {}, right operand has nd = {}",
        lhs,
        rhs
    );
    lhs
}

/// Writes `f(i, j)` row by row into a fresh dense second-order tensor.
fn tensor2_from_fn<T, D>(nd: usize, f: impl Fn(usize, usize) -> T) -> Tensor2<T, D>
where
    T: Scalar,
    D: Spatial,
{
    Tensor2::from_offsets(nd, |offset| f(offset / nd, offset % nd))
}

#[track_caller]
fn dot2<T, D, A, B>(a: &A, b: &B) -> Tensor2<T, D>
where
    T: Scalar,
    D: Spatial,
    A: SecondOrder<T>,
    B: SecondOrder<T>,
{
    let nd = same_nd(a.nd(), b.nd());
    tensor2_from_fn(nd, |i, k| {
        (0..nd).fold(T::zero(), |acc, j| acc + a.entry(i, j) * b.entry(j, k))
    })
}

#[track_caller]
fn dot2_vector<T, D, A>(a: &A, v: &Vector<T, D>) -> Vector<T, D>
where
    T: Scalar,
    D: Spatial,
    A: SecondOrder<T>,
{
    let nd = same_nd(a.nd(), v.nd());
    Vector::from_offsets(nd, |i| (0..nd).fold(T::zero(), |acc, j| acc + a.entry(i, j) * v.0[j]))
}

#[track_caller]
fn vector_dot2<T, D, B>(v: &Vector<T, D>, b: &B) -> Vector<T, D>
where
    T: Scalar,
    D: Spatial,
    B: SecondOrder<T>,
{
    let nd = same_nd(v.nd(), b.nd());
    Vector::from_offsets(nd, |j| (0..nd).fold(T::zero(), |acc, i| acc + v.0[i] * b.entry(i, j)))
}

#[track_caller]
fn ddot2<T, A, B>(a: &A, b: &B) -> T
where
    T: Scalar,
    A: SecondOrder<T>,
    B: SecondOrder<T>,
{
    let nd = same_nd(a.nd(), b.nd());
    let mut acc = T::zero();
    for i in 0..nd {
        for j in 0..nd {
            acc = acc + a.entry(i, j) * b.entry(i, j);
        }
    }
    acc
}

#[track_caller]
fn ddot42<T, D, B>(a: &Tensor4<T, D>, b: &B) -> Tensor2<T, D>
where
    T: Scalar,
    D: Spatial,
    B: SecondOrder<T>,
{
    let nd = same_nd(a.nd(), b.nd());
    let data = a.0.as_slice();
    tensor2_from_fn(nd, |i, j| {
        let base = (i * nd + j) * nd * nd;
        let mut acc = T::zero();
        for k in 0..nd {
            for l in 0..nd {
                acc = acc + data[base + k * nd + l] * b.entry(k, l);
            }
        }
        acc
    })
}

#[track_caller]
fn ddot24<T, D, A>(a: &A, b: &Tensor4<T, D>) -> Tensor2<T, D>
where
    T: Scalar,
    D: Spatial,
    A: SecondOrder<T>,
{
    let nd = same_nd(a.nd(), b.nd());
    let data = b.0.as_slice();
    tensor2_from_fn(nd, |k, l| {
        let mut acc = T::zero();
        for i in 0..nd {
            for j in 0..nd {
                acc = acc + a.entry(i, j) * data[((i * nd + j) * nd + k) * nd + l];
            }
        }
        acc
    })
}

#[track_caller]
fn dyadic22<T, D, A, B>(a: &A, b: &B) -> Tensor4<T, D>
where
    T: Scalar,
    D: Spatial,
    A: SecondOrder<T>,
    B: SecondOrder<T>,
{
    let nd = same_nd(a.nd(), b.nd());
    let nn = nd * nd;
    Tensor4::from_offsets(nd, |offset| {
        let (ij, kl) = (offset / nn, offset % nn);
        a.entry(ij / nd, ij % nd) * b.entry(kl / nd, kl % nd)
    })
}

/// `Dot` between two second-order kinds, always dense.
macro_rules! impl_dot_dense {
    ($(($A:ident, $B:ident)),+) => {
        $(
            impl<T: Scalar, D: Spatial> Dot<$B<T, D>> for $A<T, D> {
                type Output = Tensor2<T, D>;

                #[track_caller]
                fn dot(&self, rhs: &$B<T, D>) -> Tensor2<T, D> {
                    dot2(self, rhs)
                }
            }
        )+
    };
}

impl_dot_dense!(
    (Tensor2, Tensor2),
    (Tensor2, Tensor2s),
    (Tensor2, Tensor2d),
    (Tensor2s, Tensor2),
    (Tensor2s, Tensor2s),
    (Tensor2s, Tensor2d),
    (Tensor2d, Tensor2),
    (Tensor2d, Tensor2s)
);

impl<T: Scalar, D: Spatial> Dot<Tensor2d<T, D>> for Tensor2d<T, D> {
    type Output = Tensor2d<T, D>;

    #[track_caller]
    fn dot(&self, rhs: &Tensor2d<T, D>) -> Tensor2d<T, D> {
        same_nd(self.nd(), rhs.nd());
        let mut out = self.clone();
        out.0 *= &rhs.0;
        out
    }
}

macro_rules! impl_dot_vector {
    ($($A:ident),+) => {
        $(
            impl<T: Scalar, D: Spatial> Dot<Vector<T, D>> for $A<T, D> {
                type Output = Vector<T, D>;

                #[track_caller]
                fn dot(&self, rhs: &Vector<T, D>) -> Vector<T, D> {
                    dot2_vector(self, rhs)
                }
            }

            impl<T: Scalar, D: Spatial> Dot<$A<T, D>> for Vector<T, D> {
                type Output = Vector<T, D>;

                #[track_caller]
                fn dot(&self, rhs: &$A<T, D>) -> Vector<T, D> {
                    vector_dot2(self, rhs)
                }
            }
        )+
    };
}

impl_dot_vector!(Tensor2, Tensor2s, Tensor2d);

impl<T: Scalar, D: Spatial> Dot<Vector<T, D>> for Vector<T, D> {
    type Output = T;

    /// Inner product `a_i b_i`.
    #[track_caller]
    fn dot(&self, rhs: &Vector<T, D>) -> T {
        same_nd(self.nd(), rhs.nd());
        self.0
            .iter()
            .zip(rhs.0.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }
}

macro_rules! impl_ddot_second_order {
    ($(($A:ident, $B:ident)),+) => {
        $(
            impl<T: Scalar, D: Spatial> Ddot<$B<T, D>> for $A<T, D> {
                type Output = T;

                #[track_caller]
                fn ddot(&self, rhs: &$B<T, D>) -> T {
                    ddot2(self, rhs)
                }
            }
        )+
    };
}

impl_ddot_second_order!(
    (Tensor2, Tensor2),
    (Tensor2, Tensor2s),
    (Tensor2, Tensor2d),
    (Tensor2s, Tensor2),
    (Tensor2s, Tensor2s),
    (Tensor2s, Tensor2d),
    (Tensor2d, Tensor2),
    (Tensor2d, Tensor2s),
    (Tensor2d, Tensor2d)
);

macro_rules! impl_ddot_fourth_order {
    ($($A:ident),+) => {
        $(
            impl<T: Scalar, D: Spatial> Ddot<$A<T, D>> for Tensor4<T, D> {
                type Output = Tensor2<T, D>;

                #[track_caller]
                fn ddot(&self, rhs: &$A<T, D>) -> Tensor2<T, D> {
                    ddot42(self, rhs)
                }
            }

            impl<T: Scalar, D: Spatial> Ddot<Tensor4<T, D>> for $A<T, D> {
                type Output = Tensor2<T, D>;

                #[track_caller]
                fn ddot(&self, rhs: &Tensor4<T, D>) -> Tensor2<T, D> {
                    ddot24(self, rhs)
                }
            }
        )+
    };
}

impl_ddot_fourth_order!(Tensor2, Tensor2s, Tensor2d);

impl<T: Scalar, D: Spatial> Ddot<Tensor4<T, D>> for Tensor4<T, D> {
    type Output = Tensor4<T, D>;

    #[track_caller]
    fn ddot(&self, rhs: &Tensor4<T, D>) -> Tensor4<T, D> {
        let nd = same_nd(self.nd(), rhs.nd());
        let nn = nd * nd;
        let a = self.0.as_slice();
        let b = rhs.0.as_slice();
        // (ij) x (kl) times (kl) x (mn), as nn x nn matrices
        Tensor4::from_offsets(nd, |offset| {
            let (ij, mn) = (offset / nn, offset % nn);
            (0..nn).fold(T::zero(), |acc, kl| acc + a[ij * nn + kl] * b[kl * nn + mn])
        })
    }
}

impl<T: Scalar, D: Spatial> Dyadic<Vector<T, D>> for Vector<T, D> {
    type Output = Tensor2<T, D>;

    #[track_caller]
    fn dyadic(&self, rhs: &Vector<T, D>) -> Tensor2<T, D> {
        let nd = same_nd(self.nd(), rhs.nd());
        tensor2_from_fn(nd, |i, j| self.0[i] * rhs.0[j])
    }
}

macro_rules! impl_dyadic_second_order {
    ($(($A:ident, $B:ident)),+) => {
        $(
            impl<T: Scalar, D: Spatial> Dyadic<$B<T, D>> for $A<T, D> {
                type Output = Tensor4<T, D>;

                #[track_caller]
                fn dyadic(&self, rhs: &$B<T, D>) -> Tensor4<T, D> {
                    dyadic22(self, rhs)
                }
            }
        )+
    };
}

impl_dyadic_second_order!(
    (Tensor2, Tensor2),
    (Tensor2, Tensor2s),
    (Tensor2, Tensor2d),
    (Tensor2s, Tensor2),
    (Tensor2s, Tensor2s),
    (Tensor2s, Tensor2d),
    (Tensor2d, Tensor2),
    (Tensor2d, Tensor2s),
    (Tensor2d, Tensor2d)
);

impl<T: Scalar, D: Spatial> Vector<T, D> {
    /// Cross product; only defined in three dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`TenmatError::UnsupportedDimension`] unless `nd == 3`, and a shape
    /// mismatch if the operands differ in `nd`.
    pub fn cross(&self, rhs: &Vector<T, D>) -> Result<Vector<T, D>> {
        if self.nd() != rhs.nd() {
            return Err(TenmatError::shape_mismatch(vec![self.nd()], vec![rhs.nd()]));
        }
        if self.nd() != 3 {
            return Err(TenmatError::UnsupportedDimension {
                op: "cross",
                nd: self.nd(),
            });
        }
        let a = self.0.as_slice();
        let b = rhs.0.as_slice();
        Vector::from_slice(&[
            a[1] * b[2] - b[1] * a[2],
            a[2] * b[0] - b[2] * a[0],
            a[0] * b[1] - b[0] * a[1],
        ])
    }
}

impl<T: Scalar + Float, D: Spatial> Vector<T, D> {
    /// Euclidean norm `sqrt(a_i a_i)`.
    pub fn length(&self) -> T {
        self.dot(self).sqrt()
    }

    /// Scales the vector to unit length.
    ///
    /// # Errors
    ///
    /// Returns a domain error for the zero vector.
    pub fn set_unit_length(&mut self) -> Result<()> {
        let length = self.length();
        if length == T::zero() {
            return Err(TenmatError::domain("cannot normalize a zero-length vector"));
        }
        *self /= length;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{D2, D3};
    use approx::assert_relative_eq;

    fn t2(data: [f64; 4]) -> Tensor2<f64, D2> {
        Tensor2::copy(2, &data).unwrap()
    }

    #[test]
    fn test_dot_second_order() {
        let a = t2([1.0, 2.0, 3.0, 4.0]);
        let b = t2([0.0, 1.0, 1.0, 0.0]);
        assert_eq!(a.dot(&b).as_slice(), &[2.0, 1.0, 4.0, 3.0]);

        let i = Tensor2::<f64, D2>::identity(2).unwrap();
        assert_eq!(a.dot(&i), a);
    }

    #[test]
    fn test_dot_mixed_kinds() {
        let s = Tensor2s::<f64, D2>::copy(2, &[1.0, 2.0, 3.0]).unwrap();
        let d = Tensor2d::<f64, D2>::copy(2, &[2.0, 3.0]).unwrap();
        let sd: Tensor2<f64, D2> = s.dot(&d);
        assert_eq!(sd.as_slice(), &[2.0, 6.0, 4.0, 9.0]);
        let ds: Tensor2<f64, D2> = d.dot(&s);
        assert_eq!(ds.as_slice(), &[2.0, 4.0, 6.0, 9.0]);
        let dd: Tensor2d<f64, D2> = d.dot(&d);
        assert_eq!(dd.as_slice(), &[4.0, 9.0]);
        let ss: Tensor2<f64, D2> = s.dot(&s);
        assert_eq!(ss.as_slice(), &[5.0, 8.0, 8.0, 13.0]);
    }

    #[test]
    fn test_dot_vector() {
        let a = t2([1.0, 2.0, 3.0, 4.0]);
        let v = Vector::<f64, D2>::from_slice(&[1.0, 1.0]).unwrap();
        assert_eq!(a.dot(&v).as_slice(), &[3.0, 7.0]);
        assert_eq!(v.dot(&a).as_slice(), &[4.0, 6.0]);
        assert_eq!(v.dot(&v), 2.0);
    }

    #[test]
    fn test_ddot() {
        let a = t2([1.0, 2.0, 3.0, 4.0]);
        let b = t2([5.0, 6.0, 7.0, 8.0]);
        assert_eq!(a.ddot(&b), 70.0);
        assert_eq!(a.ddot(&b), b.ddot(&a));

        let i4 = Tensor4::<f64, D2>::identity(2).unwrap();
        assert_eq!(i4.ddot(&a), a);
        assert_eq!(a.ddot(&i4), a);
        assert_eq!(i4.ddot(&i4), i4);

        let i4rt = Tensor4::<f64, D2>::identity_rt(2).unwrap();
        assert_eq!(i4rt.ddot(&a).as_slice(), &[1.0, 3.0, 2.0, 4.0]);

        let ii = Tensor4::<f64, D2>::identity_ii(2).unwrap();
        assert_eq!(ii.ddot(&a).as_slice(), &[5.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_deviatoric_projection() {
        let s = Tensor2s::<f64, D3>::copy(3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let i4d = Tensor4::<f64, D3>::identity_d(3).unwrap();
        let dev = i4d.ddot(&s);
        let tr = dev[[0, 0]] + dev[[1, 1]] + dev[[2, 2]];
        assert_relative_eq!(tr, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dev[[0, 1]], 2.0);
    }

    #[test]
    fn test_dyadic() {
        let a = Vector::<f64, D2>::from_slice(&[1.0, 2.0]).unwrap();
        let b = Vector::<f64, D2>::from_slice(&[3.0, 4.0]).unwrap();
        assert_eq!(a.dyadic(&b).as_slice(), &[3.0, 4.0, 6.0, 8.0]);

        let i = Tensor2::<f64, D2>::identity(2).unwrap();
        let ii = i.dyadic(&i);
        assert_eq!(ii, Tensor4::<f64, D2>::identity_ii(2).unwrap());
    }

    #[test]
    fn test_cross_and_length() {
        let a = Vector::<f64, D3>::from_slice(&[1.0, 0.0, 0.0]).unwrap();
        let b = Vector::<f64, D3>::from_slice(&[0.0, 1.0, 0.0]).unwrap();
        assert_eq!(a.cross(&b).unwrap().as_slice(), &[0.0, 0.0, 1.0]);
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(a.length(), 1.0);

        let p = Vector::<f64>::from_slice(&[1.0, 0.0]).unwrap();
        assert_eq!(
            p.cross(&p).unwrap_err(),
            TenmatError::UnsupportedDimension { op: "cross", nd: 2 }
        );
    }

    #[test]
    fn test_set_unit_length() {
        let mut v = Vector::<f64, D2>::from_slice(&[3.0, 4.0]).unwrap();
        v.set_unit_length().unwrap();
        assert_relative_eq!(v.length(), 1.0);
        assert_relative_eq!(v[[0]], 0.6);
        assert!(Vector::<f64, D2>::zero(2).unwrap().set_unit_length().is_err());
    }

    #[test]
    #[should_panic(expected = "spatial dimension mismatch")]
    fn test_nd_mismatch_panics() {
        let a = Tensor2::<f64>::zero(2).unwrap();
        let b = Tensor2::<f64>::zero(3).unwrap();
        let _ = a.dot(&b);
    }
}

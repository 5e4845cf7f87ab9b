//! Arithmetic operators for every storage kind.
//!
//! Operators work on the stored entries directly: two symmetric matrices share one
//! folding scheme, so adding their compressed buffers adds the matrices. Mixing a
//! symmetric with a diagonal matrix goes through the dedicated impls at the bottom
//! of this file.
//!
//! Binary operators copy the left operand and apply the compound operator. A scalar
//! on the left is a reversed operation: `s - a` is `s - a[i]` for every entry.
//!
//! Diagonal matrices only support the operators that keep every off-diagonal entry
//! zero: `+`, `-`, `*` with another diagonal matrix, and `*`, `/` with a scalar.
//!
//! Shape mismatches panic, like out-of-bounds slice indexing.

use super::assert_same_shape;
use crate::{
    array::Array,
    diagonal::DiagonalMatrix,
    kind::{self, Compressed},
    scalar::Scalar,
    storage::{Storage, StorageMut},
    symmetric::SymmetricMatrix,
};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// `lhs op= rhs` between two arrays of the same kind.
macro_rules! impl_assign_op {
    ($Kind:ident: $($Trait:ident $method:ident $op:tt),+) => {
        $(
            impl<'a, T, S, R> $Trait<&'a $Kind<T, R>> for $Kind<T, S>
            where
                T: Scalar,
                S: StorageMut<T>,
                R: Storage<T>,
            {
                #[track_caller]
                fn $method(&mut self, rhs: &'a $Kind<T, R>) {
                    assert_same_shape(self.shape(), rhs.shape());
                    for (a, &b) in self.as_mut_slice().iter_mut().zip(rhs.as_slice()) {
                        *a = *a $op b;
                    }
                }
            }
        )+
    };
}

/// `array op= scalar`.
macro_rules! impl_scalar_assign_op {
    ($Kind:ident: $($Trait:ident $method:ident $op:tt),+) => {
        $(
            impl<T: Scalar, S: StorageMut<T>> $Trait<T> for $Kind<T, S> {
                fn $method(&mut self, rhs: T) {
                    for a in self.as_mut_slice() {
                        *a = *a $op rhs;
                    }
                }
            }
        )+
    };
}

/// `lhs op rhs` between two arrays of the same kind, by reference and with an owned
/// left operand whose buffer is reused.
macro_rules! impl_binary_op {
    ($Kind:ident: $($Trait:ident $method:ident $assign:tt),+) => {
        $(
            impl<'a, 'b, T, S, R> $Trait<&'b $Kind<T, R>> for &'a $Kind<T, S>
            where
                T: Scalar,
                S: Storage<T>,
                R: Storage<T>,
            {
                type Output = $Kind<T, S::Owned<T>>;

                #[track_caller]
                fn $method(self, rhs: &'b $Kind<T, R>) -> Self::Output {
                    let mut out = self.to_owned();
                    out $assign rhs;
                    out
                }
            }

            impl<'b, T, S, R> $Trait<&'b $Kind<T, R>> for $Kind<T, S>
            where
                T: Scalar,
                S: StorageMut<T>,
                R: Storage<T>,
            {
                type Output = $Kind<T, S>;

                #[track_caller]
                fn $method(mut self, rhs: &'b $Kind<T, R>) -> Self::Output {
                    self $assign rhs;
                    self
                }
            }
        )+
    };
}

/// `array op scalar`.
macro_rules! impl_scalar_binary_op {
    ($Kind:ident: $($Trait:ident $method:ident $assign:tt),+) => {
        $(
            impl<'a, T: Scalar, S: Storage<T>> $Trait<T> for &'a $Kind<T, S> {
                type Output = $Kind<T, S::Owned<T>>;

                fn $method(self, rhs: T) -> Self::Output {
                    let mut out = self.to_owned();
                    out $assign rhs;
                    out
                }
            }

            impl<T: Scalar, S: StorageMut<T>> $Trait<T> for $Kind<T, S> {
                type Output = $Kind<T, S>;

                fn $method(mut self, rhs: T) -> Self::Output {
                    self $assign rhs;
                    self
                }
            }
        )+
    };
}

/// `scalar op array`, one impl set per primitive type.
macro_rules! impl_reversed_scalar_op {
    ($Kind:ident, $Trait:ident $method:ident $op:tt: $($t:ty),+) => {
        $(
            impl<'a, S: Storage<$t>> $Trait<&'a $Kind<$t, S>> for $t {
                type Output = $Kind<$t, S::Owned<$t>>;

                fn $method(self, rhs: &'a $Kind<$t, S>) -> Self::Output {
                    Compressed::map(rhs, |x| self $op x)
                }
            }

            impl<S: StorageMut<$t>> $Trait<$Kind<$t, S>> for $t {
                type Output = $Kind<$t, S>;

                fn $method(self, mut rhs: $Kind<$t, S>) -> Self::Output {
                    for x in rhs.as_mut_slice() {
                        *x = self $op *x;
                    }
                    rhs
                }
            }
        )+
    };
}

macro_rules! impl_reversed_for_primitives {
    ($Kind:ident: $($Trait:ident $method:ident $op:tt),+) => {
        $(
            impl_reversed_scalar_op!(
                $Kind, $Trait $method $op:
                i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
            );
        )+
    };
}

/// Unary minus.
macro_rules! impl_neg {
    ($($Kind:ident),+) => {
        $(
            impl<'a, T, S> Neg for &'a $Kind<T, S>
            where
                T: Scalar + Neg<Output = T>,
                S: Storage<T>,
            {
                type Output = $Kind<T, S::Owned<T>>;

                fn neg(self) -> Self::Output {
                    Compressed::map(self, |x| -x)
                }
            }

            impl<T, S> Neg for $Kind<T, S>
            where
                T: Scalar + Neg<Output = T>,
                S: StorageMut<T>,
            {
                type Output = $Kind<T, S>;

                fn neg(mut self) -> Self::Output {
                    for x in self.as_mut_slice() {
                        *x = -*x;
                    }
                    self
                }
            }
        )+
    };
}

impl_assign_op!(Array: AddAssign add_assign +, SubAssign sub_assign -, MulAssign mul_assign *, DivAssign div_assign /);
impl_scalar_assign_op!(Array: AddAssign add_assign +, SubAssign sub_assign -, MulAssign mul_assign *, DivAssign div_assign /);
impl_binary_op!(Array: Add add +=, Sub sub -=, Mul mul *=, Div div /=);
impl_scalar_binary_op!(Array: Add add +=, Sub sub -=, Mul mul *=, Div div /=);
impl_reversed_for_primitives!(Array: Add add +, Sub sub -, Mul mul *, Div div /);

impl_assign_op!(SymmetricMatrix: AddAssign add_assign +, SubAssign sub_assign -, MulAssign mul_assign *, DivAssign div_assign /);
impl_scalar_assign_op!(SymmetricMatrix: AddAssign add_assign +, SubAssign sub_assign -, MulAssign mul_assign *, DivAssign div_assign /);
impl_binary_op!(SymmetricMatrix: Add add +=, Sub sub -=, Mul mul *=, Div div /=);
impl_scalar_binary_op!(SymmetricMatrix: Add add +=, Sub sub -=, Mul mul *=, Div div /=);
impl_reversed_for_primitives!(SymmetricMatrix: Add add +, Sub sub -, Mul mul *, Div div /);

impl_assign_op!(DiagonalMatrix: AddAssign add_assign +, SubAssign sub_assign -, MulAssign mul_assign *);
impl_scalar_assign_op!(DiagonalMatrix: MulAssign mul_assign *, DivAssign div_assign /);
impl_binary_op!(DiagonalMatrix: Add add +=, Sub sub -=, Mul mul *=);
impl_scalar_binary_op!(DiagonalMatrix: Mul mul *=, Div div /=);
impl_reversed_for_primitives!(DiagonalMatrix: Mul mul *);

impl_neg!(Array, SymmetricMatrix, DiagonalMatrix);

// symmetric (op) diagonal

impl<'a, T, S, R> AddAssign<&'a DiagonalMatrix<T, R>> for SymmetricMatrix<T, S>
where
    T: Scalar,
    S: StorageMut<T>,
    R: Storage<T>,
{
    #[track_caller]
    fn add_assign(&mut self, rhs: &'a DiagonalMatrix<T, R>) {
        assert_same_shape(self.shape(), rhs.shape());
        let n = self.n();
        let data = self.as_mut_slice();
        for (i, &d) in rhs.iter().enumerate() {
            let k = kind::symmetric::compress(n, i, i);
            data[k] = data[k] + d;
        }
    }
}

impl<'a, T, S, R> SubAssign<&'a DiagonalMatrix<T, R>> for SymmetricMatrix<T, S>
where
    T: Scalar,
    S: StorageMut<T>,
    R: Storage<T>,
{
    #[track_caller]
    fn sub_assign(&mut self, rhs: &'a DiagonalMatrix<T, R>) {
        assert_same_shape(self.shape(), rhs.shape());
        let n = self.n();
        let data = self.as_mut_slice();
        for (i, &d) in rhs.iter().enumerate() {
            let k = kind::symmetric::compress(n, i, i);
            data[k] = data[k] - d;
        }
    }
}

/// Off-diagonal entries become zero.
impl<'a, T, S, R> MulAssign<&'a DiagonalMatrix<T, R>> for SymmetricMatrix<T, S>
where
    T: Scalar,
    S: StorageMut<T>,
    R: Storage<T>,
{
    #[track_caller]
    fn mul_assign(&mut self, rhs: &'a DiagonalMatrix<T, R>) {
        assert_same_shape(self.shape(), rhs.shape());
        let n = self.n();
        let diag = rhs.as_slice();
        let data = self.as_mut_slice();
        for i in 0..n {
            for j in i..n {
                let k = kind::symmetric::compress(n, i, j);
                data[k] = if i == j { data[k] * diag[i] } else { T::zero() };
            }
        }
    }
}

impl<'a, 'b, T, S, R> Add<&'b DiagonalMatrix<T, R>> for &'a SymmetricMatrix<T, S>
where
    T: Scalar,
    S: Storage<T>,
    R: Storage<T>,
{
    type Output = SymmetricMatrix<T, S::Owned<T>>;

    #[track_caller]
    fn add(self, rhs: &'b DiagonalMatrix<T, R>) -> Self::Output {
        let mut out = self.to_owned();
        out += rhs;
        out
    }
}

impl<'a, 'b, T, S, R> Sub<&'b DiagonalMatrix<T, R>> for &'a SymmetricMatrix<T, S>
where
    T: Scalar,
    S: Storage<T>,
    R: Storage<T>,
{
    type Output = SymmetricMatrix<T, S::Owned<T>>;

    #[track_caller]
    fn sub(self, rhs: &'b DiagonalMatrix<T, R>) -> Self::Output {
        let mut out = self.to_owned();
        out -= rhs;
        out
    }
}

impl<'a, 'b, T, S, R> Add<&'b SymmetricMatrix<T, R>> for &'a DiagonalMatrix<T, S>
where
    T: Scalar,
    S: Storage<T>,
    R: Storage<T>,
{
    type Output = SymmetricMatrix<T, R::Owned<T>>;

    #[track_caller]
    fn add(self, rhs: &'b SymmetricMatrix<T, R>) -> Self::Output {
        let mut out = rhs.to_owned();
        out += self;
        out
    }
}

impl<'a, 'b, T, S, R> Sub<&'b SymmetricMatrix<T, R>> for &'a DiagonalMatrix<T, S>
where
    T: Scalar,
    S: Storage<T>,
    R: Storage<T>,
{
    type Output = SymmetricMatrix<T, R::Owned<T>>;

    #[track_caller]
    fn sub(self, rhs: &'b SymmetricMatrix<T, R>) -> Self::Output {
        let mut out = Compressed::map(rhs, |x| T::zero() - x);
        out += self;
        out
    }
}

impl<'a, 'b, T, S, R> Mul<&'b DiagonalMatrix<T, R>> for &'a SymmetricMatrix<T, S>
where
    T: Scalar,
    S: Storage<T>,
    R: Storage<T>,
{
    type Output = DiagonalMatrix<T, R::Owned<T>>;

    #[track_caller]
    fn mul(self, rhs: &'b DiagonalMatrix<T, R>) -> Self::Output {
        assert_same_shape(self.shape(), rhs.shape());
        let n = self.n();
        let data = self.as_slice();
        let mut out = rhs.to_owned();
        for (i, d) in out.iter_mut().enumerate() {
            *d = data[kind::symmetric::compress(n, i, i)] * *d;
        }
        out
    }
}

impl<'a, 'b, T, S, R> Mul<&'b SymmetricMatrix<T, R>> for &'a DiagonalMatrix<T, S>
where
    T: Scalar,
    S: Storage<T>,
    R: Storage<T>,
{
    type Output = DiagonalMatrix<T, S::Owned<T>>;

    #[track_caller]
    fn mul(self, rhs: &'b SymmetricMatrix<T, R>) -> Self::Output {
        assert_same_shape(self.shape(), rhs.shape());
        let n = self.n();
        let data = rhs.as_slice();
        let mut out = self.to_owned();
        for (i, d) in out.iter_mut().enumerate() {
            *d = *d * data[kind::symmetric::compress(n, i, i)];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FixedStorage;

    #[test]
    fn test_dense_compound() {
        let mut a = Array::<f64>::copy(&[2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Array::<f64>::ones(&[2, 2]).unwrap();
        a += &b;
        assert_eq!(a.to_vec(), vec![2.0, 3.0, 4.0, 5.0]);
        a *= 2.0;
        assert_eq!(a.to_vec(), vec![4.0, 6.0, 8.0, 10.0]);
        a -= 1.0;
        a /= &b;
        assert_eq!(a.to_vec(), vec![3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_shape_mismatch_panics() {
        let mut a = Array::<f64>::zero(&[2, 2]).unwrap();
        let b = Array::<f64>::zero(&[4]).unwrap();
        a += &b;
    }

    #[test]
    fn test_dense_binary() {
        let a = Array::<i32>::arange(&[3]).unwrap();
        let b = Array::<i32>::ones(&[3]).unwrap();
        assert_eq!((&a + &b).to_vec(), vec![1, 2, 3]);
        assert_eq!((&a - &b).to_vec(), vec![-1, 0, 1]);
        assert_eq!((&a * 3).to_vec(), vec![0, 3, 6]);
        assert_eq!((a.clone() + &b).to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reversed_scalar_ops() {
        let a = Array::<f64>::copy(&[3], &[1.0, 2.0, 4.0]).unwrap();
        assert_eq!((10.0 - &a).to_vec(), vec![9.0, 8.0, 6.0]);
        assert_eq!((8.0 / &a).to_vec(), vec![8.0, 4.0, 2.0]);
        assert_eq!((1.0 + &a).to_vec(), vec![2.0, 3.0, 5.0]);
        assert_eq!((2.0 * a).to_vec(), vec![2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_fixed_storage_ops() {
        let a = Array::<f64, FixedStorage<f64, 3>>::ones(&[3]).unwrap();
        let b: Array<f64, FixedStorage<f64, 3>> = &a + &a;
        assert_eq!(b.to_vec(), vec![2.0; 3]);
    }

    #[test]
    fn test_view_operands() {
        let data = [1.0, 2.0, 3.0];
        let view = Array::<f64, &[f64]>::from_storage(&[3], &data[..]).unwrap();
        let owned: Array<f64> = &view * 2.0;
        assert_eq!(owned.to_vec(), vec![2.0, 4.0, 6.0]);
        let mut c = Array::<f64>::zero(&[3]).unwrap();
        c += &view;
        assert_eq!(c.to_vec(), data.to_vec());
    }

    #[test]
    fn test_symmetric_ops() {
        let a = SymmetricMatrix::<f64>::copy(2, &[1.0, 2.0, 3.0]).unwrap();
        let b = SymmetricMatrix::<f64>::ones(2).unwrap();
        let c = &a + &b;
        assert_eq!(c.as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!((&a * &a).to_dense(), {
            let d = a.to_dense();
            &d * &d
        });
        assert_eq!((6.0 / &a).as_slice(), &[6.0, 3.0, 2.0]);
        assert_eq!((-&a).as_slice(), &[-1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_diagonal_ops() {
        let mut a = DiagonalMatrix::<f64>::copy(3, &[1.0, 2.0, 3.0]).unwrap();
        let b = DiagonalMatrix::<f64>::copy(3, &[1.0, 1.0, 1.0]).unwrap();
        a += &b;
        assert_eq!(a.as_slice(), &[2.0, 3.0, 4.0]);
        a *= &b;
        a /= 2.0;
        assert_eq!(a.as_slice(), &[1.0, 1.5, 2.0]);
        assert_eq!((&a * 2.0).as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!((2.0 * &a).as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!((&a - &b).as_slice(), &[0.0, 0.5, 1.0]);
        assert_eq!((&a - &b)[[0, 2]], 0.0);
    }

    #[test]
    fn test_symmetric_with_diagonal() {
        // [[1, 2], [2, 3]] and diag(10, 20)
        let s = SymmetricMatrix::<f64>::copy(2, &[1.0, 2.0, 3.0]).unwrap();
        let d = DiagonalMatrix::<f64>::copy(2, &[10.0, 20.0]).unwrap();

        assert_eq!((&s + &d).as_slice(), &[11.0, 2.0, 23.0]);
        assert_eq!((&d + &s).as_slice(), &[11.0, 2.0, 23.0]);
        assert_eq!((&s - &d).as_slice(), &[-9.0, 2.0, -17.0]);
        assert_eq!((&d - &s).as_slice(), &[9.0, -2.0, 17.0]);
        assert_eq!((&s * &d).as_slice(), &[10.0, 60.0]);
        assert_eq!((&d * &s).as_slice(), &[10.0, 60.0]);

        let mut t = s.clone();
        t *= &d;
        assert_eq!(t.as_slice(), &[10.0, 0.0, 60.0]);
    }
}

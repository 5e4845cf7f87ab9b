//! Cartesian tensors in `ND` spatial dimensions.
//!
//! The tensor types wrap the storage kinds of this crate:
//!
//! | Type         | Backing            | Entries stored |
//! |--------------|--------------------|----------------|
//! | [`Vector`]   | dense, rank 1      | `ND`           |
//! | [`Tensor2`]  | dense, rank 2      | `ND^2`         |
//! | [`Tensor2s`] | symmetric          | `ND(ND+1)/2`   |
//! | [`Tensor2d`] | diagonal           | `ND`           |
//! | [`Tensor4`]  | dense, rank 4      | `ND^4`         |
//!
//! The spatial strategy `D` picks inline storage of the exact size ([`D2`], [`D3`],
//! ...) or heap storage with `ND` chosen at runtime ([`Dyn`], the default). Every
//! tensor dereferences to its backing array, so indexing, reductions and
//! comparisons apply unchanged.
//!
//! Entries can be written through indexing and [`Tensor2::as_mut_slice`], but the
//! shape is fixed at construction: the backing array is only reachable by shared
//! reference, so it cannot be reshaped or resized.
//!
//! ```compile_fail
//! use tenmat::Tensor2;
//!
//! let mut a = Tensor2::<f64>::zero(3).unwrap();
//! a.reshape(&[9]).unwrap();
//! ```
//!
//! [`D2`]: crate::dimension::D2
//! [`D3`]: crate::dimension::D3
//! [`Dyn`]: crate::dimension::Dyn

mod inverse;
mod products;
mod transpose;

pub use products::{Ddot, Dot, Dyadic};

use crate::{
    array::Array,
    diagonal::DiagonalMatrix,
    dimension::{Dyn, Shape, Spatial},
    error::{Result, TenmatError},
    scalar::{Element, Scalar},
    symmetric::SymmetricMatrix,
};
use rand::{distributions::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};
use std::{
    fmt,
    ops::{
        Add, AddAssign, Deref, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
    },
};

/// A first-order tensor.
pub struct Vector<T: Element, D: Spatial = Dyn>(pub(crate) Array<T, D::Vector<T>>);

/// A general second-order tensor.
pub struct Tensor2<T: Element, D: Spatial = Dyn>(pub(crate) Array<T, D::Tensor2<T>>);

/// A symmetric second-order tensor.
pub struct Tensor2s<T: Element, D: Spatial = Dyn>(pub(crate) SymmetricMatrix<T, D::Tensor2s<T>>);

/// A diagonal second-order tensor.
pub struct Tensor2d<T: Element, D: Spatial = Dyn>(pub(crate) DiagonalMatrix<T, D::Tensor2d<T>>);

/// A fourth-order tensor.
pub struct Tensor4<T: Element, D: Spatial = Dyn>(pub(crate) Array<T, D::Tensor4<T>>);

/// Read access to the entries of any second-order tensor.
pub trait SecondOrder<T: Scalar> {
    fn nd(&self) -> usize;

    /// The logical entry `(i, j)`.
    fn entry(&self, i: usize, j: usize) -> T;
}

/// Validates a foreign row-major buffer description and returns its `ND`.
fn check_buffer<D: Spatial>(extents: &[usize], rank: usize, len: usize) -> Result<usize> {
    let result = (|| {
        if extents.len() != rank {
            return Err(TenmatError::invalid_shape(format!(
                "expected a rank-{} buffer, got shape {:?}",
                rank, extents
            )));
        }
        let nd = extents[0];
        if extents.iter().any(|&n| n != nd) {
            return Err(TenmatError::invalid_shape(format!(
                "expected a square buffer, got shape {:?}",
                extents
            )));
        }
        D::check(nd)?;
        let expected: usize = extents.iter().product();
        if len != expected {
            return Err(TenmatError::shape_mismatch(vec![expected], vec![len]));
        }
        Ok(nd)
    })();
    if let Err(err) = &result {
        tracing::debug!(shape = ?extents, rank, len, %err, "rejected foreign buffer");
    }
    result
}

macro_rules! cartesian_common {
    ($Name:ident, $Inner:ident, $Slot:ident) => {
        impl<T: Element, D: Spatial> $Name<T, D> {
            /// Number of spatial dimensions.
            pub fn nd(&self) -> usize {
                self.0.shape()[0]
            }

            /// Borrows the backing array. There is no mutable counterpart, so the
            /// `nd`-per-axis shape cannot be changed from outside.
            pub fn as_inner(&self) -> &$Inner<T, D::$Slot<T>> {
                &self.0
            }

            /// Unwraps the backing array.
            pub fn into_inner(self) -> $Inner<T, D::$Slot<T>> {
                self.0
            }

            /// Mutable access to the stored entries in storage order.
            pub fn as_mut_slice(&mut self) -> &mut [T] {
                self.0.as_mut_slice()
            }

            pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
                self.0.iter_mut()
            }

            /// Sets every stored entry to `value`.
            pub fn fill(&mut self, value: T) {
                self.0.fill(value);
            }

            /// When set, out-of-range indices wrap around instead of being rejected.
            pub fn set_periodic(&mut self, periodic: bool) {
                self.0.set_periodic(periodic);
            }
        }

        impl<T: Element, D: Spatial> Deref for $Name<T, D> {
            type Target = $Inner<T, D::$Slot<T>>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<T: Element, D: Spatial, I> Index<I> for $Name<T, D>
        where
            $Inner<T, D::$Slot<T>>: Index<I>,
        {
            type Output = <$Inner<T, D::$Slot<T>> as Index<I>>::Output;

            #[track_caller]
            fn index(&self, index: I) -> &Self::Output {
                &self.0[index]
            }
        }

        impl<T: Element, D: Spatial, I> IndexMut<I> for $Name<T, D>
        where
            $Inner<T, D::$Slot<T>>: IndexMut<I>,
        {
            #[track_caller]
            fn index_mut(&mut self, index: I) -> &mut Self::Output {
                &mut self.0[index]
            }
        }

        impl<T: Element, D: Spatial> Clone for $Name<T, D> {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl<T: Element, D: Spatial> fmt::Debug for $Name<T, D> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($Name)).field(&self.0).finish()
            }
        }

        impl<T: Element + PartialEq, D: Spatial> PartialEq for $Name<T, D> {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl<T: Scalar, D: Spatial> $Name<T, D> {
            /// All entries zero.
            pub fn zero(nd: usize) -> Result<Self> {
                Self::constant(nd, T::zero())
            }

            pub fn ones(nd: usize) -> Result<Self> {
                Self::constant(nd, T::one())
            }

            /// Stored entries set to `0, 1, 2, ...` in storage order.
            pub fn arange(nd: usize) -> Result<Self> {
                let mut out = Self::zero(nd)?;
                out.0.set_arange();
                Ok(out)
            }

            /// Stored entries drawn uniformly from `[lower, upper)`.
            pub fn random<R: Rng + ?Sized>(nd: usize, lower: T, upper: T, rng: &mut R) -> Result<Self>
            where
                T: SampleUniform,
            {
                let mut out = Self::zero(nd)?;
                out.0.set_random(lower, upper, rng)?;
                Ok(out)
            }

            /// Like `random`, with a generator seeded from `seed` for reproducible output.
            pub fn random_seeded(nd: usize, lower: T, upper: T, seed: u64) -> Result<Self>
            where
                T: SampleUniform,
            {
                Self::random(nd, lower, upper, &mut StdRng::seed_from_u64(seed))
            }

            /// Copies entries in storage order.
            pub fn copy(nd: usize, data: &[T]) -> Result<Self> {
                let mut out = Self::zero(nd)?;
                out.0.set_copy(data)?;
                Ok(out)
            }
        }

        impl<'a, T: Scalar, D: Spatial> AddAssign<&'a $Name<T, D>> for $Name<T, D> {
            #[track_caller]
            fn add_assign(&mut self, rhs: &'a $Name<T, D>) {
                self.0 += &rhs.0;
            }
        }

        impl<'a, T: Scalar, D: Spatial> SubAssign<&'a $Name<T, D>> for $Name<T, D> {
            #[track_caller]
            fn sub_assign(&mut self, rhs: &'a $Name<T, D>) {
                self.0 -= &rhs.0;
            }
        }

        impl<T: Scalar, D: Spatial> MulAssign<T> for $Name<T, D> {
            fn mul_assign(&mut self, rhs: T) {
                self.0 *= rhs;
            }
        }

        impl<T: Scalar, D: Spatial> DivAssign<T> for $Name<T, D> {
            fn div_assign(&mut self, rhs: T) {
                self.0 /= rhs;
            }
        }

        impl<'a, 'b, T: Scalar, D: Spatial> Add<&'b $Name<T, D>> for &'a $Name<T, D> {
            type Output = $Name<T, D>;

            #[track_caller]
            fn add(self, rhs: &'b $Name<T, D>) -> $Name<T, D> {
                let mut out = self.clone();
                out += rhs;
                out
            }
        }

        impl<'a, 'b, T: Scalar, D: Spatial> Sub<&'b $Name<T, D>> for &'a $Name<T, D> {
            type Output = $Name<T, D>;

            #[track_caller]
            fn sub(self, rhs: &'b $Name<T, D>) -> $Name<T, D> {
                let mut out = self.clone();
                out -= rhs;
                out
            }
        }

        impl<'a, T: Scalar, D: Spatial> Mul<T> for &'a $Name<T, D> {
            type Output = $Name<T, D>;

            fn mul(self, rhs: T) -> $Name<T, D> {
                let mut out = self.clone();
                out *= rhs;
                out
            }
        }

        impl<'a, T: Scalar, D: Spatial> Div<T> for &'a $Name<T, D> {
            type Output = $Name<T, D>;

            fn div(self, rhs: T) -> $Name<T, D> {
                let mut out = self.clone();
                out /= rhs;
                out
            }
        }

        impl<'a, T: Scalar + Neg<Output = T>, D: Spatial> Neg for &'a $Name<T, D> {
            type Output = $Name<T, D>;

            fn neg(self) -> $Name<T, D> {
                let mut out = self.clone();
                for x in out.0.as_mut_slice() {
                    *x = -*x;
                }
                out
            }
        }
    };
}

/// Dense tensors built entry by entry from an `nd` that is already known to be valid.
macro_rules! dense_from_offsets {
    ($Name:ident, $rank:expr) => {
        impl<T: Element, D: Spatial> $Name<T, D> {
            pub(crate) fn from_offsets(nd: usize, f: impl FnMut(usize) -> T) -> Self {
                Self(Array::from_shape_fn(Shape::uniform(nd, $rank), f))
            }
        }
    };
}

dense_from_offsets!(Vector, 1);
dense_from_offsets!(Tensor2, 2);
dense_from_offsets!(Tensor4, 4);

cartesian_common!(Vector, Array, Vector);
cartesian_common!(Tensor2, Array, Tensor2);
cartesian_common!(Tensor2s, SymmetricMatrix, Tensor2s);
cartesian_common!(Tensor2d, DiagonalMatrix, Tensor2d);
cartesian_common!(Tensor4, Array, Tensor4);

impl<T: Element, D: Spatial> Vector<T, D> {
    /// A vector with every component set to `value`.
    pub fn constant(nd: usize, value: T) -> Result<Self> {
        D::check(nd)?;
        Ok(Self(Array::constant(&[nd], value)?))
    }

    /// A vector holding `data`; `ND` is its length.
    pub fn from_slice(data: &[T]) -> Result<Self> {
        D::check(data.len())?;
        Ok(Self(Array::copy(&[data.len()], data)?))
    }

    /// Converts a rank-1 foreign buffer.
    pub fn from_buffer(extents: &[usize], data: &[T]) -> Result<Self> {
        let nd = check_buffer::<D>(extents, 1, data.len())?;
        Ok(Self(Array::copy(&[nd], data)?))
    }

    /// Shape and row-major entries for a foreign buffer.
    pub fn to_buffer(&self) -> (Vec<usize>, Vec<T>) {
        (vec![self.nd()], self.0.to_vec())
    }
}

impl<T: Element, D: Spatial> Tensor2<T, D> {
    pub fn constant(nd: usize, value: T) -> Result<Self> {
        D::check(nd)?;
        Ok(Self(Array::constant(&[nd, nd], value)?))
    }

    /// Converts a square rank-2 foreign buffer.
    pub fn from_buffer(extents: &[usize], data: &[T]) -> Result<Self> {
        let nd = check_buffer::<D>(extents, 2, data.len())?;
        Ok(Self(Array::copy(&[nd, nd], data)?))
    }

    /// Shape and row-major entries, for exchange with other libraries.
    pub fn to_buffer(&self) -> (Vec<usize>, Vec<T>) {
        let nd = self.nd();
        (vec![nd, nd], self.0.to_vec())
    }
}

impl<T: Scalar, D: Spatial> Tensor2<T, D> {
    /// The second-order identity `I2`, `dot(I2, A) == A`.
    pub fn identity(nd: usize) -> Result<Self> {
        let mut out = Self::zero(nd)?;
        for i in 0..nd {
            out.0[[i, i]] = T::one();
        }
        Ok(out)
    }
}

impl<T: Element, D: Spatial> Tensor2s<T, D> {
    pub fn constant(nd: usize, value: T) -> Result<Self> {
        D::check(nd)?;
        Ok(Self(SymmetricMatrix::constant(nd, value)?))
    }

    /// Folds a full `nd x nd` layout; the lower triangle is trusted to mirror the
    /// upper one.
    pub fn copy_dense(nd: usize, data: &[T]) -> Result<Self> {
        D::check(nd)?;
        Ok(Self(SymmetricMatrix::copy_dense(nd, data)?))
    }

    /// Converts a square rank-2 foreign buffer, which must be exactly symmetric.
    pub fn from_buffer(extents: &[usize], data: &[T]) -> Result<Self>
    where
        T: PartialEq,
    {
        let nd = check_buffer::<D>(extents, 2, data.len())?;
        let dense = Array::<T>::copy(&[nd, nd], data)?;
        let folded = SymmetricMatrix::from_dense(&dense).map_err(|err| {
            tracing::debug!(%err, "rejected foreign buffer");
            err
        })?;
        Ok(Self(folded))
    }

    /// Shape and the implied dense entries for a foreign buffer.
    pub fn to_buffer(&self) -> (Vec<usize>, Vec<T>) {
        let nd = self.nd();
        (vec![nd, nd], self.0.to_dense().to_vec())
    }
}

impl<T: Scalar, D: Spatial> Tensor2s<T, D> {
    /// The second-order identity `delta_ij`.
    pub fn identity(nd: usize) -> Result<Self> {
        let mut out = Self::zero(nd)?;
        for i in 0..nd {
            out.0[[i, i]] = T::one();
        }
        Ok(out)
    }

    /// Dense copy of the same tensor.
    pub fn to_tensor2(&self) -> Result<Tensor2<T, D>> {
        Tensor2::copy(self.nd(), self.0.to_dense().as_slice())
    }
}

impl<T: Element, D: Spatial> Tensor2d<T, D> {
    pub fn constant(nd: usize, value: T) -> Result<Self> {
        D::check(nd)?;
        Ok(Self(DiagonalMatrix::constant(nd, value)?))
    }

    /// Reads the diagonal of a full `nd x nd` layout; off-diagonal entries must be
    /// zero.
    pub fn copy_dense(nd: usize, data: &[T]) -> Result<Self>
    where
        T: PartialEq,
    {
        D::check(nd)?;
        Ok(Self(DiagonalMatrix::copy_dense(nd, data)?))
    }

    /// Converts a square rank-2 foreign buffer, which must be diagonal.
    pub fn from_buffer(extents: &[usize], data: &[T]) -> Result<Self>
    where
        T: PartialEq,
    {
        let nd = check_buffer::<D>(extents, 2, data.len())?;
        let diag = DiagonalMatrix::copy_dense(nd, data).map_err(|err| {
            tracing::debug!(%err, "rejected foreign buffer");
            err
        })?;
        Ok(Self(diag))
    }

    /// Shape and the zero-filled dense entries for a foreign buffer.
    pub fn to_buffer(&self) -> (Vec<usize>, Vec<T>) {
        let nd = self.nd();
        (vec![nd, nd], self.0.to_dense().to_vec())
    }
}

impl<T: Scalar, D: Spatial> Tensor2d<T, D> {
    pub fn identity(nd: usize) -> Result<Self> {
        Self::ones(nd)
    }

    /// The same tensor in dense storage.
    pub fn to_tensor2(&self) -> Result<Tensor2<T, D>> {
        Tensor2::copy(self.nd(), self.0.to_dense().as_slice())
    }

    /// The same tensor in symmetric storage.
    pub fn to_tensor2s(&self) -> Result<Tensor2s<T, D>> {
        Tensor2s::copy(self.nd(), self.0.to_symmetric().as_slice())
    }
}

impl<T: Element, D: Spatial> Tensor4<T, D> {
    pub fn constant(nd: usize, value: T) -> Result<Self> {
        D::check(nd)?;
        Ok(Self(Array::constant(&[nd, nd, nd, nd], value)?))
    }

    /// Converts a square rank-4 foreign buffer.
    pub fn from_buffer(extents: &[usize], data: &[T]) -> Result<Self> {
        let nd = check_buffer::<D>(extents, 4, data.len())?;
        Ok(Self(Array::copy(&[nd, nd, nd, nd], data)?))
    }

    /// Shape and row-major entries of the rank-4 array.
    pub fn to_buffer(&self) -> (Vec<usize>, Vec<T>) {
        let nd = self.nd();
        (vec![nd, nd, nd, nd], self.0.to_vec())
    }
}

#[inline]
fn delta<T: Scalar>(i: usize, j: usize) -> T {
    if i == j {
        T::one()
    } else {
        T::zero()
    }
}

impl<T: Scalar, D: Spatial> Tensor4<T, D> {
    fn from_fn(nd: usize, f: impl Fn(usize, usize, usize, usize) -> T) -> Result<Self> {
        D::check(nd)?;
        Ok(Self::from_offsets(nd, |offset| {
            let (ij, kl) = (offset / (nd * nd), offset % (nd * nd));
            f(ij / nd, ij % nd, kl / nd, kl % nd)
        }))
    }

    /// `I4`, with `ddot(I4, A) == A`.
    pub fn identity(nd: usize) -> Result<Self> {
        Self::from_fn(nd, |i, j, k, l| delta::<T>(i, k) * delta(j, l))
    }

    /// `I4rt`, with `ddot(I4rt, A) == transpose(A)`.
    pub fn identity_rt(nd: usize) -> Result<Self> {
        Self::from_fn(nd, |i, j, k, l| delta::<T>(i, l) * delta(j, k))
    }

    /// `II = I2 (x) I2`, with `ddot(II, A) == trace(A) I2`.
    pub fn identity_ii(nd: usize) -> Result<Self> {
        Self::from_fn(nd, |i, j, k, l| delta::<T>(i, j) * delta(k, l))
    }
}

impl<T: Scalar + num_traits::Float, D: Spatial> Tensor4<T, D> {
    /// `I4s = (I4 + I4rt) / 2`, the projection onto the symmetric part.
    pub fn identity_s(nd: usize) -> Result<Self> {
        let half = T::one() / (T::one() + T::one());
        Self::from_fn(nd, |i, j, k, l| {
            (delta::<T>(i, k) * delta(j, l) + delta::<T>(i, l) * delta(j, k)) * half
        })
    }

    /// `I4d = I4s - II / nd`, the projection onto the symmetric deviatoric part.
    pub fn identity_d(nd: usize) -> Result<Self> {
        let half = T::one() / (T::one() + T::one());
        let scale = <T as num_traits::NumCast>::from(nd)
            .ok_or_else(|| TenmatError::invalid_argument("spatial dimension does not fit the element type"))?;
        Self::from_fn(nd, |i, j, k, l| {
            (delta::<T>(i, k) * delta(j, l) + delta::<T>(i, l) * delta(j, k)) * half
                - delta::<T>(i, j) * delta(k, l) / scale
        })
    }
}

impl<T: Scalar, D: Spatial> SecondOrder<T> for Tensor2<T, D> {
    fn nd(&self) -> usize {
        Tensor2::nd(self)
    }

    #[inline]
    fn entry(&self, i: usize, j: usize) -> T {
        self.0[[i, j]]
    }
}

impl<T: Scalar, D: Spatial> SecondOrder<T> for Tensor2s<T, D> {
    fn nd(&self) -> usize {
        Tensor2s::nd(self)
    }

    #[inline]
    fn entry(&self, i: usize, j: usize) -> T {
        self.0[[i, j]]
    }
}

impl<T: Scalar, D: Spatial> SecondOrder<T> for Tensor2d<T, D> {
    fn nd(&self) -> usize {
        Tensor2d::nd(self)
    }

    #[inline]
    fn entry(&self, i: usize, j: usize) -> T {
        self.0[[i, j]]
    }
}

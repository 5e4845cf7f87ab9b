//! Dense strided arrays of rank 1 to 6.
//!
//! This module provides [`Array`], the general row-major array. The storage
//! parameter `S` decides the size discipline: [`CpuStorage`] for runtime shapes,
//! [`FixedStorage`](crate::storage::FixedStorage) for shapes known at compile time,
//! and a borrowed slice for non-owning views (see [`crate::view`]).

use crate::{
    dimension::{Shape, MAX_DIM},
    error::{Result, TenmatError},
    kind::{Compressed, Kind},
    scalar::{Element, Scalar},
    storage::{CpuStorage, OwnedStorage, Storage, StorageMut},
};
use num_traits::NumCast;
use rand::{distributions::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};
use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

/// A dense n-dimensional array.
///
/// # Type Parameters
///
/// * `T`: The element type.
/// * `S`: The storage backend. Owning storages allocate and free their buffer; a
///   borrowed slice turns the array into a view.
///
/// Element access by flat offset (`a[i]`) is unchecked beyond the slice bound.
/// Access by axis indices (`a[[i, j]]`) checks every index against its extent, or
/// wraps it when the array is periodic.
#[derive(Debug, Clone)]
pub struct Array<T, S = CpuStorage<T>> {
    pub(crate) data: S,
    pub(crate) shape: Shape,
    pub(crate) periodic: bool,
    pub(crate) marker: PhantomData<T>,
}

/// Validates extents for an owning allocation.
fn checked_shape(extents: &[usize]) -> Result<Shape> {
    if extents.iter().any(|&n| n == 0) {
        return Err(TenmatError::invalid_shape(format!(
            "zero extent in shape {:?}",
            extents
        )));
    }
    Shape::new(extents)
}

impl<T: Element, S: Storage<T>> Array<T, S> {
    /// Wraps existing storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage length does not match the product of the
    /// extents, or if the rank is not in `1..=6`.
    pub fn from_storage(extents: &[usize], data: S) -> Result<Self> {
        let shape = checked_shape(extents)?;
        if data.len() != shape.size() {
            return Err(TenmatError::shape_mismatch(vec![shape.size()], vec![data.len()]));
        }
        Ok(Self {
            data,
            shape,
            periodic: false,
            marker: PhantomData,
        })
    }

    /// Returns the extents, one per axis.
    pub fn shape(&self) -> &[usize] {
        self.shape.extents()
    }

    /// Returns the shape descriptor.
    pub fn layout(&self) -> &Shape {
        &self.shape
    }

    /// Extent along `axis`, where negative values count from the last axis.
    pub fn extent(&self, axis: isize) -> Result<usize> {
        self.shape.extent(axis)
    }

    /// Number of axes, between 1 and 6.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Number of stored entries, the product of the extents.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Row-major strides, one per addressable index (padded axes included).
    pub fn strides(&self) -> &[usize] {
        self.shape.strides()
    }

    /// Whether out-of-range indices wrap around.
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// When set, out-of-range indices wrap around instead of being rejected.
    pub fn set_periodic(&mut self, periodic: bool) {
        self.periodic = periodic;
    }

    /// Lets the array be read with up to `n` indices. Extra trailing indices must be 0.
    pub fn atleast_nd(&mut self, n: usize) {
        self.shape.atleast_nd(n);
    }

    pub fn atleast_2d(&mut self) {
        self.atleast_nd(2);
    }

    pub fn atleast_3d(&mut self) {
        self.atleast_nd(3);
    }

    /// The stored entries in row-major order.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Borrows the underlying storage.
    pub fn storage(&self) -> &S {
        &self.data
    }

    /// Consumes the array and returns its storage, dropping the shape.
    pub fn into_storage(self) -> S {
        self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Copies the entries into a new `Vec` in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Flat offset of axis indices. Panics when an index is out of bounds and the
    /// array is not periodic.
    #[inline]
    pub fn compress(&self, indices: &[usize]) -> usize {
        if self.periodic {
            let mut wrapped = [0usize; MAX_DIM];
            for (axis, &i) in indices.iter().enumerate() {
                let n = self.shape.extents().get(axis).copied().unwrap_or(1);
                wrapped[axis] = i % n;
            }
            self.shape.offset(&wrapped[..indices.len()])
        } else {
            self.shape.offset(indices)
        }
    }

    /// Flat offset of signed axis indices. Negative values wrap only when the array is
    /// periodic.
    pub fn compress_signed(&self, indices: &[isize]) -> Result<usize> {
        self.shape.offset_signed(indices, self.periodic)
    }

    /// Axis indices of a flat offset; the exact inverse of [`Array::compress`].
    pub fn decompress(&self, offset: usize) -> Result<Vec<usize>> {
        self.shape.decompress(offset)
    }

    /// `true` if the indices address an entry (always, when periodic).
    pub fn in_bounds(&self, indices: &[isize]) -> bool {
        self.shape.in_bounds(indices, self.periodic)
    }

    /// Reads with signed indices, wrapping them if the array is periodic.
    ///
    /// # Errors
    ///
    /// Returns [`TenmatError::IndexOutOfBounds`] for an index outside `0..extent` on a
    /// non-periodic array, negative indices included.
    pub fn at(&self, indices: &[isize]) -> Result<&T> {
        let offset = self.compress_signed(indices)?;
        Ok(&self.as_slice()[offset])
    }

    /// Reads with unsigned indices, returning `None` when out of bounds.
    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        let signed: Vec<isize> = indices.iter().map(|&i| i as isize).collect();
        if !self.in_bounds(&signed) {
            return None;
        }
        self.at(&signed).ok()
    }

    /// Index of the centre along every axis. Every extent must be odd.
    pub fn midpoint(&self) -> Result<Vec<usize>> {
        self.shape.midpoint()
    }

    /// Midpoint index along one axis. See [`Array::midpoint`].
    pub fn midpoint_axis(&self, axis: isize) -> Result<usize> {
        self.shape.midpoint_axis(axis)
    }

    /// Copies the flat storage into `target`, which must have exactly `size()` entries.
    pub fn copy_to(&self, target: &mut [T]) -> Result<()> {
        if target.len() != self.size() {
            return Err(TenmatError::shape_mismatch(vec![self.size()], vec![target.len()]));
        }
        target.copy_from_slice(self.as_slice());
        Ok(())
    }

    /// Borrows the array as a read-only view.
    pub fn view(&self) -> Array<T, &[T]> {
        Array {
            data: self.as_slice(),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }

    /// Copies into owned storage of the same size discipline.
    pub fn to_owned(&self) -> Array<T, S::Owned<T>> {
        Array {
            data: self.data.map_owned(|x| x),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }

    /// Element-type conversion; fails if any value does not fit in `U`.
    pub fn cast<U>(&self) -> Result<Array<U, S::Owned<U>>>
    where
        T: Scalar,
        U: Scalar,
    {
        let converted = self
            .iter()
            .map(|&x| {
                <U as NumCast>::from(x).ok_or_else(|| {
                    TenmatError::invalid_argument(format!("value {} does not fit the target type", x))
                })
            })
            .collect::<Result<Vec<U>>>()?;
        Ok(Array {
            data: <S::Owned<U> as OwnedStorage<U>>::from_vec(converted)?,
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        })
    }
}

impl<T: Element, S: StorageMut<T>> Array<T, S> {
    /// Mutable access to the entries in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Writes with signed, possibly periodic, indices.
    pub fn at_mut(&mut self, indices: &[isize]) -> Result<&mut T> {
        let offset = self.compress_signed(indices)?;
        Ok(&mut self.as_mut_slice()[offset])
    }

    /// Mutable reference to an entry, or `None` when an index is out of bounds.
    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut T> {
        let signed: Vec<isize> = indices.iter().map(|&i| i as isize).collect();
        if !self.in_bounds(&signed) {
            return None;
        }
        self.at_mut(&signed).ok()
    }

    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Copies `data` verbatim into the storage.
    pub fn set_copy(&mut self, data: &[T]) -> Result<()> {
        if data.len() != self.size() {
            return Err(TenmatError::shape_mismatch(vec![self.size()], vec![data.len()]));
        }
        self.as_mut_slice().copy_from_slice(data);
        Ok(())
    }

    /// Copies the first `size()` items of `iter`.
    pub fn set_copy_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let size = self.size();
        let mut count = 0;
        for (slot, value) in self.as_mut_slice().iter_mut().zip(iter) {
            *slot = value;
            count += 1;
        }
        if count != size {
            return Err(TenmatError::shape_mismatch(vec![size], vec![count]));
        }
        Ok(())
    }
}

impl<T: Scalar, S: StorageMut<T>> Array<T, S> {
    pub fn set_zero(&mut self) {
        self.fill(T::zero());
    }

    pub fn set_ones(&mut self) {
        self.fill(T::one());
    }

    /// Fills with `0, 1, 2, ...` in storage order.
    pub fn set_arange(&mut self) {
        fill_arange(self.as_mut_slice());
    }

    /// Fills with values drawn uniformly from `[lower, upper)`.
    pub fn set_random<R: Rng + ?Sized>(&mut self, lower: T, upper: T, rng: &mut R) -> Result<()>
    where
        T: SampleUniform,
    {
        fill_random(self.as_mut_slice(), lower, upper, rng)
    }
}

pub(crate) fn fill_arange<T: Scalar>(data: &mut [T]) {
    let mut value = T::zero();
    for slot in data {
        *slot = value;
        value = value + T::one();
    }
}

pub(crate) fn fill_random<T, R>(data: &mut [T], lower: T, upper: T, rng: &mut R) -> Result<()>
where
    T: Scalar + SampleUniform,
    R: Rng + ?Sized,
{
    if !(lower < upper) {
        return Err(TenmatError::invalid_argument(format!(
            "random bounds must satisfy lower < upper, got [{}, {})",
            lower, upper
        )));
    }
    let dist = rand::distributions::Uniform::new(lower, upper);
    for slot in data {
        *slot = rng.sample(&dist);
    }
    Ok(())
}

impl<T: Element, S: OwnedStorage<T>> Array<T, S> {
    /// Builds the entry at each flat offset from `f`. The shape must already be valid
    /// for `S`.
    pub(crate) fn from_shape_fn(shape: Shape, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: S::from_fn(shape.size(), f),
            shape,
            periodic: false,
            marker: PhantomData,
        }
    }

    /// Allocates an array; entries hold `T::default()`.
    pub fn new(extents: &[usize]) -> Result<Self> {
        Self::constant(extents, T::default())
    }

    /// An array of the given extents with every entry set to `value`.
    pub fn constant(extents: &[usize], value: T) -> Result<Self> {
        let shape = checked_shape(extents)?;
        tracing::debug!(shape = ?extents, "allocating dense array");
        Ok(Self {
            data: S::filled(shape.size(), value)?,
            shape,
            periodic: false,
            marker: PhantomData,
        })
    }

    /// Copies flat, row-major `data` of exactly `prod(extents)` entries.
    pub fn copy(extents: &[usize], data: &[T]) -> Result<Self> {
        Self::from_vec(extents, data.to_vec())
    }

    /// Copies the first `prod(extents)` items of `iter`.
    pub fn copy_iter<I: IntoIterator<Item = T>>(extents: &[usize], iter: I) -> Result<Self> {
        let mut out = Self::new(extents)?;
        out.set_copy_iter(iter)?;
        Ok(out)
    }

    /// Takes ownership of `data` as the row-major entries of an array.
    ///
    /// # Errors
    ///
    /// Fails when the length of `data` does not match the extents.
    pub fn from_vec(extents: &[usize], data: Vec<T>) -> Result<Self> {
        let shape = checked_shape(extents)?;
        if data.len() != shape.size() {
            return Err(TenmatError::shape_mismatch(vec![shape.size()], vec![data.len()]));
        }
        Ok(Self {
            data: S::from_vec(data)?,
            shape,
            periodic: false,
            marker: PhantomData,
        })
    }

    /// Reallocates for a new shape. All previous values are lost.
    ///
    /// # Errors
    ///
    /// Fails if the rank is not in `1..=6`, an extent is zero, or fixed storage
    /// cannot hold the new size.
    pub fn resize(&mut self, extents: &[usize]) -> Result<()> {
        let shape = checked_shape(extents)?;
        tracing::debug!(from = ?self.shape.extents(), to = ?extents, "resizing dense array");
        self.data.reallocate(shape.size())?;
        self.shape = shape;
        Ok(())
    }

    /// Changes the shape while keeping the values; the size must not change.
    pub fn reshape(&mut self, extents: &[usize]) -> Result<()> {
        let shape = checked_shape(extents)?;
        if shape.size() != self.size() {
            return Err(TenmatError::shape_mismatch(self.shape().to_vec(), extents.to_vec()));
        }
        self.shape = shape;
        Ok(())
    }
}

impl<T: Scalar, S: OwnedStorage<T>> Array<T, S> {
    pub fn zero(extents: &[usize]) -> Result<Self> {
        Self::constant(extents, T::zero())
    }

    pub fn ones(extents: &[usize]) -> Result<Self> {
        Self::constant(extents, T::one())
    }

    pub fn arange(extents: &[usize]) -> Result<Self> {
        let mut out = Self::zero(extents)?;
        out.set_arange();
        Ok(out)
    }

    /// Uniform random entries in `[lower, upper)` drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(extents: &[usize], lower: T, upper: T, rng: &mut R) -> Result<Self>
    where
        T: SampleUniform,
    {
        let mut out = Self::zero(extents)?;
        out.set_random(lower, upper, rng)?;
        Ok(out)
    }

    /// Like [`Array::random`] with a generator seeded from `seed`; reproducible.
    pub fn random_seeded(extents: &[usize], lower: T, upper: T, seed: u64) -> Result<Self>
    where
        T: SampleUniform,
    {
        Self::random(extents, lower, upper, &mut StdRng::seed_from_u64(seed))
    }
}

impl<T: Element, S: Storage<T>> Compressed<T> for Array<T, S> {
    type Mapped<U: Element> = Array<U, S::Owned<U>>;

    fn kind(&self) -> Kind {
        Kind::Dense
    }

    fn logical_shape(&self) -> Shape {
        self.shape
    }

    fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    fn decompress(&self, offset: usize) -> Result<Vec<usize>> {
        self.shape.decompress(offset)
    }

    fn map<U: Element, F: FnMut(T) -> U>(&self, f: F) -> Array<U, S::Owned<U>> {
        Array {
            data: self.data.map_owned(f),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }
}

impl<T: Element, S: Storage<T>> Index<usize> for Array<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, offset: usize) -> &T {
        &self.as_slice()[offset]
    }
}

impl<T: Element, S: StorageMut<T>> IndexMut<usize> for Array<T, S> {
    #[inline]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        &mut self.as_mut_slice()[offset]
    }
}

macro_rules! impl_axis_index {
    ($($n:literal),*) => {
        $(
            impl<T: Element, S: Storage<T>> Index<[usize; $n]> for Array<T, S> {
                type Output = T;

                #[inline]
                fn index(&self, indices: [usize; $n]) -> &T {
                    let offset = self.compress(&indices);
                    &self.as_slice()[offset]
                }
            }

            impl<T: Element, S: StorageMut<T>> IndexMut<[usize; $n]> for Array<T, S> {
                #[inline]
                fn index_mut(&mut self, indices: [usize; $n]) -> &mut T {
                    let offset = self.compress(&indices);
                    &mut self.as_mut_slice()[offset]
                }
            }
        )*
    };
}

impl_axis_index!(1, 2, 3, 4, 5, 6);

impl<T, S, R> PartialEq<Array<T, R>> for Array<T, S>
where
    T: Element + PartialEq,
    S: Storage<T>,
    R: Storage<T>,
{
    fn eq(&self, other: &Array<T, R>) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FixedStorage;

    #[test]
    fn test_constructors() {
        let a = Array::<f64>::zero(&[2, 3]).unwrap();
        assert_eq!(a.shape(), &[2, 3]);
        assert_eq!(a.size(), 6);
        assert!(a.iter().all(|&x| x == 0.0));

        let b = Array::<i32>::arange(&[2, 2]).unwrap();
        assert_eq!(b.to_vec(), vec![0, 1, 2, 3]);

        let c = Array::<u8>::constant(&[3], 7).unwrap();
        assert_eq!(c.to_vec(), vec![7, 7, 7]);

        assert!(Array::<f64>::zero(&[]).is_err());
        assert!(Array::<f64>::zero(&[2, 0]).is_err());
        assert!(Array::<f64>::copy(&[2, 2], &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_fixed_storage_array() {
        let a = Array::<f64, FixedStorage<f64, 6>>::arange(&[2, 3]).unwrap();
        assert_eq!(a[[1, 2]], 5.0);
        assert!(Array::<f64, FixedStorage<f64, 6>>::zero(&[2, 2]).is_err());
    }

    #[test]
    fn test_index_and_strides() {
        let a = Array::<i32>::arange(&[2, 3, 4]).unwrap();
        assert_eq!(a.strides(), &[12, 4, 1]);
        assert_eq!(a[[1, 2, 3]], 23);
        assert_eq!(a[[0, 1, 0]], 4);
        assert_eq!(a[7], 7);
        assert_eq!(a.compress(&[1, 0, 2]), 14);
        assert_eq!(a.decompress(14).unwrap(), vec![1, 0, 2]);
        assert!(a.decompress(24).is_err());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let a = Array::<i32>::arange(&[2, 3]).unwrap();
        let _ = a[[2, 0]];
    }

    #[test]
    fn test_periodic_access() {
        let mut a = Array::<i32>::arange(&[3, 4]).unwrap();
        assert!(a.at(&[3, 0]).is_err());
        assert!(a.at(&[-1, -1]).is_err());
        assert!(!a.in_bounds(&[-1, 0]));

        a.set_periodic(true);
        assert_eq!(*a.at(&[-1, -1]).unwrap(), 11);
        assert_eq!(*a.at(&[3, 0]).unwrap(), 0);
        assert_eq!(*a.at(&[-4, 5]).unwrap(), 9);
        assert_eq!(a[[4, 4]], 4);
        assert!(a.in_bounds(&[100, -100]));
    }

    #[test]
    fn test_get() {
        let mut a = Array::<i32>::arange(&[2, 2]).unwrap();
        assert_eq!(a.get(&[1, 1]), Some(&3));
        assert_eq!(a.get(&[2, 0]), None);
        *a.get_mut(&[0, 1]).unwrap() = 10;
        assert_eq!(a[[0, 1]], 10);
    }

    #[test]
    fn test_extent_negative_axis() {
        let a = Array::<f64>::zero(&[2, 3, 4]).unwrap();
        assert_eq!(a.extent(-1).unwrap(), 4);
        assert_eq!(a.extent(-3).unwrap(), 2);
        assert!(a.extent(3).is_err());
        assert!(a.extent(-4).is_err());
    }

    #[test]
    fn test_atleast_3d() {
        let mut a = Array::<i32>::arange(&[2, 3]).unwrap();
        a.atleast_3d();
        assert_eq!(a.rank(), 2);
        assert_eq!(a.size(), 6);
        assert_eq!(a[[1, 2, 0]], 5);
        assert_eq!(a.strides(), &[3, 1, 1]);
    }

    #[test]
    fn test_resize() {
        let mut a = Array::<f64>::ones(&[2, 2]).unwrap();
        a.resize(&[3, 3]).unwrap();
        assert_eq!(a.shape(), &[3, 3]);
        assert_eq!(a.size(), 9);
        assert!(a.resize(&[]).is_err());

        let mut b = Array::<i32>::arange(&[2, 3]).unwrap();
        b.reshape(&[3, 2]).unwrap();
        assert_eq!(b[[2, 1]], 5);
        assert!(b.reshape(&[4, 2]).is_err());
    }

    #[test]
    fn test_midpoint() {
        let a = Array::<f64>::zero(&[3, 5, 7]).unwrap();
        assert_eq!(a.midpoint().unwrap(), vec![1, 2, 3]);

        let b = Array::<f64>::zero(&[3, 4]).unwrap();
        assert!(matches!(b.midpoint(), Err(TenmatError::Domain(_))));
        assert_eq!(b.midpoint_axis(0).unwrap(), 1);
        assert!(b.midpoint_axis(-1).is_err());
    }

    #[test]
    fn test_random_seeded_is_reproducible() {
        let a = Array::<f64>::random_seeded(&[4, 4], -1.0, 1.0, 42).unwrap();
        let b = Array::<f64>::random_seeded(&[4, 4], -1.0, 1.0, 42).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| (-1.0..1.0).contains(&x)));
        assert!(Array::<f64>::random_seeded(&[2], 1.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_copy_iter() {
        let a = Array::<i32>::copy_iter(&[2, 2], 10..).unwrap();
        assert_eq!(a.to_vec(), vec![10, 11, 12, 13]);
        assert!(Array::<i32>::copy_iter(&[2, 2], 0..3).is_err());
    }

    #[test]
    fn test_cast() {
        let a = Array::<f64>::copy(&[3], &[1.0, 2.5, -3.0]).unwrap();
        let b = a.cast::<i64>().unwrap();
        assert_eq!(b.to_vec(), vec![1, 2, -3]);
        assert!(a.cast::<u8>().is_err());
    }

    #[test]
    fn test_copy_to() {
        let a = Array::<i32>::arange(&[2, 2]).unwrap();
        let mut out = [0; 4];
        a.copy_to(&mut out).unwrap();
        assert_eq!(out, [0, 1, 2, 3]);
        assert!(a.copy_to(&mut [0; 3]).is_err());
    }
}

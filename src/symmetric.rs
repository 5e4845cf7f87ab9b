//! Square symmetric matrices stored as their upper triangle.
//!
//! An `N x N` [`SymmetricMatrix`] keeps the `N(N+1)/2` independent entries, row by
//! row: row 0 columns `0..N`, row 1 columns `1..N`, and so on. Reading `(i, j)` and
//! `(j, i)` resolves to the same stored cell.

use crate::{
    array::{fill_arange, fill_random, Array},
    dimension::{index, Shape},
    error::{Result, TenmatError},
    kind::{self, Compressed, Kind},
    scalar::{Element, Scalar},
    storage::{CpuStorage, OwnedStorage, Storage, StorageMut},
};
use num_traits::NumCast;
use rand::{distributions::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};
use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

#[derive(Debug, Clone)]
pub struct SymmetricMatrix<T, S = CpuStorage<T>> {
    pub(crate) data: S,
    pub(crate) shape: Shape,
    pub(crate) periodic: bool,
    pub(crate) marker: PhantomData<T>,
}

/// Resolves one unsigned index of a square matrix; panics when out of bounds and
/// not periodic.
#[inline]
pub(crate) fn wrap_square_index(i: usize, n: usize, periodic: bool) -> usize {
    if periodic {
        i % n
    } else {
        assert!(i < n, "index {} out of bounds for matrix of size {}", i, n);
        i
    }
}

pub(crate) fn check_square(n: usize) -> Result<Shape> {
    if n == 0 {
        return Err(TenmatError::invalid_shape("matrix size must be positive"));
    }
    Ok(Shape::square(n))
}

impl<T: Element, S: Storage<T>> SymmetricMatrix<T, S> {
    /// Wraps storage holding `n(n+1)/2` upper-triangle entries.
    pub fn from_storage(n: usize, data: S) -> Result<Self> {
        let shape = check_square(n)?;
        let expected = Kind::Symmetric.stored_len(n);
        if data.len() != expected {
            return Err(TenmatError::shape_mismatch(vec![expected], vec![data.len()]));
        }
        Ok(Self {
            data,
            shape,
            periodic: false,
            marker: PhantomData,
        })
    }

    /// Number of rows (and columns).
    pub fn n(&self) -> usize {
        self.shape.extents()[0]
    }

    /// Logical extents, always `[n, n]`.
    pub fn shape(&self) -> &[usize] {
        self.shape.extents()
    }

    pub fn extent(&self, axis: isize) -> Result<usize> {
        self.shape.extent(axis)
    }

    /// Always 2.
    pub fn rank(&self) -> usize {
        2
    }

    /// Number of stored entries, `n(n+1)/2`.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether out-of-range indices wrap around.
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    pub fn set_periodic(&mut self, periodic: bool) {
        self.periodic = periodic;
    }

    /// The stored upper triangle, row by row.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    pub fn storage(&self) -> &S {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Storage offset of `(a, b)`; either order gives the same offset.
    #[inline]
    pub fn compress(&self, a: usize, b: usize) -> usize {
        let n = self.n();
        let a = wrap_square_index(a, n, self.periodic);
        let b = wrap_square_index(b, n, self.periodic);
        kind::symmetric::compress(n, a, b)
    }

    /// Storage offset of signed indices, wrapped if the matrix is periodic.
    pub fn compress_signed(&self, a: isize, b: isize) -> Result<usize> {
        let n = self.n();
        let i = index::resolve(a, n, 0, self.periodic)?;
        let j = index::resolve(b, n, 1, self.periodic)?;
        Ok(kind::symmetric::compress(n, i, j))
    }

    /// A pair `[i, j]` with `i <= j` stored at `offset`.
    pub fn decompress(&self, offset: usize) -> Result<Vec<usize>> {
        kind::symmetric::decompress(self.n(), offset)
            .map(|(i, j)| vec![i, j])
            .ok_or_else(|| {
                TenmatError::out_of_range(format!(
                    "flat offset {} for a symmetric matrix storing {} entries",
                    offset,
                    self.size()
                ))
            })
    }

    /// `true` if `(a, b)` addresses an entry (always, when periodic).
    pub fn in_bounds(&self, a: isize, b: isize) -> bool {
        self.shape.in_bounds(&[a, b], self.periodic)
    }

    /// Reads with signed indices, wrapping them if the matrix is periodic.
    pub fn at(&self, a: isize, b: isize) -> Result<&T> {
        let offset = self.compress_signed(a, b)?;
        Ok(&self.as_slice()[offset])
    }

    /// `None` when an index is out of bounds and the matrix is not periodic.
    pub fn get(&self, a: usize, b: usize) -> Option<&T> {
        if !self.in_bounds(a as isize, b as isize) {
            return None;
        }
        self.at(a as isize, b as isize).ok()
    }

    /// The centre index. `n` must be odd.
    pub fn midpoint(&self) -> Result<Vec<usize>> {
        self.shape.midpoint()
    }

    pub fn midpoint_axis(&self, axis: isize) -> Result<usize> {
        self.shape.midpoint_axis(axis)
    }

    /// Copies the stored upper triangle into `target`.
    pub fn copy_to(&self, target: &mut [T]) -> Result<()> {
        if target.len() != self.size() {
            return Err(TenmatError::shape_mismatch(vec![self.size()], vec![target.len()]));
        }
        target.copy_from_slice(self.as_slice());
        Ok(())
    }

    /// Writes the full `n x n` row-major layout, mirroring the stored triangle.
    pub fn copy_to_dense(&self, target: &mut [T]) -> Result<()> {
        let n = self.n();
        if target.len() != n * n {
            return Err(TenmatError::shape_mismatch(vec![n * n], vec![target.len()]));
        }
        self.fill_dense(target);
        Ok(())
    }

    /// `target` must hold exactly `n * n` entries.
    fn fill_dense(&self, target: &mut [T]) {
        let n = self.n();
        let data = self.as_slice();
        for i in 0..n {
            for j in i..n {
                let value = data[kind::symmetric::compress(n, i, j)];
                target[i * n + j] = value;
                target[j * n + i] = value;
            }
        }
    }

    /// Materializes the implied dense matrix.
    pub fn to_dense(&self) -> Array<T> {
        let n = self.n();
        let mut out = vec![T::default(); n * n];
        self.fill_dense(&mut out);
        Array {
            data: CpuStorage::new(out),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }

    /// A borrowed view over the same storage.
    pub fn view(&self) -> SymmetricMatrix<T, &[T]> {
        SymmetricMatrix {
            data: self.as_slice(),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }

    /// A copy that owns its storage.
    pub fn to_owned(&self) -> SymmetricMatrix<T, S::Owned<T>> {
        Compressed::map(self, |x| x)
    }

    pub fn cast<U>(&self) -> Result<SymmetricMatrix<U, S::Owned<U>>>
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
        Ok(SymmetricMatrix {
            data: <S::Owned<U> as OwnedStorage<U>>::from_vec(converted)?,
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        })
    }
}

impl<T: Element, S: StorageMut<T>> SymmetricMatrix<T, S> {
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Mutable counterpart of [`SymmetricMatrix::at`]. Writing `(a, b)` also writes `(b, a)`.
    pub fn at_mut(&mut self, a: isize, b: isize) -> Result<&mut T> {
        let offset = self.compress_signed(a, b)?;
        Ok(&mut self.as_mut_slice()[offset])
    }

    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Copies `n(n+1)/2` upper-triangle entries verbatim.
    pub fn set_copy(&mut self, data: &[T]) -> Result<()> {
        if data.len() != self.size() {
            return Err(TenmatError::shape_mismatch(vec![self.size()], vec![data.len()]));
        }
        self.as_mut_slice().copy_from_slice(data);
        Ok(())
    }

    /// Reads the upper triangle of a full `n x n` row-major layout. Mirrored entries
    /// are trusted to agree and are not read.
    pub fn set_copy_dense(&mut self, data: &[T]) -> Result<()> {
        let n = self.n();
        if data.len() != n * n {
            return Err(TenmatError::shape_mismatch(vec![n * n], vec![data.len()]));
        }
        let stored = self.as_mut_slice();
        for i in 0..n {
            for j in i..n {
                stored[kind::symmetric::compress(n, i, j)] = data[i * n + j];
            }
        }
        Ok(())
    }
}

impl<T: Scalar, S: StorageMut<T>> SymmetricMatrix<T, S> {
    pub fn set_zero(&mut self) {
        self.fill(T::zero());
    }

    pub fn set_ones(&mut self) {
        self.fill(T::one());
    }

    pub fn set_arange(&mut self) {
        fill_arange(self.as_mut_slice());
    }

    pub fn set_random<R: Rng + ?Sized>(&mut self, lower: T, upper: T, rng: &mut R) -> Result<()>
    where
        T: SampleUniform,
    {
        fill_random(self.as_mut_slice(), lower, upper, rng)
    }
}

impl<T: Element, S: OwnedStorage<T>> SymmetricMatrix<T, S> {
    /// Allocates an `n x n` matrix; entries hold `T::default()`.
    pub fn new(n: usize) -> Result<Self> {
        Self::constant(n, T::default())
    }

    /// An `n x n` symmetric matrix with every entry set to `value`.
    pub fn constant(n: usize, value: T) -> Result<Self> {
        let shape = check_square(n)?;
        tracing::debug!(n, "allocating symmetric matrix");
        Ok(Self {
            data: S::filled(Kind::Symmetric.stored_len(n), value)?,
            shape,
            periodic: false,
            marker: PhantomData,
        })
    }

    /// Copies `n(n+1)/2` entries in storage order.
    pub fn copy(n: usize, data: &[T]) -> Result<Self> {
        let mut out = Self::new(n)?;
        out.set_copy(data)?;
        Ok(out)
    }

    pub fn copy_iter<I: IntoIterator<Item = T>>(n: usize, iter: I) -> Result<Self> {
        let mut out = Self::new(n)?;
        let size = out.size();
        let mut count = 0;
        for (slot, value) in out.as_mut_slice().iter_mut().zip(iter) {
            *slot = value;
            count += 1;
        }
        if count != size {
            return Err(TenmatError::shape_mismatch(vec![size], vec![count]));
        }
        Ok(out)
    }

    /// Folds a full `n x n` layout, keeping its upper triangle. The lower triangle is
    /// assumed to mirror it; use [`SymmetricMatrix::from_dense`] to check.
    pub fn copy_dense(n: usize, data: &[T]) -> Result<Self> {
        let mut out = Self::new(n)?;
        out.set_copy_dense(data)?;
        Ok(out)
    }

    /// Converts a square dense array, failing if it is not exactly symmetric.
    pub fn from_dense<R: Storage<T>>(dense: &Array<T, R>) -> Result<Self>
    where
        T: PartialEq,
    {
        let n = square_extent(dense.shape())?;
        let data = dense.as_slice();
        for i in 0..n {
            for j in (i + 1)..n {
                if data[i * n + j] != data[j * n + i] {
                    return Err(TenmatError::NotSymmetric(i, j));
                }
            }
        }
        Self::copy_dense(n, data)
    }

    /// Reallocates as `n x n`; all previous values are lost.
    pub fn resize(&mut self, n: usize) -> Result<()> {
        let shape = check_square(n)?;
        tracing::debug!(from = self.n(), to = n, "resizing symmetric matrix");
        self.data.reallocate(Kind::Symmetric.stored_len(n))?;
        self.shape = shape;
        Ok(())
    }
}

impl<T: Scalar, S: OwnedStorage<T>> SymmetricMatrix<T, S> {
    pub fn zero(n: usize) -> Result<Self> {
        Self::constant(n, T::zero())
    }

    pub fn ones(n: usize) -> Result<Self> {
        Self::constant(n, T::one())
    }

    pub fn arange(n: usize) -> Result<Self> {
        let mut out = Self::zero(n)?;
        out.set_arange();
        Ok(out)
    }

    pub fn random<R: Rng + ?Sized>(n: usize, lower: T, upper: T, rng: &mut R) -> Result<Self>
    where
        T: SampleUniform,
    {
        let mut out = Self::zero(n)?;
        out.set_random(lower, upper, rng)?;
        Ok(out)
    }

    pub fn random_seeded(n: usize, lower: T, upper: T, seed: u64) -> Result<Self>
    where
        T: SampleUniform,
    {
        Self::random(n, lower, upper, &mut StdRng::seed_from_u64(seed))
    }
}

/// The `n` of an `[n, n]` shape.
pub(crate) fn square_extent(shape: &[usize]) -> Result<usize> {
    match shape {
        [n, m] if n == m => Ok(*n),
        _ => Err(TenmatError::invalid_shape(format!(
            "expected a square matrix, got shape {:?}",
            shape
        ))),
    }
}

impl<T: Element, S: Storage<T>> Compressed<T> for SymmetricMatrix<T, S> {
    type Mapped<U: Element> = SymmetricMatrix<U, S::Owned<U>>;

    fn kind(&self) -> Kind {
        Kind::Symmetric
    }

    fn logical_shape(&self) -> Shape {
        self.shape
    }

    fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    fn decompress(&self, offset: usize) -> Result<Vec<usize>> {
        SymmetricMatrix::decompress(self, offset)
    }

    fn map<U: Element, F: FnMut(T) -> U>(&self, f: F) -> SymmetricMatrix<U, S::Owned<U>> {
        SymmetricMatrix {
            data: self.data.map_owned(f),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }
}

impl<T: Element, S: Storage<T>> Index<usize> for SymmetricMatrix<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, offset: usize) -> &T {
        &self.as_slice()[offset]
    }
}

impl<T: Element, S: StorageMut<T>> IndexMut<usize> for SymmetricMatrix<T, S> {
    #[inline]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        &mut self.as_mut_slice()[offset]
    }
}

impl<T: Element, S: Storage<T>> Index<[usize; 2]> for SymmetricMatrix<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, [a, b]: [usize; 2]) -> &T {
        let offset = self.compress(a, b);
        &self.as_slice()[offset]
    }
}

impl<T: Element, S: StorageMut<T>> IndexMut<[usize; 2]> for SymmetricMatrix<T, S> {
    #[inline]
    fn index_mut(&mut self, [a, b]: [usize; 2]) -> &mut T {
        let offset = self.compress(a, b);
        &mut self.as_mut_slice()[offset]
    }
}

impl<T, S, R> PartialEq<SymmetricMatrix<T, R>> for SymmetricMatrix<T, S>
where
    T: Element + PartialEq,
    S: Storage<T>,
    R: Storage<T>,
{
    fn eq(&self, other: &SymmetricMatrix<T, R>) -> bool {
        self.n() == other.n() && self.as_slice() == other.as_slice()
    }
}

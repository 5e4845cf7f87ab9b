//! Square diagonal matrices.
//!
//! A [`DiagonalMatrix`] stores the `N` diagonal entries only. Reading an
//! off-diagonal position yields a reference to a zero held by the matrix itself,
//! never a storage cell, so no write can reach it.

use crate::{
    array::{fill_arange, fill_random, Array},
    dimension::{index, Shape},
    error::{Result, TenmatError},
    kind::{self, Compressed, Kind},
    scalar::{Element, Scalar},
    storage::{CpuStorage, OwnedStorage, Storage, StorageMut},
    symmetric::{check_square, square_extent, wrap_square_index, SymmetricMatrix},
};
use num_traits::NumCast;
use rand::{distributions::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};
use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

#[derive(Debug, Clone)]
pub struct DiagonalMatrix<T, S = CpuStorage<T>> {
    pub(crate) data: S,
    pub(crate) shape: Shape,
    pub(crate) periodic: bool,
    pub(crate) zero: T,
}

impl<T: Element, S: Storage<T>> DiagonalMatrix<T, S> {
    /// Wraps storage holding the `n` diagonal entries.
    pub fn from_storage(n: usize, data: S) -> Result<Self> {
        let shape = check_square(n)?;
        if data.len() != n {
            return Err(TenmatError::shape_mismatch(vec![n], vec![data.len()]));
        }
        Ok(Self {
            data,
            shape,
            periodic: false,
            zero: T::default(),
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

    /// Number of stored entries, `n`.
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

    /// The stored diagonal.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    pub fn storage(&self) -> &S {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Storage offset of `(a, b)`, or `None` off the diagonal.
    #[inline]
    pub fn compress(&self, a: usize, b: usize) -> Option<usize> {
        let n = self.n();
        let a = wrap_square_index(a, n, self.periodic);
        let b = wrap_square_index(b, n, self.periodic);
        kind::diagonal::compress(a, b)
    }

    /// Storage offset of signed indices, `None` off the diagonal.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range index unless the matrix is periodic.
    pub fn compress_signed(&self, a: isize, b: isize) -> Result<Option<usize>> {
        let n = self.n();
        let i = index::resolve(a, n, 0, self.periodic)?;
        let j = index::resolve(b, n, 1, self.periodic)?;
        Ok(kind::diagonal::compress(i, j))
    }

    /// The pair `[i, i]` stored at `offset`.
    pub fn decompress(&self, offset: usize) -> Result<Vec<usize>> {
        kind::diagonal::decompress(self.n(), offset)
            .map(|(i, j)| vec![i, j])
            .ok_or_else(|| {
                TenmatError::out_of_range(format!(
                    "flat offset {} for a diagonal matrix of size {}",
                    offset,
                    self.n()
                ))
            })
    }

    /// `true` if `(a, b)` addresses an entry (always, when periodic).
    pub fn in_bounds(&self, a: isize, b: isize) -> bool {
        self.shape.in_bounds(&[a, b], self.periodic)
    }

    /// Reads with signed indices; off-diagonal positions read zero.
    pub fn at(&self, a: isize, b: isize) -> Result<&T> {
        Ok(match self.compress_signed(a, b)? {
            Some(offset) => &self.as_slice()[offset],
            None => &self.zero,
        })
    }

    pub fn get(&self, a: usize, b: usize) -> Option<&T> {
        if !self.in_bounds(a as isize, b as isize) {
            return None;
        }
        self.at(a as isize, b as isize).ok()
    }

    pub fn midpoint(&self) -> Result<Vec<usize>> {
        self.shape.midpoint()
    }

    pub fn midpoint_axis(&self, axis: isize) -> Result<usize> {
        self.shape.midpoint_axis(axis)
    }

    /// Writes the implied dense matrix into `target`, row-major.
    ///
    /// # Errors
    ///
    /// Fails unless `target` holds exactly `n * n` entries.
    pub fn copy_to(&self, target: &mut [T]) -> Result<()> {
        if target.len() != self.size() {
            return Err(TenmatError::shape_mismatch(vec![self.size()], vec![target.len()]));
        }
        target.copy_from_slice(self.as_slice());
        Ok(())
    }

    /// Writes the full `n x n` row-major layout, zero-filling off the diagonal.
    pub fn copy_to_dense(&self, target: &mut [T]) -> Result<()> {
        let n = self.n();
        if target.len() != n * n {
            return Err(TenmatError::shape_mismatch(vec![n * n], vec![target.len()]));
        }
        target.fill(self.zero);
        for (i, &value) in self.iter().enumerate() {
            target[i * n + i] = value;
        }
        Ok(())
    }

    pub fn to_dense(&self) -> Array<T> {
        let n = self.n();
        let mut out = vec![self.zero; n * n];
        for (i, &value) in self.iter().enumerate() {
            out[i * n + i] = value;
        }
        Array {
            data: CpuStorage::new(out),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }

    /// The same matrix in symmetric storage.
    pub fn to_symmetric(&self) -> SymmetricMatrix<T> {
        let n = self.n();
        let mut out = vec![self.zero; Kind::Symmetric.stored_len(n)];
        for (i, &value) in self.iter().enumerate() {
            out[kind::symmetric::compress(n, i, i)] = value;
        }
        SymmetricMatrix {
            data: CpuStorage::new(out),
            shape: self.shape,
            periodic: self.periodic,
            marker: PhantomData,
        }
    }

    pub fn view(&self) -> DiagonalMatrix<T, &[T]> {
        DiagonalMatrix {
            data: self.as_slice(),
            shape: self.shape,
            periodic: self.periodic,
            zero: self.zero,
        }
    }

    pub fn to_owned(&self) -> DiagonalMatrix<T, S::Owned<T>> {
        Compressed::map(self, |x| x)
    }

    /// Converts every entry, failing on the first one that does not fit in `U`.
    pub fn cast<U>(&self) -> Result<DiagonalMatrix<U, S::Owned<U>>>
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
        Ok(DiagonalMatrix {
            data: <S::Owned<U> as OwnedStorage<U>>::from_vec(converted)?,
            shape: self.shape,
            periodic: self.periodic,
            zero: U::zero(),
        })
    }
}

impl<T: Element, S: StorageMut<T>> DiagonalMatrix<T, S> {
    /// Mutable access to the stored diagonal.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Writes a diagonal entry; off-diagonal positions are rejected.
    pub fn at_mut(&mut self, a: isize, b: isize) -> Result<&mut T> {
        match self.compress_signed(a, b)? {
            Some(offset) => Ok(&mut self.as_mut_slice()[offset]),
            None => Err(TenmatError::invalid_argument(format!(
                "cannot write off-diagonal entry ({}, {}) of a diagonal matrix",
                a, b
            ))),
        }
    }

    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Overwrites the diagonal from `data`, which must hold `n` entries.
    pub fn set_copy(&mut self, data: &[T]) -> Result<()> {
        if data.len() != self.size() {
            return Err(TenmatError::shape_mismatch(vec![self.size()], vec![data.len()]));
        }
        self.as_mut_slice().copy_from_slice(data);
        Ok(())
    }

    /// Reads the diagonal of a full `n x n` row-major layout.
    ///
    /// # Errors
    ///
    /// Fails with [`TenmatError::NotDiagonal`] if any off-diagonal entry is non-zero;
    /// the matrix is left untouched in that case.
    pub fn set_copy_dense(&mut self, data: &[T]) -> Result<()>
    where
        T: PartialEq,
    {
        let n = self.n();
        if data.len() != n * n {
            return Err(TenmatError::shape_mismatch(vec![n * n], vec![data.len()]));
        }
        for i in 0..n {
            for j in 0..n {
                if i != j && data[i * n + j] != self.zero {
                    return Err(TenmatError::NotDiagonal(i, j));
                }
            }
        }
        let stored = self.as_mut_slice();
        for (i, slot) in stored.iter_mut().enumerate() {
            *slot = data[i * n + i];
        }
        Ok(())
    }
}

impl<T: Scalar, S: StorageMut<T>> DiagonalMatrix<T, S> {
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

impl<T: Element, S: OwnedStorage<T>> DiagonalMatrix<T, S> {
    /// An `n x n` diagonal matrix with default-valued entries.
    pub fn new(n: usize) -> Result<Self> {
        Self::constant(n, T::default())
    }

    /// All diagonal entries set to `value`; off-diagonal entries stay zero.
    pub fn constant(n: usize, value: T) -> Result<Self> {
        let shape = check_square(n)?;
        tracing::debug!(n, "allocating diagonal matrix");
        Ok(Self {
            data: S::filled(n, value)?,
            shape,
            periodic: false,
            zero: T::default(),
        })
    }

    /// Copies the `n` diagonal entries.
    pub fn copy(n: usize, data: &[T]) -> Result<Self> {
        let mut out = Self::new(n)?;
        out.set_copy(data)?;
        Ok(out)
    }

    pub fn copy_iter<I: IntoIterator<Item = T>>(n: usize, iter: I) -> Result<Self> {
        let mut out = Self::new(n)?;
        let mut count = 0;
        for (slot, value) in out.as_mut_slice().iter_mut().zip(iter) {
            *slot = value;
            count += 1;
        }
        if count != n {
            return Err(TenmatError::shape_mismatch(vec![n], vec![count]));
        }
        Ok(out)
    }

    /// Reads the diagonal of a full `n x n` layout, rejecting non-zero off-diagonal
    /// entries.
    pub fn copy_dense(n: usize, data: &[T]) -> Result<Self>
    where
        T: PartialEq,
    {
        let mut out = Self::new(n)?;
        out.set_copy_dense(data)?;
        Ok(out)
    }

    pub fn from_dense<R: Storage<T>>(dense: &Array<T, R>) -> Result<Self>
    where
        T: PartialEq,
    {
        let n = square_extent(dense.shape())?;
        Self::copy_dense(n, dense.as_slice())
    }

    /// Changes the size. The stored entries are reset to their default value.
    pub fn resize(&mut self, n: usize) -> Result<()> {
        let shape = check_square(n)?;
        tracing::debug!(from = self.n(), to = n, "resizing diagonal matrix");
        self.data.reallocate(n)?;
        self.shape = shape;
        Ok(())
    }
}

impl<T: Scalar, S: OwnedStorage<T>> DiagonalMatrix<T, S> {
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

impl<T: Element, S: Storage<T>> Compressed<T> for DiagonalMatrix<T, S> {
    type Mapped<U: Element> = DiagonalMatrix<U, S::Owned<U>>;

    fn kind(&self) -> Kind {
        Kind::Diagonal
    }

    fn logical_shape(&self) -> Shape {
        self.shape
    }

    fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    fn decompress(&self, offset: usize) -> Result<Vec<usize>> {
        DiagonalMatrix::decompress(self, offset)
    }

    /// Maps the stored entries. The off-diagonal zero of the result is
    /// `U::default()`, not `f(zero)`.
    fn map<U: Element, F: FnMut(T) -> U>(&self, f: F) -> DiagonalMatrix<U, S::Owned<U>> {
        DiagonalMatrix {
            data: self.data.map_owned(f),
            shape: self.shape,
            periodic: self.periodic,
            zero: U::default(),
        }
    }
}

impl<T: Element, S: Storage<T>> Index<usize> for DiagonalMatrix<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, offset: usize) -> &T {
        &self.as_slice()[offset]
    }
}

impl<T: Element, S: StorageMut<T>> IndexMut<usize> for DiagonalMatrix<T, S> {
    #[inline]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        &mut self.as_mut_slice()[offset]
    }
}

impl<T: Element, S: Storage<T>> Index<[usize; 2]> for DiagonalMatrix<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, [a, b]: [usize; 2]) -> &T {
        match self.compress(a, b) {
            Some(offset) => &self.as_slice()[offset],
            None => &self.zero,
        }
    }
}

/// Panics for off-diagonal positions.
impl<T: Element, S: StorageMut<T>> IndexMut<[usize; 2]> for DiagonalMatrix<T, S> {
    #[inline]
    fn index_mut(&mut self, [a, b]: [usize; 2]) -> &mut T {
        match self.compress(a, b) {
            Some(offset) => &mut self.as_mut_slice()[offset],
            None => panic!("cannot write off-diagonal entry ({}, {}) of a diagonal matrix", a, b),
        }
    }
}

impl<T, S, R> PartialEq<DiagonalMatrix<T, R>> for DiagonalMatrix<T, S>
where
    T: Element + PartialEq,
    S: Storage<T>,
    R: Storage<T>,
{
    fn eq(&self, other: &DiagonalMatrix<T, R>) -> bool {
        self.n() == other.n() && self.as_slice() == other.as_slice()
    }
}

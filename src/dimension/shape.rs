//! Shape descriptor shared by every dense layout.
//!
//! A [`Shape`] holds the rank, the per-axis extents and the row-major strides of an
//! array. It is `Copy` and lives inline, so array headers never allocate.

use super::{index, Stride, MAX_DIM};
use crate::error::{Result, TenmatError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    extents: [usize; MAX_DIM],
    rank: usize,
    strides: Stride,
}

impl Shape {
    /// Creates a row-major shape. Fails unless `1 <= extents.len() <= MAX_DIM`.
    pub fn new(extents: &[usize]) -> Result<Self> {
        if extents.is_empty() {
            return Err(TenmatError::invalid_shape("input should be at least 1-d"));
        }
        if extents.len() > MAX_DIM {
            return Err(TenmatError::invalid_shape(format!(
                "rank {} exceeds the maximum of {}",
                extents.len(),
                MAX_DIM
            )));
        }

        let mut stored = [1; MAX_DIM];
        stored[..extents.len()].copy_from_slice(extents);

        Ok(Self {
            extents: stored,
            rank: extents.len(),
            strides: Stride::row_major(extents),
        })
    }

    /// A square `n x n` shape.
    pub fn square(n: usize) -> Self {
        Self {
            extents: [n, n, 1, 1, 1, 1],
            rank: 2,
            strides: Stride::row_major(&[n, n]),
        }
    }

    /// The shape `[n; rank]`, for `1 <= rank <= MAX_DIM`.
    pub(crate) fn uniform(n: usize, rank: usize) -> Self {
        debug_assert!((1..=MAX_DIM).contains(&rank));
        let mut extents = [1; MAX_DIM];
        extents[..rank].fill(n);
        Self {
            extents,
            rank,
            strides: Stride::row_major(&extents[..rank]),
        }
    }

    /// Returns the number of logical axes.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns the total number of elements.
    pub fn size(&self) -> usize {
        self.extents().iter().product()
    }

    /// Returns the extents as a slice of length `rank`.
    pub fn extents(&self) -> &[usize] {
        &self.extents[..self.rank]
    }

    /// Returns the strides; may be longer than `rank` after [`Shape::atleast_nd`].
    pub fn strides(&self) -> &[usize] {
        self.strides.as_slice()
    }

    /// Extent along an axis given as `0..rank` or `-rank..-1` (counted from the end).
    pub fn extent(&self, axis: isize) -> Result<usize> {
        let axis = self.resolve_axis(axis)?;
        Ok(self.extents[axis])
    }

    /// Maps a signed axis selector onto `0..rank`.
    pub fn resolve_axis(&self, axis: isize) -> Result<usize> {
        let rank = self.rank as isize;
        if axis >= rank || axis < -rank {
            return Err(TenmatError::InvalidAxis(axis, self.rank));
        }
        Ok(((axis + rank) % rank) as usize)
    }

    /// Allows reading the array with `n` indices; the extra axes have extent 1.
    ///
    /// Neither the rank nor the element count changes.
    pub fn atleast_nd(&mut self, n: usize) {
        self.strides.pad_to(n.min(MAX_DIM));
    }

    /// Maximum number of indices accepted by [`Shape::offset`].
    pub fn index_capacity(&self) -> usize {
        self.strides.len().max(self.rank)
    }

    /// Extent of `axis`, treating padded axes as extent 1.
    #[inline]
    fn padded_extent(&self, axis: usize) -> usize {
        if axis < self.rank {
            self.extents[axis]
        } else {
            1
        }
    }

    /// Row-major offset of unsigned indices. Panics when an index is out of bounds.
    #[inline]
    pub fn offset(&self, indices: &[usize]) -> usize {
        assert!(
            !indices.is_empty() && indices.len() <= self.index_capacity(),
            "{} indices given for an array of rank {}",
            indices.len(),
            self.rank
        );
        for (axis, &i) in indices.iter().enumerate() {
            let n = self.padded_extent(axis);
            assert!(i < n, "index {} out of bounds for axis {} of size {}", i, axis, n);
        }
        self.strides.offset(indices)
    }

    /// Row-major offset of signed indices. Out-of-range values, negative ones
    /// included, wrap when `periodic` is set and are rejected otherwise.
    pub fn offset_signed(&self, indices: &[isize], periodic: bool) -> Result<usize> {
        if indices.is_empty() || indices.len() > self.index_capacity() {
            return Err(TenmatError::invalid_argument(format!(
                "{} indices given for an array of rank {}",
                indices.len(),
                self.rank
            )));
        }
        let mut resolved = [0usize; MAX_DIM];
        for (axis, &i) in indices.iter().enumerate() {
            resolved[axis] = index::resolve(i, self.padded_extent(axis), axis, periodic)?;
        }
        Ok(self.strides.offset(&resolved[..indices.len()]))
    }

    /// Checks signed indices against the extents without computing an offset.
    pub fn in_bounds(&self, indices: &[isize], periodic: bool) -> bool {
        if periodic {
            return true;
        }
        indices.len() <= self.index_capacity()
            && indices
                .iter()
                .enumerate()
                .all(|(axis, &i)| i >= 0 && (i as usize) < self.padded_extent(axis))
    }

    /// Inverse of [`Shape::offset`] for the row-major layout.
    pub fn decompress(&self, offset: usize) -> Result<Vec<usize>> {
        let size = self.size();
        if offset >= size {
            return Err(TenmatError::out_of_range(format!(
                "flat offset {} for an array of {} elements",
                offset, size
            )));
        }
        let mut rest = offset;
        let mut indices = vec![0; self.rank];
        for (axis, index) in indices.iter_mut().enumerate() {
            let stride = self.strides[axis];
            *index = rest / stride;
            rest %= stride;
        }
        Ok(indices)
    }

    /// Index of the centre along every axis. Every extent must be odd.
    pub fn midpoint(&self) -> Result<Vec<usize>> {
        self.extents()
            .iter()
            .enumerate()
            .map(|(axis, _)| self.midpoint_axis(axis as isize))
            .collect()
    }

    /// Index of the centre along one axis. The extent must be odd.
    pub fn midpoint_axis(&self, axis: isize) -> Result<usize> {
        let n = self.extent(axis)?;
        if n % 2 == 0 {
            return Err(TenmatError::domain(format!(
                "midpoint requires an odd extent, axis {} has extent {}",
                axis, n
            )));
        }
        Ok((n - 1) / 2)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.extents())
    }
}

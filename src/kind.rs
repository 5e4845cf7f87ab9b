//! Storage kinds and the index-compression contract.
//!
//! Three physically different layouts share one logical indexing model:
//!
//! * [`Kind::Dense`]: every logical entry is stored, row-major.
//! * [`Kind::Symmetric`]: an `N x N` matrix stores its upper triangle, `N(N+1)/2`
//!   entries enumerated row by row; `(i, j)` and `(j, i)` fold onto one offset.
//! * [`Kind::Diagonal`]: an `N x N` matrix stores its `N` diagonal entries; every
//!   off-diagonal position reads a shared zero.
//!
//! [`Compressed`] is the capability every layout implements. The reduction and
//! elementwise layers in [`crate::ops`] are written once against it.

use crate::{dimension::Shape, error::Result, scalar::Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Dense,
    Symmetric,
    Diagonal,
}

impl Kind {
    /// Number of stored entries for a square `n x n` matrix of this kind.
    pub fn stored_len(self, n: usize) -> usize {
        match self {
            Kind::Dense => n * n,
            Kind::Symmetric => n * (n + 1) / 2,
            Kind::Diagonal => n,
        }
    }

    /// Kind of a single contraction (`dot`) of two second-order operands.
    pub fn dot(self, rhs: Kind) -> Kind {
        match (self, rhs) {
            (Kind::Diagonal, Kind::Diagonal) => Kind::Diagonal,
            _ => Kind::Dense,
        }
    }

    /// Kind of an entrywise sum or difference of two square operands.
    pub fn add(self, rhs: Kind) -> Kind {
        match (self, rhs) {
            (Kind::Diagonal, Kind::Diagonal) => Kind::Diagonal,
            (Kind::Dense, _) | (_, Kind::Dense) => Kind::Dense,
            _ => Kind::Symmetric,
        }
    }

    /// Kind of an entrywise product of two square operands.
    pub fn mul(self, rhs: Kind) -> Kind {
        match (self, rhs) {
            (Kind::Diagonal, _) | (_, Kind::Diagonal) => Kind::Diagonal,
            (Kind::Symmetric, Kind::Symmetric) => Kind::Symmetric,
            _ => Kind::Dense,
        }
    }

    /// Iterator over how many logical entries each stored offset represents.
    pub fn multiplicities(self, n: usize) -> Multiplicities {
        Multiplicities {
            kind: self,
            n,
            row: 0,
            col: 0,
            offset: 0,
            len: match self {
                Kind::Dense => n,
                _ => self.stored_len(n),
            },
        }
    }
}

/// Yields 1 for every stored entry, except symmetric off-diagonal entries which
/// stand for two logical entries.
///
/// For [`Kind::Dense`] the `n` passed to [`Kind::multiplicities`] is the total
/// number of stored entries.
#[derive(Debug, Clone)]
pub struct Multiplicities {
    kind: Kind,
    n: usize,
    row: usize,
    col: usize,
    offset: usize,
    len: usize,
}

impl Iterator for Multiplicities {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.offset >= self.len {
            return None;
        }
        self.offset += 1;
        if self.kind != Kind::Symmetric {
            return Some(1);
        }
        let weight = if self.row == self.col { 1 } else { 2 };
        self.col += 1;
        if self.col == self.n {
            self.row += 1;
            self.col = self.row;
        }
        Some(weight)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.offset;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Multiplicities {}

/// Folding rule of the symmetric layout.
pub mod symmetric {
    /// Storage offset of `(i, j)` in an `n x n` symmetric matrix; either order works.
    #[inline]
    pub fn compress(n: usize, i: usize, j: usize) -> usize {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        debug_assert!(j < n);
        i * n - i * (i + 1) / 2 + j
    }

    /// A pair `(i, j)` with `i <= j` whose [`compress`] is `offset`.
    pub fn decompress(n: usize, offset: usize) -> Option<(usize, usize)> {
        let mut rest = offset;
        for i in 0..n {
            let row = n - i;
            if rest < row {
                return Some((i, i + rest));
            }
            rest -= row;
        }
        None
    }
}

/// Folding rule of the diagonal layout.
pub mod diagonal {
    /// Storage offset of `(i, j)`, or `None` for an off-diagonal position.
    #[inline]
    pub fn compress(i: usize, j: usize) -> Option<usize> {
        (i == j).then_some(i)
    }

    pub fn decompress(n: usize, offset: usize) -> Option<(usize, usize)> {
        (offset < n).then_some((offset, offset))
    }
}

/// The capability shared by every storage layout, owning or borrowed.
pub trait Compressed<T: Element> {
    /// An owned array of the same kind and shape holding `U` elements.
    type Mapped<U: Element>;

    fn kind(&self) -> Kind;

    /// Logical shape (for symmetric and diagonal matrices always `[n, n]`).
    fn logical_shape(&self) -> Shape;

    /// The stored (compressed) entries.
    fn as_slice(&self) -> &[T];

    /// Logical axis indices of a stored offset.
    fn decompress(&self, offset: usize) -> Result<Vec<usize>>;

    /// Applies `f` to every stored entry.
    fn map<U: Element, F: FnMut(T) -> U>(&self, f: F) -> Self::Mapped<U>;

    /// Number of logical entries, `prod(shape)`.
    fn logical_len(&self) -> usize {
        self.logical_shape().size()
    }

    /// Logical multiplicity of each stored entry, in storage order.
    fn multiplicities(&self) -> Multiplicities {
        match self.kind() {
            Kind::Dense => Kind::Dense.multiplicities(self.as_slice().len()),
            kind => kind.multiplicities(self.logical_shape().extents()[0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_fold() {
        let n = 4;
        assert_eq!(symmetric::compress(n, 0, 0), 0);
        assert_eq!(symmetric::compress(n, 0, 3), 3);
        assert_eq!(symmetric::compress(n, 1, 1), 4);
        assert_eq!(symmetric::compress(n, 1, 2), 5);
        assert_eq!(symmetric::compress(n, 2, 1), 5);
        assert_eq!(symmetric::compress(n, 3, 3), 9);

        for offset in 0..Kind::Symmetric.stored_len(n) {
            let (i, j) = symmetric::decompress(n, offset).unwrap();
            assert!(i <= j);
            assert_eq!(symmetric::compress(n, i, j), offset);
        }
        assert_eq!(symmetric::decompress(n, 10), None);
    }

    #[test]
    fn test_diagonal_fold() {
        assert_eq!(diagonal::compress(2, 2), Some(2));
        assert_eq!(diagonal::compress(2, 1), None);
        assert_eq!(diagonal::decompress(3, 2), Some((2, 2)));
        assert_eq!(diagonal::decompress(3, 3), None);
    }

    #[test]
    fn test_multiplicities() {
        let weights: Vec<_> = Kind::Symmetric.multiplicities(3).collect();
        assert_eq!(weights, vec![1, 2, 2, 1, 2, 1]);
        assert_eq!(weights.iter().sum::<usize>(), 9);

        assert_eq!(Kind::Diagonal.multiplicities(3).count(), 3);
        assert_eq!(Kind::Dense.multiplicities(6).sum::<usize>(), 6);
    }

    #[test]
    fn test_kind_table() {
        assert_eq!(Kind::Diagonal.dot(Kind::Diagonal), Kind::Diagonal);
        assert_eq!(Kind::Symmetric.dot(Kind::Symmetric), Kind::Dense);
        assert_eq!(Kind::Symmetric.add(Kind::Diagonal), Kind::Symmetric);
        assert_eq!(Kind::Dense.mul(Kind::Diagonal), Kind::Diagonal);
    }
}

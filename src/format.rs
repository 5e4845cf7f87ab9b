//! Text rendering of arrays in logical index order.
//!
//! Every kind renders as its logical dense matrix, so a symmetric or diagonal
//! matrix prints the same as the dense matrix it represents.

use crate::{
    array::Array,
    cartesian::{Tensor2, Tensor2d, Tensor2s, Tensor4, Vector},
    diagonal::DiagonalMatrix,
    dimension::Spatial,
    scalar::Element,
    storage::Storage,
    symmetric::SymmetricMatrix,
};
use std::fmt;

/// Writes a nested, row-major rendering of `shape` where `entry` maps a logical
/// flat offset to its value.
fn write_nested<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    shape: &[usize],
    entry: &dyn Fn(usize) -> T,
) -> fmt::Result {
    fn recurse<T: fmt::Display>(
        f: &mut fmt::Formatter<'_>,
        shape: &[usize],
        depth: usize,
        base: usize,
        entry: &dyn Fn(usize) -> T,
    ) -> fmt::Result {
        let extent = shape[depth];
        let inner: usize = shape[depth + 1..].iter().product();
        f.write_str("[")?;
        for i in 0..extent {
            if i > 0 {
                if depth + 1 == shape.len() {
                    f.write_str(", ")?;
                } else {
                    // Separate sub-blocks by one newline per remaining axis.
                    f.write_str(",")?;
                    for _ in depth + 1..shape.len() {
                        f.write_str("\n")?;
                    }
                    for _ in 0..=depth {
                        f.write_str(" ")?;
                    }
                }
            }
            if depth + 1 == shape.len() {
                match f.precision() {
                    Some(p) => write!(f, "{:.*}", p, entry(base + i))?,
                    None => write!(f, "{}", entry(base + i))?,
                }
            } else {
                recurse(f, shape, depth + 1, base + i * inner, entry)?;
            }
        }
        f.write_str("]")
    }

    recurse(f, shape, 0, 0, entry)
}

impl<T, S> fmt::Display for Array<T, S>
where
    T: Element + fmt::Display,
    S: Storage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.as_slice();
        write_nested(f, self.shape(), &|offset| data[offset])
    }
}

impl<T, S> fmt::Display for SymmetricMatrix<T, S>
where
    T: Element + fmt::Display,
    S: Storage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.n();
        let data = self.as_slice();
        write_nested(f, self.shape(), &|offset| {
            data[crate::kind::symmetric::compress(n, offset / n, offset % n)]
        })
    }
}

impl<T, S> fmt::Display for DiagonalMatrix<T, S>
where
    T: Element + fmt::Display,
    S: Storage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.n();
        let data = self.as_slice();
        let zero = T::default();
        write_nested(f, self.shape(), &|offset| {
            let (i, j) = (offset / n, offset % n);
            if i == j {
                data[i]
            } else {
                zero
            }
        })
    }
}

macro_rules! impl_display_newtype {
    ($($Name:ident),*) => {
        $(
            impl<T: Element + fmt::Display, D: Spatial> fmt::Display for $Name<T, D> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }
        )*
    };
}

impl_display_newtype!(Vector, Tensor2, Tensor2s, Tensor2d, Tensor4);

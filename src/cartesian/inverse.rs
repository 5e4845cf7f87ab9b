//! Trace, determinant and inverse of second-order tensors.
//!
//! Two and three dimensions use closed-form expressions. Higher dimensions fall back
//! to elimination with partial pivoting. `trace` and `det` work for any scalar;
//! `inv` and `hydrostatic` need a floating-point element type.

use super::{SecondOrder, Tensor2, Tensor2d, Tensor2s};
use crate::{
    dimension::Spatial,
    error::{Result, TenmatError},
    kind,
    scalar::Scalar,
};
use num_traits::Float;

fn trace_of<T: Scalar, A: SecondOrder<T>>(a: &A) -> T {
    (0..a.nd()).fold(T::zero(), |acc, i| acc + a.entry(i, i))
}

fn hydrostatic_of<T: Scalar + Float, A: SecondOrder<T>>(a: &A) -> Result<T> {
    let nd = <T as num_traits::NumCast>::from(a.nd())
        .ok_or_else(|| TenmatError::invalid_argument("spatial dimension does not fit the element type"))?;
    Ok(trace_of(a) / nd)
}

fn singular<T>() -> Result<T> {
    tracing::debug!("rejecting inverse of a singular tensor");
    Err(TenmatError::Singular)
}

/// Determinant of a dense `n x n` row-major matrix by fraction-free (Bareiss)
/// elimination with partial pivoting.
///
/// Every division is exact, so integer matrices get an exact determinant.
fn det_dense<T: Scalar>(mut m: Vec<T>, n: usize) -> T {
    let mut negate = false;
    let mut previous = T::one();
    for k in 0..n.saturating_sub(1) {
        let mut pivot = k;
        for i in (k + 1)..n {
            if m[i * n + k].magnitude() > m[pivot * n + k].magnitude() {
                pivot = i;
            }
        }
        if m[pivot * n + k] == T::zero() {
            return T::zero();
        }
        if pivot != k {
            for j in 0..n {
                m.swap(k * n + j, pivot * n + j);
            }
            negate = !negate;
        }

        let mkk = m[k * n + k];
        for i in (k + 1)..n {
            let mik = m[i * n + k];
            for j in (k + 1)..n {
                m[i * n + j] = (m[i * n + j] * mkk - mik * m[k * n + j]) / previous;
            }
        }
        previous = mkk;
    }

    let det = m[n * n - 1];
    if negate {
        T::zero() - det
    } else {
        det
    }
}

/// Inverse of a dense `n x n` row-major matrix by Gauss-Jordan elimination.
fn inv_dense<T: Scalar + Float>(data: &[T], n: usize) -> Result<Vec<T>> {
    let w = 2 * n;
    let mut aug = vec![T::zero(); n * w];
    for i in 0..n {
        aug[i * w..i * w + n].copy_from_slice(&data[i * n..(i + 1) * n]);
        aug[i * w + n + i] = T::one();
    }

    for i in 0..n {
        let mut max = i;
        for j in (i + 1)..n {
            if aug[j * w + i].abs() > aug[max * w + i].abs() {
                max = j;
            }
        }
        if max != i {
            for k in 0..w {
                aug.swap(i * w + k, max * w + k);
            }
        }

        let pivot = aug[i * w + i];
        if pivot == T::zero() {
            return singular();
        }
        for k in 0..w {
            aug[i * w + k] = aug[i * w + k] / pivot;
        }

        for j in 0..n {
            if j != i && aug[j * w + i] != T::zero() {
                let factor = aug[j * w + i];
                for k in 0..w {
                    aug[j * w + k] = aug[j * w + k] - aug[i * w + k] * factor;
                }
            }
        }
    }

    let mut out = vec![T::zero(); n * n];
    for i in 0..n {
        out[i * n..(i + 1) * n].copy_from_slice(&aug[i * w + n..(i + 1) * w]);
    }
    Ok(out)
}

impl<T: Scalar, D: Spatial> Tensor2<T, D> {
    /// `A_ii`.
    pub fn trace(&self) -> T {
        trace_of(self)
    }

    /// Determinant. Closed forms up to three dimensions, exact elimination above.
    pub fn det(&self) -> T {
        let a = self.0.as_slice();
        match self.nd() {
            1 => a[0],
            2 => a[0] * a[3] - a[1] * a[2],
            3 => {
                // |a b c|
                // |d e f| = a(ei - fh) - b(di - fg) + c(dh - eg)
                // |g h i|
                a[0] * (a[4] * a[8] - a[5] * a[7]) - a[1] * (a[3] * a[8] - a[5] * a[6])
                    + a[2] * (a[3] * a[7] - a[4] * a[6])
            }
            n => det_dense(a.to_vec(), n),
        }
    }
}

impl<T: Scalar + Float, D: Spatial> Tensor2<T, D> {
    /// `trace / nd`.
    pub fn hydrostatic(&self) -> Result<T> {
        hydrostatic_of(self)
    }

    /// The inverse, such that `dot(A, inv(A))` is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`TenmatError::Singular`] when the determinant is zero.
    pub fn inv(&self) -> Result<Tensor2<T, D>> {
        let nd = self.nd();
        let a = self.0.as_slice();
        let data = match nd {
            1 | 2 | 3 => {
                let det = self.det();
                if det == T::zero() {
                    return singular();
                }
                match nd {
                    1 => vec![T::one() / det],
                    2 => vec![a[3] / det, -a[1] / det, -a[2] / det, a[0] / det],
                    _ => vec![
                        (a[4] * a[8] - a[5] * a[7]) / det,
                        (a[2] * a[7] - a[1] * a[8]) / det,
                        (a[1] * a[5] - a[2] * a[4]) / det,
                        (a[5] * a[6] - a[3] * a[8]) / det,
                        (a[0] * a[8] - a[2] * a[6]) / det,
                        (a[2] * a[3] - a[0] * a[5]) / det,
                        (a[3] * a[7] - a[4] * a[6]) / det,
                        (a[1] * a[6] - a[0] * a[7]) / det,
                        (a[0] * a[4] - a[1] * a[3]) / det,
                    ],
                }
            }
            n => inv_dense(a, n)?,
        };
        Tensor2::copy(nd, &data)
    }
}

impl<T: Scalar, D: Spatial> Tensor2s<T, D> {
    pub fn trace(&self) -> T {
        trace_of(self)
    }

    /// Determinant, computed from the stored upper triangle up to three dimensions.
    pub fn det(&self) -> T {
        let a = self.0.as_slice();
        match self.nd() {
            1 => a[0],
            // [a0 a1; a1 a2]
            2 => a[0] * a[2] - a[1] * a[1],
            // [a0 a1 a2; a1 a3 a4; a2 a4 a5]
            3 => {
                a[0] * a[3] * a[5] + (a[1] * a[4] * a[2] + a[1] * a[4] * a[2])
                    - a[2] * a[2] * a[3]
                    - a[4] * a[4] * a[0]
                    - a[1] * a[1] * a[5]
            }
            n => det_dense(self.0.to_dense().to_vec(), n),
        }
    }
}

impl<T: Scalar + Float, D: Spatial> Tensor2s<T, D> {
    /// `trace / nd`.
    pub fn hydrostatic(&self) -> Result<T> {
        hydrostatic_of(self)
    }

    /// The inverse, itself symmetric.
    ///
    /// # Errors
    ///
    /// Returns [`TenmatError::Singular`] when the determinant is zero.
    pub fn inv(&self) -> Result<Tensor2s<T, D>> {
        let nd = self.nd();
        let a = self.0.as_slice();
        let data = match nd {
            1 | 2 | 3 => {
                let det = self.det();
                if det == T::zero() {
                    return singular();
                }
                match nd {
                    1 => vec![T::one() / det],
                    2 => vec![a[2] / det, -a[1] / det, a[0] / det],
                    _ => vec![
                        (a[3] * a[5] - a[4] * a[4]) / det,
                        (a[2] * a[4] - a[1] * a[5]) / det,
                        (a[1] * a[4] - a[2] * a[3]) / det,
                        (a[0] * a[5] - a[2] * a[2]) / det,
                        (a[2] * a[1] - a[0] * a[4]) / det,
                        (a[0] * a[3] - a[1] * a[1]) / det,
                    ],
                }
            }
            n => {
                let dense = inv_dense(self.0.to_dense().as_slice(), n)?;
                let mut folded = vec![T::zero(); kind::Kind::Symmetric.stored_len(n)];
                for i in 0..n {
                    for j in i..n {
                        folded[kind::symmetric::compress(n, i, j)] = dense[i * n + j];
                    }
                }
                folded
            }
        };
        Tensor2s::copy(nd, &data)
    }
}

impl<T: Scalar, D: Spatial> Tensor2d<T, D> {
    pub fn trace(&self) -> T {
        trace_of(self)
    }

    /// Product of the diagonal entries.
    pub fn det(&self) -> T {
        self.0.iter().fold(T::one(), |acc, &x| acc * x)
    }
}

impl<T: Scalar + Float, D: Spatial> Tensor2d<T, D> {
    pub fn hydrostatic(&self) -> Result<T> {
        hydrostatic_of(self)
    }

    /// Entrywise reciprocal of the diagonal.
    ///
    /// # Errors
    ///
    /// Returns [`TenmatError::Singular`] if any diagonal entry is zero.
    pub fn inv(&self) -> Result<Tensor2d<T, D>> {
        if self.0.iter().any(|&x| x == T::zero()) {
            return singular();
        }
        let mut out = self.clone();
        for x in out.0.as_mut_slice() {
            *x = T::one() / *x;
        }
        Ok(out)
    }
}

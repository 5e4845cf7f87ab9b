//! Transposes of second- and fourth-order tensors.

use super::{Tensor2, Tensor2d, Tensor2s, Tensor4};
use crate::{dimension::Spatial, scalar::Scalar};

impl<T: Scalar, D: Spatial> Tensor2<T, D> {
    /// `C_ji = A_ij`.
    pub fn transpose(&self) -> Tensor2<T, D> {
        let nd = self.nd();
        let mut out = self.clone();
        let src = self.0.as_slice();
        let dst = out.0.as_mut_slice();
        for i in 0..nd {
            for j in 0..nd {
                dst[j * nd + i] = src[i * nd + j];
            }
        }
        out
    }
}

impl<T: Scalar, D: Spatial> Tensor2s<T, D> {
    /// A symmetric tensor is its own transpose.
    pub fn transpose(&self) -> Tensor2s<T, D> {
        self.clone()
    }
}

impl<T: Scalar, D: Spatial> Tensor2d<T, D> {
    /// A diagonal tensor is its own transpose.
    pub fn transpose(&self) -> Tensor2d<T, D> {
        self.clone()
    }
}

impl<T: Scalar, D: Spatial> Tensor4<T, D> {
    /// Rearranges entries so that `C[target(i, j, k, l)] = A_ijkl`.
    fn permuted(&self, target: impl Fn(usize, usize, usize, usize) -> [usize; 4]) -> Tensor4<T, D> {
        let nd = self.nd();
        let mut out = self.clone();
        let src = self.0.as_slice();
        let dst = out.0.as_mut_slice();
        let mut offset = 0;
        for i in 0..nd {
            for j in 0..nd {
                for k in 0..nd {
                    for l in 0..nd {
                        let [p, q, r, s] = target(i, j, k, l);
                        dst[((p * nd + q) * nd + r) * nd + s] = src[offset];
                        offset += 1;
                    }
                }
            }
        }
        out
    }

    /// Full transpose, `C_lkji = A_ijkl`.
    pub fn transpose(&self) -> Tensor4<T, D> {
        self.permuted(|i, j, k, l| [l, k, j, i])
    }

    /// Right transpose, `C_ijlk = A_ijkl`.
    pub fn transpose_right(&self) -> Tensor4<T, D> {
        self.permuted(|i, j, k, l| [i, j, l, k])
    }

    /// Left transpose, `C_jikl = A_ijkl`.
    pub fn transpose_left(&self) -> Tensor4<T, D> {
        self.permuted(|i, j, k, l| [j, i, k, l])
    }
}

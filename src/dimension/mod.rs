//! Dimension system.
//!
//! This module provides the shape/stride descriptor used by every dense layout, the
//! resolution of signed and periodic indices, and the spatial strategies that decide
//! whether the Cartesian tensors of [`crate::cartesian`] carry their spatial
//! dimension at compile time (inline storage) or at runtime (heap storage).

pub mod dynamic;
pub mod index;
pub mod shape;
pub mod static_dim;
pub mod stride;

pub use dynamic::Dyn;
pub use shape::Shape;
pub use static_dim::{D1, D2, D3, D4};
pub use stride::Stride;

use crate::{
    error::{Result, TenmatError},
    scalar::Element,
    storage::OwnedStorage,
};
use std::fmt::Debug;

/// Maximum number of axes of a dense array.
pub const MAX_DIM: usize = 6;

/// A spatial strategy for Cartesian tensors.
///
/// Each associated storage holds exactly the entries of one tensor alias: `ND` for a
/// vector, `ND^2` for a second-order tensor, `ND(ND+1)/2` for a symmetric one, `ND`
/// for a diagonal one and `ND^4` for a fourth-order tensor.
pub trait Spatial: Copy + Debug + Default + Send + Sync + 'static {
    /// The spatial dimension when it is known at compile time.
    const ND: Option<usize>;

    type Vector<T: Element>: OwnedStorage<T>;
    type Tensor2<T: Element>: OwnedStorage<T>;
    type Tensor2s<T: Element>: OwnedStorage<T>;
    type Tensor2d<T: Element>: OwnedStorage<T>;
    type Tensor4<T: Element>: OwnedStorage<T>;

    /// Checks a runtime dimension against the compile-time one, if any.
    fn check(nd: usize) -> Result<()> {
        match Self::ND {
            Some(fixed) if fixed != nd => Err(TenmatError::shape_mismatch(vec![fixed], vec![nd])),
            _ if nd == 0 => Err(TenmatError::invalid_shape("spatial dimension must be positive")),
            _ => Ok(()),
        }
    }
}

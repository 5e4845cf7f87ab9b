//! Resolution of signed and periodic indices.

use crate::error::{Result, TenmatError};

/// Maps a signed index onto `0..extent`.
///
/// Without periodicity the index must lie in `0..extent`. With periodicity any value,
/// negative ones included, wraps modulo the extent.
#[inline]
pub fn resolve(index: isize, extent: usize, axis: usize, periodic: bool) -> Result<usize> {
    let n = extent as isize;
    if n == 0 || (!periodic && (index >= n || index < 0)) {
        return Err(TenmatError::IndexOutOfBounds(index, extent, axis));
    }
    Ok(index.rem_euclid(n) as usize)
}

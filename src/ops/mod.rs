//! Operations shared by every storage kind.
//!
//! This module provides reductions ([`Reduce`]), elementwise maps and comparisons
//! ([`Elementwise`]), and the arithmetic operator impls. Reductions and elementwise
//! operations are written once against [`Compressed`](crate::kind::Compressed) and
//! apply to dense, symmetric and diagonal arrays alike, owning or borrowed.

mod arithmetic;
mod elementwise;
mod reduction;

pub use elementwise::{Elementwise, Operand};
pub use reduction::Reduce;

/// Panics unless both operands have the same logical shape.
#[track_caller]
#[inline]
pub(crate) fn assert_same_shape(lhs: &[usize], rhs: &[usize]) {
    assert!(
        lhs == rhs,
        "shape mismatch: left operand has shape {:?}, right operand has shape {:?}",
        lhs,
        rhs
    );
}

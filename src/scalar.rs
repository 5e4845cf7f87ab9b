//! Element traits shared by every array kind.

use num_traits::{Num, NumCast};
use std::fmt::{Debug, Display};

/// Anything that can be stored in an array.
pub trait Element: Copy + Default + Debug + Send + Sync + 'static {}

impl<T> Element for T where T: Copy + Default + Debug + Send + Sync + 'static {}

/// A numeric element supporting the arithmetic and reductions of this crate.
///
/// Implemented for all primitive integers and floats. Index arrays (`usize`)
/// and comparison masks (`i32`) are ordinary scalars.
pub trait Scalar: Element + Display + Num + NumCast + PartialOrd {
    /// Absolute value; the identity for unsigned types.
    fn magnitude(self) -> Self;

    fn is_nonzero(self) -> bool {
        self != Self::zero()
    }

    /// Lossy conversion used by `mean` and `average`.
    fn to_f64_lossy(self) -> f64 {
        num_traits::ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }
}

macro_rules! impl_scalar_signed {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn magnitude(self) -> Self {
                    self.abs()
                }
            }
        )*
    };
}

macro_rules! impl_scalar_unsigned {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn magnitude(self) -> Self {
                    self
                }
            }
        )*
    };
}

impl_scalar_signed!(i8, i16, i32, i64, i128, isize, f32, f64);
impl_scalar_unsigned!(u8, u16, u32, u64, u128, usize);

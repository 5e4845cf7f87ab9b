//! Spatial dimensions fixed at compile time.
//!
//! Tensors over these strategies keep their entries inline, so constructing and
//! combining them never touches the heap.

use super::Spatial;
use crate::{scalar::Element, storage::FixedStorage};

macro_rules! fixed_spatial {
    ($(#[$meta:meta])* $name:ident, $nd:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Spatial for $name {
            const ND: Option<usize> = Some($nd);

            type Vector<T: Element> = FixedStorage<T, $nd>;
            type Tensor2<T: Element> = FixedStorage<T, { $nd * $nd }>;
            type Tensor2s<T: Element> = FixedStorage<T, { $nd * ($nd + 1) / 2 }>;
            type Tensor2d<T: Element> = FixedStorage<T, $nd>;
            type Tensor4<T: Element> = FixedStorage<T, { $nd * $nd * $nd * $nd }>;
        }
    };
}

fixed_spatial!(
    /// One spatial dimension.
    D1, 1
);
fixed_spatial!(
    /// Two spatial dimensions.
    D2, 2
);
fixed_spatial!(
    /// Three spatial dimensions.
    D3, 3
);
fixed_spatial!(
    /// Four spatial dimensions.
    D4, 4
);

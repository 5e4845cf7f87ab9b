//! Spatial dimension chosen at runtime.

use super::Spatial;
use crate::{scalar::Element, storage::CpuStorage};

/// Runtime spatial dimension: tensors allocate their entries on the heap and take
/// `nd` as a constructor argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dyn;

impl Spatial for Dyn {
    const ND: Option<usize> = None;

    type Vector<T: Element> = CpuStorage<T>;
    type Tensor2<T: Element> = CpuStorage<T>;
    type Tensor2s<T: Element> = CpuStorage<T>;
    type Tensor2d<T: Element> = CpuStorage<T>;
    type Tensor4<T: Element> = CpuStorage<T>;
}

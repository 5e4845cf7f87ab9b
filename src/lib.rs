//! # tenmat
//!
//! Dense and compressed arrays with a Cartesian tensor algebra on top.
//!
//! ## Layouts
//!
//! - [`Array`]: a row-major array of rank 1 to 6.
//! - [`SymmetricMatrix`]: an `n x n` matrix storing only its upper triangle.
//! - [`DiagonalMatrix`]: an `n x n` matrix storing only its diagonal.
//!
//! Each layout is generic over its storage: a heap buffer for runtime shapes,
//! an inline buffer for shapes fixed at compile time, or a borrowed slice for
//! views over caller-owned memory (see [`view`]).
//!
//! ## Cartesian tensors
//!
//! [`cartesian`] wraps the layouts into vectors, second-order tensors (dense,
//! symmetric, diagonal) and fourth-order tensors, with dot, double-dot and dyadic
//! products whose result kind follows the operand kinds.
//!
//! ```
//! use tenmat::{Ddot, Dot, Tensor2, Tensor2d, D3};
//!
//! let a = Tensor2::<f64, D3>::copy(3, &[2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0]).unwrap();
//! let d = Tensor2d::<f64, D3>::identity(3).unwrap();
//! assert_eq!(a.dot(&d), a);
//! assert_eq!(a.ddot(&d), a.trace());
//! ```

pub mod array;
pub mod cartesian;
pub mod diagonal;
pub mod dimension;
pub mod error;
pub mod format;
pub mod kind;
#[macro_use]
pub mod macros;
pub mod ops;
pub mod scalar;
pub mod storage;
pub mod symmetric;
pub mod view;

pub use array::Array;
pub use cartesian::{Ddot, Dot, Dyadic, SecondOrder, Tensor2, Tensor2d, Tensor2s, Tensor4, Vector};
pub use diagonal::DiagonalMatrix;
pub use dimension::{Dyn, Shape, Spatial, D1, D2, D3, D4};
pub use error::{Result, TenmatError};
pub use kind::{Compressed, Kind};
pub use ops::{Elementwise, Operand, Reduce};
pub use scalar::{Element, Scalar};
pub use storage::{CpuStorage, FixedStorage, OwnedStorage, Storage, StorageMut};
pub use symmetric::SymmetricMatrix;

//! Literal syntax for dense arrays.
//!
//! The macros evaluate to a `Result`, since a literal can still describe a ragged or
//! empty shape.

use crate::{
    array::Array,
    error::{Result, TenmatError},
    scalar::Element,
};

#[doc(hidden)]
pub fn from_nested<T: Element>(rows: Vec<Vec<T>>) -> Result<Array<T>> {
    let cols = rows.first().map_or(0, Vec::len);
    if let Some(row) = rows.iter().find(|row| row.len() != cols) {
        return Err(TenmatError::shape_mismatch(vec![cols], vec![row.len()]));
    }
    let extents = [rows.len(), cols];
    Array::from_vec(&extents, rows.into_iter().flatten().collect())
}

#[doc(hidden)]
pub fn from_nested3<T: Element>(blocks: Vec<Vec<Vec<T>>>) -> Result<Array<T>> {
    let mut extents = [blocks.len(), 0, 0];
    let mut data = Vec::new();
    for (b, block) in blocks.into_iter().enumerate() {
        let plane = from_nested(block)?;
        if b == 0 {
            extents[1] = plane.shape()[0];
            extents[2] = plane.shape()[1];
        } else if plane.shape() != &extents[1..] {
            return Err(TenmatError::shape_mismatch(&extents[1..], plane.shape()));
        }
        data.extend(plane.into_storage().into_vec());
    }
    Array::from_vec(&extents, data)
}

/// Creates a dense [`Array`](crate::Array) from a nested literal of rank 1 to 3.
///
/// # Examples
/// ```
/// use tenmat::array;
///
/// let v = array![1.0, 2.0, 3.0].unwrap();
/// assert_eq!(v.shape(), &[3]);
///
/// let m = array![[1, 2], [3, 4]].unwrap();
/// assert_eq!(m.shape(), &[2, 2]);
/// assert_eq!(m[[1, 0]], 3);
///
/// assert!(array![[1, 2], [3]].is_err());
/// ```
#[macro_export]
macro_rules! array {
    ($([$([$($x:expr),* $(,)?]),+ $(,)?]),+ $(,)?) => {
        $crate::macros::from_nested3(vec![$(vec![$(vec![$($x),*]),+]),+])
    };
    ($([$($x:expr),* $(,)?]),+ $(,)?) => {
        $crate::macros::from_nested(vec![$(vec![$($x),*]),+])
    };
    ($($x:expr),+ $(,)?) => {
        {
            let data = vec![$($x),+];
            $crate::Array::<_>::from_vec(&[data.len()], data)
        }
    };
}

/// Creates a dense array of zeros with the given extents.
///
/// # Examples
/// ```
/// use tenmat::zeros;
///
/// let a = zeros!(f64; [2, 3]).unwrap();
/// assert_eq!(a.size(), 6);
/// ```
#[macro_export]
macro_rules! zeros {
    ($t:ty; [$($dim:expr),+ $(,)?]) => {
        $crate::Array::<$t>::zero(&[$($dim),+])
    };
}

/// Creates a dense array of ones with the given extents.
#[macro_export]
macro_rules! ones {
    ($t:ty; [$($dim:expr),+ $(,)?]) => {
        $crate::Array::<$t>::ones(&[$($dim),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::Reduce;

    #[test]
    fn test_array_macro_1d() {
        let a = array![1.0, 2.0, 3.0].unwrap();
        assert_eq!(a.shape(), &[3]);
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_array_macro_2d() {
        let a = array![
            [1.0, 2.0],
            [3.0, 4.0],
        ]
        .unwrap();
        assert_eq!(a.shape(), &[2, 2]);
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_array_macro_3d() {
        let a = array![[[1, 2], [3, 4]], [[5, 6], [7, 8]]].unwrap();
        assert_eq!(a.shape(), &[2, 2, 2]);
        assert_eq!(a[[1, 0, 1]], 6);
        assert!(array![[[1, 2], [3, 4]], [[5, 6]]].is_err());
    }

    #[test]
    fn test_ragged_rows() {
        assert!(array![[1, 2, 3], [4], [5, 6]].is_err());
    }

    #[test]
    fn test_zeros_ones() {
        let z = zeros!(f64; [2, 3]).unwrap();
        assert_eq!(z.shape(), &[2, 3]);
        assert_eq!(z.sum(), 0.0);

        let o = ones!(i32; [2, 2]).unwrap();
        assert_eq!(o.sum(), 4);
    }
}

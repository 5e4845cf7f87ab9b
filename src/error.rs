use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TenmatError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
    #[error("Invalid axis: {0} for array of rank {1}")]
    InvalidAxis(isize, usize),
    #[error("Index out of bounds: {0} for axis of size {1} at axis {2}")]
    IndexOutOfBounds(isize, usize, usize),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Domain error: {0}")]
    Domain(String),
    #[error("Out of range: {0}")]
    OutOfRange(String),
    #[error("Singular tensor: determinant is zero")]
    Singular,
    #[error("Operation '{op}' is not defined for spatial dimension {nd}")]
    UnsupportedDimension { op: &'static str, nd: usize },
    #[error("Input is not diagonal: non-zero entry at ({0}, {1})")]
    NotDiagonal(usize, usize),
    #[error("Input is not symmetric: entries ({0}, {1}) and ({1}, {0}) differ")]
    NotSymmetric(usize, usize),
}

impl TenmatError {
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn shape_mismatch(expected: impl Into<Vec<usize>>, actual: impl Into<Vec<usize>>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TenmatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = TenmatError::shape_mismatch(vec![2, 2], vec![3, 3]);
        assert_eq!(err.to_string(), "Shape mismatch: expected [2, 2], got [3, 3]");

        let err = TenmatError::UnsupportedDimension { op: "cross", nd: 2 };
        assert_eq!(
            err.to_string(),
            "Operation 'cross' is not defined for spatial dimension 2"
        );
    }
}

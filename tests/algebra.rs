//! Integration tests across layouts and the Cartesian layer.

use approx::assert_relative_eq;
use tenmat::{
    view::ArrayView, Array, DiagonalMatrix, Dot, Elementwise, Reduce, SecondOrder,
    SymmetricMatrix, Tensor2, Tensor2d, Tensor2s, TenmatError, Vector, D3,
};

#[test]
fn test_symmetric_copy_dense_and_add() {
    let n = 11;
    let mut dense = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            dense[i * n + j] = (i.min(j) * 100 + i.max(j)) as f64;
        }
    }
    let mut a = SymmetricMatrix::<f64>::copy_dense(n, &dense).unwrap();
    let b = SymmetricMatrix::<f64>::arange(n).unwrap();
    let b_dense = b.to_dense();

    a += &b;

    let expected: Vec<f64> = dense
        .iter()
        .zip(b_dense.iter())
        .map(|(x, y)| x + y)
        .collect();
    assert_eq!(a.to_dense().to_vec(), expected);
    for i in 0..n {
        for j in 0..n {
            assert_eq!(a[[i, j]], a[[j, i]]);
        }
    }
    assert_eq!(a.decompress(a.compress(1, 2)).unwrap(), vec![1, 2]);
}

#[test]
fn test_diagonal_scenario() {
    let d = Tensor2d::<f64>::copy(4, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(d.trace(), 10.0);
    assert_eq!(d.sum(), 10.0);
    assert_relative_eq!(d.mean(), 10.0 / 16.0);
    assert_eq!(d.det(), 24.0);
    assert_eq!(d.as_inner()[[1, 2]], 0.0);
}

#[test]
fn test_vector_scenario() {
    let a = Vector::<f64, D3>::from_slice(&[1.0, 0.0, 0.0]).unwrap();
    let b = Vector::<f64, D3>::from_slice(&[0.0, 1.0, 0.0]).unwrap();
    let c = a.cross(&b).unwrap();
    assert_eq!(c.to_vec(), vec![0.0, 0.0, 1.0]);
    assert_eq!(a.dot(&b), 0.0);
    assert_eq!(a.length(), 1.0);

    let planar = Vector::<f64>::from_slice(&[1.0, 0.0]).unwrap();
    assert!(matches!(
        planar.cross(&planar),
        Err(TenmatError::UnsupportedDimension { op: "cross", nd: 2 })
    ));
}

#[test]
fn test_inverse_gives_identity() {
    let a = Tensor2::<f64, D3>::copy(3, &[1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]).unwrap();
    let product = a.dot(&a.inv().unwrap());
    let identity = Tensor2::<f64, D3>::identity(3).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(product.entry(i, j), identity.entry(i, j), epsilon = 1e-12);
        }
    }

    let singular = Tensor2s::<f64>::zero(2).unwrap();
    assert_eq!(singular.inv().unwrap_err(), TenmatError::Singular);
}

#[test]
fn test_abs_is_idempotent() {
    let dense = Array::<f64>::copy(&[2, 2], &[-1.0, 2.0, -3.0, 0.0]).unwrap();
    assert_eq!(dense.abs().abs(), dense.abs());

    let sym = SymmetricMatrix::<i64>::copy(2, &[-1, 2, -3]).unwrap();
    assert_eq!(sym.abs().abs(), sym.abs());
    assert_eq!(sym.abs().as_slice(), &[1, 2, 3]);

    let diag = DiagonalMatrix::<f32>::copy(3, &[-1.5, 0.0, 2.5]).unwrap();
    assert_eq!(diag.abs().abs(), diag.abs());
}

#[test]
fn test_views_share_operations_with_owned_arrays() {
    let buffer: Vec<f64> = (0..9).map(|x| x as f64).collect();
    let view = ArrayView::from_slice(&[3, 3], &buffer).unwrap();
    let owned = Array::<f64>::arange(&[3, 3]).unwrap();

    assert_eq!(view, owned);
    assert_eq!(view.sum(), owned.sum());
    assert_eq!(view.argmax(), 8);
    assert_eq!(&view + &owned, &owned * 2.0);
}

#[test]
fn test_kind_conversions_round_trip() {
    let d = DiagonalMatrix::<i32>::copy(3, &[1, 2, 3]).unwrap();
    let s = d.to_symmetric();
    assert_eq!(s.to_dense(), d.to_dense());
    assert_eq!(DiagonalMatrix::<i32>::from_dense(&s.to_dense()).unwrap(), d);

    let not_diagonal = Array::<i32>::ones(&[2, 2]).unwrap();
    assert_eq!(
        DiagonalMatrix::<i32>::from_dense(&not_diagonal).unwrap_err(),
        TenmatError::NotDiagonal(0, 1)
    );
}

#[test]
fn test_periodic_access() {
    let mut a = Array::<i32>::arange(&[3, 4]).unwrap();
    assert!(a.at(&[-1, 0]).is_err());
    a.set_periodic(true);
    assert_eq!(*a.at(&[-1, 0]).unwrap(), 8);
    assert_eq!(*a.at(&[3, 5]).unwrap(), 1);
}

#[test]
fn test_negative_indices_need_periodicity() {
    let mut a = Array::<i32>::arange(&[3, 4]).unwrap();
    for indices in [[-1, 0], [0, -1], [3, 0]] {
        assert!(a.at(&indices).is_err());
        assert!(a.compress_signed(&indices).is_err());
        assert!(!a.in_bounds(&indices));
    }
    assert!(a.in_bounds(&[2, 3]));
    a.set_periodic(true);
    assert!(a.in_bounds(&[-1, 0]));
    assert_eq!(a.compress_signed(&[-1, -1]).unwrap(), 11);

    let mut s = SymmetricMatrix::<i32>::arange(3).unwrap();
    assert!(s.at(-1, 0).is_err());
    assert!(s.compress_signed(0, -1).is_err());
    assert!(!s.in_bounds(-1, 0));
    s.set_periodic(true);
    assert!(s.in_bounds(-1, 0));
    assert_eq!(*s.at(-1, 0).unwrap(), *s.at(2, 0).unwrap());

    let mut d = DiagonalMatrix::<i32>::copy(3, &[1, 2, 3]).unwrap();
    assert!(d.at(-1, -1).is_err());
    assert!(d.compress_signed(-1, 0).is_err());
    assert!(!d.in_bounds(0, -1));
    d.set_periodic(true);
    assert_eq!(*d.at(-1, -1).unwrap(), 3);
    assert_eq!(*d.at(-1, 0).unwrap(), 0);
}

#[test]
fn test_where_at_counts_from_both_ends() {
    let a = Array::<i32>::copy(&[2, 3], &[0, 5, 0, 7, 0, 9]).unwrap();
    assert_eq!(a.where_nonzero(), vec![1, 3, 5]);
    assert_eq!(a.where_at(0).unwrap(), 1);
    assert_eq!(a.where_at(2).unwrap(), 5);
    assert_eq!(a.where_at(-1).unwrap(), 5);
    assert_eq!(a.where_at(-3).unwrap(), 1);
    assert!(matches!(a.where_at(3), Err(TenmatError::OutOfRange(_))));
    assert!(matches!(a.where_at(-4), Err(TenmatError::OutOfRange(_))));

    let s = SymmetricMatrix::<f64>::copy(2, &[0.0, 2.0, 3.0]).unwrap();
    assert_eq!(s.where_at(-1).unwrap(), 2);
    assert_eq!(s.where_at(-2).unwrap(), 1);
    assert!(s.where_at(-3).is_err());

    let empty = DiagonalMatrix::<i64>::zero(4).unwrap();
    assert!(matches!(empty.where_at(0), Err(TenmatError::OutOfRange(_))));
    assert!(matches!(empty.where_at(-1), Err(TenmatError::OutOfRange(_))));
}

#[test]
fn test_argsort_on_compressed_kinds() {
    let s = SymmetricMatrix::<i32>::copy(3, &[5, 1, 4, 0, 3, 2]).unwrap();
    let ascending = s.argsort(true);
    assert_eq!(ascending.as_slice(), &[3, 1, 5, 4, 2, 0]);
    assert_eq!(ascending[[1, 0]], ascending[[0, 1]]);
    assert_eq!(s.argsort(false).as_slice(), &[0, 2, 4, 5, 1, 3]);

    let d = DiagonalMatrix::<f64>::copy(3, &[2.0, -1.0, 0.5]).unwrap();
    let ascending = d.argsort(true);
    assert_eq!(ascending.as_slice(), &[1, 2, 0]);
    assert_eq!(ascending[[0, 2]], 0);
    assert_eq!(d.argsort(false).as_slice(), &[0, 2, 1]);
}

#[test]
fn test_scalar_on_the_left() {
    let s = SymmetricMatrix::<f64>::copy(2, &[1.0, 2.0, 4.0]).unwrap();
    let difference = 2.0 - &s;
    assert_eq!(difference.as_slice(), &[1.0, 0.0, -2.0]);
    assert_eq!(difference[[1, 0]], difference[[0, 1]]);
    assert_eq!((8.0 / &s).as_slice(), &[8.0, 4.0, 2.0]);
    assert_eq!((1.0 + &s).as_slice(), &[2.0, 3.0, 5.0]);
    assert_eq!((10.0 - s.clone()).as_slice(), &[9.0, 8.0, 6.0]);

    let d = DiagonalMatrix::<i32>::copy(3, &[1, -2, 3]).unwrap();
    let scaled = 3 * &d;
    assert_eq!(scaled.as_slice(), &[3, -6, 9]);
    assert_eq!(scaled[[0, 1]], 0);
    assert_eq!((2 * d).as_slice(), &[2, -4, 6]);

    let a = Array::<f64>::copy(&[2], &[2.0, 4.0]).unwrap();
    assert_eq!((1.0 - &a).to_vec(), vec![-1.0, -3.0]);
    assert_eq!((8.0 / &a).to_vec(), vec![4.0, 2.0]);
}

#[test]
fn test_atleast_nd_with_periodic_compress() {
    let mut a = Array::<i32>::arange(&[3, 4]).unwrap();
    a.atleast_nd(3);
    assert_eq!(a.shape(), &[3, 4]);
    assert_eq!(a.rank(), 2);
    assert_eq!(a.compress(&[1, 1, 0]), 5);
    assert!(a.in_bounds(&[1, 1, 0]));
    assert!(!a.in_bounds(&[1, 1, 1]));
    assert!(a.compress_signed(&[0, 0, 1]).is_err());

    a.set_periodic(true);
    assert_eq!(a.compress(&[4, 5, 0]), 5);
    assert_eq!(a.compress(&[1, 1, 2]), 5);
    assert_eq!(a.compress_signed(&[-1, -1, -1]).unwrap(), 11);
    assert_eq!(*a.at(&[-2, 5, 7]).unwrap(), 5);
    assert_eq!(a.decompress(a.compress(&[2, 3, 0])).unwrap(), vec![2, 3]);
}

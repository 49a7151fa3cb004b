//! Tolerance-based assertions
//!
//! Comparisons use a relative tolerance scaled by the larger magnitude,
//! falling back to absolute for values near zero.

use nalgebra::{DMatrix, DVector};

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    let scale = actual.abs().max(expected.abs()).max(1.0);
    (actual - expected).abs() <= tolerance * scale
}

pub fn assert_scalar_close(actual: f64, expected: f64, tolerance: f64, msg: &str) {
    assert!(
        close(actual, expected, tolerance),
        "{}: expected {}, got {} (diff {:.3e}, tol {:.1e})",
        msg,
        expected,
        actual,
        (actual - expected).abs(),
        tolerance
    );
}

pub fn assert_dvector_close(actual: &DVector<f64>, expected: &[f64], tolerance: f64, msg: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", msg);
    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert_scalar_close(a, e, tolerance, &format!("{}[{}]", msg, i));
    }
}

pub fn assert_dmatrix_close(actual: &DMatrix<f64>, expected: &DMatrix<f64>, tolerance: f64, msg: &str) {
    assert_eq!(actual.shape(), expected.shape(), "{}: shape mismatch", msg);
    for i in 0..actual.nrows() {
        for j in 0..actual.ncols() {
            assert_scalar_close(
                actual[(i, j)],
                expected[(i, j)],
                tolerance,
                &format!("{}[({}, {})]", msg, i, j),
            );
        }
    }
}

pub fn assert_symmetric(m: &DMatrix<f64>, tolerance: f64, msg: &str) {
    assert!(m.is_square(), "{}: not square", msg);
    let asymmetry = (m - m.transpose()).amax();
    assert!(
        asymmetry <= tolerance * m.amax().max(1.0),
        "{}: asymmetry {:.3e}",
        msg,
        asymmetry
    );
}

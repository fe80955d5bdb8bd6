#![cfg(feature = "serde")]

use denso::{Complex, Matrix, Vector};

#[test]
fn vector_is_a_plain_array() {
    let v = Vector::from_slice(&[1.0, -2.5, 0.0]);
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, "[1.0,-2.5,0.0]");
    let back: Vector<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn matrix_keeps_shape() {
    let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["rows"], 2);
    assert_eq!(json["columns"], 3);
    assert_eq!(json["elements"].as_array().map(Vec::len), Some(6));

    let back: Matrix<f64> = serde_json::from_value(json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn complex_elements() {
    let m = Matrix::from_rows(&[[Complex::new(1.0, -1.0)], [Complex::new(0.0, 2.0)]]);
    let json = serde_json::to_string(&m).unwrap();
    let back: Matrix<Complex<f64>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn inconsistent_shape_is_rejected() {
    let err = serde_json::from_str::<Matrix<f64>>(r#"{"rows":2,"columns":2,"elements":[1.0,2.0,3.0]}"#)
        .unwrap_err();
    assert!(err.to_string().contains("dimension mismatch"), "{}", err);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn overflowing_shape_is_rejected() {
    let json = format!(r#"{{"rows":{},"columns":2,"elements":[]}}"#, 1_u64 << 63);
    let err = serde_json::from_str::<Matrix<f64>>(&json).unwrap_err();
    assert!(err.to_string().contains("dimension mismatch"), "{}", err);
}

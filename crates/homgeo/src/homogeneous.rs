//! Homogeneous conversion: append/strip the trailing coordinate (1 for points,
//! 0 for vectors).

use nalgebra::{Vector3, Vector4};

use crate::cfg::HOMOGENEOUS_EPS;
use crate::error::{GeomError, Result};

#[inline]
pub fn to_homogeneous(x: &Vector3<f64>, is_point: bool) -> Vector4<f64> {
    let w = if is_point { 1.0 } else { 0.0 };
    Vector4::new(x.x, x.y, x.z, w)
}

/// Raw coordinates of a homogeneous point (divide by `w`) or vector (`w ≈ 0`).
pub fn from_homogeneous(x: &Vector4<f64>, is_point: bool) -> Result<Vector3<f64>> {
    let w = x.w;
    if is_point {
        if w == 0.0 || !w.is_finite() {
            return Err(GeomError::degenerate(format!(
                "point at infinity (w = {w}): {:?}",
                x.as_slice()
            )));
        }
        Ok(x.xyz() / w)
    } else {
        if !(w.abs() <= HOMOGENEOUS_EPS) {
            return Err(GeomError::degenerate(format!(
                "not a homogeneous vector: {:?}",
                x.as_slice()
            )));
        }
        Ok(x.xyz())
    }
}

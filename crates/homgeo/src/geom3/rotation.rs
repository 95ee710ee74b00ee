//! Rotation alignment (Rodrigues) and orthonormality checks.

use nalgebra::{Matrix3, Vector3};

use crate::cfg::PARALLEL_EPS;

/// Rotation `R` with `R * u == v` for unit vectors `u`, `v`.
///
/// - `u ≈ v`: identity.
/// - `u ≈ -v`: half turn about `perpendicular(u)`, i.e. `2 p pᵀ - I`.
/// - otherwise: axis `u × v`, angle `acos(u · v)`, as
///   `I + [k]ₓ + [k]ₓ² (1 - c) / s²` with `k = u × v`, `s = |k|`, `c = u · v`.
pub fn rotation_between(u: &Vector3<f64>, v: &Vector3<f64>) -> Matrix3<f64> {
    let k = u.cross(v);
    let s = k.norm();
    let c = u.dot(v).clamp(-1.0, 1.0);
    if s <= PARALLEL_EPS {
        if c > 0.0 {
            return Matrix3::identity();
        }
        let p = perpendicular(u);
        return 2.0 * p * p.transpose() - Matrix3::identity();
    }
    let kx = k.cross_matrix();
    Matrix3::identity() + kx + kx * kx * ((1.0 - c) / (s * s))
}

/// Deterministic unit vector orthogonal to `u` (`u` nonzero).
///
/// Crosses `u` with the basis axis along which `u` has the smallest magnitude,
/// which keeps the cross product well away from zero.
pub fn perpendicular(u: &Vector3<f64>) -> Vector3<f64> {
    let a = u.abs();
    let axis = if a.x <= a.y && a.x <= a.z {
        Vector3::x()
    } else if a.y <= a.z {
        Vector3::y()
    } else {
        Vector3::z()
    };
    u.cross(&axis).normalize()
}

/// Max-abs deviation of `mᵀ m` from identity.
pub(crate) fn orthonormal_deviation(m: &Matrix3<f64>) -> f64 {
    (m.transpose() * m - Matrix3::identity()).amax()
}

/// `mᵀ m ≈ I` and `det m ≈ +1` within `eps`.
pub fn is_rotation(m: &Matrix3<f64>, eps: f64) -> bool {
    orthonormal_deviation(m) <= eps && (m.determinant() - 1.0).abs() <= eps
}

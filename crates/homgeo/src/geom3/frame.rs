//! Rigid frame transforms as 4×4 homogeneous matrices.

use nalgebra::{Matrix3, Matrix4, Vector3, SVD};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::primitive::Primitive;
use super::rotation::{orthonormal_deviation, perpendicular};
use super::types::{Point3D, Vector3D};
use crate::cfg::ORTHO_EPS;
use crate::error::{GeomError, Result};

/// Rigid transform `x ↦ R x + t`, stored as `[[R, t], [0, 0, 0, 1]]`.
///
/// Invariants:
/// - `R` is orthonormal with `det R = +1` (checked on construction from raw parts).
/// - The bottom row is exactly `[0, 0, 0, 1]`.
///
/// Products of valid transforms stay valid up to rounding; call `renormalized`
/// after long chains.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "[[f64; 4]; 4]", try_from = "[[f64; 4]; 4]")]
pub struct FrameTransform {
    m: Matrix4<f64>,
}

impl FrameTransform {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    /// Assemble from rotation and translation; fails unless `rotation` is a proper
    /// rotation within `ORTHO_EPS`.
    pub fn from_rt(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Result<Self> {
        let deviation = orthonormal_deviation(&rotation);
        let det = rotation.determinant();
        if !(deviation <= ORTHO_EPS && (det - 1.0).abs() <= ORTHO_EPS) {
            return Err(GeomError::InvalidRotation { det, deviation });
        }
        Ok(Self::from_parts(&rotation, &translation))
    }

    /// Pure rotation; the caller vouches for `rotation` (e.g. `rotation_between`).
    #[inline]
    pub fn from_rotation(rotation: Matrix3<f64>) -> Self {
        Self::from_parts(&rotation, &Vector3::zeros())
    }

    #[inline]
    pub fn from_translation(translation: Vector3D) -> Self {
        Self {
            m: Matrix4::new_translation(&translation.coords()),
        }
    }

    /// Frame anchored at `point` whose local Z axis is `direction.hat()`.
    ///
    /// Local X is `perpendicular(z)`, local Y is `z × x`, so the frame is
    /// right-handed and depends only on the input direction.
    pub fn from_pd(point: Point3D, direction: Vector3D) -> Result<Self> {
        let z = direction.hat()?.coords();
        let x = perpendicular(&z);
        let y = z.cross(&x);
        let r = Matrix3::from_columns(&[x, y, z]);
        Ok(Self::from_parts(&r, &point.coords()))
    }

    fn from_parts(r: &Matrix3<f64>, t: &Vector3<f64>) -> Self {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(r);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(t);
        Self { m }
    }

    #[inline]
    pub fn rotation(&self) -> Matrix3<f64> {
        self.m.fixed_view::<3, 3>(0, 0).into_owned()
    }

    #[inline]
    pub fn translation(&self) -> Vector3<f64> {
        self.m.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// `(Rᵀ, -Rᵀ t)`.
    pub fn inverse(&self) -> Self {
        let rt = self.rotation().transpose();
        let t = -(rt * self.translation());
        Self::from_parts(&rt, &t)
    }

    /// Replace `R` by its closest rotation (polar factor `U Vᵀ` of the SVD).
    pub fn renormalized(&self) -> Self {
        let svd = SVD::new(self.rotation(), true, true);
        let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
            return *self;
        };
        let mut q = u * v_t;
        if q.determinant() < 0.0 {
            // flip the axis of the smallest singular value
            let mut u = u;
            let k = svd.singular_values.imin();
            u.column_mut(k).neg_mut();
            q = u * v_t;
        }
        Self::from_parts(&q, &self.translation())
    }

    /// `R` is a proper rotation within `eps` and the bottom row is `[0, 0, 0, 1]`.
    pub fn is_rigid(&self, eps: f64) -> bool {
        let r = self.rotation();
        let bottom = self.m.row(3);
        orthonormal_deviation(&r) <= eps
            && (r.determinant() - 1.0).abs() <= eps
            && bottom[0] == 0.0
            && bottom[1] == 0.0
            && bottom[2] == 0.0
            && bottom[3] == 1.0
    }

    /// Entry-wise max-abs comparison.
    pub fn approx_eq(&self, other: &FrameTransform, eps: f64) -> bool {
        (self.m - other.m).amax() <= eps
    }

    #[inline]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.m
    }

    /// Row-major copy, e.g. for plotting collaborators.
    pub fn to_array(&self) -> [[f64; 4]; 4] {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, x) in row.iter_mut().enumerate() {
                *x = self.m[(i, j)];
            }
        }
        out
    }

    #[inline]
    pub fn apply_point(&self, p: &Point3D) -> Point3D {
        Point3D::from(self.rotation() * p.coords() + self.translation())
    }

    #[inline]
    pub fn apply_vector(&self, v: &Vector3D) -> Vector3D {
        Vector3D::from(self.rotation() * v.coords())
    }

    pub fn apply(&self, x: &Primitive) -> Primitive {
        match x {
            Primitive::Point(p) => Primitive::Point(self.apply_point(p)),
            Primitive::Vector(v) => Primitive::Vector(self.apply_vector(v)),
        }
    }
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `self * rhs` applies `rhs` first.
impl Mul for FrameTransform {
    type Output = FrameTransform;
    #[inline]
    fn mul(self, rhs: FrameTransform) -> FrameTransform {
        FrameTransform { m: self.m * rhs.m }
    }
}

impl Mul<Point3D> for FrameTransform {
    type Output = Point3D;
    #[inline]
    fn mul(self, rhs: Point3D) -> Point3D {
        self.apply_point(&rhs)
    }
}

impl Mul<Vector3D> for FrameTransform {
    type Output = Vector3D;
    #[inline]
    fn mul(self, rhs: Vector3D) -> Vector3D {
        self.apply_vector(&rhs)
    }
}

impl Mul<Primitive> for FrameTransform {
    type Output = Primitive;
    #[inline]
    fn mul(self, rhs: Primitive) -> Primitive {
        self.apply(&rhs)
    }
}

impl From<FrameTransform> for Matrix4<f64> {
    fn from(f: FrameTransform) -> Self {
        f.m
    }
}

impl From<FrameTransform> for [[f64; 4]; 4] {
    fn from(f: FrameTransform) -> Self {
        f.to_array()
    }
}

impl TryFrom<[[f64; 4]; 4]> for FrameTransform {
    type Error = GeomError;

    fn try_from(rows: [[f64; 4]; 4]) -> Result<Self> {
        if rows[3] != [0.0, 0.0, 0.0, 1.0] {
            return Err(GeomError::degenerate(format!(
                "bottom row of a rigid transform must be [0, 0, 0, 1], got {:?}",
                rows[3]
            )));
        }
        let r = Matrix3::from_fn(|i, j| rows[i][j]);
        let t = Vector3::new(rows[0][3], rows[1][3], rows[2][3]);
        Self::from_rt(r, t)
    }
}

impl TryFrom<Matrix4<f64>> for FrameTransform {
    type Error = GeomError;

    fn try_from(m: Matrix4<f64>) -> Result<Self> {
        Self::try_from(FrameTransform { m }.to_array())
    }
}

//! `Point3D` and `Vector3D`: constructors, accessors and the vector algebra.

use nalgebra::{Matrix3, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::rotation::rotation_between;
use crate::coerce;
use crate::error::{GeomError, Result};
use crate::homogeneous::{from_homogeneous, to_homogeneous};

/// Location in 3-space (homogeneous `w = 1`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 3]", from = "[f64; 3]")]
pub struct Point3D {
    p: Vector3<f64>,
}

/// Direction or displacement in 3-space (homogeneous `w = 0`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 3]", from = "[f64; 3]")]
pub struct Vector3D {
    v: Vector3<f64>,
}

impl Point3D {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            p: Vector3::new(x, y, z),
        }
    }
    #[inline]
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.p.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.p.y
    }
    #[inline]
    pub fn z(&self) -> f64 {
        self.p.z
    }
    /// Raw coordinates.
    #[inline]
    pub fn coords(&self) -> Vector3<f64> {
        self.p
    }
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.p.x, self.p.y, self.p.z]
    }
    /// Position vector, i.e. `self - origin`.
    #[inline]
    pub fn as_vector(&self) -> Vector3D {
        Vector3D { v: self.p }
    }
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f64 {
        (self.p - other.p).norm()
    }
    #[inline]
    pub fn to_homogeneous(&self) -> Vector4<f64> {
        to_homogeneous(&self.p, true)
    }
    /// Divide by `w`; fails for `w = 0`.
    pub fn from_homogeneous(x: &Vector4<f64>) -> Result<Self> {
        Ok(Self {
            p: from_homogeneous(x, true)?,
        })
    }
}

impl Vector3D {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            v: Vector3::new(x, y, z),
        }
    }
    #[inline]
    pub fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.v.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.v.y
    }
    #[inline]
    pub fn z(&self) -> f64 {
        self.v.z
    }
    #[inline]
    pub fn coords(&self) -> Vector3<f64> {
        self.v
    }
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.v.x, self.v.y, self.v.z]
    }
    #[inline]
    pub fn dot(&self, other: &Vector3D) -> f64 {
        self.v.dot(&other.v)
    }
    #[inline]
    pub fn cross(&self, other: &Vector3D) -> Vector3D {
        Vector3D {
            v: self.v.cross(&other.v),
        }
    }
    #[inline]
    pub fn norm(&self) -> f64 {
        self.v.norm()
    }
    /// Unit vector `self / |self|`; a zero vector is `Degenerate`, never NaN.
    ///
    /// Divides by the largest component first so `norm` cannot overflow for
    /// large finite coordinates.
    pub fn hat(&self) -> Result<Vector3D> {
        let m = self.v.amax();
        if m == 0.0 || !self.v.iter().all(|x| x.is_finite()) {
            return Err(GeomError::degenerate(format!(
                "cannot normalize vector with max |component| {m}: {:?}",
                self.to_array()
            )));
        }
        let scaled = self.v / m;
        Ok(Vector3D {
            v: scaled / scaled.norm(),
        })
    }
    /// Rotation `R` with `R * u.hat() == self.hat()`.
    ///
    /// Both vectors are normalized first. Antiparallel inputs get a half turn
    /// about `perpendicular(u)`.
    pub fn rotfrom(&self, u: &Vector3D) -> Result<Matrix3<f64>> {
        let u = u.hat()?;
        let v = self.hat()?;
        Ok(rotation_between(&u.v, &v.v))
    }
    #[inline]
    pub fn to_homogeneous(&self) -> Vector4<f64> {
        to_homogeneous(&self.v, false)
    }
    /// Strip `w`; fails unless `w ≈ 0`.
    pub fn from_homogeneous(x: &Vector4<f64>) -> Result<Self> {
        Ok(Self {
            v: from_homogeneous(x, false)?,
        })
    }
}

impl From<[f64; 3]> for Point3D {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}
impl From<Point3D> for [f64; 3] {
    fn from(p: Point3D) -> Self {
        p.to_array()
    }
}
impl From<Vector3<f64>> for Point3D {
    fn from(p: Vector3<f64>) -> Self {
        Self { p }
    }
}
impl From<Point3<f64>> for Point3D {
    fn from(p: Point3<f64>) -> Self {
        Self { p: p.coords }
    }
}
impl From<Point3D> for Point3<f64> {
    fn from(p: Point3D) -> Self {
        Point3::from(p.p)
    }
}
impl TryFrom<&[f64]> for Point3D {
    type Error = GeomError;
    fn try_from(values: &[f64]) -> Result<Self> {
        Ok(coerce::fixed::<3>(values, &format!("{values:?}"))?.into())
    }
}
impl FromStr for Point3D {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self> {
        Ok(coerce::parse_fixed::<3>(s)?.into())
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}
impl From<Vector3D> for [f64; 3] {
    fn from(v: Vector3D) -> Self {
        v.to_array()
    }
}
impl From<Vector3<f64>> for Vector3D {
    fn from(v: Vector3<f64>) -> Self {
        Self { v }
    }
}
impl From<Vector3D> for Vector3<f64> {
    fn from(v: Vector3D) -> Self {
        v.v
    }
}
impl TryFrom<&[f64]> for Vector3D {
    type Error = GeomError;
    fn try_from(values: &[f64]) -> Result<Self> {
        Ok(coerce::fixed::<3>(values, &format!("{values:?}"))?.into())
    }
}
impl FromStr for Vector3D {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self> {
        Ok(coerce::parse_fixed::<3>(s)?.into())
    }
}

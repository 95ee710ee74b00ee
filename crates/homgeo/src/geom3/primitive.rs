//! Runtime-tagged point or vector, for callers that only learn the kind at runtime
//! (parsed input, mixed collections).

use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

use super::types::{Point3D, Vector3D};
use crate::error::{GeomError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Point(Point3D),
    Vector(Vector3D),
}

impl Primitive {
    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self, Primitive::Point(_))
    }

    #[inline]
    fn kind(&self) -> &'static str {
        match self {
            Primitive::Point(_) => "Point3D",
            Primitive::Vector(_) => "Vector3D",
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        match self {
            Primitive::Point(p) => p.to_array(),
            Primitive::Vector(v) => v.to_array(),
        }
    }

    pub fn to_homogeneous(&self) -> Vector4<f64> {
        match self {
            Primitive::Point(p) => p.to_homogeneous(),
            Primitive::Vector(v) => v.to_homogeneous(),
        }
    }

    /// Inverse of `to_homogeneous`; the kind is chosen by the caller.
    pub fn from_homogeneous(x: &Vector4<f64>, is_point: bool) -> Result<Self> {
        if is_point {
            Ok(Primitive::Point(Point3D::from_homogeneous(x)?))
        } else {
            Ok(Primitive::Vector(Vector3D::from_homogeneous(x)?))
        }
    }

    /// `Point + Vector` or `Vector + Vector`.
    pub fn checked_add(self, rhs: Primitive) -> Result<Primitive> {
        match (self, rhs) {
            (Primitive::Point(p), Primitive::Vector(v)) => Ok(Primitive::Point(p + v)),
            (Primitive::Vector(a), Primitive::Vector(b)) => Ok(Primitive::Vector(a + b)),
            (lhs, rhs) => Err(mismatch("+", &lhs, &rhs)),
        }
    }

    /// `Point - Point` or `Vector - Vector`.
    pub fn checked_sub(self, rhs: Primitive) -> Result<Primitive> {
        match (self, rhs) {
            (Primitive::Point(p), Primitive::Point(q)) => Ok(Primitive::Vector(p - q)),
            (Primitive::Vector(a), Primitive::Vector(b)) => Ok(Primitive::Vector(a - b)),
            (lhs, rhs) => Err(mismatch("-", &lhs, &rhs)),
        }
    }

    pub fn checked_scale(self, s: f64) -> Result<Primitive> {
        match self {
            Primitive::Vector(v) => Ok(Primitive::Vector(v * s)),
            Primitive::Point(_) => Err(GeomError::TypeMismatch {
                op: "*",
                lhs: self.kind(),
                rhs: "f64",
            }),
        }
    }
}

fn mismatch(op: &'static str, lhs: &Primitive, rhs: &Primitive) -> GeomError {
    GeomError::TypeMismatch {
        op,
        lhs: lhs.kind(),
        rhs: rhs.kind(),
    }
}

impl From<Point3D> for Primitive {
    fn from(p: Point3D) -> Self {
        Primitive::Point(p)
    }
}

impl From<Vector3D> for Primitive {
    fn from(v: Vector3D) -> Self {
        Primitive::Vector(v)
    }
}

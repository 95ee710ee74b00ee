//! Operator impls for the point/vector closure table.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use super::types::{Point3D, Vector3D};

impl Sub for Point3D {
    type Output = Vector3D;
    #[inline]
    fn sub(self, rhs: Point3D) -> Vector3D {
        Vector3D::from(self.coords() - rhs.coords())
    }
}

impl Add<Vector3D> for Point3D {
    type Output = Point3D;
    #[inline]
    fn add(self, rhs: Vector3D) -> Point3D {
        Point3D::from(self.coords() + rhs.coords())
    }
}

impl AddAssign<Vector3D> for Point3D {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3D) {
        *self = *self + rhs;
    }
}

impl Add for Vector3D {
    type Output = Vector3D;
    #[inline]
    fn add(self, rhs: Vector3D) -> Vector3D {
        Vector3D::from(self.coords() + rhs.coords())
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;
    #[inline]
    fn sub(self, rhs: Vector3D) -> Vector3D {
        Vector3D::from(self.coords() - rhs.coords())
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;
    #[inline]
    fn neg(self) -> Vector3D {
        Vector3D::from(-self.coords())
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;
    #[inline]
    fn mul(self, rhs: f64) -> Vector3D {
        Vector3D::from(self.coords() * rhs)
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;
    #[inline]
    fn mul(self, rhs: Vector3D) -> Vector3D {
        rhs * self
    }
}

impl Div<f64> for Vector3D {
    type Output = Vector3D;
    #[inline]
    fn div(self, rhs: f64) -> Vector3D {
        Vector3D::from(self.coords() / rhs)
    }
}

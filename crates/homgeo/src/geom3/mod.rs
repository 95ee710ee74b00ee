//! Homogeneous 3D primitives and rigid frame transforms.
//!
//! Model
//! - `Point3D` is a location (homogeneous `w = 1`), `Vector3D` a displacement
//!   (`w = 0`). Both are `Copy` value types over three raw coordinates; the
//!   trailing coordinate is implicit and only materialized by `to_homogeneous`.
//! - Closure: `Point - Point = Vector`, `Point + Vector = Point`,
//!   `Vector + Vector = Vector`, `Vector * f64 = Vector`. Other point/vector
//!   combinations have no operator impl; `Primitive` reports them at runtime.
//! - `FrameTransform` is `[[R, t], [0, 0, 0, 1]]` with orthonormal `R`, `det R = +1`.
//!   It acts affinely on points and linearly on vectors.
//!
//! Code cross-refs: `rotation_between`, `FrameTransform::from_pd`, `crate::homogeneous`

mod frame;
mod ops;
mod primitive;
mod rotation;
mod types;

pub use frame::FrameTransform;
pub use primitive::Primitive;
pub use rotation::{is_rotation, perpendicular, rotation_between};
pub use types::{Point3D, Vector3D};

#[cfg(test)]
mod tests;

//! Homogeneous-coordinate geometry in 3D plus constrained random sampling.
//!
//! Layout
//! - `geom3`: `Point3D` (w = 1), `Vector3D` (w = 0), rigid `FrameTransform`s and
//!   the rotation-alignment helpers they are built from.
//! - `sample`: angular-cap, clipped-cap, truncated-normal and ball-uniform draws.
//! - `coerce`, `homogeneous`, `units`, `persist`: data-shape plumbing around the core.
//!
//! Conventions
//! - Composition reads right to left: `f2 * f1` applies `f1` first.
//! - Every sampler takes its generator explicitly; `sample::Sampler` bundles one.

pub mod cfg;
pub mod coerce;
pub mod error;
pub mod geom3;
pub mod homogeneous;
pub mod persist;
pub mod sample;
pub mod units;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeomError, Result};
pub use geom3::{FrameTransform, Point3D, Primitive, Vector3D};
pub use sample::{ClipBounds, SampleCfg, Sampler};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom3::{rotation_between, FrameTransform, Point3D, Primitive, Vector3D};
    pub use crate::sample::{
        clipped_spherical_uniform, normal, spherical_uniform, thread_sampler, uniform, ClipBounds,
        SampleCfg, Sampler,
    };
    pub use crate::{GeomError, Result};
    pub use nalgebra::{Matrix3 as Mat3, Matrix4 as Mat4};
}

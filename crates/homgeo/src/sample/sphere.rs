//! Direction sampling on spherical caps.

use nalgebra::Vector3;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::f64::consts::{PI, TAU};

use super::{check_nonneg, collect_accepted};
use crate::cfg::SampleCfg;
use crate::error::Result;
use crate::geom3::{FrameTransform, Vector3D};

/// `n` unit vectors within `d_phi` of `+Z`, uniform by area.
///
/// The polar angle is `acos(U[cos d_phi, 1])`: uniform in `cos φ`, not in `φ`,
/// which is what makes the cap density uniform per unit area.
fn sample_cap<R: Rng + ?Sized>(rng: &mut R, d_phi: f64, n: usize) -> Vec<Vector3<f64>> {
    let azimuth = Uniform::new(0.0, TAU);
    let cos_polar = Uniform::new_inclusive(d_phi.cos(), 1.0);
    (0..n)
        .map(|_| {
            let theta = azimuth.sample(rng);
            let phi = cos_polar.sample(rng).acos();
            Vector3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
        })
        .collect()
}

/// `n` unit vectors uniform on the cap of half-angle `d_phi` (radians) around
/// `center.hat()`.
///
/// `d_phi = 0` yields `center.hat()` (up to rounding in the alignment rotation);
/// `d_phi >= π` is the whole sphere.
pub fn spherical_uniform<R: Rng + ?Sized>(
    rng: &mut R,
    center: &Vector3D,
    d_phi: f64,
    n: usize,
) -> Result<Vec<Vector3D>> {
    let d_phi = check_nonneg("d_phi", d_phi)?.min(PI);
    let world_from_cap =
        FrameTransform::from_rotation(center.rotfrom(&Vector3D::new(0.0, 0.0, 1.0))?);
    Ok(sample_cap(rng, d_phi, n)
        .into_iter()
        .map(|p| world_from_cap * Vector3D::from(p))
        .collect())
}

/// Angular bounds for `clipped_spherical_uniform`, all in radians.
///
/// Axes: Z is forward, X lateral, Y the remaining axis. For a direction
/// `(x, y, z)`: `alpha = atan2(x, z)`, `beta = atan2(y, z)`, `theta = atan2(y, x)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipBounds {
    /// Bound on the X/Z (left/right) angulation.
    pub max_alpha: f64,
    /// Bound on the Y/Z (cranial/caudal) angulation.
    pub max_beta: f64,
    /// Bound on the in-plane yaw, admitting lateral directions beyond `max_beta`.
    pub max_theta: f64,
}

impl ClipBounds {
    fn validate(&self) -> Result<()> {
        check_nonneg("max_alpha", self.max_alpha)?;
        check_nonneg("max_beta", self.max_beta)?;
        check_nonneg("max_theta", self.max_theta)?;
        Ok(())
    }

    /// Half-angle of the cap candidates are drawn from.
    #[inline]
    pub fn cap_angle(&self) -> f64 {
        self.max_alpha.max(self.max_beta)
    }

    /// `|alpha| <= max_alpha && (|beta| <= max_beta || |theta| <= max_theta)`.
    pub fn accepts(&self, d: &Vector3D) -> bool {
        let alpha = d.x().atan2(d.z());
        let beta = d.y().atan2(d.z());
        let theta = d.y().atan2(d.x());
        alpha.abs() <= self.max_alpha
            && (beta.abs() <= self.max_beta || theta.abs() <= self.max_theta)
    }
}

/// `n` directions from the cap of half-angle `bounds.cap_angle()` around `center`
/// that pass `bounds.accepts`, by rejection.
///
/// Each round draws `n` candidates. All-zero bounds only accept directions lying
/// exactly on the Z axis, so unless `center` is `+Z` the loop ends in
/// `SamplingStall` once `cfg.max_rounds` is spent.
pub fn clipped_spherical_uniform<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &SampleCfg,
    center: &Vector3D,
    bounds: &ClipBounds,
    n: usize,
) -> Result<Vec<Vector3D>> {
    bounds.validate()?;
    let d_phi = bounds.cap_angle();
    collect_accepted("clipped_spherical_uniform", cfg, n, |_| {
        let candidates = spherical_uniform(rng, center, d_phi, n)?;
        Ok(candidates.into_iter().filter(|d| bounds.accepts(d)).collect())
    })
}

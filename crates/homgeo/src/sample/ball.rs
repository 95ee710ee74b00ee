//! Point clouds around a center: truncated normal and uniform-in-ball.

use nalgebra::Vector3;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

use super::{check_nonneg, collect_accepted};
use crate::cfg::SampleCfg;
use crate::error::{GeomError, Result};
use crate::geom3::{Point3D, Vector3D};

fn draw_offsets<R, D>(rng: &mut R, dist: &D, k: usize) -> Vec<Vector3<f64>>
where
    R: Rng + ?Sized,
    D: Distribution<f64>,
{
    (0..k)
        .map(|_| Vector3::new(dist.sample(rng), dist.sample(rng), dist.sample(rng)))
        .collect()
}

/// `n` points from an isotropic normal (std dev `scale`) around `center`,
/// keeping only offsets with norm `<= radius` when a radius is given.
///
/// Without a radius there is no rejection and a single round suffices.
pub fn normal<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &SampleCfg,
    center: &Point3D,
    scale: f64,
    radius: Option<f64>,
    n: usize,
) -> Result<Vec<Point3D>> {
    let scale = check_nonneg("scale", scale)?;
    let radius = radius.map(|r| check_nonneg("radius", r)).transpose()?;
    let dist = Normal::new(0.0, scale)
        .map_err(|e| GeomError::invalid(format!("normal with scale {scale}: {e}")))?;
    let offsets = match radius {
        None => draw_offsets(rng, &dist, n),
        Some(r) => collect_accepted("normal", cfg, n, |missing| {
            let mut batch = draw_offsets(rng, &dist, missing);
            batch.retain(|o| o.norm() <= r);
            Ok(batch)
        })?,
    };
    Ok(offsets
        .into_iter()
        .map(|o| *center + Vector3D::from(o))
        .collect())
}

/// `n` points uniform in the ball of `radius` around `center`: draw from the cube
/// `[-1, 1]³`, reject the corners (acceptance `π/6`), then scale by `radius`.
///
/// Sampling the unit cube keeps the range finite for any finite `radius`.
pub fn uniform<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &SampleCfg,
    center: &Point3D,
    radius: f64,
    n: usize,
) -> Result<Vec<Point3D>> {
    let radius = check_nonneg("radius", radius)?;
    let cube = Uniform::new_inclusive(-1.0, 1.0);
    let offsets = collect_accepted("uniform", cfg, n, |missing| {
        let mut batch = draw_offsets(rng, &cube, missing);
        batch.retain(|o| o.norm() <= 1.0);
        Ok(batch)
    })?;
    Ok(offsets
        .into_iter()
        .map(|o| *center + Vector3D::from(o * radius))
        .collect())
}

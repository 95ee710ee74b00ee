//! Random draws of directions and points under simple geometric constraints.
//!
//! Purpose
//! - Angular caps around a direction (`spherical_uniform`), caps clipped by
//!   per-axis angle bounds (`clipped_spherical_uniform`), radius-truncated normal
//!   clouds (`normal`) and uniform balls (`uniform`).
//!
//! Why this design
//! - Generators are passed explicitly (`&mut R`), so a seed reproduces a run. The
//!   `Sampler` wrapper owns one generator plus the loop budget; `thread_sampler`
//!   is the process-wide default for outer boundaries only.
//! - Batch functions always return exactly `n` samples; the `*_one` methods on
//!   `Sampler` cover the single-sample case.
//! - Rejection loops are bounded by `SampleCfg::max_rounds` and fail with
//!   `GeomError::SamplingStall` instead of spinning forever on parameters with
//!   (near-)zero acceptance probability.
//!
//! Code cross-refs: `Vector3D::rotfrom`, `crate::cfg::SampleCfg`

mod ball;
mod sphere;

pub use crate::cfg::SampleCfg;
pub use ball::{normal, uniform};
pub use sphere::{clipped_spherical_uniform, spherical_uniform, ClipBounds};

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::error::{GeomError, Result};
use crate::geom3::{Point3D, Vector3D};

/// Run `draw(missing)` until `n` accepted samples are collected or the round
/// budget is spent. `draw` returns the accepted candidates of one round.
pub(crate) fn collect_accepted<T>(
    sampler: &'static str,
    cfg: &SampleCfg,
    n: usize,
    mut draw: impl FnMut(usize) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    let mut out: Vec<T> = Vec::with_capacity(n);
    let mut rounds = 0usize;
    while out.len() < n {
        if rounds >= cfg.max_rounds {
            tracing::warn!(sampler, rounds, accepted = out.len(), requested = n, "sampling stalled");
            return Err(GeomError::SamplingStall {
                sampler,
                rounds,
                accepted: out.len(),
                requested: n,
            });
        }
        rounds += 1;
        let accepted = draw(n - out.len())?;
        out.extend(accepted);
        tracing::debug!(sampler, round = rounds, accepted = out.len(), requested = n, "rejection round");
    }
    out.truncate(n);
    Ok(out)
}

/// Reject NaN/negative values for parameters that must be `>= 0`.
pub(crate) fn check_nonneg(name: &str, x: f64) -> Result<f64> {
    if x.is_finite() && x >= 0.0 {
        Ok(x)
    } else {
        Err(GeomError::invalid(format!("{name} must be finite and >= 0, got {x}")))
    }
}

fn first<T>(samples: Vec<T>) -> Result<T> {
    samples
        .into_iter()
        .next()
        .ok_or_else(|| GeomError::invalid("sampler returned no samples"))
}

/// A generator bundled with the rejection-loop budget.
#[derive(Clone, Debug)]
pub struct Sampler<R = StdRng> {
    rng: R,
    cfg: SampleCfg,
}

impl Sampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

/// Sampler on the thread-local generator; not reproducible.
pub fn thread_sampler() -> Sampler<ThreadRng> {
    Sampler::with_rng(rand::thread_rng())
}

impl<R: Rng> Sampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            cfg: SampleCfg::default(),
        }
    }

    pub fn with_cfg(mut self, cfg: SampleCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn cfg(&self) -> &SampleCfg {
        &self.cfg
    }

    #[inline]
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn spherical_uniform(
        &mut self,
        center: &Vector3D,
        d_phi: f64,
        n: usize,
    ) -> Result<Vec<Vector3D>> {
        spherical_uniform(&mut self.rng, center, d_phi, n)
    }

    pub fn spherical_uniform_one(&mut self, center: &Vector3D, d_phi: f64) -> Result<Vector3D> {
        first(self.spherical_uniform(center, d_phi, 1)?)
    }

    pub fn clipped_spherical_uniform(
        &mut self,
        center: &Vector3D,
        bounds: &ClipBounds,
        n: usize,
    ) -> Result<Vec<Vector3D>> {
        clipped_spherical_uniform(&mut self.rng, &self.cfg, center, bounds, n)
    }

    pub fn clipped_spherical_uniform_one(
        &mut self,
        center: &Vector3D,
        bounds: &ClipBounds,
    ) -> Result<Vector3D> {
        first(self.clipped_spherical_uniform(center, bounds, 1)?)
    }

    pub fn normal(
        &mut self,
        center: &Point3D,
        scale: f64,
        radius: Option<f64>,
        n: usize,
    ) -> Result<Vec<Point3D>> {
        normal(&mut self.rng, &self.cfg, center, scale, radius, n)
    }

    pub fn normal_one(
        &mut self,
        center: &Point3D,
        scale: f64,
        radius: Option<f64>,
    ) -> Result<Point3D> {
        first(self.normal(center, scale, radius, 1)?)
    }

    pub fn uniform(&mut self, center: &Point3D, radius: f64, n: usize) -> Result<Vec<Point3D>> {
        uniform(&mut self.rng, &self.cfg, center, radius, n)
    }

    pub fn uniform_one(&mut self, center: &Point3D, radius: f64) -> Result<Point3D> {
        first(self.uniform(center, radius, 1)?)
    }
}

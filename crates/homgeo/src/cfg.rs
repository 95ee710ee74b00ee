//! Tolerance defaults (internal) and the rejection-loop budget.
//!
//! Policy
//! - Tolerances are fixed constants; call sites that need another value take an
//!   explicit `eps` argument instead.

/// Max-abs deviation of `R^T R` from identity accepted by `FrameTransform::from_rt`.
pub const ORTHO_EPS: f64 = 1e-6;
/// Largest trailing coordinate still treated as zero for homogeneous vectors.
pub const HOMOGENEOUS_EPS: f64 = 1e-8;
/// Below this `|u x v|` two unit vectors count as parallel.
pub const PARALLEL_EPS: f64 = 1e-12;

/// Budget for the rejection-sampling loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleCfg {
    /// Rounds (candidate batches) before giving up with `GeomError::SamplingStall`.
    pub max_rounds: usize,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self { max_rounds: 10_000 }
    }
}

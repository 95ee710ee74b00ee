//! Angle units. Library APIs take radians; `degrees = false` is a no-op.

#[inline]
pub fn radians(t: f64, degrees: bool) -> f64 {
    if degrees {
        t.to_radians()
    } else {
        t
    }
}

pub fn radians_all(ts: &[f64], degrees: bool) -> Vec<f64> {
    ts.iter().map(|&t| radians(t, degrees)).collect()
}

//! Coercion of loose caller input into fixed-length coordinate arrays.
//!
//! Strings are whitespace-separated numbers with 2 or 3 tokens. Rows copied out of
//! a fiducial/markup table carry 14 tokens (label first); tokens 1..=3 are the
//! coordinates.

use crate::error::{GeomError, Result};

/// Token count of a markup-table row.
const MARKUP_ROW_TOKENS: usize = 14;

/// Parse a coordinate string into its numeric components.
pub fn parse_coords(s: &str) -> Result<Vec<f64>> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    let coords = match parts.len() {
        2 | 3 => &parts[..],
        MARKUP_ROW_TOKENS => &parts[1..4],
        k => {
            return Err(GeomError::shape(
                s,
                format!("expected 2, 3 or {MARKUP_ROW_TOKENS} tokens, got {k}"),
            ))
        }
    };
    coords
        .iter()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|e| GeomError::shape(s, format!("token {tok:?}: {e}")))
        })
        .collect()
}

/// Check that `values` has exactly `N` entries; `input` names the source in errors.
pub fn fixed<const N: usize>(values: &[f64], input: &str) -> Result<[f64; N]> {
    <[f64; N]>::try_from(values)
        .map_err(|_| GeomError::shape(input, format!("expected {N} components, got {}", values.len())))
}

/// Parse a string straight into an `N`-array.
pub fn parse_fixed<const N: usize>(s: &str) -> Result<[f64; N]> {
    let values = parse_coords(s)?;
    fixed::<N>(&values, s)
}

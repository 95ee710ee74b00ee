//! Provenance sidecars: every written artifact gets `<stem>.provenance.json`
//! recording what produced it, from which revision, and with which seed.
//!
//! Sidecars go through `homgeo::persist::save_json`, so they share the
//! 4-space, sorted-key layout of the sample files.

use homgeo::persist::save_json;
use serde::Serialize;
use serde_json::Value;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Operation that produced an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    SphericalUniform,
    ClippedSphericalUniform,
    Normal,
    Uniform,
    Frame,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

#[derive(Debug, Serialize)]
pub struct Provenance {
    pub source: Source,
    pub code_rev: String,
    pub homgeo_version: &'static str,
    pub callsite: Callsite,
    /// `None` when the run drew from fresh entropy and cannot be replayed.
    pub seed: Option<u64>,
    pub rows: usize,
    pub params: Value,
    pub output: String,
}

impl Provenance {
    #[track_caller]
    pub fn new(source: Source, seed: Option<u64>, rows: usize, params: Value) -> Self {
        let caller = Location::caller();
        Self {
            source,
            code_rev: current_git_rev(),
            homgeo_version: homgeo::VERSION,
            callsite: Callsite {
                file: caller.file(),
                line: caller.line(),
            },
            seed,
            rows,
            params,
            output: String::new(),
        }
    }

    /// Save next to `artifact`; returns the sidecar path.
    pub fn write_beside(mut self, artifact: &Path) -> homgeo::Result<PathBuf> {
        self.output = artifact.to_string_lossy().into_owned();
        let path = sidecar_path(artifact);
        save_json(&path, &self)?;
        Ok(path)
    }
}

/// `dir/samples.csv` -> `dir/samples.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    [
        option_env!("GIT_COMMIT").map(str::to_owned),
        std::env::var("GIT_COMMIT").ok(),
    ]
    .into_iter()
    .flatten()
    .find(|rev| !rev.is_empty())
    .or_else(git_head)
    .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

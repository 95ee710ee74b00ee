use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use homgeo::units::radians;
use homgeo::{ClipBounds, FrameTransform, Point3D, SampleCfg, Sampler, Vector3D};
use polars::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs::File;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{Provenance, Source};

#[derive(Parser)]
#[command(name = "homgeo")]
#[command(about = "Constrained random sampling and rigid frames in 3D")]
struct Cmd {
    /// Seed for reproducible draws; fresh entropy when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Round budget for the rejection samplers
    #[arg(long, global = true, default_value_t = SampleCfg::default().max_rounds)]
    max_rounds: usize,

    /// Log every rejection round
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args)]
struct Output {
    /// Number of samples
    #[arg(long, short, default_value_t = 1)]
    n: usize,
    /// Output file: .csv and .parquet are tables, anything else JSON. Stdout if omitted
    #[arg(long)]
    out: Option<String>,
}

#[derive(Subcommand)]
enum Action {
    /// Unit vectors uniform on the cap of half-angle d_phi around center
    Spherical {
        #[arg(long, default_value = "0 0 1", allow_hyphen_values = true)]
        center: Vector3D,
        #[arg(long)]
        d_phi: f64,
        /// Angles are in degrees
        #[arg(long)]
        degrees: bool,
        #[command(flatten)]
        output: Output,
    },
    /// Cap directions clipped by alpha/beta/theta bounds (Z forward, X lateral)
    Clipped {
        #[arg(long, default_value = "0 0 1", allow_hyphen_values = true)]
        center: Vector3D,
        #[arg(long)]
        max_alpha: f64,
        #[arg(long)]
        max_beta: f64,
        #[arg(long)]
        max_theta: f64,
        #[arg(long)]
        degrees: bool,
        #[command(flatten)]
        output: Output,
    },
    /// Points from an isotropic normal, optionally truncated to a ball
    Normal {
        #[arg(long, default_value = "0 0 0", allow_hyphen_values = true)]
        center: Point3D,
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        #[arg(long)]
        radius: Option<f64>,
        #[command(flatten)]
        output: Output,
    },
    /// Points uniform in a ball
    Uniform {
        #[arg(long, default_value = "0 0 0", allow_hyphen_values = true)]
        center: Point3D,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[command(flatten)]
        output: Output,
    },
    /// Frame anchored at `from` with its Z axis towards `to` (4x4, row-major)
    Frame {
        #[arg(long, allow_hyphen_values = true)]
        from: Point3D,
        #[arg(long, allow_hyphen_values = true)]
        to: Point3D,
        #[arg(long)]
        out: Option<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let mut sampler = match cmd.seed {
        Some(seed) => Sampler::seeded(seed),
        None => Sampler::from_entropy(),
    }
    .with_cfg(SampleCfg {
        max_rounds: cmd.max_rounds,
    });
    match cmd.action {
        Action::Spherical {
            center,
            d_phi,
            degrees,
            output,
        } => {
            let d_phi = radians(d_phi, degrees);
            tracing::info!(?center, d_phi, n = output.n, "spherical_uniform");
            let rows = sampler.spherical_uniform(&center, d_phi, output.n)?;
            let params = json!({
                "sampler": "spherical_uniform",
                "center": center,
                "d_phi": d_phi,
                "n": output.n,
            });
            write_samples(Source::SphericalUniform, &rows, &output, cmd.seed, params)
        }
        Action::Clipped {
            center,
            max_alpha,
            max_beta,
            max_theta,
            degrees,
            output,
        } => {
            let bounds = ClipBounds {
                max_alpha: radians(max_alpha, degrees),
                max_beta: radians(max_beta, degrees),
                max_theta: radians(max_theta, degrees),
            };
            tracing::info!(?center, ?bounds, n = output.n, "clipped_spherical_uniform");
            let rows = sampler.clipped_spherical_uniform(&center, &bounds, output.n)?;
            let params = json!({
                "sampler": "clipped_spherical_uniform",
                "center": center,
                "max_alpha": bounds.max_alpha,
                "max_beta": bounds.max_beta,
                "max_theta": bounds.max_theta,
                "n": output.n,
            });
            write_samples(Source::ClippedSphericalUniform, &rows, &output, cmd.seed, params)
        }
        Action::Normal {
            center,
            scale,
            radius,
            output,
        } => {
            tracing::info!(?center, scale, ?radius, n = output.n, "normal");
            let rows = sampler.normal(&center, scale, radius, output.n)?;
            let params = json!({
                "sampler": "normal",
                "center": center,
                "scale": scale,
                "radius": radius,
                "n": output.n,
            });
            write_samples(Source::Normal, &rows, &output, cmd.seed, params)
        }
        Action::Uniform {
            center,
            radius,
            output,
        } => {
            tracing::info!(?center, radius, n = output.n, "uniform");
            let rows = sampler.uniform(&center, radius, output.n)?;
            let params = json!({
                "sampler": "uniform",
                "center": center,
                "radius": radius,
                "n": output.n,
            });
            write_samples(Source::Uniform, &rows, &output, cmd.seed, params)
        }
        Action::Frame { from, to, out } => frame(from, to, out),
        Action::Report => report(cmd.seed),
    }
}

fn frame(from: Point3D, to: Point3D, out: Option<String>) -> Result<()> {
    let f = FrameTransform::from_pd(from, to - from).context("building frame")?;
    tracing::info!(?from, ?to, "frame");
    match out {
        None => println!("{}", serde_json::to_string_pretty(&f)?),
        Some(out) => {
            let out_path = Path::new(&out);
            ensure_parent(out_path)?;
            homgeo::persist::save_json(out_path, &f)?;
            Provenance::new(Source::Frame, None, 4, json!({"from": from, "to": to}))
                .write_beside(out_path)?;
        }
    }
    Ok(())
}

fn report(seed: Option<u64>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "homgeo_version": homgeo::VERSION,
        "seed": seed,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Write sampled primitives to stdout or `output.out` plus a provenance sidecar.
fn write_samples<T>(
    source: Source,
    rows: &[T],
    output: &Output,
    seed: Option<u64>,
    params: Value,
) -> Result<()>
where
    T: Serialize + Copy + Into<[f64; 3]>,
{
    let Some(out) = output.out.as_deref() else {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    };
    let out_path = Path::new(out);
    ensure_parent(out_path)?;
    match out_path.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            let mut df = table(rows)?;
            let mut file = File::create(out_path)
                .with_context(|| format!("creating {}", out_path.display()))?;
            CsvWriter::new(&mut file).finish(&mut df)?;
        }
        Some("parquet") => {
            let mut df = table(rows)?;
            let file = File::create(out_path)
                .with_context(|| format!("creating {}", out_path.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
        _ => homgeo::persist::save_json(out_path, rows)?,
    }
    let sidecar = Provenance::new(source, seed, rows.len(), params).write_beside(out_path)?;
    tracing::info!(
        out = %out_path.display(),
        provenance = %sidecar.display(),
        rows = rows.len(),
        "wrote samples"
    );
    Ok(())
}

/// One row per sample with columns x, y, z.
fn table<T: Copy + Into<[f64; 3]>>(rows: &[T]) -> PolarsResult<DataFrame> {
    let coords: Vec<[f64; 3]> = rows.iter().map(|&r| r.into()).collect();
    let x: Vec<f64> = coords.iter().map(|c| c[0]).collect();
    let y: Vec<f64> = coords.iter().map(|c| c[1]).collect();
    let z: Vec<f64> = coords.iter().map(|c| c[2]).collect();
    df!("x" => x, "y" => y, "z" => z)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

//! Benchmark command implementation.

use std::f64::consts::PI;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use fillpoly::{Point, Polygon};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::common::flag_value;

/// Side of the square area the random polygons are scattered over.
const FIELD_SIZE: f64 = 2000.0;

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) -> Result<()> {
    let mut count: usize = 1000;
    let mut vertex_count: usize = 12;
    let mut seed: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--count" => count = parse_count(flag_value(args, &mut i, "--count")?)?,
            "-v" | "--vertices" => {
                vertex_count = parse_count(flag_value(args, &mut i, "--vertices")?)?;
            }
            "--seed" => {
                let value = flag_value(args, &mut i, "--seed")?;
                seed = Some(value.parse().with_context(|| format!("bad seed '{}'", value))?);
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => bail!("unknown option '{}' for benchmark", other),
        }
        i += 1;
    }

    if vertex_count < 3 {
        bail!("--vertices must be at least 3");
    }

    let mut rng: Box<dyn RngCore> = match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(StdRng::from_os_rng()),
    };

    let polygons: Vec<Polygon> = (0..count)
        .map(|_| random_star(&mut rng, vertex_count))
        .collect::<Result<_, _>>()?;

    println!("Filling {} polygons with {} vertices each...", polygons.len(), vertex_count);
    let start = Instant::now();

    let mut total_spans = 0usize;
    let mut total_pixels = 0usize;
    for polygon in &polygons {
        for span in polygon.fill_spans() {
            total_spans += 1;
            total_pixels += span.len();
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  SCANLINE FILL BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Polygons: {}", polygons.len());
    println!("  Spans generated: {}", total_spans);
    println!("  Pixels covered: {}", total_pixels);
    println!("  Time: {:?}", elapsed);
    println!("  Time (ms): {:.2}", elapsed.as_secs_f64() * 1000.0);
    if !polygons.is_empty() {
        println!(
            "  Avg per polygon: {:.3}ms",
            elapsed.as_secs_f64() * 1000.0 / polygons.len() as f64
        );
    }
    println!("═══════════════════════════════════════════════");
    Ok(())
}

/// A star-ish polygon: vertices at increasing angles around a random
/// center with jittered radii, so it's simple but usually concave.
fn random_star(rng: &mut impl Rng, vertex_count: usize) -> Result<Polygon, fillpoly::PolygonError> {
    let cx = rng.random_range(0.0..FIELD_SIZE);
    let cy = rng.random_range(0.0..FIELD_SIZE);
    let outer = rng.random_range(20.0..150.0);

    let vertices = (0..vertex_count)
        .map(|k| {
            let angle = 2.0 * PI * k as f64 / vertex_count as f64;
            let r = outer * rng.random_range(0.35..1.0);
            Point::new(cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect();

    Polygon::new(vertices)
}

fn parse_count(value: &str) -> Result<usize> {
    value.parse().with_context(|| format!("bad count '{}'", value))
}

fn print_usage() {
    eprintln!("Usage: fillpoly benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --count <n>       Number of random polygons (default: 1000)");
    eprintln!("  -v, --vertices <n>    Vertices per polygon (default: 12)");
    eprintln!("  --seed <n>            Random seed for reproducibility");
    eprintln!();
    eprintln!("Benchmarks scanline fill performance.");
}

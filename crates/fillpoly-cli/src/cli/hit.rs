//! Hit command: test one point against one polygon.

use anyhow::{bail, Context, Result};
use fillpoly::{Point, Polygon, DEFAULT_HIT_TOLERANCE};
use tracing::debug;

use super::common::{flag_value, looks_like_point, parse_point};

/// Execute the hit command. Prints `inside` or `outside`.
pub fn cmd_hit(args: &[String]) -> Result<()> {
    let mut vertices: Vec<Point> = Vec::new();
    let mut at: Option<Point> = None;
    let mut tolerance = DEFAULT_HIT_TOLERANCE;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--at" => at = Some(parse_point(flag_value(args, &mut i, "--at")?)?),
            "-t" | "--tolerance" => {
                let value = flag_value(args, &mut i, "--tolerance")?;
                tolerance = value
                    .parse()
                    .with_context(|| format!("bad tolerance '{}'", value))?;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            arg if looks_like_point(arg) => vertices.push(parse_point(arg)?),
            other => bail!("unknown option '{}' for hit", other),
        }
        i += 1;
    }

    let at = at.context("--at <x,y> is required")?;
    let polygon = Polygon::new(vertices)?;
    let inside = polygon.contains_point(at, tolerance);
    debug!(x = at.x, y = at.y, tolerance, inside, "hit test");

    println!("{}", if inside { "inside" } else { "outside" });
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: fillpoly hit <x,y> <x,y> <x,y>... --at <x,y> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --at <x,y>            Point to test (required)");
    eprintln!("  -t, --tolerance <n>   Edge proximity tolerance (default: 2.0)");
}

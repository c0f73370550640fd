//! Common utilities shared across CLI commands.

use anyhow::{bail, Context, Result};
use fillpoly::{Point, Span};
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unknown format '{}': use 'text' or 'json'", other),
        }
    }
}

/// Parse a point written as `x,y`.
pub fn parse_point(arg: &str) -> Result<Point> {
    let (x, y) = arg
        .split_once(',')
        .with_context(|| format!("expected a point as x,y but got '{}'", arg))?;
    let x: f64 = x.trim().parse().with_context(|| format!("bad x coordinate in '{}'", arg))?;
    let y: f64 = y.trim().parse().with_context(|| format!("bad y coordinate in '{}'", arg))?;
    if !x.is_finite() || !y.is_finite() {
        bail!("point '{}' must have finite coordinates", arg);
    }
    Ok(Point::new(x, y))
}

/// Whether a positional argument looks like an `x,y` point.
///
/// Points may start with `-`, so this runs before the unknown-flag check.
pub fn looks_like_point(arg: &str) -> bool {
    arg.contains(',')
}

/// Fetch the value following a flag, advancing the cursor.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} needs a value", flag))
}

/// A span in JSON output format.
#[derive(Debug, Serialize)]
pub struct JsonSpan {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

impl From<Span> for JsonSpan {
    fn from(span: Span) -> Self {
        Self { y: span.y, x_start: span.x_start, x_end: span.x_end }
    }
}

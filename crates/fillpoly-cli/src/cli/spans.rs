//! Spans command: print the scanline fill of one polygon.

use std::io::{self, Write};

use anyhow::{bail, Result};
use fillpoly::{Point, Polygon};
use serde::Serialize;
use tracing::info;

use super::common::{flag_value, looks_like_point, parse_point, JsonSpan, OutputFormat};

/// JSON output for the spans command.
#[derive(Serialize)]
struct JsonSpansOutput {
    vertices: usize,
    spans: Vec<JsonSpan>,
}

/// Execute the spans command.
pub fn cmd_spans(args: &[String]) -> Result<()> {
    let mut vertices: Vec<Point> = Vec::new();
    let mut format = OutputFormat::Text;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--format" => {
                format = OutputFormat::from_name(flag_value(args, &mut i, "--format")?)?;
            }
            "--json" => format = OutputFormat::Json,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            arg if looks_like_point(arg) => vertices.push(parse_point(arg)?),
            other => bail!("unknown option '{}' for spans", other),
        }
        i += 1;
    }

    let polygon = Polygon::new(vertices)?;
    let spans: Vec<_> = polygon.fill_spans().collect();
    info!(vertices = polygon.vertices().len(), spans = spans.len(), "fill computed");

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for span in &spans {
                writeln!(out, "{} {} {}", span.y, span.x_start, span.x_end)?;
            }
        }
        OutputFormat::Json => {
            let output = JsonSpansOutput {
                vertices: polygon.vertices().len(),
                spans: spans.into_iter().map(JsonSpan::from).collect(),
            };
            serde_json::to_writer_pretty(&mut out, &output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: fillpoly spans <x,y> <x,y> <x,y>... [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --format <fmt>    Output format: text, json (default: text)");
    eprintln!();
    eprintln!("Text output is one span per line: y x_start x_end");
}

//! Render command: rasterize a filled polygon to a PNG.

use anyhow::{bail, Context, Result};
use fillpoly::{render_scene, Point, RenderOptions, Rgb, Scene};
use tracing::info;

use super::common::{flag_value, looks_like_point, parse_point};
use crate::raster::RasterSurface;

/// Execute the render command.
pub fn cmd_render(args: &[String]) -> Result<()> {
    let mut vertices: Vec<Point> = Vec::new();
    let mut output_path: Option<&str> = None;
    let mut color = Rgb::default();
    let mut show_outlines = true;
    let mut width: u32 = 800;
    let mut height: u32 = 600;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output_path = Some(flag_value(args, &mut i, "--output")?),
            "-c" | "--color" => color = flag_value(args, &mut i, "--color")?.parse()?,
            "--no-outline" => show_outlines = false,
            "--width" => width = parse_dimension(flag_value(args, &mut i, "--width")?)?,
            "--height" => height = parse_dimension(flag_value(args, &mut i, "--height")?)?,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            arg if looks_like_point(arg) => vertices.push(parse_point(arg)?),
            other => bail!("unknown option '{}' for render", other),
        }
        i += 1;
    }

    let output_path = output_path.context("-o <file.png> is required")?;

    let mut scene = Scene::new();
    let polygon = scene.add_polygon(vertices)?;
    polygon.set_color(color);
    polygon.set_fill_enabled(true);

    let mut surface = RasterSurface::new(width, height)?;
    render_scene(&scene, &mut surface, RenderOptions { show_outlines });
    surface.save(output_path)?;

    info!(path = output_path, width, height, "image written");
    eprintln!("Wrote: {}", output_path);
    Ok(())
}

fn parse_dimension(value: &str) -> Result<u32> {
    let n: u32 = value
        .parse()
        .with_context(|| format!("bad image dimension '{}'", value))?;
    if n == 0 {
        bail!("image dimensions must be positive");
    }
    Ok(n)
}

fn print_usage() {
    eprintln!("Usage: fillpoly render <x,y> <x,y> <x,y>... -o <file.png> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>   PNG file to write (required)");
    eprintln!("  -c, --color <color>   Fill color as r,g,b or #rrggbb (default: red)");
    eprintln!("  --no-outline          Skip the black outline");
    eprintln!("  --width <n>           Image width (default: 800)");
    eprintln!("  --height <n>          Image height (default: 600)");
}

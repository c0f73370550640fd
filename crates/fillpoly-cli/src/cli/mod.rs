//! CLI command implementations.
//!
//! This module contains the implementations for the non-interactive
//! subcommands:
//! - `spans` - Print the scanline fill spans of a polygon
//! - `hit` - Hit-test a point against a polygon
//! - `render` - Rasterize a filled polygon to PNG
//! - `benchmark` - Benchmark scanline fill performance

pub mod common;
pub mod spans;
pub mod hit;
pub mod render;
pub mod benchmark;

pub use spans::cmd_spans;
pub use hit::cmd_hit;
pub use render::cmd_render;
pub use benchmark::cmd_benchmark;

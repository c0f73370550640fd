//! fillpoly - terminal polygon editor and scanline fill CLI
//!
//! Usage:
//!   fillpoly [edit] [--config <file>]    Launch the terminal editor
//!   fillpoly spans <x,y>...              Print scanline fill spans
//!   fillpoly hit <x,y>... --at <x,y>     Hit-test a point
//!   fillpoly render <x,y>... -o <png>    Rasterize a filled polygon
//!   fillpoly benchmark                   Benchmark the fill engine

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

mod cli;
mod config;
mod logging;
mod raster;
mod tui;

use cli::{cmd_benchmark, cmd_hit, cmd_render, cmd_spans};
use config::EditorConfig;
use logging::{init_logging, LogTarget, DEFAULT_LOG_FILE};

/// Flags accepted by every subcommand.
#[derive(Debug, Default)]
struct GlobalFlags {
    verbose: bool,
    log_file: Option<PathBuf>,
}

/// Pull global flags out of the argument list, returning the rest.
fn split_global_flags(args: &[String]) -> Result<(GlobalFlags, Vec<String>)> {
    let mut flags = GlobalFlags::default();
    let mut rest = Vec::with_capacity(args.len());

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-V" | "--verbose" => flags.verbose = true,
            "--log" => {
                i += 1;
                match args.get(i) {
                    Some(path) => flags.log_file = Some(PathBuf::from(path)),
                    None => bail!("--log needs a file path"),
                }
            }
            _ => rest.push(args[i].clone()),
        }
        i += 1;
    }
    Ok((flags, rest))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().cloned().unwrap_or_else(|| "fillpoly".to_string());

    if let Err(e) = run(&prog, &args[1.min(args.len())..]) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(prog: &str, args: &[String]) -> Result<()> {
    let (flags, args) = split_global_flags(args)?;

    let command = args.first().map(String::as_str).unwrap_or("edit");
    let rest = if args.is_empty() { &args[..] } else { &args[1..] };

    match command {
        "spans" | "hit" | "render" | "benchmark" => {
            let target = flags.log_file.map(LogTarget::File).unwrap_or(LogTarget::Stderr);
            init_logging(flags.verbose, target)?;
            match command {
                "spans" => cmd_spans(rest),
                "hit" => cmd_hit(rest),
                "render" => cmd_render(rest),
                _ => cmd_benchmark(rest),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage(prog);
            Ok(())
        }
        "edit" => {
            let target = LogTarget::File(flags.log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)));
            init_logging(flags.verbose, target)?;
            cmd_edit(rest)
        }
        // Bare `fillpoly --config x.yaml` also launches the editor
        "--config" => {
            let target = LogTarget::File(flags.log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)));
            init_logging(flags.verbose, target)?;
            cmd_edit(&args)
        }
        other => {
            print_usage(prog);
            bail!("unknown command '{}'", other)
        }
    }
}

/// Launch the terminal editor.
fn cmd_edit(args: &[String]) -> Result<()> {
    let mut config = EditorConfig::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                let path = cli::common::flag_value(args, &mut i, "--config")?;
                config = EditorConfig::load(path)?;
            }
            other => bail!("unknown option '{}' for edit", other),
        }
        i += 1;
    }

    tui::run_tui(config)
}

fn print_usage(prog: &str) {
    eprintln!("fillpoly - polygon editor with scanline fill");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} [edit] [--config <file.yaml>]        Launch the terminal editor", prog);
    eprintln!("  {} spans <x,y> <x,y> <x,y>... [-f json]", prog);
    eprintln!("  {} hit <x,y> <x,y> <x,y>... --at <x,y> [-t tolerance]", prog);
    eprintln!("  {} render <x,y> <x,y> <x,y>... -o <file.png> [--color r,g,b]", prog);
    eprintln!("  {} benchmark [-n count] [-v vertices] [--seed n]", prog);
    eprintln!();
    eprintln!("Global options:");
    eprintln!("  -V, --verbose          Debug-level logging (RUST_LOG overrides)");
    eprintln!("  --log <file>           Log file (editor default: {})", DEFAULT_LOG_FILE);
    eprintln!();
    eprintln!("Editor controls:");
    eprintln!("  Left click     Add vertex (draw mode) / select polygon (select mode)");
    eprintln!("  Right click    Close polygon (Enter works too)");
    eprintln!("  Esc            Discard pending vertices");
    eprintln!("  m              Toggle draw/select mode");
    eprintln!("  f              Fill selected polygon");
    eprintln!("  p              Next palette color (recolors selection)");
    eprintln!("  e              Toggle outlines");
    eprintln!("  x / Delete     Remove selected polygon");
    eprintln!("  c              Clear scene");
    eprintln!("  s              Save PNG snapshot");
    eprintln!("  q              Quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn global_flags_are_stripped() {
        let (flags, rest) =
            split_global_flags(&strings(&["spans", "-V", "0,0", "--log", "x.log", "1,0"])).unwrap();
        assert!(flags.verbose);
        assert_eq!(flags.log_file, Some(PathBuf::from("x.log")));
        assert_eq!(rest, strings(&["spans", "0,0", "1,0"]));
    }

    #[test]
    fn dangling_log_flag_is_an_error() {
        assert!(split_global_flags(&strings(&["--log"])).is_err());
    }
}

//! Skylight command line.
//!
//! Three commands:
//!
//! - `skylight build <config.toml> [--validate]` runs the full
//!   generator pipeline: parse albums, copy assets, generate pages and
//!   converted photos, postprocess the output.
//! - `skylight check <config.toml>` parses the album files, runs the
//!   consistency check, and prints a one-line summary. A broken
//!   gallery exits non-zero.
//! - `skylight show <page|url> [--http] [--gesture X,Y,MS]` loads a
//!   page the way the viewer would and prints its title, navigation
//!   targets, and EXIF rows. `--gesture` replays one press-release
//!   pair on top of the loaded page.
//!
//! Log verbosity follows `RUST_LOG`; the default level is `info`.

mod commands;

use anyhow::{Result, bail};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        bail!("missing command");
    };

    match command.as_str() {
        "build" => {
            let config = expect_arg(&args, 1, "a gallery configuration file")?;
            let validate = has_flag(&args, "--validate");
            commands::run_build(config, validate)
        },
        "check" => {
            let config = expect_arg(&args, 1, "a gallery configuration file")?;
            commands::run_check(config)
        },
        "show" => {
            let target = expect_arg(&args, 1, "a page file or url")?;
            let http = has_flag(&args, "--http");
            let gesture = flag_value(&args, "--gesture");
            commands::run_show(target, http, gesture)
        },
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        },
        other => {
            print_usage();
            bail!("unknown command {other:?}");
        },
    }
}

fn print_usage() {
    eprintln!("usage: skylight <command> [options]");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  build <config.toml> [--validate]   build the gallery");
    eprintln!("  check <config.toml>                parse and check the gallery");
    eprintln!("  show <page|url> [--http]");
    eprintln!("       [--gesture X,Y,MS]            inspect a page as the viewer sees it");
}

/// Positional argument at `index`, rejecting flags in its place.
fn expect_arg<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    match args.get(index) {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => bail!("expected {what}"),
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// The value following `flag`, if both are present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            return iter.next().map(String::as_str);
        }
    }
    None
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

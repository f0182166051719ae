//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use skylight_gen::config::Config;
use skylight_gen::pipeline::Generator;
use skylight_types::input::InputEvent;
use skylight_viewer::{DocumentFetcher, FileFetcher, HttpFetcher, ViewerConfig, ViewerWidget, Zone};

// ------------------------------------------------------------------
// build
// ------------------------------------------------------------------

/// Run the full generator pipeline.
pub fn run_build(config_path: &str, validate: bool) -> Result<()> {
    let config = Config::from_path(Path::new(config_path))
        .with_context(|| format!("could not load {config_path}"))?;
    let mut generator = Generator::new(config)?;
    generator.check_tools()?;
    if validate {
        generator.force_validate();
    }

    generator.parse()?;
    info!(
        "parsed {} albums, {} photos",
        generator.gallery().albums.len(),
        generator.gallery().photo_count(),
    );
    generator.copy()?;
    generator.generate()?;
    generator.postprocess()?;
    info!("gallery built");
    Ok(())
}

// ------------------------------------------------------------------
// check
// ------------------------------------------------------------------

/// Parse the album files and run the consistency check. Prints a
/// one-line summary; a broken gallery surfaces as an error.
pub fn run_check(config_path: &str) -> Result<()> {
    let config = Config::from_path(Path::new(config_path))
        .with_context(|| format!("could not load {config_path}"))?;
    let mut generator = Generator::new(config)?;
    generator.parse()?;

    let gallery = generator.gallery();
    println!(
        "{}: {} albums, {} photos",
        gallery.title,
        gallery.albums.len(),
        gallery.photo_count(),
    );
    Ok(())
}

// ------------------------------------------------------------------
// show
// ------------------------------------------------------------------

/// Load a page the way the viewer would and describe what it sees.
pub fn run_show(target: &str, http: bool, gesture: Option<&str>) -> Result<()> {
    let url = resolve_target(target)?;
    let fetcher: Box<dyn DocumentFetcher> = if http || url.starts_with("http://") {
        Box::new(HttpFetcher)
    } else {
        Box::new(FileFetcher)
    };

    let mut viewer = ViewerWidget::new(ViewerConfig::default(), fetcher);
    viewer.load(&url)?;
    print_page(&viewer);

    if let Some(spec) = gesture {
        let (x, y, dt_ms) = parse_gesture(spec)?;
        viewer.handle_input(&InputEvent::PointerPress { x, y }, 0);
        viewer.handle_input(&InputEvent::PointerRelease { x, y }, dt_ms);
        println!();
        println!("after a {dt_ms} ms press released at ({x}, {y}):");
        print_page(&viewer);
    }
    Ok(())
}

/// Turn a command line target into a url. Anything without a scheme is
/// taken as a local file and canonicalized.
fn resolve_target(target: &str) -> Result<String> {
    if target.contains("://") {
        return Ok(target.to_string());
    }
    let path = fs::canonicalize(target).with_context(|| format!("could not resolve {target}"))?;
    Ok(format!("file://{}", path.display()))
}

/// Parse `--gesture X,Y,MS`.
fn parse_gesture(spec: &str) -> Result<(i32, i32, u64)> {
    let parts: Vec<&str> = spec.split(',').collect();
    let [x, y, dt_ms] = parts.as_slice() else {
        bail!("gesture must be X,Y,MS (got {spec:?})");
    };
    Ok((
        x.trim().parse().context("gesture x is not a number")?,
        y.trim().parse().context("gesture y is not a number")?,
        dt_ms.trim().parse().context("gesture duration is not a number")?,
    ))
}

fn print_page(viewer: &ViewerWidget) {
    if let Some(banner) = viewer.error_banner() {
        println!("error: {banner}");
        return;
    }
    println!("page:     {}", viewer.current_url().unwrap_or("-"));
    println!("title:    {}", viewer.title().unwrap_or("-"));
    print_nav_targets(viewer);
    print_exif(viewer);
}

fn print_nav_targets(viewer: &ViewerWidget) {
    let Some(doc) = viewer.document() else {
        return;
    };
    for (zone, label) in [
        (Zone::Previous, "previous:"),
        (Zone::Parent, "parent:  "),
        (Zone::Next, "next:    "),
    ] {
        let target = viewer
            .refs()
            .link_for_zone(zone)
            .and_then(|link| doc.element(link))
            .and_then(|a| a.href());
        println!("{label} {}", target.unwrap_or("-"));
    }
}

/// Print the injected EXIF rows, when the page has any.
fn print_exif(viewer: &ViewerWidget) {
    if !viewer.panel().has_table() {
        return;
    }
    let Some(doc) = viewer.document() else {
        return;
    };
    let visibility = if viewer.panel().is_visible() {
        "visible"
    } else {
        "hidden"
    };
    println!("exif ({visibility}):");
    for tr in doc.find_all("tr") {
        let cells: Vec<String> = doc
            .get(tr)
            .children
            .iter()
            .filter(|id| {
                doc.element(**id)
                    .is_some_and(|e| e.tag == "th" || e.tag == "td")
            })
            .map(|id| doc.text_content(*id).trim().to_string())
            .collect();
        if let [field, value] = cells.as_slice() {
            println!("  {field}: {value}");
        }
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

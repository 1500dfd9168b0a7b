//! inspect_report.rs: dry-run extraction on a local bulletin PDF.
//!
//! Prints, per page, which layouts its title matches and whether a table grid
//! was found, then the number of dated points each series would receive and
//! its first/last resolved date. Reads nothing from and writes nothing to the
//! data directory.

use anyhow::{Context, Result};
use std::{env, fs, path::Path, process::exit};
use udapescraper::{
    document::open_document,
    extract::{classify::classify_page, Layout},
    pipeline::{extract_layout, route_pages},
};

fn main() {
    // Expect exactly one CLI argument: path to a bulletin PDF.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <REPORT_PDF>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect_report(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn inspect_report(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let pages = open_document(&bytes)?;

    println!("=== Report: {} ({} pages) ===", path.display(), pages.len());
    for page in &pages {
        let layouts: Vec<&str> = classify_page(&page.text)
            .iter()
            .map(|l| l.as_str())
            .collect();
        let grid = match &page.grid {
            Some(g) => format!("{} grid rows", g.len()),
            None => "no grid".to_string(),
        };
        println!("- page {:>3} | {:<20} | {}", page.number, layouts.join(","), grid);
    }
    println!();

    let (daily, cumulative) = route_pages(&pages);
    for (layout, layout_pages) in [
        (Layout::Daily, daily),
        (Layout::Cumulative, cumulative),
    ] {
        println!("=== {} layout ({} pages) ===", layout.as_str(), layout_pages.len());
        match extract_layout(&layout_pages, layout) {
            Ok(series) => {
                for (name, points) in series {
                    let span = match (points.first(), points.last()) {
                        (Some((first, _)), Some((last, _))) => format!("{} → {}", first, last),
                        _ => "empty".to_string(),
                    };
                    println!("- {:<24} | {:>5} points | {}", name, points.len(), span);
                }
            }
            Err(e) => println!("! {:#}", e),
        }
        println!();
    }
    Ok(())
}

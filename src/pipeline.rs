// src/pipeline.rs

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rayon::prelude::*;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::Config;
use crate::document::{open_document, Page};
use crate::error::Error;
use crate::extract::{
    classify::classify_page,
    grouping::{align_rows, group_rows, RoleColumns},
    merge::merge_series,
    resolve_points, Layout,
};
use crate::fetch::{discover_latest, download_report};
use crate::series::{Counts, Series, SeriesName};
use crate::store::SeriesStore;

/// What a run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Persisted data already covers the latest bulletin.
    UpToDate {
        latest: NaiveDate,
        persisted: NaiveDate,
    },
    /// All series were rebuilt and saved through `as_of`.
    Updated { as_of: NaiveDate },
}

/// One full update: discover, compare, download, extract, merge, save.
pub async fn run(client: &Client, cfg: &Config) -> Result<Outcome> {
    let report = discover_latest(client, cfg)
        .await
        .context("discovering latest report")?;

    let store = SeriesStore::new(&cfg.data_dir)?;
    let persisted = persisted_through(&store)?;
    if let Some(persisted) = persisted {
        if report.as_of <= persisted {
            info!(latest = %report.as_of, %persisted, "already up to date");
            return Ok(Outcome::UpToDate {
                latest: report.as_of,
                persisted,
            });
        }
    }
    info!(as_of = %report.as_of, persisted = ?persisted, "new report available");

    let bytes = download_report(client, &report.url)
        .await
        .context("downloading report")?;
    let pages = open_document(&bytes).with_context(|| format!("opening {}", report.filename))?;

    let all = build_all(&pages, report.as_of, &store)?;
    store.save_all(&all)?;
    Ok(Outcome::Updated { as_of: report.as_of })
}

/// Earliest last date across all persisted series, or `None` if any series is missing or empty.
pub fn persisted_through(store: &SeriesStore) -> Result<Option<NaiveDate>> {
    let mut earliest: Option<NaiveDate> = None;
    for name in SeriesName::ALL {
        match store.last_date(name)? {
            None => {
                debug!(series = %name, "series has no data");
                return Ok(None);
            }
            Some(last) => earliest = Some(earliest.map_or(last, |e| e.min(last))),
        }
    }
    Ok(earliest)
}

/// Pages of each layout, in document order. A page can land in both lists.
pub fn route_pages(pages: &[Page]) -> (Vec<&Page>, Vec<&Page>) {
    let layouts: Vec<Vec<Layout>> = pages.par_iter().map(|p| classify_page(&p.text)).collect();

    let mut daily = Vec::new();
    let mut cumulative = Vec::new();
    for (page, matched) in pages.iter().zip(layouts) {
        for layout in matched {
            debug!(page = page.number, layout = layout.as_str(), "routed page");
            match layout {
                Layout::Daily => daily.push(page),
                Layout::Cumulative => cumulative.push(page),
            }
        }
    }
    (daily, cumulative)
}

/// Group every page of one layout and resolve each role into dated counts.
pub fn extract_layout(
    pages: &[&Page],
    layout: Layout,
) -> Result<Vec<(SeriesName, Vec<(NaiveDate, Counts)>)>> {
    if pages.is_empty() {
        bail!("no {} pages found in report", layout.as_str());
    }

    let mut columns = RoleColumns::new(layout);
    for page in pages {
        let ctx = || format!("{} layout, page {}", layout.as_str(), page.number);
        let grid = page
            .grid
            .as_ref()
            .ok_or(Error::MissingTable { page: page.number })
            .with_context(ctx)?;
        let rows = align_rows(grid, page.number).with_context(ctx)?;
        let roles = group_rows(&rows, layout).with_context(ctx)?;
        debug!(page = page.number, blocks = roles[0].len(), "grouped page");
        columns.push_page(roles);
    }

    columns
        .into_chronological()
        .into_iter()
        .map(|(name, points)| -> Result<(SeriesName, Vec<(NaiveDate, Counts)>)> {
            let resolved = resolve_points(&points).with_context(|| format!("resolving {}", name))?;
            info!(series = %name, points = resolved.len(), "extracted series");
            Ok((name, resolved))
        })
        .collect()
}

/// Build every output series from the document and the persisted baselines.
/// Nothing is written here.
pub fn build_all(
    pages: &[Page],
    as_of: NaiveDate,
    store: &SeriesStore,
) -> Result<Vec<(SeriesName, Series)>> {
    let (daily, cumulative) = route_pages(pages);
    info!(
        daily = daily.len(),
        cumulative = cumulative.len(),
        "classified pages"
    );

    let mut out = Vec::with_capacity(SeriesName::ALL.len());
    for (layout, layout_pages) in [(Layout::Daily, daily), (Layout::Cumulative, cumulative)] {
        for (name, fresh) in extract_layout(&layout_pages, layout)? {
            let baseline = store.load(name)?;
            let merged = merge_series(&fresh, &baseline, as_of);
            debug!(series = %name, dates = merged.len(), "merged series");
            out.push((name, merged));
        }
    }
    Ok(out)
}

// src/fetch/listing.rs

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};
use url::Url;

use super::ReportIdentity;
use crate::config::Config;
use crate::error::{Error, Result};

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

static REPORT_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#table1 li a").expect("Invalid CSS selector for report links"));

/// Resolve the newest bulletin linked from the listing page.
#[instrument(level = "info", skip_all, fields(listing = %cfg.listing_url))]
pub async fn discover_latest(client: &Client, cfg: &Config) -> Result<ReportIdentity> {
    let html = get_listing(client, &cfg.listing_url).await?;
    let filename = latest_report_name(&html).ok_or_else(|| Error::Fetch {
        url: cfg.listing_url.clone(),
        reason: "no report link in listing".into(),
    })?;
    let base = Url::parse(&cfg.report_base_url).map_err(|e| Error::Fetch {
        url: cfg.report_base_url.clone(),
        reason: e.to_string(),
    })?;
    let id = ReportIdentity::from_filename(&filename, &base)?;
    info!(filename = %id.filename, as_of = %id.as_of, "latest report");
    Ok(id)
}

/// Filename (last path segment) of the first link in the listing's report list.
pub fn latest_report_name(html: &str) -> Option<String> {
    Html::parse_document(html)
        .select(&REPORT_LINKS)
        .filter_map(|a| a.value().attr("href"))
        .next()
        .and_then(|href| href.trim().rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

async fn get_listing(client: &Client, url: &str) -> Result<String> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = async {
            client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await;

        match result {
            Ok(html) => return Ok(html),
            Err(e) if attempt < MAX_RETRIES => {
                warn!(%url, attempt, error = %e, "listing fetch failed, retrying");
                sleep(RETRY_DELAY).await;
            }
            Err(e) => {
                return Err(Error::Fetch {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

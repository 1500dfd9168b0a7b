// src/fetch/download.rs

use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use crate::error::{Error, Result};

/// Download the bulletin in a single attempt; any transport failure or non-2xx status is fatal.
#[instrument(level = "info", skip_all, fields(url = %url))]
pub async fn download_report(client: &Client, url: &Url) -> Result<Vec<u8>> {
    let fail = |e: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(fail)?
        .error_for_status()
        .map_err(fail)?;
    let bytes = resp.bytes().await.map_err(fail)?;
    info!(bytes = bytes.len(), "downloaded report");
    Ok(bytes.to_vec())
}

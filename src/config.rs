// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// File read when `UDAPE_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "udape.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page that links the latest bulletin.
    pub listing_url: String,
    /// Directory URL the bulletin filename is joined onto.
    pub report_base_url: String,
    /// Where the series CSV files live.
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: "https://www.udape.gob.bo/index.php?option=com_content&view=article&id=220:reporte-covid-19&catid=41".into(),
            report_base_url: "https://www.udape.gob.bo/portales_html/ReporteCOVID/R_diario/".into(),
            data_dir: PathBuf::from("."),
            request_timeout_secs: 60,
            log_filter: "info".into(),
        }
    }
}

impl Config {
    /// `$UDAPE_CONFIG`, else `udape.yaml` if present, else defaults; then `$UDAPE_DATA_DIR`.
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var("UDAPE_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };
        if let Ok(dir) = env::var("UDAPE_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

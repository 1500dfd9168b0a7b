use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use udapescraper::{
    config::Config,
    pipeline::{self, Outcome},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) config ───────────────────────────────────────────────────
    let cfg = Config::load()?;

    // ─── 2) init logging ─────────────────────────────────────────────
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
    info!(data_dir = %cfg.data_dir.display(), "startup");

    // ─── 3) http client ──────────────────────────────────────────────
    let client = Client::builder()
        .timeout(cfg.request_timeout())
        .build()
        .context("building HTTP client")?;

    // ─── 4) one pass ─────────────────────────────────────────────────
    match pipeline::run(&client, &cfg).await {
        Ok(Outcome::Updated { as_of }) => {
            info!(%as_of, "series updated");
            println!("{}", as_of.format("%Y-%m-%d"));
            Ok(())
        }
        Ok(Outcome::UpToDate { latest, persisted }) => {
            info!(%latest, %persisted, "nothing to do");
            Ok(())
        }
        Err(e) => {
            error!("update failed: {:#}", e);
            Err(e)
        }
    }
}

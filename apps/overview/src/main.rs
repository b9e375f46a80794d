use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{HttpPhotoClient, PhotoFeed};
use futures::StreamExt;
use shared::domain::ApiStatus;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod report;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use report::OverviewReport;

/// Fetches the Mars photo list and prints it once loading settles.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Overrides the configured API base URL.
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the result as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(api_base_url) = args.api_base_url {
        settings.api_base_url = api_base_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }
    let settings = settings.validated()?;

    let client = HttpPhotoClient::new(&settings.api_base_url, settings.request_timeout())?;
    info!(endpoint = %client.endpoint(), timeout_secs = settings.request_timeout_secs, "fetching photos");

    let feed = PhotoFeed::new(Arc::new(client));
    let mut statuses = feed.status_stream();
    while let Some(status) = statuses.next().await {
        info!(%status, "photo feed status");
        if status.is_settled() {
            break;
        }
    }

    let status = feed.status();
    let photos = feed.photos();
    let report = OverviewReport::new(status, &photos);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_text().trim_end());
    }

    if status == ApiStatus::Error {
        bail!("photo list could not be loaded");
    }
    Ok(())
}

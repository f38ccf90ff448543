mod browser;
mod config;
mod error;
mod export;
mod logging;
mod scraper;
mod session;
mod utils;

use crate::browser::{Browser, SnapshotBrowser};
use crate::config::Config;
use crate::error::Result;
use crate::export::{to_delimited_text, ExportSink};
use crate::logging::{init_logging, LoggerConfig};
use crate::scraper::{Markers, Scraper};
use crate::session::Session;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load(CONFIG_PATH)?;
    init_logging(LoggerConfig::try_from(&config.logging)?)?;

    log_info!("[main] Starting review scraper...");
    if Path::new(CONFIG_PATH).exists() {
        log_info!("[main] Configuration loaded from {}", CONFIG_PATH);
    } else {
        log_info!("[main] No {} found, using default configuration", CONFIG_PATH);
    }

    if let Err(e) = run(&config).await {
        log_error!(e => "[main] Scrape failed, no export written");
        return Err(e);
    }
    Ok(())
}

async fn run(config: &Config) -> Result<()> {
    let markers = Markers::new()?;
    let mut browser =
        SnapshotBrowser::open(&config.browser.snapshot_dir, &config.browser.file_pattern)?;

    let session = Session::new(&markers, config.pagination.clone());
    let outcome = session.scrape_all(&mut browser).await?;

    // The heading is the same on every page; read it from whatever is rendered now.
    let html = browser.current_html().await?;
    let subject = Scraper::new(&html, &markers).page().subject_name();
    if let Some(path) = browser.current_path() {
        log_info!("[main] Listing ended on {}", path.display());
    }

    let table = to_delimited_text(&outcome.records)?;
    let sink = ExportSink::from_config(&config.export);
    let (path, _) = sink.export(&subject, &table, &outcome.records)?;

    log_info!(
        "[main] Exported {} reviews ({} with text) from {}/{} pages for {} to {:?} (dir {})",
        outcome.records.len(),
        outcome.reviews_with_text(),
        outcome.pages_scraped,
        outcome.total_pages,
        subject,
        path,
        sink.output_dir().display()
    );
    match outcome.mean_average_rating() {
        Some(overall) => log_info!("[main] Overall average rating {:.2}", overall),
        None => log_debug!("[main] No overall average rating on the listing"),
    }
    match (outcome.mean_rating(), outcome.mean_nights()) {
        (Some(rating), Some(nights)) => {
            log_info!("[main] Mean review rating {:.2}, mean stay {:.1} nights", rating, nights)
        }
        (Some(rating), None) => log_info!("[main] Mean review rating {:.2}", rating),
        _ => log_debug!("[main] No numeric review ratings collected"),
    }

    Ok(())
}

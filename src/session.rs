use crate::browser::Browser;
use crate::config::{PaginationConfig, WaitStrategy};
use crate::error::Result;
use crate::scraper::{markers, Markers, PageInfo, ReviewRecord, Scraper};
use crate::{log_debug, log_error, log_info, log_warn};
use tokio::time::{sleep, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every discovered page was scraped.
    Completed,
    /// A page before the last had no next-page control to activate.
    NoNextControl,
    /// The next page did not render within the readiness timeout.
    NotReady,
}

#[derive(Debug)]
pub struct ScrapeOutcome {
    pub records: Vec<ReviewRecord>,
    pub total_pages: usize,
    pub pages_scraped: usize,
    pub stop: StopReason,
}

impl ScrapeOutcome {
    /// Mean of the page-level "Overall Average Rating" column, the per-listing
    /// score the dataset statistics are built from.
    pub fn mean_average_rating(&self) -> Option<f64> {
        mean(self.records.iter().filter_map(ReviewRecord::average_rating_value))
    }

    /// Reviews with a non-empty negative or positive text.
    pub fn reviews_with_text(&self) -> usize {
        self.records.iter().filter(|r| r.has_text()).count()
    }

    /// Mean of the per-review ratings that parsed as numbers.
    pub fn mean_rating(&self) -> Option<f64> {
        mean(self.records.iter().filter_map(ReviewRecord::rating_value))
    }

    pub fn mean_nights(&self) -> Option<f64> {
        mean(
            self.records
                .iter()
                .filter_map(ReviewRecord::nights_value)
                .map(f64::from),
        )
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Drives one scrape across every page of a listing, strictly in order.
pub struct Session<'m> {
    markers: &'m Markers,
    pagination: PaginationConfig,
}

impl<'m> Session<'m> {
    pub fn new(markers: &'m Markers, pagination: PaginationConfig) -> Self {
        Self {
            markers,
            pagination,
        }
    }

    #[tracing::instrument(name = "scrape_session", skip_all)]
    pub async fn scrape_all<B: Browser>(&self, browser: &mut B) -> Result<ScrapeOutcome> {
        let mut html = browser.current_html().await?;
        let mut pages: Vec<Vec<ReviewRecord>> = Vec::new();
        let mut total_pages = 1;

        let stop = loop {
            let page_number = pages.len() + 1;
            let (records, info) = self.read_page(&html);
            if page_number == 1 {
                total_pages = info.total_pages;
                log_info!("[session] Total pages: {}", total_pages);
            }
            log_info!(
                "[session] Page {}/{}: {} reviews",
                page_number,
                total_pages,
                records.len()
            );
            pages.push(records);

            if page_number >= total_pages {
                break StopReason::Completed;
            }
            if !info.has_next {
                log_warn!(
                    "[session] No next-page control on page {}, stopping early",
                    page_number
                );
                break StopReason::NoNextControl;
            }
            if let Err(e) = browser.click(markers::NEXT_PAGE).await {
                log_error!(e => "[session] Could not activate next-page control");
                break StopReason::NoNextControl;
            }

            match self.wait_for_next_page(browser, info.fingerprint).await? {
                Some(next) => html = next,
                None => {
                    log_warn!(
                        "[session] Page {} did not render within {:?}, stopping early",
                        page_number + 1,
                        self.pagination.ready_timeout()
                    );
                    break StopReason::NotReady;
                }
            }
        };

        let pages_scraped = pages.len();
        let records = pages.concat();
        log_info!(
            "[session] Finished after {}/{} pages ({:?}), {} reviews collected",
            pages_scraped,
            total_pages,
            stop,
            records.len()
        );

        Ok(ScrapeOutcome {
            records,
            total_pages,
            pages_scraped,
            stop,
        })
    }

    fn read_page(&self, html: &str) -> (Vec<ReviewRecord>, PageInfo) {
        let scraper = Scraper::new(html, self.markers);
        let page = scraper.page();
        (page.scrape_page(), page.analyze())
    }

    /// Returns the newly rendered document, or `None` if it never settled.
    async fn wait_for_next_page<B: Browser>(
        &self,
        browser: &mut B,
        previous: u64,
    ) -> Result<Option<String>> {
        match self.pagination.wait_strategy {
            WaitStrategy::Fixed => {
                sleep(self.pagination.settle_interval()).await;
                Ok(Some(browser.current_html().await?))
            }
            WaitStrategy::Poll => self.poll_until_ready(browser, previous).await,
        }
    }

    async fn poll_until_ready<B: Browser>(
        &self,
        browser: &mut B,
        previous: u64,
    ) -> Result<Option<String>> {
        let deadline = Instant::now() + self.pagination.ready_timeout();
        let mut delay = self.pagination.poll_initial();
        let mut attempt = 1;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            sleep(delay.min(remaining)).await;

            let html = browser.current_html().await?;
            if self.is_new_page(&html, previous) {
                log_debug!("[session] Next page ready after {} polls", attempt);
                return Ok(Some(html));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }

            delay = (delay * 2).min(self.pagination.poll_max());
            attempt += 1;
        }
    }

    fn is_new_page(&self, html: &str, previous: u64) -> bool {
        let info = Scraper::new(html, self.markers).page().analyze();
        info.record_count > 0 && info.fingerprint != previous
    }
}

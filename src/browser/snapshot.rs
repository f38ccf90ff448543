use super::Browser;
use crate::error::{BrowserError, Result};
use crate::scraper::markers;
use crate::utils;
use crate::{log_debug, log_info};
use scraper::Html;
use std::path::{Path, PathBuf};

const NEXT_PAGE_LABEL: &str = "Next page";

/// Replays saved page snapshots as if they were one live listing.
///
/// The current snapshot is the rendered document. Activating the next-page
/// control moves to the following snapshot; past the last one the document
/// stays as it is, the same way a real listing ignores a dead control.
#[derive(Debug)]
pub struct SnapshotBrowser {
    pages: Vec<(PathBuf, String)>,
    current: usize,
}

impl SnapshotBrowser {
    /// Loads every file in `dir` matching `pattern`, ordered by the page
    /// number in its name.
    pub fn open(dir: impl AsRef<Path>, pattern: &str) -> Result<Self> {
        let full_pattern = dir.as_ref().join(pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let paths = glob::glob(&full_pattern)
            .map_err(|e| BrowserError::Pattern(format!("{}: {}", full_pattern, e)))?;

        let mut pages = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| BrowserError::Pattern(e.to_string()))?;
            if !path.is_file() {
                continue;
            }
            let html = utils::read_lossy(&path)?;
            pages.push((path, html));
        }

        if pages.is_empty() {
            return Err(BrowserError::NoSnapshots(full_pattern.into_owned()).into());
        }

        pages.sort_by_key(|(path, _)| utils::page_number(path).unwrap_or(0));

        log_info!(
            "[browser] Loaded {} snapshots from {}",
            pages.len(),
            dir.as_ref().display()
        );
        Ok(Self { pages, current: 0 })
    }

    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, html)| (PathBuf::from(format!("page-{}.html", i + 1)), html.into()))
            .collect();
        Self { pages, current: 0 }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.pages.get(self.current).map(|(path, _)| path.as_path())
    }

    fn current_document(&self) -> &str {
        self.pages
            .get(self.current)
            .map(|(_, html)| html.as_str())
            .unwrap_or_default()
    }
}

impl Browser for SnapshotBrowser {
    async fn current_html(&mut self) -> Result<String> {
        Ok(self.current_document().to_string())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let parsed = markers::parse(selector)?;
        let document = Html::parse_document(self.current_document());
        let target = document
            .select(&parsed)
            .next()
            .ok_or_else(|| BrowserError::ElementNotFound(selector.to_string()))?;

        if target.value().attr("aria-label") != Some(NEXT_PAGE_LABEL) {
            log_debug!("[browser] Click on {} does not navigate", selector);
            return Ok(());
        }

        if self.current + 1 < self.pages.len() {
            self.current += 1;
            log_debug!(
                "[browser] Navigated to snapshot {}/{}",
                self.current + 1,
                self.pages.len()
            );
        } else {
            log_debug!("[browser] Next page clicked on the last snapshot");
        }
        Ok(())
    }
}

mod fields;
pub mod markers;
mod page;
mod record;

pub use markers::Markers;
pub use page::{PageInfo, PageScraper};
pub use record::{ReviewRecord, COLUMNS};

use scraper::Html;

/// A parsed snapshot of the rendered listing.
pub struct Scraper<'m> {
    document: Html,
    markers: &'m Markers,
}

impl<'m> Scraper<'m> {
    pub fn new(html: &str, markers: &'m Markers) -> Self {
        Self {
            document: Html::parse_document(html),
            markers,
        }
    }

    pub fn page(&self) -> PageScraper<'_> {
        PageScraper::new(&self.document, self.markers)
    }
}

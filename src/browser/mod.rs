mod snapshot;

pub use snapshot::SnapshotBrowser;

use crate::error::Result;

/// The rendered listing the scraper reads from and navigates.
///
/// Implementations own the live document. `current_html` must reflect
/// whatever has rendered so far, so a page that is still loading may
/// return stale content; callers decide when a page is ready.
pub trait Browser {
    async fn current_html(&mut self) -> Result<String>;

    /// Activates the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> Result<()>;
}

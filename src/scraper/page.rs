use super::fields::FieldExtractor;
use super::markers::Markers;
use super::record::ReviewRecord;
use crate::log_debug;
use scraper::{ElementRef, Html};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const DEFAULT_SUBJECT: &str = "unknown_hotel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub total_pages: usize,
    pub has_next: bool,
    pub record_count: usize,
    /// Hash of the record area; changes whenever a different page is rendered.
    pub fingerprint: u64,
}

pub struct PageScraper<'a> {
    document: &'a Html,
    markers: &'a Markers,
}

impl<'a> PageScraper<'a> {
    pub(crate) fn new(document: &'a Html, markers: &'a Markers) -> Self {
        Self { document, markers }
    }

    pub fn analyze(&self) -> PageInfo {
        let info = PageInfo {
            total_pages: self.total_pages(),
            has_next: self.has_next(),
            record_count: self.cards().count(),
            fingerprint: self.fingerprint(),
        };

        log_debug!(
            "[page] Analysis - Total: {}, Records: {}, Next: {}",
            info.total_pages,
            info.record_count,
            info.has_next
        );

        info
    }

    /// All review cards in document order, each tagged with the page's
    /// aggregate rating.
    pub fn scrape_page(&self) -> Vec<ReviewRecord> {
        let average_rating = self.aggregate_rating();
        let extractor = FieldExtractor::new(self.markers);

        self.cards()
            .map(|card| ReviewRecord {
                average_rating: average_rating.clone(),
                ..extractor.extract_record(card)
            })
            .collect()
    }

    pub fn aggregate_rating(&self) -> String {
        self.document
            .select(&self.markers.aggregate_rating)
            .next()
            .and_then(|el| {
                let text = el.text().collect::<String>();
                self.markers.first_number(text.trim()).map(str::to_string)
            })
            .unwrap_or_default()
    }

    /// Highest numeric page button in the navigation list, or 1 when there
    /// is no list or no numeric button.
    pub fn total_pages(&self) -> usize {
        let Some(list) = self.document.select(&self.markers.pagination_list).next() else {
            log_debug!("[page] Pagination container not found");
            return 1;
        };

        list.select(&self.markers.page_button)
            .filter_map(|button| {
                button
                    .text()
                    .collect::<String>()
                    .trim()
                    .parse::<usize>()
                    .ok()
            })
            .max()
            .unwrap_or(1)
            .max(1)
    }

    pub fn has_next(&self) -> bool {
        self.document.select(&self.markers.next_page).next().is_some()
    }

    /// Page heading with whitespace runs collapsed to `_`, safe for use in a
    /// file name.
    pub fn subject_name(&self) -> String {
        self.document
            .select(&self.markers.subject_heading)
            .next()
            .map(|el| sanitize_subject(&el.text().collect::<String>()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
    }

    fn cards(&self) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.document.select(&self.markers.review_card)
    }

    /// Hash of the review cards only. Navigation can re-render before the
    /// cards do, so it must not count towards a page change.
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for card in self.cards() {
            for text in card.text() {
                text.hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

pub fn sanitize_subject(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                    c if c.is_control() => '_',
                    c => c,
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_html(cards: &[&str], nav: Option<&[&str]>, next: bool) -> String {
        let cards = cards
            .iter()
            .map(|title| {
                format!(
                    r#"<li><div data-testid="review-card"><h3 data-testid="review-title">{}</h3></div></li>"#,
                    title
                )
            })
            .collect::<String>();
        let nav = nav
            .map(|labels| {
                let items = labels
                    .iter()
                    .map(|l| format!("<li><button>{}</button></li>", l))
                    .collect::<String>();
                format!(r#"<div role="navigation"><ol>{}</ol></div>"#, items)
            })
            .unwrap_or_default();
        let next = if next {
            r#"<button aria-label="Next page">Next</button>"#
        } else {
            ""
        };
        format!(
            r#"<html><body>
              <h2 class="pp-header__title">Hotel   Las Palmas</h2>
              <div data-testid="review-score-component">Scored 8.4 · 1,203 reviews</div>
              <ul>{}</ul>{}{}
            </body></html>"#,
            cards, nav, next
        )
    }

    fn with_page<T>(html: &str, f: impl FnOnce(PageScraper) -> T) -> T {
        let markers = Markers::new().unwrap();
        let document = Html::parse_document(html);
        f(PageScraper::new(&document, &markers))
    }

    #[test]
    fn scrapes_cards_in_document_order_with_aggregate() {
        let html = page_html(&["first", "second", "third"], None, false);
        let records = with_page(&html, |page| page.scrape_page());

        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["first", "second", "third"]);
        assert!(records.iter().all(|r| r.average_rating == "8.4"));
    }

    #[test]
    fn missing_aggregate_is_empty() {
        let html = r#"<div data-testid="review-card"><h3 data-testid="review-title">x</h3></div>"#;
        let records = with_page(html, |page| page.scrape_page());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].average_rating, "");
    }

    #[test]
    fn aggregate_without_digits_is_empty() {
        let html = r#"<div data-testid="review-score-component">Exceptional</div>
            <div data-testid="review-card"><div data-testid="review-score">9.6</div></div>"#;
        let records = with_page(html, |page| page.scrape_page());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, "9.6");
        assert_eq!(records[0].average_rating, "");
    }

    #[test]
    fn page_without_cards_yields_nothing() {
        let html = page_html(&[], None, false);
        assert!(with_page(&html, |page| page.scrape_page()).is_empty());
    }

    #[test]
    fn total_pages_is_highest_numeric_button() {
        let html = page_html(&["a"], Some(&["1", "2", "…", "5"][..]), true);
        assert_eq!(with_page(&html, |page| page.total_pages()), 5);
    }

    #[test]
    fn total_pages_defaults_to_one() {
        let no_nav = page_html(&["a"], None, false);
        assert_eq!(with_page(&no_nav, |page| page.total_pages()), 1);

        let no_numbers = page_html(&["a"], Some(&["…", "Prev"][..]), false);
        assert_eq!(with_page(&no_numbers, |page| page.total_pages()), 1);
    }

    #[test]
    fn analyze_reports_next_control_and_count() {
        let html = page_html(&["a", "b"], Some(&["1", "2"][..]), true);
        let info = with_page(&html, |page| page.analyze());
        assert_eq!(info.total_pages, 2);
        assert_eq!(info.record_count, 2);
        assert!(info.has_next);
    }

    #[test]
    fn fingerprint_tracks_record_area() {
        let a = page_html(&["a", "b"], Some(&["1", "2"][..]), true);
        let b = page_html(&["c", "d"], Some(&["1", "2"][..]), true);
        let fa = with_page(&a, |page| page.analyze().fingerprint);
        let fa_again = with_page(&a, |page| page.analyze().fingerprint);
        let fb = with_page(&b, |page| page.analyze().fingerprint);
        assert_eq!(fa, fa_again);
        assert_ne!(fa, fb);
    }

    #[test]
    fn fingerprint_ignores_navigation() {
        let before = page_html(&["a"], Some(&["1", "2", "3", "…", "9"][..]), true);
        let shifted = page_html(&["a"], Some(&["1", "2", "3", "4", "…", "9"][..]), true);
        assert_eq!(
            with_page(&before, |page| page.analyze().fingerprint),
            with_page(&shifted, |page| page.analyze().fingerprint)
        );
    }

    #[test]
    fn subject_name_collapses_whitespace() {
        let html = page_html(&[], None, false);
        assert_eq!(with_page(&html, |page| page.subject_name()), "Hotel_Las_Palmas");
    }

    #[test]
    fn subject_name_falls_back_to_default() {
        assert_eq!(with_page("<p>nothing</p>", |page| page.subject_name()), "unknown_hotel");
        assert_eq!(
            with_page(r#"<h2 class="pp-header__title">   </h2>"#, |page| page.subject_name()),
            "unknown_hotel"
        );
    }

    #[test]
    fn sanitize_subject_replaces_path_characters() {
        assert_eq!(sanitize_subject(" Inn \t of\n A/B: C "), "Inn_of_A_B__C");
    }
}

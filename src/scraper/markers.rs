use crate::error::{Result, ScraperError};
use regex::Regex;
use scraper::Selector;

pub const REVIEW_CARD: &str = r#"[data-testid="review-card"]"#;
pub const AGGREGATE_RATING: &str = r#"[data-testid="review-score-component"]"#;
pub const PAGINATION_LIST: &str = r#"div[role="navigation"] ol"#;
pub const PAGE_BUTTON: &str = "li button";
pub const NEXT_PAGE: &str = r#"button[aria-label="Next page"]"#;
pub const SUBJECT_HEADING: &str = "h2.pp-header__title";

pub const TITLE: &str = r#"[data-testid="review-title"]"#;
pub const NEGATIVE_TEXT: &str = r#"[data-testid="review-negative-text"]"#;
pub const POSITIVE_TEXT: &str = r#"[data-testid="review-positive-text"]"#;
pub const SCORE: &str = r#"[data-testid="review-score"]"#;
pub const STAY_DATE: &str = r#"[data-testid="review-stay-date"]"#;
pub const REVIEW_DATE: &str = r#"[data-testid="review-date"]"#;
pub const ROOM_NAME: &str = r#"[data-testid="review-room-name"]"#;
pub const NUM_NIGHTS: &str = r#"[data-testid="review-num-nights"]"#;
pub const TRAVELER_TYPE: &str = r#"[data-testid="review-traveler-type"]"#;

const NUMBER_PATTERN: &str = r"\d+(\.\d+)?";

/// Selectors inside a single review card.
#[derive(Debug, Clone)]
pub struct FieldSelectors {
    pub title: Selector,
    pub negative: Selector,
    pub positive: Selector,
    pub rating: Selector,
    pub stay_date: Selector,
    pub review_date: Selector,
    pub room_type: Selector,
    pub nights: Selector,
    pub traveler_type: Selector,
}

/// Every structural marker the scraper looks for, compiled once per session.
#[derive(Debug, Clone)]
pub struct Markers {
    pub review_card: Selector,
    pub aggregate_rating: Selector,
    pub pagination_list: Selector,
    pub page_button: Selector,
    pub next_page: Selector,
    pub subject_heading: Selector,
    pub fields: FieldSelectors,
    pub number: Regex,
}

impl Markers {
    pub fn new() -> Result<Self> {
        Ok(Self {
            review_card: parse(REVIEW_CARD)?,
            aggregate_rating: parse(AGGREGATE_RATING)?,
            pagination_list: parse(PAGINATION_LIST)?,
            page_button: parse(PAGE_BUTTON)?,
            next_page: parse(NEXT_PAGE)?,
            subject_heading: parse(SUBJECT_HEADING)?,
            fields: FieldSelectors {
                title: parse(TITLE)?,
                negative: parse(NEGATIVE_TEXT)?,
                positive: parse(POSITIVE_TEXT)?,
                rating: parse(SCORE)?,
                stay_date: parse(STAY_DATE)?,
                review_date: parse(REVIEW_DATE)?,
                room_type: parse(ROOM_NAME)?,
                nights: parse(NUM_NIGHTS)?,
                traveler_type: parse(TRAVELER_TYPE)?,
            },
            number: Regex::new(NUMBER_PATTERN)
                .map_err(|e| ScraperError::ParseError(format!("number pattern: {}", e)))?,
        })
    }

    /// First integer or decimal token in `text`.
    pub fn first_number<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.number.find(text).map(|m| m.as_str())
    }
}

pub fn parse(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ScraperError::SelectorError(format!("{}: {}", css, e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_markers_compile() {
        assert!(Markers::new().is_ok());
    }

    #[test]
    fn first_number_takes_leading_token() {
        let markers = Markers::new().unwrap();
        assert_eq!(markers.first_number("Scored 8.5 out of 10"), Some("8.5"));
        assert_eq!(markers.first_number("10"), Some("10"));
        assert_eq!(markers.first_number("7. Good"), Some("7"));
        assert_eq!(markers.first_number("Exceptional"), None);
    }

    #[test]
    fn bad_selector_is_a_selector_error() {
        let err = parse("div[").unwrap_err();
        assert!(err.to_string().contains("Selector error"));
    }
}

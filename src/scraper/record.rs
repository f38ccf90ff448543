use serde::{Deserialize, Serialize};

/// Export column headers, in row order.
pub const COLUMNS: [&str; 10] = [
    "Review Title",
    "Negative Reviews",
    "Positive Reviews",
    "Rating",
    "Stay Date",
    "Review Date",
    "Room Type",
    "Number of Nights",
    "Traveler Type",
    "Overall Average Rating",
];

/// One review card. Every field is plain text and empty when the page
/// did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub title: String,
    pub negative: String,
    pub positive: String,
    /// Numeric token as it appeared on the card, e.g. `"8.0"`.
    pub rating: String,
    pub stay_date: String,
    pub review_date: String,
    pub room_type: String,
    pub nights: String,
    pub traveler_type: String,
    /// Page-level score, identical for every record scraped from one page.
    pub average_rating: String,
}

impl ReviewRecord {
    pub fn rating_value(&self) -> Option<f64> {
        self.rating.parse().ok()
    }

    pub fn nights_value(&self) -> Option<u32> {
        self.nights.parse().ok()
    }

    pub fn average_rating_value(&self) -> Option<f64> {
        self.average_rating.parse().ok()
    }

    /// Whether the guest wrote anything in either review text.
    pub fn has_text(&self) -> bool {
        !self.negative.is_empty() || !self.positive.is_empty()
    }

    /// Fields in [`COLUMNS`] order.
    pub fn row(&self) -> [&str; 10] {
        [
            self.title.as_str(),
            self.negative.as_str(),
            self.positive.as_str(),
            self.rating.as_str(),
            self.stay_date.as_str(),
            self.review_date.as_str(),
            self.room_type.as_str(),
            self.nights.as_str(),
            self.traveler_type.as_str(),
            self.average_rating.as_str(),
        ]
    }
}

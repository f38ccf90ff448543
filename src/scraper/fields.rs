use super::markers::Markers;
use super::record::ReviewRecord;
use scraper::{ElementRef, Selector};

const REVIEWED_LABEL: &str = "Reviewed:";

/// Reads the named sub-fields of one review card. Missing or malformed
/// sub-fields come back as empty strings; extraction itself never fails.
pub struct FieldExtractor<'m> {
    markers: &'m Markers,
}

impl<'m> FieldExtractor<'m> {
    pub fn new(markers: &'m Markers) -> Self {
        Self { markers }
    }

    pub fn extract_record(&self, card: ElementRef) -> ReviewRecord {
        let fields = &self.markers.fields;

        ReviewRecord {
            title: self.text(&card, &fields.title),
            negative: self.text(&card, &fields.negative),
            positive: self.text(&card, &fields.positive),
            rating: self.number(&card, &fields.rating),
            stay_date: self.text(&card, &fields.stay_date),
            review_date: self
                .raw_text(&card, &fields.review_date)
                .map(|raw| strip_reviewed_label(&raw))
                .unwrap_or_default(),
            room_type: self.text(&card, &fields.room_type),
            nights: self
                .raw_text(&card, &fields.nights)
                .map(|raw| first_token(&raw))
                .unwrap_or_default(),
            traveler_type: self.text(&card, &fields.traveler_type),
            average_rating: String::new(),
        }
    }

    /// Text content of the first element in `card` matching `selector`.
    fn raw_text(&self, card: &ElementRef, selector: &Selector) -> Option<String> {
        card.select(selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    fn text(&self, card: &ElementRef, selector: &Selector) -> String {
        self.raw_text(card, selector)
            .map(|raw| normalize_text(&raw))
            .unwrap_or_default()
    }

    fn number(&self, card: &ElementRef, selector: &Selector) -> String {
        self.raw_text(card, selector)
            .and_then(|raw| self.markers.first_number(raw.trim()).map(str::to_string))
            .unwrap_or_default()
    }
}

/// Trims surrounding whitespace. Input is already valid UTF-8: snapshots are
/// decoded lossily when they are loaded, so there is nothing left to repair here.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn strip_reviewed_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_label = trimmed.strip_prefix(REVIEWED_LABEL).unwrap_or(trimmed);
    normalize_text(without_label)
}

pub fn first_token(raw: &str) -> String {
    raw.split_whitespace()
        .next()
        .map(normalize_text)
        .unwrap_or_default()
}

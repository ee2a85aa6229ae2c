use crate::schema::NO_RECOMMENDATION;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Searched in this order; the first marker present anywhere wins
pub const RECOMMENDATION_MARKERS: [&str; 5] =
    ["recommend", "best idea", "I recommend", "Recommendation", "overall"];

static MARKER_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    RECOMMENDATION_MARKERS
        .iter()
        .map(|marker| {
            let pattern = format!("(?i){}", regex::escape(marker));
            (*marker, Regex::new(&pattern).expect("valid marker regex"))
        })
        .collect()
});

const PARAGRAPH_BREAK: &str = "\n\n";

/// Paragraph holding the first recommendation marker, or a fixed sentinel.
///
/// The paragraph runs from the start of the marker's line to the next blank
/// line (or the end of the text).
pub fn locate(text: &str) -> String {
    let found = MARKER_PATTERNS
        .iter()
        .find_map(|(marker, re)| re.find(text).map(|m| (*marker, m.start())));

    let Some((marker, start)) = found else {
        warn!("No recommendation marker found");
        return NO_RECOMMENDATION.to_string();
    };

    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let rest = &text[line_start..];
    let paragraph = match rest.find(PARAGRAPH_BREAK) {
        Some(end) => &rest[..end],
        None => rest,
    };

    debug!(marker, offset = start, "Located recommendation");
    paragraph.trim().to_string()
}

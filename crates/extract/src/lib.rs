pub mod error;
pub mod payload;
pub mod recommendation;
pub mod schema;
pub mod segmenter;
pub mod values;

pub use error::UnescapeError;
pub use payload::unwrap_payload;
pub use recommendation::locate;
pub use schema::{ExtractionResult, FALLBACK_TITLE, IdeaRecord, NO_RECOMMENDATION};
pub use segmenter::segment;

use tracing::debug;

/// Turns raw model output into idea records.
///
/// Holds no state, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Unwrap the payload, then segment ideas and locate the recommendation.
    ///
    /// Never fails; malformed input degrades to fallback values.
    pub fn extract(&self, raw: &str) -> ExtractionResult {
        let text = unwrap_payload(raw);

        let ideas = segment(&text);
        let recommendation = locate(&text);

        debug!(
            raw_bytes = raw.len(),
            ideas = ideas.len(),
            "Extracted ideas from response"
        );

        ExtractionResult {
            ideas,
            recommendation,
        }
    }
}

/// Shorthand for `Extractor::new().extract(raw)`
pub fn extract(raw: &str) -> ExtractionResult {
    Extractor::new().extract(raw)
}

use serde::{Deserialize, Serialize};

/// Title given to the single record produced when no idea markers are found
pub const FALLBACK_TITLE: &str = "Raw AI Response";

/// Recommendation returned when the text names none
pub const NO_RECOMMENDATION: &str = "No recommendation provided.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub profit_outlook: String, // free-form, e.g. "15%"
    #[serde(default)]
    pub risk_level: String,
}

impl IdeaRecord {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub ideas: Vec<IdeaRecord>,
    pub recommendation: String,
}

impl ExtractionResult {
    /// Result for callers that never got a response to extract from.
    ///
    /// Keeps the document shape intact so a client can still render it.
    pub fn failure(reason: impl std::fmt::Display) -> Self {
        Self {
            ideas: vec![IdeaRecord {
                description: format!("Failed to generate ideas: {}", reason),
                ..IdeaRecord::titled("Error")
            }],
            recommendation: "Please try again later.".to_string(),
        }
    }
}

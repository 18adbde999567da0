use garde::Validate;
use serde::{Deserialize, Serialize};

/// A request to classify a movie description into genres.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClassificationRequest {
    /// Free-text movie description or synopsis. Must be non-empty; the upper
    /// bound is enforced separately against the configured limit.
    #[garde(length(min = 1))]
    pub description: String,
}

/// A genre label accepted from the model output, with its similarity to the
/// canonical taxonomy entry it was matched to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreLabel {
    pub label: String,
    pub similarity: f64,
}

/// Result of classifying a description.
///
/// `confidence` is the mean similarity of the accepted labels, not a model
/// probability. Repeated calls with the same input may produce different
/// labels; the model is not deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub genres: Vec<GenreLabel>,
    pub confidence: f64,
    /// Raw model output, kept so an empty `genres` list is still diagnosable.
    pub raw_response: String,
}

impl ClassificationResult {
    /// Labels only, without scores.
    pub fn labels(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.label.as_str()).collect()
    }
}

/// Outcome of classifying a randomly drawn catalog movie and comparing the
/// prediction with the genres recorded in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleOutcome {
    pub title: String,
    pub catalog_genres: Vec<String>,
    pub prediction: ClassificationResult,
    /// Predicted labels that also appear in the catalog genres.
    pub overlap: Vec<String>,
    pub matches_catalog: bool,
}

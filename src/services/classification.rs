use tracing::debug;

use crate::models::classification::{ClassificationResult, GenreLabel};
use crate::services::genres;
use crate::services::llm::{InferenceBackend, InferenceError};

/// Genre classification over an [`InferenceBackend`].
///
/// Holds the taxonomy and input limits; the model itself stays behind the
/// trait so tests and alternative providers can be dropped in.
pub struct Classifier {
    taxonomy: Vec<String>,
    max_description_chars: usize,
}

impl Classifier {
    pub fn new(taxonomy: Vec<String>, max_description_chars: usize) -> Self {
        Self {
            taxonomy,
            max_description_chars,
        }
    }

    pub fn taxonomy(&self) -> &[String] {
        &self.taxonomy
    }

    /// Classify a free-text movie description.
    ///
    /// Empty and oversized inputs are rejected before the backend is
    /// invoked.
    pub async fn classify(
        &self,
        backend: &dyn InferenceBackend,
        description: &str,
    ) -> Result<ClassificationResult, InferenceError> {
        self.check_input(description)?;

        let prompt = self.build_prompt(None, description, None);
        let raw = backend.generate(&prompt).await?;

        Ok(self.parse_response(&raw))
    }

    /// Classify a catalog movie by its summary, giving the model the genres
    /// already recorded for it (mirrors the shuffle flow of the original
    /// explorer UI).
    pub async fn classify_movie(
        &self,
        backend: &dyn InferenceBackend,
        title: &str,
        summary: &str,
        catalog_genres: &[String],
    ) -> Result<ClassificationResult, InferenceError> {
        self.check_input(summary)?;

        let prompt = self.build_prompt(Some(title), summary, Some(catalog_genres));
        let raw = backend.generate(&prompt).await?;

        Ok(self.parse_response(&raw))
    }

    fn check_input(&self, description: &str) -> Result<(), InferenceError> {
        if description.trim().is_empty() {
            return Err(InferenceError::EmptyInput);
        }
        let length = description.chars().count();
        if length > self.max_description_chars {
            return Err(InferenceError::InputTooLong {
                length,
                limit: self.max_description_chars,
            });
        }
        Ok(())
    }

    /// Build the classification prompt.
    ///
    /// The model is told to answer with a comma-separated subset of the
    /// taxonomy and nothing else; `parse_response` cleans up what comes back
    /// anyway.
    fn build_prompt(
        &self,
        title: Option<&str>,
        description: &str,
        catalog_genres: Option<&[String]>,
    ) -> String {
        let mut prompt = String::from(
            "You are a movie classification assistant. Your task is to classify \
             the following movie into genres based on its summary.\n\n\
             ONLY return a comma-separated list of genres from the predefined \
             list below. Do NOT add extra text.\n\n",
        );

        prompt.push_str("Available Genres: ");
        prompt.push_str(&self.taxonomy.join(", "));
        prompt.push_str(".\n\n");

        if let Some(known) = catalog_genres {
            prompt.push_str(
                "Prioritize choosing genres that are already present in the database.\n",
            );
            prompt.push_str("Database Genres for this movie: ");
            prompt.push_str(&known.join(", "));
            prompt.push('\n');
        }

        if let Some(title) = title {
            prompt.push_str("Movie Title: ");
            prompt.push_str(title);
            prompt.push('\n');
        }

        prompt.push_str("Movie Summary: ");
        prompt.push_str(description);
        prompt.push_str("\n\nGenres:\n");

        prompt
    }

    /// Parse raw model output into canonicalized genre labels.
    ///
    /// Tokens that fail to match any taxonomy entry are dropped; the result
    /// keeps the raw text so callers can always show what the model said.
    fn parse_response(&self, raw: &str) -> ClassificationResult {
        let mut labels: Vec<GenreLabel> = Vec::new();

        for token in genres::split_response(raw) {
            match genres::canonicalize(token, &self.taxonomy) {
                Some(m) => {
                    // Same canonical genre may appear twice in model output
                    if !labels.iter().any(|l| l.label == m.canonical) {
                        labels.push(GenreLabel {
                            label: m.canonical,
                            similarity: m.similarity,
                        });
                    }
                }
                None => debug!(token, "discarding token with no taxonomy match"),
            }
        }

        let confidence = if labels.is_empty() {
            0.0
        } else {
            labels.iter().map(|l| l.similarity).sum::<f64>() / labels.len() as f64
        };

        ClassificationResult {
            genres: labels,
            confidence,
            raw_response: raw.to_string(),
        }
    }
}

/// Intersect predicted labels with catalog genres (case-insensitive).
///
/// Returns the overlapping canonical labels; an empty overlap means the
/// prediction disagrees with the catalog.
pub fn catalog_overlap(prediction: &ClassificationResult, catalog_genres: &[String]) -> Vec<String> {
    prediction
        .genres
        .iter()
        .filter(|g| {
            catalog_genres
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&g.label))
        })
        .map(|g| g.label.clone())
        .collect()
}

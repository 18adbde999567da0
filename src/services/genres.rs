//! Genre taxonomy reference data.
//!
//! The default vocabulary is the closed genre list the classification prompt
//! offers to the model. Deployments can override it through configuration;
//! the matching logic only ever sees the taxonomy it is given.

use strsim::jaro_winkler;

/// Minimum similarity score for a model-produced token to be accepted as a
/// taxonomy genre.
const GENRE_MATCH_THRESHOLD: f64 = 0.88;

/// Default genre vocabulary offered to the model.
pub const DEFAULT_GENRES: &[&str] = &[
    "Crime Fiction",
    "Comedy film",
    "Comedy-drama",
    "Romantic comedy",
    "Musical",
    "Romance Film",
    "Comedy",
    "Drama",
    "Romantic drama",
    "Action",
    "Thriller",
    "Science Fiction",
    "Animation",
    "Horror",
    "Fantasy",
    "Documentary",
    "Western",
    "Biography",
    "Mystery",
    "Adventure",
    "War",
    "History",
    "Sports",
];

/// Result of matching one model-produced token against the taxonomy.
#[derive(Debug, Clone)]
pub struct GenreMatch {
    /// The canonical taxonomy entry.
    pub canonical: String,
    /// Similarity between the token and the canonical entry (0.0 - 1.0).
    pub similarity: f64,
}

/// Match a single token against the taxonomy using Jaro-Winkler similarity.
///
/// Returns `None` when no taxonomy entry clears the threshold. Matching is
/// case-insensitive; the canonical casing is always returned.
pub fn canonicalize(token: &str, taxonomy: &[String]) -> Option<GenreMatch> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let lower = token.to_lowercase();

    let mut best_score = 0.0_f64;
    let mut best: Option<&String> = None;

    for genre in taxonomy {
        let score = jaro_winkler(&lower, &genre.to_lowercase());
        if score > best_score {
            best_score = score;
            best = Some(genre);
        }
    }

    match best {
        Some(genre) if best_score >= GENRE_MATCH_THRESHOLD => Some(GenreMatch {
            canonical: genre.clone(),
            similarity: best_score,
        }),
        _ => None,
    }
}

/// Split a comma-separated model response into trimmed, non-empty tokens.
///
/// Reasoning models sometimes prefix their answer with a `<think>...</think>`
/// block or a "Genres:" echo of the prompt; both are stripped before
/// splitting.
pub fn split_response(raw: &str) -> Vec<&str> {
    let mut text = raw;

    // Drop a leading chain-of-thought block if present.
    if let Some(start) = text.find("<think>") {
        if let Some(end) = text[start..].find("</think>") {
            text = &text[start + end + "</think>".len()..];
        }
    }

    // Only the part after the last "Genres:" echo matters.
    if let Some(idx) = text.rfind("Genres:") {
        text = &text[idx + "Genres:".len()..];
    }

    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

//! MovieSummaries dataset handling: download, parsing, and the in-memory
//! catalog the stats and shuffle endpoints query.

pub mod catalog;
pub mod download;
pub mod parser;

pub use catalog::MovieCatalog;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("Dataset file not found: {path}")]
    MissingFile { path: String },

    #[error("Parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },
}

/// Download the dataset if needed, then load the catalog from disk.
pub async fn load_or_fetch(
    data_url: &str,
    data_dir: &std::path::Path,
) -> Result<MovieCatalog, DataError> {
    let extracted = download::ensure_dataset(data_url, data_dir).await?;
    MovieCatalog::load(&extracted)
}

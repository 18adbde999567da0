use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::data::DataError;

const ARCHIVE_NAME: &str = "MovieSummaries.tar.gz";
const EXTRACTED_DIR: &str = "MovieSummaries";

/// Make sure the dataset is present under `data_dir`, downloading and
/// extracting it when missing. Returns the extracted directory.
///
/// Both steps are skipped when their output already exists, so restarts do
/// not re-download the ~46 MB archive.
pub async fn ensure_dataset(data_url: &str, data_dir: &Path) -> Result<PathBuf, DataError> {
    std::fs::create_dir_all(data_dir)?;

    let archive_path = data_dir.join(ARCHIVE_NAME);
    let extracted_dir = data_dir.join(EXTRACTED_DIR);

    if extracted_dir.exists() {
        info!(dir = %extracted_dir.display(), "Dataset already extracted, skipping download");
        return Ok(extracted_dir);
    }

    if !archive_path.exists() {
        download_archive(data_url, &archive_path).await?;
    } else {
        info!(path = %archive_path.display(), "Archive already present, skipping download");
    }

    extract_archive(&archive_path, data_dir)?;

    if !extracted_dir.exists() {
        return Err(DataError::MissingFile {
            path: extracted_dir.display().to_string(),
        });
    }

    Ok(extracted_dir)
}

async fn download_archive(data_url: &str, archive_path: &Path) -> Result<(), DataError> {
    info!(url = data_url, "Downloading dataset");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(600))
        .build()?;

    let response = client.get(data_url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    // Write to a temp name first so a partial download never looks complete.
    let tmp_path = archive_path.with_extension("gz.part");
    std::fs::write(&tmp_path, &bytes)?;
    std::fs::rename(&tmp_path, archive_path)?;

    info!(bytes = bytes.len(), "Download complete");
    Ok(())
}

fn extract_archive(archive_path: &Path, data_dir: &Path) -> Result<(), DataError> {
    info!(path = %archive_path.display(), "Extracting dataset");

    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);
    archive.unpack(data_dir)?;

    info!("Extraction complete");
    Ok(())
}

//! Parsers for the MovieSummaries tab-separated files.
//!
//! - `movie.metadata.tsv`: wikipedia_id, freebase_id, name, release_date,
//!   box_office, runtime, languages, countries, genres
//! - `character.metadata.tsv`: wikipedia_movie_id, freebase_movie_id,
//!   release_date, character_name, actor_dob, gender, height, ethnicity,
//!   actor_name, age_at_release, three freebase ids
//! - `plot_summaries.txt`: wikipedia_id, summary
//!
//! The languages/countries/genres columns hold JSON maps of Freebase id to
//! display name; only the names are kept. Malformed rows are skipped with a
//! warning rather than failing the whole load.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

use crate::data::DataError;
use crate::models::movie::{CharacterRecord, Gender, Movie};

/// Read a file that may contain Latin-1 bytes into lines.
///
/// The dataset is mostly UTF-8 but a handful of rows carry Latin-1 actor
/// names; each byte maps directly to the matching code point.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>, DataError> {
    let mut file = File::open(path).map_err(|_| DataError::MissingFile {
        path: path.display().to_string(),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => e.as_bytes().iter().map(|&b| b as char).collect(),
    };

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse `movie.metadata.tsv`.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>, DataError> {
    let lines = read_lines_latin1(path)?;
    let mut movies = Vec::with_capacity(lines.len());
    let mut skipped = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        match parse_movie_row(line) {
            Some(movie) => movies.push(movie),
            None => {
                skipped += 1;
                if skipped <= 5 {
                    warn!(file = "movie.metadata.tsv", line = idx + 1, "skipping malformed row");
                }
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "movie.metadata.tsv rows skipped");
    }

    Ok(movies)
}

fn parse_movie_row(line: &str) -> Option<Movie> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 9 {
        return None;
    }

    let wikipedia_id = fields[0].parse::<u64>().ok()?;
    let name = fields[2].trim();
    if name.is_empty() {
        return None;
    }

    let (release_year, _) = parse_partial_date(fields[3]);
    let genres = parse_name_map(fields[8]);

    Some(Movie {
        wikipedia_id,
        name: name.to_string(),
        release_year,
        genres,
        summary: None,
    })
}

/// Parse `character.metadata.tsv`.
pub fn parse_characters(path: &Path) -> Result<Vec<CharacterRecord>, DataError> {
    let lines = read_lines_latin1(path)?;
    let mut records = Vec::with_capacity(lines.len());
    let mut skipped = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        match parse_character_row(line) {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                if skipped <= 5 {
                    warn!(
                        file = "character.metadata.tsv",
                        line = idx + 1,
                        "skipping malformed row"
                    );
                }
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "character.metadata.tsv rows skipped");
    }

    Ok(records)
}

fn parse_character_row(line: &str) -> Option<CharacterRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 13 {
        return None;
    }

    let wikipedia_movie_id = fields[0].parse::<u64>().ok()?;
    let (birth_year, birth_month) = parse_partial_date(fields[4]);
    let actor_gender = Gender::from_str(fields[5].trim()).unwrap_or(Gender::Unknown);
    let actor_height_cm = parse_height_cm(fields[6]);

    Some(CharacterRecord {
        wikipedia_movie_id,
        actor_gender,
        actor_height_cm,
        birth_year,
        birth_month,
    })
}

/// Parse `plot_summaries.txt` into a map keyed by Wikipedia movie id.
pub fn parse_summaries(path: &Path) -> Result<HashMap<u64, String>, DataError> {
    let lines = read_lines_latin1(path)?;
    let mut summaries = HashMap::with_capacity(lines.len());

    for line in &lines {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some((id, summary)) = line.split_once('\t') {
            if let Ok(id) = id.parse::<u64>() {
                let summary = summary.trim();
                if !summary.is_empty() {
                    summaries.insert(id, summary.to_string());
                }
            }
        }
    }

    Ok(summaries)
}

/// Parse a possibly partial ISO date ("1975-01-22", "1975-01", "1975") into
/// (year, month).
fn parse_partial_date(raw: &str) -> (Option<i32>, Option<u32>) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (None, None);
    }

    // Full dates go through chrono; anything it rejects is salvaged as
    // year/month below.
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let year = Some(date.year()).filter(|y| (1800..=2100).contains(y));
        return (year, year.map(|_| date.month()));
    }

    // Partial dates: "1975" or "1975-01"
    let mut parts = raw.split('-');
    let year = parts
        .next()
        .and_then(|y| y.parse::<i32>().ok())
        .filter(|y| (1800..=2100).contains(y));
    let month = parts
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .filter(|m| (1..=12).contains(m));

    (year, month.filter(|_| year.is_some()))
}

/// Parse an actor height into centimeters.
///
/// The raw column is nominally meters, but some rows already hold
/// centimeters; values under 10 are treated as meters.
fn parse_height_cm(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let cm = if value < 10.0 { value * 100.0 } else { value };
    Some(cm)
}

/// Parse a Freebase id → name JSON map column into its names.
fn parse_name_map(raw: &str) -> Vec<String> {
    match serde_json::from_str::<HashMap<String, String>>(raw.trim()) {
        Ok(map) => {
            let mut names: Vec<String> = map.into_values().collect();
            names.sort();
            names
        }
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MOVIE_ROW: &str = "975900\t/m/03vyhn\tGhosts of Mars\t2001-08-24\t14010832\t98.0\t{\"/m/02h40lc\": \"English Language\"}\t{\"/m/09c7w0\": \"United States of America\"}\t{\"/m/01jfsb\": \"Thriller\", \"/m/06n90\": \"Science Fiction\", \"/m/03npn\": \"Horror\"}";

    const CHARACTER_ROW: &str = "975900\t/m/03vyhn\t2001-08-24\tAkooshay\t1958-08-26\tF\t1.62\t\tWanda De Jesus\t42\t/m/0bgchxw\t/m/0bgcj3x\t/m/03wcfv7";

    #[test]
    fn test_parse_movie_row() {
        let movie = parse_movie_row(MOVIE_ROW).unwrap();
        assert_eq!(movie.wikipedia_id, 975900);
        assert_eq!(movie.name, "Ghosts of Mars");
        assert_eq!(movie.release_year, Some(2001));
        assert_eq!(movie.genres, vec!["Horror", "Science Fiction", "Thriller"]);
    }

    #[test]
    fn test_parse_movie_row_short_line_rejected() {
        assert!(parse_movie_row("123\tonly three\tfields").is_none());
    }

    #[test]
    fn test_parse_character_row() {
        let record = parse_character_row(CHARACTER_ROW).unwrap();
        assert_eq!(record.wikipedia_movie_id, 975900);
        assert_eq!(record.actor_gender, Gender::Female);
        assert_eq!(record.actor_height_cm, Some(162.0));
        assert_eq!(record.birth_year, Some(1958));
        assert_eq!(record.birth_month, Some(8));
    }

    #[test]
    fn test_height_already_in_centimeters() {
        assert_eq!(parse_height_cm("180"), Some(180.0));
        assert_eq!(parse_height_cm("1.8"), Some(180.0));
        assert_eq!(parse_height_cm(""), None);
        assert_eq!(parse_height_cm("-1.7"), None);
    }

    #[test]
    fn test_partial_dates() {
        assert_eq!(parse_partial_date("1975-01-22"), (Some(1975), Some(1)));
        assert_eq!(parse_partial_date("1975-01"), (Some(1975), Some(1)));
        assert_eq!(parse_partial_date("1975"), (Some(1975), None));
        assert_eq!(parse_partial_date(""), (None, None));
        assert_eq!(parse_partial_date("10"), (None, None));
    }

    #[test]
    fn test_malformed_genre_map_yields_empty() {
        assert!(parse_name_map("not json").is_empty());
        assert!(parse_name_map("{}").is_empty());
    }

    #[test]
    fn test_parse_files_via_tempdir() {
        let dir = tempfile::tempdir().unwrap();

        let movie_path = dir.path().join("movie.metadata.tsv");
        let mut f = File::create(&movie_path).unwrap();
        writeln!(f, "{}", MOVIE_ROW).unwrap();
        writeln!(f, "garbage line without tabs").unwrap();
        drop(f);

        let movies = parse_movies(&movie_path).unwrap();
        assert_eq!(movies.len(), 1);

        let summaries_path = dir.path().join("plot_summaries.txt");
        let mut f = File::create(&summaries_path).unwrap();
        writeln!(f, "975900\tA mining colony on Mars is overrun.").unwrap();
        drop(f);

        let summaries = parse_summaries(&summaries_path).unwrap();
        assert_eq!(
            summaries.get(&975900).map(String::as_str),
            Some("A mining colony on Mars is overrun.")
        );
    }

    #[test]
    fn test_missing_file_error() {
        let err = parse_movies(Path::new("/nonexistent/movie.metadata.tsv")).unwrap_err();
        assert!(matches!(err, DataError::MissingFile { .. }));
    }
}

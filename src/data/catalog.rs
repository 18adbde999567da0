use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use strum::EnumString;
use tracing::info;

use crate::data::{parser, DataError};
use crate::models::movie::{CharacterRecord, Gender, Movie};

/// In-memory movie and character catalog with the exploration queries the
/// stats endpoints serve. Built once at startup and shared immutably.
pub struct MovieCatalog {
    movies: Vec<Movie>,
    characters: Vec<CharacterRecord>,
    /// Indexes of movies that have a plot summary, for the shuffle flow.
    with_summary: Vec<usize>,
}

/// A genre with its number of occurrences across the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Movies released in a given year.
#[derive(Debug, Clone, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Actor births in a given period (year or month number).
#[derive(Debug, Clone, Serialize)]
pub struct PeriodCount {
    pub period: i32,
    pub count: usize,
}

/// Movies grouped by how many credited actors they have.
#[derive(Debug, Clone, Serialize)]
pub struct ActorCountBucket {
    pub actors: usize,
    pub movies: usize,
}

/// Histogram bin over actor heights, in centimeters.
#[derive(Debug, Clone, Serialize)]
pub struct HeightBin {
    pub lower_cm: f64,
    pub upper_cm: f64,
    pub count: usize,
}

/// Summary of a filtered height distribution.
#[derive(Debug, Clone, Serialize)]
pub struct HeightDistribution {
    pub count: usize,
    pub mean_cm: Option<f64>,
    pub bins: Vec<HeightBin>,
}

/// Unit for the birth-count query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BirthUnit {
    Year,
    Month,
}

const HEIGHT_BINS: usize = 20;

impl MovieCatalog {
    /// Load the catalog from an extracted MovieSummaries directory.
    pub fn load(dir: &Path) -> Result<Self, DataError> {
        let movies = parser::parse_movies(&dir.join("movie.metadata.tsv"))?;
        let characters = parser::parse_characters(&dir.join("character.metadata.tsv"))?;

        // Plot summaries ship in the same archive but are optional here;
        // without them the shuffle flow has nothing to classify.
        let summaries = match parser::parse_summaries(&dir.join("plot_summaries.txt")) {
            Ok(s) => s,
            Err(DataError::MissingFile { path }) => {
                tracing::warn!(path, "plot_summaries.txt missing, shuffle disabled");
                HashMap::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self::from_parts(movies, characters, summaries))
    }

    /// Assemble a catalog from already-parsed parts (used by tests).
    pub fn from_parts(
        mut movies: Vec<Movie>,
        characters: Vec<CharacterRecord>,
        summaries: HashMap<u64, String>,
    ) -> Self {
        let mut with_summary = Vec::new();
        for (idx, movie) in movies.iter_mut().enumerate() {
            if let Some(summary) = summaries.get(&movie.wikipedia_id) {
                movie.summary = Some(summary.clone());
                with_summary.push(idx);
            }
        }

        info!(
            movies = movies.len(),
            characters = characters.len(),
            summaries = with_summary.len(),
            "Movie catalog loaded"
        );

        Self {
            movies,
            characters,
            with_summary,
        }
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// The `n` most common genres with their counts, most frequent first.
    /// Ties break alphabetically so the ordering is stable.
    pub fn top_genres(&self, n: usize) -> Vec<GenreCount> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for movie in &self.movies {
            for genre in &movie.genres {
                *counts.entry(genre.as_str()).or_default() += 1;
            }
        }

        let mut entries: Vec<GenreCount> = counts
            .into_iter()
            .map(|(genre, count)| GenreCount {
                genre: genre.to_string(),
                count,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
        entries.truncate(n);
        entries
    }

    /// Movies released per year, optionally restricted to titles carrying a
    /// genre that contains `genre` (case-insensitive substring, matching the
    /// original explorer's filter).
    pub fn releases_per_year(&self, genre: Option<&str>) -> Vec<YearCount> {
        let needle = genre.map(str::to_lowercase);
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();

        for movie in &self.movies {
            let Some(year) = movie.release_year else {
                continue;
            };
            if let Some(needle) = &needle {
                let matched = movie
                    .genres
                    .iter()
                    .any(|g| g.to_lowercase().contains(needle));
                if !matched {
                    continue;
                }
            }
            *counts.entry(year).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect()
    }

    /// Actor births per year or per calendar month.
    pub fn birth_counts(&self, unit: BirthUnit) -> Vec<PeriodCount> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();

        for record in &self.characters {
            let period = match unit {
                BirthUnit::Year => record.birth_year,
                BirthUnit::Month => record.birth_month.map(|m| m as i32),
            };
            if let Some(period) = period {
                *counts.entry(period).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .map(|(period, count)| PeriodCount { period, count })
            .collect()
    }

    /// Distribution of credited-actor counts per movie.
    pub fn actor_count_distribution(&self) -> Vec<ActorCountBucket> {
        let mut per_movie: HashMap<u64, usize> = HashMap::new();
        for record in &self.characters {
            *per_movie.entry(record.wikipedia_movie_id).or_default() += 1;
        }

        let mut buckets: BTreeMap<usize, usize> = BTreeMap::new();
        for count in per_movie.into_values() {
            *buckets.entry(count).or_default() += 1;
        }

        buckets
            .into_iter()
            .map(|(actors, movies)| ActorCountBucket { actors, movies })
            .collect()
    }

    /// Actor heights filtered by gender and a height range, binned into a
    /// fixed-width histogram over `[min_cm, max_cm]`.
    pub fn height_distribution(
        &self,
        gender: Option<Gender>,
        min_cm: f64,
        max_cm: f64,
    ) -> HeightDistribution {
        let heights: Vec<f64> = self
            .characters
            .iter()
            .filter(|r| gender.is_none() || Some(r.actor_gender) == gender)
            .filter_map(|r| r.actor_height_cm)
            .filter(|h| (min_cm..=max_cm).contains(h))
            .collect();

        let count = heights.len();
        let mean_cm = if count == 0 {
            None
        } else {
            Some(heights.iter().sum::<f64>() / count as f64)
        };

        let mut bins = Vec::with_capacity(HEIGHT_BINS);
        if max_cm > min_cm {
            let width = (max_cm - min_cm) / HEIGHT_BINS as f64;
            let mut bin_counts = [0usize; HEIGHT_BINS];
            for h in &heights {
                let idx = (((h - min_cm) / width) as usize).min(HEIGHT_BINS - 1);
                bin_counts[idx] += 1;
            }
            for (i, &c) in bin_counts.iter().enumerate() {
                bins.push(HeightBin {
                    lower_cm: min_cm + width * i as f64,
                    upper_cm: min_cm + width * (i + 1) as f64,
                    count: c,
                });
            }
        }

        HeightDistribution {
            count,
            mean_cm,
            bins,
        }
    }

    /// Draw a random movie that has a plot summary.
    pub fn sample_with_summary(&self) -> Option<&Movie> {
        let idx = self.with_summary.choose(&mut rand::thread_rng())?;
        self.movies.get(*idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, name: &str, year: Option<i32>, genres: &[&str]) -> Movie {
        Movie {
            wikipedia_id: id,
            name: name.to_string(),
            release_year: year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            summary: None,
        }
    }

    fn character(
        movie_id: u64,
        gender: Gender,
        height_cm: Option<f64>,
        birth_year: Option<i32>,
        birth_month: Option<u32>,
    ) -> CharacterRecord {
        CharacterRecord {
            wikipedia_movie_id: movie_id,
            actor_gender: gender,
            actor_height_cm: height_cm,
            birth_year,
            birth_month,
        }
    }

    fn sample_catalog() -> MovieCatalog {
        let movies = vec![
            movie(1, "First", Some(1999), &["Drama", "Thriller"]),
            movie(2, "Second", Some(1999), &["Drama"]),
            movie(3, "Third", Some(2005), &["Comedy"]),
            movie(4, "Undated", None, &["Drama"]),
        ];
        let characters = vec![
            character(1, Gender::Male, Some(180.0), Some(1960), Some(3)),
            character(1, Gender::Female, Some(165.0), Some(1970), Some(7)),
            character(2, Gender::Male, Some(175.0), Some(1960), None),
            character(3, Gender::Unknown, None, None, None),
        ];
        let mut summaries = HashMap::new();
        summaries.insert(1, "A tense family story.".to_string());

        MovieCatalog::from_parts(movies, characters, summaries)
    }

    #[test]
    fn test_top_genres_ordering() {
        let catalog = sample_catalog();
        let top = catalog.top_genres(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].genre, "Drama");
        assert_eq!(top[0].count, 3);
        // Comedy and Thriller tie at 1; alphabetical order breaks the tie
        assert_eq!(top[1].genre, "Comedy");
    }

    #[test]
    fn test_releases_per_year_unfiltered() {
        let catalog = sample_catalog();
        let releases = catalog.releases_per_year(None);
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].year, 1999);
        assert_eq!(releases[0].count, 2);
        assert_eq!(releases[1].year, 2005);
    }

    #[test]
    fn test_releases_per_year_genre_filter() {
        let catalog = sample_catalog();
        let releases = catalog.releases_per_year(Some("drama"));
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].year, 1999);
        assert_eq!(releases[0].count, 2);
    }

    #[test]
    fn test_birth_counts_by_year_and_month() {
        let catalog = sample_catalog();

        let by_year = catalog.birth_counts(BirthUnit::Year);
        assert_eq!(by_year.len(), 2);
        assert_eq!(by_year[0].period, 1960);
        assert_eq!(by_year[0].count, 2);

        let by_month = catalog.birth_counts(BirthUnit::Month);
        assert_eq!(by_month.len(), 2); // March and July; missing months skipped
    }

    #[test]
    fn test_actor_count_distribution() {
        let catalog = sample_catalog();
        let dist = catalog.actor_count_distribution();
        // Two movies with 1 actor, one movie with 2 actors
        assert_eq!(dist[0].actors, 1);
        assert_eq!(dist[0].movies, 2);
        assert_eq!(dist[1].actors, 2);
        assert_eq!(dist[1].movies, 1);
    }

    #[test]
    fn test_height_distribution_filters() {
        let catalog = sample_catalog();

        let all = catalog.height_distribution(None, 150.0, 200.0);
        assert_eq!(all.count, 3);
        assert_eq!(all.bins.len(), 20);
        assert_eq!(all.bins.iter().map(|b| b.count).sum::<usize>(), 3);

        let male = catalog.height_distribution(Some(Gender::Male), 150.0, 200.0);
        assert_eq!(male.count, 2);

        let narrow = catalog.height_distribution(None, 170.0, 178.0);
        assert_eq!(narrow.count, 1);
    }

    #[test]
    fn test_height_distribution_empty_range() {
        let catalog = sample_catalog();
        let dist = catalog.height_distribution(None, 200.0, 210.0);
        assert_eq!(dist.count, 0);
        assert!(dist.mean_cm.is_none());
    }

    #[test]
    fn test_sample_only_returns_movies_with_summary() {
        let catalog = sample_catalog();
        for _ in 0..10 {
            let movie = catalog.sample_with_summary().unwrap();
            assert_eq!(movie.wikipedia_id, 1);
            assert!(movie.summary.is_some());
        }
    }

    #[test]
    fn test_sample_none_when_no_summaries() {
        let catalog = MovieCatalog::from_parts(
            vec![movie(1, "First", None, &[])],
            Vec::new(),
            HashMap::new(),
        );
        assert!(catalog.sample_with_summary().is_none());
    }

    #[test]
    fn test_birth_unit_parsing() {
        use std::str::FromStr;
        assert_eq!(BirthUnit::from_str("year").unwrap(), BirthUnit::Year);
        assert_eq!(BirthUnit::from_str("Month").unwrap(), BirthUnit::Month);
        assert!(BirthUnit::from_str("decade").is_err());
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Actor gender as recorded in the character metadata.
///
/// The raw file uses single letters ("M"/"F"); anything else is kept as
/// unknown rather than dropped so actor counts stay accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    #[strum(serialize = "male", serialize = "m")]
    Male,
    #[strum(serialize = "female", serialize = "f")]
    Female,
    Unknown,
}

/// A movie from `movie.metadata.tsv`, joined with its plot summary when one
/// exists in `plot_summaries.txt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub wikipedia_id: u64,
    pub name: String,
    pub release_year: Option<i32>,
    pub genres: Vec<String>,
    pub summary: Option<String>,
}

/// One row of `character.metadata.tsv`, reduced to the fields the catalog
/// statistics need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub wikipedia_movie_id: u64,
    pub actor_gender: Gender,
    /// Height in centimeters. The raw file mixes meters and centimeters;
    /// values under 10 are meters and get converted during parsing.
    pub actor_height_cm: Option<f64>,
    pub birth_year: Option<i32>,
    pub birth_month: Option<u32>,
}

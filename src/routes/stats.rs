use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;

use crate::app_state::AppState;
use crate::data::catalog::{
    ActorCountBucket, BirthUnit, GenreCount, HeightDistribution, PeriodCount, YearCount,
};
use crate::models::movie::Gender;
use crate::routes::ApiError;

#[derive(Debug, Deserialize)]
pub struct GenresQuery {
    /// Number of genres to return. Matches the explorer's "Top N" control.
    #[serde(default = "default_top_n")]
    pub n: usize,
}

fn default_top_n() -> usize {
    10
}

/// GET /api/v1/stats/genres — most common genres in the catalog.
pub async fn top_genres(
    State(state): State<AppState>,
    Query(query): Query<GenresQuery>,
) -> Result<Json<Vec<GenreCount>>, ApiError> {
    if query.n == 0 || query.n > 100 {
        return Err(ApiError::BadRequest(
            "n must be between 1 and 100".to_string(),
        ));
    }
    Ok(Json(state.catalog.top_genres(query.n)))
}

#[derive(Debug, Deserialize)]
pub struct ReleasesQuery {
    pub genre: Option<String>,
}

/// GET /api/v1/stats/releases — movies released per year, optionally
/// filtered by genre.
pub async fn releases(
    State(state): State<AppState>,
    Query(query): Query<ReleasesQuery>,
) -> Json<Vec<YearCount>> {
    Json(state.catalog.releases_per_year(query.genre.as_deref()))
}

#[derive(Debug, Deserialize)]
pub struct BirthsQuery {
    #[serde(default = "default_birth_unit")]
    pub unit: String,
}

fn default_birth_unit() -> String {
    "year".to_string()
}

/// GET /api/v1/stats/births — actor births per year or month.
pub async fn births(
    State(state): State<AppState>,
    Query(query): Query<BirthsQuery>,
) -> Result<Json<Vec<PeriodCount>>, ApiError> {
    let unit = BirthUnit::from_str(&query.unit)
        .map_err(|_| ApiError::BadRequest("unit must be 'year' or 'month'".to_string()))?;
    Ok(Json(state.catalog.birth_counts(unit)))
}

/// GET /api/v1/stats/actor-counts — distribution of credited actors per movie.
pub async fn actor_counts(State(state): State<AppState>) -> Json<Vec<ActorCountBucket>> {
    Json(state.catalog.actor_count_distribution())
}

#[derive(Debug, Deserialize)]
pub struct HeightsQuery {
    /// "all", "male", or "female"
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_min_cm")]
    pub min_cm: f64,
    #[serde(default = "default_max_cm")]
    pub max_cm: f64,
}

fn default_gender() -> String {
    "all".to_string()
}

fn default_min_cm() -> f64 {
    150.0
}

fn default_max_cm() -> f64 {
    200.0
}

/// GET /api/v1/stats/heights — actor height histogram, filtered by gender
/// and height range.
pub async fn heights(
    State(state): State<AppState>,
    Query(query): Query<HeightsQuery>,
) -> Result<Json<HeightDistribution>, ApiError> {
    let gender = match query.gender.as_str() {
        "all" => None,
        other => Some(
            Gender::from_str(other)
                .map_err(|_| ApiError::BadRequest("gender must be 'all', 'male', or 'female'".to_string()))?,
        ),
    };

    if !(100.0..=250.0).contains(&query.min_cm)
        || !(100.0..=250.0).contains(&query.max_cm)
        || query.min_cm >= query.max_cm
    {
        return Err(ApiError::BadRequest(
            "height range must satisfy 100 <= min_cm < max_cm <= 250".to_string(),
        ));
    }

    Ok(Json(state.catalog.height_distribution(
        gender,
        query.min_cm,
        query.max_cm,
    )))
}

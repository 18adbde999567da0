//! Movie Explorer
//!
//! This library backs the movie-explorer service: genre classification of
//! free-text movie descriptions through a local Ollama model, plus
//! exploratory statistics over the CMU MovieSummaries dataset held in
//! memory.

pub mod app_state;
pub mod config;
pub mod data;
pub mod models;
pub mod routes;
pub mod services;

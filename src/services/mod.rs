pub mod classification;
pub mod genres;
pub mod llm;

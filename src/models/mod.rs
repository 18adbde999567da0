pub mod classification;
pub mod movie;

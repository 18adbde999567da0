use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the Ollama server.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model name passed to Ollama (e.g., "deepseek-r1:1.5b").
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    /// URL of the MovieSummaries archive (tar.gz).
    #[serde(default = "default_data_url")]
    pub data_url: String,

    /// Directory where the dataset is downloaded and extracted.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Maximum accepted length of a movie description, in characters.
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,

    /// Optional comma-separated genre vocabulary override. When unset, the
    /// built-in taxonomy is used.
    pub genre_vocabulary: Option<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "deepseek-r1:1.5b".to_string()
}

fn default_data_url() -> String {
    "http://www.cs.cmu.edu/~ark/personas/data/MovieSummaries.tar.gz".to_string()
}

fn default_data_dir() -> String {
    "downloads".to_string()
}

fn default_max_description_chars() -> usize {
    4000
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// The genre taxonomy in effect: the configured override, or the default.
    pub fn genre_taxonomy(&self) -> Vec<String> {
        match &self.genre_vocabulary {
            Some(raw) => raw
                .split(',')
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
            None => crate::services::genres::DEFAULT_GENRES
                .iter()
                .map(|g| g.to_string())
                .collect(),
        }
    }
}

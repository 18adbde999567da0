//! One-shot genre classification from the terminal.
//!
//! Usage: classify "A group of astronauts must stop an asteroid from destroying Earth."
//!
//! Configuration comes from the same environment variables as the server
//! (OLLAMA_URL, OLLAMA_MODEL, GENRE_VOCABULARY, MAX_DESCRIPTION_CHARS).

use tracing_subscriber::EnvFilter;

use movie_explorer::config::AppConfig;
use movie_explorer::services::classification::Classifier;
use movie_explorer::services::llm::OllamaClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let description: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if description.trim().is_empty() {
        eprintln!("usage: classify <movie description>");
        std::process::exit(2);
    }

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let llm = OllamaClient::new(&config.ollama_url, &config.ollama_model)
        .expect("Failed to initialize Ollama client");
    let classifier = Classifier::new(config.genre_taxonomy(), config.max_description_chars);

    match classifier.classify(&llm, &description).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result).expect("serialize result"));
        }
        Err(e) => {
            eprintln!("classification failed: {e}");
            std::process::exit(1);
        }
    }
}

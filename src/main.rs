use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::path::Path;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use movie_explorer::app_state::AppState;
use movie_explorer::config::AppConfig;
use movie_explorer::data;
use movie_explorer::routes;
use movie_explorer::services::classification::Classifier;
use movie_explorer::services::llm::OllamaClient;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing movie-explorer server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_counter!(
        "classification_requests_total",
        "Total classification requests submitted"
    );
    metrics::describe_counter!(
        "classification_failures_total",
        "Total classification requests that failed at the model backend"
    );
    metrics::describe_counter!(
        "shuffle_requests_total",
        "Total shuffle classifications requested"
    );
    metrics::describe_histogram!(
        "inference_seconds",
        "Time spent waiting on the model backend per request"
    );

    // Load the movie catalog (downloads the dataset on first run)
    tracing::info!(url = %config.data_url, dir = %config.data_dir, "Loading movie catalog");
    let catalog = data::load_or_fetch(&config.data_url, Path::new(&config.data_dir))
        .await
        .expect("Failed to load movie catalog");

    // Initialize the Ollama client
    tracing::info!(url = %config.ollama_url, model = %config.ollama_model, "Initializing Ollama client");
    let llm = OllamaClient::new(&config.ollama_url, &config.ollama_model)
        .expect("Failed to initialize Ollama client");

    let classifier = Classifier::new(config.genre_taxonomy(), config.max_description_chars);

    // Create shared application state
    let state = AppState::new(catalog, classifier, Arc::new(llm));

    // Build API routes
    let app = routes::api_router(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(64 * 1024)); // descriptions are small

    tracing::info!("Starting movie-explorer on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}

use std::sync::Arc;

use crate::data::MovieCatalog;
use crate::services::classification::Classifier;
use crate::services::llm::InferenceBackend;

/// Shared application state passed to all route handlers.
///
/// The model integration is held behind [`InferenceBackend`], so swapping
/// providers never touches presentation code. Everything here is immutable
/// after startup; concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<MovieCatalog>,
    pub classifier: Arc<Classifier>,
    pub llm: Arc<dyn InferenceBackend>,
}

impl AppState {
    pub fn new(
        catalog: MovieCatalog,
        classifier: Classifier,
        llm: Arc<dyn InferenceBackend>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            classifier: Arc::new(classifier),
            llm,
        }
    }
}

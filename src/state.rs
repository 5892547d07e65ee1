//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::MappingService;

#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
}

impl AppState {
    pub fn new(mapping_service: Arc<MappingService>) -> Self {
        Self { mapping_service }
    }
}

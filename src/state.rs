use std::sync::Arc;

use crate::explain::ExplainEngine;
use crate::llm::ChatModel;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ExplainEngine>,
}

impl AppState {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self {
            engine: Arc::new(ExplainEngine::new(llm)),
        }
    }
}

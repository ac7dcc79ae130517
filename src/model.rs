use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct TextInput {
    pub text: String,
}

#[derive(Deserialize, Serialize)]
pub struct BatchTextInput {
    pub texts: Vec<String>,
}

/// Query string shared by both embedding endpoints.
#[derive(Deserialize, Serialize, Default)]
pub struct ModelQuery {
    pub model_name: Option<String>,
}

#[derive(Deserialize, Serialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
    pub dimensions: usize,
    pub text: String,
    pub processing_time_ms: f64,
}

#[derive(Deserialize, Serialize)]
pub struct BatchEmbeddingResponse {
    pub embeddings: Vec<Vec<f32>>,
    pub dimensions: usize,
    pub count: usize,
    pub processing_time_ms: f64,
}

#[derive(Deserialize, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Deserialize, Serialize)]
pub struct ModelsResponse {
    pub models: BTreeMap<String, String>,
    pub default: String,
}

#[derive(Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: Vec<String>,
    pub memory_usage: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}

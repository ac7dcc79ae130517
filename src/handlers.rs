use std::time::Instant;

use actix_web::{get, post, web};
use tracing::{debug, error, warn};

use crate::app::AppState;
use crate::cache;
use crate::error::{Result, ServiceError};
use crate::gpu;
use crate::model::{
    BatchEmbeddingResponse, BatchTextInput, EmbeddingResponse, HealthResponse, ModelQuery,
    ModelsResponse, RootResponse, TextInput,
};
use crate::registry::{self, DEFAULT_MODEL};

pub const SERVICE_MESSAGE: &str = "Vectron Embedding Service API";

#[get("/")]
pub async fn root() -> web::Json<RootResponse> {
    web::Json(RootResponse {
        message: SERVICE_MESSAGE.to_owned(),
    })
}

#[get("/models")]
pub async fn list_models() -> web::Json<ModelsResponse> {
    web::Json(ModelsResponse {
        models: registry::available_models(),
        default: DEFAULT_MODEL.to_owned(),
    })
}

#[post("/embed")]
pub async fn embed_text(
    app: web::Data<AppState>,
    query: web::Query<ModelQuery>,
    form: web::Json<TextInput>,
) -> Result<web::Json<EmbeddingResponse>> {
    let TextInput { text } = form.into_inner();
    if text.trim().is_empty() {
        return Err(ServiceError::EmptyText);
    }

    let identifier = registry::resolve(query.model_name.as_deref());
    debug!(model = identifier, chars = text.len(), "embedding text");

    let texts = vec![text.clone()];
    let (embeddings, processing_time_ms) =
        web::block(move || encode(&app, identifier, &texts)).await??;

    let embedding = embeddings
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Inference("model returned no embedding".to_owned()))?;

    Ok(web::Json(EmbeddingResponse {
        dimensions: embedding.len(),
        embedding,
        text,
        processing_time_ms,
    }))
}

#[post("/batch-embed")]
pub async fn batch_embed_text(
    app: web::Data<AppState>,
    query: web::Query<ModelQuery>,
    form: web::Json<BatchTextInput>,
) -> Result<web::Json<BatchEmbeddingResponse>> {
    let BatchTextInput { texts } = form.into_inner();
    if texts.is_empty() {
        return Err(ServiceError::EmptyBatch);
    }

    let identifier = registry::resolve(query.model_name.as_deref());
    debug!(model = identifier, count = texts.len(), "embedding batch");

    let (embeddings, processing_time_ms) =
        web::block(move || encode(&app, identifier, &texts)).await??;

    Ok(web::Json(BatchEmbeddingResponse {
        dimensions: embeddings.first().map_or(0, Vec::len),
        count: embeddings.len(),
        embeddings,
        processing_time_ms,
    }))
}

#[get("/health")]
pub async fn health_check(app: web::Data<AppState>) -> web::Json<HealthResponse> {
    let usage = web::block(gpu::memory_usage).await.unwrap_or_else(|e| {
        warn!("could not query GPU memory: {}", e);
        None
    });

    web::Json(HealthResponse {
        status: "healthy".to_owned(),
        models_loaded: app.cache.loaded(),
        memory_usage: gpu::format_usage(usage),
    })
}

/// Runs one encode call on a cached model; the returned time covers the
/// encode only, not a first-time load.
fn encode(app: &AppState, identifier: &str, texts: &[String]) -> Result<(Vec<Vec<f32>>, f64)> {
    let model = app.cache.get_or_load(identifier)?;
    let model = cache::lock(&model);

    let started = Instant::now();
    let embeddings = model.encode(texts).map_err(|e| {
        error!(model = identifier, error = %e, "encode failed");
        ServiceError::Inference(format!("{e:#}"))
    })?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    Ok((embeddings, elapsed_ms))
}

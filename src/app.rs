use actix_web::web;

use crate::cache::ModelCache;
use crate::encoder::ModelLoader;
use crate::error::ServiceError;
use crate::handlers;

pub struct AppState {
    pub cache: ModelCache,
}

impl AppState {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        AppState {
            cache: ModelCache::new(loader),
        }
    }
}

/// Registers every endpoint, accepting JSON bodies up to `max_body_bytes`.
/// Shared by the server and the HTTP tests.
pub fn configure(max_body_bytes: usize) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(max_body_bytes)
                .error_handler(|err, _req| ServiceError::from(err).into()),
        )
        .service(handlers::root)
        .service(handlers::list_models)
        .service(handlers::embed_text)
        .service(handlers::batch_embed_text)
        .service(handlers::health_check);
    }
}

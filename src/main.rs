use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vectron_embed::{
    app::{self, AppState},
    config::ServerConfig,
    encoder::RustBertLoader,
    registry::DEFAULT_MODEL,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(?config, "starting Vectron embedding service");

    let data = web::Data::new(AppState::new(RustBertLoader::new(&config.model_dir)));

    if config.preload_default_model {
        let state = data.clone();
        web::block(move || state.cache.get_or_load(DEFAULT_MODEL))
            .await?
            .context("Could not load default model")?;
    }

    let routes = app::configure(config.max_body_bytes);
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes.clone())
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    info!("listening on {}:{}", config.host, config.port);
    server
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}

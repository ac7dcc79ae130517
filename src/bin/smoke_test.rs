//! Manual smoke test against a running service.
//!
//! `BASE_URL=http://localhost:8000 cargo run --bin smoke_test`

use std::time::Instant;

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use vectron_embed::model::{
    BatchEmbeddingResponse, EmbeddingResponse, HealthResponse, ModelsResponse, RootResponse,
};

async fn post<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    body: serde_json::Value,
) -> anyhow::Result<(T, f64)> {
    let started = Instant::now();
    let resp = client.post(url).json(&body).send().await?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("{} - {}", status, resp.text().await.unwrap_or_default());
    }
    let parsed = resp.json().await?;
    Ok((parsed, started.elapsed().as_secs_f64() * 1000.0))
}

async fn single_embedding(client: &Client, base: &str) -> anyhow::Result<()> {
    println!("\n1. Testing single text embedding...");
    let (data, rtt): (EmbeddingResponse, _) = post(
        client,
        &format!("{base}/embed"),
        json!({ "text": "This is a test sentence for embedding generation." }),
    )
    .await?;
    let preview: Vec<String> = data.embedding.iter().take(5).map(|x| format!("{x:.6}")).collect();
    println!("ok: embedding with {} dimensions", data.dimensions);
    println!("ok: processing time {:.2}ms, round trip {:.2}ms", data.processing_time_ms, rtt);
    println!("ok: preview [{}...]", preview.join(", "));
    Ok(())
}

async fn batch_embedding(client: &Client, base: &str) -> anyhow::Result<()> {
    println!("\n2. Testing batch text embedding...");
    let texts = [
        "This is the first test sentence.",
        "Here is another example sentence for embedding.",
        "Machine learning is transforming the world.",
        "Vector databases store embeddings for similarity search.",
    ];
    let (data, rtt): (BatchEmbeddingResponse, _) =
        post(client, &format!("{base}/batch-embed"), json!({ "texts": texts })).await?;
    println!("ok: {} embeddings with {} dimensions each", data.count, data.dimensions);
    println!("ok: processing time {:.2}ms, round trip {:.2}ms", data.processing_time_ms, rtt);
    Ok(())
}

async fn every_model(client: &Client, base: &str) -> anyhow::Result<()> {
    println!("\n3. Testing different embedding models...");
    let models: ModelsResponse = client
        .get(format!("{base}/models"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("ok: available models {:?}", models.models.keys().collect::<Vec<_>>());

    for alias in models.models.keys() {
        println!("\n  model: {alias}");
        match post::<EmbeddingResponse>(
            client,
            &format!("{base}/embed?model_name={alias}"),
            json!({ "text": "This is a test for different embedding models." }),
        )
        .await
        {
            Ok((data, rtt)) => println!(
                "  ok: {} dimensions, processing {:.2}ms, round trip {:.2}ms",
                data.dimensions, data.processing_time_ms, rtt
            ),
            Err(e) => println!("  error: {e:#}"),
        }
    }
    Ok(())
}

async fn health(client: &Client, base: &str) -> anyhow::Result<()> {
    println!("\n4. Testing health check...");
    let data: HealthResponse = client
        .get(format!("{base}/health"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("ok: status {}", data.status);
    println!("ok: models loaded {:?}", data.models_loaded);
    println!("ok: memory usage {}", data.memory_usage);
    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let base = std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let client = Client::new();

    println!("Testing Vectron Embedding Service at {base}");

    let banner: RootResponse = client
        .get(&base)
        .send()
        .await
        .with_context(|| format!("cannot connect to the embedding service at {base}"))?
        .error_for_status()?
        .json()
        .await?;
    println!("ok: service is running: {}", banner.message);

    for (name, result) in [
        ("single", single_embedding(&client, &base).await),
        ("batch", batch_embedding(&client, &base).await),
        ("models", every_model(&client, &base).await),
        ("health", health(&client, &base).await),
    ] {
        if let Err(e) = result {
            println!("error in {name} check: {e:#}");
        }
    }

    println!("\nAll checks completed.");
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};

/// A loaded model able to turn sentences into fixed-length vectors.
///
/// Encoding blocks; callers run it off the async workers.
pub trait SentenceEncoder: Send {
    fn encode(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Loading blocks too, often on a download.
pub trait ModelLoader: Send + Sync {
    fn load(&self, identifier: &str) -> anyhow::Result<Box<dyn SentenceEncoder>>;
}

impl SentenceEncoder for SentenceEmbeddingsModel {
    fn encode(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(SentenceEmbeddingsModel::encode(self, texts)?)
    }
}

/// Loads sentence-transformers checkpoints through rust-bert.
///
/// Checkpoints that rust-bert ships converted weights for are fetched from the
/// hub and cached by rust-bert itself. Any other identifier is expected under
/// `model_dir/<identifier>` as a directory of converted weights
/// (`rust_model.ot`, `config.json`, tokenizer files, pooling config).
pub struct RustBertLoader {
    model_dir: PathBuf,
}

impl RustBertLoader {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        RustBertLoader {
            model_dir: model_dir.into(),
        }
    }

    pub fn local_path(&self, identifier: &str) -> PathBuf {
        self.model_dir.join(identifier)
    }
}

impl ModelLoader for RustBertLoader {
    fn load(&self, identifier: &str) -> anyhow::Result<Box<dyn SentenceEncoder>> {
        let model = match pretrained_type(identifier) {
            Some(model_type) => SentenceEmbeddingsBuilder::remote(model_type)
                .create_model()
                .with_context(|| format!("fetching pretrained model {identifier}"))?,
            None => {
                let path = self.local_path(identifier);
                ensure_dir(&path)?;
                SentenceEmbeddingsBuilder::local(&path)
                    .create_model()
                    .with_context(|| format!("loading model from {}", path.display()))?
            }
        };
        Ok(Box::new(model))
    }
}

fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        anyhow::bail!(
            "no pretrained weights known for this model and {} is not a directory",
            path.display()
        );
    }
    Ok(())
}

/// Identifiers rust-bert can fetch without a local conversion step.
pub fn pretrained_type(identifier: &str) -> Option<SentenceEmbeddingsModelType> {
    let model_type = match identifier {
        "sentence-transformers/all-MiniLM-L6-v2" => SentenceEmbeddingsModelType::AllMiniLmL6V2,
        "sentence-transformers/all-MiniLM-L12-v2" => SentenceEmbeddingsModelType::AllMiniLmL12V2,
        "sentence-transformers/all-distilroberta-v1" => {
            SentenceEmbeddingsModelType::AllDistilrobertaV1
        }
        "sentence-transformers/bert-base-nli-mean-tokens" => {
            SentenceEmbeddingsModelType::BertBaseNliMeanTokens
        }
        "sentence-transformers/distiluse-base-multilingual-cased" => {
            SentenceEmbeddingsModelType::DistiluseBaseMultilingualCased
        }
        "sentence-transformers/paraphrase-albert-small-v2" => {
            SentenceEmbeddingsModelType::ParaphraseAlbertSmallV2
        }
        "sentence-transformers/sentence-t5-base" => SentenceEmbeddingsModelType::SentenceT5Base,
        _ => return None,
    };
    Some(model_type)
}

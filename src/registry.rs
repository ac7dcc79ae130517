//! Static table of model aliases accepted by the `model_name` query parameter.

use std::collections::BTreeMap;

use lazy_static::lazy_static;

/// 384 dimensions.
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

lazy_static! {
    static ref AVAILABLE_MODELS: BTreeMap<&'static str, &'static str> = {
        let mut models = BTreeMap::new();
        models.insert("minilm", DEFAULT_MODEL);
        models.insert("bge-small", "BAAI/bge-small-en");
        models
    };
}

pub fn available_models() -> BTreeMap<String, String> {
    AVAILABLE_MODELS
        .iter()
        .map(|(alias, identifier)| (alias.to_string(), identifier.to_string()))
        .collect()
}

/// Maps an alias to its model identifier. Missing or unknown aliases fall
/// back to [`DEFAULT_MODEL`].
pub fn resolve(model_name: Option<&str>) -> &'static str {
    model_name
        .and_then(|name| AVAILABLE_MODELS.get(name).copied())
        .unwrap_or(DEFAULT_MODEL)
}

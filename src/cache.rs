use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{error, info};

use crate::encoder::{ModelLoader, SentenceEncoder};
use crate::error::{Result, ServiceError};

pub type SharedEncoder = Arc<Mutex<Box<dyn SentenceEncoder>>>;

/// Loaded models keyed by identifier. Entries are added on first use and
/// never evicted.
pub struct ModelCache {
    loader: Box<dyn ModelLoader>,
    models: Mutex<HashMap<String, SharedEncoder>>,
    loading: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// A panic in the library while a lock is held leaves the data intact, so
/// poisoned locks are taken over rather than failing every later request.
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ModelCache {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        ModelCache {
            loader: Box::new(loader),
            models: Mutex::new(HashMap::new()),
            loading: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, identifier: &str) -> Option<SharedEncoder> {
        lock(&self.models).get(identifier).cloned()
    }

    /// Returns the model for `identifier`, loading it on first use.
    ///
    /// Concurrent first requests for one identifier load it once; loads of
    /// other identifiers and readers of the map do not wait on it. Blocks;
    /// call from a blocking context.
    pub fn get_or_load(&self, identifier: &str) -> Result<SharedEncoder> {
        if let Some(model) = self.cached(identifier) {
            return Ok(model);
        }

        let slot = lock(&self.loading)
            .entry(identifier.to_owned())
            .or_default()
            .clone();
        let _loading = lock(&slot);

        if let Some(model) = self.cached(identifier) {
            return Ok(model);
        }

        info!(model = identifier, "loading model");
        let started = Instant::now();
        let encoder = self.loader.load(identifier).map_err(|e| {
            error!(model = identifier, error = %e, "model load failed");
            ServiceError::ModelLoad {
                identifier: identifier.to_owned(),
                reason: format!("{e:#}"),
            }
        })?;
        info!(
            model = identifier,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "model loaded"
        );

        let model = Arc::new(Mutex::new(encoder));
        lock(&self.models).insert(identifier.to_owned(), model.clone());
        Ok(model)
    }

    /// Identifiers of every model loaded so far, sorted. Does not wait for
    /// loads in progress.
    pub fn loaded(&self) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.models).keys().cloned().collect();
        keys.sort();
        keys
    }
}

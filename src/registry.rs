// File: src/registry.rs
//! Keyed collection of independent classifiers backed by a data directory.

use crate::config::RegistryConfig;
use crate::core::model::Model;
use crate::error::{LoadError, RegistryError};
use crate::persistence::MODEL_FILE_EXTENSION;
use crate::tokenizer::Tokenizer;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of [`Registry::resolve`].
#[derive(Debug, Clone)]
pub enum Resolved {
    /// The id was already registered.
    Existing(Arc<Model>),
    /// The id was missing and a fresh, empty model was registered for it.
    Created(Arc<Model>),
    /// The id was missing and creation was not requested.
    Missing,
}

impl Resolved {
    pub fn model(&self) -> Option<&Arc<Model>> {
        match self {
            Resolved::Existing(model) | Resolved::Created(model) => Some(model),
            Resolved::Missing => None,
        }
    }

    pub fn into_model(self) -> Option<Arc<Model>> {
        match self {
            Resolved::Existing(model) | Resolved::Created(model) => Some(model),
            Resolved::Missing => None,
        }
    }

    pub fn existed_before(&self) -> bool {
        matches!(self, Resolved::Existing(_))
    }
}

/// What startup discovery found in the data directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Ids loaded, sorted.
    pub loaded: Vec<String>,
    /// Model files that could not be read and were skipped.
    pub failed: Vec<LoadError>,
}

pub struct Registry {
    tokenizer: Arc<dyn Tokenizer>,
    data_dir: PathBuf,
    models: Mutex<HashMap<String, Arc<Model>>>,
    discovery: Discovery,
}

impl Registry {
    /// Creates the data directory if needed and loads every `<id>.bc` file
    /// directly inside it. Subdirectories and other files are ignored.
    pub fn open(config: &RegistryConfig, tokenizer: Arc<dyn Tokenizer>) -> Result<Self, RegistryError> {
        let data_dir = config.data_dir.clone();
        let scan_err = |source| RegistryError::Scan {
            path: data_dir.clone(),
            source,
        };

        fs::create_dir_all(&data_dir).map_err(scan_err)?;

        let mut models = HashMap::new();
        let mut discovery = Discovery::default();

        for entry in fs::read_dir(&data_dir).map_err(scan_err)? {
            let entry = entry.map_err(scan_err)?;
            let path = entry.path();
            // Follows symlinks, so a linked `<id>.bc` is loaded like a file.
            if !path.is_file() {
                continue;
            }
            let Some(id) = model_id(&path) else {
                continue;
            };

            match Model::load(id.clone(), &path, Arc::clone(&tokenizer)) {
                Ok(model) => {
                    tracing::debug!(classifier_id = %id, path = %path.display(), "classifier loaded");
                    models.insert(id.clone(), Arc::new(model));
                    discovery.loaded.push(id);
                }
                Err(err) if config.strict_discovery => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(
                        classifier_id = %id,
                        error = %err,
                        "skipping unreadable classifier file"
                    );
                    discovery.failed.push(err);
                }
            }
        }

        discovery.loaded.sort();
        tracing::info!(
            data_dir = %data_dir.display(),
            loaded = discovery.loaded.len(),
            skipped = discovery.failed.len(),
            "classifier registry opened"
        );

        Ok(Self {
            tokenizer,
            data_dir,
            models: Mutex::new(models),
            discovery,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// Where the model for `id` is persisted.
    pub fn model_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{id}.{MODEL_FILE_EXTENSION}"))
    }

    /// Looks up `id`, registering an empty model for it when missing and
    /// `create_if_missing` is set. The map lock is released before returning.
    pub fn resolve(&self, id: &str, create_if_missing: bool) -> Result<Resolved, RegistryError> {
        validate_id(id)?;

        let mut models = self.models.lock();
        if let Some(model) = models.get(id) {
            return Ok(Resolved::Existing(Arc::clone(model)));
        }
        if !create_if_missing {
            return Ok(Resolved::Missing);
        }

        let model = Arc::new(Model::new(id, self.model_path(id), Arc::clone(&self.tokenizer)));
        models.insert(id.to_string(), Arc::clone(&model));
        tracing::debug!(classifier_id = %id, "classifier created");

        Ok(Resolved::Created(model))
    }

    /// Shorthand for `resolve(id, false)` that treats a missing id as an error.
    pub fn get(&self, id: &str) -> Result<Arc<Model>, RegistryError> {
        self.resolve(id, false)?
            .into_model()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Deletes the model's file and unregisters it. If the file cannot be
    /// deleted the model stays registered.
    ///
    /// The model's training claim is held for the whole operation and the
    /// model is marked removed before it is released, so handles held
    /// elsewhere can no longer save the file back.
    pub fn remove(&self, id: &str) -> Result<(), RegistryError> {
        let mut models = self.models.lock();
        let model = models
            .get(id)
            .map(Arc::clone)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        let Some(_claim) = model.claim_training() else {
            return Err(RegistryError::TrainingInProgress(id.to_string()));
        };

        model.remove_storage().map_err(|source| RegistryError::Remove {
            id: id.to_string(),
            source,
        })?;
        model.mark_removed();
        models.remove(id);

        tracing::info!(classifier_id = %id, "classifier removed");
        Ok(())
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.models.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.models.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("data_dir", &self.data_dir)
            .field("models", &self.len())
            .finish_non_exhaustive()
    }
}

/// The id a model file is registered under, if the file carries the suffix.
fn model_id(path: &Path) -> Option<String> {
    if path.extension()? != MODEL_FILE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    validate_id(stem).ok()?;
    Some(stem.to_string())
}

/// Ids are used as file names inside the data directory.
fn validate_id(id: &str) -> Result<(), RegistryError> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(RegistryError::InvalidId(id.to_string()));
    }
    Ok(())
}

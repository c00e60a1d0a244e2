// File: src/core/model.rs
use crate::core::scoring::{self, ClassScore};
use crate::core::types::{ClassTable, Document, TrainSummary};
use crate::error::{ClassifyError, LoadError, TrainError};
use crate::learning::{accumulate_batch, TokenizedDocument};
use crate::persistence::{load_from_disk, save_to_disk};
use crate::tokenizer::Tokenizer;
use parking_lot::RwLock;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One independently trainable classifier: a class -> word counts table
/// plus the file it is persisted to.
///
/// Training and classification exclude each other. `train` claims the
/// training flag before doing anything and holds the table's write lock
/// while mutating and saving it; `classify` refuses to run while the flag
/// is set and scores under the read lock.
///
/// Once removed from its registry a model never writes its file again;
/// handles still held elsewhere get [`TrainError::Removed`] from `train`.
pub struct Model {
    id: String,
    storage_path: PathBuf,
    tokenizer: Arc<dyn Tokenizer>,
    classes: RwLock<ClassTable>,
    training: AtomicBool,
    removed: AtomicBool,
}

/// Clears the training flag on every exit path of `train`.
pub(crate) struct TrainingGuard<'a>(&'a AtomicBool);

impl Drop for TrainingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Model {
    /// An empty model. Nothing touches the disk until the first training.
    pub fn new(id: impl Into<String>, storage_path: impl Into<PathBuf>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::with_classes(id, storage_path, tokenizer, ClassTable::new())
    }

    pub fn load(
        id: impl Into<String>,
        storage_path: impl Into<PathBuf>,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> Result<Self, LoadError> {
        let storage_path = storage_path.into();
        let classes = load_from_disk(&storage_path)?;
        Ok(Self::with_classes(id, storage_path, tokenizer, classes))
    }

    fn with_classes(
        id: impl Into<String>,
        storage_path: impl Into<PathBuf>,
        tokenizer: Arc<dyn Tokenizer>,
        classes: ClassTable,
    ) -> Self {
        Self {
            id: id.into(),
            storage_path: storage_path.into(),
            tokenizer,
            classes: RwLock::new(classes),
            training: AtomicBool::new(false),
            removed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn is_training(&self) -> bool {
        self.training.load(Ordering::Acquire)
    }

    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::Acquire)
    }

    /// Sets the training flag unless it is already set. Removal claims it
    /// too, so deleting the file cannot interleave with a save.
    pub(crate) fn claim_training(&self) -> Option<TrainingGuard<'_>> {
        self.training
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TrainingGuard(&self.training))
    }

    /// Adds the documents' word counts to their classes and saves the table.
    ///
    /// The batch is all-or-nothing with respect to tokenization: every
    /// document is tokenized before the table is touched, so a tokenizer
    /// failure leaves both memory and disk unchanged. A save failure is
    /// reported but the in-memory update is kept.
    pub fn train(&self, docs: &[Document]) -> Result<TrainSummary, TrainError> {
        let _guard = self.claim_training().ok_or(TrainError::TrainingInProgress)?;
        if self.is_removed() {
            return Err(TrainError::Removed);
        }

        tracing::debug!(classifier_id = %self.id, documents = docs.len(), "training started");

        let mut tokenized = Vec::with_capacity(docs.len());
        for doc in docs {
            tokenized.push(TokenizedDocument {
                class: &doc.class,
                counts: self.tokenizer.tokenize(&doc.text)?,
            });
        }

        let mut classes = self.classes.write();
        if self.is_removed() {
            return Err(TrainError::Removed);
        }
        let summary = accumulate_batch(&mut classes, tokenized);

        if let Err(err) = save_to_disk(&classes, &self.storage_path) {
            tracing::error!(
                classifier_id = %self.id,
                path = %self.storage_path.display(),
                error = %err,
                "failed to save classifier, in-memory counts kept"
            );
            return Err(err.into());
        }

        tracing::info!(
            classifier_id = %self.id,
            documents = summary.documents,
            words_added = summary.words_added,
            new_classes = summary.new_classes,
            classes = classes.len(),
            "training finished"
        );
        Ok(summary)
    }

    /// Log-likelihood of the text under every class with training data,
    /// in ascending class-name order.
    pub fn scores(&self, text: &str) -> Result<Vec<ClassScore>, ClassifyError> {
        if self.is_training() {
            return Err(ClassifyError::TrainingInProgress);
        }

        let words = self.tokenizer.tokenize(text)?;

        let classes = self.classes.try_read().ok_or(ClassifyError::TrainingInProgress)?;
        if self.is_training() {
            return Err(ClassifyError::TrainingInProgress);
        }

        let has_data = classes.values().any(|counts| counts.values().any(|&c| c > 0));
        if !has_data {
            return Err(ClassifyError::NoTrainingData);
        }
        if words.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        Ok(scoring::score_classes(&classes, words.keys().map(String::as_str)))
    }

    /// The most probable class for the text.
    pub fn classify(&self, text: &str) -> Result<String, ClassifyError> {
        let scores = self.scores(text)?;
        scoring::best(&scores)
            .map(|best| best.class.clone())
            .ok_or(ClassifyError::NoTrainingData)
    }

    /// A copy of the current table.
    pub fn snapshot(&self) -> ClassTable {
        self.classes.read().clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.read().keys().cloned().collect()
    }

    /// Deletes the persisted file. A model that was never saved has none,
    /// which counts as success. Callers hold the training claim.
    pub(crate) fn remove_storage(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.storage_path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }

    /// Must be called while holding the training claim.
    pub(crate) fn mark_removed(&self) {
        self.removed.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("storage_path", &self.storage_path)
            .field("training", &self.is_training())
            .field("removed", &self.is_removed())
            .finish_non_exhaustive()
    }
}

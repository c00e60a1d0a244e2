// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence count of each normalized token within one scope
/// (a single document, or everything a class has been trained on).
///
/// Ordered so that iteration, and therefore the persisted encoding,
/// is the same on every run.
pub type WordCounts = BTreeMap<String, u64>;

/// Class name -> accumulated word counts for that class.
pub type ClassTable = BTreeMap<String, WordCounts>;

/// A labeled training document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub class: String,
    pub text: String,
}

impl Document {
    pub fn new(class: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            text: text.into(),
        }
    }
}

/// What a successful training call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrainSummary {
    pub documents: usize,
    /// Total token occurrences added across all classes.
    pub words_added: u64,
    /// Classes that did not exist before this call.
    pub new_classes: usize,
}

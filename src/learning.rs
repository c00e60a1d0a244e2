// File: src/learning.rs
use crate::core::types::{ClassTable, TrainSummary, WordCounts};

/// A tokenized training document, ready to be folded into a table.
pub struct TokenizedDocument<'a> {
    pub class: &'a str,
    pub counts: WordCounts,
}

/// Adds one document's word counts into its class, creating the class if needed.
/// Returns how many token occurrences were added and whether the class is new.
pub fn accumulate(classes: &mut ClassTable, class: &str, counts: WordCounts) -> (u64, bool) {
    let mut added: u64 = 0;
    let new_class = !classes.contains_key(class);
    let class_counts = classes.entry(class.to_string()).or_default();

    for (word, count) in counts {
        let slot = class_counts.entry(word).or_insert(0);
        *slot = slot.saturating_add(count);
        added = added.saturating_add(count);
    }

    (added, new_class)
}

/// Folds a whole batch into the table.
pub fn accumulate_batch<'a>(
    classes: &mut ClassTable,
    docs: impl IntoIterator<Item = TokenizedDocument<'a>>,
) -> TrainSummary {
    let mut summary = TrainSummary::default();

    for doc in docs {
        let (added, new_class) = accumulate(classes, doc.class, doc.counts);
        summary.documents += 1;
        summary.words_added = summary.words_added.saturating_add(added);
        if new_class {
            summary.new_classes += 1;
        }
    }

    summary
}

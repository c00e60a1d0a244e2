// File: src/evaluation.rs
//! Measuring a trained model against labeled documents.

use crate::core::model::Model;
use crate::core::types::Document;
use crate::error::ClassifyError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassOutcome {
    pub total: usize,
    pub errors: usize,
}

impl ClassOutcome {
    /// Percentage of misclassified documents.
    pub fn fail_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.errors as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationReport {
    pub classes: BTreeMap<String, ClassOutcome>,
    pub overall: ClassOutcome,
}

/// Classifies every document and compares against its label.
pub fn evaluate(model: &Model, docs: &[Document]) -> Result<EvaluationReport, ClassifyError> {
    let mut report = EvaluationReport::default();

    for doc in docs {
        let predicted = model.classify(&doc.text)?;
        let outcome = report.classes.entry(doc.class.clone()).or_default();
        outcome.total += 1;
        report.overall.total += 1;
        if predicted != doc.class {
            outcome.errors += 1;
            report.overall.errors += 1;
        }
    }

    Ok(report)
}

impl EvaluationReport {
    pub fn log(&self) {
        for (class, outcome) in &self.classes {
            tracing::info!(
                class = %class,
                total_docs = outcome.total,
                errors = outcome.errors,
                fail_rate = outcome.fail_rate(),
                "class test stats"
            );
        }
        tracing::info!(
            total_docs = self.overall.total,
            total_errors = self.overall.errors,
            total_fail_rate = self.overall.fail_rate(),
            "total stats"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::PlainTokenizer;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn counts_errors_per_class() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let model = Model::new("eval", dir.path().join("eval.bc"), Arc::new(PlainTokenizer));
        model
            .train(&[
                Document::new("sports", "goal match referee"),
                Document::new("politics", "vote election parliament"),
            ])
            .unwrap();

        let report = evaluate(
            &model,
            &[
                Document::new("sports", "goal"),
                Document::new("sports", "vote"),
                Document::new("politics", "election"),
            ],
        )
        .unwrap();

        assert_eq!(report.classes["sports"], ClassOutcome { total: 2, errors: 1 });
        assert_eq!(report.classes["politics"], ClassOutcome { total: 1, errors: 0 });
        assert_eq!(report.overall, ClassOutcome { total: 3, errors: 1 });
        assert_eq!(report.classes["sports"].fail_rate(), 50.0);
    }

    #[test]
    fn empty_outcome_has_zero_fail_rate() {
        assert_eq!(ClassOutcome::default().fail_rate(), 0.0);
    }
}

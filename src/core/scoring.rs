// File: src/core/scoring.rs
//! Multinomial naive Bayes scoring with uniform class priors.

use crate::core::types::ClassTable;

/// Probability substituted for a word a class has never seen, so that
/// `ln` stays finite and one unknown word cannot rule a class out.
pub const DEFAULT_WORD_PROB: f64 = 1e-11;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassScore {
    pub class: String,
    /// Sum of `ln(p(word | class))` over the distinct query words.
    pub score: f64,
}

/// Scores every class that has at least one counted word, in ascending
/// class-name order. Each distinct word contributes once regardless of
/// how often it appeared in the query.
pub fn score_classes<'w>(
    classes: &ClassTable,
    words: impl IntoIterator<Item = &'w str> + Clone,
) -> Vec<ClassScore> {
    classes
        .iter()
        .filter_map(|(class, counts)| {
            let total = counts.values().fold(0u64, |sum, &c| sum.saturating_add(c));
            if total == 0 {
                return None;
            }

            let score = words
                .clone()
                .into_iter()
                .map(|word| {
                    let count = counts.get(word).copied().unwrap_or(0);
                    let mut prob = count as f64 / total as f64;
                    if prob == 0.0 {
                        prob = DEFAULT_WORD_PROB;
                    }
                    prob.ln()
                })
                .sum();

            Some(ClassScore {
                class: class.clone(),
                score,
            })
        })
        .collect()
}

/// Picks the highest score. Input is expected in ascending name order and
/// only a strictly greater score replaces the current best, so ties go to
/// the lexicographically smallest class.
pub fn best(scores: &[ClassScore]) -> Option<&ClassScore> {
    let mut best: Option<&ClassScore> = None;
    for candidate in scores {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::WordCounts;

    fn counts(pairs: &[(&str, u64)]) -> WordCounts {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    fn news() -> ClassTable {
        ClassTable::from([
            ("sports".to_string(), counts(&[("win", 10), ("lose", 5)])),
            ("politics".to_string(), counts(&[("vote", 8), ("win", 1)])),
        ])
    }

    fn score_of(scores: &[ClassScore], class: &str) -> f64 {
        scores.iter().find(|s| s.class == class).unwrap().score
    }

    #[test]
    fn known_word_scores_are_log_relative_frequency() {
        let scores = score_classes(&news(), ["win"]);

        assert!((score_of(&scores, "sports") - (10.0f64 / 15.0).ln()).abs() < 1e-12);
        assert!((score_of(&scores, "politics") - (1.0f64 / 9.0).ln()).abs() < 1e-12);
        assert_eq!(best(&scores).unwrap().class, "sports");
    }

    #[test]
    fn unknown_word_contributes_floor_probability() {
        let scores = score_classes(&news(), ["economy"]);
        let floor = DEFAULT_WORD_PROB.ln();

        assert!(floor.is_finite());
        assert_eq!(score_of(&scores, "sports"), floor);
        assert_eq!(score_of(&scores, "politics"), floor);
    }

    #[test]
    fn ties_resolve_to_smallest_class_name() {
        let scores = score_classes(&news(), ["economy"]);
        assert_eq!(best(&scores).unwrap().class, "politics");
    }

    #[test]
    fn classes_without_words_are_not_scored() {
        let mut classes = news();
        classes.insert("silent".to_string(), WordCounts::new());

        let scores = score_classes(&classes, ["win"]);
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| s.class != "silent"));
    }

    #[test]
    fn huge_class_totals_do_not_overflow() {
        let classes = ClassTable::from([(
            "big".to_string(),
            counts(&[("a", u64::MAX), ("b", u64::MAX)]),
        )]);

        let scores = score_classes(&classes, ["a"]);
        assert_eq!(scores.len(), 1);
        assert!(scores[0].score.is_finite());
    }

    #[test]
    fn best_of_nothing_is_none() {
        assert!(best(&[]).is_none());
    }
}

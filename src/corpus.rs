// File: src/corpus.rs
//! Training document files and simple per-class statistics over them.

use crate::core::types::Document;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a JSON array of `{"class": .., "text": ..}` documents.
pub fn load_documents(path: &Path) -> Result<Vec<Document>, Box<dyn std::error::Error + Send + Sync>> {
    let file = File::open(path)?;
    let docs = serde_json::from_reader(BufReader::new(file))?;
    Ok(docs)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClassStats {
    pub documents: usize,
    /// Mean text length in bytes.
    pub average_text_length: f64,
}

/// Document count and average text length per class.
pub fn class_stats(docs: &[Document]) -> BTreeMap<String, ClassStats> {
    let mut totals: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for doc in docs {
        let (count, length) = totals.entry(doc.class.clone()).or_default();
        *count += 1;
        *length += doc.text.len();
    }

    totals
        .into_iter()
        .map(|(class, (documents, length))| {
            let stats = ClassStats {
                documents,
                average_text_length: length as f64 / documents as f64,
            };
            (class, stats)
        })
        .collect()
}

pub fn log_stats(docs: &[Document]) {
    for (class, stats) in class_stats(docs) {
        tracing::info!(
            class = %class,
            documents = stats.documents,
            average_text_length = stats.average_text_length,
            "class stats"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stats_per_class() {
        let docs = vec![
            Document::new("sports", "abcd"),
            Document::new("sports", "ab"),
            Document::new("politics", "abcdef"),
        ];

        let stats = class_stats(&docs);
        assert_eq!(stats["sports"], ClassStats { documents: 2, average_text_length: 3.0 });
        assert_eq!(stats["politics"], ClassStats { documents: 1, average_text_length: 6.0 });
    }

    #[test]
    fn loads_json_documents() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join("docs.json");
        std::fs::write(
            &path,
            r#"[{"class":"sports","text":"goal"},{"class":"politics","text":"vote"}]"#,
        )
        .unwrap();

        let docs = load_documents(&path).expect("load");
        assert_eq!(
            docs,
            vec![Document::new("sports", "goal"), Document::new("politics", "vote")]
        );
    }
}

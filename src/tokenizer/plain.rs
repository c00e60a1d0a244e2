// File: src/tokenizer/plain.rs
use super::{count_token, Tokenizer};
use crate::core::types::WordCounts;
use crate::error::TokenizeError;

/// In-process tokenizer: splits on anything that is not alphanumeric.
/// No lemmatization, so inflected forms count as distinct words.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, text: &str) -> Result<WordCounts, TokenizeError> {
        let mut counts = WordCounts::new();
        for raw in text.split(|c: char| !c.is_alphanumeric()) {
            count_token(&mut counts, raw);
        }
        Ok(counts)
    }
}

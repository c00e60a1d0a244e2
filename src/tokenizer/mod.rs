// File: src/tokenizer/mod.rs
//! Turning raw text into normalized word counts.

pub mod mystem;
pub mod plain;
mod stopwords;

pub use mystem::MystemTokenizer;
pub use plain::PlainTokenizer;
pub use stopwords::is_stop_word;

use crate::core::types::WordCounts;
use crate::error::TokenizeError;

/// Produces case-folded, stop-word-free token counts for a piece of text.
///
/// Implementations must return an empty table for empty text.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<WordCounts, TokenizeError>;
}

/// Normalizes one raw token and counts it unless it is empty or a stop word.
pub(crate) fn count_token(counts: &mut WordCounts, raw: &str) {
    let token = raw.trim().to_lowercase();
    if token.is_empty() || is_stop_word(&token) {
        return;
    }
    *counts.entry(token).or_insert(0) += 1;
}

//! Accepted parallel sentence pairs.
use crate::lang::LangPair;

/// A trimmed, oriented, deduplicated pair of sentences.
///
/// Only built by [crate::filtering::QualityFilter::admit].
#[derive(Debug, Clone, PartialEq)]
pub struct SentencePair {
    source_text: String,
    target_text: String,
    pair: LangPair,
}

impl SentencePair {
    pub(crate) fn new(source_text: String, target_text: String, pair: LangPair) -> Self {
        Self {
            source_text,
            target_text,
            pair,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    pub fn pair(&self) -> &LangPair {
        &self.pair
    }
}

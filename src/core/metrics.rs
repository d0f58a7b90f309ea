//! Scalar text metrics: lines, words, characters, unique words, word length

use std::collections::HashSet;

use crate::core::model::{DerivedRatios, MetricsSnapshot};
use crate::core::tokenizer::{normalize, split_lines, token_len};
use crate::core::util::{ratio, round_one_decimal};

/// Computes statistics over one document's raw content
#[derive(Debug, Clone)]
pub struct TextMetrics<'a> {
    content: &'a str,
    tokens: Vec<String>,
}

impl<'a> TextMetrics<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            tokens: normalize(content),
        }
    }

    /// Lines split on universal newlines; empty content has none
    pub fn count_lines(&self) -> usize {
        split_lines(self.content).len()
    }

    pub fn count_words(&self) -> usize {
        self.tokens.len()
    }

    /// Raw character count, punctuation and whitespace included
    pub fn count_characters(&self) -> usize {
        self.content.chars().count()
    }

    pub fn count_unique_words(&self) -> usize {
        self.tokens.iter().collect::<HashSet<_>>().len()
    }

    /// Mean token length rounded to one decimal, 0 without tokens
    pub fn avg_word_length(&self) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        let total: usize = self.tokens.iter().map(|t| token_len(t)).sum();
        round_one_decimal(total as f64 / self.tokens.len() as f64)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines: self.count_lines(),
            words: self.count_words(),
            characters: self.count_characters(),
            unique_words: self.count_unique_words(),
            avg_word_length: self.avg_word_length(),
        }
    }

    pub fn ratios(&self) -> DerivedRatios {
        derive_ratios(&self.snapshot())
    }
}

/// Words and characters per line; both 0 when there are no lines
pub fn derive_ratios(snapshot: &MetricsSnapshot) -> DerivedRatios {
    DerivedRatios {
        words_per_line: ratio(snapshot.words, snapshot.lines),
        chars_per_line: ratio(snapshot.characters, snapshot.lines),
    }
}

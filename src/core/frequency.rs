//! Word frequency table: counting, ranking, top-N and predicate filtering

use once_cell::unsync::OnceCell;
use std::collections::HashMap;

use crate::core::model::{FrequencyRow, FrequencyTable};
use crate::core::tokenizer::{normalize, token_len};

/// A boolean test over a single word
pub trait WordPredicate {
    fn matches(&self, word: &str) -> bool;
}

impl<F> WordPredicate for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, word: &str) -> bool {
        self(word)
    }
}

/// Words strictly longer than the given number of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongerThan(pub usize);

impl WordPredicate for LongerThan {
    fn matches(&self, word: &str) -> bool {
        token_len(word) > self.0
    }
}

/// Frequency engine over one document; the table is built once and cached
#[derive(Debug)]
pub struct WordFrequency {
    tokens: Vec<String>,
    table: OnceCell<FrequencyTable>,
}

impl WordFrequency {
    pub fn new(content: &str) -> Self {
        Self::from_tokens(normalize(content))
    }

    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            table: OnceCell::new(),
        }
    }

    /// Build (or return the cached) ranked table
    pub fn build_frequency_table(&self) -> &FrequencyTable {
        self.table.get_or_init(|| rank_tokens(&self.tokens))
    }

    /// The first `n` rows of the table
    pub fn top_n(&self, n: usize) -> &[FrequencyRow] {
        let rows = self.build_frequency_table().rows();
        &rows[..n.min(rows.len())]
    }

    /// Rows whose word satisfies `predicate`, in table order
    pub fn filter<P>(&self, predicate: P) -> Vec<&FrequencyRow>
    where
        P: WordPredicate,
    {
        let table = self.build_frequency_table();
        if table.is_empty() {
            return Vec::new();
        }
        table
            .rows()
            .iter()
            .filter(|row| predicate.matches(&row.word))
            .collect()
    }
}

/// Count tokens and stable-sort by count descending so that equal counts
/// keep first-occurrence order
fn rank_tokens(tokens: &[String]) -> FrequencyTable {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counted: Vec<(&str, usize)> = Vec::new();

    for token in tokens {
        match positions.get(token.as_str()) {
            Some(&pos) => counted[pos].1 += 1,
            None => {
                positions.insert(token.as_str(), counted.len());
                counted.push((token.as_str(), 1));
            }
        }
    }

    counted.sort_by(|a, b| b.1.cmp(&a.1));

    let rows = counted
        .into_iter()
        .enumerate()
        .map(|(i, (word, count))| FrequencyRow {
            rank: i + 1,
            word: word.to_string(),
            count,
        })
        .collect();

    FrequencyTable::from_ranked(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn pairs(rows: &[FrequencyRow]) -> Vec<(&str, usize)> {
        rows.iter().map(|r| (r.word.as_str(), r.count)).collect()
    }

    #[test]
    fn test_ties_follow_first_occurrence() {
        let freq = WordFrequency::new("b a a b c");
        let table = freq.build_frequency_table();
        assert_eq!(pairs(table.rows()), vec![("b", 2), ("a", 2), ("c", 1)]);
        assert_eq!(
            table.rows().iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_counts_sum_to_word_count() {
        let text = "It was the best of times, it was the worst of times.";
        let freq = WordFrequency::new(text);
        assert_eq!(freq.build_frequency_table().total(), normalize(text).len());
    }

    #[test]
    fn test_build_is_cached() {
        let freq = WordFrequency::new("one two two three three three");
        let first = freq.build_frequency_table() as *const FrequencyTable;
        let second = freq.build_frequency_table() as *const FrequencyTable;
        assert_eq!(first, second);
        assert_eq!(
            pairs(freq.build_frequency_table().rows()),
            vec![("three", 3), ("two", 2), ("one", 1)]
        );
    }

    #[test]
    fn test_top_n() {
        let freq = WordFrequency::new("a a a b b c d");
        assert_eq!(pairs(freq.top_n(2)), vec![("a", 3), ("b", 2)]);
        assert_eq!(freq.top_n(10).len(), 4);
        assert!(freq.top_n(0).is_empty());
    }

    #[test]
    fn test_filter_keeps_rank() {
        let freq = WordFrequency::new("cat house house dog");
        let long = freq.filter(|w: &str| w.len() > 3);
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].word, "house");
        assert_eq!(long[0].count, 2);
        assert_eq!(long[0].rank, 1);

        let table = freq.build_frequency_table();
        assert_eq!(&table.rows()[0], long[0]);
    }

    #[test]
    fn test_filter_preserves_table_order() {
        let freq = WordFrequency::new("zebra apple apple mango zebra zebra kiwi");
        let words: Vec<_> = freq
            .filter(LongerThan(4))
            .into_iter()
            .map(|r| r.word.as_str())
            .collect();
        assert_eq!(words, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_longer_than_counts_chars() {
        assert!(LongerThan(3).matches("café"));
        assert!(!LongerThan(4).matches("café"));
    }

    #[test]
    fn test_empty_content() {
        let freq = WordFrequency::new("");
        assert!(freq.build_frequency_table().is_empty());
        assert!(freq.top_n(10).is_empty());

        let calls = Cell::new(0);
        let filtered = freq.filter(|_: &str| {
            calls.set(calls.get() + 1);
            true
        });
        assert!(filtered.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_punctuation_only_content() {
        let freq = WordFrequency::new("... --- !!!");
        assert!(freq.build_frequency_table().is_empty());
    }
}

//! Analysis data model
//!
//! Every analysis run produces these values fresh from one input file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Which artifact a write failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Artifact {
    Report,
    Csv,
}

impl Artifact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Artifact::Report => "report",
            Artifact::Csv => "CSV",
        }
    }
}

/// Errors raised while loading input or writing artifacts
#[derive(Debug, Error)]
pub enum TextError {
    #[error("The file '{}' was not found.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save {} to '{}': {source}", .artifact.as_str(), .path.display())]
    Write {
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save CSV to '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to save chart to '{}': {source}", .path.display())]
    Chart {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to load the chart font: {source}")]
    Font {
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

/// One ranked row of the frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// 1-based position in the full table
    pub rank: usize,
    pub word: String,
    pub count: usize,
}

/// Ranked word counts: count descending, first occurrence breaks ties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    /// Build from rows that are already in ranked order
    pub fn from_ranked(rows: Vec<FrequencyRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts (equals the token count of the source)
    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }
}

/// Scalar statistics for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub lines: usize,
    pub words: usize,
    pub characters: usize,
    pub unique_words: usize,
    /// Mean token length, one decimal place
    pub avg_word_length: f64,
}

/// Per-line ratios derived from a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedRatios {
    pub words_per_line: f64,
    pub chars_per_line: f64,
}

/// Everything the console renderer needs about one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub file: String,
    pub encoding: String,
    pub metrics: MetricsSnapshot,
    pub ratios: DerivedRatios,
    pub top_words: Vec<FrequencyRow>,
    pub long_word_threshold: usize,
    pub long_words: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: usize, word: &str, count: usize) -> FrequencyRow {
        FrequencyRow {
            rank,
            word: word.to_string(),
            count,
        }
    }

    #[test]
    fn test_table_total() {
        let table = FrequencyTable::from_ranked(vec![row(1, "the", 3), row(2, "cat", 1)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 4);
        assert_eq!(table.rows()[1].word, "cat");
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::default();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_not_found_message() {
        let err = TextError::NotFound {
            path: PathBuf::from("missing.txt"),
        };
        assert_eq!(err.to_string(), "The file 'missing.txt' was not found.");
    }

    #[test]
    fn test_write_error_names_artifact() {
        let err = TextError::Write {
            artifact: Artifact::Report,
            path: PathBuf::from("out/analysis_report.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("Failed to save report to"));
    }

    #[test]
    fn test_summary_serializes() {
        let summary = AnalysisSummary {
            file: "a.txt".to_string(),
            encoding: "utf-8".to_string(),
            metrics: MetricsSnapshot::default(),
            ratios: DerivedRatios::default(),
            top_words: vec![row(1, "a", 1)],
            long_word_threshold: 3,
            long_words: 0,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["top_words"][0]["word"], "a");
        assert_eq!(json["metrics"]["lines"], 0);
    }
}

//! Report module - Turns engine output into the three report artifacts
//!
//! Provides:
//! - text: the plain-text analysis report
//! - csv_export: the full word frequency table as CSV
//! - chart: a PNG bar chart of the top words
//! - font: chart text rasterized from an embedded TrueType font

pub mod chart;
pub mod csv_export;
pub mod font;
pub mod text;

use std::path::{Path, PathBuf};

use crate::core::file_reader::LoadedText;
use crate::core::frequency::{LongerThan, WordFrequency};
use crate::core::metrics::TextMetrics;
use crate::core::model::{AnalysisSummary, DerivedRatios, MetricsSnapshot, TextError};
use crate::core::render::compose_text_report;

/// Default artifact file names
pub const REPORT_FILE: &str = "analysis_report.txt";
pub const CSV_FILE: &str = "word_frequency.csv";
pub const CHART_FILE: &str = "top_10_words.png";

/// Rows shown in the text report and the chart
pub const TOP_WORDS: usize = 10;

/// Words longer than this many characters count as long
pub const DEFAULT_LONG_WORD_THRESHOLD: usize = 3;

/// Report generator over one analysis run
pub struct Report<'a> {
    file_name: String,
    encoding: String,
    metrics: MetricsSnapshot,
    ratios: DerivedRatios,
    words: &'a WordFrequency,
    long_word_threshold: usize,
}

impl<'a> Report<'a> {
    pub fn new(loaded: &LoadedText, metrics: &TextMetrics<'_>, words: &'a WordFrequency) -> Self {
        Self {
            file_name: loaded.file_name(),
            encoding: loaded.encoding().to_string(),
            metrics: metrics.snapshot(),
            ratios: metrics.ratios(),
            words,
            long_word_threshold: DEFAULT_LONG_WORD_THRESHOLD,
        }
    }

    pub fn with_long_word_threshold(mut self, threshold: usize) -> Self {
        self.long_word_threshold = threshold;
        self
    }

    /// Aggregate used by the text report and console rendering
    pub fn summary(&self) -> AnalysisSummary {
        let long_word_threshold = self.long_word_threshold;
        AnalysisSummary {
            file: self.file_name.clone(),
            encoding: self.encoding.clone(),
            metrics: self.metrics,
            ratios: self.ratios,
            top_words: self.words.top_n(TOP_WORDS).to_vec(),
            long_word_threshold,
            long_words: self.words.filter(LongerThan(long_word_threshold)).len(),
        }
    }

    /// Compose the text report and write it to `path`; the composed text is
    /// returned only when the write succeeded
    pub fn generate_text_report(&self, path: &Path) -> Result<String, TextError> {
        let report = compose_text_report(&self.summary());
        text::write_text_report(path, &report)?;
        tracing::info!(path = %path.display(), bytes = report.len(), "text report written");
        Ok(report)
    }

    /// Write every ranked row to `path`; returns the number of rows
    pub fn save_frequency_csv(&self, path: &Path) -> Result<usize, TextError> {
        let rows = self.words.build_frequency_table().rows();
        let written = csv_export::write_frequency_csv(path, rows)?;
        tracing::info!(path = %path.display(), rows = written, "frequency CSV written");
        Ok(written)
    }

    /// Render the top words as a bar chart; `None` when there is nothing to plot
    pub fn generate_chart(&self, path: &Path) -> Result<Option<PathBuf>, TextError> {
        let top = self.words.top_n(TOP_WORDS);
        if top.is_empty() {
            tracing::debug!("no words, chart skipped");
            return Ok(None);
        }
        let written = chart::write_bar_chart(path, top)?;
        tracing::info!(path = %path.display(), bars = top.len(), "chart written");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn analyse(content: &str) -> (LoadedText, WordFrequency) {
        let loaded = LoadedText::new(
            "notes/sample.txt",
            content.to_string(),
            Default::default(),
        );
        let words = WordFrequency::new(loaded.content());
        (loaded, words)
    }

    #[test]
    fn test_summary() {
        let (loaded, words) = analyse("The cat saw the house.\nThe house was big.");
        let metrics = TextMetrics::new(loaded.content());
        let report = Report::new(&loaded, &metrics, &words);

        let summary = report.summary();
        assert_eq!(summary.file, "sample.txt");
        assert_eq!(summary.encoding, "utf-8");
        assert_eq!(summary.metrics.lines, 2);
        assert_eq!(summary.metrics.words, 9);
        assert_eq!(summary.ratios.words_per_line, 4.5);
        assert_eq!(summary.top_words[0].word, "the");
        assert_eq!(summary.top_words[0].count, 3);
        assert_eq!(summary.top_words[1].word, "house");
        assert_eq!(summary.long_words, 1);
        assert_eq!(report.with_long_word_threshold(2).summary().long_words, 6);
    }

    #[test]
    fn test_top_words_capped_at_ten() {
        let content = (0..15)
            .map(|i| format!("word{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let (loaded, words) = analyse(&content);
        let metrics = TextMetrics::new(loaded.content());
        let report = Report::new(&loaded, &metrics, &words);
        assert_eq!(report.summary().top_words.len(), TOP_WORDS);
    }

    #[test]
    fn test_generate_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let (loaded, words) = analyse("b a a b c");
        let metrics = TextMetrics::new(loaded.content());
        let report = Report::new(&loaded, &metrics, &words);

        let text = report
            .generate_text_report(&dir.path().join(REPORT_FILE))
            .unwrap();
        assert!(text.ends_with(
            "1. b - 2 occurrences\n2. a - 2 occurrences\n3. c - 1 occurrences\n"
        ));

        let rows = report.save_frequency_csv(&dir.path().join(CSV_FILE)).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(
            fs::read_to_string(dir.path().join(CSV_FILE)).unwrap(),
            "Word,Frequency\nb,2\na,2\nc,1\n"
        );

        let chart = report.generate_chart(&dir.path().join(CHART_FILE)).unwrap();
        assert!(chart.is_some());
        assert!(dir.path().join(CHART_FILE).exists());
    }

    #[test]
    fn test_empty_content_skips_chart() {
        let dir = TempDir::new().unwrap();
        let (loaded, words) = analyse("");
        let metrics = TextMetrics::new(loaded.content());
        let report = Report::new(&loaded, &metrics, &words);

        assert!(report
            .generate_chart(&dir.path().join(CHART_FILE))
            .unwrap()
            .is_none());
        assert!(!dir.path().join(CHART_FILE).exists());

        let text = report
            .generate_text_report(&dir.path().join(REPORT_FILE))
            .unwrap();
        assert!(text.contains("Words per line: 0.0\n"));
    }

    #[test]
    fn test_failed_write_does_not_block_others() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let (loaded, words) = analyse("one two two");
        let metrics = TextMetrics::new(loaded.content());
        let report = Report::new(&loaded, &metrics, &words);

        assert!(report.generate_text_report(&missing.join(REPORT_FILE)).is_err());
        assert_eq!(report.save_frequency_csv(&dir.path().join(CSV_FILE)).unwrap(), 2);
        assert!(report.generate_chart(&dir.path().join(CHART_FILE)).unwrap().is_some());
    }
}

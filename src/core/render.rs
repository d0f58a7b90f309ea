//! Renderer module
//!
//! Renders an AnalysisSummary to the console formats: text, json, md

use crate::core::model::AnalysisSummary;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Compose the report body
pub fn compose_text_report(summary: &AnalysisSummary) -> String {
    let m = &summary.metrics;
    let r = &summary.ratios;

    let mut report = format!(
        "TEXT FILE ANALYZER\n\
         File: {file}\n\
         \n\
         STATISTICS:\n\
         Total Lines: {lines}\n\
         Total Words: {words}\n\
         Total Characters: {chars}\n\
         Unique Words: {unique}\n\
         Average Word Length: {avg:.1} characters\n\
         \n\
         ANALYSIS:\n\
         Lines per page: {lines} (Assumed 1 page for single file context, or N/A)\n\
         Words per line: {wpl:.1}\n\
         Characters per line: {cpl:.1}\n\
         \n\
         TOP 10 MOST COMMON WORDS:\n",
        file = summary.file,
        lines = m.lines,
        words = m.words,
        chars = m.characters,
        unique = m.unique_words,
        avg = m.avg_word_length,
        wpl = r.words_per_line,
        cpl = r.chars_per_line,
    );

    for (rank, row) in summary.top_words.iter().enumerate() {
        report.push_str(&format!(
            "{}. {} - {} occurrences\n",
            rank + 1,
            row.word,
            row.count
        ));
    }

    report
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for analysis summaries
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, summary: &AnalysisSummary) -> String {
        match self.config.format {
            OutputFormat::Text => compose_text_report(summary),
            OutputFormat::Json => self.render_json(summary),
            OutputFormat::Markdown => self.render_markdown(summary),
        }
    }

    fn render_json(&self, summary: &AnalysisSummary) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(summary)
        } else {
            serde_json::to_string(summary)
        };
        rendered.unwrap_or_else(|_| "{}".to_string())
    }

    fn render_markdown(&self, summary: &AnalysisSummary) -> String {
        let m = &summary.metrics;
        let mut output = String::new();

        output.push_str(&format!("# Text analysis: `{}`\n\n", summary.file));
        output.push_str(&format!("Encoding: {}\n\n", summary.encoding));

        output.push_str("## Statistics\n\n");
        output.push_str("| Metric | Value |\n|---|---|\n");
        output.push_str(&format!("| Lines | {} |\n", m.lines));
        output.push_str(&format!("| Words | {} |\n", m.words));
        output.push_str(&format!("| Characters | {} |\n", m.characters));
        output.push_str(&format!("| Unique words | {} |\n", m.unique_words));
        output.push_str(&format!(
            "| Average word length | {:.1} |\n",
            m.avg_word_length
        ));
        output.push_str(&format!(
            "| Words per line | {:.1} |\n",
            summary.ratios.words_per_line
        ));
        output.push_str(&format!(
            "| Characters per line | {:.1} |\n",
            summary.ratios.chars_per_line
        ));
        output.push_str(&format!(
            "| Words longer than {} chars | {} |\n\n",
            summary.long_word_threshold, summary.long_words
        ));

        output.push_str("## Top words\n\n");
        if summary.top_words.is_empty() {
            output.push_str("_No words found._\n");
        } else {
            for row in &summary.top_words {
                output.push_str(&format!(
                    "{}. `{}` ({} occurrences)\n",
                    row.rank, row.word, row.count
                ));
            }
        }

        output
    }
}

//! CLI module - Command-line interface definition and the analysis run

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::core::file_reader::{self, SourceEncoding};
use crate::core::frequency::WordFrequency;
use crate::core::metrics::TextMetrics;
use crate::core::model::TextError;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::report::{Report, CHART_FILE, CSV_FILE, DEFAULT_LONG_WORD_THRESHOLD, REPORT_FILE};

/// Input used when no path is given
pub const DEFAULT_INPUT: &str = "sample_text.txt";

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "TEXTLENS_LOG";

/// textlens - line, word and character statistics plus word frequencies for a text file.
#[derive(Parser, Debug)]
#[command(name = "textlens")]
#[command(
    author,
    version,
    about,
    long_about = r#"textlens reads one text file and reports descriptive statistics.

It writes three artifacts to the output directory:
- analysis_report.txt: counts, per-line ratios and the 10 most common words
- word_frequency.csv: every distinct word with its count, most common first
- top_10_words.png: a bar chart of the 10 most common words

Status messages go to stderr; the report itself is printed to stdout.

Examples:
    textlens notes.txt
    textlens notes.txt --output-dir out --format json --pretty
    textlens --no-prompt
"#
)]
pub struct Cli {
    /// Text file to analyse.
    #[arg(
        value_name = "PATH",
        long_help = "Text file to analyse.\n\n\
If omitted, textlens asks for a path and falls back to sample_text.txt\n\
when the answer is empty."
    )]
    pub path: Option<PathBuf>,

    /// Directory that receives the report, CSV and chart.
    #[arg(
        long,
        env = "TEXTLENS_OUTPUT_DIR",
        default_value = ".",
        value_name = "DIR",
        long_help = "Directory that receives analysis_report.txt, word_frequency.csv and\n\
top_10_words.png. It is created if missing."
    )]
    pub output_dir: PathBuf,

    /// Do not prompt for a path; use sample_text.txt when PATH is omitted.
    #[arg(long)]
    pub no_prompt: bool,

    /// Length a word must exceed to count as long.
    #[arg(long, default_value_t = DEFAULT_LONG_WORD_THRESHOLD, value_name = "N")]
    pub long_word_threshold: usize,

    /// Console output format (text/json/md).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select how the analysis is printed to stdout.\n\n\
Supported values:\n\
- text (default): the same content as analysis_report.txt\n\
- json: one JSON object with metrics, ratios and top words\n\
- md (markdown)"
    )]
    pub format: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        long_help = "Enable info-level logs on stderr. TEXTLENS_LOG overrides the level,\n\
e.g. TEXTLENS_LOG=debug."
    )]
    pub verbose: bool,
}

/// Status and error lines on stderr
struct Console {
    quiet: bool,
}

impl Console {
    fn status(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn banner(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{}", message.to_string().bold());
        }
    }

    fn error(&self, err: &TextError) {
        tracing::debug!(error = ?err, "analysis step failed");
        eprintln!("{} {}", "Error:".red().bold(), err);
    }
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let console = Console { quiet: cli.quiet };

    let input = match cli.path {
        Some(path) => path,
        None if cli.no_prompt => PathBuf::from(DEFAULT_INPUT),
        None => prompt_for_path()?,
    };

    console.banner("--- Starting Analysis ---");
    let started = Instant::now();

    analyse(
        &input,
        &cli.output_dir,
        cli.long_word_threshold,
        render_config,
        &console,
    );

    console.banner(format!(
        "--- Completed in {:.4} seconds ---\n",
        started.elapsed().as_secs_f64()
    ));
    Ok(())
}

/// Run every stage for one file. Failures are reported, never returned: a
/// missing or unreadable input ends the run, a failed artifact is skipped.
fn analyse(
    input: &Path,
    output_dir: &Path,
    long_word_threshold: usize,
    render_config: RenderConfig,
    console: &Console,
) {
    let _span = tracing::info_span!("analyse", input = %input.display()).entered();

    let loaded = match file_reader::load(input) {
        Ok(loaded) => loaded,
        Err(err) => {
            console.error(&err);
            return;
        }
    };
    match loaded.encoding() {
        SourceEncoding::Utf8 => console.status(format!(
            "Successfully read file: {}",
            loaded.path().display()
        )),
        SourceEncoding::Latin1 => console.status(format!(
            "Successfully read file with latin-1 encoding: {}",
            loaded.path().display()
        )),
    }

    let metrics = TextMetrics::new(loaded.content());
    let words = WordFrequency::new(loaded.content());
    let report =
        Report::new(&loaded, &metrics, &words).with_long_word_threshold(long_word_threshold);
    let summary = report.summary();
    let table = words.build_frequency_table();
    tracing::info!(
        lines = summary.metrics.lines,
        words = summary.metrics.words,
        counted = table.total(),
        unique = summary.metrics.unique_words,
        distinct = table.len(),
        "metrics computed"
    );
    console.status(format!(
        "Words longer than {} chars: {}",
        long_word_threshold, summary.long_words
    ));

    if let Err(err) = fs::create_dir_all(output_dir) {
        tracing::warn!(dir = %output_dir.display(), error = %err, "cannot create output directory");
    }

    let report_path = output_dir.join(REPORT_FILE);
    match report.generate_text_report(&report_path) {
        Ok(_) => console.status(format!("Report saved to: {}", report_path.display())),
        Err(err) => console.error(&err),
    }

    let csv_path = output_dir.join(CSV_FILE);
    match report.save_frequency_csv(&csv_path) {
        Ok(_) => console.status(format!(
            "Word frequency data saved to: {}",
            csv_path.display()
        )),
        Err(err) => console.error(&err),
    }

    let chart_path = output_dir.join(CHART_FILE);
    match report.generate_chart(&chart_path) {
        Ok(Some(path)) => console.status(format!("Chart saved to: {}", path.display())),
        Ok(None) => console.status("No data to plot."),
        Err(err) => console.error(&err),
    }

    let rendered = Renderer::with_config(render_config).render(&summary);
    if render_config.format == OutputFormat::Text {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
}

/// Ask for the input path on stderr; an empty answer means the default
fn prompt_for_path() -> Result<PathBuf> {
    eprint!(
        "Enter the path to the text file (default: {}): ",
        DEFAULT_INPUT
    );
    io::stderr().flush().context("failed to flush prompt")?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("failed to read the input path")?;

    Ok(path_or_default(&answer))
}

fn path_or_default(answer: &str) -> PathBuf {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        PathBuf::from(DEFAULT_INPUT)
    } else {
        PathBuf::from(trimmed)
    }
}

/// Logs go to stderr; TEXTLENS_LOG wins over the -q/-v defaults
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

//! Core module - Contains the analysis engines and shared data structures
//!
//! This module provides:
//! - File loading with encoding fallback
//! - Word normalization shared by both engines
//! - Scalar metrics (lines, words, characters, unique words, word length)
//! - Ranked word frequencies with top-N and predicate filtering
//! - The analysis data model and error type
//! - Console rendering of analysis summaries

pub mod file_reader;
pub mod frequency;
pub mod metrics;
pub mod model;
pub mod render;
pub mod tokenizer;
pub mod util;

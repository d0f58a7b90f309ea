//! Plain-text analysis report writer

use std::fs;
use std::path::Path;

use crate::core::model::{Artifact, TextError};

/// Write the report as UTF-8
pub fn write_text_report(path: &Path, report: &str) -> Result<(), TextError> {
    fs::write(path, report).map_err(|source| TextError::Write {
        artifact: Artifact::Report,
        path: path.to_path_buf(),
        source,
    })
}

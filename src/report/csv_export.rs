//! Word frequency CSV export

use std::path::Path;

use crate::core::model::{Artifact, FrequencyRow, TextError};

/// Write `Word,Frequency` rows in ranked order; returns the number of data rows
pub fn write_frequency_csv(path: &Path, rows: &[FrequencyRow]) -> Result<usize, TextError> {
    let csv_error = |source: csv::Error| TextError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(["Word", "Frequency"]).map_err(csv_error)?;
    for row in rows {
        writer
            .write_record([row.word.as_str(), row.count.to_string().as_str()])
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| TextError::Write {
        artifact: Artifact::Csv,
        path: path.to_path_buf(),
        source,
    })?;

    Ok(rows.len())
}

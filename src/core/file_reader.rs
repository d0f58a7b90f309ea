//! Input file loading with encoding fallback
//!
//! Content is decoded as UTF-8 first. Bytes that are not valid UTF-8 are
//! decoded again as ISO-8859-1, where every byte is the code point of the
//! same value. Either way `\r\n` and lone `\r` are translated to `\n`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::core::model::TextError;

/// The decoding that produced the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded input file
#[derive(Debug, Clone)]
pub struct LoadedText {
    path: PathBuf,
    content: String,
    encoding: SourceEncoding,
}

impl LoadedText {
    pub fn new(path: impl Into<PathBuf>, content: String, encoding: SourceEncoding) -> Self {
        Self {
            path: path.into(),
            content,
            encoding,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or the whole path if it has none
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }
}

/// Load `path`, falling back to latin-1 when the bytes are not UTF-8
pub fn load(path: &Path) -> Result<LoadedText, TextError> {
    if !path.exists() {
        return Err(TextError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = read_file_bytes(path).map_err(|source| read_error(path, source))?;

    let (content, encoding) = match String::from_utf8(bytes) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "decoded as utf-8");
            (content, SourceEncoding::Utf8)
        }
        Err(err) => {
            tracing::info!(
                path = %path.display(),
                valid_up_to = err.utf8_error().valid_up_to(),
                "utf-8 decoding failed, retrying as latin-1"
            );
            let bytes = err.into_bytes();
            (
                encoding_rs::mem::decode_latin1(&bytes).into_owned(),
                SourceEncoding::Latin1,
            )
        }
    };

    Ok(LoadedText::new(path, translate_newlines(content), encoding))
}

/// Turn `\r\n` and lone `\r` into `\n`
fn translate_newlines(content: String) -> String {
    if !content.contains('\r') {
        return content;
    }
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read the whole file; the handle is closed before returning
fn read_file_bytes(path: &Path) -> io::Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let size = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut reader = io::BufReader::new(file);
    let mut buffer = Vec::with_capacity(size);
    reader.read_to_end(&mut buffer)?;

    Ok(buffer)
}

fn read_error(path: &Path, source: io::Error) -> TextError {
    TextError::Read {
        path: path.to_path_buf(),
        source,
    }
}

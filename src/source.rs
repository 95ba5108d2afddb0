//! Line source: a decoded result file held in memory.
//!
//! The whole file is read inside one scope, decoded with the first
//! encoding from [`ENCODINGS`] that accepts every byte, then split into
//! lines. Parsers walk the lines with a cursor that can step back once to
//! re-read a line consumed during look-ahead.

use crate::constants::ENCODINGS;
use crate::error::{LineContext, Result, ResultsError};
use crate::models::TextEncoding;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LineSource {
    lines: Vec<String>,
    /// Number of lines consumed so far, which is also the 1-based number
    /// of the last line returned
    cursor: usize,
    encoding: TextEncoding,
}

impl LineSource {
    /// Read and decode a file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ResultsError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = {
            let mut file = File::open(path)?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            bytes
        };

        let (text, encoding) = decode(&bytes).ok_or_else(|| ResultsError::Encoding {
            path: path.to_path_buf(),
            reason: format!(
                "none of {} could decode the file",
                ENCODINGS
                    .iter()
                    .map(|e| e.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })?;

        debug!(
            "Decoded {} as {} ({} bytes)",
            path.display(),
            encoding.name(),
            bytes.len()
        );

        Ok(Self::from_text(&text, encoding))
    }

    /// Build a source from already decoded text
    pub fn from_text(text: &str, encoding: TextEncoding) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            cursor: 0,
            encoding,
        }
    }

    /// Return the next line and advance the cursor
    pub fn next_line(&mut self) -> Result<&str> {
        match self.lines.get(self.cursor) {
            Some(line) => {
                self.cursor += 1;
                Ok(line.as_str())
            }
            None => Err(ResultsError::PrematureEndOfInput { line: self.cursor }),
        }
    }

    /// Step back one line so the last returned line is read again
    pub fn rewind(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// 1-based number of the last line returned, 0 before the first read
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Number and text of the last line returned
    pub fn context(&self) -> LineContext {
        self.context_at(self.cursor)
    }

    /// Number and text of the line with 1-based number `number`
    pub fn context_at(&self, number: usize) -> LineContext {
        let text = number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .cloned()
            .unwrap_or_default();
        LineContext::new(number, text)
    }
}

fn decode(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    ENCODINGS
        .iter()
        .find_map(|encoding| encoding.decode(bytes).map(|text| (text, *encoding)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sequential_reads_and_rewind() {
        let mut source = LineSource::from_text("a\nb\r\nc\n", TextEncoding::Utf8);
        assert_eq!(source.line_count(), 3);
        assert_eq!(source.cursor(), 0);

        assert_eq!(source.next_line().unwrap(), "a");
        assert_eq!(source.next_line().unwrap(), "b");
        assert_eq!(source.cursor(), 2);

        source.rewind();
        assert_eq!(source.next_line().unwrap(), "b");
        assert_eq!(source.context(), LineContext::new(2, "b"));

        assert_eq!(source.next_line().unwrap(), "c");
        assert!(source.is_exhausted());
        assert_eq!(source.context_at(1), LineContext::new(1, "a"));
    }

    #[test]
    fn test_premature_end_of_input() {
        let mut source = LineSource::from_text("only\n", TextEncoding::Utf8);
        source.next_line().unwrap();
        let error = source.next_line().unwrap_err();
        assert!(matches!(error, ResultsError::PrematureEndOfInput { line: 1 }));
    }

    #[test]
    fn test_open_falls_back_to_legacy_encoding() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"\"Cote de l\xe9eau\";\"Z\";\"m\";3\n").unwrap();

        let mut source = LineSource::open(temp_file.path()).unwrap();
        assert_eq!(source.encoding(), TextEncoding::Windows1252);
        assert_eq!(source.next_line().unwrap(), "\"Cote de l\u{e9}eau\";\"Z\";\"m\";3");
    }

    #[test]
    fn test_open_missing_file() {
        let error = LineSource::open(Path::new("/nonexistent/run.plong")).unwrap_err();
        assert!(matches!(error, ResultsError::FileNotFound { .. }));
    }
}

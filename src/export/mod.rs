//! Export orchestration: turn a result set into a downloadable artifact.
//!
//! The orchestrator owns the shared export policy (refusing empty result
//! sets, deriving the filename) and dispatches to the per-format encoder.

pub mod csv;
pub mod docx;
pub mod filename;

use std::path::{Path, PathBuf};

use crate::models::{Record, SearchQuery, SourceType};

pub use filename::{derive_name, sanitize_subject};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Word document
    Docx,
}

impl ExportFormat {
    /// File extension (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Docx => "docx",
        }
    }

    /// MIME type for the encoded artifact
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Errors that can occur while exporting
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Exporting an empty result set is refused for every format
    #[error("Nothing to export: the result set is empty")]
    NoRecords,

    /// Encoder failure
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// File system error while writing the artifact
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<::csv::Error> for ExportError {
    fn from(err: ::csv::Error) -> Self {
        ExportError::Encode(format!("CSV: {}", err))
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Encode(format!("DOCX container: {}", err))
    }
}

/// A fully encoded export artifact, ready to be written or served
#[derive(Debug, Clone)]
pub struct Export {
    /// Encoded file contents
    pub bytes: Vec<u8>,
    /// Derived filename, e.g. `computer_science_2020-2023.csv`
    pub filename: String,
    /// MIME type of `bytes`
    pub mime_type: &'static str,
}

impl Export {
    /// Write the artifact into `dir` (created if missing), returning the
    /// full path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Encode a result set in the requested format.
///
/// Fails with [`ExportError::NoRecords`] when `records` is empty; an
/// artifact is produced only for a non-empty result set.
pub fn export(
    records: &[Record],
    query: &SearchQuery,
    format: ExportFormat,
    source: SourceType,
) -> Result<Export, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let bytes = match format {
        ExportFormat::Csv => csv::encode(records)?,
        ExportFormat::Docx => docx::encode(records, query, source.link_label())?,
    };

    Ok(Export {
        bytes,
        filename: derive_name(query, format.extension()),
        mime_type: format.mime_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordBuilder;

    #[test]
    fn test_empty_result_set_is_refused() {
        let query = SearchQuery::new("history").years(2020, 2023);

        for format in [ExportFormat::Csv, ExportFormat::Docx] {
            let result = export(&[], &query, format, SourceType::Doab);
            assert!(matches!(result, Err(ExportError::NoRecords)));
        }
    }

    #[test]
    fn test_export_carries_filename_and_mime() {
        let records = vec![RecordBuilder::new("A Concise History of Computing")
            .year(2021)
            .authors("Dana Lee")
            .build()];
        let query = SearchQuery::new("history of computing").years(2020, 2023);

        let artifact = export(&records, &query, ExportFormat::Csv, SourceType::Doab).unwrap();
        assert_eq!(artifact.filename, "history_of_computing_2020-2023.csv");
        assert_eq!(artifact.mime_type, "text/csv");
        assert!(!artifact.bytes.is_empty());

        let artifact = export(&records, &query, ExportFormat::Docx, SourceType::Doaj).unwrap();
        assert_eq!(artifact.filename, "history_of_computing_2020-2023.docx");
        assert!(artifact.mime_type.contains("wordprocessingml"));
    }
}

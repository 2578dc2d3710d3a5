//! CSV encoding of a result set.
//!
//! Every field, header row included, is quoted unconditionally; embedded
//! quotes are doubled per RFC 4180. Spreadsheet imports then never have to
//! guess at titles containing commas or quotes.

use csv::{QuoteStyle, WriterBuilder};

use crate::export::ExportError;
use crate::models::Record;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 4] = ["Year", "Author(s)/Contributors", "Title", "URL"];

/// Encode records as a CSV byte stream.
///
/// Rows appear in record order, one per record, after the header row. A
/// missing year renders as the placeholder dash and a missing URL as an
/// empty field.
pub fn encode(records: &[Record]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for record in records {
        writer.write_record([
            record.year_display().as_str(),
            record.authors.as_str(),
            record.title.as_str(),
            record.url_display(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Encode(format!("CSV buffer flush failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordBuilder;

    fn encode_to_string(records: &[Record]) -> String {
        String::from_utf8(encode(records).unwrap()).unwrap()
    }

    #[test]
    fn test_header_and_row_fully_quoted() {
        let records = vec![RecordBuilder::new("Modern Web Development Practices")
            .year(2022)
            .authors("Alice Johnson")
            .url("https://example.com/book2")
            .build()];

        let out = encode_to_string(&records);
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Year\",\"Author(s)/Contributors\",\"Title\",\"URL\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"2022\",\"Alice Johnson\",\"Modern Web Development Practices\",\"https://example.com/book2\""
        );
        assert!(lines.next().is_none());
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        let records = vec![RecordBuilder::new(r#"A "Great" Book, Vol. 1"#)
            .year(2021)
            .authors("B. Author")
            .build()];

        let out = encode_to_string(&records);
        assert!(out.contains(r#""A ""Great"" Book, Vol. 1""#));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let records = vec![RecordBuilder::new("Untitled Effort").build()];

        let out = encode_to_string(&records);
        assert!(out.contains("\"—\",\"—\",\"Untitled Effort\",\"\""));
    }

    #[test]
    fn test_empty_record_list_yields_header_only() {
        let out = encode_to_string(&[]);
        assert_eq!(out.lines().count(), 1);
    }
}

//! DOCX encoding of a result set.
//!
//! A .docx file is an OPC zip container holding WordprocessingML parts.
//! The parts built here are the minimum a conforming reader needs: content
//! types, package relationships, the document body, its relationship part
//! (which carries the external hyperlink targets), and a styles part
//! defining `Heading1` and `Hyperlink`.

use std::borrow::Cow;
use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::ExportError;
use crate::models::{Record, SearchQuery, PLACEHOLDER};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Table column widths in twentieths of a point, summing to the fixed
/// 10000 dxa table width (10/25/45/20 percent).
const COLUMN_WIDTHS: [u32; 4] = [1000, 2500, 4500, 2000];

const HEADERS: [&str; 4] = ["Year", "Author(s)/Contributors", "Title", "URL"];

fn esc(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// Encode records as a DOCX byte stream.
///
/// The document contains a Heading1 title of the form `subject (start-end)`
/// followed by a bordered four-column table: a bold header row, then one
/// row per record. URL cells hold a styled hyperlink captioned with
/// `link_label`, or the placeholder dash when the record has no URL.
pub fn encode(
    records: &[Record],
    query: &SearchQuery,
    link_label: &str,
) -> Result<Vec<u8>, ExportError> {
    let mut hyperlinks: Vec<(String, String)> = Vec::new();
    let document = build_document(records, query, link_label, &mut hyperlinks);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types().as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(package_rels().as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", options)?;
    zip.write_all(document_rels(&hyperlinks).as_bytes())?;

    zip.start_file("word/styles.xml", options)?;
    zip.write_all(styles().as_bytes())?;

    let cursor = zip
        .finish()
        .map_err(|e| ExportError::Encode(format!("DOCX container close failed: {}", e)))?;
    Ok(cursor.into_inner())
}

fn content_types() -> String {
    format!(
        "{XML_DECL}\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\
</Types>"
    )
}

fn package_rels() -> String {
    format!(
        "{XML_DECL}\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
</Relationships>"
    )
}

fn document_rels(hyperlinks: &[(String, String)]) -> String {
    let mut rels = String::from(XML_DECL);
    rels.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    );
    for (id, target) in hyperlinks {
        rels.push_str(&format!(
            "<Relationship Id=\"{id}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" Target=\"{}\" TargetMode=\"External\"/>",
            esc(target)
        ));
    }
    rels.push_str("</Relationships>");
    rels
}

fn styles() -> String {
    format!(
        "{XML_DECL}\
<w:styles xmlns:w=\"{W_NS}\">\
<w:style w:type=\"paragraph\" w:styleId=\"Heading1\">\
<w:name w:val=\"heading 1\"/>\
<w:pPr><w:spacing w:before=\"240\" w:after=\"120\"/></w:pPr>\
<w:rPr><w:b/><w:sz w:val=\"32\"/><w:szCs w:val=\"32\"/></w:rPr>\
</w:style>\
<w:style w:type=\"character\" w:styleId=\"Hyperlink\">\
<w:name w:val=\"Hyperlink\"/>\
<w:rPr><w:color w:val=\"0563C1\"/><w:u w:val=\"single\"/></w:rPr>\
</w:style>\
</w:styles>"
    )
}

fn build_document(
    records: &[Record],
    query: &SearchQuery,
    link_label: &str,
    hyperlinks: &mut Vec<(String, String)>,
) -> String {
    let mut body = String::new();

    let title = format!(
        "{} ({}-{})",
        query.subject, query.start_year, query.end_year
    );
    body.push_str(&format!(
        "<w:p><w:pPr><w:pStyle w:val=\"Heading1\"/></w:pPr><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        esc(&title)
    ));

    body.push_str("<w:tbl>");
    body.push_str(&format!(
        "<w:tblPr><w:tblW w:w=\"10000\" w:type=\"dxa\"/>{}</w:tblPr>",
        table_borders()
    ));

    body.push_str("<w:tblGrid>");
    for width in COLUMN_WIDTHS {
        body.push_str(&format!("<w:gridCol w:w=\"{width}\"/>"));
    }
    body.push_str("</w:tblGrid>");

    // header row
    body.push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr>");
    for (header, width) in HEADERS.iter().zip(COLUMN_WIDTHS) {
        body.push_str(&text_cell(header, width, true));
    }
    body.push_str("</w:tr>");

    for record in records {
        body.push_str("<w:tr>");
        body.push_str(&text_cell(&record.year_display(), COLUMN_WIDTHS[0], false));
        body.push_str(&text_cell(&record.authors, COLUMN_WIDTHS[1], false));
        body.push_str(&text_cell(&record.title, COLUMN_WIDTHS[2], false));
        body.push_str(&url_cell(record, link_label, COLUMN_WIDTHS[3], hyperlinks));
        body.push_str("</w:tr>");
    }

    body.push_str("</w:tbl>");

    format!(
        "{XML_DECL}<w:document xmlns:w=\"{W_NS}\" xmlns:r=\"{R_NS}\"><w:body>{body}</w:body></w:document>"
    )
}

fn table_borders() -> String {
    let edges = ["top", "left", "bottom", "right", "insideH", "insideV"];
    let mut borders = String::from("<w:tblBorders>");
    for edge in edges {
        borders.push_str(&format!(
            "<w:{edge} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"000000\"/>"
        ));
    }
    borders.push_str("</w:tblBorders>");
    borders
}

fn cell_props(width: u32) -> String {
    format!("<w:tcPr><w:tcW w:w=\"{width}\" w:type=\"dxa\"/></w:tcPr>")
}

fn text_cell(text: &str, width: u32, bold: bool) -> String {
    let run_props = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(
        "<w:tc>{}<w:p><w:r>{run_props}<w:t xml:space=\"preserve\">{}</w:t></w:r></w:p></w:tc>",
        cell_props(width),
        esc(text)
    )
}

fn url_cell(
    record: &Record,
    link_label: &str,
    width: u32,
    hyperlinks: &mut Vec<(String, String)>,
) -> String {
    match &record.url {
        Some(url) => {
            // rId1 is the styles part; hyperlink ids start after it
            let rel_id = format!("rId{}", hyperlinks.len() + 2);
            hyperlinks.push((rel_id.clone(), url.clone()));
            format!(
                "<w:tc>{}<w:p><w:hyperlink r:id=\"{rel_id}\"><w:r><w:rPr><w:rStyle w:val=\"Hyperlink\"/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:hyperlink></w:p></w:tc>",
                cell_props(width),
                esc(link_label)
            )
        }
        None => text_cell(PLACEHOLDER, width, false),
    }
}

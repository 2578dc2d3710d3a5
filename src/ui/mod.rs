//! Terminal output helpers for search results.

use comfy_table::{Attribute, Cell, Table};
use is_terminal::IsTerminal;

use crate::models::Record;
use crate::utils::truncate_with_ellipsis;

const TITLE_COLUMN_WIDTH: usize = 50;
const AUTHORS_COLUMN_WIDTH: usize = 30;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Render records as a bordered table.
pub fn results_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Year", "Author(s)/Contributors", "Title", "URL"]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.year_display()),
            Cell::new(truncate_with_ellipsis(&record.authors, AUTHORS_COLUMN_WIDTH)),
            Cell::new(truncate_with_ellipsis(&record.title, TITLE_COLUMN_WIDTH))
                .add_attribute(Attribute::Bold),
            Cell::new(record.url_display()),
        ]);
    }

    table
}

/// Print records as plain lines, one record per block.
pub fn print_plain(records: &[Record]) {
    for record in records {
        println!("{} - {} ({})", record.title, record.authors, record.year_display());
        if let Some(url) = &record.url {
            println!("  URL: {}", url);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordBuilder;

    #[test]
    fn test_table_has_row_per_record() {
        let records = vec![
            RecordBuilder::new("First").year(2022).authors("A. One").build(),
            RecordBuilder::new("Second").year(2021).authors("B. Two").build(),
        ];

        let table = results_table(&records);
        let rendered = table.to_string();
        assert!(rendered.contains("First"));
        assert!(rendered.contains("Second"));
        assert!(rendered.contains("2022"));
    }

    #[test]
    fn test_long_title_truncated() {
        let long_title = "T".repeat(120);
        let records = vec![RecordBuilder::new(long_title).year(2022).build()];

        let rendered = results_table(&records).to_string();
        assert!(!rendered.contains(&"T".repeat(120)));
        assert!(rendered.contains("..."));
    }
}

//! Deterministic export filename derivation.

use crate::models::SearchQuery;

/// Token substituted when the subject sanitizes down to nothing.
const DEFAULT_SUBJECT_TOKEN: &str = "books";

/// Reduce a subject to a filesystem-safe token.
///
/// Trims, converts each whitespace run to a single underscore, then strips
/// everything outside `[A-Za-z0-9_]`. An empty result falls back to
/// "books".
pub fn sanitize_subject(subject: &str) -> String {
    let mut out = String::with_capacity(subject.len());
    let mut in_whitespace = false;

    for c in subject.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            if c.is_ascii_alphanumeric() || c == '_' {
                out.push(c);
            }
        }
    }

    if out.is_empty() {
        DEFAULT_SUBJECT_TOKEN.to_string()
    } else {
        out
    }
}

/// Derive the full export filename for a query and extension, e.g.
/// `computer_science_2020-2023.csv`.
pub fn derive_name(query: &SearchQuery, extension: &str) -> String {
    format!(
        "{}_{}-{}.{}",
        sanitize_subject(&query.subject),
        query.start_year,
        query.end_year,
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_becomes_single_underscore() {
        assert_eq!(sanitize_subject("computer science"), "computer_science");
        assert_eq!(sanitize_subject("  deep   learning  "), "deep_learning");
        assert_eq!(sanitize_subject("a\tb\nc"), "a_b_c");
    }

    #[test]
    fn test_special_characters_stripped() {
        assert_eq!(sanitize_subject("C++ & Rust!"), "C_Rust");
        assert_eq!(sanitize_subject("naïve-bayes"), "navebayes");
    }

    #[test]
    fn test_empty_subject_falls_back() {
        assert_eq!(sanitize_subject(""), "books");
        assert_eq!(sanitize_subject("   "), "books");
        assert_eq!(sanitize_subject("!!!"), "books");
    }

    #[test]
    fn test_derived_name_is_deterministic() {
        let query = SearchQuery::new("open access").years(2020, 2023);
        assert_eq!(derive_name(&query, "csv"), "open_access_2020-2023.csv");
        assert_eq!(derive_name(&query, "csv"), derive_name(&query, "csv"));
        assert_eq!(derive_name(&query, "docx"), "open_access_2020-2023.docx");
    }
}

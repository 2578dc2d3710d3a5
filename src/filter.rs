//! Local query filtering for the mock/catalog search path.
//!
//! External sources filter server-side with their own (opaque) semantics;
//! this module is the authoritative local implementation: an
//! order-preserving filter-then-slice pipeline with no ranking.

use crate::models::{Record, SearchQuery};

/// Keep a record iff its year is present and inside the inclusive bounds.
///
/// Records with a placeholder year cannot satisfy a numeric bound and are
/// excluded.
pub fn in_year_range(record: &Record, start_year: i32, end_year: i32) -> bool {
    match record.year {
        Some(year) => start_year <= year && year <= end_year,
        None => false,
    }
}

/// Keep a record iff its title contains the subject, case-insensitively.
pub fn title_matches(record: &Record, subject: &str) -> bool {
    record
        .title
        .to_lowercase()
        .contains(&subject.to_lowercase())
}

/// Apply the three filter stages in order: year range, title substring,
/// truncation to `query.limit`. Relative order of survivors is unchanged.
pub fn apply(records: Vec<Record>, query: &SearchQuery) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| in_year_range(r, query.start_year, query.end_year))
        .filter(|r| title_matches(r, &query.subject))
        .take(query.limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordBuilder;

    fn records_for_years(years: &[i32]) -> Vec<Record> {
        years
            .iter()
            .map(|&y| RecordBuilder::new(format!("history {}", y)).year(y).build())
            .collect()
    }

    #[test]
    fn test_year_range_inclusive_both_ends() {
        let records = records_for_years(&[2019, 2020, 2021, 2022]);
        let query = SearchQuery::new("history").years(2020, 2021);

        let kept = apply(records, &query);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].year, Some(2020));
        assert_eq!(kept[1].year, Some(2021));
    }

    #[test]
    fn test_placeholder_year_excluded() {
        let records = vec![
            RecordBuilder::new("history of nothing").build(),
            RecordBuilder::new("history of something").year(2021).build(),
        ];
        let query = SearchQuery::new("history").years(2000, 2030);

        let kept = apply(records, &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "history of something");
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let record = RecordBuilder::new("A History of Computing").year(2021).build();
        assert!(title_matches(&record, "HISTORY"));
        assert!(title_matches(&record, "comput"));
        assert!(!title_matches(&record, "biology"));
    }

    #[test]
    fn test_limit_truncates_preserving_order() {
        let records = records_for_years(&[2020, 2021, 2022, 2023]);
        let query = SearchQuery::new("history").years(2020, 2023).limit(2);

        let kept = apply(records, &query);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].year, Some(2020));
        assert_eq!(kept[1].year, Some(2021));
    }

    #[test]
    fn test_zero_limit_yields_nothing() {
        let records = records_for_years(&[2021]);
        let query = SearchQuery::new("history").years(2020, 2022).limit(0);
        assert!(apply(records, &query).is_empty());
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let records = records_for_years(&[2020, 2021]);
        let query = SearchQuery::new("history").years(2022, 2020);
        assert!(apply(records, &query).is_empty());
    }
}

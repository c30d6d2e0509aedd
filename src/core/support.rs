use crate::core::date::field_date;
use crate::domain::model::VersionEntry;
use crate::utils::error::Result;

/// Inclusive day count from the release date through the end-of-life
/// date. Negative when eol precedes release.
pub fn support_period(record: &VersionEntry, release_field: &str, eol_field: &str) -> Result<i64> {
    let release = field_date(record, release_field)?;
    let eol = field_date(record, eol_field)?;
    Ok((eol - release).num_days() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use serde_json::json;

    fn version(release: &str, eol: &str) -> VersionEntry {
        VersionEntry(json!({ "releaseDate": release, "eol": eol }))
    }

    #[test]
    fn test_period_includes_eol_day() {
        let record = version("2020-01-01", "2020-01-10");
        assert_eq!(support_period(&record, "releaseDate", "eol").unwrap(), 10);
    }

    #[test]
    fn test_same_day_is_one_day() {
        let record = version("2022-04-21", "2022-04-21");
        assert_eq!(support_period(&record, "releaseDate", "eol").unwrap(), 1);
    }

    #[test]
    fn test_period_spans_leap_day() {
        let record = version("2020-02-28", "2020-03-01");
        assert_eq!(support_period(&record, "releaseDate", "eol").unwrap(), 3);
    }

    #[test]
    fn test_eol_before_release_is_negative() {
        let record = version("2020-01-10", "2020-01-01");
        assert_eq!(support_period(&record, "releaseDate", "eol").unwrap(), -8);
    }

    #[test]
    fn test_unvalidated_input_propagates_parse_error() {
        let record = version("2020-01-01", "soon");
        assert!(matches!(
            support_period(&record, "releaseDate", "eol"),
            Err(EtlError::DateParseError { .. })
        ));
    }
}

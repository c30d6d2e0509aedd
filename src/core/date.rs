use crate::domain::model::VersionEntry;
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use serde_json::Value;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| EtlError::DateParseError {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Reads `field` from the record as a calendar date.
pub fn field_date(record: &VersionEntry, field: &str) -> Result<NaiveDate> {
    match record.get(field) {
        Some(Value::String(raw)) => parse_date(field, raw),
        Some(other) => Err(EtlError::DateParseError {
            field: field.to_string(),
            value: other.to_string(),
        }),
        None => Err(EtlError::DateParseError {
            field: field.to_string(),
            value: String::new(),
        }),
    }
}

pub fn is_valid_date(record: &VersionEntry, field: &str) -> bool {
    field_date(record, field).is_ok()
}

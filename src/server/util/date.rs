use chrono::{DateTime, NaiveDate};

use crate::server::error::validation::ValidationError;

const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_LAYOUT).map_err(|_| ValidationError::InvalidDate)
}

/// Update paths additionally accept an RFC 3339 timestamp and keep its local date.
pub fn parse_update_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();

    parse_date(value).or_else(|_| {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.date_naive())
            .map_err(|_| ValidationError::InvalidDate)
    })
}

/// Blank optional dates become `None`.
pub fn parse_optional_date(
    value: Option<&str>,
    for_update: bool,
) -> Result<Option<NaiveDate>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) if for_update => parse_update_date(raw).map(Some),
        Some(raw) => parse_date(raw).map(Some),
    }
}

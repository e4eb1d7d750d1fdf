//! Parsing of list-endpoint query filters.
//!
//! Query strings are loose: a filter such as `?source=3` selects by id while
//! `?source=kyiv` selects by name. Repositories receive the parsed forms and
//! combine every active filter with `AND`.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::DbId;

/// A filter value that is either a numeric id or a name fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrName {
    Id(DbId),
    Name(String),
}

impl IdOrName {
    /// Parse a raw query value. Blank values yield `None` (filter inactive).
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if is_digits(trimmed) {
            if let Ok(id) = trimmed.parse::<DbId>() {
                return Some(IdOrName::Id(id));
            }
        }
        Some(IdOrName::Name(trimmed.to_string()))
    }

    /// Parse an optional query value.
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Convert a comma-separated list of ids into integers, skipping any item
/// that is not purely digits.
pub fn parse_id_list(raw: &str) -> Vec<DbId> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| is_digits(item))
        .filter_map(|item| item.parse().ok())
        .collect()
}

/// Parse an optional id list. Returns `None` when no valid id remains.
pub fn id_list_param(raw: Option<&str>) -> Option<Vec<DbId>> {
    let ids = parse_id_list(raw?);
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// The `?name=` filter on stations: a comma list mixing ids and city names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationNameFilter {
    pub ids: Vec<DbId>,
    /// Capitalized city names, matched exactly.
    pub names: Vec<String>,
}

impl StationNameFilter {
    pub fn parse(raw: &str) -> Self {
        let mut filter = Self::default();
        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if is_digits(item) {
                if let Ok(id) = item.parse() {
                    filter.ids.push(id);
                }
            } else {
                filter.names.push(capitalize(item));
            }
        }
        filter
    }

    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        let filter = Self::parse(raw?);
        if filter.is_empty() {
            None
        } else {
            Some(filter)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.names.is_empty()
    }
}

/// Parse a `YYYY-MM-DD` date filter.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("Invalid date '{raw}'. Expected format: YYYY-MM-DD"))
    })
}

/// Parse an optional date filter; blank values are inactive.
pub fn date_param(raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

//! Country code normalization and validation against the directory.

use crate::api::DataProvider;
use crate::config::{MAX_YEAR, MIN_YEAR};
use crate::directory::list_countries;
use crate::error::{Error, Result};
use log::warn;
use std::collections::HashSet;

/// Trim and uppercase a single user-supplied code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Parse a comma-separated `countries` parameter into normalized codes.
///
/// Empty items (`"USA,,GBR"`, trailing commas) are dropped.
pub fn parse_country_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_code)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Codes split into those found in the directory and those that were not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Exact-match split of `codes` against `known`, keeping input order and duplicates.
pub fn partition_codes(codes: &[String], known: &HashSet<String>) -> Partition {
    let mut out = Partition::default();
    for code in codes {
        if known.contains(code) {
            out.valid.push(code.clone());
        } else {
            out.invalid.push(code.clone());
        }
    }
    out
}

/// Return the subset of `codes` the provider lists as real countries.
///
/// Codes must already be normalized (see [`normalize_code`]). Unknown codes are
/// logged and dropped; only a directory failure is an error.
pub fn validate_country_codes<P: DataProvider + ?Sized>(
    provider: &P,
    codes: &[String],
) -> Result<Vec<String>> {
    let known: HashSet<String> = list_countries(provider)?
        .into_iter()
        .map(|c| c.code)
        .collect();

    let Partition { valid, invalid } = partition_codes(codes, &known);
    if !invalid.is_empty() {
        warn!("Invalid country codes: {:?}", invalid);
    }
    Ok(valid)
}

/// Parse an optional year parameter, falling back to `default` when absent.
///
/// A present but empty value (`start_year=`) is malformed, not absent.
pub fn parse_year(raw: Option<&str>, name: &str, default: i32) -> Result<i32> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let s = raw.trim();
    s.parse::<i32>()
        .map_err(|_| Error::MalformedInput(format!("{} must be an integer, got '{}'", name, s)))
}

/// Check a requested range: ordered and within `[MIN_YEAR, MAX_YEAR]`.
pub fn check_year_range(start_year: i32, end_year: i32) -> Result<()> {
    if start_year > end_year {
        return Err(Error::InvalidYearRange(
            "start_year must be less than or equal to end_year".into(),
        ));
    }
    if start_year < MIN_YEAR || end_year > MAX_YEAR {
        return Err(Error::InvalidYearRange(format!(
            "Years must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(())
}

use crate::{Error, Result};
use chrono::{DateTime, Datelike, Utc};
use tracing::warn;

/// Read a leading integer the lenient way: optional whitespace, optional
/// sign, then as many ASCII digits as present. `"2013abc"` reads as 2013,
/// `"abc"` as nothing. Digit runs too long for an `i64` saturate, so `None`
/// only ever means there were no digits.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value = rest[..digits_len].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Reject year/month parameters that cannot match any contributor.
///
/// Without a year nothing is checked. A month that is not a number at all
/// slips through both month checks; that gap is logged, not rejected.
pub fn validate_date_params(
    created_at: DateTime<Utc>,
    year: Option<&str>,
    month: Option<&str>,
) -> Result<()> {
    let Some(year) = year.filter(|y| !y.is_empty()) else {
        return Ok(());
    };

    let creation_year = i64::from(created_at.year());
    let creation_month = i64::from(created_at.month());

    let query_year = match parse_leading_int(year) {
        Some(y) if y >= creation_year => y,
        _ => {
            return Err(Error::BadRequest(
                "Requested year is before repository creation date.".to_string(),
            ))
        }
    };

    let Some(month) = month.filter(|m| !m.is_empty()) else {
        return Ok(());
    };

    match parse_leading_int(month) {
        Some(query_month) => {
            if query_year == creation_year && query_month < creation_month {
                return Err(Error::BadRequest(
                    "Requested month is before repository creation date.".to_string(),
                ));
            }
            if !(1..=12).contains(&query_month) {
                return Err(Error::BadRequest(
                    "Invalid month. Must be between 01 and 12.".to_string(),
                ));
            }
        }
        None => warn!("Month parameter {:?} is not a number; skipping month checks", month),
    }

    Ok(())
}

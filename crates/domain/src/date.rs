use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("Date: {0} is malformed")]
pub struct InvalidDateError(pub String);

/// Parses `YYYY-M-D` as well as ISO-8601 date times.
/// For date times only the calendar date as written is kept.
pub fn parse_date(datestr: &str) -> Result<NaiveDate, InvalidDateError> {
    let invalid = || InvalidDateError(datestr.to_string());

    let date_part = datestr.split('T').next().unwrap_or_default();
    let dates = date_part.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(invalid());
    }

    let (year, month, day) = match (
        dates[0].parse::<i32>(),
        dates[1].parse::<u32>(),
        dates[2].parse::<u32>(),
    ) {
        (Ok(year), Ok(month), Ok(day)) => (year, month, day),
        _ => return Err(invalid()),
    };

    if !(1970..=2100).contains(&year) {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%F").to_string()
}

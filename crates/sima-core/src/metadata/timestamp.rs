use chrono::NaiveDate;

use crate::consts::{
    INSTRUMENT_DATE_FORMAT, INSTRUMENT_DATE_FORMAT_LONG_YEAR, MEASUREMENT_DATE_FORMAT,
};
use crate::error::{Result, SimaError};

/// A measurement date in both index representations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasurementTime {
    /// `%Y-%m-%dT%H:%M:%SZ`
    pub iso: String,
    /// Seconds since the Unix epoch.
    pub epoch_seconds: i64,
}

/// Normalize an instrument date (`MM/DD/YY`) to UTC midnight of that day.
///
/// The instrument writes no time zone; the date is taken to be UTC so the
/// result does not depend on the host running the conversion.
pub fn normalize_date(date: &str) -> Result<MeasurementTime> {
    let trimmed = date.trim();
    // %Y would read "23" as year 23, so pick the format by year width.
    let year_digits = trimmed.rsplit('/').next().map(str::len).unwrap_or(0);
    let format = if year_digits == 4 {
        INSTRUMENT_DATE_FORMAT_LONG_YEAR
    } else {
        INSTRUMENT_DATE_FORMAT
    };
    let parsed = NaiveDate::parse_from_str(trimmed, format)
        .map_err(|_| SimaError::InvalidDate(date.to_string()))?;

    let midnight = parsed
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SimaError::InvalidDate(date.to_string()))?
        .and_utc();

    Ok(MeasurementTime {
        iso: midnight.format(MEASUREMENT_DATE_FORMAT).to_string(),
        epoch_seconds: midnight.timestamp(),
    })
}

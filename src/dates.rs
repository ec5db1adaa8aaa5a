//! Dates
//!
//! Delivery and schedule dates carry no time zone on the wire, so every date is handled as
//! the epoch millisecond of its UTC midnight. Only the ordering window looks at a wall clock,
//! and that clock is always the one in [`DELIVERY_TIME_ZONE`].

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use thiserror::Error;

/// Time zone the ordering week is anchored to.
pub const DELIVERY_TIME_ZONE: &str = "America/Los_Angeles";

/// Errors raised while converting dates.
#[derive(Debug, Error)]
pub enum DateError {
    /// Input was neither an RFC 3339 timestamp nor an ISO date.
    #[error("invalid date: {0}")]
    Invalid(String),

    /// Wrapped calendar arithmetic or time zone error.
    #[error(transparent)]
    Jiff(#[from] jiff::Error),
}

/// Converts an ISO date (`2024-10-14`) or timestamp (`2024-10-14T00:00:00.000Z`) into epoch
/// milliseconds.
///
/// # Errors
///
/// Returns [`DateError::Invalid`] when the string is not a recognised date format.
pub fn date_to_ms(date: &str) -> Result<i64, DateError> {
    if let Ok(timestamp) = date.parse::<Timestamp>() {
        return Ok(timestamp.as_millisecond());
    }

    let date = date
        .parse::<Date>()
        .map_err(|_err| DateError::Invalid(date.to_string()))?;

    midnight_ms(date)
}

/// Converts epoch milliseconds back into a timestamp.
///
/// # Errors
///
/// Returns an error when the value is outside the supported range.
pub fn ms_to_date(ms: i64) -> Result<Timestamp, DateError> {
    Ok(Timestamp::from_millisecond(ms)?)
}

/// Truncates epoch milliseconds to the UTC midnight of the same day.
///
/// # Errors
///
/// Returns an error when the value is outside the supported range.
pub fn utc_midnight_ms(ms: i64) -> Result<i64, DateError> {
    let date = ms_to_date(ms)?.to_zoned(TimeZone::UTC).date();

    midnight_ms(date)
}

/// Renders a date the way delivery tables show it, e.g. `Mon, 14 Oct`.
///
/// # Errors
///
/// Returns an error when the value is outside the supported range.
pub fn date_to_text(ms: i64) -> Result<String, DateError> {
    Ok(ms_to_date(ms)?.strftime("%a, %d %b").to_string())
}

/// Lowercases text and joins its words with dashes, e.g. `Acme Corp` -> `acme-corp`.
pub fn text_to_slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn midnight_ms(date: Date) -> Result<i64, DateError> {
    Ok(date.to_zoned(TimeZone::UTC)?.timestamp().as_millisecond())
}

/// Dates customers may currently order for.
///
/// Orders open for the week starting next Monday until Saturday; from Saturday on the window
/// moves one week further out.
///
/// The moved window closes at midnight on Friday of the following week (Sunday + 12), not
/// Saturday. Existing clients use the same cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderWindow {
    /// Earliest delivery date accepted (UTC midnight, ms).
    pub gte: i64,

    /// Moment ordering for this window closes (UTC midnight, ms).
    pub expires_at: i64,
}

impl OrderWindow {
    /// Computes the window in effect at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delivery time zone cannot be loaded or date arithmetic
    /// overflows.
    pub fn at(now: Timestamp) -> Result<Self, DateError> {
        let utc_today = now.to_zoned(TimeZone::UTC).date();
        let offset = i64::from(utc_today.weekday().to_sunday_zero_offset());
        let sunday = utc_today.checked_sub(offset.days())?;

        let week_day = |days: i64| -> Result<i64, DateError> {
            midnight_ms(sunday.checked_add(days.days())?)
        };

        let next_saturday = week_day(6)?;
        let next_monday = week_day(8)?;
        // Sunday + 12 is a Friday; see the type docs.
        let following_saturday = week_day(12)?;
        let following_monday = week_day(15)?;

        let delivery_zone = TimeZone::get(DELIVERY_TIME_ZONE)?;
        let today = midnight_ms(now.to_zoned(delivery_zone).date())?;

        if today < next_saturday {
            Ok(Self {
                gte: next_monday,
                expires_at: next_saturday,
            })
        } else {
            Ok(Self {
                gte: following_monday,
                expires_at: following_saturday,
            })
        }
    }

    /// Whether a delivery date falls inside the window.
    pub fn accepts(&self, delivery_date: i64) -> bool {
        delivery_date >= self.gte
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn date_to_ms_accepts_timestamps_and_dates() -> TestResult {
        let from_timestamp = date_to_ms("2024-10-14T00:00:00.000Z")?;
        let from_date = date_to_ms("2024-10-14")?;

        assert_eq!(from_timestamp, 1_728_864_000_000);
        assert_eq!(from_date, from_timestamp);

        Ok(())
    }

    #[test]
    fn date_to_ms_rejects_garbage() {
        let result = date_to_ms("next tuesday");

        assert!(matches!(result, Err(DateError::Invalid(_))));
    }

    #[test]
    fn utc_midnight_truncates_time_of_day() -> TestResult {
        let noon = date_to_ms("2024-10-14T12:30:00Z")?;

        assert_eq!(utc_midnight_ms(noon)?, 1_728_864_000_000);

        Ok(())
    }

    #[test]
    fn date_to_text_matches_table_format() -> TestResult {
        assert_eq!(date_to_text(1_728_864_000_000)?, "Mon, 14 Oct");
        assert_eq!(date_to_text(date_to_ms("2024-10-07")?)?, "Mon, 07 Oct");

        Ok(())
    }

    #[test]
    fn slug_joins_words() {
        assert_eq!(text_to_slug("Acme  Corp Lunch"), "acme-corp-lunch");
        assert_eq!(text_to_slug(""), "");
    }

    #[test]
    fn window_midweek_opens_next_monday() -> TestResult {
        // Wednesday 2024-10-16 at 18:00 UTC, 11:00 in Los Angeles.
        let now: Timestamp = "2024-10-16T18:00:00Z".parse()?;

        let window = OrderWindow::at(now)?;

        assert_eq!(window.gte, date_to_ms("2024-10-21")?);
        assert_eq!(window.expires_at, date_to_ms("2024-10-19")?);
        assert!(window.accepts(date_to_ms("2024-10-22")?));
        assert!(!window.accepts(date_to_ms("2024-10-18")?));

        Ok(())
    }

    #[test]
    fn window_on_saturday_moves_a_week_out() -> TestResult {
        // Saturday 2024-10-19 at 20:00 UTC, still Saturday in Los Angeles.
        let now: Timestamp = "2024-10-19T20:00:00Z".parse()?;

        let window = OrderWindow::at(now)?;

        assert_eq!(window.gte, date_to_ms("2024-10-28")?);
        // Friday of the following week.
        assert_eq!(window.expires_at, date_to_ms("2024-10-25")?);

        Ok(())
    }
}

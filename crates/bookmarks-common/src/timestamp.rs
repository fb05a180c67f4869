//! Epoch timestamp normalization.
//!
//! Bookmark stores record dates as integers since the Unix epoch, but at
//! inconsistent resolutions: Netscape files use seconds, JSON exports use
//! milliseconds and SQLite stores use microseconds. Rather than guessing the
//! unit, values are normalized by keeping only the leading
//! [`SECONDS_DIGITS`] decimal digits, which is the width of any plausible
//! seconds-since-epoch value between 2001 and 2286.
//!
//! The heuristic is lossy: sub-second precision is discarded, and a genuine
//! seconds value after 2286 would be misread. Values at the boundary widths
//! (exactly 10, 11, 14 or 15 digits) follow the same truncation rule with no
//! special casing.

use time::OffsetDateTime;

/// Number of leading decimal digits kept from an epoch value.
pub const SECONDS_DIGITS: u32 = 10;

/// Convert an epoch value of unknown resolution into a UTC date.
///
/// Returns `None` for zero and negative values: "no timestamp" is distinct
/// from the epoch itself.
#[must_use]
pub fn from_epoch_value(value: i64) -> Option<OffsetDateTime> {
    if value < 1 {
        return None;
    }
    let seconds = truncate_to_seconds(value.unsigned_abs());
    i64::try_from(seconds)
        .ok()
        .and_then(|seconds| OffsetDateTime::from_unix_timestamp(seconds).ok())
}

/// Parse a decimal epoch value (as found in markup attributes) and normalize it.
///
/// Surrounding whitespace is ignored; anything that is not an integer yields `None`.
#[must_use]
pub fn parse_epoch_value(value: &str) -> Option<OffsetDateTime> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(from_epoch_value)
}

/// Whole seconds since the Unix epoch, the resolution every writer emits.
#[must_use]
pub const fn to_epoch_seconds(date: OffsetDateTime) -> i64 {
    date.unix_timestamp()
}

fn truncate_to_seconds(value: u64) -> u64 {
    let digits = value.ilog10() + 1;
    if digits <= SECONDS_DIGITS {
        value
    } else {
        value / 10u64.pow(digits - SECONDS_DIGITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn seconds_are_used_as_is() {
        assert_eq!(
            from_epoch_value(1_355_307_132),
            Some(datetime!(2012-12-12 12:12:12 UTC))
        );
    }

    #[test]
    fn milliseconds_and_microseconds_are_truncated() {
        let expected = Some(datetime!(2022-01-01 0:00 UTC));
        assert_eq!(from_epoch_value(1_640_995_200_123), expected);
        assert_eq!(from_epoch_value(1_640_995_200_123_456), expected);
        assert_eq!(from_epoch_value(1_640_995_200), expected);
    }

    #[test]
    fn non_positive_values_have_no_timestamp() {
        assert_eq!(from_epoch_value(0), None);
        assert_eq!(from_epoch_value(-1_640_995_200), None);
    }

    #[test]
    fn short_values_are_seconds() {
        assert_eq!(from_epoch_value(1), Some(datetime!(1970-01-01 0:00:01 UTC)));
    }

    #[test]
    fn strings_are_parsed_and_normalized() {
        assert_eq!(
            parse_epoch_value("1640995200123"),
            Some(datetime!(2022-01-01 0:00 UTC))
        );
        assert_eq!(
            parse_epoch_value(" 1640995200 "),
            Some(datetime!(2022-01-01 0:00 UTC))
        );
        assert_eq!(parse_epoch_value(""), None);
        assert_eq!(parse_epoch_value("yesterday"), None);
        assert_eq!(parse_epoch_value("0"), None);
    }

    #[test]
    fn epoch_seconds_drop_sub_second_precision() {
        let date = datetime!(2039-01-01 12:12:12.750 UTC);
        assert_eq!(to_epoch_seconds(date), 2_177_496_732);
    }
}

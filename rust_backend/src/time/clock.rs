use chrono::format::ParseErrorKind;
use chrono::{NaiveTime, Timelike};

use crate::core::domain::MINUTES_PER_DAY;
use crate::core::error::ParseError;

const CLOCK_FORMAT: &str = "%H:%M";

/// Parse `HH:MM` clock text into a minute offset from midnight.
///
/// The hour takes one or two digits in `0..24`; the minute takes exactly two
/// digits in `0..60`. Surrounding whitespace is ignored. Anything else is a
/// [`ParseError`]: malformed input is never coerced to midnight.
///
/// # Example
/// ```
/// use occupancy_rust::time::parse_clock_time;
/// assert_eq!(parse_clock_time("08:30"), Ok(510));
/// assert!(parse_clock_time("abc").is_err());
/// ```
pub fn parse_clock_time(text: &str) -> Result<i32, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    // chrono accepts single-digit minutes and inner padding; reject those first
    let (hour_part, minute_part) = trimmed
        .split_once(':')
        .ok_or_else(|| ParseError::Malformed(trimmed.to_string()))?;
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hour_part.len())
        || minute_part.len() != 2
        || !digits(hour_part)
        || !digits(minute_part)
    {
        return Err(ParseError::Malformed(trimmed.to_string()));
    }

    match NaiveTime::parse_from_str(trimmed, CLOCK_FORMAT) {
        Ok(time) => Ok((time.num_seconds_from_midnight() / 60) as i32),
        Err(e) if e.kind() == ParseErrorKind::OutOfRange => {
            let hour_ok = NaiveTime::parse_from_str(&format!("{}:00", hour_part), CLOCK_FORMAT);
            if hour_ok.is_ok() {
                Err(ParseError::MinuteOutOfRange(trimmed.to_string()))
            } else {
                Err(ParseError::HourOutOfRange(trimmed.to_string()))
            }
        }
        Err(_) => Err(ParseError::Malformed(trimmed.to_string())),
    }
}

/// Format a minute offset as zero-padded `HH:MM`.
///
/// Offsets outside a single day wrap onto the clock face, so `-20` renders
/// as `23:40` and `1450` as `00:10`.
pub fn format_minutes(minutes: i32) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY) as u32;
    match NaiveTime::from_num_seconds_from_midnight_opt(wrapped * 60, 0) {
        Some(time) => time.format(CLOCK_FORMAT).to_string(),
        // Unreachable after the wrap
        None => format!("{:02}:{:02}", wrapped / 60, wrapped % 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!(parse_clock_time("00:00"), Ok(0));
        assert_eq!(parse_clock_time("12:00"), Ok(720));
        assert_eq!(parse_clock_time("23:59"), Ok(1439));
        assert_eq!(parse_clock_time("7:05"), Ok(425));
        assert_eq!(parse_clock_time(" 06:30 "), Ok(390));
    }

    #[test]
    fn test_parse_rejects_garbage_instead_of_midnight() {
        assert_eq!(
            parse_clock_time("abc"),
            Err(ParseError::Malformed("abc".to_string()))
        );
        assert_eq!(parse_clock_time(""), Err(ParseError::Empty));
        assert_eq!(parse_clock_time("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_structural_errors() {
        for text in [
            "12", "12:", ":30", "12:3", "123:00", "12:30:00", "-1:00", "1a:00", "+1:00",
            "12: 30", "1 :30", "12h30",
        ] {
            assert!(
                matches!(parse_clock_time(text), Err(ParseError::Malformed(_))),
                "expected malformed for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_fields() {
        assert_eq!(
            parse_clock_time("24:00"),
            Err(ParseError::HourOutOfRange("24:00".to_string()))
        );
        assert_eq!(
            parse_clock_time("10:60"),
            Err(ParseError::MinuteOutOfRange("10:60".to_string()))
        );
        assert_eq!(
            parse_clock_time("99:99"),
            Err(ParseError::HourOutOfRange("99:99".to_string()))
        );
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(690), "11:30");
        assert_eq!(format_minutes(1439), "23:59");
        assert_eq!(format_minutes(-20), "23:40");
        assert_eq!(format_minutes(1450), "00:10");
    }

    #[test]
    fn test_format_then_parse_within_day() {
        for minutes in [0, 59, 60, 599, 1000, 1439] {
            assert_eq!(parse_clock_time(&format_minutes(minutes)), Ok(minutes));
        }
    }
}

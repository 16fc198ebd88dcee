use serde::{ser::Error as _, Serializer};
use time::{macros::format_description, Date, OffsetDateTime, UtcOffset, Weekday};

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
}

/// Calendar day of a timestamp, taken in UTC.
pub fn utc_day(at: OffsetDateTime) -> Date {
    at.to_offset(UtcOffset::UTC).date()
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn weekday_abbrev(date: Date) -> &'static str {
    match date.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

pub fn serialize_iso_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = date
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(S::Error::custom)?;
    serializer.serialize_str(&formatted)
}

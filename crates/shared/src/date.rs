use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn format_timestamp(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_default()
}

pub fn now_timestamp() -> String {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Parses a stored RFC 3339 timestamp, falling back to the current time
/// for empty or malformed values.
pub fn timestamp_or_now(value: &str) -> OffsetDateTime {
    OffsetDateTime::parse(value, &Rfc3339).unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Parses `YYYY-MM-DD`. A full timestamp is accepted and truncated to its date.
pub fn parse_date(value: &str) -> crate::Result<Date> {
    let value = value.trim();
    let value = value.get(..10).filter(|_| value.len() > 10).unwrap_or(value);

    Ok(Date::parse(value, DATE_FORMAT)?)
}

pub fn format_date(value: Date) -> String {
    value.format(DATE_FORMAT).unwrap_or_default()
}

pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use time::Date;

    pub fn serialize<S: Serializer>(value: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn parse_date_accepts_plain_and_timestamp_forms() {
        let expected = Date::from_calendar_date(2024, Month::June, 1).unwrap();
        assert_eq!(parse_date("2024-06-01").unwrap(), expected);
        assert_eq!(parse_date("2024-06-01T18:30:00.000Z").unwrap(), expected);
        assert!(parse_date("06/01/2024").is_err());
    }

    #[test]
    fn malformed_timestamp_falls_back_to_now() {
        let before = OffsetDateTime::now_utc();
        assert!(timestamp_or_now("not a date") >= before);
        assert_eq!(
            format_timestamp(timestamp_or_now("2024-01-15T10:00:00Z")),
            "2024-01-15T10:00:00Z"
        );
    }
}

//! Timestamp helpers.
//!
//! Timestamps are `time::OffsetDateTime` in memory and RFC 3339 strings on
//! the wire and in stored documents.

use crate::error::Result;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Returns the current UTC time.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Formats a timestamp as an RFC 3339 string.
pub fn format_rfc3339(timestamp: OffsetDateTime) -> Result<String> {
    Ok(timestamp.format(&Rfc3339)?)
}

/// Parses an RFC 3339 string into a timestamp.
pub fn parse_rfc3339(value: &str) -> Result<OffsetDateTime> {
    Ok(OffsetDateTime::parse(value, &Rfc3339)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_rfc3339() {
        let ts = datetime!(2024-03-01 10:30:00 UTC);
        assert_eq!(format_rfc3339(ts).unwrap(), "2024-03-01T10:30:00Z");
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_rfc3339("2024-03-01T10:30:00Z").unwrap();
        assert_eq!(ts, datetime!(2024-03-01 10:30:00 UTC));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_rfc3339("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(
            ts.to_offset(time::UtcOffset::UTC),
            datetime!(2024-03-01 10:30:00 UTC)
        );
    }

    #[test]
    fn test_parse_rfc3339_invalid() {
        assert!(parse_rfc3339("not-a-date").is_err());
        assert!(parse_rfc3339("2024-13-01T00:00:00Z").is_err());
        assert!(parse_rfc3339("").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let original = "2024-03-01T10:30:00Z";
        let parsed = parse_rfc3339(original).unwrap();
        assert_eq!(format_rfc3339(parsed).unwrap(), original);
    }
}

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone};

/// Fallback pattern accepted by some servers that do not emit full ISO 8601.
const LENIENT_PATTERN: &str = "%Y-%m-%d %H:%M";

/// Parses and prints GeoReport timestamps against an ordered list of accepted
/// formats: ISO 8601 without sub-second precision first, then a lenient
/// `YYYY-MM-DD HH:MM` fallback.
///
/// Each failed attempt is discarded and the next pattern is tried; a text that
/// matches no pattern yields `None`, never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCodec {
    timezone: Option<FixedOffset>,
}

impl DateCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single fixed offset uniformly to every pattern: zoneless
    /// text is interpreted in it and every parsed result is converted to it.
    pub fn with_timezone(timezone: FixedOffset) -> Self {
        Self {
            timezone: Some(timezone),
        }
    }

    pub fn parse(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(match self.timezone {
                Some(tz) => parsed.with_timezone(&tz),
                None => parsed,
            });
        }
        let naive = NaiveDateTime::parse_from_str(raw, LENIENT_PATTERN).ok()?;
        let tz = self.timezone.unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        tz.from_local_datetime(&naive).single()
    }

    /// Renders with the first (ISO 8601) pattern, seconds precision, `Z` for
    /// UTC.
    pub fn print(&self, timestamp: &DateTime<FixedOffset>) -> String {
        let timestamp = match self.timezone {
            Some(tz) => timestamp.with_timezone(&tz),
            None => *timestamp,
        };
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_8601_with_utc_designator() {
        let codec = DateCodec::new();
        let parsed = codec.parse("2011-04-05T17:48:34Z").unwrap();
        assert_eq!(codec.print(&parsed), "2011-04-05T17:48:34Z");
    }

    #[test]
    fn parses_iso_8601_with_numeric_offset() {
        let codec = DateCodec::new();
        let parsed = codec.parse("2010-04-14T06:37:38-08:00").unwrap();
        assert_eq!(codec.print(&parsed), "2010-04-14T06:37:38-08:00");
    }

    #[test]
    fn falls_back_to_lenient_pattern() {
        let codec = DateCodec::new();
        let parsed = codec.parse("2010-04-14 06:37").unwrap();
        assert_eq!(codec.print(&parsed), "2010-04-14T06:37:00Z");
    }

    #[test]
    fn unparseable_text_yields_none() {
        let codec = DateCodec::new();
        assert!(codec.parse("not a date").is_none());
        assert!(codec.parse("").is_none());
        assert!(codec.parse("14/04/2010").is_none());
    }

    #[test]
    fn round_trips_iso_representable_timestamps() {
        let codec = DateCodec::new();
        for raw in ["2011-04-05T17:48:34Z", "2010-04-15T06:37:38-08:00"] {
            let t = codec.parse(raw).unwrap();
            assert_eq!(codec.parse(&codec.print(&t)), Some(t));
        }
    }

    #[test]
    fn configured_timezone_applies_to_every_pattern() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let codec = DateCodec::with_timezone(tz);
        let from_iso = codec.parse("2011-04-05T17:48:34Z").unwrap();
        assert_eq!(codec.print(&from_iso), "2011-04-05T19:48:34+02:00");
        let from_lenient = codec.parse("2011-04-05 17:48").unwrap();
        assert_eq!(codec.print(&from_lenient), "2011-04-05T17:48:00+02:00");
    }
}

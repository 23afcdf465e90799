// src/data_input/timezone.rs

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

/// Parses an IANA timezone name such as `Asia/Seoul` or `UTC`.
pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| format!("unknown timezone '{name}': {e}"))
}

/// Resolves the running system's local timezone, falling back to UTC.
///
/// Call once per run and pass the result down; the loader and the tick
/// formatter must agree on the same zone.
pub fn system_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => match parse_timezone(&name) {
            Ok(tz) => {
                debug!("Resolved system timezone '{}'", tz.name());
                tz
            }
            Err(e) => {
                warn!("{e}; falling back to UTC");
                Tz::UTC
            }
        },
        Err(e) => {
            warn!("Could not determine the system timezone ({e}); falling back to UTC");
            Tz::UTC
        }
    }
}

/// Converts a UTC instant into the display timezone. The instant itself is unchanged.
pub fn to_display(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

/// Short zone name in effect at `at`, e.g. `KST` or `CEST`.
pub fn abbreviation(at: &DateTime<Tz>) -> String {
    at.format("%Z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_known_and_unknown_names() {
        assert_eq!(parse_timezone("Asia/Seoul"), Ok(Tz::Asia__Seoul));
        assert_eq!(parse_timezone(" UTC "), Ok(Tz::UTC));
        assert!(parse_timezone("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn test_round_trip_preserves_instant() {
        let instants = [
            Utc.with_ymd_and_hms(2024, 1, 15, 3, 4, 5).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 31, 1, 30, 0).unwrap(), // around a European DST switch
            Utc.with_ymd_and_hms(2024, 10, 27, 0, 59, 59).unwrap(),
        ];
        for tz in [Tz::UTC, Tz::Asia__Seoul, Tz::Europe__Berlin, Tz::America__New_York] {
            for instant in instants {
                let local = to_display(instant, tz);
                assert_eq!(local.with_timezone(&Utc), instant);
                assert_eq!(local.timestamp_millis(), instant.timestamp_millis());
            }
        }
    }

    #[test]
    fn test_wall_clock_shifts_by_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let local = to_display(instant, Tz::Asia__Seoul);
        assert_eq!(local.format("%H:%M:%S").to_string(), "21:00:00");
    }

    #[test]
    fn test_abbreviation() {
        let winter = to_display(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), Tz::Europe__Berlin);
        let summer = to_display(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(), Tz::Europe__Berlin);
        assert_eq!(abbreviation(&winter), "CET");
        assert_eq!(abbreviation(&summer), "CEST");
        let utc = to_display(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(), Tz::UTC);
        assert_eq!(abbreviation(&utc), "UTC");
    }
}

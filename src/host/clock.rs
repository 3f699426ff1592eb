use std::str::FromStr;

use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;

use crate::error::AppError;
use crate::stamp::Clock;

/// Zone stamps are rendered in: the machine's local zone or a named one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) enum Timezone {
    #[default]
    Local,
    Named(Tz),
}

impl Timezone {
    /// `None`, empty and `local` mean the system zone; `utc`/`z` and IANA
    /// names are looked up in the tz database.
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// `utc` seen through this zone, pinned to the offset in force then.
    pub(crate) fn at(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                local.with_timezone(&local.offset().fix())
            }
            Timezone::Named(tz) => {
                let zoned = utc.with_timezone(&tz);
                zoned.with_timezone(&zoned.offset().fix())
            }
        }
    }
}

/// Wall clock read once per command.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemClock {
    timezone: Timezone,
}

impl SystemClock {
    pub(crate) fn new(timezone: Timezone) -> Self {
        SystemClock { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.timezone.at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        rfc3339.parse::<DateTime<Utc>>().unwrap()
    }

    #[test]
    fn parse_defaults_to_local() {
        for input in [None, Some(""), Some("local"), Some("  LOCAL  ")] {
            assert_eq!(Timezone::parse(input).unwrap(), Timezone::Local, "{input:?}");
        }
    }

    #[test]
    fn parse_utc_spellings() {
        for input in ["utc", "UTC", "z", " Z "] {
            assert_eq!(
                Timezone::parse(Some(input)).unwrap(),
                Timezone::Named(chrono_tz::UTC)
            );
        }
    }

    #[test]
    fn parse_iana_name() {
        assert_eq!(
            Timezone::parse(Some("Europe/Berlin")).unwrap(),
            Timezone::Named(chrono_tz::Europe::Berlin)
        );
    }

    #[test]
    fn parse_rejects_unknown_zone() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn named_zone_tracks_daylight_saving() {
        let berlin = Timezone::Named(chrono_tz::Europe::Berlin);
        let winter = berlin.at(utc("2024-01-05T08:03:07Z"));
        let summer = berlin.at(utc("2024-07-05T08:03:07Z"));
        assert_eq!(winter.offset().local_minus_utc(), 3600);
        assert_eq!(winter.format("%H:%M:%S").to_string(), "09:03:07");
        assert_eq!(summer.offset().local_minus_utc(), 7200);
        assert_eq!(summer.format("%H:%M:%S").to_string(), "10:03:07");
    }

    #[test]
    fn system_clock_in_utc_has_zero_offset() {
        let clock = SystemClock::new(Timezone::Named(chrono_tz::UTC));
        assert_eq!(clock.now().offset().local_minus_utc(), 0);
    }
}

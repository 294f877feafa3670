//! Opening hours: `"HH:MM-HH:MM"` per weekday, Monday first.

use crate::model::Venue;
use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("Malformed hours {0:?}, expected HH:MM-HH:MM")]
    Malformed(String),
    /// Closing time is not after opening time. Overnight ranges are not supported.
    #[error("Hours {0:?} close before they open")]
    Inverted(String),
}

/// `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl HourRange {
    pub fn parse(entry: &str) -> Result<Self, HoursError> {
        let malformed = || HoursError::Malformed(entry.to_string());
        let (start, end) = entry.split_once('-').ok_or_else(malformed)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| malformed())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| malformed())?;
        if end <= start {
            return Err(HoursError::Inverted(entry.to_string()));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// The schedule entry for `day`, if the venue published one.
pub fn entry_for(weekly_hours: &[String], day: Weekday) -> Option<&str> {
    weekly_hours
        .get(day.num_days_from_monday() as usize)
        .map(String::as_str)
}

/// Open flag set and `local` within today's range. Anything missing or unparseable is closed.
pub fn is_operating(venue: &Venue, local: NaiveDateTime) -> bool {
    if !venue.open {
        return false;
    }
    let Some(entry) = entry_for(&venue.weekly_hours, local.weekday()) else {
        return false;
    };
    match HourRange::parse(entry) {
        Ok(range) => range.contains(local.time()),
        Err(e) => {
            tracing::debug!(venue = %venue.id, error = %e, "Treating venue as closed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VenueId;
    use chrono::NaiveDate;

    fn venue(open: bool, hours: &[&str]) -> Venue {
        Venue {
            id: VenueId(1),
            name: "Lobby".into(),
            open,
            weekly_hours: hours.iter().map(|h| h.to_string()).collect(),
        }
    }

    // 2026-03-02 is a Monday.
    fn monday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_within_hours() {
        let v = venue(true, &["08:00-16:00"]);
        assert!(is_operating(&v, monday(9, 0)));
        assert!(is_operating(&v, monday(8, 0)));
        assert!(!is_operating(&v, monday(16, 0)));
        assert!(!is_operating(&v, monday(18, 0)));
    }

    #[test]
    fn test_closed_flag_wins() {
        assert!(!is_operating(&venue(false, &["08:00-16:00"]), monday(9, 0)));
    }

    #[test]
    fn test_missing_or_malformed_entry_is_closed() {
        assert!(!is_operating(&venue(true, &[]), monday(9, 0)));
        assert!(!is_operating(&venue(true, &["cerrado"]), monday(9, 0)));
        assert!(!is_operating(&venue(true, &["22:00-02:00"]), monday(23, 0)));
        // Tuesday has no entry.
        assert!(!is_operating(
            &venue(true, &["08:00-16:00"]),
            monday(9, 0) + chrono::TimeDelta::days(1)
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            HourRange::parse("8-16"),
            Err(HoursError::Malformed("8-16".into()))
        );
        assert_eq!(
            HourRange::parse("10:00-10:00"),
            Err(HoursError::Inverted("10:00-10:00".into()))
        );
        assert!(HourRange::parse(" 07:30 - 11:15 ").is_ok());
    }
}

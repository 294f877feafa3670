//! Once-a-day birthday greeting.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use tracing::{info, warn};

/// Key under which the day of the last greeting is stored.
pub const SHOWN_KEY: &str = "birthday_shown";

/// Small persistent key-value store kept on the device.
pub trait LocalStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

fn stamp(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

pub struct BirthdayGreeter<S: LocalStore> {
    store: S,
    birth_date: Option<String>,
}

impl<S: LocalStore> BirthdayGreeter<S> {
    /// `birth_date` is the profile's `YYYY-MM-DD` value, if any.
    pub fn new(store: S, birth_date: Option<String>) -> Self {
        Self { store, birth_date }
    }

    /// The user's new age when `today` is their birthday and no greeting was shown today yet.
    pub fn check(&mut self, today: NaiveDate) -> Option<u32> {
        let raw = self.birth_date.as_deref()?;
        let born = match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                warn!(birth_date = raw, error = %e, "Ignoring malformed birth date");
                return None;
            }
        };
        if (born.month(), born.day()) != (today.month(), today.day()) {
            return None;
        }
        if self.greeted_on(today) {
            return None;
        }
        let age = u32::try_from(today.year() - born.year()).ok()?;
        self.store.set(SHOWN_KEY, stamp(today));
        info!(age, "Birthday greeting");
        Some(age)
    }

    /// Whether the greeting was already shown on `today`.
    pub fn greeted_on(&self, today: NaiveDate) -> bool {
        self.store.get(SHOWN_KEY).as_deref() == Some(stamp(today).as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_greets_once_per_day() {
        let mut greeter = BirthdayGreeter::new(MemoryStore::default(), Some("1990-03-02".into()));

        assert_eq!(greeter.check(day(2026, 3, 2)), Some(36));
        assert_eq!(greeter.check(day(2026, 3, 2)), None);
        assert!(greeter.greeted_on(day(2026, 3, 2)));
        assert_eq!(greeter.store().get(SHOWN_KEY).as_deref(), Some("2026-03-02"));
        assert_eq!(greeter.check(day(2026, 3, 3)), None);
        assert_eq!(greeter.check(day(2027, 3, 2)), Some(37));
    }

    #[test]
    fn test_malformed_or_missing_date_yields_nothing() {
        let mut greeter = BirthdayGreeter::new(MemoryStore::default(), Some("02/03/1990".into()));
        assert_eq!(greeter.check(day(2026, 3, 2)), None);

        let mut nobody = BirthdayGreeter::new(MemoryStore::default(), None);
        assert_eq!(nobody.check(day(2026, 3, 2)), None);
    }
}

//! Runtime configuration read from `CANTEEN_*` environment variables.

use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

/// Timings and sizes of a running session.
#[derive(Debug, Clone)]
pub struct CanteenConfig {
    /// How often the order list is reloaded in full.
    pub poll_interval: Duration,
    /// How often the countdown is recomputed.
    pub tick_interval: Duration,
    /// How often the birthday greeting is checked.
    pub birthday_interval: Duration,
    /// How long after placing an order the next one is blocked.
    pub lock_window: TimeDelta,
    /// Request channel capacity of every table and of the session.
    pub channel_buffer: usize,
    /// Offset of the venues' local time from UTC, used for opening hours and birthdays.
    pub utc_offset: FixedOffset,
}

impl Default for CanteenConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            tick_interval: Duration::from_secs(10),
            birthday_interval: Duration::from_secs(60),
            lock_window: TimeDelta::minutes(60),
            channel_buffer: 32,
            utc_offset: Utc.fix(),
        }
    }
}

impl CanteenConfig {
    pub fn load() -> Self {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with a custom variable source.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let poll_secs: u64 = try_load(&lookup, "CANTEEN_POLL_SECS", 5);
        let tick_secs: u64 = try_load(&lookup, "CANTEEN_TICK_SECS", 10);
        let birthday_secs: u64 = try_load(&lookup, "CANTEEN_BIRTHDAY_SECS", 60);
        let lock_minutes: i64 = try_load(&lookup, "CANTEEN_LOCK_MINUTES", 60);
        let channel_buffer: usize = try_load(&lookup, "CANTEEN_CHANNEL_BUFFER", 32);
        let offset_minutes: i32 = try_load(&lookup, "CANTEEN_UTC_OFFSET_MINUTES", 0);

        let defaults = Self::default();
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| {
            warn!("CANTEEN_UTC_OFFSET_MINUTES out of range: {offset_minutes}, using UTC");
            defaults.utc_offset
        });

        Self {
            poll_interval: positive_secs(poll_secs, defaults.poll_interval),
            tick_interval: positive_secs(tick_secs, defaults.tick_interval),
            birthday_interval: positive_secs(birthday_secs, defaults.birthday_interval),
            lock_window: TimeDelta::try_minutes(lock_minutes)
                .filter(|w| *w >= TimeDelta::zero())
                .unwrap_or(defaults.lock_window),
            channel_buffer: if channel_buffer == 0 {
                defaults.channel_buffer
            } else {
                channel_buffer
            },
            utc_offset,
        }
    }
}

// tokio intervals panic on a zero period.
fn positive_secs(secs: u64, default: Duration) -> Duration {
    if secs == 0 {
        warn!("Zero interval configured, using default: {default:?}");
        return default;
    }
    Duration::from_secs(secs)
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
    }
}

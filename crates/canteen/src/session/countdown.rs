//! The message shown next to the order button while ordering is blocked.

use crate::session::block::BlockState;
use chrono::{DateTime, Utc};

pub const RATING_REQUIRED: &str = "you must rate your last order before ordering again";

/// Whole minutes left until `until`, rounded up. Zero once `until` has passed.
pub fn minutes_left(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (until - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + 59_999) / 60_000
}

pub fn message(state: &BlockState, now: DateTime<Utc>) -> Option<String> {
    match state {
        BlockState::Unblocked => None,
        BlockState::TimeLocked { until } => Some(format!(
            "next order available in {} min.",
            minutes_left(*until, now)
        )),
        BlockState::RatingLocked { .. } => Some(RATING_REQUIRED.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn test_minutes_round_up() {
        let until = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        assert_eq!(minutes_left(until, until - TimeDelta::minutes(15)), 15);
        assert_eq!(minutes_left(until, until - TimeDelta::seconds(14 * 60 + 1)), 15);
        assert_eq!(minutes_left(until, until - TimeDelta::seconds(1)), 1);
        assert_eq!(minutes_left(until, until), 0);
    }

    #[test]
    fn test_countdown_decreases_every_minute_of_ticks() {
        let until = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        let state = BlockState::TimeLocked { until };
        let mut now = until - TimeDelta::minutes(3);
        let mut seen = Vec::new();
        while now < until {
            let shown = minutes_left(until, now);
            if seen.last() != Some(&shown) {
                seen.push(shown);
            }
            now += TimeDelta::seconds(10);
        }
        assert_eq!(seen, vec![3, 2, 1]);
        assert_eq!(
            message(&state, until - TimeDelta::minutes(15)).as_deref(),
            Some("next order available in 15 min.")
        );
    }

    #[test]
    fn test_rating_lock_message_is_static() {
        let state = BlockState::RatingLocked {
            order_id: OrderId(1),
        };
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        assert_eq!(message(&state, now).as_deref(), Some(RATING_REQUIRED));
        assert_eq!(message(&BlockState::Unblocked, now), None);
    }
}

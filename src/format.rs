//! Due labels and relative ages for task listings
//!
//! Counts are floored, never rounded: 23h59m left is "the next 23h" and
//! anything from 24h up to 47h59m is "1d".

use chrono::{Duration, NaiveDateTime};

/// Describe how close a deadline is. Empty when there is no deadline.
pub fn format_due_label(due_at: Option<NaiveDateTime>, now: NaiveDateTime) -> String {
    let Some(due_at) = due_at else {
        return String::new();
    };

    let diff = due_at - now;

    if diff < Duration::zero() {
        // num_days truncates toward zero, so anything under a full day is bare "Overdue"
        let days = diff.num_days().abs();
        if days > 0 {
            format!("Overdue by {}d", days)
        } else {
            "Overdue".to_string()
        }
    } else if diff < Duration::minutes(1) {
        "Due in the next minute!".to_string()
    } else if diff < Duration::hours(1) {
        "Due in the next hour!".to_string()
    } else if diff < Duration::days(1) {
        format!("Due in the next {}h", diff.num_hours())
    } else {
        format!("Due in {}d", diff.num_days())
    }
}

/// Describe when something was created, relative to `now`.
///
/// Past a day old this falls back to a short date such as `Mar 04`.
pub fn format_relative_age(created_at: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = now - created_at;

    if diff < Duration::minutes(1) {
        "just now".to_string()
    } else if diff < Duration::hours(1) {
        format!("{}m ago", diff.num_minutes())
    } else if diff < Duration::days(1) {
        format!("{}h ago", diff.num_hours())
    } else {
        created_at.format("%b %d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::parse_timestamp;

    fn now() -> NaiveDateTime {
        parse_timestamp("2025-06-15 12:00:00").unwrap()
    }

    fn due_in(offset: Duration) -> String {
        format_due_label(Some(now() + offset), now())
    }

    fn age(offset: Duration) -> String {
        format_relative_age(now() - offset, now())
    }

    #[test]
    fn test_no_deadline_is_empty() {
        assert_eq!(format_due_label(None, now()), "");
        assert_eq!(
            format_due_label(None, parse_timestamp("1999-12-31 23:59:59").unwrap()),
            ""
        );
    }

    #[test]
    fn test_overdue_labels() {
        assert_eq!(due_in(-Duration::days(2)), "Overdue by 2d");
        assert_eq!(due_in(-Duration::hours(36)), "Overdue by 1d");
        assert_eq!(due_in(-Duration::hours(23)), "Overdue");
        assert_eq!(due_in(-Duration::seconds(1)), "Overdue");
    }

    #[test]
    fn test_sub_hour_labels() {
        assert_eq!(due_in(Duration::zero()), "Due in the next minute!");
        assert_eq!(due_in(Duration::seconds(59)), "Due in the next minute!");
        assert_eq!(due_in(Duration::seconds(60)), "Due in the next hour!");
        assert_eq!(due_in(Duration::minutes(59)), "Due in the next hour!");
    }

    #[test]
    fn test_hour_labels_floor() {
        assert_eq!(due_in(Duration::hours(1)), "Due in the next 1h");
        assert_eq!(due_in(Duration::minutes(150)), "Due in the next 2h");
        assert_eq!(due_in(Duration::hours(23) + Duration::minutes(59)), "Due in the next 23h");
    }

    #[test]
    fn test_day_boundary() {
        assert_eq!(due_in(Duration::hours(24)), "Due in 1d");
        assert_eq!(due_in(Duration::hours(24) + Duration::minutes(1)), "Due in 1d");
        assert_eq!(due_in(Duration::hours(47) + Duration::minutes(59)), "Due in 1d");
        assert_eq!(due_in(Duration::hours(48)), "Due in 2d");
        assert_eq!(due_in(Duration::days(5) + Duration::hours(3)), "Due in 5d");
    }

    #[test]
    fn test_relative_age() {
        assert_eq!(format_relative_age(now(), now()), "just now");
        assert_eq!(age(Duration::seconds(59)), "just now");
        assert_eq!(age(Duration::seconds(90)), "1m ago");
        assert_eq!(age(Duration::minutes(59) + Duration::seconds(59)), "59m ago");
        assert_eq!(age(Duration::hours(1)), "1h ago");
        assert_eq!(age(Duration::hours(23) + Duration::minutes(59)), "23h ago");
    }

    #[test]
    fn test_relative_age_falls_back_to_date() {
        assert_eq!(age(Duration::hours(24)), "Jun 14");
        assert_eq!(
            format_relative_age(parse_timestamp("2025-03-04 08:00:00").unwrap(), now()),
            "Mar 04"
        );
    }

    #[test]
    fn test_future_creation_is_just_now() {
        assert_eq!(age(-Duration::hours(2)), "just now");
    }
}

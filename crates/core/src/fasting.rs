//! Fasting-session duration logic and input validation.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum goal duration accepted when starting a fast, in hours (one week).
pub const MAX_GOAL_HOURS: f64 = 168.0;

/// A completed fasting session as seen by the pure engines.
///
/// This is deliberately a plain value type: the persistence layer maps its
/// rows into it, and the engines never see anything richer. `end_time` is
/// optional because a malformed record (completed without an end time) must
/// be skipped, not crash the computation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedFast {
    pub end_time: Option<Timestamp>,
    pub goal_duration_hours: Option<f64>,
    pub actual_duration_minutes: Option<i32>,
}

impl CompletedFast {
    /// Calendar day (UTC) on which the fast ended, if the record is well-formed.
    pub fn end_day(&self) -> Option<chrono::NaiveDate> {
        self.end_time.map(|t| t.date_naive())
    }

    /// Whether this fast carried a positive goal and a recorded duration.
    pub fn is_goal_bearing(&self) -> bool {
        matches!(self.goal_duration_hours, Some(g) if g > 0.0) && self.actual_duration_minutes.is_some()
    }

    /// Whether the recorded duration met the session's own goal.
    ///
    /// The boundary is inclusive: exactly `goal * 60` minutes counts.
    pub fn met_own_goal(&self) -> bool {
        match (self.goal_duration_hours, self.actual_duration_minutes) {
            (Some(goal), Some(actual)) if goal > 0.0 => f64::from(actual) >= goal * 60.0,
            _ => false,
        }
    }
}

/// Compute the elapsed duration of a fast in whole minutes, rounded to the
/// nearest minute.
///
/// Returns an error if `end` precedes `start` (clock skew or a corrupted
/// record); the caller decides how to surface that.
pub fn actual_duration_minutes(start: Timestamp, end: Timestamp) -> Result<i32, CoreError> {
    if end < start {
        return Err(CoreError::Validation(
            "Fast end time precedes its start time".into(),
        ));
    }
    let secs = (end - start).num_seconds();
    let minutes = (secs as f64 / 60.0).round() as i64;
    i32::try_from(minutes)
        .map_err(|_| CoreError::Validation("Fast duration out of range".into()))
}

/// Validate a goal duration supplied when starting a fast.
pub fn validate_goal_hours(goal_hours: f64) -> Result<(), CoreError> {
    if !goal_hours.is_finite() || goal_hours <= 0.0 {
        return Err(CoreError::Validation(
            "Goal duration must be a positive number of hours".into(),
        ));
    }
    if goal_hours > MAX_GOAL_HOURS {
        return Err(CoreError::Validation(format!(
            "Goal duration must not exceed {MAX_GOAL_HOURS} hours"
        )));
    }
    Ok(())
}

/// Validate a weight value for a new weight entry.
pub fn validate_weight(weight: f64) -> Result<(), CoreError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(CoreError::Validation(
            "Weight must be a positive number".into(),
        ));
    }
    Ok(())
}

/// Number of whole days between `end` and `now`, truncated.
///
/// Used for the half-open score windows: a fast ending exactly `n` days ago
/// (to the second) yields `n`, which is *excluded* from an `< n` window.
pub fn days_since(now: Timestamp, end: Timestamp) -> i64 {
    (now - end).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> Timestamp {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .expect("valid test timestamp")
            .and_utc()
    }

    #[test]
    fn duration_rounds_to_nearest_minute() {
        let start = ts("2024-03-01 08:00:00");
        // 16h and 29 seconds -> rounds down to 960.
        let end = ts("2024-03-02 00:00:29");
        assert_eq!(actual_duration_minutes(start, end).unwrap(), 960);

        // 16h and 31 seconds -> rounds up to 961.
        let end = ts("2024-03-02 00:00:31");
        assert_eq!(actual_duration_minutes(start, end).unwrap(), 961);
    }

    #[test]
    fn duration_rejects_end_before_start() {
        let start = ts("2024-03-02 08:00:00");
        let end = ts("2024-03-01 08:00:00");
        assert!(actual_duration_minutes(start, end).is_err());
    }

    #[test]
    fn zero_length_fast_is_zero_minutes() {
        let t = ts("2024-03-01 08:00:00");
        assert_eq!(actual_duration_minutes(t, t).unwrap(), 0);
    }

    #[test]
    fn goal_hours_bounds() {
        assert!(validate_goal_hours(16.0).is_ok());
        assert!(validate_goal_hours(MAX_GOAL_HOURS).is_ok());
        assert!(validate_goal_hours(0.0).is_err());
        assert!(validate_goal_hours(-1.0).is_err());
        assert!(validate_goal_hours(MAX_GOAL_HOURS + 0.1).is_err());
        assert!(validate_goal_hours(f64::NAN).is_err());
    }

    #[test]
    fn weight_must_be_positive() {
        assert!(validate_weight(72.5).is_ok());
        assert!(validate_weight(0.0).is_err());
        assert!(validate_weight(-3.0).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn days_since_truncates_partial_days() {
        let now = ts("2024-03-08 12:00:00");
        // Exactly 7 days ago.
        assert_eq!(days_since(now, ts("2024-03-01 12:00:00")), 7);
        // 6 days 23 hours ago.
        assert_eq!(days_since(now, ts("2024-03-01 13:00:00")), 6);
    }

    #[test]
    fn met_own_goal_is_inclusive() {
        let fast = CompletedFast {
            end_time: Some(ts("2024-03-01 20:00:00")),
            goal_duration_hours: Some(16.0),
            actual_duration_minutes: Some(960),
        };
        assert!(fast.met_own_goal());

        let short = CompletedFast {
            actual_duration_minutes: Some(959),
            ..fast.clone()
        };
        assert!(!short.met_own_goal());
    }

    #[test]
    fn goal_bearing_requires_positive_goal_and_duration() {
        let no_goal = CompletedFast {
            end_time: Some(ts("2024-03-01 20:00:00")),
            goal_duration_hours: None,
            actual_duration_minutes: Some(600),
        };
        assert!(!no_goal.is_goal_bearing());

        let zero_goal = CompletedFast {
            goal_duration_hours: Some(0.0),
            ..no_goal.clone()
        };
        assert!(!zero_goal.is_goal_bearing());

        let no_duration = CompletedFast {
            goal_duration_hours: Some(14.0),
            actual_duration_minutes: None,
            ..no_goal.clone()
        };
        assert!(!no_duration.is_goal_bearing());

        let full = CompletedFast {
            goal_duration_hours: Some(14.0),
            ..no_goal
        };
        assert!(full.is_goal_bearing());
    }
}

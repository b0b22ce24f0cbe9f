//! Weekly challenge table: 7 fixed daily fasting goals evaluated against
//! the last 7 calendar days of completed fasts.
//!
//! The challenge definition is static: two 12-hour days, two 14-hour days,
//! and three 16-hour days, worth 10 points each, plus a 50-point bonus when
//! the whole week is completed. Everything here is a pure function over an
//! in-memory history slice.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::fasting::CompletedFast;

// ---------------------------------------------------------------------------
// Static challenge definition
// ---------------------------------------------------------------------------

/// One slot of the static weekly challenge definition.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeSlot {
    /// Display label ("Day 1" is the oldest day of the window).
    pub day_label: &'static str,
    /// Days before the reference date (0 = today, 6 = six days ago).
    pub relative_day_index: u64,
    /// Required fasting duration in hours.
    pub goal_hours: f64,
    /// Points awarded when the slot is completed.
    pub points: i32,
}

/// The shipped 7-day challenge definition, oldest slot first.
pub const WEEKLY_CHALLENGE: [ChallengeSlot; 7] = [
    ChallengeSlot { day_label: "Day 1", relative_day_index: 6, goal_hours: 12.0, points: 10 },
    ChallengeSlot { day_label: "Day 2", relative_day_index: 5, goal_hours: 12.0, points: 10 },
    ChallengeSlot { day_label: "Day 3", relative_day_index: 4, goal_hours: 14.0, points: 10 },
    ChallengeSlot { day_label: "Day 4", relative_day_index: 3, goal_hours: 14.0, points: 10 },
    ChallengeSlot { day_label: "Day 5", relative_day_index: 2, goal_hours: 16.0, points: 10 },
    ChallengeSlot { day_label: "Day 6", relative_day_index: 1, goal_hours: 16.0, points: 10 },
    ChallengeSlot { day_label: "Day 7", relative_day_index: 0, goal_hours: 16.0, points: 10 },
];

/// Bonus awarded when all 7 slots are completed in the same window.
pub const SEVEN_DAY_BONUS_POINTS: i32 = 50;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Evaluation of a single challenge slot against the history.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeDayResult {
    pub day_label: String,
    pub relative_day_index: u64,
    /// Calendar day the slot targets.
    pub target_date: NaiveDate,
    pub goal_hours: f64,
    pub points_possible: i32,
    pub is_completed: bool,
    pub points_earned: i32,
    /// Actual duration of the fast that satisfied the slot, if any.
    pub duration_met_minutes: Option<i32>,
}

/// Full weekly challenge evaluation.
///
/// `days` is ordered chronologically (oldest slot first). The bonus is
/// reported separately from the per-day table and is already included in
/// `total_points` when awarded.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyChallengeSummary {
    pub days: Vec<ChallengeDayResult>,
    pub total_points: i32,
    pub bonus_awarded: bool,
    pub bonus_points: i32,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Evaluate the weekly challenge table for one user.
///
/// `history` must contain only completed fasts (the repository query
/// guarantees this); records missing an end time are skipped. A slot is
/// completed when some fast ended on its target calendar day with a
/// duration of at least `goal_hours * 60` minutes (inclusive). Multiple
/// qualifying fasts on the same day count once.
pub fn compute_weekly_challenges(
    history: &[CompletedFast],
    reference_date: NaiveDate,
) -> WeeklyChallengeSummary {
    let mut days = Vec::with_capacity(WEEKLY_CHALLENGE.len());
    let mut total_points = 0;
    let mut completed_count = 0;

    for slot in &WEEKLY_CHALLENGE {
        let target_date = reference_date
            .checked_sub_days(Days::new(slot.relative_day_index))
            .unwrap_or(reference_date);

        let qualifying = history.iter().find(|fast| {
            fast.end_day() == Some(target_date)
                && fast
                    .actual_duration_minutes
                    .is_some_and(|m| f64::from(m) >= slot.goal_hours * 60.0)
        });

        let is_completed = qualifying.is_some();
        let points_earned = if is_completed { slot.points } else { 0 };
        total_points += points_earned;
        if is_completed {
            completed_count += 1;
        }

        days.push(ChallengeDayResult {
            day_label: slot.day_label.to_string(),
            relative_day_index: slot.relative_day_index,
            target_date,
            goal_hours: slot.goal_hours,
            points_possible: slot.points,
            is_completed,
            points_earned,
            duration_met_minutes: qualifying.and_then(|f| f.actual_duration_minutes),
        });
    }

    let bonus_awarded = completed_count == WEEKLY_CHALLENGE.len();
    if bonus_awarded {
        total_points += SEVEN_DAY_BONUS_POINTS;
    }

    WeeklyChallengeSummary {
        days,
        total_points,
        bonus_awarded,
        bonus_points: if bonus_awarded { SEVEN_DAY_BONUS_POINTS } else { 0 },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> Timestamp {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .expect("valid test timestamp")
            .and_utc()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
    }

    fn fast_ending(end: &str, minutes: i32) -> CompletedFast {
        CompletedFast {
            end_time: Some(ts(end)),
            goal_duration_hours: None,
            actual_duration_minutes: Some(minutes),
        }
    }

    /// One fast per day, each exactly meeting its slot's goal.
    fn full_week_history(reference: NaiveDate) -> Vec<CompletedFast> {
        WEEKLY_CHALLENGE
            .iter()
            .map(|slot| {
                let day = reference
                    .checked_sub_days(Days::new(slot.relative_day_index))
                    .unwrap();
                CompletedFast {
                    end_time: Some(day.and_hms_opt(20, 0, 0).unwrap().and_utc()),
                    goal_duration_hours: Some(slot.goal_hours),
                    actual_duration_minutes: Some((slot.goal_hours * 60.0) as i32),
                }
            })
            .collect()
    }

    #[test]
    fn empty_history_awards_nothing() {
        let summary = compute_weekly_challenges(&[], date("2024-03-08"));
        assert_eq!(summary.days.len(), 7);
        assert!(summary.days.iter().all(|d| !d.is_completed));
        assert_eq!(summary.total_points, 0);
        assert!(!summary.bonus_awarded);
        assert_eq!(summary.bonus_points, 0);
    }

    #[test]
    fn output_is_chronological_oldest_first() {
        let summary = compute_weekly_challenges(&[], date("2024-03-08"));
        assert_eq!(summary.days[0].relative_day_index, 6);
        assert_eq!(summary.days[0].target_date, date("2024-03-02"));
        assert_eq!(summary.days[6].relative_day_index, 0);
        assert_eq!(summary.days[6].target_date, date("2024-03-08"));
    }

    #[test]
    fn full_week_earns_all_points_plus_bonus() {
        let reference = date("2024-03-08");
        let history = full_week_history(reference);
        let summary = compute_weekly_challenges(&history, reference);

        assert!(summary.days.iter().all(|d| d.is_completed));
        assert!(summary.bonus_awarded);
        assert_eq!(summary.bonus_points, SEVEN_DAY_BONUS_POINTS);
        // 7 slots x 10 points + 50 bonus.
        assert_eq!(summary.total_points, 120);
    }

    #[test]
    fn six_of_seven_keeps_slot_points_but_no_bonus() {
        let reference = date("2024-03-08");
        let mut history = full_week_history(reference);
        history.remove(3); // drop the "Day 4" fast
        let summary = compute_weekly_challenges(&history, reference);

        let completed = summary.days.iter().filter(|d| d.is_completed).count();
        assert_eq!(completed, 6);
        assert!(!summary.bonus_awarded);
        assert_eq!(summary.total_points, 60);
    }

    #[test]
    fn goal_boundary_is_inclusive() {
        let reference = date("2024-03-08");
        // Today's slot requires 16h = 960 minutes.
        let exact = fast_ending("2024-03-08 20:00:00", 960);
        let summary = compute_weekly_challenges(&[exact], reference);
        assert!(summary.days[6].is_completed);
        assert_eq!(summary.days[6].duration_met_minutes, Some(960));

        let short = fast_ending("2024-03-08 20:00:00", 959);
        let summary = compute_weekly_challenges(&[short], reference);
        assert!(!summary.days[6].is_completed);
    }

    #[test]
    fn multiple_fasts_on_one_day_count_once() {
        let reference = date("2024-03-08");
        let history = vec![
            fast_ending("2024-03-08 10:00:00", 1000),
            fast_ending("2024-03-08 22:00:00", 1100),
        ];
        let summary = compute_weekly_challenges(&history, reference);

        assert!(summary.days[6].is_completed);
        assert_eq!(summary.days[6].points_earned, 10);
        assert_eq!(summary.total_points, 10);
        // First match wins.
        assert_eq!(summary.days[6].duration_met_minutes, Some(1000));
    }

    #[test]
    fn fast_on_wrong_day_does_not_complete_slot() {
        let reference = date("2024-03-08");
        // Long fast, but 8 days before the reference: outside every slot.
        let history = vec![fast_ending("2024-02-29 20:00:00", 2000)];
        let summary = compute_weekly_challenges(&history, reference);
        assert!(summary.days.iter().all(|d| !d.is_completed));
    }

    #[test]
    fn malformed_record_without_end_time_is_skipped() {
        let reference = date("2024-03-08");
        let history = vec![CompletedFast {
            end_time: None,
            goal_duration_hours: Some(16.0),
            actual_duration_minutes: Some(2000),
        }];
        let summary = compute_weekly_challenges(&history, reference);
        assert!(summary.days.iter().all(|d| !d.is_completed));
        assert_eq!(summary.total_points, 0);
    }

    #[test]
    fn determinism_same_input_same_output() {
        let reference = date("2024-03-08");
        let history = full_week_history(reference);
        let a = compute_weekly_challenges(&history, reference);
        let b = compute_weekly_challenges(&history, reference);
        assert_eq!(a.total_points, b.total_points);
        assert_eq!(a.bonus_awarded, b.bonus_awarded);
        for (x, y) in a.days.iter().zip(b.days.iter()) {
            assert_eq!(x.is_completed, y.is_completed);
            assert_eq!(x.points_earned, y.points_earned);
        }
    }
}

//! Fasting score: a 1-10 rating derived from 30 days of completed fasts.
//!
//! Two sub-scores, each 1-5, are summed and clamped: frequency (how many
//! fasts in the last 30 days) and consistency (what share of goal-bearing
//! fasts met their own goal). Windows are half-open on whole days since the
//! fast ended: strictly less than 7 / 30.

use serde::Serialize;

use crate::fasting::{days_since, CompletedFast};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Window and score bounds
// ---------------------------------------------------------------------------

/// Short window length in days (display + frequency label).
pub const SHORT_WINDOW_DAYS: i64 = 7;
/// Long window length in days (both sub-scores).
pub const LONG_WINDOW_DAYS: i64 = 30;

/// Lower bound of the total score.
pub const MIN_TOTAL_SCORE: i32 = 1;
/// Upper bound of the total score.
pub const MAX_TOTAL_SCORE: i32 = 10;

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// Score summary for one user at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    /// Total score, clamped to `[1, 10]`.
    pub total_score: i32,
    pub frequency_sub_score: i32,
    pub consistency_sub_score: i32,
    pub fasts_last_7_days: usize,
    pub fasts_last_30_days: usize,
    /// Share of goal-bearing fasts that met their goal, as a percentage.
    /// `None` when no fast in the window carried a goal -- distinct from 0%.
    pub consistency_percentage: Option<f64>,
    /// Display label derived from the 7-day count.
    pub frequency_label: &'static str,
}

/// Descriptive label for the 7-day fast count (display only).
pub fn frequency_label(fasts_last_7_days: usize) -> &'static str {
    match fasts_last_7_days {
        n if n >= 6 => "Excellent",
        n if n >= 4 => "High",
        n if n >= 2 => "Medium",
        _ => "Low",
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Compute the score summary from completed fasts.
///
/// `reference_time` is "now"; windows are evaluated against it so the
/// function stays deterministic under test. Records missing an end time are
/// excluded from every window.
pub fn compute_score(history: &[CompletedFast], reference_time: Timestamp) -> ScoreSummary {
    let in_window = |fast: &&CompletedFast, window_days: i64| {
        fast.end_time
            .is_some_and(|end| days_since(reference_time, end) < window_days)
    };

    let last7: Vec<&CompletedFast> = history
        .iter()
        .filter(|f| in_window(f, SHORT_WINDOW_DAYS))
        .collect();
    let last30: Vec<&CompletedFast> = history
        .iter()
        .filter(|f| in_window(f, LONG_WINDOW_DAYS))
        .collect();

    let frequency_sub_score = match last30.len() {
        n if n >= 20 => 5,
        n if n >= 15 => 4,
        n if n >= 10 => 3,
        n if n >= 5 => 2,
        _ => 1,
    };

    let goal_bearing: Vec<&&CompletedFast> =
        last30.iter().filter(|f| f.is_goal_bearing()).collect();

    let (consistency_sub_score, consistency_percentage) = if goal_bearing.is_empty() {
        // Fasts without goals get a neutral 2; an empty window floors at 1.
        let sub = if last30.is_empty() { 1 } else { 2 };
        (sub, None)
    } else {
        let met = goal_bearing.iter().filter(|f| f.met_own_goal()).count();
        let ratio = met as f64 / goal_bearing.len() as f64;
        let sub = match ratio {
            r if r >= 0.95 => 5,
            r if r >= 0.8 => 4,
            r if r >= 0.6 => 3,
            r if r >= 0.4 => 2,
            _ => 1,
        };
        (sub, Some(ratio * 100.0))
    };

    let total_score = (frequency_sub_score + consistency_sub_score)
        .clamp(MIN_TOTAL_SCORE, MAX_TOTAL_SCORE);

    ScoreSummary {
        total_score,
        frequency_sub_score,
        consistency_sub_score,
        fasts_last_7_days: last7.len(),
        fasts_last_30_days: last30.len(),
        consistency_percentage,
        frequency_label: frequency_label(last7.len()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

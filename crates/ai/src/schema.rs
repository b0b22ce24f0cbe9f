//! Input and output schemas for both AI request kinds.
//!
//! Inputs are validated before the request row is created; outputs are
//! parsed from the model response and validated before being stored. Both
//! sides are plain serde types so the JSONB columns stay self-describing.

use jejum_core::error::CoreError;
use jejum_core::profile::AiProfile;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

// ---------------------------------------------------------------------------
// Fasting time suggestion
// ---------------------------------------------------------------------------

/// Input for a fasting time suggestion: the user's full lifestyle profile.
pub type SuggestFastingTimesInput = AiProfile;

/// Model output for a fasting time suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestFastingTimesOutput {
    /// Suggested start of the fasting window, "HH:MM" local time.
    pub suggested_start_time: String,
    /// Suggested end of the fasting window, "HH:MM" local time.
    pub suggested_end_time: String,
    /// Short explanation of why this window fits the profile.
    pub reasoning: String,
}

impl SuggestFastingTimesOutput {
    /// Reject outputs where the model left a field blank.
    pub fn validate(&self) -> Result<(), AiError> {
        for (name, value) in [
            ("suggested_start_time", &self.suggested_start_time),
            ("suggested_end_time", &self.suggested_end_time),
            ("reasoning", &self.reasoning),
        ] {
            if value.trim().is_empty() {
                return Err(AiError::MalformedOutput(format!("empty field '{name}'")));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Meal plan generation
// ---------------------------------------------------------------------------

/// Bounds for the requested plan length, in days.
pub const MIN_PLAN_DAYS: u8 = 1;
pub const MAX_PLAN_DAYS: u8 = 7;
pub const DEFAULT_PLAN_DAYS: u8 = 3;

/// Daily limit on meal plan requests per user.
pub const MEAL_PLAN_DAILY_LIMIT: i64 = 3;

/// Disclaimer appended when the model omits one.
pub const DEFAULT_DISCLAIMER: &str = "This meal plan is a general suggestion and not medical \
     or nutritional advice. Consult a qualified professional before changing your diet.";

fn default_plan_days() -> u8 {
    DEFAULT_PLAN_DAYS
}

/// Input for a meal plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMealPlanInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_intolerances: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<i32>,
    #[serde(default = "default_plan_days")]
    pub number_of_days: u8,
}

impl GenerateMealPlanInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(MIN_PLAN_DAYS..=MAX_PLAN_DAYS).contains(&self.number_of_days) {
            return Err(CoreError::Validation(format!(
                "number_of_days must be between {MIN_PLAN_DAYS} and {MAX_PLAN_DAYS}"
            )));
        }
        if let Some(calories) = self.calorie_goal {
            if calories <= 0 {
                return Err(CoreError::Validation(
                    "Calorie goal must be a positive number".into(),
                ));
            }
        }
        Ok(())
    }
}

/// A single meal within a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
}

/// One day of the generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMealPlan {
    /// Display label, e.g. "Day 1".
    pub day: String,
    pub meals: Vec<Meal>,
}

/// Model output for a meal plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMealPlanOutput {
    pub meal_plan: Vec<DailyMealPlan>,
    /// Filled with [`DEFAULT_DISCLAIMER`] when the model omits it.
    #[serde(default)]
    pub disclaimer: Option<String>,
}

impl GenerateMealPlanOutput {
    /// Validate the plan shape and fill in a missing disclaimer.
    pub fn normalize(mut self, requested_days: u8) -> Result<Self, AiError> {
        if self.meal_plan.is_empty() {
            return Err(AiError::MalformedOutput("empty meal plan".into()));
        }
        if self.meal_plan.len() > usize::from(requested_days) {
            self.meal_plan.truncate(usize::from(requested_days));
        }
        if self.meal_plan.iter().any(|day| day.meals.is_empty()) {
            return Err(AiError::MalformedOutput("day without meals".into()));
        }
        if self
            .disclaimer
            .as_deref()
            .is_none_or(|d| d.trim().is_empty())
        {
            self.disclaimer = Some(DEFAULT_DISCLAIMER.to_string());
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Model output extraction
// ---------------------------------------------------------------------------

/// Parse a typed value out of a raw model response.
///
/// Models frequently wrap JSON in Markdown code fences; strip them before
/// deserializing.
pub fn parse_model_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, AiError> {
    let trimmed = strip_code_fences(raw);
    serde_json::from_str(trimmed).map_err(|e| AiError::MalformedOutput(e.to_string()))
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

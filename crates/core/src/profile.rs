//! User profile payloads consumed by the AI features.
//!
//! Both structures are stored as JSONB documents on the profile row and
//! validated here before they are persisted or handed to a model prompt.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// AI suggestion profile
// ---------------------------------------------------------------------------

/// Free-text lifestyle profile used to generate fasting window suggestions.
///
/// Every field is required: the suggestion prompt is only meaningful with a
/// complete picture of the user's routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    pub age: i32,
    pub gender: String,
    pub activity_level: String,
    pub sleep_schedule: String,
    pub daily_routine: String,
    pub fasting_experience: String,
}

/// Maximum accepted age. Purely a sanity bound on user input.
pub const MAX_AGE: i32 = 130;

pub fn validate_ai_profile(profile: &AiProfile) -> Result<(), CoreError> {
    if profile.age <= 0 || profile.age > MAX_AGE {
        return Err(CoreError::Validation(format!(
            "Age must be between 1 and {MAX_AGE}"
        )));
    }
    let required = [
        ("gender", &profile.gender),
        ("activity_level", &profile.activity_level),
        ("sleep_schedule", &profile.sleep_schedule),
        ("daily_routine", &profile.daily_routine),
        ("fasting_experience", &profile.fasting_experience),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Profile field '{name}' must not be empty"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Meal plan preferences
// ---------------------------------------------------------------------------

/// Dietary preferences used to generate meal plans. All fields are optional
/// but at least one must be present for the request to be worth making.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_intolerances: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<i32>,
}

pub fn validate_meal_preferences(prefs: &MealPreferences) -> Result<(), CoreError> {
    let has_text = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !has_text(&prefs.diet_type) && !has_text(&prefs.food_intolerances) && prefs.calorie_goal.is_none() {
        return Err(CoreError::Validation(
            "At least one meal preference must be provided".into(),
        ));
    }
    if let Some(calories) = prefs.calorie_goal {
        if calories <= 0 {
            return Err(CoreError::Validation(
                "Calorie goal must be a positive number".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_profile() -> AiProfile {
        AiProfile {
            age: 34,
            gender: "female".into(),
            activity_level: "moderate".into(),
            sleep_schedule: "23:00-07:00".into(),
            daily_routine: "office work, gym twice a week".into(),
            fasting_experience: "beginner".into(),
        }
    }

    #[test]
    fn complete_profile_passes() {
        assert!(validate_ai_profile(&complete_profile()).is_ok());
    }

    #[test]
    fn blank_field_is_rejected() {
        let mut profile = complete_profile();
        profile.sleep_schedule = "   ".into();
        assert!(validate_ai_profile(&profile).is_err());
    }

    #[test]
    fn age_bounds() {
        let mut profile = complete_profile();
        profile.age = 0;
        assert!(validate_ai_profile(&profile).is_err());
        profile.age = MAX_AGE + 1;
        assert!(validate_ai_profile(&profile).is_err());
        profile.age = MAX_AGE;
        assert!(validate_ai_profile(&profile).is_ok());
    }

    #[test]
    fn empty_preferences_are_rejected() {
        assert!(validate_meal_preferences(&MealPreferences::default()).is_err());
        let whitespace_only = MealPreferences {
            diet_type: Some("  ".into()),
            ..Default::default()
        };
        assert!(validate_meal_preferences(&whitespace_only).is_err());
    }

    #[test]
    fn single_preference_is_enough() {
        let prefs = MealPreferences {
            food_intolerances: Some("lactose".into()),
            ..Default::default()
        };
        assert!(validate_meal_preferences(&prefs).is_ok());
    }

    #[test]
    fn calorie_goal_must_be_positive() {
        let prefs = MealPreferences {
            calorie_goal: Some(0),
            ..Default::default()
        };
        assert!(validate_meal_preferences(&prefs).is_err());
        let prefs = MealPreferences {
            calorie_goal: Some(1800),
            ..Default::default()
        };
        assert!(validate_meal_preferences(&prefs).is_ok());
    }
}

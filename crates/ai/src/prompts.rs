//! Prompt rendering for both AI request kinds.
//!
//! Each kind has a fixed system prompt that pins the output contract and a
//! user prompt rendered from the validated input. The model is instructed
//! to answer with a single JSON object and nothing else.

use jejum_core::profile::AiProfile;

use crate::schema::GenerateMealPlanInput;

/// System prompt for fasting time suggestions.
pub const SUGGESTION_SYSTEM_PROMPT: &str = "\
You are a nutrition assistant helping a user pick an intermittent fasting window. \
Based on the lifestyle profile provided, suggest a start and end time for their \
daily fast. Respond with a single JSON object with exactly these keys: \
\"suggested_start_time\" (HH:MM, 24h), \"suggested_end_time\" (HH:MM, 24h), and \
\"reasoning\" (one short paragraph). Do not include any other text.";

/// System prompt for meal plan generation.
pub const MEAL_PLAN_SYSTEM_PROMPT: &str = "\
You are a nutrition assistant creating simple meal plans for people doing \
intermittent fasting. Respond with a single JSON object with exactly these keys: \
\"meal_plan\" (an array with one entry per day, each having \"day\" like \"Day 1\" \
and \"meals\", an array of objects with \"name\" and \"description\") and \
\"disclaimer\" (a short note that this is not medical advice). Do not include any \
other text.";

/// Render the user prompt for a fasting time suggestion.
pub fn render_suggestion_prompt(profile: &AiProfile) -> String {
    format!(
        "Suggest a daily fasting window for this person:\n\
         - Age: {}\n\
         - Gender: {}\n\
         - Activity level: {}\n\
         - Sleep schedule: {}\n\
         - Daily routine: {}\n\
         - Fasting experience: {}",
        profile.age,
        profile.gender,
        profile.activity_level,
        profile.sleep_schedule,
        profile.daily_routine,
        profile.fasting_experience,
    )
}

/// Render the user prompt for a meal plan request.
pub fn render_meal_plan_prompt(input: &GenerateMealPlanInput) -> String {
    let mut prompt = format!(
        "Create a meal plan covering {} day(s) with breakfast, lunch, and dinner.",
        input.number_of_days
    );
    if let Some(diet) = input.diet_type.as_deref().filter(|d| !d.trim().is_empty()) {
        prompt.push_str(&format!("\nDiet type: {diet}."));
    }
    if let Some(intolerances) = input
        .food_intolerances
        .as_deref()
        .filter(|i| !i.trim().is_empty())
    {
        prompt.push_str(&format!("\nAvoid these intolerances: {intolerances}."));
    }
    if let Some(calories) = input.calorie_goal {
        prompt.push_str(&format!("\nTarget roughly {calories} kcal per day."));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_prompt_includes_every_profile_field() {
        let profile = AiProfile {
            age: 29,
            gender: "male".into(),
            activity_level: "high".into(),
            sleep_schedule: "22:30-06:30".into(),
            daily_routine: "shift work".into(),
            fasting_experience: "intermediate".into(),
        };
        let prompt = render_suggestion_prompt(&profile);
        for needle in ["29", "male", "high", "22:30-06:30", "shift work", "intermediate"] {
            assert!(prompt.contains(needle), "missing {needle:?} in prompt");
        }
    }

    #[test]
    fn meal_plan_prompt_only_mentions_present_preferences() {
        let input = GenerateMealPlanInput {
            diet_type: Some("vegetarian".into()),
            food_intolerances: None,
            calorie_goal: Some(1800),
            number_of_days: 5,
        };
        let prompt = render_meal_plan_prompt(&input);
        assert!(prompt.contains("5 day(s)"));
        assert!(prompt.contains("vegetarian"));
        assert!(prompt.contains("1800"));
        assert!(!prompt.contains("intolerances"));
    }

    #[test]
    fn blank_preferences_are_treated_as_absent() {
        let input = GenerateMealPlanInput {
            diet_type: Some("  ".into()),
            food_intolerances: None,
            calorie_goal: None,
            number_of_days: 3,
        };
        let prompt = render_meal_plan_prompt(&input);
        assert!(!prompt.contains("Diet type"));
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal plan generation.
//!
//! Handles the workflow:
//! 1. Validate diet parameters
//! 2. Build the nutritionist prompt
//! 3. Call the completion service
//! 4. Parse and shape-check the completion as a [`MealPlan`]

use crate::error::AppError;
use crate::models::{DailyMealPlan, Meal, MealPlan};
use crate::services::completion::CompletionClient;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Diet parameters for a generated plan.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    #[validate(length(min = 1, max = 100))]
    pub diet_type: String,
    /// Target calories per day
    #[validate(range(min = 1.0, max = 20000.0))]
    pub calories: f64,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub allergies: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub cuisine: Option<String>,
    /// Include a Snacks entry per day
    pub snacks: bool,
}

/// Why a completion could not be turned into a meal plan.
#[derive(Debug, thiserror::Error)]
pub enum MealPlanError {
    #[error("completion is not JSON: {0}")]
    Unparsable(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidShape(String),
}

impl From<MealPlanError> for AppError {
    fn from(err: MealPlanError) -> Self {
        match err {
            MealPlanError::Unparsable(e) => AppError::UnparsableMealPlan(e.to_string()),
            MealPlanError::InvalidShape(msg) => AppError::InvalidMealPlanShape(msg),
        }
    }
}

/// Render calories without a trailing `.0` for whole numbers.
fn format_calories(calories: f64) -> String {
    if calories.fract() == 0.0 {
        format!("{:.0}", calories)
    } else {
        calories.to_string()
    }
}

/// Optional text counts as absent when blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build the completion prompt. Deterministic for a given request.
pub fn build_prompt(request: &MealPlanRequest) -> String {
    let allergies = non_blank(request.allergies.as_deref()).unwrap_or("none");
    let cuisine = non_blank(request.cuisine.as_deref()).unwrap_or("no preference");
    let snacks = if request.snacks { "yes" } else { "no" };

    let meals: Vec<&str> = Meal::ALL
        .into_iter()
        .filter(|meal| request.snacks || *meal != Meal::Snacks)
        .map(Meal::name)
        .collect();
    let meal_list: String = meals.iter().map(|m| format!("  - {}\n", m)).collect();

    let snacks_example = if request.snacks {
        ",\n    \"Snacks\": \"Greek yogurt - 150 calories\""
    } else {
        ""
    };

    format!(
        "You are a professional nutritionist. Create a 7-day meal plan for an individual \
following a {diet} diet aiming for {calories} calories per day.\n\
\n\
Allergies or restrictions: {allergies}.\n\
Preferred cuisine: {cuisine}.\n\
Snacks included: {snacks}.\n\
\n\
For each day (Monday through Sunday), provide:\n\
{meal_list}\
\n\
Use simple ingredients and provide brief instructions. Include approximate calorie \
counts for each meal.\n\
\n\
Structure the response as a JSON object where each day of the week is a key, and each \
meal ({keys}) is a sub-key. Example:\n\
\n\
{{\n  \"Monday\": {{\n    \"Breakfast\": \"Oatmeal with fruits - 350 calories\",\n    \
\"Lunch\": \"Grilled chicken salad - 500 calories\",\n    \
\"Dinner\": \"Steamed vegetables with quinoa - 600 calories\"{snacks_example}\n  }}\n}}\n\
\n\
Return just the json with no extra commentaries and no backticks.",
        diet = request.diet_type.trim(),
        calories = format_calories(request.calories),
        keys = meals.join(", "),
    )
}

/// Parse a completion into a meal plan.
///
/// The text must be a JSON object of day → object, where each day's keys
/// are meal names (any case, each at most once) with string values. An
/// empty object is a valid, empty plan.
pub fn parse_meal_plan(text: &str) -> Result<MealPlan, MealPlanError> {
    let value: Value = serde_json::from_str(text.trim())?;

    let days = match value {
        Value::Object(days) => days,
        other => {
            return Err(MealPlanError::InvalidShape(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut plan = MealPlan::new();
    for (day, meals) in days {
        let daily = parse_day(&day, meals)?;
        plan.insert(day, daily);
    }

    Ok(plan)
}

fn parse_day(day: &str, value: Value) -> Result<DailyMealPlan, MealPlanError> {
    let entries = match value {
        Value::Object(entries) => entries,
        other => {
            return Err(MealPlanError::InvalidShape(format!(
                "day {:?} must be an object, got {}",
                day,
                json_kind(&other)
            )))
        }
    };

    let mut daily = DailyMealPlan::default();
    for (key, description) in entries {
        let meal = Meal::from_key(&key).ok_or_else(|| {
            MealPlanError::InvalidShape(format!("day {:?} has unknown meal {:?}", day, key))
        })?;

        if daily.get(meal).is_some() {
            return Err(MealPlanError::InvalidShape(format!(
                "day {:?} lists {} more than once",
                day,
                meal.name()
            )));
        }

        match description {
            Value::String(text) => daily.set(meal, text),
            other => {
                return Err(MealPlanError::InvalidShape(format!(
                    "{} on {:?} must be a string, got {}",
                    meal.name(),
                    day,
                    json_kind(&other)
                )))
            }
        }
    }

    Ok(daily)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Generates meal plans through the completion service.
#[derive(Clone)]
pub struct MealPlanGenerator {
    completion: CompletionClient,
}

impl MealPlanGenerator {
    pub fn new(completion: CompletionClient) -> Self {
        Self { completion }
    }

    /// Validate, prompt, and parse. Nothing is persisted.
    pub async fn generate(&self, request: &MealPlanRequest) -> Result<MealPlan, AppError> {
        request
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        tracing::info!(
            diet_type = %request.diet_type,
            calories = request.calories,
            snacks = request.snacks,
            "Generating meal plan"
        );

        let prompt = build_prompt(request);
        let content = self.completion.complete(&prompt).await?;
        tracing::debug!(content = %content, "Completion content");

        let plan = parse_meal_plan(&content)?;
        tracing::info!(days = plan.len(), "Meal plan generated");

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(snacks: bool) -> MealPlanRequest {
        MealPlanRequest {
            diet_type: "vegan".to_string(),
            calories: 2000.0,
            allergies: None,
            cuisine: Some("Thai".to_string()),
            snacks,
        }
    }

    #[test]
    fn prompt_embeds_parameters() {
        let prompt = build_prompt(&request(true));

        assert!(prompt.contains("following a vegan diet aiming for 2000 calories per day"));
        assert!(prompt.contains("Allergies or restrictions: none."));
        assert!(prompt.contains("Preferred cuisine: Thai."));
        assert!(prompt.contains("Snacks included: yes."));
        assert!(prompt.contains("  - Snacks\n"));
        assert!(prompt.contains("Return just the json with no extra commentaries and no backticks."));
    }

    #[test]
    fn prompt_omits_snacks_when_not_requested() {
        let prompt = build_prompt(&request(false));

        assert!(prompt.contains("Snacks included: no."));
        assert!(!prompt.contains("Snacks\""));
        assert!(!prompt.contains("  - Snacks"));
        assert!(prompt.contains("(Breakfast, Lunch, Dinner)"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt(&request(true)), build_prompt(&request(true)));
    }

    #[test]
    fn fractional_calories_are_kept() {
        let mut req = request(false);
        req.calories = 1850.5;
        assert!(build_prompt(&req).contains("aiming for 1850.5 calories"));
    }

    #[test]
    fn blank_optional_fields_use_defaults() {
        let mut req = request(false);
        req.allergies = Some("   ".to_string());
        req.cuisine = Some(String::new());
        let prompt = build_prompt(&req);

        assert!(prompt.contains("Allergies or restrictions: none."));
        assert!(prompt.contains("Preferred cuisine: no preference."));
    }

    #[test]
    fn parses_plan_and_keeps_day_order() {
        let plan = parse_meal_plan(
            r#"{
                "Tuesday": {"Breakfast": "Smoothie - 300 calories"},
                "Monday": {"breakfast": "Oats - 350 calories", "DINNER": "Tofu - 600 calories"}
            }"#,
        )
        .unwrap();

        let days: Vec<&str> = plan.days().map(|(day, _)| day).collect();
        assert_eq!(days, ["Tuesday", "Monday"]);

        let monday = plan.get("Monday").unwrap();
        assert_eq!(monday.get(Meal::Breakfast), Some("Oats - 350 calories"));
        assert_eq!(monday.get(Meal::Dinner), Some("Tofu - 600 calories"));
        assert_eq!(monday.meal_count(), 2);
    }

    #[test]
    fn not_json_is_unparsable() {
        assert!(matches!(
            parse_meal_plan("not json"),
            Err(MealPlanError::Unparsable(_))
        ));
        // Code fences are not stripped
        assert!(matches!(
            parse_meal_plan("```json\n{\"Monday\": {}}\n```"),
            Err(MealPlanError::Unparsable(_))
        ));
    }

    #[test]
    fn non_object_top_level_is_invalid_shape() {
        for text in ["[]", "null", "42", "\"plan\""] {
            assert!(
                matches!(parse_meal_plan(text), Err(MealPlanError::InvalidShape(_))),
                "{} should be an invalid shape",
                text
            );
        }
    }

    #[test]
    fn empty_object_is_an_empty_plan() {
        let plan = parse_meal_plan("{}").unwrap();
        assert!(plan.is_empty());
        assert_eq!(serde_json::to_string(&plan).unwrap(), "{}");
    }

    #[test]
    fn meal_repeated_in_another_case_is_invalid_shape() {
        let err = parse_meal_plan(r#"{"Monday": {"Breakfast": "A", "breakfast": "B"}}"#)
            .unwrap_err();
        assert!(matches!(err, MealPlanError::InvalidShape(ref msg) if msg.contains("Breakfast")));
    }

    #[test]
    fn bad_day_contents_are_invalid_shape() {
        for text in [
            r#"{"Monday": "Oats"}"#,
            r#"{"Monday": {"Brunch": "Eggs"}}"#,
            r#"{"Monday": {"Lunch": 500}}"#,
            r#"{"Monday": {"Lunch": null}}"#,
        ] {
            assert!(
                matches!(parse_meal_plan(text), Err(MealPlanError::InvalidShape(_))),
                "{} should be an invalid shape",
                text
            );
        }
    }

    #[test]
    fn error_kinds_map_to_app_errors() {
        let err: AppError = parse_meal_plan("nope").unwrap_err().into();
        assert!(matches!(err, AppError::UnparsableMealPlan(_)));

        let err: AppError = parse_meal_plan("[]").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidMealPlanShape(_)));
    }

    #[test]
    fn request_validation() {
        assert!(request(true).validate().is_ok());

        let mut req = request(true);
        req.diet_type = String::new();
        assert!(req.validate().is_err());

        let mut req = request(true);
        req.calories = 0.0;
        assert!(req.validate().is_err());

        let mut req = request(true);
        req.allergies = Some("x".repeat(501));
        assert!(req.validate().is_err());
    }
}

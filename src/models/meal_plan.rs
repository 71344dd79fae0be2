// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal plan model returned to callers. Never persisted.

use serde::ser::{Serialize, SerializeMap, Serializer};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A meal slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner, Meal::Snacks];

    /// Canonical key used in prompts and responses.
    pub fn name(self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
            Meal::Snacks => "Snacks",
        }
    }

    /// Match a key from a completion, ignoring case and surrounding whitespace.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|meal| meal.name().eq_ignore_ascii_case(key))
    }
}

/// Meals for a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyMealPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snacks: Option<String>,
}

impl DailyMealPlan {
    pub fn get(&self, meal: Meal) -> Option<&str> {
        match meal {
            Meal::Breakfast => self.breakfast.as_deref(),
            Meal::Lunch => self.lunch.as_deref(),
            Meal::Dinner => self.dinner.as_deref(),
            Meal::Snacks => self.snacks.as_deref(),
        }
    }

    pub fn set(&mut self, meal: Meal, description: String) {
        let slot = match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
            Meal::Snacks => &mut self.snacks,
        };
        *slot = Some(description);
    }

    /// Number of meals present for the day.
    pub fn meal_count(&self) -> usize {
        Meal::ALL
            .into_iter()
            .filter(|meal| self.get(*meal).is_some())
            .count()
    }
}

/// Day name → meals, in the order the completion listed them.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPlan {
    days: Vec<(String, DailyMealPlan)>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a day, replacing an earlier entry with the same name in place.
    pub fn insert(&mut self, day: String, meals: DailyMealPlan) {
        match self.days.iter_mut().find(|(name, _)| *name == day) {
            Some((_, existing)) => *existing = meals,
            None => self.days.push((day, meals)),
        }
    }

    pub fn get(&self, day: &str) -> Option<&DailyMealPlan> {
        self.days
            .iter()
            .find(|(name, _)| name == day)
            .map(|(_, meals)| meals)
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &DailyMealPlan)> {
        self.days.iter().map(|(name, meals)| (name.as_str(), meals))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Serialize for MealPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, meals) in &self.days {
            map.serialize_entry(day, meals)?;
        }
        map.end()
    }
}

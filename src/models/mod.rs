// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod meal_plan;
pub mod profile;

pub use meal_plan::{DailyMealPlan, Meal, MealPlan};
pub use profile::Profile;

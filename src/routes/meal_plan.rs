// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal plan generation route.

use crate::error::{AppError, Result};
use crate::models::MealPlan;
use crate::services::MealPlanRequest;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/generate-mealplan", post(generate_meal_plan))
}

/// Generated plan body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealPlanResponse {
    #[cfg_attr(
        feature = "binding-generation",
        ts(type = "Record<string, DailyMealPlan>")
    )]
    pub meal_plan: MealPlan,
}

async fn generate_meal_plan(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<MealPlanRequest>, JsonRejection>,
) -> Result<Json<MealPlanResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let meal_plan = state.meal_plans.generate(&request).await?;

    Ok(Json(MealPlanResponse { meal_plan }))
}

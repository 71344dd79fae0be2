// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal Planner: profile provisioning and AI-generated weekly meal plans
//!
//! This crate provides the backend API that provisions a profile on a user's
//! first sign-in and generates 7-day meal plans through a hosted
//! chat-completions model.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{MealPlanGenerator, ProfileProvisioner};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub provisioner: ProfileProvisioner,
    pub meal_plans: MealPlanGenerator,
}

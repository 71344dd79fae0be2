// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod completion;
pub mod meal_plan;
pub mod profile;
pub mod sanitize;

pub use completion::CompletionClient;
pub use meal_plan::{MealPlanError, MealPlanGenerator, MealPlanRequest};
pub use profile::{ProfileProvisioner, ProvisionRequest, ProvisionStatus};
pub use sanitize::sanitize_identity;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal Planner API Server
//!
//! Provisions user profiles on first sign-in and generates weekly meal
//! plans through a hosted chat-completions model.

use meal_planner::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryDb, ProfileStore},
    services::{CompletionClient, MealPlanGenerator, ProfileProvisioner},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Meal Planner API");

    // Initialize profile store
    let store = match config.store_backend {
        StoreBackend::Firestore => {
            ProfileStore::Firestore(FirestoreDb::new(&config.gcp_project_id).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory profile store; profiles are lost on restart");
            ProfileStore::Memory(MemoryDb::new())
        }
    };

    // Initialize completion client
    let completion = CompletionClient::new(&config)?;
    tracing::info!(
        model = %completion.model(),
        url = %config.completion_api_url,
        "Completion client initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        provisioner: ProfileProvisioner::new(store),
        meal_plans: MealPlanGenerator::new(completion),
    });

    // Build router
    let app = meal_planner::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("meal_planner=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}

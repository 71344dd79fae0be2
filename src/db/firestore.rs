// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed profile store.
//!
//! Profiles live in the `profiles` collection with the sanitized user ID as
//! document ID. Firestore rejects an insert of an existing document ID, which
//! is the uniqueness constraint provisioning relies on.

use super::{collections, CreateOutcome, StoreError};
use crate::error::AppError;
use crate::models::Profile;
use firestore::errors::FirestoreError;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token; skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    /// Get a profile by user ID.
    pub async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    /// Insert a new profile document.
    ///
    /// Uses a create (not an upsert) so an existing document is never
    /// overwritten; Firestore's `ALREADY_EXISTS` maps to
    /// [`CreateOutcome::AlreadyExists`].
    pub async fn create_profile(&self, profile: &Profile) -> Result<CreateOutcome, StoreError> {
        let result: Result<Profile, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::PROFILES)
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await;

        match result {
            Ok(_) => Ok(CreateOutcome::Created),
            Err(FirestoreError::DataConflictError(conflict)) => {
                tracing::debug!(
                    user_id = %profile.user_id,
                    detail = ?conflict,
                    "Profile insert hit existing document"
                );
                Ok(CreateOutcome::AlreadyExists)
            }
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}

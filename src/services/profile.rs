// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile provisioning on first sign-in.
//!
//! Find-or-create keyed by the sanitized user ID. The lookup is an
//! optimization; the store's uniqueness constraint is the real guard, so a
//! lost race on create is reported the same way as a found profile.

use crate::db::{CreateOutcome, ProfileStore};
use crate::error::AppError;
use crate::middleware::session::SessionUser;
use crate::models::Profile;
use crate::services::sanitize::sanitize_identity;
use chrono::SecondsFormat;
use serde::Deserialize;

/// Provisioning request body. Both fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Where the identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    RequestBody,
    Session,
}

/// Unsanitized identity picked from the request or session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIdentity {
    pub user_id: String,
    pub email: String,
    pub source: IdentitySource,
}

/// Successful provisioning result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStatus {
    Created,
    AlreadyExists,
}

/// Pick the identity: explicit body fields first, then the session.
///
/// An empty `userId` in the body counts as absent. The pair is taken from a
/// single source; a body `userId` is never combined with a session email.
pub fn resolve_identity(
    request: &ProvisionRequest,
    session: Option<&SessionUser>,
) -> Option<RawIdentity> {
    if let Some(user_id) = request.user_id.as_deref().filter(|id| !id.is_empty()) {
        return Some(RawIdentity {
            user_id: user_id.to_string(),
            email: request.email.clone().unwrap_or_default(),
            source: IdentitySource::RequestBody,
        });
    }

    session
        .filter(|user| !user.id.is_empty())
        .map(|user| RawIdentity {
            user_id: user.id.clone(),
            email: user.primary_email().unwrap_or_default().to_string(),
            source: IdentitySource::Session,
        })
}

/// Provisions profiles against the profile store.
#[derive(Clone)]
pub struct ProfileProvisioner {
    store: ProfileStore,
}

impl ProfileProvisioner {
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    /// Ensure a profile exists for the caller.
    ///
    /// Performs at most one store write. Never touches the store when no
    /// usable identity is available.
    pub async fn provision(
        &self,
        request: &ProvisionRequest,
        session: Option<&SessionUser>,
    ) -> Result<ProvisionStatus, AppError> {
        let raw = resolve_identity(request, session).ok_or_else(|| {
            tracing::warn!("No user ID available from request body or session");
            AppError::MissingIdentity
        })?;

        let user_id = sanitize_identity(&raw.user_id);
        let email = sanitize_identity(&raw.email);

        tracing::debug!(
            source = ?raw.source,
            user_id = %user_id,
            original_user_id_len = raw.user_id.len(),
            sanitized_user_id_len = user_id.len(),
            original_email_len = raw.email.len(),
            sanitized_email_len = email.len(),
            "Resolved identity for provisioning"
        );

        if user_id.is_empty() {
            return Err(AppError::EmptyIdentityAfterSanitization);
        }

        match self.store.find_profile(&user_id).await {
            Ok(Some(_)) => {
                tracing::info!(user_id = %user_id, "Profile already exists");
                return Ok(ProvisionStatus::AlreadyExists);
            }
            Ok(None) => {}
            Err(e) => {
                // Fall through to create; the uniqueness constraint still applies.
                tracing::error!(
                    user_id = %user_id,
                    error = %e,
                    "Profile lookup failed, attempting creation"
                );
            }
        }

        let profile = Profile::provisioned(
            user_id.clone(),
            email,
            chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        match self.store.create_profile(&profile).await {
            Ok(CreateOutcome::Created) => {
                tracing::info!(user_id = %user_id, "Profile created");
                Ok(ProvisionStatus::Created)
            }
            Ok(CreateOutcome::AlreadyExists) => {
                tracing::info!(
                    user_id = %user_id,
                    "Profile created concurrently by another request"
                );
                Ok(ProvisionStatus::AlreadyExists)
            }
            Err(e) => Err(AppError::StoreWriteFailure(e.to_string())),
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile model for storage.

use serde::{Deserialize, Serialize};

/// Email stored when the identity carries no usable address.
pub const PLACEHOLDER_EMAIL: &str = "no-email@example.com";

/// User profile stored in the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Identity-provider user ID (also used as document ID)
    pub user_id: String,
    /// Email address, or [`PLACEHOLDER_EMAIL`]
    pub email: String,
    /// Only changed by billing, never by provisioning
    pub subscription_active: bool,
    /// When the profile was provisioned (RFC3339)
    pub created_at: String,
}

impl Profile {
    /// Build a freshly provisioned profile from already-sanitized inputs.
    pub fn provisioned(user_id: String, email: String, created_at: String) -> Self {
        let email = if email.is_empty() {
            PLACEHOLDER_EMAIL.to_string()
        } else {
            email
        };

        Self {
            user_id,
            email,
            subscription_active: false,
            created_at,
        }
    }
}

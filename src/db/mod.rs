// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile store: a keyed store with a uniqueness constraint on the user ID.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::{LookupMode, MemoryDb};

use crate::models::Profile;

/// Collection names as constants.
pub mod collections {
    /// Profiles (keyed by sanitized user ID)
    pub const PROFILES: &str = "profiles";
}

/// Result of a create against the uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// A profile with the same key already exists; nothing was written.
    AlreadyExists,
}

/// Store failures other than a uniqueness violation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Profile store not connected (offline mode)")]
    Offline,

    #[error("{0}")]
    Backend(String),
}

/// Profile store handle shared by request handlers.
#[derive(Clone)]
pub enum ProfileStore {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
    /// Every operation fails. Used to exercise failure paths.
    Offline,
}

impl ProfileStore {
    /// Look up a profile by user ID.
    pub async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        match self {
            ProfileStore::Firestore(db) => db.find_profile(user_id).await,
            ProfileStore::Memory(db) => db.lookup(user_id),
            ProfileStore::Offline => Err(StoreError::Offline),
        }
    }

    /// Insert a profile unless one with the same user ID exists.
    pub async fn create_profile(&self, profile: &Profile) -> Result<CreateOutcome, StoreError> {
        match self {
            ProfileStore::Firestore(db) => db.create_profile(profile).await,
            ProfileStore::Memory(db) => Ok(db.create_profile(profile)),
            ProfileStore::Offline => Err(StoreError::Offline),
        }
    }
}

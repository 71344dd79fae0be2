// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process profile store for local development and tests.

use super::{CreateOutcome, StoreError};
use crate::models::Profile;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// How lookups through [`MemoryDb::lookup`] behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupMode {
    #[default]
    Normal,
    /// Every lookup fails with a backend error.
    Failing,
    /// Every lookup misses, as if it ran before a concurrent create landed.
    Stale,
}

/// Profiles keyed by user ID. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryDb {
    profiles: Arc<DashMap<String, Profile>>,
    lookup_mode: LookupMode,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share this map but change how store lookups behave. Writes are unaffected.
    pub fn with_lookup_mode(&self, lookup_mode: LookupMode) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
            lookup_mode,
        }
    }

    /// Store-facing lookup, subject to the lookup mode.
    pub fn lookup(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        match self.lookup_mode {
            LookupMode::Normal => Ok(self.find_profile(user_id)),
            LookupMode::Failing => Err(StoreError::Backend("lookup unavailable".to_string())),
            LookupMode::Stale => Ok(None),
        }
    }

    pub fn find_profile(&self, user_id: &str) -> Option<Profile> {
        self.profiles.get(user_id).map(|entry| entry.value().clone())
    }

    /// Insert-if-absent under the shard lock, so concurrent creates for one key
    /// produce exactly one `Created`.
    pub fn create_profile(&self, profile: &Profile) -> CreateOutcome {
        match self.profiles.entry(profile.user_id.clone()) {
            Entry::Occupied(_) => CreateOutcome::AlreadyExists,
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                CreateOutcome::Created
            }
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

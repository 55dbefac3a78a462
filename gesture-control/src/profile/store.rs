//! Profile storage

use super::UserProfile;
use crate::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Lookup and persistence of user profiles
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by id. A missing profile is `Ok(None)`.
    fn load(&self, id: &str) -> Result<Option<UserProfile>>;

    /// Insert or replace a profile
    fn save(&self, profile: UserProfile) -> Result<()>;

    /// Remove a profile, returning whether it existed
    fn delete(&self, id: &str) -> Result<bool>;

    /// All stored profiles, ordered by creation time
    fn list(&self) -> Result<Vec<UserProfile>>;
}

/// Profile store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded with the given profiles
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let store = Self::new();
        {
            let mut map = store.profiles.write();
            for profile in profiles {
                map.insert(profile.id.clone(), profile);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn load(&self, id: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().get(id).cloned())
    }

    fn save(&self, profile: UserProfile) -> Result<()> {
        profile.validate()?;
        debug!(profile_id = %profile.id, "Saving profile");
        self.profiles.write().insert(profile.id.clone(), profile);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.profiles.write().remove(id).is_some())
    }

    fn list(&self) -> Result<Vec<UserProfile>> {
        let mut profiles: Vec<_> = self.profiles.read().values().cloned().collect();
        profiles.sort_by_key(|p| p.created_at);
        Ok(profiles)
    }
}

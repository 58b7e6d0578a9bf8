use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use sb_common::Candidate;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile not found for user {0}")]
    ProfileNotFound(i64),
}

/// In-memory profile registry standing in for the external storage
/// collaborator. Reads take a snapshot; matching never holds the lock
/// across an await point.
#[derive(Debug, Default)]
pub struct ProfileStore {
    inner: RwLock<HashMap<i64, Candidate>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, candidate: Candidate) {
        let mut map = self.inner.write().expect("profile store lock poisoned");
        map.insert(candidate.user.id, candidate);
    }

    pub fn get(&self, user_id: i64) -> Result<Candidate, StoreError> {
        let map = self.inner.read().expect("profile store lock poisoned");
        map.get(&user_id)
            .cloned()
            .ok_or(StoreError::ProfileNotFound(user_id))
    }

    /// All profiles except `exclude`, ordered by user id for deterministic
    /// ranking, capped at `cap`.
    pub fn candidates(&self, exclude: i64, cap: usize) -> Vec<Candidate> {
        let map = self.inner.read().expect("profile store lock poisoned");
        let mut out: Vec<Candidate> = map
            .values()
            .filter(|c| c.user.id != exclude)
            .cloned()
            .collect();
        out.sort_by_key(|c| c.user.id);
        out.truncate(cap);
        out
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("profile store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_common::{SkillProfile, UserSummary};

    fn candidate(id: i64) -> Candidate {
        Candidate {
            user: UserSummary {
                id,
                name: format!("user-{id}"),
                ..UserSummary::default()
            },
            profile: SkillProfile {
                user_id: id,
                ..SkillProfile::default()
            },
        }
    }

    #[test]
    fn upsert_replaces_existing_profile() {
        let store = ProfileStore::new();
        store.upsert(candidate(1));

        let mut updated = candidate(1);
        updated.user.name = "renamed".into();
        store.upsert(updated);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().user.name, "renamed");
    }

    #[test]
    fn missing_profile_is_an_error() {
        let store = ProfileStore::new();
        assert!(matches!(store.get(42), Err(StoreError::ProfileNotFound(42))));
    }

    #[test]
    fn candidates_exclude_requester_and_respect_cap() {
        let store = ProfileStore::new();
        for id in 1..=6 {
            store.upsert(candidate(id));
        }

        let pool = store.candidates(3, 4);
        assert_eq!(pool.len(), 4);
        assert!(pool.iter().all(|c| c.user.id != 3));
        assert!(pool.windows(2).all(|w| w[0].user.id < w[1].user.id));
    }
}

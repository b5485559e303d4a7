//! Per-session conversation state.
//!
//! Remembers the last resolved scheme of each session so follow-up
//! questions can omit the scheme name. Entries expire after an inactivity
//! window; expired entries are dropped lazily on read, plus `prune` for a
//! periodic sweep.
//!
//! Updates to one session are serialized by the map's per-key locking;
//! different sessions never contend with each other.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct SessionEntry {
    last_scheme_id: String,
    updated_at: DateTime<Utc>,
}

/// Concurrent session -> last-scheme map with expiry.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store with the given inactivity window.
    pub fn new(ttl_minutes: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::minutes(ttl_minutes as i64),
        }
    }

    /// Get the session's last scheme id, unless the session expired.
    pub fn get(&self, session_id: &str) -> Option<String> {
        let now = Utc::now();

        let expired = match self.sessions.get(session_id) {
            Some(entry) => {
                if now.signed_duration_since(entry.updated_at) <= self.ttl {
                    return Some(entry.last_scheme_id.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            self.sessions.remove(session_id);
        }

        None
    }

    /// Record the scheme resolved for this session (new or reused).
    pub fn update(&self, session_id: &str, scheme_id: &str) {
        self.update_at(session_id, scheme_id, Utc::now());
    }

    fn update_at(&self, session_id: &str, scheme_id: &str, at: DateTime<Utc>) {
        self.sessions.insert(
            session_id.to_string(),
            SessionEntry {
                last_scheme_id: scheme_id.to_string(),
                updated_at: at,
            },
        );
    }

    /// Drop all expired sessions. Returns the number removed.
    pub fn prune(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now.signed_duration_since(entry.updated_at) <= self.ttl);
        before - self.sessions.len()
    }

    /// Number of tracked sessions (including not-yet-pruned expired ones).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_get() {
        let store = SessionStore::new(30);
        assert!(store.get("s1").is_none());

        store.update("s1", "axis-floater-fund");
        assert_eq!(store.get("s1").as_deref(), Some("axis-floater-fund"));

        // Overwritten on each resolved query
        store.update("s1", "hdfc-large-cap-fund");
        assert_eq!(store.get("s1").as_deref(), Some("hdfc-large-cap-fund"));
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new(30);
        store.update("s1", "fund-a");
        store.update("s2", "fund-b");

        assert_eq!(store.get("s1").as_deref(), Some("fund-a"));
        assert_eq!(store.get("s2").as_deref(), Some("fund-b"));
    }

    #[test]
    fn test_expired_entry_is_dropped_on_read() {
        let store = SessionStore::new(30);
        store.update_at(
            "s1",
            "fund-a",
            Utc::now() - Duration::minutes(31),
        );

        assert!(store.get("s1").is_none());
        // Lazy removal happened
        assert!(store.is_empty());
    }

    #[test]
    fn test_prune() {
        let store = SessionStore::new(30);
        store.update_at("old", "fund-a", Utc::now() - Duration::minutes(45));
        store.update("fresh", "fund-b");

        assert_eq!(store.len(), 2);
        assert_eq!(store.prune(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("fresh").as_deref(), Some("fund-b"));
    }
}

//! Session flag store — a string key/value store holding the two flags that
//! gate access: `user` (signed in) and `profileCompleted`.

use std::collections::HashMap;
use std::sync::RwLock;

pub const USER_FLAG: &str = "user";
pub const PROFILE_COMPLETED_FLAG: &str = "profileCompleted";

pub trait FlagStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local flag store.
#[derive(Debug, Default)]
pub struct InMemoryFlagStore {
    flags: RwLock<HashMap<String, String>>,
}

impl InMemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// A poisoned lock only means a writer panicked mid-insert; the map is still usable.
impl FlagStore for InMemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        let flags = self.flags.read().unwrap_or_else(|e| e.into_inner());
        flags.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut flags = self.flags.write().unwrap_or_else(|e| e.into_inner());
        flags.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut flags = self.flags.write().unwrap_or_else(|e| e.into_inner());
        flags.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let store = InMemoryFlagStore::new();
        assert_eq!(store.get(USER_FLAG), None);
        store.set(USER_FLAG, "recruiter@example.com");
        assert_eq!(store.get(USER_FLAG).as_deref(), Some("recruiter@example.com"));
        store.set(USER_FLAG, "other@example.com");
        assert_eq!(store.get(USER_FLAG).as_deref(), Some("other@example.com"));
        store.remove(USER_FLAG);
        assert_eq!(store.get(USER_FLAG), None);
    }
}

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use dashmap::DashMap;

/// In-process store with the same hash/list semantics the repositories use on
/// Redis. Used for local development (`STORE_BACKEND=memory`) and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    hashes: DashMap<String, BTreeMap<String, String>>,
    lists: DashMap<String, Vec<String>>,
}

impl MemoryStore {
    pub fn hash_get(&self, key: &str, field: &str) -> Option<String> {
        self.hashes
            .get(key)
            .and_then(|hash| hash.get(field).cloned())
    }

    pub fn hash_set(&self, key: &str, field: &str, value: &str) {
        self.hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    pub fn hash_set_nx(&self, key: &str, field: &str, value: &str) -> bool {
        let mut hash = self.hashes.entry(key.to_string()).or_default();
        match hash.entry(field.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn hash_del(&self, key: &str, field: &str) -> bool {
        match self.hashes.get_mut(key) {
            Some(mut hash) => hash.remove(field).is_some(),
            None => false,
        }
    }

    pub fn hash_values(&self, key: &str) -> Vec<String> {
        self.hashes
            .get(key)
            .map(|hash| hash.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn list_push(&self, key: &str, value: &str) {
        self.lists
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    pub fn list_all(&self, key: &str) -> Vec<String> {
        self.lists
            .get(key)
            .map(|list| list.to_vec())
            .unwrap_or_default()
    }
}

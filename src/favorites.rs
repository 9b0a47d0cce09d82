use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const FAVORITES_KEY: &str = "@lovedPokemonList";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoritesStatus {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}

/// Favorited identifiers, stored lowercase.
///
/// Loaded once per process. Until the load completes every membership query
/// answers `false` and toggles are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesStore {
    status: FavoritesStatus,
    names: BTreeSet<String>,
}

impl FavoritesStore {
    pub fn status(&self) -> FavoritesStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == FavoritesStatus::Ready
    }

    /// Returns `false` when a load was already started.
    pub fn begin_load(&mut self) -> bool {
        if self.status != FavoritesStatus::Uninitialized {
            return false;
        }
        self.status = FavoritesStatus::Loading;
        true
    }

    pub fn finish_load(&mut self, names: impl IntoIterator<Item = String>) {
        self.names = names
            .into_iter()
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        self.status = FavoritesStatus::Ready;
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.is_ready() && self.names.contains(&name.to_lowercase())
    }

    /// Flips membership and returns the new state, or `None` when ignored.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        if !self.is_ready() {
            return None;
        }
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        if self.names.remove(&name) {
            Some(false)
        } else {
            self.names.insert(name);
            Some(true)
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

pub fn encode(names: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(names)
}

/// Absent or undecodable payloads both load as an empty set.
pub fn decode(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(names) => names,
        Err(error) => {
            tracing::warn!(%error, "favorites payload unreadable; starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ready(names: &[&str]) -> FavoritesStore {
        let mut store = FavoritesStore::default();
        assert!(store.begin_load());
        store.finish_load(names.iter().map(|name| name.to_string()));
        store
    }

    #[test]
    fn toggles_before_ready_are_ignored() {
        let mut store = FavoritesStore::default();
        assert_eq!(store.toggle("pikachu"), None);
        store.begin_load();
        assert!(!store.begin_load());
        assert_eq!(store.toggle("pikachu"), None);
        assert!(!store.is_favorite("pikachu"));

        store.finish_load(Vec::new());
        assert_eq!(store.toggle("pikachu"), Some(true));
    }

    #[test]
    fn toggle_parity() {
        let mut store = ready(&["eevee"]);
        for _ in 0..4 {
            store.toggle("Pikachu");
        }
        assert!(!store.is_favorite("pikachu"));
        for _ in 0..3 {
            store.toggle("pikachu");
        }
        assert!(store.is_favorite("PIKACHU"));
        assert!(store.is_favorite("eevee"));
    }

    #[test]
    fn empty_identifier_is_a_noop() {
        let mut store = ready(&[]);
        assert_eq!(store.toggle(""), None);
        assert_eq!(store.toggle("   "), None);
        assert!(store.is_empty());
    }

    #[test]
    fn members_iterate_sorted() {
        let store = ready(&["pikachu", "Bulbasaur", "eevee"]);
        let members: Vec<&str> = store.members().collect();
        assert_eq!(members, vec!["bulbasaur", "eevee", "pikachu"]);
    }

    #[test]
    fn persisted_payload_reloads_to_the_same_set() {
        let mut store = ready(&[]);
        store.toggle("mew");
        store.toggle("ditto");
        store.toggle("mew");
        store.toggle("snorlax");
        let payload = encode(&store.snapshot()).unwrap();

        let mut reloaded = FavoritesStore::default();
        reloaded.begin_load();
        reloaded.finish_load(decode(Some(&payload)));
        assert_eq!(reloaded.snapshot(), store.snapshot());
        assert_eq!(payload, "[\"ditto\",\"snorlax\"]");
    }

    #[test]
    fn bad_payloads_decode_empty() {
        assert!(decode(None).is_empty());
        assert!(decode(Some("{\"oops\":true}")).is_empty());
        assert!(decode(Some("not json")).is_empty());
    }
}

use crate::models::RecentManuscript;
use crate::util::now_ms;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub(crate) const SIDEBAR_COLLAPSED_KEY: &str = "draftroom_sidebar_collapsed";
pub(crate) const CURRENT_MANUSCRIPT_KEY: &str = "draftroom_current_manuscript_id";
pub(crate) const RECENT_MANUSCRIPTS_KEY: &str = "draftroom_recent_manuscripts";

const EXPANDED_KEY_PREFIX: &str = "draftroom_expanded_folders";

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn upsert_lru_by_key<T: Clone>(
    mut items: Vec<T>,
    item: T,
    same_key: impl Fn(&T, &T) -> bool,
    max: usize,
) -> Vec<T> {
    items.retain(|x| !same_key(x, &item));
    items.insert(0, item);
    if items.len() > max {
        items.truncate(max);
    }
    items
}

pub(crate) fn load_recent_manuscripts() -> Vec<RecentManuscript> {
    load_json_from_storage::<Vec<RecentManuscript>>(RECENT_MANUSCRIPTS_KEY).unwrap_or_default()
}

pub(crate) fn write_recent_manuscript(id: &str, title: &str) {
    if id.trim().is_empty() {
        return;
    }

    let item = RecentManuscript {
        id: id.to_string(),
        title: title.to_string(),
        last_opened_ms: now_ms(),
    };

    let next = upsert_lru_by_key(load_recent_manuscripts(), item, |a, b| a.id == b.id, 10);
    save_json_to_storage(RECENT_MANUSCRIPTS_KEY, &next);
}

/// Expanded folder ids are remembered per manuscript so reopening a project
/// restores the binder the way the writer left it.
fn expanded_key(manuscript_id: &str) -> String {
    format!("{EXPANDED_KEY_PREFIX}::{manuscript_id}")
}

pub(crate) fn load_expanded_folders(manuscript_id: &str) -> HashSet<String> {
    load_json_from_storage::<Vec<String>>(&expanded_key(manuscript_id))
        .unwrap_or_default()
        .into_iter()
        .collect()
}

pub(crate) fn save_expanded_folders(manuscript_id: &str, expanded: &HashSet<String>) {
    save_json_to_storage(&expanded_key(manuscript_id), &expanded_sorted(expanded));
}

/// Stable storage form for an expanded-folder set.
pub(crate) fn expanded_sorted(expanded: &HashSet<String>) -> Vec<String> {
    let mut ids: Vec<String> = expanded.iter().cloned().collect();
    ids.sort();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_lru_moves_existing_to_front() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let next = upsert_lru_by_key(items, "b".to_string(), |a, b| a == b, 10);
        assert_eq!(next, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_upsert_lru_inserts_new_at_front() {
        let items = vec!["a".to_string()];
        let next = upsert_lru_by_key(items, "z".to_string(), |a, b| a == b, 10);
        assert_eq!(next, vec!["z", "a"]);
    }

    #[test]
    fn test_upsert_lru_truncates_to_max() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let next = upsert_lru_by_key(items, "z".to_string(), |a, b| a == b, 3);
        assert_eq!(next, vec!["z", "a", "b"]);
    }

    #[test]
    fn test_expanded_sorted_is_deterministic() {
        let mut set = HashSet::new();
        set.insert("part-2".to_string());
        set.insert("act-1".to_string());
        set.insert("part-1".to_string());
        assert_eq!(expanded_sorted(&set), vec!["act-1", "part-1", "part-2"]);
    }

    #[test]
    fn test_expanded_key_is_scoped_per_manuscript() {
        assert_ne!(expanded_key("m1"), expanded_key("m2"));
        assert!(expanded_key("m1").starts_with(EXPANDED_KEY_PREFIX));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_expanded_folders_roundtrip() {
        let mut set = HashSet::new();
        set.insert("act-1".to_string());
        set.insert("part-1".to_string());
        save_expanded_folders("ms-test", &set);
        let loaded = load_expanded_folders("ms-test");
        assert_eq!(loaded, set);
    }

    #[wasm_bindgen_test]
    fn test_recent_manuscripts_roundtrip_and_dedupe() {
        write_recent_manuscript("m1", "Draft One");
        write_recent_manuscript("m2", "Draft Two");
        write_recent_manuscript("m1", "Draft One");
        let recents = load_recent_manuscripts();
        assert_eq!(recents[0].id, "m1");
        assert_eq!(recents.iter().filter(|r| r.id == "m1").count(), 1);
    }

    #[wasm_bindgen_test]
    fn test_missing_key_loads_none() {
        let loaded: Option<Vec<String>> = load_json_from_storage("draftroom_never_written");
        assert!(loaded.is_none());
    }
}

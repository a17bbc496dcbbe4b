use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

/// Tab opened right after login when the URL names none.
pub const DEFAULT_TAB: &str = "a001_proposal";

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the active tab from `?active=` and keep the URL in sync.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let key = active_from_search(&search).unwrap_or_else(|| DEFAULT_TAB.to_string());
        self.open_tab(&key, tab_label_for_key(&key).unwrap_or(&key));

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let new_url = search_for_active(&active_key);
            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        leptos::logging::log!("close_tab: key='{}'", key);
        let was_active = self
            .active
            .with_untracked(|active| active.as_deref() == Some(key));
        let next = self
            .opened
            .with_untracked(|tabs| neighbour_after_close(tabs, key));

        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if was_active {
            self.active.set(next);
        }
    }

    /// Close every tab, e.g. on logout.
    pub fn reset(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

fn active_from_search(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .get("active")
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

fn search_for_active(key: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
    format!("?{}", query)
}

/// Tab to show after `key` closes: the one to its right, else to its left.
fn neighbour_after_close(tabs: &[Tab], key: &str) -> Option<String> {
    let pos = tabs.iter().position(|t| t.key == key)?;
    tabs.get(pos + 1)
        .or_else(|| pos.checked_sub(1).and_then(|p| tabs.get(p)))
        .map(|t| t.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_active_from_search() {
        assert_eq!(
            active_from_search("?active=a002_oncall"),
            Some("a002_oncall".to_string())
        );
        assert_eq!(active_from_search(""), None);
        assert_eq!(active_from_search("?active="), None);
        assert_eq!(active_from_search("?other=1"), None);
    }

    #[test]
    fn test_search_round_trip() {
        let url = search_for_active("u501_bulk_upload");
        assert_eq!(url, "?active=u501_bulk_upload");
        assert_eq!(active_from_search(&url).as_deref(), Some("u501_bulk_upload"));
    }

    #[test]
    fn test_neighbour_after_close() {
        let open = tabs(&["a", "b", "c"]);
        assert_eq!(neighbour_after_close(&open, "b").as_deref(), Some("c"));
        assert_eq!(neighbour_after_close(&open, "c").as_deref(), Some("b"));
        assert_eq!(neighbour_after_close(&tabs(&["a"]), "a"), None);
        assert_eq!(neighbour_after_close(&open, "x"), None);
    }
}

use crate::api::ApiClient;
use crate::models::{BinderNode, CodexEntity, Manuscript};
use crate::storage::{CURRENT_MANUSCRIPT_KEY, SIDEBAR_COLLAPSED_KEY};
use leptos::prelude::*;
use std::collections::HashSet;

pub(crate) mod binder_ops;
pub(crate) mod notices;

pub(crate) use notices::NoticeCenter;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Loaded from backend.
    pub manuscripts: RwSignal<Vec<Manuscript>>,
    pub manuscripts_loading: RwSignal<bool>,
    pub manuscripts_error: RwSignal<Option<String>>,
    /// An empty list from the server is still "loaded"; without this flag,
    /// load-when-empty effects can spin forever.
    pub manuscripts_loaded_once: RwSignal<bool>,

    /// Binder forest for the currently open manuscript. Replaced wholesale
    /// on every load; never merged.
    pub tree: RwSignal<Vec<BinderNode>>,
    pub tree_loading: RwSignal<bool>,
    pub tree_error: RwSignal<Option<String>>,

    /// Tree load guards (avoid duplicate loads + ignore stale responses).
    pub tree_request_id: RwSignal<u64>,
    pub tree_last_loaded_manuscript_id: RwSignal<Option<String>>,

    /// Codex entities for the open manuscript (read-only here).
    pub codex: RwSignal<Vec<CodexEntity>>,

    pub current_manuscript_id: RwSignal<Option<String>>,

    /// Which document the pane shows. UI-only; cleared when its node (or an
    /// enclosing folder) is deleted.
    pub open_document_id: RwSignal<Option<String>>,

    /// Expanded folder ids for the open manuscript (UI state, persisted).
    pub expanded: RwSignal<HashSet<String>>,

    /// Global UI state.
    pub sidebar_collapsed: RwSignal<bool>,

    /// Binder title filter; non-empty switches the panel to a flat list.
    pub binder_filter: RwSignal<String>,

    pub notices: NoticeCenter,
}

impl AppState {
    pub fn new() -> Self {
        let (sidebar_collapsed, current_manuscript_id) = if let Some(storage) =
            web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        {
            let sidebar_collapsed = storage
                .get_item(SIDEBAR_COLLAPSED_KEY)
                .ok()
                .flatten()
                .map(|v| v == "1" || v == "true")
                .unwrap_or(false);

            let current_manuscript_id = storage.get_item(CURRENT_MANUSCRIPT_KEY).ok().flatten();

            (sidebar_collapsed, current_manuscript_id)
        } else {
            (false, None)
        };

        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            manuscripts: RwSignal::new(vec![]),
            manuscripts_loading: RwSignal::new(false),
            manuscripts_error: RwSignal::new(None),
            manuscripts_loaded_once: RwSignal::new(false),
            tree: RwSignal::new(vec![]),
            tree_loading: RwSignal::new(false),
            tree_error: RwSignal::new(None),
            tree_request_id: RwSignal::new(0),
            tree_last_loaded_manuscript_id: RwSignal::new(None),
            codex: RwSignal::new(vec![]),
            current_manuscript_id: RwSignal::new(current_manuscript_id),
            open_document_id: RwSignal::new(None),
            expanded: RwSignal::new(HashSet::new()),
            sidebar_collapsed: RwSignal::new(sidebar_collapsed),
            binder_filter: RwSignal::new(String::new()),
            notices: NoticeCenter::new(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

use crate::api::{ApiResult, CreateNodeRequest, UpdateNodeRequest};
use crate::models::{BinderNode, DocumentType, NodeDetail};
use crate::state::AppContext;
use crate::storage::save_expanded_folders;
use crate::tree::reorder::{apply_move, plan_move, MovePlan};
use crate::tree::{find_node, find_parent_id, remove_node, set_node_title, siblings_of, subtree_contains};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Every binder mutation follows the same transaction shape: apply the pure
/// transform to the tree signal, persist, then reconcile against the
/// backend. A failed persist surfaces one notice and swaps the authoritative
/// tree back in; a completion that lands after the writer switched
/// manuscripts is dropped on the floor.
#[derive(Clone)]
pub(crate) struct BinderOps {
    app: AppContext,
}

/// Dialog payload for "new chapter" / "new folder".
#[derive(Clone, Debug)]
pub(crate) struct NewNode {
    pub title: String,
    pub is_folder: bool,
    /// `None` appends to the root sequence.
    pub parent_id: Option<String>,
}

/// What a settled move does to shared state.
pub(crate) struct ReconcileOutcome {
    pub tree: Option<Vec<BinderNode>>,
    pub error: Option<String>,
}

impl BinderOps {
    pub fn new(app: AppContext) -> Self {
        Self { app }
    }

    /// Fetches the binder for `manuscript_id` unless it is already loaded.
    /// Guarded by a request id so a stale response never clobbers a newer
    /// one.
    pub fn load_tree(&self, manuscript_id: String, force: bool) {
        let st = &self.app.0;
        if !force
            && st.tree_last_loaded_manuscript_id.get_untracked().as_deref()
                == Some(manuscript_id.as_str())
        {
            return;
        }

        let req_id = st.tree_request_id.get_untracked() + 1;
        st.tree_request_id.set(req_id);
        st.tree_loading.set(true);
        st.tree_error.set(None);

        let app = self.app.clone();
        spawn_local(async move {
            let api = app.0.api_client.get_untracked();
            let result = api.get_manuscript_tree(&manuscript_id).await;
            if app.0.tree_request_id.get_untracked() != req_id {
                return;
            }
            match result {
                Ok(tree) => {
                    app.0.tree.set(tree);
                    app.0.tree_last_loaded_manuscript_id.set(Some(manuscript_id));
                }
                Err(e) => {
                    app.0.tree_error.set(Some(e.to_string()));
                }
            }
            app.0.tree_loading.set(false);
        });
    }

    /// Drop gesture: `active_id` was released over `over_id`. Plans the
    /// destination, applies it optimistically, persists the new parent and
    /// index, then reloads the authoritative tree whatever the outcome.
    pub fn commit_move(&self, active_id: String, over_id: String) {
        let st = &self.app.0;
        let Some(manuscript_id) = st.current_manuscript_id.get_untracked() else {
            return;
        };
        let tree_now = st.tree.get_untracked();
        let Some(plan) = plan_move(&tree_now, &active_id, &over_id) else {
            // Self drops, vanished ids, cycles and stationary drops all land
            // here: nothing moves, nothing is persisted.
            return;
        };
        let Some(optimistic) = apply_move(&tree_now, &active_id, &plan) else {
            return;
        };
        st.tree.set(optimistic);
        if let Some(pid) = &plan.parent_id {
            // Keep the node visible after it lands inside a folder.
            self.set_folder_expanded(pid, true);
        }

        let req = move_request(&plan);
        let me = self.clone();
        spawn_local(async move {
            let api = me.app.0.api_client.get_untracked();
            let persist = api.update_node(&active_id, &req).await.map(|_| ());
            let reload = api.get_manuscript_tree(&manuscript_id).await;
            if !me.still_current(&manuscript_id) {
                return;
            }
            let outcome = reconcile_move("Move failed", persist, reload);
            if let Some(tree) = outcome.tree {
                me.app.0.tree.set(tree);
            }
            if let Some(msg) = outcome.error {
                me.app.0.notices.error(msg);
            }
        });
    }

    /// Optimistic title change; only a failed persist reloads (the echo of a
    /// successful rename is identical to what is already shown).
    pub fn rename_node(&self, node_id: String, new_title: String) {
        let st = &self.app.0;
        let title = new_title.trim().to_string();
        if title.is_empty() {
            return;
        }
        let Some(manuscript_id) = st.current_manuscript_id.get_untracked() else {
            return;
        };
        let tree_now = st.tree.get_untracked();
        let Some(optimistic) = set_node_title(&tree_now, &node_id, &title) else {
            return;
        };
        st.tree.set(optimistic);

        let req = UpdateNodeRequest {
            title: Some(title),
            ..Default::default()
        };
        let me = self.clone();
        spawn_local(async move {
            let api = me.app.0.api_client.get_untracked();
            if let Err(e) = api.update_node(&node_id, &req).await {
                me.recover(&manuscript_id, format!("Rename failed: {e}")).await;
            }
        });
    }

    /// Caller has already confirmed. Removes the subtree locally, clears the
    /// document pane if it was showing anything inside it, then persists;
    /// the backend cascades to descendants.
    pub fn delete_node(&self, node_id: String) {
        let st = &self.app.0;
        let Some(manuscript_id) = st.current_manuscript_id.get_untracked() else {
            return;
        };
        let tree_now = st.tree.get_untracked();
        let Some(removed) = find_node(&tree_now, &node_id).cloned() else {
            return;
        };

        st.tree.set(remove_node(&tree_now, &node_id));
        let open = st.open_document_id.get_untracked();
        if !selection_survives_delete(open.as_deref(), &removed) {
            st.open_document_id.set(None);
        }

        let me = self.clone();
        spawn_local(async move {
            let api = me.app.0.api_client.get_untracked();
            if let Err(e) = api.delete_node(&node_id).await {
                me.recover(&manuscript_id, format!("Delete failed: {e}")).await;
            }
        });
    }

    /// Copies a document next to the original. The tree listing has no
    /// content, so the full node is fetched first; the copy is created with
    /// the same content and a "(Copy)" title at the slot right after the
    /// original, and the reload brings it in.
    pub fn duplicate_node(&self, node_id: String) {
        let st = &self.app.0;
        let Some(manuscript_id) = st.current_manuscript_id.get_untracked() else {
            return;
        };
        let tree_now = st.tree.get_untracked();
        let Some(original) = find_node(&tree_now, &node_id).cloned() else {
            return;
        };
        let Some(slot) = plan_duplicate(&tree_now, &node_id) else {
            return;
        };

        let me = self.clone();
        spawn_local(async move {
            let api = me.app.0.api_client.get_untracked();
            let detail = match api.get_node_detail(&node_id).await {
                Ok(d) => d,
                Err(e) => {
                    // Nothing was touched locally yet; no reload needed.
                    me.app.0.notices.error(format!("Duplicate failed: {e}"));
                    return;
                }
            };
            let req = duplicate_request(&manuscript_id, &original, &detail, &slot);
            match api.create_node(&req).await {
                Ok(_) => me.reload_after_success(&manuscript_id).await,
                Err(e) => me.recover(&manuscript_id, format!("Duplicate failed: {e}")).await,
            }
        });
    }

    /// Creates a chapter or folder at the end of the chosen parent (root when
    /// `parent_id` is empty), reloads, and opens the fresh document.
    pub fn create_node(&self, new_node: NewNode) {
        let st = &self.app.0;
        let title = new_node.title.trim().to_string();
        if title.is_empty() {
            return;
        }
        let Some(manuscript_id) = st.current_manuscript_id.get_untracked() else {
            return;
        };
        let tree_now = st.tree.get_untracked();
        let Some(req) = create_request(
            &tree_now,
            &manuscript_id,
            &title,
            new_node.is_folder,
            new_node.parent_id.clone(),
        ) else {
            return;
        };

        let me = self.clone();
        spawn_local(async move {
            let api = me.app.0.api_client.get_untracked();
            match api.create_node(&req).await {
                Ok(created) => {
                    if !created.is_folder {
                        me.app.0.open_document_id.set(Some(created.id.clone()));
                    }
                    if let Some(pid) = &req.parent_id {
                        me.set_folder_expanded(pid, true);
                    }
                    me.reload_after_success(&manuscript_id).await;
                }
                Err(e) => me.recover(&manuscript_id, format!("Create failed: {e}")).await,
            }
        });
    }

    pub fn set_folder_expanded(&self, folder_id: &str, expanded: bool) {
        let st = &self.app.0;
        st.expanded.update(|xs| {
            if expanded {
                xs.insert(folder_id.to_string());
            } else {
                xs.remove(folder_id);
            }
        });
        if let Some(ms_id) = st.current_manuscript_id.get_untracked() {
            save_expanded_folders(&ms_id, &st.expanded.get_untracked());
        }
    }

    fn still_current(&self, manuscript_id: &str) -> bool {
        self.app.0.current_manuscript_id.get_untracked().as_deref() == Some(manuscript_id)
    }

    /// Failure path shared by rename/delete/duplicate/create: one notice,
    /// then whatever the backend now holds replaces the optimistic guess.
    async fn recover(&self, manuscript_id: &str, message: String) {
        let st = &self.app.0;
        st.notices.error(message);
        let api = st.api_client.get_untracked();
        let reload = api.get_manuscript_tree(manuscript_id).await;
        if !self.still_current(manuscript_id) {
            return;
        }
        if let Ok(tree) = reload {
            st.tree.set(tree);
        }
    }

    async fn reload_after_success(&self, manuscript_id: &str) {
        let st = &self.app.0;
        let api = st.api_client.get_untracked();
        let reload = api.get_manuscript_tree(manuscript_id).await;
        if !self.still_current(manuscript_id) {
            return;
        }
        match reload {
            Ok(tree) => st.tree.set(tree),
            Err(e) => st.notices.error(format!("Refresh failed: {e}")),
        }
    }
}

/// Wire form of a planned move. Root destinations need the explicit null
/// parent, hence the nested `Some(None)`.
pub(crate) fn move_request(plan: &MovePlan) -> UpdateNodeRequest {
    UpdateNodeRequest {
        parent_id: Some(plan.parent_id.clone()),
        order_index: Some(plan.index as i32),
        ..Default::default()
    }
}

/// Settles a move's persist/reload pair. The reload doubles as rollback, so
/// a failed persist with a good reload swaps the optimistic tree back out;
/// exactly one error message per failed persist. When the reload itself
/// fails there is nothing authoritative to show, so the current tree stays.
pub(crate) fn reconcile_move(
    ctx: &str,
    persist: ApiResult<()>,
    reload: ApiResult<Vec<BinderNode>>,
) -> ReconcileOutcome {
    let error = persist.err().map(|e| format!("{ctx}: {e}"));
    match reload {
        Ok(tree) => ReconcileOutcome {
            tree: Some(tree),
            error,
        },
        Err(reload_err) => ReconcileOutcome {
            tree: None,
            error: error.or_else(|| Some(format!("Refresh failed: {reload_err}"))),
        },
    }
}

/// The pane must not keep showing a document that just left the tree.
pub(crate) fn selection_survives_delete(open: Option<&str>, removed: &BinderNode) -> bool {
    match open {
        Some(id) => !subtree_contains(removed, id),
        None => true,
    }
}

/// Destination for a duplicate: same parent, immediately after the original.
pub(crate) fn plan_duplicate(tree: &[BinderNode], node_id: &str) -> Option<MovePlan> {
    let parent_id = find_parent_id(tree, node_id)?;
    let siblings = siblings_of(tree, parent_id.as_deref())?;
    let pos = siblings.iter().position(|s| s.id == node_id)?;
    Some(MovePlan {
        parent_id,
        index: pos + 1,
    })
}

pub(crate) fn copy_title(title: &str) -> String {
    format!("{} (Copy)", title.trim_end())
}

pub(crate) fn duplicate_request(
    manuscript_id: &str,
    original: &BinderNode,
    detail: &NodeDetail,
    slot: &MovePlan,
) -> CreateNodeRequest {
    CreateNodeRequest {
        manuscript_id: manuscript_id.to_string(),
        title: copy_title(&original.title),
        is_folder: original.is_folder,
        order_index: slot.index as i32,
        parent_id: slot.parent_id.clone(),
        document_type: Some(original.document_type),
        initial_content: (!detail.content.is_empty()).then(|| detail.content.clone()),
    }
}

pub(crate) fn create_request(
    tree: &[BinderNode],
    manuscript_id: &str,
    title: &str,
    is_folder: bool,
    parent_id: Option<String>,
) -> Option<CreateNodeRequest> {
    let siblings = siblings_of(tree, parent_id.as_deref())?;
    let document_type = if is_folder {
        DocumentType::Folder
    } else {
        DocumentType::Chapter
    };
    Some(CreateNodeRequest {
        manuscript_id: manuscript_id.to_string(),
        title: title.to_string(),
        is_folder,
        order_index: siblings.len() as i32,
        parent_id,
        document_type: Some(document_type),
        initial_content: None,
    })
}

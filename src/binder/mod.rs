use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Label, Spinner,
};
use crate::state::binder_ops::{BinderOps, NewNode};
use crate::state::AppContext;
use crate::tree::{find_node, flatten_preorder, subtree_word_count};
use crate::util::format_word_count;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// How long a drag has to hover a collapsed folder before it springs open.
pub(crate) const DRAG_EXPAND_DELAY_MS: i32 = 500;

/// Shared by every row in the panel.
#[derive(Clone)]
pub(crate) struct BinderCtx {
    pub ops: BinderOps,
    pub dragging_id: RwSignal<Option<String>>,
    /// Pending spring-open: hovered folder id + timeout handle.
    pub hover_expand: RwSignal<Option<(String, i32)>>,
    pub dialogs: BinderDialogs,
}

#[derive(Clone, Copy)]
pub(crate) struct BinderDialogs {
    pub create_open: RwSignal<bool>,
    pub create_title: RwSignal<String>,
    pub create_is_folder: RwSignal<bool>,
    pub create_parent_id: RwSignal<Option<String>>,
    pub create_parent_title: RwSignal<String>,
    pub create_error: RwSignal<Option<String>>,

    pub rename_open: RwSignal<bool>,
    pub rename_id: RwSignal<Option<String>>,
    pub rename_value: RwSignal<String>,
    pub rename_error: RwSignal<Option<String>>,

    pub delete_open: RwSignal<bool>,
    pub delete_id: RwSignal<Option<String>>,
    pub delete_title: RwSignal<String>,
    pub delete_is_folder: RwSignal<bool>,
}

impl BinderDialogs {
    fn new() -> Self {
        Self {
            create_open: RwSignal::new(false),
            create_title: RwSignal::new(String::new()),
            create_is_folder: RwSignal::new(false),
            create_parent_id: RwSignal::new(None),
            create_parent_title: RwSignal::new(String::new()),
            create_error: RwSignal::new(None),
            rename_open: RwSignal::new(false),
            rename_id: RwSignal::new(None),
            rename_value: RwSignal::new(String::new()),
            rename_error: RwSignal::new(None),
            delete_open: RwSignal::new(false),
            delete_id: RwSignal::new(None),
            delete_title: RwSignal::new(String::new()),
            delete_is_folder: RwSignal::new(false),
        }
    }

    pub fn open_create(&self, parent: Option<(String, String)>, is_folder: bool) {
        let (pid, ptitle) = match parent {
            Some((id, title)) => (Some(id), title),
            None => (None, String::new()),
        };
        self.create_parent_id.set(pid);
        self.create_parent_title.set(ptitle);
        self.create_is_folder.set(is_folder);
        self.create_title.set(String::new());
        self.create_error.set(None);
        self.create_open.set(true);
    }

    pub fn open_rename(&self, id: String, title: String) {
        self.rename_id.set(Some(id));
        self.rename_value.set(title);
        self.rename_error.set(None);
        self.rename_open.set(true);
    }

    pub fn open_delete(&self, id: String, title: String, is_folder: bool) {
        self.delete_id.set(Some(id));
        self.delete_title.set(title);
        self.delete_is_folder.set(is_folder);
        self.delete_open.set(true);
    }
}

fn schedule_hover_expand(ctx: &BinderCtx, app: &AppContext, folder_id: &str) {
    let pending_here = matches!(
        ctx.hover_expand.get_untracked(),
        Some((ref id, _)) if id == folder_id
    );
    if pending_here {
        return;
    }
    cancel_hover_expand(ctx);
    if app.0.expanded.get_untracked().contains(folder_id) {
        return;
    }
    let Some(win) = web_sys::window() else {
        return;
    };

    let ops = ctx.ops.clone();
    let hover = ctx.hover_expand;
    let fid = folder_id.to_string();
    let fid_cb = fid.clone();
    let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
        // The drag may have left this row in the meantime.
        let still_pending = matches!(
            hover.get_untracked(),
            Some((ref id, _)) if *id == fid_cb
        );
        if still_pending {
            hover.set(None);
            ops.set_folder_expanded(&fid_cb, true);
        }
    });
    let tid = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            DRAG_EXPAND_DELAY_MS,
        )
        .unwrap_or(0);
    ctx.hover_expand.set(Some((fid, tid)));
}

fn cancel_hover_expand(ctx: &BinderCtx) {
    if let Some((_, tid)) = ctx.hover_expand.get_untracked() {
        if let Some(win) = web_sys::window() {
            let _ = win.clear_timeout_with_handle(tid);
        }
        ctx.hover_expand.set(None);
    }
}

/// The manuscript navigator: tree rows with drag-and-drop reordering, a
/// title filter, and the node dialogs.
#[component]
pub fn BinderPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let dialogs = BinderDialogs::new();
    provide_context(BinderCtx {
        ops: BinderOps::new(app_state.clone()),
        dragging_id: RwSignal::new(None),
        hover_expand: RwSignal::new(None),
        dialogs,
    });

    let tree = app_state.0.tree;
    let tree_loading = app_state.0.tree_loading;
    let tree_error = app_state.0.tree_error;
    let binder_filter = app_state.0.binder_filter;

    let app_for_retry = app_state.clone();
    let retry_load = move || {
        let Some(ms_id) = app_for_retry.0.current_manuscript_id.get_untracked() else {
            return;
        };
        BinderOps::new(app_for_retry.clone()).load_tree(ms_id, true);
    };

    let total_words = move || {
        let total: u64 = tree.get().iter().map(subtree_word_count).sum();
        format!("{} words", format_word_count(total))
    };

    let filtering = move || !binder_filter.get().trim().is_empty();

    view! {
        <div class="flex h-full min-h-0 flex-col gap-2">
            <div class="flex items-center gap-1 px-1">
                <span class="min-w-0 flex-1 truncate text-xs font-semibold uppercase tracking-wide text-muted-foreground">
                    "Binder"
                </span>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:title="New chapter"
                    on:click=move |_| dialogs.open_create(None, false)
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="14"
                        height="14"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="text-muted-foreground"
                        aria-hidden="true"
                    >
                        <path d="M12 5v14" />
                        <path d="M5 12h14" />
                    </svg>
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:title="New folder"
                    on:click=move |_| dialogs.open_create(None, true)
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="14"
                        height="14"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="text-muted-foreground"
                        aria-hidden="true"
                    >
                        <path d="M20 20a2 2 0 0 0 2-2V8a2 2 0 0 0-2-2h-7.9a2 2 0 0 1-1.69-.9L9.6 3.9A2 2 0 0 0 7.93 3H4a2 2 0 0 0-2 2v13a2 2 0 0 0 2 2Z" />
                        <path d="M12 10v6" />
                        <path d="M9 13h6" />
                    </svg>
                </Button>
            </div>

            <Input
                r#type="search"
                placeholder="Filter titles…"
                bind_value=binder_filter
                class="h-8 text-sm border-border bg-background"
            />

            <div class="min-h-0 flex-1 overflow-y-auto pr-1">
                <Show
                    when=move || !tree_loading.get()
                    fallback=|| view! {
                        <div class="flex items-center gap-2 px-2 py-3 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading binder…"
                        </div>
                    }
                >
                    {
                        let retry_load = retry_load.clone();
                        move || {
                            if let Some(err) = tree_error.get() {
                                let retry_load = retry_load.clone();
                                return view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">
                                            {err}
                                        </AlertDescription>
                                        <div class="mt-2">
                                            <Button
                                                variant=ButtonVariant::Outline
                                                size=ButtonSize::Sm
                                                on:click=move |_| retry_load()
                                            >
                                                "Retry"
                                            </Button>
                                        </div>
                                    </Alert>
                                }
                                .into_any();
                            }

                            if filtering() {
                                return view! { <FilteredRows /> }.into_any();
                            }

                            if tree.get().is_empty() {
                                return view! {
                                    <div class="px-2 py-3 text-sm text-muted-foreground">
                                        "Nothing here yet. Add a chapter to get started."
                                    </div>
                                }
                                .into_any();
                            }

                            let root_ids_sv = StoredValue::new(
                                tree.get().iter().map(|n| n.id.clone()).collect::<Vec<String>>(),
                            );
                            view! {
                                <For
                                    each=move || root_ids_sv.get_value()
                                    key=|id| id.clone()
                                    children=move |id| view! { <BinderRow node_id=id depth=0 /> }
                                />
                            }
                            .into_any()
                        }
                    }
                </Show>
            </div>

            <div class="border-t border-border px-2 py-1.5 text-xs text-muted-foreground">
                {total_words}
            </div>

            <CreateNodeDialog />
            <RenameNodeDialog />
            <DeleteNodeDialog />
        </div>
    }
}

/// Flat result list shown while the filter box is non-empty. Reordering is
/// disabled here; rows only open their document or folder.
#[component]
fn FilteredRows() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let ctx = expect_context::<BinderCtx>();
    let tree = app_state.0.tree;
    let binder_filter = app_state.0.binder_filter;
    let open_doc = app_state.0.open_document_id;

    view! {
        <div class="space-y-0.5">
            {move || {
                let q = binder_filter.get().trim().to_lowercase();
                let now = tree.get();
                let hits = flatten_preorder(&now)
                    .into_iter()
                    .filter(|n| n.title.to_lowercase().contains(&q))
                    .map(|n| (n.id.clone(), n.title.clone(), n.is_folder))
                    .collect::<Vec<_>>();

                if hits.is_empty() {
                    return view! {
                        <div class="px-2 py-3 text-sm text-muted-foreground">"No matches."</div>
                    }
                    .into_any();
                }

                let ops = ctx.ops.clone();
                hits.into_iter()
                    .map(|(id, title, is_folder)| {
                        let ops = ops.clone();
                        let id_sv = StoredValue::new(id);
                        view! {
                            <button
                                class="flex w-full items-center gap-2 rounded-md px-2 py-1 text-left text-sm hover:bg-accent"
                                on:click=move |_| {
                                    let id = id_sv.get_value();
                                    if is_folder {
                                        ops.set_folder_expanded(&id, true);
                                    } else {
                                        open_doc.set(Some(id));
                                    }
                                }
                            >
                                <span class="text-muted-foreground">
                                    {if is_folder { "▸" } else { "•" }}
                                </span>
                                <span class="min-w-0 flex-1 truncate">{title}</span>
                            </button>
                        }
                        .into_any()
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn BinderRow(node_id: String, depth: usize) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let ctx = expect_context::<BinderCtx>();

    let id_sv = StoredValue::new(node_id);
    let tree = app_state.0.tree;
    let expanded = app_state.0.expanded;
    let open_doc = app_state.0.open_document_id;
    let codex = app_state.0.codex;
    let dragging_id = ctx.dragging_id;
    let dialogs = ctx.dialogs;

    let indent_px = (depth * 18) as i32;

    let app_for_render = app_state.clone();
    let ctx_for_render = ctx.clone();

    view! {
        <div>
            {move || {
                let id = id_sv.get_value();
                let Some(n) = find_node(&tree.get(), &id).cloned() else {
                    return ().into_view().into_any();
                };

                let is_folder = n.is_folder;
                let is_expanded = expanded.get().contains(&id);
                let is_selected = open_doc.get().as_deref() == Some(id.as_str());
                let is_dragged = dragging_id.get().as_deref() == Some(id.as_str());

                let words = if is_folder {
                    subtree_word_count(&n)
                } else {
                    u64::from(n.word_count)
                };

                let linked_name = n.linked_entity_id.as_ref().and_then(|lid| {
                    codex.get().iter().find(|e| &e.id == lid).map(|e| e.name.clone())
                });

                let kid_ids = n.children.iter().map(|c| c.id.clone()).collect::<Vec<String>>();
                let has_kids = !kid_ids.is_empty();

                let (glyph, glyph_class) = if is_folder {
                    (
                        if is_expanded { "▾" } else { "▸" },
                        "w-4 shrink-0 text-center text-muted-foreground cursor-pointer hover:text-foreground/80",
                    )
                } else {
                    ("•", "w-4 shrink-0 text-center text-muted-foreground")
                };

                let row_class = format!(
                    "group flex items-center gap-1.5 rounded-md px-1.5 py-1 text-sm cursor-pointer hover:bg-accent/60{}{}",
                    if is_selected { " bg-primary/10 ring-1 ring-primary/20" } else { "" },
                    if is_dragged { " opacity-50" } else { "" },
                );

                let ops_toggle = ctx_for_render.ops.clone();
                let ops_drop = ctx_for_render.ops.clone();
                let ctx_over = ctx_for_render.clone();
                let ctx_leave = ctx_for_render.clone();
                let ctx_drop = ctx_for_render.clone();
                let ctx_end = ctx_for_render.clone();
                let app_over = app_for_render.clone();

                let title_for_rename = n.title.clone();
                let title_for_delete = n.title.clone();
                let title_for_create = n.title.clone();

                let children_view = if is_folder && is_expanded && has_kids {
                    let kid_ids_sv = StoredValue::new(kid_ids);
                    view! {
                        <For
                            each=move || kid_ids_sv.get_value()
                            key=|id| id.clone()
                            children=move |id| view! { <BinderRow node_id=id depth=depth + 1 /> }
                        />
                    }
                    .into_any()
                } else {
                    ().into_view().into_any()
                };

                view! {
                    <div>
                        <div style=move || format!("padding-left: {}px", indent_px)>
                            <div
                                class=row_class
                                draggable="true"
                                on:click=move |_| {
                                    let id = id_sv.get_value();
                                    if is_folder {
                                        ops_toggle.set_folder_expanded(&id, !is_expanded);
                                    } else {
                                        open_doc.set(Some(id));
                                    }
                                }
                                on:dragstart=move |ev: web_sys::DragEvent| {
                                    if let Some(dt) = ev.data_transfer() {
                                        let _ = dt.set_data("text/plain", &id_sv.get_value());
                                        dt.set_drop_effect("move");
                                    }
                                    dragging_id.set(Some(id_sv.get_value()));
                                }
                                on:dragend=move |_ev: web_sys::DragEvent| {
                                    dragging_id.set(None);
                                    cancel_hover_expand(&ctx_end);
                                }
                                on:dragover=move |ev: web_sys::DragEvent| {
                                    ev.prevent_default();
                                    if let Some(dt) = ev.data_transfer() {
                                        dt.set_drop_effect("move");
                                    }
                                    if is_folder && !is_expanded {
                                        schedule_hover_expand(&ctx_over, &app_over, &id_sv.get_value());
                                    }
                                }
                                on:dragleave=move |_ev: web_sys::DragEvent| {
                                    let pending_here = matches!(
                                        ctx_leave.hover_expand.get_untracked(),
                                        Some((ref fid, _)) if *fid == id_sv.get_value()
                                    );
                                    if pending_here {
                                        cancel_hover_expand(&ctx_leave);
                                    }
                                }
                                on:drop=move |ev: web_sys::DragEvent| {
                                    ev.prevent_default();
                                    cancel_hover_expand(&ctx_drop);
                                    dragging_id.set(None);

                                    let dragged_id = ev
                                        .data_transfer()
                                        .and_then(|dt| dt.get_data("text/plain").ok())
                                        .unwrap_or_default();
                                    if dragged_id.trim().is_empty() {
                                        return;
                                    }
                                    ops_drop.commit_move(dragged_id, id_sv.get_value());
                                }
                            >
                                <span class=glyph_class>{glyph}</span>

                                <span class="min-w-0 flex-1 truncate">{n.title.clone()}</span>

                                {linked_name
                                    .map(|name| {
                                        view! {
                                            <span
                                                class="shrink-0 text-xs text-accent-foreground/70"
                                                title=format!("Linked to {name}")
                                            >
                                                "◆"
                                            </span>
                                        }
                                        .into_any()
                                    })
                                    .unwrap_or_else(|| ().into_view().into_any())}

                                <span class="shrink-0 text-[11px] tabular-nums text-muted-foreground group-hover:hidden">
                                    {format_word_count(words)}
                                </span>

                                <div class="hidden shrink-0 items-center group-hover:flex">
                                    {if is_folder {
                                        let title_for_create = title_for_create.clone();
                                        view! {
                                            <Button
                                                variant=ButtonVariant::Ghost
                                                size=ButtonSize::IconSm
                                                attr:title="New chapter inside"
                                                on:click=move |ev: web_sys::MouseEvent| {
                                                    ev.stop_propagation();
                                                    dialogs.open_create(
                                                        Some((id_sv.get_value(), title_for_create.clone())),
                                                        false,
                                                    );
                                                }
                                            >
                                                <svg
                                                    xmlns="http://www.w3.org/2000/svg"
                                                    width="13"
                                                    height="13"
                                                    viewBox="0 0 24 24"
                                                    fill="none"
                                                    stroke="currentColor"
                                                    stroke-width="2"
                                                    stroke-linecap="round"
                                                    stroke-linejoin="round"
                                                    class="text-muted-foreground"
                                                    aria-hidden="true"
                                                >
                                                    <path d="M12 5v14" />
                                                    <path d="M5 12h14" />
                                                </svg>
                                            </Button>
                                        }
                                        .into_any()
                                    } else {
                                        view! {
                                            <Button
                                                variant=ButtonVariant::Ghost
                                                size=ButtonSize::IconSm
                                                attr:title="Duplicate"
                                                on:click={
                                                    let ops = ctx_for_render.ops.clone();
                                                    move |ev: web_sys::MouseEvent| {
                                                        ev.stop_propagation();
                                                        ops.duplicate_node(id_sv.get_value());
                                                    }
                                                }
                                            >
                                                <svg
                                                    xmlns="http://www.w3.org/2000/svg"
                                                    width="13"
                                                    height="13"
                                                    viewBox="0 0 24 24"
                                                    fill="none"
                                                    stroke="currentColor"
                                                    stroke-width="2"
                                                    stroke-linecap="round"
                                                    stroke-linejoin="round"
                                                    class="text-muted-foreground"
                                                    aria-hidden="true"
                                                >
                                                    <rect x="8" y="8" width="14" height="14" rx="2" />
                                                    <path d="M4 16c-1.1 0-2-.9-2-2V4c0-1.1.9-2 2-2h10c1.1 0 2 .9 2 2" />
                                                </svg>
                                            </Button>
                                        }
                                        .into_any()
                                    }}

                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::IconSm
                                        attr:title="Rename"
                                        on:click={
                                            let title = title_for_rename.clone();
                                            move |ev: web_sys::MouseEvent| {
                                                ev.stop_propagation();
                                                dialogs.open_rename(id_sv.get_value(), title.clone());
                                            }
                                        }
                                    >
                                        <svg
                                            xmlns="http://www.w3.org/2000/svg"
                                            width="13"
                                            height="13"
                                            viewBox="0 0 24 24"
                                            fill="none"
                                            stroke="currentColor"
                                            stroke-width="2"
                                            stroke-linecap="round"
                                            stroke-linejoin="round"
                                            class="text-muted-foreground"
                                            aria-hidden="true"
                                        >
                                            <path d="M12 20h9" />
                                            <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
                                        </svg>
                                    </Button>

                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::IconSm
                                        class="text-destructive"
                                        attr:title="Delete"
                                        on:click={
                                            let title = title_for_delete.clone();
                                            move |ev: web_sys::MouseEvent| {
                                                ev.stop_propagation();
                                                dialogs.open_delete(id_sv.get_value(), title.clone(), is_folder);
                                            }
                                        }
                                    >
                                        <svg
                                            xmlns="http://www.w3.org/2000/svg"
                                            width="13"
                                            height="13"
                                            viewBox="0 0 24 24"
                                            fill="none"
                                            stroke="currentColor"
                                            stroke-width="2"
                                            stroke-linecap="round"
                                            stroke-linejoin="round"
                                            aria-hidden="true"
                                        >
                                            <path d="M3 6h18" />
                                            <path d="M8 6V4h8v2" />
                                            <path d="M19 6l-1 14H6L5 6" />
                                            <path d="M10 11v6" />
                                            <path d="M14 11v6" />
                                        </svg>
                                    </Button>
                                </div>
                            </div>
                        </div>
                        {children_view}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn CreateNodeDialog() -> impl IntoView {
    let ctx = expect_context::<BinderCtx>();
    let d = ctx.dialogs;
    let ops = ctx.ops.clone();

    let submit = move || {
        let title = d.create_title.get_untracked();
        if title.trim().is_empty() {
            d.create_error.set(Some("A title is required".to_string()));
            return;
        }
        ops.create_node(NewNode {
            title,
            is_folder: d.create_is_folder.get_untracked(),
            parent_id: d.create_parent_id.get_untracked(),
        });
        d.create_open.set(false);
    };

    view! {
        <Show when=move || d.create_open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 space-y-1">
                        <div class="text-sm font-medium">
                            {move || {
                                let kind = if d.create_is_folder.get() { "folder" } else { "chapter" };
                                let parent = d.create_parent_title.get();
                                if parent.is_empty() {
                                    format!("New {kind}")
                                } else {
                                    format!("New {kind} in \u{201c}{parent}\u{201d}")
                                }
                            }}
                        </div>
                    </div>

                    <div class="space-y-2">
                        <div class="space-y-1">
                            <Label class="text-xs">"Title"</Label>
                            <Input
                                bind_value=d.create_title
                                autofocus=true
                                class="h-8 text-sm border-border bg-background"
                                on:keydown={
                                    let submit = submit.clone();
                                    move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            submit();
                                        }
                                    }
                                }
                            />
                        </div>

                        <Show when=move || d.create_error.get().is_some() fallback=|| ().into_view()>
                            {move || d.create_error.get().map(|e| view! {
                                <Alert class="border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                </Alert>
                            })}
                        </Show>

                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                on:click=move |_| d.create_open.set(false)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                size=ButtonSize::Sm
                                on:click={
                                    let submit = submit.clone();
                                    move |_| submit()
                                }
                            >
                                "Create"
                            </Button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn RenameNodeDialog() -> impl IntoView {
    let ctx = expect_context::<BinderCtx>();
    let d = ctx.dialogs;
    let ops = ctx.ops.clone();

    let submit = move || {
        let Some(id) = d.rename_id.get_untracked() else {
            return;
        };
        let value = d.rename_value.get_untracked();
        if value.trim().is_empty() {
            d.rename_error.set(Some("A title is required".to_string()));
            return;
        }
        ops.rename_node(id, value);
        d.rename_open.set(false);
    };

    view! {
        <Show when=move || d.rename_open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 space-y-1">
                        <div class="text-sm font-medium">"Rename"</div>
                    </div>

                    <div class="space-y-2">
                        <div class="space-y-1">
                            <Label class="text-xs">"Title"</Label>
                            <Input
                                bind_value=d.rename_value
                                autofocus=true
                                class="h-8 text-sm border-border bg-background"
                                on:keydown={
                                    let submit = submit.clone();
                                    move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            submit();
                                        }
                                    }
                                }
                            />
                        </div>

                        <Show when=move || d.rename_error.get().is_some() fallback=|| ().into_view()>
                            {move || d.rename_error.get().map(|e| view! {
                                <Alert class="border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                </Alert>
                            })}
                        </Show>

                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                on:click=move |_| d.rename_open.set(false)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                size=ButtonSize::Sm
                                on:click={
                                    let submit = submit.clone();
                                    move |_| submit()
                                }
                            >
                                "Rename"
                            </Button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn DeleteNodeDialog() -> impl IntoView {
    let ctx = expect_context::<BinderCtx>();
    let d = ctx.dialogs;
    let ops = ctx.ops.clone();

    let submit = move || {
        let Some(id) = d.delete_id.get_untracked() else {
            return;
        };
        ops.delete_node(id);
        d.delete_open.set(false);
    };

    view! {
        <Show when=move || d.delete_open.get() fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 space-y-1">
                        <div class="text-sm font-medium">
                            {move || format!("Delete \u{201c}{}\u{201d}?", d.delete_title.get())}
                        </div>
                        <div class="text-xs text-muted-foreground">
                            {move || {
                                if d.delete_is_folder.get() {
                                    "The folder and everything inside it will be removed."
                                } else {
                                    "The document will be removed."
                                }
                            }}
                        </div>
                    </div>

                    <div class="flex items-center justify-end gap-2 pt-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| d.delete_open.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            variant=ButtonVariant::Destructive
                            size=ButtonSize::Sm
                            on:click={
                                let submit = submit.clone();
                                move |_| submit()
                            }
                        >
                            "Delete"
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

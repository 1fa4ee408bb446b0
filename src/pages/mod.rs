use crate::binder::BinderPanel;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardDescription, CardHeader,
    CardTitle, Spinner,
};
use crate::models::{NodeDetail, RecentManuscript};
use crate::state::binder_ops::BinderOps;
use crate::state::notices::NoticeLevel;
use crate::state::AppContext;
use crate::storage::{
    load_expanded_folders, load_recent_manuscripts, write_recent_manuscript,
    CURRENT_MANUSCRIPT_KEY, SIDEBAR_COLLAPSED_KEY,
};
use crate::tree::find_node;
use crate::util::format_word_count;
use icons::X;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::params::Params;

/// Fetch the manuscript list once. Both pages call this; re-entry while a
/// request is in flight (or after a completed load) is a no-op unless forced.
fn load_manuscripts(app_state: AppContext, force: bool) {
    if app_state.0.manuscripts_loading.get_untracked() {
        return;
    }
    if !force && app_state.0.manuscripts_loaded_once.get_untracked() {
        return;
    }

    app_state.0.manuscripts_loading.set(true);
    app_state.0.manuscripts_error.set(None);

    let api_client = app_state.0.api_client.get_untracked();
    spawn_local(async move {
        match api_client.get_manuscripts().await {
            Ok(manuscripts) => {
                app_state.0.manuscripts.set(manuscripts);
                app_state.0.manuscripts_loaded_once.set(true);
            }
            Err(e) => {
                app_state.0.manuscripts_error.set(Some(e.to_string()));
            }
        }
        app_state.0.manuscripts_loading.set(false);
    });
}

#[component]
pub fn ManuscriptListPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let manuscripts = app_state.0.manuscripts;
    let loading = app_state.0.manuscripts_loading;
    let error = app_state.0.manuscripts_error;
    let loaded_once = app_state.0.manuscripts_loaded_once;

    let recents: RwSignal<Vec<RecentManuscript>> = RwSignal::new(load_recent_manuscripts());

    {
        let app_state = app_state.clone();
        Effect::new(move |_| {
            load_manuscripts(app_state.clone(), false);
        });
    }

    let app_for_open = app_state.clone();
    let open_manuscript = move |id: String, title: String| {
        app_for_open.0.current_manuscript_id.set(Some(id.clone()));
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(CURRENT_MANUSCRIPT_KEY, &id);
        }
        write_recent_manuscript(&id, &title);
        navigate.with_value(|nav| {
            nav(&format!("/manuscripts/{}", id), Default::default());
        });
    };

    let app_for_refresh = app_state.clone();

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="mx-auto w-full max-w-4xl space-y-6 px-4 py-8">
                <div class="flex items-center justify-between">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">"Manuscripts"</h1>
                        <p class="text-sm text-muted-foreground">
                            "Pick a project to open its binder."
                        </p>
                    </div>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_| load_manuscripts(app_for_refresh.clone(), true)
                    >
                        "Refresh"
                    </Button>
                </div>

                <Show when=move || !recents.get().is_empty() fallback=|| ().into_view()>
                    <div class="space-y-2">
                        <div class="text-xs font-semibold uppercase tracking-wide text-muted-foreground">
                            "Recent"
                        </div>
                        <div class="flex flex-wrap gap-2">
                            {
                                let open_manuscript = open_manuscript.clone();
                                move || {
                                    let open_manuscript = open_manuscript.clone();
                                    recents
                                        .get()
                                        .into_iter()
                                        .map(move |r| {
                                            let open_manuscript = open_manuscript.clone();
                                            let id = r.id.clone();
                                            let title = r.title.clone();
                                            view! {
                                                <Button
                                                    variant=ButtonVariant::Outline
                                                    size=ButtonSize::Sm
                                                    on:click=move |_| {
                                                        open_manuscript(id.clone(), title.clone())
                                                    }
                                                >
                                                    {r.title.clone()}
                                                </Button>
                                            }
                                        })
                                        .collect_view()
                                }
                            }
                        </div>
                    </div>
                </Show>

                <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        error.get().map(|e| {
                            view! {
                                <Alert class="border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">
                                        {e}
                                    </AlertDescription>
                                </Alert>
                            }
                        })
                    }}
                </Show>

                <Show when=move || loading.get() fallback=|| ().into_view()>
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading manuscripts…"
                    </div>
                </Show>

                <Show
                    when=move || loaded_once.get() && manuscripts.get().is_empty()
                    fallback=|| ().into_view()
                >
                    <div class="text-sm text-muted-foreground">"No manuscripts yet."</div>
                </Show>

                <div class="grid gap-3 sm:grid-cols-2">
                    {
                        let open_manuscript = open_manuscript.clone();
                        move || {
                            let open_manuscript = open_manuscript.clone();
                            manuscripts
                                .get()
                                .into_iter()
                                .map(move |m| {
                                    let open_manuscript = open_manuscript.clone();
                                    let id = m.id.clone();
                                    let title = m.title.clone();
                                    view! {
                                        <Card
                                            class="group cursor-pointer transition-colors hover:bg-surface-hover hover:ring-1 hover:ring-border"
                                            on:click=move |_| {
                                                open_manuscript(id.clone(), title.clone())
                                            }
                                        >
                                            <CardHeader class="p-4">
                                                <CardTitle class="truncate text-sm">
                                                    {m.title.clone()}
                                                </CardTitle>
                                                <CardDescription class="line-clamp-2 text-xs">
                                                    {m.description.clone()}
                                                </CardDescription>
                                            </CardHeader>
                                        </Card>
                                    }
                                })
                                .collect_view()
                        }
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ManuscriptRouteParams {
    pub ms_id: Option<String>,
}

#[component]
pub fn ManuscriptPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = leptos_router::hooks::use_params::<ManuscriptRouteParams>();

    // Params are reactive; read them through a closure so tracking happens
    // where the value is used.
    let ms_id = move || params.get().ok().and_then(|p| p.ms_id).unwrap_or_default();

    let sidebar_collapsed = app_state.0.sidebar_collapsed;
    let codex_req_id: RwSignal<u64> = RwSignal::new(0);

    // Keep the global selection in sync when entering this route directly
    // (recents button, bookmark, refresh).
    {
        let app_state = app_state.clone();
        Effect::new(move |_| {
            let ms = ms_id();
            if ms.trim().is_empty() {
                return;
            }
            if app_state.0.current_manuscript_id.get() != Some(ms.clone()) {
                app_state.0.current_manuscript_id.set(Some(ms.clone()));
                if let Some(storage) =
                    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
                {
                    let _ = storage.set_item(CURRENT_MANUSCRIPT_KEY, &ms);
                }
            }
        });
    }

    // Per-manuscript UI state + the binder tree itself.
    {
        let app_state = app_state.clone();
        Effect::new(move |_| {
            let ms = ms_id();
            if ms.trim().is_empty() {
                return;
            }
            app_state.0.open_document_id.set(None);
            app_state.0.binder_filter.set(String::new());
            app_state.0.expanded.set(load_expanded_folders(&ms));
            BinderOps::new(app_state.clone()).load_tree(ms, false);
        });
    }

    // Codex entities decorate the binder and the document pane; a failed
    // fetch only costs the badges, so it does not surface an error.
    {
        let app_state = app_state.clone();
        Effect::new(move |_| {
            let ms = ms_id();
            if ms.trim().is_empty() {
                app_state.0.codex.set(vec![]);
                return;
            }

            let rid = codex_req_id.get_untracked().saturating_add(1);
            codex_req_id.set(rid);

            let api_client = app_state.0.api_client.get_untracked();
            let app_state = app_state.clone();
            spawn_local(async move {
                let result = api_client.get_codex_entities(&ms).await;
                if codex_req_id.get_untracked() != rid {
                    return;
                }
                match result {
                    Ok(entities) => app_state.0.codex.set(entities),
                    Err(_) => app_state.0.codex.set(vec![]),
                }
            });
        });
    }

    // The header needs the manuscript title even on a deep link.
    {
        let app_state = app_state.clone();
        Effect::new(move |_| {
            load_manuscripts(app_state.clone(), false);
        });
    }

    // Record the visit once the title is known.
    {
        let app_state = app_state.clone();
        Effect::new(move |_| {
            let ms = ms_id();
            if ms.trim().is_empty() {
                return;
            }
            let Some(m) = app_state.0.manuscripts.get().into_iter().find(|m| m.id == ms) else {
                return;
            };
            write_recent_manuscript(&m.id, &m.title);
        });
    }

    let manuscript_title = {
        let app_state = app_state.clone();
        move || {
            let ms = ms_id();
            app_state
                .0
                .manuscripts
                .get()
                .into_iter()
                .find(|m| m.id == ms)
                .map(|m| m.title)
                .unwrap_or_else(|| "Manuscript".to_string())
        }
    };

    let toggle_sidebar = move |_ev: web_sys::MouseEvent| {
        let collapsed = !sidebar_collapsed.get_untracked();
        sidebar_collapsed.set(collapsed);
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(SIDEBAR_COLLAPSED_KEY, if collapsed { "1" } else { "0" });
        }
    };

    view! {
        <div class="flex h-screen flex-col bg-background text-foreground">
            <header class="flex items-center gap-2 border-b border-border px-3 py-2">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:title="Toggle binder"
                    on:click=toggle_sidebar
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="15"
                        height="15"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="text-muted-foreground"
                        aria-hidden="true"
                    >
                        <rect x="3" y="3" width="18" height="18" rx="2" />
                        <path d="M9 3v18" />
                    </svg>
                </Button>

                <a href="/" class="text-sm font-medium text-muted-foreground hover:text-foreground">
                    "Draftroom"
                </a>
                <span class="text-muted-foreground">"/"</span>
                <span class="min-w-0 flex-1 truncate text-sm font-medium">{manuscript_title}</span>
            </header>

            <div class="flex min-h-0 flex-1">
                <Show when=move || !sidebar_collapsed.get() fallback=|| ().into_view()>
                    <aside class="w-72 shrink-0 border-r border-border p-2">
                        <BinderPanel />
                    </aside>
                </Show>

                <main class="min-w-0 flex-1 overflow-y-auto">
                    <DocumentPane />
                </main>
            </div>

            <NoticesHost />
        </div>
    }
}

/// Read-only view of the selected document. Content comes from the node
/// detail endpoint; the title prefers the binder tree so optimistic renames
/// show up without a refetch.
#[component]
fn DocumentPane() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let tree = app_state.0.tree;
    let codex = app_state.0.codex;
    let open_doc = app_state.0.open_document_id;

    let detail: RwSignal<Option<NodeDetail>> = RwSignal::new(None);
    let detail_loading: RwSignal<bool> = RwSignal::new(false);
    let detail_error: RwSignal<Option<String>> = RwSignal::new(None);
    let detail_req_id: RwSignal<u64> = RwSignal::new(0);

    {
        let app_state = app_state.clone();
        Effect::new(move |_| {
            let Some(id) = open_doc.get() else {
                detail.set(None);
                detail_error.set(None);
                return;
            };

            let rid = detail_req_id.get_untracked().saturating_add(1);
            detail_req_id.set(rid);

            detail_loading.set(true);
            detail_error.set(None);

            let api_client = app_state.0.api_client.get_untracked();
            spawn_local(async move {
                let result = api_client.get_node_detail(&id).await;

                // Ignore stale responses.
                if detail_req_id.get_untracked() != rid {
                    return;
                }

                match result {
                    Ok(d) => detail.set(Some(d)),
                    Err(e) => detail_error.set(Some(e.to_string())),
                }
                detail_loading.set(false);
            });
        });
    }

    view! {
        <div class="mx-auto w-full max-w-3xl px-6 py-8">
            {move || {
                let Some(open_id) = open_doc.get() else {
                    return view! {
                        <div class="pt-16 text-center text-sm text-muted-foreground">
                            "Select a document in the binder to read it here."
                        </div>
                    }
                    .into_any();
                };

                if let Some(err) = detail_error.get() {
                    return view! {
                        <Alert class="border-destructive/30">
                            <AlertDescription class="text-destructive text-xs">{err}</AlertDescription>
                        </Alert>
                    }
                    .into_any();
                }

                let loaded = detail.get().filter(|d| d.id == open_id);
                let Some(d) = loaded else {
                    return view! {
                        <div class="flex items-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Loading document…"
                        </div>
                    }
                    .into_any();
                };

                let title = find_node(&tree.get(), &open_id)
                    .map(|n| n.title.clone())
                    .unwrap_or_else(|| d.title.clone());
                let type_label = d.document_type.to_string();
                let words = format_word_count(u64::from(d.word_count));
                let linked = d.linked_entity_id.as_ref().and_then(|lid| {
                    codex
                        .get()
                        .iter()
                        .find(|e| &e.id == lid)
                        .map(|e| (e.name.clone(), e.entity_type.clone()))
                });

                view! {
                    <article class="space-y-4">
                        <header class="space-y-2 border-b border-border pb-4">
                            <h1 class="text-2xl font-semibold">{title}</h1>
                            <div class="flex flex-wrap items-center gap-3 text-xs text-muted-foreground">
                                <span class="rounded-md border border-border px-2 py-0.5">
                                    {type_label}
                                </span>
                                <span>{format!("{} words", words)}</span>
                                {linked
                                    .map(|(name, kind)| {
                                        view! {
                                            <span
                                                class="rounded-md border border-border px-2 py-0.5"
                                                title=kind
                                            >
                                                {format!("◆ {}", name)}
                                            </span>
                                        }
                                        .into_any()
                                    })
                                    .unwrap_or_else(|| ().into_view().into_any())}
                            </div>
                        </header>

                        <div class="whitespace-pre-wrap text-sm leading-7">{d.content.clone()}</div>
                    </article>
                }
                .into_any()
            }}
        </div>
    }
}

/// Floating stack of app notices (bottom-right), each dismissible.
#[component]
pub fn NoticesHost() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notices = app_state.0.notices;

    view! {
        <div class="pointer-events-none fixed bottom-4 right-4 z-50 flex w-80 flex-col gap-2">
            <For
                each=move || notices.items().get()
                key=|n| n.id
                children=move |n| {
                    let (frame_class, text_class) = match n.level {
                        NoticeLevel::Error => {
                            ("pointer-events-auto shadow-lg border-destructive/40", "text-destructive text-xs")
                        }
                        NoticeLevel::Info => ("pointer-events-auto shadow-lg", "text-xs"),
                    };
                    let nid = n.id;
                    view! {
                        <Alert class=frame_class>
                            <div class="flex items-start justify-between gap-2">
                                <AlertDescription class=text_class>
                                    {n.message.clone()}
                                </AlertDescription>
                                <button
                                    class="shrink-0 text-muted-foreground hover:text-foreground"
                                    on:click=move |_| notices.dismiss(nid)
                                >
                                    <span class="hidden">"Dismiss"</span>
                                    <X class="size-3.5" />
                                </button>
                            </div>
                        </Alert>
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex min-h-screen items-center justify-center bg-background">
            <div class="space-y-2 text-center">
                <div class="text-sm font-medium">"Page not found"</div>
                <a class="text-xs text-primary underline underline-offset-4" href="/">
                    "Back to manuscripts"
                </a>
            </div>
        </div>
    }
}

//! # Entity Table Component
//!
//! Renders a [`TableView`] with sortable headers, a filter box, row
//! selection, per-row action buttons and a pager. The loading, error and
//! empty states replace the rows. Row actions are only emitted; the page
//! decides what they do.

use dioxus::prelude::*;
use sejour_core::EntityId;
use sejour_model::PageMeta;

use super::feedback::{EmptyState, ErrorState, LoadingState};
use super::status_badge::StatusBadge;
use crate::hooks::{CellValue, RowAction, TableState, TableView};

// ============================================================================
// Component Props
// ============================================================================

/// Properties for EntityTable component
#[derive(Props, Clone, PartialEq)]
pub struct EntityTableProps {
    /// Rows of the current page, already filtered and sorted
    pub view: TableView,

    /// Sort, filter, page and selection state
    pub state: Signal<TableState>,

    /// Row button pressed
    #[props(default)]
    pub on_action: EventHandler<(EntityId, RowAction)>,

    #[props(default = false)]
    pub loading: bool,

    /// Fetch failure, shown with a retry button
    #[props(default)]
    pub error: Option<String>,

    #[props(default)]
    pub on_retry: EventHandler<()>,

    /// Server pagination; the client-side pager is used without it
    #[props(default)]
    pub meta: Option<PageMeta>,

    /// Server page requested (1-based)
    #[props(default)]
    pub on_page: EventHandler<u32>,

    /// Show selection checkboxes
    #[props(default = false)]
    pub selectable: bool,
}

// ============================================================================
// Main Component
// ============================================================================

/// Data table of a listing or booking screen
#[component]
pub fn EntityTable(props: EntityTableProps) -> Element {
    let mut state = props.state;
    let filter = state.read().filter().to_string();
    let sort = state.read().sort();

    rsx! {
        div {
            class: "bg-slate-800/50 border border-slate-700 rounded-lg",

            // Filter bar
            div {
                class: "flex items-center justify-between gap-4 p-3 border-b border-slate-700",
                input {
                    class: "w-72 px-3 py-1.5 bg-slate-800 border border-slate-700 rounded-lg text-sm focus:outline-none focus:ring-2 focus:ring-indigo-500/30",
                    r#type: "search",
                    placeholder: "Filter rows...",
                    value: "{filter}",
                    oninput: move |e| state.write().set_filter(e.value()),
                }
                if props.selectable && state.read().selected_count() > 0 {
                    div {
                        class: "flex items-center gap-3 text-sm text-slate-400",
                        span { "{state.read().selected_count()} selected" }
                        button {
                            r#type: "button",
                            class: "text-indigo-400 hover:text-indigo-300",
                            onclick: move |_| state.write().clear_selection(),
                            "Clear"
                        }
                    }
                }
            }

            if props.loading {
                LoadingState {}
            } else if let Some(message) = props.error.clone() {
                ErrorState {
                    message,
                    on_retry: move |_| props.on_retry.call(()),
                }
            } else if props.view.is_empty() {
                EmptyState {
                    message: props.view.empty_message().to_string(),
                    can_reset: props.view.filtered,
                    on_reset: move |_| state.write().reset_filter(),
                }
            } else {
                table {
                    class: "w-full text-sm",
                    thead {
                        tr {
                            class: "text-left text-slate-400 border-b border-slate-700",
                            if props.selectable {
                                th { class: "w-10 px-3 py-2" }
                            }
                            for header in props.view.headers.iter().copied() {
                                th {
                                    key: "{header.key}",
                                    class: "px-3 py-2 font-medium",
                                    class: if header.sortable { "cursor-pointer select-none hover:text-slate-200" } else { "" },
                                    onclick: move |_| {
                                        if header.sortable {
                                            state.write().sort_by(header.key);
                                        }
                                    },
                                    "{header.label}"
                                    if let Some((key, direction)) = sort {
                                        if key == header.key {
                                            span { class: "ml-1", "{direction.arrow()}" }
                                        }
                                    }
                                }
                            }
                            th { class: "px-3 py-2 text-right", "Actions" }
                        }
                    }
                    tbody {
                        for row in props.view.rows.iter().cloned() {
                            tr {
                                key: "{row.id}",
                                class: "border-b border-slate-700/50 hover:bg-slate-700/30",
                                class: if row.selected { "bg-indigo-500/10" } else { "" },
                                if props.selectable {
                                    td {
                                        class: "px-3 py-2",
                                        input {
                                            r#type: "checkbox",
                                            class: "accent-indigo-600",
                                            checked: row.selected,
                                            onchange: move |_| state.write().toggle_selected(row.id),
                                        }
                                    }
                                }
                                for cell in row.cells.iter().cloned() {
                                    td {
                                        class: "px-3 py-2 text-slate-200",
                                        Cell { value: cell }
                                    }
                                }
                                td {
                                    class: "px-3 py-2 text-right whitespace-nowrap space-x-3",
                                    for slot in row.actions.iter().copied() {
                                        button {
                                            r#type: "button",
                                            class: "text-xs font-medium {slot.action.class()} disabled:opacity-40 disabled:cursor-not-allowed",
                                            disabled: !slot.enabled,
                                            onclick: move |_| props.on_action.call((row.id, slot.action)),
                                            "{slot.action.label()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            Pager {
                view: props.view.clone(),
                meta: props.meta,
                state,
                on_page: props.on_page,
            }
        }
    }
}

// ============================================================================
// Cells and Pager
// ============================================================================

#[component]
fn Cell(value: CellValue) -> Element {
    match value {
        CellValue::Badge { label, tone } => rsx! { StatusBadge { label, tone } },
        CellValue::Flag(flag) => rsx! {
            span {
                class: if flag { "text-emerald-400" } else { "text-slate-500" },
                if flag { "✓" } else { "✗" }
            }
        },
        CellValue::Empty => rsx! { span { class: "text-slate-500", "-" } },
        other => rsx! { "{other.display()}" },
    }
}

#[component]
fn Pager(
    view: TableView,
    meta: Option<PageMeta>,
    state: Signal<TableState>,
    on_page: EventHandler<u32>,
) -> Element {
    let mut state = state;

    if let Some(meta) = meta.filter(|m| m.last_page > 1) {
        let current = meta.current_page;
        return rsx! {
            PagerBar {
                caption: format!("Page {} of {}", meta.current_page, meta.last_page),
                has_previous: meta.has_previous(),
                has_next: meta.has_next(),
                on_previous: move |_| on_page.call(current.saturating_sub(1).max(1)),
                on_next: move |_| on_page.call(current + 1),
            }
        };
    }

    if view.page_count <= 1 {
        return rsx! {};
    }

    rsx! {
        PagerBar {
            caption: format!("Page {} of {} ({} rows)", view.page + 1, view.page_count, view.matched),
            has_previous: view.has_previous(),
            has_next: view.has_next(),
            on_previous: move |_| state.write().previous_page(),
            on_next: move |_| state.write().next_page(),
        }
    }
}

#[component]
fn PagerBar(
    caption: String,
    has_previous: bool,
    has_next: bool,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    let button_class = "px-3 py-1 bg-slate-700 hover:bg-slate-600 disabled:opacity-40 disabled:cursor-not-allowed rounded transition-colors";
    rsx! {
        div {
            class: "flex items-center justify-between px-3 py-2 text-sm text-slate-400",
            span { "{caption}" }
            div {
                class: "flex gap-2",
                button {
                    r#type: "button",
                    class: button_class,
                    disabled: !has_previous,
                    onclick: move |_| on_previous.call(()),
                    "Previous"
                }
                button {
                    r#type: "button",
                    class: button_class,
                    disabled: !has_next,
                    onclick: move |_| on_next.call(()),
                    "Next"
                }
            }
        }
    }
}

//! Boxes shown over the panel: invite list, leave confirmation, settings.

use dioxus::prelude::*;

use crate::invite::{InviteRow, RowState};
use crate::lang;
use crate::panel::SettingsBox;
use crate::state::UserId;

use super::view::LayerView;

#[derive(Clone, Copy, PartialEq)]
pub struct LayerActions {
    pub on_invite_row: EventHandler<UserId>,
    pub on_invite_deselect: EventHandler<UserId>,
    pub on_invite: EventHandler<()>,
    pub on_discard_checked: EventHandler<bool>,
    pub on_leave: EventHandler<()>,
    pub on_close: EventHandler<()>,
}

#[allow(non_snake_case)]
#[component]
pub fn LayerBox(layer: LayerView, actions: LayerActions) -> Element {
    let content = match layer {
        LayerView::Invite {
            title,
            counter,
            rows,
        } => rsx! {
            InviteBox { title, counter, rows, actions }
        },
        LayerView::Leave {
            title,
            text,
            discard,
        } => rsx! {
            LeaveBox { title, text, discard, actions }
        },
        LayerView::Settings(settings) => rsx! {
            SettingsPanel { settings, actions }
        },
    };

    rsx! {
        div {
            class: "absolute inset-0 z-40 flex items-center justify-center bg-black/50",
            onmousedown: move |evt| evt.stop_propagation(),
            div {
                class: "w-80 max-h-[90%] flex flex-col rounded-2xl bg-slate-800 shadow-2xl border border-slate-700",
                {content}
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn BoxButtons(confirm: String, actions: LayerActions, on_confirm: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "flex justify-end gap-2 p-4 border-t border-slate-700",
            button {
                class: "px-4 py-2 rounded-lg text-sm font-semibold text-slate-300 hover:bg-slate-700",
                onclick: move |_| actions.on_close.call(()),
                "{lang::cancel()}"
            }
            button {
                class: "px-4 py-2 rounded-lg text-sm font-semibold text-indigo-300 hover:bg-indigo-500/20",
                onclick: move |_| on_confirm.call(()),
                "{confirm}"
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn InviteBox(title: String, counter: String, rows: Vec<InviteRow>, actions: LayerActions) -> Element {
    let selected: Vec<InviteRow> = rows.iter().filter(|row| row.is_selected()).cloned().collect();

    rsx! {
        div {
            class: "flex items-baseline gap-3 p-4",
            h2 { class: "text-lg font-bold text-white", "{title}" }
            span { class: "text-sm text-slate-400", "{counter}" }
        }

        if !selected.is_empty() {
            div {
                class: "flex flex-wrap gap-2 px-4 pb-2",
                for row in selected {
                    button {
                        key: "{row.id().0}",
                        class: "px-2 py-1 rounded-full bg-indigo-500/20 text-xs text-indigo-200 hover:bg-rose-500/30",
                        onclick: {
                            let id = row.id();
                            move |_| actions.on_invite_deselect.call(id)
                        },
                        "{row.user.first_name} ✕"
                    }
                }
            }
        }

        div {
            class: "flex-1 overflow-y-auto",
            for row in rows {
                InviteEntry { key: "{row.id().0}", row: row.clone(), actions }
            }
        }

        BoxButtons {
            confirm: lang::group_call_invite_button().to_string(),
            actions,
            on_confirm: actions.on_invite,
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn InviteEntry(row: InviteRow, actions: LayerActions) -> Element {
    let disabled = row.state == RowState::DisabledChecked;
    let id = row.id();

    rsx! {
        button {
            class: format!(
                "w-full flex items-center gap-3 px-4 py-2 text-left {}",
                if disabled { "opacity-60 cursor-default" } else { "hover:bg-slate-700/60" }
            ),
            disabled,
            onclick: move |_| actions.on_invite_row.call(id),
            div {
                class: format!(
                    "w-5 h-5 rounded-full border-2 flex items-center justify-center text-[10px] {}",
                    if row.checked() { "bg-indigo-500 border-indigo-500 text-white" } else { "border-slate-500" }
                ),
                if row.checked() { "✓" }
            }
            span { class: "text-sm text-slate-200", "{row.user.name()}" }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn LeaveBox(title: String, text: String, discard: Option<(String, bool)>, actions: LayerActions) -> Element {
    rsx! {
        div {
            class: "p-4 space-y-4",
            h2 { class: "text-lg font-bold text-white", "{title}" }
            p { class: "text-sm text-slate-300", "{text}" }

            if let Some((discard_label, checked)) = discard {
                label {
                    class: "flex items-center gap-2 text-sm text-slate-200 cursor-pointer",
                    input {
                        r#type: "checkbox",
                        checked,
                        onchange: move |evt: Event<FormData>| actions.on_discard_checked.call(evt.checked()),
                    }
                    "{discard_label}"
                }
            }
        }

        BoxButtons {
            confirm: lang::group_call_leave().to_string(),
            actions,
            on_confirm: actions.on_leave,
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn SettingsPanel(settings: SettingsBox, actions: LayerActions) -> Element {
    rsx! {
        div {
            class: "p-4 space-y-3",
            h2 { class: "text-lg font-bold text-white", "{lang::menu_settings()}" }
            div {
                class: "text-xs text-slate-500 uppercase tracking-wider",
                "{settings.channel_title}"
            }
            div {
                class: "font-mono text-xs text-slate-400 break-all",
                "{settings.call_id}"
            }
        }
        div {
            class: "flex justify-end p-4 border-t border-slate-700",
            button {
                class: "px-4 py-2 rounded-lg text-sm font-semibold text-slate-300 hover:bg-slate-700",
                onclick: move |_| actions.on_close.call(()),
                "{lang::close()}"
            }
        }
    }
}

//! Members of the call with per-member mute toggles.

use dioxus::prelude::*;

use crate::lang;
use crate::layout::Rect;
use crate::panel::MemberRow;
use crate::state::UserId;

use super::components::rect_style;

#[allow(non_snake_case)]
#[component]
pub fn MembersList(
    rect: Rect,
    row_height: i32,
    members: Vec<MemberRow>,
    on_toggle_mute: EventHandler<(UserId, bool)>,
    on_add_members: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "overflow-y-auto rounded-2xl bg-slate-800/60",
            style: rect_style(rect),
            onmousedown: move |evt| evt.stop_propagation(),

            button {
                class: "w-full flex items-center gap-3 px-4 text-sm font-semibold text-indigo-300 hover:bg-slate-700/60",
                style: "height: {row_height}px;",
                onclick: move |_| on_add_members.call(()),
                span { class: "text-xl", "➕" }
                "{lang::group_call_add_members()}"
            }

            for member in members {
                MemberEntry {
                    key: "{member.user.id.0}",
                    member: member.clone(),
                    row_height,
                    on_toggle_mute,
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn MemberEntry(member: MemberRow, row_height: i32, on_toggle_mute: EventHandler<(UserId, bool)>) -> Element {
    let initial = member
        .user
        .first_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let status = if member.speaking {
        "speaking"
    } else if member.muted {
        "muted"
    } else {
        "listening"
    };
    let status_color = if member.speaking {
        "text-emerald-400"
    } else {
        "text-slate-500"
    };
    let id = member.user.id;
    let muted = member.muted;

    rsx! {
        div {
            class: "flex items-center gap-3 px-4",
            style: "height: {row_height}px;",

            div {
                class: format!(
                    "w-10 h-10 rounded-full bg-gradient-to-br from-indigo-500 to-purple-600 flex items-center justify-center text-white font-bold {}",
                    if member.speaking { "ring-2 ring-emerald-400" } else { "" }
                ),
                "{initial}"
            }
            div {
                class: "flex-1 flex flex-col",
                span {
                    class: "text-sm font-semibold text-slate-200",
                    if member.is_self { "{member.user.name()} (you)" } else { "{member.user.name()}" }
                }
                span { class: "text-xs {status_color}", "{status}" }
            }
            if member.can_toggle_mute {
                button {
                    class: "w-8 h-8 rounded-full bg-slate-700 hover:bg-slate-600 text-sm",
                    title: if muted { "Allow to speak" } else { "Mute" },
                    onclick: move |_| on_toggle_mute.call((id, !muted)),
                    if muted { "🔇" } else { "🎙️" }
                }
            } else {
                span { class: "text-sm", if muted { "🔇" } else { "🎙️" } }
            }
        }
    }
}

//! Reusable pieces of the call panel.

use dioxus::prelude::*;

use crate::invite::Toast;
use crate::layout::{Rect, TitleLabel};
use crate::panel::{MouseButton, MuteButtonState, MuteButtonType};

pub fn rect_style(rect: Rect) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
        rect.x, rect.y, rect.width, rect.height
    )
}

pub fn mouse_button(evt: &MouseEvent) -> Option<MouseButton> {
    use dioxus::html::input_data::MouseButton as Html;
    match evt.trigger_button()? {
        Html::Primary => Some(MouseButton::Left),
        Html::Secondary => Some(MouseButton::Right),
        Html::Auxiliary => Some(MouseButton::Middle),
        _ => None,
    }
}

#[allow(non_snake_case)]
#[component]
pub fn TitleText(label: TitleLabel) -> Element {
    rsx! {
        div {
            class: "pointer-events-none truncate text-center text-sm font-semibold text-slate-200",
            style: rect_style(label.geometry),
            "{label.text}"
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn TitleControls(
    rect: Rect,
    on_minimize: EventHandler<()>,
    on_maximize: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "flex z-30",
            style: rect_style(rect),
            onmousedown: move |evt| evt.stop_propagation(),

            button {
                class: "flex-1 text-slate-400 hover:bg-slate-700 hover:text-white",
                onclick: move |_| on_minimize.call(()),
                "—"
            }
            button {
                class: "flex-1 text-slate-400 hover:bg-slate-700 hover:text-white",
                onclick: move |_| on_maximize.call(()),
                "☐"
            }
            button {
                class: "flex-1 text-slate-400 hover:bg-rose-600 hover:text-white",
                onclick: move |_| on_close.call(()),
                "✕"
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn CallButton(rect: Rect, icon: String, label: String, danger: bool, on_click: EventHandler<()>) -> Element {
    let color = if danger {
        "bg-rose-500 hover:bg-rose-600 text-white"
    } else {
        "bg-slate-700 hover:bg-slate-600 text-slate-200"
    };

    rsx! {
        div {
            class: "flex flex-col items-center gap-2",
            style: rect_style(rect),
            onmousedown: move |evt| evt.stop_propagation(),

            button {
                class: format!("w-full h-full rounded-full text-2xl transition-colors duration-150 {}", color),
                onclick: move |_| on_click.call(()),
                "{icon}"
            }
            span { class: "text-xs text-slate-400 whitespace-nowrap", "{label}" }
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn MuteButton(rect: Rect, state: MuteButtonState, level: f32, on_press: EventHandler<MouseButton>) -> Element {
    let (color, icon) = match state.kind {
        MuteButtonType::Connecting => ("from-slate-500 to-slate-600", "⏳"),
        MuteButtonType::Active => ("from-emerald-500 to-teal-500", "🎙️"),
        MuteButtonType::Muted => ("from-indigo-500 to-sky-500", "🔇"),
        MuteButtonType::ForceMuted => ("from-rose-500 to-pink-500", "🚫"),
    };
    let glow = if state.kind == MuteButtonType::Active {
        (level.clamp(0.0, 1.0) * 24.0) as i32
    } else {
        0
    };

    rsx! {
        div {
            class: "flex flex-col items-center gap-3",
            style: rect_style(rect),
            onmousedown: move |evt| evt.stop_propagation(),

            button {
                class: format!("w-full h-full rounded-full bg-gradient-to-br text-4xl shadow-lg transition-all duration-75 {}", color),
                style: "box-shadow: 0 0 {glow}px rgba(16, 185, 129, 0.6);",
                onmouseup: move |evt| {
                    if let Some(button) = mouse_button(&evt) {
                        on_press.call(button);
                    }
                },
                "{icon}"
            }
            span { class: "text-sm font-bold text-slate-200 whitespace-nowrap", "{state.text}" }
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn ToastStack(toasts: Vec<(uuid::Uuid, Toast)>) -> Element {
    rsx! {
        div {
            class: "absolute inset-x-0 bottom-6 flex flex-col items-center gap-2 pointer-events-none z-50",
            for (id, toast) in toasts {
                div {
                    key: "{id}",
                    class: "px-4 py-2 rounded-xl bg-slate-800/95 text-sm text-slate-100 shadow-lg",
                    for part in toast.text.spans {
                        if part.bold {
                            b { "{part.text}" }
                        } else {
                            span { "{part.text}" }
                        }
                    }
                }
            }
        }
    }
}

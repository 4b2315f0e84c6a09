//! Main application entry point for the UI.

use dioxus::desktop::tao::event::Event as WryEvent;
use dioxus::desktop::{WindowCloseBehaviour, WindowEvent, use_wry_event_handler};
use dioxus::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::invite::Toast;
use crate::layout::geometry::initial_window_rect;
use crate::layout::{HitTest, Point, Size};
use crate::lang;
use crate::panel::{GroupPanel, MouseButton};
use crate::state::UserId;

use super::boxes::{LayerActions, LayerBox};
use super::components::{CallButton, MuteButton, TitleControls, TitleText, ToastStack};
use super::members::MembersList;
use super::view::{PanelHandle, PanelView};

const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);
const TOAST_DURATION: std::time::Duration = std::time::Duration::from_secs(3);

type Toasts = Vec<(Uuid, Toast)>;

/// Runs the panel's close handling and returns what the window should do.
fn close_requested(handle: &PanelHandle) -> WindowCloseBehaviour {
    if handle.update(GroupPanel::handle_close) {
        debug!("Close intercepted, call still running");
        WindowCloseBehaviour::WindowHides
    } else {
        debug!("Closing panel window");
        handle.update(GroupPanel::close_before_destroy);
        WindowCloseBehaviour::WindowCloses
    }
}

fn close_window() {
    let window = dioxus::desktop::window();
    window.set_close_behavior(WindowCloseBehaviour::WindowCloses);
    window.close();
}

/// Shows a hidden panel minimized. There is no main window to reopen it
/// from, so it stays reachable from the taskbar.
fn minimize_hidden() {
    let window = dioxus::desktop::window();
    window.set_visible(true);
    window.set_minimized(true);
}

/// Pushes the panel state into the signals, showing any new toasts.
fn refresh(handle: &PanelHandle, mut view: Signal<PanelView>, mut toasts: Signal<Toasts>) {
    let (next, new_toasts) = handle.capture();
    for toast in new_toasts {
        let id = Uuid::new_v4();
        toasts.write().push((id, toast));
        spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            toasts.write().retain(|(toast_id, _)| *toast_id != id);
        });
    }

    if next.native_title != view.peek().native_title {
        dioxus::desktop::window().set_title(&next.native_title);
    }
    if next.ended && !view.peek().ended {
        info!("Call ended, closing panel");
        handle.update(GroupPanel::close_before_destroy);
        close_window();
        return;
    }
    if *view.peek() != next {
        view.set(next);
    }
}

#[allow(non_snake_case)]
pub fn App() -> Element {
    let handle = use_context::<Arc<PanelHandle>>();

    let view = use_signal(|| handle.capture().0);
    let toasts = use_signal(Toasts::new);

    let mount_handle = handle.clone();
    use_hook(move || {
        let window = dioxus::desktop::window();
        if let Some(monitor) = window.current_monitor() {
            let scale = monitor.scale_factor();
            let position = monitor.position().to_logical::<i32>(scale);
            let size = monitor.size().to_logical::<i32>(scale);
            let center = Point::new(position.x + size.width / 2, position.y + size.height / 2);
            let rect = mount_handle.update(|panel| initial_window_rect(panel.config(), center));
            window.set_outer_position(dioxus::desktop::LogicalPosition::new(rect.x, rect.y));
        }
    });

    let poll_handle = handle.clone();
    use_future(move || {
        let handle = poll_handle.clone();
        async move {
            loop {
                handle.update(GroupPanel::sync);
                refresh(&handle, view, toasts);
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        }
    });

    // Runs an action on the panel and re-renders right away.
    let act = {
        let handle = handle.clone();
        move |f: Box<dyn FnOnce(&mut GroupPanel)>| {
            handle.update(f);
            refresh(&handle, view, toasts);
        }
    };

    let on_resize = {
        let handle = handle.clone();
        move |evt: Event<ResizeData>| {
            let Ok(size) = evt.data().get_content_box_size() else {
                return;
            };
            let size = Size::new(size.width as i32, size.height as i32);
            handle.update(|panel| panel.resize(size));
            refresh(&handle, view, toasts);

            // The title region follows the title controls, which are laid
            // out in the same pass; place the title once they settled.
            let handle = handle.clone();
            spawn(async move {
                tokio::task::yield_now().await;
                handle.update(GroupPanel::refresh_title);
                refresh(&handle, view, toasts);
            });
        }
    };

    let on_title_press = {
        let handle = handle.clone();
        move |evt: MouseEvent| {
            let coords = evt.client_coordinates();
            let point = Point::new(coords.x as i32, coords.y as i32);
            if handle.update(|panel| panel.hit_test(point)) == HitTest::MoveOrMaximize {
                dioxus::desktop::window().drag();
            }
        }
    };

    let on_title_double_click = {
        let handle = handle.clone();
        move |evt: MouseEvent| {
            let coords = evt.client_coordinates();
            let point = Point::new(coords.x as i32, coords.y as i32);
            if handle.update(|panel| panel.hit_test(point)) == HitTest::MoveOrMaximize {
                let window = dioxus::desktop::window();
                window.set_maximized(!window.is_maximized());
            }
        }
    };

    // Close requests from the window manager. Handlers run before the
    // window applies its close behaviour, so set it here.
    let events_handle = handle.clone();
    use_wry_event_handler(move |event, _| {
        let WryEvent::WindowEvent {
            event, window_id, ..
        } = event
        else {
            return;
        };
        let window = dioxus::desktop::window();
        if *window_id != window.id() {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                let behaviour = close_requested(&events_handle);
                window.set_close_behavior(behaviour);
                if behaviour == WindowCloseBehaviour::WindowHides {
                    // Runs once the window has hidden itself.
                    spawn(async { minimize_hidden() });
                }
            }
            WindowEvent::Focused(true) => events_handle.update(GroupPanel::show_and_activate),
            _ => {}
        }
    });

    // Close button of the custom title controls.
    let on_close = {
        let handle = handle.clone();
        move |_: ()| {
            match close_requested(&handle) {
                WindowCloseBehaviour::WindowHides => minimize_hidden(),
                _ => close_window(),
            }
            refresh(&handle, view, toasts);
        }
    };

    let act_mute = act.clone();
    let act_settings = act.clone();
    let act_hangup = act.clone();
    let act_member = act.clone();
    let act_add = act.clone();
    let act_row = act.clone();
    let act_deselect = act.clone();
    let act_invite = act.clone();
    let act_discard = act.clone();
    let act_leave = act.clone();
    let act_layer_close = act.clone();

    let actions = LayerActions {
        on_invite_row: EventHandler::new(move |user: UserId| {
            act_row(Box::new(move |panel: &mut GroupPanel| panel.invite_row_clicked(user)))
        }),
        on_invite_deselect: EventHandler::new(move |user: UserId| {
            act_deselect(Box::new(move |panel: &mut GroupPanel| panel.invite_item_deselected(user)))
        }),
        on_invite: EventHandler::new(move |_: ()| act_invite(Box::new(GroupPanel::confirm_invite))),
        on_discard_checked: EventHandler::new(move |checked: bool| {
            act_discard(Box::new(move |panel: &mut GroupPanel| panel.set_leave_discard_checked(checked)))
        }),
        on_leave: EventHandler::new(move |_: ()| act_leave(Box::new(GroupPanel::confirm_leave))),
        on_close: EventHandler::new(move |_: ()| act_layer_close(Box::new(GroupPanel::close_layer))),
    };

    let current = view();
    let row_height = handle.update(|panel| panel.config().members_row_height);

    rsx! {
        document::Stylesheet { href: asset!("/assets/panel.css") }
        script { src: "https://cdn.tailwindcss.com" }

        div {
            class: "relative h-screen w-full bg-slate-900 text-slate-100 font-sans overflow-hidden select-none",
            onresize: on_resize,
            onmousedown: on_title_press,
            ondoubleclick: on_title_double_click,

            if let Some(label) = current.title_label.clone() {
                TitleText { label }
            }

            if let Some(rect) = current.title_controls {
                TitleControls {
                    rect,
                    on_minimize: move |_: ()| dioxus::desktop::window().set_minimized(true),
                    on_maximize: move |_: ()| {
                        let window = dioxus::desktop::window();
                        window.set_maximized(!window.is_maximized());
                    },
                    on_close,
                }
            }

            if let Some(geometry) = current.geometry {
                MembersList {
                    rect: geometry.members,
                    row_height,
                    members: current.members.clone(),
                    on_toggle_mute: move |(user, mute): (UserId, bool)| {
                        act_member(Box::new(move |panel: &mut GroupPanel| panel.member_mute_requested(user, mute)))
                    },
                    on_add_members: move |_: ()| act_add(Box::new(GroupPanel::add_members_requested)),
                }

                CallButton {
                    rect: geometry.settings,
                    icon: "⚙️",
                    label: lang::menu_settings(),
                    danger: false,
                    on_click: move |_: ()| act_settings(Box::new(GroupPanel::open_settings)),
                }

                MuteButton {
                    rect: geometry.mute,
                    state: current.mute.clone(),
                    level: current.mute_level,
                    on_press: move |button: MouseButton| {
                        act_mute(Box::new(move |panel: &mut GroupPanel| panel.mute_clicked(button)))
                    },
                }

                CallButton {
                    rect: geometry.hangup,
                    icon: "📞",
                    label: lang::box_leave(),
                    danger: true,
                    on_click: move |_: ()| act_hangup(Box::new(|panel: &mut GroupPanel| panel.hangup(false))),
                }
            }

            if let Some(layer) = current.layer.clone() {
                LayerBox { layer, actions }
            }

            ToastStack { toasts: toasts() }
        }
    }
}

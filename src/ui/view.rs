//! Snapshot of the panel handed to the components.

use std::sync::{Arc, Mutex};

use crate::call::GroupCall;
use crate::invite::{InviteRow, Toast};
use crate::layout::{ControlsGeometry, Rect, Size, TitleLabel};
use crate::panel::{GroupPanel, Layer, MemberRow, MuteButtonState, SettingsBox};

#[derive(Debug, Clone, PartialEq)]
pub enum LayerView {
    Leave {
        title: String,
        text: String,
        discard: Option<(String, bool)>,
    },
    Invite {
        title: String,
        counter: String,
        rows: Vec<InviteRow>,
    },
    Settings(SettingsBox),
}

impl LayerView {
    fn capture(layer: &Layer) -> Self {
        match layer {
            Layer::Leave(leave) => LayerView::Leave {
                title: leave.title().to_string(),
                text: leave.text().to_string(),
                discard: leave
                    .has_discard_checkbox()
                    .then(|| (leave.discard_label().to_string(), leave.discard_checked())),
            },
            Layer::Invite(controller) => LayerView::Invite {
                title: controller.title().to_string(),
                counter: controller.additional_title().to_string(),
                rows: controller.rows().to_vec(),
            },
            Layer::Settings(settings) => LayerView::Settings(settings.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub ended: bool,
    pub size: Size,
    pub native_title: String,
    pub title_label: Option<TitleLabel>,
    pub title_controls: Option<Rect>,
    pub geometry: Option<ControlsGeometry>,
    pub mute: MuteButtonState,
    pub mute_level: f32,
    pub members: Vec<MemberRow>,
    pub layer: Option<LayerView>,
}

/// The panel shared with the components, plus the call it was opened for.
pub struct PanelHandle {
    panel: Mutex<GroupPanel>,
    // Owned by the application; the panel itself only keeps a weak handle.
    _call: Arc<dyn GroupCall>,
}

impl PanelHandle {
    pub fn new(panel: GroupPanel, call: Arc<dyn GroupCall>) -> Self {
        Self {
            panel: Mutex::new(panel),
            _call: call,
        }
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut GroupPanel) -> R) -> R {
        let mut panel = self.panel.lock().unwrap();
        f(&mut panel)
    }

    /// Captures the current view and drains pending toasts.
    pub fn capture(&self) -> (PanelView, Vec<Toast>) {
        let mut panel = self.panel.lock().unwrap();
        let toasts = panel.take_toasts();
        let view = PanelView {
            ended: panel.call_ended(),
            size: panel.size(),
            native_title: panel.native_title().to_string(),
            title_label: panel.title_label().cloned(),
            title_controls: panel.title_controls(),
            geometry: panel.geometry().copied(),
            mute: panel.mute_button().clone(),
            mute_level: panel.mute_level(),
            members: panel.members(),
            layer: panel.layer().map(LayerView::capture),
        };
        (view, toasts)
    }
}

//! Positions of the panel controls for a given panel size.

use crate::config::{PanelConfig, TitleStyle};

use super::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsGeometry {
    pub members: Rect,
    pub mute: Rect,
    pub settings: Rect,
    pub hangup: Rect,
}

/// What dragging at a point of the panel body does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTest {
    None,
    /// Drag moves the window, double click maximizes it.
    MoveOrMaximize,
}

/// Top of the members list; everything above belongs to the title area.
pub fn members_list_top(config: &PanelConfig) -> i32 {
    match config.title_style {
        TitleStyle::CustomControls => {
            config.title_button_height + config.members_margin.top / 2
        }
        TitleStyle::MacOs => config.members_margin.top * 2,
        TitleStyle::Native => config.members_margin.top,
    }
}

/// Title-bar buttons drawn by the panel itself, top right.
pub fn title_controls_rect(config: &PanelConfig, panel_width: i32) -> Option<Rect> {
    match config.title_style {
        TitleStyle::CustomControls => {
            let width = config.title_controls_width();
            Some(Rect::new(
                panel_width - width,
                0,
                width,
                config.title_button_height,
            ))
        }
        TitleStyle::MacOs | TitleStyle::Native => None,
    }
}

/// Region left of the title-bar buttons, available for the title label.
pub fn title_rect(controls: Option<Rect>) -> Option<Rect> {
    controls.map(|controls| Rect::new(0, 0, controls.x, controls.height))
}

/// Window rectangle of the configured size centered on `center`.
pub fn initial_window_rect(config: &PanelConfig, center: Point) -> Rect {
    Rect::new(
        center.x - config.width / 2,
        center.y - config.height / 2,
        config.width,
        config.height,
    )
}

pub fn minimum_size(config: &PanelConfig) -> Size {
    Size::new(config.width, config.height)
}

// Tolerates min > max, preferring min.
fn clamp_width(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Lays out the members list and the call buttons, or `None` while the
/// panel has no size yet.
pub fn controls_geometry(
    config: &PanelConfig,
    size: Size,
    members_desired_height: i32,
) -> Option<ControlsGeometry> {
    if size.is_empty() {
        return None;
    }
    let margin = config.members_margin;
    let members_width = clamp_width(
        size.width - margin.left - margin.right,
        config.width - margin.left - margin.right,
        config.members_width_max,
    );
    let mute_top = size.height - config.mute_bottom_skip;
    let buttons_top = size.height - config.button_bottom_skip;
    let members_top = members_list_top(config);
    let available_height = mute_top - members_top - margin.bottom;

    let members = Rect::new(
        (size.width - members_width) / 2,
        members_top,
        members_width,
        members_desired_height.min(available_height),
    );
    let mute = Rect::new(
        (size.width - config.mute_size) / 2,
        mute_top,
        config.mute_size,
        config.mute_size,
    );
    let full_width = config.mute_size + 2 * config.button_size + 2 * config.button_skip;
    let side = (size.width - full_width) / 2;
    let settings = Rect::new(side, buttons_top, config.button_size, config.button_size);
    let hangup = Rect::new(
        size.width - side - config.button_size,
        buttons_top,
        config.button_size,
        config.button_size,
    );

    Some(ControlsGeometry {
        members,
        mute,
        settings,
        hangup,
    })
}

/// Decides whether `point` (in body coordinates) acts as a title bar.
pub fn title_hit_test(
    point: Point,
    size: Size,
    title_controls: Option<Rect>,
    controls: Option<&ControlsGeometry>,
) -> HitTest {
    if !Rect::from_size(size).contains(point) {
        return HitTest::None;
    }
    if title_controls.is_some_and(|rect| rect.contains(point)) {
        return HitTest::None;
    }
    let in_controls = controls.is_some_and(|c| {
        [c.settings, c.mute, c.hangup, c.members]
            .iter()
            .any(|rect| rect.contains(point))
    });
    if in_controls {
        HitTest::None
    } else {
        HitTest::MoveOrMaximize
    }
}

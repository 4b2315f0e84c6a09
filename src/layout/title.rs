//! Title label placement.
//!
//! On platforms where the panel draws its own title-bar buttons the native
//! window title is blanked and a label is drawn in the region left free by
//! those buttons. The label is centered on the panel when it fits there and
//! pushed against the region's edges otherwise.

use tracing::debug;

use super::Rect;

/// Label that substitutes the native window title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLabel {
    pub text: String,
    pub geometry: Rect,
    /// Clicks go through the label to the title area below it.
    pub transparent_for_mouse: bool,
    natural_width: i32,
}

impl TitleLabel {
    pub fn new(text: &str, natural_width: i32, height: i32) -> Self {
        Self {
            text: text.to_string(),
            geometry: Rect::new(0, 0, natural_width, height),
            transparent_for_mouse: false,
            natural_width,
        }
    }

    pub fn natural_width(&self) -> i32 {
        self.natural_width
    }

    pub fn height(&self) -> i32 {
        self.geometry.height
    }

    fn resize_to_width(&mut self, width: i32) {
        self.geometry.width = width;
    }

    fn move_to_left(&mut self, x: i32, y: i32) {
        self.geometry.x = x;
        self.geometry.y = y;
    }
}

/// Horizontal placement of a label of `natural_width` inside `reserved`:
/// returns `(left, width)`.
pub fn place_title(panel_width: i32, natural_width: i32, reserved: Rect) -> (i32, i32) {
    let from = (panel_width - natural_width) / 2;
    let left = reserved.left();
    if from >= left && from + natural_width <= reserved.right() {
        (from, natural_width)
    } else if reserved.width < natural_width {
        (left, reserved.width)
    } else if from < left {
        (left, natural_width)
    } else {
        (reserved.right() - natural_width, natural_width)
    }
}

/// Owns the title label and the native window title it replaces.
pub struct TitleLayout {
    text: String,
    natural_width: i32,
    height: i32,
    label: Option<TitleLabel>,
    native_title: String,
}

impl TitleLayout {
    pub fn new(text: &str, natural_width: i32, height: i32) -> Self {
        Self {
            text: text.to_string(),
            natural_width,
            height,
            label: None,
            native_title: text.to_string(),
        }
    }

    pub fn label(&self) -> Option<&TitleLabel> {
        self.label.as_ref()
    }

    pub fn native_title(&self) -> &str {
        &self.native_title
    }

    /// Recomputes the label after the panel or the title controls changed.
    pub fn refresh(&mut self, reserved: Option<Rect>, panel_width: i32, members_top: i32) {
        let Some(reserved) = reserved else {
            if self.label.take().is_some() {
                debug!("Title region gone, restoring native title");
            }
            self.native_title = self.text.clone();
            return;
        };

        let label = self.label.get_or_insert_with(|| {
            let mut label = TitleLabel::new(&self.text, self.natural_width, self.height);
            label.transparent_for_mouse = true;
            label
        });
        // An empty title would let the platform show the executable name.
        self.native_title = " ".to_string();

        let (left, width) = place_title(panel_width, label.natural_width(), reserved);
        let top = (members_top - label.height()) / 2;
        label.resize_to_width(width);
        label.move_to_left(left, top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_region_shrinks_label() {
        assert_eq!(place_title(800, 200, Rect::new(0, 0, 150, 30)), (0, 150));
    }

    #[test]
    fn test_centered_when_it_fits() {
        assert_eq!(place_title(800, 100, Rect::new(0, 0, 500, 30)), (350, 100));
    }

    #[test]
    fn test_left_anchored_when_center_is_left_of_region() {
        assert_eq!(place_title(800, 100, Rect::new(400, 0, 300, 30)), (400, 100));
    }

    #[test]
    fn test_right_aligned_when_center_overflows() {
        assert_eq!(place_title(800, 100, Rect::new(0, 0, 420, 30)), (320, 100));
    }

    #[test]
    fn test_exact_fit_is_centered() {
        assert_eq!(place_title(400, 100, Rect::new(150, 0, 100, 30)), (150, 100));
    }

    #[test]
    fn test_no_region_uses_native_title() {
        let mut layout = TitleLayout::new("Voice Chat", 80, 20);
        layout.refresh(None, 380, 40);
        assert!(layout.label().is_none());
        assert_eq!(layout.native_title(), "Voice Chat");
    }

    #[test]
    fn test_region_creates_transparent_label() {
        let mut layout = TitleLayout::new("Voice Chat", 80, 20);
        layout.refresh(Some(Rect::new(0, 0, 278, 21)), 380, 40);

        let label = layout.label().unwrap();
        assert!(label.transparent_for_mouse);
        assert_eq!(label.geometry, Rect::new(150, 10, 80, 20));
        assert_eq!(layout.native_title(), " ");
    }

    #[test]
    fn test_region_removed_destroys_label() {
        let mut layout = TitleLayout::new("Voice Chat", 80, 20);
        layout.refresh(Some(Rect::new(0, 0, 278, 21)), 380, 40);
        layout.refresh(None, 380, 40);
        assert!(layout.label().is_none());
        assert_eq!(layout.native_title(), "Voice Chat");
    }

    #[test]
    fn test_label_regains_natural_width() {
        let mut layout = TitleLayout::new("Voice Chat", 200, 20);
        layout.refresh(Some(Rect::new(0, 0, 150, 21)), 800, 40);
        assert_eq!(layout.label().unwrap().geometry.width, 150);

        layout.refresh(Some(Rect::new(0, 0, 600, 21)), 800, 40);
        assert_eq!(layout.label().unwrap().geometry, Rect::new(300, 10, 200, 20));
    }
}

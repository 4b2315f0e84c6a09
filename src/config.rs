//! Configuration for the call panel window and its controls.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable pointing at a JSON file overriding [`PanelConfig`].
pub const CONFIG_ENV: &str = "GROUP_CALL_PANEL_CONFIG";

/// How the platform draws the window title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStyle {
    /// Title-bar buttons drawn inside the panel body, leaving a reserved
    /// region to their left for the title label.
    CustomControls,
    /// Native title bar merged with the panel body.
    MacOs,
    /// Native title bar drawn by the window manager.
    Native,
}

impl TitleStyle {
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "windows") {
            TitleStyle::CustomControls
        } else if cfg!(target_os = "macos") {
            TitleStyle::MacOs
        } else {
            TitleStyle::Native
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub width: i32,
    pub height: i32,
    pub members_margin: Margins,
    pub members_width_max: i32,
    pub members_row_height: i32,
    pub mute_size: i32,
    pub mute_bottom_skip: i32,
    pub button_size: i32,
    pub button_bottom_skip: i32,
    pub button_skip: i32,
    pub title_button_width: i32,
    pub title_button_height: i32,
    pub title_char_width: i32,
    pub title_height: i32,
    pub title_style: TitleStyle,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 380,
            height: 520,
            members_margin: Margins {
                left: 16,
                top: 40,
                right: 16,
                bottom: 16,
            },
            members_width_max: 480,
            members_row_height: 56,
            mute_size: 112,
            mute_bottom_skip: 176,
            button_size: 68,
            button_bottom_skip: 108,
            button_skip: 40,
            title_button_width: 34,
            title_button_height: 21,
            title_char_width: 8,
            title_height: 20,
            title_style: TitleStyle::for_current_platform(),
        }
    }
}

impl PanelConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read panel config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse panel config {}", path.display()))
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults if unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Width of the title-bar buttons (minimize, maximize, close).
    pub fn title_controls_width(&self) -> i32 {
        3 * self.title_button_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 600, "title_style": "custom_controls" }}"#).unwrap();

        let config = PanelConfig::load(file.path()).unwrap();
        assert_eq!(config.width, 600);
        assert_eq!(config.height, PanelConfig::default().height);
        assert_eq!(config.title_style, TitleStyle::CustomControls);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = PanelConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse panel config"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = PanelConfig::load(Path::new("/nonexistent/panel.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read panel config"));
    }
}

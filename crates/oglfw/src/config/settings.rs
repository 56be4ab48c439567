//! Serialisable window settings

use serde::{Deserialize, Serialize};

use super::Config;
use crate::foundation::geometry::{Position, Size};
use crate::hints::{ContextConfig, WindowHints};

/// File-backed subset of a window's creation parameters
///
/// References to other live objects (sharing window, target monitor, event
/// handler) cannot be stored, so they are attached afterwards on the
/// [`WindowSpec`](crate::window::WindowSpec) built from these settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Content-area size, required for windowed mode
    pub size: Option<Size>,
    /// Initial position
    pub position: Option<Position>,
    /// Window and framebuffer hints
    pub hints: WindowHints,
    /// Rendering-context configuration
    pub context: ContextConfig,
}

impl Config for WindowSettings {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::hints::ClientApi;

    const TOML_SETTINGS: &str = r#"
title = "editor"

[size]
width = 1280
height = 720

[hints]
resizable = false

[context]
client_api = "NoApi"
"#;

    #[test]
    fn test_parse_toml_settings() {
        let settings = WindowSettings::from_str_with_format("window.toml", TOML_SETTINGS).unwrap();
        assert_eq!(settings.title, "editor");
        assert_eq!(settings.size, Some(Size::new(1280, 720)));
        assert_eq!(settings.position, None);
        assert_eq!(settings.hints.resizable, Some(false));
        assert_eq!(settings.context.client_api, Some(ClientApi::NoApi));
    }

    #[test]
    fn test_ron_settings_survive_save_and_load() {
        let settings = WindowSettings {
            title: "tools".to_string(),
            size: Some(Size::new(640, 480)),
            position: Some(Position::new(10, 20)),
            ..WindowSettings::default()
        };
        let text = settings.to_string_with_format("window.ron").unwrap();
        let parsed = WindowSettings::from_str_with_format("window.ron", &text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = WindowSettings::from_str_with_format("window.json", "{}");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}

//! Window, context and library initialization hints
//!
//! GLFW takes creation options as process-wide integer hints set right before
//! the creation call. Here they live in plain serialisable structs and are
//! flattened into `(key, value)` pairs when a window is about to be created.
//! Fields left as `None` keep the library default.

use serde::{Deserialize, Serialize};

const TRUE: i32 = 1;
const FALSE: i32 = 0;

const fn flag(value: bool) -> i32 {
    if value { TRUE } else { FALSE }
}

/// Window and framebuffer hint identifiers, valued as in `glfw3.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum HintKey {
    Focused,
    Resizable,
    Visible,
    Decorated,
    AutoIconify,
    Floating,
    Maximized,
    CenterCursor,
    TransparentFramebuffer,
    FocusOnShow,
    RedBits,
    GreenBits,
    BlueBits,
    AlphaBits,
    DepthBits,
    StencilBits,
    Samples,
    SrgbCapable,
    RefreshRate,
    Doublebuffer,
    ClientApi,
    ContextVersionMajor,
    ContextVersionMinor,
    OpenGlForwardCompat,
    ContextDebug,
    OpenGlProfile,
    ContextNoError,
    ContextCreationApi,
    ScaleToMonitor,
}

impl HintKey {
    /// Native hint code
    pub const fn code(self) -> i32 {
        match self {
            Self::Focused => 0x0002_0001,
            Self::Resizable => 0x0002_0003,
            Self::Visible => 0x0002_0004,
            Self::Decorated => 0x0002_0005,
            Self::AutoIconify => 0x0002_0006,
            Self::Floating => 0x0002_0007,
            Self::Maximized => 0x0002_0008,
            Self::CenterCursor => 0x0002_0009,
            Self::TransparentFramebuffer => 0x0002_000A,
            Self::FocusOnShow => 0x0002_000C,
            Self::RedBits => 0x0002_1001,
            Self::GreenBits => 0x0002_1002,
            Self::BlueBits => 0x0002_1003,
            Self::AlphaBits => 0x0002_1004,
            Self::DepthBits => 0x0002_1005,
            Self::StencilBits => 0x0002_1006,
            Self::Samples => 0x0002_100D,
            Self::SrgbCapable => 0x0002_100E,
            Self::RefreshRate => 0x0002_100F,
            Self::Doublebuffer => 0x0002_1010,
            Self::ClientApi => 0x0002_2001,
            Self::ContextVersionMajor => 0x0002_2002,
            Self::ContextVersionMinor => 0x0002_2003,
            Self::OpenGlForwardCompat => 0x0002_2006,
            Self::ContextDebug => 0x0002_2007,
            Self::OpenGlProfile => 0x0002_2008,
            Self::ContextNoError => 0x0002_200A,
            Self::ContextCreationApi => 0x0002_200B,
            Self::ScaleToMonitor => 0x0002_200C,
        }
    }
}

/// Window and framebuffer creation hints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowHints {
    /// User-resizable window
    pub resizable: Option<bool>,
    /// Initially visible
    pub visible: Option<bool>,
    /// Title bar and borders
    pub decorated: Option<bool>,
    /// Input focus on creation
    pub focused: Option<bool>,
    /// Iconify full-screen windows on focus loss
    pub auto_iconify: Option<bool>,
    /// Always on top
    pub floating: Option<bool>,
    /// Initially maximized
    pub maximized: Option<bool>,
    /// Center the cursor on full-screen windows
    pub center_cursor: Option<bool>,
    /// Transparent framebuffer
    pub transparent_framebuffer: Option<bool>,
    /// Take focus when shown
    pub focus_on_show: Option<bool>,
    /// Resize content area on content-scale changes
    pub scale_to_monitor: Option<bool>,
    /// Red channel depth
    pub red_bits: Option<i32>,
    /// Green channel depth
    pub green_bits: Option<i32>,
    /// Blue channel depth
    pub blue_bits: Option<i32>,
    /// Alpha channel depth
    pub alpha_bits: Option<i32>,
    /// Depth buffer depth
    pub depth_bits: Option<i32>,
    /// Stencil buffer depth
    pub stencil_bits: Option<i32>,
    /// MSAA sample count
    pub samples: Option<i32>,
    /// Full-screen refresh rate
    pub refresh_rate: Option<i32>,
    /// sRGB-capable framebuffer
    pub srgb_capable: Option<bool>,
    /// Double buffering
    pub doublebuffer: Option<bool>,
}

impl WindowHints {
    /// Flatten into native hint pairs, skipping unset fields
    pub fn to_pairs(&self) -> Vec<(HintKey, i32)> {
        let flags = [
            (HintKey::Resizable, self.resizable),
            (HintKey::Visible, self.visible),
            (HintKey::Decorated, self.decorated),
            (HintKey::Focused, self.focused),
            (HintKey::AutoIconify, self.auto_iconify),
            (HintKey::Floating, self.floating),
            (HintKey::Maximized, self.maximized),
            (HintKey::CenterCursor, self.center_cursor),
            (HintKey::TransparentFramebuffer, self.transparent_framebuffer),
            (HintKey::FocusOnShow, self.focus_on_show),
            (HintKey::ScaleToMonitor, self.scale_to_monitor),
            (HintKey::SrgbCapable, self.srgb_capable),
            (HintKey::Doublebuffer, self.doublebuffer),
        ];
        let values = [
            (HintKey::RedBits, self.red_bits),
            (HintKey::GreenBits, self.green_bits),
            (HintKey::BlueBits, self.blue_bits),
            (HintKey::AlphaBits, self.alpha_bits),
            (HintKey::DepthBits, self.depth_bits),
            (HintKey::StencilBits, self.stencil_bits),
            (HintKey::Samples, self.samples),
            (HintKey::RefreshRate, self.refresh_rate),
        ];

        flags
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, flag(v))))
            .chain(values.into_iter().filter_map(|(key, value)| value.map(|v| (key, v))))
            .collect()
    }
}

/// Client API the window's context is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientApi {
    /// No context, e.g. for Vulkan
    NoApi,
    /// Desktop OpenGL
    OpenGl,
    /// OpenGL ES
    OpenGlEs,
}

impl ClientApi {
    const fn value(self) -> i32 {
        match self {
            Self::NoApi => 0,
            Self::OpenGl => 0x0003_0001,
            Self::OpenGlEs => 0x0003_0002,
        }
    }
}

/// OpenGL profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenGlProfile {
    /// Let the driver pick
    Any,
    /// Core profile
    Core,
    /// Compatibility profile
    Compat,
}

impl OpenGlProfile {
    const fn value(self) -> i32 {
        match self {
            Self::Any => 0,
            Self::Core => 0x0003_2001,
            Self::Compat => 0x0003_2002,
        }
    }
}

/// API used to create the context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextCreationApi {
    /// WGL, NSGL, GLX or EGL depending on platform
    Native,
    /// EGL
    Egl,
    /// OSMesa
    OsMesa,
}

impl ContextCreationApi {
    const fn value(self) -> i32 {
        match self {
            Self::Native => 0x0003_6001,
            Self::Egl => 0x0003_6002,
            Self::OsMesa => 0x0003_6003,
        }
    }
}

/// Rendering-context configuration applied at window creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Client API
    pub client_api: Option<ClientApi>,
    /// Context creation API
    pub creation_api: Option<ContextCreationApi>,
    /// Requested (major, minor) version
    pub version: Option<(i32, i32)>,
    /// OpenGL profile
    pub opengl_profile: Option<OpenGlProfile>,
    /// Forward-compatible OpenGL context
    pub forward_compatible: Option<bool>,
    /// Debug context
    pub debug: Option<bool>,
    /// Context without error reporting
    pub no_error: Option<bool>,
}

impl ContextConfig {
    /// No client API, the usual choice for Vulkan renderers
    pub fn no_api() -> Self {
        Self {
            client_api: Some(ClientApi::NoApi),
            ..Self::default()
        }
    }

    /// Desktop OpenGL core profile of the given version
    pub fn opengl_core(major: i32, minor: i32) -> Self {
        Self {
            client_api: Some(ClientApi::OpenGl),
            version: Some((major, minor)),
            opengl_profile: Some(OpenGlProfile::Core),
            forward_compatible: Some(true),
            ..Self::default()
        }
    }

    /// Flatten into native hint pairs, skipping unset fields
    pub fn to_pairs(&self) -> Vec<(HintKey, i32)> {
        let mut pairs = Vec::new();
        if let Some(api) = self.client_api {
            pairs.push((HintKey::ClientApi, api.value()));
        }
        if let Some(api) = self.creation_api {
            pairs.push((HintKey::ContextCreationApi, api.value()));
        }
        if let Some((major, minor)) = self.version {
            pairs.push((HintKey::ContextVersionMajor, major));
            pairs.push((HintKey::ContextVersionMinor, minor));
        }
        if let Some(profile) = self.opengl_profile {
            pairs.push((HintKey::OpenGlProfile, profile.value()));
        }
        if let Some(v) = self.forward_compatible {
            pairs.push((HintKey::OpenGlForwardCompat, flag(v)));
        }
        if let Some(v) = self.debug {
            pairs.push((HintKey::ContextDebug, flag(v)));
        }
        if let Some(v) = self.no_error {
            pairs.push((HintKey::ContextNoError, flag(v)));
        }
        pairs
    }
}

/// One-time library initialization hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitHints {
    /// Expose joystick hats as buttons
    pub joystick_hat_buttons: bool,
    /// macOS: change directory to the bundle's resources
    pub cocoa_chdir_resources: bool,
    /// macOS: create a menu bar and dock icon
    pub cocoa_menubar: bool,
}

impl Default for InitHints {
    fn default() -> Self {
        Self {
            joystick_hat_buttons: true,
            cocoa_chdir_resources: true,
            cocoa_menubar: true,
        }
    }
}

impl InitHints {
    /// Native `(hint, value)` pairs that differ from the library defaults
    pub fn to_pairs(&self) -> Vec<(i32, i32)> {
        let toggles = [
            (0x0005_0001, self.joystick_hat_buttons),
            (0x0005_1001, self.cocoa_chdir_resources),
            (0x0005_1002, self.cocoa_menubar),
        ];
        toggles
            .into_iter()
            .filter(|(_, enabled)| !enabled)
            .map(|(hint, _)| (hint, FALSE))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_unset_hints_produce_no_pairs() {
        assert!(WindowHints::default().to_pairs().is_empty());
        assert!(ContextConfig::default().to_pairs().is_empty());
        assert!(InitHints::default().to_pairs().is_empty());
    }

    #[test]
    fn test_window_hint_pairs() {
        let hints = WindowHints {
            resizable: Some(false),
            samples: Some(4),
            ..WindowHints::default()
        };
        let pairs = hints.to_pairs();
        assert_eq!(pairs, vec![(HintKey::Resizable, 0), (HintKey::Samples, 4)]);
    }

    #[test]
    fn test_opengl_core_pairs() {
        let pairs = ContextConfig::opengl_core(4, 6).to_pairs();
        assert!(pairs.contains(&(HintKey::ClientApi, 0x0003_0001)));
        assert!(pairs.contains(&(HintKey::ContextVersionMajor, 4)));
        assert!(pairs.contains(&(HintKey::ContextVersionMinor, 6)));
        assert!(pairs.contains(&(HintKey::OpenGlProfile, 0x0003_2001)));
        assert!(pairs.contains(&(HintKey::OpenGlForwardCompat, 1)));
    }

    #[test]
    fn test_init_hints_only_emit_overrides() {
        let hints = InitHints {
            joystick_hat_buttons: false,
            cocoa_menubar: false,
            ..InitHints::default()
        };
        assert_eq!(hints.to_pairs(), vec![(0x0005_0001, 0), (0x0005_1002, 0)]);
    }

    #[test]
    fn test_init_hints_file_round_trip() {
        let hints = InitHints {
            cocoa_chdir_resources: false,
            ..InitHints::default()
        };
        for path in ["init.toml", "init.ron"] {
            let text = hints.to_string_with_format(path).unwrap();
            let parsed = InitHints::from_str_with_format(path, &text).unwrap();
            assert_eq!(parsed, hints);
        }

        // Missing keys keep the library defaults
        let sparse = InitHints::from_str_with_format("init.toml", "cocoa_menubar = false\n").unwrap();
        assert!(sparse.joystick_hat_buttons);
        assert!(!sparse.cocoa_menubar);
    }
}

//! Native windowing library seam
//!
//! Everything the object layer needs from the native library goes through the
//! [`Platform`] trait. Two implementations ship with the crate:
//!
//! - **`native`**: the real backend over `glfw::ffi` (feature `native`)
//! - **`headless`**: an in-memory backend with event simulation, used by tests
//!
//! Calls take `&self`: backends are single-threaded and use interior
//! mutability where they need state.

use std::ffi::c_void;
use std::num::NonZeroUsize;

use crate::error::PlatformError;
use crate::foundation::geometry::{ContentScale, FrameThickness, Position, Rect, Size};
use crate::hints::HintKey;
use crate::video::{GammaRamp, VideoMode};

#[cfg(feature = "native")]
pub mod native;
pub mod headless;

#[cfg(feature = "native")]
pub use native::GlfwPlatform;
pub use headless::{HeadlessPlatform, MonitorDescriptor};

macro_rules! native_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroUsize);

        impl $name {
            /// Wrap a native pointer, `None` if it is null
            pub fn from_ptr<T>(ptr: *mut T) -> Option<Self> {
                NonZeroUsize::new(ptr as usize).map(Self)
            }

            /// Wrap a raw identifier, `None` if it is zero
            pub fn from_raw(raw: usize) -> Option<Self> {
                NonZeroUsize::new(raw).map(Self)
            }

            /// The native pointer this handle stands for
            pub fn as_ptr<T>(self) -> *mut T {
                self.0.get() as *mut T
            }

            /// The raw identifier
            pub const fn raw(self) -> usize {
                self.0.get()
            }
        }
    };
}

native_handle!(
    /// Opaque native window handle
    WindowHandle
);

native_handle!(
    /// Opaque native monitor handle
    MonitorHandle
);

/// Monitor hot-plug notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// A display was connected
    Connected,
    /// A display was disconnected
    Disconnected,
}

/// Calls consumed from the native windowing library
///
/// Query calls on a handle the library no longer knows return neutral values;
/// the object layer never issues them for disconnected monitors or invalid
/// windows. Errors are not returned per call: the library records them and
/// [`Platform::take_error`] drains the last one.
pub trait Platform {
    /// Restore every window hint to its default
    fn default_window_hints(&self);

    /// Set one window hint for the next creation call
    fn window_hint(&self, hint: HintKey, value: i32);

    /// Allocate a window, full screen on `monitor` when given
    fn create_window(
        &self,
        size: Size,
        title: &str,
        monitor: Option<MonitorHandle>,
        share: Option<WindowHandle>,
    ) -> Option<WindowHandle>;

    /// Release a window
    fn destroy_window(&self, window: WindowHandle);

    /// Route close, move and resize events for `window` to [`crate::dispatch`]
    fn install_window_callbacks(&self, window: WindowHandle);

    /// Position of the content area
    fn window_position(&self, window: WindowHandle) -> Position;

    /// Move the content area, [`Position::UNSET`] centres it on the primary work area
    fn set_window_position(&self, window: WindowHandle, position: Position);

    /// Size of the content area
    fn window_size(&self, window: WindowHandle) -> Size;

    /// Push size limits, components may be [`DONT_CARE`](crate::foundation::geometry::DONT_CARE)
    fn set_window_size_limits(&self, window: WindowHandle, min: Size, max: Size);

    /// Make a window full screen on `monitor`, or windowed when `None`
    fn set_window_monitor(
        &self,
        window: WindowHandle,
        monitor: Option<MonitorHandle>,
        position: Position,
        size: Size,
        refresh_rate: i32,
    );

    /// Attach the embedder's opaque pointer
    fn set_window_user_pointer(&self, window: WindowHandle, pointer: *mut c_void);

    /// Read back the embedder's opaque pointer
    fn window_user_pointer(&self, window: WindowHandle) -> *mut c_void;

    /// Decoration extents
    fn window_frame_size(&self, window: WindowHandle) -> FrameThickness;

    /// Route hot-plug events to [`crate::dispatch`]
    fn install_monitor_callback(&self);

    /// Connected monitors, primary first
    fn monitors(&self) -> Vec<MonitorHandle>;

    /// Current video mode
    fn video_mode(&self, monitor: MonitorHandle) -> Option<VideoMode>;

    /// Supported video modes, ascending
    fn video_modes(&self, monitor: MonitorHandle) -> Vec<VideoMode>;

    /// Physical size in millimetres
    fn physical_size(&self, monitor: MonitorHandle) -> Size;

    /// Content scale
    fn content_scale(&self, monitor: MonitorHandle) -> ContentScale;

    /// Position on the virtual desktop
    fn monitor_position(&self, monitor: MonitorHandle) -> Position;

    /// Area not covered by task bars and menu bars
    fn work_area(&self, monitor: MonitorHandle) -> Rect;

    /// Human readable name
    fn monitor_name(&self, monitor: MonitorHandle) -> String;

    /// Current gamma ramp, `None` where the platform has none
    fn gamma_ramp(&self, monitor: MonitorHandle) -> Option<GammaRamp>;

    /// Apply a gamma ramp in one call
    fn set_gamma_ramp(&self, monitor: MonitorHandle, ramp: &GammaRamp);

    /// Generate and apply a ramp from an exponent
    fn set_gamma(&self, monitor: MonitorHandle, gamma: f32);

    /// Drain the last error recorded by the library
    fn take_error(&self) -> Option<PlatformError>;
}

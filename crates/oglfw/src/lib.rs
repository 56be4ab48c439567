//! # oglfw
//!
//! Owned windows and monitors on top of GLFW.
//!
//! ## Features
//!
//! - **Owned windows**: one [`Window`] per native handle, released on drop
//! - **Per-window events**: close, move and resize reach the owning window's handler
//! - **Monitor cache**: enumerated once, rebuilt after hot-plug
//! - **Gamma control**: validated ramps and exponent-generated curves
//! - **Headless backend**: the whole object layer runs without a display
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oglfw::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     oglfw::foundation::logging::init();
//!     let library = Library::glfw(&InitHints::default())?;
//!
//!     let window = library.create_window(
//!         WindowSpec::windowed(1280, 720)
//!             .with_title("Demo")
//!             .with_context(ContextConfig::no_api()),
//!     );
//!     if !window.is_ok() {
//!         return Err(window.creation_error().cloned().unwrap_or(WindowError::Invalid).into());
//!     }
//!
//!     if let Some(monitor) = library.monitors().primary() {
//!         monitor.set_gamma(1.0)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod foundation;
pub mod hints;
pub mod library;
pub mod monitor;
pub mod platform;
pub mod registry;
pub mod video;
pub mod window;

pub use error::{GammaError, InitError, MonitorError, PlatformError, WindowError};
pub use library::Library;
pub use monitor::{Monitor, Monitors};
pub use window::{Window, WindowEventHandler, WindowSpec};

/// Common imports
pub mod prelude {
    pub use crate::{
        Library,
        Monitor, Monitors,
        Window, WindowEventHandler, WindowSpec,
        config::{Config, WindowSettings},
        error::{GammaError, HandlerResult, InitError, MonitorError, PlatformError, WindowError},
        foundation::geometry::{ContentScale, FrameThickness, Position, Rect, Size, SizeLimits},
        hints::{ContextConfig, InitHints, WindowHints},
        platform::{MonitorHandle, Platform, WindowHandle},
        video::{GammaRamp, VideoMode},
    };
}

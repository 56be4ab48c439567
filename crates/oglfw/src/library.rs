//! Library session
//!
//! A [`Library`] ties one [`Platform`] backend to the registries that callback
//! dispatch resolves handles against. Creating one makes it the dispatch target
//! for the current thread; windows and monitors keep the session state alive
//! for as long as they exist.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "native")]
use crate::error::InitError;
use crate::error::PlatformError;
#[cfg(feature = "native")]
use crate::hints::InitHints;
use crate::monitor::Monitors;
use crate::platform::Platform;
use crate::registry::HandleRegistry;
use crate::window::{Window, WindowCore, WindowSpec};

pub(crate) struct LibraryState {
    pub(crate) platform: Rc<dyn Platform>,
    pub(crate) windows: RefCell<HandleRegistry<WindowCore>>,
    pub(crate) monitors: Monitors,
}

/// An initialized windowing session
pub struct Library {
    state: Rc<LibraryState>,
}

impl Library {
    /// Start a session over `platform`
    pub fn new(platform: Rc<dyn Platform>) -> Self {
        let state = Rc::new(LibraryState {
            platform: Rc::clone(&platform),
            windows: RefCell::new(HandleRegistry::new()),
            monitors: Monitors::new(Rc::clone(&platform)),
        });
        crate::dispatch::activate(&state);
        platform.install_monitor_callback();
        Self { state }
    }

    /// Initialize GLFW and start a session over it
    #[cfg(feature = "native")]
    pub fn glfw(hints: &InitHints) -> Result<Self, InitError> {
        let platform = crate::platform::GlfwPlatform::init(hints)?;
        log::info!("GLFW initialized");
        Ok(Self::new(Rc::new(platform)))
    }

    /// The monitor list
    pub fn monitors(&self) -> &Monitors {
        &self.state.monitors
    }

    /// Create a window, see [`Window::create`]
    pub fn create_window(&self, spec: WindowSpec<'_>) -> Window {
        Window::create(self, spec)
    }

    /// Restore every window hint to its default
    ///
    /// Creation always resets hints itself, this only matters to code that
    /// talks to the native library directly.
    pub fn reset_window_hints(&self) {
        self.state.platform.default_window_hints();
    }

    /// Drain the last error the native library recorded
    pub fn error_status(&self) -> Option<PlatformError> {
        self.state.platform.take_error()
    }

    /// Number of windows that currently own a native handle
    pub fn live_window_count(&self) -> usize {
        self.state.windows.borrow().len()
    }

    /// The backend this session runs on
    pub fn platform(&self) -> &Rc<dyn Platform> {
        &self.state.platform
    }

    pub(crate) fn state(&self) -> &Rc<LibraryState> {
        &self.state
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("live_windows", &self.live_window_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::logging;
    use crate::platform::{HeadlessPlatform, MonitorDescriptor};

    #[test]
    fn test_new_session_installs_monitor_callback() {
        logging::init_for_tests();
        let platform = Rc::new(HeadlessPlatform::new());
        let library = Library::new(platform.clone());
        assert!(library.monitors().is_empty());

        platform.connect_monitor(MonitorDescriptor::new("Late", 800, 600));
        assert_eq!(library.monitors().len(), 1);
    }

    #[test]
    fn test_error_status_drains() {
        logging::init_for_tests();
        let platform = Rc::new(HeadlessPlatform::new());
        let library = Library::new(platform.clone());
        platform.inject_error(PlatformError::new(PlatformError::PLATFORM_ERROR, "lost device"));

        let err = library.error_status().unwrap();
        assert_eq!(err.code, PlatformError::PLATFORM_ERROR);
        assert_eq!(library.error_status(), None);
    }

    #[test]
    fn test_reset_window_hints_reaches_platform() {
        logging::init_for_tests();
        let platform = Rc::new(HeadlessPlatform::new());
        let library = Library::new(platform.clone());
        let before = platform.default_hint_resets();
        library.reset_window_hints();
        assert_eq!(platform.default_hint_resets(), before + 1);
    }

    #[test]
    fn test_window_count_tracks_lifetimes() {
        logging::init_for_tests();
        let library = Library::new(Rc::new(HeadlessPlatform::new()));
        let first = library.create_window(WindowSpec::windowed(100, 100));
        let second = library.create_window(WindowSpec::windowed(100, 100));
        assert_eq!(library.live_window_count(), 2);
        drop(first);
        assert_eq!(library.live_window_count(), 1);
        drop(second);
        assert_eq!(library.live_window_count(), 0);
    }
}

//! Windows
//!
//! A [`Window`] owns exactly one native window handle for its whole life. All
//! creation options go through one aggregate, [`WindowSpec`], and one decision
//! table, [`plan_creation`], instead of one constructor per combination of
//! options.
//!
//! # Lifecycle
//!
//! ```text
//! Unconstructed ──create──▶ Live ──drop──▶ Destroyed
//!       │
//!       └──create refused or allocation failed──▶ Invalid
//! ```
//!
//! An invalid window never raises. Queries answer with sentinels
//! ([`Position::UNSET`], a zero [`Size`]) and mutators return
//! [`WindowError::Invalid`]. Check [`Window::is_ok`] when it matters.
//!
//! # Registration order
//!
//! Callbacks are installed right after allocation and before the window is
//! added to the registry, so an event arriving in between finds no owner and
//! is dropped. On drop the window leaves the registry before its handle is
//! released, so the registry only ever holds handles that are fully valid.

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::fmt;
use std::rc::Rc;

use log::{debug, error, trace, warn};

use crate::config::WindowSettings;
use crate::error::{HandlerResult, WindowError, WindowResult};
use crate::foundation::geometry::{FrameThickness, Position, Size, SizeLimits, DONT_CARE};
use crate::hints::{ContextConfig, HintKey, WindowHints};
use crate::library::{Library, LibraryState};
use crate::monitor::Monitor;
use crate::platform::{MonitorHandle, Platform, WindowHandle};
use crate::registry::NativeOwner;

/// Receives the events the native library reports for one window
///
/// Every method defaults to doing nothing. Errors are logged by the
/// dispatcher and never reach the native library.
pub trait WindowEventHandler {
    /// The user asked to close the window
    fn on_close(&mut self, _window: WindowHandle) -> HandlerResult {
        Ok(())
    }

    /// The window moved
    fn on_move(&mut self, _window: WindowHandle, _position: Position) -> HandlerResult {
        Ok(())
    }

    /// The window was resized
    fn on_resize(&mut self, _window: WindowHandle, _size: Size) -> HandlerResult {
        Ok(())
    }
}

struct IgnoreEvents;

impl WindowEventHandler for IgnoreEvents {}

/// Per-window state reachable from the dispatcher
pub(crate) struct WindowCore {
    handle: WindowHandle,
    close_requested: Cell<bool>,
    last_position: Cell<Option<Position>>,
    last_size: Cell<Option<Size>>,
    handler: RefCell<Box<dyn WindowEventHandler>>,
}

impl NativeOwner for WindowCore {
    type Handle = WindowHandle;

    fn native_handle(&self) -> WindowHandle {
        self.handle
    }
}

impl WindowCore {
    fn new(handle: WindowHandle, handler: Box<dyn WindowEventHandler>) -> Self {
        Self {
            handle,
            close_requested: Cell::new(false),
            last_position: Cell::new(None),
            last_size: Cell::new(None),
            handler: RefCell::new(handler),
        }
    }

    pub(crate) fn close_requested(&self) -> HandlerResult {
        self.close_requested.set(true);
        self.with_handler(|handler, window| handler.on_close(window))
    }

    pub(crate) fn moved(&self, position: Position) -> HandlerResult {
        self.last_position.set(Some(position));
        self.with_handler(|handler, window| handler.on_move(window, position))
    }

    pub(crate) fn resized(&self, size: Size) -> HandlerResult {
        self.last_size.set(Some(size));
        self.with_handler(|handler, window| handler.on_resize(window, size))
    }

    fn with_handler<F>(&self, f: F) -> HandlerResult
    where
        F: FnOnce(&mut dyn WindowEventHandler, WindowHandle) -> HandlerResult,
    {
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => f(handler.as_mut(), self.handle),
            Err(_) => {
                trace!("Handler for {:?} is already running, dropping nested event", self.handle);
                Ok(())
            }
        }
    }
}

/// Everything needed to create a window
///
/// Optional fields select the creation path: a target monitor means full
/// screen, a missing size on a full-screen window means "use the monitor's
/// current video mode".
pub struct WindowSpec<'a> {
    size: Option<Size>,
    title: String,
    share: Option<&'a Window>,
    monitor: Option<&'a Monitor>,
    position: Option<Position>,
    hints: WindowHints,
    context: ContextConfig,
    handler: Option<Box<dyn WindowEventHandler>>,
}

impl<'a> WindowSpec<'a> {
    fn empty() -> Self {
        Self {
            size: None,
            title: String::new(),
            share: None,
            monitor: None,
            position: None,
            hints: WindowHints::default(),
            context: ContextConfig::default(),
            handler: None,
        }
    }

    /// Windowed mode with the given content size
    pub fn windowed(width: i32, height: i32) -> Self {
        Self {
            size: Some(Size::new(width, height)),
            ..Self::empty()
        }
    }

    /// Full screen on `monitor` at its current video mode
    pub fn full_screen(monitor: &'a Monitor) -> Self {
        Self {
            monitor: Some(monitor),
            ..Self::empty()
        }
    }

    /// Start from file-backed settings
    pub fn from_settings(settings: &WindowSettings) -> Self {
        Self {
            size: settings.size,
            title: settings.title.clone(),
            position: settings.position,
            hints: settings.hints.clone(),
            context: settings.context.clone(),
            ..Self::empty()
        }
    }

    /// Set the content size
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Share context objects with `window`
    pub fn with_share(mut self, window: &'a Window) -> Self {
        self.share = Some(window);
        self
    }

    /// Create full screen on `monitor`
    pub fn with_monitor(mut self, monitor: &'a Monitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Initial position, windowed mode only
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    /// Window and framebuffer hints
    pub fn with_hints(mut self, hints: WindowHints) -> Self {
        self.hints = hints;
        self
    }

    /// Rendering-context configuration
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Receiver for this window's events
    pub fn with_handler(mut self, handler: impl WindowEventHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }
}

impl fmt::Debug for WindowSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowSpec")
            .field("size", &self.size)
            .field("title", &self.title)
            .field("share", &self.share.and_then(Window::get_handle))
            .field("monitor", &self.monitor)
            .field("position", &self.position)
            .field("hints", &self.hints)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Resolved arguments of the native creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationPlan {
    /// Content size
    pub size: Size,
    /// Title
    pub title: String,
    /// Full-screen target
    pub monitor: Option<MonitorHandle>,
    /// Context sharing partner
    pub share: Option<WindowHandle>,
    /// Explicit placement, applied right after allocation
    pub position: Option<Position>,
    /// Hints to apply, in order, after resetting to defaults
    pub hints: Vec<(HintKey, i32)>,
}

/// Decide how `spec` is created, or why it cannot be
///
/// | monitor          | size    | outcome                                        |
/// |------------------|---------|------------------------------------------------|
/// | unusable         | any     | `MonitorUnusable`                              |
/// | usable           | given   | full screen at that size                       |
/// | usable           | absent  | full screen at the current video mode          |
/// | usable, no mode  | absent  | `NoVideoMode`                                  |
/// | none             | given   | windowed, optional explicit position           |
/// | none             | absent  | `MissingSize`                                  |
///
/// A sharing window without a handle refuses every path with `InvalidShare`.
pub fn plan_creation(spec: &WindowSpec<'_>) -> WindowResult<CreationPlan> {
    let share = match spec.share {
        Some(window) => Some(window.get_handle().ok_or(WindowError::InvalidShare)?),
        None => None,
    };

    let mut hints = spec.hints.to_pairs();
    hints.extend(spec.context.to_pairs());

    let (size, monitor, position) = match spec.monitor {
        Some(monitor) => {
            let handle = monitor.get_handle().ok_or(WindowError::MonitorUnusable)?;
            let size = match spec.size {
                Some(size) => size,
                None => {
                    let mode = monitor.current_video_mode().ok_or(WindowError::NoVideoMode)?;
                    if spec.hints.refresh_rate.is_none() {
                        hints.push((HintKey::RefreshRate, mode.refresh_rate));
                    }
                    mode.size()
                }
            };
            if spec.position.is_some() {
                debug!("Ignoring explicit position for full-screen window");
            }
            (size, Some(handle), None)
        }
        None => {
            let size = spec.size.ok_or(WindowError::MissingSize)?;
            (size, None, spec.position)
        }
    };

    Ok(CreationPlan {
        size,
        title: spec.title.clone(),
        monitor,
        share,
        position,
        hints,
    })
}

/// An owned native window
pub struct Window {
    core: Option<Rc<WindowCore>>,
    limits: SizeLimits,
    creation_error: Option<WindowError>,
    state: Rc<LibraryState>,
}

impl Window {
    /// Create a window in `library`'s session
    ///
    /// Never fails loudly: a refused or failed creation yields an invalid
    /// window, see [`Window::creation_error`].
    pub fn create(library: &Library, spec: WindowSpec<'_>) -> Self {
        let state = Rc::clone(library.state());

        let plan = match plan_creation(&spec) {
            Ok(plan) => plan,
            Err(err) => {
                warn!("Window creation refused: {}", err);
                return Self::invalid(state, err);
            }
        };

        let platform = Rc::clone(&state.platform);
        drain_stale_error(platform.as_ref());
        platform.default_window_hints();
        for (hint, value) in &plan.hints {
            platform.window_hint(*hint, *value);
        }
        if let Some(err) = platform.take_error() {
            let err = WindowError::Platform(err);
            warn!("Window hints rejected, creation refused: {}", err);
            return Self::invalid(state, err);
        }

        let Some(handle) = platform.create_window(plan.size, &plan.title, plan.monitor, plan.share) else {
            let err = platform
                .take_error()
                .map_or(WindowError::AllocationFailed, WindowError::Platform);
            error!("Window allocation failed: {}", err);
            return Self::invalid(state, err);
        };

        if let Some(position) = plan.position {
            platform.set_window_position(handle, position);
            if let Some(err) = platform.take_error() {
                warn!("Could not place window {:?} at {:?}: {}", handle, position, err);
            }
        }

        platform.install_window_callbacks(handle);

        let handler = spec.handler.unwrap_or_else(|| Box::new(IgnoreEvents));
        let core = Rc::new(WindowCore::new(handle, handler));
        if !state.windows.borrow_mut().add(&core) {
            error!("Native handle {:?} is already owned, window left invalid", handle);
            platform.destroy_window(handle);
            return Self::invalid(state, WindowError::Invalid);
        }

        debug!(
            "Created window {:?} '{}' {}x{}{}",
            handle,
            plan.title,
            plan.size.width,
            plan.size.height,
            if plan.monitor.is_some() { " (full screen)" } else { "" }
        );

        Self {
            core: Some(core),
            limits: SizeLimits::UNBOUNDED,
            creation_error: None,
            state,
        }
    }

    fn invalid(state: Rc<LibraryState>, err: WindowError) -> Self {
        Self {
            core: None,
            limits: SizeLimits::UNBOUNDED,
            creation_error: Some(err),
            state,
        }
    }

    /// True while the window owns a native handle
    pub fn is_ok(&self) -> bool {
        self.core.is_some()
    }

    /// Native handle, `None` for an invalid window
    pub fn get_handle(&self) -> Option<WindowHandle> {
        self.core.as_ref().map(|core| core.handle)
    }

    /// Why creation was refused or failed
    pub fn creation_error(&self) -> Option<&WindowError> {
        self.creation_error.as_ref()
    }

    fn platform(&self) -> &dyn Platform {
        self.state.platform.as_ref()
    }

    fn live_handle(&self) -> WindowResult<WindowHandle> {
        self.get_handle().ok_or(WindowError::Invalid)
    }

    /// Run one native mutation and report the error it left behind, if any
    fn native_call<F>(&self, call: F) -> WindowResult<()>
    where
        F: FnOnce(&dyn Platform, WindowHandle),
    {
        let handle = self.live_handle()?;
        let platform = self.platform();
        drain_stale_error(platform);
        call(platform, handle);
        match platform.take_error() {
            Some(err) => Err(WindowError::Platform(err)),
            None => Ok(()),
        }
    }

    /// Current position, [`Position::UNSET`] for an invalid window
    pub fn get_position(&self) -> Position {
        self.get_handle()
            .map_or(Position::UNSET, |handle| self.platform().window_position(handle))
    }

    /// Current content size, zero for an invalid window
    pub fn get_size(&self) -> Size {
        self.get_handle()
            .map_or_else(Size::default, |handle| self.platform().window_size(handle))
    }

    /// Decoration extents, zero for an invalid window
    pub fn get_frame_thickness(&self) -> FrameThickness {
        self.get_handle()
            .map_or_else(FrameThickness::default, |handle| self.platform().window_frame_size(handle))
    }

    /// Move the content area
    pub fn set_position(&self, x: i32, y: i32) -> WindowResult<()> {
        self.native_call(|platform, handle| platform.set_window_position(handle, Position::new(x, y)))
    }

    /// Centre the window on the primary monitor's work area
    pub fn clear_position(&self) -> WindowResult<()> {
        self.native_call(|platform, handle| platform.set_window_position(handle, Position::UNSET))
    }

    /// Cached size limits
    pub fn size_limits(&self) -> SizeLimits {
        self.limits
    }

    fn push_limits(&mut self, limits: SizeLimits) -> WindowResult<()> {
        self.native_call(|platform, handle| platform.set_window_size_limits(handle, limits.min, limits.max))?;
        self.limits = limits;
        Ok(())
    }

    /// Set the minimum size, keeping the maximum
    pub fn set_min_size(&mut self, width: i32, height: i32) -> WindowResult<()> {
        let limits = SizeLimits {
            min: Size::new(width, height),
            ..self.limits
        };
        self.push_limits(limits)
    }

    /// Set the maximum size, keeping the minimum
    pub fn set_max_size(&mut self, width: i32, height: i32) -> WindowResult<()> {
        let limits = SizeLimits {
            max: Size::new(width, height),
            ..self.limits
        };
        self.push_limits(limits)
    }

    /// Set both bounds
    pub fn set_size_limits(&mut self, min_width: i32, min_height: i32, max_width: i32, max_height: i32) -> WindowResult<()> {
        self.push_limits(SizeLimits {
            min: Size::new(min_width, min_height),
            max: Size::new(max_width, max_height),
        })
    }

    /// Drop the minimum, keeping the maximum
    pub fn clear_min_size_limits(&mut self) -> WindowResult<()> {
        let limits = SizeLimits {
            min: Size::DONT_CARE,
            ..self.limits
        };
        self.push_limits(limits)
    }

    /// Drop the maximum, keeping the minimum
    pub fn clear_max_size_limits(&mut self) -> WindowResult<()> {
        let limits = SizeLimits {
            max: Size::DONT_CARE,
            ..self.limits
        };
        self.push_limits(limits)
    }

    /// Drop both bounds
    pub fn clear_size_limits(&mut self) -> WindowResult<()> {
        self.push_limits(SizeLimits::UNBOUNDED)
    }

    /// Go full screen on `monitor` at its current video mode
    pub fn set_full_screen(&self, monitor: &Monitor) -> WindowResult<()> {
        let mode = monitor.current_video_mode().ok_or(WindowError::NoVideoMode)?;
        self.set_full_screen_geometry(monitor, Position::new(0, 0), mode.size(), mode.refresh_rate)
    }

    /// Go full screen on `monitor` at its current resolution and `refresh_rate`
    pub fn set_full_screen_with_refresh(&self, monitor: &Monitor, refresh_rate: i32) -> WindowResult<()> {
        let mode = monitor.current_video_mode().ok_or(WindowError::NoVideoMode)?;
        self.set_full_screen_geometry(monitor, Position::new(0, 0), mode.size(), refresh_rate)
    }

    /// Go full screen on `monitor` with explicit geometry
    pub fn set_full_screen_geometry(
        &self,
        monitor: &Monitor,
        position: Position,
        size: Size,
        refresh_rate: i32,
    ) -> WindowResult<()> {
        self.live_handle()?;
        let monitor_handle = monitor.get_handle().ok_or(WindowError::MonitorUnusable)?;
        self.native_call(|platform, handle| {
            platform.set_window_monitor(handle, Some(monitor_handle), position, size, refresh_rate);
        })
    }

    /// Leave full screen, placing the content area at `position` with `size`
    pub fn set_windowed(&self, position: Position, size: Size) -> WindowResult<()> {
        self.native_call(|platform, handle| {
            platform.set_window_monitor(handle, None, position, size, DONT_CARE);
        })
    }

    /// Attach an opaque pointer for the embedding application
    ///
    /// Unrelated to the registry used for event dispatch.
    pub fn set_user_pointer(&self, pointer: *mut c_void) -> WindowResult<()> {
        self.native_call(|platform, handle| platform.set_window_user_pointer(handle, pointer))
    }

    /// The embedder's pointer, null for an invalid window
    pub fn user_pointer(&self) -> *mut c_void {
        self.get_handle()
            .map_or(std::ptr::null_mut(), |handle| self.platform().window_user_pointer(handle))
    }

    /// True once the user asked to close this window
    pub fn is_close_requested(&self) -> bool {
        self.core.as_ref().is_some_and(|core| core.close_requested.get())
    }

    /// Position reported by the last move event
    pub fn last_reported_position(&self) -> Option<Position> {
        self.core.as_ref().and_then(|core| core.last_position.get())
    }

    /// Size reported by the last resize event
    pub fn last_reported_size(&self) -> Option<Size> {
        self.core.as_ref().and_then(|core| core.last_size.get())
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Some(core) = self.core.take() {
            let handle = core.handle;
            self.state.windows.borrow_mut().remove(handle);
            drop(core);
            self.state.platform.destroy_window(handle);
            debug!("Destroyed window {:?}", handle);
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("handle", &self.get_handle())
            .field("limits", &self.limits)
            .field("creation_error", &self.creation_error)
            .finish_non_exhaustive()
    }
}

fn drain_stale_error(platform: &dyn Platform) {
    if let Some(stale) = platform.take_error() {
        debug!("Discarding earlier platform error: {}", stale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;
    use crate::foundation::logging;
    use crate::platform::{HeadlessPlatform, MonitorDescriptor};

    fn setup() -> (Rc<HeadlessPlatform>, Library) {
        logging::init_for_tests();
        let platform = Rc::new(HeadlessPlatform::new());
        platform.connect_monitor(MonitorDescriptor::new("Primary", 1920, 1080));
        platform.connect_monitor(
            MonitorDescriptor::new("Side", 2560, 1440).with_position(Position::new(1920, 0)),
        );
        let library = Library::new(platform.clone());
        (platform, library)
    }

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl WindowEventHandler for Recorder {
        fn on_close(&mut self, _window: WindowHandle) -> HandlerResult {
            self.events.borrow_mut().push("close".to_string());
            Ok(())
        }

        fn on_move(&mut self, _window: WindowHandle, position: Position) -> HandlerResult {
            self.events.borrow_mut().push(format!("move {} {}", position.x, position.y));
            Ok(())
        }

        fn on_resize(&mut self, _window: WindowHandle, _size: Size) -> HandlerResult {
            Err("resize rejected".into())
        }
    }

    #[test]
    fn test_live_window_is_registered() {
        let (platform, library) = setup();
        let window = library.create_window(WindowSpec::windowed(800, 600).with_title("main"));

        assert!(window.is_ok());
        let handle = window.get_handle().unwrap();
        assert_eq!(library.live_window_count(), 1);
        assert_eq!(window.get_size(), Size::new(800, 600));
        assert_eq!(platform.window(handle).unwrap().title, "main");
        assert!(platform.window(handle).unwrap().callbacks_installed);
        assert!(window.size_limits().is_unbounded());
    }

    #[test]
    fn test_dropped_window_leaves_registry() {
        let (platform, library) = setup();
        let window = library.create_window(WindowSpec::windowed(320, 240));
        let handle = window.get_handle().unwrap();
        drop(window);

        assert_eq!(library.live_window_count(), 0);
        assert!(library.state().windows.borrow().find(handle).is_none());
        assert!(platform.window(handle).is_none());
    }

    #[test]
    fn test_disconnected_monitor_yields_invalid_window() {
        let (platform, library) = setup();
        let side = library.monitors().get(1).unwrap();
        platform.disconnect_monitor(side.get_handle().unwrap());
        let allocations = platform.allocation_count();

        let window = library.create_window(WindowSpec::full_screen(&side));

        assert!(!window.is_ok());
        assert_eq!(window.get_handle(), None);
        assert_eq!(window.creation_error(), Some(&WindowError::MonitorUnusable));
        assert_eq!(platform.allocation_count(), allocations);
        assert_eq!(library.live_window_count(), 0);
    }

    #[test]
    fn test_invalid_window_operations_are_noops() {
        let (platform, library) = setup();
        platform.fail_next_window_creation();
        let mut window = library.create_window(WindowSpec::windowed(640, 480));

        assert!(!window.is_ok());
        assert!(matches!(window.creation_error(), Some(WindowError::Platform(_))));
        assert_eq!(window.get_position(), Position::UNSET);
        assert_eq!(window.get_size(), Size::default());
        assert_eq!(window.get_frame_thickness(), FrameThickness::default());
        assert_eq!(window.set_position(1, 1), Err(WindowError::Invalid));
        assert_eq!(window.set_min_size(10, 10), Err(WindowError::Invalid));
        assert!(window.size_limits().is_unbounded());
        assert!(window.user_pointer().is_null());
        assert!(!window.is_close_requested());
    }

    #[test]
    fn test_full_screen_creation_uses_current_mode() {
        let (platform, library) = setup();
        let primary = library.monitors().primary().unwrap();
        let window = library.create_window(WindowSpec::full_screen(&primary));

        let native = platform.window(window.get_handle().unwrap()).unwrap();
        assert_eq!(native.size, Size::new(1920, 1080));
        assert_eq!(native.monitor, primary.get_handle());
        assert!(native.hints.contains(&(HintKey::RefreshRate, 60)));
    }

    #[test]
    fn test_plan_creation_decision_table() {
        let (_platform, library) = setup();
        let primary = library.monitors().primary().unwrap();

        assert_eq!(plan_creation(&WindowSpec::empty()), Err(WindowError::MissingSize));

        let plan = plan_creation(&WindowSpec::windowed(100, 50).with_position(5, 6)).unwrap();
        assert_eq!(plan.monitor, None);
        assert_eq!(plan.position, Some(Position::new(5, 6)));

        let plan = plan_creation(&WindowSpec::full_screen(&primary).with_size(800, 600).with_position(5, 6)).unwrap();
        assert_eq!(plan.size, Size::new(800, 600));
        assert_eq!(plan.monitor, primary.get_handle());
        assert_eq!(plan.position, None);
        assert!(!plan.hints.iter().any(|(key, _)| *key == HintKey::RefreshRate));
    }

    #[test]
    fn test_invalid_share_refused() {
        let (platform, library) = setup();
        platform.fail_next_window_creation();
        let broken = library.create_window(WindowSpec::windowed(10, 10));
        let window = library.create_window(WindowSpec::windowed(10, 10).with_share(&broken));
        assert_eq!(window.creation_error(), Some(&WindowError::InvalidShare));

        let first = library.create_window(WindowSpec::windowed(10, 10));
        let shared = library.create_window(WindowSpec::windowed(10, 10).with_share(&first));
        let native = platform.window(shared.get_handle().unwrap()).unwrap();
        assert_eq!(native.share, first.get_handle());
    }

    #[test]
    fn test_hints_reset_then_applied() {
        let (platform, library) = setup();
        let hints = WindowHints {
            resizable: Some(false),
            ..WindowHints::default()
        };
        let first = library.create_window(
            WindowSpec::windowed(10, 10)
                .with_hints(hints)
                .with_context(ContextConfig::no_api()),
        );
        let second = library.create_window(WindowSpec::windowed(10, 10));

        let first_hints = platform.window(first.get_handle().unwrap()).unwrap().hints;
        assert!(first_hints.contains(&(HintKey::Resizable, 0)));
        assert!(first_hints.contains(&(HintKey::ClientApi, 0)));
        // Hints of one window never leak into the next creation
        assert!(platform.window(second.get_handle().unwrap()).unwrap().hints.is_empty());
    }

    #[test]
    fn test_clearing_min_keeps_max() {
        let (platform, library) = setup();
        let mut window = library.create_window(WindowSpec::windowed(400, 300));
        let handle = window.get_handle().unwrap();

        window.set_max_size(1000, 800).unwrap();
        window.set_min_size(50, 50).unwrap();
        assert_eq!(platform.window(handle).unwrap().min_size, Size::new(50, 50));
        assert_eq!(platform.window(handle).unwrap().max_size, Size::new(1000, 800));

        window.clear_min_size_limits().unwrap();
        assert_eq!(window.size_limits().min, Size::DONT_CARE);
        assert_eq!(window.size_limits().max, Size::new(1000, 800));
        assert_eq!(platform.window(handle).unwrap().min_size, Size::DONT_CARE);
        assert_eq!(platform.window(handle).unwrap().max_size, Size::new(1000, 800));

        window.set_size_limits(10, 10, 20, 20).unwrap();
        window.clear_max_size_limits().unwrap();
        assert_eq!(window.size_limits().min, Size::new(10, 10));
        assert_eq!(window.size_limits().max, Size::DONT_CARE);

        window.clear_size_limits().unwrap();
        assert!(window.size_limits().is_unbounded());
    }

    #[test]
    fn test_rejected_limits_report_platform_error() {
        let (_platform, library) = setup();
        let mut window = library.create_window(WindowSpec::windowed(400, 300));
        window.set_max_size(100, 100).unwrap();

        let result = window.set_min_size(200, 200);
        assert!(matches!(
            result,
            Err(WindowError::Platform(PlatformError { code: PlatformError::INVALID_VALUE, .. }))
        ));
        // A rejected change leaves the cached limits untouched
        assert_eq!(window.size_limits().min, Size::DONT_CARE);
        assert_eq!(window.size_limits().max, Size::new(100, 100));
    }

    #[test]
    fn test_position_round_trip_and_clear() {
        let (_platform, library) = setup();
        let window = library.create_window(WindowSpec::windowed(400, 300).with_position(30, 40));
        assert_eq!(window.get_position(), Position::new(30, 40));

        window.set_position(100, 200).unwrap();
        assert_eq!(window.get_position(), Position::new(100, 200));

        // Back to the centre of the primary work area (1920x1040)
        window.clear_position().unwrap();
        assert_eq!(window.get_position(), Position::new(760, 370));
    }

    #[test]
    fn test_window_without_position_is_centred() {
        let (_platform, library) = setup();
        let window = library.create_window(WindowSpec::windowed(400, 300));
        assert_eq!(window.get_position(), Position::new(760, 370));
    }

    #[test]
    fn test_rejected_hint_refuses_creation() {
        let (platform, library) = setup();
        platform.reject_hint(HintKey::Floating);
        let allocations = platform.allocation_count();
        let hints = WindowHints {
            floating: Some(true),
            ..WindowHints::default()
        };

        let window = library.create_window(WindowSpec::windowed(400, 300).with_hints(hints));

        assert!(!window.is_ok());
        assert!(matches!(
            window.creation_error(),
            Some(WindowError::Platform(PlatformError { code: PlatformError::INVALID_ENUM, .. }))
        ));
        assert_eq!(platform.allocation_count(), allocations);
        assert_eq!(library.live_window_count(), 0);

        // Hints the library knows still create normally
        assert!(library.create_window(WindowSpec::windowed(400, 300)).is_ok());
    }

    #[test]
    fn test_set_full_screen_applies_current_mode() {
        let (platform, library) = setup();
        let side = library.monitors().get(1).unwrap();
        let window = library.create_window(WindowSpec::windowed(400, 300));
        let handle = window.get_handle().unwrap();

        window.set_full_screen(&side).unwrap();
        let native = platform.window(handle).unwrap();
        let mode = side.current_video_mode().unwrap();
        assert_eq!(native.monitor, side.get_handle());
        assert_eq!(native.size, mode.size());
        assert_eq!(native.refresh_rate, mode.refresh_rate);

        window.set_full_screen_with_refresh(&side, 30).unwrap();
        assert_eq!(platform.window(handle).unwrap().refresh_rate, 30);

        window.set_windowed(Position::new(10, 10), Size::new(640, 480)).unwrap();
        let native = platform.window(handle).unwrap();
        assert_eq!(native.monitor, None);
        assert_eq!(native.size, Size::new(640, 480));
    }

    #[test]
    fn test_set_full_screen_on_unusable_monitor_fails() {
        let (platform, library) = setup();
        let side = library.monitors().get(1).unwrap();
        let window = library.create_window(WindowSpec::windowed(400, 300));
        platform.disconnect_monitor(side.get_handle().unwrap());

        assert_eq!(window.set_full_screen(&side), Err(WindowError::MonitorUnusable));
        assert_eq!(platform.window(window.get_handle().unwrap()).unwrap().monitor, None);
    }

    #[test]
    fn test_user_pointer_independent_of_dispatch() {
        let (platform, library) = setup();
        let mut payload = 17_u64;
        let pointer: *mut c_void = std::ptr::addr_of_mut!(payload).cast();
        let window = library.create_window(WindowSpec::windowed(400, 300));

        window.set_user_pointer(pointer).unwrap();
        assert_eq!(window.user_pointer(), pointer);

        platform.request_close(window.get_handle().unwrap());
        assert!(window.is_close_requested());
    }

    #[test]
    fn test_events_reach_their_own_window() {
        let (platform, library) = setup();
        let events = Rc::new(RefCell::new(Vec::new()));
        let watched = library.create_window(
            WindowSpec::windowed(400, 300).with_handler(Recorder { events: Rc::clone(&events) }),
        );
        let other = library.create_window(WindowSpec::windowed(400, 300));

        platform.move_window(watched.get_handle().unwrap(), Position::new(7, 8));
        platform.request_close(other.get_handle().unwrap());
        platform.resize_window(watched.get_handle().unwrap(), Size::new(500, 400));

        assert_eq!(*events.borrow(), vec!["move 7 8".to_string()]);
        assert_eq!(watched.last_reported_position(), Some(Position::new(7, 8)));
        // The failing resize handler is absorbed, the state still updates
        assert_eq!(watched.last_reported_size(), Some(Size::new(500, 400)));
        assert!(!watched.is_close_requested());
        assert!(other.is_close_requested());
    }

    struct Mirror {
        platform: Rc<HeadlessPlatform>,
        calls: Rc<Cell<usize>>,
    }

    impl WindowEventHandler for Mirror {
        fn on_move(&mut self, window: WindowHandle, position: Position) -> HandlerResult {
            self.calls.set(self.calls.get() + 1);
            // Moving from inside the handler raises a nested move for the same window
            self.platform.move_window(window, Position::new(position.y, position.x));
            Ok(())
        }
    }

    #[test]
    fn test_nested_event_for_running_handler_is_dropped() {
        let (platform, library) = setup();
        let calls = Rc::new(Cell::new(0));
        let window = library.create_window(WindowSpec::windowed(400, 300).with_handler(Mirror {
            platform: Rc::clone(&platform),
            calls: Rc::clone(&calls),
        }));
        let handle = window.get_handle().unwrap();

        platform.move_window(handle, Position::new(1, 2));

        assert_eq!(calls.get(), 1);
        assert_eq!(platform.window_position(handle), Position::new(2, 1));
        assert_eq!(window.last_reported_position(), Some(Position::new(2, 1)));
        assert!(window.is_ok());
        assert_eq!(library.live_window_count(), 1);
    }

    #[test]
    fn test_monitor_without_mode_refuses_full_screen() {
        let (platform, library) = setup();
        platform.connect_monitor(MonitorDescriptor::new("Broken", 800, 600).with_modes(Vec::new()));
        let broken = library.monitors().get(2).unwrap();
        assert!(broken.current_video_mode().is_none());

        let window = library.create_window(WindowSpec::full_screen(&broken));
        assert_eq!(window.creation_error(), Some(&WindowError::NoVideoMode));

        // An explicit size does not need the current mode
        let sized = library.create_window(WindowSpec::full_screen(&broken).with_size(800, 600));
        assert!(sized.is_ok());
    }

    #[test]
    fn test_create_from_settings() {
        let (platform, library) = setup();
        let settings = WindowSettings {
            title: "from file".to_string(),
            size: Some(Size::new(1024, 768)),
            position: Some(Position::new(12, 34)),
            ..WindowSettings::default()
        };
        let window = library.create_window(WindowSpec::from_settings(&settings));

        let native = platform.window(window.get_handle().unwrap()).unwrap();
        assert_eq!(native.title, "from file");
        assert_eq!(native.size, Size::new(1024, 768));
        assert_eq!(native.position, Position::new(12, 34));

        let incomplete = library.create_window(WindowSpec::from_settings(&WindowSettings::default()));
        assert_eq!(incomplete.creation_error(), Some(&WindowError::MissingSize));
    }

    #[test]
    fn test_frame_thickness_for_live_window() {
        let (_platform, library) = setup();
        let window = library.create_window(WindowSpec::windowed(400, 300));
        let frame = window.get_frame_thickness();
        assert!(frame.top >= frame.bottom);
    }
}

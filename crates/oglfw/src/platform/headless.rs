//! In-memory platform
//!
//! Behaves like a small, well-mannered windowing system: it keeps window and
//! monitor state in memory, records errors the way the native library does and
//! fires hot-plug and window events through [`crate::dispatch`] when asked to
//! simulate them. Introspection methods expose what the object layer pushed
//! down, so tests can check native-side effects without a display.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::c_void;
use std::num::NonZeroUsize;

use log::trace;

use super::{MonitorEvent, MonitorHandle, Platform, WindowHandle};
use crate::dispatch;
use crate::error::PlatformError;
use crate::foundation::geometry::{ContentScale, FrameThickness, Position, Rect, Size, DONT_CARE};
use crate::hints::HintKey;
use crate::video::{GammaRamp, VideoMode};

const FIRST_HANDLE: NonZeroUsize = match NonZeroUsize::new(0x1000) {
    Some(handle) => handle,
    None => unreachable!(),
};
const HANDLE_STRIDE: usize = 0x10;
const DEFAULT_GAMMA_SIZE: usize = 256;
const TASK_BAR_HEIGHT: i32 = 40;
const TITLE_BAR_HEIGHT: i32 = 30;
const BORDER: i32 = 1;

/// Where windows land when nobody picks a position and no monitor is plugged in
pub const DEFAULT_PLACEMENT: Position = Position::new(0, 0);

/// A simulated display
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorDescriptor {
    /// Human readable name
    pub name: String,
    /// Position on the virtual desktop
    pub position: Position,
    /// Physical size in millimetres
    pub physical_size: Size,
    /// Supported modes, ascending
    pub video_modes: Vec<VideoMode>,
    /// Index of the current mode in `video_modes`
    pub current_mode: usize,
    /// Content scale
    pub content_scale: ContentScale,
    /// Explicit work area, derived from the current mode when `None`
    pub work_area: Option<Rect>,
    /// Gamma ramp, `None` for a platform without gamma support
    pub gamma_ramp: Option<GammaRamp>,
}

fn mode(width: i32, height: i32) -> VideoMode {
    VideoMode {
        width,
        height,
        red_bits: 8,
        green_bits: 8,
        blue_bits: 8,
        refresh_rate: 60,
    }
}

impl MonitorDescriptor {
    /// A 60 Hz display whose native mode is `width`x`height`
    ///
    /// Also supports 640x480, so there is always a second mode to switch to.
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        let mut video_modes = vec![mode(640, 480)];
        if (width, height) != (640, 480) {
            video_modes.push(mode(width, height));
        }
        Self {
            name: name.into(),
            position: Position::new(0, 0),
            // Roughly 96 dpi
            physical_size: Size::new((width * 254 / 960).max(1), (height * 254 / 960).max(1)),
            current_mode: video_modes.len() - 1,
            video_modes,
            content_scale: ContentScale::default(),
            work_area: None,
            gamma_ramp: GammaRamp::linear(DEFAULT_GAMMA_SIZE).ok(),
        }
    }

    /// Place the display on the virtual desktop
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the content scale
    pub fn with_content_scale(mut self, scale: ContentScale) -> Self {
        self.content_scale = scale;
        self
    }

    /// Set an explicit work area
    pub fn with_work_area(mut self, area: Rect) -> Self {
        self.work_area = Some(area);
        self
    }

    /// Simulate a platform without gamma ramps
    pub fn without_gamma(mut self) -> Self {
        self.gamma_ramp = None;
        self
    }

    /// Replace the mode list, the last mode becomes current
    pub fn with_modes(mut self, modes: Vec<VideoMode>) -> Self {
        self.current_mode = modes.len().saturating_sub(1);
        self.video_modes = modes;
        self
    }

    fn current(&self) -> Option<VideoMode> {
        self.video_modes.get(self.current_mode).copied()
    }

    fn derived_work_area(&self) -> Rect {
        self.work_area.unwrap_or_else(|| {
            let size = self.current().map(|m| m.size()).unwrap_or_default();
            Rect {
                position: self.position,
                size: Size::new(size.width, (size.height - TASK_BAR_HEIGHT).max(0)),
            }
        })
    }
}

/// Everything the headless platform knows about one window
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindowState {
    /// Title
    pub title: String,
    /// Content-area position
    pub position: Position,
    /// Content-area size
    pub size: Size,
    /// Minimum size pushed by the object layer
    pub min_size: Size,
    /// Maximum size pushed by the object layer
    pub max_size: Size,
    /// Full-screen monitor
    pub monitor: Option<MonitorHandle>,
    /// Context sharing partner
    pub share: Option<WindowHandle>,
    /// Full-screen refresh rate, [`DONT_CARE`] when windowed
    pub refresh_rate: i32,
    /// Embedder pointer
    pub user_pointer: *mut c_void,
    /// Hints in effect at creation, in the order they were set
    pub hints: Vec<(HintKey, i32)>,
    /// Whether event callbacks were installed
    pub callbacks_installed: bool,
}

impl HeadlessWindowState {
    fn hint(&self, key: HintKey) -> Option<i32> {
        self.hints.iter().rev().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

#[derive(Default)]
struct HeadlessState {
    handles_issued: usize,
    monitors: Vec<(MonitorHandle, MonitorDescriptor)>,
    windows: BTreeMap<WindowHandle, HeadlessWindowState>,
    pending_hints: Vec<(HintKey, i32)>,
    default_hint_resets: usize,
    allocations: usize,
    fail_next_window: bool,
    rejected_hints: Vec<HintKey>,
    monitor_callback: bool,
    error: Option<PlatformError>,
}

impl HeadlessState {
    fn allocate(&mut self) -> NonZeroUsize {
        let handle = FIRST_HANDLE.saturating_add(self.handles_issued * HANDLE_STRIDE);
        self.handles_issued += 1;
        handle
    }

    fn record(&mut self, code: i32, description: &str) {
        trace!("Headless platform error {:#x}: {}", code, description);
        self.error = Some(PlatformError::new(code, description));
    }

    fn monitor(&self, handle: MonitorHandle) -> Option<&MonitorDescriptor> {
        self.monitors.iter().find(|(h, _)| *h == handle).map(|(_, d)| d)
    }

    fn monitor_mut(&mut self, handle: MonitorHandle) -> Option<&mut MonitorDescriptor> {
        self.monitors.iter_mut().find(|(h, _)| *h == handle).map(|(_, d)| d)
    }

    /// Centre of the first monitor's work area
    fn placement(&self, size: Size) -> Position {
        self.monitors
            .first()
            .map_or(DEFAULT_PLACEMENT, |(_, d)| d.derived_work_area().centered(size))
    }
}

/// Windowing system simulated in memory
#[derive(Default)]
pub struct HeadlessPlatform {
    state: RefCell<HeadlessState>,
}

impl HeadlessPlatform {
    /// A desktop with no monitors and no windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug in a display
    pub fn connect_monitor(&self, descriptor: MonitorDescriptor) -> MonitorHandle {
        let (handle, notify) = {
            let mut state = self.state.borrow_mut();
            let handle = MonitorHandle(state.allocate());
            state.monitors.push((handle, descriptor));
            (handle, state.monitor_callback)
        };
        if notify {
            dispatch::monitor_event(handle, MonitorEvent::Connected);
        }
        handle
    }

    /// Unplug a display, full-screen windows on it fall back to windowed
    pub fn disconnect_monitor(&self, handle: MonitorHandle) -> bool {
        let notify = {
            let mut state = self.state.borrow_mut();
            let before = state.monitors.len();
            state.monitors.retain(|(h, _)| *h != handle);
            if state.monitors.len() == before {
                return false;
            }
            for window in state.windows.values_mut().filter(|w| w.monitor == Some(handle)) {
                window.monitor = None;
                window.refresh_rate = DONT_CARE;
            }
            state.monitor_callback
        };
        if notify {
            dispatch::monitor_event(handle, MonitorEvent::Disconnected);
        }
        true
    }

    /// Switch a display to another of its modes without notifying anyone
    pub fn set_current_mode(&self, handle: MonitorHandle, index: usize) -> bool {
        let mut state = self.state.borrow_mut();
        match state.monitor_mut(handle) {
            Some(monitor) if index < monitor.video_modes.len() => {
                monitor.current_mode = index;
                true
            }
            _ => false,
        }
    }

    /// Simulate the user clicking the close button
    pub fn request_close(&self, window: WindowHandle) {
        if self.callbacks_installed(window) {
            dispatch::window_close_requested(window);
        }
    }

    /// Simulate the user dragging a window
    pub fn move_window(&self, window: WindowHandle, position: Position) {
        if let Some(native) = self.state.borrow_mut().windows.get_mut(&window) {
            native.position = position;
        }
        if self.callbacks_installed(window) {
            dispatch::window_moved(window, position);
        }
    }

    /// Simulate the user resizing a window
    pub fn resize_window(&self, window: WindowHandle, size: Size) {
        if let Some(native) = self.state.borrow_mut().windows.get_mut(&window) {
            native.size = size;
        }
        if self.callbacks_installed(window) {
            dispatch::window_resized(window, size);
        }
    }

    /// Make the next window allocation fail
    pub fn fail_next_window_creation(&self) {
        self.state.borrow_mut().fail_next_window = true;
    }

    /// Treat `hint` like a library version that does not know it
    pub fn reject_hint(&self, hint: HintKey) {
        self.state.borrow_mut().rejected_hints.push(hint);
    }

    /// Record an error as if a native call had failed
    pub fn inject_error(&self, error: PlatformError) {
        self.state.borrow_mut().error = Some(error);
    }

    /// Snapshot of a live window
    pub fn window(&self, window: WindowHandle) -> Option<HeadlessWindowState> {
        self.state.borrow().windows.get(&window).cloned()
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.state.borrow().windows.len()
    }

    /// Number of successful window allocations so far
    pub fn allocation_count(&self) -> usize {
        self.state.borrow().allocations
    }

    /// Number of times hints were reset to their defaults
    pub fn default_hint_resets(&self) -> usize {
        self.state.borrow().default_hint_resets
    }

    /// Number of connected monitors
    pub fn monitor_count(&self) -> usize {
        self.state.borrow().monitors.len()
    }

    fn callbacks_installed(&self, window: WindowHandle) -> bool {
        self.state
            .borrow()
            .windows
            .get(&window)
            .is_some_and(|w| w.callbacks_installed)
    }

    fn with_monitor<T>(&self, monitor: MonitorHandle, f: impl FnOnce(&MonitorDescriptor) -> T) -> Option<T> {
        self.state.borrow().monitor(monitor).map(f)
    }
}

fn hint_value(hints: &[(HintKey, i32)], key: HintKey) -> Option<i32> {
    hints.iter().rev().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn valid_limit(value: i32) -> bool {
    value == DONT_CARE || value >= 0
}

impl Platform for HeadlessPlatform {
    fn default_window_hints(&self) {
        let mut state = self.state.borrow_mut();
        state.pending_hints.clear();
        state.default_hint_resets += 1;
    }

    fn window_hint(&self, hint: HintKey, value: i32) {
        let mut state = self.state.borrow_mut();
        if state.rejected_hints.contains(&hint) {
            state.record(PlatformError::INVALID_ENUM, "invalid window hint");
            return;
        }
        state.pending_hints.push((hint, value));
    }

    fn create_window(
        &self,
        size: Size,
        title: &str,
        monitor: Option<MonitorHandle>,
        share: Option<WindowHandle>,
    ) -> Option<WindowHandle> {
        let mut state = self.state.borrow_mut();

        if std::mem::take(&mut state.fail_next_window) {
            state.record(PlatformError::PLATFORM_ERROR, "simulated allocation failure");
            return None;
        }
        if size.width <= 0 || size.height <= 0 {
            state.record(PlatformError::INVALID_VALUE, "invalid window size");
            return None;
        }
        if share.is_some_and(|s| !state.windows.contains_key(&s)) {
            state.record(PlatformError::INVALID_VALUE, "unknown sharing window");
            return None;
        }

        let hints = state.pending_hints.clone();
        let (position, refresh_rate) = match monitor {
            Some(handle) => {
                let Some(descriptor) = state.monitor(handle) else {
                    state.record(PlatformError::INVALID_VALUE, "unknown monitor");
                    return None;
                };
                (descriptor.position, hint_value(&hints, HintKey::RefreshRate).unwrap_or(DONT_CARE))
            }
            None => (state.placement(size), DONT_CARE),
        };

        let handle = WindowHandle(state.allocate());
        state.windows.insert(
            handle,
            HeadlessWindowState {
                title: title.to_string(),
                position,
                size,
                min_size: Size::DONT_CARE,
                max_size: Size::DONT_CARE,
                monitor,
                share,
                refresh_rate,
                user_pointer: std::ptr::null_mut(),
                hints,
                callbacks_installed: false,
            },
        );
        state.allocations += 1;
        Some(handle)
    }

    fn destroy_window(&self, window: WindowHandle) {
        self.state.borrow_mut().windows.remove(&window);
    }

    fn install_window_callbacks(&self, window: WindowHandle) {
        if let Some(native) = self.state.borrow_mut().windows.get_mut(&window) {
            native.callbacks_installed = true;
        }
    }

    fn window_position(&self, window: WindowHandle) -> Position {
        self.state
            .borrow()
            .windows
            .get(&window)
            .map_or(Position::UNSET, |w| w.position)
    }

    fn set_window_position(&self, window: WindowHandle, position: Position) {
        let mut state = self.state.borrow_mut();
        let Some(size) = state.windows.get(&window).map(|w| w.size) else {
            return;
        };
        let position = if position.is_set() { position } else { state.placement(size) };
        if let Some(native) = state.windows.get_mut(&window) {
            native.position = position;
        }
    }

    fn window_size(&self, window: WindowHandle) -> Size {
        self.state
            .borrow()
            .windows
            .get(&window)
            .map_or_else(Size::default, |w| w.size)
    }

    fn set_window_size_limits(&self, window: WindowHandle, min: Size, max: Size) {
        let mut state = self.state.borrow_mut();
        let values = [min.width, min.height, max.width, max.height];
        let inverted = |lo: i32, hi: i32| lo != DONT_CARE && hi != DONT_CARE && lo > hi;
        if !values.into_iter().all(valid_limit) || inverted(min.width, max.width) || inverted(min.height, max.height) {
            state.record(PlatformError::INVALID_VALUE, "invalid window size limits");
            return;
        }
        if let Some(native) = state.windows.get_mut(&window) {
            native.min_size = min;
            native.max_size = max;
        }
    }

    fn set_window_monitor(
        &self,
        window: WindowHandle,
        monitor: Option<MonitorHandle>,
        position: Position,
        size: Size,
        refresh_rate: i32,
    ) {
        let mut state = self.state.borrow_mut();
        let monitor_position = match monitor {
            Some(handle) => match state.monitor(handle) {
                Some(descriptor) => Some(descriptor.position),
                None => {
                    state.record(PlatformError::INVALID_VALUE, "unknown monitor");
                    return;
                }
            },
            None => None,
        };
        if let Some(native) = state.windows.get_mut(&window) {
            native.monitor = monitor;
            native.size = size;
            match monitor_position {
                Some(origin) => {
                    native.position = origin;
                    native.refresh_rate = refresh_rate;
                }
                None => {
                    if position.is_set() {
                        native.position = position;
                    }
                    native.refresh_rate = DONT_CARE;
                }
            }
        }
    }

    fn set_window_user_pointer(&self, window: WindowHandle, pointer: *mut c_void) {
        if let Some(native) = self.state.borrow_mut().windows.get_mut(&window) {
            native.user_pointer = pointer;
        }
    }

    fn window_user_pointer(&self, window: WindowHandle) -> *mut c_void {
        self.state
            .borrow()
            .windows
            .get(&window)
            .map_or(std::ptr::null_mut(), |w| w.user_pointer)
    }

    fn window_frame_size(&self, window: WindowHandle) -> FrameThickness {
        let state = self.state.borrow();
        let Some(native) = state.windows.get(&window) else {
            return FrameThickness::default();
        };
        if native.monitor.is_some() || native.hint(HintKey::Decorated) == Some(0) {
            return FrameThickness::default();
        }
        FrameThickness {
            left: BORDER,
            top: TITLE_BAR_HEIGHT,
            right: BORDER,
            bottom: BORDER,
        }
    }

    fn install_monitor_callback(&self) {
        self.state.borrow_mut().monitor_callback = true;
    }

    fn monitors(&self) -> Vec<MonitorHandle> {
        self.state.borrow().monitors.iter().map(|(h, _)| *h).collect()
    }

    fn video_mode(&self, monitor: MonitorHandle) -> Option<VideoMode> {
        self.with_monitor(monitor, MonitorDescriptor::current).flatten()
    }

    fn video_modes(&self, monitor: MonitorHandle) -> Vec<VideoMode> {
        self.with_monitor(monitor, |d| d.video_modes.clone()).unwrap_or_default()
    }

    fn physical_size(&self, monitor: MonitorHandle) -> Size {
        self.with_monitor(monitor, |d| d.physical_size).unwrap_or_default()
    }

    fn content_scale(&self, monitor: MonitorHandle) -> ContentScale {
        self.with_monitor(monitor, |d| d.content_scale).unwrap_or_default()
    }

    fn monitor_position(&self, monitor: MonitorHandle) -> Position {
        self.with_monitor(monitor, |d| d.position).unwrap_or_default()
    }

    fn work_area(&self, monitor: MonitorHandle) -> Rect {
        self.with_monitor(monitor, MonitorDescriptor::derived_work_area)
            .unwrap_or_default()
    }

    fn monitor_name(&self, monitor: MonitorHandle) -> String {
        self.with_monitor(monitor, |d| d.name.clone()).unwrap_or_default()
    }

    fn gamma_ramp(&self, monitor: MonitorHandle) -> Option<GammaRamp> {
        self.with_monitor(monitor, |d| d.gamma_ramp.clone()).flatten()
    }

    fn set_gamma_ramp(&self, monitor: MonitorHandle, ramp: &GammaRamp) {
        let mut state = self.state.borrow_mut();
        let Some(supported) = state.monitor(monitor).map(|d| d.gamma_ramp.is_some()) else {
            state.record(PlatformError::INVALID_VALUE, "unknown monitor");
            return;
        };
        if !supported {
            state.record(PlatformError::FEATURE_UNAVAILABLE, "gamma ramps are not supported");
            return;
        }
        if let Some(descriptor) = state.monitor_mut(monitor) {
            descriptor.gamma_ramp = Some(ramp.clone());
        }
    }

    fn set_gamma(&self, monitor: MonitorHandle, gamma: f32) {
        if !gamma.is_finite() || gamma <= 0.0 {
            self.state
                .borrow_mut()
                .record(PlatformError::INVALID_VALUE, "invalid gamma value");
            return;
        }
        let Some(size) = self.with_monitor(monitor, |d| d.gamma_ramp.as_ref().map(GammaRamp::len)) else {
            self.state.borrow_mut().record(PlatformError::INVALID_VALUE, "unknown monitor");
            return;
        };
        let Some(size) = size else {
            self.state
                .borrow_mut()
                .record(PlatformError::FEATURE_UNAVAILABLE, "gamma ramps are not supported");
            return;
        };

        let last = (size.max(2) - 1) as f64;
        let exponent = 1.0 / f64::from(gamma);
        let channel: Vec<u16> = (0..size)
            .map(|i| {
                let value = (i as f64 / last).powf(exponent) * f64::from(u16::MAX);
                value.round().min(f64::from(u16::MAX)) as u16
            })
            .collect();
        if let Ok(ramp) = GammaRamp::new(channel.clone(), channel.clone(), channel) {
            self.set_gamma_ramp(monitor, &ramp);
        }
    }

    fn take_error(&self) -> Option<PlatformError> {
        self.state.borrow_mut().error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let monitor = MonitorDescriptor::new("Panel", 1920, 1080);
        assert_eq!(monitor.video_modes.len(), 2);
        assert_eq!(monitor.current().unwrap().size(), Size::new(1920, 1080));
        assert!(monitor.physical_size.width > 0);
        assert_eq!(monitor.derived_work_area(), Rect::new(0, 0, 1920, 1040));
        assert_eq!(monitor.gamma_ramp.as_ref().map(GammaRamp::len), Some(DEFAULT_GAMMA_SIZE));

        let vga = MonitorDescriptor::new("VGA", 640, 480).with_work_area(Rect::new(0, 20, 640, 460));
        assert_eq!(vga.video_modes.len(), 1);
        assert_eq!(vga.derived_work_area(), Rect::new(0, 20, 640, 460));
    }

    #[test]
    fn test_monitors_listed_in_connection_order() {
        let platform = HeadlessPlatform::new();
        let first = platform.connect_monitor(MonitorDescriptor::new("A", 800, 600));
        let second = platform.connect_monitor(MonitorDescriptor::new("B", 800, 600));
        assert_ne!(first, second);
        assert_eq!(platform.monitors(), vec![first, second]);

        assert!(platform.disconnect_monitor(first));
        assert!(!platform.disconnect_monitor(first));
        assert_eq!(platform.monitors(), vec![second]);
        assert_eq!(platform.monitor_count(), 1);
        assert_eq!(platform.monitor_name(first), "");
    }

    #[test]
    fn test_pending_hints_captured_at_creation() {
        let platform = HeadlessPlatform::new();
        platform.default_window_hints();
        platform.window_hint(HintKey::Decorated, 0);
        let window = platform
            .create_window(Size::new(100, 100), "bare", None, None)
            .unwrap();

        assert_eq!(platform.window(window).unwrap().hints, vec![(HintKey::Decorated, 0)]);
        assert_eq!(platform.window_frame_size(window), FrameThickness::default());
        assert_eq!(platform.window_position(window), DEFAULT_PLACEMENT);
    }

    #[test]
    fn test_rejected_hint_records_invalid_enum() {
        let platform = HeadlessPlatform::new();
        platform.reject_hint(HintKey::Floating);
        platform.window_hint(HintKey::Floating, 1);
        platform.window_hint(HintKey::Decorated, 0);
        assert_eq!(platform.take_error().unwrap().code, PlatformError::INVALID_ENUM);

        let window = platform.create_window(Size::new(10, 10), "", None, None).unwrap();
        assert_eq!(platform.window(window).unwrap().hints, vec![(HintKey::Decorated, 0)]);
    }

    #[test]
    fn test_unset_position_centres_on_first_work_area() {
        let platform = HeadlessPlatform::new();
        platform.connect_monitor(MonitorDescriptor::new("Panel", 1920, 1080));
        let window = platform.create_window(Size::new(400, 300), "", None, None).unwrap();
        assert_eq!(platform.window_position(window), Position::new(760, 370));

        platform.set_window_position(window, Position::new(-50, 10));
        assert_eq!(platform.window_position(window), Position::new(-50, 10));
        platform.set_window_position(window, Position::UNSET);
        assert_eq!(platform.window_position(window), Position::new(760, 370));
    }

    #[test]
    fn test_create_rejects_bad_arguments() {
        let platform = HeadlessPlatform::new();
        assert!(platform.create_window(Size::new(0, 10), "", None, None).is_none());
        assert_eq!(platform.take_error().unwrap().code, PlatformError::INVALID_VALUE);

        let ghost = MonitorHandle::from_raw(0x7).unwrap();
        assert!(platform.create_window(Size::new(10, 10), "", Some(ghost), None).is_none());
        assert!(platform.take_error().is_some());
        assert_eq!(platform.allocation_count(), 0);
    }

    #[test]
    fn test_gamma_curve_from_exponent() {
        let platform = HeadlessPlatform::new();
        let monitor = platform.connect_monitor(MonitorDescriptor::new("Panel", 800, 600));
        platform.set_gamma(monitor, 1.0);

        let ramp = platform.gamma_ramp(monitor).unwrap();
        assert_eq!(ramp.red()[0], 0);
        assert_eq!(ramp.red()[ramp.len() - 1], u16::MAX);
        assert_eq!(ramp, GammaRamp::linear(DEFAULT_GAMMA_SIZE).unwrap());
    }

    #[test]
    fn test_gamma_on_unsupported_monitor_records_error() {
        let platform = HeadlessPlatform::new();
        let monitor = platform.connect_monitor(MonitorDescriptor::new("Wayland", 800, 600).without_gamma());
        platform.set_gamma(monitor, 2.2);
        assert_eq!(platform.take_error().unwrap().code, PlatformError::FEATURE_UNAVAILABLE);
        assert!(platform.gamma_ramp(monitor).is_none());
    }

    #[test]
    fn test_unplugging_monitor_ends_full_screen() {
        let platform = HeadlessPlatform::new();
        let monitor = platform.connect_monitor(MonitorDescriptor::new("Panel", 800, 600));
        let window = platform
            .create_window(Size::new(800, 600), "game", Some(monitor), None)
            .unwrap();
        assert_eq!(platform.window(window).unwrap().monitor, Some(monitor));

        platform.disconnect_monitor(monitor);
        assert_eq!(platform.window(window).unwrap().monitor, None);
        assert_eq!(platform.window_count(), 1);

        platform.destroy_window(window);
        assert_eq!(platform.window_count(), 0);
    }
}

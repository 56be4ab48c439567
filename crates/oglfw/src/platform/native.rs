//! GLFW backend
//!
//! Talks to GLFW through `glfw::ffi` rather than the crate's safe wrapper: the
//! object layer owns handle lifetimes and event routing itself, so it needs raw
//! handles and C callbacks. The `glfw` crate still does the initialization and
//! keeps the library alive for as long as this backend exists.
//!
//! Every C callback below is a thin trampoline into [`crate::dispatch`], which
//! never unwinds.

#![allow(unsafe_code)]

use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::ptr;
use std::slice;

use glfw::ffi;
use log::warn;

use super::{MonitorEvent, MonitorHandle, Platform, WindowHandle};
use crate::dispatch;
use crate::error::{InitError, PlatformError};
use crate::foundation::geometry::{ContentScale, FrameThickness, Position, Rect, Size};
use crate::hints::{HintKey, InitHints};
use crate::video::{GammaRamp, VideoMode};

const CONNECTED: c_int = 0x0004_0001;
const DISCONNECTED: c_int = 0x0004_0002;

/// The real windowing system
pub struct GlfwPlatform {
    _glfw: glfw::Glfw,
}

impl GlfwPlatform {
    /// Apply `hints` and initialize GLFW
    pub fn init(hints: &InitHints) -> Result<Self, InitError> {
        for (hint, value) in hints.to_pairs() {
            unsafe { ffi::glfwInitHint(hint, value) };
        }
        let glfw = glfw::init(glfw::log_errors).map_err(|e| InitError::InitializationFailed(format!("{e:?}")))?;
        Ok(Self { _glfw: glfw })
    }
}

fn window_ptr(window: WindowHandle) -> *mut ffi::GLFWwindow {
    window.as_ptr()
}

fn monitor_ptr(monitor: MonitorHandle) -> *mut ffi::GLFWmonitor {
    monitor.as_ptr()
}

/// # Safety
///
/// `data` must be null or point to `len` initialized values that outlive `'a`.
unsafe fn native_slice<'a, T>(data: *const T, len: c_int) -> &'a [T] {
    match usize::try_from(len) {
        Ok(len) if !data.is_null() && len > 0 => slice::from_raw_parts(data, len),
        _ => &[],
    }
}

fn video_mode(mode: &ffi::GLFWvidmode) -> VideoMode {
    VideoMode {
        width: mode.width,
        height: mode.height,
        red_bits: mode.redBits,
        green_bits: mode.greenBits,
        blue_bits: mode.blueBits,
        refresh_rate: mode.refreshRate,
    }
}

extern "C" fn close_callback(window: *mut ffi::GLFWwindow) {
    if let Some(handle) = WindowHandle::from_ptr(window) {
        dispatch::window_close_requested(handle);
    }
}

extern "C" fn position_callback(window: *mut ffi::GLFWwindow, x: c_int, y: c_int) {
    if let Some(handle) = WindowHandle::from_ptr(window) {
        dispatch::window_moved(handle, Position::new(x, y));
    }
}

extern "C" fn size_callback(window: *mut ffi::GLFWwindow, width: c_int, height: c_int) {
    if let Some(handle) = WindowHandle::from_ptr(window) {
        dispatch::window_resized(handle, Size::new(width, height));
    }
}

extern "C" fn monitor_callback(monitor: *mut ffi::GLFWmonitor, event: c_int) {
    let Some(handle) = MonitorHandle::from_ptr(monitor) else {
        return;
    };
    match event {
        CONNECTED => dispatch::monitor_event(handle, MonitorEvent::Connected),
        DISCONNECTED => dispatch::monitor_event(handle, MonitorEvent::Disconnected),
        other => warn!("Unknown monitor event {:#x} for {:?}", other, handle),
    }
}

impl Platform for GlfwPlatform {
    fn default_window_hints(&self) {
        unsafe { ffi::glfwDefaultWindowHints() };
    }

    fn window_hint(&self, hint: HintKey, value: i32) {
        unsafe { ffi::glfwWindowHint(hint.code(), value) };
    }

    fn create_window(
        &self,
        size: Size,
        title: &str,
        monitor: Option<MonitorHandle>,
        share: Option<WindowHandle>,
    ) -> Option<WindowHandle> {
        let title = match CString::new(title) {
            Ok(title) => title,
            Err(_) => {
                warn!("Window title contains a NUL byte, using an empty title");
                CString::default()
            }
        };
        let window = unsafe {
            ffi::glfwCreateWindow(
                size.width,
                size.height,
                title.as_ptr(),
                monitor.map_or(ptr::null_mut(), monitor_ptr),
                share.map_or(ptr::null_mut(), window_ptr),
            )
        };
        WindowHandle::from_ptr(window)
    }

    fn destroy_window(&self, window: WindowHandle) {
        unsafe { ffi::glfwDestroyWindow(window_ptr(window)) };
    }

    fn install_window_callbacks(&self, window: WindowHandle) {
        let window = window_ptr(window);
        unsafe {
            ffi::glfwSetWindowCloseCallback(window, Some(close_callback));
            ffi::glfwSetWindowPosCallback(window, Some(position_callback));
            ffi::glfwSetWindowSizeCallback(window, Some(size_callback));
        }
    }

    fn window_position(&self, window: WindowHandle) -> Position {
        let (mut x, mut y) = (0, 0);
        unsafe { ffi::glfwGetWindowPos(window_ptr(window), &mut x, &mut y) };
        Position::new(x, y)
    }

    fn set_window_position(&self, window: WindowHandle, position: Position) {
        // GLFW 3.3 has no "any position" value, so unset means centred on the primary work area
        let position = if position.is_set() {
            position
        } else {
            let primary = MonitorHandle::from_ptr(unsafe { ffi::glfwGetPrimaryMonitor() });
            let Some(primary) = primary else {
                warn!("No primary monitor, leaving {:?} where it is", window);
                return;
            };
            self.work_area(primary).centered(self.window_size(window))
        };
        unsafe { ffi::glfwSetWindowPos(window_ptr(window), position.x, position.y) };
    }

    fn window_size(&self, window: WindowHandle) -> Size {
        let (mut width, mut height) = (0, 0);
        unsafe { ffi::glfwGetWindowSize(window_ptr(window), &mut width, &mut height) };
        Size::new(width, height)
    }

    fn set_window_size_limits(&self, window: WindowHandle, min: Size, max: Size) {
        unsafe {
            ffi::glfwSetWindowSizeLimits(window_ptr(window), min.width, min.height, max.width, max.height);
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
        unsafe {
            ffi::glfwSetWindowMonitor(
                window_ptr(window),
                monitor.map_or(ptr::null_mut(), monitor_ptr),
                position.x,
                position.y,
                size.width,
                size.height,
                refresh_rate,
            );
        }
    }

    fn set_window_user_pointer(&self, window: WindowHandle, pointer: *mut c_void) {
        unsafe { ffi::glfwSetWindowUserPointer(window_ptr(window), pointer) };
    }

    fn window_user_pointer(&self, window: WindowHandle) -> *mut c_void {
        unsafe { ffi::glfwGetWindowUserPointer(window_ptr(window)) }
    }

    fn window_frame_size(&self, window: WindowHandle) -> FrameThickness {
        let mut frame = FrameThickness::default();
        unsafe {
            ffi::glfwGetWindowFrameSize(
                window_ptr(window),
                &mut frame.left,
                &mut frame.top,
                &mut frame.right,
                &mut frame.bottom,
            );
        }
        frame
    }

    fn install_monitor_callback(&self) {
        unsafe { ffi::glfwSetMonitorCallback(Some(monitor_callback)) };
    }

    fn monitors(&self) -> Vec<MonitorHandle> {
        let mut count = 0;
        unsafe {
            let monitors = ffi::glfwGetMonitors(&mut count);
            native_slice(monitors.cast_const(), count)
                .iter()
                .filter_map(|m| MonitorHandle::from_ptr(*m))
                .collect()
        }
    }

    fn video_mode(&self, monitor: MonitorHandle) -> Option<VideoMode> {
        unsafe { ffi::glfwGetVideoMode(monitor_ptr(monitor)).as_ref().map(video_mode) }
    }

    fn video_modes(&self, monitor: MonitorHandle) -> Vec<VideoMode> {
        let mut count = 0;
        unsafe {
            let modes = ffi::glfwGetVideoModes(monitor_ptr(monitor), &mut count);
            native_slice(modes, count).iter().map(video_mode).collect()
        }
    }

    fn physical_size(&self, monitor: MonitorHandle) -> Size {
        let (mut width, mut height) = (0, 0);
        unsafe { ffi::glfwGetMonitorPhysicalSize(monitor_ptr(monitor), &mut width, &mut height) };
        Size::new(width, height)
    }

    fn content_scale(&self, monitor: MonitorHandle) -> ContentScale {
        let (mut x, mut y) = (0.0, 0.0);
        unsafe { ffi::glfwGetMonitorContentScale(monitor_ptr(monitor), &mut x, &mut y) };
        ContentScale::new(x, y)
    }

    fn monitor_position(&self, monitor: MonitorHandle) -> Position {
        let (mut x, mut y) = (0, 0);
        unsafe { ffi::glfwGetMonitorPos(monitor_ptr(monitor), &mut x, &mut y) };
        Position::new(x, y)
    }

    fn work_area(&self, monitor: MonitorHandle) -> Rect {
        let (mut x, mut y, mut width, mut height) = (0, 0, 0, 0);
        unsafe {
            ffi::glfwGetMonitorWorkarea(monitor_ptr(monitor), &mut x, &mut y, &mut width, &mut height);
        }
        Rect::new(x, y, width, height)
    }

    fn monitor_name(&self, monitor: MonitorHandle) -> String {
        unsafe {
            let name = ffi::glfwGetMonitorName(monitor_ptr(monitor));
            if name.is_null() {
                String::new()
            } else {
                CStr::from_ptr(name).to_string_lossy().into_owned()
            }
        }
    }

    fn gamma_ramp(&self, monitor: MonitorHandle) -> Option<GammaRamp> {
        let ramp = unsafe { ffi::glfwGetGammaRamp(monitor_ptr(monitor)).as_ref()? };
        let len = c_int::try_from(ramp.size).ok()?;
        let channel = |data: *mut u16| unsafe { native_slice(data.cast_const(), len).to_vec() };
        GammaRamp::new(channel(ramp.red), channel(ramp.green), channel(ramp.blue)).ok()
    }

    fn set_gamma_ramp(&self, monitor: MonitorHandle, ramp: &GammaRamp) {
        let Ok(size) = u32::try_from(ramp.len()) else {
            warn!("Gamma ramp of {} entries is too large", ramp.len());
            return;
        };
        // GLFW copies the channels before returning
        let native = ffi::GLFWgammaramp {
            red: ramp.red().as_ptr().cast_mut(),
            green: ramp.green().as_ptr().cast_mut(),
            blue: ramp.blue().as_ptr().cast_mut(),
            size,
        };
        unsafe { ffi::glfwSetGammaRamp(monitor_ptr(monitor), &native) };
    }

    fn set_gamma(&self, monitor: MonitorHandle, gamma: f32) {
        unsafe { ffi::glfwSetGamma(monitor_ptr(monitor), gamma) };
    }

    fn take_error(&self) -> Option<PlatformError> {
        let mut description: *const c_char = ptr::null();
        let code = unsafe { ffi::glfwGetError(&mut description) };
        if code == 0 {
            return None;
        }
        let description = if description.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(description) }.to_string_lossy().into_owned()
        };
        Some(PlatformError::new(code, description))
    }
}

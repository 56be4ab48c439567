//! Monitors and the monitor cache
//!
//! A [`Monitor`] wraps one native monitor handle and keeps a snapshot of its
//! derived attributes. The snapshot is recomputed as a whole by
//! `just_connected` (at enumeration and on hot-plug) and frozen by
//! `just_disconnected`: a disconnected monitor stays a valid object whose
//! accessors keep answering with the last known values, but every call that
//! would reach the native library is refused.
//!
//! [`Monitors`] caches the ordered monitor list. Any hot-plug event clears the
//! cache and the next access rebuilds it from a fresh enumeration. The platform
//! may report several topology changes in one batch without ordering
//! guarantees, so the list is never patched in place.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, info, trace, warn};

use crate::error::{GammaError, MonitorError, MonitorResult};
use crate::foundation::geometry::{ContentScale, Position, Rect, Size};
use crate::platform::{MonitorEvent, MonitorHandle, Platform};
use crate::registry::{HandleRegistry, NativeOwner};
use crate::video::{GammaRamp, VideoMode};

/// Snapshot of everything derived from a connected monitor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorAttributes {
    /// Human readable name
    pub name: String,
    /// Physical size in millimetres
    pub physical_size: Size,
    /// Current video mode
    pub video_mode: Option<VideoMode>,
    /// Supported video modes, ascending
    pub video_modes: Vec<VideoMode>,
    /// Content scale
    pub content_scale: ContentScale,
    /// Position on the virtual desktop
    pub virtual_position: Position,
    /// Area not covered by task bars and menu bars
    pub work_area: Rect,
    /// Current gamma ramp, absent where the platform exposes none
    pub gamma_ramp: Option<GammaRamp>,
}

pub(crate) struct MonitorCore {
    handle: MonitorHandle,
    connected: Cell<bool>,
    attributes: RefCell<MonitorAttributes>,
}

impl NativeOwner for MonitorCore {
    type Handle = MonitorHandle;

    fn native_handle(&self) -> MonitorHandle {
        self.handle
    }
}

/// One physical display
///
/// Clones share the same underlying object, so there is exactly one monitor
/// state per native handle however many clones the application keeps.
#[derive(Clone)]
pub struct Monitor {
    core: Rc<MonitorCore>,
    platform: Rc<dyn Platform>,
}

impl Monitor {
    /// Wrap a freshly reported handle and take the first snapshot
    pub(crate) fn connect(handle: MonitorHandle, platform: Rc<dyn Platform>) -> Self {
        let monitor = Self {
            core: Rc::new(MonitorCore {
                handle,
                connected: Cell::new(false),
                attributes: RefCell::new(MonitorAttributes::default()),
            }),
            platform,
        };
        monitor.just_connected();
        monitor
    }

    /// Recompute every derived attribute as one snapshot
    pub(crate) fn just_connected(&self) {
        let platform = &self.platform;
        let handle = self.core.handle;

        let attributes = MonitorAttributes {
            name: platform.monitor_name(handle),
            physical_size: platform.physical_size(handle),
            video_mode: platform.video_mode(handle),
            video_modes: platform.video_modes(handle),
            content_scale: platform.content_scale(handle),
            virtual_position: platform.monitor_position(handle),
            work_area: platform.work_area(handle),
            gamma_ramp: platform.gamma_ramp(handle),
        };

        debug!(
            "Monitor {:?} '{}' connected: {:?} at {:?}",
            handle, attributes.name, attributes.video_mode, attributes.virtual_position
        );
        *self.core.attributes.borrow_mut() = attributes;
        self.core.connected.set(true);
    }

    /// Mark unusable, attributes stay frozen
    pub(crate) fn just_disconnected(&self) {
        info!("Monitor {:?} '{}' disconnected", self.core.handle, self.name());
        self.core.connected.set(false);
    }

    pub(crate) fn from_core(core: Rc<MonitorCore>, platform: Rc<dyn Platform>) -> Self {
        Self { core, platform }
    }

    /// True while the platform still knows this monitor
    pub fn is_usable(&self) -> bool {
        self.core.connected.get()
    }

    /// Alias of [`Monitor::is_usable`]
    pub fn is_ok(&self) -> bool {
        self.is_usable()
    }

    /// Native handle, only while usable
    pub fn get_handle(&self) -> Option<MonitorHandle> {
        self.is_usable().then_some(self.core.handle)
    }

    /// Snapshot of all derived attributes
    pub fn attributes(&self) -> MonitorAttributes {
        self.core.attributes.borrow().clone()
    }

    /// Human readable name
    pub fn name(&self) -> String {
        self.core.attributes.borrow().name.clone()
    }

    /// Physical size in millimetres
    pub fn physical_size(&self) -> Size {
        self.core.attributes.borrow().physical_size
    }

    /// Video mode in use when the monitor was last connected
    pub fn current_video_mode(&self) -> Option<VideoMode> {
        self.core.attributes.borrow().video_mode
    }

    /// Supported video modes
    pub fn video_modes(&self) -> Vec<VideoMode> {
        self.core.attributes.borrow().video_modes.clone()
    }

    /// Content scale
    pub fn content_scale(&self) -> ContentScale {
        self.core.attributes.borrow().content_scale
    }

    /// Position on the virtual desktop
    pub fn virtual_position(&self) -> Position {
        self.core.attributes.borrow().virtual_position
    }

    /// Work area in screen coordinates
    pub fn work_area(&self) -> Rect {
        self.core.attributes.borrow().work_area
    }

    /// Addressable area of the current video mode on the virtual desktop
    pub fn bounds(&self) -> Rect {
        let attributes = self.core.attributes.borrow();
        let size = attributes.video_mode.map(|m| m.size()).unwrap_or_default();
        Rect {
            position: attributes.virtual_position,
            size,
        }
    }

    /// Last gamma ramp read or committed
    pub fn gamma_ramp(&self) -> Option<GammaRamp> {
        self.core.attributes.borrow().gamma_ramp.clone()
    }

    /// Replace the gamma ramp
    ///
    /// Channel lengths are checked first; on mismatch nothing is touched.
    pub fn set_gamma_ramp(&self, red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> MonitorResult<()> {
        let ramp = GammaRamp::new(red, green, blue)?;
        self.apply_gamma_ramp(ramp)
    }

    /// Commit an already validated ramp
    pub fn apply_gamma_ramp(&self, ramp: GammaRamp) -> MonitorResult<()> {
        let handle = self.get_handle().ok_or(MonitorError::Disconnected)?;

        if self.core.attributes.borrow().gamma_ramp.is_none() {
            let current = self.platform.gamma_ramp(handle).ok_or(MonitorError::GammaUnavailable)?;
            trace!("Materialized working gamma ramp of {} entries for {:?}", current.len(), handle);
            self.core.attributes.borrow_mut().gamma_ramp = Some(current);
        }

        drain_stale_error(self.platform.as_ref());
        self.platform.set_gamma_ramp(handle, &ramp);
        if let Some(err) = self.platform.take_error() {
            warn!("Gamma ramp rejected by {:?}: {}", handle, err);
            return Err(err.into());
        }

        self.core.attributes.borrow_mut().gamma_ramp = Some(ramp);
        Ok(())
    }

    /// Generate and apply a ramp from a gamma exponent
    pub fn set_gamma(&self, exponent: f32) -> MonitorResult<()> {
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(GammaError::InvalidExponent(exponent).into());
        }
        let handle = self.get_handle().ok_or(MonitorError::Disconnected)?;

        drain_stale_error(self.platform.as_ref());
        self.platform.set_gamma(handle, exponent);
        if let Some(err) = self.platform.take_error() {
            return Err(err.into());
        }

        self.core.attributes.borrow_mut().gamma_ramp = self.platform.gamma_ramp(handle);
        Ok(())
    }
}

impl PartialEq for Monitor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

impl Eq for Monitor {}

impl fmt::Debug for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("handle", &self.core.handle)
            .field("name", &self.name())
            .field("usable", &self.is_usable())
            .finish()
    }
}

fn drain_stale_error(platform: &dyn Platform) {
    if let Some(stale) = platform.take_error() {
        debug!("Discarding earlier platform error: {}", stale);
    }
}

#[derive(Default)]
struct MonitorCache {
    list: Vec<Monitor>,
    index: HandleRegistry<MonitorCore>,
}

/// Cached, ordered list of connected monitors
pub struct Monitors {
    platform: Rc<dyn Platform>,
    cache: RefCell<MonitorCache>,
}

impl Monitors {
    pub(crate) fn new(platform: Rc<dyn Platform>) -> Self {
        Self {
            platform,
            cache: RefCell::new(MonitorCache::default()),
        }
    }

    /// Connected monitors, primary first
    ///
    /// Rebuilt from a fresh enumeration when the cache is empty.
    pub fn get_list(&self) -> Vec<Monitor> {
        if self.cache.borrow().list.is_empty() {
            self.rebuild();
        }
        self.cache.borrow().list.clone()
    }

    /// Number of connected monitors
    pub fn len(&self) -> usize {
        self.get_list().len()
    }

    /// True if no monitor is connected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The primary monitor
    pub fn primary(&self) -> Option<Monitor> {
        self.get_list().into_iter().next()
    }

    /// Monitor at `index` in the current list
    pub fn get(&self, index: usize) -> Option<Monitor> {
        self.get_list().into_iter().nth(index)
    }

    /// Live monitor wrapping `handle`
    pub fn find(&self, handle: MonitorHandle) -> Option<Monitor> {
        self.cache
            .borrow()
            .index
            .find(handle)
            .map(|core| Monitor::from_core(core, Rc::clone(&self.platform)))
    }

    /// Drop the cached list, the next access re-enumerates
    pub(crate) fn invalidate(&self) {
        self.cache.borrow_mut().list.clear();
    }

    /// Hot-plug entry point used by the dispatcher
    pub(crate) fn handle_event(&self, handle: MonitorHandle, event: MonitorEvent) {
        let owner = self.find(handle);
        match (event, owner) {
            (MonitorEvent::Connected, Some(monitor)) => monitor.just_connected(),
            (MonitorEvent::Connected, None) => {
                trace!("Monitor {:?} connected, wrapper created on next enumeration", handle);
            }
            (MonitorEvent::Disconnected, Some(monitor)) => {
                monitor.just_disconnected();
                self.cache.borrow_mut().index.remove(handle);
            }
            (MonitorEvent::Disconnected, None) => {
                trace!("Dropping disconnect event for unknown monitor {:?}", handle);
            }
        }
        self.invalidate();
    }

    fn rebuild(&self) {
        let handles = self.platform.monitors();
        let mut cache = self.cache.borrow_mut();
        cache.index.prune();

        let mut list = Vec::with_capacity(handles.len());
        for handle in handles {
            // Reuse the live wrapper so a handle never has two owners
            let monitor = match cache.index.find(handle) {
                Some(core) => {
                    let monitor = Monitor::from_core(core, Rc::clone(&self.platform));
                    monitor.just_connected();
                    monitor
                }
                None => {
                    let monitor = Monitor::connect(handle, Rc::clone(&self.platform));
                    cache.index.add(&monitor.core);
                    monitor
                }
            };
            list.push(monitor);
        }

        debug!("Enumerated {} monitor(s)", list.len());
        cache.list = list;
    }
}

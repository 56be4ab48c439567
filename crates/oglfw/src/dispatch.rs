//! Callback dispatch from native events to owning objects
//!
//! The native library reports events through free functions that only carry
//! a handle and the event payload. Backends route every such trampoline to one
//! of the entry points below, which all follow the same discipline:
//!
//! 1. find the library session active on this thread
//! 2. resolve the handle to its owner
//! 3. drop the event quietly when there is no owner (the handle may be
//!    outside managed lifetime, e.g. during construction or teardown)
//! 4. forward to the owner
//!
//! Nothing unwinds out of an entry point. Handler errors and panics are logged
//! and absorbed, since unwinding through the native library's frames is
//! undefined behavior.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use log::{error, trace, warn};

use crate::error::HandlerResult;
use crate::foundation::geometry::{Position, Size};
use crate::library::LibraryState;
use crate::platform::{MonitorEvent, MonitorHandle, WindowHandle};
use crate::window::WindowCore;

thread_local! {
    static ACTIVE: RefCell<Weak<LibraryState>> = const { RefCell::new(Weak::new()) };
}

/// Make `state` the dispatch target for this thread
pub(crate) fn activate(state: &Rc<LibraryState>) {
    ACTIVE.with(|active| {
        let mut active = active.borrow_mut();
        if active.upgrade().is_some() {
            warn!("Replacing the active library session on this thread");
        }
        *active = Rc::downgrade(state);
    });
}

fn active() -> Option<Rc<LibraryState>> {
    ACTIVE.with(|active| active.borrow().upgrade())
}

/// The user asked to close `window`
pub fn window_close_requested(window: WindowHandle) {
    deliver_to_window("close", window, WindowCore::close_requested);
}

/// `window` moved to `position`
pub fn window_moved(window: WindowHandle, position: Position) {
    deliver_to_window("move", window, |core| core.moved(position));
}

/// `window` was resized to `size`
pub fn window_resized(window: WindowHandle, size: Size) {
    deliver_to_window("resize", window, |core| core.resized(size));
}

/// A monitor was connected or disconnected
pub fn monitor_event(monitor: MonitorHandle, event: MonitorEvent) {
    absorb("monitor", || {
        match active() {
            Some(state) => state.monitors.handle_event(monitor, event),
            None => trace!("No active session, dropping {:?} for {:?}", event, monitor),
        }
        Ok(())
    });
}

fn deliver_to_window<F>(kind: &'static str, window: WindowHandle, forward: F)
where
    F: FnOnce(&WindowCore) -> HandlerResult,
{
    absorb(kind, || {
        let Some(state) = active() else {
            trace!("No active session, dropping {} event for {:?}", kind, window);
            return Ok(());
        };

        let owner = match state.windows.try_borrow() {
            Ok(registry) => registry.find(window),
            Err(_) => None,
        };

        match owner {
            Some(core) => forward(&core),
            None => {
                trace!("Dropping {} event for unowned window {:?}", kind, window);
                Ok(())
            }
        }
    });
}

fn absorb<F>(kind: &'static str, f: F)
where
    F: FnOnce() -> HandlerResult,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => error!("{} handler failed: {}", kind, err),
        Err(_) => error!("{} handler panicked, event absorbed", kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::logging;
    use crate::library::Library;
    use crate::platform::HeadlessPlatform;

    #[test]
    fn test_events_without_session_are_dropped() {
        logging::init_for_tests();
        let handle = WindowHandle::from_raw(0xdead).unwrap();
        window_close_requested(handle);
        window_moved(handle, Position::new(1, 2));
        monitor_event(MonitorHandle::from_raw(0xbeef).unwrap(), MonitorEvent::Disconnected);
    }

    #[test]
    fn test_events_for_unowned_handles_are_dropped() {
        logging::init_for_tests();
        let library = Library::new(Rc::new(HeadlessPlatform::new()));
        window_resized(WindowHandle::from_raw(0x42).unwrap(), Size::new(10, 10));
        assert_eq!(library.live_window_count(), 0);
    }

    #[test]
    fn test_absorb_swallows_errors_and_panics() {
        logging::init_for_tests();
        absorb("test", || Err("boom".into()));
        absorb("test", || panic!("handler bug"));
    }

    #[test]
    fn test_newer_session_takes_over_dispatch() {
        logging::init_for_tests();
        let first = Library::new(Rc::new(HeadlessPlatform::new()));
        let second = Library::new(Rc::new(HeadlessPlatform::new()));
        let current = active().unwrap();
        assert!(Rc::ptr_eq(&current, second.state()));
        assert!(!Rc::ptr_eq(&current, first.state()));
    }
}

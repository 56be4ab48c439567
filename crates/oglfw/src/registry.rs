//! Native handle → owning object index
//!
//! The native library addresses callbacks by handle only. The registry is the
//! single source of truth for "does this handle have a live owner", so callback
//! dispatch can get from a bare handle back to the object that owns it.
//!
//! Entries hold weak references: an owner registers once fully constructed and
//! unregisters before it releases its handle, and an owner that is midway
//! through being dropped can no longer be upgraded. Lookups therefore never
//! hand out a dangling owner.
//!
//! Not thread-safe. All access happens on the thread pumping native events.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use log::{trace, warn};

/// An object that owns exactly one native handle
pub trait NativeOwner {
    /// Handle type the owner is indexed by
    type Handle: Copy + Eq + Hash + Debug;

    /// The owned handle
    fn native_handle(&self) -> Self::Handle;
}

/// Handle-keyed index of live owners, insertion order preserved
pub struct HandleRegistry<T: NativeOwner> {
    index: HashMap<T::Handle, Weak<T>>,
    order: Vec<T::Handle>,
}

impl<T: NativeOwner> HandleRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register `owner` under its handle
    ///
    /// Returns false, leaving the registry unchanged, if another live owner
    /// already holds the handle.
    pub fn add(&mut self, owner: &Rc<T>) -> bool {
        let handle = owner.native_handle();
        if let Some(existing) = self.find(handle) {
            if !Rc::ptr_eq(&existing, owner) {
                warn!("Refusing second owner for native handle {:?}", handle);
            }
            return false;
        }

        // A stale entry whose owner is gone is replaced in place of a new slot
        self.order.retain(|h| *h != handle);
        self.index.insert(handle, Rc::downgrade(owner));
        self.order.push(handle);
        trace!("Registered owner for {:?}", handle);
        true
    }

    /// Unregister whatever owns `handle`
    pub fn remove(&mut self, handle: T::Handle) -> bool {
        let removed = self.index.remove(&handle).is_some();
        if removed {
            self.order.retain(|h| *h != handle);
            trace!("Unregistered owner for {:?}", handle);
        }
        removed
    }

    /// Live owner of `handle`, if any
    pub fn find(&self, handle: T::Handle) -> Option<Rc<T>> {
        self.index.get(&handle).and_then(Weak::upgrade)
    }

    /// True if `handle` has a live owner
    pub fn contains(&self, handle: T::Handle) -> bool {
        self.find(handle).is_some()
    }

    /// Handles with a live owner, in registration order
    pub fn handles(&self) -> impl Iterator<Item = T::Handle> + '_ {
        self.order.iter().copied().filter(|h| self.contains(*h))
    }

    /// Live owners, in registration order
    pub fn owners(&self) -> Vec<Rc<T>> {
        self.order.iter().filter_map(|h| self.find(*h)).collect()
    }

    /// Number of live owners
    pub fn len(&self) -> usize {
        self.handles().count()
    }

    /// True if no owner is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget entries whose owner has been dropped
    pub fn prune(&mut self) {
        let index = &mut self.index;
        self.order.retain(|h| {
            let alive = index.get(h).is_some_and(|w| w.strong_count() > 0);
            if !alive {
                index.remove(h);
            }
            alive
        });
    }
}

impl<T: NativeOwner> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Owner(u32);

    impl NativeOwner for Owner {
        type Handle = u32;

        fn native_handle(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_find_returns_registered_owner() {
        let mut registry = HandleRegistry::new();
        let owner = Rc::new(Owner(1));
        assert!(registry.add(&owner));

        let found = registry.find(1).unwrap();
        assert!(Rc::ptr_eq(&found, &owner));
        assert!(registry.find(2).is_none());
    }

    #[test]
    fn test_second_owner_refused() {
        let mut registry = HandleRegistry::new();
        let first = Rc::new(Owner(1));
        let second = Rc::new(Owner(1));
        assert!(registry.add(&first));
        assert!(!registry.add(&second));
        assert!(Rc::ptr_eq(&registry.find(1).unwrap(), &first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_removed_handle_not_found() {
        let mut registry = HandleRegistry::new();
        let owner = Rc::new(Owner(5));
        registry.add(&owner);
        assert!(registry.remove(5));
        assert!(!registry.remove(5));
        assert!(registry.find(5).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dropped_owner_never_returned() {
        let mut registry = HandleRegistry::new();
        let owner = Rc::new(Owner(3));
        registry.add(&owner);
        drop(owner);

        assert!(registry.find(3).is_none());
        assert_eq!(registry.len(), 0);

        // The handle can be owned again once the previous owner is gone
        let replacement = Rc::new(Owner(3));
        assert!(registry.add(&replacement));
        assert_eq!(registry.handles().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = HandleRegistry::new();
        let owners: Vec<_> = [9, 2, 7].into_iter().map(|h| Rc::new(Owner(h))).collect();
        for owner in &owners {
            registry.add(owner);
        }
        registry.remove(2);
        assert_eq!(registry.handles().collect::<Vec<_>>(), vec![9, 7]);
        assert_eq!(registry.owners().len(), 2);
    }

    #[test]
    fn test_prune_drops_dead_entries() {
        let mut registry = HandleRegistry::new();
        let kept = Rc::new(Owner(1));
        registry.add(&kept);
        registry.add(&Rc::new(Owner(2)));

        registry.prune();
        assert_eq!(registry.order, vec![1]);
        assert!(!registry.index.contains_key(&2));
    }
}

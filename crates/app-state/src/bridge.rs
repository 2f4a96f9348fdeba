//! Navigation bridge
//!
//! Lets code outside the drawer's own subtree (a header button on an
//! arbitrary screen) open, close or toggle the drawer without threading a
//! handle through every screen.
//!
//! The bridge is injected, not global. It holds at most one registration
//! and only a weak reference to it: once the registered controls are
//! dropped every call becomes a no-op. Only one drawer is expected to be
//! mounted at a time; registering again replaces the previous controls.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Imperative drawer controls
pub trait DrawerControls: Send + Sync {
    /// Open if closed, close if open
    fn toggle(&self);
    /// Open the drawer
    fn open(&self);
    /// Close the drawer
    fn close(&self);
}

/// Shared registry of the mounted drawer's controls
#[derive(Clone, Default)]
pub struct NavigationBridge {
    registered: Arc<RwLock<Option<Weak<dyn DrawerControls>>>>,
}

impl NavigationBridge {
    /// Create an empty bridge
    pub fn new() -> Self {
        Self::default()
    }

    /// Register controls, replacing any previous registration
    pub fn register_controls<C>(&self, controls: &Arc<C>)
    where
        C: DrawerControls + 'static,
    {
        let controls: Arc<dyn DrawerControls> = controls.clone();
        let mut registered = self.registered.write();
        if registered
            .as_ref()
            .is_some_and(|previous| previous.strong_count() > 0)
        {
            tracing::warn!("Replacing live drawer controls; only one drawer should be mounted");
        }
        *registered = Some(Arc::downgrade(&controls));
    }

    /// Forget `controls` if they are still the registered ones
    ///
    /// A newer registration is left in place. Returns whether anything was
    /// removed.
    pub fn unregister_controls<C>(&self, controls: &Arc<C>) -> bool
    where
        C: DrawerControls + 'static,
    {
        let target = Arc::as_ptr(controls) as *const ();
        let mut registered = self.registered.write();
        let owned = registered
            .as_ref()
            .is_some_and(|current| current.as_ptr() as *const () == target);
        if owned {
            registered.take();
        } else {
            tracing::debug!("Skipping unregister; another drawer owns the bridge");
        }
        owned
    }

    /// Whether live controls are registered
    pub fn is_registered(&self) -> bool {
        self.current().is_some()
    }

    /// Toggle the drawer; returns false if nothing is registered
    pub fn toggle_drawer(&self) -> bool {
        self.with_controls(|c| c.toggle())
    }

    /// Open the drawer; returns false if nothing is registered
    pub fn open_drawer(&self) -> bool {
        self.with_controls(|c| c.open())
    }

    /// Close the drawer; returns false if nothing is registered
    pub fn close_drawer(&self) -> bool {
        self.with_controls(|c| c.close())
    }

    fn current(&self) -> Option<Arc<dyn DrawerControls>> {
        self.registered.read().as_ref().and_then(Weak::upgrade)
    }

    fn with_controls(&self, f: impl FnOnce(&dyn DrawerControls)) -> bool {
        // Lock released before calling out so controls may re-enter the bridge
        match self.current() {
            Some(controls) => {
                f(controls.as_ref());
                true
            }
            None => {
                tracing::debug!("Drawer bridge called with no mounted drawer");
                false
            }
        }
    }
}

impl std::fmt::Debug for NavigationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationBridge")
            .field("registered", &self.is_registered())
            .finish()
    }
}

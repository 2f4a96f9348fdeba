//! Bottom navigation shell
//!
//! Mounts one drawer: spawns its runtime, registers it with the bridge and
//! turns presses on rendered items back into drawer commands.

use app_core::{MenuEntries, MenuModel, Role};
use app_state::{DrawerConfig, DrawerHandle, DrawerRuntime, NavigationBridge, Navigator, Result};
use app_ui::{panel_height_for_screen, BottomBar, DrawerPanel, StackNavigator, UserProfile};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A mounted bottom bar and drawer
pub struct MountedDrawer {
    handle: Arc<DrawerHandle>,
    task: JoinHandle<()>,
    bridge: NavigationBridge,
    menu: Mutex<MenuModel>,
    user: Mutex<UserProfile>,
    routes: watch::Receiver<String>,
    panel_height: f32,
}

impl MountedDrawer {
    /// Spawn the drawer runtime and register it with `bridge`
    ///
    /// Must be called inside a tokio runtime.
    pub fn mount(
        config: DrawerConfig,
        role: Option<Role>,
        user: UserProfile,
        navigator: Arc<dyn Navigator>,
        routes: watch::Receiver<String>,
        bridge: &NavigationBridge,
    ) -> Result<Self> {
        let panel_height = config.panel_height;
        let (handle, task) = DrawerRuntime::spawn(config, navigator, routes.clone())?;
        let handle = Arc::new(handle);
        bridge.register_controls(&handle);
        tracing::info!(role = ?role, "Drawer mounted");

        Ok(Self {
            handle,
            task,
            bridge: bridge.clone(),
            menu: Mutex::new(MenuModel::new(role)),
            user: Mutex::new(user),
            routes,
            panel_height,
        })
    }

    /// Mount against a [`StackNavigator`], observing its routes
    pub fn mount_with_stack(
        config: DrawerConfig,
        role: Option<Role>,
        user: UserProfile,
        navigator: &Arc<StackNavigator>,
        bridge: &NavigationBridge,
    ) -> Result<Self> {
        let routes = navigator.subscribe();
        let navigator: Arc<dyn Navigator> = navigator.clone();
        Self::mount(config, role, user, navigator, routes, bridge)
    }

    /// Handle to the running drawer
    pub fn handle(&self) -> &Arc<DrawerHandle> {
        &self.handle
    }

    /// Switch the signed-in user's role
    pub fn set_role(&self, role: Option<Role>) {
        self.menu.lock().entries_for(role);
    }

    /// Replace the header profile
    pub fn set_user(&self, user: UserProfile) {
        *self.user.lock() = user;
    }

    /// Update a display badge; false if no entry has `key`
    pub fn set_badge(&self, key: &str, count: Option<u32>) -> bool {
        self.menu.lock().set_badge(key, count)
    }

    /// Current menu entries
    pub fn entries(&self) -> MenuEntries {
        self.menu.lock().entries().clone()
    }

    /// A bottom bar item was pressed; false if no item has `key`
    pub fn press_bar_item(&self, key: &str) -> bool {
        let entry = self.menu.lock().entries().bar_item(key).cloned();
        match entry {
            Some(entry) => {
                self.handle.select_bar_entry(entry);
                true
            }
            None => {
                tracing::warn!(key, "Unknown bottom bar item");
                false
            }
        }
    }

    /// A drawer row was pressed; false if no row has `key`
    pub fn press_drawer_item(&self, key: &str) -> bool {
        let entry = self.menu.lock().entries().drawer_item(key).cloned();
        match entry {
            Some(entry) => {
                self.handle.select_drawer_entry(entry);
                true
            }
            None => {
                tracing::warn!(key, "Unknown drawer item");
                false
            }
        }
    }

    /// Fit the panel to a newly measured screen
    pub fn layout(&self, screen_height: f32) {
        self.handle
            .set_panel_height(panel_height_for_screen(self.panel_height, screen_height));
    }

    /// Render the bottom bar for the current route
    pub fn bottom_bar(&self) -> BottomBar {
        let route = self.routes.borrow().clone();
        BottomBar::new(self.menu.lock().entries(), &route)
    }

    /// Render the drawer panel from the latest snapshot
    pub fn drawer_panel(&self) -> DrawerPanel {
        let snapshot = self.handle.snapshot();
        let user = self.user.lock().clone();
        DrawerPanel::new(&snapshot, self.menu.lock().entries(), &user)
    }

    /// Stop the runtime and drop this drawer's bridge registration
    pub async fn unmount(self) {
        self.handle.shutdown();
        self.bridge.unregister_controls(&self.handle);
        if let Err(e) = self.task.await {
            tracing::warn!("Drawer runtime ended abnormally: {}", e);
        }
        tracing::info!("Drawer unmounted");
    }
}

impl std::fmt::Debug for MountedDrawer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedDrawer")
            .field("handle", &self.handle)
            .field("role", &self.menu.lock().role())
            .finish()
    }
}

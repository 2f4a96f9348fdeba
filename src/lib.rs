//! Craftlink bottom navigation
//!
//! Ties the workspace crates together: the menu tables from `app-core`,
//! the drawer runtime from `app-state` and the navigator and view models
//! from `app-ui`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use craftlink::{MountedDrawer, NavigationBridge, Role, Route, StackNavigator, UserProfile};
//! use craftlink::DrawerConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     craftlink::telemetry::init_tracing(craftlink::telemetry::DEFAULT_DIRECTIVE);
//!
//!     let navigator = Arc::new(StackNavigator::new(Route::Home));
//!     let bridge = NavigationBridge::new();
//!     let drawer = MountedDrawer::mount_with_stack(
//!         DrawerConfig::default(),
//!         Some(Role::Worker),
//!         UserProfile::new("Ana"),
//!         &navigator,
//!         &bridge,
//!     )
//!     .unwrap();
//!
//!     // A header button on any screen
//!     bridge.toggle_drawer();
//!     drawer.press_drawer_item("earnings");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod shell;
pub mod telemetry;

pub use shell::MountedDrawer;

pub use app_core::{derive_entries, EntryKind, MenuEntries, MenuEntry, MenuModel, Role};
pub use app_state::{
    DrawerConfig, DrawerControls, DrawerError, DrawerEvent, DrawerHandle, DrawerPhase,
    DrawerSnapshot, NavigationBridge, Navigator,
};
pub use app_ui::{BottomBar, DrawerPanel, NavigationError, Route, StackNavigator, UserProfile};

//! User interface for Craftlink
//!
//! This crate provides the host side of the bottom navigation: design
//! tokens, the route table and stack navigator the drawer navigates
//! through, and view models for the bottom bar and the drawer panel.
//!
//! # Modules
//!
//! - [`tokens`] - Design tokens (spacing, sizing, layering)
//! - [`components`] - Bottom bar, drawer panel and avatar
//! - [`navigation`] - Routes, navigation stack and navigator
//!
//! # Example
//!
//! ```rust
//! use app_core::{derive_entries, Role};
//! use app_ui::components::BottomBar;
//! use app_ui::navigation::{Route, StackNavigator};
//!
//! let navigator = StackNavigator::new(Route::Home);
//! let entries = derive_entries(Some(Role::Worker));
//! let bar = BottomBar::new(&entries, &navigator.current_route().to_path());
//! assert_eq!(bar.active_item(), Some("home"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod navigation;
pub mod tokens;

// Re-export commonly used types
pub use tokens::{radius, shadows, sizing, spacing, z_index, Shadow};

pub use components::{
    panel_height_for_screen, resolve_icon, AccessibilityProps, Avatar, BottomBar, BottomBarItem,
    DrawerPanel, DrawerRow, UserProfile,
};

pub use navigation::{NavigationError, NavigationState, Route, StackEntry, StackNavigator};

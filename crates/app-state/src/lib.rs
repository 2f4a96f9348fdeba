//! Application state management for Craftlink
//!
//! This crate owns the bottom-navigation drawer: the state machine that
//! opens and closes the slide-up panel, the animation driver and gesture
//! recognizer feeding it, the bridge that exposes it to screens outside
//! its subtree, and the tokio runtime that serializes all of its inputs.
//!
//! # Modules
//!
//! - [`animation`] - Animated scalars and grouped transitions
//! - [`gesture`] - Drag tracking and swipe-to-close classification
//! - [`drawer`] - The drawer state machine
//! - [`bridge`] - Imperative controls for code outside the drawer
//! - [`runtime`] - Task that owns and drives a drawer
//! - [`config`] - Timings and thresholds
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use app_state::{DrawerConfig, DrawerRuntime, Navigator, NavigationBridge};
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (_routes_tx, routes_rx) = watch::channel("/home".to_string());
//!     let navigator: Arc<dyn Navigator> = Arc::new(|route: &str| println!("-> {route}"));
//!
//!     let (handle, _task) =
//!         DrawerRuntime::spawn(DrawerConfig::default(), navigator, routes_rx).unwrap();
//!     let handle = Arc::new(handle);
//!
//!     let bridge = NavigationBridge::new();
//!     bridge.register_controls(&handle);
//!     bridge.toggle_drawer();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod animation;
pub mod bridge;
pub mod config;
pub mod drawer;
pub mod error;
pub mod gesture;
pub mod navigator;
pub mod runtime;

pub use animation::{
    AnimationConfig, AnimationDriver, AnimationHandle, Easing, SpringConfig, TransitionKind,
};
pub use bridge::{DrawerControls, NavigationBridge};
pub use config::DrawerConfig;
pub use drawer::{DrawerController, DrawerEvent, DrawerPhase, DrawerSnapshot};
pub use error::{DrawerError, Result};
pub use gesture::{GestureConfig, GestureOutcome, GestureRecognizer, GestureRelease};
pub use navigator::Navigator;
pub use runtime::{DrawerCommand, DrawerHandle, DrawerRuntime};

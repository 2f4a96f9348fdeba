//! Core application logic for Craftlink
//!
//! This crate contains shared business logic that does not depend on
//! any UI state: currently the role-keyed navigation menus shown in the
//! bottom bar and the slide-up drawer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod menu;

pub use menu::{derive_entries, EntryKind, MenuEntries, MenuEntry, MenuModel, Role};

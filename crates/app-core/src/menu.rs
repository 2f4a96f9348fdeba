//! Role-keyed navigation menus
//!
//! Every signed-in user sees a bottom bar and a slide-up drawer. Which
//! entries appear depends only on the user's [`Role`]: craftsmen manage
//! jobs and earnings, clients search for craftsmen and track requests.
//!
//! [`derive_entries`] is a total function over `Option<Role>`; a missing
//! role falls back to the client table. [`MenuModel`] memoizes the last
//! derivation so unrelated re-renders do not rebuild the tables.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Key of the bar entry that toggles the drawer instead of navigating
pub const MENU_ENTRY_KEY: &str = "menu";

/// Key of the drawer entry that opens the user's public profile
pub const PUBLIC_PROFILE_ENTRY_KEY: &str = "public-profile";

/// Container screen the public profile is mounted under
pub const PROFILE_ROUTE: &str = "/profile";

/// Public profile sub-screen
pub const PUBLIC_PROFILE_ROUTE: &str = "/profile/public";

/// Largest badge count rendered as a number (displays as "99+" above)
pub const MAX_BADGE_COUNT: u32 = 99;

// =============================================================================
// Role
// =============================================================================

/// User classification selecting which menus are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Craftsman offering services
    Worker,
    /// Customer looking for a craftsman
    #[default]
    Client,
}

impl Role {
    /// Parse a role string from the profile provider
    ///
    /// Unknown strings yield `None`, which [`derive_entries`] maps to the
    /// default table.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "worker" | "craftsman" => Some(Role::Worker),
            "client" => Some(Role::Client),
            _ => None,
        }
    }

    /// All roles in declaration order
    pub fn all() -> [Role; 2] {
        [Role::Worker, Role::Client]
    }

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Worker => "worker",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Menu Entries
// =============================================================================

/// How selecting an entry is handled by the drawer controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Opens or closes the drawer
    ToggleDrawer,
    /// Public profile, reached through its container screen
    PublicProfile,
    /// Plain screen navigation
    Screen,
}

/// A single navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Unique key within its list
    pub key: String,
    /// Display label
    pub label: String,
    /// Symbolic icon name
    pub icon: String,
    /// Target route, opaque to the menu model
    pub route: String,
    /// Unread/pending count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
}

impl MenuEntry {
    /// Create an entry without a badge
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: icon.into(),
            route: route.into(),
            badge: None,
        }
    }

    /// Set the badge count
    pub fn with_badge(mut self, count: u32) -> Self {
        self.badge = Some(count);
        self
    }

    /// Classify the entry
    pub fn kind(&self) -> EntryKind {
        match self.key.as_str() {
            MENU_ENTRY_KEY => EntryKind::ToggleDrawer,
            PUBLIC_PROFILE_ENTRY_KEY => EntryKind::PublicProfile,
            _ => EntryKind::Screen,
        }
    }

    /// Badge text, empty when there is nothing to show
    pub fn badge_text(&self) -> String {
        match self.badge {
            None | Some(0) => String::new(),
            Some(n) if n > MAX_BADGE_COUNT => format!("{}+", MAX_BADGE_COUNT),
            Some(n) => n.to_string(),
        }
    }
}

/// Bottom bar and drawer entries for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntries {
    /// Persistently visible bottom bar items
    pub bar_items: Vec<MenuEntry>,
    /// Extended actions inside the drawer
    pub drawer_items: Vec<MenuEntry>,
}

impl MenuEntries {
    /// Find a bar item by key
    pub fn bar_item(&self, key: &str) -> Option<&MenuEntry> {
        self.bar_items.iter().find(|e| e.key == key)
    }

    /// Find a drawer item by key
    pub fn drawer_item(&self, key: &str) -> Option<&MenuEntry> {
        self.drawer_items.iter().find(|e| e.key == key)
    }

    /// Update the badge of every entry with the given key, in both lists
    ///
    /// Returns true if at least one entry matched.
    pub fn set_badge(&mut self, key: &str, count: Option<u32>) -> bool {
        let mut matched = false;
        for entry in self
            .bar_items
            .iter_mut()
            .chain(self.drawer_items.iter_mut())
            .filter(|e| e.key == key)
        {
            entry.badge = count;
            matched = true;
        }
        matched
    }

    /// Check that keys are unique within each list
    pub fn has_unique_keys(&self) -> bool {
        fn unique(items: &[MenuEntry]) -> bool {
            let mut seen = HashSet::new();
            items.iter().all(|e| seen.insert(e.key.as_str()))
        }
        unique(&self.bar_items) && unique(&self.drawer_items)
    }
}

// =============================================================================
// Static Tables
// =============================================================================

fn worker_entries() -> MenuEntries {
    MenuEntries {
        bar_items: vec![
            MenuEntry::new("home", "Home", "home", "/home"),
            MenuEntry::new("jobs", "Jobs", "briefcase", "/jobs"),
            MenuEntry::new("messages", "Messages", "chat", "/messages"),
            MenuEntry::new(MENU_ENTRY_KEY, "Menu", "menu", "/menu"),
        ],
        drawer_items: vec![
            MenuEntry::new(
                PUBLIC_PROFILE_ENTRY_KEY,
                "My public profile",
                "user",
                PUBLIC_PROFILE_ROUTE,
            ),
            MenuEntry::new("edit-profile", "Edit profile", "edit", "/profile/edit"),
            MenuEntry::new("services", "My services", "tools", "/services"),
            MenuEntry::new("earnings", "Earnings", "wallet", "/earnings"),
            MenuEntry::new("reviews", "Reviews", "star", "/reviews"),
            MenuEntry::new("notifications", "Notifications", "bell", "/notifications"),
            MenuEntry::new("settings", "Settings", "settings", "/settings"),
            MenuEntry::new("help", "Help & support", "help", "/help"),
        ],
    }
}

fn client_entries() -> MenuEntries {
    MenuEntries {
        bar_items: vec![
            MenuEntry::new("home", "Home", "home", "/home"),
            MenuEntry::new("search", "Find a craftsman", "search", "/search"),
            MenuEntry::new("requests", "My requests", "clipboard", "/requests"),
            MenuEntry::new(MENU_ENTRY_KEY, "Menu", "menu", "/menu"),
        ],
        drawer_items: vec![
            MenuEntry::new("profile", "My profile", "user", PROFILE_ROUTE),
            MenuEntry::new("messages", "Messages", "chat", "/messages"),
            MenuEntry::new("favorites", "Saved craftsmen", "heart", "/favorites"),
            MenuEntry::new("notifications", "Notifications", "bell", "/notifications"),
            MenuEntry::new("settings", "Settings", "settings", "/settings"),
            MenuEntry::new("help", "Help & support", "help", "/help"),
            // Alias of "help"
            MenuEntry::new("contact", "Contact us", "mail", "/help"),
        ],
    }
}

/// Derive the bottom bar and drawer entries for a role
///
/// `None` selects the client table.
pub fn derive_entries(role: Option<Role>) -> MenuEntries {
    match role.unwrap_or_default() {
        Role::Worker => worker_entries(),
        Role::Client => client_entries(),
    }
}

// =============================================================================
// Memoized Model
// =============================================================================

/// Memoizing wrapper around [`derive_entries`]
///
/// Recomputes only when the role changes. Badge updates applied through
/// [`MenuModel::set_badge`] survive until the next role change.
#[derive(Debug, Clone)]
pub struct MenuModel {
    role: Option<Role>,
    entries: MenuEntries,
    derivations: u32,
}

impl MenuModel {
    /// Create a model for the initial role
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            entries: derive_entries(role),
            derivations: 1,
        }
    }

    /// Entries for `role`, recomputed only when it differs from the last call
    pub fn entries_for(&mut self, role: Option<Role>) -> &MenuEntries {
        if role != self.role {
            tracing::debug!(from = ?self.role, to = ?role, "Role changed, deriving menu entries");
            self.role = role;
            self.entries = derive_entries(role);
            self.derivations += 1;
        }
        &self.entries
    }

    /// Entries for the current role
    pub fn entries(&self) -> &MenuEntries {
        &self.entries
    }

    /// The role the current entries were derived for
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Update a badge on the current entries
    pub fn set_badge(&mut self, key: &str, count: Option<u32>) -> bool {
        self.entries.set_badge(key, count)
    }

    /// Number of times the tables were derived
    pub fn derivations(&self) -> u32 {
        self.derivations
    }
}

impl Default for MenuModel {
    fn default() -> Self {
        Self::new(None)
    }
}

// =============================================================================
// Tests
// =============================================================================

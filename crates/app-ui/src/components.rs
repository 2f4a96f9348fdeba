//! UI components for the bottom navigation and the slide-up drawer
//!
//! Components are plain structs with serializable properties that the
//! frontend renders. They are rebuilt from the menu entries, the current
//! route and the latest [`DrawerSnapshot`]; none of them hold state of
//! their own.
//!
//! # Available Components
//!
//! - [`BottomBar`] - Fixed bar of entries with the active one highlighted
//! - [`DrawerPanel`] - Sliding panel with profile header and entry rows
//! - [`Avatar`] - Profile picture with an initial fallback

use crate::tokens::{radius, shadows, sizing, spacing, z_index, Shadow};
use app_core::{EntryKind, MenuEntries, MenuEntry};
use app_state::{DrawerPhase, DrawerSnapshot};
use serde::{Deserialize, Serialize};

// =============================================================================
// Icons
// =============================================================================

/// Icon names understood by the bundled icon set, as (outline, filled)
const ICON_TABLE: &[(&str, &str, &str)] = &[
    ("home", "home-outline", "home"),
    ("briefcase", "briefcase-outline", "briefcase"),
    ("chat", "chatbubbles-outline", "chatbubbles"),
    ("menu", "menu-outline", "menu"),
    ("search", "search-outline", "search"),
    ("clipboard", "clipboard-outline", "clipboard"),
    ("user", "person-outline", "person"),
    ("edit", "create-outline", "create"),
    ("tools", "hammer-outline", "hammer"),
    ("wallet", "wallet-outline", "wallet"),
    ("star", "star-outline", "star"),
    ("heart", "heart-outline", "heart"),
    ("bell", "notifications-outline", "notifications"),
    ("settings", "settings-outline", "settings"),
    ("help", "help-circle-outline", "help-circle"),
    ("mail", "mail-outline", "mail"),
];

/// Resolve a symbolic icon name to an icon-set glyph
///
/// Unknown names are returned unchanged.
pub fn resolve_icon(name: &str, active: bool) -> &str {
    ICON_TABLE
        .iter()
        .find(|(symbol, _, _)| *symbol == name)
        .map(|(_, outline, filled)| if active { *filled } else { *outline })
        .unwrap_or(name)
}

// =============================================================================
// Accessibility
// =============================================================================

/// Baseline accessibility attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityProps {
    /// Accessible label for screen readers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// ARIA role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Whether the element is selected
    #[serde(default)]
    pub selected: bool,
    /// Whether the element is hidden from accessibility tree
    #[serde(default)]
    pub hidden: bool,
}

// =============================================================================
// Bottom Bar Component
// =============================================================================

/// One entry of the bottom bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomBarItem {
    /// Entry key
    pub key: String,
    /// Resolved icon glyph
    pub icon: String,
    /// Label text
    pub label: String,
    /// Route the entry points at
    pub route: String,
    /// Whether this entry matches the current route
    pub is_active: bool,
    /// Badge text (empty for none)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub badge: String,
    /// Whether pressing the entry toggles the drawer
    #[serde(default)]
    pub toggles_drawer: bool,
    /// Accessibility attributes
    pub accessibility: AccessibilityProps,
}

impl BottomBarItem {
    /// Build an item from a menu entry
    pub fn from_entry(entry: &MenuEntry, current_route: &str) -> Self {
        let is_active = entry.route == current_route;
        Self {
            key: entry.key.clone(),
            icon: resolve_icon(&entry.icon, is_active).to_string(),
            label: entry.label.clone(),
            route: entry.route.clone(),
            is_active,
            badge: entry.badge_text(),
            toggles_drawer: entry.kind() == EntryKind::ToggleDrawer,
            accessibility: AccessibilityProps {
                label: Some(entry.label.clone()),
                role: Some("tab".to_string()),
                selected: is_active,
                hidden: false,
            },
        }
    }
}

/// Fixed bottom navigation bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomBar {
    /// Bar items in display order
    pub items: Vec<BottomBarItem>,
    /// Safe area bottom inset
    #[serde(default)]
    pub safe_area_bottom: f32,
    /// Whether labels are shown under the icons
    pub show_labels: bool,
}

impl BottomBar {
    /// Build the bar for the given entries and route
    pub fn new(entries: &MenuEntries, current_route: &str) -> Self {
        Self {
            items: entries
                .bar_items
                .iter()
                .map(|entry| BottomBarItem::from_entry(entry, current_route))
                .collect(),
            safe_area_bottom: 0.0,
            show_labels: true,
        }
    }

    /// Set safe area bottom inset
    pub fn with_safe_area(mut self, inset: f32) -> Self {
        self.safe_area_bottom = inset;
        self
    }

    /// Set whether to show labels
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Get the currently active item key
    pub fn active_item(&self) -> Option<&str> {
        self.items
            .iter()
            .find(|i| i.is_active)
            .map(|i| i.key.as_str())
    }

    /// Find an item by key
    pub fn item(&self, key: &str) -> Option<&BottomBarItem> {
        self.items.iter().find(|i| i.key == key)
    }

    /// Compute layout styles
    pub fn computed_styles(&self) -> BottomBarStyles {
        BottomBarStyles {
            height: sizing::bottom_bar::HEIGHT,
            padding_bottom: self.safe_area_bottom.max(sizing::bottom_bar::MIN_SAFE_AREA),
            icon_size: sizing::icon::LG,
            z_index: z_index::BOTTOM_BAR,
            shadow: shadows::bar(),
        }
    }
}

/// Computed styles for the bottom bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomBarStyles {
    /// Bar height without padding
    pub height: f32,
    /// Bottom padding (for safe area)
    pub padding_bottom: f32,
    /// Icon size
    pub icon_size: f32,
    /// Stacking layer
    pub z_index: i32,
    /// Upward shadow
    pub shadow: Shadow,
}

// =============================================================================
// Avatar Component
// =============================================================================

/// User avatar with an initial fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Image URL (None renders the initial)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Alternative text
    pub alt: String,
    /// Size in pixels
    pub size: f32,
}

impl Avatar {
    /// Create a new avatar
    pub fn new(alt: impl Into<String>) -> Self {
        Self {
            src: None,
            alt: alt.into(),
            size: sizing::avatar::MD,
        }
    }

    /// Set image source; blank URLs are ignored
    pub fn with_src(mut self, src: Option<impl Into<String>>) -> Self {
        self.src = src
            .map(Into::<String>::into)
            .filter(|s| !s.trim().is_empty());
        self
    }

    /// Set size
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Uppercased first letter of the alt text, `?` if there is none
    pub fn initial(&self) -> String {
        self.alt
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Whether the initial is rendered instead of an image
    pub fn shows_initial(&self) -> bool {
        self.src.is_none()
    }

    /// Corner radius for a circle
    pub fn border_radius(&self) -> f32 {
        self.size / 2.0
    }
}

// =============================================================================
// Drawer Panel Component
// =============================================================================

/// Signed-in user shown in the drawer header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub display_name: String,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Create a profile
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    /// Set avatar URL
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// One row of the drawer list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerRow {
    /// Entry key
    pub key: String,
    /// Resolved icon glyph
    pub icon: String,
    /// Label text
    pub label: String,
    /// Badge text (empty for none)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub badge: String,
    /// Accessibility attributes
    pub accessibility: AccessibilityProps,
}

impl From<&MenuEntry> for DrawerRow {
    fn from(entry: &MenuEntry) -> Self {
        Self {
            key: entry.key.clone(),
            icon: resolve_icon(&entry.icon, false).to_string(),
            label: entry.label.clone(),
            badge: entry.badge_text(),
            accessibility: AccessibilityProps {
                label: Some(entry.label.clone()),
                role: Some("menuitem".to_string()),
                ..Default::default()
            },
        }
    }
}

/// Slide-up drawer panel with its backdrop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerPanel {
    /// Header avatar
    pub avatar: Avatar,
    /// Header name
    pub display_name: String,
    /// Entry rows in display order
    pub rows: Vec<DrawerRow>,
    /// Vertical translation of the panel
    pub translate_y: f32,
    /// Backdrop opacity
    pub backdrop_opacity: f32,
    /// Panel height
    pub height: f32,
    /// Whether the panel and backdrop capture touches
    pub blocks_touches: bool,
    /// Whether anything needs drawing at all
    pub visible: bool,
    /// Accessibility attributes
    pub accessibility: AccessibilityProps,
}

impl DrawerPanel {
    /// Build the panel from the latest snapshot
    pub fn new(snapshot: &DrawerSnapshot, entries: &MenuEntries, user: &UserProfile) -> Self {
        let visible = snapshot.phase != DrawerPhase::Closed;
        Self {
            avatar: Avatar::new(user.display_name.clone()).with_src(user.avatar_url.clone()),
            display_name: user.display_name.clone(),
            rows: entries.drawer_items.iter().map(DrawerRow::from).collect(),
            translate_y: snapshot.visual_offset,
            backdrop_opacity: snapshot.backdrop_opacity,
            height: snapshot.panel_height,
            blocks_touches: snapshot.is_open,
            visible,
            accessibility: AccessibilityProps {
                label: Some("Menu".to_string()),
                role: Some("menu".to_string()),
                selected: false,
                hidden: !visible,
            },
        }
    }

    /// Find a row by key
    pub fn row(&self, key: &str) -> Option<&DrawerRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Height of the list area below the handle and header
    pub fn list_height(&self) -> f32 {
        let chrome = sizing::drawer::HANDLE_HEIGHT
            + spacing::SPACE_MD * 2.0
            + sizing::drawer::HEADER_HEIGHT;
        (self.height - chrome).max(0.0)
    }

    /// Whether the rows overflow the list area and need scrolling
    pub fn is_scrollable(&self) -> bool {
        self.rows.len() as f32 * sizing::drawer::ROW_HEIGHT > self.list_height()
    }

    /// Compute layout styles
    pub fn computed_styles(&self) -> DrawerPanelStyles {
        DrawerPanelStyles {
            corner_radius: radius::XL,
            handle_width: sizing::drawer::HANDLE_WIDTH,
            handle_height: sizing::drawer::HANDLE_HEIGHT,
            handle_radius: radius::FULL,
            row_height: sizing::drawer::ROW_HEIGHT,
            row_padding: spacing::SPACE_LG,
            icon_size: sizing::icon::MD,
            z_index: z_index::DRAWER,
            backdrop_z_index: z_index::BACKDROP,
            shadow: shadows::panel(),
        }
    }
}

/// Clamp a requested panel height to the screen
pub fn panel_height_for_screen(requested: f32, screen_height: f32) -> f32 {
    requested.min(screen_height * sizing::drawer::MAX_SCREEN_FRACTION)
}

/// Computed styles for the drawer panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerPanelStyles {
    /// Top corner radius
    pub corner_radius: f32,
    /// Drag handle width
    pub handle_width: f32,
    /// Drag handle height
    pub handle_height: f32,
    /// Drag handle corner radius
    pub handle_radius: f32,
    /// Row height
    pub row_height: f32,
    /// Horizontal row padding
    pub row_padding: f32,
    /// Row icon size
    pub icon_size: f32,
    /// Panel stacking layer
    pub z_index: i32,
    /// Backdrop stacking layer
    pub backdrop_z_index: i32,
    /// Upward shadow
    pub shadow: Shadow,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::{derive_entries, Role};

    fn snapshot(phase: DrawerPhase, offset: f32, opacity: f32) -> DrawerSnapshot {
        DrawerSnapshot {
            phase,
            is_open: phase.is_open(),
            panel_offset: offset,
            backdrop_opacity: opacity,
            drag_offset: 0.0,
            visual_offset: offset,
            panel_height: 520.0,
        }
    }

    #[test]
    fn test_resolve_icon() {
        assert_eq!(resolve_icon("home", false), "home-outline");
        assert_eq!(resolve_icon("home", true), "home");
        assert_eq!(resolve_icon("custom-glyph", true), "custom-glyph");
    }

    #[test]
    fn test_bottom_bar_active_matches_route() {
        let entries = derive_entries(Some(Role::Worker));
        let bar = BottomBar::new(&entries, "/jobs");
        assert_eq!(bar.active_item(), Some("jobs"));
        assert_eq!(bar.items.iter().filter(|i| i.is_active).count(), 1);

        let jobs = bar.item("jobs").unwrap();
        assert_eq!(jobs.icon, "briefcase");
        assert!(jobs.accessibility.selected);
        assert_eq!(jobs.accessibility.role.as_deref(), Some("tab"));
    }

    #[test]
    fn test_bottom_bar_no_active_on_drawer_route() {
        let entries = derive_entries(Some(Role::Client));
        let bar = BottomBar::new(&entries, "/settings");
        assert_eq!(bar.active_item(), None);
        assert!(bar.item("menu").unwrap().toggles_drawer);
        assert!(!bar.item("home").unwrap().toggles_drawer);
    }

    #[test]
    fn test_bottom_bar_badges() {
        let mut entries = derive_entries(Some(Role::Worker));
        entries.set_badge("messages", Some(150));
        let bar = BottomBar::new(&entries, "/home");
        assert_eq!(bar.item("messages").unwrap().badge, "99+");
        assert_eq!(bar.item("home").unwrap().badge, "");
    }

    #[test]
    fn test_bottom_bar_safe_area() {
        let entries = derive_entries(None);
        let bar = BottomBar::new(&entries, "/home");
        assert_eq!(
            bar.computed_styles().padding_bottom,
            sizing::bottom_bar::MIN_SAFE_AREA
        );
        let bar = bar.with_safe_area(34.0);
        assert_eq!(bar.computed_styles().padding_bottom, 34.0);
    }

    #[test]
    fn test_avatar_initial_fallback() {
        let avatar = Avatar::new("maria lopez");
        assert!(avatar.shows_initial());
        assert_eq!(avatar.initial(), "M");

        let avatar = Avatar::new("").with_src(Some("  "));
        assert!(avatar.shows_initial());
        assert_eq!(avatar.initial(), "?");

        let avatar = Avatar::new("Jo").with_src(Some("https://cdn.example/jo.png"));
        assert!(!avatar.shows_initial());
        assert_eq!(avatar.border_radius(), sizing::avatar::MD / 2.0);
    }

    #[test]
    fn test_drawer_panel_closed() {
        let entries = derive_entries(Some(Role::Worker));
        let user = UserProfile::new("Ana");
        let panel = DrawerPanel::new(&snapshot(DrawerPhase::Closed, 520.0, 0.0), &entries, &user);

        assert!(!panel.visible);
        assert!(!panel.blocks_touches);
        assert!(panel.accessibility.hidden);
        assert_eq!(panel.translate_y, 520.0);
        assert_eq!(panel.rows.len(), entries.drawer_items.len());
    }

    #[test]
    fn test_drawer_panel_open() {
        let entries = derive_entries(Some(Role::Client));
        let user = UserProfile::new("Ana").with_avatar("https://cdn.example/ana.png");
        let panel = DrawerPanel::new(&snapshot(DrawerPhase::Open, 0.0, 0.5), &entries, &user);

        assert!(panel.visible);
        assert!(panel.blocks_touches);
        assert_eq!(panel.translate_y, 0.0);
        assert_eq!(panel.backdrop_opacity, 0.5);
        assert!(!panel.avatar.shows_initial());
        assert_eq!(panel.row("profile").unwrap().icon, "person-outline");
    }

    #[test]
    fn test_drawer_panel_closing_is_visible_but_passes_touches() {
        let entries = derive_entries(None);
        let panel = DrawerPanel::new(
            &snapshot(DrawerPhase::Closing, 260.0, 0.25),
            &entries,
            &UserProfile::default(),
        );
        assert!(panel.visible);
        assert!(!panel.blocks_touches);
    }

    #[test]
    fn test_drawer_panel_scrolls_when_short() {
        let entries = derive_entries(Some(Role::Worker));
        let mut snap = snapshot(DrawerPhase::Open, 0.0, 0.5);
        snap.panel_height = 200.0;
        let panel = DrawerPanel::new(&snap, &entries, &UserProfile::new("Ana"));
        assert!(panel.is_scrollable());

        snap.panel_height = 1000.0;
        let panel = DrawerPanel::new(&snap, &entries, &UserProfile::new("Ana"));
        assert!(!panel.is_scrollable());
    }

    #[test]
    fn test_panel_height_for_screen() {
        assert_eq!(panel_height_for_screen(520.0, 800.0), 520.0);
        assert_eq!(panel_height_for_screen(520.0, 400.0), 340.0);
    }

    #[test]
    fn test_components_serialize() {
        let entries = derive_entries(Some(Role::Worker));
        let bar = BottomBar::new(&entries, "/home");
        let json = serde_json::to_string(&bar).unwrap();
        let parsed: BottomBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, parsed);
    }
}

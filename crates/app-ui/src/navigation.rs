//! Navigation system for Craftlink
//!
//! This module provides the host side of navigation:
//! - Route definitions for the marketplace screens
//! - Path parsing with [`Route::parse`]
//! - A stack-based [`NavigationState`]
//! - [`StackNavigator`], the adapter the drawer core navigates through

use app_state::Navigator;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

// =============================================================================
// Errors
// =============================================================================

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Path did not match any route
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// A sub-screen was requested before its container was on the stack
    #[error("Cannot show {route}: container {container} is not mounted")]
    ContainerNotMounted {
        /// Requested route path
        route: String,
        /// Missing container path
        container: String,
    },
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens of the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    // Main screens
    /// Home feed
    #[default]
    Home,
    /// Job offers (craftsmen)
    Jobs,
    /// Single job offer
    JobDetail {
        /// Job ID
        id: String,
    },
    /// Craftsman search (clients)
    Search {
        /// Search query
        #[serde(skip_serializing_if = "Option::is_none")]
        q: Option<String>,
    },
    /// Service requests (clients)
    Requests,
    /// Single service request
    RequestDetail {
        /// Request ID
        id: String,
    },
    /// Conversations
    Messages,
    /// Single conversation
    Conversation {
        /// Conversation ID
        id: String,
    },

    // Profile
    /// Own profile, container of the profile sub-screens
    Profile,
    /// Profile as other users see it
    PublicProfile,
    /// Profile editor
    EditProfile,

    // Drawer screens
    /// Offered services (craftsmen)
    Services,
    /// Earnings overview (craftsmen)
    Earnings,
    /// Received reviews
    Reviews,
    /// Saved craftsmen (clients)
    Favorites,
    /// Notifications
    Notifications,
    /// Settings
    Settings,
    /// Help and support
    Help,

    // Error
    /// Not found
    NotFound,
}

impl Route {
    /// Get the URL path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/home".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::JobDetail { id } => format!("/jobs/{}", urlencoding::encode(id)),
            Route::Search { q } => match q {
                Some(q) => format!("/search?q={}", urlencoding::encode(q)),
                None => "/search".to_string(),
            },
            Route::Requests => "/requests".to_string(),
            Route::RequestDetail { id } => format!("/requests/{}", urlencoding::encode(id)),
            Route::Messages => "/messages".to_string(),
            Route::Conversation { id } => format!("/messages/{}", urlencoding::encode(id)),
            Route::Profile => "/profile".to_string(),
            Route::PublicProfile => "/profile/public".to_string(),
            Route::EditProfile => "/profile/edit".to_string(),
            Route::Services => "/services".to_string(),
            Route::Earnings => "/earnings".to_string(),
            Route::Reviews => "/reviews".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Help => "/help".to_string(),
            Route::NotFound => "/not-found".to_string(),
        }
    }

    /// Container screen that must be mounted before this one
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::PublicProfile | Route::EditProfile => Some(Route::Profile),
            Route::JobDetail { .. } => Some(Route::Jobs),
            Route::RequestDetail { .. } => Some(Route::Requests),
            Route::Conversation { .. } => Some(Route::Messages),
            _ => None,
        }
    }

    /// Parse a path such as `/jobs/42` or `/search?q=tiler`
    ///
    /// Unknown paths map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Route {
        let (pathname, query) = path.split_once('?').unwrap_or((path, ""));
        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] | ["home"] => Some(Route::Home),
            ["jobs"] => Some(Route::Jobs),
            ["jobs", id] => decode(id).map(|id| Route::JobDetail { id }),
            ["search"] => Some(Route::Search {
                q: query_value(query, "q"),
            }),
            ["requests"] => Some(Route::Requests),
            ["requests", id] => decode(id).map(|id| Route::RequestDetail { id }),
            ["messages"] => Some(Route::Messages),
            ["messages", id] => decode(id).map(|id| Route::Conversation { id }),
            ["profile"] => Some(Route::Profile),
            ["profile", "public"] => Some(Route::PublicProfile),
            ["profile", "edit"] => Some(Route::EditProfile),
            ["services"] => Some(Route::Services),
            ["earnings"] => Some(Route::Earnings),
            ["reviews"] => Some(Route::Reviews),
            ["favorites"] => Some(Route::Favorites),
            ["notifications"] => Some(Route::Notifications),
            ["settings"] => Some(Route::Settings),
            ["help"] => Some(Route::Help),
            _ => None,
        };
        route.unwrap_or(Route::NotFound)
    }

    /// Get a display title for this route
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Jobs => "Jobs",
            Route::JobDetail { .. } => "Job",
            Route::Search { .. } => "Find a craftsman",
            Route::Requests => "My requests",
            Route::RequestDetail { .. } => "Request",
            Route::Messages => "Messages",
            Route::Conversation { .. } => "Chat",
            Route::Profile => "Profile",
            Route::PublicProfile => "Public profile",
            Route::EditProfile => "Edit profile",
            Route::Services => "My services",
            Route::Earnings => "Earnings",
            Route::Reviews => "Reviews",
            Route::Favorites => "Saved craftsmen",
            Route::Notifications => "Notifications",
            Route::Settings => "Settings",
            Route::Help => "Help & support",
            Route::NotFound => "Not found",
        }
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Stack navigation state
///
/// The root entry is always present, so there is always a current route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    root: StackEntry,
    pushed: Vec<StackEntry>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl NavigationState {
    /// Create a stack with `root` at the bottom
    pub fn new(root: Route) -> Self {
        Self {
            root: StackEntry::new(root),
            pushed: Vec::new(),
        }
    }

    /// Get the current (top) route
    pub fn current_route(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.pushed.last().unwrap_or(&self.root)
    }

    /// Iterate entries bottom to top
    pub fn entries(&self) -> impl Iterator<Item = &StackEntry> {
        std::iter::once(&self.root).chain(self.pushed.iter())
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        1 + self.pushed.len()
    }

    /// Whether `route` is anywhere on the stack
    pub fn is_mounted(&self, route: &Route) -> bool {
        self.entries().any(|e| &e.route == route)
    }

    /// Navigate to a route
    ///
    /// A route already on the stack is returned to by popping everything
    /// above it; otherwise it is pushed. Sub-screens require their
    /// container to be mounted.
    pub fn navigate(&mut self, route: Route) -> Result<()> {
        if let Some(container) = route.parent() {
            if !self.is_mounted(&container) {
                return Err(NavigationError::ContainerNotMounted {
                    route: route.to_path(),
                    container: container.to_path(),
                });
            }
        }

        if self.root.route == route {
            self.pushed.clear();
        } else if let Some(index) = self.pushed.iter().position(|e| e.route == route) {
            self.pushed.truncate(index + 1);
        } else {
            self.pushed.push(StackEntry::new(route));
        }
        Ok(())
    }

    /// Go back (returns false at the root)
    pub fn go_back(&mut self) -> bool {
        self.pushed.pop().is_some()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.pushed.is_empty()
    }
}

fn decode(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}

fn query_value(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .and_then(|(_, value)| decode(value))
}

// =============================================================================
// Stack Navigator
// =============================================================================

/// Navigator backed by a [`NavigationState`]
///
/// Publishes the current path after every change so the drawer runtime can
/// observe route changes made by any screen.
pub struct StackNavigator {
    state: Mutex<NavigationState>,
    current_tx: watch::Sender<String>,
}

impl StackNavigator {
    /// Create a navigator showing `initial`
    pub fn new(initial: Route) -> Self {
        let (current_tx, _) = watch::channel(initial.to_path());
        Self {
            state: Mutex::new(NavigationState::new(initial)),
            current_tx,
        }
    }

    /// Navigate to a path, reporting failures
    pub fn try_navigate(&self, path: &str) -> Result<()> {
        let route = Route::parse(path);
        if route == Route::NotFound {
            return Err(NavigationError::UnknownRoute(path.to_string()));
        }

        let current = {
            let mut state = self.state.lock();
            state.navigate(route)?;
            state.current_route().to_path()
        };
        self.publish(current);
        Ok(())
    }

    /// Go back one screen
    pub fn go_back(&self) -> bool {
        let (popped, current) = {
            let mut state = self.state.lock();
            let popped = state.go_back();
            (popped, state.current_route().to_path())
        };
        if popped {
            self.publish(current);
        }
        popped
    }

    /// Current route
    pub fn current_route(&self) -> Route {
        self.state.lock().current_route().clone()
    }

    /// Routes on the stack, bottom to top
    pub fn stack(&self) -> Vec<Route> {
        self.state.lock().entries().map(|e| e.route.clone()).collect()
    }

    /// Subscribe to current path changes
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current_tx.subscribe()
    }

    fn publish(&self, path: String) {
        self.current_tx.send_if_modified(|current| {
            if *current != path {
                *current = path;
                true
            } else {
                false
            }
        });
    }
}

impl Navigator for StackNavigator {
    fn navigate(&self, route: &str) {
        if let Err(e) = self.try_navigate(route) {
            tracing::warn!("Navigation to {} failed: {}", route, e);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_to_path() {
        assert_eq!(Route::Home.to_path(), "/home");
        assert_eq!(Route::PublicProfile.to_path(), "/profile/public");
        assert_eq!(
            Route::JobDetail {
                id: "j 42".to_string()
            }
            .to_path(),
            "/jobs/j%2042"
        );
        assert_eq!(
            Route::Search {
                q: Some("tiler".to_string())
            }
            .to_path(),
            "/search?q=tiler"
        );
    }

    #[test]
    fn test_parse_round_trips_paths() {
        let routes = [
            Route::Home,
            Route::Jobs,
            Route::JobDetail {
                id: "abc".to_string(),
            },
            Route::Search { q: None },
            Route::Conversation {
                id: "c/1".to_string(),
            },
            Route::Profile,
            Route::PublicProfile,
            Route::EditProfile,
            Route::Help,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_path()), route);
        }
    }

    #[test]
    fn test_parse_root_and_query() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(
            Route::parse("/search?q=plumber"),
            Route::Search {
                q: Some("plumber".to_string())
            }
        );
        assert_eq!(
            Route::parse("/search?page=2&q=roof%20repair"),
            Route::Search {
                q: Some("roof repair".to_string())
            }
        );
        assert_eq!(Route::parse("/search?page=2"), Route::Search { q: None });
    }

    #[test]
    fn test_parse_not_found() {
        assert_eq!(Route::parse("/nonexistent/path"), Route::NotFound);
        assert_eq!(Route::parse("/menu"), Route::NotFound);
        assert_eq!(Route::parse("/profile/public/extra"), Route::NotFound);
    }

    #[test]
    fn test_route_parent() {
        assert_eq!(Route::PublicProfile.parent(), Some(Route::Profile));
        assert_eq!(Route::Profile.parent(), None);
        assert_eq!(
            Route::Conversation { id: "1".into() }.parent(),
            Some(Route::Messages)
        );
    }

    #[test]
    fn test_stack_push_and_pop_back_to_existing() {
        let mut state = NavigationState::default();
        state.navigate(Route::Jobs).unwrap();
        state.navigate(Route::Messages).unwrap();
        assert_eq!(state.depth(), 3);

        state.navigate(Route::Jobs).unwrap();
        assert_eq!(state.depth(), 2);
        assert_eq!(*state.current_route(), Route::Jobs);

        state.navigate(Route::Home).unwrap();
        assert_eq!(state.depth(), 1);
        assert!(!state.can_go_back());
        assert!(!state.go_back());
    }

    #[test]
    fn test_sub_screen_requires_container() {
        let mut state = NavigationState::default();
        let err = state.navigate(Route::PublicProfile).unwrap_err();
        assert_eq!(
            err,
            NavigationError::ContainerNotMounted {
                route: "/profile/public".to_string(),
                container: "/profile".to_string(),
            }
        );

        state.navigate(Route::Profile).unwrap();
        state.navigate(Route::PublicProfile).unwrap();
        assert_eq!(*state.current_route(), Route::PublicProfile);
        assert!(state.is_mounted(&Route::Profile));
    }

    #[test]
    fn test_stack_navigator_publishes_changes() {
        let navigator = StackNavigator::new(Route::Home);
        let mut rx = navigator.subscribe();
        assert_eq!(*rx.borrow_and_update(), "/home");

        navigator.navigate("/jobs");
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "/jobs");

        navigator.navigate("/jobs");
        assert!(!rx.has_changed().unwrap());

        assert!(navigator.go_back());
        assert_eq!(*rx.borrow_and_update(), "/home");
    }

    #[test]
    fn test_stack_navigator_rejects_unknown_and_unmounted() {
        let navigator = StackNavigator::new(Route::Home);
        assert_eq!(
            navigator.try_navigate("/nowhere"),
            Err(NavigationError::UnknownRoute("/nowhere".to_string()))
        );
        assert!(matches!(
            navigator.try_navigate("/profile/public"),
            Err(NavigationError::ContainerNotMounted { .. })
        ));

        // Trait entry point swallows the error
        navigator.navigate("/nowhere");
        assert_eq!(navigator.current_route(), Route::Home);
    }

    #[test]
    fn test_two_step_profile_navigation() {
        let navigator = StackNavigator::new(Route::Home);
        navigator.navigate("/profile");
        navigator.navigate("/profile/public");
        assert_eq!(
            navigator.stack(),
            vec![Route::Home, Route::Profile, Route::PublicProfile]
        );
    }

    #[test]
    fn test_route_serialization() {
        let route = Route::JobDetail {
            id: "123".to_string(),
        };
        let json = serde_json::to_string(&route).unwrap();
        let parsed: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(route, parsed);
    }
}

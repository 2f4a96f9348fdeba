//! Capability to change screens
//!
//! The drawer core never inspects routes: it hands them to whatever
//! navigator the host injected, after the drawer has closed.

/// External screen navigator
///
/// Implementations decide what an unknown route means; the core forwards
/// routes verbatim.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Request a screen change
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, route: &str) {
        self(route)
    }
}

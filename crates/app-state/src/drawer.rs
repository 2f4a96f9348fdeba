//! Drawer state machine
//!
//! Orchestrates the slide-up drawer attached to the bottom bar. Inputs are
//! button presses, drag gestures and route changes observed on the host
//! navigator; outputs are animated values, a published [`DrawerSnapshot`]
//! and navigation requests.
//!
//! ```text
//! CLOSED --open/toggle--> OPENING --complete--> OPEN
//! OPEN   --close/toggle-> CLOSING --complete--> CLOSED
//! OPEN   --drag start---> DRAGGING
//! DRAGGING --release past threshold--> CLOSING
//! DRAGGING --release otherwise-------> OPEN (spring snap-back)
//! any    --route change (next tick)--> CLOSING (force-close)
//! ```
//!
//! Time advances only through [`DrawerController::advance`], which the
//! runtime calls once per frame. Everything runs on one task, so no locks
//! are involved.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

use app_core::menu::{EntryKind, MenuEntry, PROFILE_ROUTE};

use crate::animation::{AnimationDriver, TransitionComplete, TransitionKind};
use crate::config::DrawerConfig;
use crate::gesture::{GestureOutcome, GestureRecognizer};
use crate::navigator::Navigator;

/// Capacity of the drawer event channel
const EVENT_CAPACITY: usize = 32;

// =============================================================================
// Public State
// =============================================================================

/// Drawer lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DrawerPhase {
    /// Hidden, at rest
    #[default]
    Closed,
    /// Sliding up
    Opening,
    /// Fully open, at rest
    Open,
    /// Sliding down
    Closing,
    /// Following the user's finger (only entered from `Open`)
    Dragging,
}

impl DrawerPhase {
    /// Whether the drawer counts as open for host layout decisions
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            DrawerPhase::Opening | DrawerPhase::Open | DrawerPhase::Dragging
        )
    }

    /// Whether the phase is one of the resting states
    pub fn is_settled(&self) -> bool {
        matches!(self, DrawerPhase::Open | DrawerPhase::Closed)
    }
}

/// Everything the host needs to draw the drawer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerSnapshot {
    /// Current phase
    pub phase: DrawerPhase,
    /// Whether the drawer counts as open
    pub is_open: bool,
    /// Panel offset (`0.0` open, panel height closed)
    pub panel_offset: f32,
    /// Backdrop opacity
    pub backdrop_opacity: f32,
    /// Live drag offset
    pub drag_offset: f32,
    /// Drawn panel translation
    pub visual_offset: f32,
    /// Panel height
    pub panel_height: f32,
}

/// Discrete drawer events
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerEvent {
    /// Open transition completed
    Opened,
    /// Drawer reached the closed state
    Closed,
    /// A route change forced the drawer closed
    ForceClosed {
        /// Route that was observed
        route: String,
    },
    /// A drag ended
    GestureReleased {
        /// How it was classified
        outcome: GestureOutcome,
    },
    /// A navigation was handed to the navigator
    NavigationRequested {
        /// Requested route
        route: String,
    },
}

#[derive(Debug, Clone)]
struct ScheduledNavigation {
    due: Duration,
    route: String,
}

// =============================================================================
// Controller
// =============================================================================

/// The drawer state machine
pub struct DrawerController {
    config: DrawerConfig,
    phase: DrawerPhase,
    animations: AnimationDriver,
    gesture: GestureRecognizer,
    navigator: Arc<dyn Navigator>,
    current_route: Option<String>,
    pending_force_close: Option<String>,
    scheduled: Vec<ScheduledNavigation>,
    clock: Duration,
    snapshot_tx: watch::Sender<DrawerSnapshot>,
    events_tx: broadcast::Sender<DrawerEvent>,
}

impl DrawerController {
    /// Create a closed drawer
    ///
    /// The configuration is assumed valid; see [`DrawerConfig::validate`].
    pub fn new(config: DrawerConfig, navigator: Arc<dyn Navigator>) -> Self {
        let animations = AnimationDriver::new(config.panel_height, config.driver_timing());
        let gesture = GestureRecognizer::new(config.gesture);
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let (snapshot_tx, _) = watch::channel(DrawerSnapshot {
            phase: DrawerPhase::Closed,
            is_open: false,
            panel_offset: animations.panel_offset(),
            backdrop_opacity: animations.backdrop_opacity(),
            drag_offset: animations.drag_offset(),
            visual_offset: animations.visual_offset(),
            panel_height: animations.panel_height(),
        });

        Self {
            config,
            phase: DrawerPhase::Closed,
            animations,
            gesture,
            navigator,
            current_route: None,
            pending_force_close: None,
            scheduled: Vec::new(),
            clock: Duration::ZERO,
            snapshot_tx,
            events_tx,
        }
    }

    /// Current phase
    pub fn phase(&self) -> DrawerPhase {
        self.phase
    }

    /// Whether the drawer counts as open
    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    /// Last route observed on the host navigator
    pub fn current_route(&self) -> Option<&str> {
        self.current_route.as_deref()
    }

    /// Configuration in use
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Current drawable state
    pub fn snapshot(&self) -> DrawerSnapshot {
        DrawerSnapshot {
            phase: self.phase,
            is_open: self.phase.is_open(),
            panel_offset: self.animations.panel_offset(),
            backdrop_opacity: self.animations.backdrop_opacity(),
            drag_offset: self.animations.drag_offset(),
            visual_offset: self.animations.visual_offset(),
            panel_height: self.animations.panel_height(),
        }
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<DrawerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to discrete events
    pub fn subscribe_events(&self) -> broadcast::Receiver<DrawerEvent> {
        self.events_tx.subscribe()
    }

    /// Sender used by runtime handles to hand out event receivers
    pub(crate) fn events_sender(&self) -> broadcast::Sender<DrawerEvent> {
        self.events_tx.clone()
    }

    /// Whether the runtime must keep ticking frames
    pub fn needs_frame(&self) -> bool {
        self.pending_force_close.is_some()
            || self.animations.is_animating()
            || !self.scheduled.is_empty()
    }

    // -------------------------------------------------------------------------
    // Button-driven transitions
    // -------------------------------------------------------------------------

    /// Open the drawer; no-op if already open or opening
    pub fn open(&mut self) {
        if self.pending_force_close.is_some() {
            tracing::debug!("Ignoring open while a force-close is pending");
            return;
        }
        match self.phase {
            DrawerPhase::Closed | DrawerPhase::Closing => {
                self.transition(DrawerPhase::Opening);
                self.animations.start(TransitionKind::Open);
                self.publish();
            }
            DrawerPhase::Opening | DrawerPhase::Open | DrawerPhase::Dragging => {}
        }
    }

    /// Close the drawer; no-op if already closed or closing
    pub fn close(&mut self) {
        match self.phase {
            DrawerPhase::Opening | DrawerPhase::Open | DrawerPhase::Dragging => {
                self.begin_close();
                self.publish();
            }
            DrawerPhase::Closing | DrawerPhase::Closed => {}
        }
    }

    /// Close if open, open otherwise
    pub fn toggle(&mut self) {
        if self.phase.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Finger landed on the panel; only honoured while open
    pub fn drag_start(&mut self) {
        if self.phase != DrawerPhase::Open || self.pending_force_close.is_some() {
            return;
        }
        // A running snap-back is taken over from wherever it is drawn
        let origin = self.animations.visual_offset();
        self.animations.snap(true);
        self.animations.set_drag(origin);
        self.gesture.begin(origin);
        self.transition(DrawerPhase::Dragging);
        self.publish();
    }

    /// Finger moved; `displacement` is measured from where it landed
    pub fn drag_move(&mut self, displacement: f32) {
        if self.phase != DrawerPhase::Dragging {
            return;
        }
        let offset = self.gesture.update(displacement);
        self.animations.set_drag(offset);
        self.publish();
    }

    /// Finger lifted
    pub fn drag_end(&mut self, displacement: f32, velocity: f32) {
        if self.phase != DrawerPhase::Dragging {
            return;
        }
        if let Some(release) = self.gesture.release(displacement, velocity) {
            self.finish_drag(release.outcome);
        }
    }

    /// The platform took the touch away mid-drag
    pub fn drag_terminate(&mut self) {
        if self.phase != DrawerPhase::Dragging {
            return;
        }
        if let Some(release) = self.gesture.terminate() {
            self.finish_drag(release.outcome);
        }
    }

    fn finish_drag(&mut self, outcome: GestureOutcome) {
        tracing::debug!(?outcome, "Drag released");
        // Drag residue is folded into the panel offset before anything else runs
        self.animations.absorb_drag();
        match outcome {
            GestureOutcome::CommitClose => {
                self.transition(DrawerPhase::Closing);
                self.animations.start(TransitionKind::Close);
            }
            GestureOutcome::Cancel => {
                self.transition(DrawerPhase::Open);
                self.animations.start(TransitionKind::SnapBack);
            }
        }
        let _ = self.events_tx.send(DrawerEvent::GestureReleased { outcome });
        self.publish();
    }

    // -------------------------------------------------------------------------
    // Route changes
    // -------------------------------------------------------------------------

    /// Record the navigator's active route
    ///
    /// The first observation only records the route. A later change while the
    /// drawer is not closed schedules a force-close for the next tick.
    pub fn route_changed(&mut self, route: &str) {
        let previous = self.current_route.replace(route.to_string());
        match previous {
            None => {}
            Some(previous) if previous == route => {}
            Some(_) => {
                if self.phase != DrawerPhase::Closed {
                    tracing::debug!(route, phase = ?self.phase, "Route changed, force-close scheduled");
                    self.pending_force_close = Some(route.to_string());
                }
            }
        }
    }

    fn apply_force_close(&mut self, route: String) {
        if self.phase == DrawerPhase::Closed {
            return;
        }
        tracing::info!(route = %route, phase = ?self.phase, "Force-closing drawer after route change");
        self.gesture.reset();
        self.animations.absorb_drag();
        self.transition(DrawerPhase::Closing);
        self.animations.start(TransitionKind::Close);
        let _ = self.events_tx.send(DrawerEvent::ForceClosed { route });
    }

    // -------------------------------------------------------------------------
    // Menu selection
    // -------------------------------------------------------------------------

    /// A bottom bar item was pressed
    ///
    /// The menu item toggles the drawer. Any other item closes the drawer
    /// instantly and navigates on the next tick.
    pub fn select_bar_entry(&mut self, entry: &MenuEntry) {
        match entry.kind() {
            EntryKind::ToggleDrawer => self.toggle(),
            EntryKind::PublicProfile => self.navigate_to_public_profile(entry),
            EntryKind::Screen => self.close_and_navigate(&entry.route),
        }
    }

    /// A drawer item was pressed
    ///
    /// Same policy as bar items. The public profile is reached through its
    /// container screen: the navigator only mounts the sub-screen once the
    /// container is on the stack.
    pub fn select_drawer_entry(&mut self, entry: &MenuEntry) {
        match entry.kind() {
            EntryKind::ToggleDrawer => self.toggle(),
            EntryKind::PublicProfile => self.navigate_to_public_profile(entry),
            EntryKind::Screen => self.close_and_navigate(&entry.route),
        }
    }

    fn close_and_navigate(&mut self, route: &str) {
        self.force_closed_now();
        self.schedule_navigation(route, Duration::ZERO);
        self.publish();
    }

    fn navigate_to_public_profile(&mut self, entry: &MenuEntry) {
        self.force_closed_now();
        self.schedule_navigation(PROFILE_ROUTE, Duration::ZERO);
        self.schedule_navigation(&entry.route, self.config.profile_navigation_delay());
        self.publish();
    }

    /// Jump to closed without the closing animation
    fn force_closed_now(&mut self) {
        self.pending_force_close = None;
        self.gesture.reset();
        self.animations.snap(false);
        if self.phase != DrawerPhase::Closed {
            self.transition(DrawerPhase::Closed);
            let _ = self.events_tx.send(DrawerEvent::Closed);
        }
    }

    fn schedule_navigation(&mut self, route: &str, delay: Duration) {
        self.scheduled.push(ScheduledNavigation {
            due: self.clock + delay,
            route: route.to_string(),
        });
    }

    // -------------------------------------------------------------------------
    // Layout & time
    // -------------------------------------------------------------------------

    /// The host measured the panel
    pub fn set_panel_height(&mut self, height: f32) {
        if !(height.is_finite() && height > 0.0) {
            tracing::warn!(height, "Ignoring invalid panel height");
            return;
        }
        self.config.panel_height = height;
        self.animations.set_panel_height(height);
        self.publish();
    }

    /// Advance one frame
    ///
    /// Order within a tick: pending force-close, animations, due navigations.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;

        if let Some(route) = self.pending_force_close.take() {
            self.apply_force_close(route);
        }

        if let Some(done) = self.animations.advance(dt) {
            self.on_transition_complete(done);
        }

        self.publish();
        self.dispatch_due_navigations();
    }

    fn on_transition_complete(&mut self, done: TransitionComplete) {
        match (done.kind, self.phase) {
            (TransitionKind::Open, DrawerPhase::Opening) => {
                self.transition(DrawerPhase::Open);
                tracing::info!("Drawer opened");
                let _ = self.events_tx.send(DrawerEvent::Opened);
            }
            (TransitionKind::Close, DrawerPhase::Closing) => {
                self.transition(DrawerPhase::Closed);
                tracing::info!("Drawer closed");
                let _ = self.events_tx.send(DrawerEvent::Closed);
            }
            (TransitionKind::SnapBack, _) => {}
            (kind, phase) => {
                tracing::debug!(?kind, ?phase, "Ignoring completion that no longer matches the phase");
            }
        }
    }

    fn dispatch_due_navigations(&mut self) {
        let clock = self.clock;
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|n| n.due <= clock);
        self.scheduled = waiting;

        for navigation in due {
            tracing::debug!(route = %navigation.route, "Requesting navigation");
            let _ = self.events_tx.send(DrawerEvent::NavigationRequested {
                route: navigation.route.clone(),
            });
            self.navigator.navigate(&navigation.route);
        }
    }

    fn transition(&mut self, next: DrawerPhase) {
        if self.phase != next {
            tracing::debug!(from = ?self.phase, to = ?next, "Drawer transition");
            self.phase = next;
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current != snapshot {
                *current = snapshot;
                true
            } else {
                false
            }
        });
    }

    fn begin_close(&mut self) {
        if self.phase == DrawerPhase::Dragging {
            self.gesture.reset();
            self.animations.absorb_drag();
        }
        self.transition(DrawerPhase::Closing);
        self.animations.start(TransitionKind::Close);
    }
}

impl std::fmt::Debug for DrawerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawerController")
            .field("phase", &self.phase)
            .field("current_route", &self.current_route)
            .field("pending_force_close", &self.pending_force_close)
            .field("scheduled", &self.scheduled.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Vertical drag recognition for the open drawer
//!
//! The recognizer turns a stream of downward displacements into a live
//! panel offset and, on release, decides whether the gesture closes the
//! drawer or snaps it back open.

use serde::{Deserialize, Serialize};

/// Thresholds separating a closing swipe from an aborted one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GestureConfig {
    /// Downward displacement (px) beyond which release closes
    pub close_distance: f32,
    /// Downward velocity (px/s) beyond which release closes
    pub close_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            close_distance: 100.0,
            close_velocity: 500.0,
        }
    }
}

/// Classification of a released drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureOutcome {
    /// Close the drawer
    CommitClose,
    /// Return to the open position
    Cancel,
}

/// Measurements taken when the finger lifted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRelease {
    /// Vertical displacement since the drag started (px, down is positive)
    pub displacement: f32,
    /// Vertical velocity at release (px/s, down is positive)
    pub velocity: f32,
    /// Resulting decision
    pub outcome: GestureOutcome,
}

/// Drag state machine for the panel
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    active: bool,
    origin: f32,
    drag_offset: f32,
    last_displacement: f32,
}

impl GestureRecognizer {
    /// Create an idle recognizer
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: false,
            origin: 0.0,
            drag_offset: 0.0,
            last_displacement: 0.0,
        }
    }

    /// Whether a drag is in progress
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Live offset, `0.0` when idle
    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    /// Thresholds in use
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Start tracking a drag
    ///
    /// `origin` is where the panel sat when the finger landed, so a drag that
    /// interrupts a snap-back continues from the drawn position.
    pub fn begin(&mut self, origin: f32) {
        self.active = true;
        self.origin = origin.max(0.0);
        self.drag_offset = self.origin;
        self.last_displacement = 0.0;
    }

    /// Feed a displacement sample and return the clamped offset
    ///
    /// Upward movement past the open position has no effect.
    pub fn update(&mut self, displacement: f32) -> f32 {
        if !self.active {
            return 0.0;
        }
        self.last_displacement = displacement;
        self.drag_offset = (self.origin + displacement).max(0.0);
        self.drag_offset
    }

    /// Classify a release without touching recognizer state
    pub fn classify(&self, displacement: f32, velocity: f32) -> GestureOutcome {
        if displacement > self.config.close_distance || velocity > self.config.close_velocity {
            GestureOutcome::CommitClose
        } else {
            GestureOutcome::Cancel
        }
    }

    /// Finish the drag
    ///
    /// The offset is zeroed regardless of the outcome. Returns `None` when no
    /// drag was active.
    pub fn release(&mut self, displacement: f32, velocity: f32) -> Option<GestureRelease> {
        if !self.active {
            return None;
        }
        let outcome = self.classify(displacement, velocity);
        self.reset();
        Some(GestureRelease {
            displacement,
            velocity,
            outcome,
        })
    }

    /// Release at the last reported displacement with zero velocity
    ///
    /// For touches taken over by the platform. Commits a close only if the
    /// drag already passed the distance threshold.
    pub fn terminate(&mut self) -> Option<GestureRelease> {
        let displacement = self.last_displacement;
        self.release(displacement, 0.0)
    }

    /// Drop any drag state
    pub fn reset(&mut self) {
        self.active = false;
        self.origin = 0.0;
        self.drag_offset = 0.0;
        self.last_displacement = 0.0;
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
